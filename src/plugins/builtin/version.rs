// 版本信息插件

use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::extension::ProxyWebHandlers;
use crate::plugins::Plugin;

pub const VERSION_PLUGIN: &str = "version";

/// 在代理入口暴露 GET /version
pub struct VersionPlugin;

impl Plugin for VersionPlugin {
    fn name(&self) -> &str {
        VERSION_PLUGIN
    }

    fn register_proxy_web_handlers(&self, handlers: &mut ProxyWebHandlers) -> anyhow::Result<()> {
        handlers.mount("/version", |cfg| {
            cfg.route("", web::get().to(get_version));
        })?;
        Ok(())
    }
}

/// 获取版本信息
async fn get_version() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "build_profile": get_build_profile(),
    })))
}

pub fn get_build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
