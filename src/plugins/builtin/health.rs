// 健康检查插件
// 代理入口 GET /health，认证服务器 RPC health/check

use actix_web::{web, HttpResponse, Result as ActixResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::errors::GatewayError;
use crate::extension::{AuthServices, ProxyWebHandlers, RpcService};
use crate::plugins::Plugin;

pub const HEALTH_PLUGIN: &str = "health";

/// 健康检查插件
pub struct HealthPlugin {
    service_name: String,
}

impl HealthPlugin {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }
}

impl Plugin for HealthPlugin {
    fn name(&self) -> &str {
        HEALTH_PLUGIN
    }

    fn register_proxy_web_handlers(&self, handlers: &mut ProxyWebHandlers) -> anyhow::Result<()> {
        let report = Arc::new(HealthReport {
            service: self.service_name.clone(),
        });
        handlers.mount("/health", move |cfg| {
            cfg.app_data(web::Data::from(report.clone()))
                .route("", web::get().to(health_check));
        })?;
        Ok(())
    }

    fn register_auth_services(&self, server: &mut AuthServices) -> anyhow::Result<()> {
        server.register(Arc::new(HealthService {
            report: HealthReport {
                service: self.service_name.clone(),
            },
        }))?;
        Ok(())
    }
}

struct HealthReport {
    service: String,
}

impl HealthReport {
    fn to_json(&self) -> Value {
        json!({
            "status": "healthy",
            "service": self.service,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339()
        })
    }
}

/// 健康检查端点
async fn health_check(report: web::Data<HealthReport>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(report.to_json()))
}

struct HealthService {
    report: HealthReport,
}

#[async_trait]
impl RpcService for HealthService {
    fn name(&self) -> &str {
        HEALTH_PLUGIN
    }

    fn methods(&self) -> &[&'static str] {
        &["check"]
    }

    async fn call(&self, _method: &str, _params: Value) -> Result<Value, GatewayError> {
        Ok(self.report.to_json())
    }
}
