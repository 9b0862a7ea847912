// 网关宿主
// 启动时依次广播三个扩展点，随后用注册结果构建 actix-web 应用

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use aionix_gateway_common::ApiResponse;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::errors::{get_request_id, ErrorHandlerMiddleware, GatewayError};
use crate::extension::{AuthServices, AuthWebHandlers, ProxyWebHandlers, AUTH_WEB_ROOT, RPC_ROOT};
use crate::plugins::PluginRegistry;

/// 网关服务器
///
/// 持有冻结后的三个注册目标，在每个 worker 中复用。
#[derive(Clone)]
pub struct GatewayServer {
    proxy_web: Arc<ProxyWebHandlers>,
    auth_web: Arc<AuthWebHandlers>,
    auth_services: Arc<AuthServices>,
    summary: Arc<GatewaySummary>,
    config: AppConfig,
}

/// 根路径返回的加载摘要
#[derive(Debug, Clone, serde::Serialize)]
pub struct GatewaySummary {
    pub service: String,
    pub version: String,
    pub plugins: Vec<String>,
    pub proxy_routes: Vec<String>,
    pub auth_routes: Vec<String>,
    pub rpc_services: Vec<String>,
}

impl GatewayServer {
    /// 依次广播认证 RPC 服务、认证 Web 处理器、代理 Web 处理器
    ///
    /// 任意一个插件注册失败都会中止构建，调用方应放弃启动。
    pub fn build(config: &AppConfig, registry: &mut PluginRegistry) -> Result<Self, GatewayError> {
        let mut auth_services = AuthServices::new();
        registry.register_auth_services(&mut auth_services)?;

        let mut auth_web = AuthWebHandlers::new();
        registry.register_auth_web_handlers(&mut auth_web)?;

        let mut proxy_web = ProxyWebHandlers::new();
        registry.register_proxy_web_handlers(&mut proxy_web)?;

        let summary = GatewaySummary {
            service: config.server.service_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            plugins: registry.plugin_names().into_iter().map(String::from).collect(),
            proxy_routes: proxy_web.routes().prefixes().into_iter().map(String::from).collect(),
            auth_routes: auth_web
                .routes()
                .prefixes()
                .into_iter()
                .map(|p| format!("{}{}", AUTH_WEB_ROOT, p))
                .collect(),
            rpc_services: auth_services.service_names().into_iter().map(String::from).collect(),
        };

        info!(
            plugins = ?summary.plugins,
            proxy_routes = ?summary.proxy_routes,
            auth_routes = ?summary.auth_routes,
            rpc_services = ?summary.rpc_services,
            "插件注册完成"
        );

        Ok(Self {
            proxy_web: Arc::new(proxy_web),
            auth_web: Arc::new(auth_web),
            auth_services: Arc::new(auth_services),
            summary: Arc::new(summary),
            config: config.clone(),
        })
    }

    pub fn summary(&self) -> &GatewaySummary {
        &self.summary
    }

    /// 挂载根路径、RPC 分发、认证路由和代理路由
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.auth_services.clone()))
            .app_data(web::Data::from(self.summary.clone()))
            .route("/", web::get().to(index))
            .route(&format!("{}/{{service}}/{{method}}", RPC_ROOT), web::post().to(dispatch_rpc));

        self.auth_web.apply(cfg);
        self.proxy_web.apply(cfg);
    }

    /// 启动 HTTP 服务器
    pub async fn run(self) -> std::io::Result<()> {
        let host = self.config.server.host.clone();
        let port = self.config.server.port;
        let workers = self.config.server.workers;
        let cors_origins = self.config.security.cors_origins.clone();

        info!("🌐 网关启动地址: http://{}:{}", host, port);

        let server = self.clone();
        let mut http_server = HttpServer::new(move || {
            App::new()
                .wrap(build_cors(&cors_origins))
                .wrap(ErrorHandlerMiddleware)
                .wrap(tracing_actix_web::TracingLogger::default())
                .configure(|cfg| server.configure(cfg))
        });

        if let Some(workers) = workers {
            http_server = http_server.workers(workers);
        }

        http_server.bind((host, port))?.run().await
    }
}

fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

/// 根路径处理器
async fn index(summary: web::Data<GatewaySummary>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "name": "Aionix Gateway",
        "gateway": summary.get_ref(),
        "rpc": format!("{}/{{service}}/{{method}}", RPC_ROOT),
        "timestamp": chrono::Utc::now(),
    })))
}

/// RPC 分发处理器
///
/// 成功和失败的响应都带上请求 ID。
async fn dispatch_rpc(
    req: actix_web::HttpRequest,
    path: web::Path<(String, String)>,
    body: web::Bytes,
    services: web::Data<AuthServices>,
) -> HttpResponse {
    let (service, method) = path.into_inner();
    let request_id = get_request_id(&req);

    let result = match parse_rpc_params(&body) {
        Ok(params) => services.dispatch(&service, &method, params).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(value) => {
            let mut response = ApiResponse::success(value);
            if let Some(request_id) = request_id {
                response = response.with_request_id(request_id);
            }
            HttpResponse::Ok().json(response)
        }
        Err(err) => err.to_http_response(request_id),
    }
}

/// 空请求体视为无参数，非空但不是合法 JSON 时报错
fn parse_rpc_params(body: &[u8]) -> Result<serde_json::Value, GatewayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::Value::Null);
    }

    Ok(serde_json::from_slice(body)?)
}
