// 错误处理系统测试

#[cfg(test)]
mod tests {
    use crate::errors::{ErrorHandlerMiddleware, ErrorResponse, GatewayError, get_request_id};
    use crate::extension::ExtensionPoint;
    use actix_web::{test as actix_test, web, App, HttpRequest, HttpResponse, ResponseError};
    use std::error::Error as _;

    #[derive(Debug, thiserror::Error)]
    #[error("路由冲突")]
    struct RouteClash;

    #[test]
    fn test_invalid_argument_error() {
        let error = GatewayError::invalid_argument("missing plugin");
        assert_eq!(error.error_code(), "INVALID_ARGUMENT");
        assert_eq!(error.status_code(), 400);
        assert!(error.is_client_error());
        assert!(!error.is_server_error());
        assert!(error.plugin_cause().is_none());
    }

    #[test]
    fn test_plugin_registration_error_keeps_cause() {
        let error = GatewayError::plugin_registration(
            "audit",
            ExtensionPoint::AuthServices,
            anyhow::Error::new(RouteClash),
        );

        assert_eq!(error.error_code(), "PLUGIN_REGISTRATION_ERROR");
        assert!(error.is_server_error());
        assert_eq!(error.failed_plugin(), Some("audit"));
        assert!(error.to_string().contains("audit"));
        assert!(error.to_string().contains("路由冲突"));

        let cause = error.plugin_cause().expect("cause");
        assert!(cause.downcast_ref::<RouteClash>().is_some());

        let source = error.source().expect("source");
        assert_eq!(source.to_string(), "路由冲突");
    }

    #[test]
    fn test_error_logging() {
        assert!(!GatewayError::validation("field", "message").should_log());
        assert!(!GatewayError::authentication("bad token").should_log());
        assert!(GatewayError::internal("something went wrong").should_log());
        assert!(GatewayError::invalid_state("already broadcast").should_log());
    }

    #[test]
    fn test_error_response_creation() {
        let error = GatewayError::plugin_registration(
            "audit",
            ExtensionPoint::ProxyWebHandlers,
            anyhow::anyhow!("boom"),
        );
        let response = ErrorResponse::from_error(&error).with_request_id("req-1".to_string());

        assert!(!response.success);
        assert_eq!(response.error.code, "PLUGIN_REGISTRATION_ERROR");
        assert_eq!(response.request_id.as_deref(), Some("req-1"));

        let details = response.error.details.expect("details");
        assert_eq!(details["plugin"], "audit");
        assert_eq!(details["extension_point"], "proxy_web_handlers");
    }

    #[test]
    fn test_response_error_status() {
        let response = GatewayError::not_found("rpc 服务 foo").error_response();
        assert_eq!(response.status(), 404);

        let response = GatewayError::conflict("prefix").error_response();
        assert_eq!(response.status(), 409);
    }

    #[test]
    fn test_common_error_conversion() {
        let common_error = aionix_gateway_common::CommonError::validation("测试验证错误");
        let error: GatewayError = common_error.into();
        assert_eq!(error.error_code(), "VALIDATION_ERROR");

        let common_error = aionix_gateway_common::CommonError::configuration("缺少配置");
        let error: GatewayError = common_error.into();
        assert_eq!(error.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "文件未找到");
        let error: GatewayError = io_error.into();
        assert_eq!(error.error_code(), "NOT_FOUND");

        let io_error = std::io::Error::new(std::io::ErrorKind::Other, "其他");
        let error: GatewayError = io_error.into();
        assert_eq!(error.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error: GatewayError = json_error.into();
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
    }

    async fn echo_request_id(req: HttpRequest) -> HttpResponse {
        HttpResponse::Ok().body(get_request_id(&req).unwrap_or_default())
    }

    #[actix_web::test]
    async fn test_middleware_propagates_request_id() {
        let app = actix_test::init_service(
            App::new()
                .wrap(ErrorHandlerMiddleware)
                .route("/echo", web::get().to(echo_request_id)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/echo")
            .insert_header(("X-Request-ID", "req-42"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-42");
        let body = actix_test::read_body(resp).await;
        assert_eq!(body, "req-42");
    }

    #[actix_web::test]
    async fn test_middleware_generates_request_id() {
        let app = actix_test::init_service(
            App::new()
                .wrap(ErrorHandlerMiddleware)
                .route("/echo", web::get().to(echo_request_id)),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/echo").to_request();
        let resp = actix_test::call_service(&app, req).await;

        let header = resp.headers().get("x-request-id").unwrap().to_str().unwrap().to_string();
        assert!(!header.is_empty());
        let body = actix_test::read_body(resp).await;
        assert_eq!(body, header.as_bytes());
    }

    async fn reject_with_request_id(req: HttpRequest) -> HttpResponse {
        GatewayError::not_found("插件 ghost").to_http_response(get_request_id(&req))
    }

    #[actix_web::test]
    async fn test_error_response_carries_request_id() {
        let app = actix_test::init_service(
            App::new()
                .wrap(ErrorHandlerMiddleware)
                .route("/missing", web::get().to(reject_with_request_id)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/missing")
            .insert_header(("X-Request-ID", "req-404"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-404");
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["request_id"], "req-404");
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[test]
    fn test_error_response_without_request_id() {
        let response = GatewayError::invalid_state("已广播").to_http_response(None);
        assert_eq!(response.status(), 409);
        assert!(response.headers().get("x-request-id").is_none());
    }
}
