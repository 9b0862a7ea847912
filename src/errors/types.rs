// 统一错误类型定义

use actix_web::{HttpResponse, ResponseError};
use aionix_gateway_common::{CommonError, RequestId};
use thiserror::Error;
use tracing::error;

use crate::extension::ExtensionPoint;

/// 网关统一错误类型
#[derive(Debug, Error)]
pub enum GatewayError {
    /// 配置错误
    #[error("配置错误: {message}")]
    Configuration { message: String },

    /// 参数无效
    #[error("参数无效: {message}")]
    InvalidArgument { message: String },

    /// 状态无效
    #[error("状态无效: {message}")]
    InvalidState { message: String },

    /// 插件注册失败，保留插件返回的原始错误
    #[error("插件 {plugin} 注册{extension_point}失败: {source}")]
    PluginRegistration {
        plugin: String,
        extension_point: ExtensionPoint,
        #[source]
        source: anyhow::Error,
    },

    /// 资源冲突
    #[error("资源冲突: {message}")]
    Conflict { message: String },

    /// 验证错误
    #[error("验证错误: {field} - {message}")]
    Validation { field: String, message: String },

    /// 资源未找到
    #[error("资源未找到: {resource}")]
    NotFound { resource: String },

    /// 认证错误
    #[error("认证错误: {message}")]
    Authentication { message: String },

    /// 内部服务器错误
    #[error("内部服务器错误: {message}")]
    Internal { message: String },
}

impl GatewayError {
    /// 获取错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::PluginRegistration { .. } => "PLUGIN_REGISTRATION_ERROR",
            Self::Conflict { .. } => "CONFLICT",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Authentication { .. } => "AUTHENTICATION_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Configuration { .. } => 500,
            Self::InvalidArgument { .. } => 400,
            Self::InvalidState { .. } => 409,
            Self::PluginRegistration { .. } => 500,
            Self::Conflict { .. } => 409,
            Self::Validation { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Authentication { .. } => 401,
            Self::Internal { .. } => 500,
        }
    }

    /// 是否为客户端错误
    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), 400..=499)
    }

    /// 是否为服务器错误
    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), 500..=599)
    }

    /// 是否应该记录错误日志
    pub fn should_log(&self) -> bool {
        !matches!(
            self,
            Self::Validation { .. } | Self::NotFound { .. } | Self::Authentication { .. }
        )
    }

    /// 插件返回的原始错误
    pub fn plugin_cause(&self) -> Option<&anyhow::Error> {
        match self {
            Self::PluginRegistration { source, .. } => Some(source),
            _ => None,
        }
    }

    /// 注册失败的插件名称
    pub fn failed_plugin(&self) -> Option<&str> {
        match self {
            Self::PluginRegistration { plugin, .. } => Some(plugin),
            _ => None,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// 创建插件注册错误
    pub fn plugin_registration(
        plugin: impl Into<String>,
        extension_point: ExtensionPoint,
        source: anyhow::Error,
    ) -> Self {
        Self::PluginRegistration {
            plugin: plugin.into(),
            extension_point,
            source,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// 实现 ResponseError trait 以便与 Actix Web 集成
impl ResponseError for GatewayError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::from_u16(self.status_code())
            .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        self.to_http_response(None)
    }
}

impl GatewayError {
    /// 生成错误响应，带上请求 ID 时同时写入响应体和响应头
    pub fn to_http_response(&self, request_id: Option<RequestId>) -> HttpResponse {
        if self.should_log() {
            error!(
                error_code = %self.error_code(),
                error_message = %self,
                request_id = ?request_id,
                "处理请求时发生错误"
            );
        }

        let response = crate::errors::ErrorResponse::from_error(self);
        match request_id {
            Some(request_id) => response.with_request_id(request_id),
            None => response,
        }
        .into_http_response()
    }
}

/// 从 CommonError 转换
impl From<CommonError> for GatewayError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::Validation { message } => Self::validation("general", message),
            CommonError::Configuration { message } => Self::configuration(message),
            CommonError::NotFound { resource } => Self::not_found(resource),
            CommonError::Internal { message } => Self::internal(message),
        }
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for GatewayError {
    fn from(err: config::ConfigError) -> Self {
        Self::configuration(format!("配置加载错误: {}", err))
    }
}

/// 从 std::io::Error 转换
impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found("文件或目录"),
            _ => Self::internal(format!("IO 错误: {}", err)),
        }
    }
}

/// 从 serde_json::Error 转换
impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::validation("json", format!("JSON 解析错误: {}", err))
    }
}
