// 扩展点模块
// 插件可挂载的三类注册目标：代理 Web 处理器、认证 Web 处理器、认证 RPC 服务

pub mod routes;
pub mod rpc;

pub use routes::*;
pub use rpc::*;

use serde::Serialize;
use std::fmt;

/// 扩展点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionPoint {
    /// 代理 Web 处理器
    ProxyWebHandlers,
    /// 认证 Web 处理器
    AuthWebHandlers,
    /// 认证 RPC 服务
    AuthServices,
}

impl ExtensionPoint {
    pub const ALL: [ExtensionPoint; 3] = [
        ExtensionPoint::ProxyWebHandlers,
        ExtensionPoint::AuthWebHandlers,
        ExtensionPoint::AuthServices,
    ];

    /// 机器可读名称，用于日志字段和错误详情
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProxyWebHandlers => "proxy_web_handlers",
            Self::AuthWebHandlers => "auth_web_handlers",
            Self::AuthServices => "auth_services",
        }
    }
}

impl fmt::Display for ExtensionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ProxyWebHandlers => "代理 Web 处理器",
            Self::AuthWebHandlers => "认证 Web 处理器",
            Self::AuthServices => "认证 RPC 服务",
        };
        f.write_str(label)
    }
}
