// Aionix Gateway Library
// 插件注册表及其宿主：配置、日志、错误、扩展点和内置插件

pub mod config;
pub mod errors;
pub mod extension;
pub mod logging;
pub mod plugins;
pub mod server;

pub use errors::GatewayError;
pub use extension::{AuthServices, AuthWebHandlers, ExtensionPoint, ProxyWebHandlers, RpcService};
pub use plugins::{Plugin, PluginRegistry};
pub use server::GatewayServer;
