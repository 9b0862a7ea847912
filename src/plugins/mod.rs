// 插件系统模块
// 插件接口、插件注册表和内置插件

pub mod builtin;
pub mod plugin_interface;
pub mod plugin_registry;

pub use plugin_interface::*;
pub use plugin_registry::*;
