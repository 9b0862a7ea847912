// 插件注册表
// 按加入顺序保存插件，并把注册请求依次广播给每个插件

use std::collections::HashSet;
use tracing::{debug, error, info};

use crate::errors::GatewayError;
use crate::extension::{AuthServices, AuthWebHandlers, ExtensionPoint, ProxyWebHandlers};
use crate::plugins::plugin_interface::Plugin;

/// 插件注册表
///
/// 只追加、保持顺序：插件的加入顺序就是广播顺序，加入后不会被移除。
/// 注册表由启动流程显式创建并以 `&mut` 传递，本身不做任何加锁。
///
/// 每个扩展点只允许广播一次，且一旦开始广播就不再接受新插件，
/// 以免后加入的插件漏掉已经完成的注册阶段。
#[derive(Default)]
pub struct PluginRegistry {
    /// 已加入的插件
    plugins: Vec<Box<dyn Plugin>>,
    /// 已广播过的扩展点
    broadcast_points: HashSet<ExtensionPoint>,
}

impl PluginRegistry {
    /// 创建空的插件注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入插件
    pub fn add(&mut self, plugin: Box<dyn Plugin>) -> Result<(), GatewayError> {
        if plugin.name().trim().is_empty() {
            return Err(GatewayError::invalid_argument("missing plugin"));
        }

        if !self.broadcast_points.is_empty() {
            return Err(GatewayError::invalid_state(format!(
                "注册广播已开始，不能再加入插件: {}",
                plugin.name()
            )));
        }

        info!(plugin = plugin.name(), position = self.plugins.len(), "加入插件");
        self.plugins.push(plugin);

        Ok(())
    }

    /// 向所有插件广播代理 Web 处理器注册
    pub fn register_proxy_web_handlers(
        &mut self,
        handlers: &mut ProxyWebHandlers,
    ) -> Result<(), GatewayError> {
        self.broadcast(ExtensionPoint::ProxyWebHandlers, |plugin| {
            plugin.register_proxy_web_handlers(handlers)
        })
    }

    /// 向所有插件广播认证 Web 处理器注册
    pub fn register_auth_web_handlers(
        &mut self,
        handlers: &mut AuthWebHandlers,
    ) -> Result<(), GatewayError> {
        self.broadcast(ExtensionPoint::AuthWebHandlers, |plugin| {
            plugin.register_auth_web_handlers(handlers)
        })
    }

    /// 向所有插件广播认证 RPC 服务注册
    pub fn register_auth_services(&mut self, server: &mut AuthServices) -> Result<(), GatewayError> {
        self.broadcast(ExtensionPoint::AuthServices, |plugin| {
            plugin.register_auth_services(server)
        })
    }

    /// 按加入顺序列出插件名称
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// 扩展点是否已经广播过
    pub fn is_broadcast(&self, point: ExtensionPoint) -> bool {
        self.broadcast_points.contains(&point)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// 依次调用每个插件，遇到第一个错误立即停止
    ///
    /// 失败的广播同样计为已广播：注册不是原子的，也不能续跑。
    fn broadcast<F>(&mut self, point: ExtensionPoint, mut register: F) -> Result<(), GatewayError>
    where
        F: FnMut(&dyn Plugin) -> anyhow::Result<()>,
    {
        if !self.broadcast_points.insert(point) {
            return Err(GatewayError::invalid_state(format!(
                "{}已经广播过，不能重复注册",
                point
            )));
        }

        info!(
            extension_point = point.as_str(),
            plugin_count = self.plugins.len(),
            "开始广播插件注册"
        );

        for plugin in &self.plugins {
            debug!(
                plugin = plugin.name(),
                extension_point = point.as_str(),
                "调用插件注册"
            );

            if let Err(err) = register(plugin.as_ref()) {
                error!(
                    plugin = plugin.name(),
                    extension_point = point.as_str(),
                    error = %err,
                    "插件注册失败"
                );
                return Err(GatewayError::plugin_registration(plugin.name(), point, err));
            }
        }

        info!(extension_point = point.as_str(), "插件注册广播完成");

        Ok(())
    }
}
