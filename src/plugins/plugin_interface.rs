// 插件接口规范
// 定义插件向三个扩展点注册自身的标准接口

use crate::extension::{AuthServices, AuthWebHandlers, ProxyWebHandlers};

/// 插件接口
///
/// 插件在应用启动阶段被注册表依次调用，把自己的路由或服务挂载到扩展点上。
/// 三个注册方法默认什么都不做，插件只需实现自己关心的扩展点。
/// 注册方法可以返回任意错误，注册表会附上插件名称后原样向上传递。
pub trait Plugin: Send + Sync {
    /// 插件名称，仅用于诊断，不能为空
    fn name(&self) -> &str;

    /// 注册代理 Web 处理器
    fn register_proxy_web_handlers(&self, _handlers: &mut ProxyWebHandlers) -> anyhow::Result<()> {
        Ok(())
    }

    /// 注册认证 Web 处理器
    fn register_auth_web_handlers(&self, _handlers: &mut AuthWebHandlers) -> anyhow::Result<()> {
        Ok(())
    }

    /// 注册认证 RPC 服务
    fn register_auth_services(&self, _server: &mut AuthServices) -> anyhow::Result<()> {
        Ok(())
    }
}
