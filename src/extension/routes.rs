// Web 路由注册表
// 插件通过前缀挂载自己的路由配置函数，宿主在构建 App 时统一应用

use actix_web::web;
use std::fmt;
use std::sync::Arc;

use crate::errors::GatewayError;

/// 认证 Web 处理器的挂载根路径
pub const AUTH_WEB_ROOT: &str = "/auth";

/// RPC 分发入口
pub const RPC_ROOT: &str = "/rpc";

/// 宿主保留的前缀，代理路由不能挂载在其下
const RESERVED_PREFIXES: [&str; 2] = [AUTH_WEB_ROOT, RPC_ROOT];

/// 路由配置函数
///
/// 每个 actix-web worker 构建 App 时都会调用一次，因此必须可重复调用且线程安全。
pub type RouteConfigurator = Arc<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// 单个挂载项
#[derive(Clone)]
struct RouteMount {
    prefix: String,
    configure: RouteConfigurator,
}

impl fmt::Debug for RouteMount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMount")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

/// 有序的路由挂载表
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    mounts: Vec<RouteMount>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在指定前缀下挂载路由
    ///
    /// 前缀必须以 `/` 开头且不能是根路径，末尾的 `/` 会被去掉；
    /// 同一张表内前缀不可重复。
    pub fn mount<F>(&mut self, prefix: &str, configure: F) -> Result<(), GatewayError>
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        let prefix = normalize_prefix(prefix)?;

        if self.mounts.iter().any(|m| m.prefix == prefix) {
            return Err(GatewayError::conflict(format!("路由前缀已被挂载: {}", prefix)));
        }

        self.mounts.push(RouteMount {
            prefix,
            configure: Arc::new(configure),
        });

        Ok(())
    }

    /// 按挂载顺序把所有路由应用到服务配置
    pub fn apply(&self, cfg: &mut web::ServiceConfig) {
        for mount in &self.mounts {
            cfg.service(web::scope(&mount.prefix).configure(|scope| (mount.configure)(scope)));
        }
    }

    pub fn prefixes(&self) -> Vec<&str> {
        self.mounts.iter().map(|m| m.prefix.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }
}

fn normalize_prefix(prefix: &str) -> Result<String, GatewayError> {
    let trimmed = prefix.trim();

    if !trimmed.starts_with('/') {
        return Err(GatewayError::invalid_argument(format!(
            "路由前缀必须以 / 开头: {:?}",
            prefix
        )));
    }

    let normalized = trimmed.trim_end_matches('/');
    if normalized.is_empty() {
        return Err(GatewayError::invalid_argument("不允许挂载到根路径"));
    }

    Ok(normalized.to_string())
}

fn is_reserved(prefix: &str) -> bool {
    RESERVED_PREFIXES.iter().any(|root| {
        prefix == *root
            || prefix
                .strip_prefix(root)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// 代理 Web 处理器注册目标
#[derive(Debug, Clone, Default)]
pub struct ProxyWebHandlers {
    routes: RouteTable,
}

impl ProxyWebHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在代理入口挂载路由
    ///
    /// `/auth` 与 `/rpc` 由宿主占用，挂载在其下的路由永远无法命中，直接拒绝。
    pub fn mount<F>(&mut self, prefix: &str, configure: F) -> Result<(), GatewayError>
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        let normalized = normalize_prefix(prefix)?;
        if is_reserved(&normalized) {
            return Err(GatewayError::conflict(format!(
                "路由前缀由宿主保留: {}",
                normalized
            )));
        }

        self.routes.mount(&normalized, configure)
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn apply(&self, cfg: &mut web::ServiceConfig) {
        self.routes.apply(cfg);
    }
}

/// 认证 Web 处理器注册目标，所有路由挂载在 `/auth` 之下
#[derive(Debug, Clone, Default)]
pub struct AuthWebHandlers {
    routes: RouteTable,
}

impl AuthWebHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在 `/auth` 之下挂载路由
    pub fn mount<F>(&mut self, prefix: &str, configure: F) -> Result<(), GatewayError>
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.routes.mount(prefix, configure)
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn apply(&self, cfg: &mut web::ServiceConfig) {
        cfg.service(web::scope(AUTH_WEB_ROOT).configure(|scope| self.routes.apply(scope)));
    }
}
