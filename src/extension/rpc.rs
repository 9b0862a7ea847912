// 认证 RPC 服务注册表
// 插件向认证服务器注册具名服务，宿主通过 POST /rpc/{service}/{method} 分发调用

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::GatewayError;

/// RPC 服务接口
#[async_trait]
pub trait RpcService: Send + Sync {
    /// 服务名称，作为分发路径的第一段
    fn name(&self) -> &str;

    /// 服务支持的方法列表
    fn methods(&self) -> &[&'static str];

    /// 处理一次调用
    async fn call(&self, method: &str, params: Value) -> Result<Value, GatewayError>;
}

/// 认证 RPC 服务注册目标
#[derive(Default)]
pub struct AuthServices {
    services: Vec<Arc<dyn RpcService>>,
    index: HashMap<String, usize>,
}

impl AuthServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个 RPC 服务，服务名不可为空且不可重复
    pub fn register(&mut self, service: Arc<dyn RpcService>) -> Result<(), GatewayError> {
        let name = service.name().to_string();

        if name.trim().is_empty() {
            return Err(GatewayError::invalid_argument("RPC 服务名称不能为空"));
        }
        if name.contains('/') {
            return Err(GatewayError::invalid_argument(format!(
                "RPC 服务名称不能包含 /: {}",
                name
            )));
        }
        if self.index.contains_key(&name) {
            return Err(GatewayError::conflict(format!("RPC 服务已注册: {}", name)));
        }

        info!(service = %name, methods = ?service.methods(), "注册 RPC 服务");

        self.index.insert(name, self.services.len());
        self.services.push(service);

        Ok(())
    }

    /// 按名称获取服务
    pub fn get(&self, name: &str) -> Option<&Arc<dyn RpcService>> {
        self.index.get(name).map(|&i| &self.services[i])
    }

    /// 按注册顺序列出服务名称
    pub fn service_names(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// 分发一次调用
    pub async fn dispatch(
        &self,
        service: &str,
        method: &str,
        params: Value,
    ) -> Result<Value, GatewayError> {
        let target = self
            .get(service)
            .ok_or_else(|| GatewayError::not_found(format!("RPC 服务 {}", service)))?;

        if !target.methods().iter().any(|m| *m == method) {
            return Err(GatewayError::not_found(format!(
                "RPC 方法 {}/{}",
                service, method
            )));
        }

        debug!(service = %service, method = %method, "分发 RPC 调用");
        target.call(method, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoService {
        name: &'static str,
    }

    #[async_trait]
    impl RpcService for EchoService {
        fn name(&self) -> &str {
            self.name
        }

        fn methods(&self) -> &[&'static str] {
            &["echo"]
        }

        async fn call(&self, _method: &str, params: Value) -> Result<Value, GatewayError> {
            Ok(params)
        }
    }

    #[test]
    fn test_register_keeps_order() {
        let mut services = AuthServices::new();
        services.register(Arc::new(EchoService { name: "b" })).unwrap();
        services.register(Arc::new(EchoService { name: "a" })).unwrap();

        assert_eq!(services.service_names(), vec!["b", "a"]);
        assert_eq!(services.len(), 2);
        assert!(services.get("a").is_some());
        assert!(services.get("c").is_none());
    }

    #[test]
    fn test_register_rejects_duplicates_and_blank_names() {
        let mut services = AuthServices::new();
        services.register(Arc::new(EchoService { name: "echo" })).unwrap();

        let err = services.register(Arc::new(EchoService { name: "echo" })).unwrap_err();
        assert_eq!(err.error_code(), "CONFLICT");

        let err = services.register(Arc::new(EchoService { name: " " })).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");

        let err = services.register(Arc::new(EchoService { name: "a/b" })).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");

        assert_eq!(services.len(), 1);
    }

    #[actix_web::test]
    async fn test_dispatch() {
        let mut services = AuthServices::new();
        services.register(Arc::new(EchoService { name: "echo" })).unwrap();

        let result = services.dispatch("echo", "echo", json!({"x": 1})).await.unwrap();
        assert_eq!(result, json!({"x": 1}));

        let err = services.dispatch("missing", "echo", Value::Null).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");

        let err = services.dispatch("echo", "shout", Value::Null).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }
}
