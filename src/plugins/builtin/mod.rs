// 内置插件
// 根据配置中启用的名称按顺序实例化

pub mod health;
pub mod token;
pub mod version;

pub use health::{HealthPlugin, HEALTH_PLUGIN};
pub use token::{TokenClaims, TokenIssuer, TokenPlugin, TOKEN_PLUGIN};
pub use version::{VersionPlugin, VERSION_PLUGIN};

use crate::config::AppConfig;
use crate::errors::GatewayError;
use crate::plugins::Plugin;

/// 已知的内置插件名称
pub const KNOWN_PLUGINS: [&str; 3] = [HEALTH_PLUGIN, VERSION_PLUGIN, TOKEN_PLUGIN];

/// 内置插件工厂
pub struct BuiltinPlugins;

impl BuiltinPlugins {
    /// 是否为已知的内置插件
    pub fn is_known(name: &str) -> bool {
        KNOWN_PLUGINS.iter().any(|known| *known == name)
    }

    /// 按名称创建内置插件
    pub fn create(name: &str, config: &AppConfig) -> Option<Box<dyn Plugin>> {
        match name {
            HEALTH_PLUGIN => Some(Box::new(HealthPlugin::new(config.server.service_name.clone()))),
            VERSION_PLUGIN => Some(Box::new(VersionPlugin)),
            TOKEN_PLUGIN => Some(Box::new(TokenPlugin::new(&config.security))),
            _ => None,
        }
    }

    /// 按配置顺序创建所有启用的插件
    pub fn from_config(config: &AppConfig) -> Result<Vec<Box<dyn Plugin>>, GatewayError> {
        config
            .plugins
            .enabled
            .iter()
            .map(|name| {
                Self::create(name, config)
                    .ok_or_else(|| GatewayError::configuration(format!("未知的插件: {}", name)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_keeps_order() {
        let mut config = AppConfig::default();
        config.plugins.enabled = vec!["version".to_string(), "health".to_string()];

        let plugins = BuiltinPlugins::from_config(&config).unwrap();
        let names: Vec<&str> = plugins.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["version", "health"]);
    }

    #[test]
    fn test_from_config_rejects_unknown() {
        let mut config = AppConfig::default();
        config.plugins.enabled = vec!["health".to_string(), "teleport".to_string()];

        let err = match BuiltinPlugins::from_config(&config) {
            Ok(_) => panic!("unknown plugin accepted"),
            Err(err) => err,
        };
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_is_known() {
        assert!(BuiltinPlugins::is_known("token"));
        assert!(!BuiltinPlugins::is_known("unknown"));
    }
}
