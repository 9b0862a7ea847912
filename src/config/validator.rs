// 配置验证器
// 提供详细的配置验证逻辑

use crate::config::AppConfig;
use crate::plugins::builtin::{BuiltinPlugins, KNOWN_PLUGINS};
use aionix_gateway_common::CommonError;
use std::path::Path;

/// 配置验证器
pub struct ConfigValidator;

impl ConfigValidator {
    /// 验证完整配置，收集所有错误
    pub fn validate_all(config: &AppConfig) -> Result<(), Vec<CommonError>> {
        let errors: Vec<CommonError> = [
            Self::validate_server(&config.server),
            Self::validate_security(&config.security),
            Self::validate_logging(&config.logging),
            Self::validate_plugins(&config.plugins),
            Self::validate_environment(&config.environment),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// 验证服务器配置
    pub fn validate_server(config: &crate::config::ServerConfig) -> Result<(), CommonError> {
        if config.port == 0 {
            return Err(CommonError::validation("服务器端口不能为 0"));
        }

        if config.host.is_empty() {
            return Err(CommonError::validation("服务器主机地址不能为空"));
        }

        if let Some(workers) = config.workers {
            if workers == 0 {
                return Err(CommonError::validation("工作线程数不能为 0"));
            }
            if workers > 32 {
                return Err(CommonError::validation("工作线程数不建议超过 32"));
            }
        }

        if config.service_name.trim().is_empty() {
            return Err(CommonError::validation("服务名称不能为空"));
        }

        Ok(())
    }

    /// 验证安全配置
    pub fn validate_security(config: &crate::config::SecurityConfig) -> Result<(), CommonError> {
        if config.jwt_secret.len() < 32 {
            return Err(CommonError::validation("JWT 密钥长度不能少于 32 个字符"));
        }

        if config.jwt_expiration == 0 {
            return Err(CommonError::validation("JWT 过期时间不能为 0"));
        }

        if config.jwt_expiration > 86400 * 30 {
            return Err(CommonError::validation("JWT 过期时间不建议超过 30 天"));
        }

        if config.jwt_issuer.trim().is_empty() {
            return Err(CommonError::validation("JWT 签发者不能为空"));
        }

        Ok(())
    }

    /// 验证日志配置
    pub fn validate_logging(config: &crate::config::LoggingConfig) -> Result<(), CommonError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.level.as_str()) {
            return Err(CommonError::validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                config.level, valid_levels
            )));
        }

        let valid_formats = ["json", "pretty", "compact"];
        if !valid_formats.contains(&config.format.as_str()) {
            return Err(CommonError::validation(format!(
                "无效的日志格式: {}，有效值: {:?}",
                config.format, valid_formats
            )));
        }

        if config.file_enabled {
            match config.file_path {
                Some(ref path) => {
                    let log_dir = Path::new(path).parent().unwrap_or(Path::new("."));
                    if !log_dir.as_os_str().is_empty() && !log_dir.exists() {
                        if let Err(e) = std::fs::create_dir_all(log_dir) {
                            return Err(CommonError::validation(format!("无法创建日志目录: {}", e)));
                        }
                    }
                }
                None => {
                    return Err(CommonError::validation("启用文件日志时必须指定日志文件路径"));
                }
            }
        }

        Ok(())
    }

    /// 验证插件配置：只允许已知的内置插件，名称可重复
    pub fn validate_plugins(config: &crate::config::PluginsConfig) -> Result<(), CommonError> {
        let unknown: Vec<&str> = config
            .enabled
            .iter()
            .map(String::as_str)
            .filter(|name| !BuiltinPlugins::is_known(name))
            .collect();

        if !unknown.is_empty() {
            return Err(CommonError::validation(format!(
                "未知的插件: {:?}，可用插件: {:?}",
                unknown, KNOWN_PLUGINS
            )));
        }

        Ok(())
    }

    /// 验证环境配置
    pub fn validate_environment(config: &crate::config::EnvironmentConfig) -> Result<(), CommonError> {
        let valid_environments = ["development", "staging", "production", "test"];
        if !valid_environments.contains(&config.name.as_str()) {
            return Err(CommonError::validation(format!(
                "无效的环境名称: {}，有效值: {:?}",
                config.name, valid_environments
            )));
        }

        if config.version.is_empty() {
            return Err(CommonError::validation("版本信息不能为空"));
        }

        Ok(())
    }
}
