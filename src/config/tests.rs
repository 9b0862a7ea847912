// 配置系统测试

#[cfg(test)]
mod tests {
    use crate::config::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.security.jwt_expiration, 3600);
        assert_eq!(config.plugins.enabled, vec!["health", "version", "token"]);
        assert!(config.is_development());
        assert!(!config.is_production());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_validation() {
        let mut config = AppConfig::default();

        config.server.port = 0;
        assert!(config.validate().is_err());

        config.server.port = 8080;
        config.security.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());

        config.security.jwt_secret = "a".repeat(32);
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.environment.name = "moon".to_string();

        let errors = ConfigValidator::validate_all(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_config_validator_server() {
        let mut server_config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: Some(4),
            service_name: "gateway".to_string(),
        };

        assert!(ConfigValidator::validate_server(&server_config).is_ok());

        server_config.port = 0;
        assert!(ConfigValidator::validate_server(&server_config).is_err());

        server_config.port = 8080;
        server_config.workers = Some(100);
        assert!(ConfigValidator::validate_server(&server_config).is_err());

        server_config.workers = None;
        server_config.service_name = " ".to_string();
        assert!(ConfigValidator::validate_server(&server_config).is_err());
    }

    #[test]
    fn test_config_validator_security() {
        let mut security_config = SecurityConfig {
            jwt_secret: "a".repeat(32),
            jwt_expiration: 3600,
            jwt_issuer: "gateway".to_string(),
            cors_origins: vec!["*".to_string()],
        };

        assert!(ConfigValidator::validate_security(&security_config).is_ok());

        security_config.jwt_expiration = 0;
        assert!(ConfigValidator::validate_security(&security_config).is_err());

        security_config.jwt_expiration = 86400 * 31;
        assert!(ConfigValidator::validate_security(&security_config).is_err());
    }

    #[test]
    fn test_config_validator_plugins() {
        let mut plugins_config = PluginsConfig {
            enabled: vec!["health".to_string(), "health".to_string()],
        };

        // 同名插件允许重复加入
        assert!(ConfigValidator::validate_plugins(&plugins_config).is_ok());

        plugins_config.enabled.push("unknown".to_string());
        let err = ConfigValidator::validate_plugins(&plugins_config).unwrap_err();
        assert!(err.to_string().contains("unknown"));

        plugins_config.enabled.clear();
        assert!(ConfigValidator::validate_plugins(&plugins_config).is_ok());
    }

    #[test]
    fn test_config_validator_logging_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("nested").join("gateway.log");

        let mut logging_config = LoggingConfig {
            level: "info".to_string(),
            format: "compact".to_string(),
            file_enabled: true,
            file_path: None,
        };

        assert!(ConfigValidator::validate_logging(&logging_config).is_err());

        logging_config.file_path = Some(log_path.to_string_lossy().to_string());
        assert!(ConfigValidator::validate_logging(&logging_config).is_ok());
        assert!(dir.path().join("nested").exists());
    }

    #[test]
    fn test_load_layers_file_and_env() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        std::fs::write(
            &file,
            "[server]\nport = 9090\nservice_name = \"from-file\"\n\n[logging]\nlevel = \"warn\"\n",
        )
        .unwrap();

        // 前缀仅此测试使用
        unsafe {
            std::env::set_var("GWLAYERTEST_SERVER__PORT", "9191");
            std::env::set_var("GWLAYERTEST_PLUGINS__ENABLED", "version,health");
        }
        let loaded = AppConfig::load_from(&file, "GWLAYERTEST");
        unsafe {
            std::env::remove_var("GWLAYERTEST_SERVER__PORT");
            std::env::remove_var("GWLAYERTEST_PLUGINS__ENABLED");
        }

        let config = loaded.unwrap();
        assert_eq!(config.server.port, 9191);
        assert_eq!(config.server.service_name, "from-file");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.plugins.enabled, vec!["version", "health"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml"), "GWABSENTTEST").unwrap();

        let defaults = AppConfig::default();
        assert_eq!(config.server.port, defaults.server.port);
        assert_eq!(config.plugins.enabled, defaults.plugins.enabled);
        assert_eq!(config.environment.version, env!("CARGO_PKG_VERSION"));
    }
}
