// 日志系统测试

#[cfg(test)]
mod tests {
    use crate::config::{ConfigValidator, LoggingConfig};
    use crate::logging::LoggingSetup;
    use tracing::Level;

    fn local_config() -> LoggingConfig {
        LoggingConfig {
            level: "warn".to_string(),
            format: "compact".to_string(),
            file_enabled: false,
            file_path: None,
        }
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(LoggingSetup::parse_level("trace"), Level::TRACE);
        assert_eq!(LoggingSetup::parse_level("debug"), Level::DEBUG);
        assert_eq!(LoggingSetup::parse_level("INFO"), Level::INFO);
        assert_eq!(LoggingSetup::parse_level("warn"), Level::WARN);
        assert_eq!(LoggingSetup::parse_level("error"), Level::ERROR);
        assert_eq!(LoggingSetup::parse_level("invalid"), Level::INFO);
    }

    #[test]
    fn test_local_config_is_valid() {
        assert!(ConfigValidator::validate_logging(&local_config()).is_ok());
    }

    #[test]
    fn test_file_writer_disabled() {
        let config = local_config();
        assert!(LoggingSetup::file_writer(&config).unwrap().is_none());
    }

    #[test]
    fn test_file_writer_requires_path() {
        let mut config = local_config();
        config.file_enabled = true;
        assert!(LoggingSetup::file_writer(&config).is_err());
    }

    #[test]
    fn test_file_writer_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = local_config();
        config.file_enabled = true;
        config.file_path = Some(dir.path().join("gateway.log").to_string_lossy().to_string());

        let writer = LoggingSetup::file_writer(&config).unwrap();
        assert!(writer.is_some());
    }
}
