// 配置加载器
// 处理 .env 文件加载、配置解析和全局配置实例

use crate::config::AppConfig;
use aionix_gateway_common::CommonError;
use config::ConfigError;
use dotenvy::dotenv;
use std::sync::OnceLock;
use tracing::{info, warn};

/// 全局配置实例
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 初始化配置
    pub fn init() -> Result<&'static AppConfig, CommonError> {
        // 加载 .env 文件
        if let Err(e) = dotenv() {
            warn!("无法加载 .env 文件: {}", e);
        }

        let config = AppConfig::load().map_err(convert_config_error)?;
        config.validate()?;

        CONFIG
            .set(config)
            .map_err(|_| CommonError::internal("配置已经初始化"))?;

        let config = Self::get().ok_or_else(|| CommonError::internal("配置未初始化"))?;

        info!("配置加载成功");
        info!("环境: {}", config.environment.name);
        info!("服务器: {}:{}", config.server.host, config.server.port);

        Ok(config)
    }

    /// 获取配置，未初始化时返回 None
    pub fn get() -> Option<&'static AppConfig> {
        CONFIG.get()
    }

    /// 打印配置摘要
    pub fn print_summary(config: &AppConfig) {
        println!("=== Aionix Gateway 配置摘要 ===");
        println!("环境: {}", config.environment.name);
        println!("版本: {}", config.environment.version);
        println!("调试模式: {}", config.environment.debug);
        println!("服务器: {}:{}", config.server.host, config.server.port);
        println!("工作线程: {:?}", config.server.workers);
        println!("日志级别: {}", config.logging.level);
        println!("启用插件: {}", config.plugins.enabled.join(", "));
        println!("==============================");
    }
}

/// 配置错误转换辅助函数
pub fn convert_config_error(err: ConfigError) -> CommonError {
    CommonError::configuration(format!("配置错误: {}", err))
}
