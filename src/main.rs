use aionix_gateway::config::ConfigLoader;
use aionix_gateway::logging::LoggingSetup;
use aionix_gateway::plugins::builtin::BuiltinPlugins;
use aionix_gateway::{GatewayServer, PluginRegistry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 初始化配置
    let config = ConfigLoader::init()?;

    // 初始化结构化日志系统，guard 需持有到进程退出
    let _log_guard = LoggingSetup::init(&config.logging)?;

    tracing::info!("🚀 启动 Aionix Gateway v{}", config.environment.version);
    ConfigLoader::print_summary(config);

    // 加入启用的插件，任何失败都中止启动
    let mut registry = PluginRegistry::new();
    for plugin in BuiltinPlugins::from_config(config)? {
        registry.add(plugin)?;
    }

    let server = GatewayServer::build(config, &mut registry)?;
    server.run().await?;

    Ok(())
}
