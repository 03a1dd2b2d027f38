use anyhow::Result;
use batch_source_import::config::{self, Config};
use batch_source_import::utils::logging;
use batch_source_import::App;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init(config::verbose_logging_from_env());

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
