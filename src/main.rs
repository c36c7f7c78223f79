use anyhow::Result;
use form_batch_submit::utils::logging;
use form_batch_submit::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.as_ref().map(|c| c.verbose_logging).unwrap_or(false));

    // 初始化并运行应用
    App::initialize(config?).await?.run().await?;

    Ok(())
}
