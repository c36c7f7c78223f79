use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chromiumoxide::{Browser, BrowserConfig, Page};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::browser::connection::spawn_event_loop;

/// 启动自己的浏览器实例并打开空白页
///
/// - `executable`: 浏览器可执行文件，为空时由 chromiumoxide 自动查找
/// - `headless`: 无人值守运行时使用无头模式
pub async fn launch_browser(executable: Option<&str>, headless: bool) -> Result<(Browser, Page)> {
    info!("🚀 启动浏览器 (无头模式: {})...", headless);

    let mut builder = BrowserConfig::builder().args(vec![
        "--disable-gpu",
        "--no-sandbox",
        "--disable-dev-shm-usage",
    ]);
    builder = if headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };
    if let Some(path) = executable {
        debug!("浏览器可执行文件: {}", path);
        builder = builder.chrome_executable(Path::new(path));
    }
    let config = builder
        .build()
        .map_err(|e| anyhow!("浏览器配置无效: {}", e))?;

    let (browser, handler) = Browser::launch(config)
        .await
        .context("浏览器进程启动失败")?;
    spawn_event_loop(handler);
    sleep(Duration::from_millis(300)).await;

    let page = browser
        .new_page("about:blank")
        .await
        .context("创建页面失败")?;
    debug!("浏览器已就绪");

    Ok((browser, page))
}
