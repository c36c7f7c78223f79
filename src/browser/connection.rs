use std::time::Duration;

use anyhow::{Context, Result};
use chromiumoxide::{Browser, Handler, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, info};

/// 等待浏览器同步标签页状态
const SETTLE_DELAY: Duration = Duration::from_millis(300);

/// 连接操作员已打开的浏览器（通过远程调试端口）
///
/// 如果已有标签页停留在 `site_url` 所在站点，直接复用，保留其登录状态；
/// 否则新开空白页
pub async fn connect_browser(port: u16, site_url: Option<&str>) -> Result<(Browser, Page)> {
    let endpoint = format!("http://localhost:{}", port);
    info!("🔌 正在连接到浏览器: {}", endpoint);

    let (browser, handler) = Browser::connect(&endpoint)
        .await
        .with_context(|| format!("连接 {} 失败", endpoint))?;
    spawn_event_loop(handler);
    sleep(SETTLE_DELAY).await;

    if let Some(origin) = site_url.and_then(origin_of) {
        let pages = browser.pages().await.context("获取标签页列表失败")?;
        debug!("共有 {} 个标签页，查找站点 {}", pages.len(), origin);
        for page in pages {
            if let Ok(Some(url)) = page.url().await {
                if url.starts_with(origin) {
                    info!("✓ 复用已打开的标签页: {}", url);
                    return Ok((browser, page));
                }
            }
        }
    }

    let page = browser
        .new_page("about:blank")
        .await
        .context("创建空白页面失败")?;
    debug!("已新建空白页");
    Ok((browser, page))
}

/// 在后台驱动 CDP 事件循环，连接断开时退出
pub(crate) fn spawn_event_loop(mut handler: Handler) {
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                debug!("浏览器事件循环结束");
                break;
            }
        }
    });
}

/// 取 URL 的 `scheme://host[:port]` 部分
fn origin_of(url: &str) -> Option<&str> {
    let scheme_end = url.find("://")? + 3;
    let host_end = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i)
        .unwrap_or(url.len());
    (host_end > scheme_end).then(|| &url[..host_end])
}
