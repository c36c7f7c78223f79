//! 浏览器会话
//!
//! 连接已有浏览器或启动新浏览器；自己启动的浏览器在结束时关闭，
//! 连接的浏览器只断开，不关闭操作员的窗口

use anyhow::{Context, Result};
use chromiumoxide::{Browser, Page};
use tracing::{info, warn};

use crate::browser::{connect_browser, launch_browser};
use crate::config::Config;

/// 浏览器会话
pub struct BrowserSession {
    browser: Browser,
    launched: bool,
}

impl BrowserSession {
    /// 按配置获取浏览器会话和工作页面
    pub async fn open(config: &Config) -> Result<(Self, Page)> {
        match config.browser_debug_port {
            Some(port) => {
                let (browser, page) = connect_browser(port, Some(&config.login_url))
                    .await
                    .with_context(|| format!("无法连接到调试端口 {} 上的浏览器", port))?;
                Ok((
                    Self {
                        browser,
                        launched: false,
                    },
                    page,
                ))
            }
            None => {
                let (browser, page) =
                    launch_browser(config.chrome_executable.as_deref(), config.headless)
                        .await
                        .context("无法启动浏览器")?;
                Ok((
                    Self {
                        browser,
                        launched: true,
                    },
                    page,
                ))
            }
        }
    }

    /// 释放会话
    pub async fn close(mut self) {
        if !self.launched {
            info!("已断开浏览器连接");
            return;
        }
        match self.browser.close().await {
            Ok(_) => info!("浏览器已关闭"),
            Err(e) => warn!("关闭浏览器失败: {}", e),
        }
    }
}
