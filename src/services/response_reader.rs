//! 确认信息读取 - 业务能力层

use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::config::Timeouts;
use crate::infrastructure::{ControlState, FormPage};
use crate::models::Locator;
use crate::services::waits::wait_for_state;

/// 提交后读取确认信息
pub struct ResponseReader<'a> {
    confirmation: &'a Locator,
    timeouts: Timeouts,
}

impl<'a> ResponseReader<'a> {
    pub fn new(confirmation: &'a Locator, timeouts: Timeouts) -> Self {
        Self {
            confirmation,
            timeouts,
        }
    }

    /// 提交前记下确认控件上已有的原文（上一行留下的）
    pub async fn snapshot<P: FormPage + ?Sized>(&self, page: &P) -> Option<String> {
        page.read_text(self.confirmation).await.ok()
    }

    /// 等待本次提交的确认信息出现并读取
    ///
    /// 与 `previous` 相同的原文视为上一行遗留，继续等待它更新。
    /// 提交动作本身已经完成，所以确认信息缺失或一直未更新都不算失败，返回空字符串
    pub async fn read<P: FormPage + ?Sized>(&self, page: &P, previous: Option<&str>) -> String {
        let deadline = Instant::now() + self.timeouts.confirmation;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let outcome = wait_for_state(
                page,
                self.confirmation,
                ControlState::Visible,
                remaining,
                self.timeouts.poll_interval,
            )
            .await;

            if !outcome.is_reached() {
                warn!("未找到确认信息: {}", self.confirmation);
                return String::new();
            }

            match page.read_text(self.confirmation).await {
                Ok(text) if previous != Some(text.as_str()) => {
                    debug!("确认信息原文: {}", text);
                    return normalize_confirmation(&text);
                }
                Ok(_) => debug!("确认信息尚未更新"),
                Err(e) => debug!("读取确认信息失败: {}", e),
            }

            let now = Instant::now();
            if now >= deadline {
                warn!("确认信息在 {:?} 内没有更新，不记录", self.timeouts.confirmation);
                return String::new();
            }
            sleep(self.timeouts.poll_interval.min(deadline - now)).await;
        }
    }
}

/// 规范化确认信息：有 `:` 时取第一个 `:` 之后的部分，去掉首尾空白
pub fn normalize_confirmation(raw: &str) -> String {
    match raw.split_once(':') {
        Some((_, rest)) => rest.trim().to_string(),
        None => raw.trim().to_string(),
    }
}
