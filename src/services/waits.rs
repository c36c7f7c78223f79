//! 有界轮询等待
//!
//! 所有等待都是"条件满足或超时"，超时只作为结果返回，不作为错误抛出

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::infrastructure::{ControlState, FormPage};
use crate::models::Locator;

/// 等待结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// 在上限内达到目标状态
    Reached(ControlState),
    /// 超时，附带最后一次观察到的状态
    TimedOut(ControlState),
}

impl WaitOutcome {
    pub fn is_reached(&self) -> bool {
        matches!(self, WaitOutcome::Reached(_))
    }
}

/// 轮询控件状态，直到不低于 `target` 或超时
///
/// 至少探测一次；探测出错时视为控件不存在
pub async fn wait_for_state<P: FormPage + ?Sized>(
    page: &P,
    locator: &Locator,
    target: ControlState,
    timeout: Duration,
    poll_interval: Duration,
) -> WaitOutcome {
    let deadline = Instant::now() + timeout;

    loop {
        let state = match page.control_state(locator).await {
            Ok(state) => state,
            Err(e) => {
                debug!("探测 {} 出错: {}", locator, e);
                ControlState::Missing
            }
        };

        if state >= target {
            return WaitOutcome::Reached(state);
        }

        let now = Instant::now();
        if now >= deadline {
            return WaitOutcome::TimedOut(state);
        }

        sleep(poll_interval.min(deadline - now)).await;
    }
}
