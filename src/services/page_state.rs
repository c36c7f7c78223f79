//! 表单布局判断 - 业务能力层
//!
//! 只负责"判断当前是哪种布局"，每次尝试都重新判断，不缓存

use tracing::debug;

use crate::config::Timeouts;
use crate::infrastructure::{ControlState, FormPage};
use crate::models::{LocatorTable, Variant};
use crate::services::waits::wait_for_state;

/// 布局判断器
pub struct PageStateDetector<'a> {
    locators: &'a LocatorTable,
    timeouts: Timeouts,
}

impl<'a> PageStateDetector<'a> {
    pub fn new(locators: &'a LocatorTable, timeouts: Timeouts) -> Self {
        Self { locators, timeouts }
    }

    /// 判断当前布局，不会失败
    ///
    /// 在短暂上限内探测 `Before` 布局的第一个输入框；找到为 `Before`，否则为 `After`
    pub async fn detect<P: FormPage + ?Sized>(&self, page: &P) -> Variant {
        let outcome = wait_for_state(
            page,
            self.locators.marker(),
            ControlState::Hidden,
            self.timeouts.detect,
            self.timeouts.poll_interval,
        )
        .await;

        let variant = if outcome.is_reached() {
            Variant::Before
        } else {
            Variant::After
        };
        debug!("当前表单布局: {}", variant);
        variant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InteractionError;
    use crate::models::Locator;
    use crate::test_support::FakePage;
    use async_trait::async_trait;
    use std::time::Duration;

    fn fast() -> Timeouts {
        Timeouts {
            detect: Duration::from_millis(50),
            poll_interval: Duration::from_millis(10),
            ..Timeouts::default()
        }
    }

    #[tokio::test]
    async fn test_detects_before_when_marker_present() {
        let page = FakePage::new(Variant::Before);
        let detector = PageStateDetector::new(page.locators(), fast());
        assert_eq!(detector.detect(&page).await, Variant::Before);
    }

    #[tokio::test]
    async fn test_detects_after_when_marker_absent() {
        let page = FakePage::new(Variant::After);
        let detector = PageStateDetector::new(page.locators(), fast());
        assert_eq!(detector.detect(&page).await, Variant::After);
    }

    #[tokio::test]
    async fn test_hidden_marker_still_means_before() {
        // 控件存在但尚未渲染完成，布局仍然是 Before
        let page = FakePage::new(Variant::After);
        page.inject_states(page.locators().marker(), &[ControlState::Hidden]);
        let detector = PageStateDetector::new(page.locators(), fast());
        assert_eq!(detector.detect(&page).await, Variant::Before);
    }

    struct BrokenPage;

    #[async_trait]
    impl FormPage for BrokenPage {
        async fn control_state(&self, _: &Locator) -> Result<ControlState, InteractionError> {
            Err(InteractionError::Driver("target closed".to_string()))
        }
        async fn type_text(&self, _: &Locator, _: &str) -> Result<(), InteractionError> {
            unreachable!()
        }
        async fn click(&self, _: &Locator) -> Result<(), InteractionError> {
            unreachable!()
        }
        async fn read_text(&self, _: &Locator) -> Result<String, InteractionError> {
            unreachable!()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_errors_fall_back_to_after() {
        let table = LocatorTable::builtin();
        let detector = PageStateDetector::new(&table, fast());
        assert_eq!(detector.detect(&BrokenPage).await, Variant::After);
    }
}
