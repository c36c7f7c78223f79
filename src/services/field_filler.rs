//! 表单填写 - 业务能力层
//!
//! 只负责"把三个值填进一组控件并提交"，不关心布局判断和重试

use tracing::debug;

use crate::config::Timeouts;
use crate::error::InteractionError;
use crate::infrastructure::{ControlState, FormPage};
use crate::models::LocatorSet;
use crate::services::waits::{wait_for_state, WaitOutcome};

/// 一次填写的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillOutcome {
    /// 已点击提交
    Submitted,
    /// 控件存在但暂时不可交互，可退避后重试
    TransientFailure(InteractionError),
    /// 控件缺失/失效或其他提交错误
    HardFailure(InteractionError),
}

impl From<InteractionError> for FillOutcome {
    fn from(err: InteractionError) -> Self {
        if err.is_transient() {
            FillOutcome::TransientFailure(err)
        } else {
            FillOutcome::HardFailure(err)
        }
    }
}

/// 表单填写器
pub struct FieldFiller {
    timeouts: Timeouts,
}

impl FieldFiller {
    pub fn new(timeouts: Timeouts) -> Self {
        Self { timeouts }
    }

    /// 等待第一个输入框可交互，依次填写三个值，然后点击提交
    ///
    /// 第 2、3 个输入框与第 1 个同时渲染，不再单独等待
    pub async fn fill_and_submit<P: FormPage + ?Sized>(
        &self,
        page: &P,
        locators: &LocatorSet,
        values: [&str; 3],
    ) -> FillOutcome {
        let outcome = wait_for_state(
            page,
            &locators.field1,
            ControlState::Interactable,
            self.timeouts.ready,
            self.timeouts.poll_interval,
        )
        .await;

        if let WaitOutcome::TimedOut(last) = outcome {
            let locator = locators.field1.to_string();
            return if last.is_present() {
                FillOutcome::TransientFailure(InteractionError::NotInteractable { locator })
            } else {
                FillOutcome::HardFailure(InteractionError::Missing { locator })
            };
        }

        for (locator, value) in locators.fields().into_iter().zip(values) {
            if let Err(e) = page.type_text(locator, value).await {
                return e.into();
            }
            debug!("已填写 {}", locator);
        }

        match page.click(&locators.submit).await {
            Ok(()) => FillOutcome::Submitted,
            Err(e) => e.into(),
        }
    }
}
