//! 单行提交流程 - 流程层
//!
//! 核心职责：在有限的尝试次数内把一行提交成功
//!
//! 每次尝试的顺序：
//! 1. 判断布局（每次都重新判断）
//! 2. 用该布局的控件组填写并提交
//! 3. 读取确认信息（忽略提交前就已显示的上一行确认信息）
//!
//! 状态：`Attempting(n)` → `Succeeded(确认信息)` | `Aborted`

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::{RetryPolicy, Timeouts};
use crate::error::InteractionError;
use crate::infrastructure::FormPage;
use crate::models::{LocatorTable, Row};
use crate::services::{FieldFiller, FillOutcome, PageStateDetector, ResponseReader};
use crate::workflow::row_ctx::RowCtx;

/// 一次尝试的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// 已提交，附带确认信息（可能为空）
    Succeeded(String),
    TransientFailure(InteractionError),
    HardFailure(InteractionError),
}

/// 单行状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowState {
    Attempting(u32),
    Succeeded(String),
    Aborted,
}

/// 单行最终结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowResolution {
    Succeeded { confirmation: String, attempts: u32 },
    Aborted { attempts: u32 },
}

impl RowResolution {
    pub fn attempts(&self) -> u32 {
        match self {
            RowResolution::Succeeded { attempts, .. } | RowResolution::Aborted { attempts } => {
                *attempts
            }
        }
    }
}

/// 状态转移：第 `attempt` 次尝试得到 `outcome` 之后的状态
pub fn next_state(attempt: u32, outcome: SubmissionOutcome, max_attempts: u32) -> RowState {
    match outcome {
        SubmissionOutcome::Succeeded(confirmation) => RowState::Succeeded(confirmation),
        SubmissionOutcome::TransientFailure(_) | SubmissionOutcome::HardFailure(_) => {
            if attempt < max_attempts {
                RowState::Attempting(attempt + 1)
            } else {
                RowState::Aborted
            }
        }
    }
}

/// 单行提交流程
///
/// - 编排 布局判断 → 填写 → 读确认信息
/// - 决定何时退避、何时重试、何时放弃
/// - 不持有页面和表格资源
pub struct SubmissionFlow<'a> {
    locators: &'a LocatorTable,
    detector: PageStateDetector<'a>,
    filler: FieldFiller,
    reader: ResponseReader<'a>,
    policy: RetryPolicy,
}

impl<'a> SubmissionFlow<'a> {
    pub fn new(locators: &'a LocatorTable, timeouts: Timeouts, policy: RetryPolicy) -> Self {
        Self {
            locators,
            detector: PageStateDetector::new(locators, timeouts),
            filler: FieldFiller::new(timeouts),
            reader: ResponseReader::new(locators.confirmation(), timeouts),
            policy,
        }
    }

    /// 处理一行直到成功或放弃
    pub async fn run<P: FormPage + ?Sized>(&self, page: &P, row: &Row) -> RowResolution {
        let max_attempts = self.policy.max_attempts;
        let mut state = RowState::Attempting(1);
        let mut attempts = 0;

        loop {
            match state {
                RowState::Attempting(n) => {
                    attempts = n;
                    let ctx = RowCtx::new(row.index, n, max_attempts);
                    let outcome = self.attempt(page, row, &ctx).await;
                    self.back_off(&outcome).await;
                    state = next_state(n, outcome, max_attempts);
                }
                RowState::Succeeded(confirmation) => {
                    return RowResolution::Succeeded {
                        confirmation,
                        attempts,
                    };
                }
                RowState::Aborted => {
                    error!(
                        "[行 {}] ❌ 已尝试 {} 次仍未成功，跳过该行",
                        row.display_index(),
                        attempts
                    );
                    return RowResolution::Aborted { attempts };
                }
            }
        }
    }

    /// 执行一次尝试
    pub async fn attempt<P: FormPage + ?Sized>(
        &self,
        page: &P,
        row: &Row,
        ctx: &RowCtx,
    ) -> SubmissionOutcome {
        let variant = self.detector.detect(page).await;
        let locators = self.locators.get(variant);
        let previous = self.reader.snapshot(page).await;

        match self.filler.fill_and_submit(page, locators, row.values()).await {
            FillOutcome::Submitted => {
                info!(
                    "{} 📤 表单已提交 (布局: {}): @BH={}, @BD={}, @BA={}",
                    ctx, variant, row.field1, row.field2, row.field3
                );
                let confirmation = self.reader.read(page, previous.as_deref()).await;
                if !confirmation.is_empty() {
                    info!("{} ✓ 确认信息: {}", ctx, confirmation);
                }
                SubmissionOutcome::Succeeded(confirmation)
            }
            FillOutcome::TransientFailure(e) => {
                warn!("{} ⚠️ 控件暂不可交互 (布局: {}): {}", ctx, variant, e);
                SubmissionOutcome::TransientFailure(e)
            }
            FillOutcome::HardFailure(e) => {
                error!("{} 提交失败 (布局: {}): {}", ctx, variant, e);
                SubmissionOutcome::HardFailure(e)
            }
        }
    }

    async fn back_off(&self, outcome: &SubmissionOutcome) {
        let delay = match outcome {
            SubmissionOutcome::Succeeded(_) => return,
            SubmissionOutcome::TransientFailure(_) => self.policy.transient_backoff,
            SubmissionOutcome::HardFailure(_) => self.policy.hard_failure_backoff,
        };
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}
