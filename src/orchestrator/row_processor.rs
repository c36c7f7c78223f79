//! 逐行处理器 - 编排层
//!
//! ## 职责
//!
//! 按源表顺序逐行驱动提交流程，并把成功行的确认信息写回表格。
//!
//! ## 核心功能
//!
//! 1. **遍历数据行**：严格按顺序，一行处理完（成功或放弃）再开始下一行
//! 2. **流程调度**：复用同一个 `SubmissionFlow`
//! 3. **结果写回**：成功行立即写入并落盘
//! 4. **节奏控制**：成功后固定等待，放弃的行不等待
//! 5. **统计输出**：记录成功/空确认/放弃/写回失败数量

use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::infrastructure::{FormPage, TableStore};
use crate::models::RowSource;
use crate::services::ResultWriter;
use crate::workflow::{RowResolution, SubmissionFlow};

/// 整次运行的统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub succeeded: usize,
    /// 成功但页面没有显示确认信息
    pub empty_confirmations: usize,
    pub aborted: usize,
    /// 已提交但写回表格失败的行
    pub write_failures: usize,
}

/// 逐行处理所有数据
///
/// 单行的任何失败（包括写回表格失败）都不会中断运行。
/// 每次落盘都会重写整张表，所以后续行成功落盘时会补上之前未保存的确认信息。
pub async fn process_rows<P, T>(
    page: &P,
    flow: &SubmissionFlow<'_>,
    rows: &RowSource,
    writer: &ResultWriter,
    table: &mut T,
    pacing_delay: Duration,
) -> RunStats
where
    P: FormPage + ?Sized,
    T: TableStore + ?Sized,
{
    let mut stats = RunStats {
        total: rows.len(),
        ..Default::default()
    };

    for row in rows {
        log_row_start(row.display_index(), rows.len());

        match flow.run(page, row).await {
            RowResolution::Succeeded {
                confirmation,
                attempts,
            } => {
                stats.succeeded += 1;

                if let Err(e) = writer.record(table, row, &confirmation) {
                    stats.write_failures += 1;
                    error!(
                        "[行 {}] ❌ 已提交但写回表格失败: {}",
                        row.display_index(),
                        e
                    );
                } else if confirmation.is_empty() {
                    stats.empty_confirmations += 1;
                    warn!(
                        "[行 {}] ⚠️ 提交成功但没有确认信息 (尝试 {} 次)",
                        row.display_index(),
                        attempts
                    );
                } else {
                    info!(
                        "[行 {}] ✅ 已保存确认信息 (尝试 {} 次)",
                        row.display_index(),
                        attempts
                    );
                }

                if !pacing_delay.is_zero() {
                    sleep(pacing_delay).await;
                }
            }
            RowResolution::Aborted { .. } => {
                stats.aborted += 1;
            }
        }
    }

    stats
}

// ========== 日志辅助函数 ==========

fn log_row_start(row_number: usize, total: usize) {
    info!("\n{}", "─".repeat(30));
    info!("处理第 {}/{} 行", row_number, total);
}
