//! 结果写回 - 业务能力层
//!
//! 只负责"把一行的确认信息写进表格并立即落盘"

use tracing::debug;

use crate::error::TableError;
use crate::infrastructure::table::{column_index, TableStore};
use crate::models::Row;

/// 结果写回服务
///
/// 表格由调用方持有，每次调用时显式传入
#[derive(Debug, Clone, Copy)]
pub struct ResultWriter {
    output_column: u32,
}

impl ResultWriter {
    /// `output_column` 为列字母，如 "G"
    pub fn new(output_column: &str) -> Result<Self, TableError> {
        Ok(Self {
            output_column: column_index(output_column)?,
        })
    }

    /// 确认信息非空时写入该行的输出单元格，然后同步落盘
    ///
    /// 返回前整张表已写回存储
    pub fn record<T: TableStore + ?Sized>(
        &self,
        table: &mut T,
        row: &Row,
        confirmation: &str,
    ) -> Result<(), TableError> {
        if !confirmation.is_empty() {
            table.write_cell(self.output_column, row.table_row(), confirmation)?;
            debug!(
                "[行 {}] 写入确认信息到第 {} 行第 {} 列",
                row.display_index(),
                row.table_row(),
                self.output_column
            );
        }
        table.flush()
    }
}
