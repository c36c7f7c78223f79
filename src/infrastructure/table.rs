//! 表格能力
//!
//! 核心只依赖"读单元格 / 写单元格 / 落盘"三种能力，不关心表格的物理格式。

use crate::error::TableError;

/// 表格存储
///
/// 行号、列号均从 1 开始，第 1 行为表头
pub trait TableStore {
    /// 最后一行的行号（含表头）；空表返回 0
    fn last_row(&self) -> u32;

    /// 最后一列的列号
    fn last_column(&self) -> u32;

    /// 读取单元格文本，空单元格返回空字符串
    fn read_cell(&self, column: u32, row: u32) -> String;

    /// 写入单元格（仅修改内存中的表格）
    fn write_cell(&mut self, column: u32, row: u32, value: &str) -> Result<(), TableError>;

    /// 将整张表同步写回存储
    fn flush(&mut self) -> Result<(), TableError>;

    /// 读取表头（第 1 行）
    fn header(&self) -> Vec<String> {
        (1..=self.last_column())
            .map(|column| self.read_cell(column, 1))
            .collect()
    }
}

/// 列字母转列号："A" → 1，"G" → 7，"AA" → 27
pub fn column_index(letters: &str) -> Result<u32, TableError> {
    let letters = letters.trim();
    let invalid = || TableError::InvalidColumn {
        column: letters.to_string(),
    };

    if letters.is_empty() || letters.len() > 3 {
        return Err(invalid());
    }

    letters.chars().try_fold(0u32, |acc, ch| {
        if ch.is_ascii_alphabetic() {
            Ok(acc * 26 + (ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1))
        } else {
            Err(invalid())
        }
    })
}

/// 按表头名称查找列号
pub fn find_column(header: &[String], name: &str) -> Result<u32, TableError> {
    header
        .iter()
        .position(|cell| cell.trim() == name)
        .map(|pos| pos as u32 + 1)
        .ok_or_else(|| TableError::MissingColumn {
            column: name.to_string(),
        })
}
