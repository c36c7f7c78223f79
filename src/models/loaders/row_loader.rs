//! 数据行来源
//!
//! 一次性从表格读出所有数据行，之后可以反复从头遍历

use crate::error::TableError;
use crate::infrastructure::table::{find_column, TableStore};
use crate::models::row::Row;

/// 源表中三个字段所在的列名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceColumns {
    pub field1: String,
    pub field2: String,
    pub field3: String,
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            field1: "@BH".to_string(),
            field2: "@BD".to_string(),
            field3: "@BA".to_string(),
        }
    }
}

/// 有序、有限、可重复遍历的数据行序列
#[derive(Debug, Clone, Default)]
pub struct RowSource {
    rows: Vec<Row>,
}

impl RowSource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// 按表头列名读取所有数据行
    pub fn from_table<T: TableStore + ?Sized>(
        table: &T,
        columns: &SourceColumns,
    ) -> Result<Self, TableError> {
        let header = table.header();
        let c1 = find_column(&header, &columns.field1)?;
        let c2 = find_column(&header, &columns.field2)?;
        let c3 = find_column(&header, &columns.field3)?;

        let rows = (2..=table.last_row())
            .enumerate()
            .map(|(index, table_row)| {
                Row::new(
                    index,
                    table.read_cell(c1, table_row),
                    table.read_cell(c2, table_row),
                    table.read_cell(c3, table_row),
                )
            })
            .collect();

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 从第一行开始遍历
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a RowSource {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
