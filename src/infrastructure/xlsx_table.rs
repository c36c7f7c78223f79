//! xlsx 工作簿 - 基础设施层
//!
//! 持有唯一的工作簿资源，只操作第一个工作表

use std::path::{Path, PathBuf};

use tracing::debug;
use umya_spreadsheet::{reader, writer, Spreadsheet};

use crate::error::TableError;
use crate::infrastructure::table::TableStore;

/// xlsx 表格
pub struct XlsxTable {
    path: PathBuf,
    book: Spreadsheet,
}

impl XlsxTable {
    /// 打开工作簿
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref().to_path_buf();
        let book = reader::xlsx::read(&path).map_err(|e| TableError::OpenFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        if book.get_sheet(&0).is_none() {
            return Err(TableError::NoSheet {
                path: path.display().to_string(),
            });
        }

        debug!("已打开表格: {}", path.display());
        Ok(Self { path, book })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 落盘时使用的临时文件，与目标文件同目录以保证 rename 原子
    fn staging_path(&self) -> PathBuf {
        self.path.with_extension("tmp.xlsx")
    }
}

impl TableStore for XlsxTable {
    fn last_row(&self) -> u32 {
        self.book
            .get_sheet(&0)
            .map(|sheet| sheet.get_highest_row())
            .unwrap_or(0)
    }

    fn last_column(&self) -> u32 {
        self.book
            .get_sheet(&0)
            .map(|sheet| sheet.get_highest_column())
            .unwrap_or(0)
    }

    fn read_cell(&self, column: u32, row: u32) -> String {
        self.book
            .get_sheet(&0)
            .map(|sheet| sheet.get_value((column, row)))
            .unwrap_or_default()
    }

    fn write_cell(&mut self, column: u32, row: u32, value: &str) -> Result<(), TableError> {
        let path = self.path.display().to_string();
        let sheet = self
            .book
            .get_sheet_mut(&0)
            .ok_or(TableError::NoSheet { path })?;
        sheet.get_cell_mut((column, row)).set_value(value);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TableError> {
        let staging = self.staging_path();
        let flush_failed = |message: String| TableError::FlushFailed {
            path: self.path.display().to_string(),
            message,
        };

        writer::xlsx::write(&self.book, &staging).map_err(|e| flush_failed(e.to_string()))?;
        std::fs::rename(&staging, &self.path).map_err(|e| flush_failed(e.to_string()))?;

        debug!("表格已保存: {}", self.path.display());
        Ok(())
    }
}
