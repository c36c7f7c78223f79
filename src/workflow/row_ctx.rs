//! 行处理上下文
//!
//! 封装"我正在处理第几行的第几次尝试"这一信息

use std::fmt::Display;

/// 行处理上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCtx {
    /// 行索引（从 0 开始）
    pub row_index: usize,

    /// 当前尝试次数（从 1 开始）
    pub attempt: u32,

    /// 最大尝试次数
    pub max_attempts: u32,
}

impl RowCtx {
    pub fn new(row_index: usize, attempt: u32, max_attempts: u32) -> Self {
        Self {
            row_index,
            attempt,
            max_attempts,
        }
    }
}

impl Display for RowCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[行 {} 尝试 {}/{}]",
            self.row_index + 1,
            self.attempt,
            self.max_attempts
        )
    }
}
