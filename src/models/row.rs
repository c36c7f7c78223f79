/// 表格中的一行待提交数据
///
/// `index` 从 0 开始，按源表顺序编号；表格中的行号为 `index + 2`
/// （第 1 行是表头，且表格行号从 1 开始）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub index: usize,
    pub field1: String,
    pub field2: String,
    pub field3: String,
}

impl Row {
    pub fn new(
        index: usize,
        field1: impl Into<String>,
        field2: impl Into<String>,
        field3: impl Into<String>,
    ) -> Self {
        Self {
            index,
            field1: field1.into(),
            field2: field2.into(),
            field3: field3.into(),
        }
    }

    /// 该行在表格中的行号（1 开始，含表头）
    pub fn table_row(&self) -> u32 {
        self.index as u32 + 2
    }

    /// 按填写顺序返回三个字段
    pub fn values(&self) -> [&str; 3] {
        [&self.field1, &self.field2, &self.field3]
    }

    /// 日志中使用的行号（1 开始）
    pub fn display_index(&self) -> usize {
        self.index + 1
    }
}
