//! 控件定位与表单布局
//!
//! 目标表单有两种布局：首次提交前（`Before`）和提交后（`After`）。
//! 每种布局对应一组四个控件：三个输入框 + 提交按钮。

use std::fmt;

use serde::Deserialize;

/// 控件定位表达式
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locator {
    XPath(String),
    Css(String),
}

impl Locator {
    pub fn xpath(expr: impl Into<String>) -> Self {
        Locator::XPath(expr.into())
    }

    pub fn css(expr: impl Into<String>) -> Self {
        Locator::Css(expr.into())
    }

    pub fn expr(&self) -> &str {
        match self {
            Locator::XPath(expr) | Locator::Css(expr) => expr,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::XPath(expr) => write!(f, "xpath={}", expr),
            Locator::Css(expr) => write!(f, "css={}", expr),
        }
    }
}

/// 表单布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// 尚未提交过
    Before,
    /// 已提交过至少一次，表单下移了一个区块
    After,
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Before => "before",
            Variant::After => "after",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 一种布局下的四个控件，顺序固定
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocatorSet {
    pub field1: Locator,
    pub field2: Locator,
    pub field3: Locator,
    pub submit: Locator,
}

impl LocatorSet {
    /// 三个输入框，按填写顺序
    pub fn fields(&self) -> [&Locator; 3] {
        [&self.field1, &self.field2, &self.field3]
    }

    pub(crate) fn slots(&self) -> [(&'static str, &Locator); 4] {
        [
            ("field1", &self.field1),
            ("field2", &self.field2),
            ("field3", &self.field3),
            ("submit", &self.submit),
        ]
    }
}
