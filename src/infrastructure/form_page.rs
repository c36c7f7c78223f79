//! 页面能力
//!
//! 核心把浏览器会话当作不透明能力使用：查询控件状态、输入、点击、读文本。
//! 等待逻辑（轮询 + 上限）由调用方在 `services::waits` 中实现。

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::InteractionResult;
use crate::models::Locator;

/// 控件当前状态，按"就绪程度"递增排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlState {
    /// 不在 DOM 中
    Missing,
    /// 在 DOM 中但不可见
    Hidden,
    /// 可见但不可交互（禁用等）
    Visible,
    /// 可见且可交互
    Interactable,
}

impl ControlState {
    /// 控件是否存在于 DOM
    pub fn is_present(&self) -> bool {
        *self > ControlState::Missing
    }
}

/// 表单页面
#[async_trait]
pub trait FormPage: Send + Sync {
    /// 查询控件状态，不等待
    async fn control_state(&self, locator: &Locator) -> InteractionResult<ControlState>;

    /// 向控件输入文本（追加，不清空）
    async fn type_text(&self, locator: &Locator, text: &str) -> InteractionResult<()>;

    /// 点击控件
    async fn click(&self, locator: &Locator) -> InteractionResult<()>;

    /// 读取控件的可见文本
    async fn read_text(&self, locator: &Locator) -> InteractionResult<String>;
}
