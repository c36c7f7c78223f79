//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 应用入口
//! - 管理应用生命周期（初始化、运行、释放）
//! - 持有浏览器会话和工作簿
//!
//! ### `row_processor` - 逐行处理器
//! - 按顺序遍历数据行（RowSource）
//! - 复用 SubmissionFlow
//! - 成功行写回并落盘
//! - 输出统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (启动阶段 + 资源)
//!     ↓
//! row_processor (处理 RowSource)
//!     ↓
//! workflow::SubmissionFlow (处理单行，含重试)
//!     ↓
//! services (能力层：布局判断 / 填写 / 读确认 / 写回)
//!     ↓
//! infrastructure (基础设施：FormPage / TableStore)
//! ```

pub mod batch_processor;
pub mod row_processor;

// 重新导出主要类型
pub use batch_processor::App;
pub use row_processor::{process_rows, RunStats};
