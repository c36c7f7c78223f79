//! # Form Batch Submit
//!
//! 把表格中的每一行提交到网页表单，并把页面返回的确认信息逐行写回表格
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（页面、工作簿），只暴露能力
//! - `FormPage` - 查询控件状态、输入、点击、读文本
//! - `TableStore` - 读写单元格、落盘
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务只做一行的一步
//! - `PageStateDetector` - 判断表单布局
//! - `FieldFiller` - 填写并提交
//! - `ResponseReader` - 读取并规范化确认信息
//! - `ResultWriter` - 写回确认信息并落盘
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一行"的完整处理流程
//! - `RowCtx` - 上下文封装（行号 + 尝试次数）
//! - `SubmissionFlow` - 有限次数的重试状态机
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 启动阶段与资源管理
//! - `orchestrator/row_processor` - 逐行驱动流程并写回结果

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

#[cfg(test)]
mod test_support;

// 重新导出常用类型
pub use config::{Config, RetryPolicy, Timeouts};
pub use error::{InteractionError, TableError};
pub use infrastructure::{ControlState, FormPage, TableStore, XlsxTable};
pub use models::{Locator, LocatorSet, LocatorTable, Row, RowSource, Variant};
pub use orchestrator::{process_rows, App, RunStats};
pub use services::ResultWriter;
pub use workflow::{RowResolution, SubmissionFlow};
