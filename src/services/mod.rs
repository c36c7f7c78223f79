//! 业务能力层
//!
//! 描述"我能做什么"，每个服务只处理一行的一步

pub mod field_filler;
pub mod page_state;
pub mod response_reader;
pub mod result_writer;
pub mod waits;

pub use field_filler::{FieldFiller, FillOutcome};
pub use page_state::PageStateDetector;
pub use response_reader::{normalize_confirmation, ResponseReader};
pub use result_writer::ResultWriter;
