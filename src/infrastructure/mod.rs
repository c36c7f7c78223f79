//! 基础设施层
//!
//! 持有稀缺资源（浏览器页面、工作簿），只暴露能力

pub mod chromium_page;
pub mod form_page;
pub mod js_executor;
pub mod table;
pub mod xlsx_table;

pub use chromium_page::ChromiumFormPage;
pub use form_page::{ControlState, FormPage};
pub use js_executor::JsExecutor;
pub use table::TableStore;
pub use xlsx_table::XlsxTable;
