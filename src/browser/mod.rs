//! 浏览器启动阶段
//!
//! 获取会话、登录、导航到表单页面，均为一次性步骤

pub mod connection;
pub mod headless;
pub mod login;
pub mod session;

pub use connection::connect_browser;
pub use headless::launch_browser;
pub use login::{login, navigate_to_form, BootstrapLocators};
pub use session::BrowserSession;
