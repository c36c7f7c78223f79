//! 错误类型
//!
//! - 行级错误（`InteractionError`）只在一行之内被分类和消化，不会升级为进程错误
//! - 启动阶段错误（配置、浏览器、登录、导航、表格加载）都是致命的

use thiserror::Error;

/// 页面控件交互错误
///
/// 由 `FormPage` 能力层返回，由重试控制器分类为瞬时/硬失败
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InteractionError {
    /// 控件存在但暂时不可交互（被遮挡、禁用、不可见）
    #[error("控件不可交互: {locator}")]
    NotInteractable { locator: String },

    /// 控件不存在
    #[error("控件不存在: {locator}")]
    Missing { locator: String },

    /// 控件在定位后已从 DOM 移除
    #[error("控件已失效: {locator}")]
    Stale { locator: String },

    /// 浏览器驱动返回的其他错误
    #[error("浏览器驱动错误: {0}")]
    Driver(String),
}

impl InteractionError {
    /// 是否为可退避重试的瞬时错误
    pub fn is_transient(&self) -> bool {
        matches!(self, InteractionError::NotInteractable { .. })
    }
}

impl From<serde_json::Error> for InteractionError {
    fn from(err: serde_json::Error) -> Self {
        InteractionError::Driver(format!("脚本返回值解析失败: {}", err))
    }
}

/// 表格读写错误
#[derive(Debug, Error)]
pub enum TableError {
    /// 打开工作簿失败
    #[error("无法打开表格 {path}: {message}")]
    OpenFailed { path: String, message: String },

    /// 工作簿中没有工作表
    #[error("表格 {path} 中没有工作表")]
    NoSheet { path: String },

    /// 表头中缺少必需的列
    #[error("表头缺少列: {column}")]
    MissingColumn { column: String },

    /// 列名不是合法的列字母
    #[error("非法的列名: {column}")]
    InvalidColumn { column: String },

    /// 写回磁盘失败
    #[error("保存表格 {path} 失败: {message}")]
    FlushFailed { path: String, message: String },
}

/// 定位表错误
#[derive(Debug, Error)]
pub enum LocatorError {
    /// 读取定位文件失败
    #[error("无法读取定位文件 {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("定位文件解析失败 {path}: {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// 定位表达式为空
    #[error("定位表达式为空: {variant}.{slot}")]
    EmptyExpression { variant: String, slot: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },

    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },

    /// `.env` 文件无法读取或格式错误
    #[error("无法读取环境文件 {path}: {message}")]
    EnvFileInvalid { path: String, message: String },
}

// ========== Result 类型别名 ==========

/// 交互结果类型
pub type InteractionResult<T> = Result<T, InteractionError>;
