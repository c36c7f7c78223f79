use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- 登录配置 ---
    pub login_url: String,
    pub login_email: String,
    pub login_password: String,
    // --- 浏览器配置 ---
    /// 已运行浏览器的调试端口；为空时启动新浏览器
    pub browser_debug_port: Option<u16>,
    /// 启动浏览器时使用的可执行文件
    pub chrome_executable: Option<String>,
    /// 启动浏览器时是否使用无头模式
    pub headless: bool,
    // --- 表格配置 ---
    /// 输入/输出表格路径
    pub table_path: String,
    /// 写入确认信息的列
    pub output_column: String,
    /// 定位表覆盖文件（TOML）
    pub locator_file: Option<String>,
    // --- 提交策略 ---
    /// 每行最大尝试次数
    pub max_attempts: u32,
    pub transient_backoff_ms: u64,
    pub hard_failure_backoff_ms: u64,
    /// 每行成功后的节奏延迟
    pub pacing_delay_ms: u64,
    // --- 等待上限 ---
    pub detect_timeout_ms: u64,
    pub ready_timeout_ms: u64,
    pub confirmation_timeout_ms: u64,
    pub poll_interval_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            login_url: String::new(),
            login_email: String::new(),
            login_password: String::new(),
            browser_debug_port: None,
            chrome_executable: None,
            headless: false,
            table_path: "ficheiro/BB.xlsx".to_string(),
            output_column: "G".to_string(),
            locator_file: None,
            max_attempts: 3,
            transient_backoff_ms: 2000,
            hard_failure_backoff_ms: 0,
            pacing_delay_ms: 1000,
            detect_timeout_ms: 1000,
            ready_timeout_ms: 10_000,
            confirmation_timeout_ms: 10_000,
            poll_interval_ms: 200,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量和当前目录的 `.env` 文件读取配置
    ///
    /// `LOGIN_URL`、`LOGIN_EMAIL`、`LOGIN_PASSWORD` 必须存在，其余使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_and_file(Path::new(".env"))
    }

    /// 进程环境变量优先，缺少的再从 `env_file` 中取；文件不存在时忽略
    pub fn from_env_and_file(env_file: &Path) -> Result<Self, ConfigError> {
        Self::layered(|name| std::env::var(name).ok(), env_file)
    }

    fn layered<F>(lookup: F, env_file: &Path) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_vars = read_env_file(env_file)?;
        Self::from_lookup(|name| lookup(name).or_else(|| file_vars.get(name).cloned()))
    }

    /// 从任意键值来源读取配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::EnvVarNotFound {
                    var_name: name.to_string(),
                })
        };

        Ok(Self {
            login_url: required("LOGIN_URL")?,
            login_email: required("LOGIN_EMAIL")?,
            login_password: required("LOGIN_PASSWORD")?,
            browser_debug_port: parse_optional(&lookup, "BROWSER_DEBUG_PORT", "u16")?,
            chrome_executable: lookup("CHROME_EXECUTABLE"),
            headless: parse_or(&lookup, "HEADLESS", default.headless, "bool")?,
            table_path: lookup("TABLE_PATH").unwrap_or(default.table_path),
            output_column: lookup("OUTPUT_COLUMN").unwrap_or(default.output_column),
            locator_file: lookup("LOCATOR_FILE"),
            max_attempts: parse_or(&lookup, "MAX_ATTEMPTS", default.max_attempts, "u32")?,
            transient_backoff_ms: parse_or(
                &lookup,
                "TRANSIENT_BACKOFF_MS",
                default.transient_backoff_ms,
                "u64",
            )?,
            hard_failure_backoff_ms: parse_or(
                &lookup,
                "HARD_FAILURE_BACKOFF_MS",
                default.hard_failure_backoff_ms,
                "u64",
            )?,
            pacing_delay_ms: parse_or(&lookup, "PACING_DELAY_MS", default.pacing_delay_ms, "u64")?,
            detect_timeout_ms: parse_or(
                &lookup,
                "DETECT_TIMEOUT_MS",
                default.detect_timeout_ms,
                "u64",
            )?,
            ready_timeout_ms: parse_or(&lookup, "READY_TIMEOUT_MS", default.ready_timeout_ms, "u64")?,
            confirmation_timeout_ms: parse_or(
                &lookup,
                "CONFIRMATION_TIMEOUT_MS",
                default.confirmation_timeout_ms,
                "u64",
            )?,
            poll_interval_ms: parse_or(&lookup, "POLL_INTERVAL_MS", default.poll_interval_ms, "u64")?,
            verbose_logging: parse_or(
                &lookup,
                "VERBOSE_LOGGING",
                default.verbose_logging,
                "bool",
            )?,
        })
    }

    /// 重试策略
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            transient_backoff: Duration::from_millis(self.transient_backoff_ms),
            hard_failure_backoff: Duration::from_millis(self.hard_failure_backoff_ms),
        }
    }

    /// 各类有界等待的上限
    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            detect: Duration::from_millis(self.detect_timeout_ms),
            ready: Duration::from_millis(self.ready_timeout_ms),
            confirmation: Duration::from_millis(self.confirmation_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }
}

/// 单行重试策略
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// 瞬时失败后的退避
    pub transient_backoff: Duration,
    /// 硬失败后的退避（默认不等待）
    pub hard_failure_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Config::default().retry_policy()
    }
}

/// 有界等待的上限
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    /// 判断表单布局时的探测上限
    pub detect: Duration,
    /// 等待第一个输入框可交互的上限
    pub ready: Duration,
    /// 等待确认信息出现的上限
    pub confirmation: Duration,
    pub poll_interval: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Config::default().timeouts()
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let invalid = |e: dotenvy::Error| ConfigError::EnvFileInvalid {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    match dotenvy::from_path_iter(path) {
        Ok(iter) => iter.collect::<Result<HashMap<_, _>, _>>().map_err(invalid),
        Err(e) if e.not_found() => Ok(HashMap::new()),
        Err(e) => Err(invalid(e)),
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T, expected_type: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    Ok(parse_optional(lookup, name, expected_type)?.unwrap_or(default))
}

fn parse_optional<F, T>(lookup: &F, name: &str, expected_type: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
    }
}
