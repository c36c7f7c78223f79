//! 批量提交应用 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责启动阶段和资源管理。
//!
//! ## 核心功能
//!
//! 1. **加载定位表**：内置默认值或 TOML 覆盖文件，启动时校验一次
//! 2. **加载表格**：打开工作簿，按表头解析数据行
//! 3. **获取浏览器**：连接或启动浏览器，登录并导航到表单页面
//! 4. **逐行处理**：委托 row_processor
//! 5. **资源释放**：无论成功失败，启动阶段之后都释放浏览器会话
//!
//! ## 设计特点
//!
//! - **资源所有者**：唯一持有浏览器会话和工作簿的模块
//! - **启动失败即终止**：启动阶段任何错误都直接返回

use anyhow::{Context, Result};
use tracing::{error, warn};

use crate::browser::{self, BootstrapLocators, BrowserSession};
use crate::config::Config;
use crate::infrastructure::{ChromiumFormPage, JsExecutor, XlsxTable};
use crate::models::{resolve_locator_table, LocatorTable, RowSource, SourceColumns};
use crate::orchestrator::row_processor::{process_rows, RunStats};
use crate::services::ResultWriter;
use crate::utils::logging::{log_rows_loaded, log_startup, print_final_stats};
use crate::workflow::SubmissionFlow;

/// 应用主结构
pub struct App {
    config: Config,
    session: BrowserSession,
    page: ChromiumFormPage,
    locators: LocatorTable,
    table: XlsxTable,
    rows: RowSource,
    writer: ResultWriter,
}

impl App {
    /// 初始化应用：加载定位表和表格，获取浏览器，登录并进入表单页面
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let locators = resolve_locator_table(config.locator_file.as_deref()).await?;

        let table = XlsxTable::open(&config.table_path)
            .with_context(|| format!("无法加载表格: {}", config.table_path))?;
        let rows = RowSource::from_table(&table, &SourceColumns::default())
            .with_context(|| format!("无法解析表格: {}", config.table_path))?;
        let writer = ResultWriter::new(&config.output_column)?;
        log_rows_loaded(rows.len());

        let (session, page) = BrowserSession::open(&config).await?;
        let page = ChromiumFormPage::new(JsExecutor::new(page));

        if let Err(e) = Self::sign_in(&config, &page).await {
            error!("启动失败: {:#}", e);
            session.close().await;
            return Err(e);
        }

        Ok(Self {
            config,
            session,
            page,
            locators,
            table,
            rows,
            writer,
        })
    }

    async fn sign_in(config: &Config, page: &ChromiumFormPage) -> Result<()> {
        let bootstrap = BootstrapLocators::default();
        browser::login(
            page,
            &bootstrap,
            &config.login_url,
            &config.login_email,
            &config.login_password,
        )
        .await?;
        browser::navigate_to_form(page, &bootstrap).await
    }

    /// 运行应用主逻辑
    pub async fn run(self) -> Result<RunStats> {
        let Self {
            config,
            session,
            page,
            locators,
            mut table,
            rows,
            writer,
        } = self;

        if rows.is_empty() {
            warn!("⚠️ 表格中没有数据行，程序结束");
            session.close().await;
            return Ok(RunStats::default());
        }

        let flow = SubmissionFlow::new(&locators, config.timeouts(), config.retry_policy());
        let stats = process_rows(
            &page,
            &flow,
            &rows,
            &writer,
            &mut table,
            config.pacing_delay(),
        )
        .await;

        session.close().await;

        print_final_stats(&stats, &table.path().display().to_string());
        Ok(stats)
    }
}
