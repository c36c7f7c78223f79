//! 登录与导航
//!
//! 一次性线性步骤，不重试；任何失败都会终止整次运行

use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::infrastructure::{ChromiumFormPage, ControlState, FormPage};
use crate::models::Locator;
use crate::services::waits::wait_for_state;

const BOOTSTRAP_TIMEOUT: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// 登录页与菜单的控件
#[derive(Debug, Clone)]
pub struct BootstrapLocators {
    pub email: Locator,
    pub password: Locator,
    pub login_button: Locator,
    pub menu_link: Locator,
    pub submenu_link: Locator,
}

impl Default for BootstrapLocators {
    fn default() -> Self {
        Self {
            email: Locator::xpath(r#"//*[@id="id_login"]"#),
            password: Locator::xpath(r#"//*[@id="id_password"]"#),
            login_button: Locator::xpath(r#"//*[@id="auth-right"]/form/button"#),
            menu_link: Locator::xpath(r#"//*[@id="sidebar"]/ul/li[3]/a"#),
            submenu_link: Locator::xpath(r#"//*[@id="sidebar"]/ul/li[3]/ul/li[1]/a"#),
        }
    }
}

/// 打开登录页并提交账号密码
pub async fn login(
    page: &ChromiumFormPage,
    locators: &BootstrapLocators,
    url: &str,
    email: &str,
    password: &str,
) -> Result<()> {
    page.executor()
        .page()
        .goto(url)
        .await
        .with_context(|| format!("导航到 {} 失败", url))?;

    let outcome = wait_for_state(
        page,
        &locators.email,
        ControlState::Hidden,
        BOOTSTRAP_TIMEOUT,
        POLL_INTERVAL,
    )
    .await;
    if !outcome.is_reached() {
        bail!("登录页面未加载: {}", locators.email);
    }

    info!("正在登录...");
    page.type_text(&locators.email, email)
        .await
        .context("填写邮箱失败")?;
    page.type_text(&locators.password, password)
        .await
        .context("填写密码失败")?;
    page.click(&locators.login_button)
        .await
        .context("点击登录按钮失败")?;
    info!("✓ 登录已提交");

    Ok(())
}

/// 通过侧边栏菜单进入表单页面
pub async fn navigate_to_form(page: &ChromiumFormPage, locators: &BootstrapLocators) -> Result<()> {
    let outcome = wait_for_state(
        page,
        &locators.menu_link,
        ControlState::Interactable,
        BOOTSTRAP_TIMEOUT,
        POLL_INTERVAL,
    )
    .await;
    if !outcome.is_reached() {
        bail!("侧边栏菜单不可点击: {}", locators.menu_link);
    }

    // 菜单项可能被折叠动画遮挡，用脚本点击
    for link in [&locators.menu_link, &locators.submenu_link] {
        let clicked = page
            .executor()
            .script_click(link)
            .await
            .with_context(|| format!("点击菜单失败: {}", link))?;
        if !clicked {
            bail!("菜单项不存在: {}", link);
        }
    }

    info!("✓ 已进入表单页面");
    Ok(())
}
