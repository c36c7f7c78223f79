//! 基于 chromiumoxide 的表单页面实现
//!
//! 状态查询和读文本通过 JS 完成；输入和点击使用真实的鼠标/键盘事件。

use async_trait::async_trait;
use chromiumoxide::element::Element;
use tracing::debug;

use crate::error::{InteractionError, InteractionResult};
use crate::infrastructure::form_page::{ControlState, FormPage};
use crate::infrastructure::js_executor::{resolve_element_js, JsExecutor};
use crate::models::Locator;

/// Chromium 表单页面
#[derive(Clone)]
pub struct ChromiumFormPage {
    executor: JsExecutor,
}

impl ChromiumFormPage {
    pub fn new(executor: JsExecutor) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &JsExecutor {
        &self.executor
    }

    /// 操作前确认控件可交互，再定位元素
    async fn interactable_element(&self, locator: &Locator) -> InteractionResult<Element> {
        match self.control_state(locator).await? {
            ControlState::Missing => {
                return Err(InteractionError::Missing {
                    locator: locator.to_string(),
                })
            }
            ControlState::Hidden | ControlState::Visible => {
                return Err(InteractionError::NotInteractable {
                    locator: locator.to_string(),
                })
            }
            ControlState::Interactable => {}
        }

        let page = self.executor.page();
        let found = match locator {
            Locator::XPath(expr) => page.find_xpath(expr.as_str()).await,
            Locator::Css(expr) => page.find_element(expr.as_str()).await,
        };

        // 状态检查通过后又找不到，说明节点刚被替换
        found.map_err(|e| {
            debug!("定位 {} 失败: {}", locator, e);
            InteractionError::Stale {
                locator: locator.to_string(),
            }
        })
    }
}

#[async_trait]
impl FormPage for ChromiumFormPage {
    async fn control_state(&self, locator: &Locator) -> InteractionResult<ControlState> {
        let js_code = format!(
            r#"
            (() => {{
                const el = {};
                if (!el) return "missing";
                const style = window.getComputedStyle(el);
                const rect = el.getBoundingClientRect();
                if (style.display === "none" || style.visibility === "hidden"
                    || rect.width === 0 || rect.height === 0) return "hidden";
                if (el.disabled) return "visible";
                return "interactable";
            }})()
            "#,
            resolve_element_js(locator)?
        );

        self.executor
            .eval_as(js_code)
            .await
            .map_err(|e| InteractionError::Driver(e.to_string()))
    }

    async fn type_text(&self, locator: &Locator, text: &str) -> InteractionResult<()> {
        let element = self.interactable_element(locator).await?;
        element.click().await.map_err(|e| classify_action_error(locator, e))?;
        element
            .type_str(text)
            .await
            .map_err(|e| classify_action_error(locator, e))?;
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> InteractionResult<()> {
        let element = self.interactable_element(locator).await?;
        element.click().await.map_err(|e| classify_action_error(locator, e))?;
        Ok(())
    }

    async fn read_text(&self, locator: &Locator) -> InteractionResult<String> {
        let js_code = format!(
            r#"
            (() => {{
                const el = {};
                return el ? el.innerText : null;
            }})()
            "#,
            resolve_element_js(locator)?
        );

        let text: Option<String> = self
            .executor
            .eval_as(js_code)
            .await
            .map_err(|e| InteractionError::Driver(e.to_string()))?;

        text.ok_or_else(|| InteractionError::Missing {
            locator: locator.to_string(),
        })
    }
}

/// 点击/输入过程中节点被移除视为失效，其余为驱动错误
fn classify_action_error(locator: &Locator, err: chromiumoxide::error::CdpError) -> InteractionError {
    let message = err.to_string();
    if message.contains("detached") || message.contains("No node") {
        InteractionError::Stale {
            locator: locator.to_string(),
        }
    } else {
        InteractionError::Driver(message)
    }
}
