//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"执行 JS"的能力

use anyhow::Result;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::models::Locator;

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() 能力
/// - 不认识 Row / Variant
/// - 不处理业务流程
#[derive(Clone)]
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> Result<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 通过脚本点击控件（绕过遮挡检测）
    ///
    /// # 返回
    /// 控件存在并已点击时返回 true
    pub async fn script_click(&self, locator: &Locator) -> Result<bool> {
        let js_code = format!(
            r#"
            (() => {{
                const el = {};
                if (!el) return false;
                el.click();
                return true;
            }})()
            "#,
            resolve_element_js(locator)?
        );
        self.eval_as(js_code).await
    }
}

/// 生成在页面中解析控件的 JS 表达式
pub fn resolve_element_js(locator: &Locator) -> serde_json::Result<String> {
    let expr = serde_json::to_string(locator.expr())?;
    Ok(match locator {
        Locator::XPath(_) => format!(
            "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
            expr
        ),
        Locator::Css(_) => format!("document.querySelector({})", expr),
    })
}
