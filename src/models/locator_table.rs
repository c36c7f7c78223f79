//! 定位表
//!
//! 布局 → 控件组 的静态映射，启动时加载并校验一次。
//! 页面结构变化只需要修改数据（默认值或 TOML 覆盖文件），不需要改流程代码。

use serde::Deserialize;

use crate::error::LocatorError;
use crate::models::locator::{Locator, LocatorSet, Variant};

const FORM_BEFORE: &str = "/html/body/div[4]/div[1]/div[2]/div/div/form";
const FORM_AFTER: &str = "/html/body/div[4]/div[1]/div[3]/div/div/form";
const CONFIRMATION: &str = "/html/body/div[4]/div[1]/div[2]/strong";

/// 定位表
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocatorTable {
    before: LocatorSet,
    after: LocatorSet,
    /// 提交后显示确认信息的控件
    confirmation: Locator,
}

impl LocatorTable {
    pub fn new(before: LocatorSet, after: LocatorSet, confirmation: Locator) -> Self {
        Self {
            before,
            after,
            confirmation,
        }
    }

    /// 目标系统当前页面结构对应的默认定位
    pub fn builtin() -> Self {
        Self::new(
            form_locators(FORM_BEFORE),
            form_locators(FORM_AFTER),
            Locator::xpath(CONFIRMATION),
        )
    }

    pub fn get(&self, variant: Variant) -> &LocatorSet {
        match variant {
            Variant::Before => &self.before,
            Variant::After => &self.after,
        }
    }

    /// 用于判断布局的标记控件：`Before` 布局的第一个输入框
    pub fn marker(&self) -> &Locator {
        &self.before.field1
    }

    pub fn confirmation(&self) -> &Locator {
        &self.confirmation
    }

    /// 校验所有定位表达式非空
    pub fn validate(&self) -> Result<(), LocatorError> {
        for variant in [Variant::Before, Variant::After] {
            for (slot, locator) in self.get(variant).slots() {
                if locator.expr().trim().is_empty() {
                    return Err(LocatorError::EmptyExpression {
                        variant: variant.name().to_string(),
                        slot: slot.to_string(),
                    });
                }
            }
        }
        if self.confirmation.expr().trim().is_empty() {
            return Err(LocatorError::EmptyExpression {
                variant: "table".to_string(),
                slot: "confirmation".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for LocatorTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn form_locators(form: &str) -> LocatorSet {
    LocatorSet {
        field1: Locator::xpath(format!("{}/div[2]/div[1]/input", form)),
        field2: Locator::xpath(format!("{}/div[2]/div[2]/input", form)),
        field3: Locator::xpath(format!("{}/div[2]/div[3]/input", form)),
        submit: Locator::xpath(format!("{}/div[3]/button", form)),
    }
}
