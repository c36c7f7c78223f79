//! 集成测试共用的假表单页面和表格工具

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use form_batch_submit::{ControlState, FormPage, InteractionError, Locator, LocatorTable, Variant};

/// 假表单：当前布局的控件可交互，点击提交后按脚本切换布局并显示确认信息
pub struct FakeForm {
    table: LocatorTable,
    state: Mutex<FormState>,
}

struct FormState {
    layout: Variant,
    next_layouts: Vec<Variant>,
    confirmations: Vec<String>,
    shown: Option<String>,
    failing_submits: usize,
    submits: Vec<Variant>,
}

impl FakeForm {
    /// `layouts[i]` 为第 i 次提交时的布局，`confirmations[i]` 为其确认原文
    pub fn scripted(layouts: &[Variant], confirmations: &[&str]) -> Self {
        let mut next_layouts: Vec<Variant> = layouts.iter().skip(1).copied().collect();
        next_layouts.reverse();
        let mut confirmations: Vec<String> = confirmations.iter().map(|c| c.to_string()).collect();
        confirmations.reverse();
        Self {
            table: LocatorTable::builtin(),
            state: Mutex::new(FormState {
                layout: layouts.first().copied().unwrap_or(Variant::Before),
                next_layouts,
                confirmations,
                shown: None,
                failing_submits: 0,
                submits: Vec::new(),
            }),
        }
    }

    /// 接下来 `n` 次点击提交都失败
    pub fn fail_next_submits(&self, n: usize) {
        self.state.lock().unwrap().failing_submits = n;
    }

    pub fn locators(&self) -> &LocatorTable {
        &self.table
    }

    pub fn submits(&self) -> Vec<Variant> {
        self.state.lock().unwrap().submits.clone()
    }

    fn is_live(&self, state: &FormState, locator: &Locator) -> bool {
        let set = self.table.get(state.layout);
        [&set.field1, &set.field2, &set.field3, &set.submit].contains(&locator)
    }
}

#[async_trait]
impl FormPage for FakeForm {
    async fn control_state(&self, locator: &Locator) -> Result<ControlState, InteractionError> {
        let state = self.state.lock().unwrap();
        if locator == self.table.confirmation() {
            return Ok(match state.shown {
                Some(_) => ControlState::Visible,
                None => ControlState::Missing,
            });
        }
        Ok(if self.is_live(&state, locator) {
            ControlState::Interactable
        } else {
            ControlState::Missing
        })
    }

    async fn type_text(&self, locator: &Locator, _text: &str) -> Result<(), InteractionError> {
        let state = self.state.lock().unwrap();
        if self.is_live(&state, locator) {
            Ok(())
        } else {
            Err(InteractionError::Missing {
                locator: locator.to_string(),
            })
        }
    }

    async fn click(&self, locator: &Locator) -> Result<(), InteractionError> {
        let mut state = self.state.lock().unwrap();
        if locator != &self.table.get(state.layout).submit {
            return Err(InteractionError::Missing {
                locator: locator.to_string(),
            });
        }
        if state.failing_submits > 0 {
            state.failing_submits -= 1;
            return Err(InteractionError::NotInteractable {
                locator: locator.to_string(),
            });
        }
        let layout = state.layout;
        state.submits.push(layout);
        state.shown = state.confirmations.pop();
        state.layout = state.next_layouts.pop().unwrap_or(Variant::After);
        Ok(())
    }

    async fn read_text(&self, locator: &Locator) -> Result<String, InteractionError> {
        let state = self.state.lock().unwrap();
        state.shown.clone().ok_or_else(|| InteractionError::Missing {
            locator: locator.to_string(),
        })
    }
}

/// 写一个带表头的源表
pub fn write_workbook(path: &Path, rows: &[[&str; 3]]) {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_mut(&0).unwrap();
    for (c, name) in ["@BH", "@BD", "@BA"].iter().enumerate() {
        sheet.get_cell_mut((c as u32 + 1, 1)).set_value(*name);
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet.get_cell_mut((c as u32 + 1, r as u32 + 2)).set_value(*value);
        }
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}
