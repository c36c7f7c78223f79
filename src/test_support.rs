//! 单元测试用的假表格和假页面

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{InteractionError, InteractionResult, TableError};
use crate::infrastructure::{ControlState, FormPage, TableStore};
use crate::models::{Locator, LocatorTable, Variant};

/// 内存表格，记录落盘次数和最近一次成功落盘的内容
#[derive(Debug, Default)]
pub struct MemoryTable {
    cells: HashMap<(u32, u32), String>,
    persisted: HashMap<(u32, u32), String>,
    last_row: u32,
    last_column: u32,
    pub flushes: usize,
    /// 接下来这么多次落盘会失败
    pub failing_flushes: usize,
}

impl MemoryTable {
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        let mut table = Self::default();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                table.set(c as u32 + 1, r as u32 + 1, value);
            }
            table.last_row = table.last_row.max(r as u32 + 1);
        }
        table.persisted = table.cells.clone();
        table
    }

    /// 最近一次成功落盘时该单元格的值
    pub fn persisted_cell(&self, column: u32, row: u32) -> String {
        self.persisted.get(&(column, row)).cloned().unwrap_or_default()
    }

    fn set(&mut self, column: u32, row: u32, value: &str) {
        self.cells.insert((column, row), value.to_string());
        self.last_row = self.last_row.max(row);
        self.last_column = self.last_column.max(column);
    }
}

impl TableStore for MemoryTable {
    fn last_row(&self) -> u32 {
        self.last_row
    }

    fn last_column(&self) -> u32 {
        self.last_column
    }

    fn read_cell(&self, column: u32, row: u32) -> String {
        self.cells.get(&(column, row)).cloned().unwrap_or_default()
    }

    fn write_cell(&mut self, column: u32, row: u32, value: &str) -> Result<(), TableError> {
        self.set(column, row, value);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TableError> {
        if self.failing_flushes > 0 {
            self.failing_flushes -= 1;
            return Err(TableError::FlushFailed {
                path: "memory".to_string(),
                message: "disk full".to_string(),
            });
        }
        self.flushes += 1;
        self.persisted = self.cells.clone();
        Ok(())
    }
}

/// 模拟目标表单的假页面
///
/// 当前布局的四个控件可交互，其余控件不存在；点击当前布局的提交按钮后，
/// 按脚本切换布局并显示确认信息
pub struct FakePage {
    table: LocatorTable,
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    layout: Option<Variant>,
    layouts_after_submit: VecDeque<Variant>,
    confirmations: VecDeque<Option<String>>,
    confirmation_text: Option<String>,
    /// 提交后仍然显示上一条确认信息的读取次数
    slow_confirmations: usize,
    stale_reads: usize,
    stale_text: Option<String>,
    injected_states: HashMap<String, VecDeque<ControlState>>,
    action_failures: HashMap<String, VecDeque<InteractionError>>,
    probes: HashMap<String, usize>,
    typed: Vec<(Variant, String, String)>,
    submits: Vec<Variant>,
}

impl FakePage {
    pub fn new(initial: Variant) -> Self {
        Self {
            table: LocatorTable::builtin(),
            state: Mutex::new(FakeState {
                layout: Some(initial),
                ..Default::default()
            }),
        }
    }

    pub fn before() -> Self {
        Self::new(Variant::Before)
    }

    pub fn locators(&self) -> &LocatorTable {
        &self.table
    }

    /// 每次提交后依次切换到的布局（用完后保持 `After`）
    pub fn with_layouts_after_submit(self, layouts: &[Variant]) -> Self {
        self.lock().layouts_after_submit = layouts.iter().copied().collect();
        self
    }

    /// 每次提交后显示的确认信息，`None` 表示不显示
    pub fn with_confirmations(self, texts: &[Option<&str>]) -> Self {
        self.lock().confirmations = texts.iter().map(|t| t.map(str::to_string)).collect();
        self
    }

    /// 每次提交后，前 `reads` 次读取仍返回上一条确认信息
    pub fn with_slow_confirmations(self, reads: usize) -> Self {
        self.lock().slow_confirmations = reads;
        self
    }

    /// 注入控件状态，每次探测消耗一个
    pub fn inject_states(&self, locator: &Locator, states: &[ControlState]) {
        self.lock()
            .injected_states
            .entry(locator.to_string())
            .or_default()
            .extend(states.iter().copied());
    }

    /// 注入输入/点击失败，每次操作消耗一个
    pub fn inject_action_failure(&self, locator: &Locator, err: InteractionError) {
        self.lock()
            .action_failures
            .entry(locator.to_string())
            .or_default()
            .push_back(err);
    }

    pub fn probe_count(&self, locator: &Locator) -> usize {
        self.lock().probes.get(&locator.to_string()).copied().unwrap_or(0)
    }

    pub fn typed(&self) -> Vec<(Variant, String, String)> {
        self.lock().typed.clone()
    }

    pub fn submits(&self) -> Vec<Variant> {
        self.lock().submits.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    fn natural_state(&self, state: &FakeState, locator: &Locator) -> ControlState {
        if locator == self.table.confirmation() {
            return if state.confirmation_text.is_some() {
                ControlState::Visible
            } else {
                ControlState::Missing
            };
        }
        match state.layout {
            Some(layout) if self.table.get(layout).slots().iter().any(|(_, l)| *l == locator) => {
                ControlState::Interactable
            }
            _ => ControlState::Missing,
        }
    }

    fn state_of(&self, state: &mut FakeState, locator: &Locator) -> ControlState {
        let key = locator.to_string();
        *state.probes.entry(key.clone()).or_default() += 1;
        let injected = state.injected_states.get_mut(&key).and_then(VecDeque::pop_front);
        match injected {
            Some(injected) => injected,
            None => self.natural_state(state, locator),
        }
    }

    fn check_action(&self, state: &mut FakeState, locator: &Locator) -> InteractionResult<()> {
        let key = locator.to_string();
        if let Some(err) = state.action_failures.get_mut(&key).and_then(VecDeque::pop_front) {
            return Err(err);
        }
        match self.natural_state(state, locator) {
            ControlState::Interactable => Ok(()),
            ControlState::Missing => Err(InteractionError::Missing { locator: key }),
            _ => Err(InteractionError::NotInteractable { locator: key }),
        }
    }
}

#[async_trait]
impl FormPage for FakePage {
    async fn control_state(&self, locator: &Locator) -> InteractionResult<ControlState> {
        let mut state = self.lock();
        Ok(self.state_of(&mut state, locator))
    }

    async fn type_text(&self, locator: &Locator, text: &str) -> InteractionResult<()> {
        let mut state = self.lock();
        self.check_action(&mut state, locator)?;
        let layout = state.layout.unwrap_or(Variant::After);
        state.typed.push((layout, locator.to_string(), text.to_string()));
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> InteractionResult<()> {
        let mut state = self.lock();
        self.check_action(&mut state, locator)?;
        if let Some(layout) = state.layout {
            if locator == &self.table.get(layout).submit {
                state.submits.push(layout);
                state.stale_text = state.confirmation_text.take();
                state.stale_reads = if state.stale_text.is_some() {
                    state.slow_confirmations
                } else {
                    0
                };
                state.confirmation_text = state.confirmations.pop_front().flatten();
                let next = state.layouts_after_submit.pop_front().unwrap_or(Variant::After);
                state.layout = Some(next);
            }
        }
        Ok(())
    }

    async fn read_text(&self, locator: &Locator) -> InteractionResult<String> {
        let mut state = self.lock();
        if locator == self.table.confirmation() {
            if state.stale_reads > 0 {
                if let Some(text) = state.stale_text.clone() {
                    state.stale_reads -= 1;
                    return Ok(text);
                }
            }
            if let Some(text) = &state.confirmation_text {
                return Ok(text.clone());
            }
        }
        Err(InteractionError::Missing {
            locator: locator.to_string(),
        })
    }
}
