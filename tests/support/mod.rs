//! 测试替身：脚本化的“添加来源”页面与记录型展示层
#![allow(dead_code)]

use async_trait::async_trait;
use batch_source_import::config::{Profile, Selectors};
use batch_source_import::infrastructure::surface::text_matches;
use batch_source_import::{
    Decision, ImportResult, ItemCtx, MatchCase, Presenter, Scope, StatusLine, UiSurface,
};
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    Source,
    Url,
}

/// 假页面中的元素
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeNode {
    AddSourceButton,
    Dialog(Dialog),
    Chip(String),
    UrlInput,
    Button { dialog: Dialog, label: String },
    Spinner,
}

/// 页面行为脚本
#[derive(Debug, Clone)]
pub struct Behaviour {
    /// 页面上是否有“添加来源”按钮
    pub add_button: bool,
    /// 启动时来源对话框已经打开（新建笔记本的情形）
    pub preopened: bool,
    pub chips: Vec<String>,
    pub source_dialog_buttons: Vec<String>,
    /// 页面校验不通过的链接（Insert 按钮保持禁用）
    pub rejected: HashSet<String>,
    /// 提交后对话框永远不关闭的链接
    pub stuck: HashSet<String>,
    /// 提交后对话框在第几次存在性检查时消失
    pub dialog_close_checks: u32,
    /// 提交后进度指示器持续的检查次数
    pub spinner_checks: u32,
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            add_button: true,
            preopened: false,
            chips: vec!["Website".to_string(), "YouTube".to_string(), "Copied text".to_string()],
            source_dialog_buttons: vec!["Close".to_string()],
            rejected: HashSet::new(),
            stuck: HashSet::new(),
            dialog_close_checks: 2,
            spinner_checks: 3,
        }
    }
}

impl Behaviour {
    pub fn reject(mut self, link: &str) -> Self {
        self.rejected.insert(link.to_string());
        self
    }

    pub fn stuck_on(mut self, link: &str) -> Self {
        self.stuck.insert(link.to_string());
        self
    }
}

#[derive(Debug, Default)]
struct PageState {
    open: Option<Dialog>,
    input_value: String,
    /// `Some(n)`：再检查 n 次后对话框关闭
    closing_in: Option<u32>,
    spinner_left: u32,
    /// 写入过输入框的链接
    typed: Vec<String>,
    /// 点击 Insert 成功提交的链接
    submitted: Vec<String>,
    add_clicks: usize,
    dismiss_clicks: usize,
}

/// 脚本化的页面
#[derive(Clone)]
pub struct FakeNotebook {
    selectors: Selectors,
    behaviour: Arc<Behaviour>,
    state: Arc<Mutex<PageState>>,
}

impl FakeNotebook {
    pub fn new(behaviour: Behaviour) -> Self {
        let state = PageState {
            open: behaviour.preopened.then_some(Dialog::Source),
            ..Default::default()
        };
        Self {
            selectors: Selectors::default(),
            behaviour: Arc::new(behaviour),
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn typed(&self) -> Vec<String> {
        self.state.lock().unwrap().typed.clone()
    }

    pub fn submitted(&self) -> Vec<String> {
        self.state.lock().unwrap().submitted.clone()
    }

    pub fn add_clicks(&self) -> usize {
        self.state.lock().unwrap().add_clicks
    }

    pub fn dismiss_clicks(&self) -> usize {
        self.state.lock().unwrap().dismiss_clicks
    }

    pub fn open_dialog(&self) -> Option<Dialog> {
        self.state.lock().unwrap().open
    }

    fn insert_enabled(&self, state: &PageState) -> bool {
        !state.input_value.is_empty() && !self.behaviour.rejected.contains(&state.input_value)
    }

    fn visible(&self, state: &PageState, selector: &str, scope: Scope<'_, FakeNode>) -> Option<FakeNode> {
        let s = &self.selectors;
        if selector == s.add_source_button {
            self.behaviour.add_button.then_some(FakeNode::AddSourceButton)
        } else if selector == s.source_dialog {
            (state.open == Some(Dialog::Source)).then_some(FakeNode::Dialog(Dialog::Source))
        } else if selector == s.url_dialog {
            (state.open == Some(Dialog::Url)).then_some(FakeNode::Dialog(Dialog::Url))
        } else if selector == s.url_input {
            let in_url_dialog = match scope {
                Scope::Document => true,
                Scope::Within(node) => *node == FakeNode::Dialog(Dialog::Url),
            };
            (in_url_dialog && state.open == Some(Dialog::Url)).then_some(FakeNode::UrlInput)
        } else if selector == s.dialog_container {
            state.open.map(FakeNode::Dialog)
        } else {
            None
        }
    }
}

#[async_trait]
impl UiSurface for FakeNotebook {
    type Handle = FakeNode;

    async fn find_visible(&self, selector: &str, scope: Scope<'_, FakeNode>) -> ImportResult<Option<FakeNode>> {
        let state = self.state.lock().unwrap();
        Ok(self.visible(&state, selector, scope))
    }

    async fn is_present(&self, selector: &str, scope: Scope<'_, FakeNode>) -> ImportResult<bool> {
        let mut state = self.state.lock().unwrap();

        if selector == self.selectors.dialog_container {
            if state.open.is_none() {
                return Ok(false);
            }
            return Ok(match state.closing_in {
                Some(0) => {
                    state.open = None;
                    state.closing_in = None;
                    false
                }
                Some(n) => {
                    state.closing_in = Some(n - 1);
                    true
                }
                None => true,
            });
        }

        if selector == self.selectors.spinner {
            if state.spinner_left == 0 {
                return Ok(false);
            }
            state.spinner_left -= 1;
            return Ok(true);
        }

        Ok(self.visible(&state, selector, scope).is_some())
    }

    async fn find_all(&self, selector: &str, _scope: Scope<'_, FakeNode>) -> ImportResult<Vec<FakeNode>> {
        let state = self.state.lock().unwrap();
        if selector == self.selectors.dialog_container {
            return Ok(state.open.map(FakeNode::Dialog).into_iter().collect());
        }
        Ok(Vec::new())
    }

    async fn find_by_text(
        &self,
        scope: &FakeNode,
        selector: &str,
        text: &str,
        case: MatchCase,
    ) -> ImportResult<Option<FakeNode>> {
        let state = self.state.lock().unwrap();
        let FakeNode::Dialog(dialog) = scope else {
            return Ok(None);
        };
        if state.open != Some(*dialog) {
            return Ok(None);
        }

        let found = match (dialog, selector) {
            (Dialog::Source, sel) if sel == self.selectors.chip => self
                .behaviour
                .chips
                .iter()
                .find(|chip| text_matches(chip, text, case))
                .map(|chip| FakeNode::Chip(chip.clone())),
            (Dialog::Source, sel) if sel == self.selectors.button => self
                .behaviour
                .source_dialog_buttons
                .iter()
                .find(|label| text_matches(label, text, case))
                .map(|label| FakeNode::Button {
                    dialog: Dialog::Source,
                    label: label.clone(),
                }),
            (Dialog::Url, sel) if sel == self.selectors.button => ["Cancel", "Insert"]
                .iter()
                .find(|label| text_matches(label, text, case))
                .map(|label| FakeNode::Button {
                    dialog: Dialog::Url,
                    label: label.to_string(),
                }),
            _ => None,
        };
        Ok(found)
    }

    async fn click(&self, handle: &FakeNode) -> ImportResult<()> {
        let mut state = self.state.lock().unwrap();
        match handle {
            FakeNode::AddSourceButton => {
                state.add_clicks += 1;
                state.open = Some(Dialog::Source);
            }
            FakeNode::Chip(_) => {
                state.open = Some(Dialog::Url);
                state.input_value.clear();
            }
            FakeNode::Button { label, .. } if label == "Insert" => {
                // 禁用的按钮点击无效
                if self.insert_enabled(&state) {
                    let value = state.input_value.clone();
                    state.closing_in = if self.behaviour.stuck.contains(&value) {
                        None
                    } else {
                        Some(self.behaviour.dialog_close_checks)
                    };
                    state.spinner_left = self.behaviour.spinner_checks;
                    state.submitted.push(value);
                }
            }
            FakeNode::Button { .. } => {
                state.dismiss_clicks += 1;
                state.open = None;
                state.closing_in = None;
            }
            FakeNode::Dialog(_) | FakeNode::UrlInput | FakeNode::Spinner => {}
        }
        Ok(())
    }

    async fn set_value(&self, _handle: &FakeNode, value: &str) -> ImportResult<()> {
        let mut state = self.state.lock().unwrap();
        state.input_value = value.to_string();
        state.typed.push(value.to_string());
        Ok(())
    }

    async fn is_disabled(&self, handle: &FakeNode) -> ImportResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(match handle {
            FakeNode::Button { label, .. } if label == "Insert" => !self.insert_enabled(&state),
            _ => false,
        })
    }
}

#[derive(Debug, Default)]
struct Record {
    statuses: Vec<StatusLine>,
    controls: Vec<bool>,
    asked: Vec<(usize, String)>,
    decisions: VecDeque<Decision>,
    dismissed: usize,
}

/// 记录所有调用的展示层，失败后的回答按脚本给出（脚本用完后回答 Stop）
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    record: Arc<Mutex<Record>>,
}

impl RecordingPresenter {
    pub fn with_decisions(decisions: impl IntoIterator<Item = Decision>) -> Self {
        let presenter = Self::default();
        presenter.record.lock().unwrap().decisions = decisions.into_iter().collect();
        presenter
    }

    pub fn status_texts(&self) -> Vec<String> {
        self.record
            .lock()
            .unwrap()
            .statuses
            .iter()
            .map(|s| s.text.clone())
            .collect()
    }

    pub fn statuses(&self) -> Vec<StatusLine> {
        self.record.lock().unwrap().statuses.clone()
    }

    pub fn controls(&self) -> Vec<bool> {
        self.record.lock().unwrap().controls.clone()
    }

    /// 被询问过的 (链接序号, 失败原因)
    pub fn asked(&self) -> Vec<(usize, String)> {
        self.record.lock().unwrap().asked.clone()
    }

    pub fn dismissed(&self) -> usize {
        self.record.lock().unwrap().dismissed
    }
}

#[async_trait]
impl Presenter for RecordingPresenter {
    fn status(&self, line: StatusLine) {
        self.record.lock().unwrap().statuses.push(line);
    }

    fn set_controls_enabled(&self, enabled: bool) {
        self.record.lock().unwrap().controls.push(enabled);
    }

    async fn confirm_continue(&self, ctx: &ItemCtx, reason: &str) -> Decision {
        let mut record = self.record.lock().unwrap();
        record.asked.push((ctx.index, reason.to_string()));
        record.decisions.pop_front().unwrap_or(Decision::Stop)
    }

    fn dismiss(&self) {
        self.record.lock().unwrap().dismissed += 1;
    }
}

pub fn links(n: usize) -> Vec<String> {
    (1..=n)
        .map(|i| format!("https://www.youtube.com/watch?v={}", i))
        .collect()
}

pub fn profile() -> Profile {
    Profile::default()
}
