//! 展示层接口
//!
//! 编排层只依赖 [`Presenter`]：输出状态行、启用/禁用控件、在失败后询问是否继续、
//! 关闭整个导入界面。具体界面（控制台、测试替身）在此之外实现。

pub mod console;

use async_trait::async_trait;

use crate::models::Decision;
use crate::workflow::ItemCtx;

pub use console::{ConsolePresenter, FailurePolicy};

/// 状态行的颜色 / 语气
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    Info,
    Success,
    Warning,
    Error,
}

/// 一条状态更新
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
    /// `true` 时追加到当前状态之后，否则替换当前状态
    pub append: bool,
}

impl StatusLine {
    /// 替换当前状态
    pub fn set(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Plain,
            append: false,
        }
    }

    /// 追加到当前状态
    pub fn append(text: impl Into<String>) -> Self {
        Self {
            append: true,
            ..Self::set(text)
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }
}

/// 展示层
#[async_trait]
pub trait Presenter: Send + Sync {
    fn status(&self, line: StatusLine);

    /// 运行期间禁用输入框与按钮
    fn set_controls_enabled(&self, enabled: bool);

    /// 某条链接失败后询问是否继续，没有超时，一直等待用户回答
    async fn confirm_continue(&self, ctx: &ItemCtx, reason: &str) -> Decision;

    /// 关闭整个导入界面
    fn dismiss(&self);
}
