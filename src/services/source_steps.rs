//! 添加来源的交互步骤 - 业务能力层
//!
//! 每个步骤都是一次受轮询保护的页面操作：
//! 前置条件（什么必须可见）→ 动作 → 后置条件（随后必须出现 / 消失什么）。
//! 步骤只处理单条链接，不关心批次和流程顺序。

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::{Labels, Profile, Selectors, Timings};
use crate::error::{ImportError, ImportResult};
use crate::infrastructure::polling::{wait_for_element, wait_for_element_to_disappear, PollSpec};
use crate::infrastructure::surface::{MatchCase, Scope, UiSurface};

/// 添加来源的交互步骤
pub struct SourceSteps {
    selectors: Selectors,
    labels: Labels,
    timings: Timings,
}

impl SourceSteps {
    pub fn new(profile: &Profile) -> Self {
        Self {
            selectors: profile.selectors.clone(),
            labels: profile.labels.clone(),
            timings: profile.timings.clone(),
        }
    }

    fn element_spec(&self) -> PollSpec {
        PollSpec::new(self.timings.element_wait, self.timings.poll_interval)
    }

    fn input_spec(&self) -> PollSpec {
        PollSpec::new(self.timings.input_wait, self.timings.poll_interval)
    }

    fn dialog_close_spec(&self) -> PollSpec {
        PollSpec::new(self.timings.dialog_close, self.timings.poll_interval_slow)
    }

    fn spinner_spec(&self) -> PollSpec {
        PollSpec::new(self.timings.spinner_wait, self.timings.poll_interval_slow)
    }

    /// 确保“添加来源”对话框已打开
    ///
    /// 新建笔记本时页面会自动弹出该对话框，此时直接复用；
    /// 否则点击“添加来源”按钮并等待对话框出现。
    pub async fn ensure_entry_dialog_open<S>(&self, surface: &S) -> ImportResult<S::Handle>
    where
        S: UiSurface + ?Sized,
    {
        if let Some(dialog) = surface
            .find_visible(&self.selectors.source_dialog, Scope::Document)
            .await?
        {
            debug!("来源对话框已打开，直接使用");
            return Ok(dialog);
        }

        let add_button = wait_for_element(
            surface,
            &self.selectors.add_source_button,
            Scope::Document,
            self.element_spec(),
        )
        .await
        .map_err(into_dialog_open)?;
        surface.click(&add_button).await?;

        wait_for_element(
            surface,
            &self.selectors.source_dialog,
            Scope::Document,
            self.element_spec(),
        )
        .await
        .map_err(into_dialog_open)
    }

    /// 在来源对话框中选择类别（文本区分大小写）
    pub async fn select_category<S>(&self, surface: &S, dialog: &S::Handle) -> ImportResult<()>
    where
        S: UiSurface + ?Sized,
    {
        let chip = surface
            .find_by_text(dialog, &self.selectors.chip, &self.labels.category, MatchCase::Sensitive)
            .await?
            .ok_or_else(|| ImportError::CategoryNotFound {
                label: self.labels.category.clone(),
            })?;

        surface.click(&chip).await?;
        debug!("已选择类别: {}", self.labels.category);
        sleep(self.timings.input_delay).await;
        Ok(())
    }

    /// 输入链接并点击确认按钮
    pub async fn submit_value<S>(&self, surface: &S, link: &str) -> ImportResult<()>
    where
        S: UiSurface + ?Sized,
    {
        let url_dialog = wait_for_element(
            surface,
            &self.selectors.url_dialog,
            Scope::Document,
            self.element_spec(),
        )
        .await?;

        // 对话框内部的输入框出现得很快，使用更短的超时
        let url_input = wait_for_element(
            surface,
            &self.selectors.url_input,
            Scope::Within(&url_dialog),
            self.input_spec(),
        )
        .await?;

        surface.set_value(&url_input, link).await?;
        sleep(self.timings.input_settle).await;

        let insert_button = surface
            .find_by_text(&url_dialog, &self.selectors.button, &self.labels.insert, MatchCase::Insensitive)
            .await?;

        let unavailable = || ImportError::SubmitUnavailable {
            label: self.labels.insert.clone(),
        };
        let Some(button) = insert_button else {
            return Err(unavailable());
        };
        if surface.is_disabled(&button).await? {
            return Err(unavailable());
        }

        surface.click(&button).await?;
        Ok(())
    }

    /// 等待导入完成
    ///
    /// 对话框可能在后台处理结束前就关闭，所以关闭后还要等待进度指示器消失。
    pub async fn await_completion<S>(&self, surface: &S) -> ImportResult<()>
    where
        S: UiSurface + ?Sized,
    {
        let spec = self.dialog_close_spec();
        let closed = wait_for_element_to_disappear(
            surface,
            &self.selectors.dialog_container,
            Scope::Document,
            spec,
        )
        .await?;

        if !closed {
            return Err(ImportError::timeout(
                format!("dialog to close: \"{}\"", self.selectors.dialog_container),
                spec.timeout,
            ));
        }

        let settled = wait_for_element_to_disappear(
            surface,
            &self.selectors.spinner,
            Scope::Document,
            self.spinner_spec(),
        )
        .await?;

        if !settled {
            warn!(
                "⚠️ 进度指示器在 {:?} 后仍未消失，继续处理",
                self.timings.spinner_wait
            );
        }

        sleep(self.timings.post_action_delay).await;
        Ok(())
    }

    /// 关闭所有打开的对话框（失败后的清理）
    ///
    /// 依次尝试“Cancel”和“Close”按钮，没有按钮的对话框直接跳过。
    /// 单个对话框出错只记录日志，继续处理剩下的对话框，最后总是等待页面稳定。
    ///
    /// # 返回
    /// 返回实际点击关闭的对话框数量；只有查找对话框本身失败时才返回错误
    pub async fn dismiss_open_dialogs<S>(&self, surface: &S) -> ImportResult<usize>
    where
        S: UiSurface + ?Sized,
    {
        let dialogs = surface
            .find_all(&self.selectors.dialog_container, Scope::Document)
            .await;

        let mut closed = 0;
        if let Ok(dialogs) = &dialogs {
            for dialog in dialogs {
                match self.close_dialog(surface, dialog).await {
                    Ok(true) => closed += 1,
                    Ok(false) => debug!("对话框 {:?} 没有可用的关闭按钮", dialog),
                    Err(e) => warn!("⚠️ 关闭对话框 {:?} 失败: {}", dialog, e),
                }
            }

            if !dialogs.is_empty() {
                info!("🧹 已关闭 {}/{} 个对话框", closed, dialogs.len());
            }
        }

        sleep(self.timings.post_action_delay).await;
        dialogs.map(|_| closed)
    }

    /// 点击对话框中的“Cancel”或“Close”按钮，找不到按钮时返回 `false`
    async fn close_dialog<S>(&self, surface: &S, dialog: &S::Handle) -> ImportResult<bool>
    where
        S: UiSurface + ?Sized,
    {
        let mut button = surface
            .find_by_text(dialog, &self.selectors.button, &self.labels.cancel, MatchCase::Insensitive)
            .await?;
        if button.is_none() {
            button = surface
                .find_by_text(dialog, &self.selectors.button, &self.labels.close, MatchCase::Insensitive)
                .await?;
        }

        match button {
            Some(button) => {
                surface.click(&button).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// 打开对话框阶段的超时统一归为 `DialogOpen`
fn into_dialog_open(err: ImportError) -> ImportError {
    match err {
        ImportError::Timeout { .. } => ImportError::DialogOpen(err.to_string()),
        other => other,
    }
}
