//! 单条链接导入流程 - 流程层
//!
//! 核心职责：定义"一条链接"的完整处理流程
//!
//! 流程顺序：
//! 1. 确保来源对话框已打开
//! 2. 选择类别
//! 3. 输入链接并确认
//! 4. 等待对话框关闭、后台处理结束
//!
//! 任一步骤出错都会在这里被捕获，转换为 `ImportOutcome::Failed`，
//! 并尽力关闭残留的对话框，避免影响下一条链接。

use tracing::{debug, error, info, warn};

use crate::config::Profile;
use crate::error::ImportResult;
use crate::infrastructure::UiSurface;
use crate::models::ImportOutcome;
use crate::presentation::{Presenter, StatusLine, Tone};
use crate::services::SourceSteps;
use crate::workflow::item_ctx::ItemCtx;

/// 单条链接导入流程
///
/// - 编排交互步骤的顺序
/// - 不持有任何资源（page）
/// - 错误不会越过本层向外传播
pub struct ItemFlow {
    steps: SourceSteps,
}

impl ItemFlow {
    pub fn new(profile: &Profile) -> Self {
        Self {
            steps: SourceSteps::new(profile),
        }
    }

    pub async fn run<S, P>(&self, surface: &S, presenter: &P, ctx: &ItemCtx) -> ImportOutcome
    where
        S: UiSurface + ?Sized,
        P: Presenter + ?Sized,
    {
        info!("{} 开始导入: {}", ctx, ctx.link);

        match self.import(surface, presenter, ctx).await {
            Ok(()) => {
                info!("{} ✓ 导入成功", ctx);
                ImportOutcome::Succeeded
            }
            Err(e) => {
                error!("{} ❌ 导入失败: {}", ctx, e);
                presenter.status(StatusLine::append(format!("Error: {}", e)).with_tone(Tone::Error));
                self.cleanup(surface, ctx).await;
                ImportOutcome::Failed(e.to_string())
            }
        }
    }

    async fn import<S, P>(&self, surface: &S, presenter: &P, ctx: &ItemCtx) -> ImportResult<()>
    where
        S: UiSurface + ?Sized,
        P: Presenter + ?Sized,
    {
        let dialog = self.steps.ensure_entry_dialog_open(surface).await?;
        self.steps.select_category(surface, &dialog).await?;
        self.steps.submit_value(surface, &ctx.link).await?;

        presenter.status(StatusLine::append("→ Processing...").with_tone(Tone::Info));
        debug!("{} 已提交，等待页面处理", ctx);

        self.steps.await_completion(surface).await
    }

    /// 失败后的清理，本身出错只记录日志
    async fn cleanup<S>(&self, surface: &S, ctx: &ItemCtx)
    where
        S: UiSurface + ?Sized,
    {
        match self.steps.dismiss_open_dialogs(surface).await {
            Ok(closed) => debug!("{} 清理完成，关闭了 {} 个对话框", ctx, closed),
            Err(e) => warn!("{} ⚠️ 清理对话框失败: {}", ctx, e),
        }
    }
}
