//! 批次控制器 - 编排层
//!
//! ## 职责
//!
//! 逐条处理规范化后的链接列表，统计结果，并在失败后由用户决定继续还是停止。
//!
//! ## 状态机
//!
//! ```text
//! Idle ──start──▶ Running ──全部尝试──▶ Completed
//!                    │
//!                    └──失败且用户选择停止──▶ Stopped
//! ```
//!
//! - 同一时间只允许一个批次运行（[`OrchestratorState`]）
//! - 链接严格串行处理，页面一次只支持一个交互
//! - 全部成功时延迟后自动关闭界面，否则保持打开以便查看错误

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::{Profile, Timings};
use crate::error::{ImportError, ImportResult};
use crate::infrastructure::UiSurface;
use crate::models::{normalize, BatchPhase, BatchResult, Decision, ImportOutcome, ImportRequest};
use crate::presentation::{Presenter, StatusLine, Tone};
use crate::workflow::{ItemCtx, ItemFlow};

/// “批次正在运行”标志
///
/// 由控制器持有，开始批次时置位，通过 [`RunPermit`] 的 `Drop` 在任何退出路径上复位。
#[derive(Debug, Default)]
pub struct OrchestratorState {
    running: AtomicBool,
}

impl OrchestratorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// 尝试开始一个批次，已有批次运行时返回 `ImportError::Reentrancy`
    pub fn try_begin(&self) -> ImportResult<RunPermit<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| RunPermit { state: self })
            .map_err(|_| ImportError::Reentrancy)
    }
}

/// 运行许可，释放时复位运行标志
#[derive(Debug)]
pub struct RunPermit<'a> {
    state: &'a OrchestratorState,
}

impl Drop for RunPermit<'_> {
    fn drop(&mut self) {
        self.state.running.store(false, Ordering::SeqCst);
    }
}

/// 批次控制器
pub struct BatchController<S, P> {
    surface: S,
    presenter: P,
    flow: ItemFlow,
    timings: Timings,
    state: OrchestratorState,
    phase: Mutex<BatchPhase>,
}

impl<S, P> BatchController<S, P>
where
    S: UiSurface,
    P: Presenter,
{
    pub fn new(surface: S, presenter: P, profile: &Profile) -> Self {
        Self {
            surface,
            presenter,
            flow: ItemFlow::new(profile),
            timings: profile.timings.clone(),
            state: OrchestratorState::new(),
            phase: Mutex::new(BatchPhase::Idle),
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// 当前状态
    pub fn phase(&self) -> BatchPhase {
        self.phase.lock().map(|phase| *phase).unwrap_or_default()
    }

    fn set_phase(&self, phase: BatchPhase) {
        if let Ok(mut current) = self.phase.lock() {
            *current = phase;
        }
    }

    /// 开始按钮：从原始文本开始一个批次
    ///
    /// 规范化输入；列表为空时报错；有重复链接时先提示并等待一段时间。
    pub async fn start(&self, raw_text: &str) -> ImportResult<BatchResult> {
        let permit = self.begin()?;

        let request = normalize(raw_text);
        if request.is_empty() {
            let err = ImportError::EmptyInput;
            self.presenter
                .status(StatusLine::set(format!("Error: {}", err)).with_tone(Tone::Error));
            return Err(err);
        }

        if request.duplicates_removed() > 0 {
            warn!("⚠️ 已去除 {} 个重复链接", request.duplicates_removed());
            self.presenter.status(
                StatusLine::set(format!(
                    "Warning: {} duplicate link(s) removed.",
                    request.duplicates_removed()
                ))
                .with_tone(Tone::Warning),
            );
            sleep(self.timings.duplicate_warning_delay).await;
        }

        Ok(self.run_with_permit(&request, permit).await)
    }

    /// 运行一个批次
    ///
    /// 已有批次运行时立即返回 `ImportError::Reentrancy`，不影响正在运行的批次。
    pub async fn run_batch(&self, request: &ImportRequest) -> ImportResult<BatchResult> {
        let permit = self.begin()?;
        Ok(self.run_with_permit(request, permit).await)
    }

    /// 关闭按钮：批次运行期间拒绝关闭
    pub fn request_dismiss(&self) -> ImportResult<()> {
        if self.is_running() {
            self.presenter.status(
                StatusLine::append("Import is still running. Please wait until it finishes.")
                    .with_tone(Tone::Warning),
            );
            return Err(ImportError::Reentrancy);
        }

        self.presenter.dismiss();
        Ok(())
    }

    fn begin(&self) -> ImportResult<RunPermit<'_>> {
        self.state.try_begin().map_err(|err| {
            warn!("⚠️ 已有批次正在运行，拒绝新的批次");
            self.presenter
                .status(StatusLine::append(err.to_string()).with_tone(Tone::Warning));
            err
        })
    }

    async fn run_with_permit(&self, request: &ImportRequest, permit: RunPermit<'_>) -> BatchResult {
        let total = request.len();
        let mut result = BatchResult::new(total);

        self.set_phase(BatchPhase::Running);
        self.presenter.set_controls_enabled(false);
        info!("📦 开始导入 {} 个链接", total);

        for (idx, link) in request.links().iter().enumerate() {
            let ctx = ItemCtx::new(idx + 1, total, link.as_str());
            self.presenter.status(StatusLine::set(format!(
                "[{}/{}] Processing: {}",
                ctx.index, ctx.total, ctx.link
            )));

            let outcome = self.flow.run(&self.surface, &self.presenter, &ctx).await;
            result.record(link, &outcome);

            if let ImportOutcome::Failed(reason) = &outcome {
                // 等待用户回答，没有超时
                let decision = self.presenter.confirm_continue(&ctx, reason).await;
                if decision == Decision::Stop {
                    info!("{} ⏹️ 用户选择停止", ctx);
                    result.stopped_early = true;
                    break;
                }
                info!("{} ▶️ 用户选择继续", ctx);
            }
        }

        self.set_phase(result.phase());

        // 自动关闭完成前保持运行标志，倒计时期间不接受新的批次
        self.finish(&result).await;
        drop(permit);
        result
    }

    /// 批次结束后的状态输出与界面处理
    async fn finish(&self, result: &BatchResult) {
        if result.stopped_early {
            self.presenter.status(
                StatusLine::set(format!(
                    "Stopped by user. {} link(s) imported.",
                    result.succeeded
                ))
                .with_tone(Tone::Warning),
            );
            self.presenter.set_controls_enabled(true);
            return;
        }

        let tone = if result.is_full_success() {
            Tone::Success
        } else {
            Tone::Warning
        };
        self.presenter.status(
            StatusLine::set(format!(
                "Complete! {}/{} link(s) imported.",
                result.succeeded, result.total
            ))
            .with_tone(tone),
        );

        if result.is_full_success() {
            self.presenter
                .status(StatusLine::append(closing_notice(self.timings.auto_close_delay)));
            sleep(self.timings.auto_close_delay).await;
            self.presenter.dismiss();
        } else {
            self.presenter.set_controls_enabled(true);
        }
    }
}

/// 自动关闭提示，不足一秒的部分向上取整
fn closing_notice(delay: Duration) -> String {
    format!("Closing in {} seconds...", delay.as_millis().div_ceil(1000))
}
