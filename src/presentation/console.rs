//! 控制台展示层
//!
//! 状态行通过 tracing 输出；失败后的“是否继续”通过标准输入询问。

use async_trait::async_trait;
use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::error::ImportError;
use crate::models::Decision;
use crate::presentation::{Presenter, StatusLine, Tone};
use crate::workflow::ItemCtx;

/// 链接失败后的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// 每次失败都询问
    #[default]
    Ask,
    Continue,
    Stop,
}

impl FromStr for FailurePolicy {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ask" => Ok(FailurePolicy::Ask),
            "continue" => Ok(FailurePolicy::Continue),
            "stop" => Ok(FailurePolicy::Stop),
            other => Err(ImportError::Config {
                field: "ON_FAILURE".to_string(),
                message: format!("未知的失败处理策略: {}", other),
            }),
        }
    }
}

/// 控制台展示层
pub struct ConsolePresenter {
    policy: FailurePolicy,
    stdin: Mutex<Lines<BufReader<Stdin>>>,
    dismissed: AtomicBool,
}

impl ConsolePresenter {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            stdin: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            dismissed: AtomicBool::new(false),
        }
    }

    /// 界面是否已被关闭
    pub fn is_dismissed(&self) -> bool {
        self.dismissed.load(Ordering::SeqCst)
    }

    async fn ask(&self, ctx: &ItemCtx) -> Decision {
        if let Err(e) = write_prompt(&mut std::io::stdout(), ctx) {
            debug!("输出提示失败: {}", e);
        }

        let mut stdin = self.stdin.lock().await;
        match stdin.next_line().await {
            Ok(Some(answer)) => parse_answer(&answer),
            Ok(None) => {
                // 标准输入已关闭（例如链接本身来自管道），无人可以回答
                warn!("⚠️ 标准输入已关闭，无法询问，停止导入");
                Decision::Stop
            }
            Err(e) => {
                error!("读取标准输入失败: {}", e);
                Decision::Stop
            }
        }
    }
}

/// 输出“是否继续”的提示并立即刷新（提示不以换行结尾）
fn write_prompt(out: &mut impl Write, ctx: &ItemCtx) -> std::io::Result<()> {
    write!(
        out,
        "Error processing link {}. Continue with remaining links? [y/N] ",
        ctx.index
    )?;
    out.flush()
}

fn parse_answer(answer: &str) -> Decision {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" | "c" | "continue" => Decision::Continue,
        _ => Decision::Stop,
    }
}

#[async_trait]
impl Presenter for ConsolePresenter {
    fn status(&self, line: StatusLine) {
        let prefix = if line.append { "  " } else { "" };
        match line.tone {
            Tone::Plain => info!("{}{}", prefix, line.text),
            Tone::Info => info!("{}ℹ️ {}", prefix, line.text),
            Tone::Success => info!("{}✅ {}", prefix, line.text),
            Tone::Warning => warn!("{}⚠️ {}", prefix, line.text),
            Tone::Error => error!("{}❌ {}", prefix, line.text),
        }
    }

    fn set_controls_enabled(&self, enabled: bool) {
        debug!("控件状态: {}", if enabled { "启用" } else { "禁用" });
    }

    async fn confirm_continue(&self, ctx: &ItemCtx, reason: &str) -> Decision {
        debug!("{} 失败原因: {}", ctx, reason);
        match self.policy {
            FailurePolicy::Ask => self.ask(ctx).await,
            FailurePolicy::Continue => Decision::Continue,
            FailurePolicy::Stop => Decision::Stop,
        }
    }

    fn dismiss(&self) {
        self.dismissed.store(true, Ordering::SeqCst);
        info!("👋 导入窗口已关闭");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("y"), Decision::Continue);
        assert_eq!(parse_answer(" YES \n"), Decision::Continue);
        assert_eq!(parse_answer("n"), Decision::Stop);
        assert_eq!(parse_answer(""), Decision::Stop);
    }

    #[test]
    fn test_write_prompt() {
        let ctx = ItemCtx::new(2, 3, "https://youtu.be/b");
        let mut out = Vec::new();

        write_prompt(&mut out, &ctx).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error processing link 2. Continue with remaining links? [y/N] "
        );
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_write_prompt_reports_flush_error() {
        let ctx = ItemCtx::new(1, 1, "https://youtu.be/a");
        let err = write_prompt(&mut BrokenPipe, &ctx).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_failure_policy_from_str() {
        assert_eq!("Continue".parse::<FailurePolicy>().unwrap(), FailurePolicy::Continue);
        assert_eq!(" stop ".parse::<FailurePolicy>().unwrap(), FailurePolicy::Stop);
        let err = "maybe".parse::<FailurePolicy>().unwrap_err();
        assert!(matches!(err, ImportError::Config { ref field, .. } if field == "ON_FAILURE"));
    }

    #[tokio::test]
    async fn test_non_interactive_policies() {
        let ctx = ItemCtx::new(2, 3, "https://youtu.be/b");

        let presenter = ConsolePresenter::new(FailurePolicy::Continue);
        assert_eq!(presenter.confirm_continue(&ctx, "boom").await, Decision::Continue);

        let presenter = ConsolePresenter::new(FailurePolicy::Stop);
        assert_eq!(presenter.confirm_continue(&ctx, "boom").await, Decision::Stop);
        assert!(!presenter.is_dismissed());
        presenter.dismiss();
        assert!(presenter.is_dismissed());
    }
}
