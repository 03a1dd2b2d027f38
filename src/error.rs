//! 错误类型
//!
//! 单条链接处理过程中出现的错误都属于 [`ImportError`]，在单项导入器边界被
//! 转换为 `ImportOutcome::Failed`，不会继续向外传播。
//!
//! 错误信息会原样显示在状态区域，因此使用英文文案。

use std::time::Duration;
use thiserror::Error;

/// 导入错误
#[derive(Debug, Error)]
pub enum ImportError {
    /// 预期的界面变化没有在超时时间内发生
    #[error("Timed out waiting for {what} (after {}ms)", .timeout.as_millis())]
    Timeout { what: String, timeout: Duration },

    /// 无法打开“添加来源”对话框
    #[error("Unable to open the source dialog: {0}")]
    DialogOpen(String),

    /// 对话框中找不到目标类别
    #[error("Unable to find '{label}' chip button")]
    CategoryNotFound { label: String },

    /// 确认按钮不存在或处于禁用状态
    #[error("The \"{label}\" button is unavailable.")]
    SubmitUnavailable { label: String },

    /// 已有批次正在运行
    #[error("Please wait for the current import to complete.")]
    Reentrancy,

    /// 输入中没有任何有效链接
    #[error("The list of links cannot be empty!")]
    EmptyInput,

    /// 浏览器 / 脚本执行失败
    #[error("Browser error: {0}")]
    Browser(String),

    /// 配置错误
    #[error("Invalid configuration for {field}: {message}")]
    Config { field: String, message: String },
}

impl ImportError {
    /// 创建超时错误
    pub fn timeout(what: impl Into<String>, timeout: Duration) -> Self {
        ImportError::Timeout {
            what: what.into(),
            timeout,
        }
    }

    /// 是否为超时错误
    pub fn is_timeout(&self) -> bool {
        matches!(self, ImportError::Timeout { .. })
    }
}

impl From<chromiumoxide::error::CdpError> for ImportError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        ImportError::Browser(err.to_string())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::Browser(format!("unexpected script result: {}", err))
    }
}

/// 导入结果类型
pub type ImportResult<T> = Result<T, ImportError>;
