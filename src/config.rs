use crate::presentation::FailurePolicy;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 目标URL
    pub target_url: String,
    /// 目标页面标题（用于复用已打开的标签页）
    pub target_title: String,
    /// 链接列表文件，未设置时从标准输入读取
    pub links_file: Option<String>,
    /// 是否启动无头浏览器（否则连接已打开的浏览器）
    pub headless: bool,
    /// 无头模式使用的浏览器可执行文件
    pub chrome_executable: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 链接失败后的处理策略：ask / continue / stop
    pub failure_policy: FailurePolicy,
    /// 可选的 TOML 配置文件（覆盖选择器 / 文案 / 时间参数）
    pub profile_file: Option<String>,
    /// 页面交互参数
    pub profile: Profile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: 9222,
            target_url: "https://notebooklm.google.com/".to_string(),
            target_title: "NotebookLM".to_string(),
            links_file: None,
            headless: false,
            chrome_executable: None,
            verbose_logging: false,
            output_log_file: "import_log.txt".to_string(),
            failure_policy: FailurePolicy::Ask,
            profile_file: None,
            profile: Profile::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.browser_debug_port),
            target_url: std::env::var("TARGET_URL").unwrap_or(default.target_url),
            target_title: std::env::var("TARGET_TITLE").unwrap_or(default.target_title),
            links_file: std::env::var("LINKS_FILE").ok().filter(|v| !v.trim().is_empty()),
            headless: std::env::var("HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.headless),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().filter(|v| !v.trim().is_empty()),
            verbose_logging: verbose_logging_from_env(),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            failure_policy: parse_failure_policy(std::env::var("ON_FAILURE").ok()),
            profile_file: std::env::var("PROFILE_FILE").ok().filter(|v| !v.trim().is_empty()),
            profile: default.profile,
        }
    }
}

/// 是否开启详细日志（`VERBOSE_LOGGING`），初始化日志前需要单独读取
pub fn verbose_logging_from_env() -> bool {
    std::env::var("VERBOSE_LOGGING")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

/// 解析 `ON_FAILURE`，无法识别时记录警告并使用默认策略
fn parse_failure_policy(value: Option<String>) -> FailurePolicy {
    let Some(value) = value else {
        return FailurePolicy::default();
    };
    match value.parse() {
        Ok(policy) => policy,
        Err(e) => {
            warn!("⚠️ {}，使用默认策略 ask", e);
            FailurePolicy::default()
        }
    }
}

/// 页面交互参数：选择器、按钮文案、时间参数
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Profile {
    pub selectors: Selectors,
    pub labels: Labels,
    pub timings: Timings,
}

/// CSS 选择器
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Selectors {
    /// “添加来源”按钮
    pub add_source_button: String,
    /// 类别选择对话框
    pub source_dialog: String,
    /// 类别选项
    pub chip: String,
    /// 链接输入对话框
    pub url_dialog: String,
    /// 链接输入框
    pub url_input: String,
    /// 任意对话框
    pub dialog_container: String,
    /// 后台处理进度指示器
    pub spinner: String,
    pub button: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            add_source_button: r#"button[mattooltip="Add source"]"#.to_string(),
            source_dialog: "mat-dialog-container:has(mat-chip)".to_string(),
            chip: "mat-chip".to_string(),
            url_dialog: r#"mat-dialog-container:has(input[id^="mat-input-"])"#.to_string(),
            url_input: r#"input[id^="mat-input-"]"#.to_string(),
            dialog_container: "mat-dialog-container".to_string(),
            spinner: r#"mat-spinner[role="progressbar"]"#.to_string(),
            button: "button".to_string(),
        }
    }
}

/// 界面文案
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Labels {
    /// 要选择的来源类别
    pub category: String,
    pub insert: String,
    pub cancel: String,
    pub close: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            category: "YouTube".to_string(),
            insert: "Insert".to_string(),
            cancel: "Cancel".to_string(),
            close: "Close".to_string(),
        }
    }
}

/// 时间参数（TOML 中以毫秒表示）
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Timings {
    #[serde(with = "millis")]
    pub poll_interval: Duration,
    #[serde(with = "millis")]
    pub poll_interval_slow: Duration,
    /// 选择类别后的等待
    #[serde(with = "millis")]
    pub input_delay: Duration,
    /// 输入链接后等待页面校验完成
    #[serde(with = "millis")]
    pub input_settle: Duration,
    #[serde(with = "millis")]
    pub post_action_delay: Duration,
    /// 全部成功后自动关闭前的等待
    #[serde(with = "millis")]
    pub auto_close_delay: Duration,
    #[serde(with = "millis")]
    pub duplicate_warning_delay: Duration,

    #[serde(with = "millis")]
    pub element_wait: Duration,
    #[serde(with = "millis")]
    pub dialog_close: Duration,
    #[serde(with = "millis")]
    pub spinner_wait: Duration,
    #[serde(with = "millis")]
    pub input_wait: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(200),
            poll_interval_slow: Duration::from_millis(500),
            input_delay: Duration::from_millis(500),
            input_settle: Duration::from_millis(1500),
            post_action_delay: Duration::from_millis(1000),
            auto_close_delay: Duration::from_millis(3000),
            duplicate_warning_delay: Duration::from_millis(3000),
            element_wait: Duration::from_secs(15),
            dialog_close: Duration::from_secs(30),
            spinner_wait: Duration::from_secs(90),
            input_wait: Duration::from_secs(5),
        }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
