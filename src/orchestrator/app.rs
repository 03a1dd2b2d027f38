//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：日志文件、配置文件、连接浏览器、创建 JsExecutor
//! 2. **加载链接**：从文件或标准输入读取原始文本
//! 3. **运行批次**：委托 [`BatchController`] 处理所有链接
//! 4. **全局统计**：输出并保存批次结果
//!
//! 唯一持有 Browser 的模块。

use anyhow::Result;
use chromiumoxide::Browser;
use std::path::Path;
use tracing::{info, warn};

use crate::browser;
use crate::config::Config;
use crate::error::ImportError;
use crate::infrastructure::{ChromiumSurface, JsExecutor};
use crate::models::{load_profile, load_raw_links, normalize};
use crate::orchestrator::BatchController;
use crate::presentation::ConsolePresenter;
use crate::utils::logging::{
    append_batch_report, init_log_file, log_links_loaded, log_startup, print_final_stats,
};

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    controller: BatchController<ChromiumSurface, ConsolePresenter>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(mut config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)?;

        log_startup(&config.target_url, config.headless);

        if let Some(profile_file) = &config.profile_file {
            config.profile = load_profile(Path::new(profile_file)).await?;
        }

        let (browser, page) = if config.headless {
            browser::launch_headless_browser(&config.target_url, config.chrome_executable.as_deref())
                .await?
        } else {
            browser::connect_to_browser_and_page(
                config.browser_debug_port,
                Some(&config.target_url),
                Some(&config.target_title),
            )
            .await?
        };

        // 创建 JsExecutor（持有 page）
        let surface = ChromiumSurface::new(JsExecutor::new(page));
        let presenter = ConsolePresenter::new(config.failure_policy);
        let controller = BatchController::new(surface, presenter, &config.profile);

        Ok(Self {
            config,
            _browser: browser,
            controller,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        info!("\n📁 正在读取待导入的链接...");
        let raw_text = load_raw_links(self.config.links_file.as_deref()).await?;

        let preview = normalize(&raw_text);
        log_links_loaded(preview.len(), preview.duplicates_removed());

        let result = match self.controller.start(&raw_text).await {
            Ok(result) => result,
            Err(ImportError::EmptyInput) => {
                warn!("⚠️ 没有找到待导入的链接，程序结束");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        print_final_stats(&result, &self.config.output_log_file);
        append_batch_report(&self.config.output_log_file, &result)?;

        if !self.controller.presenter().is_dismissed() {
            info!("💡 部分链接未成功导入，请在页面中检查后重新运行");
        }

        Ok(())
    }
}
