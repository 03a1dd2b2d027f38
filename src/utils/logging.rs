//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::BatchResult;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则按是否详细日志选择 `debug` / `info`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n批量导入日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 将批次结果追加到日志文件
pub fn append_batch_report(log_file_path: &str, result: &BatchResult) -> Result<()> {
    let mut report = format!(
        "完成时间: {}\n成功: {}/{}  失败: {}  用户停止: {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        result.succeeded,
        result.total,
        result.failed(),
        if result.stopped_early { "是" } else { "否" }
    );
    for failure in &result.failures {
        report.push_str(&format!(
            "  [{}] {} | {}\n",
            failure.index, failure.link, failure.reason
        ));
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    file.write_all(report.as_bytes())?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(target_url: &str, headless: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量导入来源");
    info!("🌐 目标页面: {}", target_url);
    info!("🖥️ 浏览器模式: {}", if headless { "无头" } else { "连接已打开的浏览器" });
    info!("{}", "=".repeat(60));
}

/// 记录链接加载信息
///
/// # 参数
/// - `total`: 去重后的链接数
/// - `duplicates`: 去掉的重复链接数
pub fn log_links_loaded(total: usize, duplicates: usize) {
    info!("✓ 找到 {} 个待导入的链接", total);
    if duplicates > 0 {
        info!("🔁 已去除 {} 个重复链接", duplicates);
    }
    info!("💡 链接将逐个导入，每个完成后再开始下一个\n");
}

/// 打印最终统计信息
pub fn print_final_stats(result: &BatchResult, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 导入完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", result.succeeded, result.total);
    info!("❌ 失败: {}", result.failed());
    if result.stopped_early {
        info!("⏹️ 用户提前停止，剩余 {} 个未尝试", result.total - result.attempted);
    }
    for failure in &result.failures {
        info!("   [{}] {}", failure.index, truncate_text(&failure.link, 80));
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
