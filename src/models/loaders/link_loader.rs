use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncReadExt, BufReader};

/// 读取原始链接文本
///
/// 指定了文件时从文件读取，否则读取标准输入直到 EOF
pub async fn load_raw_links(links_file: Option<&str>) -> Result<String> {
    match links_file {
        Some(path) => load_from_file(Path::new(path)).await,
        None => load_from_stdin().await,
    }
}

async fn load_from_file(path: &Path) -> Result<String> {
    if !path.exists() {
        anyhow::bail!("链接文件不存在: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取链接文件: {}", path.display()))?;

    tracing::info!(
        "正在加载: {}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    Ok(content)
}

async fn load_from_stdin() -> Result<String> {
    tracing::info!("请粘贴链接（每行一个），输入完成后按 Ctrl-D 结束");

    let mut content = String::new();
    BufReader::new(tokio::io::stdin())
        .read_to_string(&mut content)
        .await
        .context("无法读取标准输入")?;

    Ok(content)
}
