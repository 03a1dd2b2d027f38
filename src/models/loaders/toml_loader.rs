use crate::config::Profile;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载页面交互参数
///
/// 文件中未出现的字段使用默认值
pub async fn load_profile(toml_file_path: &Path) -> Result<Profile> {
    if !toml_file_path.exists() {
        anyhow::bail!("配置文件不存在: {}", toml_file_path.display());
    }

    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let profile: Profile = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    tracing::info!(
        "已加载配置文件: {}",
        toml_file_path.file_name().unwrap_or_default().to_string_lossy()
    );

    Ok(profile)
}
