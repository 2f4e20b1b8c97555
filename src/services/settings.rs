//! # 设置读写服务
//!
//! 设置文件位于 `<数据目录>/settings.json`。
//! 读取失败（文件缺失、无法读取、JSON 损坏）时静默回退到默认设置，
//! 只记录一条 warn 日志；设置问题永远不会阻止应用启动。

use std::path::Path;

use crate::error::StorageError;
use crate::models::settings::AppSettings;
use crate::utils::path::settings_file;

/// 读取应用设置
///
/// # 参数
/// - `data_dir` - 应用数据目录（通常为 `~/.cofoundify/`）
///
/// # 返回值
/// 解析成功时返回文件中的设置（缺失字段取默认值），否则返回默认设置
pub async fn load_settings(data_dir: &Path) -> AppSettings {
    let path = settings_file(data_dir);

    if !path.exists() {
        log::debug!("设置文件 {} 不存在，使用默认设置", path.display());
        return AppSettings::default();
    }

    match tokio::fs::read_to_string(&path).await {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("设置文件 {} 解析失败，使用默认设置: {}", path.display(), e);
            AppSettings::default()
        }),
        Err(e) => {
            log::warn!("读取设置文件 {} 失败，使用默认设置: {}", path.display(), e);
            AppSettings::default()
        }
    }
}

/// 保存应用设置
///
/// 将设置序列化为带缩进的 JSON 写入 `<数据目录>/settings.json`，
/// 目录不存在时自动创建。
///
/// # 错误
/// 序列化失败、目录创建失败或文件写入失败时返回错误
pub async fn save_settings(data_dir: &Path, settings: &AppSettings) -> Result<(), StorageError> {
    if !data_dir.exists() {
        tokio::fs::create_dir_all(data_dir).await?;
    }

    let content = serde_json::to_string_pretty(settings)?;
    tokio::fs::write(settings_file(data_dir), content).await?;
    Ok(())
}

/// 读取设置，应用修改后写回
///
/// 文件缺失或损坏时以默认设置为基础。返回写入后的设置。
pub async fn update_settings(
    data_dir: &Path,
    apply: impl FnOnce(&mut AppSettings),
) -> Result<AppSettings, StorageError> {
    let mut settings = load_settings(data_dir).await;
    apply(&mut settings);
    save_settings(data_dir, &settings).await?;
    log::info!("设置已保存到 {}", settings_file(data_dir).display());
    Ok(settings)
}
