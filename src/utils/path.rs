//! # 路径工具函数
//!
//! 提供与文件路径相关的工具函数：
//! - 获取应用数据目录路径（`~/.cofoundify/`）
//! - 获取设置文件路径（`~/.cofoundify/settings.json`）

use std::path::{Path, PathBuf};

/// 设置文件名
pub const SETTINGS_FILE: &str = "settings.json";

/// 获取应用数据目录的绝对路径
///
/// 会话条目和设置文件都存放在用户主目录下的 `.cofoundify` 文件夹中。
/// 使用 `dirs` crate 获取跨平台的主目录路径。
///
/// # 返回值
/// 返回 `~/.cofoundify/` 目录的绝对路径。
///
/// # 错误
/// 如果无法确定用户主目录（极端情况，如无 HOME 环境变量），返回错误信息。
///
/// # 示例
/// - Windows: `C:\Users\username\.cofoundify`
/// - Linux/macOS: `/home/username/.cofoundify`
pub fn get_data_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "无法获取用户主目录".to_string())?;
    Ok(home.join(".cofoundify"))
}

/// 数据目录下的设置文件路径
pub fn settings_file(data_dir: &Path) -> PathBuf {
    data_dir.join(SETTINGS_FILE)
}
