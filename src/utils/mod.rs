//! # 通用工具函数
//!
//! - `path` - 应用数据目录定位
//! - `format` - 金额等展示文本格式化

pub mod format;
pub mod path;
