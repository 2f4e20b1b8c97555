//! # 数据模型模块
//!
//! 定义了与前端 TypeScript 类型一一对应的 Rust 数据结构。
//! 所有实体均派生 `Serialize` 和 `Deserialize`，字段名采用 camelCase，
//! 与种子数据 JSON 和前端渲染层保持一致。
//! - `user` - 用户（协作者）与注册表单
//! - `idea` - 想法及其发布表单
//! - `workspace` - 工作区、任务、里程碑、资源、时间线
//! - `message` - 私信消息
//! - `settings` - 应用设置
//! - `display` - 页面渲染所需的视图数据结构

pub mod display;
pub mod idea;
pub mod message;
pub mod settings;
pub mod user;
pub mod workspace;

use crate::error::ValidationError;

/// 校验必填字符串字段非空（仅空白也视为缺失）
pub(crate) fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// 校验工时类字段：必须是有限且非负的数
pub(crate) fn require_hours(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field,
            reason: format!("{} 不是有效工时", value),
        })
    }
}
