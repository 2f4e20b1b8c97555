//! # 用户数据模型
//!
//! 用户既是登录会话的主体，也是"协作者"页面中可浏览、可搜索的记录。
//! 用户只来自种子数据或注册时合成的新记录，不会被更新或删除。

use serde::{Deserialize, Serialize};

use super::require;
use crate::error::ValidationError;

/// 新用户与模拟登录用户共用的默认头像
pub const DEFAULT_AVATAR: &str =
    "https://images.pexels.com/photos/2379004/pexels-photo-2379004.jpeg?w=150&h=150&fit=crop&crop=face";

/// 用户数据结构
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface User {
///   id: string;
///   name: string;
///   email: string;
///   skills: string[];
///   interests: string[];
///   isInvestor: boolean;
///   investment: number;
///   location: string;
///   experience: string;
///   avatar: string;
/// }
/// ```
///
/// 序列化后的 JSON 同时也是会话持久化格式（存储键 `cofoundify_user`）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// 唯一标识符：种子数据为 "user1" 形式，注册用户为 "user_<毫秒时间戳>"
    pub id: String,

    /// 显示名称
    pub name: String,

    /// 邮箱地址
    pub email: String,

    /// 技能列表（如 "React"、"UI/UX Design"），按录入顺序
    #[serde(default)]
    pub skills: Vec<String>,

    /// 感兴趣的领域
    #[serde(default)]
    pub interests: Vec<String>,

    /// 是否为投资人
    #[serde(default)]
    pub is_investor: bool,

    /// 可投资金额（卢比）；持久化会话中可能缺失，缺失时为 0
    #[serde(default)]
    pub investment: u64,

    /// 所在城市，如 "Mumbai, India"
    #[serde(default)]
    pub location: String,

    /// 从业经验描述，如 "3 years"
    #[serde(default)]
    pub experience: String,

    /// 头像 URL
    #[serde(default)]
    pub avatar: String,
}

impl User {
    /// 校验必填字段（id、name、email）
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.id, "user.id")?;
        require(&self.name, "user.name")?;
        require(&self.email, "user.email")?;
        Ok(())
    }

    /// 是否具备指定技能（精确匹配）
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

/// 注册时选择的用户类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Entrepreneur,
    Investor,
}

/// 注册表单数据
///
/// 注册总是成功：表单内容只用于合成新的 `User` 记录。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupData {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub user_type: UserType,
}
