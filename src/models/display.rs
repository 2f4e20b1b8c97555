//! # 显示层数据模型
//!
//! 定义了页面渲染所需的独立数据结构，与目录中的原始实体解耦。
//!
//! ## 设计原则
//! - **只读**：显示结构从目录实体克隆生成，渲染层无法回写目录。
//! - **悬空引用可见**：引用的用户不存在时对应字段为 `None`，
//!   渲染层据此显示"未找到"占位文本，而不是报错。
//! - **预格式化**：金额等展示文本在 Rust 端生成，渲染层零文本处理。
//!
//! ## 数据流
//! ```text
//! Catalog（只读种子数据）
//!      → filter::CatalogFilter::apply → Vec<&T>（保持源顺序）
//!      → stats / conversation 聚合
//!      → 本模块的卡片与统计结构
//!      → commands 层组装为 Page
//! ```

use serde::Serialize;

use super::idea::Idea;
use super::message::Message;
use super::user::User;
use super::workspace::Workspace;

/// 想法卡片
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct IdeaCard {
    pub idea: Idea,
    /// 发布者；creatorId 悬空时为 None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<User>,
    /// 资金需求展示文本，如 "₹5.0L"
    pub funding_label: String,
}

/// 协作者卡片
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserCard {
    pub user: User,
    /// 投资额展示文本，仅投资人有值
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment_label: Option<String>,
}

/// 工作区任务统计
///
/// - `completion_rate`：四舍五入的完成百分比，任务数为 0 时为 0
/// - `hours_efficiency`：预估工时 / 实际工时，分母至少为 1
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub on_hold: usize,
    pub completion_rate: u32,
    pub estimated_hours: f64,
    pub actual_hours: f64,
    pub hours_efficiency: f64,
}

/// 单个成员在工作区内的贡献
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberContribution {
    pub member_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<User>,
    pub assigned: usize,
    pub completed: usize,
    pub actual_hours: f64,
    /// 成员没有任务时为 0
    pub completion_rate: u32,
}

/// 工作区卡片：工作区本身 + 可解析的成员 + 任务统计
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceCard {
    pub workspace: Workspace,
    /// 成员 id 能解析到的用户（悬空 id 被跳过）
    pub members: Vec<User>,
    pub task_stats: TaskStats,
}

/// 仪表盘会话列表中的一项
///
/// 对应前端 `{ user, lastMessage, messageCount }`。
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    /// 对方用户 id
    pub counterpart_id: String,
    /// 对方用户；id 悬空时为 None（渲染为 "User not found"）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterpart: Option<User>,
    /// 该会话中时间戳最大的消息
    pub last_message: Message,
    pub message_count: usize,
}

/// 仪表盘顶部统计
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub ideas_posted: usize,
    pub workspaces: usize,
    pub conversations: usize,
    pub messages: usize,
}

/// 协作者页面顶部统计
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorStats {
    pub total: usize,
    pub investors: usize,
    pub total_investment: u64,
    /// 如 "₹5.0L+"
    pub total_investment_label: String,
}

/// 工作区页面顶部统计（相对当前用户）
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceCounts {
    pub total: usize,
    /// 当前用户拥有的工作区
    pub owned: usize,
    /// 当前用户参与但不拥有的工作区
    pub member_of: usize,
}
