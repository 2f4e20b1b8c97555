//! # 工作区数据模型
//!
//! 工作区是围绕 0 或 1 个想法的协作容器，包含任务、资源、里程碑和时间线。
//! 种子数据之外的工作区与任务均不持久化。
//!
//! 任务状态之间没有任何工作流约束：任何状态都可以直接改为任何其他状态。

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{require, require_hours};
use crate::error::ValidationError;

/// 工作区状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkspaceStatus {
    Active,
    Planning,
    #[serde(rename = "On Hold")]
    OnHold,
    Completed,
}

impl WorkspaceStatus {
    pub const ALL: [WorkspaceStatus; 4] = [
        WorkspaceStatus::Active,
        WorkspaceStatus::Planning,
        WorkspaceStatus::OnHold,
        WorkspaceStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceStatus::Active => "Active",
            WorkspaceStatus::Planning => "Planning",
            WorkspaceStatus::OnHold => "On Hold",
            WorkspaceStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for WorkspaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 任务状态：Todo / In Progress / Completed / On Hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MilestoneStatus {
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Document,
    Design,
    Link,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Meeting,
    Milestone,
    Update,
}

/// 工作区任务
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface Task {
///   id: string;
///   title: string;
///   description: string;
///   assignedTo: string;
///   status: 'Todo' | 'In Progress' | 'Completed' | 'On Hold';
///   priority: 'High' | 'Medium' | 'Low';
///   dueDate: string;
///   estimatedHours: number;
///   actualHours: number;
///   milestoneId: string;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// 负责人用户 id（不检查引用完整性）
    pub assigned_to: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub actual_hours: f64,
    #[serde(default)]
    pub milestone_id: Option<String>,
}

impl Task {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.id, "task.id")?;
        require(&self.title, "task.title")?;
        require_hours(self.estimated_hours, "task.estimatedHours")?;
        require_hours(self.actual_hours, "task.actualHours")?;
        Ok(())
    }

    /// 直接修改任务状态（无转换约束）
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }
}

/// 里程碑：`progress` 为 0..=100 的百分比
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    pub status: MilestoneStatus,
    #[serde(default)]
    pub progress: u8,
}

impl Milestone {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.id, "milestone.id")?;
        require(&self.title, "milestone.title")?;
        if self.progress > 100 {
            return Err(ValidationError::InvalidValue {
                field: "milestone.progress",
                reason: format!("{} 超出 0..=100", self.progress),
            });
        }
        Ok(())
    }
}

/// 工作区共享资源（文档、设计稿等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(default)]
    pub url: String,
    pub uploaded_by: String,
    pub uploaded_at: NaiveDate,
}

/// 时间线事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub participants: Vec<String>,
}

/// 工作区数据结构
///
/// `members` 为用户 id 列表，保持录入顺序；所有者通常也在其中，但并不强制。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// 关联的想法 id（可选）
    #[serde(default)]
    pub idea_id: Option<String>,
    pub owner_id: String,
    #[serde(default)]
    pub members: Vec<String>,
    pub status: WorkspaceStatus,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
}

impl Workspace {
    /// 校验工作区及其全部任务和里程碑
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.id, "workspace.id")?;
        require(&self.name, "workspace.name")?;
        require(&self.owner_id, "workspace.ownerId")?;
        for task in &self.tasks {
            task.validate()?;
        }
        for milestone in &self.milestones {
            milestone.validate()?;
        }
        for resource in &self.resources {
            require(&resource.id, "resource.id")?;
            require(&resource.name, "resource.name")?;
        }
        for event in &self.timeline {
            require(&event.id, "event.id")?;
            require(&event.title, "event.title")?;
        }
        Ok(())
    }

    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }

    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m == user_id)
    }
}

/// "创建工作区"表单状态
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDraft {
    pub name: String,
    pub description: String,
    /// 空字符串表示不关联想法
    #[serde(default)]
    pub idea_id: String,
    #[serde(default)]
    pub selected_members: Vec<String>,
    #[serde(default)]
    pub is_private: bool,
}

impl WorkspaceDraft {
    /// 切换成员选中状态：已选中则移除，否则追加到末尾
    pub fn toggle_member(&mut self, user_id: &str) {
        if let Some(pos) = self.selected_members.iter().position(|m| m == user_id) {
            self.selected_members.remove(pos);
        } else {
            self.selected_members.push(user_id.to_string());
        }
    }

    /// 将表单转换为新的工作区记录
    ///
    /// 所有者总是第一个成员；新工作区状态为 Planning，任务等列表为空。
    pub fn into_workspace(
        self,
        id: String,
        owner_id: &str,
        created_at: NaiveDate,
    ) -> Result<Workspace, ValidationError> {
        let mut members = vec![owner_id.to_string()];
        for member in self.selected_members {
            if !members.contains(&member) {
                members.push(member);
            }
        }

        let idea_id = Some(self.idea_id.trim().to_string()).filter(|s| !s.is_empty());

        let workspace = Workspace {
            id,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            idea_id,
            owner_id: owner_id.to_string(),
            members,
            status: WorkspaceStatus::Planning,
            created_at,
            milestones: vec![],
            tasks: vec![],
            resources: vec![],
            timeline: vec![],
        };
        workspace.validate()?;
        Ok(workspace)
    }
}
