//! # 工作区相关 Commands
//!
//! - `browse_workspaces` - 工作区列表：统计 + 筛选后的工作区卡片
//! - `workspace_detail` - 工作区详情，按标签页（tasks/members/resources/timeline）展示
//! - `create_workspace_form` / `create_workspace` - 创建工作区（需要登录）
//! - `add_task` - 在详情页添加任务
//!
//! 创建工作区和添加任务都只校验并记录日志，不写回目录。

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::ideas::idea_card;
use super::pages::Page;
use super::routes::Route;
use crate::AppState;
use crate::models::display::{IdeaCard, MemberContribution, TaskStats, WorkspaceCard, WorkspaceCounts};
use crate::models::idea::Idea;
use crate::models::user::User;
use crate::models::workspace::{Resource, Task, TimelineEvent, Workspace, WorkspaceDraft};
use crate::services::catalog::Catalog;
use crate::services::filter::{CatalogFilter, WorkspaceFilter};
use crate::services::stats::{member_contributions, task_stats, workspace_counts};

/// 工作区列表页
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WorkspacesPage {
    pub filter: WorkspaceFilter,
    pub counts: WorkspaceCounts,
    pub workspaces: Vec<WorkspaceCard>,
    pub filters_active: bool,
}

/// 详情页标签
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceTab {
    #[default]
    Tasks,
    Members,
    Resources,
    Timeline,
}

/// 任务行：任务 + 负责人
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    pub task: Task,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
}

/// 资源行：资源 + 上传者
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRow {
    pub resource: Resource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader: Option<User>,
}

/// 当前标签页的内容
#[derive(Serialize, Clone, Debug)]
#[serde(tag = "tab", content = "items", rename_all = "lowercase")]
pub enum TabContent {
    Tasks(Vec<TaskRow>),
    Members(Vec<MemberContribution>),
    Resources(Vec<ResourceRow>),
    Timeline(Vec<TimelineEvent>),
}

/// 工作区详情页
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDetailPage {
    pub workspace: Workspace,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,
    /// 关联想法；未关联或 id 悬空时为 None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idea: Option<IdeaCard>,
    pub members: Vec<User>,
    pub task_stats: TaskStats,
    pub content: TabContent,
}

/// 创建工作区页
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspacePage {
    pub draft: WorkspaceDraft,
    /// 可关联的想法：当前用户自己发布的
    pub linkable_ideas: Vec<Idea>,
    /// 可邀请的成员：除当前用户外的所有人
    pub available_members: Vec<User>,
}

pub fn workspace_card(catalog: &Catalog, workspace: &Workspace) -> WorkspaceCard {
    WorkspaceCard {
        workspace: workspace.clone(),
        members: catalog.resolve_users(&workspace.members),
        task_stats: task_stats(&workspace.tasks),
    }
}

/// 按筛选条件浏览工作区
///
/// 筛选器中的 viewer 总是取当前会话，调用方传入的值被忽略。
pub fn browse_workspaces(state: &AppState, filter: &WorkspaceFilter) -> WorkspacesPage {
    let viewer = state.session.current_user_id();
    let filter = WorkspaceFilter {
        viewer_id: viewer.clone(),
        ..filter.clone()
    };

    let all = state.catalog.workspaces();
    let workspaces = filter
        .apply(all)
        .into_iter()
        .map(|w| workspace_card(&state.catalog, w))
        .collect();

    WorkspacesPage {
        counts: workspace_counts(all, viewer.as_deref()),
        workspaces,
        filters_active: filter.is_active(),
        filter,
    }
}

/// 工作区详情
///
/// 工作区不存在时返回 `Page::NotFound("Workspace not found")`。
pub fn workspace_detail(state: &AppState, workspace_id: &str, tab: WorkspaceTab) -> Page {
    let catalog = &state.catalog;
    let Some(workspace) = catalog.find_workspace(workspace_id) else {
        log::debug!("工作区 {} 不存在", workspace_id);
        return Page::not_found("Workspace not found");
    };

    let content = match tab {
        WorkspaceTab::Tasks => TabContent::Tasks(
            workspace
                .tasks
                .iter()
                .map(|task| TaskRow {
                    task: task.clone(),
                    assignee: catalog.find_user(&task.assigned_to).cloned(),
                })
                .collect(),
        ),
        WorkspaceTab::Members => TabContent::Members(member_contributions(workspace, catalog)),
        WorkspaceTab::Resources => TabContent::Resources(
            workspace
                .resources
                .iter()
                .map(|resource| ResourceRow {
                    resource: resource.clone(),
                    uploader: catalog.find_user(&resource.uploaded_by).cloned(),
                })
                .collect(),
        ),
        WorkspaceTab::Timeline => TabContent::Timeline(workspace.timeline.clone()),
    };

    Page::WorkspaceDetail(Box::new(WorkspaceDetailPage {
        owner: catalog.find_user(&workspace.owner_id).cloned(),
        idea: workspace
            .idea_id
            .as_deref()
            .and_then(|id| catalog.find_idea(id))
            .map(|idea| idea_card(catalog, idea)),
        members: catalog.resolve_users(&workspace.members),
        task_stats: task_stats(&workspace.tasks),
        workspace: workspace.clone(),
        content,
    }))
}

/// 创建工作区表单
///
/// 未登录时重定向到 `/login`。
pub fn create_workspace_form(state: &AppState, draft: WorkspaceDraft) -> Page {
    let Some(viewer) = state.session.current_user_id() else {
        return Page::redirect(Route::Login);
    };

    let catalog = &state.catalog;
    Page::CreateWorkspace(CreateWorkspacePage {
        draft,
        linkable_ideas: catalog
            .ideas_by_creator(&viewer)
            .into_iter()
            .cloned()
            .collect(),
        available_members: catalog
            .users()
            .iter()
            .filter(|u| u.id != viewer)
            .cloned()
            .collect(),
    })
}

/// 提交"创建工作区"表单，成功后跳转到 `/workspaces`
///
/// # 错误
/// 名称为空时返回错误文本
pub fn create_workspace(state: &AppState, draft: WorkspaceDraft) -> Result<Page, String> {
    let Some(owner_id) = state.session.current_user_id() else {
        return Ok(Page::redirect(Route::Login));
    };

    let visibility = if draft.is_private { "私有" } else { "公开" };
    let now = Utc::now();
    let workspace = draft
        .into_workspace(
            format!("workspace_{}", now.timestamp_millis()),
            &owner_id,
            now.date_naive(),
        )
        .map_err(|e| e.to_string())?;

    log::info!(
        "创建{}工作区 \"{}\"（{} 名成员），未持久化",
        visibility,
        workspace.name,
        workspace.members.len()
    );
    Ok(Page::redirect(Route::Workspaces))
}

/// 添加任务
///
/// 标题去掉首尾空白后不能为空；成功时返回规范化后的标题。
/// 任务不会写入工作区。
pub fn add_task(state: &AppState, workspace_id: &str, title: &str) -> Result<String, String> {
    if state.catalog.find_workspace(workspace_id).is_none() {
        return Err("Workspace not found".to_string());
    }

    let title = title.trim();
    if title.is_empty() {
        return Err("任务标题不能为空".to_string());
    }

    log::info!("向工作区 {} 添加任务 \"{}\"，未持久化", workspace_id, title);
    Ok(title.to_string())
}
