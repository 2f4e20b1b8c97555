//! # 页面组装与导航
//!
//! `Page` 是所有页面 command 的统一输出：可序列化的视图数据，
//! 渲染层只负责展示。`navigate` 按路由以默认筛选条件和默认标签页生成页面，
//! `render` 在此基础上附加导航栏和当前用户，并跟随一次重定向。
//!
//! ## 数据流
//! ```text
//! URL 路径 → Route::from_str → navigate(&AppState, Route) → Page
//!                                 ├─ Redirect { to }（需要登录的页面）
//!                                 └─ NotFound { message }（未知用户 / 工作区）
//! ```

use serde::Serialize;

use super::auth::{RegisterPage, register_form};
use super::chat::{ChatPage, open_chat};
use super::collaborators::{CollaboratorsPage, browse_collaborators};
use super::dashboard::{DashboardPage, DashboardTab, dashboard};
use super::ideas::{HomePage, IdeasPage, PostIdeaPage, browse_ideas, home, post_idea_form};
use super::routes::{NavLink, Route, nav_links};
use super::workspaces::{
    CreateWorkspacePage, WorkspaceDetailPage, WorkspaceTab, WorkspacesPage, browse_workspaces,
    create_workspace_form, workspace_detail,
};
use crate::AppState;
use crate::models::user::User;
use crate::services::filter::{CollaboratorFilter, IdeaFilter, WorkspaceFilter};

/// 页面视图
#[derive(Serialize, Clone, Debug)]
#[serde(tag = "page", rename_all = "camelCase")]
pub enum Page {
    Home(HomePage),
    Ideas(IdeasPage),
    Collaborators(CollaboratorsPage),
    PostIdea(PostIdeaPage),
    Chat(ChatPage),
    Dashboard(Box<DashboardPage>),
    Login,
    Register(RegisterPage),
    Workspaces(WorkspacesPage),
    CreateWorkspace(CreateWorkspacePage),
    WorkspaceDetail(Box<WorkspaceDetailPage>),
    /// 跳转到另一个路由
    Redirect { to: String },
    /// 静态占位文本，如 "User not found"
    NotFound { message: String },
}

impl Page {
    pub fn redirect(route: Route) -> Self {
        Page::Redirect {
            to: route.to_string(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Page::NotFound {
            message: message.to_string(),
        }
    }
}

/// 完整的一屏：路径 + 导航栏 + 当前用户 + 页面内容
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub path: String,
    pub nav: Vec<NavLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user: Option<User>,
    pub page: Page,
}

/// 按路由生成页面（默认筛选条件、默认标签页）
pub fn navigate(state: &AppState, route: &Route) -> Page {
    match route {
        Route::Home => Page::Home(home(state)),
        Route::Ideas => Page::Ideas(browse_ideas(state, &IdeaFilter::default())),
        Route::Collaborators => Page::Collaborators(browse_collaborators(
            state,
            &CollaboratorFilter::default(),
        )),
        Route::PostIdea => post_idea_form(state, Default::default()),
        Route::Chat(id) => open_chat(state, id),
        Route::Dashboard => dashboard(state, DashboardTab::default()),
        Route::Login => Page::Login,
        Route::Register => register_form(),
        Route::Workspaces => Page::Workspaces(browse_workspaces(state, &WorkspaceFilter::default())),
        Route::CreateWorkspace => create_workspace_form(state, Default::default()),
        Route::WorkspaceDetail(id) => workspace_detail(state, id, WorkspaceTab::default()),
    }
}

/// 解析路径并渲染一屏
///
/// 需要登录的页面会重定向到 `/login`，此时返回登录页，`path` 为重定向后的路径。
///
/// # 错误
/// 路径不是已知路由时返回错误文本
pub fn render(state: &AppState, path: &str) -> Result<Screen, String> {
    let mut route = path.parse::<Route>().map_err(|e| e.to_string())?;
    let mut page = navigate(state, &route);

    if let Page::Redirect { to } = &page {
        log::debug!("{} 重定向到 {}", route, to);
        route = to.parse::<Route>().map_err(|e| e.to_string())?;
        page = navigate(state, &route);
    }

    let current_user = state.session.get_session();
    Ok(Screen {
        path: route.to_string(),
        nav: nav_links(current_user.is_some()),
        current_user,
        page,
    })
}
