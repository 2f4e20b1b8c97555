//! # 路由定义
//!
//! 客户端路由表：URL 路径与页面之间的一一映射，以及依赖登录状态的导航链接。
//!
//! | 路径 | 页面 | 需要登录 |
//! |------|------|----------|
//! | `/` | 首页 | |
//! | `/ideas` | 想法列表 | |
//! | `/collaborators` | 协作者列表 | |
//! | `/post-idea` | 发布想法 | ✓ |
//! | `/chat/:id` | 与某用户的聊天 | |
//! | `/dashboard` | 仪表盘 | ✓ |
//! | `/login` / `/register` | 登录 / 注册 | |
//! | `/workspaces` | 工作区列表 | |
//! | `/workspace/create` | 创建工作区 | ✓ |
//! | `/workspace/:id` | 工作区详情 | |

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::RouteError;

/// 已知路由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Ideas,
    Collaborators,
    PostIdea,
    Chat(String),
    Dashboard,
    Login,
    Register,
    Workspaces,
    CreateWorkspace,
    WorkspaceDetail(String),
}

impl Route {
    /// 未登录访问时是否重定向到 `/login`
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Route::PostIdea | Route::Dashboard | Route::CreateWorkspace
        )
    }
}

impl FromStr for Route {
    type Err = RouteError;

    /// 解析 URL 路径；查询串和片段被忽略，末尾的 `/` 可有可无
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let path = raw.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        let route = match segments.as_slice() {
            [] if path.starts_with('/') => Route::Home,
            ["ideas"] => Route::Ideas,
            ["collaborators"] => Route::Collaborators,
            ["post-idea"] => Route::PostIdea,
            ["chat", id] if !id.is_empty() => Route::Chat(id.to_string()),
            ["dashboard"] => Route::Dashboard,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["workspaces"] => Route::Workspaces,
            ["workspace", "create"] => Route::CreateWorkspace,
            ["workspace", id] if !id.is_empty() => Route::WorkspaceDetail(id.to_string()),
            _ => return Err(RouteError::Unknown(raw.to_string())),
        };
        Ok(route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Ideas => write!(f, "/ideas"),
            Route::Collaborators => write!(f, "/collaborators"),
            Route::PostIdea => write!(f, "/post-idea"),
            Route::Chat(id) => write!(f, "/chat/{}", id),
            Route::Dashboard => write!(f, "/dashboard"),
            Route::Login => write!(f, "/login"),
            Route::Register => write!(f, "/register"),
            Route::Workspaces => write!(f, "/workspaces"),
            Route::CreateWorkspace => write!(f, "/workspace/create"),
            Route::WorkspaceDetail(id) => write!(f, "/workspace/{}", id),
        }
    }
}

/// 导航栏链接
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub path: String,
}

/// 导航栏链接列表
///
/// 未登录：Ideas、Collaborators、Workspaces；
/// 登录后追加 Dashboard 和 Messages（固定指向 `/chat/user2`）。
pub fn nav_links(authenticated: bool) -> Vec<NavLink> {
    let mut links = vec![
        link("Ideas", Route::Ideas),
        link("Collaborators", Route::Collaborators),
        link("Workspaces", Route::Workspaces),
    ];
    if authenticated {
        links.push(link("Dashboard", Route::Dashboard));
        links.push(link("Messages", Route::Chat("user2".to_string())));
    }
    links
}

fn link(label: &'static str, route: Route) -> NavLink {
    NavLink {
        label,
        path: route.to_string(),
    }
}
