//! # 仪表盘 Command
//!
//! 需要登录。顶部四项统计，下方三个标签页：
//! - `ideas` - 我发布的想法
//! - `workspaces` - 我拥有或参与的工作区
//! - `chats` - 会话列表（排序方式由设置 `sortConversationsByLatest` 决定）

use serde::{Deserialize, Serialize};

use super::ideas::idea_card;
use super::pages::Page;
use super::routes::Route;
use super::workspaces::workspace_card;
use crate::AppState;
use crate::models::display::{ConversationSummary, DashboardStats, IdeaCard, WorkspaceCard};
use crate::models::user::User;
use crate::services::conversation::{ConversationOptions, assemble_conversations};
use crate::services::stats::dashboard_stats;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTab {
    #[default]
    Ideas,
    Workspaces,
    Chats,
}

#[derive(Serialize, Clone, Debug)]
#[serde(tag = "tab", content = "items", rename_all = "lowercase")]
pub enum DashboardContent {
    Ideas(Vec<IdeaCard>),
    Workspaces(Vec<WorkspaceCard>),
    Chats(Vec<ConversationSummary>),
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPage {
    pub user: User,
    pub stats: DashboardStats,
    pub content: DashboardContent,
}

/// 渲染仪表盘
///
/// 未登录时重定向到 `/login`。统计与会话列表都基于当前聊天记录，
/// 因此包含本次运行中新发送的消息。
pub fn dashboard(state: &AppState, tab: DashboardTab) -> Page {
    let Some(user) = state.session.get_session() else {
        return Page::redirect(Route::Login);
    };

    let catalog = &state.catalog;
    let messages = state.chat.snapshot();

    let content = match tab {
        DashboardTab::Ideas => DashboardContent::Ideas(
            catalog
                .ideas_by_creator(&user.id)
                .into_iter()
                .map(|idea| idea_card(catalog, idea))
                .collect(),
        ),
        DashboardTab::Workspaces => DashboardContent::Workspaces(
            catalog
                .workspaces()
                .iter()
                .filter(|w| w.is_owner(&user.id) || w.is_member(&user.id))
                .map(|w| workspace_card(catalog, w))
                .collect(),
        ),
        DashboardTab::Chats => DashboardContent::Chats(assemble_conversations(
            &messages,
            &user.id,
            catalog,
            ConversationOptions {
                sort_by_latest: state.settings.sort_conversations_by_latest,
            },
        )),
    };

    Page::Dashboard(Box::new(DashboardPage {
        stats: dashboard_stats(catalog, &messages, &user.id),
        user,
        content,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_requires_session() {
        let state = AppState::in_memory().unwrap();
        assert!(matches!(
            dashboard(&state, DashboardTab::Ideas),
            Page::Redirect { ref to } if to == "/login"
        ));
    }

    #[tokio::test]
    async fn test_dashboard_tabs() {
        let state = AppState::in_memory().unwrap();
        state.session.login("aarav@example.com", "pw").await.unwrap();

        let Page::Dashboard(page) = dashboard(&state, DashboardTab::Workspaces) else {
            panic!("expected dashboard");
        };
        assert_eq!(page.stats.workspaces, 2);
        assert!(matches!(&page.content, DashboardContent::Workspaces(w) if w.len() == 2));

        let Page::Dashboard(page) = dashboard(&state, DashboardTab::Chats) else {
            panic!("expected dashboard");
        };
        match &page.content {
            DashboardContent::Chats(convs) => {
                assert_eq!(convs.len(), 1);
                assert_eq!(convs[0].message_count, 4);
                assert_eq!(convs[0].last_message.id, "msg4");
            }
            other => panic!("unexpected tab {other:?}"),
        }
    }
}
