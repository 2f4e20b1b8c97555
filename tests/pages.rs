//! 页面流程与会话聚合性质。

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;

use app_lib::AppState;
use app_lib::commands::dashboard::{DashboardContent, DashboardTab, dashboard};
use app_lib::commands::pages::{Page, render};
use app_lib::commands::{auth, chat};
use app_lib::models::message::Message;
use app_lib::models::settings::AppSettings;
use app_lib::services::auth::MockAuthenticator;
use app_lib::services::catalog::Catalog;
use app_lib::services::conversation::{ConversationOptions, assemble_conversations};
use app_lib::services::storage::MemoryStorage;

/// A 与 B 之间的 n 条消息，时间戳打乱顺序
fn exchange(n: usize) -> Vec<Message> {
    let base = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            // 7 与 n 互素时这是一个排列；这里只需要时间戳不按源顺序递增
            let minute = (i * 7) % n.max(1);
            let (from, to) = if i % 2 == 0 { ("A", "B") } else { ("B", "A") };
            Message {
                id: format!("m{i}"),
                sender_id: from.into(),
                receiver_id: to.into(),
                content: format!("message {i}"),
                created_at: base + Duration::minutes(minute as i64),
            }
        })
        .collect()
}

#[test]
fn conversation_for_a_counts_all_n_and_picks_max_timestamp() {
    let catalog = Catalog::default();
    for n in [1, 2, 5, 9, 20] {
        let messages = exchange(n);
        let convs =
            assemble_conversations(&messages, "A", &catalog, ConversationOptions::default());
        assert_eq!(convs.len(), 1);
        assert_eq!(convs[0].counterpart_id, "B");
        assert_eq!(convs[0].message_count, n);

        let latest = messages.iter().map(|m| m.created_at).max().unwrap();
        assert_eq!(convs[0].last_message.created_at, latest);
    }
}

fn state_with(settings: AppSettings) -> AppState {
    AppState::new(
        Catalog::seed().unwrap(),
        settings,
        Arc::new(MemoryStorage::new()),
        Arc::new(MockAuthenticator::instant()),
    )
}

#[tokio::test]
async fn dashboard_chats_honour_sort_setting() {
    let settings = AppSettings {
        simulated_latency_ms: 0,
        sort_conversations_by_latest: true,
        ..Default::default()
    };
    let state = state_with(settings);
    auth::login(&state, "aarav@example.com", "pw").await.unwrap();

    // 新会话对象 user5 在源顺序中排在 user2 之后，但消息最新
    chat::send_chat_message(&state, "user5", "Hi Vikram").unwrap();

    let Page::Dashboard(page) = dashboard(&state, DashboardTab::Chats) else {
        panic!("expected dashboard");
    };
    let DashboardContent::Chats(convs) = &page.content else {
        panic!("expected chats tab");
    };
    let order: Vec<_> = convs.iter().map(|c| c.counterpart_id.as_str()).collect();
    assert_eq!(order, vec!["user5", "user2"]);
    assert_eq!(page.stats.conversations, 2);
    assert_eq!(page.stats.messages, 5);
}

#[tokio::test]
async fn dashboard_chats_default_to_first_appearance() {
    let state = AppState::in_memory().unwrap();
    auth::login(&state, "aarav@example.com", "pw").await.unwrap();
    chat::send_chat_message(&state, "user5", "Hi Vikram").unwrap();

    let Page::Dashboard(page) = dashboard(&state, DashboardTab::Chats) else {
        panic!("expected dashboard");
    };
    let DashboardContent::Chats(convs) = &page.content else {
        panic!("expected chats tab");
    };
    let order: Vec<_> = convs.iter().map(|c| c.counterpart_id.as_str()).collect();
    assert_eq!(order, vec!["user2", "user5"]);
}

#[tokio::test]
async fn render_reflects_authentication() {
    let state = AppState::in_memory().unwrap();

    let anon = render(&state, "/").unwrap();
    assert_eq!(anon.nav.len(), 3);
    assert!(matches!(anon.page, Page::Home(_)));

    auth::login(&state, "aarav@example.com", "pw").await.unwrap();
    let screen = render(&state, "/dashboard").unwrap();
    assert_eq!(screen.path, "/dashboard");
    assert_eq!(screen.nav.len(), 5);
    assert_eq!(screen.current_user.as_ref().unwrap().name, "Aarav Singh");

    let json = serde_json::to_value(&screen).unwrap();
    assert_eq!(json["page"]["page"], "dashboard");
    assert_eq!(json["page"]["stats"]["ideasPosted"], 1);

    auth::logout(&state).unwrap();
    assert_eq!(render(&state, "/post-idea").unwrap().path, "/login");
}

#[test]
fn not_found_pages() {
    let state = AppState::in_memory().unwrap();

    let screen = render(&state, "/workspace/missing").unwrap();
    assert!(matches!(
        screen.page,
        Page::NotFound { ref message } if message == "Workspace not found"
    ));

    let screen = render(&state, "/chat/missing").unwrap();
    assert!(matches!(
        screen.page,
        Page::NotFound { ref message } if message == "User not found"
    ));
}
