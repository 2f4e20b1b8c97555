//! # 聊天相关 Commands
//!
//! - `open_chat` - 打开与某个用户的聊天：对方资料 + 双方消息（时间升序）
//! - `send_chat_message` - 以当前登录用户身份发送消息
//!
//! 新消息追加到 `AppState` 的聊天记录中，只在本次运行期间可见。

use serde::Serialize;

use super::pages::Page;
use crate::AppState;
use crate::models::message::Message;
use crate::models::user::User;
use crate::services::conversation::conversation_thread;

/// 聊天页
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChatPage {
    pub counterpart: User,
    /// 当前登录用户；未登录时为 None，消息列表为空
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer_id: Option<String>,
    pub messages: Vec<Message>,
}

/// 打开与 `counterpart_id` 的聊天
///
/// 对方不存在时返回 `Page::NotFound("User not found")`。
pub fn open_chat(state: &AppState, counterpart_id: &str) -> Page {
    let Some(counterpart) = state.catalog.find_user(counterpart_id) else {
        log::debug!("聊天对象 {} 不存在", counterpart_id);
        return Page::not_found("User not found");
    };

    let viewer_id = state.session.current_user_id();
    let messages = match viewer_id.as_deref() {
        Some(viewer) => {
            let history = state.chat.snapshot();
            conversation_thread(&history, viewer, counterpart_id)
                .into_iter()
                .cloned()
                .collect()
        }
        None => vec![],
    };

    Page::Chat(ChatPage {
        counterpart: counterpart.clone(),
        viewer_id,
        messages,
    })
}

/// 发送消息
///
/// # 参数
/// - `receiver_id` - 对方用户 id
/// - `content` - 消息正文，原样保存
///
/// # 错误
/// - 未登录
/// - 对方不存在：`User not found`
/// - 正文只含空白
pub fn send_chat_message(
    state: &AppState,
    receiver_id: &str,
    content: &str,
) -> Result<Message, String> {
    let sender_id = state
        .session
        .current_user_id()
        .ok_or_else(|| "请先登录".to_string())?;

    if state.catalog.find_user(receiver_id).is_none() {
        return Err("User not found".to_string());
    }

    let message = state
        .chat
        .send(&sender_id, receiver_id, content)
        .map_err(|e| e.to_string())?;
    log::info!("{} 向 {} 发送了一条消息", sender_id, receiver_id);
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_chat_with_seed_thread() {
        let state = AppState::in_memory().unwrap();
        state.session.login("a@b.c", "pw").await.unwrap();

        let Page::Chat(page) = open_chat(&state, "user2") else {
            panic!("expected chat page");
        };
        assert_eq!(page.counterpart.name, "Neha Mehta");
        let ids: Vec<_> = page.messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["msg1", "msg2", "msg3", "msg4"]);
    }

    #[test]
    fn test_unknown_counterpart() {
        let state = AppState::in_memory().unwrap();
        assert!(matches!(
            open_chat(&state, "ghost"),
            Page::NotFound { ref message } if message == "User not found"
        ));
    }

    #[tokio::test]
    async fn test_send_appends_to_thread() {
        let state = AppState::in_memory().unwrap();
        assert!(send_chat_message(&state, "user2", "hi").is_err());

        state.session.login("a@b.c", "pw").await.unwrap();
        assert!(send_chat_message(&state, "user2", "   ").is_err());
        let sent = send_chat_message(&state, "user2", "See you tomorrow").unwrap();

        let Page::Chat(page) = open_chat(&state, "user2") else {
            panic!("expected chat page");
        };
        assert_eq!(page.messages.len(), 5);
        assert_eq!(page.messages.last().unwrap().id, sent.id);
    }
}
