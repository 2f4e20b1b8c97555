//! # 会话聚合服务
//!
//! 将扁平的消息列表按"对方用户"分组，供仪表盘会话列表和聊天页使用：
//! - `assemble_conversations` - 分组 + 每组最后一条消息 + 消息数
//! - `conversation_thread` - 两个用户之间的消息，按时间升序
//!
//! ## 排序
//! 默认按对方首次出现的顺序输出分组（与源行为一致，不做时间排序）；
//! `ConversationOptions::sort_by_latest` 打开后按最后一条消息时间倒序。

use std::collections::HashMap;

use crate::models::display::ConversationSummary;
use crate::models::message::Message;
use crate::services::catalog::Catalog;

/// 会话列表的组装选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversationOptions {
    /// 是否按最后一条消息时间倒序排列
    pub sort_by_latest: bool,
}

/// 分组中间态：最后一条消息 + 消息数
struct Group<'a> {
    counterpart_id: &'a str,
    last: &'a Message,
    count: usize,
}

/// 组装 `viewer_id` 的会话列表
///
/// # 参数
/// - `messages` - 扁平消息列表（源顺序）
/// - `viewer_id` - 当前用户 id；与其无关的消息被忽略
/// - `catalog` - 用于解析对方用户，悬空 id 对应 `counterpart: None`
/// - `options` - 排序选项
///
/// # 返回值
/// 每个对方一项；"最后一条消息"取时间戳最大者，时间相同时取源顺序中靠前的那条
pub fn assemble_conversations(
    messages: &[Message],
    viewer_id: &str,
    catalog: &Catalog,
    options: ConversationOptions,
) -> Vec<ConversationSummary> {
    let mut order: Vec<Group<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for msg in messages {
        let Some(other) = msg.counterpart_of(viewer_id) else {
            continue;
        };

        match index.get(other) {
            Some(&pos) => {
                let group = &mut order[pos];
                group.count += 1;
                if msg.created_at > group.last.created_at {
                    group.last = msg;
                }
            }
            None => {
                index.insert(other, order.len());
                order.push(Group {
                    counterpart_id: other,
                    last: msg,
                    count: 1,
                });
            }
        }
    }

    if options.sort_by_latest {
        // 稳定排序：时间相同的分组保持首次出现顺序
        order.sort_by(|a, b| b.last.created_at.cmp(&a.last.created_at));
    }

    order
        .into_iter()
        .map(|g| ConversationSummary {
            counterpart_id: g.counterpart_id.to_string(),
            counterpart: catalog.find_user(g.counterpart_id).cloned(),
            last_message: g.last.clone(),
            message_count: g.count,
        })
        .collect()
}

/// `a` 与 `b` 之间的全部消息，按时间升序（时间相同保持源顺序）
pub fn conversation_thread<'a>(messages: &'a [Message], a: &str, b: &str) -> Vec<&'a Message> {
    let mut thread: Vec<&Message> = messages
        .iter()
        .filter(|m| {
            (m.sender_id == a && m.receiver_id == b) || (m.sender_id == b && m.receiver_id == a)
        })
        .collect();
    thread.sort_by_key(|m| m.created_at);
    thread
}

/// `user_id` 参与的消息总数
pub fn message_count_for(messages: &[Message], user_id: &str) -> usize {
    messages.iter().filter(|m| m.involves(user_id)).count()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn msg(id: &str, from: &str, to: &str, minute: u32) -> Message {
        Message {
            id: id.into(),
            sender_id: from.into(),
            receiver_id: to.into(),
            content: format!("content of {id}"),
            created_at: Utc.with_ymd_and_hms(2025, 1, 15, 10, minute, 0).unwrap(),
        }
    }

    #[test]
    fn test_seed_conversations_for_user1() {
        let catalog = Catalog::seed().unwrap();
        let convs = assemble_conversations(
            catalog.messages(),
            "user1",
            &catalog,
            ConversationOptions::default(),
        );
        assert_eq!(convs.len(), 1);
        assert_eq!(convs[0].counterpart_id, "user2");
        assert_eq!(convs[0].counterpart.as_ref().unwrap().name, "Neha Mehta");
        assert_eq!(convs[0].message_count, 4);
        assert_eq!(convs[0].last_message.id, "msg4");
    }

    #[test]
    fn test_last_message_is_max_timestamp_not_last_in_list() {
        let catalog = Catalog::default();
        // 源顺序被打乱：最新的一条位于中间
        let messages = vec![
            msg("m1", "a", "b", 1),
            msg("m2", "b", "a", 30),
            msg("m3", "a", "b", 5),
        ];
        let convs = assemble_conversations(&messages, "a", &catalog, ConversationOptions::default());
        assert_eq!(convs.len(), 1);
        assert_eq!(convs[0].message_count, 3);
        assert_eq!(convs[0].last_message.id, "m2");
        // 目录中没有 b：对方为 None
        assert!(convs[0].counterpart.is_none());
    }

    #[test]
    fn test_timestamp_tie_keeps_earliest_in_source_order() {
        let catalog = Catalog::default();
        let messages = vec![msg("m1", "a", "b", 7), msg("m2", "b", "a", 7)];
        let convs = assemble_conversations(&messages, "a", &catalog, ConversationOptions::default());
        assert_eq!(convs[0].last_message.id, "m1");
    }

    #[test]
    fn test_group_order_insertion_vs_latest() {
        let catalog = Catalog::default();
        let messages = vec![
            msg("m1", "a", "b", 1),
            msg("m2", "c", "a", 2),
            msg("m3", "a", "d", 3),
            msg("m4", "b", "a", 9),
            msg("m5", "x", "y", 59),
        ];

        let ids = |opts| {
            assemble_conversations(&messages, "a", &catalog, opts)
                .into_iter()
                .map(|c| c.counterpart_id)
                .collect::<Vec<_>>()
        };

        assert_eq!(ids(ConversationOptions::default()), vec!["b", "c", "d"]);
        assert_eq!(
            ids(ConversationOptions { sort_by_latest: true }),
            vec!["b", "d", "c"]
        );
    }

    #[test]
    fn test_thread_is_ascending() {
        let messages = vec![
            msg("m1", "a", "b", 20),
            msg("m2", "a", "c", 1),
            msg("m3", "b", "a", 10),
        ];
        let thread: Vec<_> = conversation_thread(&messages, "a", "b")
            .into_iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(thread, vec!["m3", "m1"]);
        assert_eq!(message_count_for(&messages, "a"), 3);
    }
}
