//! # 聊天记录服务
//!
//! 运行期间的私信日志：以目录中的种子消息初始化，只追加不修改。
//! 进程退出后新消息即丢失，与源行为一致（仅会话会被持久化）。

use std::sync::{PoisonError, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::error::ValidationError;
use crate::models::message::Message;

/// 只追加的消息日志
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: RwLock<Vec<Message>>,
    /// 同一毫秒内多次发送时用于区分 id
    seq: AtomicU64,
}

impl ChatLog {
    pub fn new(seed: Vec<Message>) -> Self {
        Self {
            messages: RwLock::new(seed),
            seq: AtomicU64::new(0),
        }
    }

    /// 当前全部消息的快照（源顺序）
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 发送一条消息
    ///
    /// # 参数
    /// - `sender_id` / `receiver_id` - 双方用户 id（不校验是否存在）
    /// - `content` - 消息正文，按输入原样保存
    ///
    /// # 错误
    /// 正文去掉首尾空白后为空时返回 `ValidationError::EmptyMessage`
    pub fn send(
        &self,
        sender_id: &str,
        receiver_id: &str,
        content: &str,
    ) -> Result<Message, ValidationError> {
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        let now = Utc::now();
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        let message = Message {
            id: format!("msg{}-{}", now.timestamp_millis(), seq),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            content: content.to_string(),
            created_at: now,
        };
        message.validate()?;

        self.messages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());
        log::debug!("消息 {} 已发送: {} -> {}", message.id, sender_id, receiver_id);
        Ok(message)
    }
}
