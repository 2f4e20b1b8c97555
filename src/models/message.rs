//! # 消息数据模型
//!
//! 私信消息在一次运行期间只追加、不修改；重新加载后仅会话（登录用户）得以保留。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require;
use crate::error::ValidationError;

/// 私信消息
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface Message {
///   id: string;
///   senderId: string;
///   receiverId: string;
///   content: string;
///   createdAt: string; // ISO 8601
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.id, "message.id")?;
        require(&self.sender_id, "message.senderId")?;
        require(&self.receiver_id, "message.receiverId")?;
        Ok(())
    }

    /// 该消息是否由 `user_id` 发出或接收
    pub fn involves(&self, user_id: &str) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    /// 相对 `viewer_id` 的对方 id；与 viewer 无关的消息返回 None
    pub fn counterpart_of(&self, viewer_id: &str) -> Option<&str> {
        if self.sender_id == viewer_id {
            Some(&self.receiver_id)
        } else if self.receiver_id == viewer_id {
            Some(&self.sender_id)
        } else {
            None
        }
    }
}
