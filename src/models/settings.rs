//! # 应用设置数据模型
//!
//! 定义了应用设置（AppSettings）的 Rust 结构体，
//! 存储在 `~/.cofoundify/settings.json` 中。
//!
//! 所有字段都有默认值；文件缺失或内容损坏时整体回退到默认设置。

use serde::{Deserialize, Serialize};

/// 应用设置
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface AppSettings {
///   storageKey: string;
///   simulatedLatencyMs: number;
///   sortConversationsByLatest: boolean;
///   featuredIdeaCount: number;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// 会话持久化使用的存储键
    pub storage_key: String,

    /// 模拟登录/注册的固定延迟（毫秒），测试中设为 0
    pub simulated_latency_ms: u64,

    /// 会话列表是否按最后一条消息时间倒序排列
    ///
    /// 默认关闭：按对方首次出现的顺序排列
    pub sort_conversations_by_latest: bool,

    /// 首页展示的精选想法数量
    pub featured_idea_count: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            storage_key: "cofoundify_user".to_string(),
            simulated_latency_ms: 1000,
            sort_conversations_by_latest: false,
            featured_idea_count: 3,
        }
    }
}
