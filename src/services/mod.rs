//! # 业务逻辑服务模块
//!
//! 包含核心业务逻辑的实现，与 command（页面）层解耦：
//! - `catalog` - 只读领域目录：种子数据的加载、校验与查询
//! - `storage` - 会话存储后端：内存实现与文件实现
//! - `auth` - 可注入的认证后端（模拟延迟的 mock 实现）
//! - `session` - 会话存储：恢复、登录、注册、登出
//! - `filter` - 筛选/搜索引擎：想法、协作者、工作区的多维度 AND 过滤
//! - `conversation` - 会话聚合：按对方用户分组消息
//! - `chat` - 运行期间只追加的聊天记录
//! - `stats` - 任务、成员、仪表盘等统计聚合
//! - `settings` - 应用设置的读写

pub mod auth;
pub mod catalog;
pub mod chat;
pub mod conversation;
pub mod filter;
pub mod session;
pub mod settings;
pub mod stats;
pub mod storage;
