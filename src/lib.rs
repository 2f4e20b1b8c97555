//! # Cofoundify - 应用核心初始化模块
//!
//! 本模块负责应用状态的组装，包括：
//! - 初始化日志后端（`env_logger`）
//! - 读取应用设置、创建会话存储后端与认证后端
//! - 加载并校验种子目录，初始化聊天记录
//!
//! ## 架构说明
//! 核心逻辑全部位于库中，`main.rs` 只负责解析命令行参数并打印页面，
//! 集成测试通过 `AppState::in_memory()` 直接驱动页面 command。
//!
//! ## 模块结构
//! - `commands/` - 页面 command（路由层）
//! - `models/` - 数据模型（与种子数据 JSON 字段一一对应）
//! - `services/` - 核心业务逻辑（目录、会话、筛选、会话聚合、统计）
//! - `utils/` - 通用工具函数
//! - `error` - 类型化错误

pub mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use error::CatalogError;
use models::settings::AppSettings;
use services::auth::{Authenticator, MockAuthenticator};
use services::catalog::Catalog;
use services::chat::ChatLog;
use services::session::SessionStore;
use services::storage::{FileStorage, MemoryStorage, SessionStorage};

/// 应用状态
///
/// 显式传递给每个页面 command 的上下文，取代全局单例：
/// - `catalog` - 只读领域目录
/// - `session` - 当前登录会话
/// - `chat` - 本次运行的聊天记录
/// - `settings` - 启动时读取的设置
pub struct AppState {
    pub catalog: Catalog,
    pub session: SessionStore,
    pub chat: ChatLog,
    pub settings: AppSettings,
}

impl AppState {
    /// 用注入的依赖组装应用状态
    ///
    /// 会话从 `storage` 中恢复，聊天记录以目录中的消息为种子。
    pub fn new(
        catalog: Catalog,
        settings: AppSettings,
        storage: Arc<dyn SessionStorage>,
        auth: Arc<dyn Authenticator>,
    ) -> Self {
        let session = SessionStore::restore(storage, auth, settings.storage_key.clone());
        let chat = ChatLog::new(catalog.messages().to_vec());
        Self {
            catalog,
            session,
            chat,
            settings,
        }
    }

    /// 纯内存的应用状态：种子目录 + 内存存储 + 零延迟认证
    ///
    /// 用于测试和一次性渲染，不触碰文件系统。
    pub fn in_memory() -> Result<Self, CatalogError> {
        let settings = AppSettings {
            simulated_latency_ms: 0,
            ..Default::default()
        };
        Ok(Self::new(
            Catalog::seed()?,
            settings,
            Arc::new(MemoryStorage::new()),
            Arc::new(MockAuthenticator::instant()),
        ))
    }

    /// 运行时的应用状态
    ///
    /// # 参数
    /// - `data_dir` - 数据目录；为 None 时使用 `~/.cofoundify/`
    ///
    /// # 错误
    /// 无法确定主目录或种子目录校验失败时返回错误文本。
    /// 设置文件的问题不会导致失败（回退到默认设置）。
    pub async fn bootstrap(data_dir: Option<PathBuf>) -> Result<Self, String> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => utils::path::get_data_path()?,
        };
        log::debug!("数据目录: {}", data_dir.display());

        let settings = services::settings::load_settings(&data_dir).await;
        let auth = MockAuthenticator::new(Duration::from_millis(settings.simulated_latency_ms));
        let catalog = Catalog::seed().map_err(|e| e.to_string())?;

        Ok(Self::new(
            catalog,
            settings,
            Arc::new(FileStorage::new(data_dir)),
            Arc::new(auth),
        ))
    }
}

/// 初始化日志后端
///
/// 默认级别：调试构建为 `info`，发布构建为 `warn`；`RUST_LOG` 可覆盖。
/// 重复调用不会报错。
pub fn init_logging() {
    let default_level = if cfg!(debug_assertions) {
        "info"
    } else {
        "warn"
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .try_init();
}
