//! # 会话存储服务
//!
//! 持有当前登录用户的快照，并将其序列化后持久化到注入的存储后端。
//!
//! ## 生命周期
//! - **恢复**：启动时从存储读取并反序列化；内容损坏则删除该条目，视为未登录
//! - **登录 / 注册**：成功后写入内存和存储
//! - **登出**：同步清除内存状态和存储条目
//!
//! ## 线程安全
//! 当前用户保存在 `RwLock<Option<User>>` 中，`is_loading` 使用原子布尔值，
//! 多个页面可以并发读取会话。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{AuthError, StorageError};
use crate::models::user::{SignupData, User};
use crate::services::auth::Authenticator;
use crate::services::storage::SessionStorage;

/// 会话上下文
///
/// 取代全局单例：由 `AppState` 持有，通过引用传递给各页面 command。
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    auth: Arc<dyn Authenticator>,
    storage_key: String,
    current: RwLock<Option<User>>,
    loading: AtomicBool,
}

impl SessionStore {
    /// 创建会话存储并从存储后端恢复会话
    ///
    /// 持久化条目缺失时为未登录状态；条目无法解析时删除该条目。
    /// 存储读取本身失败也只记录日志，不影响启动。
    pub fn restore(
        storage: Arc<dyn SessionStorage>,
        auth: Arc<dyn Authenticator>,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();
        let current = rehydrate(storage.as_ref(), &storage_key);

        Self {
            storage,
            auth,
            storage_key,
            current: RwLock::new(current),
            loading: AtomicBool::new(false),
        }
    }

    /// 当前登录用户的快照
    pub fn get_session(&self) -> Option<User> {
        self.current.read().ok().and_then(|user| user.clone())
    }

    /// 当前登录用户 id
    pub fn current_user_id(&self) -> Option<String> {
        self.current
            .read()
            .ok()
            .and_then(|user| user.as_ref().map(|u| u.id.clone()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .map(|user| user.is_some())
            .unwrap_or(false)
    }

    /// 是否有登录或注册请求正在进行
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// 登录
    ///
    /// # 错误
    /// - 邮箱或密码为空：`AuthError::InvalidCredentials`
    /// - 持久化失败：`AuthError::Storage`（此时内存会话不变）
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let _loading = LoadingGuard::start(&self.loading);

        let user = self.auth.authenticate(email, password).await.map_err(|e| {
            log::warn!("登录失败: {}", e);
            e
        })?;
        self.persist(&user)?;
        log::info!("用户 {} 已登录", user.id);
        Ok(user)
    }

    /// 注册新用户并直接登录
    pub async fn signup(&self, data: &SignupData) -> Result<User, AuthError> {
        let _loading = LoadingGuard::start(&self.loading);

        let user = self.auth.register(data).await?;
        self.persist(&user)?;
        log::info!("新用户 {} 已注册", user.id);
        Ok(user)
    }

    /// 登出：同步清除内存会话和持久化条目
    ///
    /// 内存会话总是被清除。存储删除失败时重试一次；两次都失败则返回错误，
    /// 此时持久化条目仍在，下次 `restore` 会重新恢复该会话。
    pub fn logout(&self) -> Result<(), StorageError> {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;

        self.storage.remove(&self.storage_key).or_else(|e| {
            log::warn!("删除会话条目失败，重试: {}", e);
            self.storage.remove(&self.storage_key)
        })?;
        log::info!("已登出");
        Ok(())
    }

    /// 写入存储成功后才更新内存会话
    fn persist(&self, user: &User) -> Result<(), StorageError> {
        let json = serde_json::to_string(user)?;
        self.storage.set(&self.storage_key, &json)?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
        Ok(())
    }
}

/// 从存储中恢复会话
fn rehydrate(storage: &dyn SessionStorage, key: &str) -> Option<User> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("读取持久化会话失败: {}", e);
            return None;
        }
    };

    let parsed = serde_json::from_str::<User>(&raw)
        .map_err(|e| e.to_string())
        .and_then(|user| user.validate().map(|_| user).map_err(|e| e.to_string()));

    match parsed {
        Ok(user) => {
            log::info!("已恢复用户 {} 的会话", user.id);
            Some(user)
        }
        Err(e) => {
            log::warn!("持久化会话已损坏，丢弃: {}", e);
            if let Err(e) = storage.remove(key) {
                log::warn!("删除损坏的会话条目失败: {}", e);
            }
            None
        }
    }
}

/// 在作用域内将 loading 标记为 true，离开作用域（包括出错返回）时复位
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
