//! 会话生命周期：登录规则、持久化、重新加载、可注入的失败实现。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use app_lib::AppState;
use app_lib::error::AuthError;
use app_lib::models::settings::AppSettings;
use app_lib::models::user::{SignupData, User};
use app_lib::services::auth::{Authenticator, MockAuthenticator};
use app_lib::services::catalog::Catalog;
use app_lib::services::session::SessionStore;
use app_lib::services::storage::{FileStorage, MemoryStorage, SessionStorage};

const KEY: &str = "cofoundify_user";

/// 总是失败的认证后端
struct RejectingAuthenticator;

#[async_trait]
impl Authenticator for RejectingAuthenticator {
    async fn authenticate(&self, _email: &str, _password: &str) -> Result<User, AuthError> {
        Err(AuthError::InvalidCredentials)
    }

    async fn register(&self, _data: &SignupData) -> Result<User, AuthError> {
        Err(AuthError::InvalidCredentials)
    }
}

fn instant_store(storage: Arc<dyn SessionStorage>) -> SessionStore {
    SessionStore::restore(storage, Arc::new(MockAuthenticator::instant()), KEY)
}

#[tokio::test]
async fn empty_fields_always_fail_and_non_empty_always_succeed() {
    let store = instant_store(Arc::new(MemoryStorage::new()));

    for (email, password) in [("", ""), ("", "pw"), ("a@b.c", "")] {
        let err = store.login(email, password).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!store.is_authenticated());
    }

    for (email, password) in [("a@b.c", "pw"), ("x", "y"), (" ", " ")] {
        let user = store.login(email, password).await.unwrap();
        assert_eq!(user.email, email);
        assert!(store.is_authenticated());
    }
}

#[tokio::test]
async fn logout_then_reload_from_disk_yields_no_session() {
    let tmp = tempfile::tempdir().unwrap();
    let storage: Arc<dyn SessionStorage> = Arc::new(FileStorage::new(tmp.path()));

    let store = instant_store(storage.clone());
    store.login("aarav@example.com", "pw").await.unwrap();
    assert!(tmp.path().join("cofoundify_user.json").exists());

    // 重新加载：会话被恢复
    let reloaded = instant_store(Arc::new(FileStorage::new(tmp.path())));
    assert_eq!(reloaded.get_session().unwrap().email, "aarav@example.com");

    reloaded.logout().unwrap();
    assert!(!tmp.path().join("cofoundify_user.json").exists());

    let after_logout = instant_store(Arc::new(FileStorage::new(tmp.path())));
    assert!(after_logout.get_session().is_none());
}

#[tokio::test]
async fn corrupt_file_on_disk_is_cleared() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("cofoundify_user.json"), "[1, 2").unwrap();

    let store = instant_store(Arc::new(FileStorage::new(tmp.path())));
    assert!(store.get_session().is_none());
    assert!(!tmp.path().join("cofoundify_user.json").exists());
}

#[tokio::test]
async fn injected_failing_authenticator() {
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::restore(storage.clone(), Arc::new(RejectingAuthenticator), KEY);

    assert!(matches!(
        store.login("a@b.c", "pw").await,
        Err(AuthError::InvalidCredentials)
    ));
    assert!(store.signup(&SignupData::default()).await.is_err());
    assert!(store.get_session().is_none());
    assert!(!store.is_loading());
    assert_eq!(storage.get(KEY).unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn loading_flag_is_set_while_login_is_in_flight() {
    let store = Arc::new(SessionStore::restore(
        Arc::new(MemoryStorage::new()),
        Arc::new(MockAuthenticator::new(Duration::from_millis(1000))),
        KEY,
    ));

    let pending = {
        let store = store.clone();
        tokio::spawn(async move { store.login("a@b.c", "pw").await })
    };

    // 让登录任务运行到模拟延迟处
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(store.is_loading());
    assert!(!store.is_authenticated());

    pending.await.unwrap().unwrap();
    assert!(!store.is_loading());
    assert!(store.is_authenticated());
}

#[tokio::test]
async fn app_state_restores_session_with_configured_key() {
    let storage = Arc::new(MemoryStorage::new());
    let settings = AppSettings {
        storage_key: "custom_key".into(),
        simulated_latency_ms: 0,
        ..Default::default()
    };

    let state = AppState::new(
        Catalog::seed().unwrap(),
        settings.clone(),
        storage.clone(),
        Arc::new(MockAuthenticator::instant()),
    );
    state.session.login("a@b.c", "pw").await.unwrap();
    assert!(storage.get("custom_key").unwrap().is_some());
    assert_eq!(storage.get(KEY).unwrap(), None);

    let reloaded = AppState::new(
        Catalog::seed().unwrap(),
        settings,
        storage,
        Arc::new(MockAuthenticator::instant()),
    );
    assert_eq!(reloaded.session.current_user_id().as_deref(), Some("user1"));
}
