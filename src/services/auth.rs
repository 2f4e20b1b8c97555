//! # 认证服务
//!
//! `Authenticator` 是"最终成功或返回类型化失败"的异步契约，
//! 会话存储通过构造函数注入具体实现：
//! - 运行时使用带固定延迟的 `MockAuthenticator`
//! - 测试使用零延迟的 `MockAuthenticator::instant()` 或自定义的失败实现
//!
//! 没有真实后端：登录只检查邮箱和密码非空，注册总是成功。

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::error::AuthError;
use crate::models::user::{DEFAULT_AVATAR, SignupData, User, UserType};

/// 可注入的认证后端
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// 校验凭据并返回登录用户
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// 根据注册表单创建新用户
    async fn register(&self, data: &SignupData) -> Result<User, AuthError>;
}

/// 模拟认证后端
///
/// 每次调用先等待固定延迟，再按模拟规则返回结果。
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    latency: Duration,
}

impl MockAuthenticator {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// 零延迟实例（测试用）
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.simulate_latency().await;

        // 只有空字符串被拒绝；仅含空白的输入视为非空
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(mock_login_user(email))
    }

    async fn register(&self, data: &SignupData) -> Result<User, AuthError> {
        self.simulate_latency().await;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();

        Ok(User {
            id: format!("user_{}", millis),
            name: data.name.clone(),
            email: data.email.clone(),
            skills: vec![],
            interests: vec![],
            is_investor: data.user_type == UserType::Investor,
            investment: 0,
            location: data.location.clone(),
            experience: "New Member".to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
        })
    }
}

/// 模拟登录成功时返回的固定用户，邮箱取自登录表单
fn mock_login_user(email: &str) -> User {
    User {
        id: "user1".to_string(),
        name: "Aarav Singh".to_string(),
        email: email.to_string(),
        skills: ["React", "Node.js", "MongoDB", "AWS"]
            .into_iter()
            .map(String::from)
            .collect(),
        interests: ["Fintech", "Sustainability", "HealthTech"]
            .into_iter()
            .map(String::from)
            .collect(),
        is_investor: false,
        investment: 0,
        location: "Mumbai, India".to_string(),
        experience: "3 years".to_string(),
        avatar: DEFAULT_AVATAR.to_string(),
    }
}
