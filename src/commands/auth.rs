//! # 登录 / 注册 / 登出 Commands
//!
//! 成功登录或注册后跳转到 `/dashboard`，登出后跳转到首页。
//! 失败时返回错误文本，登录失败固定为 `Invalid credentials`。

use serde::Serialize;

use super::pages::Page;
use super::routes::Route;
use crate::AppState;
use crate::models::user::{SignupData, UserType};

/// 注册页的用户类型选项
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPage {
    pub user_types: Vec<UserType>,
}

pub fn register_form() -> Page {
    Page::Register(RegisterPage {
        user_types: vec![UserType::Entrepreneur, UserType::Investor],
    })
}

/// 登录
///
/// # 错误
/// 邮箱或密码为空时返回 `Invalid credentials`；会话持久化失败时返回存储错误
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<Page, String> {
    state
        .session
        .login(email, password)
        .await
        .map_err(|e| e.to_string())?;
    Ok(Page::redirect(Route::Dashboard))
}

/// 注册并直接登录
pub async fn register(state: &AppState, data: &SignupData) -> Result<Page, String> {
    state
        .session
        .signup(data)
        .await
        .map_err(|e| e.to_string())?;
    Ok(Page::redirect(Route::Dashboard))
}

/// 登出
///
/// 内存会话总是被清除；持久化条目删除失败时返回错误文本。
pub fn logout(state: &AppState) -> Result<Page, String> {
    state.session.logout().map_err(|e| e.to_string())?;
    Ok(Page::redirect(Route::Home))
}
