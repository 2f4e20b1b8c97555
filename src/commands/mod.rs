//! # 页面 Command 处理模块
//!
//! 每个 command 接收 `&AppState` 和页面输入，返回可序列化的页面视图。
//! 边界上的错误统一转换为 `String`，渲染层只展示错误文本。
//! - `routes` - 路由表与导航链接
//! - `pages` - `Page` 视图、`navigate` 与 `render`
//! - `ideas` - 首页、想法列表、发布想法
//! - `collaborators` - 协作者列表
//! - `workspaces` - 工作区列表、详情、创建、添加任务
//! - `chat` - 聊天页与发送消息
//! - `dashboard` - 仪表盘
//! - `auth` - 登录、注册、登出

pub mod auth;
pub mod chat;
pub mod collaborators;
pub mod dashboard;
pub mod ideas;
pub mod pages;
pub mod routes;
pub mod workspaces;
