//! # 错误类型
//!
//! 服务层使用类型化错误（`thiserror`），command 层在边界处统一转换为 `String`，
//! 与前端只展示错误文本的约定保持一致。
//!
//! 所有失败最终都会降级为可见的占位状态，没有任何错误是致命的。

use thiserror::Error;

/// 会话存储后端错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("存储读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("会话序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 登录 / 注册失败
///
/// `InvalidCredentials` 的显示文本固定为 `Invalid credentials`，
/// 登录页直接展示该字符串。
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// 实体或表单字段校验失败
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("缺少必填字段: {0}")]
    MissingField(&'static str),

    #[error("字段 {field} 的值无效: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("{field} 中已存在 \"{value}\"")]
    Duplicate { field: &'static str, value: String },

    #[error("消息内容不能为空")]
    EmptyMessage,
}

/// 种子目录加载失败
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("解析目录数据失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{entity} {id} 校验失败: {source}")]
    Invalid {
        entity: &'static str,
        id: String,
        #[source]
        source: ValidationError,
    },
}

/// 路由解析失败
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("未知路由: {0}")]
    Unknown(String),
}
