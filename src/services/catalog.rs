//! # 领域目录服务
//!
//! 持有想法、用户、工作区和消息四类静态集合。目录只读：构建后不会被修改，
//! 因此多个页面可以并发读取而无需加锁。
//!
//! ## 数据来源
//! 内置种子数据以 JSON 文档形式嵌入二进制（`data/sample_data.json`），
//! 构建时统一解析并逐条校验。引用完整性（如 `creatorId`、成员 id）不做检查，
//! 悬空 id 由渲染层显示为"未找到"。

use serde::Deserialize;

use crate::error::{CatalogError, ValidationError};
use crate::models::idea::Idea;
use crate::models::message::Message;
use crate::models::user::User;
use crate::models::workspace::Workspace;

/// 内置种子数据
const SAMPLE_DATA: &str = include_str!("../../data/sample_data.json");

/// 目录 JSON 文档的顶层结构
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    ideas: Vec<Idea>,
    #[serde(default)]
    workspaces: Vec<Workspace>,
    #[serde(default)]
    messages: Vec<Message>,
}

/// 只读领域目录
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    users: Vec<User>,
    ideas: Vec<Idea>,
    workspaces: Vec<Workspace>,
    messages: Vec<Message>,
}

impl Catalog {
    /// 从各实体集合构建目录，构建时逐条校验
    ///
    /// # 错误
    /// 任一实体校验失败时返回 `CatalogError::Invalid`，指明实体类型和 id
    pub fn new(
        users: Vec<User>,
        ideas: Vec<Idea>,
        workspaces: Vec<Workspace>,
        messages: Vec<Message>,
    ) -> Result<Self, CatalogError> {
        check_all("user", &users, |u| &u.id, User::validate)?;
        check_all("idea", &ideas, |i| &i.id, Idea::validate)?;
        check_all("workspace", &workspaces, |w| &w.id, Workspace::validate)?;
        check_all("message", &messages, |m| &m.id, Message::validate)?;

        Ok(Self {
            users,
            ideas,
            workspaces,
            messages,
        })
    }

    /// 从 JSON 文档构建目录
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::new(doc.users, doc.ideas, doc.workspaces, doc.messages)
    }

    /// 加载内置种子数据
    pub fn seed() -> Result<Self, CatalogError> {
        let catalog = Self::from_json(SAMPLE_DATA)?;
        log::debug!(
            "种子目录已加载: {} 个用户, {} 个想法, {} 个工作区, {} 条消息",
            catalog.users.len(),
            catalog.ideas.len(),
            catalog.workspaces.len(),
            catalog.messages.len()
        );
        Ok(catalog)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_idea(&self, id: &str) -> Option<&Idea> {
        self.ideas.iter().find(|i| i.id == id)
    }

    pub fn find_workspace(&self, id: &str) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| w.id == id)
    }

    /// 指定用户发布的想法，按源顺序
    pub fn ideas_by_creator(&self, creator_id: &str) -> Vec<&Idea> {
        self.ideas
            .iter()
            .filter(|i| i.creator_id == creator_id)
            .collect()
    }

    /// 将 id 列表解析为用户，悬空 id 被跳过
    pub fn resolve_users(&self, ids: &[String]) -> Vec<User> {
        ids.iter()
            .filter_map(|id| self.find_user(id))
            .cloned()
            .collect()
    }
}

fn check_all<T>(
    entity: &'static str,
    items: &[T],
    id_of: impl Fn(&T) -> &String,
    validate: impl Fn(&T) -> Result<(), ValidationError>,
) -> Result<(), CatalogError> {
    for item in items {
        validate(item).map_err(|source| CatalogError::Invalid {
            entity,
            id: id_of(item).clone(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_loads() {
        let catalog = Catalog::seed().unwrap();
        assert_eq!(catalog.users().len(), 5);
        assert_eq!(catalog.ideas().len(), 5);
        assert_eq!(catalog.workspaces().len(), 3);
        assert_eq!(catalog.messages().len(), 6);
        assert_eq!(catalog.find_user("user1").unwrap().name, "Aarav Singh");
        assert!(catalog.find_workspace("workspace9").is_none());
    }

    #[test]
    fn test_invalid_entity_is_reported_with_id() {
        let json = r#"{"users":[{"id":"u1","name":"","email":"x@y.z"}]}"#;
        let err = Catalog::from_json(json).unwrap_err();
        match err {
            CatalogError::Invalid { entity, id, .. } => {
                assert_eq!(entity, "user");
                assert_eq!(id, "u1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dangling_references_are_accepted() {
        let json = r#"{"ideas":[{"id":"i1","title":"T","description":"D",
            "category":"Fintech","creatorId":"ghost","createdAt":"2025-01-01","stage":"Idea"}]}"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert!(catalog.find_user("ghost").is_none());
        assert_eq!(catalog.ideas_by_creator("ghost").len(), 1);
    }

    #[test]
    fn test_resolve_users_skips_unknown_ids() {
        let catalog = Catalog::seed().unwrap();
        let ids = vec!["user2".to_string(), "nobody".to_string(), "user1".to_string()];
        let names: Vec<_> = catalog
            .resolve_users(&ids)
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Neha Mehta", "Aarav Singh"]);
    }
}
