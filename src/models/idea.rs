//! # 想法数据模型
//!
//! 想法（Idea）是用户发布的项目记录，用于寻找合作者或融资。
//! 发布表单 `IdeaDraft` 只在内存中维护，提交后不落盘。

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::require;
use crate::error::ValidationError;

/// 想法分类
///
/// 序列化值与种子数据中的显示文本一致（如 "Social Impact"）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdeaCategory {
    Startup,
    #[serde(rename = "Student Project")]
    StudentProject,
    #[serde(rename = "Social Impact")]
    SocialImpact,
    HealthTech,
    EdTech,
    Fintech,
    GreenTech,
    AgriTech,
}

impl IdeaCategory {
    /// 发布表单和分类筛选下拉框中提供的分类（不含 "All" 哨兵）
    pub const SELECTABLE: [IdeaCategory; 6] = [
        IdeaCategory::Startup,
        IdeaCategory::SocialImpact,
        IdeaCategory::HealthTech,
        IdeaCategory::Fintech,
        IdeaCategory::GreenTech,
        IdeaCategory::AgriTech,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdeaCategory::Startup => "Startup",
            IdeaCategory::StudentProject => "Student Project",
            IdeaCategory::SocialImpact => "Social Impact",
            IdeaCategory::HealthTech => "HealthTech",
            IdeaCategory::EdTech => "EdTech",
            IdeaCategory::Fintech => "Fintech",
            IdeaCategory::GreenTech => "GreenTech",
            IdeaCategory::AgriTech => "AgriTech",
        }
    }
}

impl fmt::Display for IdeaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 想法所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdeaStage {
    Idea,
    Research,
    Prototype,
    #[serde(rename = "MVP")]
    Mvp,
    Beta,
}

impl IdeaStage {
    pub const ALL: [IdeaStage; 5] = [
        IdeaStage::Idea,
        IdeaStage::Research,
        IdeaStage::Prototype,
        IdeaStage::Mvp,
        IdeaStage::Beta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdeaStage::Idea => "Idea",
            IdeaStage::Research => "Research",
            IdeaStage::Prototype => "Prototype",
            IdeaStage::Mvp => "MVP",
            IdeaStage::Beta => "Beta",
        }
    }
}

impl fmt::Display for IdeaStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 想法数据结构
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface Idea {
///   id: string;
///   title: string;
///   description: string;
///   needs: string[];
///   category: string;
///   tags: string[];
///   creatorId: string;
///   createdAt: string;      // "2025-01-15"
///   fundingRequired: number;
///   stage: string;
///   location: string;
/// }
/// ```
///
/// `creator_id` 不做引用完整性检查，悬空 id 在渲染时显示为"未找到"。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub description: String,
    /// 需要的角色/资源，保持录入顺序
    #[serde(default)]
    pub needs: Vec<String>,
    pub category: IdeaCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    pub creator_id: String,
    pub created_at: NaiveDate,
    /// 所需资金（卢比）
    #[serde(default)]
    pub funding_required: u64,
    pub stage: IdeaStage,
    #[serde(default)]
    pub location: String,
}

impl Idea {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.id, "idea.id")?;
        require(&self.title, "idea.title")?;
        require(&self.description, "idea.description")?;
        require(&self.creator_id, "idea.creatorId")?;
        Ok(())
    }
}

/// "发布想法"表单状态
///
/// 需求和标签的增删与前端表单一致：去除首尾空白，空值和重复值被拒绝。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaDraft {
    pub title: String,
    pub description: String,
    pub category: IdeaCategory,
    pub stage: IdeaStage,
    pub location: String,
    /// 表单中为自由文本，提交时解析；空字符串视为 0
    pub funding_required: String,
    pub needs: Vec<String>,
    pub tags: Vec<String>,
}

impl Default for IdeaDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: IdeaCategory::Startup,
            stage: IdeaStage::Idea,
            location: String::new(),
            funding_required: String::new(),
            needs: vec![],
            tags: vec![],
        }
    }
}

impl IdeaDraft {
    pub fn add_need(&mut self, need: &str) -> Result<(), ValidationError> {
        push_unique(&mut self.needs, need, "needs")
    }

    pub fn remove_need(&mut self, need: &str) {
        self.needs.retain(|n| n != need);
    }

    pub fn add_tag(&mut self, tag: &str) -> Result<(), ValidationError> {
        push_unique(&mut self.tags, tag, "tags")
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// 将表单转换为完整的 `Idea` 记录
    ///
    /// # 参数
    /// - `id` - 新想法的 id
    /// - `creator_id` - 当前登录用户 id
    /// - `created_at` - 创建日期
    ///
    /// # 错误
    /// 标题/描述为空，或资金字段不是非负整数时返回错误
    pub fn into_idea(
        self,
        id: String,
        creator_id: &str,
        created_at: NaiveDate,
    ) -> Result<Idea, ValidationError> {
        let funding = self.funding_required.trim();
        let funding_required = if funding.is_empty() {
            0
        } else {
            funding
                .parse::<u64>()
                .map_err(|e| ValidationError::InvalidValue {
                    field: "fundingRequired",
                    reason: e.to_string(),
                })?
        };

        let idea = Idea {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            needs: self.needs,
            category: self.category,
            tags: self.tags,
            creator_id: creator_id.to_string(),
            created_at,
            funding_required,
            stage: self.stage,
            location: self.location.trim().to_string(),
        };
        idea.validate()?;
        Ok(idea)
    }
}

fn push_unique(
    list: &mut Vec<String>,
    value: &str,
    field: &'static str,
) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    if list.iter().any(|v| v == value) {
        return Err(ValidationError::Duplicate {
            field,
            value: value.to_string(),
        });
    }
    list.push(value.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names() {
        let c: IdeaCategory = serde_json::from_str("\"Social Impact\"").unwrap();
        assert_eq!(c, IdeaCategory::SocialImpact);
        assert_eq!(serde_json::to_string(&IdeaStage::Mvp).unwrap(), "\"MVP\"");
    }

    #[test]
    fn test_draft_tags_are_trimmed_and_unique() {
        let mut draft = IdeaDraft::default();
        draft.add_tag("  AI ").unwrap();
        assert_eq!(
            draft.add_tag("AI"),
            Err(ValidationError::Duplicate {
                field: "tags",
                value: "AI".into()
            })
        );
        assert_eq!(draft.add_tag("   "), Err(ValidationError::MissingField("tags")));
        draft.remove_tag("AI");
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn test_draft_into_idea() {
        let mut draft = IdeaDraft {
            title: "Solar Carts".into(),
            description: "Street vending on solar power".into(),
            funding_required: "250000".into(),
            ..Default::default()
        };
        draft.add_need("Investment").unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let idea = draft.into_idea("idea9".into(), "user1", date).unwrap();
        assert_eq!(idea.funding_required, 250_000);
        assert_eq!(idea.needs, vec!["Investment".to_string()]);
        assert_eq!(idea.creator_id, "user1");
    }

    #[test]
    fn test_draft_rejects_missing_title_and_bad_funding() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let draft = IdeaDraft {
            description: "x".into(),
            ..Default::default()
        };
        assert_eq!(
            draft.into_idea("i".into(), "u", date),
            Err(ValidationError::MissingField("idea.title"))
        );

        let draft = IdeaDraft {
            title: "t".into(),
            description: "d".into(),
            funding_required: "lots".into(),
            ..Default::default()
        };
        assert!(matches!(
            draft.into_idea("i".into(), "u", date),
            Err(ValidationError::InvalidValue { field: "fundingRequired", .. })
        ));
    }
}
