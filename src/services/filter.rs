//! # 目录筛选引擎
//!
//! 纯函数、同步、每次输入变化时整体重新计算（无防抖、无异步、无缓存）。
//!
//! ## 组合规则
//! - 每个筛选维度要么是 `Selection::All`（哨兵，不限制），要么是具体取值
//! - 文本搜索为大小写不敏感的子串匹配，空查询匹配所有记录
//! - 所有激活的维度之间为逻辑与
//! - 不做排序：结果顺序与目录源顺序一致
//!
//! ## 性能策略
//! 文本匹配使用 `memchr::memmem::Finder` 做 SIMD 加速子串搜索，
//! `apply` 使用 rayon 并行过滤；索引型并行迭代器的 `collect` 保持源顺序。

use memchr::memmem::Finder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::idea::{Idea, IdeaCategory, IdeaStage};
use crate::models::user::User;
use crate::models::workspace::{Workspace, WorkspaceStatus};

/// 协作者技能下拉框选项（不含 "All"）
pub const SKILL_OPTIONS: [&str; 7] = [
    "React",
    "Node.js",
    "Python",
    "UI/UX Design",
    "Digital Marketing",
    "Blockchain",
    "Machine Learning",
];

/// 城市下拉框选项（不含 "All"）
pub const LOCATION_OPTIONS: [&str; 5] = ["Mumbai", "Bangalore", "Delhi", "Pune", "Hyderabad"];

/// 被视为"开发者"的技能
const DEVELOPER_SKILLS: [&str; 4] = ["React", "Node.js", "Python", "Blockchain"];

/// 单个筛选维度的取值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Selection<T> {
    /// 哨兵：该维度不参与筛选
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// `All` 总是通过，否则交给谓词判断
    pub fn allows(&self, pred: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(v) => pred(v),
        }
    }
}

/// 大小写不敏感的子串查询
///
/// 查询词在构造时小写化一次，匹配时对每个字段小写化后做 SIMD 子串搜索。
pub struct TextQuery {
    needle: String,
}

impl TextQuery {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, haystack: &str) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        Finder::new(self.needle.as_bytes())
            .find(haystack.to_lowercase().as_bytes())
            .is_some()
    }

    /// 任一字段命中即匹配
    pub fn matches_any<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        let finder = Finder::new(self.needle.as_bytes());
        fields
            .into_iter()
            .any(|f| finder.find(f.to_lowercase().as_bytes()).is_some())
    }
}

/// 目录筛选器的通用接口
pub trait CatalogFilter<T: Sync>: Sync {
    /// 记录是否满足所有激活的筛选维度
    fn matches(&self, item: &T) -> bool;

    /// 是否有任一维度处于激活状态（决定是否显示"清除筛选"）
    fn is_active(&self) -> bool;

    /// 一次性将所有维度重置为默认值 / "All"
    fn clear(&mut self);

    /// 对目录执行筛选，结果保持源顺序
    fn apply<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.par_iter().filter(|item| self.matches(item)).collect()
    }
}

// ============ 想法筛选 ============

/// 资金需求区间（高级筛选）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FundingRange {
    #[default]
    Any,
    /// 低于 ₹1L
    Under1L,
    /// ₹1L - ₹5L
    From1LTo5L,
    /// ₹5L - ₹20L
    From5LTo20L,
    /// 高于 ₹20L
    Above20L,
}

impl FundingRange {
    pub fn contains(&self, amount: u64) -> bool {
        match self {
            FundingRange::Any => true,
            FundingRange::Under1L => amount < 100_000,
            FundingRange::From1LTo5L => (100_000..=500_000).contains(&amount),
            FundingRange::From5LTo20L => (500_001..=2_000_000).contains(&amount),
            FundingRange::Above20L => amount > 2_000_000,
        }
    }
}

/// 想法页筛选状态
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdeaFilter {
    /// 匹配标题、描述或任一标签
    pub search: String,
    pub category: Selection<IdeaCategory>,
    pub stage: Selection<IdeaStage>,
    /// 城市名，按想法 location 的子串匹配
    pub location: Selection<String>,
    pub funding: FundingRange,
}

impl CatalogFilter<Idea> for IdeaFilter {
    fn matches(&self, idea: &Idea) -> bool {
        let query = TextQuery::new(&self.search);
        let matches_search = query.matches_any(
            [idea.title.as_str(), idea.description.as_str()]
                .into_iter()
                .chain(idea.tags.iter().map(String::as_str)),
        );

        matches_search
            && self.category.allows(|c| idea.category == *c)
            && self.stage.allows(|s| idea.stage == *s)
            && self.location.allows(|l| idea.location.contains(l.as_str()))
            && self.funding.contains(idea.funding_required)
    }

    fn is_active(&self) -> bool {
        !self.search.is_empty()
            || !self.category.is_all()
            || !self.stage.is_all()
            || !self.location.is_all()
            || self.funding != FundingRange::Any
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

// ============ 协作者筛选 ============

/// 协作者类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollaboratorType {
    Investors,
    Developers,
    Designers,
    Marketers,
}

impl CollaboratorType {
    pub const ALL: [CollaboratorType; 4] = [
        CollaboratorType::Investors,
        CollaboratorType::Developers,
        CollaboratorType::Designers,
        CollaboratorType::Marketers,
    ];

    pub fn describes(&self, user: &User) -> bool {
        match self {
            CollaboratorType::Investors => user.is_investor,
            CollaboratorType::Developers => user
                .skills
                .iter()
                .any(|s| DEVELOPER_SKILLS.contains(&s.as_str())),
            CollaboratorType::Designers => user.skills.iter().any(|s| s.contains("Design")),
            CollaboratorType::Marketers => user.skills.iter().any(|s| s.contains("Marketing")),
        }
    }
}

/// 协作者页筛选状态
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollaboratorFilter {
    /// 匹配姓名或任一技能
    pub search: String,
    /// 技能精确匹配
    pub skill: Selection<String>,
    pub user_type: Selection<CollaboratorType>,
    /// 城市名，按用户 location 的子串匹配
    pub location: Selection<String>,
}

impl CatalogFilter<User> for CollaboratorFilter {
    fn matches(&self, user: &User) -> bool {
        let query = TextQuery::new(&self.search);
        let matches_search = query.matches_any(
            std::iter::once(user.name.as_str()).chain(user.skills.iter().map(String::as_str)),
        );

        matches_search
            && self.skill.allows(|s| user.has_skill(s))
            && self.user_type.allows(|t| t.describes(user))
            && self.location.allows(|l| user.location.contains(l.as_str()))
    }

    fn is_active(&self) -> bool {
        !self.search.is_empty()
            || !self.skill.is_all()
            || !self.user_type.is_all()
            || !self.location.is_all()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

// ============ 工作区筛选 ============

/// 工作区视图：全部 / 我拥有的 / 我参与的
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkspaceView {
    #[serde(rename = "My Workspaces")]
    Owned,
    #[serde(rename = "Member Of")]
    MemberOf,
}

/// 工作区页筛选状态
///
/// `viewer_id` 是当前登录用户，不属于可清除的筛选维度；
/// 未登录时 `Owned` / `MemberOf` 视图不匹配任何工作区。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkspaceFilter {
    /// 匹配名称或描述
    pub search: String,
    pub status: Selection<WorkspaceStatus>,
    pub view: Selection<WorkspaceView>,
    #[serde(skip)]
    pub viewer_id: Option<String>,
}

impl WorkspaceFilter {
    pub fn for_viewer(viewer_id: Option<String>) -> Self {
        Self {
            viewer_id,
            ..Default::default()
        }
    }
}

impl CatalogFilter<Workspace> for WorkspaceFilter {
    fn matches(&self, workspace: &Workspace) -> bool {
        let query = TextQuery::new(&self.search);
        let matches_search =
            query.matches_any([workspace.name.as_str(), workspace.description.as_str()]);

        let viewer = self.viewer_id.as_deref();
        let matches_view = self.view.allows(|v| match (v, viewer) {
            (_, None) => false,
            (WorkspaceView::Owned, Some(id)) => workspace.is_owner(id),
            (WorkspaceView::MemberOf, Some(id)) => workspace.is_member(id),
        });

        matches_search && self.status.allows(|s| workspace.status == *s) && matches_view
    }

    fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.status.is_all() || !self.view.is_all()
    }

    fn clear(&mut self) {
        self.search.clear();
        self.status = Selection::All;
        self.view = Selection::All;
    }
}
