//! # 协作者相关 Commands
//!
//! 协作者列表页：顶部统计 + 按搜索词、技能、类型、城市筛选的用户卡片。

use serde::Serialize;

use crate::AppState;
use crate::models::display::{CollaboratorStats, UserCard};
use crate::models::user::User;
use crate::services::filter::{CatalogFilter, CollaboratorFilter};
use crate::services::stats::collaborator_stats;
use crate::utils::format::format_amount;

/// 协作者列表页
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorsPage {
    pub filter: CollaboratorFilter,
    /// 统计基于完整目录，不受筛选影响
    pub stats: CollaboratorStats,
    pub users: Vec<UserCard>,
    pub total: usize,
    pub filters_active: bool,
}

/// 生成用户卡片，仅投资额大于 0 的投资人带投资额文本
pub fn user_card(user: &User) -> UserCard {
    UserCard {
        user: user.clone(),
        investment_label: (user.is_investor && user.investment > 0)
            .then(|| format_amount(user.investment)),
    }
}

pub fn browse_collaborators(state: &AppState, filter: &CollaboratorFilter) -> CollaboratorsPage {
    let all = state.catalog.users();
    let users = filter.apply(all).into_iter().map(user_card).collect();

    CollaboratorsPage {
        filter: filter.clone(),
        stats: collaborator_stats(all),
        users,
        total: all.len(),
        filters_active: filter.is_active(),
    }
}
