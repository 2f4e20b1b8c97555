//! # 想法相关 Commands
//!
//! - `home` - 首页：精选想法
//! - `browse_ideas` - 想法列表：按筛选条件过滤
//! - `post_idea_form` / `submit_idea` - 发布想法表单（需要登录）
//!
//! 提交的想法只做校验和日志记录，不写回目录。

use chrono::Utc;
use serde::Serialize;

use super::pages::Page;
use super::routes::Route;
use crate::AppState;
use crate::models::display::IdeaCard;
use crate::models::idea::{Idea, IdeaCategory, IdeaDraft, IdeaStage};
use crate::services::catalog::Catalog;
use crate::services::filter::{CatalogFilter, IdeaFilter, LOCATION_OPTIONS};
use crate::utils::format::format_amount;

/// 首页
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    /// 目录中的前 N 个想法（N 来自设置）
    pub featured: Vec<IdeaCard>,
}

/// 想法列表页
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct IdeasPage {
    pub filter: IdeaFilter,
    pub ideas: Vec<IdeaCard>,
    /// 目录中的想法总数（"Showing X of Y ideas" 中的 Y）
    pub total: usize,
    /// 是否显示 "Clear all filters"
    pub filters_active: bool,
}

/// 发布想法页：表单当前状态 + 下拉框选项
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostIdeaPage {
    pub draft: IdeaDraft,
    pub categories: Vec<IdeaCategory>,
    pub stages: Vec<IdeaStage>,
    pub locations: Vec<&'static str>,
}

/// 生成想法卡片：解析发布者并格式化资金需求
pub fn idea_card(catalog: &Catalog, idea: &Idea) -> IdeaCard {
    IdeaCard {
        idea: idea.clone(),
        creator: catalog.find_user(&idea.creator_id).cloned(),
        funding_label: format_amount(idea.funding_required),
    }
}

pub fn home(state: &AppState) -> HomePage {
    let featured = state
        .catalog
        .ideas()
        .iter()
        .take(state.settings.featured_idea_count)
        .map(|idea| idea_card(&state.catalog, idea))
        .collect();
    HomePage { featured }
}

/// 按筛选条件浏览想法
///
/// 结果保持目录源顺序，不做排序。
pub fn browse_ideas(state: &AppState, filter: &IdeaFilter) -> IdeasPage {
    let ideas = filter
        .apply(state.catalog.ideas())
        .into_iter()
        .map(|idea| idea_card(&state.catalog, idea))
        .collect();

    IdeasPage {
        filter: filter.clone(),
        ideas,
        total: state.catalog.ideas().len(),
        filters_active: filter.is_active(),
    }
}

/// 发布想法表单
///
/// 未登录时重定向到 `/login`。
pub fn post_idea_form(state: &AppState, draft: IdeaDraft) -> Page {
    if !state.session.is_authenticated() {
        return Page::redirect(Route::Login);
    }

    Page::PostIdea(PostIdeaPage {
        draft,
        categories: IdeaCategory::SELECTABLE.to_vec(),
        stages: IdeaStage::ALL.to_vec(),
        locations: LOCATION_OPTIONS.to_vec(),
    })
}

/// 提交想法
///
/// 校验通过后记录日志并跳转到 `/ideas`；想法不会出现在目录中。
///
/// # 错误
/// 标题或描述为空、资金需求不是非负整数时返回错误文本
pub fn submit_idea(state: &AppState, draft: IdeaDraft) -> Result<Page, String> {
    let Some(creator_id) = state.session.current_user_id() else {
        return Ok(Page::redirect(Route::Login));
    };

    let now = Utc::now();
    let idea = draft
        .into_idea(
            format!("idea_{}", now.timestamp_millis()),
            &creator_id,
            now.date_naive(),
        )
        .map_err(|e| e.to_string())?;

    log::info!("提交想法 \"{}\"（{}），未持久化", idea.title, idea.id);
    Ok(Page::redirect(Route::Ideas))
}
