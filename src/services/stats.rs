//! # 统计聚合服务
//!
//! 各页面顶部与卡片上的统计数字：
//! - `task_stats` - 工作区任务按状态计数、完成率、工时效率
//! - `member_contributions` - 每个成员的任务贡献
//! - `dashboard_stats` - 仪表盘四项统计
//! - `collaborator_stats` - 协作者页面统计
//! - `workspace_counts` - 工作区页面统计（相对当前用户）
//!
//! 全部为纯函数，输入是目录的只读切片。

use crate::models::display::{
    CollaboratorStats, DashboardStats, MemberContribution, TaskStats, WorkspaceCounts,
};
use crate::models::message::Message;
use crate::models::user::User;
use crate::models::workspace::{Task, TaskStatus, Workspace};
use crate::services::catalog::Catalog;
use crate::services::conversation::{
    ConversationOptions, assemble_conversations, message_count_for,
};
use crate::utils::format::format_total_investment;

/// `completed / total` 的四舍五入百分比；`total == 0` 时为 0
pub fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * completed as f64 / total as f64).round() as u32
}

/// 统计一组任务
///
/// 工时效率为预估工时 / 实际工时，实际工时不足 1 时按 1 计算。
pub fn task_stats(tasks: &[Task]) -> TaskStats {
    let mut stats = TaskStats {
        total: tasks.len(),
        ..Default::default()
    };

    for task in tasks {
        match task.status {
            TaskStatus::Todo => stats.todo += 1,
            TaskStatus::InProgress => stats.in_progress += 1,
            TaskStatus::Completed => stats.completed += 1,
            TaskStatus::OnHold => stats.on_hold += 1,
        }
        stats.estimated_hours += task.estimated_hours;
        stats.actual_hours += task.actual_hours;
    }

    stats.completion_rate = completion_rate(stats.completed, stats.total);
    stats.hours_efficiency = stats.estimated_hours / stats.actual_hours.max(1.0);
    stats
}

/// 工作区每个成员的贡献，按 `members` 顺序
///
/// 成员 id 无法解析时 `member` 为 None，统计照常计算。
pub fn member_contributions(workspace: &Workspace, catalog: &Catalog) -> Vec<MemberContribution> {
    workspace
        .members
        .iter()
        .map(|member_id| {
            let assigned: Vec<&Task> = workspace
                .tasks
                .iter()
                .filter(|t| &t.assigned_to == member_id)
                .collect();
            let completed = assigned
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count();

            MemberContribution {
                member_id: member_id.clone(),
                member: catalog.find_user(member_id).cloned(),
                assigned: assigned.len(),
                completed,
                actual_hours: assigned.iter().map(|t| t.actual_hours).sum(),
                completion_rate: completion_rate(completed, assigned.len()),
            }
        })
        .collect()
}

/// 仪表盘统计
///
/// # 参数
/// - `catalog` - 想法和工作区来源
/// - `messages` - 当前聊天记录（包含本次运行中新发送的消息）
/// - `viewer_id` - 当前登录用户
pub fn dashboard_stats(catalog: &Catalog, messages: &[Message], viewer_id: &str) -> DashboardStats {
    let conversations =
        assemble_conversations(messages, viewer_id, catalog, ConversationOptions::default());

    DashboardStats {
        ideas_posted: catalog.ideas_by_creator(viewer_id).len(),
        workspaces: catalog
            .workspaces()
            .iter()
            .filter(|w| w.is_owner(viewer_id) || w.is_member(viewer_id))
            .count(),
        conversations: conversations.len(),
        messages: message_count_for(messages, viewer_id),
    }
}

/// 协作者页面统计：总人数、投资人数、投资总额
pub fn collaborator_stats(users: &[User]) -> CollaboratorStats {
    let total_investment: u64 = users.iter().map(|u| u.investment).sum();
    CollaboratorStats {
        total: users.len(),
        investors: users.iter().filter(|u| u.is_investor).count(),
        total_investment,
        total_investment_label: format_total_investment(total_investment),
    }
}

/// 工作区页面统计
///
/// 未登录时 owned / member_of 均为 0。
pub fn workspace_counts(workspaces: &[Workspace], viewer_id: Option<&str>) -> WorkspaceCounts {
    let mut counts = WorkspaceCounts {
        total: workspaces.len(),
        ..Default::default()
    };
    let Some(viewer) = viewer_id else {
        return counts;
    };

    for workspace in workspaces {
        if workspace.is_owner(viewer) {
            counts.owned += 1;
        } else if workspace.is_member(viewer) {
            counts.member_of += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn seed() -> Catalog {
        Catalog::seed().unwrap()
    }

    #[test]
    fn test_completion_rate_rounding() {
        assert_eq!(completion_rate(0, 0), 0);
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(1, 2), 50);
        assert_eq!(completion_rate(4, 4), 100);
    }

    #[test]
    fn test_task_stats_for_workspace1() {
        let catalog = seed();
        let ws = catalog.find_workspace("workspace1").unwrap();
        let stats = task_stats(&ws.tasks);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.todo, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.on_hold, 0);
        assert_eq!(stats.completion_rate, 33);
        assert_eq!(stats.estimated_hours, 190.0);
        assert_eq!(stats.actual_hours, 60.0);
        assert!((stats.hours_efficiency - 190.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_tasks() {
        let stats = task_stats(&[]);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.hours_efficiency, 0.0);
    }

    #[test]
    fn test_efficiency_floors_actual_hours_at_one() {
        let catalog = seed();
        let mut tasks = catalog.find_workspace("workspace1").unwrap().tasks.clone();

        for actual in [0.0, 0.5] {
            for (i, task) in tasks.iter_mut().enumerate() {
                task.actual_hours = if i == 0 { actual } else { 0.0 };
            }
            let stats = task_stats(&tasks);
            assert_eq!(stats.estimated_hours, 190.0);
            assert_eq!(stats.actual_hours, actual);
            assert_eq!(stats.hours_efficiency, 190.0 / 1.0);
        }
    }

    #[test]
    fn test_member_contributions() {
        let catalog = seed();
        let ws = catalog.find_workspace("workspace1").unwrap();
        let contributions = member_contributions(ws, &catalog);
        assert_eq!(contributions.len(), 2);

        let aarav = &contributions[0];
        assert_eq!(aarav.member_id, "user1");
        assert_eq!(aarav.assigned, 1);
        assert_eq!(aarav.completed, 0);
        assert_eq!(aarav.completion_rate, 0);

        let neha = &contributions[1];
        assert_eq!(neha.member.as_ref().unwrap().name, "Neha Mehta");
        assert_eq!(neha.assigned, 2);
        assert_eq!(neha.completed, 1);
        assert_eq!(neha.actual_hours, 60.0);
        assert_eq!(neha.completion_rate, 50);
    }

    #[test]
    fn test_dashboard_stats_for_user1() {
        let catalog = seed();
        let stats = dashboard_stats(&catalog, catalog.messages(), "user1");
        assert_eq!(
            stats,
            DashboardStats {
                ideas_posted: 1,
                workspaces: 2,
                conversations: 1,
                messages: 4,
            }
        );
    }

    #[test]
    fn test_collaborator_stats() {
        let catalog = seed();
        let stats = collaborator_stats(catalog.users());
        assert_eq!(stats.total, 5);
        assert_eq!(stats.investors, 3);
        assert_eq!(stats.total_investment, 500_000);
        assert_eq!(stats.total_investment_label, "₹5.0L+");
    }

    #[test]
    fn test_workspace_counts() {
        let catalog = seed();
        assert_eq!(
            workspace_counts(catalog.workspaces(), Some("user1")),
            WorkspaceCounts {
                total: 3,
                owned: 1,
                member_of: 1,
            }
        );
        assert_eq!(
            workspace_counts(catalog.workspaces(), None),
            WorkspaceCounts {
                total: 3,
                owned: 0,
                member_of: 0,
            }
        );
    }
}
