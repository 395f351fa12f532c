//! Chart series derived from the raw task list.
//!
//! Every function here takes the full task slice retained on the summary and
//! recomputes from scratch; nothing is read back from the summary fields.

use crate::models::dashboard::{
    AssigneeWorkload, ChecklistOverview, DashboardReport, DashboardSummary, DistributionEntry,
    TaskProgress,
};
use crate::models::task::Task;
use crate::services::tally::Tally;

pub const NO_PRIORITY: &str = "No Priority";
pub const UNASSIGNED: &str = "Unassigned";

const FALLBACK_STATUS_COLOR: &str = "#3b82f6";
const NO_PRIORITY_COLOR: &str = "#9ca3af";
const PRIORITY_COLOR: &str = "#ef4444";
const COMPLETED_COLOR: &str = "#10b981";
const IN_PROGRESS_COLOR: &str = "#f59e0b";

/// Task counts per status name, colored from the first task carrying it.
pub fn status_distribution(tasks: &[Task]) -> Vec<DistributionEntry> {
    let tally: Tally = tasks.iter().map(|t| t.status.status.as_str()).collect();
    tally
        .into_entries()
        .into_iter()
        .map(|(label, count)| {
            let color = tasks
                .iter()
                .find(|t| t.status.status == label)
                .map(|t| t.status.color.as_str())
                .filter(|color| !color.is_empty())
                .unwrap_or(FALLBACK_STATUS_COLOR)
                .to_string();
            DistributionEntry {
                label,
                count,
                color,
            }
        })
        .collect()
}

/// Task counts per priority name. `"No Priority"` always leads the series,
/// even at zero, and also collects priorities with a blank name.
pub fn priority_distribution(tasks: &[Task]) -> Vec<DistributionEntry> {
    let mut tally = Tally::new();
    tally.seed(NO_PRIORITY);
    for task in tasks {
        let label = task
            .priority
            .as_ref()
            .map(|p| p.priority.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(NO_PRIORITY);
        tally.increment(label);
    }

    tally
        .into_entries()
        .into_iter()
        .map(|(label, count)| {
            let color = if label == NO_PRIORITY {
                NO_PRIORITY_COLOR
            } else {
                PRIORITY_COLOR
            };
            DistributionEntry {
                label,
                count,
                color: color.to_string(),
            }
        })
        .collect()
}

/// Assignments per username. A task with several assignees counts once for
/// each; a task with none counts once toward `"Unassigned"`.
pub fn assignee_workload(tasks: &[Task]) -> Vec<AssigneeWorkload> {
    let mut tally = Tally::new();
    tally.seed(UNASSIGNED);
    for task in tasks {
        if task.assignees.is_empty() {
            tally.increment(UNASSIGNED);
        } else {
            for assignee in &task.assignees {
                tally.increment(&assignee.username);
            }
        }
    }

    tally
        .into_entries()
        .into_iter()
        .map(|(label, value)| AssigneeWorkload { label, value })
        .collect()
}

/// Completed vs. open checklist items across all tasks; empty slices dropped.
pub fn subtask_status(tasks: &[Task]) -> Vec<DistributionEntry> {
    let (completed, total) = pooled_counts(tasks);
    [
        ("Completed", completed, COMPLETED_COLOR),
        ("In Progress", total - completed, IN_PROGRESS_COLOR),
    ]
    .into_iter()
    .filter(|(_, count, _)| *count > 0)
    .map(|(label, count, color)| DistributionEntry {
        label: label.to_string(),
        count,
        color: color.to_string(),
    })
    .collect()
}

/// Progress of every task that has at least one checklist.
pub fn task_progress(tasks: &[Task]) -> Vec<TaskProgress> {
    tasks
        .iter()
        .filter(|t| !t.checklists.is_empty())
        .map(|t| {
            let (resolved, total) = t.checklist_counts();
            TaskProgress {
                task_id: t.id.clone(),
                task_name: t.name.clone(),
                resolved,
                total,
                percent: percentage(resolved, total),
            }
        })
        .collect()
}

/// Summed resolved items over summed items, 0 when there are no items.
pub fn pooled_completion(tasks: &[Task]) -> f64 {
    let (resolved, total) = pooled_counts(tasks);
    percentage(resolved, total)
}

/// Mean of each checklist-bearing task's own completion percentage.
///
/// A task whose checklists hold no items contributes 0%. Returns 0 when no
/// task has a checklist.
pub fn average_task_progress(tasks: &[Task]) -> f64 {
    let progress = task_progress(tasks);
    if progress.is_empty() {
        return 0.0;
    }
    progress.iter().map(|p| p.percent).sum::<f64>() / progress.len() as f64
}

/// Checklist-item assignees, unique by username in first-seen order.
///
/// Task-level assignees are not part of this set.
pub fn checklist_contributors(tasks: &[Task]) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    let items = tasks
        .iter()
        .flat_map(|t| &t.checklists)
        .flat_map(|cl| &cl.items);
    for item in items {
        if let Some(assignee) = &item.assignee {
            if !assignee.username.is_empty() && !seen.contains(&assignee.username) {
                seen.push(assignee.username.clone());
            }
        }
    }
    seen
}

pub fn checklist_overview(tasks: &[Task]) -> ChecklistOverview {
    let (completed, total) = pooled_counts(tasks);
    ChecklistOverview {
        task_count: tasks.len() as u64,
        checklist_count: tasks.iter().map(|t| t.checklists.len() as u64).sum(),
        subtask_count: total,
        completed_subtasks: completed,
        tasks_with_checklists: tasks.iter().filter(|t| !t.checklists.is_empty()).count() as u64,
        pooled_completion_pct: percentage(completed, total),
        average_task_progress_pct: average_task_progress(tasks),
    }
}

/// Attach every chart series to a summary, computed from its retained tasks.
pub fn build_report(summary: DashboardSummary) -> DashboardReport {
    let tasks = &summary.tasks;
    let status_distribution = status_distribution(tasks);
    let priority_distribution = priority_distribution(tasks);
    let assignee_workload = assignee_workload(tasks);
    let subtask_status = subtask_status(tasks);
    let checklist_overview = checklist_overview(tasks);
    let task_progress = task_progress(tasks);
    let checklist_contributors = checklist_contributors(tasks);

    DashboardReport {
        summary,
        status_distribution,
        priority_distribution,
        assignee_workload,
        subtask_status,
        checklist_overview,
        task_progress,
        checklist_contributors,
    }
}

fn pooled_counts(tasks: &[Task]) -> (u64, u64) {
    tasks.iter().fold((0, 0), |(resolved, total), t| {
        let (r, n) = t.checklist_counts();
        (resolved + r, total + n)
    })
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
