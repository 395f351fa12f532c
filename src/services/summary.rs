//! List-level summary aggregation.
//!
//! List identity, creator and timestamps come from the first task only; the
//! remaining fields are computed across every task in the snapshot.

use crate::models::dashboard::DashboardSummary;
use crate::models::task::{Task, TaskSnapshot};
use crate::services::tally::Tally;

/// Deep link prefix for opening an item in the ClickUp web app.
const CLICKUP_APP_URL: &str = "https://app.clickup.com/t";

/// Build the dashboard summary for one fetched list.
pub fn summarize(snapshot: TaskSnapshot) -> DashboardSummary {
    let first = snapshot.first();
    let tasks = snapshot.tasks();

    warn_on_checklist_drift(tasks);

    let status: Tally = tasks.iter().map(|t| t.status.status.as_str()).collect();
    let priority: Tally = tasks
        .iter()
        .filter_map(|t| t.priority.as_ref())
        .map(|p| p.priority.as_str())
        .filter(|name| !name.is_empty())
        .collect();

    let summary = DashboardSummary {
        list_id: first.list.id.clone(),
        display_name: format!("{} ({} tasks)", first.list.name, snapshot.task_count()),
        // A snapshot is never empty, so there is always a status to pick.
        status: status.most_common().unwrap_or_default().to_string(),
        priority: priority.most_common().map(str::to_string),
        assignees: unique_assignees(tasks),
        time_estimate: tasks.iter().map(|t| t.time_estimate.unwrap_or(0)).sum(),
        time_spent: tasks.iter().map(|t| t.time_spent.unwrap_or(0)).sum(),
        due_date: None,
        creator: first.creator.username.clone(),
        date_created: first.date_created.clone(),
        date_updated: first.date_updated.clone(),
        tags: Vec::new(),
        url: format!("{CLICKUP_APP_URL}/{}", first.list.id),
        tasks: Vec::new(),
    };

    tracing::debug!(
        list_id = %summary.list_id,
        task_count = snapshot.task_count(),
        status = %summary.status,
        assignees = summary.assignees.len(),
        "Summarized task list"
    );

    DashboardSummary {
        tasks: snapshot.into_tasks(),
        ..summary
    }
}

/// Task-level assignee usernames, deduplicated in first-seen order.
fn unique_assignees(tasks: &[Task]) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for assignee in tasks.iter().flat_map(|t| &t.assignees) {
        if !seen.contains(&assignee.username) {
            seen.push(assignee.username.clone());
        }
    }
    seen
}

fn warn_on_checklist_drift(tasks: &[Task]) {
    for task in tasks {
        for checklist in &task.checklists {
            if !checklist.items.is_empty() && !checklist.counts_match_items() {
                tracing::warn!(
                    task_id = %task.id,
                    checklist_id = %checklist.id,
                    resolved = checklist.resolved,
                    unresolved = checklist.unresolved,
                    items = checklist.items.len(),
                    "Checklist counters disagree with its items"
                );
            }
        }
    }
}
