//! Aggregated dashboard records handed to the presentation layer.

use serde::Serialize;

use crate::models::task::Task;

/// List-level summary built from one fetch.
///
/// `creator`, `date_created` and `date_updated` are copied from the first
/// task rather than aggregated; consumers rely on that exact source.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub list_id: String,
    pub display_name: String,
    pub status: String,
    pub priority: Option<String>,
    pub assignees: Vec<String>,
    /// Milliseconds, missing estimates counted as zero.
    pub time_estimate: u64,
    /// Milliseconds, missing values counted as zero.
    pub time_spent: u64,
    pub due_date: Option<String>,
    pub creator: String,
    pub date_created: String,
    pub date_updated: String,
    pub tags: Vec<String>,
    pub url: String,
    pub tasks: Vec<Task>,
}

/// One bar or slice of a categorical chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistributionEntry {
    pub label: String,
    pub count: u64,
    pub color: String,
}

/// Number of task assignments held by one person (or `"Unassigned"`).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssigneeWorkload {
    pub label: String,
    pub value: u64,
}

/// Checklist progress of a single task.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaskProgress {
    pub task_id: String,
    pub task_name: String,
    pub resolved: u64,
    pub total: u64,
    pub percent: f64,
}

/// Checklist totals across the whole list.
///
/// `pooled_completion_pct` divides summed resolved items by summed items;
/// `average_task_progress_pct` averages each task's own percentage. The two
/// differ whenever tasks carry different numbers of items.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChecklistOverview {
    pub task_count: u64,
    pub checklist_count: u64,
    pub subtask_count: u64,
    pub completed_subtasks: u64,
    pub tasks_with_checklists: u64,
    pub pooled_completion_pct: f64,
    pub average_task_progress_pct: f64,
}

/// Summary plus every chart series derived from the retained tasks.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub summary: DashboardSummary,
    pub status_distribution: Vec<DistributionEntry>,
    pub priority_distribution: Vec<DistributionEntry>,
    pub assignee_workload: Vec<AssigneeWorkload>,
    pub subtask_status: Vec<DistributionEntry>,
    pub checklist_overview: ChecklistOverview,
    pub task_progress: Vec<TaskProgress>,
    pub checklist_contributors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_serialization() {
        let summary = DashboardSummary {
            list_id: "901".to_string(),
            display_name: "Website Relaunch (2 tasks)".to_string(),
            status: "in progress".to_string(),
            priority: None,
            assignees: vec!["alice".to_string()],
            time_estimate: 3_600_000,
            time_spent: 0,
            due_date: None,
            creator: "alice".to_string(),
            date_created: "1717000000000".to_string(),
            date_updated: "1717600000000".to_string(),
            tags: Vec::new(),
            url: "https://app.clickup.com/t/901".to_string(),
            tasks: Vec::new(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["display_name"], "Website Relaunch (2 tasks)");
        assert!(json["priority"].is_null());
        assert!(json["due_date"].is_null());
        assert_eq!(json["tags"].as_array().unwrap().len(), 0);
        assert_eq!(json["time_estimate"], 3_600_000);
    }

    #[test]
    fn distribution_entry_serialization() {
        let entry = DistributionEntry {
            label: "No Priority".to_string(),
            count: 0,
            color: "#9ca3af".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["label"], "No Priority");
        assert_eq!(json["count"], 0);
        assert_eq!(json["color"], "#9ca3af");
    }

    #[test]
    fn workload_serialization() {
        let load = AssigneeWorkload {
            label: "Unassigned".to_string(),
            value: 3,
        };
        let json = serde_json::to_value(&load).unwrap();
        assert_eq!(json["label"], "Unassigned");
        assert_eq!(json["value"], 3);
    }
}
