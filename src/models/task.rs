//! ClickUp task payloads as returned by `GET /list/{list_id}/task`.
//!
//! Only the fields the dashboard reads are modelled; anything else in the
//! upstream JSON is ignored. Fields ClickUp always sends are required so a
//! malformed payload fails to decode instead of being filled with defaults.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A ClickUp account as embedded in tasks and checklist items.
///
/// Aggregation keys on `username`, so two accounts sharing a display name
/// are counted as one. Members without a display name come back with a
/// null username, kept here as an empty string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, rename = "profilePicture")]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Status {
    #[serde(default)]
    pub id: Option<String>,
    pub status: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Priority {
    #[serde(default)]
    pub id: Option<String>,
    pub priority: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub tag_fg: Option<String>,
    #[serde(default)]
    pub tag_bg: Option<String>,
}

/// A single subtask line inside a checklist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItem {
    pub id: String,
    pub name: String,
    pub resolved: bool,
    #[serde(default)]
    pub assignee: Option<User>,
}

/// A named group of subtask items attached to a task.
///
/// `resolved` and `unresolved` are precomputed by ClickUp and are used as-is
/// for every completion metric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Checklist {
    pub id: String,
    pub name: String,
    pub resolved: u32,
    pub unresolved: u32,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl Checklist {
    /// Total number of subtasks according to the upstream counters.
    pub fn total(&self) -> u64 {
        u64::from(self.resolved) + u64::from(self.unresolved)
    }

    /// Whether the upstream counters agree with the item flags.
    pub fn counts_match_items(&self) -> bool {
        let resolved = self.items.iter().filter(|item| item.resolved).count();
        let unresolved = self.items.len() - resolved;
        resolved == self.resolved as usize && unresolved == self.unresolved as usize
    }
}

/// Back-reference to the list a task lives in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub access: Option<bool>,
}

/// One ClickUp work item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: Status,
    #[serde(default)]
    pub priority: Option<Priority>,
    pub creator: User,
    #[serde(default)]
    pub assignees: Vec<User>,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub date_created: String,
    pub date_updated: String,
    #[serde(default)]
    pub due_date: Option<String>,
    /// Milliseconds.
    #[serde(default)]
    pub time_estimate: Option<u64>,
    /// Milliseconds.
    #[serde(default)]
    pub time_spent: Option<u64>,
    pub url: String,
    pub list: ListRef,
}

impl Task {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_epoch_millis(&self.date_created)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        parse_epoch_millis(&self.date_updated)
    }

    /// Resolved and total subtask counts summed across this task's checklists.
    pub fn checklist_counts(&self) -> (u64, u64) {
        self.checklists.iter().fold((0, 0), |(resolved, total), cl| {
            (resolved + u64::from(cl.resolved), total + cl.total())
        })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// ClickUp encodes timestamps as stringified epoch milliseconds.
fn parse_epoch_millis(raw: &str) -> Option<DateTime<Utc>> {
    let millis: i64 = raw.trim().parse().ok()?;
    Utc.timestamp_millis_opt(millis).single()
}

/// Body of a successful task-list response.
#[derive(Debug, Deserialize)]
pub struct TasksResponse {
    #[serde(default)]
    pub tasks: Option<Vec<Task>>,
}

/// The tasks of one list from a single fetch. Never empty.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct TaskSnapshot(Vec<Task>);

impl TaskSnapshot {
    /// Wrap a fetched batch, rejecting an empty one.
    pub fn new(tasks: Vec<Task>) -> Option<Self> {
        if tasks.is_empty() {
            None
        } else {
            Some(Self(tasks))
        }
    }

    /// The task used as the representative for list-level fields.
    pub fn first(&self) -> &Task {
        &self.0[0]
    }

    pub fn tasks(&self) -> &[Task] {
        &self.0
    }

    pub fn task_count(&self) -> usize {
        self.0.len()
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.0
    }
}


#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::fixtures::*;
    use super::*;

    #[test]
    fn parses_sample_response() {
        let data = include_bytes!("../../tests/fixtures/clickup_tasks.json");
        let response: TasksResponse = serde_json::from_slice(data).unwrap();
        let tasks = response.tasks.unwrap();
        assert_eq!(tasks.len(), 4);

        let first = &tasks[0];
        assert_eq!(first.list.name, "Website Relaunch");
        assert_eq!(first.status.status, "in progress");
        assert_eq!(first.priority.as_ref().unwrap().priority, "high");
        assert_eq!(first.assignees.len(), 2);
        assert_eq!(first.checklists[0].items.len(), 4);
        assert_eq!(first.time_estimate, Some(7_200_000));
        assert_eq!(first.tags[0].name, "frontend");
    }

    #[test]
    fn optional_fields_default() {
        let t = task("t1", "open");
        assert!(t.priority.is_none());
        assert!(t.assignees.is_empty());
        assert!(t.checklists.is_empty());
        assert!(t.time_estimate.is_none());
        assert!(t.description.is_none());
    }

    #[test]
    fn missing_required_field_fails() {
        let mut value = task_json("t1", "open");
        value.as_object_mut().unwrap().remove("status");
        assert!(serde_json::from_value::<Task>(value).is_err());
    }

    #[test]
    fn null_priority_is_none() {
        let mut value = task_json("t1", "open");
        value["priority"] = Value::Null;
        let t: Task = serde_json::from_value(value).unwrap();
        assert!(t.priority.is_none());
    }

    #[test]
    fn parses_epoch_millis_timestamps() {
        let t = task("t1", "open");
        let created = t.created_at().unwrap();
        assert_eq!(created.timestamp_millis(), 1_700_000_000_000);
        assert!(t.updated_at().unwrap() > created);
    }

    #[test]
    fn unparseable_timestamp_is_none() {
        let mut t = task("t1", "open");
        t.date_created = "yesterday".to_string();
        assert!(t.created_at().is_none());
    }

    #[test]
    fn checklist_count_consistency() {
        let mut cl = checklist(1, 1);
        cl.items = vec![
            ChecklistItem {
                id: "a".to_string(),
                name: "a".to_string(),
                resolved: true,
                assignee: None,
            },
            ChecklistItem {
                id: "b".to_string(),
                name: "b".to_string(),
                resolved: false,
                assignee: None,
            },
        ];
        assert!(cl.counts_match_items());
        assert_eq!(cl.total(), 2);

        cl.resolved = 2;
        assert!(!cl.counts_match_items());
    }

    #[test]
    fn checklist_total_does_not_overflow() {
        let cl = checklist(u32::MAX, u32::MAX);
        assert_eq!(cl.total(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn null_username_decodes_as_empty() {
        let data = include_bytes!("../../tests/fixtures/clickup_tasks.json");
        let mut value: Value = serde_json::from_slice(data).unwrap();
        value["tasks"][0]["checklists"][0]["items"][0]["assignee"] =
            serde_json::json!({ "id": 5, "username": null });
        value["tasks"][1]["creator"] = serde_json::json!({ "id": 6 });

        let response: TasksResponse = serde_json::from_value(value).unwrap();
        let tasks = response.tasks.unwrap();
        let assignee = tasks[0].checklists[0].items[0].assignee.as_ref().unwrap();
        assert_eq!(assignee.id, 5);
        assert_eq!(assignee.username, "");
        assert_eq!(tasks[1].creator.username, "");
    }

    #[test]
    fn task_checklist_counts_sum_all_checklists() {
        let mut t = task("t1", "open");
        t.checklists = vec![checklist(2, 2), checklist(1, 3)];
        assert_eq!(t.checklist_counts(), (3, 8));
    }

    #[test]
    fn snapshot_rejects_empty() {
        assert!(TaskSnapshot::new(Vec::new()).is_none());
        let snapshot = TaskSnapshot::new(vec![task("a", "open"), task("b", "done")]).unwrap();
        assert_eq!(snapshot.task_count(), 2);
        assert_eq!(snapshot.first().id, "a");
    }
}
