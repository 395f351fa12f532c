//! One-shot dashboard snapshot for a ClickUp list.
//!
//! Usage: `cargo run --bin snapshot -- <LIST_ID> [--json]`
//!
//! Requires `CLICKUP_API_KEY` (reads .env). Honors `CLICKUP_API_BASE_URL`
//! and `CLICKUP_TIMEOUT_SECS` like the server.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wingman::config::AppConfig;
use wingman::models::dashboard::DashboardReport;
use wingman::services::clickup::ClickUpClient;
use wingman::services::{distribution, summary};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "wingman=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut list_id = None;
    let mut as_json = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => as_json = true,
            _ => list_id = Some(arg),
        }
    }
    let Some(list_id) = list_id else {
        anyhow::bail!("usage: snapshot <LIST_ID> [--json]");
    };

    let config = AppConfig::from_env();
    let credential = config.clickup_api_key.clone().unwrap_or_default();
    let client = ClickUpClient::from_config(&config)?;

    let snapshot = client
        .fetch_tasks(&list_id, &credential)
        .await
        .with_context(|| format!("Error loading list {list_id}"))?;

    let report = distribution::build_report(summary::summarize(snapshot));

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &DashboardReport) {
    let summary = &report.summary;
    println!("=== {} ===", summary.display_name);
    println!("Open in ClickUp: {}", summary.url);
    println!("Overall status:  {}", summary.status);
    println!(
        "Top priority:    {}",
        summary.priority.as_deref().unwrap_or("none")
    );
    println!("Creator:         {}", summary.creator);
    if let Some(created) = summary.tasks.first().and_then(|t| t.created_at()) {
        println!("Created:         {}", created.format("%Y-%m-%d"));
    }
    println!(
        "Time:            {} estimated / {} spent",
        hours(summary.time_estimate),
        hours(summary.time_spent)
    );
    println!("Assignees:       {}", summary.assignees.join(", "));

    println!("\nStatus");
    for entry in &report.status_distribution {
        println!("  {:<20} {:>4}  {}", entry.label, entry.count, entry.color);
    }

    println!("\nPriority");
    for entry in &report.priority_distribution {
        println!("  {:<20} {:>4}", entry.label, entry.count);
    }

    println!("\nWorkload");
    for load in &report.assignee_workload {
        println!("  {:<20} {:>4}", load.label, load.value);
    }

    let overview = &report.checklist_overview;
    println!("\nChecklists");
    println!(
        "  {} of {} subtasks done across {} checklists",
        overview.completed_subtasks, overview.subtask_count, overview.checklist_count
    );
    println!(
        "  completion {:.0}%, average task progress {:.0}%",
        overview.pooled_completion_pct, overview.average_task_progress_pct
    );
    for progress in &report.task_progress {
        println!(
            "  {:<30} {}/{} ({:.0}%)",
            progress.task_name, progress.resolved, progress.total, progress.percent
        );
    }
    println!(
        "  contributors: {}",
        if report.checklist_contributors.is_empty() {
            "No assignments".to_string()
        } else {
            report.checklist_contributors.join(", ")
        }
    );
}

/// Milliseconds as hours with one decimal, `N/A` for zero.
fn hours(millis: u64) -> String {
    if millis == 0 {
        return "N/A".to_string();
    }
    format!("{:.1}h", millis as f64 / 3_600_000.0)
}
