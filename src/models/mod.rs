//! Upstream task payloads and the dashboard records derived from them.

pub mod dashboard;
pub mod task;
