use serde::{Deserialize, Serialize};

use super::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Overdue,
    Imminent,
}

/// A due-date reminder derived from an open task. Never stored; only the
/// read flag is persisted, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub task_id: String,
    pub kind: NotificationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_due: Option<i64>,
    pub message: String,
    pub read: bool,
    pub task: Task,
}

impl Notification {
    pub fn id_for(task_id: &str) -> String {
        format!("notif-{}", task_id)
    }
}
