// src/conflict.rs
//
// Double-booking detection for task assignments.

use log::debug;
use serde::Deserialize;

use crate::interval::TaskInterval;
use crate::models::Task;

/// Which existing tasks count as occupying their assignees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictPolicy {
    /// Completed tasks no longer keep anyone busy when this is set.
    pub ignore_completed_tasks: bool,
}

impl Default for ConflictPolicy {
    fn default() -> Self {
        Self {
            ignore_completed_tasks: true,
        }
    }
}

impl ConflictPolicy {
    fn occupies(&self, task: &Task) -> bool {
        !(self.ignore_completed_tasks && task.is_completed())
    }
}

/// Return the candidates who already have a task overlapping `interval`.
///
/// `exclude_task_id` is the task being edited, so it never conflicts with
/// itself. Names are reported once each, in candidate order. Assignee
/// matching is exact string comparison: two people sharing a name are
/// indistinguishable here.
pub fn find_conflicts<S: AsRef<str>>(
    candidates: &[S],
    interval: &TaskInterval,
    tasks: &[Task],
    exclude_task_id: Option<&str>,
    policy: ConflictPolicy,
) -> Vec<String> {
    let mut conflicted: Vec<String> = Vec::new();

    for candidate in candidates {
        let name = candidate.as_ref();
        if conflicted.iter().any(|c| c == name) {
            continue;
        }

        let clash = tasks
            .iter()
            .filter(|task| Some(task.id.as_str()) != exclude_task_id)
            .filter(|task| policy.occupies(task))
            .filter(|task| task.is_assigned_to(name))
            .find(|task| TaskInterval::for_task(task).overlaps(interval));

        if let Some(task) = clash {
            debug!("{} is already busy with task {}", name, task.id);
            conflicted.push(name.to_string());
        }
    }

    conflicted
}
