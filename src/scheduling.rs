// src/scheduling.rs
//
// Task create/update workflow: build the proposed task, validate it, run the
// conflict check against a fresh snapshot, decide, then persist.

use std::str::FromStr;

use log::{debug, info, warn};
use uuid::Uuid;

use crate::conflict::{find_conflicts, ConflictPolicy};
use crate::error::AppError;
use crate::interval::TaskInterval;
use crate::models::{Site, Task, TaskPatch};
use crate::store::Store;

/// What to do when a proposed assignment double-books someone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictMode {
    /// Refuse unless the caller confirms with `force`.
    Warn,
    /// Always refuse.
    Block,
    /// Skip the check.
    Off,
}

impl FromStr for ConflictMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn" => Ok(Self::Warn),
            "block" => Ok(Self::Block),
            "off" => Ok(Self::Off),
            other => Err(format!("unknown conflict mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    pub mode: ConflictMode,
    pub policy: ConflictPolicy,
}

impl Scheduler {
    pub fn new(mode: ConflictMode, policy: ConflictPolicy) -> Self {
        Self { mode, policy }
    }

    /// Names the proposed task would double-book. A proposed task that is
    /// itself completed occupies nobody when the policy ignores completed
    /// tasks, so it is not checked.
    pub fn conflicts_for(&self, proposed: &Task, snapshot: &[Task], exclude: Option<&str>) -> Vec<String> {
        if self.mode == ConflictMode::Off {
            return Vec::new();
        }
        if self.policy.ignore_completed_tasks && proposed.is_completed() {
            return Vec::new();
        }
        let interval = TaskInterval::for_task(proposed);
        find_conflicts(&proposed.assignees, &interval, snapshot, exclude, self.policy)
    }

    /// Apply the mode to a conflict set. `Ok` carries the conflicts that
    /// were accepted by a forced commit.
    pub fn decide(&self, conflicts: Vec<String>, force: bool) -> Result<Vec<String>, AppError> {
        if conflicts.is_empty() {
            return Ok(conflicts);
        }
        match self.mode {
            ConflictMode::Warn if force => Ok(conflicts),
            ConflictMode::Off => Ok(Vec::new()),
            ConflictMode::Warn | ConflictMode::Block => Err(AppError::Conflict { conflicts }),
        }
    }

    pub async fn create_task(&self, store: &Store, mut task: Task, force: bool) -> Result<Task, AppError> {
        if task.id.trim().is_empty() {
            task.id = Uuid::new_v4().to_string();
        }
        task.normalize();
        check_task(store, &task).await?;

        let snapshot = store.list::<Task>().await?;
        let conflicts = self.conflicts_for(&task, &snapshot, None);
        debug!("Conflict check for new task {}: {:?}", task.id, conflicts);
        let accepted = self.decide(conflicts, force)?;
        if !accepted.is_empty() {
            warn!(
                "Task {} created despite conflicts for {}",
                task.id,
                accepted.join(", ")
            );
        }

        store.insert(&task).await?;
        info!("Task created: {} ({})", task.id, task.status);
        Ok(task)
    }

    pub async fn update_task(
        &self,
        store: &Store,
        task_id: &str,
        patch: TaskPatch,
        force: bool,
    ) -> Result<Task, AppError> {
        let snapshot = store.list::<Task>().await?;
        let mut task = snapshot
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Task", task_id))?;

        task.apply(patch);
        task.normalize();
        check_task(store, &task).await?;

        let conflicts = self.conflicts_for(&task, &snapshot, Some(task_id));
        debug!("Conflict check for task {}: {:?}", task_id, conflicts);
        let accepted = self.decide(conflicts, force)?;
        if !accepted.is_empty() {
            warn!(
                "Task {} updated despite conflicts for {}",
                task_id,
                accepted.join(", ")
            );
        }

        store.replace(&task).await?;
        info!("Task updated: {} ({})", task_id, task.status);
        Ok(task)
    }
}

async fn check_task(store: &Store, task: &Task) -> Result<(), AppError> {
    task.validate()?;
    if !store.exists::<Site>(&task.site_id).await? {
        return Err(AppError::Validation(format!(
            "unknown site '{}'",
            task.site_id
        )));
    }
    Ok(())
}
