use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dates::calendar_day;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Odl` tasks are work orders: they carry an order number and may span
/// several days starting at `start_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    #[default]
    Maintenance,
    Odl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    pub site_id: String,
    pub description: String,
    #[serde(with = "calendar_day")]
    pub due_date: NaiveDate,
    #[serde(
        default,
        with = "calendar_day::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: TaskStatus,
    pub assignees: Vec<String>,
    #[serde(rename = "type", default)]
    pub task_type: TaskType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odl_number: Option<String>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn is_assigned_to(&self, name: &str) -> bool {
        self.assignees.iter().any(|a| a == name)
    }

    /// Trim free-text fields and drop blank or repeated assignees.
    pub fn normalize(&mut self) {
        self.description = self.description.trim().to_string();
        let mut seen = Vec::with_capacity(self.assignees.len());
        for name in self.assignees.drain(..) {
            let name = name.trim().to_string();
            if !name.is_empty() && !seen.contains(&name) {
                seen.push(name);
            }
        }
        self.assignees = seen;
        if let Some(number) = &self.odl_number {
            let number = number.trim();
            self.odl_number = (!number.is_empty()).then(|| number.to_string());
        }
    }

    /// Field-level checks applied before a task is scheduled. Site existence
    /// is checked by the workflow, which has the store at hand.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.site_id.trim().is_empty() {
            return Err(AppError::Validation("siteId is required".into()));
        }
        if self.description.is_empty() {
            return Err(AppError::Validation("description is required".into()));
        }
        if self.assignees.is_empty() {
            return Err(AppError::Validation(
                "at least one assignee is required".into(),
            ));
        }
        match self.task_type {
            TaskType::Maintenance => {
                if self.start_date.is_some() {
                    return Err(AppError::Validation(
                        "startDate only applies to odl tasks".into(),
                    ));
                }
                if self.odl_number.is_some() {
                    return Err(AppError::Validation(
                        "odlNumber only applies to odl tasks".into(),
                    ));
                }
            }
            TaskType::Odl => {
                if self.odl_number.is_none() {
                    return Err(AppError::Validation(
                        "odlNumber is required for odl tasks".into(),
                    ));
                }
            }
        }
        if let Some(start) = self.start_date {
            if start > self.due_date {
                return Err(AppError::InvalidInterval {
                    start,
                    due: self.due_date,
                });
            }
        }
        Ok(())
    }

    /// Overlay a partial update. `id` never changes.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(site_id) = patch.site_id {
            self.site_id = site_id;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(assignees) = patch.assignees {
            self.assignees = assignees;
        }
        if let Some(task_type) = patch.task_type {
            self.task_type = task_type;
        }
        if let Some(odl_number) = patch.odl_number {
            self.odl_number = odl_number;
        }
    }
}

/// Partial update body for `PUT /api/tasks/{id}`.
///
/// Nullable fields use `Option<Option<_>>`: absent leaves the stored value,
/// `null` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub site_id: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "calendar_day::option")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "calendar_day::patch::deserialize")]
    pub start_date: Option<Option<NaiveDate>>,
    pub status: Option<TaskStatus>,
    pub assignees: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub task_type: Option<TaskType>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub odl_number: Option<Option<String>>,
}

fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
