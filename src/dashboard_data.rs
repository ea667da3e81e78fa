// src/dashboard_data.rs

use actix_web::{web, HttpResponse};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::models::{Task, TaskStatus};

const UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub overdue: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed_this_month: usize,
    pub upcoming: Vec<Task>,
}

/// One of the clickable dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardCard {
    Overdue,
    Pending,
    InProgress,
    Completed,
}

impl DashboardCard {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "overdue" => Some(Self::Overdue),
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    fn includes(self, task: &Task, today: NaiveDate) -> bool {
        match self {
            Self::Overdue => !task.is_completed() && task.due_date < today,
            Self::Pending => task.status == TaskStatus::Pending,
            Self::InProgress => task.status == TaskStatus::InProgress,
            Self::Completed => {
                task.is_completed()
                    && task.due_date.year() == today.year()
                    && task.due_date.month() == today.month()
            }
        }
    }
}

pub fn card_tasks(tasks: &[Task], card: DashboardCard, today: NaiveDate) -> Vec<Task> {
    let mut selected: Vec<Task> = tasks
        .iter()
        .filter(|t| card.includes(t, today))
        .cloned()
        .collect();
    selected.sort_by_key(|t| t.due_date);
    selected
}

pub fn summarize(tasks: &[Task], today: NaiveDate) -> DashboardSummary {
    let count = |card: DashboardCard| tasks.iter().filter(|t| card.includes(t, today)).count();

    let mut upcoming: Vec<Task> = tasks
        .iter()
        .filter(|t| !t.is_completed() && t.due_date >= today)
        .cloned()
        .collect();
    upcoming.sort_by_key(|t| t.due_date);
    upcoming.truncate(UPCOMING_LIMIT);

    DashboardSummary {
        overdue: count(DashboardCard::Overdue),
        pending: count(DashboardCard::Pending),
        in_progress: count(DashboardCard::InProgress),
        completed_this_month: count(DashboardCard::Completed),
        upcoming,
    }
}

/// GET /api/dashboard
pub async fn get_dashboard(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let tasks = data.store.list::<Task>().await?;
    let summary = summarize(&tasks, Local::now().date_naive());
    Ok(HttpResponse::Ok().json(summary))
}

/// GET /api/dashboard/{card}
pub async fn get_dashboard_card(
    data: web::Data<AppState>,
    card: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let card = DashboardCard::parse(&card).ok_or_else(|| {
        AppError::Validation(format!(
            "unknown dashboard card '{}', expected overdue, pending, in_progress or completed",
            card
        ))
    })?;
    let tasks = data.store.list::<Task>().await?;
    Ok(HttpResponse::Ok().json(card_tasks(&tasks, card, Local::now().date_naive())))
}
