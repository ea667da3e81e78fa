// src/notification.rs
//
// Due-date reminders for open tasks: overdue ones, and those falling inside
// the imminent window starting today.

use std::collections::HashSet;

use actix_web::{web, HttpResponse};
use chrono::{Local, NaiveDate};
use log::info;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::models::{Notification, NotificationKind, Task};

fn imminent_message(days_until_due: i64, description: &str) -> String {
    match days_until_due {
        0 => format!("Due today: {}", description),
        1 => format!("Due tomorrow: {}", description),
        n => format!("Due in {} days: {}", n, description),
    }
}

/// Build the reminder list as of `today`. Unread first, then by due date.
pub fn build_notifications(
    tasks: &[Task],
    today: NaiveDate,
    window_days: i64,
    read_ids: &HashSet<String>,
) -> Vec<Notification> {
    let mut notifications: Vec<Notification> = tasks
        .iter()
        .filter(|task| !task.is_completed())
        .filter_map(|task| {
            let days_until_due = (task.due_date - today).num_days();
            let (kind, days, message) = if days_until_due < 0 {
                (
                    NotificationKind::Overdue,
                    None,
                    format!("Overdue: {}", task.description),
                )
            } else if days_until_due < window_days {
                (
                    NotificationKind::Imminent,
                    Some(days_until_due),
                    imminent_message(days_until_due, &task.description),
                )
            } else {
                return None;
            };

            let id = Notification::id_for(&task.id);
            Some(Notification {
                read: read_ids.contains(&id),
                id,
                task_id: task.id.clone(),
                kind,
                days_until_due: days,
                message,
                task: task.clone(),
            })
        })
        .collect();

    notifications.sort_by(|a, b| {
        a.read
            .cmp(&b.read)
            .then_with(|| a.task.due_date.cmp(&b.task.due_date))
    });
    notifications
}

async fn current_notifications(data: &AppState) -> Result<Vec<Notification>, AppError> {
    let tasks = data.store.list::<Task>().await?;
    let read_ids = data.store.read_notification_ids().await?;
    let today = Local::now().date_naive();
    Ok(build_notifications(
        &tasks,
        today,
        data.config.imminent_window_days,
        &read_ids,
    ))
}

/// GET /api/notifications
pub async fn list_notifications(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let notifications = current_notifications(&data).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

/// POST /api/notifications/{notification_id}/read
pub async fn mark_read(
    data: web::Data<AppState>,
    notification_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = notification_id.into_inner();
    let known = current_notifications(&data)
        .await?
        .iter()
        .any(|n| n.id == id);
    if !known {
        return Err(AppError::not_found("Notification", id));
    }
    data.store.mark_notifications_read(&[id.clone()]).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "id": id, "read": true })))
}

/// POST /api/notifications/read-all
pub async fn mark_all_read(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let ids: Vec<String> = current_notifications(&data)
        .await?
        .into_iter()
        .filter(|n| !n.read)
        .map(|n| n.id)
        .collect();
    data.store.mark_notifications_read(&ids).await?;
    info!("Marked {} notification(s) read", ids.len());
    Ok(HttpResponse::Ok().json(serde_json::json!({ "marked": ids.len() })))
}
