// src/task.rs

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::conflict::{find_conflicts, ConflictPolicy};
use crate::dates::calendar_day;
use crate::error::AppError;
use crate::interval::TaskInterval;
use crate::models::{Notification, Task, TaskPatch, TaskStatus, TaskType};

/// Filters for `GET /api/tasks`. All optional, combined with AND.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    pub assignee: Option<String>,
    pub site_id: Option<String>,
    pub status: Option<TaskStatus>,
    #[serde(rename = "type")]
    pub task_type: Option<TaskType>,
}

impl TaskQuery {
    fn matches(&self, task: &Task) -> bool {
        self.assignee.as_deref().map_or(true, |name| task.is_assigned_to(name))
            && self.site_id.as_deref().map_or(true, |site| task.site_id == site)
            && self.status.map_or(true, |status| task.status == status)
            && self.task_type.map_or(true, |kind| task.task_type == kind)
    }
}

/// `?force=true` confirms a commit that has scheduling conflicts.
#[derive(Debug, Default, Deserialize)]
pub struct ForceQuery {
    #[serde(default)]
    pub force: bool,
}

/// Body of the dry-run conflict check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictCheckRequest {
    pub assignees: Vec<String>,
    #[serde(with = "calendar_day")]
    pub due_date: NaiveDate,
    #[serde(default, with = "calendar_day::option")]
    pub start_date: Option<NaiveDate>,
    pub exclude_task_id: Option<String>,
    /// Overrides the configured policy for this check only.
    pub ignore_completed_tasks: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ConflictCheckResponse {
    pub conflicts: Vec<String>,
    pub interval: TaskInterval,
}

/// GET /api/tasks
pub async fn list_tasks(
    data: web::Data<AppState>,
    query: web::Query<TaskQuery>,
) -> Result<HttpResponse, AppError> {
    let mut tasks: Vec<Task> = data
        .store
        .list::<Task>()
        .await?
        .into_iter()
        .filter(|t| query.matches(t))
        .collect();
    tasks.sort_by_key(|t| t.due_date);
    Ok(HttpResponse::Ok().json(tasks))
}

/// GET /api/tasks/{task_id}
pub async fn get_task(
    data: web::Data<AppState>,
    task_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let task = data.store.get::<Task>(&task_id).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// POST /api/tasks
pub async fn create_task(
    data: web::Data<AppState>,
    query: web::Query<ForceQuery>,
    payload: web::Json<Task>,
) -> Result<HttpResponse, AppError> {
    let task = data
        .scheduler
        .create_task(&data.store, payload.into_inner(), query.force)
        .await?;
    Ok(HttpResponse::Created().json(task))
}

/// PUT /api/tasks/{task_id}
/// Partial update; omitted fields keep their stored values.
pub async fn update_task(
    data: web::Data<AppState>,
    task_id: web::Path<String>,
    query: web::Query<ForceQuery>,
    payload: web::Json<TaskPatch>,
) -> Result<HttpResponse, AppError> {
    let task = data
        .scheduler
        .update_task(&data.store, &task_id, payload.into_inner(), query.force)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// DELETE /api/tasks/{task_id}
pub async fn delete_task(
    data: web::Data<AppState>,
    task_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    data.store.delete::<Task>(&task_id).await?;
    data.store
        .clear_notification_read(&Notification::id_for(&task_id))
        .await?;
    info!("Task deleted: {}", task_id);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Task deleted" })))
}

/// POST /api/tasks/conflicts
/// Reports who would be double-booked without touching the store.
pub async fn check_conflicts(
    data: web::Data<AppState>,
    payload: web::Json<ConflictCheckRequest>,
) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner();
    let interval = TaskInterval::checked(request.due_date, request.start_date)?;
    let policy = ConflictPolicy {
        ignore_completed_tasks: request
            .ignore_completed_tasks
            .unwrap_or(data.scheduler.policy.ignore_completed_tasks),
    };

    let snapshot = data.store.list::<Task>().await?;
    let conflicts = find_conflicts(
        &request.assignees,
        &interval,
        &snapshot,
        request.exclude_task_id.as_deref(),
        policy,
    );
    Ok(HttpResponse::Ok().json(ConflictCheckResponse { conflicts, interval }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_state, state_with_tasks};
    use crate::models::task::tests::{maintenance, odl};
    use actix_web::{http::StatusCode, test, App};
    use pretty_assertions::assert_eq;

    #[actix_web::test]
    async fn create_and_fetch_task() {
        let state = memory_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::api_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .set_json(serde_json::json!({
                "siteId": "site-1",
                "description": "Elevator routine maintenance",
                "dueDate": "2024-06-10",
                "assignees": ["Mario Rossi"],
                "type": "maintenance"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Task = test::read_body_json(resp).await;
        assert_eq!(created.status, TaskStatus::Pending);

        let req = test::TestRequest::get()
            .uri(&format!("/api/tasks/{}", created.id))
            .to_request();
        let fetched: Task = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    async fn conflicting_create_needs_force() {
        let state = state_with_tasks(vec![maintenance("task-1", "2024-06-10", &["Mario"])]);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::api_routes),
        )
        .await;
        let body = serde_json::json!({
            "siteId": "site-1",
            "description": "Second job",
            "dueDate": "2024-06-10",
            "assignees": ["Mario", "Luca"]
        });

        let req = test::TestRequest::post().uri("/api/tasks").set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["conflicts"], serde_json::json!(["Mario"]));

        let req = test::TestRequest::post()
            .uri("/api/tasks?force=true")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn list_filters_and_sorts_by_due_date() {
        let state = state_with_tasks(vec![
            maintenance("task-1", "2024-06-12", &["Anna"]),
            maintenance("task-2", "2024-06-10", &["Anna"]),
            maintenance("task-3", "2024-06-11", &["Luca"]),
        ]);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::api_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/tasks?assignee=Anna").to_request();
        let tasks: Vec<Task> = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["task-2", "task-1"]);
    }

    #[actix_web::test]
    async fn dry_run_reports_conflicts() {
        let state = state_with_tasks(vec![odl("task-1", "2024-06-01", "2024-06-10", &["Anna"])]);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::api_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/tasks/conflicts")
            .set_json(serde_json::json!({ "assignees": ["Anna"], "dueDate": "2024-06-05" }))
            .to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["conflicts"], serde_json::json!(["Anna"]));

        let req = test::TestRequest::post()
            .uri("/api/tasks/conflicts")
            .set_json(serde_json::json!({
                "assignees": ["Anna"],
                "dueDate": "2024-06-05",
                "excludeTaskId": "task-1"
            }))
            .to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["conflicts"], serde_json::json!([]));

        let req = test::TestRequest::post()
            .uri("/api/tasks/conflicts")
            .set_json(serde_json::json!({
                "assignees": ["Anna"],
                "startDate": "2024-06-09",
                "dueDate": "2024-06-05"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn dry_run_can_count_completed_tasks() {
        let mut done = maintenance("task-1", "2024-06-10", &["Mario"]);
        done.status = TaskStatus::Completed;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_tasks(vec![done])))
                .configure(crate::api_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/tasks/conflicts")
            .set_json(serde_json::json!({ "assignees": ["Mario"], "dueDate": "2024-06-10" }))
            .to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["conflicts"], serde_json::json!([]));

        let req = test::TestRequest::post()
            .uri("/api/tasks/conflicts")
            .set_json(serde_json::json!({
                "assignees": ["Mario"],
                "dueDate": "2024-06-10",
                "ignoreCompletedTasks": false
            }))
            .to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["conflicts"], serde_json::json!(["Mario"]));
    }

    #[actix_web::test]
    async fn missing_task_is_404() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(memory_state()))
                .configure(crate::api_routes),
        )
        .await;
        let req = test::TestRequest::delete().uri("/api/tasks/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
