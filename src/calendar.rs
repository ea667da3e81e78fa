// src/calendar.rs
//
// Range queries behind the calendar, Gantt and site-matrix views.

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::app_state::AppState;
use crate::dates::calendar_day;
use crate::error::AppError;
use crate::interval::TaskInterval;
use crate::models::Task;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarQuery {
    #[serde(with = "calendar_day")]
    pub from: NaiveDate,
    #[serde(with = "calendar_day")]
    pub to: NaiveDate,
    pub assignee: Option<String>,
    pub site_id: Option<String>,
}

/// Tasks whose occupancy overlaps the day range `[from, to]`, ordered by
/// first day then due date.
pub fn tasks_in_range(
    tasks: &[Task],
    from: NaiveDate,
    to: NaiveDate,
    assignee: Option<&str>,
    site_id: Option<&str>,
) -> Vec<Task> {
    let window = TaskInterval::days(from, to);
    let mut selected: Vec<Task> = tasks
        .iter()
        .filter(|t| assignee.map_or(true, |name| t.is_assigned_to(name)))
        .filter(|t| site_id.map_or(true, |site| t.site_id == site))
        .filter(|t| TaskInterval::for_task(t).overlaps(&window))
        .cloned()
        .collect();
    selected.sort_by_key(|t| (t.start_date.unwrap_or(t.due_date), t.due_date));
    selected
}

/// GET /api/calendar?from=&to=
pub async fn get_calendar(
    data: web::Data<AppState>,
    query: web::Query<CalendarQuery>,
) -> Result<HttpResponse, AppError> {
    if query.from > query.to {
        return Err(AppError::InvalidInterval {
            start: query.from,
            due: query.to,
        });
    }
    let tasks = data.store.list::<Task>().await?;
    Ok(HttpResponse::Ok().json(tasks_in_range(
        &tasks,
        query.from,
        query.to,
        query.assignee.as_deref(),
        query.site_id.as_deref(),
    )))
}

/// GET /api/calendar/resources/{name}
/// Everything assigned to one person, in start order.
pub async fn get_resource_agenda(
    data: web::Data<AppState>,
    name: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let mut tasks: Vec<Task> = data
        .store
        .list::<Task>()
        .await?
        .into_iter()
        .filter(|t| t.is_assigned_to(&name))
        .collect();
    tasks.sort_by_key(|t| TaskInterval::for_task(t).start);
    Ok(HttpResponse::Ok().json(tasks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::tests::{day, maintenance, odl};
    use crate::test_support::state_with_tasks;
    use actix_web::{http::StatusCode, test, App};
    use pretty_assertions::assert_eq;

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[::core::prelude::v1::test]
    fn range_includes_spanning_work_orders() {
        let tasks = vec![
            odl("long", "2024-05-28", "2024-06-03", &["Anna"]),
            maintenance("inside", "2024-06-02", &["Luca"]),
            maintenance("after", "2024-06-08", &["Anna"]),
        ];
        let found = tasks_in_range(&tasks, day("2024-06-01"), day("2024-06-07"), None, None);
        assert_eq!(ids(&found), vec!["long", "inside"]);

        let annas = tasks_in_range(&tasks, day("2024-06-01"), day("2024-06-30"), Some("Anna"), None);
        assert_eq!(ids(&annas), vec!["long", "after"]);
    }

    #[actix_web::test]
    async fn calendar_endpoint_validates_range() {
        let state = state_with_tasks(vec![maintenance("task-1", "2024-06-10", &["Anna"])]);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::api_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/calendar?from=2024-06-01&to=2024-06-30&siteId=site-1")
            .to_request();
        let tasks: Vec<Task> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids(&tasks), vec!["task-1"]);

        let req = test::TestRequest::get()
            .uri("/api/calendar?from=2024-06-30&to=2024-06-01")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let req = test::TestRequest::get()
            .uri("/api/calendar/resources/Anna")
            .to_request();
        let tasks: Vec<Task> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids(&tasks), vec!["task-1"]);
    }
}
