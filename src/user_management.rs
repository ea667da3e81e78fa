// src/user_management.rs
//
// Resources (people) who can be assigned to tasks. Tasks store assignees by
// name, so a rename is carried over to every task that lists the old name.

use actix_web::{web, HttpResponse};
use log::{info, warn};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::models::{Task, User};

fn check_user(user: &User) -> Result<(), AppError> {
    if user.name.trim().is_empty() {
        return Err(AppError::Validation("user name is required".into()));
    }
    Ok(())
}

async fn ensure_unique_name(data: &AppState, user: &User) -> Result<(), AppError> {
    let users = data.store.list::<User>().await?;
    if users.iter().any(|u| u.id != user.id && u.name == user.name) {
        return Err(AppError::Validation(format!(
            "a user named '{}' already exists",
            user.name
        )));
    }
    Ok(())
}

/// GET /api/users
pub async fn list_users(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = data.store.list::<User>().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// GET /api/users/{user_id}
pub async fn get_user_by_id(
    data: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = data.store.get::<User>(&user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// POST /api/users
pub async fn create_user(
    data: web::Data<AppState>,
    payload: web::Json<User>,
) -> Result<HttpResponse, AppError> {
    let mut user = payload.into_inner();
    user.name = user.name.trim().to_string();
    check_user(&user)?;
    if user.id.trim().is_empty() {
        user.id = Uuid::new_v4().to_string();
    }
    ensure_unique_name(&data, &user).await?;

    data.store.insert(&user).await?;
    info!("User created: {}", user.id);
    Ok(HttpResponse::Created().json(user))
}

/// PUT /api/users/{user_id}
pub async fn update_user(
    data: web::Data<AppState>,
    user_id: web::Path<String>,
    payload: web::Json<User>,
) -> Result<HttpResponse, AppError> {
    let mut user = payload.into_inner();
    user.id = user_id.into_inner();
    user.name = user.name.trim().to_string();
    check_user(&user)?;
    ensure_unique_name(&data, &user).await?;

    // Tasks before the user record, so a failed rename can be retried.
    let previous = data.store.get::<User>(&user.id).await?;
    if previous.name != user.name {
        rename_assignee(&data, &previous.name, &user.name).await?;
    }

    data.store.replace(&user).await?;
    info!("User updated: {}", user.id);
    Ok(HttpResponse::Ok().json(user))
}

async fn rename_assignee(data: &AppState, from: &str, to: &str) -> Result<(), AppError> {
    let tasks = data.store.list::<Task>().await?;
    let mut renamed = 0;
    for mut task in tasks.into_iter().filter(|t| t.is_assigned_to(from)) {
        for name in task.assignees.iter_mut().filter(|n| n.as_str() == from) {
            *name = to.to_string();
        }
        task.normalize();
        data.store.replace(&task).await?;
        renamed += 1;
    }
    if renamed > 0 {
        info!("Renamed assignee '{}' to '{}' on {} task(s)", from, to, renamed);
    }
    Ok(())
}

/// DELETE /api/users/{user_id}
/// Tasks keep the deleted name in their assignee list.
pub async fn delete_user(
    data: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = data.store.get::<User>(&user_id).await?;
    data.store.delete::<User>(&user_id).await?;

    let still_assigned = data
        .store
        .list::<Task>()
        .await?
        .iter()
        .filter(|t| !t.is_completed() && t.is_assigned_to(&user.name))
        .count();
    if still_assigned > 0 {
        warn!(
            "Deleted user '{}' is still assigned to {} open task(s)",
            user.name, still_assigned
        );
    }
    info!("User deleted: {}", user_id);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "User deleted" })))
}
