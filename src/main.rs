// src/main.rs

mod app_state;
mod calendar;
mod config;
mod conflict;
mod dashboard_data;
mod dates;
mod error;
mod interval;
mod models;
mod notification;
mod scheduling;
mod site;
mod store;
mod task;
mod user_management;

use actix_cors::Cors;
use actix_web::{http, middleware::Logger, web, App, HttpResponse, HttpServer};
use chrono::Local;
use env_logger::Env;
use log::info;

use crate::app_state::AppState;
use crate::calendar::{get_calendar, get_resource_agenda};
use crate::config::{Config, StoreBackend};
use crate::dashboard_data::{get_dashboard, get_dashboard_card};
use crate::error::AppError;
use crate::notification::{list_notifications, mark_all_read, mark_read};
use crate::site::{create_site, delete_site, get_site, list_sites, update_site};
use crate::store::{seed, MemoryStore, MongoStore, Store};
use crate::task::{check_conflicts, create_task, delete_task, get_task, list_tasks, update_task};
use crate::user_management::{create_user, delete_user, get_user_by_id, list_users, update_user};

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

async fn list_maintenance_activities(
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let activities = data.store.maintenance_activities().await?;
    Ok(HttpResponse::Ok().json(activities))
}

/// Every route of the REST API, mounted under `/api`.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health))
            .route(
                "/maintenance-activities",
                web::get().to(list_maintenance_activities),
            )
            // SITES
            .service(
                web::scope("/sites")
                    .route("", web::get().to(list_sites))
                    .route("", web::post().to(create_site))
                    .route("/{site_id}", web::get().to(get_site))
                    .route("/{site_id}", web::put().to(update_site))
                    .route("/{site_id}", web::delete().to(delete_site)),
            )
            // USERS
            .service(
                web::scope("/users")
                    .route("", web::get().to(list_users))
                    .route("", web::post().to(create_user))
                    .route("/{user_id}", web::get().to(get_user_by_id))
                    .route("/{user_id}", web::put().to(update_user))
                    .route("/{user_id}", web::delete().to(delete_user)),
            )
            // TASKS (the dry-run route must precede "/{task_id}")
            .service(
                web::scope("/tasks")
                    .route("", web::get().to(list_tasks))
                    .route("", web::post().to(create_task))
                    .route("/conflicts", web::post().to(check_conflicts))
                    .route("/{task_id}", web::get().to(get_task))
                    .route("/{task_id}", web::put().to(update_task))
                    .route("/{task_id}", web::delete().to(delete_task)),
            )
            // NOTIFICATIONS
            .service(
                web::scope("/notifications")
                    .route("", web::get().to(list_notifications))
                    .route("/read-all", web::post().to(mark_all_read))
                    .route("/{notification_id}/read", web::post().to(mark_read)),
            )
            // DASHBOARD
            .service(
                web::scope("/dashboard")
                    .route("", web::get().to(get_dashboard))
                    .route("/{card}", web::get().to(get_dashboard_card)),
            )
            // CALENDAR
            .service(
                web::scope("/calendar")
                    .route("", web::get().to(get_calendar))
                    .route("/resources/{name}", web::get().to(get_resource_agenda)),
            ),
    );
}

async fn open_store(config: &Config) -> Result<Store, AppError> {
    match config.store_backend {
        StoreBackend::Mongo => {
            let uri = config
                .mongo_uri
                .as_deref()
                .ok_or_else(|| AppError::Config("MONGO_URI must be set".into()))?;
            Ok(Store::Mongo(MongoStore::init(uri, &config.database_name).await?))
        }
        StoreBackend::Memory if config.seed_demo_data => {
            info!("Using in-memory store with demo data");
            Ok(Store::Memory(MemoryStore::with_data(seed::demo(
                Local::now().date_naive(),
            ))))
        }
        StoreBackend::Memory => {
            info!("Using empty in-memory store");
            Ok(Store::Memory(MemoryStore::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(std::io::Error::other)?;
    let store = open_store(&config).await.map_err(std::io::Error::other)?;
    let state = AppState::new(store, config.clone());

    info!("Server running at http://{}:{}", config.bind_addr, config.port);
    info!("Allowed CORS Origin: {}", config.frontend_origin);
    info!(
        "Conflict mode: {:?}, ignore completed tasks: {}",
        config.conflict_mode, config.conflict_policy.ignore_completed_tasks
    );

    let frontend_origin = config.frontend_origin.clone();
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![http::header::CONTENT_TYPE, http::header::ACCEPT])
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(api_routes)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
