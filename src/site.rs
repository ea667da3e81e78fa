// src/site.rs

use actix_web::{web, HttpResponse};
use log::info;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::models::{Site, Task};

fn check_site(site: &Site) -> Result<(), AppError> {
    if site.name.trim().is_empty() {
        return Err(AppError::Validation("site name is required".into()));
    }
    if site.address.trim().is_empty() {
        return Err(AppError::Validation("site address is required".into()));
    }
    Ok(())
}

/// Contacts added from the form arrive without ids.
fn fill_contact_ids(site: &mut Site) {
    if let Some(contacts) = site.other_contacts.as_mut() {
        for contact in contacts.iter_mut().filter(|c| c.id.is_empty()) {
            contact.id = Uuid::new_v4().to_string();
        }
    }
}

/// GET /api/sites
pub async fn list_sites(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let sites = data.store.list::<Site>().await?;
    Ok(HttpResponse::Ok().json(sites))
}

/// GET /api/sites/{site_id}
pub async fn get_site(
    data: web::Data<AppState>,
    site_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let site = data.store.get::<Site>(&site_id).await?;
    Ok(HttpResponse::Ok().json(site))
}

/// POST /api/sites
pub async fn create_site(
    data: web::Data<AppState>,
    payload: web::Json<Site>,
) -> Result<HttpResponse, AppError> {
    let mut site = payload.into_inner();
    check_site(&site)?;
    if site.id.trim().is_empty() {
        site.id = Uuid::new_v4().to_string();
    }
    fill_contact_ids(&mut site);

    data.store.insert(&site).await?;
    info!("Site created: {}", site.id);
    Ok(HttpResponse::Created().json(site))
}

/// PUT /api/sites/{site_id}
/// Replaces the whole record; the id comes from the path.
pub async fn update_site(
    data: web::Data<AppState>,
    site_id: web::Path<String>,
    payload: web::Json<Site>,
) -> Result<HttpResponse, AppError> {
    let mut site = payload.into_inner();
    check_site(&site)?;
    site.id = site_id.into_inner();
    fill_contact_ids(&mut site);

    data.store.replace(&site).await?;
    info!("Site updated: {}", site.id);
    Ok(HttpResponse::Ok().json(site))
}

/// DELETE /api/sites/{site_id}
/// Refused while tasks still reference the site.
pub async fn delete_site(
    data: web::Data<AppState>,
    site_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let referencing = data
        .store
        .list::<Task>()
        .await?
        .iter()
        .filter(|t| t.site_id == *site_id)
        .count();
    if referencing > 0 {
        return Err(AppError::Validation(format!(
            "site {} still has {} task(s)",
            site_id, referencing
        )));
    }

    data.store.delete::<Site>(&site_id).await?;
    info!("Site deleted: {}", site_id);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Site deleted" })))
}
