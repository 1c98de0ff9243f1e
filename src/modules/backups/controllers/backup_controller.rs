use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::backups::services::BackupService;

/// GET /backups
pub async fn list_backups(
    service: web::Data<Arc<BackupService>>,
) -> Result<HttpResponse, AppError> {
    let backups = service.list().await?;
    Ok(HttpResponse::Ok().json(backups))
}

/// Snapshot the ledger
/// POST /backups
pub async fn create_backup(
    service: web::Data<Arc<BackupService>>,
) -> Result<HttpResponse, AppError> {
    let backup = service.create().await?;
    Ok(HttpResponse::Created().json(backup))
}

/// DELETE /backups/{name}
pub async fn delete_backup(
    service: web::Data<Arc<BackupService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure backup routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/backups")
            .route("", web::get().to(list_backups))
            .route("", web::post().to(create_backup))
            .route("/{name}", web::delete().to(delete_backup)),
    );
}
