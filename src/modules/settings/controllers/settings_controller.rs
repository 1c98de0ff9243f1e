use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::settings::models::UpdateSettingsRequest;
use crate::modules::settings::services::SettingsService;

/// GET /settings
pub async fn get_settings(
    service: web::Data<Arc<SettingsService>>,
) -> Result<HttpResponse, AppError> {
    let settings = service.current().await?;
    Ok(HttpResponse::Ok().json(settings))
}

/// PUT /settings
pub async fn update_settings(
    service: web::Data<Arc<SettingsService>>,
    request: web::Json<UpdateSettingsRequest>,
) -> Result<HttpResponse, AppError> {
    let settings = service.update(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(settings))
}

/// POST /settings/reset
pub async fn reset_settings(
    service: web::Data<Arc<SettingsService>>,
) -> Result<HttpResponse, AppError> {
    let settings = service.reset().await?;
    Ok(HttpResponse::Ok().json(settings))
}

/// Configure settings routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/settings")
            .route("", web::get().to(get_settings))
            .route("", web::put().to(update_settings))
            .route("/reset", web::post().to(reset_settings)),
    );
}
