use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::reports::services::SptService;

/// Widest deadline window accepted, in days
const MAX_DAYS_AHEAD: u32 = 366;

/// Query parameters for the deadline reminder endpoint
#[derive(Debug, Deserialize)]
pub struct DeadlinesQuery {
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,
}

fn default_days_ahead() -> u32 {
    30
}

/// Annual SPT report
/// GET /reports/spt/{year}
pub async fn get_spt_report(
    service: web::Data<Arc<SptService>>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let report = service.annual_report(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /reports/schedule/{year}
pub async fn get_payment_schedule(
    service: web::Data<Arc<SptService>>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let schedule = service.payment_schedule(path.into_inner())?;
    Ok(HttpResponse::Ok().json(schedule))
}

/// GET /reports/deadlines?days_ahead=
pub async fn get_upcoming_deadlines(
    service: web::Data<Arc<SptService>>,
    query: web::Query<DeadlinesQuery>,
) -> Result<HttpResponse, AppError> {
    check_days_ahead(query.days_ahead)?;

    let reminders = service.upcoming_deadlines(query.days_ahead).await?;
    Ok(HttpResponse::Ok().json(reminders))
}

/// Deadline reminders plus the year's PPh 21 and PPN summaries
/// GET /reports/notifications?days_ahead=
pub async fn get_notifications(
    service: web::Data<Arc<SptService>>,
    query: web::Query<DeadlinesQuery>,
) -> Result<HttpResponse, AppError> {
    check_days_ahead(query.days_ahead)?;

    let notifications = service.notifications(query.days_ahead).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

/// GET /reports/system-summary
pub async fn get_system_summary(
    service: web::Data<Arc<SptService>>,
) -> Result<HttpResponse, AppError> {
    let summary = service.system_summary().await?;
    Ok(HttpResponse::Ok().json(summary))
}

fn check_days_ahead(days_ahead: u32) -> Result<(), AppError> {
    if days_ahead > MAX_DAYS_AHEAD {
        return Err(AppError::validation(format!(
            "days_ahead cannot exceed {}",
            MAX_DAYS_AHEAD
        )));
    }
    Ok(())
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/spt/{year}", web::get().to(get_spt_report))
            .route("/schedule/{year}", web::get().to(get_payment_schedule))
            .route("/deadlines", web::get().to(get_upcoming_deadlines))
            .route("/notifications", web::get().to(get_notifications))
            .route("/system-summary", web::get().to(get_system_summary)),
    );
}
