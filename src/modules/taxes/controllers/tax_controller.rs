//! Tax endpoints: single-amount VAT splits, period VAT summaries and
//! the tax record ledger.

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::core::TaxPeriod;
use crate::modules::taxes::models::{PpnAmountRequest, TaxRecordRequest};
use crate::modules::taxes::services::TaxService;

/// Optional `?period=YYYY[-MM]` filter
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    #[serde(default)]
    pub period: Option<TaxPeriod>,
}

/// VAT on top of a base amount
///
/// POST /taxes/ppn/from-base
pub async fn ppn_from_base(
    service: web::Data<Arc<TaxService>>,
    request: web::Json<PpnAmountRequest>,
) -> Result<HttpResponse, AppError> {
    let breakdown = service.ppn_from_base(request.amount).await?;
    Ok(HttpResponse::Ok().json(breakdown))
}

/// Split a VAT-inclusive total
///
/// POST /taxes/ppn/from-total
pub async fn ppn_from_total(
    service: web::Data<Arc<TaxService>>,
    request: web::Json<PpnAmountRequest>,
) -> Result<HttpResponse, AppError> {
    let breakdown = service.ppn_from_total(request.amount).await?;
    Ok(HttpResponse::Ok().json(breakdown))
}

/// GET /taxes/ppn/summary?period=
pub async fn ppn_summary(
    service: web::Data<Arc<TaxService>>,
    query: web::Query<PeriodQuery>,
) -> Result<HttpResponse, AppError> {
    let summary = service.ppn_summary(query.into_inner().period).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// POST /taxes/records
pub async fn create_record(
    service: web::Data<Arc<TaxService>>,
    request: web::Json<TaxRecordRequest>,
) -> Result<HttpResponse, AppError> {
    let record = service.create_record(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(record))
}

/// GET /taxes/records?period=
pub async fn list_records(
    service: web::Data<Arc<TaxService>>,
    query: web::Query<PeriodQuery>,
) -> Result<HttpResponse, AppError> {
    let records = service.list_records(query.into_inner().period).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// GET /taxes/records/{id}
pub async fn get_record(
    service: web::Data<Arc<TaxService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let record = service.get_record(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// PUT /taxes/records/{id}
pub async fn update_record(
    service: web::Data<Arc<TaxService>>,
    path: web::Path<i64>,
    request: web::Json<TaxRecordRequest>,
) -> Result<HttpResponse, AppError> {
    let record = service
        .update_record(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(record))
}

/// DELETE /taxes/records/{id}
pub async fn delete_record(
    service: web::Data<Arc<TaxService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete_record(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure tax routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/taxes")
            .route("/ppn/from-base", web::post().to(ppn_from_base))
            .route("/ppn/from-total", web::post().to(ppn_from_total))
            .route("/ppn/summary", web::get().to(ppn_summary))
            .route("/records", web::post().to(create_record))
            .route("/records", web::get().to(list_records))
            .route("/records/{id}", web::get().to(get_record))
            .route("/records/{id}", web::put().to(update_record))
            .route("/records/{id}", web::delete().to(delete_record)),
    );
}
