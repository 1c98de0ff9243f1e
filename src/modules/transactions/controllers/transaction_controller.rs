use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::core::TaxPeriod;
use crate::modules::transactions::models::TransactionRequest;
use crate::modules::transactions::services::TransactionService;

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// `YYYY` or `YYYY-MM`
    #[serde(default)]
    pub period: Option<TaxPeriod>,
    /// `true` lists only transactions carrying a tax invoice number
    #[serde(default)]
    pub invoiced: Option<bool>,
}

/// Record a sale or purchase
/// POST /transactions
pub async fn create_transaction(
    service: web::Data<Arc<TransactionService>>,
    request: web::Json<TransactionRequest>,
) -> Result<HttpResponse, AppError> {
    let transaction = service.create_transaction(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(transaction))
}

/// GET /transactions?period=&invoiced=
pub async fn list_transactions(
    service: web::Data<Arc<TransactionService>>,
    query: web::Query<ListTransactionsQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let transactions = service
        .list_transactions(query.period, query.invoiced)
        .await?;
    Ok(HttpResponse::Ok().json(transactions))
}

/// GET /transactions/{id}
pub async fn get_transaction(
    service: web::Data<Arc<TransactionService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let transaction = service.get_transaction(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(transaction))
}

/// PUT /transactions/{id}
pub async fn update_transaction(
    service: web::Data<Arc<TransactionService>>,
    path: web::Path<i64>,
    request: web::Json<TransactionRequest>,
) -> Result<HttpResponse, AppError> {
    let transaction = service
        .update_transaction(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(transaction))
}

/// DELETE /transactions/{id}
pub async fn delete_transaction(
    service: web::Data<Arc<TransactionService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete_transaction(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Input tax credit verdict for a transaction
/// GET /transactions/{id}/credit-eligibility
pub async fn credit_eligibility(
    service: web::Data<Arc<TransactionService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let eligibility = service.credit_eligibility(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(eligibility))
}

/// Configure transaction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/transactions")
            .route("", web::post().to(create_transaction))
            .route("", web::get().to(list_transactions))
            .route("/{id}", web::get().to(get_transaction))
            .route("/{id}", web::put().to(update_transaction))
            .route("/{id}", web::delete().to(delete_transaction))
            .route("/{id}/credit-eligibility", web::get().to(credit_eligibility)),
    );
}
