use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::employees::models::EmployeeRequest;
use crate::modules::employees::services::EmployeeService;
use crate::modules::taxes::models::Pph21Request;

/// Create a new employee
/// POST /employees
pub async fn create_employee(
    service: web::Data<Arc<EmployeeService>>,
    request: web::Json<EmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    let employee = service.create_employee(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(employee))
}

/// GET /employees
pub async fn list_employees(
    service: web::Data<Arc<EmployeeService>>,
) -> Result<HttpResponse, AppError> {
    let employees = service.list_employees().await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// GET /employees/{id}
pub async fn get_employee(
    service: web::Data<Arc<EmployeeService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let employee = service.get_employee(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// PUT /employees/{id}
pub async fn update_employee(
    service: web::Data<Arc<EmployeeService>>,
    path: web::Path<i64>,
    request: web::Json<EmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    let employee = service
        .update_employee(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// DELETE /employees/{id}
pub async fn delete_employee(
    service: web::Data<Arc<EmployeeService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete_employee(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Calculate PPh 21 for an employee, optionally saving the result
/// POST /employees/{id}/pph21
pub async fn calculate_pph21(
    service: web::Data<Arc<EmployeeService>>,
    path: web::Path<i64>,
    request: web::Json<Pph21Request>,
) -> Result<HttpResponse, AppError> {
    let calculation = service
        .calculate_pph21(path.into_inner(), request.into_inner())
        .await?;

    if calculation.record.is_some() {
        Ok(HttpResponse::Created().json(calculation))
    } else {
        Ok(HttpResponse::Ok().json(calculation))
    }
}

/// GET /employees/{id}/tax-records
pub async fn list_tax_records(
    service: web::Data<Arc<EmployeeService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let records = service.tax_records(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Configure employee routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/employees")
            .route("", web::post().to(create_employee))
            .route("", web::get().to(list_employees))
            .route("/{id}", web::get().to(get_employee))
            .route("/{id}", web::put().to(update_employee))
            .route("/{id}", web::delete().to(delete_employee))
            .route("/{id}/pph21", web::post().to(calculate_pph21))
            .route("/{id}/tax-records", web::get().to(list_tax_records)),
    );
}
