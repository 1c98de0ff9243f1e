//! Extractor configuration that turns malformed bodies, queries and paths
//! into the same JSON error shape as handler errors.

use actix_web::{error, web, HttpRequest};

use crate::core::AppError;

fn reject(kind: &str, detail: impl std::fmt::Display, req: &HttpRequest) -> error::Error {
    tracing::debug!(path = %req.path(), kind, %detail, "Rejected request input");
    AppError::validation(format!("Invalid {}: {}", kind, detail)).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, req| reject("JSON body", err, req))
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| reject("query string", err, req))
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| reject("path parameter", err, req))
}

/// Register all extractor configs on an app or scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config());
}
