//! Console API helpers.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::errors::GatelinkError;

use super::types::{ApiResponse, ErrorCode, PaginatedResponse, PaginationInfo};

pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

pub fn paginated_response<T: Serialize>(
    data: T,
    page: u64,
    page_size: u64,
    total: u64,
) -> HttpResponse {
    HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(PaginatedResponse {
            code: ErrorCode::Success as i32,
            message: "OK".to_string(),
            data,
            pagination: PaginationInfo {
                page,
                page_size,
                total,
                total_pages: total.div_ceil(page_size),
            },
        })
}

pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// Map a `GatelinkError` onto the envelope (HTTP status + error code).
pub fn error_from_gatelink(err: &GatelinkError) -> HttpResponse {
    error_response(err.http_status(), ErrorCode::from(err), err.message())
}

/// Unified Result → HttpResponse conversion: 200 + data on success,
/// mapped error envelope otherwise.
pub fn api_result<T: Serialize>(result: crate::errors::Result<T>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_gatelink(&e),
    }
}

/// Clamp console pagination input: page >= 1, page_size in 1..=100.
pub fn clamp_pagination(page: Option<u64>, page_size: Option<u64>) -> (u64, u64) {
    (page.unwrap_or(1).max(1), page_size.unwrap_or(20).clamp(1, 100))
}
