//! Console API type definitions.

use serde::{Deserialize, Serialize};

use crate::errors::GatelinkError;
use crate::services::OwnedSubmission;
use crate::storage::{FieldMap, Link};

/// Machine-readable error codes carried in the JSON envelope, alongside the
/// HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    BadRequest = 4000,
    Unauthorized = 4010,
    Forbidden = 4030,
    NotFound = 4040,
    Conflict = 4090,
    InternalServerError = 5000,
    ServiceUnavailable = 5030,
}

impl From<&GatelinkError> for ErrorCode {
    fn from(err: &GatelinkError) -> Self {
        match err {
            GatelinkError::Collision(_) => ErrorCode::Conflict,
            GatelinkError::NotFound(_) | GatelinkError::InvalidCode(_) => ErrorCode::NotFound,
            GatelinkError::Forbidden(_) => ErrorCode::Forbidden,
            GatelinkError::Validation(_) => ErrorCode::BadRequest,
            GatelinkError::DatabaseConnection(_) => ErrorCode::ServiceUnavailable,
            GatelinkError::CodeAllocation(_)
            | GatelinkError::DatabaseConfig(_)
            | GatelinkError::DatabaseOperation(_)
            | GatelinkError::Serialization(_) => ErrorCode::InternalServerError,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
    pub pagination: PaginationInfo,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginationInfo {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostNewLink {
    pub code: Option<String>,
    pub destination: String,
    pub label: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct GetLinksQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct GetSubmissionsQuery {
    /// Restrict to one owned code. A code outside the owned set is rejected.
    pub code: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LinkResponse {
    pub code: String,
    pub destination: String,
    pub label: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            code: link.code,
            destination: link.destination,
            label: link.label,
            created_at: link.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SubmissionResponse {
    pub id: String,
    pub code: String,
    pub label: Option<String>,
    pub fields: FieldMap,
    pub captured_at: chrono::DateTime<chrono::Utc>,
}

impl From<OwnedSubmission> for SubmissionResponse {
    fn from(sub: OwnedSubmission) -> Self {
        Self {
            id: sub.id,
            code: sub.code,
            label: sub.label,
            fields: sub.fields,
            captured_at: sub.captured_at,
        }
    }
}
