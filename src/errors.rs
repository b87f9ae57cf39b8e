use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum GatelinkError {
    /// Code already taken; the creation flow retries with a fresh candidate.
    Collision(String),
    /// Code does not resolve to a link.
    NotFound(String),
    /// Submission attempted against a code that does not exist.
    InvalidCode(String),
    /// Ownership check failed; no data is returned.
    Forbidden(String),
    Validation(String),
    /// Generation retries exhausted; collisions at this rate are systemic.
    CodeAllocation(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
}

impl GatelinkError {
    pub fn code(&self) -> &'static str {
        match self {
            GatelinkError::Collision(_) => "E001",
            GatelinkError::NotFound(_) => "E002",
            GatelinkError::InvalidCode(_) => "E003",
            GatelinkError::Forbidden(_) => "E004",
            GatelinkError::Validation(_) => "E005",
            GatelinkError::CodeAllocation(_) => "E006",
            GatelinkError::DatabaseConfig(_) => "E007",
            GatelinkError::DatabaseConnection(_) => "E008",
            GatelinkError::DatabaseOperation(_) => "E009",
            GatelinkError::Serialization(_) => "E010",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            GatelinkError::Collision(_) => "Code Collision",
            GatelinkError::NotFound(_) => "Link Not Found",
            GatelinkError::InvalidCode(_) => "Invalid Capture Code",
            GatelinkError::Forbidden(_) => "Forbidden",
            GatelinkError::Validation(_) => "Validation Error",
            GatelinkError::CodeAllocation(_) => "Code Allocation Failed",
            GatelinkError::DatabaseConfig(_) => "Database Configuration Error",
            GatelinkError::DatabaseConnection(_) => "Database Connection Error",
            GatelinkError::DatabaseOperation(_) => "Database Operation Error",
            GatelinkError::Serialization(_) => "Serialization Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            GatelinkError::Collision(msg)
            | GatelinkError::NotFound(msg)
            | GatelinkError::InvalidCode(msg)
            | GatelinkError::Forbidden(msg)
            | GatelinkError::Validation(msg)
            | GatelinkError::CodeAllocation(msg)
            | GatelinkError::DatabaseConfig(msg)
            | GatelinkError::DatabaseConnection(msg)
            | GatelinkError::DatabaseOperation(msg)
            | GatelinkError::Serialization(msg) => msg,
        }
    }

    /// HTTP status the console/API layer maps this error to.
    pub fn http_status(&self) -> StatusCode {
        match self {
            GatelinkError::Collision(_) => StatusCode::CONFLICT,
            GatelinkError::NotFound(_) => StatusCode::NOT_FOUND,
            GatelinkError::InvalidCode(_) => StatusCode::NOT_FOUND,
            GatelinkError::Forbidden(_) => StatusCode::FORBIDDEN,
            GatelinkError::Validation(_) => StatusCode::BAD_REQUEST,
            GatelinkError::CodeAllocation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatelinkError::DatabaseConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // Transient infrastructure failure; the caller may retry with backoff.
            GatelinkError::DatabaseConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatelinkError::DatabaseOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatelinkError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for GatelinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for GatelinkError {}

impl GatelinkError {
    pub fn collision<T: Into<String>>(msg: T) -> Self {
        GatelinkError::Collision(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        GatelinkError::NotFound(msg.into())
    }

    pub fn invalid_code<T: Into<String>>(msg: T) -> Self {
        GatelinkError::InvalidCode(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        GatelinkError::Forbidden(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        GatelinkError::Validation(msg.into())
    }

    pub fn code_allocation<T: Into<String>>(msg: T) -> Self {
        GatelinkError::CodeAllocation(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        GatelinkError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        GatelinkError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        GatelinkError::DatabaseOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        GatelinkError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for GatelinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        GatelinkError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for GatelinkError {
    fn from(err: serde_json::Error) -> Self {
        GatelinkError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for GatelinkError {
    fn from(err: std::io::Error) -> Self {
        GatelinkError::DatabaseConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GatelinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(GatelinkError::collision("taken").code(), "E001");
        assert_eq!(GatelinkError::not_found("missing").code(), "E002");
        assert_eq!(GatelinkError::invalid_code("missing").code(), "E003");
        assert_eq!(GatelinkError::forbidden("not yours").code(), "E004");
    }

    #[test]
    fn http_status_mapping() {
        assert_eq!(
            GatelinkError::collision("taken").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            GatelinkError::forbidden("not yours").http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            GatelinkError::validation("bad url").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatelinkError::database_connection("down").http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn display_includes_type_and_message() {
        let err = GatelinkError::collision("code 'ab12cd' already exists");
        let rendered = err.to_string();
        assert!(rendered.contains("Code Collision"));
        assert!(rendered.contains("ab12cd"));
    }

    #[test]
    fn from_db_err() {
        let err: GatelinkError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, GatelinkError::DatabaseOperation(_)));
    }
}
