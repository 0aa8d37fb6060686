use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body returned with every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ErrorShape {
    pub status: u16,
    pub error: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Account ID {account_id} not found")]
    AccountNotFound { account_id: String },

    #[error("Invalid Account: {reason}")]
    InvalidAccount { reason: String },

    #[error("Content-Type must be {media_type}")]
    UnsupportedMediaType { media_type: String },

    #[error("Invalid query: {reason}")]
    InvalidQuery { reason: String },

    #[error("Request body too large: {reason}")]
    PayloadTooLarge { reason: String },

    #[error("Method {method} is not allowed on this resource")]
    MethodNotAllowed { method: String },

    #[error("No resource found at {path}")]
    RouteNotFound { path: String },

    #[error("Database error: {reason}")]
    DatabaseError { reason: String },

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("Internal server error: {reason}")]
    InternalError { reason: String },
}

impl AccountError {
    pub fn to_error_shape(&self) -> ErrorShape {
        ErrorShape {
            status: self.http_status(),
            error: self.error_type().to_string(),
            message: self.to_string(),
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AccountError::AccountNotFound { .. } => "Not Found",
            AccountError::InvalidAccount { .. } => "Bad Request",
            AccountError::InvalidQuery { .. } => "Bad Request",
            AccountError::PayloadTooLarge { .. } => "Payload Too Large",
            AccountError::UnsupportedMediaType { .. } => "Unsupported media type",
            AccountError::MethodNotAllowed { .. } => "Method not Allowed",
            AccountError::RouteNotFound { .. } => "Not Found",
            AccountError::DatabaseError { .. } => "Internal Server Error",
            AccountError::SqlxError(_) => "Internal Server Error",
            AccountError::ConfigError { .. } => "Internal Server Error",
            AccountError::InternalError { .. } => "Internal Server Error",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            AccountError::AccountNotFound { .. } => 404,
            AccountError::InvalidAccount { .. } => 400,
            AccountError::InvalidQuery { .. } => 400,
            AccountError::PayloadTooLarge { .. } => 413,
            AccountError::UnsupportedMediaType { .. } => 415,
            AccountError::MethodNotAllowed { .. } => 405,
            AccountError::RouteNotFound { .. } => 404,
            AccountError::DatabaseError { .. } => 500,
            AccountError::SqlxError(_) => 500,
            AccountError::ConfigError { .. } => 500,
            AccountError::InternalError { .. } => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_shape() {
        let shape = AccountError::AccountNotFound {
            account_id: "100".to_string(),
        }
        .to_error_shape();
        assert_eq!(shape.status, 404);
        assert_eq!(shape.error, "Not Found");
        assert_eq!(shape.message, "Account ID 100 not found");
    }

    #[test]
    fn test_status_codes() {
        let media = AccountError::UnsupportedMediaType {
            media_type: "application/json".to_string(),
        };
        assert_eq!(media.http_status(), 415);
        assert_eq!(media.to_string(), "Content-Type must be application/json");

        let method = AccountError::MethodNotAllowed {
            method: "DELETE".to_string(),
        };
        assert_eq!(method.http_status(), 405);

        let too_large = AccountError::PayloadTooLarge {
            reason: "length limit exceeded".to_string(),
        };
        assert_eq!(too_large.http_status(), 413);
        assert_eq!(too_large.error_type(), "Payload Too Large");

        let db = AccountError::SqlxError(sqlx::Error::PoolClosed);
        assert_eq!(db.http_status(), 500);
        assert_eq!(db.error_type(), "Internal Server Error");
    }

    #[test]
    fn test_error_shape_serde() {
        let shape = ErrorShape {
            status: 400,
            error: "Bad Request".to_string(),
            message: "Invalid Account: missing name".to_string(),
        };
        let json = serde_json::to_string(&shape).unwrap();
        let back: ErrorShape = serde_json::from_str(&json).unwrap();
        assert_eq!(shape, back);
    }
}
