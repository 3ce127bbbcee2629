//! Typed error handling for the alumni portal
//!
//! Errors are grouped by the subsystem that raises them so that callers can
//! match on specific cases instead of inspecting strings.
//!
//! # Error Categories
//!
//! - [`QueryError`]: malformed directory queries (unknown fields, bad sort)
//! - [`RosterError`]: roster loading and record lookup
//! - [`EventError`]: events manager operations
//! - [`DonationError`]: donation ledger operations
//! - [`ConfigError`]: configuration parsing and validation
//! - [`ValidationError`]: request payload validation
//!
//! # Example
//!
//! ```rust,ignore
//! use alumni::prelude::*;
//!
//! match DirectoryQuery::new().sorted_by("salary", SortDirection::Ascending) {
//!     Err(QueryError::UnknownField { field }) => eprintln!("no such field: {field}"),
//!     Err(e) => eprintln!("other error: {e}"),
//!     Ok(query) => println!("{:?}", roster.evaluate(&query)),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

/// The main error type for the portal
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// Malformed directory query
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Roster loading or lookup errors
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// Events manager errors
    #[error(transparent)]
    Event(#[from] EventError),

    /// Donation ledger errors
    #[error(transparent)]
    Donation(#[from] DonationError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Request payload validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Internal errors (lock poisoning and the like)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl PortalError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PortalError::Query(_) => StatusCode::BAD_REQUEST,
            PortalError::Roster(e) => e.status_code(),
            PortalError::Event(e) => e.status_code(),
            PortalError::Donation(e) => e.status_code(),
            PortalError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PortalError::Validation(_) => StatusCode::BAD_REQUEST,
            PortalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PortalError::Query(e) => e.error_code(),
            PortalError::Roster(e) => e.error_code(),
            PortalError::Event(e) => e.error_code(),
            PortalError::Donation(e) => e.error_code(),
            PortalError::Config(_) => "CONFIG_ERROR",
            PortalError::Validation(_) => "VALIDATION_ERROR",
            PortalError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            PortalError::Query(QueryError::UnknownField { field }) => {
                Some(serde_json::json!({ "field": field }))
            }
            PortalError::Query(QueryError::NotFilterable { field }) => {
                Some(serde_json::json!({ "field": field }))
            }
            PortalError::Roster(RosterError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id }))
            }
            PortalError::Event(EventError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id.to_string() }))
            }
            PortalError::Donation(DonationError::CampaignNotFound { slug }) => {
                Some(serde_json::json!({ "campaign": slug }))
            }
            PortalError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors raised while building a directory query
///
/// These are caller bugs (UI wiring that names a field the directory does not
/// have) and are reported eagerly instead of being ignored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The field name is not a directory field
    #[error("Unknown directory field: '{field}'")]
    UnknownField { field: String },

    /// The field exists but cannot be used as a filter
    #[error("Directory field '{field}' cannot be used as a filter")]
    NotFilterable { field: String },

    /// The sort direction is neither ascending nor descending
    #[error("Invalid sort direction: '{direction}'")]
    InvalidDirection { direction: String },

    /// The filter parameter is not a JSON object of field → values
    #[error("Malformed filter: {message}")]
    MalformedFilter { message: String },
}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::UnknownField { .. } => "UNKNOWN_FIELD",
            QueryError::NotFilterable { .. } => "FIELD_NOT_FILTERABLE",
            QueryError::InvalidDirection { .. } => "INVALID_SORT_DIRECTION",
            QueryError::MalformedFilter { .. } => "MALFORMED_FILTER",
        }
    }
}

// =============================================================================
// Roster Errors
// =============================================================================

/// Errors related to the alumni roster
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// No record carries this identifier
    #[error("Alumnus with id '{id}' not found")]
    NotFound { id: u32 },

    /// Two records share an identifier
    #[error("Duplicate alumnus id '{id}' in roster")]
    DuplicateId { id: u32 },

    /// The roster source could not be parsed
    #[error("Failed to parse roster{}: {message}", source_label(.source_path))]
    Parse {
        source_path: Option<String>,
        message: String,
    },

    /// The roster file extension is not a supported format
    #[error("Unsupported roster format for '{path}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: String },

    /// The roster file could not be read
    #[error("Failed to read roster '{path}': {message}")]
    Io { path: String, message: String },
}

fn source_label(path: &Option<String>) -> String {
    path.as_ref()
        .map(|p| format!(" '{}'", p))
        .unwrap_or_default()
}

impl RosterError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RosterError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RosterError::NotFound { .. } => "ALUMNUS_NOT_FOUND",
            RosterError::DuplicateId { .. } => "DUPLICATE_ALUMNUS_ID",
            RosterError::Parse { .. } => "ROSTER_PARSE_ERROR",
            RosterError::UnsupportedFormat { .. } => "ROSTER_UNSUPPORTED_FORMAT",
            RosterError::Io { .. } => "ROSTER_IO_ERROR",
        }
    }
}

// =============================================================================
// Event Errors
// =============================================================================

/// Errors related to the events manager
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// Event was not found
    #[error("Event with id '{id}' not found")]
    NotFound { id: Uuid },

    /// Registrations are only accepted for published events
    #[error("Event '{id}' is not published")]
    NotPublished { id: Uuid },

    /// This email address is already registered for the event
    #[error("'{email}' is already registered for event '{id}'")]
    AlreadyRegistered { id: Uuid, email: String },
}

impl EventError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EventError::NotFound { .. } => StatusCode::NOT_FOUND,
            EventError::NotPublished { .. } => StatusCode::CONFLICT,
            EventError::AlreadyRegistered { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EventError::NotFound { .. } => "EVENT_NOT_FOUND",
            EventError::NotPublished { .. } => "EVENT_NOT_PUBLISHED",
            EventError::AlreadyRegistered { .. } => "ALREADY_REGISTERED",
        }
    }
}

// =============================================================================
// Donation Errors
// =============================================================================

/// Errors related to the donation ledger
#[derive(Debug, thiserror::Error)]
pub enum DonationError {
    /// No campaign with this slug
    #[error("Campaign '{slug}' not found")]
    CampaignNotFound { slug: String },

    /// Pledge amount exceeds the configured ceiling
    #[error("Pledge of {amount} exceeds the maximum of {max}")]
    AboveMaximum { amount: u64, max: u64 },
}

impl DonationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DonationError::CampaignNotFound { .. } => StatusCode::NOT_FOUND,
            DonationError::AboveMaximum { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            DonationError::CampaignNotFound { .. } => "CAMPAIGN_NOT_FOUND",
            DonationError::AboveMaximum { .. } => "PLEDGE_ABOVE_MAXIMUM",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse config{}: {message}", source_label(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON format
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// Collapse a list of field errors into a single error, if any
    pub fn from_fields(mut errors: Vec<FieldValidationError>) -> Result<(), ValidationError> {
        if errors.len() > 1 {
            return Err(ValidationError::FieldErrors(errors));
        }
        match errors.pop() {
            None => Ok(()),
            Some(e) => Err(ValidationError::FieldError {
                field: e.field,
                message: e.message,
            }),
        }
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        PortalError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for PortalError {
    fn from(err: serde_yaml::Error) -> Self {
        PortalError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<anyhow::Error> for PortalError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<PortalError>() {
            Ok(portal_err) => return portal_err,
            Err(err) => err,
        };
        let err = match err.downcast::<RosterError>() {
            Ok(roster_err) => return PortalError::Roster(roster_err),
            Err(err) => err,
        };
        match err.downcast::<ConfigError>() {
            Ok(config_err) => PortalError::Config(config_err),
            Err(err) => PortalError::Internal(err.to_string()),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for portal operations
pub type PortalResult<T> = Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_display() {
        let err = QueryError::UnknownField {
            field: "salary".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown directory field: 'salary'");
    }

    #[test]
    fn test_roster_parse_error_display_with_and_without_path() {
        let with_path = RosterError::Parse {
            source_path: Some("alumni.json".to_string()),
            message: "eof".to_string(),
        };
        assert_eq!(
            with_path.to_string(),
            "Failed to parse roster 'alumni.json': eof"
        );

        let without_path = RosterError::Parse {
            source_path: None,
            message: "eof".to_string(),
        };
        assert_eq!(without_path.to_string(), "Failed to parse roster: eof");
    }

    #[test]
    fn test_single_field_error_collapses() {
        let err = ValidationError::from_fields(vec![FieldValidationError::new(
            "title",
            "must not be blank",
        )])
        .unwrap_err();
        assert!(matches!(err, ValidationError::FieldError { ref field, .. } if field == "title"));
    }

    #[test]
    fn test_no_field_errors_is_ok() {
        assert!(ValidationError::from_fields(Vec::new()).is_ok());
    }

    #[test]
    fn test_anyhow_roundtrip_keeps_portal_error() {
        let original = PortalError::Event(EventError::NotFound { id: Uuid::nil() });
        let wrapped: anyhow::Error = original.into();
        let back: PortalError = wrapped.into();
        assert_eq!(back.error_code(), "EVENT_NOT_FOUND");
    }

    #[test]
    fn test_field_errors_details() {
        let err = PortalError::Validation(ValidationError::FieldErrors(vec![
            FieldValidationError::new("title", "must not be blank"),
            FieldValidationError::new("location", "must not be blank"),
        ]));
        let response = err.to_response();
        assert_eq!(response.code, "VALIDATION_ERROR");
        let details = response.details.unwrap();
        assert_eq!(details["fields"].as_array().unwrap().len(), 2);
    }
}
