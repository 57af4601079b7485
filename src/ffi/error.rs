// Content for src/ffi/error.rs
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::errors::{DomainError, ServiceError, ValidationError};

/// Error codes for FFI boundary
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Success (no error)
    Success = 0,

    // General errors (1-99)
    Unknown = 1,
    InvalidArgument = 2,
    NullPointer = 3,
    InvalidUtf8 = 4,
    InternalError = 5,

    // Domain errors (200-299)
    EntityNotFound = 201,
    ValidationFailed = 202,
    FileError = 203,

    // Service errors (300-399)
    AuthenticationFailed = 301,
    NetworkError = 302,
    ServiceUnavailable = 303,
    ConfigurationError = 304,
    ExternalServiceError = 305,

    // Export errors (400-499)
    EmptyDataset = 400,
    SharingUnsupported = 401,
    SerializationFailure = 402,
    FileIoFailure = 403,
    ShareFailed = 404,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, *self as i32)
    }
}

/// Error type for FFI boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FFIError {
    /// Error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details (JSON string)
    pub details: Option<String>,
}

impl fmt::Display for FFIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(details) = &self.details {
            write!(f, "{}: {} ({})", self.code, self.message, details)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for FFIError {}

impl FFIError {
    pub fn new(code: ErrorCode, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
            details: None,
        }
    }

    pub fn with_details(code: ErrorCode, message: &str, details: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
            details: Some(details.to_string()),
        }
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    // Helper for internal errors
    pub fn internal(message: String) -> Self {
        Self::new(ErrorCode::InternalError, &message)
    }
}

// Implement From traits for converting domain errors to FFI errors

// --- From<DomainError> for FFIError ---
impl From<DomainError> for FFIError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::EntityNotFound(entity, id) => {
                Self::with_details(
                    ErrorCode::EntityNotFound,
                    &format!("Entity not found: {} with ID {}", entity, id),
                    &format!("{{\"entity\":\"{}\",\"id\":{}}}", entity, id)
                )
            },
            DomainError::Validation(val_err) => {
                val_err.into() // Delegate to From<ValidationError>
            },
            DomainError::File(msg) => {
                Self::new(ErrorCode::FileError, &msg)
            },
            DomainError::Internal(msg) => {
                Self::new(ErrorCode::InternalError, &msg)
            },
            DomainError::External(msg) => {
                Self::new(ErrorCode::InternalError, &format!("External error: {}", msg))
            },
        }
    }
}

// --- From<ServiceError> for FFIError ---
impl From<ServiceError> for FFIError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(domain_err) => {
                domain_err.into() // Delegate
            },
            ServiceError::Authentication(msg) => {
                Self::new(ErrorCode::AuthenticationFailed, &msg)
            },
            ServiceError::Network(msg) => {
                Self::new(ErrorCode::NetworkError, &msg)
            },
            ServiceError::ServiceUnavailable(msg) => {
                Self::new(ErrorCode::ServiceUnavailable, &msg)
            },
            ServiceError::Configuration(msg) => {
                Self::new(ErrorCode::ConfigurationError, &msg)
            },
            ServiceError::ExternalService(msg) => {
                Self::new(ErrorCode::ExternalServiceError, &msg)
            },
        }
    }
}

// --- From<ValidationError> for FFIError ---
impl From<ValidationError> for FFIError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Required { field } => {
                Self::with_details(
                    ErrorCode::ValidationFailed,
                    &format!("Field '{}' is required", field),
                    &format!("{{\"field\":\"{}\",\"type\":\"required\"}}", field)
                )
            },
            ValidationError::MinLength { field, min } => {
                Self::with_details(
                    ErrorCode::ValidationFailed,
                    &format!("Field '{}' must be at least {} characters", field, min),
                    &format!("{{\"field\":\"{}\",\"type\":\"min_length\",\"min\":{}}}", field, min)
                )
            },
            ValidationError::MaxLength { field, max } => {
                Self::with_details(
                    ErrorCode::ValidationFailed,
                    &format!("Field '{}' cannot exceed {} characters", field, max),
                    &format!("{{\"field\":\"{}\",\"type\":\"max_length\",\"max\":{}}}", field, max)
                )
            },
            ValidationError::Range { field, min, max } => {
                Self::with_details(
                    ErrorCode::ValidationFailed,
                    &format!("Field '{}' must be between {} and {}", field, min, max),
                    &format!("{{\"field\":\"{}\",\"type\":\"range\",\"min\":\"{}\",\"max\":\"{}\"}}",
                        field, min, max)
                )
            },
            ValidationError::Format { field, reason } => {
                Self::with_details(
                    ErrorCode::ValidationFailed,
                    &format!("Field '{}' contains invalid format: {}", field, reason),
                    &format!("{{\"field\":\"{}\",\"type\":\"format\",\"reason\":\"{}\"}}",
                        field, reason)
                )
            },
            ValidationError::InvalidValue { field, reason } => {
                Self::with_details(
                    ErrorCode::ValidationFailed,
                    &format!("Field '{}' contains an invalid value: {}", field, reason),
                    &format!("{{\"field\":\"{}\",\"type\":\"invalid_value\",\"reason\":\"{}\"}}",
                        field, reason)
                )
            },
            ValidationError::Custom(msg) => {
                Self::with_details(
                    ErrorCode::ValidationFailed,
                    &msg,
                    &format!("{{\"type\":\"custom\",\"message\":\"{}\"}}", msg)
                )
            },
        }
    }
}

// Implement From<std::ffi::NulError> for FFIError
impl From<std::ffi::NulError> for FFIError {
    fn from(_: std::ffi::NulError) -> Self {
        Self::new(ErrorCode::InvalidUtf8, "String contains null bytes, cannot create CString")
    }
}

// Result type alias for FFI functions
pub type FFIResult<T> = Result<T, FFIError>;
