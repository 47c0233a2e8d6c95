// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for presentation
// - Never exposes internal implementation details

use serde::{Deserialize, Serialize};

use crate::error::{AppError, FetchCause};

/// Standard error response for presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Unknown account or collection (404)
    NotFound,

    /// Invalid input (400)
    Validation,

    /// Code-forge API error (502)
    ExternalService,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::Fetch(fetch) => match fetch.cause {
                FetchCause::Status(404) => Self {
                    success: false,
                    error_type: ErrorType::NotFound,
                    message: format!("No account named '{}'", fetch.identifier),
                    details: None,
                },
                cause => Self {
                    success: false,
                    error_type: ErrorType::ExternalService,
                    message: "Failed to fetch repositories. Please check the username or try again."
                        .to_string(),
                    details: Some(cause.to_string()),
                },
            },

            AppError::InvalidQuery { reason } => Self::validation(reason),

            AppError::UnknownCollection(key) => Self::not_found(&format!("Collection '{}'", key)),

            AppError::Other(message) => {
                log::error!("Other error: {}", message);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message,
                    details: None,
                }
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message,
            details: None,
        }
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self {
            success: false,
            error_type: ErrorType::NotFound,
            message: format!("{} not found", resource),
            details: None,
        }
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| {
            let error_response = ErrorResponse::from_app_error(e);
            serde_json::to_string(&error_response).unwrap_or_else(|_| "Internal error".to_string())
        })
    }
}
