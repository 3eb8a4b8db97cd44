use actix_web::error::JsonPayloadError;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use serde::Serialize;
use utoipa::ToSchema;

use serde_json::{Map, Value};

use uuid::Uuid;

use crate::domain::repositories::repository::RepositoryError;
use crate::domain::services::jsonwebtoken::TokenError;
use crate::domain::services::password::HashingError;

pub type AppResult<T> = core::result::Result<T, AppError>;

macro_rules! static_error {
    ($name:ident, $kind:expr) => {
        #[allow(non_snake_case, missing_docs)]
        pub fn $name(message: impl ToString) -> AppError {
            AppError {
                kind: $kind,
                message: message.to_string(),
                reference: None,
                trace: None,
            }
        }
    };

    ($name:ident, $kind:expr, $default:expr) => {
        #[allow(non_snake_case, missing_docs)]
        pub fn $name() -> AppError {
            AppError {
                kind: $kind,
                message: $default.to_string(),
                reference: None,
                trace: None,
            }
        }
    };
}

/// Stable error classes exposed to callers. Transports map these to their
/// own status vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    UsernameConflict,
    InvalidCredentials,
    InternalFailure,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::InvalidInput => "invalid_input",
            Self::UsernameConflict => "username_conflict",
            Self::InvalidCredentials => "invalid_credentials",
            Self::InternalFailure => "internal_failure",
        };

        f.write_str(kind)
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    /// Correlates a failure response with the log line holding its trace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip)]
    pub trace: Option<String>,
}

#[rustfmt::skip]
pub mod message {
    pub static INVALID_INPUT: &str = "Username and password are required";
    pub static USERNAME_CONFLICT: &str = "Username already exists";
    pub static INVALID_CREDENTIALS: &str = "The request was not successful because it lacks valid authentication credentials";
    pub static INTERNAL_FAILURE: &str = "The server encountered an unexpected condition that prevented it from fulfilling the request";
}

#[rustfmt::skip]
impl AppError {
    // 1. Errors with Custom Message
    static_error!(InvalidInput, ErrorKind::InvalidInput);
    static_error!(UsernameConflict, ErrorKind::UsernameConflict);

    // 2. Errors with Default Message
    static_error!(InvalidCredentials, ErrorKind::InvalidCredentials, message::INVALID_CREDENTIALS);
    static_error!(InternalFailure, ErrorKind::InternalFailure, message::INTERNAL_FAILURE);

    /// Attaches private detail for the logs and a fresh reference that is safe
    /// to hand back to the caller.
    pub fn trace(self, detail: &str) -> AppError {
        AppError {
            kind: self.kind,
            message: self.message,
            reference: Some(Uuid::new_v4().to_string()),
            trace: Some(detail.to_owned()),
        }
    }

    pub fn example_400() -> AppError {
        AppError::InvalidInput(message::INVALID_INPUT)
    }

    pub fn example_401() -> AppError {
        AppError::InvalidCredentials()
    }

    pub fn example_409() -> AppError {
        AppError::UsernameConflict(message::USERNAME_CONFLICT)
    }

    pub fn example_500() -> AppError {
        AppError {
            reference: Some("6f1c7b0e-2a4d-4b8e-9a51-0c3d2e7f9b14".to_string()),
            ..AppError::InternalFailure()
        }
    }
}

impl std::error::Error for AppError {}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {}: {}", self.kind, self.message)
    }
}

impl From<HashingError> for AppError {
    fn from(error: HashingError) -> Self {
        AppError::InternalFailure().trace(&error.to_string())
    }
}

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::UniqueViolation(_) => {
                AppError::UsernameConflict(message::USERNAME_CONFLICT)
            }
            _ => AppError::InternalFailure().trace(&error.to_string()),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> Self {
        AppError::InternalFailure().trace(&error.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut map = Map::new();

        for (_, field, error) in flatten_errors(&errors, None, None) {
            map.insert(field, Value::String(error.to_string()));
        }

        AppError::InvalidInput(Value::Object(map))
    }
}

fn flatten_errors(
    errors: &ValidationErrors,
    path: Option<String>,
    indent: Option<u16>,
) -> Vec<(u16, String, &ValidationError)> {
    errors
        .errors()
        .iter()
        .flat_map(|(field, err)| {
            let indent = indent.unwrap_or(0);
            let actual_path = path
                .as_ref()
                .map(|path| [path.as_str(), field].join("."))
                .unwrap_or_else(|| field.to_string());
            match err {
                ValidationErrorsKind::Field(field_errors) => field_errors
                    .iter()
                    .map(|error| (indent, actual_path.clone(), error))
                    .collect::<Vec<_>>(),
                ValidationErrorsKind::List(list_error) => list_error
                    .iter()
                    .flat_map(|(index, errors)| {
                        let actual_path = format!("{}[{}]", actual_path.as_str(), index);
                        flatten_errors(errors, Some(actual_path), Some(indent + 1))
                    })
                    .collect::<Vec<_>>(),
                ValidationErrorsKind::Struct(struct_errors) => {
                    flatten_errors(struct_errors, Some(actual_path), Some(indent + 1))
                }
            }
        })
        .collect::<Vec<_>>()
}

impl From<JsonPayloadError> for AppError {
    fn from(error: JsonPayloadError) -> Self {
        AppError::InvalidInput(error.to_string())
    }
}
