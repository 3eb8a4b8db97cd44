use crate::domain::error::{AppError, AppResult, message};
use crate::domain::services::credentials::CredentialValidator;

/// Accepts any username and password that contain a non-whitespace character.
pub struct NonBlankCredentials;

impl CredentialValidator for NonBlankCredentials {
    fn validate(&self, username: &str, password: &str) -> AppResult<()> {
        if is_blank(username) || is_blank(password) {
            return Err(AppError::InvalidInput(message::INVALID_INPUT));
        }

        Ok(())
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
