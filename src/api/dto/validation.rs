use std::borrow::Cow;

use validator::ValidationError;

use crate::services::credentials::is_blank;

pub fn is_username(username: &str) -> Result<(), ValidationError> {
    if is_blank(username) {
        return Err(ValidationError::new("blank").with_message(Cow::from("Username is required")));
    }

    Ok(())
}

pub fn is_password(password: &str) -> Result<(), ValidationError> {
    if is_blank(password) {
        return Err(ValidationError::new("blank").with_message(Cow::from("Password is required")));
    }

    Ok(())
}
