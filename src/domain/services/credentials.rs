use crate::domain::error::AppResult;

/// Structural checks run before any I/O.
pub trait CredentialValidator: 'static + Sync + Send {
    fn validate(&self, username: &str, password: &str) -> AppResult<()>;
}
