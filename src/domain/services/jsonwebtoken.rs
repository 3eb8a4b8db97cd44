use thiserror::Error;

use crate::domain::{
    error::AppResult,
    models::jsonwebtoken::{AccessToken, Claims, TokenClaims},
};

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token expiration out of range")]
    Expiration,
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

pub trait TokenIssuer: 'static + Sync + Send {
    fn issue(&self, claims: TokenClaims) -> Result<AccessToken, TokenError>;
    fn validate(&self, token: &str) -> AppResult<Claims>;
}
