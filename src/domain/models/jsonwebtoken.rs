use serde::{Deserialize, Serialize};

pub struct AccessToken {
    pub token: String,
    pub expiration: i64,
}

/// Input handed to the token issuer.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub subject_id: String,
    pub username: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub exp: usize,
    pub iat: usize,
}
