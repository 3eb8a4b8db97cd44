use crate::api::dto::validation::{is_password, is_username};
use crate::domain::models::account::{SignInRequest, SignInResult, SignUpRequest, SignUpResult};
use crate::domain::models::jsonwebtoken::Claims;
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountDTO {
    #[schema(examples("4x7kq2m9w1b8r3t6y0zp"))]
    id: String,
    #[schema(examples("your_username"))]
    username: String,
}

#[derive(Validate, Deserialize, ToSchema)]
pub struct SignUpDTO {
    #[validate(custom(function = "is_username"))]
    #[schema(examples("your_username"))]
    pub username: String,

    #[validate(custom(function = "is_password"))]
    #[schema(examples("s3cret-passphrase"))]
    pub password: String,
}

#[derive(Validate, Deserialize, ToSchema)]
pub struct SignInDTO {
    #[validate(custom(function = "is_username"))]
    #[schema(examples("your_username"))]
    pub username: String,

    #[validate(custom(function = "is_password"))]
    #[schema(examples("s3cret-passphrase"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessTokenDTO {
    #[schema(examples("eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9"))]
    pub access_token: String,
    #[schema(examples(1385903))]
    pub expires_at: i64,
}

impl From<SignUpResult> for AccountDTO {
    fn from(val: SignUpResult) -> Self {
        AccountDTO {
            id: val.id,
            username: val.username,
        }
    }
}

impl From<Claims> for AccountDTO {
    fn from(claims: Claims) -> Self {
        AccountDTO {
            id: claims.sub,
            username: claims.username,
        }
    }
}

impl From<SignInResult> for AccessTokenDTO {
    fn from(val: SignInResult) -> Self {
        AccessTokenDTO {
            access_token: val.access_token,
            expires_at: val.expires_at,
        }
    }
}

impl From<SignUpDTO> for SignUpRequest {
    fn from(sign_up: SignUpDTO) -> Self {
        SignUpRequest {
            username: sign_up.username,
            password: sign_up.password,
        }
    }
}

impl From<SignInDTO> for SignInRequest {
    fn from(sign_in: SignInDTO) -> Self {
        SignInRequest {
            username: sign_in.username,
            password: sign_in.password,
        }
    }
}
