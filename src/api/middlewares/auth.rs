use crate::domain::error::AppError;
use crate::domain::models::jsonwebtoken::Claims;
use crate::domain::services::jsonwebtoken::TokenIssuer;
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures::future::{Ready, ready};
use std::sync::Arc;

pub const AUTHORIZATION_COOKIE: &str = "Authorization";

/// Extracts and validates the bearer token of the current request, taken from
/// the `Authorization: Bearer` header or else the `Authorization` cookie.
#[derive(Debug)]
pub struct Authenticated {
    pub claims: Claims,
}

/// The auth scheme is matched case-insensitively.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn get_token(req: &HttpRequest) -> Result<String, AppError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token);

    if let Some(token) = header {
        return Ok(token.to_string());
    }

    req.cookie(AUTHORIZATION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(AppError::InvalidCredentials)
}

fn authenticate(req: &HttpRequest) -> Result<Authenticated, AppError> {
    let token_issuer = req
        .app_data::<web::Data<Arc<dyn TokenIssuer>>>()
        .ok_or_else(|| AppError::InternalFailure().trace("TokenIssuer is not registered"))?;

    let claims = token_issuer.validate(&get_token(req)?)?;

    Ok(Authenticated { claims })
}

impl FromRequest for Authenticated {
    type Error = AppError;
    type Future = Ready<Result<Authenticated, AppError>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
