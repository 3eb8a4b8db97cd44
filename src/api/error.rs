use actix_web::{
    HttpResponse, ResponseError,
    http::{StatusCode, header::ContentType},
    web::Json,
};
use tracing::error;

use crate::domain::error::{AppError, AppResult, ErrorKind};

pub type ApiResult = AppResult<HttpResponse>;

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        if let Some(trace) = &self.trace {
            error!(
                kind = %self.kind,
                reference = self.reference.as_deref().unwrap_or_default(),
                trace,
                "request failed"
            );
        }

        HttpResponse::build(self.status_code())
            .content_type(ContentType::json())
            .json(Json(self))
    }

    fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::UsernameConflict => StatusCode::CONFLICT,
            ErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ErrorKind::InternalFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
