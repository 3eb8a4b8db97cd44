use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::middlewares::auth::{AUTHORIZATION_COOKIE, Authenticated};
use crate::api::middlewares::validate::Json;
use crate::domain::error::AppError;
use crate::domain::services::account::AccountService;

use crate::api::dto::account::{AccessTokenDTO, AccountDTO, SignInDTO, SignUpDTO};

use actix_web::{
    HttpResponse,
    cookie::time::OffsetDateTime,
    cookie::{Cookie, SameSite},
    get, post,
    web::Data as State,
};

use utoipa_actix_web::service_config::ServiceConfig;

pub fn routes(cfg: &mut ServiceConfig) {
    cfg.service(signup).service(signin).service(me);
}

#[utoipa::path(
    responses(
        (status = 200, body = AccountDTO, description = "Account Created"),
        (status = 400, body = AppError, example = json!(AppError::example_400())),
        (status = 409, body = AppError, example = json!(AppError::example_409())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    request_body = SignUpDTO,
    tag = "Account",
)]
#[post("/signup")]
pub async fn signup(
    payload: Json<SignUpDTO>,
    account_service: State<Arc<dyn AccountService>>,
) -> ApiResult {
    let sign_up = payload.into_inner();

    let created_account = account_service.signup(sign_up.into()).await?;

    Ok(HttpResponse::Ok().json(AccountDTO::from(created_account)))
}

#[utoipa::path(
    responses(
        (status = 200, body = AccessTokenDTO),
        (status = 400, body = AppError, example = json!(AppError::example_400())),
        (status = 401, body = AppError, example = json!(AppError::example_401())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    request_body = SignInDTO,
    tag = "Account"
)]
#[post("/signin")]
pub async fn signin(
    payload: Json<SignInDTO>,
    account_service: State<Arc<dyn AccountService>>,
) -> ApiResult {
    let sign_in = payload.into_inner();

    let access_token = account_service.signin(sign_in.into()).await?;

    let expires = OffsetDateTime::from_unix_timestamp(access_token.expires_at)
        .map_err(|err| AppError::InternalFailure().trace(&err.to_string()))?;

    let cookie = Cookie::build(AUTHORIZATION_COOKIE, access_token.access_token.as_str())
        .http_only(true)
        .secure(true)
        .path("/api")
        .same_site(SameSite::Strict)
        .expires(expires)
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(AccessTokenDTO::from(access_token)))
}

#[utoipa::path(
    responses(
        (status = 200, body = AccountDTO),
        (status = 401, body = AppError, example = json!(AppError::example_401()))
    ),
    security(("jsonwebtoken" = [])),
    tag = "Account"
)]
#[get("/me")]
pub async fn me(auth: Authenticated) -> ApiResult {
    Ok(HttpResponse::Ok().json(AccountDTO::from(auth.claims)))
}

#[cfg(test)]
mod tests {

    use actix_web::{
        App,
        dev::ServiceResponse,
        http::StatusCode,
        test::{self, TestRequest},
        web,
    };
    use serde::{Deserialize, Serialize};
    use serde_json::{Value, json};
    use tokio::sync::Mutex;
    use utoipa_actix_web::AppExt;

    use super::*;
    use crate::config::HashingConfig;
    use crate::domain::models::account::Account;
    use crate::domain::services::jsonwebtoken::TokenIssuer;
    use crate::domain::services::password::PasswordHasher;
    use crate::infrastructure::repositories::account::mock::AccountRepositoryImpl;
    use crate::services::account::AccountServiceImpl;
    use crate::services::credentials::NonBlankCredentials;
    use crate::services::jsonwebtoken::JsonWebTokenIssuer;
    use crate::services::password::Argon2PasswordHasher;
    use crate::tests::utils::crypto::generate_keypair;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Error {
        kind: String,
        message: String,
    }

    #[derive(Debug, Deserialize)]
    struct AccessToken {
        access_token: String,
        expires_at: i64,
    }

    async fn send(uri: &str, data: Value) -> ServiceResponse {
        let hasher = Arc::new(
            Argon2PasswordHasher::new(&HashingConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap(),
        );

        let repository = Arc::new(AccountRepositoryImpl {
            accounts: Mutex::new(vec![Account {
                id: "acc1".to_string(),
                username: "alice".to_string(),
                password_hash: hasher.hash("secret1").unwrap(),
            }]),
            ..Default::default()
        });

        let token_issuer: Arc<dyn TokenIssuer> =
            Arc::new(JsonWebTokenIssuer::new(generate_keypair(), 60));

        let account_service: Arc<dyn AccountService> = Arc::new(AccountServiceImpl::new(
            repository,
            token_issuer.clone(),
            Arc::new(NonBlankCredentials),
            hasher,
        ));

        let app = test::init_service(
            App::new()
                .into_utoipa_app()
                .configure(routes)
                .into_app()
                .app_data(web::Data::new(account_service))
                .app_data(web::Data::new(token_issuer)),
        )
        .await;

        TestRequest::post()
            .uri(uri)
            .set_json(data)
            .send_request(&app)
            .await
    }

    #[actix_web::test]
    async fn test_signup() {
        let res = send("/signup", json!({ "username": "bob", "password": "hunter22" })).await;

        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;

        assert_eq!(body["username"], "bob");
        assert!(!body["id"].as_str().unwrap().is_empty());
        assert!(body.get("password").is_none());
        assert!(body.get("password_hash").is_none());
    }

    #[actix_web::test]
    async fn test_signup_conflict() {
        let res = send("/signup", json!({ "username": "alice", "password": "other" })).await;

        assert_eq!(res.status(), StatusCode::CONFLICT);

        let err: Error = test::read_body_json(res).await;
        assert_eq!(err.kind, "username_conflict");
    }

    #[actix_web::test]
    async fn test_signup_blank_username() {
        let res = send("/signup", json!({ "username": "   ", "password": "hunter22" })).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let err: Error = test::read_body_json(res).await;
        assert_eq!(err.kind, "invalid_input");
        assert!(err.message.contains("Username is required"));
    }

    #[actix_web::test]
    async fn test_signup_missing_password() {
        let res = send("/signup", json!({ "username": "bob" })).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let err: Error = test::read_body_json(res).await;
        assert_eq!(err.kind, "invalid_input");
    }

    #[actix_web::test]
    async fn test_signin_sets_cookie() {
        let res = send("/signin", json!({ "username": "alice", "password": "secret1" })).await;

        assert_eq!(res.status(), StatusCode::OK);

        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == AUTHORIZATION_COOKIE)
            .unwrap()
            .into_owned();

        let access_token: AccessToken = test::read_body_json(res).await;

        assert!(!access_token.access_token.is_empty());
        assert_eq!(cookie.value(), access_token.access_token);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(
            cookie
                .expires()
                .unwrap()
                .datetime()
                .unwrap()
                .unix_timestamp(),
            access_token.expires_at
        );
    }

    #[actix_web::test]
    async fn test_signin_wrong_password() {
        let res = send("/signin", json!({ "username": "alice", "password": "wrong" })).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().next().is_none());

        let err: Error = test::read_body_json(res).await;
        assert_eq!(err.kind, "invalid_credentials");
    }

    #[actix_web::test]
    async fn test_signin_blank_password() {
        let res = send("/signin", json!({ "username": "alice", "password": "" })).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
