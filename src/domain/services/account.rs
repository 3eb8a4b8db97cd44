use async_trait::async_trait;

use crate::domain::error::AppResult;
use crate::domain::models::account::{SignInRequest, SignInResult, SignUpRequest, SignUpResult};

#[async_trait]
pub trait AccountService: 'static + Sync + Send {
    async fn signup(&self, request: SignUpRequest) -> AppResult<SignUpResult>;
    async fn signin(&self, request: SignInRequest) -> AppResult<SignInResult>;
}
