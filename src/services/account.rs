use std::sync::Arc;

use crate::domain::{
    error::{AppError, AppResult, ErrorKind, message},
    models::account::{
        Account, CreateAccount, SignInRequest, SignInResult, SignUpRequest, SignUpResult,
    },
    models::jsonwebtoken::TokenClaims,
    repositories::account::AccountRepository,
    services::account::AccountService,
    services::credentials::CredentialValidator,
    services::jsonwebtoken::TokenIssuer,
    services::password::{HashResult, PasswordHasher},
};

use actix_web::web;
use async_trait::async_trait;
use tracing::{error, info, instrument, warn};

pub struct AccountServiceImpl {
    repository: Arc<dyn AccountRepository>,
    token_issuer: Arc<dyn TokenIssuer>,
    validator: Arc<dyn CredentialValidator>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AccountServiceImpl {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        token_issuer: Arc<dyn TokenIssuer>,
        validator: Arc<dyn CredentialValidator>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            repository,
            token_issuer,
            validator,
            hasher,
        }
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        Ok(self.repository.find_by_username(username).await?)
    }

    /// Runs a hasher call on the blocking thread pool.
    async fn hashing<T, F>(&self, task: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn PasswordHasher) -> HashResult<T> + Send + 'static,
    {
        let hasher = self.hasher.clone();

        web::block(move || task(hasher.as_ref()))
            .await
            .map_err(|err| AppError::InternalFailure().trace(&err.to_string()))?
            .map_err(AppError::from)
    }

    /// Burns one verification so that unknown usernames cost as much as a
    /// wrong password.
    async fn verify_placeholder(&self, password: String) {
        let _ = self
            .hashing(move |hasher| hasher.verify(&password, hasher.placeholder()))
            .await;
    }
}

#[async_trait]
impl AccountService for AccountServiceImpl {
    #[instrument(skip_all, fields(username = %request.username))]
    async fn signup(&self, request: SignUpRequest) -> AppResult<SignUpResult> {
        self.validator
            .validate(&request.username, &request.password)?;

        if self.find_by_username(&request.username).await?.is_some() {
            info!("username already registered");
            return Err(AppError::UsernameConflict(message::USERNAME_CONFLICT));
        }

        let password = request.password;
        let password_hash = self
            .hashing(move |hasher| hasher.hash(&password))
            .await?;

        let account = self
            .repository
            .create(CreateAccount {
                username: request.username,
                password_hash,
            })
            .await
            .map_err(AppError::from)
            .inspect_err(|err| {
                if err.kind == ErrorKind::UsernameConflict {
                    warn!("username claimed concurrently");
                }
            })?;

        if account.id.is_empty() {
            return Err(AppError::InternalFailure().trace("account id not generated"));
        }

        info!(account_id = %account.id, "account created");

        Ok(SignUpResult {
            id: account.id,
            username: account.username,
        })
    }

    #[instrument(skip_all, fields(username = %request.username))]
    async fn signin(&self, request: SignInRequest) -> AppResult<SignInResult> {
        self.validator
            .validate(&request.username, &request.password)?;

        let account = match self.find_by_username(&request.username).await? {
            Some(account) => account,
            None => {
                self.verify_placeholder(request.password).await;
                return Err(AppError::InvalidCredentials());
            }
        };

        let password = request.password;
        let password_hash = account.password_hash;

        if !self
            .hashing(move |hasher| hasher.verify(&password, &password_hash))
            .await?
        {
            return Err(AppError::InvalidCredentials());
        }

        let access_token = self
            .token_issuer
            .issue(TokenClaims {
                subject_id: account.id,
                username: account.username,
            })
            .map_err(AppError::from)
            .inspect_err(|err| error!(reference = ?err.reference, "token issuance failed"))?;

        Ok(SignInResult {
            access_token: access_token.token,
            expires_at: access_token.expiration,
        })
    }
}
