use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;

use crate::config::AppConfig;
use crate::domain::repositories::account::AccountRepository;
use crate::domain::services::account::AccountService;
use crate::domain::services::credentials::CredentialValidator;
use crate::domain::services::jsonwebtoken::TokenIssuer;
use crate::domain::services::password::{HashResult, PasswordHasher};

use crate::services::account::AccountServiceImpl;
use crate::services::credentials::NonBlankCredentials;
use crate::services::jsonwebtoken::{JsonWebTokenIssuer, KeyPair};
use crate::services::password::Argon2PasswordHasher;

use crate::infrastructure::repositories::account::AccountRepositoryImpl;

pub struct Container {
    pub account_service: Arc<dyn AccountService>,
    pub token_issuer: Arc<dyn TokenIssuer>,
}

impl Container {
    pub fn new(conn: Surreal<Client>, keys: KeyPair, config: &AppConfig) -> HashResult<Self> {
        let db = Arc::new(conn);

        let token_issuer: Arc<dyn TokenIssuer> = Arc::new(JsonWebTokenIssuer::new(
            keys,
            config.jsonwebtoken.expiration_minutes,
        ));

        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new(&config.hashing)?);

        Ok(Container {
            account_service: account_service(db, token_issuer.clone(), hasher),
            token_issuer,
        })
    }
}

fn account_service(
    db: Arc<Surreal<Client>>,
    token_issuer: Arc<dyn TokenIssuer>,
    hasher: Arc<dyn PasswordHasher>,
) -> Arc<dyn AccountService> {
    let account_repository: Arc<dyn AccountRepository> = Arc::new(AccountRepositoryImpl::new(db));

    let validator: Arc<dyn CredentialValidator> = Arc::new(NonBlankCredentials);

    Arc::new(AccountServiceImpl::new(
        account_repository,
        token_issuer,
        validator,
        hasher,
    ))
}
