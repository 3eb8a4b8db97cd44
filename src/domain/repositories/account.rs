use async_trait::async_trait;

use crate::domain::models::account::{Account, CreateAccount};

use super::repository::RepositoryResult;

/// Account storage. Implementations must enforce username uniqueness
/// themselves and report a clash as `RepositoryError::UniqueViolation`.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<Account>>;
    async fn create(&self, new_account: CreateAccount) -> RepositoryResult<Account>;
}
