use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;

use crate::domain::models::account::{Account, CreateAccount};
use crate::domain::repositories::account::AccountRepository;
use crate::domain::repositories::repository::{RepositoryError, RepositoryResult};
use crate::infrastructure::databases::surrealdb::{is_index_violation, is_transaction_conflict};
use crate::infrastructure::models::account::{SurrealAccount, SurrealAccountCreate};

pub struct AccountRepositoryImpl {
    db: Arc<Surreal<Client>>,
}

impl AccountRepositoryImpl {
    pub fn new(db: Arc<Surreal<Client>>) -> Self {
        Self { db }
    }
}

const ACCOUNT: &str = "account";
const USERNAME_INDEX: &str = "account_username_unique";

#[async_trait]
impl AccountRepository for AccountRepositoryImpl {
    async fn create(&self, new_account: CreateAccount) -> RepositoryResult<Account> {
        let username = new_account.username.clone();

        let created: Result<Option<SurrealAccount>, surrealdb::Error> = self
            .db
            .create(ACCOUNT)
            .content(SurrealAccountCreate::from(new_account))
            .await;

        let account = match created {
            Ok(account) => account,
            Err(err) if is_index_violation(&err, USERNAME_INDEX) => {
                return Err(RepositoryError::UniqueViolation(username));
            }
            Err(err) if is_transaction_conflict(&err) => {
                return Err(settle_conflict(self, username, err.into()).await);
            }
            Err(err) => return Err(err.into()),
        };

        account.map(Into::into).ok_or(RepositoryError::NotCreated)
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<Account>> {
        let account: Option<SurrealAccount> = self
            .db
            .query("SELECT * FROM type::table($table) WHERE username = type::string($username) LIMIT 1")
            .bind(("table", ACCOUNT))
            .bind(("username", username.to_owned()))
            .await?
            .take(0)?;

        Ok(account.map(Into::into))
    }
}

/// Resolves a create that lost a write conflict. The username counts as taken
/// when the competing row is visible by now, otherwise `error` is kept.
pub async fn settle_conflict<R>(
    repository: &R,
    username: String,
    error: RepositoryError,
) -> RepositoryError
where
    R: AccountRepository + ?Sized,
{
    match repository.find_by_username(&username).await {
        Ok(Some(_)) => RepositoryError::UniqueViolation(username),
        _ => error,
    }
}

#[cfg(test)]
pub mod mock {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use tokio::sync::Mutex;

    use super::*;

    /// In-memory store with the same uniqueness guarantee as the database.
    ///
    /// `stale_reads` hides every account from lookups so that callers race
    /// straight into the constraint, `omit_ids` returns records without an id
    /// and `fail_with` makes every create fail. `conflict_on_create` lets a
    /// competing writer commit the same username first, so the create fails
    /// the way the engine reports a write conflict.
    #[derive(Default)]
    pub struct AccountRepositoryImpl {
        pub accounts: Mutex<Vec<Account>>,
        pub stale_reads: AtomicBool,
        pub omit_ids: AtomicBool,
        pub conflict_on_create: AtomicBool,
        pub fail_with: Mutex<Option<RepositoryError>>,
        pub created: AtomicUsize,
        pub attempted: AtomicUsize,
    }

    pub const WRITE_CONFLICT: &str = "Failed to commit transaction due to a read or write conflict. This transaction can be retried";

    impl AccountRepositoryImpl {
        pub fn writes(&self) -> usize {
            self.created.load(Ordering::SeqCst)
        }

        pub fn attempts(&self) -> usize {
            self.attempted.load(Ordering::SeqCst)
        }

        pub async fn len(&self) -> usize {
            self.accounts.lock().await.len()
        }
    }

    #[async_trait]
    impl AccountRepository for AccountRepositoryImpl {
        async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<Account>> {
            if self.stale_reads.load(Ordering::SeqCst) {
                return Ok(None);
            }

            let accounts = self.accounts.lock().await;

            Ok(accounts.iter().find(|a| a.username == username).cloned())
        }

        async fn create(&self, account: CreateAccount) -> RepositoryResult<Account> {
            self.attempted.fetch_add(1, Ordering::SeqCst);

            if let Some(error) = self.fail_with.lock().await.clone() {
                return Err(error);
            }

            if self.conflict_on_create.load(Ordering::SeqCst) {
                self.accounts.lock().await.push(Account {
                    id: "racer".to_string(),
                    username: account.username.clone(),
                    password_hash: account.password_hash,
                });

                let error = RepositoryError::Database(WRITE_CONFLICT.to_string());
                return Err(settle_conflict(self, account.username, error).await);
            }

            let mut accounts = self.accounts.lock().await;

            if accounts.iter().any(|a| a.username == account.username) {
                return Err(RepositoryError::UniqueViolation(account.username));
            }

            if self.omit_ids.load(Ordering::SeqCst) {
                return Ok(Account {
                    id: String::new(),
                    username: account.username,
                    password_hash: account.password_hash,
                });
            }

            let acc = Account {
                id: format!("acc{}", accounts.len() + 1),
                username: account.username,
                password_hash: account.password_hash,
            };

            accounts.push(acc.clone());
            self.created.fetch_add(1, Ordering::SeqCst);

            Ok(acc)
        }
    }
}
