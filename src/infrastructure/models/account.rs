use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::domain::models::account::{Account, CreateAccount};

#[derive(Debug, Deserialize)]
pub struct SurrealAccount {
    id: Thing,
    username: String,
    password_hash: String,
}

#[derive(Serialize)]
pub struct SurrealAccountCreate {
    username: String,
    password_hash: String,
}

impl From<CreateAccount> for SurrealAccountCreate {
    fn from(acc: CreateAccount) -> Self {
        SurrealAccountCreate {
            username: acc.username,
            password_hash: acc.password_hash,
        }
    }
}

impl From<SurrealAccount> for Account {
    fn from(acc: SurrealAccount) -> Self {
        Account {
            id: acc.id.id.to_string(),
            username: acc.username,
            password_hash: acc.password_hash,
        }
    }
}
