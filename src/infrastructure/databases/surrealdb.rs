use crate::config::SurrealDbConfig;
use crate::domain::repositories::repository::RepositoryError;

use surrealdb::{
    Error, Surreal,
    engine::remote::ws::{Client, Ws},
    opt::auth::Root,
};

pub async fn connect(db_config: &SurrealDbConfig) -> Result<Surreal<Client>, Error> {
    let db = Surreal::new::<Ws>(format!("{}:{}", db_config.host, db_config.port)).await?;

    db.signin(Root {
        username: db_config.username.as_str(),
        password: db_config.password.as_str(),
    })
    .await?;

    db.use_ns(db_config.namespace.as_str())
        .use_db(db_config.database.as_str())
        .await?;

    Ok(db)
}

/// SurrealDB reports unique index clashes as "Database index `<name>` already
/// contains <value>, with record `<id>`", over both embedded and remote engines.
pub fn is_index_violation(error: &Error, index: &str) -> bool {
    let message = error.to_string();

    message.contains(&format!("`{index}`")) && message.contains("already contains")
}

/// Concurrent writes that collide inside the engine fail the losing commit
/// with "Failed to commit transaction due to a read or write conflict".
pub fn is_transaction_conflict(error: &Error) -> bool {
    error.to_string().contains("read or write conflict")
}

impl From<Error> for RepositoryError {
    fn from(error: Error) -> Self {
        RepositoryError::Database(error.to_string())
    }
}
