use thiserror::Error;

pub type RepositoryResult<T> = core::result::Result<T, RepositoryError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("unique constraint violated by `{0}`")]
    UniqueViolation(String),
    #[error("record was not returned by create")]
    NotCreated,
    #[error("database error: {0}")]
    Database(String),
}
