use thiserror::Error;

pub type HashResult<T> = core::result::Result<T, HashingError>;

#[derive(Error, Debug)]
pub enum HashingError {
    #[error("invalid hashing parameters: {0}")]
    Parameters(String),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// One-way salted password hashing.
///
/// `verify` must compare in constant time. `placeholder` returns a hash made
/// with the same work factor as `hash`, so verifying against it costs the
/// same as verifying against a real account.
pub trait PasswordHasher: 'static + Sync + Send {
    fn hash(&self, password: &str) -> HashResult<String>;
    fn verify(&self, password: &str, hash: &str) -> HashResult<bool>;
    fn placeholder(&self) -> &str;
}
