use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as Argon2Error, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use uuid::Uuid;

use crate::config::HashingConfig;
use crate::domain::services::password::{HashResult, HashingError, PasswordHasher};

/// Argon2id with a work factor fixed at construction.
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
    placeholder: String,
}

impl Argon2PasswordHasher {
    pub fn new(config: &HashingConfig) -> HashResult<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|err| HashingError::Parameters(err.to_string()))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        // Random input: nothing can ever verify against it.
        let placeholder = encrypt_password(&argon2, &Uuid::new_v4().to_string())?;

        Ok(Self {
            argon2,
            placeholder,
        })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> HashResult<String> {
        encrypt_password(&self.argon2, password)
    }

    fn verify(&self, password: &str, hash: &str) -> HashResult<bool> {
        let hash =
            PasswordHash::new(hash).map_err(|err| HashingError::MalformedHash(err.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &hash) {
            Ok(()) => Ok(true),
            Err(Argon2Error::Password) => Ok(false),
            Err(err) => Err(HashingError::Hash(err.to_string())),
        }
    }

    fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

fn encrypt_password(argon2: &Argon2<'_>, password: &str) -> HashResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| HashingError::Hash(err.to_string()))
}
