use crate::domain::error::{AppError, AppResult};
use crate::domain::models::jsonwebtoken::{AccessToken, Claims, TokenClaims};
use crate::domain::services::jsonwebtoken::{TokenError, TokenIssuer};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::errors::{Error as JsonWebTokenError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

#[derive(Clone)]
pub struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    pub fn from_rsa_pem(
        private_key: Vec<u8>,
        public_key: Vec<u8>,
    ) -> Result<Self, JsonWebTokenError> {
        Ok(KeyPair {
            encoding: EncodingKey::from_rsa_pem(&private_key)?,
            decoding: DecodingKey::from_rsa_pem(&public_key)?,
        })
    }
}

/// RS256 bearer tokens carrying the account id and username.
pub struct JsonWebTokenIssuer {
    keys: KeyPair,
    lifetime_minutes: i64,
}

impl JsonWebTokenIssuer {
    pub fn new(keys: KeyPair, lifetime_minutes: i64) -> Self {
        JsonWebTokenIssuer {
            keys,
            lifetime_minutes,
        }
    }
}

impl TokenIssuer for JsonWebTokenIssuer {
    fn issue(&self, claims: TokenClaims) -> Result<AccessToken, TokenError> {
        let now = Utc::now();

        let expiration = TimeDelta::try_minutes(self.lifetime_minutes)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(TokenError::Expiration)?
            .timestamp();

        let claims = Claims {
            sub: claims.subject_id,
            username: claims.username,
            exp: expiration as usize,
            iat: now.timestamp() as usize,
        };

        let header = Header::new(Algorithm::RS256);

        let token = encode(&header, &claims, &self.keys.encoding)
            .map_err(|err| TokenError::Encoding(err.to_string()))?;

        Ok(AccessToken { token, expiration })
    }

    fn validate(&self, token: &str) -> AppResult<Claims> {
        match decode::<Claims>(
            token,
            &self.keys.decoding,
            &Validation::new(Algorithm::RS256),
        ) {
            Ok(token) => Ok(token.claims),
            Err(error) => match error.kind() {
                ErrorKind::ExpiredSignature
                | ErrorKind::ImmatureSignature
                | ErrorKind::InvalidToken
                | ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidIssuer
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => Err(AppError::InvalidCredentials()),
                _ => Err(AppError::InternalFailure().trace(&format!("{error:?}"))),
            },
        }
    }
}
