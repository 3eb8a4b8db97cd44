pub mod account;
pub mod credentials;
pub mod jsonwebtoken;
pub mod password;
