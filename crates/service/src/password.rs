use argon2::{
    password_hash::{PasswordHasher as _, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::errors::ServiceError;

/// One-way credential hasher. Plaintext goes in, an opaque storable
/// string comes out; there is deliberately no way back.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, ServiceError>;
}

/// Argon2 with default parameters and a fresh random salt per call.
#[derive(Default)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| ServiceError::Hash(e.to_string()))?
            .to_string();
        Ok(hash)
    }
}

/// Transparent hasher for tests and doc examples.
pub mod mock {
    use super::*;

    #[derive(Default)]
    pub struct PlainPasswordHasher;

    impl PasswordHasher for PlainPasswordHasher {
        fn hash(&self, plain: &str) -> Result<String, ServiceError> {
            Ok(format!("hashed:{plain}"))
        }
    }
}
