use actix_web::web;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::ApiError;

/// Argon2id with a fresh random salt per password, stored as a PHC string.
pub(crate) struct PasswordHasher<'a> {
    argon2: Argon2<'a>,
}

impl<'a> PasswordHasher<'a> {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    #[inline]
    pub(crate) fn hash(&self, password: &str) -> Result<String, password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);

        Ok(self
            .argon2
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    /// A stored value that is not a valid PHC string never matches.
    #[inline]
    pub(crate) fn verify(&self, password: &str, stored: &str) -> bool {
        PasswordHash::new(stored)
            .map(|parsed| {
                self.argon2
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

/// Hashes on actix's blocking pool; argon2 holds a core for tens of
/// milliseconds per call.
pub(crate) async fn hash_password(
    hasher: web::Data<PasswordHasher<'static>>,
    password: String,
) -> Result<String, ApiError> {
    Ok(blocking(move || hasher.hash(&password)).await??)
}

pub(crate) async fn verify_password(
    hasher: web::Data<PasswordHasher<'static>>,
    password: String,
    stored: String,
) -> Result<bool, ApiError> {
    blocking(move || hasher.verify(&password, &stored)).await
}

async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    Ok(web::block(work).await?)
}
