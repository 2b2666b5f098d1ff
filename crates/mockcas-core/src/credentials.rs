//! HTTP Basic credentials and the shared-secret check
//!
//! The broker authenticates every user against one statically configured
//! secret. The password half of the Basic credential is compared in
//! constant time; the username becomes the ticket's identity.

use base64::{engine::general_purpose::STANDARD, Engine};
use subtle::ConstantTimeEq;

use crate::AuthError;

/// Decoded `Authorization: Basic` credential pair
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    username: String,
    password: String,
}

impl BasicCredentials {
    /// Build a credential pair directly
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parse an `Authorization` header value.
    ///
    /// The value must use the `Basic` scheme and carry standard base64 of
    /// `user:password`. The split happens on the first `:`, so passwords may
    /// contain colons.
    pub fn from_header(value: &str) -> Result<Self, AuthError> {
        let encoded = value
            .strip_prefix("Basic ")
            .ok_or(AuthError::MalformedAuthorization)?;

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| AuthError::MalformedAuthorization)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MalformedAuthorization)?;

        let (username, password) = decoded
            .split_once(':')
            .ok_or(AuthError::MalformedAuthorization)?;

        Ok(Self::new(username, password))
    }

    /// Username half, used as the ticket identity
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password half
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Statically configured password shared by every user
#[derive(Clone)]
pub struct SharedSecret(String);

impl SharedSecret {
    /// Wrap a secret value
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Check a presented password against the secret in constant time
    pub fn verify(&self, password: &str) -> bool {
        constant_time_str_eq(password, &self.0)
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecret")
            .field("length", &self.0.len())
            .finish_non_exhaustive()
    }
}

/// Constant-time string comparison.
///
/// Length is not treated as secret: slices of different length compare
/// unequal immediately.
#[inline]
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
