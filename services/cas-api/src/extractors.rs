//! Axum extractors for login credentials and CAS query parameters

use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::header;
use axum::http::request::Parts;
use mockcas_core::{AuthError, BasicCredentials};

use crate::error::ApiError;

/// Credentials from an `Authorization: Basic` header
///
/// Rejects with `403` when the header is absent or cannot be decoded.
/// Handlers that must validate other input first can take
/// `Result<BasicAuth, ApiError>` instead.
#[derive(Debug, Clone)]
pub struct BasicAuth(pub BasicCredentials);

impl<S> FromRequestParts<S> for BasicAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingAuthorization)?;

        let value = value
            .to_str()
            .map_err(|_| AuthError::MalformedAuthorization)?;

        let credentials = BasicCredentials::from_header(value).map_err(|e| {
            tracing::debug!(error = %e, "Rejected Authorization header");
            e
        })?;

        Ok(Self(credentials))
    }
}

/// Query-string parameters with CAS lookup semantics
///
/// When a key repeats, the first non-empty value wins. Empty values are
/// treated as absent. A query string that fails to decode yields no
/// parameters, so validate endpoints still answer in-band.
#[derive(Debug, Clone, Default)]
pub struct CasParams(HashMap<String, String>);

impl CasParams {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = HashMap::new();
        for (key, value) in pairs {
            if !value.is_empty() {
                params.entry(key).or_insert(value);
            }
        }
        Self(params)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl<S> FromRequestParts<S> for CasParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => pairs,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring undecodable query string");
                Vec::new()
            }
        };
        Ok(Self::from_pairs(pairs))
    }
}
