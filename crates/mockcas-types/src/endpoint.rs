//! Validate endpoint variants

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// One of the three validate wire variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    /// CAS 1.0 plain-text validation
    Validate,
    /// CAS 2.0 XML validation
    ServiceValidate,
    /// SAML 1.1 SOAP validation
    SamlValidate,
}

impl Endpoint {
    /// All endpoints in dispatch order
    pub const ALL: [Endpoint; 3] = [Self::Validate, Self::ServiceValidate, Self::SamlValidate];

    /// Path segment, also the resolver's directory name
    pub fn name(self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::ServiceValidate => "serviceValidate",
            Self::SamlValidate => "samlValidate",
        }
    }

    /// Response content type
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Validate => "text/plain",
            Self::ServiceValidate | Self::SamlValidate => "text/xml",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Endpoint {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| TypesError::UnknownEndpoint(s.to_string()))
    }
}
