//! Login target normalization and redirect construction

use mockcas_types::{TicketFlavor, TicketId};

/// Service URL a login redirects back to, and the flavor it was named with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginTarget {
    service: String,
    flavor: TicketFlavor,
}

impl LoginTarget {
    /// Build a target from the `service` and `TARGET` query values.
    ///
    /// `service` takes precedence; falling back to `TARGET` selects the
    /// SAML flavor. Empty values count as absent. A URL that could not be
    /// sent back in a `Location` header (ASCII control characters other
    /// than tab) is rejected.
    pub fn from_params(service: Option<&str>, target: Option<&str>) -> Option<Self> {
        fn non_empty(v: Option<&str>) -> Option<&str> {
            v.filter(|s| !s.is_empty())
        }

        let (service, flavor) = match (non_empty(service), non_empty(target)) {
            (Some(service), _) => (service, TicketFlavor::Cas),
            (None, Some(target)) => (target, TicketFlavor::Saml),
            (None, None) => return None,
        };

        if !is_header_safe(service) {
            tracing::debug!("Login target contains control characters");
            return None;
        }

        Some(Self {
            service: service.to_string(),
            flavor,
        })
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn flavor(&self) -> TicketFlavor {
        self.flavor
    }

    /// `Location` for the post-login redirect: the service URL with the
    /// ticket appended under the flavor's parameter name.
    pub fn redirect_location(&self, ticket: &TicketId) -> String {
        let separator = if self.service.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}",
            self.service,
            separator,
            self.flavor.ticket_param(),
            ticket
        )
    }
}

fn is_header_safe(value: &str) -> bool {
    !value.chars().any(|c| c.is_ascii_control() && c != '\t')
}
