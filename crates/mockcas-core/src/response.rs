//! Response formatting for the three validate variants
//!
//! - Plain text (`/validate`): body verbatim, or the fixed `no\n\n` marker
//! - XML (`/serviceValidate`): body verbatim, or a `cas:authenticationFailure`
//!   document carrying the error and detail codes
//! - SOAP (`/samlValidate`): the prepared body is a template filled with a
//!   fresh response id, timestamp and recipient; failures render a
//!   `samlp:RequestDenied` envelope
//!
//! Every value interpolated into XML is escaped.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use mockcas_types::Endpoint;
use quick_xml::escape::escape;
use uuid::Uuid;

use crate::{template, ProtocolError, ProtocolResult};

/// Failure body for the plain-text variant
pub const CAS1_FAILURE: &str = "no\n\n";

/// CAS 2.0 XML namespace
pub const CAS_NAMESPACE: &str = "http://www.yale.edu/tp/cas";

/// SOAP 1.1 envelope namespace
pub const SOAP_ENVELOPE_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// SAML 1.0/1.1 protocol namespace
pub const SAML_PROTOCOL_NAMESPACE: &str = "urn:oasis:names:tc:SAML:1.0:protocol";

/// SAML 1.0/1.1 assertion namespace
pub const SAML_ASSERTION_NAMESPACE: &str = "urn:oasis:names:tc:SAML:1.0:assertion";

/// Body and content type ready for the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    pub content_type: &'static str,
    pub body: String,
}

/// Formatter selected per validate endpoint
#[derive(Debug, Clone)]
pub enum ResponseFormat {
    /// CAS 1.0 `/validate`: verbatim body or `no\n\n`
    PlainText,
    /// CAS 2.0 `/serviceValidate`: verbatim body or `cas:authenticationFailure`
    Xml,
    /// SAML 1.1 `/samlValidate`: filled template or `samlp:RequestDenied`
    Soap(SamlEnvelope),
}

impl ResponseFormat {
    /// Pick the formatter for `endpoint`.
    ///
    /// The SOAP formatter captures a fresh response id and timestamp, so
    /// build one per request.
    pub fn for_endpoint(endpoint: Endpoint, target: Option<&str>) -> Self {
        match endpoint {
            Endpoint::Validate => Self::PlainText,
            Endpoint::ServiceValidate => Self::Xml,
            Endpoint::SamlValidate => Self::Soap(SamlEnvelope::new(target)),
        }
    }

    /// Endpoint this formatter renders for
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::PlainText => Endpoint::Validate,
            Self::Xml => Endpoint::ServiceValidate,
            Self::Soap(_) => Endpoint::SamlValidate,
        }
    }

    /// Render a validation outcome
    pub fn render(&self, outcome: &ProtocolResult<Arc<str>>) -> RenderedResponse {
        let body = match (self, outcome) {
            (Self::PlainText | Self::Xml, Ok(body)) => body.to_string(),
            (Self::PlainText, Err(_)) => CAS1_FAILURE.to_string(),
            (Self::Xml, Err(err)) => ServiceResponseFailure::new(err).render(),
            (Self::Soap(envelope), Ok(body)) => envelope.render_success(body),
            (Self::Soap(envelope), Err(err)) => envelope.render_failure(err),
        };

        RenderedResponse {
            content_type: self.endpoint().content_type(),
            body,
        }
    }
}

/// CAS 2.0 `cas:authenticationFailure` document
#[derive(Debug, Clone, Copy)]
pub struct ServiceResponseFailure<'a> {
    error: &'a ProtocolError,
}

impl<'a> ServiceResponseFailure<'a> {
    /// Failure document for `error`
    pub fn new(error: &'a ProtocolError) -> Self {
        Self { error }
    }

    /// Serialize with the error and detail codes XML-escaped
    pub fn render(&self) -> String {
        format!(
            "<cas:serviceResponse xmlns:cas='{ns}'>\n  \
             <cas:authenticationFailure code=\"{code}\">\n      \
             {detail}\n  \
             </cas:authenticationFailure>\n\
             </cas:serviceResponse>",
            ns = CAS_NAMESPACE,
            code = escape(self.error.error_code()),
            detail = escape(self.error.detail_code()),
        )
    }
}

/// Per-response SOAP context: response id, issue instant and recipient
#[derive(Debug, Clone)]
pub struct SamlEnvelope {
    response_id: Uuid,
    issue_instant: DateTime<Utc>,
    recipient: String,
}

impl SamlEnvelope {
    /// Fresh envelope context for one response
    pub fn new(recipient: Option<&str>) -> Self {
        Self::with_parts(Uuid::new_v4(), Utc::now(), recipient.unwrap_or_default())
    }

    /// Envelope context with explicit parts
    pub fn with_parts(
        response_id: Uuid,
        issue_instant: DateTime<Utc>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            response_id,
            issue_instant,
            recipient: recipient.into(),
        }
    }

    /// `ResponseID` written into the envelope
    pub fn response_id(&self) -> Uuid {
        self.response_id
    }

    /// `IssueInstant` value, e.g. `2024-05-01T12:00:00.000Z`
    pub fn issue_instant(&self) -> String {
        self.issue_instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// `Recipient` (the request's `TARGET`, unescaped; empty when absent)
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Fill `{id}`, `{now}` and `{service}` in a prepared success body
    pub fn render_success(&self, template: &str) -> String {
        let id = self.response_id.to_string();
        let now = self.issue_instant();
        let service = escape(self.recipient.as_str());

        template::render(template, |name| match name {
            "id" => Some(id.as_str()),
            "now" => Some(now.as_str()),
            "service" => Some(&*service),
            _ => None,
        })
    }

    /// `samlp:RequestDenied` envelope for a failed validation
    pub fn render_failure(&self, error: &ProtocolError) -> String {
        format!(
            r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="{soap}">
  <SOAP-ENV:Header />
  <SOAP-ENV:Body>
    <Response xmlns="{samlp}" xmlns:saml="{saml}"
    xmlns:samlp="{samlp}" xmlns:xsd="http://www.w3.org/2001/XMLSchema"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" IssueInstant="{now}"
    MajorVersion="1" MinorVersion="1" Recipient="{recipient}"
    ResponseID="{id}">
      <Status>
        <StatusCode Value="samlp:RequestDenied" />
        <StatusMessage>{code}</StatusMessage>
        <StatusDetail>{detail}</StatusDetail>
      </Status>
    </Response>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#,
            soap = SOAP_ENVELOPE_NAMESPACE,
            samlp = SAML_PROTOCOL_NAMESPACE,
            saml = SAML_ASSERTION_NAMESPACE,
            now = self.issue_instant(),
            recipient = escape(self.recipient.as_str()),
            id = self.response_id,
            code = escape(error.error_code()),
            detail = escape(error.detail_code()),
        )
    }
}
