//! Validate handlers for the CAS 1.0, CAS 2.0 and SAML 1.1 variants
//!
//! All three share one redemption path and always answer `200`; failures
//! are rendered in the variant's own format.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use mockcas_core::{extract_assertion_artifact, ResponseFormat};
use mockcas_types::Endpoint;

use crate::extractors::CasParams;
use crate::state::AppState;

/// GET|POST /validate?ticket=<id>&service=<url>
pub async fn validate(State(state): State<AppState>, params: CasParams) -> Response {
    let format = ResponseFormat::for_endpoint(Endpoint::Validate, None);
    redeem_and_render(&state, format, params.get("ticket"), params.get("service")).await
}

/// GET|POST /serviceValidate?ticket=<id>&service=<url>
pub async fn service_validate(State(state): State<AppState>, params: CasParams) -> Response {
    let format = ResponseFormat::for_endpoint(Endpoint::ServiceValidate, None);
    redeem_and_render(&state, format, params.get("ticket"), params.get("service")).await
}

/// POST /samlValidate?TARGET=<url>
///
/// The ticket is the `samlp:AssertionArtifact` carried in the SOAP body.
pub async fn saml_validate(
    State(state): State<AppState>,
    params: CasParams,
    body: Bytes,
) -> Response {
    let target = params.get("TARGET");
    let artifact = std::str::from_utf8(&body)
        .ok()
        .and_then(extract_assertion_artifact);

    let format = ResponseFormat::for_endpoint(Endpoint::SamlValidate, target);
    redeem_and_render(&state, format, artifact.as_deref(), target).await
}

async fn redeem_and_render(
    state: &AppState,
    format: ResponseFormat,
    ticket: Option<&str>,
    service: Option<&str>,
) -> Response {
    let endpoint = format.endpoint();
    let outcome = state.cas.validate(endpoint, ticket, service).await;

    match &outcome {
        Ok(_) => tracing::info!(endpoint = %endpoint, "Ticket validated"),
        Err(e) => tracing::info!(
            endpoint = %endpoint,
            error_code = e.error_code(),
            detail_code = e.detail_code(),
            "Validation failed"
        ),
    }

    let rendered = format.render(&outcome);
    ([(header::CONTENT_TYPE, rendered.content_type)], rendered.body).into_response()
}
