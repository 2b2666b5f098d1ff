//! Login handler

use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use mockcas_core::LoginTarget;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{BasicAuth, CasParams};
use crate::state::AppState;

/// GET|POST /login?service=<url> or ?TARGET=<url>
///
/// Checks the Basic credential against the shared secret and redirects to
/// the service with a fresh ticket (`ticket=` for CAS, `SAMLart=` when the
/// target came from `TARGET`).
pub async fn login(
    State(state): State<AppState>,
    params: CasParams,
    auth: Result<BasicAuth, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let target = LoginTarget::from_params(params.get("service"), params.get("TARGET"))
        .ok_or(ApiError::MissingTarget)?;
    let BasicAuth(credentials) = auth?;

    let ticket = state.cas.login(&target, &credentials)?;

    tracing::info!(
        user = credentials.username(),
        service = target.service(),
        flavor = ?target.flavor(),
        ticket = ticket.redacted(),
        "Ticket issued"
    );

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, target.redirect_location(&ticket))],
    ))
}
