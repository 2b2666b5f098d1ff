//! Protocol dispatcher
//!
//! Maps each request path onto one of four operations. Every operation
//! answers both GET and POST; anything else falls through to `404`.

use axum::routing::{get, MethodRouter};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

/// Operations the server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Validate,
    ServiceValidate,
    SamlValidate,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Self::Login,
        Self::Validate,
        Self::ServiceValidate,
        Self::SamlValidate,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Validate => "/validate",
            Self::ServiceValidate => "/serviceValidate",
            Self::SamlValidate => "/samlValidate",
        }
    }

    fn method_router(self) -> MethodRouter<AppState> {
        match self {
            Self::Login => get(handlers::login).post(handlers::login),
            Self::Validate => get(handlers::validate).post(handlers::validate),
            Self::ServiceValidate => {
                get(handlers::service_validate).post(handlers::service_validate)
            }
            Self::SamlValidate => get(handlers::saml_validate).post(handlers::saml_validate),
        }
    }
}

/// Build the HTTP router with its middleware stack
pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout();

    let routes = Operation::ALL
        .into_iter()
        .fold(Router::new(), |router, op| {
            router.route(op.path(), op.method_router())
        });

    // Middleware stack (outermost first)
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::new(request_timeout));

    routes
        .fallback(not_found)
        .layer(middleware)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
