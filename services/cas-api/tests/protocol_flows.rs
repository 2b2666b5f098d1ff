//! End-to-end protocol tests
//!
//! Drives the full router (middleware included) with `oneshot` requests:
//! login redirects, the three validate variants and transport errors.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine};
use cas_api::{build_router, AppState, Config};
use clap::Parser;
use mockcas_core::{CasService, MemoryResolver, SharedSecret};
use mockcas_types::Endpoint;
use tower::ServiceExt;

const SECRET: &str = "s3cret";

// ============================================================================
// Helpers
// ============================================================================

fn resolver() -> MemoryResolver {
    MemoryResolver::new()
        .with(Endpoint::Validate, "alice", "yes\nalice\n")
        .with(
            Endpoint::ServiceValidate,
            "alice",
            "<cas:serviceResponse><cas:authenticationSuccess><cas:user>alice</cas:user>\
             </cas:authenticationSuccess></cas:serviceResponse>",
        )
        .with(
            Endpoint::SamlValidate,
            "alice",
            "<Response ResponseID=\"{id}\" IssueInstant=\"{now}\" Recipient=\"{service}\">\
             <NameIdentifier>alice</NameIdentifier></Response>",
        )
}

fn app() -> Router {
    app_with_state().0
}

fn app_with_state() -> (Router, AppState) {
    let cas = CasService::new(SharedSecret::new(SECRET), Arc::new(resolver()));
    let state = AppState::new(cas, Duration::from_secs(5));
    (build_router(state.clone()), state)
}

fn basic(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn login_request(query: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(format!("/login?{query}"));
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

fn saml_request(target: &str, artifact: Option<&str>) -> Request<Body> {
    let inner = artifact
        .map(|a| format!("<samlp:AssertionArtifact>{a}</samlp:AssertionArtifact>"))
        .unwrap_or_default();
    let body = format!(
        r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Header/>
  <SOAP-ENV:Body>
    <samlp:Request xmlns:samlp="urn:oasis:names:tc:SAML:1.0:protocol"
        MajorVersion="1" MinorVersion="1" RequestID="_r1">
      {inner}
    </samlp:Request>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#
    );

    Request::builder()
        .method(Method::POST)
        .uri(format!("/samlValidate?TARGET={target}"))
        .header(header::CONTENT_TYPE, "text/xml")
        .body(Body::from(body))
        .unwrap()
}

/// Log `alice` in against `service` and return the issued ticket
async fn login(app: &Router, service: &str) -> String {
    let response = app
        .clone()
        .oneshot(login_request(
            &format!("service={service}"),
            Some(basic("alice", SECRET).as_str()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);

    let location = location_of(&response);
    let (_, ticket) = location.split_once("ticket=").unwrap();
    ticket.to_string()
}

fn location_of(response: &Response<Body>) -> String {
    response.headers()[header::LOCATION].to_str().unwrap().to_string()
}

fn content_type(response: &Response<Body>) -> &str {
    response.headers()[header::CONTENT_TYPE].to_str().unwrap()
}

async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_redirects_with_ticket() {
    let app = app();
    let response = app
        .oneshot(login_request("service=http://svc", Some(basic("alice", SECRET).as_str())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = location_of(&response);
    let ticket = location.strip_prefix("http://svc?ticket=ST-").unwrap();
    assert!(uuid_like(ticket), "unexpected ticket suffix: {ticket}");
}

#[tokio::test]
async fn test_login_with_target_uses_samlart() {
    let response = app()
        .oneshot(login_request("TARGET=http://svc", Some(basic("alice", SECRET).as_str())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert!(location_of(&response).starts_with("http://svc?SAMLart=ST-"));
}

#[tokio::test]
async fn test_login_appends_to_existing_query() {
    let response = app()
        .oneshot(login_request(
            "service=http%3A%2F%2Fsvc%2Fapp%3Fpage%3D2",
            Some(basic("alice", SECRET).as_str()),
        ))
        .await
        .unwrap();

    assert!(location_of(&response).starts_with("http://svc/app?page=2&ticket=ST-"));
}

#[tokio::test]
async fn test_login_accepts_post() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/login?service=http://svc")
        .header(header::AUTHORIZATION, basic("alice", SECRET))
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_login_wrong_password_forbidden() {
    let response = app()
        .oneshot(login_request("service=http://svc", Some(basic("alice", "nope").as_str())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(response.headers().get(header::LOCATION).is_none());
}

#[tokio::test]
async fn test_login_without_authorization_forbidden() {
    let response = app()
        .oneshot(login_request("service=http://svc", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app()
        .oneshot(login_request("service=http://svc", Some("Bearer token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_without_target_is_bad_request() {
    // Missing target is reported before credentials are looked at
    let response = app().oneshot(login_request("", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_string(response).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_login_control_characters_in_target_rejected() {
    let (app, state) = app_with_state();

    for query in [
        "service=http://svc%0D%0Ax",
        "service=http://svc%0D%0ASet-Cookie:x",
        "TARGET=http://svc%0Ax",
    ] {
        let response = app
            .clone()
            .oneshot(login_request(query, Some(basic("alice", SECRET).as_str())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{query}");
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    assert!(state.cas.registry().is_empty());
}

// ============================================================================
// CAS 1.0 /validate
// ============================================================================

#[tokio::test]
async fn test_validate_success_then_consumed() {
    let app = app();
    let ticket = login(&app, "http://svc").await;
    let uri = format!("/validate?ticket={ticket}&service=http://svc");

    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).starts_with("text/plain"));
    assert_eq!(body_string(response).await, "yes\nalice\n");

    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "no\n\n");
}

#[tokio::test]
async fn test_validate_missing_parameters_is_in_band() {
    let response = app().oneshot(get("/validate?service=http://svc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "no\n\n");
}

// ============================================================================
// CAS 2.0 /serviceValidate
// ============================================================================

#[tokio::test]
async fn test_service_validate_success() {
    let app = app();
    let ticket = login(&app, "http://svc").await;

    let response = app
        .oneshot(get(&format!("/serviceValidate?ticket={ticket}&service=http://svc")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).starts_with("text/xml"));
    assert!(body_string(response).await.contains("<cas:user>alice</cas:user>"));
}

#[tokio::test]
async fn test_service_validate_mismatch_consumes_ticket() {
    let app = app();
    let ticket = login(&app, "http://svc").await;

    let response = app
        .clone()
        .oneshot(get(&format!("/serviceValidate?ticket={ticket}&service=http://other")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).starts_with("text/xml"));

    let body = body_string(response).await;
    assert!(body.contains("xmlns:cas='http://www.yale.edu/tp/cas'"));
    assert!(body.contains(r#"code="INVALID_SERVICE""#));
    assert!(body.contains("E_SERVICE_MISMATCH"));

    let response = app
        .oneshot(get(&format!("/serviceValidate?ticket={ticket}&service=http://svc")))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains(r#"code="INVALID_TICKET""#));
    assert!(body.contains("E_TICKET_NOT_FOUND"));
}

// ============================================================================
// SAML 1.1 /samlValidate
// ============================================================================

#[tokio::test]
async fn test_saml_validate_success_fills_template() {
    let app = app();
    let ticket = login(&app, "http://svc").await;

    let response = app
        .oneshot(saml_request("http://svc", Some(ticket.as_str())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).starts_with("text/xml"));

    let body = body_string(response).await;
    assert!(body.contains("<NameIdentifier>alice</NameIdentifier>"));
    assert!(body.contains(r#"Recipient="http://svc""#));
    assert!(!body.contains("{id}"));
    assert!(!body.contains("{now}"));
}

#[tokio::test]
async fn test_saml_validate_without_artifact() {
    let response = app()
        .oneshot(saml_request("http://svc", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(r#"<StatusCode Value="samlp:RequestDenied" />"#));
    assert!(body.contains("<StatusMessage>INVALID_REQUEST</StatusMessage>"));
    assert!(body.contains("<StatusDetail>E_MISSING_PARAMETERS</StatusDetail>"));
}

#[tokio::test]
async fn test_saml_validate_unknown_artifact() {
    let response = app()
        .oneshot(saml_request("http://svc", Some("ST-unknown")))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("<StatusMessage>INVALID_TICKET</StatusMessage>"));
    assert!(body.contains("<StatusDetail>E_TICKET_NOT_FOUND</StatusDetail>"));
}

#[tokio::test]
async fn test_saml_validate_malformed_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/samlValidate?TARGET=http://svc")
        .body(Body::from("<not<xml"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response)
        .await
        .contains("<StatusDetail>E_MISSING_PARAMETERS</StatusDetail>"));
}

// ============================================================================
// Routing and middleware
// ============================================================================

#[tokio::test]
async fn test_unknown_path_not_found() {
    for uri in ["/", "/logout", "/proxyValidate", "/validate/extra"] {
        let response = app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_request_id_propagated() {
    let response = app().oneshot(get("/validate")).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// File-backed responses
// ============================================================================

#[tokio::test]
async fn test_file_backed_responses() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("validate")).unwrap();
    std::fs::write(dir.path().join("validate").join("bob"), "yes\nbob\n").unwrap();

    let config =
        Config::try_parse_from(["cas-api", SECRET, dir.path().to_str().unwrap()]).unwrap();
    config.validate().unwrap();
    let app = build_router(AppState::from_config(&config));

    let response = app
        .clone()
        .oneshot(login_request("service=http://svc", Some(basic("bob", SECRET).as_str())))
        .await
        .unwrap();
    let location = location_of(&response);
    let (_, ticket) = location.split_once("ticket=").unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/validate?ticket={ticket}&service=http://svc")))
        .await
        .unwrap();
    assert_eq!(body_string(response).await, "yes\nbob\n");

    // No serviceValidate file for bob: reported in-band as INTERNAL_ERROR
    let response = app
        .clone()
        .oneshot(login_request("service=http://svc", Some(basic("bob", SECRET).as_str())))
        .await
        .unwrap();
    let location = location_of(&response);
    let (_, ticket) = location.split_once("ticket=").unwrap();

    let response = app
        .oneshot(get(&format!("/serviceValidate?ticket={ticket}&service=http://svc")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(r#"code="INTERNAL_ERROR""#));
    assert!(body.contains("E_FILE_NOT_FOUND"));
}

fn uuid_like(s: &str) -> bool {
    s.len() == 36 && s.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
}
