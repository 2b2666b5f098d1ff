//! Benchmarks for ticket and response hot paths

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mockcas_core::{extract_assertion_artifact, ProtocolError, ResponseFormat, SamlEnvelope, TicketRegistry};
use mockcas_types::Endpoint;

fn bench_ticket_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("ticket_registry");

    // Outstanding tickets already in the map when the measured ops run
    let backlog_sizes = [0, 1_000, 100_000];

    for size in backlog_sizes {
        let registry = TicketRegistry::new();
        for i in 0..size {
            registry.issue("http://svc", format!("user-{i}"));
        }

        group.bench_with_input(BenchmarkId::new("issue_redeem", size), &registry, |b, registry| {
            b.iter(|| {
                let ticket = registry.issue(black_box("http://svc"), black_box("alice"));
                registry.redeem(Some(ticket.as_str()), Some("http://svc"))
            });
        });
    }

    let registry = TicketRegistry::new();
    group.bench_function("redeem_unknown", |b| {
        b.iter(|| registry.redeem(black_box(Some("ST-unknown")), Some("http://svc")));
    });

    group.finish();
}

fn bench_response_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("response_format");
    let failure: Result<Arc<str>, ProtocolError> = Err(ProtocolError::ServiceMismatch);

    group.bench_function("xml_failure", |b| {
        let format = ResponseFormat::for_endpoint(Endpoint::ServiceValidate, None);
        b.iter(|| format.render(black_box(&failure)));
    });

    group.bench_function("soap_failure", |b| {
        b.iter(|| {
            let format = ResponseFormat::for_endpoint(Endpoint::SamlValidate, Some("http://svc"));
            format.render(black_box(&failure))
        });
    });

    let envelope = SamlEnvelope::new(Some("http://svc?a=1&b=2"));
    let template = "<Response ResponseID=\"{id}\" IssueInstant=\"{now}\" Recipient=\"{service}\">\
                    <NameIdentifier>alice</NameIdentifier></Response>";
    group.bench_function("soap_success_template", |b| {
        b.iter(|| envelope.render_success(black_box(template)));
    });

    group.finish();
}

fn bench_artifact_extraction(c: &mut Criterion) {
    let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
    <SOAP-ENV:Header/>
    <SOAP-ENV:Body>
        <samlp:Request MajorVersion="1" MinorVersion="1" RequestID="r1"
            xmlns:samlp="urn:oasis:names:tc:SAML:1.0:protocol">
            <samlp:AssertionArtifact>ST-6f1c1e2a-0000-4000-8000-000000000001</samlp:AssertionArtifact>
        </samlp:Request>
    </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

    c.bench_function("extract_assertion_artifact", |b| {
        b.iter(|| extract_assertion_artifact(black_box(body)));
    });
}

criterion_group!(
    benches,
    bench_ticket_lifecycle,
    bench_response_formatting,
    bench_artifact_extraction
);
criterion_main!(benches);
