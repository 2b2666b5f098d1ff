//! SAML 1.1 `AssertionArtifact` extraction from SOAP request bodies

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::response::SAML_PROTOCOL_NAMESPACE;

const ARTIFACT_LOCAL_NAME: &[u8] = b"AssertionArtifact";

/// Extract the ticket carried by a `samlp:AssertionArtifact` element.
///
/// Returns the trimmed text of the first `AssertionArtifact` element in the
/// SAML 1.0 protocol namespace found anywhere below the document root.
/// Returns `None` when there is no such element, its text is empty, or the
/// document is not well-formed.
pub fn extract_assertion_artifact(body: &str) -> Option<String> {
    let mut reader = NsReader::from_str(body);
    let mut depth = 0usize;
    let mut artifact_depth = None;
    let mut text = String::new();
    let mut found: Option<Option<String>> = None;

    loop {
        match reader.read_resolved_event() {
            Ok((ns, Event::Start(e))) => {
                depth += 1;
                if artifact_depth.is_some() {
                    // Only text ahead of the first child belongs to the artifact
                    found = Some(finish(&text));
                    artifact_depth = None;
                } else if found.is_none() && depth > 1 && is_artifact(&ns, e.local_name().as_ref()) {
                    artifact_depth = Some(depth);
                }
            }
            Ok((ns, Event::Empty(e))) => {
                if artifact_depth.is_some() {
                    found = Some(finish(&text));
                    artifact_depth = None;
                } else if found.is_none() && depth > 0 && is_artifact(&ns, e.local_name().as_ref()) {
                    found = Some(None);
                }
            }
            Ok((_, Event::Text(t))) => {
                if artifact_depth.is_some() {
                    match t.unescape() {
                        Ok(chunk) => text.push_str(&chunk),
                        Err(e) => {
                            tracing::debug!(error = %e, "Unescapable AssertionArtifact text");
                            return None;
                        }
                    }
                }
            }
            Ok((_, Event::CData(c))) => {
                if artifact_depth.is_some() {
                    text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Ok((_, Event::End(_))) => {
                if artifact_depth == Some(depth) {
                    artifact_depth = None;
                    found = Some(finish(&text));
                }
                depth = depth.saturating_sub(1);
            }
            Ok((_, Event::Eof)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    position = reader.buffer_position(),
                    "Malformed SAML request body"
                );
                return None;
            }
        }
    }

    found.flatten()
}

fn finish(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn is_artifact(ns: &ResolveResult<'_>, local_name: &[u8]) -> bool {
    local_name == ARTIFACT_LOCAL_NAME
        && matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == SAML_PROTOCOL_NAMESPACE.as_bytes())
}
