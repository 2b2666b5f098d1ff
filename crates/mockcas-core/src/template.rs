//! `{name}` placeholder substitution for prepared SOAP bodies

/// Substitute `{name}` placeholders using `lookup`.
///
/// `{{` and `}}` collapse to literal braces. Placeholders `lookup` does not
/// know are copied through untouched.
pub fn render<'v>(template: &str, lookup: impl Fn(&str) -> Option<&'v str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix("}}") {
            out.push('}');
            rest = after;
            continue;
        }
        if let Some(inner) = tail.strip_prefix('{') {
            if let Some(end) = inner.find('}') {
                if let Some(value) = lookup(&inner[..end]) {
                    out.push_str(value);
                    rest = &inner[end + 1..];
                    continue;
                }
            }
        }

        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}
