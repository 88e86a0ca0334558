use anyhow::{bail, Result};
use serde::Serialize;

/// Delimiter that marks a section title as a request definition.
pub const REQUEST_DELIMITER: &str = " % ";

/// One `/`-delimited component of a path template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum PathSegment {
    Literal(String),
    Param(String),
}

/// Parsed form of a request title: `<display name> % <VERB> <path>`.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointTitle {
    pub display_name: String,
    pub verb: String,
    pub path_segments: Vec<PathSegment>,
}

/// Parse a request title.
///
/// A title that carries the request delimiter but cannot be split into verb
/// and path is malformed documentation; the error is meant to abort the
/// whole run.
pub fn parse_endpoint_title(title: &str) -> Result<EndpointTitle> {
    let Some((display_name, rest)) = title.split_once(REQUEST_DELIMITER) else {
        bail!("not a request title: {title:?}");
    };
    let Some((verb, template)) = rest.split_once(' ') else {
        bail!("malformed request title {title:?}: expected `VERB /path` after {REQUEST_DELIMITER:?}");
    };

    Ok(EndpointTitle {
        display_name: display_name.to_string(),
        verb: verb.to_string(),
        path_segments: split_template(template),
    })
}

/// Split a path template on `/`, except inside a `{...}` span, discarding
/// empty segments, and classify each piece.
fn split_template(template: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_param = false;

    for c in template.chars() {
        match c {
            '{' => {
                in_param = true;
                current.push(c);
            }
            '}' => {
                in_param = false;
                current.push(c);
            }
            '/' if !in_param => {
                if !current.is_empty() {
                    segments.push(classify(&current));
                    current.clear();
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        segments.push(classify(&current));
    }

    segments
}

fn classify(segment: &str) -> PathSegment {
    if let Some(inner) = segment.strip_prefix('{') {
        let inner = inner.strip_suffix('}').unwrap_or(inner);
        // A `#` suffix inside the braces is a docs-link annotation; `.`
        // characters are stripped from the parameter name.
        let name = inner
            .split_once('#')
            .map(|(head, _)| head)
            .unwrap_or(inner)
            .replace('.', "");
        PathSegment::Param(name)
    } else {
        PathSegment::Literal(segment.to_string())
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_request_title() {
        let e = parse_endpoint_title("Create Foo % POST /foo").unwrap();
        assert_eq!(e.display_name, "Create Foo");
        assert_eq!(e.verb, "POST");
        assert_eq!(e.path_segments, [PathSegment::Literal("foo".into())]);
    }

    #[test]
    fn docs_link_and_dots_in_param() {
        let e = parse_endpoint_title(
            "Get User % GET /users/{user.id#docs/resources/user#user-object}",
        )
        .unwrap();
        assert_eq!(e.verb, "GET");
        assert_eq!(
            e.path_segments,
            [
                PathSegment::Literal("users".into()),
                PathSegment::Param("userid".into()),
            ]
        );
    }

    #[test]
    fn slash_inside_braces_does_not_split() {
        let e = parse_endpoint_title("X % GET /a/{b#c/d/e}/f").unwrap();
        assert_eq!(
            e.path_segments,
            [
                PathSegment::Literal("a".into()),
                PathSegment::Param("b".into()),
                PathSegment::Literal("f".into()),
            ]
        );
    }

    #[test]
    fn leading_slash_yields_no_empty_segment() {
        let e = parse_endpoint_title("Root % GET /").unwrap();
        assert!(e.path_segments.is_empty());
    }

    #[test]
    fn literal_segments_kept_verbatim() {
        let e = parse_endpoint_title("Get Current User % GET /users/@me").unwrap();
        assert_eq!(
            e.path_segments,
            [
                PathSegment::Literal("users".into()),
                PathSegment::Literal("@me".into()),
            ]
        );
    }

    #[test]
    fn missing_delimiter_is_an_error() {
        assert!(parse_endpoint_title("Application Command Object").is_err());
    }

    #[test]
    fn missing_verb_path_split_is_an_error() {
        assert!(parse_endpoint_title("Broken % POST").is_err());
    }
}
