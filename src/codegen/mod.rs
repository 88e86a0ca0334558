pub mod format;

use anyhow::Result;

use crate::parser;
use crate::parser::endpoint::{parse_endpoint_title, EndpointTitle, PathSegment};
use crate::parser::segment::Section;

/// Build one endpoint declaration: an optional JSDoc comment followed by a
/// typed arrow-function signature returning the path as a template literal.
/// Pure function of its inputs.
pub fn generate(section: &Section, endpoint: &EndpointTitle) -> String {
    let mut doc = format::comment_lines(&section.body);

    // An "Example" child contributes its first code block, fences included.
    let example = section
        .children
        .iter()
        .find(|c| c.title.contains("Example"))
        .and_then(|c| c.code.first());
    if let Some(code) = example {
        if !doc.is_empty() {
            doc.push(String::new());
        }
        doc.push("@example".to_string());
        doc.extend(code.lines().map(str::to_string));
    }

    let mut out = String::new();
    if !doc.is_empty() {
        out.push_str("/**\n");
        for line in &doc {
            if line.is_empty() {
                out.push_str(" *\n");
            } else {
                out.push_str(" * ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str(" */\n");
    }

    let params: Vec<String> = endpoint
        .path_segments
        .iter()
        .filter_map(|s| match s {
            PathSegment::Param(name) => Some(format!("{name}: string")),
            PathSegment::Literal(_) => None,
        })
        .collect();
    let path: Vec<String> = endpoint
        .path_segments
        .iter()
        .map(|s| match s {
            PathSegment::Literal(text) => text.clone(),
            PathSegment::Param(name) => format!("${{{name}}}"),
        })
        .collect();

    out.push_str(&format!(
        "{}: ({}) => `/{}`",
        format::identifier(&endpoint.display_name),
        params.join(", "),
        path.join("/"),
    ));
    out
}

/// Wrap declarations into the emitted module: tab-indented, comma-joined.
pub fn emit_module(declarations: &[String]) -> String {
    let mut out = String::from("export const Endpoints = {\n");
    if !declarations.is_empty() {
        let body: Vec<String> = declarations.iter().map(|d| indent(d)).collect();
        out.push_str(&body.join(",\n"));
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

/// End-to-end composition over already-segmented documents: collect request
/// sections, parse their titles, generate declarations, assemble the module.
/// A request title without a verb/path split aborts the run.
pub fn emit_endpoints(trees: &[Section]) -> Result<String> {
    let requests = parser::collect_requests(trees);
    let mut declarations = Vec::with_capacity(requests.len());
    for section in requests {
        let endpoint = parse_endpoint_title(&section.title)?;
        declarations.push(generate(section, &endpoint));
    }
    Ok(emit_module(&declarations))
}

fn indent(declaration: &str) -> String {
    declaration
        .lines()
        .map(|l| format!("\t{l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Tests ──
