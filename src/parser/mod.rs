pub mod endpoint;
pub mod segment;
pub mod table;

use segment::Section;

pub use endpoint::REQUEST_DELIMITER;

/// Segment one document into its Section tree. The document as a whole acts
/// as an implicit level-1 section whose title is its first line.
pub fn segment_document(text: &str) -> Section {
    segment::segment(text, 1)
}

/// Collect every request section (title contains `" % "`) across all trees:
/// depth-first pre-order, preserving the input list order.
pub fn collect_requests(sections: &[Section]) -> Vec<&Section> {
    let mut requests = Vec::new();
    for section in sections {
        visit(section, &mut requests);
    }
    requests
}

fn visit<'a>(section: &'a Section, out: &mut Vec<&'a Section>) {
    if section.title.contains(REQUEST_DELIMITER) {
        out.push(section);
    }
    for child in &section.children {
        visit(child, out);
    }
}

// ── Tests ──
