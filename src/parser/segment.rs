use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::table::{self, Table};

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#+").unwrap());

const FENCE: &str = "```";
const NOTE_PREFIX: &str = "> ";

/// One heading-delimited block of a parsed document.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub title: String,
    pub body: String,
    pub tables: Vec<Table>,
    pub code: Vec<String>,
    pub notes: Vec<String>,
    pub children: Vec<Section>,
}

/// Split a block of markdown into a Section tree.
///
/// The first line is always consumed as the section's title; `depth` is the
/// heading depth of the enclosing section (1 for a whole document). Lines not
/// claimed by a note, code block, table, or child heading accumulate into
/// `body`. Malformed input (an unterminated fence, a trailing blockquote)
/// truncates at end-of-text instead of failing.
pub fn segment(text: &str, depth: usize) -> Section {
    let lines: Vec<&str> = text.lines().collect();

    let title = lines
        .first()
        .map(|l| l.trim_start_matches('#').trim().to_string())
        .unwrap_or_default();

    let mut body = String::new();
    let mut tables = Vec::new();
    let mut code = Vec::new();
    let mut notes = Vec::new();
    let mut children = Vec::new();

    let mut i = 1;
    while i < lines.len() {
        let line = lines[i];

        // Blockquote run: consecutive "> " lines form one note.
        if line.starts_with(NOTE_PREFIX) {
            let start = i;
            while i < lines.len() && lines[i].starts_with(NOTE_PREFIX) {
                i += 1;
            }
            let note = lines[start..i].join("\n").trim().to_string();
            if !note.is_empty() {
                notes.push(note);
            }
            continue;
        }

        // Fenced code block, opening through closing fence inclusive.
        if line.contains(FENCE) {
            let start = i;
            i += 1;
            while i < lines.len() && !lines[i].contains(FENCE) {
                i += 1;
            }
            if i < lines.len() {
                i += 1;
            }
            code.push(lines[start..i].join("\n"));
            continue;
        }

        // Table candidate: a pipe run is a table only when its second line
        // is a header/body separator row.
        if line.starts_with('|') {
            let start = i;
            while i < lines.len() && lines[i].starts_with('|') {
                i += 1;
            }
            let run = &lines[start..i];
            if run.len() >= 2 && table::is_separator_row(run[1]) {
                tables.push(table::parse_table(run));
            } else if i < lines.len() {
                // Not a table: the pipe lines are dropped and only the line
                // right after the run is kept as body text.
                body.push_str(lines[i]);
                body.push('\n');
                i += 1;
            }
            continue;
        }

        // Deeper heading: consume the whole child block and recurse. Heading
        // detection is suppressed inside open fences while finding the end
        // of the block.
        let line_depth = heading_depth(line);
        if line_depth > depth {
            let start = i;
            i += 1;
            let mut in_code = false;
            while i < lines.len() {
                let l = lines[i];
                if l.matches(FENCE).count() % 2 == 1 {
                    in_code = !in_code;
                }
                if !in_code {
                    let d = heading_depth(l);
                    if d > 0 && d <= line_depth {
                        break;
                    }
                }
                i += 1;
            }
            children.push(segment(&lines[start..i].join("\n"), line_depth));
            continue;
        }

        body.push_str(line);
        body.push('\n');
        i += 1;
    }

    Section {
        title,
        body: body.trim().to_string(),
        tables,
        code,
        notes,
        children,
    }
}

/// Count of leading `#` characters; 0 for a non-heading line.
fn heading_depth(line: &str) -> usize {
    HEADING_RE.find(line).map(|m| m.end()).unwrap_or(0)
}

// ── Tests ──
