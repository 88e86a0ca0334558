use std::sync::LazyLock;

use regex::Regex;

static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W").unwrap());

/// Wrap width for doc-comment bodies, measured on the raw text before the
/// ` * ` prefix is added.
pub const COMMENT_WIDTH: usize = 80;

/// Turn a display name into a TypeScript identifier: per space-separated
/// word keep the text after the first `/` if any, concatenate, strip
/// non-word characters.
pub fn identifier(display_name: &str) -> String {
    let joined: String = display_name
        .split(' ')
        .map(|word| word.split_once('/').map(|(_, tail)| tail).unwrap_or(word))
        .collect();
    NON_WORD_RE.replace_all(&joined, "").to_string()
}

/// Reflow body text for a doc comment: drop `format:` artifact lines, then
/// greedy-wrap each blank-line-separated paragraph at `COMMENT_WIDTH`.
/// Paragraphs are separated by a single empty string in the output.
pub fn comment_lines(body: &str) -> Vec<String> {
    let mut out = Vec::new();
    for paragraph in paragraphs(body) {
        if !out.is_empty() {
            out.push(String::new());
        }
        out.extend(wrap(&paragraph, COMMENT_WIDTH));
    }
    out
}

/// Group non-blank lines into space-joined paragraphs, skipping lines that
/// end with the `format:` documentation artifact.
fn paragraphs(body: &str) -> Vec<String> {
    let mut paras = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in body.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paras.push(current.join(" "));
                current.clear();
            }
        } else if !line.ends_with("format:") {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        paras.push(current.join(" "));
    }
    paras
}

/// Greedy word wrap at `width` characters.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_joins_words() {
        assert_eq!(identifier("Get User"), "GetUser");
        assert_eq!(identifier("Get Current User"), "GetCurrentUser");
    }

    #[test]
    fn identifier_takes_text_after_slash() {
        assert_eq!(identifier("Group DM/Add Recipient"), "GroupAddRecipient");
    }

    #[test]
    fn identifier_strips_non_word_characters() {
        assert_eq!(identifier("Get Guild (Beta)"), "GetGuildBeta");
    }

    #[test]
    fn wrap_respects_width() {
        let text = "word ".repeat(40);
        for line in wrap(&text, 20) {
            assert!(line.len() <= 20, "line too long: {line:?}");
        }
    }

    #[test]
    fn wrap_keeps_overlong_word_whole() {
        let lines = wrap("a verylongwordthatdoesnotfitanywhereatall b", 10);
        assert_eq!(lines[1], "verylongwordthatdoesnotfitanywhereatall");
    }

    #[test]
    fn comment_lines_separate_paragraphs() {
        let lines = comment_lines("first paragraph\n\nsecond paragraph");
        assert_eq!(lines, ["first paragraph", "", "second paragraph"]);
    }

    #[test]
    fn format_artifact_lines_are_dropped() {
        let lines = comment_lines("kept line\nuses the following format:\nalso kept");
        assert_eq!(lines, ["kept line also kept"]);
    }

    #[test]
    fn empty_body_yields_no_lines() {
        assert!(comment_lines("").is_empty());
        assert!(comment_lines("some format:").is_empty());
    }
}
