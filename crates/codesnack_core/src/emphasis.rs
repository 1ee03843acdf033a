//! Removal of markdown emphasis markers from generated text.

use regex::Regex;
use std::sync::LazyLock;

static DOUBLE_EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("double emphasis pattern is valid"));
static SINGLE_EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("single emphasis pattern is valid"));

/// Replaces `**span**` and then `*span*` with the inner text.
///
/// Matching is non-greedy and never crosses a line break. A marker without a
/// partner on the same line is left as a literal `*`.
pub fn strip_emphasis(text: &str) -> String {
    let without_double = DOUBLE_EMPHASIS.replace_all(text, "$1");
    SINGLE_EMPHASIS
        .replace_all(&without_double, "$1")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_double_and_single_spans() {
        assert_eq!(strip_emphasis("**bold**"), "bold");
        assert_eq!(strip_emphasis("*italic*"), "italic");
        assert_eq!(
            strip_emphasis("Use **ownership** and *borrowing* wisely"),
            "Use ownership and borrowing wisely"
        );
    }

    #[test]
    fn text_without_markers_is_unchanged() {
        let text = "fn main() {\n    println!(\"hi\");\n}\n\n- item one\n1. item two";
        assert_eq!(strip_emphasis(text), text);
    }

    #[test]
    fn unmatched_marker_stays_literal() {
        assert_eq!(strip_emphasis("a * b"), "a * b");
        assert_eq!(strip_emphasis("*one* and *"), "one and *");
    }

    #[test]
    fn spans_do_not_cross_lines() {
        assert_eq!(strip_emphasis("*start\nend*"), "*start\nend*");
    }

    #[test]
    fn stripping_is_idempotent() {
        let samples = [
            "***triple***",
            "** spaced ** and *x",
            "* bullet\n* bullet two",
            "2 * 3 * 4 = 24 ** 1",
            "plain text",
            "",
        ];
        for sample in samples {
            let once = strip_emphasis(sample);
            assert_eq!(strip_emphasis(&once), once, "input: {sample:?}");
        }
    }
}
