//! Content rendering: raw text in, display form out.
//!
//! Pure and deterministic. Called on every read path; the result is never
//! written back into a record.

use pulldown_cmark::{html, Parser};

/// Returns `raw` unchanged when `is_markdown` is false, otherwise the
/// Markdown rendering of `raw` as an HTML fragment.
pub fn process(raw: &str, is_markdown: bool) -> String {
    if !is_markdown {
        return raw.to_owned();
    }
    let mut out = String::new();
    html::push_html(&mut out, Parser::new(raw));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_content_passes_through_untouched() {
        let raw = "just **text**, no rendering";
        assert_eq!(process(raw, false), raw);
    }

    #[test]
    fn markdown_content_renders_to_html() {
        let out = process("Great article about **async/await** and *promises*.", true);
        assert!(out.contains("<strong>async/await</strong>"));
        assert!(out.contains("<em>promises</em>"));
    }

    #[test]
    fn links_render_as_anchors() {
        let out = process("see [the docs](https://docs.mongodb.com)", true);
        assert!(out.contains("<a href=\"https://docs.mongodb.com\">the docs</a>"));
    }

    #[test]
    fn empty_content_stays_empty() {
        assert_eq!(process("", false), "");
        assert_eq!(process("", true), "");
    }

    #[test]
    fn malformed_markdown_still_renders() {
        // An unclosed bracket is not an error, just literal text.
        let out = process("[unclosed link(", true);
        assert!(out.contains("[unclosed link("));
    }

    #[test]
    fn rendering_is_deterministic() {
        let raw = "# heading\n\n- one\n- two";
        assert_eq!(process(raw, true), process(raw, true));
    }
}
