//! Inline span splitter.
//!
//! Refines a sequence of `TextNode`s by recognising delimiter spans
//! (`**bold**`, `_italic_`, `` `code` ``) and bracket markers
//! (`![alt](url)`, `[text](url)`). Only plain nodes are ever re-processed;
//! every other kind passes through untouched.

use crate::error::MarkdownError;
use crate::text_node::{TextNode, TextType};

/// Run the full inline pipeline over `text`.
///
/// Order matters: bold, italic, code, then images before links so that the
/// `[` of an image is never taken for a link.
pub fn text_to_textnodes(text: &str) -> Result<Vec<TextNode>, MarkdownError> {
    let nodes = vec![TextNode::plain(text)];
    let nodes = split_nodes_delimiter(nodes, "**", TextType::Bold)?;
    let nodes = split_nodes_delimiter(nodes, "_", TextType::Italic)?;
    let nodes = split_nodes_delimiter(nodes, "`", TextType::Code)?;
    let nodes = split_nodes_image(nodes)?;
    split_nodes_link(nodes)
}

/// Split every plain node on `delimiter`, turning the enclosed runs into `kind`.
///
/// Segments alternate outside/inside, so an even segment count means a
/// delimiter was left open. Empty segments are dropped.
pub fn split_nodes_delimiter(
    nodes: Vec<TextNode>,
    delimiter: &str,
    kind: TextType,
) -> Result<Vec<TextNode>, MarkdownError> {
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes {
        if !node.is_plain() {
            out.push(node);
            continue;
        }

        let sections: Vec<&str> = node.content.split(delimiter).collect();
        if sections.len() % 2 == 0 {
            return Err(MarkdownError::UnclosedDelimiter {
                delimiter: delimiter.to_string(),
            });
        }

        for (i, section) in sections.into_iter().enumerate() {
            if section.is_empty() {
                continue;
            }
            if i % 2 == 0 {
                out.push(TextNode::plain(section));
            } else {
                out.push(TextNode::new(section, kind));
            }
        }
    }

    Ok(out)
}

/// Split image markers out of every plain node.
pub fn split_nodes_image(nodes: Vec<TextNode>) -> Result<Vec<TextNode>, MarkdownError> {
    split_nodes_marker(nodes, Marker::Image)
}

/// Split link markers out of every plain node.
pub fn split_nodes_link(nodes: Vec<TextNode>) -> Result<Vec<TextNode>, MarkdownError> {
    split_nodes_marker(nodes, Marker::Link)
}

/// Every `![alt](url)` in `text`, left to right.
pub fn extract_markdown_images(text: &str) -> Vec<(String, String)> {
    scan_markers(text, Marker::Image)
}

/// Every `[text](url)` in `text` that is not the tail of an image marker.
pub fn extract_markdown_links(text: &str) -> Vec<(String, String)> {
    scan_markers(text, Marker::Link)
}

// ------------------------------------------------------------------
// Marker scanning
// ------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Image,
    Link,
}

impl Marker {
    fn literal(self, label: &str, url: &str) -> String {
        match self {
            Marker::Image => format!("![{label}]({url})"),
            Marker::Link => format!("[{label}]({url})"),
        }
    }

    fn node(self, label: &str, url: &str) -> TextNode {
        match self {
            Marker::Image => TextNode::image(label, url),
            Marker::Link => TextNode::link(label, url),
        }
    }

    fn not_found(self) -> MarkdownError {
        match self {
            Marker::Image => MarkdownError::UnclosedImage,
            Marker::Link => MarkdownError::UnclosedLink,
        }
    }

    /// Guess whether text with no markers holds a broken one.
    ///
    /// Only a presence check over the marker punctuation, so it can both miss
    /// broken markers and flag harmless text.
    fn check_unmatched(self, text: &str) -> Result<(), MarkdownError> {
        let has = |c: char| text.contains(c);
        let incomplete = !has(']') || !has('(') || !has(')');
        match self {
            Marker::Image => {
                if has('!') && has('[') && incomplete {
                    return Err(MarkdownError::MalformedImage);
                }
                if has('!') && !has('[') && has(']') && has('(') {
                    return Err(MarkdownError::StrayImageBang);
                }
            }
            Marker::Link => {
                if has('[') && incomplete {
                    return Err(MarkdownError::MalformedLink);
                }
            }
        }
        Ok(())
    }
}

fn split_nodes_marker(
    nodes: Vec<TextNode>,
    marker: Marker,
) -> Result<Vec<TextNode>, MarkdownError> {
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes {
        if !node.is_plain() {
            out.push(node);
            continue;
        }

        let found = scan_markers(&node.content, marker);
        if found.is_empty() {
            marker.check_unmatched(&node.content)?;
            out.push(node);
            continue;
        }

        let mut rest = node.content.as_str();
        for (label, url) in &found {
            // Split on the first literal occurrence, not the scan offset.
            let literal = marker.literal(label, url);
            let (before, after) = rest.split_once(&literal).ok_or_else(|| marker.not_found())?;
            if !before.is_empty() {
                out.push(TextNode::plain(before));
            }
            out.push(marker.node(label, url));
            rest = after;
        }
        if !rest.is_empty() {
            out.push(TextNode::plain(rest));
        }
    }

    Ok(out)
}

/// Scan `text` for markers of one kind.
///
/// Leftmost, non-overlapping, left to right. A link `[` directly preceded by
/// `!` is skipped, even when that `!` belongs to an unmatched image.
fn scan_markers(text: &str, marker: Marker) -> Vec<(String, String)> {
    let mut results = Vec::new();
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut pos = 0;

    while pos < len {
        let open = match marker {
            Marker::Image if bytes[pos] == b'!' && bytes.get(pos + 1) == Some(&b'[') => {
                Some(pos + 1)
            }
            Marker::Link if bytes[pos] == b'[' && (pos == 0 || bytes[pos - 1] != b'!') => {
                Some(pos)
            }
            _ => None,
        };

        if let Some(bracket) = open {
            if let Some((label, url, end)) = try_parse_marker(text, bracket) {
                results.push((label.to_string(), url.to_string()));
                pos = end;
                continue;
            }
        }
        pos += 1;
    }

    results
}

/// Parse `[label](url)` with the `[` at `bracket`.
///
/// The label may not contain `[` or `]`; the url may not contain `(` or `)`.
/// Returns `(label, url, end_byte)` where `end_byte` is just past the `)`.
fn try_parse_marker(text: &str, bracket: usize) -> Option<(&str, &str, usize)> {
    let bytes = text.as_bytes();

    let label_start = bracket + 1;
    let label_end = label_start + bytes[label_start..].iter().position(|&b| b == b']' || b == b'[')?;
    if bytes[label_end] != b']' {
        return None;
    }

    let paren = label_end + 1;
    if bytes.get(paren) != Some(&b'(') {
        return None;
    }

    let url_start = paren + 1;
    let url_end = url_start + bytes[url_start..].iter().position(|&b| b == b')' || b == b'(')?;
    if bytes[url_end] != b')' {
        return None;
    }

    // All delimiters are ASCII, so these byte offsets sit on char boundaries.
    Some((&text[label_start..label_end], &text[url_start..url_end], url_end + 1))
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    // -- delimiters --------------------------------------------------

    #[test]
    fn delim_bold() {
        let nodes = vec![TextNode::plain("This is text with a **bolded** word")];
        assert_eq!(
            split_nodes_delimiter(nodes, "**", TextType::Bold).unwrap(),
            vec![
                TextNode::plain("This is text with a "),
                TextNode::bold("bolded"),
                TextNode::plain(" word"),
            ]
        );
    }

    #[test]
    fn delim_bold_twice() {
        let nodes = vec![TextNode::plain("This is text with a **bolded word** and **another**")];
        assert_eq!(
            split_nodes_delimiter(nodes, "**", TextType::Bold).unwrap(),
            vec![
                TextNode::plain("This is text with a "),
                TextNode::bold("bolded word"),
                TextNode::plain(" and "),
                TextNode::bold("another"),
            ]
        );
    }

    #[test]
    fn delim_simple_triple() {
        let nodes = vec![TextNode::plain("a**b**c")];
        assert_eq!(
            split_nodes_delimiter(nodes, "**", TextType::Bold).unwrap(),
            vec![TextNode::plain("a"), TextNode::bold("b"), TextNode::plain("c")]
        );
    }

    #[test]
    fn delim_italic_and_code() {
        let nodes = vec![TextNode::plain("an _italic_ and `code block` word")];
        let nodes = split_nodes_delimiter(nodes, "_", TextType::Italic).unwrap();
        let nodes = split_nodes_delimiter(nodes, "`", TextType::Code).unwrap();
        assert_eq!(
            nodes,
            vec![
                TextNode::plain("an "),
                TextNode::italic("italic"),
                TextNode::plain(" and "),
                TextNode::code("code block"),
                TextNode::plain(" word"),
            ]
        );
    }

    #[test]
    fn delim_bold_then_italic() {
        let nodes = vec![TextNode::plain("**bold** and _italic_")];
        let nodes = split_nodes_delimiter(nodes, "**", TextType::Bold).unwrap();
        let nodes = split_nodes_delimiter(nodes, "_", TextType::Italic).unwrap();
        assert_eq!(
            nodes,
            vec![
                TextNode::bold("bold"),
                TextNode::plain(" and "),
                TextNode::italic("italic"),
            ]
        );
    }

    #[test]
    fn delim_absent_passes_through() {
        let nodes = vec![TextNode::plain("This is plain text with no bolding.")];
        assert_eq!(
            split_nodes_delimiter(nodes.clone(), "**", TextType::Bold).unwrap(),
            nodes
        );
    }

    #[test]
    fn delim_unclosed_fails() {
        for (text, delim, kind) in [
            ("a**b", "**", TextType::Bold),
            ("This text has an **unclosed bold section", "**", TextType::Bold),
            ("Another example with _unclosed italic", "_", TextType::Italic),
            ("One more `unclosed code block", "`", TextType::Code),
        ] {
            let err = split_nodes_delimiter(vec![TextNode::plain(text)], delim, kind).unwrap_err();
            assert_eq!(
                err,
                MarkdownError::UnclosedDelimiter {
                    delimiter: delim.to_string()
                }
            );
            assert!(err.to_string().contains("formatted section not closed"));
        }
    }

    #[test]
    fn delim_at_edges_leaves_no_empty_nodes() {
        let split = |s: &str| split_nodes_delimiter(vec![TextNode::plain(s)], "**", TextType::Bold).unwrap();
        assert_eq!(
            split("**Bold at start** and some text."),
            vec![TextNode::bold("Bold at start"), TextNode::plain(" and some text.")]
        );
        assert_eq!(
            split("Some text and **bold at end**"),
            vec![TextNode::plain("Some text and "), TextNode::bold("bold at end")]
        );
        assert_eq!(split("**Just bold**"), vec![TextNode::bold("Just bold")]);
    }

    #[test]
    fn delim_skips_non_plain_nodes() {
        let nodes = vec![
            TextNode::plain("This is **part one**."),
            TextNode::italic("This node is _already italic_."),
            TextNode::plain("And **part two** here."),
            TextNode::code("`Already code` here."),
        ];
        assert_eq!(
            split_nodes_delimiter(nodes, "**", TextType::Bold).unwrap(),
            vec![
                TextNode::plain("This is "),
                TextNode::bold("part one"),
                TextNode::plain("."),
                TextNode::italic("This node is _already italic_."),
                TextNode::plain("And "),
                TextNode::bold("part two"),
                TextNode::plain(" here."),
                TextNode::code("`Already code` here."),
            ]
        );
    }

    // -- extraction --------------------------------------------------

    #[test]
    fn extract_images() {
        assert_eq!(
            extract_markdown_images("This is text with an ![image](https://i.imgur.com/zjjcJKZ.png)"),
            vec![pair("image", "https://i.imgur.com/zjjcJKZ.png")]
        );
    }

    #[test]
    fn extract_links() {
        assert_eq!(
            extract_markdown_links(
                "This is text with a [link](https://www.google.com) and [another link](https://www.youtube.com)"
            ),
            vec![
                pair("link", "https://www.google.com"),
                pair("another link", "https://www.youtube.com"),
            ]
        );
    }

    #[test]
    fn extract_nothing() {
        let text = "This is a plain sentence with no images or links.";
        assert!(extract_markdown_images(text).is_empty());
        assert!(extract_markdown_links(text).is_empty());
        assert!(extract_markdown_images("").is_empty());
        assert!(extract_markdown_links("").is_empty());
    }

    #[test]
    fn extract_links_skip_images() {
        assert_eq!(
            extract_markdown_links("![a](u1) and [b](u2)"),
            vec![pair("b", "u2")]
        );
        assert_eq!(
            extract_markdown_images("![a](u1) and [b](u2)"),
            vec![pair("a", "u1")]
        );
    }

    #[test]
    fn extract_allows_empty_label_and_url() {
        assert_eq!(extract_markdown_images("![]()"), vec![pair("", "")]);
        assert_eq!(extract_markdown_links("x [](y)"), vec![pair("", "y")]);
    }

    #[test]
    fn extract_rejects_nested_brackets() {
        assert!(extract_markdown_links("[a [b] c](u)").is_empty());
        assert!(extract_markdown_images("![a [b] c](u)").is_empty());
    }

    #[test]
    fn extract_rejects_parens_in_url() {
        assert!(extract_markdown_links("[a](b(c))").is_empty());
    }

    #[test]
    fn extract_adjacent_markers() {
        assert_eq!(
            extract_markdown_links("[a](1)[b](2)"),
            vec![pair("a", "1"), pair("b", "2")]
        );
        assert_eq!(
            extract_markdown_images("![a](1)![b](2)"),
            vec![pair("a", "1"), pair("b", "2")]
        );
    }

    #[test]
    fn extract_handles_multibyte_text() {
        assert_eq!(
            extract_markdown_links("café [naïve](/ü) ok"),
            vec![pair("naïve", "/ü")]
        );
    }

    // -- image / link splitting ---------------------------------------

    #[test]
    fn split_images() {
        let nodes = vec![TextNode::plain(
            "This is text with an ![image](https://i.imgur.com/zjjcJKZ.png) and another ![second image](https://i.imgur.com/3elNhQu.png)",
        )];
        assert_eq!(
            split_nodes_image(nodes).unwrap(),
            vec![
                TextNode::plain("This is text with an "),
                TextNode::image("image", "https://i.imgur.com/zjjcJKZ.png"),
                TextNode::plain(" and another "),
                TextNode::image("second image", "https://i.imgur.com/3elNhQu.png"),
            ]
        );
    }

    #[test]
    fn split_links_with_trailing_text() {
        let nodes = vec![TextNode::plain(
            "This is text with a [link](https://boot.dev) and [another link](https://blog.boot.dev) with text that follows",
        )];
        assert_eq!(
            split_nodes_link(nodes).unwrap(),
            vec![
                TextNode::plain("This is text with a "),
                TextNode::link("link", "https://boot.dev"),
                TextNode::plain(" and "),
                TextNode::link("another link", "https://blog.boot.dev"),
                TextNode::plain(" with text that follows"),
            ]
        );
    }

    #[test]
    fn image_before_link_precedence() {
        let nodes = vec![TextNode::plain("![a](u1) and [b](u2)")];
        let nodes = split_nodes_image(nodes).unwrap();
        assert_eq!(
            nodes,
            vec![TextNode::image("a", "u1"), TextNode::plain(" and [b](u2)")]
        );
        assert_eq!(
            split_nodes_link(nodes).unwrap(),
            vec![
                TextNode::image("a", "u1"),
                TextNode::plain(" and "),
                TextNode::link("b", "u2"),
            ]
        );
    }

    #[test]
    fn split_duplicate_markers() {
        let nodes = vec![TextNode::plain("[x](y) then [x](y)")];
        assert_eq!(
            split_nodes_link(nodes).unwrap(),
            vec![
                TextNode::link("x", "y"),
                TextNode::plain(" then "),
                TextNode::link("x", "y"),
            ]
        );
    }

    #[test]
    fn split_passes_plain_text_through() {
        let nodes = vec![TextNode::plain("Wow! Nothing (here) to see.")];
        assert_eq!(split_nodes_image(nodes.clone()).unwrap(), nodes);
        assert_eq!(split_nodes_link(nodes.clone()).unwrap(), nodes);
    }

    #[test]
    fn split_skips_non_plain_nodes() {
        let nodes = vec![TextNode::code("[not](a link)"), TextNode::bold("![nor](an image)")];
        assert_eq!(split_nodes_link(nodes.clone()).unwrap(), nodes);
        assert_eq!(split_nodes_image(nodes.clone()).unwrap(), nodes);
    }

    // -- malformed markers --------------------------------------------

    #[test]
    fn malformed_image_missing_paren() {
        let err = split_nodes_image(vec![TextNode::plain("see ![alt](url")]).unwrap_err();
        assert_eq!(err, MarkdownError::MalformedImage);
        assert!(err.to_string().contains("image section not closed or mismatched"));
    }

    #[test]
    fn malformed_image_missing_bracket() {
        let err = split_nodes_image(vec![TextNode::plain("see ![alt (url)")]).unwrap_err();
        assert_eq!(err, MarkdownError::MalformedImage);
    }

    #[test]
    fn stray_bang_before_closing_bracket() {
        let err = split_nodes_image(vec![TextNode::plain("oops! alt](url)")]).unwrap_err();
        assert_eq!(err, MarkdownError::StrayImageBang);
        assert!(err.to_string().contains("stray '!' or malformed image syntax"));
    }

    #[test]
    fn bang_with_well_formed_link_is_not_an_image_error() {
        let nodes = vec![TextNode::plain("5! [a](b)")];
        assert_eq!(split_nodes_image(nodes.clone()).unwrap(), nodes);
    }

    #[test]
    fn malformed_link() {
        for text in ["a [link](url", "a [link (url)", "a [link]"] {
            let err = split_nodes_link(vec![TextNode::plain(text)]).unwrap_err();
            assert_eq!(err, MarkdownError::MalformedLink, "{text}");
            assert!(err.to_string().contains("link section not closed or mismatched"));
        }
    }

    #[test]
    fn link_heuristic_only_runs_without_markers() {
        let nodes = vec![TextNode::plain("[ok](u) and a lone [")];
        assert_eq!(
            split_nodes_link(nodes).unwrap(),
            vec![TextNode::link("ok", "u"), TextNode::plain(" and a lone [")]
        );
    }

    // -- full pipeline ------------------------------------------------

    #[test]
    fn underscores_in_url_split_before_links() {
        assert_eq!(
            text_to_textnodes("[x](a_b_c)"),
            Err(MarkdownError::MalformedLink)
        );
        assert_eq!(
            text_to_textnodes("[x](a_b)").unwrap_err(),
            MarkdownError::UnclosedDelimiter { delimiter: "_".to_string() }
        );
    }

    #[test]
    fn text_to_textnodes_everything() {
        let nodes = text_to_textnodes(
            "This is **text** with an _italic_ word and a `code block` and an ![obi wan image](https://i.imgur.com/fJRm4Vk.jpeg) and a [link](https://boot.dev)",
        )
        .unwrap();
        assert_eq!(
            nodes,
            vec![
                TextNode::plain("This is "),
                TextNode::bold("text"),
                TextNode::plain(" with an "),
                TextNode::italic("italic"),
                TextNode::plain(" word and a "),
                TextNode::code("code block"),
                TextNode::plain(" and an "),
                TextNode::image("obi wan image", "https://i.imgur.com/fJRm4Vk.jpeg"),
                TextNode::plain(" and a "),
                TextNode::link("link", "https://boot.dev"),
            ]
        );
    }

    #[test]
    fn text_to_textnodes_plain() {
        assert_eq!(
            text_to_textnodes("just words").unwrap(),
            vec![TextNode::plain("just words")]
        );
    }

    #[test]
    fn text_to_textnodes_empty() {
        assert!(text_to_textnodes("").unwrap().is_empty());
    }

    #[test]
    fn text_to_textnodes_propagates_errors() {
        assert!(matches!(
            text_to_textnodes("an **open bold"),
            Err(MarkdownError::UnclosedDelimiter { .. })
        ));
        assert_eq!(
            text_to_textnodes("a [broken link"),
            Err(MarkdownError::MalformedLink)
        );
    }

    #[test]
    fn code_span_protects_link_syntax() {
        assert_eq!(
            text_to_textnodes("use `[a](b)` literally").unwrap(),
            vec![
                TextNode::plain("use "),
                TextNode::code("[a](b)"),
                TextNode::plain(" literally"),
            ]
        );
    }
}
