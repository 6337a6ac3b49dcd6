//! Inline text nodes.
//!
//! A `TextNode` is one run of inline content with a single formatting kind.
//! The inline splitter produces them; the converter turns them into HTML leaves.

use std::fmt;

use serde::Serialize;

/// Formatting kind of an inline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl TextType {
    pub fn as_str(self) -> &'static str {
        match self {
            TextType::Plain => "plain",
            TextType::Bold => "bold",
            TextType::Italic => "italic",
            TextType::Code => "code",
            TextType::Link => "link",
            TextType::Image => "image",
        }
    }
}

impl fmt::Display for TextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A span of inline content.
///
/// `target` carries the URL of links and images and is `None` for every other
/// kind. Equality is structural over all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TextNode {
    pub content: String,
    pub kind: TextType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl TextNode {
    pub fn new(content: impl Into<String>, kind: TextType) -> Self {
        Self {
            content: content.into(),
            kind,
            target: None,
        }
    }

    pub fn with_target(
        content: impl Into<String>,
        kind: TextType,
        target: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            kind,
            target: Some(target.into()),
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(content, TextType::Plain)
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self::new(content, TextType::Bold)
    }

    pub fn italic(content: impl Into<String>) -> Self {
        Self::new(content, TextType::Italic)
    }

    pub fn code(content: impl Into<String>) -> Self {
        Self::new(content, TextType::Code)
    }

    /// A link with visible `text` pointing at `url`.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::with_target(text, TextType::Link, url)
    }

    /// An image with `alt` text loaded from `url`.
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self::with_target(alt, TextType::Image, url)
    }

    pub fn is_plain(&self) -> bool {
        self.kind == TextType::Plain
    }
}

impl fmt::Display for TextNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TextNode({}, {}, {})",
            self.content,
            self.kind,
            self.target.as_deref().unwrap_or("None")
        )
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
