//! `md-html`: convert a small Markdown dialect to HTML.
//!
//! Documents are cut into blocks on blank lines, each block is classified
//! (heading, code, quote, unordered list, ordered list, paragraph), inline
//! spans are split out (bold, italic, code, images, links) and the result is
//! assembled into an [`HtmlNode`] tree under a single `div`.
//!
//! # Quick start
//!
//! ```
//! let html = md_html::markdown_to_html("# Hello\n\nSome **bold** text.").unwrap();
//! assert_eq!(html, "<div><h1>Hello</h1><p>Some <b>bold</b> text.</p></div>");
//! ```
//!
//! Nested emphasis, nested lists, tables and raw HTML are not recognised.

pub mod blocks;
pub mod convert;
pub mod error;
pub mod html_node;
pub mod inline;
pub mod text_node;

pub use blocks::{block_to_block_type, markdown_to_blocks, BlockType};
pub use convert::{extract_title, markdown_to_html_node, text_node_to_html_node};
pub use error::*;
pub use html_node::{Attributes, HtmlNode, LeafNode, ParentNode};
pub use inline::{
    extract_markdown_images, extract_markdown_links, split_nodes_delimiter, split_nodes_image,
    split_nodes_link, text_to_textnodes,
};
pub use text_node::{TextNode, TextType};

/// Convert a document straight to an HTML string.
pub fn markdown_to_html(document: &str) -> Result<String, Error> {
    Ok(markdown_to_html_node(document)?.to_html()?)
}
