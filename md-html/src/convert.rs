//! Block → HTML conversion.
//!
//! `markdown_to_html_node` segments a document, classifies every block and
//! builds one subtree per block under a root `div`.

use crate::blocks::{
    block_to_block_type, code_block_body, heading_level, markdown_to_blocks, ordinal_marker,
    BlockType,
};
use crate::error::MarkdownError;
use crate::html_node::{HtmlNode, LeafNode, ParentNode};
use crate::inline::text_to_textnodes;
use crate::text_node::{TextNode, TextType};

/// Convert a whole document into a `div` rooted HTML tree.
///
/// The first malformed inline span aborts the conversion.
pub fn markdown_to_html_node(document: &str) -> Result<HtmlNode, MarkdownError> {
    let children = markdown_to_blocks(document)
        .iter()
        .map(|block| block_to_html_node(block))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ParentNode::new("div", children).into())
}

/// Map one inline text node to its HTML leaf.
pub fn text_node_to_html_node(node: &TextNode) -> HtmlNode {
    let target = node.target.as_deref().unwrap_or_default();
    let leaf = match node.kind {
        TextType::Plain => LeafNode::raw(node.content.as_str()),
        TextType::Bold => LeafNode::tagged("b", node.content.as_str()),
        TextType::Italic => LeafNode::tagged("i", node.content.as_str()),
        TextType::Code => LeafNode::tagged("code", node.content.as_str()),
        TextType::Link => LeafNode::tagged("a", node.content.as_str()).with_attribute("href", target),
        TextType::Image => LeafNode::tagged("img", "")
            .with_attribute("src", target)
            .with_attribute("alt", node.content.as_str()),
    };
    leaf.into()
}

/// Text of the first level-one heading, for use as a page title.
pub fn extract_title(document: &str) -> Result<String, MarkdownError> {
    document
        .lines()
        .map(str::trim_start)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or(MarkdownError::MissingTitle)
}

fn block_to_html_node(block: &str) -> Result<HtmlNode, MarkdownError> {
    let node = match block_to_block_type(block) {
        BlockType::Paragraph => paragraph_to_html_node(block)?,
        BlockType::Heading => heading_to_html_node(block)?,
        BlockType::Code => code_to_html_node(block),
        BlockType::Quote => quote_to_html_node(block)?,
        BlockType::UnorderedList => ulist_to_html_node(block)?,
        BlockType::OrderedList => olist_to_html_node(block)?,
    };
    Ok(node.into())
}

fn text_to_children(text: &str) -> Result<Vec<HtmlNode>, MarkdownError> {
    Ok(text_to_textnodes(text)?
        .iter()
        .map(text_node_to_html_node)
        .collect())
}

fn paragraph_to_html_node(block: &str) -> Result<ParentNode, MarkdownError> {
    let text = block.split('\n').collect::<Vec<_>>().join(" ");
    Ok(ParentNode::new("p", text_to_children(&text)?))
}

fn heading_to_html_node(block: &str) -> Result<ParentNode, MarkdownError> {
    let level = heading_level(block).unwrap_or(1);
    // Marker plus its single trailing space.
    let text = &block[level + 1..];
    Ok(ParentNode::new(format!("h{level}"), text_to_children(text)?))
}

fn code_to_html_node(block: &str) -> ParentNode {
    let code = LeafNode::tagged("code", code_block_body(block));
    ParentNode::new("pre", vec![code.into()])
}

fn quote_to_html_node(block: &str) -> Result<ParentNode, MarkdownError> {
    let text = block
        .split('\n')
        .map(|line| {
            let line = line.strip_prefix('>').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join(" ");
    Ok(ParentNode::new("blockquote", text_to_children(&text)?))
}

fn ulist_to_html_node(block: &str) -> Result<ParentNode, MarkdownError> {
    let items = block
        .split('\n')
        .map(|line| list_item(line.strip_prefix("- ").unwrap_or(line)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ParentNode::new("ul", items))
}

fn olist_to_html_node(block: &str) -> Result<ParentNode, MarkdownError> {
    let items = block
        .split('\n')
        .enumerate()
        .map(|(i, line)| list_item(line.strip_prefix(&ordinal_marker(i + 1)).unwrap_or(line)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ParentNode::new("ol", items))
}

fn list_item(text: &str) -> Result<HtmlNode, MarkdownError> {
    Ok(ParentNode::new("li", text_to_children(text)?).into())
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
