//! Block segmentation and classification.
//!
//! A document is cut into blocks on blank lines, every line is trimmed, and
//! each block is classified by its leading markers.

use std::fmt;

use serde::Serialize;

/// Structural kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
    Paragraph,
}

impl BlockType {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Heading => "heading",
            BlockType::Code => "code",
            BlockType::Quote => "quote",
            BlockType::UnorderedList => "unordered_list",
            BlockType::OrderedList => "ordered_list",
            BlockType::Paragraph => "paragraph",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const CODE_FENCE: &str = "```";

/// Split a document into trimmed, non-empty blocks.
///
/// Any whitespace-only line separates blocks, and runs of them collapse.
/// Each line is trimmed on its own before the block is rejoined with `\n`.
pub fn markdown_to_blocks(document: &str) -> Vec<String> {
    let normalised = document.replace("\r\n", "\n");
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in normalised.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush_block(&mut current, &mut blocks);
        } else {
            current.push(trimmed);
        }
    }
    flush_block(&mut current, &mut blocks);

    blocks
}

fn flush_block(lines: &mut Vec<&str>, blocks: &mut Vec<String>) {
    if lines.is_empty() {
        return;
    }
    let block = lines.join("\n");
    let block = block.trim();
    if !block.is_empty() {
        blocks.push(block.to_string());
    }
    lines.clear();
}

/// Classify a stripped block. The first matching rule wins.
pub fn block_to_block_type(block: &str) -> BlockType {
    if heading_level(block).is_some() {
        return BlockType::Heading;
    }

    if is_code_block(block) {
        return BlockType::Code;
    }

    let lines: Vec<&str> = block.split('\n').collect();

    if lines.iter().all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }

    if lines.iter().all(|line| line.starts_with("- ")) {
        return BlockType::UnorderedList;
    }

    let numbered = lines
        .iter()
        .enumerate()
        .all(|(i, line)| line.starts_with(&ordinal_marker(i + 1)));
    if numbered {
        return BlockType::OrderedList;
    }

    BlockType::Paragraph
}

/// Level of a `#`..`######` heading marker followed by a space.
pub(crate) fn heading_level(block: &str) -> Option<usize> {
    let level = block.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&level) && block.as_bytes().get(level) == Some(&b' ') {
        Some(level)
    } else {
        None
    }
}

/// True when the block opens and closes with separate triple-backtick fences.
pub(crate) fn is_code_block(block: &str) -> bool {
    block.len() >= 2 * CODE_FENCE.len()
        && block.starts_with(CODE_FENCE)
        && block.ends_with(CODE_FENCE)
}

/// Body of a code block: fences removed, plus the newline after the opening fence.
pub(crate) fn code_block_body(block: &str) -> &str {
    let body = &block[CODE_FENCE.len()..block.len() - CODE_FENCE.len()];
    body.strip_prefix('\n').unwrap_or(body)
}

/// The `"<n>. "` prefix expected on the `n`th ordered-list line.
pub(crate) fn ordinal_marker(n: usize) -> String {
    format!("{n}. ")
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
