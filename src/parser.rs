use std::sync::OnceLock;

use regex::Regex;

use crate::block::{Block, BlockKind};

pub(crate) const CODE_FENCE: &str = "```";

/// Split a markdown document into classified blocks.
///
/// Blocks are separated by one or more blank lines. A document with nothing
/// but whitespace still produces a single empty paragraph.
pub fn parse(markdown: &str) -> Vec<Block> {
    let markdown = markdown.replace("\r\n", "\n");
    let mut blocks: Vec<Block> = split_blocks(&markdown)
        .map(|text| {
            let kind = classify(text);
            log::debug!("block {kind:?}: {} bytes", text.len());
            Block::new(text, kind)
        })
        .collect();

    if blocks.is_empty() {
        blocks.push(Block::new("", BlockKind::Paragraph));
    }
    blocks
}

fn split_blocks(markdown: &str) -> impl Iterator<Item = &str> {
    blank_line_regex()
        .split(markdown)
        .map(str::trim)
        .filter(|block| !block.is_empty())
}

/// Classify one block. Anything that does not fit cleanly is a paragraph.
pub fn classify(block: &str) -> BlockKind {
    if is_fenced_code(block) {
        return BlockKind::Code;
    }

    let lines: Vec<&str> = block.split('\n').collect();
    if let [line] = lines.as_slice() {
        if let Some(level) = heading_level(line) {
            return BlockKind::Heading(level);
        }
    }

    let mut current: Option<BlockKind> = None;
    let mut last_number = 0;
    for line in lines {
        let kind = if line.starts_with('>') {
            BlockKind::Quote
        } else if line.starts_with("* ") || line.starts_with("- ") {
            BlockKind::UnorderedList
        } else if let Some(number) = ordered_item_number(line) {
            if number != last_number + 1 {
                return BlockKind::Paragraph;
            }
            last_number = number;
            BlockKind::OrderedList
        } else {
            return BlockKind::Paragraph;
        };

        match current {
            Some(previous) if previous != kind => return BlockKind::Paragraph,
            _ => current = Some(kind),
        }
    }

    current.unwrap_or(BlockKind::Paragraph)
}

fn is_fenced_code(block: &str) -> bool {
    block.len() >= 2 * CODE_FENCE.len()
        && block.starts_with(CODE_FENCE)
        && block.ends_with(CODE_FENCE)
}

/// Level of an ATX heading line, `# ` through `###### `.
fn heading_level(line: &str) -> Option<u8> {
    heading_regex()
        .captures(line)
        .map(|caps| caps[1].len() as u8)
}

/// Number of an ordered list item line such as `3. item`.
pub(crate) fn ordered_item_number(line: &str) -> Option<u64> {
    ordered_item_regex()
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
}

fn blank_line_regex() -> &'static Regex {
    static BLANK_LINE_REGEX: OnceLock<Regex> = OnceLock::new();
    BLANK_LINE_REGEX.get_or_init(|| Regex::new(r"\n\s*\n").expect("Invalid blank line regex"))
}

fn heading_regex() -> &'static Regex {
    static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
    HEADING_REGEX.get_or_init(|| Regex::new(r"^(#{1,6}) ").expect("Invalid heading regex"))
}

fn ordered_item_regex() -> &'static Regex {
    static ORDERED_ITEM_REGEX: OnceLock<Regex> = OnceLock::new();
    ORDERED_ITEM_REGEX
        .get_or_init(|| Regex::new(r"^(\d+)\. ").expect("Invalid ordered item regex"))
}
