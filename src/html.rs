use std::sync::OnceLock;

use regex::Regex;

use crate::block::{Block, BlockKind};
use crate::inline::{self, SpanKind, TextSpan};
use crate::node::HtmlNode;
use crate::parser::{self, CODE_FENCE};

/// Convert a whole markdown document into a `div` holding one node per block.
pub fn markdown_to_html_node(markdown: &str) -> HtmlNode {
    let blocks = parser::parse(markdown);
    blocks_to_html(&blocks)
}

/// Assemble already parsed blocks under a single `div`.
pub fn blocks_to_html(blocks: &[Block]) -> HtmlNode {
    let children = blocks.iter().map(block_to_node).collect();
    HtmlNode::parent("div", children)
}

pub fn block_to_node(block: &Block) -> HtmlNode {
    match block.kind {
        BlockKind::Heading(level) => heading_to_node(&block.text, level),
        BlockKind::Paragraph => paragraph_to_node(&block.text),
        BlockKind::Code => code_to_node(&block.text),
        BlockKind::Quote => quote_to_node(&block.text),
        BlockKind::UnorderedList => list_to_node(&block.text, "ul", strip_bullet),
        BlockKind::OrderedList => list_to_node(&block.text, "ol", strip_number),
    }
}

/// The leaf element for one inline span.
pub fn span_to_node(span: &TextSpan) -> HtmlNode {
    let text = span.text();
    let target = span.target().unwrap_or_default();
    match span.kind() {
        SpanKind::Plain => HtmlNode::text(text),
        SpanKind::Bold => HtmlNode::leaf("b", text),
        SpanKind::Italic => HtmlNode::leaf("i", text),
        SpanKind::Code => HtmlNode::leaf("code", text),
        SpanKind::Link => HtmlNode::leaf("a", text).with_attribute("href", target),
        SpanKind::Image => HtmlNode::leaf("img", "")
            .with_attribute("src", target)
            .with_attribute("alt", text),
    }
}

/// Wrap inline spans in an element with the given tag.
///
/// Several spans become children of a new parent. A single span is not
/// wrapped: its own leaf is retagged, so `**x**` as a whole heading renders as
/// `<h1>x</h1>` and the bold styling is lost (attributes such as `href` are
/// kept). No spans at all give an empty leaf, e.g. `<li></li>`.
pub fn build_inline_container(tag: &str, spans: &[TextSpan]) -> HtmlNode {
    match spans {
        [] => HtmlNode::leaf(tag, ""),
        [span] => retag(span_to_node(span), tag),
        spans => HtmlNode::parent(tag, spans.iter().map(span_to_node).collect()),
    }
}

fn retag(node: HtmlNode, new_tag: &str) -> HtmlNode {
    match node {
        HtmlNode::Leaf {
            value, attributes, ..
        } => HtmlNode::Leaf {
            tag: Some(new_tag.to_string()),
            value,
            attributes,
        },
        HtmlNode::Parent {
            children,
            attributes,
            ..
        } => HtmlNode::Parent {
            tag: new_tag.to_string(),
            children,
            attributes,
        },
    }
}

fn text_to_container(tag: &str, text: &str) -> HtmlNode {
    build_inline_container(tag, &inline::text_to_spans(text))
}

fn heading_to_node(text: &str, level: u8) -> HtmlNode {
    let content = text
        .trim_start_matches('#')
        .strip_prefix(' ')
        .unwrap_or_default();
    text_to_container(&format!("h{level}"), content)
}

fn paragraph_to_node(text: &str) -> HtmlNode {
    let trimmed = text.trim();
    // A paragraph that is nothing but one image or link renders bare
    if lone_link_or_image_regex().is_match(trimmed) {
        let spans = inline::split_images(inline::split_links(vec![TextSpan::plain(trimmed)]));
        if let [span] = spans.as_slice() {
            return span_to_node(span);
        }
    }
    text_to_container("p", text)
}

fn code_to_node(text: &str) -> HtmlNode {
    let inner = text
        .strip_prefix(CODE_FENCE)
        .and_then(|rest| rest.strip_suffix(CODE_FENCE))
        .unwrap_or(text)
        .trim_matches('\n');
    // Inline spans still apply inside code blocks
    text_to_container("code", inner)
}

fn quote_to_node(text: &str) -> HtmlNode {
    let content = text
        .split('\n')
        .map(|line| {
            let line = line.strip_prefix('>').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n");
    text_to_container("blockquote", &content)
}

fn list_to_node(text: &str, tag: &str, strip_marker: fn(&str) -> &str) -> HtmlNode {
    let items = text
        .split('\n')
        .map(|line| text_to_container("li", strip_marker(line)))
        .collect();
    HtmlNode::parent(tag, items)
}

fn strip_bullet(line: &str) -> &str {
    line.strip_prefix("* ")
        .or_else(|| line.strip_prefix("- "))
        .unwrap_or(line)
}

fn strip_number(line: &str) -> &str {
    if parser::ordered_item_number(line).is_none() {
        return line;
    }
    line.split_once(' ').map_or(line, |(_, rest)| rest)
}

fn lone_link_or_image_regex() -> &'static Regex {
    static LONE_REGEX: OnceLock<Regex> = OnceLock::new();
    LONE_REGEX.get_or_init(|| {
        Regex::new(r"^!?\[[^\[\]]*\]\([^()]*\)$").expect("Invalid lone link regex")
    })
}
