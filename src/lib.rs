mod block;
mod config;
mod error;
mod html;
mod inline;
mod node;
mod parser;
pub mod site;

pub use block::{Block, BlockKind};
pub use config::{Config, PathsConfig};
pub use error::{Error, Result};
pub use html::{block_to_node, blocks_to_html, build_inline_container, span_to_node};
pub use inline::{
    Delimiter, SpanKind, TextSpan, extract_images, extract_links, split_delimiter, split_images,
    split_links, text_to_spans,
};
pub use node::{Attributes, HtmlNode, serialize};
pub use parser::classify;
pub use site::{extract_title, render_page};

/// Parse markdown text into a vector of classified blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert markdown to a `div` node holding one child per block.
pub fn convert(markdown: &str) -> HtmlNode {
    html::markdown_to_html_node(markdown)
}

/// Convert markdown straight to markup.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    serialize(&convert(markdown))
}
