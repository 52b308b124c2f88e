/// Kind of a block-level unit of markdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    /// Heading with its level, 1 to 6
    Heading(u8),
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

/// One blank-line separated chunk of a document.
///
/// `text` is the block exactly as written (trimmed), markers included; they
/// are stripped when the block is turned into HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub text: String,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(text: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}
