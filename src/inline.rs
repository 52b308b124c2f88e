//! Inline tokenizer: one run of text into a flat list of styled spans.
//!
//! Stages run in a fixed order (bold, italic, code, links, images) and each
//! one only looks at spans that are still plain. Nothing nests, and nothing
//! fails: unbalanced markup just produces odd spans.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Inline styling of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

/// A fragment of inline text with its styling.
///
/// Links and images always carry a target URL; the other kinds never do. For
/// a link `text` is the label, for an image it is the alt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    text: String,
    kind: SpanKind,
    target: Option<String>,
}

impl TextSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::untargeted(text, SpanKind::Plain)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::untargeted(text, SpanKind::Bold)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::untargeted(text, SpanKind::Italic)
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self::untargeted(text, SpanKind::Code)
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: label.into(),
            kind: SpanKind::Link,
            target: Some(url.into()),
        }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: alt.into(),
            kind: SpanKind::Image,
            target: Some(url.into()),
        }
    }

    fn untargeted(text: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            text: text.into(),
            kind,
            target: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    /// URL of a link or image.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }
}

/// Paired delimiters understood by [`split_delimiter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `**bold**`
    Bold,
    /// `_italic_`
    Italic,
    /// `` `code` ``
    Code,
}

impl Delimiter {
    pub fn marker(self) -> &'static str {
        match self {
            Delimiter::Bold => "**",
            Delimiter::Italic => "_",
            Delimiter::Code => "`",
        }
    }

    pub fn kind(self) -> SpanKind {
        match self {
            Delimiter::Bold => SpanKind::Bold,
            Delimiter::Italic => SpanKind::Italic,
            Delimiter::Code => SpanKind::Code,
        }
    }
}

/// Tokenize a run of inline markdown. Empty text gives no spans at all.
pub fn text_to_spans(text: &str) -> Vec<TextSpan> {
    let mut spans = vec![TextSpan::plain(text)];
    for delimiter in [Delimiter::Bold, Delimiter::Italic, Delimiter::Code] {
        spans = split_delimiter(spans, delimiter);
    }
    spans = split_links(spans);
    split_images(spans)
}

/// Split plain spans on a delimiter: even fragments stay plain, odd ones get
/// the delimiter's kind. Empty fragments are dropped.
///
/// An unterminated delimiter is not detected, so `"a **b"` ends in a bold
/// `"b"`.
pub fn split_delimiter(spans: Vec<TextSpan>, delimiter: Delimiter) -> Vec<TextSpan> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if span.kind != SpanKind::Plain {
            out.push(span);
            continue;
        }
        for (i, fragment) in span.text.split(delimiter.marker()).enumerate() {
            if fragment.is_empty() {
                continue;
            }
            let kind = if i % 2 == 0 {
                SpanKind::Plain
            } else {
                delimiter.kind()
            };
            out.push(TextSpan::untargeted(fragment, kind));
        }
    }
    out
}

/// Split `[label](url)` out of plain spans. Matches preceded by `!` are
/// images and stay plain for [`split_images`].
pub fn split_links(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_pattern(spans, link_regex(), |caps| {
        if &caps[1] == "!" {
            None
        } else {
            Some(TextSpan::link(&caps[2], &caps[3]))
        }
    })
}

/// Split `![alt](url)` out of plain spans.
pub fn split_images(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_pattern(spans, image_regex(), |caps| {
        Some(TextSpan::image(&caps[1], &caps[2]))
    })
}

/// All `(label, url)` pairs of links in `text`, images excluded.
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    link_regex()
        .captures_iter(text)
        .filter(|caps| caps[1].is_empty())
        .map(|caps| (caps[2].to_string(), caps[3].to_string()))
        .collect()
}

/// All `(alt, url)` pairs of images in `text`.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    image_regex()
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

fn link_regex() -> &'static Regex {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    // The optional `!` stands in for a lookbehind, which `regex` lacks
    LINK_REGEX.get_or_init(|| {
        Regex::new(r"(!?)\[([^\[\]]*)\]\(([^()]*)\)").expect("Invalid link regex")
    })
}

fn image_regex() -> &'static Regex {
    static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    IMAGE_REGEX
        .get_or_init(|| Regex::new(r"!\[([^\[\]]*)\]\(([^()]*)\)").expect("Invalid image regex"))
}

fn split_pattern<F>(spans: Vec<TextSpan>, regex: &Regex, mut make: F) -> Vec<TextSpan>
where
    F: FnMut(&Captures<'_>) -> Option<TextSpan>,
{
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if span.kind != SpanKind::Plain {
            out.push(span);
            continue;
        }
        let text = span.text.as_str();
        let mut last = 0;
        for caps in regex.captures_iter(text) {
            let (Some(whole), Some(special)) = (caps.get(0), make(&caps)) else {
                continue;
            };
            if whole.start() > last {
                out.push(TextSpan::plain(&text[last..whole.start()]));
            }
            out.push(special);
            last = whole.end();
        }
        if last < text.len() {
            out.push(TextSpan::plain(&text[last..]));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn plain_text_is_one_span() {
        assert_eq!(
            text_to_spans("just some words"),
            vec![TextSpan::plain("just some words")]
        );
    }

    #[test]
    fn empty_text_has_no_spans() {
        assert_eq!(text_to_spans(""), Vec::<TextSpan>::new());
    }

    #[test]
    fn bold_italic_and_code() {
        assert_eq!(
            text_to_spans("Some **bold** and _italic_ and `code` text."),
            vec![
                TextSpan::plain("Some "),
                TextSpan::bold("bold"),
                TextSpan::plain(" and "),
                TextSpan::italic("italic"),
                TextSpan::plain(" and "),
                TextSpan::code("code"),
                TextSpan::plain(" text."),
            ]
        );
    }

    #[test]
    fn delimiter_at_edges_drops_empty_fragments() {
        assert_eq!(
            split_delimiter(vec![TextSpan::plain("**all bold**")], Delimiter::Bold),
            vec![TextSpan::bold("all bold")]
        );
    }

    #[test]
    fn unterminated_delimiter_styles_the_tail() {
        assert_eq!(
            text_to_spans("a **b"),
            vec![TextSpan::plain("a "), TextSpan::bold("b")]
        );
    }

    #[test]
    fn styled_spans_are_not_split_again() {
        // The underscore inside bold text survives the italic stage
        assert_eq!(
            text_to_spans("**snake_case** name"),
            vec![TextSpan::bold("snake_case"), TextSpan::plain(" name")]
        );
    }

    #[rstest]
    #[case("no delimiters here")]
    #[case("one **bold** word")]
    #[case("**leading** and trailing **")]
    #[case("**")]
    #[case("a **b** c **d** e")]
    fn splitting_bold_keeps_all_text(#[case] text: &str) {
        let rejoined: String = split_delimiter(vec![TextSpan::plain(text)], Delimiter::Bold)
            .iter()
            .map(TextSpan::text)
            .collect();
        assert_eq!(rejoined, text.replace("**", ""));
    }

    #[test]
    fn link() {
        assert_eq!(
            text_to_spans("see [the docs](https://example.com/docs) now"),
            vec![
                TextSpan::plain("see "),
                TextSpan::link("the docs", "https://example.com/docs"),
                TextSpan::plain(" now"),
            ]
        );
    }

    #[test]
    fn image_is_never_a_link() {
        let spans = text_to_spans("![alt](url)");
        assert_eq!(spans, vec![TextSpan::image("alt", "url")]);
        assert_eq!(spans[0].target(), Some("url"));
    }

    #[test]
    fn links_and_images_mixed() {
        assert_eq!(
            text_to_spans("[a](x) and ![b](y) and [c](z)"),
            vec![
                TextSpan::link("a", "x"),
                TextSpan::plain(" and "),
                TextSpan::image("b", "y"),
                TextSpan::plain(" and "),
                TextSpan::link("c", "z"),
            ]
        );
    }

    #[test]
    fn link_inside_bold_is_not_parsed() {
        assert_eq!(
            text_to_spans("**[a](b)**"),
            vec![TextSpan::bold("[a](b)")]
        );
    }

    #[test]
    fn unmatched_brackets_stay_plain() {
        assert_eq!(
            text_to_spans("[not a link] (really)"),
            vec![TextSpan::plain("[not a link] (really)")]
        );
    }

    #[test]
    fn extract_links_skips_images() {
        assert_eq!(
            extract_links("[to boot dev](https://www.boot.dev) ![img](i.png) [yt](https://youtube.com)"),
            vec![
                ("to boot dev".to_string(), "https://www.boot.dev".to_string()),
                ("yt".to_string(), "https://youtube.com".to_string()),
            ]
        );
    }

    #[test]
    fn extract_images_finds_all() {
        assert_eq!(
            extract_images("![rick roll](https://i.imgur.com/aKaOqIh.gif) and ![obi wan](o.jpeg)"),
            vec![
                ("rick roll".to_string(), "https://i.imgur.com/aKaOqIh.gif".to_string()),
                ("obi wan".to_string(), "o.jpeg".to_string()),
            ]
        );
    }

    #[test]
    fn only_links_and_images_have_targets() {
        for span in text_to_spans("a **b** _c_ `d` [e](f) ![g](h)") {
            match span.kind() {
                SpanKind::Link | SpanKind::Image => assert!(span.target().is_some()),
                SpanKind::Plain | SpanKind::Bold | SpanKind::Italic | SpanKind::Code => {
                    assert!(span.target().is_none())
                }
            }
        }
    }
}
