use crate::error::{Error, Result};

/// Attributes in insertion order, serialized as ` key="value"`.
pub type Attributes = Vec<(String, String)>;

/// A node of the generated HTML tree.
///
/// Nothing is escaped on output, neither text nor attribute values. Callers
/// that feed untrusted markdown must sanitize it first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// Text content, optionally wrapped in an element. Without a tag the
    /// value is emitted verbatim.
    Leaf {
        tag: Option<String>,
        value: Option<String>,
        attributes: Attributes,
    },
    /// An element wrapping other nodes.
    Parent {
        tag: String,
        children: Vec<HtmlNode>,
        attributes: Attributes,
    },
}

impl HtmlNode {
    /// Bare text, emitted as is.
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: None,
            value: Some(value.into()),
            attributes: Vec::new(),
        }
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attributes: Vec::new(),
        }
    }

    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Parent {
            tag: tag.into(),
            children,
            attributes: Vec::new(),
        }
    }

    /// Append an attribute, keeping insertion order.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            HtmlNode::Leaf { attributes, .. } | HtmlNode::Parent { attributes, .. } => {
                attributes.push((key.into(), value.into()));
            }
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf { tag, .. } => tag.as_deref(),
            HtmlNode::Parent { tag, .. } => Some(tag.as_str()),
        }
    }

    pub fn attributes(&self) -> &[(String, String)] {
        match self {
            HtmlNode::Leaf { attributes, .. } | HtmlNode::Parent { attributes, .. } => attributes,
        }
    }

    /// Children of a parent; leaves have none.
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Leaf { .. } => &[],
            HtmlNode::Parent { children, .. } => children,
        }
    }

    /// Serialize this node and everything below it.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        write_node(self, &mut out)?;
        Ok(out)
    }
}

impl From<&str> for HtmlNode {
    fn from(value: &str) -> Self {
        HtmlNode::text(value)
    }
}

impl From<String> for HtmlNode {
    fn from(value: String) -> Self {
        HtmlNode::text(value)
    }
}

/// Serialize a node tree to markup.
pub fn serialize(node: &HtmlNode) -> Result<String> {
    node.to_html()
}

fn write_node(node: &HtmlNode, out: &mut String) -> Result<()> {
    match node {
        HtmlNode::Leaf {
            tag,
            value,
            attributes,
        } => {
            let value = value.as_deref().ok_or(Error::MissingValue)?;
            match tag {
                None => out.push_str(value),
                Some(tag) => {
                    open_tag(tag, attributes, out);
                    out.push_str(value);
                    close_tag(tag, out);
                }
            }
        }
        HtmlNode::Parent {
            tag,
            children,
            attributes,
        } => {
            if tag.is_empty() {
                return Err(Error::EmptyTag);
            }
            if children.is_empty() {
                return Err(Error::EmptyChildren);
            }
            open_tag(tag, attributes, out);
            for child in children {
                write_node(child, out)?;
            }
            close_tag(tag, out);
        }
    }
    Ok(())
}

fn open_tag(tag: &str, attributes: &[(String, String)], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_text_leaf() {
        assert_eq!(HtmlNode::text("x").to_html().unwrap(), "x");
    }

    #[test]
    fn tagged_leaf() {
        assert_eq!(HtmlNode::leaf("b", "x").to_html().unwrap(), "<b>x</b>");
    }

    #[test]
    fn leaf_attributes_keep_insertion_order() {
        let node = HtmlNode::leaf("img", "")
            .with_attribute("src", "cat.png")
            .with_attribute("alt", "a cat");
        assert_eq!(
            serialize(&node).unwrap(),
            r#"<img src="cat.png" alt="a cat"></img>"#
        );
    }

    #[test]
    fn leaf_without_value_fails() {
        let node = HtmlNode::Leaf {
            tag: Some("p".to_string()),
            value: None,
            attributes: Vec::new(),
        };
        assert!(matches!(node.to_html(), Err(Error::MissingValue)));

        let bare = HtmlNode::Leaf {
            tag: None,
            value: None,
            attributes: Vec::new(),
        };
        assert!(matches!(serialize(&bare), Err(Error::MissingValue)));
    }

    #[test]
    fn nothing_is_escaped() {
        let node = HtmlNode::leaf("a", "<b>&</b>").with_attribute("title", "say \"hi\"");
        assert_eq!(
            node.to_html().unwrap(),
            r#"<a title="say "hi""><b>&</b></a>"#
        );
    }

    #[test]
    fn parent_serializes_children_in_order() {
        let node = HtmlNode::parent(
            "p",
            vec![
                HtmlNode::leaf("b", "Bold"),
                "Normal".into(),
                HtmlNode::leaf("i", "italic"),
                HtmlNode::text("Normal"),
            ],
        );
        assert_eq!(
            node.to_html().unwrap(),
            "<p><b>Bold</b>Normal<i>italic</i>Normal</p>"
        );
    }

    #[test]
    fn nested_parents() {
        let node = HtmlNode::parent(
            "div",
            vec![HtmlNode::parent(
                "ul",
                vec![HtmlNode::leaf("li", "one"), HtmlNode::leaf("li", "two")],
            )],
        )
        .with_attribute("class", "content");
        assert_eq!(
            node.to_html().unwrap(),
            r#"<div class="content"><ul><li>one</li><li>two</li></ul></div>"#
        );
    }

    #[test]
    fn parent_without_children_fails() {
        let node = HtmlNode::parent("div", Vec::new());
        assert!(matches!(node.to_html(), Err(Error::EmptyChildren)));
    }

    #[test]
    fn parent_without_tag_fails() {
        let node = HtmlNode::parent("", vec![HtmlNode::text("x")]);
        assert!(matches!(node.to_html(), Err(Error::EmptyTag)));
    }

    #[test]
    fn invalid_child_fails_whole_tree() {
        let node = HtmlNode::parent(
            "div",
            vec![HtmlNode::text("ok"), HtmlNode::parent("span", Vec::new())],
        );
        assert!(matches!(node.to_html(), Err(Error::EmptyChildren)));
    }
}
