//! Tree types shared by the parser, the transformer and the render backends.
//!
//! [`ParsedNode`] is the owned form of a sanitized HTML fragment. [`RenderNode`]
//! is what the transformer produces: the same shape, except that recognised
//! elements become dedicated variants carrying the metadata a renderer needs
//! (code language, heading anchor, row index, ...).

/// Ordered attribute list.
///
/// Preserves source order so rendering is deterministic. Names are unique:
/// [`insert`](Self::insert) replaces an existing value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Create an empty attribute list.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Get an attribute value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing the previous value if present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Remove an attribute, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.0.iter().position(|(key, _)| key == name)?;
        Some(self.0.remove(pos).1)
    }

    /// Iterate over `(name, value)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

/// Serializes as a JSON object in source order.
#[cfg(feature = "serde")]
impl serde::Serialize for Attributes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Element of a parsed fragment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedElement {
    /// Lowercase tag name (`p`, `h2`, `svg`, ...).
    pub tag: String,
    /// Attributes in source order.
    pub attrs: Attributes,
    /// Child nodes in document order.
    pub children: Vec<ParsedNode>,
}

/// Node of a parsed, sanitized HTML fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedNode {
    Element(ParsedElement),
    Text(String),
}

impl ParsedNode {
    /// Build an element node.
    #[must_use]
    pub fn element(tag: impl Into<String>, attrs: Attributes, children: Vec<ParsedNode>) -> Self {
        Self::Element(ParsedElement {
            tag: tag.into(),
            attrs,
            children,
        })
    }

    /// Build a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Element view of this node, if it is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&ParsedElement> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Concatenated text of this node and all its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl ParsedElement {
    /// Concatenated text of all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Tag name compared ASCII case-insensitively.
    #[must_use]
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

/// Pass-through element of the render tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderElement {
    pub tag: String,
    pub attrs: Attributes,
    pub children: Vec<RenderNode>,
}

/// Node of the transformed render tree.
///
/// Created fresh per transform call and never mutated afterwards; nothing in
/// it refers back to the input tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum RenderNode {
    /// Text, exactly as parsed.
    Text { text: String },
    /// Element without a rewrite rule, children transformed.
    Element(RenderElement),
    /// `<pre><code>` block ready for syntax highlighting.
    CodeBlock { language: String, code: String },
    /// Image wrapped in a figure, with the `alt` text as caption when present.
    Figure {
        image: Attributes,
        caption: Option<String>,
    },
    /// Anchor; external links open in a new browsing context.
    Link {
        attrs: Attributes,
        external: bool,
        children: Vec<RenderNode>,
    },
    /// Heading with a stable anchor id.
    Heading {
        level: u8,
        id: String,
        attrs: Attributes,
        children: Vec<RenderNode>,
    },
    /// Table inside a horizontally scrollable container.
    Table {
        attrs: Attributes,
        children: Vec<RenderNode>,
    },
    /// Table row with its zero-based index among sibling rows.
    TableRow {
        index: usize,
        attrs: Attributes,
        children: Vec<RenderNode>,
    },
}

/// `target` marker carried by external links.
pub const EXTERNAL_TARGET: &str = "_blank";
/// `rel` marker carried by external links.
pub const EXTERNAL_REL: &str = "noopener noreferrer";

impl RenderNode {
    /// Build a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Child nodes, empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[RenderNode] {
        match self {
            Self::Element(element) => &element.children,
            Self::Link { children, .. }
            | Self::Heading { children, .. }
            | Self::Table { children, .. }
            | Self::TableRow { children, .. } => children,
            Self::Text { .. } | Self::CodeBlock { .. } | Self::Figure { .. } => &[],
        }
    }

    /// Self-link fragment for headings (`#<id>`).
    #[must_use]
    pub fn anchor_href(&self) -> Option<String> {
        match self {
            Self::Heading { id, .. } => Some(format!("#{id}")),
            _ => None,
        }
    }

    /// `target` the renderer should apply to a link.
    #[must_use]
    pub fn link_target(&self) -> Option<&'static str> {
        match self {
            Self::Link { external: true, .. } => Some(EXTERNAL_TARGET),
            _ => None,
        }
    }

    /// `rel` the renderer should apply to a link.
    #[must_use]
    pub fn link_rel(&self) -> Option<&'static str> {
        match self {
            Self::Link { external: true, .. } => Some(EXTERNAL_REL),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_preserve_order() {
        let attrs: Attributes = [("src", "a.png"), ("alt", "A cat"), ("width", "10")]
            .into_iter()
            .collect();
        let names: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["src", "alt", "width"]);
    }

    #[test]
    fn test_attributes_insert_replaces_in_place() {
        let mut attrs: Attributes = [("a", "1"), ("b", "2")].into_iter().collect();
        attrs.insert("a", "3");
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("a"), Some("3"));
        assert_eq!(attrs.iter().next(), Some(("a", "3")));
    }

    #[test]
    fn test_attributes_remove() {
        let mut attrs: Attributes = [("data-index", "7")].into_iter().collect();
        assert_eq!(attrs.remove("data-index"), Some("7".to_owned()));
        assert!(attrs.is_empty());
        assert_eq!(attrs.remove("data-index"), None);
    }

    #[test]
    fn test_text_content_document_order() {
        let node = ParsedNode::element(
            "p",
            Attributes::new(),
            vec![
                ParsedNode::text("Hello, "),
                ParsedNode::element("em", Attributes::new(), vec![ParsedNode::text("big")]),
                ParsedNode::text(" world"),
            ],
        );
        assert_eq!(node.text_content(), "Hello, big world");
    }

    #[test]
    fn test_link_markers_only_for_external() {
        let external = RenderNode::Link {
            attrs: Attributes::new(),
            external: true,
            children: Vec::new(),
        };
        let internal = RenderNode::Link {
            attrs: Attributes::new(),
            external: false,
            children: Vec::new(),
        };
        assert_eq!(external.link_target(), Some("_blank"));
        assert_eq!(external.link_rel(), Some("noopener noreferrer"));
        assert_eq!(internal.link_target(), None);
        assert_eq!(internal.link_rel(), None);
    }

    #[test]
    fn test_anchor_href() {
        let heading = RenderNode::Heading {
            level: 2,
            id: "hello-world".to_owned(),
            attrs: Attributes::new(),
            children: Vec::new(),
        };
        assert_eq!(heading.anchor_href().as_deref(), Some("#hello-world"));
        assert_eq!(RenderNode::text("x").anchor_href(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_internally_tagged() {
        let node = RenderNode::Link {
            attrs: [("href", "/about"), ("title", "About")].into_iter().collect(),
            external: false,
            children: vec![RenderNode::text("x")],
        };
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            serde_json::json!({
                "type": "link",
                "attrs": {"href": "/about", "title": "About"},
                "external": false,
                "children": [{"type": "text", "text": "x"}],
            })
        );
    }

    static_assertions::assert_impl_all!(ParsedNode: Send, Sync);
    static_assertions::assert_impl_all!(RenderNode: Send, Sync);
}
