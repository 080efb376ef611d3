//! HTML fragment parsing.
//!
//! Parses sanitized markup with html5ever's fragment algorithm (the same error
//! recovery a browser applies to `innerHTML`) and copies the result into the
//! owned [`ParsedNode`] tree, so nothing downstream depends on the DOM types.

use std::rc::Rc;

use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, QualName, local_name, namespace_url, ns, parse_fragment as parse_html_fragment};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::node::{Attributes, ParsedElement, ParsedNode};

/// Maximum element nesting kept as structure.
///
/// Elements nested deeper are collapsed into a single text node holding their
/// text content, which bounds the recursion of every later pass.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parse an HTML fragment into owned nodes.
///
/// Never fails: malformed markup is repaired the way a browser would repair
/// it. Comments, doctypes and processing instructions are dropped.
///
/// # Examples
///
/// ```
/// use quill_content::{ParsedNode, parse_fragment};
///
/// let nodes = parse_fragment("<p>Hello <b>world</b></p>");
/// assert_eq!(nodes.len(), 1);
/// assert_eq!(nodes[0].text_content(), "Hello world");
/// ```
#[must_use]
pub fn parse_fragment(html: &str) -> Vec<ParsedNode> {
    let context = QualName::new(None, ns!(html), local_name!("body"));
    let dom = parse_html_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new())
        .one(html);

    let mut converter = Converter::default();
    let mut nodes = Vec::new();
    for root in fragment_roots(&dom.document) {
        converter.convert_children(&root, 0, &mut nodes);
    }

    if converter.collapsed > 0 {
        tracing::debug!(
            collapsed = converter.collapsed,
            max_depth = MAX_NESTING_DEPTH,
            "Collapsed deeply nested elements to text"
        );
    }

    nodes
}

/// Nodes whose children make up the fragment.
///
/// Fragment parsing wraps the result in a synthetic `<html>` element under the
/// document node.
fn fragment_roots(document: &Handle) -> Vec<Handle> {
    let children = document.children.borrow();
    let html_root = children.iter().find(|child| {
        matches!(&child.data, NodeData::Element { name, .. } if name.local == local_name!("html"))
    });
    match html_root {
        Some(root) => vec![Rc::clone(root)],
        None => vec![Rc::clone(document)],
    }
}

#[derive(Default)]
struct Converter {
    collapsed: usize,
}

impl Converter {
    fn convert_children(&mut self, parent: &Handle, depth: usize, out: &mut Vec<ParsedNode>) {
        for child in parent.children.borrow().iter() {
            if let Some(node) = self.convert(child, depth) {
                out.push(node);
            }
        }
    }

    fn convert(&mut self, handle: &Handle, depth: usize) -> Option<ParsedNode> {
        match &handle.data {
            NodeData::Text { contents } => Some(ParsedNode::Text(contents.borrow().to_string())),
            NodeData::Element { name, attrs, .. } => {
                if depth >= MAX_NESTING_DEPTH {
                    self.collapsed += 1;
                    return Some(ParsedNode::Text(flatten_text(handle)));
                }

                let attrs = attrs
                    .borrow()
                    .iter()
                    .map(|attr| (attribute_name(&attr.name), attr.value.to_string()))
                    .collect::<Attributes>();

                let mut children = Vec::new();
                self.convert_children(handle, depth + 1, &mut children);

                Some(ParsedNode::Element(ParsedElement {
                    tag: name.local.to_string(),
                    attrs,
                    children,
                }))
            }
            NodeData::Document
            | NodeData::Doctype { .. }
            | NodeData::Comment { .. }
            | NodeData::ProcessingInstruction { .. } => None,
        }
    }
}

/// Attribute name with its namespace prefix (`xlink:href`).
fn attribute_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{}:{}", &**prefix, &*name.local),
        None => name.local.to_string(),
    }
}

/// Text content of a subtree, walked without recursion.
fn flatten_text(handle: &Handle) -> String {
    let mut out = String::new();
    let mut stack = vec![Rc::clone(handle)];
    while let Some(node) = stack.pop() {
        match &node.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { .. } => {
                for child in node.children.borrow().iter().rev() {
                    stack.push(Rc::clone(child));
                }
            }
            _ => {}
        }
    }
    out
}
