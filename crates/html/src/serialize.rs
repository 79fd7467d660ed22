//! Markup serialization of document subtrees.

use crate::dom::{Document, Element, ElementKind, NodeData, NodeId};
use crate::entities::{escape_attribute, escape_text};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "br", "col", "command", "embed", "frame", "hr", "image", "img",
    "input", "isindex", "keygen", "link", "meta", "param", "source", "track", "wbr",
];

#[derive(Clone, Debug)]
pub struct SerializeOptions {
    /// Emit childless elements as `<x/>` and keep empty attribute values.
    pub xml_mode: bool,
    /// Escape markup characters in text and attribute values.
    pub encode_entities: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            xml_mode: false,
            encode_entities: true,
        }
    }
}

/// Markup for `id` itself and everything below it.
pub fn outer_html(doc: &Document, id: NodeId, options: &SerializeOptions) -> String {
    let mut out = String::new();
    write_node(doc, id, options, &mut out);
    out
}

/// Markup for the children of `id`.
pub fn inner_html(doc: &Document, id: NodeId, options: &SerializeOptions) -> String {
    let mut out = String::new();
    for child in doc.children(id) {
        write_node(doc, child, options, &mut out);
    }
    out
}

/// Opening tag of `element`, attributes included.
pub fn open_tag(element: &Element, options: &SerializeOptions) -> String {
    let mut out = String::new();
    write_attributes(element, options, &mut out);
    out.push('>');
    out
}

pub fn close_tag(element: &Element) -> String {
    format!("</{}>", element.name)
}

// `<name attr="..."` without the closing bracket.
fn write_attributes(el: &Element, options: &SerializeOptions, out: &mut String) {
    out.push('<');
    out.push_str(&el.name);
    for (name, value) in &el.attributes {
        out.push(' ');
        out.push_str(name);
        if value.is_empty() && !options.xml_mode {
            continue;
        }
        out.push_str("=\"");
        if options.encode_entities {
            out.push_str(&escape_attribute(value));
        } else {
            out.push_str(&value.replace('"', "&quot;"));
        }
        out.push('"');
    }
}

enum Step<'d> {
    Node(NodeId),
    Raw(&'d str),
    Close(&'d str),
}

// Explicit work stack, so nesting depth is bounded by the heap.
fn write_node(doc: &Document, id: NodeId, options: &SerializeOptions, out: &mut String) {
    let mut steps = vec![Step::Node(id)];
    while let Some(step) = steps.pop() {
        let id = match step {
            Step::Node(id) => id,
            Step::Raw(text) => {
                out.push_str(text);
                continue;
            }
            Step::Close(name) => {
                out.push_str("</");
                out.push_str(name);
                out.push('>');
                continue;
            }
        };
        let node = doc.node(id);
        match &node.data {
            NodeData::Document => push_children(doc, id, false, &mut steps),
            NodeData::Element(el) => {
                write_attributes(el, options, out);

                let childless = node.first_child().is_none();
                if options.xml_mode && childless {
                    out.push_str("/>");
                    continue;
                }
                out.push('>');
                if !options.xml_mode && VOID_ELEMENTS.contains(&el.name.as_str()) {
                    continue;
                }
                steps.push(Step::Close(&el.name));
                push_children(doc, id, el.kind != ElementKind::Tag, &mut steps);
            }
            NodeData::Text(text) => {
                if options.encode_entities {
                    out.push_str(&escape_text(text));
                } else {
                    out.push_str(text);
                }
            }
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::CData => {
                out.push_str("<![CDATA[");
                for child in doc.children(id) {
                    if let Some(text) = doc.node(child).as_text() {
                        out.push_str(text);
                    }
                }
                out.push_str("]]>");
            }
            NodeData::ProcessingInstruction { data, .. } => {
                out.push('<');
                out.push_str(data);
                out.push('>');
            }
        }
    }
}

// Children in reverse, so the first one is popped first. Text inside
// script/style is written as is.
fn push_children<'d>(doc: &'d Document, id: NodeId, raw: bool, steps: &mut Vec<Step<'d>>) {
    let children: Vec<NodeId> = doc.children(id).collect();
    for &child in children.iter().rev() {
        match doc.node(child).as_text() {
            Some(text) if raw => steps.push(Step::Raw(text)),
            _ => steps.push(Step::Node(child)),
        }
    }
}
