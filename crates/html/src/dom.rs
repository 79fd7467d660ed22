//! Arena-backed document tree.
//!
//! Nodes live in one `Vec` and link to each other by [`NodeId`]. The tree is
//! built once by the parser and read-only afterwards.
//!
//! Invariant: for every node, walking `first_child` then `next` yields exactly
//! the children in insertion order, `prev` mirrors `next`, and every child's
//! `parent` points back to the node.

use std::fmt;

/// Index of a node in its [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element flavour, fixed when the element is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Tag,
    Script,
    Style,
}

impl ElementKind {
    pub fn for_name(name: &str) -> Self {
        match name {
            "script" => ElementKind::Script,
            "style" => ElementKind::Style,
            _ => ElementKind::Tag,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Insertion-ordered; a repeated name overwrites the earlier value in place.
    pub attributes: Vec<(String, String)>,
    pub kind: ElementKind,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = ElementKind::for_name(&name);
        Self {
            name,
            attributes: Vec::new(),
            kind,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|(k, _)| k == name)
    }

    pub fn set_attr(&mut self, name: String, value: String) {
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name, value)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Element(Element),
    Text(String),
    Comment(String),
    /// Children hold the section's text.
    CData,
    ProcessingInstruction {
        name: String,
        data: String,
    },
}

#[derive(Clone, Debug)]
pub struct Node {
    pub data: NodeData,
    parent: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    /// Offset of the node's first byte, when start indices were requested.
    pub start_index: Option<usize>,
    /// Offset of the node's last byte, when end indices were requested.
    pub end_index: Option<usize>,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            prev: None,
            next: None,
            first_child: None,
            last_child: None,
            start_index: None,
            end_index: None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child
    }

    pub fn as_element(&self) -> Option<&Element> {
        match &self.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A parsed document. Node `0` is the document root.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node(id).as_element()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.node(id).first_child,
        }
    }

    /// Pre-order traversal of `id` and everything below it.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            root: id,
            next: Some(id),
        }
    }

    /// Element ancestors of `id`, nearest first.
    pub fn ancestor_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&p| self.parent(p))
            .filter(|&p| self.element(p).is_some())
    }

    /// Nearest preceding sibling that is an element.
    pub fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        std::iter::successors(self.node(id).prev, |&p| self.node(p).prev)
            .find(|&p| self.element(p).is_some())
    }

    /// Concatenated text of every text node below `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for n in self.descendants(id) {
            if let NodeData::Text(text) = &self.node(n).data {
                out.push_str(text);
            }
        }
        out
    }

    /// Elements below `id` (inclusive) accepted by `pred`, in document order.
    pub fn find_all<F>(&self, id: NodeId, mut pred: F) -> Vec<NodeId>
    where
        F: FnMut(NodeId, &Element) -> bool,
    {
        self.descendants(id)
            .filter(|&n| self.element(n).is_some_and(|el| pred(n, el)))
            .collect()
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Append a new node as the last child of `parent`.
    pub(crate) fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let mut node = Node::new(data);
        node.parent = Some(parent);
        node.prev = self.nodes[parent.index()].last_child;
        self.nodes.push(node);

        if let Some(prev) = self.nodes[id.index()].prev {
            self.nodes[prev.index()].next = Some(id);
        } else {
            self.nodes[parent.index()].first_child = Some(id);
        }
        self.nodes[parent.index()].last_child = Some(id);
        id
    }
}

pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.doc.node(id).next;
        Some(id)
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        let node = self.doc.node(id);
        self.next = node.first_child.or_else(|| {
            let mut cur = id;
            loop {
                if cur == self.root {
                    return None;
                }
                let n = self.doc.node(cur);
                if let Some(next) = n.next {
                    return Some(next);
                }
                cur = n.parent?;
            }
        });
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_wires_sibling_links() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append(root, NodeData::Element(Element::new("a")));
        let t = doc.append(a, NodeData::Text("x".into()));
        let b = doc.append(root, NodeData::Element(Element::new("b")));

        assert_eq!(doc.children(root).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(doc.node(b).prev_sibling(), Some(a));
        assert_eq!(doc.node(a).next_sibling(), Some(b));
        assert_eq!(doc.parent(t), Some(a));
        assert_eq!(doc.descendants(root).collect::<Vec<_>>(), vec![root, a, t, b]);
        assert_eq!(doc.descendants(a).collect::<Vec<_>>(), vec![a, t]);
    }

    #[test]
    fn attributes_keep_position_and_last_value() {
        let mut el = Element::new("a");
        el.set_attr("href".into(), "1".into());
        el.set_attr("id".into(), "x".into());
        el.set_attr("href".into(), "2".into());
        assert_eq!(
            el.attributes,
            vec![("href".into(), "2".into()), ("id".into(), "x".into())]
        );
        assert_eq!(Element::new("style").kind, ElementKind::Style);
    }
}
