//! [`ElementAccess`] for elements of a parsed [`html::Document`].

use html::{Document, Element, NodeId};

use crate::picker::ElementAccess;

/// An element node together with the document it lives in.
#[derive(Clone, Copy, Debug)]
pub struct DomElement<'a> {
    doc: &'a Document,
    id: NodeId,
    element: &'a Element,
}

impl<'a> DomElement<'a> {
    /// `None` when `id` is not an element.
    pub fn new(doc: &'a Document, id: NodeId) -> Option<Self> {
        let element = doc.element(id)?;
        Some(Self { doc, id, element })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn element(&self) -> &'a Element {
        self.element
    }
}

impl ElementAccess for DomElement<'_> {
    fn name(&self) -> &str {
        &self.element.name
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.element.attr(name)
    }

    fn parent_element(&self) -> Option<Self> {
        self.doc
            .parent(self.id)
            .and_then(|parent| DomElement::new(self.doc, parent))
    }

    fn prev_element_sibling(&self) -> Option<Self> {
        self.doc
            .prev_element_sibling(self.id)
            .and_then(|prev| DomElement::new(self.doc, prev))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecisionTree, Picker, TieBreak};
    use html::{ParserOptions, parse_document};

    #[test]
    fn picks_formatters_for_parsed_elements() {
        let doc = parse_document(
            "<article><h1 class=title>T</h1><p>a</p><p class=note>b</p></article>",
            &ParserOptions::default(),
        );
        let picker = Picker::new(
            DecisionTree::new(vec![
                ("*", "inline"),
                ("p", "paragraph"),
                ("h1", "heading"),
                ("article > .note", "note"),
                ("h1 + p", "lead"),
            ])
            .expect("compiles"),
        );
        let picked: Vec<&str> = doc
            .descendants(doc.root())
            .filter_map(|id| DomElement::new(&doc, id))
            .filter_map(|el| picker.pick1(el, TieBreak::PreferLast).copied())
            .collect();
        assert_eq!(picked, vec!["inline", "heading", "lead", "note"]);
    }
}
