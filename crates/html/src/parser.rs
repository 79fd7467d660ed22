//! Tag-level parser that turns tokenizer events into a [`Document`].
//!
//! Recovery rules (HTML mode):
//! - Opening certain tags implicitly closes a dangling sibling first (`<li>`
//!   closes an open `<li>`, block elements close an open `<p>`, ...).
//! - Void elements are never pushed on the open-element stack.
//! - A close tag closes the nearest matching open element and everything
//!   above it. A stray `</p>` yields an empty `<p>`, a stray `</br>` a `<br>`;
//!   other unmatched close tags are dropped.
//! - Inside `svg` / `math` the void and implied-close rules are suspended and
//!   `/>` closes the element, until an HTML integration point such as
//!   `foreignObject` or `mi` switches back.
//! - At end of input every open element is closed.
//!
//! Markup errors never fail the parse.

use crate::dom::{Document, Element, NodeData, NodeId};
use crate::entities::EntityError;
use crate::tokenizer::{QuoteType, TokenSink, Tokenizer, TokenizerConfig};

/// Parser configuration. The defaults parse HTML; [`ParserOptions::xml`]
/// switches every toggle to its XML meaning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserOptions {
    pub xml_mode: bool,
    pub decode_entities: bool,
    pub lower_case_tags: bool,
    pub lower_case_attribute_names: bool,
    /// Honour `/>` on every element, not just inside foreign content.
    pub recognize_self_closing: bool,
    /// Keep CDATA sections as CDATA nodes in HTML mode instead of comments.
    pub recognize_cdata: bool,
    pub with_start_indices: bool,
    pub with_end_indices: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            xml_mode: false,
            decode_entities: true,
            lower_case_tags: true,
            lower_case_attribute_names: true,
            recognize_self_closing: false,
            recognize_cdata: false,
            with_start_indices: false,
            with_end_indices: false,
        }
    }
}

impl ParserOptions {
    pub fn xml() -> Self {
        Self {
            xml_mode: true,
            lower_case_tags: false,
            lower_case_attribute_names: false,
            recognize_self_closing: true,
            recognize_cdata: true,
            ..Self::default()
        }
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "br", "col", "command", "embed", "frame", "hr", "image", "img",
    "input", "keygen", "link", "meta", "param", "source", "track", "wbr",
];

const FOREIGN_CONTEXT_ELEMENTS: &[&str] = &["math", "svg"];

const HTML_INTEGRATION_ELEMENTS: &[&str] = &[
    "mi",
    "mo",
    "mn",
    "ms",
    "mtext",
    "annotation-xml",
    "foreignobject",
    "desc",
    "title",
];

fn contains_ignore_case(set: &[&str], name: &str) -> bool {
    set.iter().any(|s| s.eq_ignore_ascii_case(name))
}

/// Open elements that opening `tag` implicitly closes.
fn open_implies_close(tag: &str) -> &'static [&'static str] {
    const P: &[&str] = &["p"];
    const FORM: &[&str] = &[
        "input", "option", "optgroup", "select", "button", "datalist", "textarea",
    ];
    match tag {
        "tr" => &["tr", "th", "td"],
        "th" => &["th"],
        "td" => &["thead", "th", "td"],
        "body" => &["head", "link", "script"],
        "li" => &["li"],
        "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => P,
        "address" | "article" | "aside" | "blockquote" | "details" | "div" | "dl"
        | "fieldset" | "figcaption" | "figure" | "footer" | "form" | "header" | "hr" | "main"
        | "nav" | "ol" | "pre" | "section" | "table" | "ul" => P,
        "select" | "input" | "output" | "button" | "datalist" | "textarea" => FORM,
        "option" => &["option"],
        "optgroup" => &["optgroup", "option"],
        "dd" | "dt" => &["dd", "dt"],
        "rt" | "rp" => &["rt", "rp"],
        "tbody" | "tfoot" => &["thead", "tbody"],
        _ => &[],
    }
}

/// Name used for declaration and processing-instruction nodes: the text up to
/// the first whitespace or `/`.
fn instruction_name(value: &str, lower: bool) -> String {
    let end = value
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(value.len());
    let name = &value[..end];
    if lower {
        name.to_ascii_lowercase()
    } else {
        name.to_string()
    }
}

/// One open element. `node` stays `None` until the start tag is complete.
#[derive(Debug)]
struct OpenElement {
    name: String,
    node: Option<NodeId>,
    /// Whether this element's content is foreign (svg/math) content.
    foreign: bool,
}

/// Receives tokenizer events and grows the document.
struct TreeBuilder {
    options: ParserOptions,
    doc: Document,
    stack: Vec<OpenElement>,
    /// Start tag whose attributes are still arriving.
    pending: Option<Element>,
    tag_name: String,
    attrib_name: String,
    attrib_value: String,
    start_index: usize,
    end_index: usize,
    open_tag_start: usize,
    /// Text node that the next run of text extends.
    last: Option<NodeId>,
}

impl TreeBuilder {
    fn new(options: ParserOptions) -> Self {
        Self {
            options,
            doc: Document::new(),
            stack: Vec::new(),
            pending: None,
            tag_name: String::new(),
            attrib_name: String::new(),
            attrib_value: String::new(),
            start_index: 0,
            end_index: 0,
            open_tag_start: 0,
            last: None,
        }
    }

    fn html_mode(&self) -> bool {
        !self.options.xml_mode
    }

    fn in_foreign(&self) -> bool {
        self.stack.last().is_some_and(|e| e.foreign)
    }

    fn is_void(&self, name: &str) -> bool {
        self.html_mode() && !self.in_foreign() && contains_ignore_case(VOID_ELEMENTS, name)
    }

    fn normalize_tag(&self, name: &str) -> String {
        if self.options.lower_case_tags {
            name.to_ascii_lowercase()
        } else {
            name.to_string()
        }
    }

    fn current_parent(&self) -> NodeId {
        self.stack
            .iter()
            .rev()
            .find_map(|e| e.node)
            .unwrap_or_else(|| self.doc.root())
    }

    fn add_node(&mut self, data: NodeData) -> NodeId {
        let parent = self.current_parent();
        let id = self.doc.append(parent, data);
        let node = self.doc.node_mut(id);
        if self.options.with_start_indices {
            node.start_index = Some(self.start_index);
        }
        if self.options.with_end_indices {
            node.end_index = Some(self.end_index);
        }
        self.last = None;
        id
    }

    fn add_text(&mut self, text: &str) {
        if let Some(id) = self.last {
            let end = self.end_index;
            let with_end = self.options.with_end_indices;
            let node = self.doc.node_mut(id);
            if let NodeData::Text(existing) = &mut node.data {
                existing.push_str(text);
                if with_end {
                    node.end_index = Some(end);
                }
                return;
            }
        }
        let id = self.add_node(NodeData::Text(text.to_string()));
        self.last = Some(id);
    }

    /// Comments never merge with each other or with text.
    fn add_comment(&mut self, text: &str) {
        self.add_node(NodeData::Comment(text.to_string()));
    }

    fn emit_open_tag(&mut self, name: String) {
        self.open_tag_start = self.start_index;

        if self.html_mode() && !self.in_foreign() {
            let closes = open_implies_close(&name);
            while self
                .stack
                .last()
                .is_some_and(|top| closes.contains(&top.name.as_str()))
            {
                self.pop_element();
            }
        }

        if !self.is_void(&name) {
            let parent_foreign = self.in_foreign();
            let foreign = if !self.html_mode() {
                false
            } else if contains_ignore_case(FOREIGN_CONTEXT_ELEMENTS, &name) {
                true
            } else if parent_foreign && contains_ignore_case(HTML_INTEGRATION_ELEMENTS, &name) {
                false
            } else {
                parent_foreign
            };
            self.stack.push(OpenElement {
                name: name.clone(),
                node: None,
                foreign,
            });
        }

        self.pending = Some(Element::new(name.clone()));
        self.tag_name = name;
    }

    /// Materialize the pending start tag as a node.
    fn end_open_tag(&mut self) {
        self.start_index = self.open_tag_start;
        let Some(element) = self.pending.take() else {
            return;
        };
        let is_void = self.is_void(&element.name);
        let id = self.add_node(NodeData::Element(element));
        if is_void {
            self.finish_element(id);
        } else if let Some(top) = self.stack.last_mut() {
            debug_assert!(top.node.is_none());
            top.node = Some(id);
        }
        self.tag_name.clear();
    }

    fn close_current_tag(&mut self) {
        let name = std::mem::take(&mut self.tag_name);
        self.end_open_tag();
        if self.stack.last().is_some_and(|top| top.name == name) {
            self.pop_element();
        }
    }

    fn pop_element(&mut self) {
        if let Some(open) = self.stack.pop() {
            if let Some(id) = open.node {
                self.finish_element(id);
            }
        }
    }

    fn finish_element(&mut self, id: NodeId) {
        self.last = None;
        if self.options.with_end_indices {
            self.doc.node_mut(id).end_index = Some(self.end_index);
        }
    }

    fn finish(&mut self) -> Document {
        self.end_index = self.start_index;
        self.pending = None;
        while !self.stack.is_empty() {
            self.pop_element();
        }
        std::mem::take(&mut self.doc)
    }
}

impl TokenSink for TreeBuilder {
    fn on_text(&mut self, text: &str, _start: usize, end: usize) {
        self.end_index = end.saturating_sub(1);
        self.add_text(text);
        self.start_index = end;
    }

    fn on_text_entity(&mut self, value: char, end: usize) {
        self.end_index = end.saturating_sub(1);
        self.add_text(value.encode_utf8(&mut [0; 4]));
        self.start_index = end;
    }

    fn on_open_tag_name(&mut self, name: &str, _start: usize, end: usize) {
        self.end_index = end;
        let name = self.normalize_tag(name);
        self.emit_open_tag(name);
    }

    fn on_open_tag_end(&mut self, end: usize) {
        self.end_index = end;
        self.end_open_tag();
        self.start_index = end + 1;
    }

    fn on_self_closing_tag(&mut self, end: usize) {
        self.end_index = end;
        if self.options.recognize_self_closing || self.in_foreign() {
            self.close_current_tag();
            self.start_index = end + 1;
        } else {
            self.on_open_tag_end(end);
        }
    }

    fn on_close_tag(&mut self, name: &str, _start: usize, end: usize) {
        self.end_index = end;
        let name = self.normalize_tag(name);

        if !self.is_void(&name) {
            if let Some(pos) = self.stack.iter().rposition(|e| e.name == name) {
                while self.stack.len() > pos {
                    self.pop_element();
                }
            } else if self.html_mode() && name == "p" {
                self.emit_open_tag(name);
                self.close_current_tag();
            } else {
                log::trace!(target: "html.parser", "dropping unmatched </{name}> at {end}");
            }
        } else if self.html_mode() && name == "br" {
            self.emit_open_tag(name);
            self.end_open_tag();
        }
        self.start_index = end + 1;
    }

    fn on_attrib_name(&mut self, name: &str, start: usize, _end: usize) {
        self.start_index = start;
        self.attrib_name = if self.options.lower_case_attribute_names {
            name.to_ascii_lowercase()
        } else {
            name.to_string()
        };
    }

    fn on_attrib_data(&mut self, data: &str, _start: usize, _end: usize) {
        self.attrib_value.push_str(data);
    }

    fn on_attrib_entity(&mut self, value: char) {
        self.attrib_value.push(value);
    }

    fn on_attrib_end(&mut self, _quote: QuoteType, end: usize) {
        self.end_index = end;
        let name = std::mem::take(&mut self.attrib_name);
        let value = std::mem::take(&mut self.attrib_value);
        if let Some(element) = self.pending.as_mut() {
            element.set_attr(name, value);
        }
    }

    fn on_comment(&mut self, text: &str, end: usize) {
        self.end_index = end;
        self.add_comment(text);
        self.start_index = end + 1;
    }

    fn on_cdata(&mut self, text: &str, end: usize) {
        self.end_index = end;
        if !self.html_mode() || self.options.recognize_cdata {
            let cdata = self.add_node(NodeData::CData);
            let text_id = self.doc.append(cdata, NodeData::Text(text.to_string()));
            let with_end = self.options.with_end_indices.then_some(end);
            let with_start = self.options.with_start_indices.then_some(self.start_index);
            let node = self.doc.node_mut(text_id);
            node.start_index = with_start;
            node.end_index = with_end;
        } else {
            self.add_comment(&format!("[CDATA[{text}]]"));
        }
        self.start_index = end + 1;
    }

    fn on_declaration(&mut self, text: &str, end: usize) {
        self.end_index = end;
        let name = instruction_name(text, self.options.lower_case_tags);
        self.add_node(NodeData::ProcessingInstruction {
            name: format!("!{name}"),
            data: format!("!{text}"),
        });
        self.start_index = end + 1;
    }

    fn on_processing_instruction(&mut self, text: &str, end: usize) {
        self.end_index = end;
        let name = instruction_name(text, self.options.lower_case_tags);
        self.add_node(NodeData::ProcessingInstruction {
            name: format!("?{name}"),
            data: format!("?{text}"),
        });
        self.start_index = end + 1;
    }

    fn on_entity_error(&mut self, error: EntityError, position: usize) {
        log::trace!(target: "html.parser", "character reference at {position}: {error}");
    }

    fn on_end(&mut self) {}
}

/// Streaming parser: feed chunks with [`Parser::write`], then call
/// [`Parser::end`] to close everything and take the document.
pub struct Parser {
    tokenizer: Tokenizer,
    builder: TreeBuilder,
}

impl Parser {
    pub fn new(options: ParserOptions) -> Self {
        let tokenizer = Tokenizer::new(TokenizerConfig {
            xml_mode: options.xml_mode,
            decode_entities: options.decode_entities,
        });
        Self {
            tokenizer,
            builder: TreeBuilder::new(options),
        }
    }

    pub fn write(&mut self, chunk: &str) {
        self.tokenizer.write(chunk, &mut self.builder);
    }

    /// Number of elements currently open.
    pub fn open_elements(&self) -> usize {
        self.builder.stack.len()
    }

    pub fn end(&mut self) -> Document {
        self.tokenizer.end(&mut self.builder);
        let doc = self.builder.finish();
        debug_assert!(self.builder.stack.is_empty());
        log::debug!(target: "html.parser", "parsed document with {} nodes", doc.len());
        doc
    }
}

/// Parse a complete document.
pub fn parse_document(input: &str, options: &ParserOptions) -> Document {
    let mut parser = Parser::new(options.clone());
    parser.write(input);
    parser.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementKind;

    fn names(doc: &Document, id: NodeId) -> Vec<String> {
        doc.children(id)
            .map(|c| match &doc.node(c).data {
                NodeData::Element(el) => el.name.clone(),
                NodeData::Text(t) => format!("#{t}"),
                NodeData::Comment(t) => format!("<!{t}>"),
                NodeData::CData => "cdata".to_string(),
                NodeData::ProcessingInstruction { name, .. } => name.clone(),
                NodeData::Document => "document".to_string(),
            })
            .collect()
    }

    fn html(input: &str) -> Document {
        parse_document(input, &ParserOptions::default())
    }

    #[test]
    fn list_items_close_each_other() {
        let doc = html("<ul><li>one<li>two</ul>");
        let ul = doc.children(doc.root()).next().expect("ul");
        assert_eq!(names(&doc, ul), vec!["li", "li"]);
    }

    #[test]
    fn block_closes_paragraph() {
        let doc = html("<p>a<div>b</div>");
        assert_eq!(names(&doc, doc.root()), vec!["p", "div"]);
    }

    #[test]
    fn table_cells_close_siblings() {
        let doc = html("<table><tr><td>a<td>b<tr><td>c</table>");
        let table = doc.children(doc.root()).next().expect("table");
        assert_eq!(names(&doc, table), vec!["tr", "tr"]);
        let first_row = doc.children(table).next().expect("tr");
        assert_eq!(names(&doc, first_row), vec!["td", "td"]);
    }

    #[test]
    fn void_elements_take_no_children() {
        let doc = html("<p>a<br>b<img src=x>c</p>");
        let p = doc.children(doc.root()).next().expect("p");
        assert_eq!(names(&doc, p), vec!["#a", "br", "#b", "img", "#c"]);
    }

    #[test]
    fn stray_close_tags_recover() {
        let doc = html("a</p>b</br>c</span>d");
        assert_eq!(names(&doc, doc.root()), vec!["#a", "p", "#b", "br", "#cd"]);
    }

    #[test]
    fn close_tag_closes_intervening_elements() {
        let doc = html("<div><span><b>x</div>y");
        assert_eq!(names(&doc, doc.root()), vec!["div", "#y"]);
    }

    #[test]
    fn foreign_content_suspends_html_rules() {
        let doc = html("<svg><circle/><p>x</p><foreignObject><p>a<p>b</foreignObject></svg>");
        let svg = doc.children(doc.root()).next().expect("svg");
        assert_eq!(names(&doc, svg), vec!["circle", "p", "foreignobject"]);
        let fo = doc.children(svg).nth(2).expect("foreignObject");
        assert_eq!(names(&doc, fo), vec!["p", "p"]);
    }

    #[test]
    fn attributes_last_write_wins() {
        let doc = html(r#"<a HREF="1" id=x href='2'>t</a>"#);
        let a = doc.children(doc.root()).next().expect("a");
        let el = doc.element(a).expect("element");
        assert_eq!(
            el.attributes,
            vec![("href".into(), "2".into()), ("id".into(), "x".into())]
        );
    }

    #[test]
    fn script_and_style_kinds() {
        let doc = html("<script>var a = '<b>';</script><style>b{}</style>");
        let kinds: Vec<_> = doc
            .children(doc.root())
            .filter_map(|c| doc.element(c).map(|e| e.kind))
            .collect();
        assert_eq!(kinds, vec![ElementKind::Script, ElementKind::Style]);
        let script = doc.children(doc.root()).next().expect("script");
        assert_eq!(doc.text_content(script), "var a = '<b>';");
    }

    #[test]
    fn cdata_comments_and_declarations() {
        let doc = html("<!DOCTYPE html><![CDATA[x]]><!--c-->");
        assert_eq!(
            names(&doc, doc.root()),
            vec!["!doctype", "<![CDATA[x]]>", "<!c>"]
        );

        let doc = parse_document("<a><![CDATA[x]]></a>", &ParserOptions::xml());
        let a = doc.children(doc.root()).next().expect("a");
        assert_eq!(names(&doc, a), vec!["cdata"]);
    }

    #[test]
    fn text_runs_coalesce() {
        let doc = html("a &amp; b");
        assert_eq!(names(&doc, doc.root()), vec!["#a & b"]);
    }

    #[test]
    fn indices_cover_the_source() {
        let options = ParserOptions {
            with_start_indices: true,
            with_end_indices: true,
            ..ParserOptions::default()
        };
        let doc = parse_document("x<b>yz</b>", &options);
        let b = doc.children(doc.root()).nth(1).expect("b");
        assert_eq!(doc.node(b).start_index, Some(1));
        assert_eq!(doc.node(b).end_index, Some(9));
        let text = doc.children(b).next().expect("text");
        assert_eq!(doc.node(text).start_index, Some(4));
        assert_eq!(doc.node(text).end_index, Some(5));
    }

    #[test]
    fn unterminated_input_leaves_empty_stack() {
        let mut parser = Parser::new(ParserOptions::default());
        parser.write("<div><p>open <b>bold");
        assert_eq!(parser.open_elements(), 3);
        parser.write(" <i class='x");
        let doc = parser.end();
        assert_eq!(parser.open_elements(), 0);
        assert_eq!(doc.text_content(doc.root()), "open bold ");
    }
}
