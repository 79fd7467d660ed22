//! The converter: compiled selector rules plus the DOM walk.
//!
//! [`HtmlToText`] compiles the formatter rules, the base element selectors
//! and the data table selectors into decision trees once; every
//! [`HtmlToText::convert`] call then parses, finds the base elements and
//! walks them with a fresh [`Walker`].

use std::fmt;
use std::sync::{Arc, LazyLock};

use css::{DecisionTree, DomElement, Picker, TieBreak};
use html::{Document, Element, NodeData, NodeId, ParserOptions, SerializeOptions, parse_document};

use crate::builder::BlockTextBuilder;
use crate::error::CompileError;
use crate::formatters::{FormatFn, Formatters};
use crate::options::{
    ConvertOptions, DataTables, FormatOptions, Limits, OrderBy, default_selectors,
    merge_selectors,
};

const LOG_TARGET: &str = "layout.convert";

/// Nesting depth the walk and the base element search never go past, even
/// when `limits.max_depth` is unset or larger.
pub const MAX_WALK_DEPTH: usize = 256;

fn depth_limit(limits: &Limits) -> usize {
    limits
        .max_depth
        .map_or(MAX_WALK_DEPTH, |max| max.min(MAX_WALK_DEPTH))
}

#[derive(Clone)]
struct Rule {
    format: String,
    formatter: Arc<FormatFn>,
    options: FormatOptions,
}

enum TableMatcher {
    All,
    Never,
    Matching(Picker<()>),
}

pub struct HtmlToText {
    options: ConvertOptions,
    rules: Picker<Rule>,
    bases: Picker<usize>,
    data_tables: TableMatcher,
}

impl fmt::Debug for HtmlToText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlToText")
            .field("options", &self.options)
            .field("rules", &self.rules.tree().len())
            .finish()
    }
}

// Parse and check every selector, then weave them into one picker.
fn compile<V>(entries: Vec<(String, V)>) -> Result<Picker<V>, CompileError> {
    let mut sources = Vec::with_capacity(entries.len());
    let mut selectors = Vec::with_capacity(entries.len());
    for (source, value) in entries {
        let selector = css::parse(&source)
            .and_then(|selector| css::validate(&selector).map(|()| selector))
            .map_err(|err| CompileError::Selector {
                selector: source.clone(),
                source: err,
            })?;
        sources.push(source);
        selectors.push((selector, value));
    }
    DecisionTree::from_selectors(selectors)
        .map(Picker::new)
        .map_err(|err| CompileError::Selector {
            selector: sources.join(", "),
            source: err,
        })
}

impl HtmlToText {
    /// A converter using the built-in formatters.
    pub fn new(options: ConvertOptions) -> Result<Self, CompileError> {
        Self::with_formatters(options, &Formatters::builtin())
    }

    pub fn with_formatters(
        options: ConvertOptions,
        formatters: &Formatters,
    ) -> Result<Self, CompileError> {
        let mut definitions = default_selectors();
        definitions.extend(options.selectors.iter().cloned());
        let definitions = merge_selectors(definitions);

        let mut rules = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let format = definition
                .format
                .ok_or_else(|| CompileError::MissingFormat(definition.selector.clone()))?;
            let formatter =
                formatters
                    .get(&format)
                    .ok_or_else(|| CompileError::UnknownFormat {
                        selector: definition.selector.clone(),
                        format: format.clone(),
                    })?;
            rules.push((
                definition.selector,
                Rule {
                    format,
                    formatter,
                    options: definition.options,
                },
            ));
        }
        let rule_count = rules.len();
        let rules = compile(rules)?;

        let bases = compile(
            options
                .base_elements
                .selectors
                .iter()
                .cloned()
                .enumerate()
                .map(|(index, selector)| (selector, index))
                .collect(),
        )?;

        let data_tables = match &options.tables {
            DataTables::All(true) => TableMatcher::All,
            DataTables::All(false) => TableMatcher::Never,
            DataTables::Matching(list) if list.is_empty() => TableMatcher::Never,
            DataTables::Matching(list) => TableMatcher::Matching(compile(
                list.iter().map(|selector| (selector.clone(), ())).collect(),
            )?),
        };

        log::debug!(
            target: LOG_TARGET,
            "compiled {rule_count} formatter rules and {} base selectors",
            options.base_elements.selectors.len()
        );
        Ok(Self {
            options,
            rules,
            bases,
            data_tables,
        })
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    fn parser_options(&self) -> ParserOptions {
        let base = if self.options.xml_mode {
            ParserOptions::xml()
        } else {
            ParserOptions::default()
        };
        ParserOptions {
            decode_entities: self.options.decode_entities,
            ..base
        }
    }

    /// Convert markup to plain text. Input longer than
    /// `limits.max_input_length` bytes is cut first.
    pub fn convert(&self, html: &str) -> String {
        let html = match self.options.limits.max_input_length {
            Some(max) if html.len() > max => {
                let mut end = max;
                while !html.is_char_boundary(end) {
                    end -= 1;
                }
                log::warn!(
                    target: LOG_TARGET,
                    "input is {} bytes, only the first {end} are converted",
                    html.len()
                );
                &html[..end]
            }
            _ => html,
        };
        let doc = parse_document(html, &self.parser_options());
        self.convert_document(&doc)
    }

    /// Convert an already parsed document.
    pub fn convert_document(&self, doc: &Document) -> String {
        let bases = self.find_bases(doc);
        let mut walker = Walker {
            converter: self,
            doc,
            builder: BlockTextBuilder::new(&self.options),
            depth: 0,
        };
        walker.walk(&bases);
        walker.builder.text()
    }

    /// Elements the conversion starts from, or the top-level nodes when
    /// none is found and `return_dom_by_default` is set.
    fn find_bases(&self, doc: &Document) -> Vec<NodeId> {
        let limits = &self.options.limits;
        let max_bases = limits.max_base_elements.unwrap_or(usize::MAX);
        let max_depth = depth_limit(limits);
        let mut found: Vec<(usize, NodeId)> = Vec::new();
        let top: Vec<NodeId> = doc.children(doc.root()).collect();

        // (nodes, depth) still to search, first sibling group on top.
        let mut pending: Vec<(Vec<NodeId>, usize)> = vec![(top.clone(), 0)];
        'search: while let Some((mut nodes, depth)) = pending.pop() {
            if depth > max_depth {
                continue;
            }
            if let Some(max) = limits.max_child_nodes {
                nodes.truncate(max);
            }
            for (i, &id) in nodes.iter().enumerate() {
                let Some(el) = DomElement::new(doc, id) else {
                    continue;
                };
                if let Some(&index) = self.bases.pick1(el, TieBreak::PreferFirst) {
                    found.push((index, id));
                    if found.len() >= max_bases {
                        break 'search;
                    }
                    continue;
                }
                let children: Vec<NodeId> = doc.children(id).collect();
                if !children.is_empty() {
                    // Resume the siblings after this element's subtree.
                    pending.push((nodes[i + 1..].to_vec(), depth));
                    pending.push((children, depth + 1));
                    continue 'search;
                }
            }
        }

        if self.options.base_elements.order_by == OrderBy::Selectors {
            found.sort_by_key(|&(index, _)| index);
        }
        if found.is_empty() && self.options.base_elements.return_dom_by_default {
            return top;
        }
        found.into_iter().map(|(_, id)| id).collect()
    }
}

/// Conversion state handed to formatters.
pub struct Walker<'a> {
    converter: &'a HtmlToText,
    doc: &'a Document,
    builder: BlockTextBuilder,
    depth: usize,
}

impl<'a> Walker<'a> {
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn options(&self) -> &'a ConvertOptions {
        &self.converter.options
    }

    pub fn builder(&mut self) -> &mut BlockTextBuilder {
        &mut self.builder
    }

    pub fn element(&self, id: NodeId) -> Option<&'a Element> {
        self.doc.element(id)
    }

    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            xml_mode: self.converter.options.xml_mode,
            encode_entities: self.converter.options.decode_entities,
        }
    }

    /// Whether the `<table>` at `id` is laid out as a grid.
    pub fn is_data_table(&self, id: NodeId) -> bool {
        match &self.converter.data_tables {
            TableMatcher::All => true,
            TableMatcher::Never => false,
            TableMatcher::Matching(picker) => DomElement::new(self.doc, id)
                .is_some_and(|el| picker.pick1(el, TieBreak::PreferLast).is_some()),
        }
    }

    /// Render `nodes` in order. Past `max_depth` nested walks (at most
    /// [`MAX_WALK_DEPTH`]), or `max_child_nodes` siblings, the ellipsis
    /// stands in for the rest.
    pub fn walk(&mut self, nodes: &[NodeId]) {
        let converter = self.converter;
        let limits = &converter.options.limits;
        if self.depth > depth_limit(limits) {
            self.builder.add_inline(&limits.ellipsis, false);
            return;
        }
        let (nodes, truncated) = match limits.max_child_nodes {
            Some(max) if nodes.len() > max => (&nodes[..max], true),
            _ => (nodes, false),
        };

        self.depth += 1;
        for &id in nodes {
            self.visit(id);
        }
        if truncated {
            self.builder.add_inline(&limits.ellipsis, false);
        }
        self.depth -= 1;
    }

    pub fn walk_children(&mut self, id: NodeId) {
        let children: Vec<NodeId> = self.doc.children(id).collect();
        self.walk(&children);
    }

    fn visit(&mut self, id: NodeId) {
        let converter = self.converter;
        let doc = self.doc;
        match &doc.node(id).data {
            NodeData::Text(text) => self.builder.add_inline(text, false),
            NodeData::Element(el) => {
                let Some(dom) = DomElement::new(doc, id) else {
                    return;
                };
                let Some(rule) = converter.rules.pick1(dom, converter.options.tie_break) else {
                    self.walk_children(id);
                    return;
                };
                if let Err(err) = (rule.formatter)(self, id, &rule.options) {
                    log::error!(
                        target: LOG_TARGET,
                        "formatter `{}` failed on <{}>: {err}",
                        rule.format,
                        el.name
                    );
                }
            }
            NodeData::Document => self.walk_children(id),
            NodeData::Comment(_) | NodeData::CData | NodeData::ProcessingInstruction { .. } => {}
        }
    }
}

static DEFAULT_CONVERTER: LazyLock<Option<HtmlToText>> = LazyLock::new(|| {
    HtmlToText::new(ConvertOptions::default())
        .map_err(|err| log::error!(target: LOG_TARGET, "default converter: {err}"))
        .ok()
});

/// Convert with the default options.
pub fn html_to_text(html: &str) -> String {
    DEFAULT_CONVERTER
        .as_ref()
        .map(|converter| converter.convert(html))
        .unwrap_or_default()
}
