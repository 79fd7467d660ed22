//! Decision tree compilation.
//!
//! Many `(selector, value)` pairs are merged into one tree so that an element
//! is tested against each distinct condition once, not once per selector.
//! At every level the compiler picks the condition kind shared by the most
//! remaining selectors (a tag name, presence of a named attribute, a value
//! test on a named attribute, or a combinator), branches on it, and recurses
//! on the rest.
//!
//! Class and id selectors are rewritten as `[class~=..]` and `[id=..]` after
//! their specificity is recorded. Universal selectors vanish: a selector
//! with no remaining conditions becomes a terminal.
//!
//! A combinator compiles to [`DecisionNode::PushElement`], which moves
//! matching to the related element(s) to test the left-hand compound; the
//! left-hand subtree ends in [`DecisionNode::PopElement`], which returns to
//! the original element to test what remains on the right.

use std::collections::BTreeMap;

use crate::ast::{
    CaseModifier, Combinator, CompoundSelector, Matcher, Selector, SimpleSelector, Specificity,
};
use crate::error::SelectorError;
use crate::parser::parse;

/// An attribute value test with its case handling applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueTest {
    pub matcher: Matcher,
    pub modifier: Option<CaseModifier>,
    /// Lowercased when the test is case-insensitive.
    pub value: String,
}

impl ValueTest {
    pub fn matches(&self, actual: &str) -> bool {
        if self.modifier == Some(CaseModifier::Insensitive) {
            self.matcher.test(&actual.to_lowercase(), &self.value)
        } else {
            self.matcher.test(actual, &self.value)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueBranch {
    pub test: ValueTest,
    pub cont: Vec<DecisionNode>,
}

/// A compiled matching step. Every node is tested against the current
/// element; sibling nodes in a `Vec` are alternatives that are all explored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecisionNode {
    /// Selector number `index` matched.
    Terminal {
        index: usize,
        specificity: Specificity,
    },
    /// Continue in the subtree keyed by the element's tag name.
    TagName {
        variants: BTreeMap<String, Vec<DecisionNode>>,
    },
    AttrPresence {
        name: String,
        cont: Vec<DecisionNode>,
    },
    /// Continue in every branch whose test accepts the attribute's value.
    AttrValue {
        name: String,
        branches: Vec<ValueBranch>,
    },
    /// Move to the element(s) related by `combinator` and continue there.
    PushElement {
        combinator: Combinator,
        cont: Vec<DecisionNode>,
    },
    /// Return to the element saved by the matching `PushElement`.
    PopElement { cont: Vec<DecisionNode> },
}

// Desugared simple selector.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Part {
    Tag(String),
    AttrPresence(String),
    AttrValue(String, ValueTest),
    Combinator(Combinator, Vec<Part>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Kind {
    Tag,
    AttrPresence(String),
    AttrValue(String),
    Combinator(Combinator),
}

impl Part {
    fn kind(&self) -> Kind {
        match self {
            Part::Tag(_) => Kind::Tag,
            Part::AttrPresence(name) => Kind::AttrPresence(name.clone()),
            Part::AttrValue(name, _) => Kind::AttrValue(name.clone()),
            Part::Combinator(c, _) => Kind::Combinator(*c),
        }
    }

    fn is_kind(&self, kind: &Kind) -> bool {
        match (self, kind) {
            (Part::Tag(_), Kind::Tag) => true,
            (Part::AttrPresence(a), Kind::AttrPresence(b)) => a == b,
            (Part::AttrValue(a, _), Kind::AttrValue(b)) => a == b,
            (Part::Combinator(a, _), Kind::Combinator(b)) => a == b,
            _ => false,
        }
    }
}

struct Item {
    parts: Vec<Part>,
    terminal: DecisionNode,
}

fn value_test(matcher: Matcher, modifier: Option<CaseModifier>, value: &str) -> ValueTest {
    let value = if modifier == Some(CaseModifier::Insensitive) {
        value.to_lowercase()
    } else {
        value.to_string()
    };
    ValueTest {
        matcher,
        modifier,
        value,
    }
}

fn desugar(compound: &CompoundSelector) -> Result<Vec<Part>, SelectorError> {
    let mut parts = Vec::with_capacity(compound.list.len());
    for simple in &compound.list {
        let part = match simple {
            SimpleSelector::Universal => continue,
            SimpleSelector::Tag(name) => Part::Tag(name.clone()),
            SimpleSelector::Class(name) => {
                Part::AttrValue("class".into(), value_test(Matcher::Includes, None, name))
            }
            SimpleSelector::Id(name) => {
                Part::AttrValue("id".into(), value_test(Matcher::Equals, None, name))
            }
            SimpleSelector::AttrPresence { name } => Part::AttrPresence(name.clone()),
            SimpleSelector::AttrValue {
                name,
                matcher,
                value,
                modifier,
            } => Part::AttrValue(name.clone(), value_test(*matcher, *modifier, value)),
            SimpleSelector::Combinator { combinator, left } => {
                if *combinator == Combinator::Column {
                    return Err(SelectorError::UnsupportedCombinator(*combinator));
                }
                Part::Combinator(*combinator, desugar(left)?)
            }
        };
        parts.push(part);
    }
    Ok(parts)
}

// Kind present in the most items; the earliest seen wins ties.
fn top_kind(items: &[Item]) -> Option<Kind> {
    let mut counts: Vec<(Kind, usize)> = Vec::new();
    for item in items {
        let mut seen: Vec<Kind> = Vec::new();
        for part in &item.parts {
            let kind = part.kind();
            if seen.contains(&kind) {
                continue;
            }
            match counts.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, n)) => *n += 1,
                None => counts.push((kind.clone(), 1)),
            }
            seen.push(kind);
        }
    }
    let mut best: Option<(Kind, usize)> = None;
    for (kind, n) in counts {
        if best.as_ref().is_none_or(|(_, m)| n > *m) {
            best = Some((kind, n));
        }
    }
    best.map(|(kind, _)| kind)
}

/// Remove the first part of `kind` from each item and group the items by
/// `key` of the removed part, in first-seen order.
fn splice_and_group<K: PartialEq>(
    items: Vec<Item>,
    kind: &Kind,
    key: impl Fn(Part) -> K,
) -> Vec<(K, Vec<Item>)> {
    let mut groups: Vec<(K, Vec<Item>)> = Vec::new();
    for mut item in items {
        let Some(pos) = item.parts.iter().position(|p| p.is_kind(kind)) else {
            debug_assert!(false, "item without the selected kind");
            continue;
        };
        let k = key(item.parts.remove(pos));
        match groups.iter_mut().find(|(g, _)| *g == k) {
            Some((_, group)) => group.push(item),
            None => groups.push((k, vec![item])),
        }
    }
    groups
}

fn weave(mut items: Vec<Item>) -> Vec<DecisionNode> {
    let mut branches = Vec::new();
    loop {
        let (done, rest): (Vec<Item>, Vec<Item>) =
            items.into_iter().partition(|i| i.parts.is_empty());
        branches.extend(done.into_iter().map(|i| i.terminal));
        let Some(kind) = top_kind(&rest) else {
            break;
        };
        let (matches, nonmatches): (Vec<Item>, Vec<Item>) = rest
            .into_iter()
            .partition(|i| i.parts.iter().any(|p| p.is_kind(&kind)));
        branches.push(branch_of_kind(kind, matches));
        items = nonmatches;
    }
    branches
}

fn branch_of_kind(kind: Kind, items: Vec<Item>) -> DecisionNode {
    match kind {
        Kind::Tag => {
            let groups = splice_and_group(items, &kind, |p| match p {
                Part::Tag(name) => name,
                _ => String::new(),
            });
            let variants = groups
                .into_iter()
                .map(|(name, group)| (name, weave(group)))
                .collect();
            DecisionNode::TagName { variants }
        }
        Kind::AttrPresence(ref name) => {
            let name = name.clone();
            let items = splice_and_group(items, &kind, |_| ())
                .into_iter()
                .flat_map(|(_, group)| group)
                .collect();
            DecisionNode::AttrPresence {
                name,
                cont: weave(items),
            }
        }
        Kind::AttrValue(ref name) => {
            let name = name.clone();
            let groups = splice_and_group(items, &kind, |p| match p {
                Part::AttrValue(_, test) => Some(test),
                _ => None,
            });
            let branches = groups
                .into_iter()
                .filter_map(|(test, group)| {
                    Some(ValueBranch {
                        test: test?,
                        cont: weave(group),
                    })
                })
                .collect();
            DecisionNode::AttrValue { name, branches }
        }
        Kind::Combinator(combinator) => {
            let groups = splice_and_group(items, &kind, |p| match p {
                Part::Combinator(_, left) => left,
                _ => Vec::new(),
            });
            let left_items = groups
                .into_iter()
                .map(|(left, group)| Item {
                    parts: left,
                    terminal: DecisionNode::PopElement { cont: weave(group) },
                })
                .collect();
            DecisionNode::PushElement {
                combinator,
                cont: weave(left_items),
            }
        }
    }
}

/// Check that every member of `selector` can be compiled.
pub fn validate(selector: &Selector) -> Result<(), SelectorError> {
    match selector {
        Selector::Compound(compound) => desugar(compound).map(drop),
        Selector::List(list) => list.iter().try_for_each(|c| desugar(c).map(drop)),
    }
}

/// Selectors compiled into one decision tree, with the value attached to
/// each.
#[derive(Clone, Debug)]
pub struct DecisionTree<V> {
    values: Vec<V>,
    branches: Vec<DecisionNode>,
}

impl<V> DecisionTree<V> {
    /// Parse and compile selector strings. Terminal indices follow the input
    /// order; every member of a selector list shares its entry's index.
    pub fn new<S: AsRef<str>>(pairs: Vec<(S, V)>) -> Result<Self, SelectorError> {
        let parsed = pairs
            .into_iter()
            .map(|(s, v)| Ok((parse(s.as_ref())?, v)))
            .collect::<Result<Vec<_>, SelectorError>>()?;
        Self::from_selectors(parsed)
    }

    pub fn from_selectors(pairs: Vec<(Selector, V)>) -> Result<Self, SelectorError> {
        let mut values = Vec::with_capacity(pairs.len());
        let mut items = Vec::new();
        for (index, (selector, value)) in pairs.into_iter().enumerate() {
            for mut compound in selector.into_compounds() {
                compound.normalize();
                let specificity = compound.specificity();
                items.push(Item {
                    parts: desugar(&compound)?,
                    terminal: DecisionNode::Terminal { index, specificity },
                });
            }
            values.push(value);
        }
        let selector_count = items.len();
        let branches = weave(items);
        log::debug!(
            target: "css.weave",
            "compiled {} selectors for {} values into {} top-level branches",
            selector_count,
            values.len(),
            branches.len()
        );
        Ok(Self { values, branches })
    }

    pub fn branches(&self) -> &[DecisionNode] {
        &self.branches
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn value(&self, index: usize) -> Option<&V> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal(index: usize, specificity: Specificity) -> DecisionNode {
        DecisionNode::Terminal { index, specificity }
    }

    #[test]
    fn shared_tag_becomes_one_branch() {
        let tree = DecisionTree::new(vec![("p", 0), ("p.x", 1), ("div", 2)]).expect("compiles");
        let [DecisionNode::TagName { variants }] = tree.branches() else {
            panic!("unexpected tree {:?}", tree.branches());
        };
        assert_eq!(variants.len(), 2);
        assert_eq!(variants["div"], vec![terminal(2, Specificity(0, 0, 1))]);
        let p = &variants["p"];
        assert_eq!(p[0], terminal(0, Specificity(0, 0, 1)));
        assert!(matches!(&p[1], DecisionNode::AttrValue { name, .. } if name == "class"));
    }

    #[test]
    fn universal_is_an_immediate_terminal() {
        let tree = DecisionTree::new(vec![("*", "any")]).expect("compiles");
        assert_eq!(tree.branches(), &[terminal(0, Specificity(0, 0, 0))]);
    }

    #[test]
    fn combinator_pushes_and_pops() {
        let tree = DecisionTree::new(vec![("ul > li", ())]).expect("compiles");
        let [DecisionNode::TagName { variants }] = tree.branches() else {
            panic!("unexpected tree {:?}", tree.branches());
        };
        let [DecisionNode::PushElement { combinator, cont }] = variants["li"].as_slice() else {
            panic!("unexpected subtree {:?}", variants["li"]);
        };
        assert_eq!(*combinator, Combinator::Child);
        let [DecisionNode::TagName { variants: left }] = cont.as_slice() else {
            panic!("unexpected left side {cont:?}");
        };
        assert_eq!(
            left["ul"],
            vec![DecisionNode::PopElement {
                cont: vec![terminal(0, Specificity(0, 0, 2))]
            }]
        );
    }

    #[test]
    fn list_members_share_an_index() {
        let tree = DecisionTree::new(vec![("h1, #top", 'h')]).expect("compiles");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.branches().len(), 2);
    }

    #[test]
    fn validate_finds_the_column_combinator_in_a_list() {
        let ok = parse("a, b > c").expect("parses");
        assert_eq!(validate(&ok), Ok(()));
        let bad = parse("a, col || td").expect("parses");
        assert_eq!(
            validate(&bad),
            Err(SelectorError::UnsupportedCombinator(Combinator::Column))
        );
    }

    #[test]
    fn column_combinator_is_rejected() {
        let err = DecisionTree::new(vec![("col || td", ())]).expect_err("rejected");
        assert_eq!(err, SelectorError::UnsupportedCombinator(Combinator::Column));
    }

    #[test]
    fn insensitive_values_are_folded() {
        let test = value_test(Matcher::Equals, Some(CaseModifier::Insensitive), "Text");
        assert!(test.matches("TEXT"));
        assert!(!value_test(Matcher::Equals, None, "Text").matches("TEXT"));
    }
}
