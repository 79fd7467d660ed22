//! Evaluation of a compiled [`DecisionTree`] against elements.

use crate::ast::{Combinator, Specificity};
use crate::weave::{DecisionNode, DecisionTree};

/// Read access to an element and its neighbours.
pub trait ElementAccess: Copy {
    fn name(&self) -> &str;
    fn attr(&self, name: &str) -> Option<&str>;
    fn parent_element(&self) -> Option<Self>;
    fn prev_element_sibling(&self) -> Option<Self>;
}

/// One matched selector entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PickMatch {
    pub index: usize,
    pub specificity: Specificity,
}

/// Which of two equally specific matches wins.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "kebab-case")
)]
pub enum TieBreak {
    /// The entry given first.
    PreferFirst,
    /// The entry given last, like later rules in a stylesheet.
    #[default]
    PreferLast,
}

pub struct Picker<V> {
    tree: DecisionTree<V>,
}

impl<V> From<DecisionTree<V>> for Picker<V> {
    fn from(tree: DecisionTree<V>) -> Self {
        Self { tree }
    }
}

impl<V> Picker<V> {
    pub fn new(tree: DecisionTree<V>) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &DecisionTree<V> {
        &self.tree
    }

    /// Every entry matching `el`, ordered by index. An entry reached through
    /// several list members reports its highest specificity.
    pub fn pick_all<E: ElementAccess>(&self, el: E) -> Vec<PickMatch> {
        let mut found = Vec::new();
        let mut stack = Vec::new();
        walk(self.tree.branches(), el, &mut stack, &mut found);
        debug_assert!(stack.is_empty());

        found.sort_by(|a, b| {
            a.index
                .cmp(&b.index)
                .then(b.specificity.cmp(&a.specificity))
        });
        found.dedup_by_key(|m| m.index);
        found
    }

    /// The winning entry for `el`: highest specificity, then `tie_break`.
    pub fn pick1<E: ElementAccess>(&self, el: E, tie_break: TieBreak) -> Option<&V> {
        let winner = self.pick_all(el).into_iter().reduce(|best, next| {
            let replace = match next.specificity.cmp(&best.specificity) {
                std::cmp::Ordering::Greater => true,
                std::cmp::Ordering::Less => false,
                std::cmp::Ordering::Equal => match tie_break {
                    TieBreak::PreferFirst => next.index < best.index,
                    TieBreak::PreferLast => next.index > best.index,
                },
            };
            if replace { next } else { best }
        })?;
        self.tree.value(winner.index)
    }
}

fn walk<E: ElementAccess>(
    nodes: &[DecisionNode],
    el: E,
    stack: &mut Vec<E>,
    found: &mut Vec<PickMatch>,
) {
    for node in nodes {
        match node {
            DecisionNode::Terminal { index, specificity } => found.push(PickMatch {
                index: *index,
                specificity: *specificity,
            }),
            DecisionNode::TagName { variants } => {
                if let Some(cont) = variants.get(el.name()) {
                    walk(cont, el, stack, found);
                }
            }
            DecisionNode::AttrPresence { name, cont } => {
                if el.attr(name).is_some() {
                    walk(cont, el, stack, found);
                }
            }
            DecisionNode::AttrValue { name, branches } => {
                if let Some(value) = el.attr(name) {
                    for branch in branches {
                        if branch.test.matches(value) {
                            walk(&branch.cont, el, stack, found);
                        }
                    }
                }
            }
            DecisionNode::PushElement { combinator, cont } => {
                stack.push(el);
                match combinator {
                    Combinator::Descendant => {
                        let mut next = el.parent_element();
                        while let Some(ancestor) = next {
                            walk(cont, ancestor, stack, found);
                            next = ancestor.parent_element();
                        }
                    }
                    Combinator::Child => {
                        if let Some(parent) = el.parent_element() {
                            walk(cont, parent, stack, found);
                        }
                    }
                    Combinator::Adjacent => {
                        if let Some(prev) = el.prev_element_sibling() {
                            walk(cont, prev, stack, found);
                        }
                    }
                    Combinator::Sibling => {
                        let mut next = el.prev_element_sibling();
                        while let Some(prev) = next {
                            walk(cont, prev, stack, found);
                            next = prev.prev_element_sibling();
                        }
                    }
                    // Rejected at compile time.
                    Combinator::Column => {}
                }
                stack.pop();
            }
            DecisionNode::PopElement { cont } => {
                let Some(origin) = stack.pop() else {
                    debug_assert!(false, "PopElement without PushElement");
                    continue;
                };
                walk(cont, origin, stack, found);
                stack.push(origin);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Flat element table: (name, attributes, parent, previous sibling).
    struct Table(Vec<(&'static str, Vec<(&'static str, &'static str)>, Option<usize>, Option<usize>)>);

    #[derive(Clone, Copy)]
    struct El<'a>(&'a Table, usize);

    impl ElementAccess for El<'_> {
        fn name(&self) -> &str {
            self.0.0[self.1].0
        }
        fn attr(&self, name: &str) -> Option<&str> {
            self.0.0[self.1]
                .1
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| *v)
        }
        fn parent_element(&self) -> Option<Self> {
            self.0.0[self.1].2.map(|i| El(self.0, i))
        }
        fn prev_element_sibling(&self) -> Option<Self> {
            self.0.0[self.1].3.map(|i| El(self.0, i))
        }
    }

    // <html><body><div id=main class="a b"><ul>
    //   <li id=one class=first></li><li></li>
    // </ul></div></body></html>
    fn table() -> Table {
        Table(vec![
            ("html", vec![], None, None),
            ("body", vec![], Some(0), None),
            ("div", vec![("id", "main"), ("class", "a b")], Some(1), None),
            ("ul", vec![], Some(2), None),
            ("li", vec![("id", "one"), ("class", "first")], Some(3), None),
            ("li", vec![], Some(3), Some(4)),
        ])
    }

    #[test]
    fn id_beats_many_classes_and_types_in_both_modes() {
        let table = table();
        let target = El(&table, 4);
        let specific = "html body div ul li.first[class][class~=first][class^=fi][class$=st]";
        assert_eq!(
            crate::parser::parse1(specific).expect("parses").specificity(),
            Specificity(0, 5, 5)
        );
        for (pairs, expected) in [
            (vec![("#one", "id"), (specific, "long")], "id"),
            (vec![(specific, "long"), ("#one", "id")], "id"),
        ] {
            let picker = Picker::new(DecisionTree::new(pairs).expect("compiles"));
            let matches = picker.pick_all(target);
            assert_eq!(matches.len(), 2);
            for tie in [TieBreak::PreferFirst, TieBreak::PreferLast] {
                assert_eq!(picker.pick1(target, tie), Some(&expected));
            }
        }
    }

    #[test]
    fn equal_specificity_follows_tie_break() {
        let table = table();
        let picker = Picker::new(
            DecisionTree::new(vec![("li", 1), ("ul > li", 2), ("ul li", 3)]).expect("compiles"),
        );
        let li = El(&table, 5);
        assert_eq!(picker.pick1(li, TieBreak::PreferLast), Some(&3));
        assert_eq!(picker.pick1(li, TieBreak::PreferFirst), Some(&2));
    }

    #[test]
    fn combinators_walk_the_right_elements() {
        let table = table();
        let picker = Picker::new(
            DecisionTree::new(vec![
                ("div li", 'd'),
                ("li + li", 'a'),
                (".first ~ li", 's'),
                ("div > li", 'x'),
                ("#main ul > li.first", 'f'),
            ])
            .expect("compiles"),
        );
        let picked = |i: usize| -> Vec<char> {
            picker
                .pick_all(El(&table, i))
                .into_iter()
                .filter_map(|m| picker.tree().value(m.index).copied())
                .collect()
        };
        assert_eq!(picked(4), vec!['d', 'f']);
        assert_eq!(picked(5), vec!['d', 'a', 's']);
        assert_eq!(picked(2), Vec::<char>::new());
    }

    #[test]
    fn list_entries_report_their_best_specificity() {
        let table = table();
        let picker = Picker::new(DecisionTree::new(vec![("div, #main", ())]).expect("compiles"));
        assert_eq!(
            picker.pick_all(El(&table, 2)),
            vec![PickMatch {
                index: 0,
                specificity: Specificity(1, 0, 0)
            }]
        );
    }
}
