// Selector syntax tree, specificity, canonical ordering and serialization.
//
// A complex selector such as `ul > li.x` is a compound whose parts hold a
// `Combinator` entry carrying the compound to its left:
//   Compound[Combinator(>, Compound[Tag(ul)]), Tag(li), Class(x)]

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

/// (ids, classes and attributes, types). Compared lexicographically.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Add for Specificity {
    type Output = Specificity;

    fn add(self, rhs: Specificity) -> Specificity {
        Specificity(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.0, self.1, self.2)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    Adjacent,
    /// `a ~ b`
    Sibling,
    /// `a || b`, parsed but not matchable.
    Column,
}

impl Combinator {
    pub fn as_str(self) -> &'static str {
        match self {
            Combinator::Descendant => " ",
            Combinator::Child => ">",
            Combinator::Adjacent => "+",
            Combinator::Sibling => "~",
            Combinator::Column => "||",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::Descendant => f.write_str("descendant"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Attribute value operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Matcher {
    /// `=`
    Equals,
    /// `~=` whitespace-separated word
    Includes,
    /// `|=` exact or followed by `-`
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

impl Matcher {
    pub fn as_str(self) -> &'static str {
        match self {
            Matcher::Equals => "=",
            Matcher::Includes => "~=",
            Matcher::DashMatch => "|=",
            Matcher::Prefix => "^=",
            Matcher::Suffix => "$=",
            Matcher::Substring => "*=",
        }
    }

    /// Test an attribute value against `expected`. Both sides must already
    /// be case-folded when the comparison is case-insensitive.
    pub fn test(self, actual: &str, expected: &str) -> bool {
        match self {
            Matcher::Equals => actual == expected,
            Matcher::Includes => {
                !expected.is_empty()
                    && !expected.contains(|c: char| c.is_ascii_whitespace())
                    && actual.split_ascii_whitespace().any(|w| w == expected)
            }
            Matcher::DashMatch => {
                actual == expected
                    || actual
                        .strip_prefix(expected)
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            Matcher::Prefix => !expected.is_empty() && actual.starts_with(expected),
            Matcher::Suffix => !expected.is_empty() && actual.ends_with(expected),
            Matcher::Substring => !expected.is_empty() && actual.contains(expected),
        }
    }
}

/// The `i` / `s` flag of an attribute selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CaseModifier {
    Insensitive,
    Sensitive,
}

impl CaseModifier {
    pub fn as_str(self) -> &'static str {
        match self {
            CaseModifier::Insensitive => "i",
            CaseModifier::Sensitive => "s",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    Universal,
    Tag(String),
    Class(String),
    Id(String),
    AttrPresence {
        name: String,
    },
    AttrValue {
        name: String,
        matcher: Matcher,
        value: String,
        modifier: Option<CaseModifier>,
    },
    Combinator {
        combinator: Combinator,
        left: Box<CompoundSelector>,
    },
}

impl SimpleSelector {
    pub fn specificity(&self) -> Specificity {
        match self {
            SimpleSelector::Universal => Specificity(0, 0, 0),
            SimpleSelector::Tag(_) => Specificity(0, 0, 1),
            SimpleSelector::Class(_)
            | SimpleSelector::AttrPresence { .. }
            | SimpleSelector::AttrValue { .. } => Specificity(0, 1, 0),
            SimpleSelector::Id(_) => Specificity(1, 0, 0),
            SimpleSelector::Combinator { left, .. } => left.specificity(),
        }
    }

    // Canonical position inside a compound: combinator, universal, tag, id,
    // class, presence, value. Ties break on the serialized form.
    fn rank(&self) -> u8 {
        match self {
            SimpleSelector::Combinator { .. } => 0,
            SimpleSelector::Universal => 1,
            SimpleSelector::Tag(_) => 2,
            SimpleSelector::Id(_) => 3,
            SimpleSelector::Class(_) => 4,
            SimpleSelector::AttrPresence { .. } => 5,
            SimpleSelector::AttrValue { .. } => 6,
        }
    }

    fn canonical_cmp(&self, other: &SimpleSelector) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.to_string().cmp(&other.to_string()))
    }
}

/// One complex selector: simple parts plus at most one combinator link to
/// the compound on its left.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CompoundSelector {
    pub list: Vec<SimpleSelector>,
}

impl CompoundSelector {
    pub fn specificity(&self) -> Specificity {
        self.list
            .iter()
            .fold(Specificity::default(), |acc, s| acc + s.specificity())
    }

    pub fn normalize(&mut self) {
        for part in &mut self.list {
            if let SimpleSelector::Combinator { left, .. } = part {
                left.normalize();
            }
        }
        let has_concrete = self.list.iter().any(|s| {
            !matches!(
                s,
                SimpleSelector::Universal | SimpleSelector::Combinator { .. }
            )
        });
        let mut seen_universal = false;
        self.list.retain(|s| {
            if !matches!(s, SimpleSelector::Universal) {
                return true;
            }
            let keep = !has_concrete && !seen_universal;
            seen_universal = true;
            keep
        });
        self.list.sort_by(SimpleSelector::canonical_cmp);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    Compound(CompoundSelector),
    List(Vec<CompoundSelector>),
}

impl Selector {
    /// The selector as a list of complex selectors.
    pub fn into_compounds(self) -> Vec<CompoundSelector> {
        match self {
            Selector::Compound(c) => vec![c],
            Selector::List(list) => list,
        }
    }

    /// Canonical form: parts sorted, redundant `*` dropped, lists sorted and
    /// de-duplicated.
    pub fn normalize(self) -> Selector {
        match self {
            Selector::Compound(mut c) => {
                c.normalize();
                Selector::Compound(c)
            }
            Selector::List(list) => {
                let mut keyed: Vec<(String, CompoundSelector)> = list
                    .into_iter()
                    .map(|mut c| {
                        c.normalize();
                        (c.to_string(), c)
                    })
                    .collect();
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
                keyed.dedup_by(|a, b| a.0 == b.0);
                let mut list: Vec<CompoundSelector> =
                    keyed.into_iter().map(|(_, c)| c).collect();
                if list.len() == 1 {
                    Selector::Compound(list.remove(0))
                } else {
                    Selector::List(list)
                }
            }
        }
    }
}

pub fn normalize(selector: Selector) -> Selector {
    selector.normalize()
}

pub fn serialize(selector: &Selector) -> String {
    selector.to_string()
}

pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn write_ident(f: &mut fmt::Formatter<'_>, ident: &str) -> fmt::Result {
    for (i, c) in ident.chars().enumerate() {
        let needs_escape = !is_ident_char(c) || (i == 0 && c.is_ascii_digit());
        if needs_escape {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    Ok(())
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleSelector::Universal => f.write_str("*"),
            SimpleSelector::Tag(name) => write_ident(f, name),
            SimpleSelector::Class(name) => {
                f.write_str(".")?;
                write_ident(f, name)
            }
            SimpleSelector::Id(name) => {
                f.write_str("#")?;
                for c in name.chars() {
                    if !is_ident_char(c) {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                Ok(())
            }
            SimpleSelector::AttrPresence { name } => {
                f.write_str("[")?;
                write_ident(f, name)?;
                f.write_str("]")
            }
            SimpleSelector::AttrValue {
                name,
                matcher,
                value,
                modifier,
            } => {
                f.write_str("[")?;
                write_ident(f, name)?;
                write!(f, "{}\"", matcher.as_str())?;
                for c in value.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("\"")?;
                if let Some(m) = modifier {
                    write!(f, " {}", m.as_str())?;
                }
                f.write_str("]")
            }
            SimpleSelector::Combinator { combinator, left } => {
                write!(f, "{left}{}", combinator.as_str())
            }
        }
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.list {
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Compound(c) => write!(f, "{c}"),
            Selector::List(list) => {
                for (i, c) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{c}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specificity_orders_lexicographically() {
        assert!(Specificity(1, 0, 0) > Specificity(0, 5, 5));
        assert!(Specificity(0, 1, 0) > Specificity(0, 0, 9));
        assert_eq!(
            Specificity(0, 1, 1) + Specificity(1, 0, 0),
            Specificity(1, 1, 1)
        );
    }

    #[test]
    fn matchers_follow_attribute_semantics() {
        assert!(Matcher::Includes.test("a b  c", "b"));
        assert!(!Matcher::Includes.test("a b", ""));
        assert!(Matcher::DashMatch.test("en-US", "en"));
        assert!(!Matcher::DashMatch.test("english", "en"));
        assert!(Matcher::Prefix.test("https://x", "https"));
        assert!(!Matcher::Suffix.test("abc", ""));
        assert!(Matcher::Substring.test("abc", "b"));
    }

    #[test]
    fn normalize_keeps_a_lone_universal_after_a_combinator() {
        let mut c = CompoundSelector {
            list: vec![
                SimpleSelector::Universal,
                SimpleSelector::Combinator {
                    combinator: Combinator::Child,
                    left: Box::new(CompoundSelector {
                        list: vec![SimpleSelector::Tag("ul".into())],
                    }),
                },
            ],
        };
        c.normalize();
        assert_eq!(c.to_string(), "ul>*");
    }
}
