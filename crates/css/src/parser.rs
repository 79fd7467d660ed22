// Selector grammar.
//
// list      := complex (ws? "," ws? complex)*
// complex   := compound (combinator compound)*
// combinator:= ws? (">" | "+" | "~" | "||") ws? | ws
// compound  := ("*" | ident)? ("." ident | hash | attribute)*   (non-empty)
// attribute := "[" ws? ident ws? (matcher ws? (ident | string) ws? modifier? ws?)? "]"

use crate::ast::{CaseModifier, Combinator, CompoundSelector, Matcher, Selector, SimpleSelector};
use crate::combinator::{
    Parser, ab, choice, filter_map, left, left_assoc, literal, many, map, option, right, sep_by1,
    seq, token,
};
use crate::error::SelectorError;
use crate::token::{Spanned, Token, lex};

fn ws() -> impl Parser<()> {
    map(option(literal(Token::Whitespace)), |_| ())
}

fn ident() -> impl Parser<String> {
    token(|t| match t {
        Token::Ident(s) => Some(s.clone()),
        _ => None,
    })
}

fn type_selector() -> impl Parser<SimpleSelector> {
    choice(
        map(literal(Token::Star), |_| SimpleSelector::Universal),
        map(ident(), SimpleSelector::Tag),
    )
}

fn class_selector() -> impl Parser<SimpleSelector> {
    map(right(literal(Token::Dot), ident()), SimpleSelector::Class)
}

fn id_selector() -> impl Parser<SimpleSelector> {
    token(|t| match t {
        Token::Hash(s) => Some(SimpleSelector::Id(s.clone())),
        _ => None,
    })
}

fn matcher() -> impl Parser<Matcher> {
    token(|t| match t {
        Token::Matcher(m) => Some(*m),
        _ => None,
    })
}

fn attr_value() -> impl Parser<String> {
    token(|t| match t {
        Token::Ident(s) | Token::Str(s) => Some(s.clone()),
        _ => None,
    })
}

fn modifier() -> impl Parser<CaseModifier> {
    token(|t| match t {
        Token::Ident(s) if s.eq_ignore_ascii_case("i") => Some(CaseModifier::Insensitive),
        Token::Ident(s) if s.eq_ignore_ascii_case("s") => Some(CaseModifier::Sensitive),
        _ => None,
    })
}

fn attribute_selector() -> impl Parser<SimpleSelector> {
    let value_part = seq(
        left(matcher(), ws()),
        seq(left(attr_value(), ws()), option(left(modifier(), ws()))),
    );
    let body = ab(left(ident(), ws()), option(value_part), |name, value| match value {
        None => SimpleSelector::AttrPresence { name },
        Some((matcher, (value, modifier))) => SimpleSelector::AttrValue {
            name,
            matcher,
            value,
            modifier,
        },
    });
    left(
        right(seq(literal(Token::LBracket), ws()), body),
        literal(Token::RBracket),
    )
}

fn subclass_selector() -> impl Parser<SimpleSelector> {
    choice(
        choice(class_selector(), id_selector()),
        attribute_selector(),
    )
}

fn compound_selector() -> impl Parser<CompoundSelector> {
    filter_map(
        ab(option(type_selector()), many(subclass_selector()), |head, mut rest| {
            if let Some(head) = head {
                rest.insert(0, head);
            }
            rest
        }),
        |list| (!list.is_empty()).then_some(CompoundSelector { list }),
    )
}

fn combinator() -> impl Parser<Combinator> {
    let symbol = token(|t| match t {
        Token::Gt => Some(Combinator::Child),
        Token::Plus => Some(Combinator::Adjacent),
        Token::Tilde => Some(Combinator::Sibling),
        Token::Column => Some(Combinator::Column),
        _ => None,
    });
    choice(
        left(right(ws(), symbol), ws()),
        map(literal(Token::Whitespace), |_| Combinator::Descendant),
    )
}

fn complex_selector() -> impl Parser<CompoundSelector> {
    left_assoc(
        compound_selector(),
        seq(combinator(), compound_selector()),
        |left, (combinator, right)| {
            let mut list = Vec::with_capacity(right.list.len() + 1);
            list.push(SimpleSelector::Combinator {
                combinator,
                left: Box::new(left),
            });
            list.extend(right.list);
            CompoundSelector { list }
        },
    )
}

fn selector_list() -> impl Parser<Vec<CompoundSelector>> {
    let comma = seq(ws(), seq(literal(Token::Comma), ws()));
    left(right(ws(), sep_by1(complex_selector(), comma)), ws())
}

fn error_at(tokens: &[Spanned], at: usize) -> SelectorError {
    match tokens.get(at) {
        Some(t) => SelectorError::UnexpectedToken {
            offset: t.offset,
            found: t.token.describe(),
        },
        None => SelectorError::UnexpectedEnd,
    }
}

/// Parse a selector or a comma-separated selector list.
pub fn parse(input: &str) -> Result<Selector, SelectorError> {
    let tokens = lex(input)?;
    if tokens.iter().all(|t| t.token == Token::Whitespace) {
        return Err(SelectorError::Empty);
    }
    let (mut list, end) = selector_list()
        .parse(&tokens, 0)
        .ok_or_else(|| error_at(&tokens, 0))?;
    if end < tokens.len() {
        // A dangling combinator or comma is an early end, not a stray token.
        let rest_is_connector = tokens[end..].iter().all(|t| {
            matches!(
                t.token,
                Token::Whitespace
                    | Token::Comma
                    | Token::Gt
                    | Token::Plus
                    | Token::Tilde
                    | Token::Column
            )
        });
        return Err(if rest_is_connector {
            SelectorError::UnexpectedEnd
        } else {
            error_at(&tokens, end)
        });
    }
    Ok(if list.len() == 1 {
        Selector::Compound(list.remove(0))
    } else {
        Selector::List(list)
    })
}

/// Parse exactly one complex selector.
pub fn parse1(input: &str) -> Result<CompoundSelector, SelectorError> {
    match parse(input)? {
        Selector::Compound(c) => Ok(c),
        Selector::List(list) => Err(SelectorError::UnexpectedList(list.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Specificity, normalize, serialize};

    fn round_trip(input: &str) -> String {
        serialize(&normalize(parse(input).expect("parses")))
    }

    #[test]
    fn parses_compound_parts() {
        let c = parse1(r#"a.x#y[href][lang|="en" i]"#).expect("parses");
        assert_eq!(
            c.list,
            vec![
                SimpleSelector::Tag("a".into()),
                SimpleSelector::Class("x".into()),
                SimpleSelector::Id("y".into()),
                SimpleSelector::AttrPresence {
                    name: "href".into()
                },
                SimpleSelector::AttrValue {
                    name: "lang".into(),
                    matcher: Matcher::DashMatch,
                    value: "en".into(),
                    modifier: Some(CaseModifier::Insensitive),
                },
            ]
        );
        assert_eq!(c.specificity(), Specificity(1, 3, 1));
    }

    #[test]
    fn combinators_nest_to_the_left() {
        let c = parse1("div ul > li + p ~ span").expect("parses");
        assert_eq!(c.to_string(), "div ul>li+p~span");
        assert_eq!(c.specificity(), Specificity(0, 0, 5));
        let Some(SimpleSelector::Combinator { combinator, left }) = c.list.first() else {
            panic!("expected combinator first, got {c:?}");
        };
        assert_eq!(*combinator, Combinator::Sibling);
        assert_eq!(left.to_string(), "div ul>li+p");
    }

    #[test]
    fn whitespace_around_symbols_is_insignificant() {
        assert_eq!(round_trip("  a   >   b  "), "a>b");
        assert_eq!(round_trip("a ,b"), "a,b");
        assert_eq!(round_trip("[ x = 'y' ]"), r#"[x="y"]"#);
    }

    #[test]
    fn normalization_sorts_and_deduplicates() {
        assert_eq!(round_trip("p[b].a#i"), "p#i.a[b]");
        assert_eq!(round_trip("p, a, p"), "a,p");
        assert_eq!(round_trip("*"), "*");
        assert_eq!(round_trip("*.x"), ".x");
    }

    #[test]
    fn errors_are_reported() {
        assert_eq!(parse(""), Err(SelectorError::Empty));
        assert_eq!(parse("  "), Err(SelectorError::Empty));
        assert_eq!(parse("a >"), Err(SelectorError::UnexpectedEnd));
        assert_eq!(parse("a,"), Err(SelectorError::UnexpectedEnd));
        assert!(matches!(
            parse("a[x"),
            Err(SelectorError::UnexpectedToken { offset: 1, .. })
        ));
        assert!(matches!(
            parse("a ]"),
            Err(SelectorError::UnexpectedToken { offset: 2, .. })
        ));
        assert_eq!(parse1("a, b"), Err(SelectorError::UnexpectedList(2)));
    }

    #[test]
    fn column_combinator_parses() {
        let c = parse1("col || td").expect("parses");
        assert_eq!(c.to_string(), "col||td");
    }
}
