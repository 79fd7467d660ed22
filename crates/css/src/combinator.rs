// Parser combinators over the selector token stream.
//
// A parser takes the token slice and a position and returns the parsed value
// with the position after it, or `None` without consuming anything.

use crate::token::{Spanned, Token};

pub(crate) trait Parser<T> {
    fn parse(&self, input: &[Spanned], at: usize) -> Option<(T, usize)>;
}

impl<T, F> Parser<T> for F
where
    F: Fn(&[Spanned], usize) -> Option<(T, usize)>,
{
    fn parse(&self, input: &[Spanned], at: usize) -> Option<(T, usize)> {
        self(input, at)
    }
}

/// One token, accepted when `f` maps it to a value.
pub(crate) fn token<T>(f: impl Fn(&Token) -> Option<T>) -> impl Parser<T> {
    move |input: &[Spanned], at: usize| {
        let value = f(&input.get(at)?.token)?;
        Some((value, at + 1))
    }
}

/// One token equal to `expected`.
pub(crate) fn literal(expected: Token) -> impl Parser<()> {
    token(move |t| (*t == expected).then_some(()))
}

pub(crate) fn map<A, B>(p: impl Parser<A>, f: impl Fn(A) -> B) -> impl Parser<B> {
    move |input: &[Spanned], at: usize| p.parse(input, at).map(|(v, next)| (f(v), next))
}

/// Like [`map`], but the mapping may reject the match.
pub(crate) fn filter_map<A, B>(p: impl Parser<A>, f: impl Fn(A) -> Option<B>) -> impl Parser<B> {
    move |input: &[Spanned], at: usize| {
        let (v, next) = p.parse(input, at)?;
        Some((f(v)?, next))
    }
}

/// `a` then `b`.
pub(crate) fn seq<A, B>(a: impl Parser<A>, b: impl Parser<B>) -> impl Parser<(A, B)> {
    move |input: &[Spanned], at: usize| {
        let (va, next) = a.parse(input, at)?;
        let (vb, next) = b.parse(input, next)?;
        Some(((va, vb), next))
    }
}

/// `a` then `b`, combined by `join`.
pub(crate) fn ab<A, B, T>(
    a: impl Parser<A>,
    b: impl Parser<B>,
    join: impl Fn(A, B) -> T,
) -> impl Parser<T> {
    map(seq(a, b), move |(va, vb)| join(va, vb))
}

/// `a` then `b`, keeping `b`.
pub(crate) fn right<A, B>(a: impl Parser<A>, b: impl Parser<B>) -> impl Parser<B> {
    ab(a, b, |_, vb| vb)
}

/// `a` then `b`, keeping `a`.
pub(crate) fn left<A, B>(a: impl Parser<A>, b: impl Parser<B>) -> impl Parser<A> {
    ab(a, b, |va, _| va)
}

/// First of `a`, `b` that matches.
pub(crate) fn choice<T>(a: impl Parser<T>, b: impl Parser<T>) -> impl Parser<T> {
    move |input: &[Spanned], at: usize| a.parse(input, at).or_else(|| b.parse(input, at))
}

pub(crate) fn option<T>(p: impl Parser<T>) -> impl Parser<Option<T>> {
    move |input: &[Spanned], at: usize| match p.parse(input, at) {
        Some((v, next)) => Some((Some(v), next)),
        None => Some((None, at)),
    }
}

/// Zero or more repetitions.
pub(crate) fn many<T>(p: impl Parser<T>) -> impl Parser<Vec<T>> {
    move |input: &[Spanned], mut at: usize| {
        let mut out = Vec::new();
        while let Some((v, next)) = p.parse(input, at) {
            debug_assert!(next > at, "repeated parser must consume input");
            out.push(v);
            at = next;
        }
        Some((out, at))
    }
}

/// One or more `p` separated by `sep`.
pub(crate) fn sep_by1<T, S>(p: impl Parser<T>, sep: impl Parser<S>) -> impl Parser<Vec<T>> {
    move |input: &[Spanned], at: usize| {
        let (first, mut at) = p.parse(input, at)?;
        let mut out = vec![first];
        while let Some((v, next)) = sep
            .parse(input, at)
            .and_then(|(_, after)| p.parse(input, after))
        {
            out.push(v);
            at = next;
        }
        Some((out, at))
    }
}

/// `first` followed by any number of `rest`, folded from the left.
pub(crate) fn left_assoc<T, R>(
    first: impl Parser<T>,
    rest: impl Parser<R>,
    fold: impl Fn(T, R) -> T,
) -> impl Parser<T> {
    move |input: &[Spanned], at: usize| {
        let (mut acc, mut at) = first.parse(input, at)?;
        while let Some((r, next)) = rest.parse(input, at) {
            acc = fold(acc, r);
            at = next;
        }
        Some((acc, at))
    }
}
