// Selector lexer. Whitespace runs become a single token because whitespace
// between compounds is the descendant combinator.
//
// input: "ul > li.item"
// output: [Ident(ul), Whitespace, Gt, Whitespace, Ident(li), Dot, Ident(item)]

use crate::ast::{Matcher, is_ident_char};
use crate::error::SelectorError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Token {
    Ident(String),
    Str(String),
    Hash(String),
    Star,
    Dot,
    Comma,
    Gt,
    Plus,
    Tilde,
    Column,
    LBracket,
    RBracket,
    Matcher(Matcher),
    Whitespace,
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Ident(s) => s.clone(),
            Token::Str(s) => format!("\"{s}\""),
            Token::Hash(s) => format!("#{s}"),
            Token::Star => "*".into(),
            Token::Dot => ".".into(),
            Token::Comma => ",".into(),
            Token::Gt => ">".into(),
            Token::Plus => "+".into(),
            Token::Tilde => "~".into(),
            Token::Column => "||".into(),
            Token::LBracket => "[".into(),
            Token::RBracket => "]".into(),
            Token::Matcher(m) => m.as_str().into(),
            Token::Whitespace => "whitespace".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Spanned {
    pub(crate) token: Token,
    pub(crate) offset: usize,
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

fn is_ident_start(c: char) -> bool {
    is_ident_char(c) && !c.is_ascii_digit()
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn unexpected(&self, offset: usize) -> SelectorError {
        match self.input[offset..].chars().next() {
            Some(c) => SelectorError::UnexpectedToken {
                offset,
                found: c.to_string(),
            },
            None => SelectorError::UnexpectedEnd,
        }
    }

    // Identifier characters with `\` escapes taken literally.
    fn ident_body(&mut self) -> Result<String, SelectorError> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.bump();
                let escaped = self.bump().ok_or(SelectorError::UnexpectedEnd)?;
                out.push(escaped);
            } else if is_ident_char(c) {
                self.bump();
                out.push(c);
            } else {
                break;
            }
        }
        Ok(out)
    }

    fn string(&mut self, quote: char) -> Result<String, SelectorError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(SelectorError::UnexpectedEnd),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => {
                    let escaped = self.bump().ok_or(SelectorError::UnexpectedEnd)?;
                    out.push(escaped);
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Spanned>, SelectorError> {
        let offset = self.pos;
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let token = match c {
            c if is_whitespace(c) => {
                while self.peek().is_some_and(is_whitespace) {
                    self.bump();
                }
                Token::Whitespace
            }
            '"' | '\'' => {
                self.bump();
                Token::Str(self.string(c)?)
            }
            '#' => {
                self.bump();
                let name = self.ident_body()?;
                if name.is_empty() {
                    return Err(self.unexpected(offset));
                }
                Token::Hash(name)
            }
            '.' => {
                self.bump();
                Token::Dot
            }
            ',' => {
                self.bump();
                Token::Comma
            }
            '>' => {
                self.bump();
                Token::Gt
            }
            '+' => {
                self.bump();
                Token::Plus
            }
            '[' => {
                self.bump();
                Token::LBracket
            }
            ']' => {
                self.bump();
                Token::RBracket
            }
            '=' => {
                self.bump();
                Token::Matcher(Matcher::Equals)
            }
            '*' | '~' | '|' | '^' | '$' => {
                self.bump();
                let followed_by_eq = self.peek() == Some('=');
                if followed_by_eq {
                    self.bump();
                }
                match (c, followed_by_eq) {
                    ('*', true) => Token::Matcher(Matcher::Substring),
                    ('*', false) => Token::Star,
                    ('~', true) => Token::Matcher(Matcher::Includes),
                    ('~', false) => Token::Tilde,
                    ('|', true) => Token::Matcher(Matcher::DashMatch),
                    ('|', false) if self.peek() == Some('|') => {
                        self.bump();
                        Token::Column
                    }
                    ('^', true) => Token::Matcher(Matcher::Prefix),
                    ('$', true) => Token::Matcher(Matcher::Suffix),
                    _ => return Err(self.unexpected(offset)),
                }
            }
            '\\' => Token::Ident(self.ident_body()?),
            c if is_ident_start(c) => Token::Ident(self.ident_body()?),
            _ => return Err(self.unexpected(offset)),
        };
        Ok(Some(Spanned { token, offset }))
    }
}

pub(crate) fn lex(input: &str) -> Result<Vec<Spanned>, SelectorError> {
    let mut lexer = Lexer { input, pos: 0 };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        lex(input)
            .expect("lexes")
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn lexes_operators_and_whitespace() {
        assert_eq!(
            kinds("a  >b~=c||*"),
            vec![
                Token::Ident("a".into()),
                Token::Whitespace,
                Token::Gt,
                Token::Ident("b".into()),
                Token::Matcher(Matcher::Includes),
                Token::Ident("c".into()),
                Token::Column,
                Token::Star,
            ]
        );
    }

    #[test]
    fn escapes_and_strings() {
        assert_eq!(
            kinds(r#"\1a x#a\.b"q\"t""#),
            vec![
                Token::Ident("1a".into()),
                Token::Whitespace,
                Token::Ident("x".into()),
                Token::Hash("a.b".into()),
                Token::Str("q\"t".into()),
            ]
        );
        assert_eq!(lex("'open"), Err(SelectorError::UnexpectedEnd));
        assert!(matches!(
            lex("a & b"),
            Err(SelectorError::UnexpectedToken { offset: 2, .. })
        ));
    }
}
