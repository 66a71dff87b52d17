//! Tokenizer.

use crate::error::FormulaError;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `**` or `^`.
    Power,
    LParen,
    RParen,
    Comma,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Ident(name) => write!(f, "identifier {name:?}"),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::Slash => f.write_str("'/'"),
            Self::Percent => f.write_str("'%'"),
            Self::Power => f.write_str("'**'"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
            Self::Comma => f.write_str("','"),
        }
    }
}

/// A token and the byte offset it starts at.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

/// Split a formula into tokens. Whitespace separates tokens and is otherwise ignored.
pub fn tokenize(src: &str) -> Result<Vec<Token>, FormulaError> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        let pos = i;
        let single = match c {
            b' ' | b'\t' | b'\n' | b'\r' => {
                i += 1;
                continue;
            }
            b'+' => Some(TokenKind::Plus),
            b'-' => Some(TokenKind::Minus),
            b'/' => Some(TokenKind::Slash),
            b'%' => Some(TokenKind::Percent),
            b'^' => Some(TokenKind::Power),
            b'(' => Some(TokenKind::LParen),
            b')' => Some(TokenKind::RParen),
            b',' => Some(TokenKind::Comma),
            b'*' => {
                if bytes.get(i + 1) == Some(&b'*') {
                    i += 1;
                    Some(TokenKind::Power)
                } else {
                    Some(TokenKind::Star)
                }
            }
            _ => None,
        };
        if let Some(kind) = single {
            i += 1;
            tokens.push(Token { kind, pos });
            continue;
        }

        if c.is_ascii_digit() || c == b'.' {
            i = scan_number(bytes, i);
            let text = &src[pos..i];
            let value: f64 = text.parse().map_err(|_| FormulaError::InvalidNumber {
                text: text.to_string(),
                pos,
            })?;
            tokens.push(Token {
                kind: TokenKind::Number(value),
                pos,
            });
        } else if c.is_ascii_alphabetic() || c == b'_' {
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Ident(src[pos..i].to_string()),
                pos,
            });
        } else {
            let ch = src[pos..].chars().next().unwrap_or('\u{fffd}');
            return Err(FormulaError::UnexpectedChar { ch, pos });
        }
    }
    Ok(tokens)
}

/// End of the number literal starting at `start`: digits, an optional
/// fraction and an optional exponent. An `e` not followed by exponent digits
/// is left for the next token.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let digits = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };
    let mut i = digits(start);
    if bytes.get(i) == Some(&b'.') {
        i = digits(i + 1);
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        if bytes.get(j).is_some_and(u8::is_ascii_digit) {
            i = digits(j);
        }
    }
    i
}
