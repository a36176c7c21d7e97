//! Parsing of label-level regular expressions.
//!
//! Labels are words, not characters, so each distinct label is first replaced by
//! one private-use character. The resulting pattern goes through `regex-syntax`,
//! and its `Hir` is translated back into a [`Regex`] over labels.

use std::str;

use log::trace;
use regex_syntax::Parser;
use regex_syntax::hir::{Class, Hir, HirKind};
use thiserror::Error;

use crate::regex::Regex;

/// An error in regular expression text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegexError {
    /// The pattern was rejected by the regex parser.
    #[error("invalid regular expression `{text}`: {reason}")]
    Syntax { text: String, reason: String },
    /// The expression uses more distinct labels than can be encoded.
    #[error("too many distinct labels in regular expression")]
    TooManyLabels,
    /// The parsed expression contains a construct without a label meaning.
    #[error("unsupported construct in regular expression: {0}")]
    Unsupported(String),
}

/// Private-use planes that encode labels.
const LABEL_PLANES: [(u32, u32); 3] = [(0xE000, 0xF8FF), (0xF0000, 0xFFFFD), (0x100000, 0x10FFFD)];

fn label_char(mut id: usize) -> Option<char> {
    for (first, last) in LABEL_PLANES {
        let size = (last - first + 1) as usize;
        if id < size {
            return char::from_u32(first + id as u32);
        }
        id -= size;
    }
    None
}

fn label_id(ch: char) -> Option<usize> {
    let mut offset = 0;
    for (first, last) in LABEL_PLANES {
        let code = ch as u32;
        if (first..=last).contains(&code) {
            return Some(offset + (code - first) as usize);
        }
        offset += (last - first + 1) as usize;
    }
    None
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Label(&'a str),
    Union,
    Star,
    Open,
    Close,
    Epsilon,
}

fn is_special(ch: char) -> bool {
    matches!(ch, '|' | '+' | '*' | '.' | '(' | ')' | '$') || ch.is_whitespace()
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = vec![];
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        if !is_special(ch) {
            let end = rest.find(is_special).unwrap_or(rest.len());
            tokens.push(Token::Label(&rest[..end]));
            rest = &rest[end..];
            continue;
        }
        match ch {
            '|' | '+' => tokens.push(Token::Union),
            '*' => tokens.push(Token::Star),
            '(' => tokens.push(Token::Open),
            ')' => tokens.push(Token::Close),
            '$' => tokens.push(Token::Epsilon),
            // Concatenation is implied by juxtaposition.
            _ => {}
        }
        rest = &rest[ch.len_utf8()..];
    }
    tokens
}

struct Translator<'a> {
    labels: Vec<&'a str>,
}

impl<'a> Translator<'a> {
    fn pattern(&mut self, tokens: &[Token<'a>]) -> Result<String, RegexError> {
        let mut pattern = String::new();
        let mut previous = None;
        for token in tokens {
            match *token {
                Token::Label(label) => {
                    let id = match self.labels.iter().position(|&known| known == label) {
                        Some(id) => id,
                        None => {
                            self.labels.push(label);
                            self.labels.len() - 1
                        }
                    };
                    pattern.push(label_char(id).ok_or(RegexError::TooManyLabels)?);
                }
                Token::Union => pattern.push('|'),
                // `x**` is the same as `x*`.
                Token::Star if previous == Some(&Token::Star) => {}
                Token::Star => pattern.push('*'),
                Token::Open => pattern.push_str("(?:"),
                Token::Close => pattern.push(')'),
                Token::Epsilon => pattern.push_str("(?:)"),
            }
            previous = Some(token);
        }
        Ok(pattern)
    }

    fn label(&self, ch: char) -> Result<Regex, RegexError> {
        label_id(ch)
            .and_then(|id| self.labels.get(id))
            .map(|&label| Regex::Label(label.to_string()))
            .ok_or_else(|| RegexError::Unsupported(format!("character {:?}", ch)))
    }

    fn walk_hir(&self, hir: &Hir, depth: usize) -> Result<Regex, RegexError> {
        let indent = "  ".repeat(depth);
        match hir.kind() {
            HirKind::Literal(lit) => {
                trace!("{indent}Literal: {:?}", lit);
                let text = str::from_utf8(&lit.0)
                    .map_err(|_| RegexError::Unsupported("non-UTF-8 literal".to_string()))?;
                let mut labels = text
                    .chars()
                    .map(|ch| self.label(ch))
                    .collect::<Result<Vec<_>, _>>()?;
                if labels.len() == 1 {
                    Ok(labels.swap_remove(0))
                } else {
                    Ok(Regex::Concat(labels))
                }
            }
            HirKind::Class(Class::Unicode(class)) => {
                trace!("{indent}Class: {:?}", class);
                let mut alternatives = vec![];
                for range in class.ranges() {
                    for ch in range.start()..=range.end() {
                        alternatives.push(self.label(ch)?);
                    }
                }
                if alternatives.len() == 1 {
                    Ok(alternatives.swap_remove(0))
                } else {
                    Ok(Regex::Union(alternatives))
                }
            }
            HirKind::Class(Class::Bytes(_)) => {
                Err(RegexError::Unsupported("byte class".to_string()))
            }
            HirKind::Repetition(rep) => {
                trace!("{indent}Repetition: {:?}", (rep.min, rep.max));
                let sub = self.walk_hir(&rep.sub, depth + 1)?;
                let mut parts = vec![sub.clone(); rep.min as usize];
                match rep.max {
                    None => parts.push(sub.star()),
                    Some(max) => {
                        let optional = Regex::Union(vec![Regex::Epsilon, sub]);
                        parts.extend((rep.min..max).map(|_| optional.clone()));
                    }
                }
                if parts.len() == 1 {
                    Ok(parts.swap_remove(0))
                } else {
                    Ok(Regex::Concat(parts))
                }
            }
            HirKind::Capture(group) => {
                trace!("{indent}Group");
                self.walk_hir(&group.sub, depth + 1)
            }
            HirKind::Concat(exprs) => {
                trace!("{indent}Concat:");
                let items = exprs
                    .iter()
                    .map(|expr| self.walk_hir(expr, depth + 1))
                    .collect::<Result<_, _>>()?;
                Ok(Regex::Concat(items))
            }
            HirKind::Alternation(exprs) => {
                trace!("{indent}Alternation:");
                let items = exprs
                    .iter()
                    .map(|expr| self.walk_hir(expr, depth + 1))
                    .collect::<Result<_, _>>()?;
                Ok(Regex::Union(items))
            }
            HirKind::Look(look) => Err(RegexError::Unsupported(format!("{:?}", look))),
            HirKind::Empty => {
                trace!("{indent}Empty");
                Ok(Regex::Epsilon)
            }
        }
    }
}

/// Parses a regular expression over labels.
///
/// Labels are maximal runs of characters other than whitespace and `|+*.()$`.
/// `|` and `+` denote union, `*` the Kleene star, `.` and whitespace
/// concatenation, and `$` the empty word. Empty text denotes the empty word.
pub fn parse(text: &str) -> Result<Regex, RegexError> {
    let tokens = tokenize(text);
    let mut translator = Translator { labels: vec![] };
    let pattern = translator.pattern(&tokens)?;
    let hir = Parser::new()
        .parse(&pattern)
        .map_err(|err| RegexError::Syntax {
            text: text.to_string(),
            reason: err.to_string(),
        })?;
    translator.walk_hir(&hir, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("xy* (x | y*)"),
            vec![
                Token::Label("xy"),
                Token::Star,
                Token::Open,
                Token::Label("x"),
                Token::Union,
                Token::Label("y"),
                Token::Star,
                Token::Close,
            ]
        );
        assert_eq!(
            tokenize("a.b+$"),
            vec![Token::Label("a"), Token::Label("b"), Token::Union, Token::Epsilon]
        );
    }

    #[test]
    fn test_label_chars_round_trip() {
        for id in [0, 6399, 6400, 6400 + 65533, 6400 + 65534] {
            let ch = label_char(id).unwrap();
            assert_eq!(label_id(ch), Some(id));
        }
        assert_eq!(label_id('a'), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse("(a"), Err(RegexError::Syntax { .. })));
        assert!(matches!(parse("a)"), Err(RegexError::Syntax { .. })));
        assert!(matches!(parse("*a"), Err(RegexError::Syntax { .. })));
    }
}
