//! Loading grammars from text.
//!
//! The format is one production group per line:
//!
//! ```text
//! S -> a S b S | $
//! ```
//!
//! Tokens are separated by whitespace and `$` stands for the empty word.
//! Heads are variables. A body token is a variable if it is the head of some
//! line. Any other body token beginning with an uppercase letter is a variable
//! that was never defined, which is an error. Everything else is a terminal.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::local_prelude::*;

/// The marker for the empty word.
pub const EPSILON: &str = "$";

/// An error in grammar text.
#[derive(Debug, Error)]
pub enum GrammarSyntaxError {
    /// The text contains no productions.
    #[error("grammar text is empty")]
    Empty,
    /// A line could not be parsed.
    #[error("parse error at line {line}: {reason}")]
    Malformed {
        /// Human-readable reason for the error.
        reason: String,
        /// Line where the error happened.
        ///
        /// One-indexed.
        line: usize,
    },
    /// A body refers to a variable that is never the head of a line.
    #[error("undefined variable `{name}` at line {line}")]
    UndefinedVariable {
        /// Name of the variable.
        name: String,
        /// One-indexed line.
        line: usize,
    },
    /// No line has the requested start symbol as its head.
    #[error("start symbol `{0}` is not defined")]
    UndefinedStart(String),
    /// The grammar file could not be read.
    #[error("cannot read grammar: {0}")]
    Io(#[from] std::io::Error),
}

/// Grammar loading from text.
pub trait CfgLoadExt: Sized {
    /// Parses a grammar from text. The variable named `start` becomes the
    /// start symbol.
    fn load(text: &str, start: &str) -> Result<Self, GrammarSyntaxError>;

    /// Reads a file and parses it with [`fn load`].
    ///
    /// [`fn load`]: CfgLoadExt::load
    fn load_path(path: impl AsRef<Path>, start: &str) -> Result<Self, GrammarSyntaxError> {
        let text = fs::read_to_string(path)?;
        Self::load(&text, start)
    }
}

struct Line<'a> {
    number: usize,
    head: &'a str,
    alternatives: Vec<Vec<&'a str>>,
}

fn malformed(line: usize, reason: impl Into<String>) -> GrammarSyntaxError {
    GrammarSyntaxError::Malformed {
        reason: reason.into(),
        line,
    }
}

fn parse_lines(text: &str) -> Result<Vec<Line<'_>>, GrammarSyntaxError> {
    let mut lines = vec![];
    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let (head, body) = raw
            .split_once("->")
            .ok_or_else(|| malformed(number, "expected `->`"))?;
        let mut head_tokens = head.split_whitespace();
        let head = match (head_tokens.next(), head_tokens.next()) {
            (Some(EPSILON), None) => {
                return Err(malformed(number, "the empty word cannot be a head"));
            }
            (Some(head), None) => head,
            (None, _) => return Err(malformed(number, "missing head")),
            (Some(_), Some(_)) => return Err(malformed(number, "head must be a single token")),
        };
        let mut alternatives = vec![];
        for alternative in body.split('|') {
            let tokens: Vec<&str> = alternative.split_whitespace().collect();
            if tokens.is_empty() {
                return Err(malformed(number, "empty alternative, write `$` for the empty word"));
            }
            alternatives.push(tokens);
        }
        lines.push(Line {
            number,
            head,
            alternatives,
        });
    }
    Ok(lines)
}

fn looks_like_variable(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

impl CfgLoadExt for Cfg {
    fn load(text: &str, start: &str) -> Result<Self, GrammarSyntaxError> {
        let lines = parse_lines(text)?;
        if lines.is_empty() {
            return Err(GrammarSyntaxError::Empty);
        }

        let mut cfg = Cfg::new();
        let mut variables: HashMap<&str, Symbol> = HashMap::new();
        for line in &lines {
            if !variables.contains_key(line.head) {
                let sym = cfg.next_sym(Some(line.head.into()));
                variables.insert(line.head, sym);
            }
        }
        let start_sym = *variables
            .get(start)
            .ok_or_else(|| GrammarSyntaxError::UndefinedStart(start.to_string()))?;
        cfg.set_start(start_sym);

        let mut terminals: HashMap<&str, Symbol> = HashMap::new();
        for line in &lines {
            let lhs = variables[line.head];
            for alternative in &line.alternatives {
                let mut rhs = vec![];
                for &token in alternative {
                    if token == EPSILON {
                        continue;
                    }
                    let sym = if let Some(&var) = variables.get(token) {
                        var
                    } else if looks_like_variable(token) {
                        return Err(GrammarSyntaxError::UndefinedVariable {
                            name: token.to_string(),
                            line: line.number,
                        });
                    } else {
                        *terminals
                            .entry(token)
                            .or_insert_with(|| cfg.lexeme(Some(token.into())))
                    };
                    rhs.push(sym);
                }
                cfg.rule(lhs).rhs(rhs);
            }
        }
        debug!(
            "loaded grammar with {} variables, {} terminals and {} rules",
            variables.len(),
            terminals.len(),
            cfg.rules().count()
        );
        Ok(cfg)
    }
}
