//! Extended context-free grammars.
//!
//! Every variable has a single regular expression as its body. In text, each
//! line has the form
//!
//! ```text
//! S -> a S b S | $
//! ```
//!
//! where the body uses the syntax of [`cfpq_regexp::parse`]. Blank lines are
//! skipped. A head that appears on several lines gets the union of its bodies.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use thiserror::Error;

use cfpq_grammar::Cfg;
use cfpq_regexp::{Regex, RegexError};

/// The start variable of a grammar that does not name one.
pub const DEFAULT_START: &str = "S";

/// An error in extended grammar text.
#[derive(Debug, Error)]
pub enum EcfgError {
    /// A line could not be split into a head and a body.
    #[error("parse error at line {line}: {reason}")]
    Malformed {
        /// Human-readable reason for the error.
        reason: String,
        /// One-indexed line.
        line: usize,
    },
    /// A body is not a valid regular expression.
    #[error("invalid body at line {line}: {source}")]
    Regex {
        source: RegexError,
        /// One-indexed line.
        line: usize,
    },
    /// The grammar file could not be read.
    #[error("cannot read grammar: {0}")]
    Io(#[from] io::Error),
}

/// A grammar with one regular expression per variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ecfg {
    start: String,
    variables: BTreeSet<String>,
    productions: BTreeMap<String, Regex>,
}

impl Ecfg {
    /// Creates a grammar without productions.
    pub fn new(start: impl Into<String>) -> Self {
        let start = start.into();
        Ecfg {
            variables: BTreeSet::from([start.clone()]),
            start,
            productions: BTreeMap::new(),
        }
    }

    /// Converts a context-free grammar. Every rule becomes the concatenation of its
    /// symbol names, and the rules of one head are united.
    pub fn from_cfg(cfg: &Cfg) -> Self {
        let start = cfg
            .start()
            .map_or_else(|| DEFAULT_START.to_string(), |start| cfg.name_of(start).into_owned());
        let mut ecfg = Ecfg::new(start);
        for variable in cfg.variables() {
            ecfg.variables.insert(cfg.name_of(variable).into_owned());
        }
        for rule in cfg.rules() {
            let body = if rule.rhs.is_empty() {
                Regex::Epsilon
            } else {
                Regex::Concat(
                    rule.rhs
                        .iter()
                        .map(|&sym| Regex::label(cfg.name_of(sym)))
                        .collect(),
                )
            };
            ecfg.add_production(cfg.name_of(rule.lhs).into_owned(), body);
        }
        ecfg
    }

    /// Parses grammar text.
    pub fn from_text(text: &str, start: &str) -> Result<Self, EcfgError> {
        let mut ecfg = Ecfg::new(start);
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let (head, body) = raw.split_once("->").ok_or_else(|| EcfgError::Malformed {
                reason: "expected `->`".to_string(),
                line,
            })?;
            let head = head.trim();
            if head.is_empty() || head.contains(char::is_whitespace) {
                return Err(EcfgError::Malformed {
                    reason: "head must be a single token".to_string(),
                    line,
                });
            }
            let body = Regex::parse(body).map_err(|source| EcfgError::Regex { source, line })?;
            ecfg.add_production(head, body);
        }
        debug!(
            "loaded extended grammar with {} productions",
            ecfg.productions.len()
        );
        Ok(ecfg)
    }

    /// Reads a file and parses it with [`Ecfg::from_text`].
    pub fn from_path(path: impl AsRef<Path>, start: &str) -> Result<Self, EcfgError> {
        let text = fs::read_to_string(path)?;
        Self::from_text(&text, start)
    }

    /// Adds a body to a variable. An existing body is united with the new one.
    pub fn add_production(&mut self, head: impl Into<String>, body: Regex) {
        let head = head.into();
        self.variables.insert(head.clone());
        let body = match self.productions.remove(&head) {
            Some(existing) => existing.union(body),
            None => body,
        };
        self.productions.insert(head, body);
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    /// Variables, including the start variable and variables without a body.
    pub fn variables(&self) -> &BTreeSet<String> {
        &self.variables
    }

    /// The body of a variable.
    pub fn production(&self, head: &str) -> Option<&Regex> {
        self.productions.get(head)
    }

    /// All `(head, body)` pairs, ordered by head.
    pub fn productions(&self) -> impl Iterator<Item = (&str, &Regex)> {
        self.productions.iter().map(|(head, body)| (&head[..], body))
    }
}
