//! Regular expressions whose letters are edge labels.
//!
//! ```text
//! (a | b)* c
//! ```
//!
//! Expressions compile to ε-NFAs with Thompson's construction, and from there
//! to NFAs and minimal DFAs.

#![deny(unsafe_code)]

mod parse;
mod regex;

pub use crate::parse::{RegexError, parse};
pub use crate::regex::Regex;
