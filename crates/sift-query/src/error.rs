//! Error types for scanning rules and parsing.
//!
//! The scanner itself never fails: anything it cannot classify becomes an
//! `ILLEGAL` token. Failures surface either when a rule is registered
//! ([`PatternError`]) or when the parser meets a token that does not fit the
//! grammar ([`SyntaxError`]).

use std::{error::Error, fmt};

use thiserror::Error;

use crate::token::TokenKind;

/// A lexical rule could not be registered.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The pattern is not a valid regular expression.
    #[error("invalid pattern for {label}: {source}")]
    InvalidRegex {
        /// Label of the rule being registered.
        label: String,
        /// Underlying regex error.
        source: regex::Error,
    },

    /// The pattern does not declare exactly two capture groups.
    #[error("pattern for {label} must have exactly 2 capture groups (token, rest), found {found}")]
    CaptureGroups {
        /// Label of the rule being registered.
        label: String,
        /// Number of capture groups the pattern declares.
        found: usize,
    },
}

/// What the parser was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A term, phrase, field filter or parenthesized group.
    Operand,
    /// A `)` closing an open group.
    ClosingParen,
    /// The end of the query.
    EndOfQuery,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Operand => "a term, phrase, field or group",
            Self::ClosingParen => "')'",
            Self::EndOfQuery => "end of query",
        })
    }
}

/// The parser met a token that does not fit the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Error message.
    pub message: String,
    /// What the parser expected at this point.
    pub expected: Expected,
    /// Kind of the offending token.
    pub found: TokenKind,
    /// Text of the offending token (`None` at end of input).
    pub text: Option<String>,
    /// Character position of the offending token.
    pub position: usize,
    /// The query being parsed.
    pub input: String,
}

impl SyntaxError {
    /// Returns a suggestion for common mistakes.
    pub fn suggestion(&self) -> Option<&'static str> {
        match (&self.found, self.expected) {
            (TokenKind::Quote, _) => Some("Add a closing quote (\") to complete the phrase"),
            (_, Expected::ClosingParen) => {
                Some("Add a closing parenthesis ) to match the opening one")
            }
            (TokenKind::RParen, _) => Some("Remove the ) or add a matching ( before it"),
            (TokenKind::Or, _) => Some("OR requires expressions on both sides, e.g., 'me OR him'"),
            (TokenKind::Word, Expected::Operand) if self.text.as_deref() == Some("AND") => {
                Some("AND requires expressions on both sides, e.g., 'me AND him'")
            }
            (TokenKind::Colon, _) => {
                Some("Field filters must match a registered field pattern, e.g., 'trip:123'")
            }
            _ => None,
        }
    }

    /// Formats the error with the query and a caret under the offending token.
    pub fn format_with_context(&self) -> String {
        let clamped = self.position.min(self.input.chars().count());
        let mut result = format!("query syntax error: {}\n", self.message);
        result.push_str(&format!("  {}\n", self.input));
        result.push_str(&format!("  {}^", " ".repeat(clamped)));
        if let Some(suggestion) = self.suggestion() {
            result.push_str(&format!("\nhint: {suggestion}"));
        }
        result
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_context())
    }
}

impl Error for SyntaxError {}
