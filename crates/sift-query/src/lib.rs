//! Query scanning, parsing and expression trees for sift.
//!
//! This crate turns a typed search query into a tree of boolean operations:
//!
//! - **Terms**: `rust` - bare words
//! - **Phrases**: `"error handling"` - quoted text
//! - **Negation**: `-deprecated` - applies to a single term, phrase, field or group
//! - **AND**: `rust AND async` or just `rust async`
//! - **OR**: `rust OR golang` - binds looser than AND
//! - **Grouping**: `(a b) OR (c d)` - precedence control, kept in the tree
//! - **Fields**: `trip:123` - any token matched by a caller-registered pattern
//!
//! The tree is read through the [`Visitor`] protocol; [`Printer`] renders it
//! back to query text.
//!
//! # Example
//!
//! ```
//! use sift_query::{Node, Parser, Scanner};
//!
//! let mut scanner = Scanner::new();
//! scanner.register_pattern("TRIP", r"(?s)^(trip:[0-9]+)(.*)$").unwrap();
//!
//! let mut parser = Parser::new(scanner);
//! parser.read_string("Lukas AND -term AND trip:123");
//! let tree = parser.parse().unwrap();
//!
//! assert_eq!(
//!     tree,
//!     Node::and(
//!         Node::and(Node::term("Lukas"), Node::not(Node::term("term"))),
//!         Node::field("TRIP", "trip:123"),
//!     )
//! );
//! assert_eq!(tree.to_string(), "Lukas AND -term AND trip:123");
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod parser;
mod rule;
mod scanner;
mod token;
mod visitor;

pub use ast::Node;
pub use error::{Expected, PatternError, SyntaxError};
pub use parser::{Parser, parse};
pub use rule::{CUSTOM_RULE_SLOT, LexicalRule, builtin_rules};
pub use scanner::Scanner;
pub use token::{Token, TokenKind};
pub use visitor::{Outline, Printer, Shape, Visitor};
