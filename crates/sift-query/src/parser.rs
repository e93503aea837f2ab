//! Query parser.
//!
//! Pulls tokens from a [`Scanner`] one at a time and builds a query tree
//! using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! query       → disjunction END
//! disjunction → conjunction ("OR" conjunction)*
//! conjunction → operand (["AND"] operand)*
//! operand     → "-" atom | atom
//! atom        → WORD | TEXT | CUSTOM | "(" disjunction ")"
//! ```
//!
//! `AND` is not a token kind: it is a `WORD` spelled exactly `AND`. Adjacent
//! operands with no keyword between them are joined as if `AND` were written.
//!
//! # Precedence (highest to lowest)
//!
//! 1. Grouping: `(...)`
//! 2. Negation: `-`
//! 3. AND (explicit or implicit)
//! 4. OR
//!
//! Both binary operators fold left: `a AND b AND c` is `And(And(a, b), c)`.

use std::mem;

use tracing::debug;

use crate::{
    ast::Node,
    error::{Expected, SyntaxError},
    scanner::Scanner,
    token::{AND_KEYWORD, Token, TokenKind},
};

/// Maximum nesting of parenthesized groups.
const MAX_GROUP_DEPTH: usize = 128;

/// Recursive descent parser bound to one scanner.
#[derive(Debug, Clone)]
pub struct Parser {
    /// Token source.
    scanner: Scanner,
    /// One-token lookahead.
    current: Token,
    /// Whether input has been read and not yet parsed.
    ready: bool,
    /// Current group nesting depth.
    depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(Scanner::new())
    }
}

impl Parser {
    /// Creates a parser over `scanner`, keeping any rules registered on it.
    pub fn new(scanner: Scanner) -> Self {
        Self {
            scanner,
            current: Token::end(0),
            ready: false,
            depth: 0,
        }
    }

    /// Loads `input` for the next call to [`Parser::parse`].
    pub fn read_string(&mut self, input: &str) {
        self.scanner.read_string(input);
        self.current = Token::end(0);
        self.ready = true;
        self.depth = 0;
    }

    /// Parses the loaded input into a query tree.
    ///
    /// Each loaded input can be parsed once; after success or failure, call
    /// [`Parser::read_string`] again before parsing.
    ///
    /// # Panics
    ///
    /// Panics if no input has been loaded since the last parse.
    pub fn parse(&mut self) -> Result<Node, SyntaxError> {
        assert!(
            self.ready,
            "Parser::parse called without a preceding read_string"
        );
        self.ready = false;
        self.bump();

        let result = self.parse_query();
        match &result {
            Ok(node) => debug!(query = self.scanner.input(), tree = %node, "parsed query"),
            Err(err) => debug!(
                query = self.scanner.input(),
                position = err.position,
                found = %err.found,
                message = %err.message,
                "query syntax error"
            ),
        }
        result
    }

    /// Loads and parses `input` in one step.
    pub fn parse_str(&mut self, input: &str) -> Result<Node, SyntaxError> {
        self.read_string(input);
        self.parse()
    }

    /// Returns the underlying scanner.
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Consumes the parser, returning its scanner.
    pub fn into_scanner(self) -> Scanner {
        self.scanner
    }

    /// Parses: query → disjunction END
    fn parse_query(&mut self) -> Result<Node, SyntaxError> {
        let expr = self.parse_disjunction()?;

        if !self.current.is_end() {
            let message = match self.current.kind {
                TokenKind::RParen => "unexpected closing parenthesis".to_string(),
                _ => format!("unexpected {}", self.describe_current()),
            };
            return Err(self.error(message, Expected::EndOfQuery));
        }

        Ok(expr)
    }

    /// Parses: disjunction → conjunction ("OR" conjunction)*
    fn parse_disjunction(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.parse_conjunction()?;

        while self.current.kind == TokenKind::Or {
            self.bump(); // consume OR
            let right = self.parse_conjunction()?;
            left = Node::or(left, right);
        }

        Ok(left)
    }

    /// Parses: conjunction → operand (["AND"] operand)*
    fn parse_conjunction(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.parse_operand()?;

        loop {
            if self.current.is_keyword(AND_KEYWORD) {
                self.bump(); // consume AND
            } else if !self.can_start_operand() {
                break;
            }
            let right = self.parse_operand()?;
            left = Node::and(left, right);
        }

        Ok(left)
    }

    /// Checks whether the current token begins an implicitly joined operand.
    ///
    /// Tokens that cannot form an atom still count, so the atom parser reports
    /// them with a specific message.
    fn can_start_operand(&self) -> bool {
        match self.current.kind {
            TokenKind::End | TokenKind::Or | TokenKind::RParen => false,
            _ => !self.current.is_keyword(AND_KEYWORD),
        }
    }

    /// Parses: operand → "-" atom | atom
    fn parse_operand(&mut self) -> Result<Node, SyntaxError> {
        if self.current.kind == TokenKind::Minus {
            self.bump(); // consume -
            let atom = self.parse_atom()?;
            return Ok(Node::not(atom));
        }

        self.parse_atom()
    }

    /// Parses: atom → WORD | TEXT | CUSTOM | "(" disjunction ")"
    fn parse_atom(&mut self) -> Result<Node, SyntaxError> {
        match &self.current.kind {
            TokenKind::Word if self.current.is_keyword(AND_KEYWORD) => Err(self.error(
                "unexpected AND (needs expression before it)",
                Expected::Operand,
            )),
            TokenKind::Word => Ok(Node::Term(self.bump_text())),
            TokenKind::Text => {
                let quoted = self.bump_text();
                Ok(Node::Phrase(strip_quotes(&quoted).to_string()))
            }
            TokenKind::Custom(label) => {
                let label = label.clone();
                Ok(Node::FieldFilter {
                    label,
                    raw: self.bump_text(),
                })
            }
            TokenKind::LParen => self.parse_group(),
            TokenKind::RParen => Err(self.error("unexpected closing parenthesis", Expected::Operand)),
            TokenKind::Or => Err(self.error(
                "unexpected OR (needs expression before it)",
                Expected::Operand,
            )),
            TokenKind::Minus => Err(self.error(
                "unexpected '-' (negation applies to a single term, phrase, field or group)",
                Expected::Operand,
            )),
            TokenKind::Quote => Err(self.error("unclosed quote", Expected::Operand)),
            TokenKind::End => Err(self.error("unexpected end of query", Expected::Operand)),
            TokenKind::Colon | TokenKind::Illegal | TokenKind::Whitespace => {
                let message = format!("unexpected {}", self.describe_current());
                Err(self.error(message, Expected::Operand))
            }
        }
    }

    /// Parses a parenthesized group, consuming the surrounding parentheses.
    fn parse_group(&mut self) -> Result<Node, SyntaxError> {
        if self.depth >= MAX_GROUP_DEPTH {
            return Err(self.error("query is nested too deeply", Expected::Operand));
        }

        self.bump(); // consume (
        self.depth += 1;
        let inner = self.parse_disjunction()?;
        self.depth -= 1;

        if self.current.kind != TokenKind::RParen {
            return Err(self.error("expected closing parenthesis", Expected::ClosingParen));
        }
        self.bump(); // consume )

        Ok(Node::group(inner))
    }

    /// Describes the current token for error messages.
    fn describe_current(&self) -> String {
        match (&self.current.kind, &self.current.text) {
            (TokenKind::Illegal, Some(text)) => format!("character {text:?}"),
            (_, Some(text)) => format!("'{text}'"),
            (kind, None) => kind.to_string(),
        }
    }

    /// Builds a syntax error pointing at the current token.
    fn error(&self, message: impl Into<String>, expected: Expected) -> SyntaxError {
        SyntaxError {
            message: message.into(),
            expected,
            found: self.current.kind.clone(),
            text: self.current.text.clone(),
            position: self.current.position,
            input: self.scanner.input().to_string(),
        }
    }

    /// Advances to the next token, returning the one just consumed.
    fn bump(&mut self) -> Token {
        let next = self.scanner.advance().clone();
        mem::replace(&mut self.current, next)
    }

    /// Consumes the current token and returns its text.
    fn bump_text(&mut self) -> String {
        self.bump().text.unwrap_or_default()
    }
}

/// Removes the surrounding quotes from a `TEXT` token.
fn strip_quotes(quoted: &str) -> &str {
    quoted
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(quoted)
}

/// Parses `input` with the built-in rules only.
pub fn parse(input: &str) -> Result<Node, SyntaxError> {
    Parser::default().parse_str(input)
}
