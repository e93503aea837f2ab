//! Query scanner (tokenizer).
//!
//! Produces one token per call to [`Scanner::advance`], so the parser can
//! interleave lookahead with grammar decisions. Whitespace is consumed
//! silently. The scanner never fails: input no rule accepts becomes an
//! `ILLEGAL` token.

use tracing::trace;

use crate::{
    error::PatternError,
    rule::{CUSTOM_RULE_SLOT, LexicalRule, builtin_rules},
    token::{AND_KEYWORD, Token, TokenKind},
};

/// Stateful scanner over a single query string.
#[derive(Debug, Clone)]
pub struct Scanner {
    /// Caller-registered rules, tried after the structural built-ins and
    /// before the generic ones.
    custom: Vec<LexicalRule>,
    /// The input most recently passed to `read_string`.
    input: String,
    /// Byte offset in `input` where the unconsumed suffix begins.
    offset: usize,
    /// Concatenated text of every token consumed so far.
    processed: String,
    /// Number of characters consumed from `input`.
    position: usize,
    /// The most recently emitted token.
    last: Token,
    /// Whether `read_string` has been called.
    loaded: bool,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Creates a scanner with only the built-in rules.
    pub fn new() -> Self {
        Self {
            custom: Vec::new(),
            input: String::new(),
            offset: 0,
            processed: String::new(),
            position: 0,
            last: Token::end(0),
            loaded: false,
        }
    }

    /// Compiles `pattern` and appends it as a rule producing `Custom(label)`.
    ///
    /// The pattern must declare exactly two capture groups: the token text and
    /// the remaining input. Registered rules are tried in registration order,
    /// after whitespace, quoted text and `OR` but before bare words,
    /// punctuation and the catch-all.
    pub fn register_pattern(
        &mut self,
        label: impl Into<String>,
        pattern: &str,
    ) -> Result<(), PatternError> {
        let rule = LexicalRule::new(TokenKind::Custom(label.into()), pattern)?;
        self.register_rule(rule);
        Ok(())
    }

    /// Appends an already compiled rule after all other caller rules.
    pub fn register_rule(&mut self, rule: LexicalRule) {
        self.custom.push(rule);
    }

    /// Returns the active rules in priority order.
    pub fn rules(&self) -> impl Iterator<Item = &LexicalRule> {
        let (structural, generic) = builtin_rules().split_at(CUSTOM_RULE_SLOT);
        structural.iter().chain(&self.custom).chain(generic)
    }

    /// Resets the scanner to the start of `input`.
    ///
    /// Registered rules are kept.
    pub fn read_string(&mut self, input: &str) {
        self.input = input.to_string();
        self.offset = 0;
        self.processed.clear();
        self.position = 0;
        self.last = Token::end(0);
        self.loaded = true;
    }

    /// Returns true once `read_string` has been called.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Advances by exactly one token and returns it.
    ///
    /// Whitespace is skipped. Once the input is exhausted every call returns
    /// the end-of-input token.
    pub fn advance(&mut self) -> &Token {
        loop {
            if self.offset == self.input.len() {
                self.last = Token::end(self.position);
                return &self.last;
            }

            let token = self.scan_one();
            trace!(token = %token, position = token.position, "scanned token");
            if token.kind != TokenKind::Whitespace {
                self.last = token;
                return &self.last;
            }
        }
    }

    /// Scans a single token, whitespace included, and consumes it.
    fn scan_one(&mut self) -> Token {
        let remaining = &self.input[self.offset..];
        let start = self.position;

        let matched = self.rules().find_map(|rule| {
            let (text, rest) = rule.apply(remaining)?;
            // AND must reach the parser as a WORD.
            if rule.kind().is_custom() && text == AND_KEYWORD {
                return None;
            }
            Some((rule.kind(), (text, rest)))
        });

        let (kind, text, rest_len) = match matched {
            Some((kind, (text, rest))) => (kind.clone(), text.to_string(), rest.len()),
            // The catch-all rule accepts any character, so this only guards
            // against a remainder no rule can consume.
            None => (TokenKind::Illegal, remaining.to_string(), 0),
        };

        self.offset = self.input.len() - rest_len;
        self.position += text.chars().count();
        self.processed.push_str(&text);
        Token::new(kind, text, start)
    }

    /// Scans all of `input`, returning every token before end of input.
    pub fn tokenize(&mut self, input: &str) -> Vec<Token> {
        self.read_string(input);
        let mut tokens = Vec::new();
        loop {
            let token = self.advance();
            if token.is_end() {
                break;
            }
            tokens.push(token.clone());
        }
        tokens
    }

    /// Returns the most recently emitted token.
    pub fn last_token(&self) -> &Token {
        &self.last
    }

    /// Returns the kind of the most recently emitted token.
    pub fn last_token_kind(&self) -> &TokenKind {
        &self.last.kind
    }

    /// Returns the text of the most recently emitted token.
    pub fn last_token_text(&self) -> Option<&str> {
        self.last.text.as_deref()
    }

    /// Returns the consumed prefix of the input.
    pub fn processed(&self) -> &str {
        &self.processed
    }

    /// Returns the unconsumed suffix of the input.
    pub fn remaining(&self) -> &str {
        &self.input[self.offset..]
    }

    /// Returns the number of characters consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the input most recently passed to `read_string`.
    pub fn input(&self) -> &str {
        &self.input
    }
}
