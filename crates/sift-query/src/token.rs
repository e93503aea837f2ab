//! Tokens produced by the scanner.

use std::fmt;

/// The reserved word joining two operands. It scans as a plain `WORD`.
pub const AND_KEYWORD: &str = "AND";

/// The classification of a scanned token.
///
/// The built-in kinds cover the query language itself. `Custom` carries the
/// label of a caller-registered lexical rule, so the set of kinds is open.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Emitted repeatedly once the input is exhausted.
    End,
    /// A bare search word.
    Word,
    /// Left parenthesis.
    LParen,
    /// Right parenthesis.
    RParen,
    /// Negation prefix (`-`).
    Minus,
    /// A stray colon.
    Colon,
    /// The `OR` keyword.
    Or,
    /// A run of whitespace. Never surfaced by the scanner.
    Whitespace,
    /// A quoted phrase, quotes included.
    Text,
    /// A character no rule accepts.
    Illegal,
    /// A quote with no closing partner.
    Quote,
    /// A token matched by a caller-registered rule, identified by its label.
    Custom(String),
}

impl TokenKind {
    /// Returns true for kinds produced by caller-registered rules.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Returns the display name of this kind (`WORD`, `LPAREN`, or the custom label).
    pub fn name(&self) -> &str {
        match self {
            Self::End => "END",
            Self::Word => "WORD",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Minus => "MINUS",
            Self::Colon => "COLON",
            Self::Or => "OR",
            Self::Whitespace => "WHITESPACE",
            Self::Text => "TEXT",
            Self::Illegal => "ILLEGAL",
            Self::Quote => "QUOTE",
            Self::Custom(label) => label,
        }
    }

    /// Looks up a built-in kind by its display name.
    ///
    /// Returns `None` for names that are not built in; such names are free to
    /// be used as custom labels.
    pub fn builtin(name: &str) -> Option<Self> {
        let kind = match name {
            "END" => Self::End,
            "WORD" => Self::Word,
            "LPAREN" => Self::LParen,
            "RPAREN" => Self::RParen,
            "MINUS" => Self::Minus,
            "COLON" => Self::Colon,
            "OR" => Self::Or,
            "WHITESPACE" => Self::Whitespace,
            "TEXT" => Self::Text,
            "ILLEGAL" => Self::Illegal,
            "QUOTE" => Self::Quote,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified, position-tracked fragment of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The matched text. `None` only for [`TokenKind::End`].
    pub text: Option<String>,
    /// Character offset in the original input where the token starts.
    pub position: usize,
}

impl Token {
    /// Creates a token with matched text.
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            position,
        }
    }

    /// Creates an end-of-input token.
    pub fn end(position: usize) -> Self {
        Self {
            kind: TokenKind::End,
            text: None,
            position,
        }
    }

    /// Returns true if this is the end-of-input token.
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }

    /// Returns true if this is a `WORD` token spelling exactly `keyword`.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.text.as_deref() == Some(keyword)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{} {:?}", self.kind, text),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_round_trip() {
        for kind in [
            TokenKind::End,
            TokenKind::Word,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Minus,
            TokenKind::Colon,
            TokenKind::Or,
            TokenKind::Whitespace,
            TokenKind::Text,
            TokenKind::Illegal,
            TokenKind::Quote,
        ] {
            assert_eq!(TokenKind::builtin(kind.name()), Some(kind.clone()));
        }
        assert_eq!(TokenKind::builtin("TRIP"), None);
    }

    #[test]
    fn custom_kind_displays_label() {
        let kind = TokenKind::Custom("TRIP".into());
        assert!(kind.is_custom());
        assert_eq!(kind.to_string(), "TRIP");
    }

    #[test]
    fn keyword_check_is_case_sensitive() {
        let token = Token::new(TokenKind::Word, "AND", 0);
        assert!(token.is_keyword("AND"));
        assert!(!Token::new(TokenKind::Word, "and", 0).is_keyword("AND"));
        assert!(!Token::end(3).is_keyword("AND"));
    }

    #[test]
    fn token_display() {
        assert_eq!(Token::new(TokenKind::Word, "rust", 0).to_string(), "WORD \"rust\"");
        assert_eq!(Token::end(4).to_string(), "END");
    }
}
