//! Lexical rules.
//!
//! A rule pairs a [`TokenKind`] with a regular expression carrying exactly two
//! capture groups: group 1 is the token text, group 2 is the input left over
//! after it. Rules are tried in priority order and the first match wins.
//!
//! Caller-registered rules sit between the structural built-ins (whitespace,
//! quoted text, `OR`) and the generic ones (bare word, punctuation, unmatched
//! quote, catch-all). Placing them after the catch-all would make them
//! unreachable, since it accepts any single character.

use std::sync::LazyLock;

use regex::Regex;

use crate::{error::PatternError, token::TokenKind};

/// Index in the built-in list where caller-registered rules are spliced in.
///
/// Whitespace, quoted text and the `OR` keyword always win over caller rules;
/// bare words, punctuation and the catch-all only apply when no caller rule
/// matches.
pub const CUSTOM_RULE_SLOT: usize = 3;

/// Number of capture groups a rule pattern must declare.
const RULE_GROUPS: usize = 2;

/// Characters that may continue a bare word after its first character.
const WORD_CONTINUE: &str = r"\p{L}\p{N}_\-./%";

/// Characters that may start a bare word. A leading `-` is negation.
const WORD_START: &str = r"\p{L}\p{N}_./%";

/// Built-in rules in priority order, highest first.
static BUILTIN_RULES: LazyLock<Vec<LexicalRule>> = LazyLock::new(|| {
    let token = |kind: TokenKind, pattern: &str| {
        LexicalRule::token(kind, pattern).expect("built-in lexical rules are valid")
    };
    // OR looks at the character after it, so it needs the full two-group form.
    let or = LexicalRule::new(
        TokenKind::Or,
        &format!(r"(?s)^(OR)((?:[^{WORD_CONTINUE}].*)?)$"),
    )
    .expect("built-in lexical rules are valid");

    vec![
        token(TokenKind::Whitespace, r"\s+"),
        token(TokenKind::Text, r#""[^"]*""#),
        or,
        token(TokenKind::Word, &format!("[{WORD_START}][{WORD_CONTINUE}]*")),
        token(TokenKind::LParen, r"\("),
        token(TokenKind::RParen, r"\)"),
        token(TokenKind::Minus, "-"),
        token(TokenKind::Colon, ":"),
        token(TokenKind::Quote, "\""),
        token(TokenKind::Illegal, "."),
    ]
});

/// Returns the built-in rules in priority order.
///
/// Compiled once per process and shared by every scanner.
pub fn builtin_rules() -> &'static [LexicalRule] {
    &BUILTIN_RULES
}

/// A token kind paired with the pattern that recognizes it.
#[derive(Debug, Clone)]
pub struct LexicalRule {
    /// Kind assigned to tokens this rule matches.
    kind: TokenKind,
    /// Two-group pattern: token text, then remainder.
    pattern: Regex,
    /// Anchored token-only form, set for rules built from a bare token. It
    /// stops at the end of the token instead of running over the remainder.
    token: Option<Regex>,
}

impl LexicalRule {
    /// Compiles a rule from a two-group pattern.
    ///
    /// Fails if the pattern does not compile or does not declare exactly two
    /// capture groups.
    pub fn new(kind: TokenKind, pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern).map_err(|source| PatternError::InvalidRegex {
            label: kind.to_string(),
            source,
        })?;

        // captures_len includes the implicit whole-match group
        let groups = regex.captures_len() - 1;
        if groups != RULE_GROUPS {
            return Err(PatternError::CaptureGroups {
                label: kind.to_string(),
                found: groups,
            });
        }

        Ok(Self {
            kind,
            pattern: regex,
            token: None,
        })
    }

    /// Compiles a rule from a bare token pattern such as `trip:[0-9]+`.
    ///
    /// The pattern is wrapped into the two-group shape, so it must not declare
    /// capture groups of its own; use `(?:...)` for grouping.
    pub fn token(kind: TokenKind, token_pattern: &str) -> Result<Self, PatternError> {
        let mut rule = Self::new(kind, &format!("(?s)^({token_pattern})(.*)$"))?;
        let token = Regex::new(&format!("(?s)^(?:{token_pattern})")).map_err(|source| {
            PatternError::InvalidRegex {
                label: rule.kind.to_string(),
                source,
            }
        })?;
        rule.token = Some(token);
        Ok(rule)
    }

    /// Returns the kind this rule produces.
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Returns the source of the compiled pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Matches the rule against the start of `input`.
    ///
    /// Returns the token text and the remaining input, which runs from the
    /// start of group 2 to the end of `input`. Matches that do not
    /// start at offset zero or that consume nothing are rejected, so a rule can
    /// never stall the scanner.
    pub fn apply<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str)> {
        if let Some(token) = &self.token {
            let m = token.find(input)?;
            if m.start() != 0 || m.end() == 0 {
                return None;
            }
            return Some(input.split_at(m.end()));
        }

        let caps = self.pattern.captures(input)?;
        let whole = caps.get(0)?;
        if whole.start() != 0 {
            return None;
        }

        let text = caps.get(1)?;
        if text.start() != 0 || text.as_str().is_empty() {
            return None;
        }

        let rest_start = caps.get(2).map_or(text.end(), |rest| rest.start());
        Some((text.as_str(), &input[rest_start..]))
    }
}
