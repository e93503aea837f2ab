//! Query expression tree.
//!
//! The parser's output. Nodes own their children exclusively and are never
//! mutated after parsing; consumers read the structure through
//! [`Node::accept`] and a [`Visitor`].

use std::fmt;

use crate::visitor::{Printer, Visitor};

/// A parsed query expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A bare search word.
    Term(String),

    /// Quoted text, quotes stripped.
    Phrase(String),

    /// A token matched by a caller-registered rule.
    FieldFilter {
        /// Label of the rule that matched.
        label: String,
        /// The matched text, for the caller to interpret.
        raw: String,
    },

    /// Negation of a single atom.
    Not(Box<Self>),

    /// Conjunction. Runs of `AND` lean left.
    And(Box<Self>, Box<Self>),

    /// Disjunction. Runs of `OR` lean left.
    Or(Box<Self>, Box<Self>),

    /// A parenthesized sub-expression.
    Group(Box<Self>),
}

impl Node {
    /// Creates a term node.
    pub fn term(word: impl Into<String>) -> Self {
        Self::Term(word.into())
    }

    /// Creates a phrase node from unquoted text.
    pub fn phrase(text: impl Into<String>) -> Self {
        Self::Phrase(text.into())
    }

    /// Creates a field filter node.
    pub fn field(label: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::FieldFilter {
            label: label.into(),
            raw: raw.into(),
        }
    }

    /// Creates a negation node.
    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Self) -> Self {
        Self::Not(Box::new(operand))
    }

    /// Creates a conjunction node.
    pub fn and(left: Self, right: Self) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    /// Creates a disjunction node.
    pub fn or(left: Self, right: Self) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    /// Creates a group node.
    pub fn group(inner: Self) -> Self {
        Self::Group(Box::new(inner))
    }

    /// Dispatches to the visitor method for this node's variant.
    ///
    /// Composite nodes hand their children to the visitor without visiting
    /// them; the visitor decides whether and when to recurse.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Term(word) => visitor.visit_term(word),
            Self::Phrase(text) => visitor.visit_phrase(text),
            Self::FieldFilter { label, raw } => visitor.visit_field_filter(label, raw),
            Self::Not(operand) => visitor.visit_not(operand),
            Self::And(left, right) => visitor.visit_and(left, right),
            Self::Or(left, right) => visitor.visit_or(left, right),
            Self::Group(inner) => visitor.visit_group(inner),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.accept(&mut Printer::new(f))
    }
}
