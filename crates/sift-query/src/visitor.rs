//! Visitor protocol and reference visitors.
//!
//! A [`Visitor`] has one method per node variant. [`Node::accept`] calls the
//! method matching the node and hands over its children; whether to descend
//! is up to the visitor.

use std::fmt::{self, Write};

use crate::ast::Node;

/// Traversal logic over a query expression tree.
pub trait Visitor {
    /// Value produced for each visited node.
    type Output;

    /// Visits a bare word.
    fn visit_term(&mut self, word: &str) -> Self::Output;

    /// Visits quoted text (quotes already stripped).
    fn visit_phrase(&mut self, text: &str) -> Self::Output;

    /// Visits a field filter produced by a caller-registered rule.
    fn visit_field_filter(&mut self, label: &str, raw: &str) -> Self::Output;

    /// Visits a negation.
    fn visit_not(&mut self, operand: &Node) -> Self::Output;

    /// Visits a conjunction.
    fn visit_and(&mut self, left: &Node, right: &Node) -> Self::Output;

    /// Visits a disjunction.
    fn visit_or(&mut self, left: &Node, right: &Node) -> Self::Output;

    /// Visits a parenthesized group.
    fn visit_group(&mut self, inner: &Node) -> Self::Output;
}

/// Renders a tree back to query text.
///
/// Operators are written as `AND`, `OR` and `-`, groups keep their
/// parentheses, phrases are re-quoted and field filters are written as
/// matched. The output parses back to an equal tree.
pub struct Printer<W> {
    /// Output sink.
    out: W,
}

impl<W: Write> Printer<W> {
    /// Creates a printer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the output sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes `left`, the operator keyword, then `right`.
    fn binary(&mut self, left: &Node, keyword: &str, right: &Node) -> fmt::Result {
        left.accept(self)?;
        write!(self.out, " {keyword} ")?;
        right.accept(self)
    }
}

impl<W: Write> Visitor for Printer<W> {
    type Output = fmt::Result;

    fn visit_term(&mut self, word: &str) -> fmt::Result {
        self.out.write_str(word)
    }

    fn visit_phrase(&mut self, text: &str) -> fmt::Result {
        write!(self.out, "\"{text}\"")
    }

    fn visit_field_filter(&mut self, _label: &str, raw: &str) -> fmt::Result {
        self.out.write_str(raw)
    }

    fn visit_not(&mut self, operand: &Node) -> fmt::Result {
        self.out.write_char('-')?;
        operand.accept(self)
    }

    fn visit_and(&mut self, left: &Node, right: &Node) -> fmt::Result {
        self.binary(left, "AND", right)
    }

    fn visit_or(&mut self, left: &Node, right: &Node) -> fmt::Result {
        self.binary(left, "OR", right)
    }

    fn visit_group(&mut self, inner: &Node) -> fmt::Result {
        self.out.write_char('(')?;
        inner.accept(self)?;
        self.out.write_char(')')
    }
}

/// Renders a tree as an indented outline, one node per line.
#[derive(Debug, Default)]
pub struct Outline {
    /// Rendered lines so far.
    out: String,
    /// Current nesting depth.
    depth: usize,
}

impl Outline {
    /// Renders `node` as an outline.
    pub fn render(node: &Node) -> String {
        let mut outline = Self::default();
        node.accept(&mut outline);
        outline.out
    }

    /// Writes one line at the current depth.
    fn line(&mut self, text: &str) {
        self.out.push_str(&"  ".repeat(self.depth));
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Writes a line, then visits `children` one level deeper.
    fn nested(&mut self, text: &str, children: &[&Node]) {
        self.line(text);
        self.depth += 1;
        for child in children {
            child.accept(self);
        }
        self.depth -= 1;
    }
}

impl Visitor for Outline {
    type Output = ();

    fn visit_term(&mut self, word: &str) {
        self.line(&format!("Term({word:?})"));
    }

    fn visit_phrase(&mut self, text: &str) {
        self.line(&format!("Phrase({text:?})"));
    }

    fn visit_field_filter(&mut self, label: &str, raw: &str) {
        self.line(&format!("FieldFilter({label}, {raw:?})"));
    }

    fn visit_not(&mut self, operand: &Node) {
        self.nested("Not", &[operand]);
    }

    fn visit_and(&mut self, left: &Node, right: &Node) {
        self.nested("And", &[left, right]);
    }

    fn visit_or(&mut self, left: &Node, right: &Node) {
        self.nested("Or", &[left, right]);
    }

    fn visit_group(&mut self, inner: &Node) {
        self.nested("Group", &[inner]);
    }
}

/// Renders a tree in compact constructor notation, e.g.
/// `And(Term(Lukas), Not(Term(term)))`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Shape;

impl Shape {
    /// Renders `node` in constructor notation.
    pub fn render(node: &Node) -> String {
        node.accept(&mut Self)
    }
}

impl Visitor for Shape {
    type Output = String;

    fn visit_term(&mut self, word: &str) -> String {
        format!("Term({word})")
    }

    fn visit_phrase(&mut self, text: &str) -> String {
        format!("Phrase({text})")
    }

    fn visit_field_filter(&mut self, label: &str, raw: &str) -> String {
        format!("FieldFilter({label}, {raw:?})")
    }

    fn visit_not(&mut self, operand: &Node) -> String {
        format!("Not({})", operand.accept(self))
    }

    fn visit_and(&mut self, left: &Node, right: &Node) -> String {
        format!("And({}, {})", left.accept(self), right.accept(self))
    }

    fn visit_or(&mut self, left: &Node, right: &Node) -> String {
        format!("Or({}, {})", left.accept(self), right.accept(self))
    }

    fn visit_group(&mut self, inner: &Node) -> String {
        format!("Group({})", inner.accept(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::or(
            Node::and(Node::term("Lukas"), Node::group(Node::phrase("road trip"))),
            Node::not(Node::field("TRIP", "trip:123")),
        )
    }

    #[test]
    fn printer_writes_to_sink() {
        let mut printer = Printer::new(String::new());
        sample().accept(&mut printer).unwrap();
        assert_eq!(
            printer.into_inner(),
            "Lukas AND (\"road trip\") OR -trip:123"
        );
    }

    #[test]
    fn outline_indents_children() {
        assert_eq!(
            Outline::render(&sample()),
            "Or\n  And\n    Term(\"Lukas\")\n    Group\n      Phrase(\"road trip\")\n  Not\n    FieldFilter(TRIP, \"trip:123\")\n"
        );
    }

    #[test]
    fn shape_uses_constructor_notation() {
        assert_eq!(
            Shape::render(&sample()),
            "Or(And(Term(Lukas), Group(Phrase(road trip))), Not(FieldFilter(TRIP, \"trip:123\")))"
        );
    }
}
