//! Output formatting helpers for CLI commands.

use sift_query::{Node, Outline, Shape, Token};

use super::args::RenderArgs;

/// Renders a parsed tree in the mode selected on the command line.
///
/// The result always ends with a newline.
pub fn render_tree(tree: &Node, render: &RenderArgs) -> String {
    if render.tree {
        Outline::render(tree)
    } else if render.shape {
        format!("{}\n", Shape::render(tree))
    } else {
        format!("{tree}\n")
    }
}

/// Formats one token as `position kind text`.
pub fn token_line(token: &Token) -> String {
    match &token.text {
        Some(text) => format!("{:>4}  {:<10} {text:?}", token.position, token.kind.name()),
        None => format!("{:>4}  {}", token.position, token.kind.name()),
    }
}

#[cfg(test)]
mod tests {
    use sift_query::TokenKind;

    use super::*;

    fn sample() -> Node {
        Node::and(Node::term("a"), Node::group(Node::term("b")))
    }

    #[test]
    fn default_render_is_query_text() {
        assert_eq!(render_tree(&sample(), &RenderArgs::default()), "a AND (b)\n");
    }

    #[test]
    fn shape_render() {
        let render = RenderArgs {
            tree: false,
            shape: true,
        };
        assert_eq!(render_tree(&sample(), &render), "And(Term(a), Group(Term(b)))\n");
    }

    #[test]
    fn tree_render() {
        let render = RenderArgs {
            tree: true,
            shape: false,
        };
        assert_eq!(
            render_tree(&sample(), &render),
            "And\n  Term(\"a\")\n  Group\n    Term(\"b\")\n"
        );
    }

    #[test]
    fn token_lines() {
        assert_eq!(
            token_line(&Token::new(TokenKind::Word, "rust", 3)),
            "   3  WORD       \"rust\""
        );
        assert_eq!(token_line(&Token::end(7)), "   7  END");
    }
}
