use std::fmt;

use crate::ast::Node;

pub type Row = Vec<Fragment>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Upright,
    Italic,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Glyph {
        text: String,
        style: Style,
    },
    Operator(char),
    /// `arguments` is `None` when no parenthesised group follows the name,
    /// in which case only the opening parenthesis is drawn.
    Function {
        name: &'static str,
        arguments: Option<Row>,
    },
    Fraction {
        numerator: Row,
        denominator: Row,
    },
    Power {
        base: Row,
        exponent: Row,
    },
    Subscript {
        base: Row,
        subscript: Row,
    },
    Radical {
        radicand: Row,
    },
    Group(Row),
}

impl Fragment {
    fn glyph(text: impl Into<String>, style: Style) -> Self {
        Fragment::Glyph {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderTree {
    pub fragments: Row,
}

fn render_row(nodes: &[Node]) -> Row {
    let mut row = vec![];
    let mut nodes = nodes.iter().peekable();

    while let Some(node) = nodes.next() {
        let fragment = match node {
            Node::Number(number) => Fragment::glyph(number, Style::Upright),
            Node::Variable(c) => Fragment::glyph(*c, Style::Italic),
            Node::Text(text) => Fragment::glyph(text, Style::Upright),
            Node::Operator(op) => Fragment::Operator(op.glyph()),
            Node::Function(name) => {
                let arguments = match nodes.peek() {
                    Some(Node::Parentheses(inner)) => {
                        nodes.next();
                        Some(render_row(inner))
                    }
                    _ => None,
                };
                match (*name, arguments) {
                    ("sqrt", Some(radicand)) => Fragment::Radical { radicand },
                    (name, arguments) => Fragment::Function { name, arguments },
                }
            }
            Node::Fraction {
                numerator,
                denominator,
            } => Fragment::Fraction {
                numerator: render_row(numerator),
                denominator: render_row(denominator),
            },
            Node::Power { base, exponent } => Fragment::Power {
                base: render_row(base),
                exponent: render_row(exponent),
            },
            Node::Root { radicand } => Fragment::Radical {
                radicand: render_row(radicand),
            },
            Node::Parentheses(inner) => Fragment::Group(render_row(inner)),
            Node::Subscript { base, subscript } => {
                let style = if base.chars().all(|c| c.is_ascii_alphabetic()) {
                    Style::Italic
                } else {
                    Style::Upright
                };
                Fragment::Subscript {
                    base: vec![Fragment::glyph(base, style)],
                    subscript: render_row(subscript),
                }
            }
        };
        row.push(fragment);
    }

    row
}

/// Maps parsed nodes to a nested two-dimensional notation tree. A function
/// name directly followed by a parenthesised group owns that group as its
/// argument list, and `sqrt(...)` becomes a radical.
pub fn render(nodes: &[Node]) -> RenderTree {
    RenderTree {
        fragments: render_row(nodes),
    }
}

pub struct RowDisplayer<'a>(pub &'a [Fragment]);

impl fmt::Display for RowDisplayer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fragment) in self.0.iter().enumerate() {
            match fragment {
                Fragment::Operator(c)
                    if i > 0 && !matches!(self.0[i - 1], Fragment::Operator(_)) =>
                {
                    write!(f, " {c} ")?
                }
                _ => write!(f, "{fragment}")?,
            }
        }
        Ok(())
    }
}

/// Writes a script or fraction operand, parenthesised unless it is a single
/// fragment.
struct Operand<'a>(&'a [Fragment]);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [Fragment::Glyph { .. } | Fragment::Group(_)] => write!(f, "{}", RowDisplayer(self.0)),
            _ => write!(f, "({})", RowDisplayer(self.0)),
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Glyph { text, .. } => write!(f, "{text}"),
            Fragment::Operator(c) => write!(f, "{c}"),
            Fragment::Function {
                name,
                arguments: Some(arguments),
            } => write!(f, "{name}({})", RowDisplayer(arguments)),
            Fragment::Function {
                name,
                arguments: None,
            } => write!(f, "{name}("),
            Fragment::Fraction {
                numerator,
                denominator,
            } => write!(f, "{}/{}", Operand(numerator), Operand(denominator)),
            Fragment::Power { base, exponent } => {
                write!(f, "{}^{}", Operand(base), Operand(exponent))
            }
            Fragment::Subscript { base, subscript } => {
                write!(f, "{}_{}", Operand(base), Operand(subscript))
            }
            Fragment::Radical { radicand } => write!(f, "√{}", Operand(radicand)),
            Fragment::Group(inner) => write!(f, "({})", RowDisplayer(inner)),
        }
    }
}

impl fmt::Display for RenderTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", RowDisplayer(&self.fragments))
    }
}
