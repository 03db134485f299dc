use strum::{Display, EnumIter};

pub type Nodes = Vec<Node>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Operator {
    #[strum(to_string = "+")]
    Plus,
    #[strum(to_string = "-")]
    Minus,
    #[strum(to_string = "*")]
    Times,
    #[strum(to_string = "/")]
    Divide,
    #[strum(to_string = "=")]
    Equal,
    #[strum(to_string = "<")]
    Less,
    #[strum(to_string = ">")]
    Greater,
    #[strum(to_string = "<=")]
    LessEqual,
    #[strum(to_string = ">=")]
    GreaterEqual,
    #[strum(to_string = "!=")]
    NotEqual,
    #[strum(to_string = "~=")]
    Approx,
}

impl Operator {
    /// Glyph used when the operator is displayed rather than typed.
    pub const fn glyph(self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '−',
            Operator::Times => '×',
            Operator::Divide => '÷',
            Operator::Equal => '=',
            Operator::Less => '<',
            Operator::Greater => '>',
            Operator::LessEqual => '≤',
            Operator::GreaterEqual => '≥',
            Operator::NotEqual => '≠',
            Operator::Approx => '≈',
        }
    }

    pub const fn is_relation(self) -> bool {
        !matches!(
            self,
            Operator::Plus | Operator::Minus | Operator::Times | Operator::Divide
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(String),
    Variable(char),
    Text(String),
    Operator(Operator),
    Function(&'static str),
    Fraction { numerator: Nodes, denominator: Nodes },
    Power { base: Nodes, exponent: Nodes },
    Root { radicand: Nodes },
    Parentheses(Nodes),
    Subscript { base: String, subscript: Nodes },
}

impl Node {
    /// The literal text of a leaf that can carry a script or a fraction bar.
    pub fn literal(&self) -> Option<String> {
        match self {
            Node::Number(number) => Some(number.clone()),
            Node::Variable(c) => Some(c.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ExpressionKind {
    Equation,
    Expression,
    Text,
}

impl ExpressionKind {
    pub fn infer(parts: &[Node]) -> Self {
        if parts
            .iter()
            .any(|node| matches!(node, Node::Operator(op) if op.is_relation()))
        {
            ExpressionKind::Equation
        } else if !parts.is_empty() && parts.iter().all(|node| matches!(node, Node::Text(_))) {
            ExpressionKind::Text
        } else {
            ExpressionKind::Expression
        }
    }
}

/// One line of typed input.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub parts: Nodes,
}

impl Expression {
    pub fn from_parts(parts: Nodes) -> Self {
        Self {
            kind: ExpressionKind::infer(&parts),
            parts,
        }
    }

    pub fn parse(input: &str) -> Self {
        Self::from_parts(crate::parser::parse(input))
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl Default for Expression {
    fn default() -> Self {
        Self::from_parts(vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn operator_glyphs() {
        assert_eq!(
            Operator::iter().map(Operator::glyph).collect::<String>(),
            "+−×÷=<>≤≥≠≈"
        );
        assert_eq!(
            Operator::iter()
                .map(|op| op.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            "+ - * / = < > <= >= != ~="
        );
    }

    #[test]
    fn kind_inference() {
        assert_eq!(
            ExpressionKind::infer(&[Node::Variable('x'), Node::Operator(Operator::Equal)]),
            ExpressionKind::Equation
        );
        assert_eq!(
            ExpressionKind::infer(&[Node::Parentheses(vec![
                Node::Variable('x'),
                Node::Operator(Operator::Less),
            ])]),
            ExpressionKind::Expression
        );
        assert_eq!(
            ExpressionKind::infer(&[Node::Text("α".into()), Node::Text("!".into())]),
            ExpressionKind::Text
        );
        assert_eq!(ExpressionKind::infer(&[]), ExpressionKind::Expression);
        assert_eq!(ExpressionKind::Equation.to_string(), "equation");
    }

    #[test]
    fn default_is_empty_input() {
        assert_eq!(Expression::default(), Expression::parse(""));
        assert_eq!(Expression::default().kind, ExpressionKind::Expression);
    }

    #[test]
    fn literal() {
        assert_eq!(Node::Number("2.5".into()).literal(), Some("2.5".into()));
        assert_eq!(Node::Variable('n').literal(), Some("n".into()));
        assert_eq!(Node::Function("sin").literal(), None);
    }
}
