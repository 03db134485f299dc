use std::fmt;

use crate::{
    ast::{Node, Operator},
    session::Step,
};

fn operator_latex(op: Operator) -> &'static str {
    match op {
        Operator::Plus => "+",
        Operator::Minus => "-",
        Operator::Times => r"\times",
        Operator::Divide => r"\div",
        Operator::Equal => "=",
        Operator::Less => "<",
        Operator::Greater => ">",
        Operator::LessEqual => r"\leq",
        Operator::GreaterEqual => r"\geq",
        Operator::NotEqual => r"\neq",
        Operator::Approx => r"\approx",
    }
}

/// LaTeX for a vocabulary name, where there is a standard one.
pub fn function_latex(name: &str) -> Option<&'static str> {
    Some(match name {
        "log" => r"\log",
        "ln" => r"\ln",
        "exp" => r"\exp",
        "sqrt" => r"\sqrt",
        "sin" => r"\sin",
        "cos" => r"\cos",
        "tan" => r"\tan",
        "sec" => r"\sec",
        "csc" => r"\csc",
        "cot" => r"\cot",
        "arcsin" => r"\arcsin",
        "arccos" => r"\arccos",
        "arctan" => r"\arctan",
        "arcsec" => r"\arcsec",
        "arccsc" => r"\arccsc",
        "arccot" => r"\arccot",
        "sinh" => r"\sinh",
        "cosh" => r"\cosh",
        "tanh" => r"\tanh",
        "sech" => r"\sech",
        "csch" => r"\csch",
        "coth" => r"\coth",
        "arsinh" => r"\arsinh",
        "arcosh" => r"\arcosh",
        "artanh" => r"\artanh",
        "std" => r"\sigma",
        "min" => r"\min",
        "max" => r"\max",
        "sum" => r"\sum",
        "prod" => r"\prod",
        "binom" => r"\binom",
        "poisson" => r"\text{Poisson}",
        "normal" => r"\mathcal{N}",
        "gamma" => r"\Gamma",
        "beta" => "B",
        "chi2" => r"\chi^2",
        "diff" => r"\frac{d}{dx}",
        "integral" => r"\int",
        "lim" => r"\lim",
        "limsup" => r"\limsup",
        "liminf" => r"\liminf",
        "det" => r"\det",
        "trace" => r"\text{tr}",
        "eigenval" => r"\lambda",
        "eigenvec" => r"\vec{v}",
        "transpose" => "^T",
        "inverse" => "^{-1}",
        "zeta" => r"\zeta",
        "bessel" => "J",
        "length" => r"|\cdot|",
        _ => return None,
    })
}

/// Whether `latex` ends in a control word, so that a letter written right
/// after it would be read as part of the command name.
fn ends_in_control_word(latex: &str) -> bool {
    let word = latex.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    word.len() < latex.len() && word.ends_with('\\')
}

/// Text inside math mode.
struct MathEscaped<'a>(&'a str);

impl fmt::Display for MathEscaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '{' | '}' | '%' | '#' | '&' | '$' | '_' => write!(f, r"\{c}")?,
                '\\' => f.write_str(r"\backslash{}")?,
                '^' => f.write_str(r"\hat{}")?,
                '~' => f.write_str(r"\sim{}")?,
                _ => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

/// Text inside `\text{...}`.
struct TextEscaped<'a>(&'a str);

impl fmt::Display for TextEscaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '{' | '}' | '%' | '#' | '&' | '$' | '_' => write!(f, r"\{c}")?,
                '\\' => f.write_str(r"\textbackslash{}")?,
                '^' => f.write_str(r"\textasciicircum{}")?,
                '~' => f.write_str(r"\textasciitilde{}")?,
                _ => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

/// A row of nodes as LaTeX. Nested rows are written without separators;
/// the outermost row of an expression separates its parts with spaces.
pub struct NodesDisplayer<'a> {
    nodes: &'a [Node],
    separator: &'static str,
}

impl<'a> NodesDisplayer<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        Self {
            nodes,
            separator: " ",
        }
    }

    fn nested(nodes: &'a [Node]) -> Self {
        Self {
            nodes,
            separator: "",
        }
    }
}

impl fmt::Display for NodesDisplayer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nodes = self.nodes.iter().peekable();
        let mut previous = String::new();

        while let Some(node) = nodes.next() {
            let latex = match (node, nodes.peek()) {
                (Node::Function("sqrt"), Some(Node::Parentheses(inner))) => {
                    let latex = format!(r"\sqrt{{{}}}", NodesDisplayer::nested(inner));
                    nodes.next();
                    latex
                }
                (Node::Function(name), Some(Node::Parentheses(inner))) => {
                    let latex = format!(
                        r"{}\left({}\right)",
                        FunctionName(name),
                        NodesDisplayer::nested(inner)
                    );
                    nodes.next();
                    latex
                }
                _ => NodeDisplayer(node).to_string(),
            };

            if !previous.is_empty() {
                let glued = self.separator.is_empty()
                    && ends_in_control_word(&previous)
                    && latex.starts_with(|c: char| c.is_ascii_alphabetic());
                f.write_str(if glued { " " } else { self.separator })?;
            }
            f.write_str(&latex)?;
            previous = latex;
        }
        Ok(())
    }
}

struct FunctionName<'a>(&'a str);

impl fmt::Display for FunctionName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match function_latex(self.0) {
            Some(latex) => f.write_str(latex),
            None => write!(f, r"\text{{{}}}", TextEscaped(self.0)),
        }
    }
}

struct NodeDisplayer<'a>(&'a Node);

impl fmt::Display for NodeDisplayer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Node::Number(number) => write!(f, "{number}"),
            Node::Variable(c) => write!(f, "{c}"),
            Node::Text(text) => write!(f, "{}", MathEscaped(text)),
            Node::Operator(op) => f.write_str(operator_latex(*op)),
            Node::Function(name) => write!(f, "{}", FunctionName(name)),
            Node::Fraction {
                numerator,
                denominator,
            } => write!(
                f,
                r"\frac{{{}}}{{{}}}",
                NodesDisplayer::nested(numerator),
                NodesDisplayer::nested(denominator)
            ),
            Node::Power { base, exponent } => write!(
                f,
                "{}^{{{}}}",
                NodesDisplayer::nested(base),
                NodesDisplayer::nested(exponent)
            ),
            Node::Root { radicand } => {
                write!(f, r"\sqrt{{{}}}", NodesDisplayer::nested(radicand))
            }
            Node::Parentheses(inner) => {
                write!(f, r"\left({}\right)", NodesDisplayer::nested(inner))
            }
            Node::Subscript { base, subscript } => {
                write!(f, "{base}_{{{}}}", NodesDisplayer::nested(subscript))
            }
        }
    }
}

pub fn to_latex(nodes: &[Node]) -> String {
    NodesDisplayer::new(nodes).to_string()
}

pub fn step_to_latex(step: &Step) -> String {
    let latex = to_latex(&step.content.parts);
    match &step.explanation {
        Some(explanation) => format!(r"{latex} \quad \text{{({})}}", TextEscaped(explanation)),
        None => latex,
    }
}

/// Numbers the steps from 1 and puts each on its own line.
pub fn steps_to_latex(steps: &[Step]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!(r"\text{{Step {}:}} \quad {}", i + 1, step_to_latex(step)))
        .collect::<Vec<_>>()
        .join(" \\\\\n")
}

/// A submitted list of steps in the form handed to downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MathWork {
    pub latex: String,
    pub step_count: usize,
    pub has_explanations: bool,
}

impl MathWork {
    pub fn from_steps(steps: &[Step]) -> Self {
        Self {
            latex: steps_to_latex(steps),
            step_count: steps.len(),
            has_explanations: steps.iter().any(|step| step.explanation.is_some()),
        }
    }
}
