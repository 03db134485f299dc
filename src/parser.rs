use logos::Logos;

use crate::{
    ast::{Node, Nodes, Operator},
    lexer::{identifier_run, matching_paren, Token},
    vocabulary::match_function,
};

/// Argument of `^`, `_` or `√`: either a balanced parenthesised group or a
/// run of letters and digits directly after the marker. Returns the text to
/// parse and how many bytes of `rest` it spans.
fn script_argument(rest: &str) -> Option<(&str, usize)> {
    if rest.starts_with('(') {
        let end = matching_paren(rest)?;
        let inner = &rest[1..end];
        (!inner.trim().is_empty()).then_some((inner, end + 1))
    } else {
        let run = identifier_run(rest);
        (!run.is_empty()).then_some((run, run.len()))
    }
}

fn text(s: &str) -> impl Iterator<Item = Node> + '_ {
    s.chars().map(|c| Node::Text(c.to_string()))
}

fn parse_into(input: &str, nodes: &mut Nodes) {
    let mut lexer = Token::lexer(input);

    while let Some(token) = lexer.next() {
        let Ok(token) = token else {
            nodes.extend(text(lexer.slice()));
            continue;
        };

        match token {
            Token::Letter(c) => {
                let start = lexer.span().start;
                if let Some(name) = match_function(&input[start..]) {
                    lexer.bump(name.len() - 1);
                    nodes.push(Node::Function(name));
                } else {
                    nodes.push(Node::Variable(c));
                }
            }
            Token::Number => nodes.push(Node::Number(lexer.slice().into())),
            Token::Operator(op) => nodes.push(Node::Operator(op)),
            Token::Slash => {
                let denominator = identifier_run(&input[lexer.span().end..]);
                let numerator = match nodes.last() {
                    Some(Node::Number(_) | Node::Variable(_)) if !denominator.is_empty() => {
                        nodes.pop()
                    }
                    _ => None,
                };
                match numerator {
                    Some(numerator) => {
                        lexer.bump(denominator.len());
                        nodes.push(Node::Fraction {
                            numerator: vec![numerator],
                            denominator: parse(denominator),
                        });
                    }
                    None => nodes.push(Node::Operator(Operator::Divide)),
                }
            }
            Token::Caret => match script_argument(&input[lexer.span().end..]) {
                Some((exponent, len)) if !nodes.is_empty() => {
                    lexer.bump(len);
                    let base = nodes.pop().into_iter().collect();
                    nodes.push(Node::Power {
                        base,
                        exponent: parse(exponent),
                    });
                }
                _ => nodes.push(Node::Text("^".into())),
            },
            Token::Underscore => {
                let base = nodes.last().and_then(Node::literal);
                match (base, script_argument(&input[lexer.span().end..])) {
                    (Some(base), Some((subscript, len))) => {
                        lexer.bump(len);
                        nodes.pop();
                        nodes.push(Node::Subscript {
                            base,
                            subscript: parse(subscript),
                        });
                    }
                    _ => nodes.push(Node::Text("_".into())),
                }
            }
            Token::Radical => match script_argument(&input[lexer.span().end..]) {
                Some((radicand, len)) => {
                    lexer.bump(len);
                    nodes.push(Node::Root {
                        radicand: parse(radicand),
                    });
                }
                None => nodes.push(Node::Text("√".into())),
            },
            Token::LParen => {
                let start = lexer.span().start;
                match matching_paren(&input[start..]) {
                    Some(end) => {
                        lexer.bump(end);
                        nodes.push(Node::Parentheses(parse(&input[start + 1..start + end])));
                    }
                    None => nodes.push(Node::Text("(".into())),
                }
            }
            Token::RParen | Token::Other => nodes.extend(text(lexer.slice())),
            Token::Whitespace => {}
        }
    }
}

/// Transcribes one line of typed math into nodes, left to right. Never fails:
/// anything that is not part of the notation is kept as a text node.
pub fn parse(input: &str) -> Nodes {
    let mut nodes = vec![];
    parse_into(input, &mut nodes);
    nodes
}
