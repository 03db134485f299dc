use logos::Logos;

use crate::ast::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Logos)]
pub enum Token {
    /// Digits with at most one decimal point, which may lead.
    #[regex(r"[0-9]+(\.[0-9]*)?|\.[0-9]*")]
    Number,
    #[regex("[a-zA-Z]", |lex| lex.slice().chars().next())]
    Letter(char),
    #[token("+", |_| Operator::Plus)]
    #[token("-", |_| Operator::Minus)]
    #[token("*", |_| Operator::Times)]
    #[token("=", |_| Operator::Equal)]
    #[token("<", |_| Operator::Less)]
    #[token(">", |_| Operator::Greater)]
    #[token("<=", |_| Operator::LessEqual)]
    #[token(">=", |_| Operator::GreaterEqual)]
    #[token("!=", |_| Operator::NotEqual)]
    #[token("~=", |_| Operator::Approx)]
    Operator(Operator),
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token("_")]
    Underscore,
    #[token("√")]
    Radical,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[regex(r"[^0-9a-zA-Z.+\-*/=<>^_()√\s]")]
    Other,

    // Skipped between tokens
    #[regex(r"\s+", logos::skip)]
    Whitespace,
}

/// Byte offset of the `)` matching the `(` that `source` starts with.
pub fn matching_paren(source: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in source.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// The leading run of letters and digits in `source`.
pub fn identifier_run(source: &str) -> &str {
    let end = source
        .find(|c: char| !crate::vocabulary::is_identifier_char(c))
        .unwrap_or(source.len());
    &source[..end]
}
