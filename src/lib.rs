pub mod ast;
pub mod editor;
pub mod latex;
pub mod layout;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod session;
pub mod vocabulary;
