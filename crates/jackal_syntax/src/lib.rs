#![doc = include_str!("../README.md")]

use crate::lexer::{Lexer, LexerOptions};
use crate::parser::{Parser, SyntaxResult};
use crate::source::clean_source;
use crate::syntax_tree::Node;
use jackal_tokens::TokenStream;
use std::path::Path;
use tracing::debug;

pub mod lexer;
pub mod markup;
pub mod parser;
pub mod source;
pub mod syntax_tree;

pub use lexer::tokenize;

/// Cleans and tokenizes raw source text
pub fn lex_source(text: &str, options: LexerOptions) -> SyntaxResult<TokenStream> {
    let lines = clean_source(text);
    debug!("lexing {} non-blank lines", lines.len());
    Ok(Lexer::from_source(lines).with_options(options).tokenize()?)
}

/// Parses a token stream as a single class
pub fn parse_tokens(tokens: TokenStream) -> SyntaxResult<Node> {
    Parser::new(tokens).parse()
}

/// Parses raw source text, comments included, as a single class
pub fn parse_source(text: &str, options: LexerOptions) -> SyntaxResult<Node> {
    parse_tokens(lex_source(text, options)?)
}

/// Reads and parses a source file
pub fn parse_file(path: &Path, options: LexerOptions) -> SyntaxResult<Node> {
    let text = std::fs::read_to_string(path)?;
    parse_source(&text, options)
}
