//! A consumable stream of tokens

use crate::token::Token;
use itertools::Itertools;
use std::fmt::{Debug, Formatter};

/// An ordered stream of tokens, consumed through a cursor.
///
/// The tokens themselves are never mutated or dropped while consuming, so the stream can be
/// rewound to any earlier [position](TokenStream::position).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current token, without consuming it
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    /// Moves past the current token, returning it
    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(token)
    }

    /// The tokens that have not been consumed yet, starting with the current one
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.cursor..]
    }

    /// Checks if every token has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Index of the current token
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor back to a previously observed position
    pub fn rewind(&mut self, position: usize) {
        self.cursor = position.min(self.tokens.len());
    }

    /// All tokens of this stream, consumed or not
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Total number of tokens in this stream
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<T: IntoIterator<Item = Token>>(iter: T) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
            cursor: 0,
        }
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

impl Debug for TokenStream {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TokenStream[{}] at {} ({})",
            self.tokens.len(),
            self.cursor,
            self.remaining().iter().map(|t| t.lexeme()).join(" ")
        )
    }
}
