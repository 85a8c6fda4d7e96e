//! A lexical token from a source file

use crate::escape::escape_markup;
use crate::keyword::Keyword;
use crate::spanned::{Span, Spanned};
use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};

/// The kind of a token.
///
/// Never stored on a [Token], always recomputed from its lexeme with [classify].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword(Keyword),
    Symbol,
    Identifier,
    IntegerConstant,
    StringConstant,
}

impl TokenKind {
    /// The tag name used for leaf markers of this kind
    pub fn tag(&self) -> &'static str {
        match self {
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerConstant => "integerConstant",
            TokenKind::StringConstant => "stringConstant",
        }
    }
}

/// Classifies a lexeme.
///
/// Total over all strings. Checked in priority order: keyword, integer constant,
/// string constant, identifier, and symbol as the fallback.
pub fn classify(lexeme: &str) -> TokenKind {
    if let Some(keyword) = Keyword::lookup(lexeme) {
        TokenKind::Keyword(keyword)
    } else if is_integer_constant(lexeme) {
        TokenKind::IntegerConstant
    } else if is_string_constant(lexeme) {
        TokenKind::StringConstant
    } else if is_identifier(lexeme) {
        TokenKind::Identifier
    } else {
        TokenKind::Symbol
    }
}

fn is_integer_constant(lexeme: &str) -> bool {
    !lexeme.is_empty() && lexeme.bytes().all(|b| b.is_ascii_digit())
}

fn is_string_constant(lexeme: &str) -> bool {
    lexeme.len() >= 2
        && lexeme.starts_with('"')
        && lexeme.ends_with('"')
        && !lexeme[1..lexeme.len() - 1].contains('"')
}

/// Checks if a character can be part of a word (an identifier, keyword or integer)
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_identifier(lexeme: &str) -> bool {
    match lexeme.chars().next() {
        Some(first) if !first.is_ascii_digit() => lexeme.chars().all(is_word_char),
        _ => false,
    }
}

/// A lexical token from a source file
#[derive(Clone)]
pub struct Token {
    span: Span,
    lexeme: String,
}

impl Token {
    /// Creates a new token
    pub fn new(span: Span, lexeme: impl Into<String>) -> Self {
        Self {
            span,
            lexeme: lexeme.into(),
        }
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> TokenKind {
        classify(&self.lexeme)
    }

    /// The exact text this token was scanned from, quotes included
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// The semantic value of this token. String constants lose their delimiting quotes.
    pub fn value(&self) -> &str {
        match self.kind() {
            TokenKind::StringConstant => &self.lexeme[1..self.lexeme.len() - 1],
            _ => &self.lexeme,
        }
    }

    /// The value as it appears in serialized markup.
    ///
    /// Symbols are escaped, string constants are written without quotes and unescaped.
    pub fn rendered(&self) -> Cow<'_, str> {
        match self.kind() {
            TokenKind::Symbol => escape_markup(&self.lexeme),
            _ => Cow::Borrowed(self.value()),
        }
    }

    /// Checks if this token's lexeme is exactly `literal`
    #[inline]
    pub fn is(&self, literal: &str) -> bool {
        self.lexeme == literal
    }

    /// Gets the keyword of this token, if it is one
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind() {
            TokenKind::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    /// This token as a self-contained leaf marker, `<kind> value </kind>`
    pub fn to_markup(&self) -> String {
        let tag = self.kind().tag();
        format!("<{tag}> {} </{tag}>", self.rendered())
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:?})@{}", self.kind(), self.lexeme, self.span)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.lexeme == other.lexeme
    }
}

impl Eq for Token {}
