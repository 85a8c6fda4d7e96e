//! Responsible with converting cleaned source lines into a token stream

use crate::source::SourceLine;
use jackal_tokens::spanned::Span;
use jackal_tokens::token::is_word_char;
use jackal_tokens::{Token, TokenStream};
use std::collections::VecDeque;
use std::vec;
use thiserror::Error;
use tracing::{trace, warn};

/// Options controlling how permissive the lexer is
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LexerOptions {
    /// Reject string literals that are still open at the end of input. When unset, such a
    /// literal is dropped and scanning simply ends.
    pub strict_strings: bool,
}

/// A character of the joined input, along with where it came from
#[derive(Debug, Clone, Copy)]
struct Position {
    line: usize,
    column: usize,
}

/// Responsible with converting source lines into tokens.
///
/// Lines are joined with a single space, then scanned one character at a time with a single
/// buffer and an inside-string flag. Tokens are produced lazily through [Iterator].
///
/// # Examples
/// ```
/// # use jackal_syntax::lexer::Lexer;
/// let tokens = Lexer::new(["let x = 1;"]).collect::<Result<Vec<_>, _>>().unwrap();
/// assert_eq!(tokens.len(), 5);
/// ```
#[derive(Debug)]
pub struct Lexer {
    chars: vec::IntoIter<(char, Position)>,
    options: LexerOptions,
    buffer: String,
    start: Option<Position>,
    inside_string: bool,
    pending: VecDeque<Token>,
    finished: bool,
}

impl Lexer {
    /// Creates a lexer over plain lines, numbering them from 1
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = lines
            .into_iter()
            .enumerate()
            .map(|(idx, line)| SourceLine::new(idx + 1, 0, line.as_ref()));
        Self::from_source(lines)
    }

    /// Creates a lexer over cleaned source lines, keeping their original positions
    pub fn from_source<I: IntoIterator<Item = SourceLine>>(lines: I) -> Self {
        let mut chars = vec![];
        for line in lines {
            let mut column = line.indent + 1;
            for c in line.text.chars() {
                chars.push((c, Position { line: line.number, column }));
                column += 1;
            }
            // the separator between joined lines
            chars.push((' ', Position { line: line.number, column }));
        }
        Self {
            chars: chars.into_iter(),
            options: LexerOptions::default(),
            buffer: String::new(),
            start: None,
            inside_string: false,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Sets the options of this lexer
    pub fn with_options(mut self, options: LexerOptions) -> Self {
        self.options = options;
        self
    }

    /// Consumes this lexer, collecting every token into a [TokenStream]
    pub fn tokenize(self) -> LexResult<TokenStream> {
        self.collect()
    }

    fn buffered_span(&self) -> Span {
        let len = self.buffer.chars().count();
        match self.start {
            Some(start) => Span::new(start.line, start.column, len),
            None => Span::new(0, 0, len),
        }
    }

    fn flush_word(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let span = self.buffered_span();
        let token = Token::new(span, std::mem::take(&mut self.buffer));
        trace!("scanned {token:?}");
        self.pending.push_back(token);
        self.start = None;
    }

    fn scan(&mut self, c: char, position: Position) {
        if self.inside_string {
            self.buffer.push(c);
            if c == '"' {
                self.inside_string = false;
                self.flush_word();
            }
            return;
        }
        if is_word_char(c) {
            if self.buffer.is_empty() {
                self.start = Some(position);
            }
            self.buffer.push(c);
        } else if c == '"' {
            self.flush_word();
            self.start = Some(position);
            self.buffer.push(c);
            self.inside_string = true;
        } else if c.is_whitespace() {
            self.flush_word();
        } else {
            self.flush_word();
            let span = Span::new(position.line, position.column, 1);
            self.pending.push_back(Token::new(span, c));
        }
    }

    fn finish(&mut self) -> LexResult<()> {
        self.finished = true;
        if !self.inside_string {
            self.flush_word();
            return Ok(());
        }
        let span = self.buffered_span();
        self.buffer.clear();
        self.inside_string = false;
        if self.options.strict_strings {
            Err(LexingError::UnterminatedString { span })
        } else {
            warn!("dropping unterminated string literal starting at {span}");
            Ok(())
        }
    }

    fn next_token(&mut self) -> LexResult<Option<Token>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            if self.finished {
                return Ok(None);
            }
            match self.chars.next() {
                Some((c, position)) => self.scan(c, position),
                None => self.finish()?,
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexingError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Tokenizes plain lines with the default options
pub fn tokenize<I, S>(lines: I) -> LexResult<TokenStream>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Lexer::new(lines).tokenize()
}

pub type LexResult<T> = Result<T, LexingError>;

#[derive(Debug, Error)]
pub enum LexingError {
    #[error("unterminated string literal starting at {span}")]
    UnterminatedString { span: Span },
}
