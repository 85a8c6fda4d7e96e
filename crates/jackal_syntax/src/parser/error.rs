use crate::lexer::LexingError;
use crate::syntax_tree::Rule;
use itertools::Itertools;
use jackal_tokens::spanned::Span;
use jackal_tokens::Token;
use std::fmt::{Display, Formatter};
use std::io;

/// How many of the remaining tokens are shown when displaying an error
const REMAINING_PREVIEW: usize = 12;

/// Represents an error occurring during parsing.
///
/// Syntax errors are always fatal to the parse of a source unit.
#[derive(Debug, thiserror::Error)]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub location: Option<Span>,
    /// The tokens that were not consumed, starting with the offending one
    pub remaining: Vec<Token>,
    pub non_terminal_stack: Vec<Rule>,
}

impl SyntaxError {
    /// Creates a new error
    pub fn new(
        kind: ErrorKind,
        location: impl Into<Option<Span>>,
        remaining: Vec<Token>,
        non_terminals: Vec<Rule>,
    ) -> Self {
        Self {
            kind,
            location: location.into(),
            remaining,
            non_terminal_stack: non_terminals,
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "syntax error: {}", self.kind)?;
        if let Some(location) = &self.location {
            write!(f, " at {location}")?;
        }
        if !self.non_terminal_stack.is_empty() {
            writeln!(f)?;
            writeln!(f, "non terminal stack:")?;
            for (idx, non_terminal) in self.non_terminal_stack.iter().enumerate() {
                writeln!(f, "  {}: {}", idx, non_terminal)?;
            }
        }
        if !self.remaining.is_empty() {
            write!(
                f,
                "remaining tokens ({}): {}",
                self.remaining.len(),
                self.remaining
                    .iter()
                    .take(REMAINING_PREVIEW)
                    .map(|t| t.lexeme())
                    .join(" ")
            )?;
            if self.remaining.len() > REMAINING_PREVIEW {
                write!(f, " ...")?;
            }
        }
        Ok(())
    }
}

impl From<ErrorKind> for SyntaxError {
    fn from(value: ErrorKind) -> Self {
        Self::new(value, None, vec![], vec![])
    }
}

impl From<io::Error> for SyntaxError {
    fn from(value: io::Error) -> Self {
        ErrorKind::from(value).into()
    }
}

impl From<LexingError> for SyntaxError {
    fn from(value: LexingError) -> Self {
        let location = match &value {
            LexingError::UnterminatedString { span } => *span,
        };
        Self::new(value.into(), location, vec![], vec![])
    }
}

/// [SyntaxError] kind
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("expected {expected:?}, found {:?} ({})", .found.lexeme(), .found.kind().tag())]
    ExpectedToken { expected: String, found: Token },
    #[error("unexpected end of input{}", .expected.as_ref().map(|e| format!(", expected {e:?}")).unwrap_or_default())]
    UnexpectedEof { expected: Option<String> },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Lex(#[from] LexingError),
}

impl ErrorKind {
    pub fn expected_token(expected: impl AsRef<str>, found: Token) -> Self {
        Self::ExpectedToken {
            expected: expected.as_ref().to_string(),
            found,
        }
    }

    pub fn unexpected_eof(expected: Option<&str>) -> Self {
        Self::UnexpectedEof {
            expected: expected.map(str::to_string),
        }
    }
}

pub type SyntaxResult<T = ()> = Result<T, SyntaxError>;
