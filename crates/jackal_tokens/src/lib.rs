#![doc = include_str!("../README.md")]

pub mod escape;
pub mod keyword;
pub mod spanned;
pub mod stream;
pub mod token;

pub use escape::escape_markup;
pub use keyword::Keyword;
pub use stream::TokenStream;
pub use token::{classify, Token, TokenKind};
