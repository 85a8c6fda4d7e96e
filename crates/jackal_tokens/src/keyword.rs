//! The closed set of reserved words

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// A reserved word of the language.
///
/// Matching is case-sensitive and exact, so `Class` or `CLASS` are identifiers.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl Keyword {
    /// Looks up a keyword by its exact spelling
    pub fn lookup(word: &str) -> Option<Self> {
        word.parse().ok()
    }

    /// Gets the source spelling of this keyword
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Checks if this keyword can start a statement
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            Keyword::Let | Keyword::If | Keyword::While | Keyword::Do | Keyword::Return
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_keyword_count() {
        assert_eq!(Keyword::iter().count(), 21);
    }

    #[test]
    fn test_lookup_round_trips_spelling() {
        for keyword in Keyword::iter() {
            assert_eq!(Keyword::lookup(keyword.as_str()), Some(keyword));
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(Keyword::lookup("class"), Some(Keyword::Class));
        assert_eq!(Keyword::lookup("Class"), None);
        assert_eq!(Keyword::lookup("WHILE"), None);
        assert_eq!(Keyword::lookup("classes"), None);
    }

    #[test]
    fn test_statement_keywords() {
        let starts = Keyword::iter()
            .filter(Keyword::starts_statement)
            .map(|k| k.to_string())
            .collect::<Vec<_>>();
        assert_eq!(starts, ["let", "do", "if", "while", "return"]);
    }
}
