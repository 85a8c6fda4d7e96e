//! Cleans raw source text into the lines the lexer consumes

use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_till, take_until};
use nom::character::complete::char;
use nom::combinator::{map, opt, recognize, rest};
use nom::multi::many0;
use nom::sequence::{pair, terminated, tuple};
use nom::IResult;

/// A non-blank source line with its comments removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number in the original file
    pub number: usize,
    /// Number of characters trimmed from the start of the line
    pub indent: usize,
    pub text: String,
}

impl SourceLine {
    pub fn new(number: usize, indent: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            indent,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Segment<'a> {
    Code(&'a str),
    Comment(&'a str),
}

fn line_comment(src: &str) -> IResult<&str, Segment<'_>> {
    map(recognize(pair(tag("//"), take_till(|c: char| c == '\n'))), Segment::Comment)(src)
}

fn block_comment(src: &str) -> IResult<&str, Segment<'_>> {
    map(
        recognize(pair(
            tag("/*"),
            alt((terminated(take_until("*/"), tag("*/")), rest)),
        )),
        Segment::Comment,
    )(src)
}

/// A string literal ends at its closing quote or at the end of the line
fn string_literal(src: &str) -> IResult<&str, Segment<'_>> {
    map(
        recognize(tuple((
            char('"'),
            take_till(|c: char| c == '"' || c == '\n'),
            opt(char('"')),
        ))),
        Segment::Code,
    )(src)
}

fn code(src: &str) -> IResult<&str, Segment<'_>> {
    alt((
        map(is_not("\"/"), Segment::Code),
        map(recognize(char('/')), Segment::Code),
    ))(src)
}

fn segments(src: &str) -> IResult<&str, Vec<Segment<'_>>> {
    many0(alt((line_comment, block_comment, string_literal, code)))(src)
}

/// Blanks out every comment, keeping line breaks and column positions intact
fn strip_comments(text: &str) -> String {
    let (unparsed, segments) = match segments(text) {
        Ok(parsed) => parsed,
        Err(_) => (text, vec![]),
    };
    let mut stripped = String::with_capacity(text.len());
    for segment in segments {
        match segment {
            Segment::Code(code) => stripped.push_str(code),
            Segment::Comment(comment) => stripped.extend(
                comment
                    .chars()
                    .map(|c| if c == '\n' { '\n' } else { ' ' }),
            ),
        }
    }
    stripped.push_str(unparsed);
    stripped
}

/// Strips comments and blank lines from source text, trimming every remaining line.
///
/// Handles `//` line comments, `/* */` and `/** */` block comments spanning any number of
/// lines, and leaves comment markers inside string literals alone.
pub fn clean_source(text: &str) -> Vec<SourceLine> {
    strip_comments(text)
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }
            let indent = line.chars().count() - line.trim_start().chars().count();
            Some(SourceLine::new(idx + 1, indent, trimmed))
        })
        .collect()
}
