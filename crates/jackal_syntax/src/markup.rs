//! The flat, bracketed serialization of a syntax tree

use crate::syntax_tree::{Element, Node};
use jackal_tokens::{Token, TokenStream};
use std::fmt::{Display, Formatter};

/// A single entry of a [Markup] sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// `<tag>`
    Open(&'static str),
    /// `</tag>`
    Close(&'static str),
    /// `<tag> value </tag>`, the value already escaped
    Leaf { tag: &'static str, value: String },
}

impl From<&Token> for Marker {
    fn from(token: &Token) -> Self {
        Marker::Leaf {
            tag: token.kind().tag(),
            value: token.rendered().into_owned(),
        }
    }
}

impl Display for Marker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Marker::Open(tag) => write!(f, "<{tag}>"),
            Marker::Close(tag) => write!(f, "</{tag}>"),
            Marker::Leaf { tag, value } => write!(f, "<{tag}> {value} </{tag}>"),
        }
    }
}

/// Line terminator used when rendering
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    CrLf,
    Lf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// How a [Markup] is turned into a document
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub line_ending: LineEnding,
    /// Spaces of indentation per nesting level
    pub indent: usize,
}

/// An ordered sequence of markers which, read in order, forms a well-nested document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(Vec<Marker>);

impl Markup {
    /// Lists tokens without any grammar structure, wrapped in a `tokens` element
    pub fn token_listing(stream: &TokenStream) -> Self {
        let mut markers = Vec::with_capacity(stream.len() + 2);
        markers.push(Marker::Open("tokens"));
        markers.extend(stream.tokens().iter().map(Marker::from));
        markers.push(Marker::Close("tokens"));
        Self(markers)
    }

    pub fn markers(&self) -> &[Marker] {
        &self.0
    }

    /// Each marker in its string form
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.0.iter().map(Marker::to_string)
    }

    /// Number of leaf markers
    pub fn leaf_count(&self) -> usize {
        self.0
            .iter()
            .filter(|marker| matches!(marker, Marker::Leaf { .. }))
            .count()
    }

    /// Checks that every closing marker matches the most recently unmatched opening marker,
    /// and that nothing is left open.
    pub fn is_well_nested(&self) -> bool {
        let mut open = vec![];
        for marker in &self.0 {
            match marker {
                Marker::Open(tag) => open.push(*tag),
                Marker::Close(tag) => {
                    if open.pop() != Some(*tag) {
                        return false;
                    }
                }
                Marker::Leaf { .. } => {}
            }
        }
        open.is_empty()
    }

    /// Renders this markup as a document
    pub fn render(&self, options: &RenderOptions) -> String {
        let line_ending = options.line_ending.as_str();
        let mut depth = 0usize;
        let mut rendered = String::new();
        for (idx, marker) in self.0.iter().enumerate() {
            if idx > 0 {
                rendered.push_str(line_ending);
            }
            if let Marker::Close(_) = marker {
                depth = depth.saturating_sub(1);
            }
            rendered.extend(std::iter::repeat(' ').take(depth * options.indent));
            rendered.push_str(&marker.to_string());
            if let Marker::Open(_) = marker {
                depth += 1;
            }
        }
        rendered
    }

    fn push_node(&mut self, node: &Node) {
        let tag = node.rule().tag();
        self.0.push(Marker::Open(tag));
        for child in node.children() {
            match child {
                Element::Token(token) => self.0.push(Marker::from(token)),
                Element::Node(node) => self.push_node(node),
            }
        }
        self.0.push(Marker::Close(tag));
    }
}

impl From<&Node> for Markup {
    fn from(node: &Node) -> Self {
        let mut markup = Markup::default();
        markup.push_node(node);
        markup
    }
}

impl Display for Markup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.render(&RenderOptions {
                line_ending: LineEnding::Lf,
                indent: 0,
            })
        )
    }
}
