//! Syntax tree

use jackal_tokens::Token;
use strum::{AsRefStr, Display, EnumIter, IntoStaticStr};

/// A grammar production. Its spelling is the tag name of the node in serialized markup.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum Rule {
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
}

impl Rule {
    /// The tag name of this rule
    pub fn tag(&self) -> &'static str {
        (*self).into()
    }
}

/// A child of a [Node]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Token(Token),
    Node(Node),
}

/// A node of the syntax tree, owning its children in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    rule: Rule,
    children: Vec<Element>,
}

impl Node {
    /// Creates an empty node for a rule
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            children: vec![],
        }
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn push_token(&mut self, token: Token) {
        self.children.push(Element::Token(token));
    }

    pub fn push_node(&mut self, node: Node) {
        self.children.push(Element::Node(node));
    }

    /// Every token under this node, in source order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        let mut tokens = vec![];
        self.collect_tokens(&mut tokens);
        tokens.into_iter()
    }

    fn collect_tokens<'a>(&'a self, tokens: &mut Vec<&'a Token>) {
        for child in &self.children {
            match child {
                Element::Token(token) => tokens.push(token),
                Element::Node(node) => node.collect_tokens(tokens),
            }
        }
    }

    /// The direct child nodes of this node
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(|child| match child {
            Element::Node(node) => Some(node),
            Element::Token(_) => None,
        })
    }

    /// Finds the first direct child node of a rule
    pub fn find(&self, rule: Rule) -> Option<&Node> {
        self.nodes().find(|node| node.rule == rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jackal_tokens::spanned::Span;

    #[test]
    fn test_rule_tags() {
        assert_eq!(Rule::Class.tag(), "class");
        assert_eq!(Rule::ClassVarDec.tag(), "classVarDec");
        assert_eq!(Rule::LetStatement.tag(), "letStatement");
        assert_eq!(Rule::ExpressionList.tag(), "expressionList");
    }

    #[test]
    fn test_tokens_are_in_order() {
        let mut term = Node::new(Rule::Term);
        term.push_token(Token::new(Span::default(), "x"));
        let mut expression = Node::new(Rule::Expression);
        expression.push_node(term);
        expression.push_token(Token::new(Span::default(), "+"));
        let mut other = Node::new(Rule::Term);
        other.push_token(Token::new(Span::default(), "1"));
        expression.push_node(other);

        let lexemes = expression.tokens().map(|t| t.lexeme()).collect::<Vec<_>>();
        assert_eq!(lexemes, ["x", "+", "1"]);
        assert_eq!(expression.nodes().count(), 2);
        assert!(expression.find(Rule::Term).is_some());
        assert!(expression.find(Rule::ExpressionList).is_none());
    }
}
