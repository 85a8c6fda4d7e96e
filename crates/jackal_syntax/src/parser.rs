//! Recursive-descent parser building the syntax tree from a token stream

use crate::syntax_tree::{Node, Rule};
use jackal_tokens::spanned::Spanned;
use jackal_tokens::{Keyword, Token, TokenStream};
use tracing::trace;

pub mod error;

pub use error::*;

/// Operators that can join two terms of an expression
pub const BINARY_OPERATORS: [&str; 9] = ["+", "-", "*", "/", "&", "|", "<", ">", "="];
/// Operators that can prefix a term
pub const UNARY_OPERATORS: [&str; 2] = ["-", "~"];

/// Creates the syntax tree of one class from its token stream.
///
/// Every grammar production has one method, which wraps what it consumes in a [Node] of its
/// [Rule]. Alternatives are chosen by looking at the current token only and the parser never
/// backtracks, so the first mismatch ends the parse with a [SyntaxError].
///
/// # Examples
/// ```
/// # use jackal_syntax::lexer::tokenize;
/// # use jackal_syntax::parser::Parser;
/// let tokens = tokenize(["class Main { function void main() { return; } }"]).unwrap();
/// let class = Parser::new(tokens).parse().unwrap();
/// assert_eq!(class.tokens().count(), 13);
/// ```
#[derive(Debug)]
pub struct Parser {
    stream: TokenStream,
    non_terminals: Vec<Rule>,
}

impl Parser {
    /// Creates a new parser, starting at the current token of the stream
    pub fn new(stream: TokenStream) -> Self {
        Self {
            stream,
            non_terminals: vec![],
        }
    }

    /// Parses the stream as a complete class
    pub fn parse(mut self) -> SyntaxResult<Node> {
        self.parse_class()
    }

    /// The stream being consumed
    pub fn stream(&self) -> &TokenStream {
        &self.stream
    }

    /// Checks if every token has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.stream.is_exhausted()
    }

    fn peek(&self) -> Option<&Token> {
        self.stream.peek()
    }

    fn peek_is(&self, literal: &str) -> bool {
        self.peek().is_some_and(|token| token.is(literal))
    }

    fn peek_is_any(&self, literals: &[&str]) -> bool {
        self.peek()
            .is_some_and(|token| literals.iter().any(|literal| token.is(literal)))
    }

    /// Consumes the current token into `node`. If a literal is given, the current token must
    /// be exactly that literal.
    fn expect_token(&mut self, node: &mut Node, literal: Option<&str>) -> SyntaxResult<()> {
        match self.peek() {
            None => return Err(self.error(ErrorKind::unexpected_eof(literal))),
            Some(current) => {
                if let Some(expected) = literal {
                    if !current.is(expected) {
                        let kind = ErrorKind::expected_token(expected, current.clone());
                        return Err(self.error(kind));
                    }
                }
            }
        }
        if let Some(token) = self.stream.advance() {
            trace!("consumed {token:?}");
            node.push_token(token);
        }
        Ok(())
    }

    #[inline]
    fn expect(&mut self, node: &mut Node, literal: &str) -> SyntaxResult<()> {
        self.expect_token(node, Some(literal))
    }

    /// Consumes whatever the current token is
    #[inline]
    fn expect_any(&mut self, node: &mut Node) -> SyntaxResult<()> {
        self.expect_token(node, None)
    }

    fn error(&self, kind: ErrorKind) -> SyntaxError {
        let location = match self.peek() {
            Some(token) => Some(token.span()),
            None => self.stream.tokens().last().map(|token| token.span().end()),
        };
        SyntaxError::new(
            kind,
            location,
            self.stream.remaining().to_vec(),
            self.non_terminals.clone(),
        )
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let kind = match self.peek() {
            Some(token) => ErrorKind::expected_token(expected, token.clone()),
            None => ErrorKind::unexpected_eof(Some(expected)),
        };
        self.error(kind)
    }

    /// Wraps everything `body` consumes in a node of `rule`
    fn rule<F>(&mut self, rule: Rule, body: F) -> SyntaxResult<Node>
    where
        F: FnOnce(&mut Self, &mut Node) -> SyntaxResult<()>,
    {
        trace!(depth = self.non_terminals.len(), "starting {rule}");
        self.non_terminals.push(rule);
        let mut node = Node::new(rule);
        body(self, &mut node)?;
        self.non_terminals.pop();
        trace!(depth = self.non_terminals.len(), "finished {rule}");
        Ok(node)
    }

    /// `class` name `{` classVarDec* subroutineDec* `}`
    pub fn parse_class(&mut self) -> SyntaxResult<Node> {
        self.rule(Rule::Class, |p, node| {
            p.expect(node, "class")?;
            p.expect_any(node)?;
            p.expect(node, "{")?;
            while p.peek_is_any(&["static", "field"]) {
                node.push_node(p.parse_class_var_dec()?);
            }
            // the last token is the closing brace of the class
            while p.stream.remaining().len() > 1 {
                node.push_node(p.parse_subroutine_dec()?);
            }
            p.expect(node, "}")
        })
    }

    /// (`static` | `field`) type name (`,` name)* `;`
    pub fn parse_class_var_dec(&mut self) -> SyntaxResult<Node> {
        self.rule(Rule::ClassVarDec, |p, node| {
            p.expect_any(node)?;
            p.expect_any(node)?;
            p.expect_any(node)?;
            while p.peek_is(",") {
                p.expect(node, ",")?;
                p.expect_any(node)?;
            }
            p.expect(node, ";")
        })
    }

    /// (`constructor` | `function` | `method`) (`void` | type) name `(` parameterList `)`
    /// subroutineBody
    pub fn parse_subroutine_dec(&mut self) -> SyntaxResult<Node> {
        self.rule(Rule::SubroutineDec, |p, node| {
            p.expect_any(node)?;
            p.expect_any(node)?;
            p.expect_any(node)?;
            p.expect(node, "(")?;
            node.push_node(p.parse_parameter_list()?);
            p.expect(node, ")")?;
            node.push_node(p.parse_subroutine_body()?);
            Ok(())
        })
    }

    /// ((type name) (`,` type name)*)?
    pub fn parse_parameter_list(&mut self) -> SyntaxResult<Node> {
        self.rule(Rule::ParameterList, |p, node| {
            if !p.peek_is(")") {
                p.expect_any(node)?;
                p.expect_any(node)?;
            }
            while p.peek_is(",") {
                p.expect(node, ",")?;
                p.expect_any(node)?;
                p.expect_any(node)?;
            }
            Ok(())
        })
    }

    /// `{` varDec* statements `}`
    pub fn parse_subroutine_body(&mut self) -> SyntaxResult<Node> {
        self.rule(Rule::SubroutineBody, |p, node| {
            p.expect(node, "{")?;
            while p.peek_is("var") {
                node.push_node(p.parse_var_dec()?);
            }
            node.push_node(p.parse_statements()?);
            p.expect(node, "}")
        })
    }

    /// `var` type name (`,` name)* `;`
    pub fn parse_var_dec(&mut self) -> SyntaxResult<Node> {
        self.rule(Rule::VarDec, |p, node| {
            p.expect(node, "var")?;
            p.expect_any(node)?;
            p.expect_any(node)?;
            while p.peek_is(",") {
                p.expect(node, ",")?;
                p.expect_any(node)?;
            }
            p.expect(node, ";")
        })
    }

    /// Zero or more statements. Stops without consuming at the first token that can not start
    /// a statement, which is normally the enclosing block's `}`.
    pub fn parse_statements(&mut self) -> SyntaxResult<Node> {
        self.rule(Rule::Statements, |p, node| {
            while p
                .peek()
                .and_then(Token::keyword)
                .is_some_and(|keyword| keyword.starts_statement())
            {
                node.push_node(p.parse_statement()?);
            }
            Ok(())
        })
    }

    /// A single `let`, `if`, `while`, `do` or `return` statement
    pub fn parse_statement(&mut self) -> SyntaxResult<Node> {
        match self.peek().and_then(Token::keyword) {
            Some(Keyword::Let) => self.parse_let_statement(),
            Some(Keyword::If) => self.parse_if_statement(),
            Some(Keyword::While) => self.parse_while_statement(),
            Some(Keyword::Do) => self.parse_do_statement(),
            Some(Keyword::Return) => self.parse_return_statement(),
            _ => Err(self.unexpected("statement")),
        }
    }

    /// `let` name (`[` expression `]`)? `=` expression `;`
    pub fn parse_let_statement(&mut self) -> SyntaxResult<Node> {
        self.rule(Rule::LetStatement, |p, node| {
            p.expect(node, "let")?;
            p.expect_any(node)?;
            if p.peek_is("[") {
                p.expect(node, "[")?;
                node.push_node(p.parse_expression()?);
                p.expect(node, "]")?;
            }
            p.expect(node, "=")?;
            node.push_node(p.parse_expression()?);
            p.expect(node, ";")
        })
    }

    /// `if` `(` expression `)` `{` statements `}` (`else` `{` statements `}`)?
    pub fn parse_if_statement(&mut self) -> SyntaxResult<Node> {
        self.rule(Rule::IfStatement, |p, node| {
            p.expect(node, "if")?;
            p.parse_condition(node)?;
            p.parse_block(node)?;
            if p.peek_is("else") {
                p.expect(node, "else")?;
                p.parse_block(node)?;
            }
            Ok(())
        })
    }

    /// `while` `(` expression `)` `{` statements `}`
    pub fn parse_while_statement(&mut self) -> SyntaxResult<Node> {
        self.rule(Rule::WhileStatement, |p, node| {
            p.expect(node, "while")?;
            p.parse_condition(node)?;
            p.parse_block(node)
        })
    }

    /// `do` subroutineCall `;`
    pub fn parse_do_statement(&mut self) -> SyntaxResult<Node> {
        self.rule(Rule::DoStatement, |p, node| {
            p.expect(node, "do")?;
            p.parse_subroutine_call(node)?;
            p.expect(node, ";")
        })
    }

    /// `return` expression? `;`
    pub fn parse_return_statement(&mut self) -> SyntaxResult<Node> {
        self.rule(Rule::ReturnStatement, |p, node| {
            p.expect(node, "return")?;
            if !p.peek_is(";") {
                node.push_node(p.parse_expression()?);
            }
            p.expect(node, ";")
        })
    }

    fn parse_condition(&mut self, node: &mut Node) -> SyntaxResult<()> {
        self.expect(node, "(")?;
        node.push_node(self.parse_expression()?);
        self.expect(node, ")")
    }

    fn parse_block(&mut self, node: &mut Node) -> SyntaxResult<()> {
        self.expect(node, "{")?;
        node.push_node(self.parse_statements()?);
        self.expect(node, "}")
    }

    /// A subroutine call has no node of its own, its tokens belong to the enclosing rule.
    fn parse_subroutine_call(&mut self, node: &mut Node) -> SyntaxResult<()> {
        self.expect_any(node)?;
        self.parse_call_suffix(node)
    }

    /// The unqualified `(` form and the qualified `.` form are checked one after the other,
    /// not as alternatives.
    fn parse_call_suffix(&mut self, node: &mut Node) -> SyntaxResult<()> {
        if self.peek_is("(") {
            self.parse_arguments(node)?;
        }
        if self.peek_is(".") {
            self.expect(node, ".")?;
            self.expect_any(node)?;
            self.parse_arguments(node)?;
        }
        Ok(())
    }

    fn parse_arguments(&mut self, node: &mut Node) -> SyntaxResult<()> {
        self.expect(node, "(")?;
        node.push_node(self.parse_expression_list()?);
        self.expect(node, ")")
    }

    /// (expression (`,` expression)*)?
    pub fn parse_expression_list(&mut self) -> SyntaxResult<Node> {
        self.rule(Rule::ExpressionList, |p, node| {
            while !p.peek_is(")") {
                node.push_node(p.parse_expression()?);
                if p.peek_is(",") {
                    p.expect(node, ",")?;
                }
            }
            Ok(())
        })
    }

    /// term (op term)*
    pub fn parse_expression(&mut self) -> SyntaxResult<Node> {
        self.rule(Rule::Expression, |p, node| {
            node.push_node(p.parse_term()?);
            while p.peek_is_any(&BINARY_OPERATORS) {
                p.expect_any(node)?;
                node.push_node(p.parse_term()?);
            }
            Ok(())
        })
    }

    /// `(` expression `)`, a unary operator and its term, or a single token optionally
    /// followed by an index and call suffixes.
    pub fn parse_term(&mut self) -> SyntaxResult<Node> {
        self.rule(Rule::Term, |p, node| {
            if p.peek_is("(") {
                p.expect(node, "(")?;
                node.push_node(p.parse_expression()?);
                p.expect(node, ")")
            } else if p.peek_is_any(&UNARY_OPERATORS) {
                p.expect_any(node)?;
                node.push_node(p.parse_term()?);
                Ok(())
            } else {
                p.expect_any(node)?;
                if p.peek_is("[") {
                    p.expect(node, "[")?;
                    node.push_node(p.parse_expression()?);
                    p.expect(node, "]")?;
                }
                p.parse_call_suffix(node)
            }
        })
    }
}

impl From<TokenStream> for Parser {
    fn from(value: TokenStream) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::markup::Markup;
    use crate::syntax_tree::Element;
    use jackal_tokens::spanned::Span;
    use test_log::test;

    pub fn test_parser<F, O>(s: &str, callback: F) -> O
    where
        F: FnOnce(&mut Parser) -> O,
    {
        let tokens = tokenize(s.lines()).expect("could not tokenize");
        let mut parser = Parser::new(tokens);
        callback(&mut parser)
    }

    fn child_lexemes(node: &Node) -> Vec<String> {
        node.children()
            .iter()
            .map(|child| match child {
                Element::Token(token) => token.lexeme().to_string(),
                Element::Node(node) => format!("<{}>", node.rule()),
            })
            .collect()
    }

    const SQUARE: &str = r#"
class Square {
    field int x, y;
    static boolean debug;
    constructor Square new(int ax, int ay) {
        let x = ax;
        let y = ay;
        return this;
    }
    method void draw() {
        var int i;
        var Array pixels, rows;
        let pixels[i + 1] = -x;
        if ((x < 10) & ~(y > 2)) {
            do Screen.drawRectangle(x, y, x + 16, y * 2);
        } else {
            do erase();
        }
        while (i = 0) {
            let i = i - 1;
        }
        do Output.printString("a < b & c");
        return;
    }
}
"#;

    #[test]
    fn test_parse_class() {
        let tokens = tokenize(SQUARE.lines()).unwrap();
        let token_count = tokens.len();
        let class = Parser::new(tokens.clone()).parse().expect("should parse");
        assert_eq!(class.rule(), Rule::Class);
        assert_eq!(
            class.nodes().map(Node::rule).collect::<Vec<_>>(),
            [
                Rule::ClassVarDec,
                Rule::ClassVarDec,
                Rule::SubroutineDec,
                Rule::SubroutineDec,
            ]
        );

        let markup = Markup::from(&class);
        assert!(markup.is_well_nested());
        assert_eq!(markup.leaf_count(), token_count);
        let leaves = class.tokens().cloned().collect::<Vec<_>>();
        assert_eq!(leaves.as_slice(), tokens.tokens());
    }

    #[test]
    fn test_parser_consumes_whole_stream() {
        test_parser(SQUARE, |parser| {
            parser.parse_class().unwrap();
            assert!(parser.is_exhausted());
        });
    }

    #[test]
    fn test_unqualified_call() {
        let node = test_parser("do foo(1);", |parser| parser.parse_statement().unwrap());
        assert_eq!(node.rule(), Rule::DoStatement);
        assert_eq!(
            child_lexemes(&node),
            ["do", "foo", "(", "<expressionList>", ")", ";"]
        );
    }

    #[test]
    fn test_qualified_call() {
        let node = test_parser("do foo.bar(1, 2);", |parser| {
            parser.parse_statement().unwrap()
        });
        assert_eq!(
            child_lexemes(&node),
            ["do", "foo", ".", "bar", "(", "<expressionList>", ")", ";"]
        );
        let list = node.find(Rule::ExpressionList).unwrap();
        assert_eq!(child_lexemes(list), ["<expression>", ",", "<expression>"]);
    }

    #[test]
    fn test_term_call_leaves_operator() {
        test_parser("foo.bar(1) + 2", |parser| {
            let term = parser.parse_term().unwrap();
            assert_eq!(
                child_lexemes(&term),
                ["foo", ".", "bar", "(", "<expressionList>", ")"]
            );
            assert!(parser.stream().peek().unwrap().is("+"));
        });
    }

    #[test]
    fn test_indexed_term_leaves_semicolon() {
        test_parser("foo[1];", |parser| {
            let term = parser.parse_term().unwrap();
            assert_eq!(child_lexemes(&term), ["foo", "[", "<expression>", "]"]);
            assert!(parser.stream().peek().unwrap().is(";"));
        });
    }

    #[test]
    fn test_plain_call_term_leaves_semicolon() {
        test_parser("foo(1);", |parser| {
            let term = parser.parse_term().unwrap();
            assert_eq!(child_lexemes(&term), ["foo", "(", "<expressionList>", ")"]);
            assert!(parser.stream().peek().unwrap().is(";"));
        });
    }

    #[test]
    fn test_unary_and_parenthesized_terms() {
        let term = test_parser("-(a)", |parser| parser.parse_term().unwrap());
        assert_eq!(child_lexemes(&term), ["-", "<term>"]);
        let inner = term.find(Rule::Term).unwrap();
        assert_eq!(child_lexemes(inner), ["(", "<expression>", ")"]);
    }

    #[test]
    fn test_expression_operators() {
        let expression = test_parser("a + b < c & ~d", |parser| {
            parser.parse_expression().unwrap()
        });
        assert_eq!(
            child_lexemes(&expression),
            ["<term>", "+", "<term>", "<", "<term>", "&", "<term>"]
        );
        let lines = Markup::from(&expression).lines().collect::<Vec<_>>();
        assert!(lines.contains(&"<symbol> &lt; </symbol>".to_string()));
        assert!(lines.contains(&"<symbol> &amp; </symbol>".to_string()));
    }

    #[test]
    fn test_missing_assignment_is_fatal() {
        let error = test_parser("let x 5;", |parser| {
            parser.parse_statement().expect_err("should fail")
        });
        match &error.kind {
            ErrorKind::ExpectedToken { expected, found } => {
                assert_eq!(expected, "=");
                assert!(found.is("5"));
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
        assert_eq!(error.location, Some(Span::new(1, 7, 1)));
        assert_eq!(error.non_terminal_stack, [Rule::LetStatement]);
        assert_eq!(
            error.remaining.iter().map(|t| t.lexeme()).collect::<Vec<_>>(),
            ["5", ";"]
        );
    }

    #[test]
    fn test_missing_assignment_inside_class_has_no_output() {
        let src = "class A { function void f() { let x 5; return; } }";
        let result = Parser::new(tokenize([src]).unwrap()).parse();
        let error = result.expect_err("should fail");
        assert_eq!(
            error.non_terminal_stack,
            [
                Rule::Class,
                Rule::SubroutineDec,
                Rule::SubroutineBody,
                Rule::Statements,
                Rule::LetStatement,
            ]
        );
        assert!(error.to_string().contains("expected \"=\""));
    }

    #[test]
    fn test_empty_parameter_and_expression_lists() {
        let src = "class A { function void f() { do g(); return; } }";
        let class = Parser::new(tokenize([src]).unwrap()).parse().unwrap();
        let lines = Markup::from(&class).lines().collect::<Vec<_>>();
        let params = lines.iter().position(|l| l == "<parameterList>").unwrap();
        assert_eq!(lines[params + 1], "</parameterList>");
        let args = lines.iter().position(|l| l == "<expressionList>").unwrap();
        assert_eq!(lines[args + 1], "</expressionList>");
    }

    #[test]
    fn test_parameter_list() {
        let list = test_parser("int a, boolean b)", |parser| {
            parser.parse_parameter_list().unwrap()
        });
        assert_eq!(child_lexemes(&list), ["int", "a", ",", "boolean", "b"]);
    }

    #[test]
    fn test_if_else() {
        let node = test_parser("if (x) { return 1; } else { let y = 2; }", |parser| {
            parser.parse_statement().unwrap()
        });
        assert_eq!(
            child_lexemes(&node),
            [
                "if",
                "(",
                "<expression>",
                ")",
                "{",
                "<statements>",
                "}",
                "else",
                "{",
                "<statements>",
                "}",
            ]
        );
    }

    #[test]
    fn test_return_without_expression() {
        let node = test_parser("return;", |parser| parser.parse_statement().unwrap());
        assert_eq!(child_lexemes(&node), ["return", ";"]);
    }

    #[test]
    fn test_statements_stop_at_unknown_token() {
        test_parser("let x = 1; foo", |parser| {
            let statements = parser.parse_statements().unwrap();
            assert_eq!(statements.nodes().count(), 1);
            assert!(parser.stream().peek().unwrap().is("foo"));
        });
    }

    #[test]
    fn test_string_literal_brace_is_not_a_terminator() {
        let node = test_parser("let s = \"}\";", |parser| parser.parse_statement().unwrap());
        assert_eq!(node.tokens().count(), 5);
    }

    #[test]
    fn test_unexpected_eof() {
        let error = test_parser("class Main {", |parser| {
            parser.parse_class().expect_err("should fail")
        });
        assert!(matches!(
            &error.kind,
            ErrorKind::UnexpectedEof { expected: Some(e) } if e == "}"
        ));
        assert_eq!(error.location, Some(Span::new(1, 13, 0)));
    }

    #[test]
    fn test_unterminated_expression_list() {
        let error = test_parser("do f(1, 2", |parser| {
            parser.parse_statement().expect_err("should fail")
        });
        assert!(matches!(error.kind, ErrorKind::UnexpectedEof { expected: None }));
    }

    #[test]
    fn test_statement_rejects_non_statement() {
        let error = test_parser("var int x;", |parser| {
            parser.parse_statement().expect_err("should fail")
        });
        assert!(matches!(
            &error.kind,
            ErrorKind::ExpectedToken { expected, .. } if expected == "statement"
        ));
    }
}
