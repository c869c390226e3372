//! Unit tests for the parser module.
//!
//! This module contains tests for:
//! - Statement dispatch and function declaration detection
//! - Operator precedence and associativity
//! - Object literals, calls and member access
//! - Error reporting

use pretty_assertions::assert_eq;

use crate::ast::ast::{Expr, ExprType, Program, Stmt, StmtType};
use crate::ast::expressions::{BinaryOperator, Property};
use crate::ast::statements::{FunctionDeclaration, VarDeclaration};
use crate::errors::errors::{Error, ErrorImpl, ErrorKind};
use crate::lexer::{lexer::tokenize, tokens::TokenKind};

use super::lookups::FunctionDetection;
use super::parser::{parse, parse_with_options, ParseOptions, Parser};

fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.src".to_string())).unwrap();
    parse(&tokens)
}

fn parse_anchored(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.src".to_string())).unwrap();
    parse_with_options(
        &tokens,
        ParseOptions {
            function_detection: FunctionDetection::Anchored,
        },
    )
}

fn single_expr(source: &str) -> Expr {
    let program = parse_source(source).unwrap();
    assert_eq!(program.body.len(), 1);
    match program.body.into_iter().next() {
        Some(Stmt::Expression(expr)) => expr,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

fn num(value: f64) -> Expr {
    Expr::numeric(value)
}

fn ident(name: &str) -> Expr {
    Expr::identifier(name)
}

#[test]
fn test_parse_empty_program() {
    let program = parse_source("").unwrap();

    assert!(program.body.is_empty());
}

#[test]
fn test_statements_kept_in_source_order() {
    let program = parse_source("let a = 1 let b = 2 a + b").unwrap();

    let kinds: Vec<StmtType> = program.body.iter().map(|stmt| stmt.get_stmt_type()).collect();
    assert_eq!(
        kinds,
        vec![
            StmtType::VarDeclaration,
            StmtType::VarDeclaration,
            StmtType::ExpressionStmt
        ]
    );
    assert_eq!(
        program.body[2],
        Stmt::Expression(Expr::binary(ident("a"), BinaryOperator::Add, ident("b")))
    );
}

#[test]
fn test_subtraction_is_left_associative() {
    assert_eq!(
        single_expr("1 - 2 - 3"),
        Expr::binary(
            Expr::binary(num(1.0), BinaryOperator::Subtract, num(2.0)),
            BinaryOperator::Subtract,
            num(3.0)
        )
    );
}

#[test]
fn test_multiplicative_operators_are_left_associative() {
    assert_eq!(
        single_expr("8 / 4 % 3"),
        Expr::binary(
            Expr::binary(num(8.0), BinaryOperator::Divide, num(4.0)),
            BinaryOperator::Modulo,
            num(3.0)
        )
    );
}

#[test]
fn test_every_operator_builds_its_node() {
    assert_eq!(
        single_expr("1 + 2 - 3 * 4 / 5 % 6"),
        Expr::binary(
            Expr::binary(num(1.0), BinaryOperator::Add, num(2.0)),
            BinaryOperator::Subtract,
            Expr::binary(
                Expr::binary(
                    Expr::binary(num(3.0), BinaryOperator::Multiply, num(4.0)),
                    BinaryOperator::Divide,
                    num(5.0)
                ),
                BinaryOperator::Modulo,
                num(6.0)
            )
        )
    );
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(
        single_expr("a = b = c"),
        Expr::assignment(ident("a"), Expr::assignment(ident("b"), ident("c")))
    );
}

#[test]
fn test_assignment_target_is_not_validated() {
    assert_eq!(
        single_expr("1 + 2 = 3"),
        Expr::assignment(
            Expr::binary(num(1.0), BinaryOperator::Add, num(2.0)),
            num(3.0)
        )
    );
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_eq!(
        single_expr("1 + 2 * 3"),
        Expr::binary(
            num(1.0),
            BinaryOperator::Add,
            Expr::binary(num(2.0), BinaryOperator::Multiply, num(3.0))
        )
    );
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(
        single_expr("(1 + 2) * 3"),
        Expr::binary(
            Expr::binary(num(1.0), BinaryOperator::Add, num(2.0)),
            BinaryOperator::Multiply,
            num(3.0)
        )
    );
}

#[test]
fn test_call_binds_tighter_than_multiplication() {
    assert_eq!(
        single_expr("2 * f(3)"),
        Expr::binary(
            num(2.0),
            BinaryOperator::Multiply,
            Expr::call(ident("f"), vec![num(3.0)])
        )
    );
}

#[test]
fn test_shorthand_object_property() {
    assert_eq!(
        single_expr("{ x }"),
        Expr::object(vec![Property::shorthand("x")])
    );
}

#[test]
fn test_object_literal_mixed_properties() {
    assert_eq!(
        single_expr("{ a: 1, b, c: x + 1, }"),
        Expr::object(vec![
            Property::new("a", num(1.0)),
            Property::shorthand("b"),
            Property::new(
                "c",
                Expr::binary(ident("x"), BinaryOperator::Add, num(1.0))
            ),
        ])
    );
}

#[test]
fn test_empty_object_literal() {
    assert_eq!(single_expr("{}"), Expr::object(vec![]));
}

#[test]
fn test_object_literal_as_assigned_value() {
    assert_eq!(
        single_expr("config = { depth: 2, nested: { on } }"),
        Expr::assignment(
            ident("config"),
            Expr::object(vec![
                Property::new("depth", num(2.0)),
                Property::new("nested", Expr::object(vec![Property::shorthand("on")])),
            ])
        )
    );
}

#[test]
fn test_object_literal_requires_comma_between_properties() {
    let error = parse_source("{ a: 1 b: 2 }").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnexpectedToken);
    assert!(matches!(
        error.get_error(),
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Comma,
            ..
        }
    ));
}

#[test]
fn test_unclosed_object_literal() {
    let error = parse_source("{ a,").unwrap_err();

    assert!(matches!(
        error.get_error(),
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::CloseCurly,
            ..
        }
    ));
}

#[test]
fn test_function_declaration_detected() {
    let program = parse_source("foo(a, b) { a + b }").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::FunctionDeclaration(FunctionDeclaration {
            name: "foo".to_string(),
            parameters: vec!["a".to_string(), "b".to_string()],
            body: vec![Stmt::Expression(Expr::binary(
                ident("a"),
                BinaryOperator::Add,
                ident("b")
            ))],
            is_async: false,
        })]
    );
}

#[test]
fn test_async_function_declaration() {
    let program = parse_source("async fetch(url) { get(url) }").unwrap();

    let Stmt::FunctionDeclaration(decl) = &program.body[0] else {
        panic!("expected a function declaration");
    };
    assert!(decl.is_async);
    assert_eq!(decl.name, "fetch");
    assert_eq!(decl.parameters, vec!["url".to_string()]);
    assert_eq!(
        decl.body,
        vec![Stmt::Expression(Expr::call(ident("get"), vec![ident("url")]))]
    );
}

#[test]
fn test_function_declaration_with_empty_body() {
    let program = parse_source("noop() {}").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::FunctionDeclaration(FunctionDeclaration {
            name: "noop".to_string(),
            parameters: vec![],
            body: vec![],
            is_async: false,
        })]
    );
}

#[test]
fn test_function_parameters_must_be_identifiers() {
    let error = parse_source("foo(1) { }").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::MalformedConstruct);
    assert_eq!(
        error.get_error(),
        &ErrorImpl::NonIdentifierParameter {
            function: "foo".to_string(),
            found: ExprType::NumericLiteral,
        }
    );
}

#[test]
fn test_unclosed_function_body() {
    let error = parse_source("foo() { a").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::CloseCurly,
            found: "end of input".to_string(),
            message: "expected `}` to close the body of `foo`".to_string(),
        }
    );
}

#[test]
fn test_forward_scan_misfires_on_later_declaration() {
    // `print(x)` is taken for a declaration because `main() {` follows.
    let error = parse_source("print(x)\nmain() { }").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::OpenCurly,
            found: "Identifier (main)".to_string(),
            message: "expected `{` to open the body of `print`".to_string(),
        }
    );
}

#[test]
fn test_anchored_detection_keeps_calls_as_expressions() {
    let program = parse_anchored("print(x)\nmain() { print(1) }").unwrap();

    assert_eq!(
        program.body,
        vec![
            Stmt::Expression(Expr::call(ident("print"), vec![ident("x")])),
            Stmt::FunctionDeclaration(FunctionDeclaration {
                name: "main".to_string(),
                parameters: vec![],
                body: vec![Stmt::Expression(Expr::call(ident("print"), vec![num(1.0)]))],
                is_async: false,
            }),
        ]
    );
}

#[test]
fn test_anchored_detection_matches_nested_parentheses() {
    let error = parse_anchored("f(g(x)) { }").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::NonIdentifierParameter {
            function: "f".to_string(),
            found: ExprType::CallExpr,
        }
    );
}

#[test]
fn test_anchored_async_declaration() {
    let program = parse_anchored("async load() { }").unwrap();

    assert!(matches!(
        &program.body[0],
        Stmt::FunctionDeclaration(FunctionDeclaration { is_async: true, .. })
    ));
}

#[test]
fn test_let_without_value() {
    let program = parse_source("let x").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::VarDeclaration(VarDeclaration {
            identifier: "x".to_string(),
            constant: false,
            value: None,
        })]
    );
}

#[test]
fn test_const_without_value_fails() {
    let error = parse_source("const x").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::MalformedConstruct);
    assert_eq!(
        error.get_error(),
        &ErrorImpl::MissingConstInitializer {
            identifier: "x".to_string()
        }
    );
}

#[test]
fn test_const_with_value() {
    let program = parse_source("const rate = 2.5").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::VarDeclaration(VarDeclaration {
            identifier: "rate".to_string(),
            constant: true,
            value: Some(num(2.5)),
        })]
    );
}

#[test]
fn test_declaration_requires_equals_before_more_input() {
    let error = parse_source("let x 5").unwrap_err();

    assert!(matches!(
        error.get_error(),
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Assignment,
            ..
        }
    ));
}

#[test]
fn test_declaration_requires_a_name() {
    let error = parse_source("let = 42").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnexpectedToken);
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_chained_calls_on_member() {
    assert_eq!(
        single_expr("a.b(c)(d)"),
        Expr::call(
            Expr::call(
                Expr::member(ident("a"), ident("b"), false),
                vec![ident("c")]
            ),
            vec![ident("d")]
        )
    );
}

#[test]
fn test_nested_member_call() {
    assert_eq!(
        single_expr("a.b.c(d, 1)"),
        Expr::call(
            Expr::member(
                Expr::member(ident("a"), ident("b"), false),
                ident("c"),
                false
            ),
            vec![ident("d"), num(1.0)]
        )
    );
}

#[test]
fn test_call_without_arguments() {
    assert_eq!(single_expr("f()"), Expr::call(ident("f"), vec![]));
}

#[test]
fn test_computed_member_closed_by_curly() {
    assert_eq!(
        single_expr("a[b + 1}"),
        Expr::member(
            ident("a"),
            Expr::binary(ident("b"), BinaryOperator::Add, num(1.0)),
            true
        )
    );
}

#[test]
fn test_computed_member_rejects_closing_bracket() {
    let error = parse_source("a[b]").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::CloseCurly,
            found: "]".to_string(),
            message: "expected `}` to close the computed member access".to_string(),
        }
    );
}

#[test]
fn test_member_property_must_be_identifier() {
    let error = parse_source("a.1").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::MalformedConstruct);
    assert_eq!(
        error.get_error(),
        &ErrorImpl::NonIdentifierMember {
            found: ExprType::NumericLiteral
        }
    );
    assert_eq!(error.get_position().0, 2);
}

#[test]
fn test_string_literal() {
    assert_eq!(single_expr("\"hello\""), Expr::string("hello"));
}

#[test]
fn test_unrecognised_primary() {
    let error = parse_source("let x = )").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnrecognisedPrimary);
    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnrecognisedPrimary {
            token: ")".to_string()
        }
    );
}

#[test]
fn test_unclosed_parenthesis() {
    let error = parse_source("(1 + 2").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::CloseParen,
            found: "end of input".to_string(),
            message: "unexpected token found inside the parentheses".to_string(),
        }
    );
    assert_eq!(error.get_position().0, 6);
}

#[test]
fn test_rejects_tokens_without_eof() {
    let mut tokens = tokenize("a".to_string(), None).unwrap();
    tokens.pop();

    let error = parse(&tokens).unwrap_err();
    assert_eq!(error.get_error(), &ErrorImpl::MissingEndOfInput);

    let error = parse(&[]).unwrap_err();
    assert_eq!(error.get_error(), &ErrorImpl::MissingEndOfInput);
}

#[test]
fn test_rejects_eof_before_the_last_token() {
    let mut tokens = tokenize("a b".to_string(), None).unwrap();
    let eof = tokens[tokens.len() - 1].clone();
    tokens.insert(1, eof);

    let error = parse(&tokens).unwrap_err();
    assert_eq!(error.get_error(), &ErrorImpl::MisplacedEndOfInput);
    assert_eq!(error.kind(), ErrorKind::UnexpectedToken);
    assert_eq!(error.get_position().0, 3);
}

#[test]
fn test_each_parse_starts_fresh() {
    let tokens = tokenize("a + 1".to_string(), None).unwrap();

    let first = parse(&tokens).unwrap();
    let second = parse(&tokens).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_cursor_stops_at_eof() {
    let tokens = tokenize("x".to_string(), None).unwrap();
    let mut parser = Parser::new(&tokens, ParseOptions::default()).unwrap();

    assert_eq!(parser.advance().kind, TokenKind::Identifier);
    assert!(!parser.has_tokens());
    assert_eq!(parser.advance().kind, TokenKind::EOF);
    assert_eq!(parser.current_token_kind(), TokenKind::EOF);
}

#[test]
fn test_cursor_expect() {
    let tokens = tokenize("x = 1".to_string(), None).unwrap();
    let mut parser = Parser::new(&tokens, ParseOptions::default()).unwrap();

    assert_eq!(
        parser
            .expect_error(TokenKind::Identifier, "expected a name")
            .unwrap()
            .value,
        "x"
    );
    let error = parser
        .expect_error(TokenKind::Number, "expected a number")
        .unwrap_err();
    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Number,
            found: "=".to_string(),
            message: "expected a number".to_string(),
        }
    );
}
