use tracing::debug;

use crate::{
    ast::{
        ast::{Expr, Stmt},
        statements::{FunctionDeclaration, VarDeclaration},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_args, parse_expr},
    lookups::starts_function_declaration,
    parser::Parser,
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if starts_function_declaration(parser) {
        return parse_fn_declaration(parser);
    }

    match parser.current_token_kind() {
        TokenKind::Let | TokenKind::Const => parse_var_declaration(parser),
        _ => Ok(Stmt::Expression(parse_expr(parser)?)),
    }
}

// [async] name(a, b) { ... }
pub fn parse_fn_declaration(parser: &mut Parser) -> Result<Stmt, Error> {
    let current = parser.current_token();
    let is_async = current.kind == TokenKind::Identifier && current.value == "async";
    if is_async {
        parser.advance();
    }

    let name = parser
        .expect_error(
            TokenKind::Identifier,
            "expected a function name, shaped like name(parameters) { ... }",
        )?
        .value
        .clone();

    let parameters_position = parser.get_position();
    let mut parameters = Vec::new();
    for argument in parse_args(parser)? {
        match argument {
            Expr::Identifier(identifier) => parameters.push(identifier.name),
            other => {
                return Err(Error::new(
                    ErrorImpl::NonIdentifierParameter {
                        function: name,
                        found: other.get_expr_type(),
                    },
                    parameters_position,
                ))
            }
        }
    }

    parser.expect_error(
        TokenKind::OpenCurly,
        format!("expected `{{` to open the body of `{}`", name),
    )?;

    let mut body = Vec::new();
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        body.push(parse_stmt(parser)?);
    }

    parser.expect_error(
        TokenKind::CloseCurly,
        format!("expected `}}` to close the body of `{}`", name),
    )?;

    debug!(%name, parameters = parameters.len(), is_async, "parsed function declaration");

    Ok(Stmt::FunctionDeclaration(FunctionDeclaration {
        name,
        parameters,
        body,
        is_async,
    }))
}

// let name
// (let | const) name = expr
pub fn parse_var_declaration(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.advance();
    let is_constant = start_token.kind == TokenKind::Const;

    let identifier = parser
        .expect_error(
            TokenKind::Identifier,
            format!("expected a name after `{}`", start_token.value),
        )?
        .value
        .clone();

    if !parser.has_tokens() {
        if is_constant {
            return Err(Error::new(
                ErrorImpl::MissingConstInitializer { identifier },
                parser.get_position(),
            ));
        }

        return Ok(Stmt::VarDeclaration(VarDeclaration {
            identifier,
            constant: false,
            value: None,
        }));
    }

    parser.expect_error(
        TokenKind::Assignment,
        format!("expected `=` after `{}`", identifier),
    )?;
    let value = parse_expr(parser)?;

    Ok(Stmt::VarDeclaration(VarDeclaration {
        identifier,
        constant: is_constant,
        value: Some(value),
    }))
}
