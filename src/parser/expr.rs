use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryOperator, Property},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

type LevelHandler = fn(&mut Parser<'_>) -> Result<Expr, Error>;

const ADDITIVE_OPERATORS: &[(TokenKind, BinaryOperator)] = &[
    (TokenKind::Plus, BinaryOperator::Add),
    (TokenKind::Dash, BinaryOperator::Subtract),
];

const MULTIPLICATIVE_OPERATORS: &[(TokenKind, BinaryOperator)] = &[
    (TokenKind::Star, BinaryOperator::Multiply),
    (TokenKind::Slash, BinaryOperator::Divide),
    (TokenKind::Percent, BinaryOperator::Modulo),
];

pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_assignment_expr(parser)
}

/// `assignee = value`, right-associative. Any expression is accepted on the
/// left.
pub fn parse_assignment_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let assignee = parse_object_expr(parser)?;

    if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        let value = parse_assignment_expr(parser)?;
        return Ok(Expr::assignment(assignee, value));
    }

    Ok(assignee)
}

pub fn parse_object_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // { key, key: value }
    if parser.current_token_kind() != TokenKind::OpenCurly {
        return parse_additive_expr(parser);
    }

    parser.advance();
    let mut properties = Vec::new();

    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        let key = parser
            .expect_error(TokenKind::Identifier, "expected a property name inside the object")?
            .value
            .clone();

        // Shorthand, either followed by more properties or closing the object
        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
                properties.push(Property::shorthand(key));
                continue;
            }
            TokenKind::CloseCurly => {
                properties.push(Property::shorthand(key));
                continue;
            }
            _ => {}
        }

        parser.expect_error(TokenKind::Colon, format!("expected `:` after `{}`", key))?;
        let value = parse_expr(parser)?;
        properties.push(Property::new(key, value));

        if parser.current_token_kind() != TokenKind::CloseCurly {
            parser.expect_error(
                TokenKind::Comma,
                "expected `,` or a closing `}` after the property",
            )?;
        }
    }

    parser.expect_error(TokenKind::CloseCurly, "the object is never closed")?;
    Ok(Expr::object(properties))
}

pub fn parse_additive_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_level(parser, ADDITIVE_OPERATORS, parse_multiplicative_expr)
}

pub fn parse_multiplicative_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_level(parser, MULTIPLICATIVE_OPERATORS, parse_call_member_expr)
}

/// Left-associative fold of `operand (op operand)*` for the given operators.
fn parse_binary_level(
    parser: &mut Parser,
    operators: &[(TokenKind, BinaryOperator)],
    operand: LevelHandler,
) -> Result<Expr, Error> {
    let mut left = operand(parser)?;

    while let Some(operator) = operator_at(parser, operators) {
        parser.advance();
        let right = operand(parser)?;
        left = Expr::binary(left, operator, right);
    }

    Ok(left)
}

fn operator_at(
    parser: &Parser,
    operators: &[(TokenKind, BinaryOperator)],
) -> Option<BinaryOperator> {
    let current = parser.current_token_kind();
    operators
        .iter()
        .find(|(kind, _)| *kind == current)
        .map(|(_, operator)| *operator)
}

pub fn parse_call_member_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let member = parse_member_expr(parser)?;

    if parser.current_token_kind() == TokenKind::OpenParen {
        return parse_call_expr(parser, member);
    }

    Ok(member)
}

/// `callee(args)`, re-wrapped for every directly following argument list.
pub fn parse_call_expr(parser: &mut Parser, callee: Expr) -> Result<Expr, Error> {
    let mut call = Expr::call(callee, parse_args(parser)?);

    if parser.current_token_kind() == TokenKind::OpenParen {
        call = parse_call_expr(parser, call)?;
    }

    Ok(call)
}

/// A parenthesised, comma-separated argument list.
pub fn parse_args(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    parser.expect_error(TokenKind::OpenParen, "missing `(`")?;

    let args = if parser.current_token_kind() == TokenKind::CloseParen {
        vec![]
    } else {
        parse_arguments_list(parser)?
    };

    parser.expect_error(TokenKind::CloseParen, "missing `)`")?;
    Ok(args)
}

fn parse_arguments_list(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut args = vec![parse_assignment_expr(parser)?];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        args.push(parse_assignment_expr(parser)?);
    }

    Ok(args)
}

pub fn parse_member_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut object = parse_primary_expr(parser)?;

    loop {
        match parser.current_token_kind() {
            TokenKind::Dot => {
                parser.advance();
                let position = parser.get_position();
                let property = parse_primary_expr(parser)?;

                if property.as_identifier().is_none() {
                    return Err(Error::new(
                        ErrorImpl::NonIdentifierMember {
                            found: property.get_expr_type(),
                        },
                        position,
                    ));
                }

                object = Expr::member(object, property, false);
            }
            TokenKind::OpenBracket => {
                parser.advance();
                let property = parse_expr(parser)?;
                // Computed access is closed by `}`, not `]`.
                parser.expect_error(
                    TokenKind::CloseCurly,
                    "expected `}` to close the computed member access",
                )?;

                object = Expr::member(object, property, true);
            }
            _ => return Ok(object),
        }
    }
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Identifier => Ok(Expr::identifier(parser.advance().value.clone())),
        TokenKind::Number => {
            let position = parser.get_position();
            let token = parser.advance();

            match token.value.parse::<f64>() {
                Ok(value) => Ok(Expr::numeric(value)),
                Err(_) => Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    position,
                )),
            }
        }
        TokenKind::String => Ok(Expr::string(parser.advance().value.clone())),
        TokenKind::OpenParen => {
            parser.advance();
            let value = parse_expr(parser)?;
            parser.expect_error(
                TokenKind::CloseParen,
                "unexpected token found inside the parentheses",
            )?;
            Ok(value)
        }
        _ => Err(Error::new(
            ErrorImpl::UnrecognisedPrimary {
                token: parser.current_token().describe(),
            },
            parser.get_position(),
        )),
    }
}
