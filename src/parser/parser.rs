//! Parser state and entry points.
//!
//! The parser borrows an immutable token slice and walks it with an
//! explicit index. A new `Parser` is built for every call to `parse`, so no
//! state is shared between parses.

use tracing::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{lookups::FunctionDetection, stmt::parse_stmt};

/// Knobs controlling how a parse behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// How a statement is recognised as a function declaration.
    pub function_detection: FunctionDetection,
}

/// The main parser structure that maintains parsing state.
pub struct Parser<'a> {
    /// The tokens to parse; always ends with `EOF`
    tokens: &'a [Token],
    /// Index of the current token
    pos: usize,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned at the first token.
    ///
    /// Fails unless `tokens` holds exactly one `EOF` sentinel, as its last
    /// token. Every loop in the parser relies on it to terminate.
    pub fn new(tokens: &'a [Token], options: ParseOptions) -> Result<Self, Error> {
        let body = tokens.split_last().map(|(_, body)| body).unwrap_or_default();
        if let Some(early) = body.iter().find(|token| token.kind == TokenKind::EOF) {
            return Err(Error::new(
                ErrorImpl::MisplacedEndOfInput,
                early.span.start.clone(),
            ));
        }

        match tokens.last() {
            Some(last) if last.kind == TokenKind::EOF => Ok(Parser {
                tokens,
                pos: 0,
                options,
            }),
            Some(last) => Err(Error::new(
                ErrorImpl::MissingEndOfInput,
                last.span.end.clone(),
            )),
            None => Err(Error::new(ErrorImpl::MissingEndOfInput, Position::null())),
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &'a Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// The unconsumed tokens, starting with the current one.
    pub fn remaining(&self) -> &'a [Token] {
        &self.tokens[self.pos..]
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// The cursor never moves past `EOF`.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current_token();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        trace!(kind = ?token.kind, value = %token.value, "consumed");
        token
    }

    /// Consumes the current token, failing with `message` unless it is of
    /// `expected_kind`.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        message: impl Into<String>,
    ) -> Result<&'a Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: token.describe(),
                    message: message.into(),
                },
                token.span.start.clone(),
            ));
        }

        Ok(self.advance())
    }

    /// Returns true while the current token is not `EOF`.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }
}

/// Parses a token stream with the default options.
pub fn parse(tokens: &[Token]) -> Result<Program, Error> {
    parse_with_options(tokens, ParseOptions::default())
}

/// Parses every statement until `EOF` into a `Program`.
///
/// The first error aborts the parse; no partial program is returned.
pub fn parse_with_options(tokens: &[Token], options: ParseOptions) -> Result<Program, Error> {
    let mut parser = Parser::new(tokens, options)?;
    debug!(
        tokens = tokens.len(),
        detection = ?options.function_detection,
        "parsing program"
    );

    let mut body = vec![];

    while parser.has_tokens() {
        body.push(parse_stmt(&mut parser)?);
    }

    debug!(statements = body.len(), "parsed program");
    Ok(Program { body })
}
