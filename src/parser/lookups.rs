//! Lookahead deciding whether a statement is a function declaration.
//!
//! The language has no `function` keyword, so a declaration is told apart
//! from an ordinary call by the tokens that follow. Neither check consumes
//! tokens.

use tracing::debug;

use crate::lexer::tokens::{Token, TokenKind};

use super::parser::Parser;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FunctionDetection {
    /// The statement starts with an identifier, and somewhere in the rest of
    /// the input there is a `(` and a `{` directly preceded by `)`.
    ///
    /// The scan covers the whole remaining input, so a later declaration
    /// makes any statement starting with a name parse as one.
    #[default]
    ForwardScan,
    /// The statement itself has the shape `[async] name ( ... ) {`.
    Anchored,
}

/// Levels of the expression ladder, loosest first.
///
/// An expression printed where a tighter level is required has to be
/// grouped in parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BindingPower {
    Assignment,
    Object,
    Additive,
    Multiplicative,
    Call,
    Member,
    Primary,
}

impl BindingPower {
    /// The level directly above this one.
    pub fn tighter(self) -> BindingPower {
        match self {
            BindingPower::Assignment => BindingPower::Object,
            BindingPower::Object => BindingPower::Additive,
            BindingPower::Additive => BindingPower::Multiplicative,
            BindingPower::Multiplicative => BindingPower::Call,
            BindingPower::Call => BindingPower::Member,
            BindingPower::Member | BindingPower::Primary => BindingPower::Primary,
        }
    }
}

pub fn starts_function_declaration(parser: &Parser) -> bool {
    let detected = detects_function(parser.options().function_detection, parser.remaining());

    if detected {
        debug!(name = %parser.current_token().value, "function declaration detected");
    }
    detected
}

/// Whether a statement starting at `tokens[0]` is a function declaration.
pub fn detects_function(detection: FunctionDetection, tokens: &[Token]) -> bool {
    match detection {
        FunctionDetection::ForwardScan => forward_scan(tokens),
        FunctionDetection::Anchored => anchored(tokens),
    }
}

fn forward_scan(tokens: &[Token]) -> bool {
    let Some(first) = tokens.first() else {
        return false;
    };

    first.kind == TokenKind::Identifier
        && tokens.iter().any(|token| token.kind == TokenKind::OpenParen)
        && tokens
            .windows(2)
            .any(|pair| pair[0].kind == TokenKind::CloseParen && pair[1].kind == TokenKind::OpenCurly)
}

fn anchored(tokens: &[Token]) -> bool {
    let kind_at = |index: usize| tokens.get(index).map(|token| token.kind);

    let mut index = 0;
    // `async` is always taken as the modifier, never as the name.
    if tokens
        .first()
        .is_some_and(|token| token.kind == TokenKind::Identifier && token.value == "async")
    {
        index += 1;
    }

    if kind_at(index) != Some(TokenKind::Identifier) {
        return false;
    }
    index += 1;

    if kind_at(index) != Some(TokenKind::OpenParen) {
        return false;
    }

    let mut depth = 0usize;
    while let Some(kind) = kind_at(index) {
        match kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen => {
                depth -= 1;
                if depth == 0 {
                    return kind_at(index + 1) == Some(TokenKind::OpenCurly);
                }
            }
            TokenKind::EOF => return false,
            _ => {}
        }
        index += 1;
    }

    false
}
