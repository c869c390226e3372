use std::fmt::Display;

use thiserror::Error;

use crate::{ast::ast::ExprType, lexer::tokens::TokenKind, Position};

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} at {position}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// Broad classes of failure. Every class is fatal to the current parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The tokenizer could not split the source.
    Lexical,
    /// A required token was missing or of the wrong kind.
    UnexpectedToken,
    /// Well-formed tokens arranged into an invalid construct.
    MalformedConstruct,
    /// The current token cannot start an expression.
    UnrecognisedPrimary,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } | ErrorImpl::InvalidEscape { .. } => {
                ErrorKind::Lexical
            }
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::MissingEndOfInput
            | ErrorImpl::MisplacedEndOfInput => ErrorKind::UnexpectedToken,
            ErrorImpl::NumberParseError { .. }
            | ErrorImpl::NonIdentifierParameter { .. }
            | ErrorImpl::NonIdentifierMember { .. }
            | ErrorImpl::MissingConstInitializer { .. } => ErrorKind::MalformedConstruct,
            ErrorImpl::UnrecognisedPrimary { .. } => ErrorKind::UnrecognisedPrimary,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::MissingEndOfInput => "MissingEndOfInput",
            ErrorImpl::MisplacedEndOfInput => "MisplacedEndOfInput",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NonIdentifierParameter { .. } => "NonIdentifierParameter",
            ErrorImpl::NonIdentifierMember { .. } => "NonIdentifierMember",
            ErrorImpl::MissingConstInitializer { .. } => "MissingConstInitializer",
            ErrorImpl::UnrecognisedPrimary { .. } => "UnrecognisedPrimary",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::InvalidEscape { sequence } => ErrorTip::Suggestion(format!(
                "Invalid escape `{}`, `\\x` takes exactly two hex digits",
                sequence
            )),
            ErrorImpl::UnexpectedToken {
                expected,
                found,
                message,
            } => ErrorTip::Suggestion(format!(
                "{}: expected {}, found `{}`",
                message, expected, found
            )),
            ErrorImpl::MissingEndOfInput => ErrorTip::None,
            ErrorImpl::MisplacedEndOfInput => ErrorTip::Suggestion(
                "Only the last token may be `EOF`, tokens after it would be dropped".to_string(),
            ),
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::NonIdentifierParameter { function, found } => {
                ErrorTip::Suggestion(format!(
                    "Parameters of `{}` must be plain names, found {:?}",
                    function, found
                ))
            }
            ErrorImpl::NonIdentifierMember { found } => ErrorTip::Suggestion(format!(
                "The right side of `.` must be a name, found {:?}",
                found
            )),
            ErrorImpl::MissingConstInitializer { identifier } => ErrorTip::Suggestion(format!(
                "Constant `{}` must be given a value, e.g. `const {} = ...`",
                identifier, identifier
            )),
            ErrorImpl::UnrecognisedPrimary { token } => ErrorTip::Suggestion(format!(
                "`{}` cannot start an expression",
                token
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("invalid escape sequence: {sequence:?}")]
    InvalidEscape { sequence: String },
    #[error("unexpected token ({message}): expected {expected}, found {found:?}")]
    UnexpectedToken {
        expected: TokenKind,
        found: String,
        message: String,
    },
    #[error("token stream does not end with EOF")]
    MissingEndOfInput,
    #[error("EOF appears before the last token")]
    MisplacedEndOfInput,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("parameters of function {function:?} must be identifiers, found {found:?}")]
    NonIdentifierParameter { function: String, found: ExprType },
    #[error("right side of `.` must be an identifier, found {found:?}")]
    NonIdentifierMember { found: ExprType },
    #[error("constant {identifier:?} declared without a value")]
    MissingConstInitializer { identifier: String },
    #[error("unexpected token found: {token:?}")]
    UnrecognisedPrimary { token: String },
}
