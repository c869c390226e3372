use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("const", TokenKind::Const);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =

    Dot,
    Colon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Let,
    Const,
}

impl TokenKind {
    /// The fixed source text of a punctuation or keyword kind, if it has one.
    pub fn lexeme(&self) -> Option<&'static str> {
        match self {
            TokenKind::OpenBracket => Some("["),
            TokenKind::CloseBracket => Some("]"),
            TokenKind::OpenCurly => Some("{"),
            TokenKind::CloseCurly => Some("}"),
            TokenKind::OpenParen => Some("("),
            TokenKind::CloseParen => Some(")"),
            TokenKind::Assignment => Some("="),
            TokenKind::Dot => Some("."),
            TokenKind::Colon => Some(":"),
            TokenKind::Comma => Some(","),
            TokenKind::Plus => Some("+"),
            TokenKind::Dash => Some("-"),
            TokenKind::Slash => Some("/"),
            TokenKind::Star => Some("*"),
            TokenKind::Percent => Some("%"),
            TokenKind::Let => Some("let"),
            TokenKind::Const => Some("const"),
            TokenKind::EOF | TokenKind::Number | TokenKind::String | TokenKind::Identifier => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.lexeme() {
            Some(lexeme) => write!(f, "`{}`", lexeme),
            None => write!(f, "{:?}", self),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Text used when the token shows up in a diagnostic.
    pub fn describe(&self) -> String {
        if self.is_one_of_many(&[TokenKind::String, TokenKind::Identifier, TokenKind::Number]) {
            format!("{} ({})", self.kind, self.value)
        } else if self.kind == TokenKind::EOF {
            String::from("end of input")
        } else {
            self.value.clone()
        }
    }
}
