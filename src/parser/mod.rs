//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that turns a token
//! stream into a `Program`. It handles:
//!
//! - Statement dispatch (variable declarations, function declarations,
//!   bare expressions)
//! - Function declaration detection without a dedicated keyword
//! - Expression parsing by precedence climbing, one function per level
//! - Fail-fast error reporting: the first error ends the parse
//!
//! Expression levels, lowest to highest precedence: assignment, object
//! literal, additive, multiplicative, call, member access, primary.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
