//! Error types and error handling.
//!
//! This module defines the error types used by the tokenizer and the
//! parser. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each failure
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
