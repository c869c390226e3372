use std::fmt::Display;

use super::ast::{Expr, Stmt};

/// `let name`, `let name = value` or `const name = value`.
///
/// `value` is only absent for a `let` that ends the input.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclaration {
    pub identifier: String,
    pub constant: bool,
    pub value: Option<Expr>,
}

impl Display for VarDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keyword = if self.constant { "const" } else { "let" };
        match &self.value {
            Some(value) => write!(f, "{} {} = {}", keyword, self.identifier, value),
            None => write!(f, "{} {}", keyword, self.identifier),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
}

impl FunctionDeclaration {
    /// The declaration with `body` as its already rendered statements.
    pub fn render_with_body(&self, body: &[String]) -> String {
        let modifier = if self.is_async { "async " } else { "" };
        let header = format!("{}{}({}) {{", modifier, self.name, self.parameters.join(", "));

        if body.is_empty() {
            return header + "}";
        }

        let mut text = header + "\n";
        for line in body.iter().flat_map(|stmt| stmt.lines()) {
            text.push_str("  ");
            text.push_str(line);
            text.push('\n');
        }
        text + "}"
    }
}

impl Display for FunctionDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body: Vec<String> = self.body.iter().map(|stmt| stmt.to_string()).collect();
        write!(f, "{}", self.render_with_body(&body))
    }
}
