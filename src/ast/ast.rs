use std::fmt::Display;

use crate::{
    lexer::{lexer::tokenize, tokens::Token},
    parser::lookups::{detects_function, BindingPower, FunctionDetection},
};

use super::{
    expressions::{
        AssignmentExpr, BinaryExpr, BinaryOperator, CallExpr, Identifier, MemberExpr,
        NumericLiteral, ObjectLiteral, Property, StringLiteral,
    },
    statements::{FunctionDeclaration, VarDeclaration},
};

/// Root of a parsed source. Statements are kept in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    /// Source text that parses back into this program under `detection`.
    ///
    /// Statements are written one per line. An expression statement that
    /// would be taken for a function declaration is grouped in parentheses.
    pub fn render(&self, detection: FunctionDetection) -> String {
        render_block(&self.body, &[], detection)
            .into_iter()
            .map(|line| line + "\n")
            .collect()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(FunctionDetection::default()))
    }
}

/// Renders `stmts` back to front, since detection looks at what follows a
/// statement. `rest` holds the tokens printed after the block.
fn render_block(stmts: &[Stmt], rest: &[Token], detection: FunctionDetection) -> Vec<String> {
    let mut following = rest.to_vec();
    let mut lines = Vec::with_capacity(stmts.len());

    for stmt in stmts.iter().rev() {
        let text = render_stmt(stmt, &following, detection);
        following = [token_shape(&text), following].concat();
        lines.push(text);
    }

    lines.reverse();
    lines
}

fn render_stmt(stmt: &Stmt, following: &[Token], detection: FunctionDetection) -> String {
    match stmt {
        Stmt::FunctionDeclaration(decl) => {
            let closing = [token_shape("}"), following.to_vec()].concat();
            let body = render_block(&decl.body, &closing, detection);
            decl.render_with_body(&body)
        }
        Stmt::Expression(expr) => {
            let text = expr.to_string();
            let tokens = [token_shape(&text), following.to_vec()].concat();
            if detects_function(detection, &tokens) {
                format!("({})", text)
            } else {
                text
            }
        }
        Stmt::VarDeclaration(decl) => decl.to_string(),
    }
}

/// Tokens of printed text, without the `EOF` sentinel.
fn token_shape(text: &str) -> Vec<Token> {
    match tokenize(text.to_string(), None) {
        Ok(mut tokens) => {
            tokens.pop();
            tokens
        }
        Err(_) => vec![],
    }
}

/// Statement Types
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StmtType {
    VarDeclaration,
    FunctionDeclaration,
    ExpressionStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDeclaration(VarDeclaration),
    FunctionDeclaration(FunctionDeclaration),
    /// A bare expression used as a statement.
    Expression(Expr),
}

impl Stmt {
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::VarDeclaration(_) => StmtType::VarDeclaration,
            Stmt::FunctionDeclaration(_) => StmtType::FunctionDeclaration,
            Stmt::Expression(_) => StmtType::ExpressionStmt,
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::VarDeclaration(decl) => write!(f, "{}", decl),
            Stmt::FunctionDeclaration(decl) => write!(f, "{}", decl),
            Stmt::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

/// Expression Types
///
/// Field-less tag for each expression kind, used in diagnostics.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    AssignmentExpr,
    BinaryExpr,
    ObjectLiteral,
    CallExpr,
    MemberExpr,
    Identifier,
    NumericLiteral,
    StringLiteral,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Assignment(AssignmentExpr),
    Binary(BinaryExpr),
    Object(ObjectLiteral),
    Call(CallExpr),
    Member(MemberExpr),
    Identifier(Identifier),
    Numeric(NumericLiteral),
    String(StringLiteral),
}

impl Expr {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Assignment(_) => ExprType::AssignmentExpr,
            Expr::Binary(_) => ExprType::BinaryExpr,
            Expr::Object(_) => ExprType::ObjectLiteral,
            Expr::Call(_) => ExprType::CallExpr,
            Expr::Member(_) => ExprType::MemberExpr,
            Expr::Identifier(_) => ExprType::Identifier,
            Expr::Numeric(_) => ExprType::NumericLiteral,
            Expr::String(_) => ExprType::StringLiteral,
        }
    }

    /// The name, if this is a bare identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expr::Identifier(identifier) => Some(&identifier.name),
            _ => None,
        }
    }

    pub fn binding_power(&self) -> BindingPower {
        match self {
            Expr::Assignment(_) => BindingPower::Assignment,
            Expr::Object(_) => BindingPower::Object,
            Expr::Binary(expr) => expr.operator.binding_power(),
            Expr::Call(_) => BindingPower::Call,
            Expr::Member(_) => BindingPower::Member,
            Expr::Identifier(_) | Expr::Numeric(_) | Expr::String(_) => BindingPower::Primary,
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier(Identifier { name: name.into() })
    }

    pub fn numeric(value: f64) -> Self {
        Expr::Numeric(NumericLiteral { value })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::String(StringLiteral {
            value: value.into(),
        })
    }

    pub fn binary(left: Expr, operator: BinaryOperator, right: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            left: Box::new(left),
            right: Box::new(right),
            operator,
        })
    }

    pub fn assignment(assignee: Expr, value: Expr) -> Self {
        Expr::Assignment(AssignmentExpr {
            assignee: Box::new(assignee),
            value: Box::new(value),
        })
    }

    pub fn object(properties: Vec<Property>) -> Self {
        Expr::Object(ObjectLiteral { properties })
    }

    pub fn call(callee: Expr, arguments: Vec<Expr>) -> Self {
        Expr::Call(CallExpr {
            callee: Box::new(callee),
            arguments,
        })
    }

    pub fn member(object: Expr, property: Expr, computed: bool) -> Self {
        Expr::Member(MemberExpr {
            object: Box::new(object),
            property: Box::new(property),
            computed,
        })
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Assignment(expr) => write!(f, "{}", expr),
            Expr::Binary(expr) => write!(f, "{}", expr),
            Expr::Object(expr) => write!(f, "{}", expr),
            Expr::Call(expr) => write!(f, "{}", expr),
            Expr::Member(expr) => write!(f, "{}", expr),
            Expr::Identifier(expr) => write!(f, "{}", expr),
            Expr::Numeric(expr) => write!(f, "{}", expr),
            Expr::String(expr) => write!(f, "{}", expr),
        }
    }
}
