use std::fmt::Display;

use crate::parser::lookups::BindingPower;

use super::ast::Expr;

/// Writes an expression, grouped when it binds looser than its position
/// allows.
struct Operand<'a>(&'a Expr, BindingPower);

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Operand(expr, required) = self;
        if expr.binding_power() < *required {
            write!(f, "({})", expr)
        } else {
            write!(f, "{}", expr)
        }
    }
}

// LITERALS

/// Number Expression
/// Every numeric literal is a 64-bit float.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericLiteral {
    pub value: f64,
}

impl Display for NumericLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// String Expression
/// Holds the unescaped contents, without quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"")?;
        for ch in self.value.chars() {
            match ch {
                '"' => write!(f, "\\\"")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\t' => write!(f, "\\t")?,
                '\r' => write!(f, "\\r")?,
                '\0' => write!(f, "\\0")?,
                _ => write!(f, "{}", ch)?,
            }
        }
        write!(f, "\"")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

// COMPLEX

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    pub fn binding_power(&self) -> BindingPower {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => BindingPower::Additive,
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => {
                BindingPower::Multiplicative
            }
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub operator: BinaryOperator,
}

impl Display for BinaryExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Left-associative: only the right operand needs grouping at the same level.
        let level = self.operator.binding_power();
        write!(
            f,
            "{} {} {}",
            Operand(&self.left, level),
            self.operator,
            Operand(&self.right, level.tighter())
        )
    }
}

/// Assignment Expression
/// `assignee = value`. The assignee is not checked for being assignable.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub assignee: Box<Expr>,
    pub value: Box<Expr>,
}

impl Display for AssignmentExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {}",
            Operand(&self.assignee, BindingPower::Object),
            self.value
        )
    }
}

/// A `key: value` entry, or a shorthand `key` when `value` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Option<Expr>,
}

impl Property {
    pub fn new(key: impl Into<String>, value: Expr) -> Self {
        Property {
            key: key.into(),
            value: Some(value),
        }
    }

    pub fn shorthand(key: impl Into<String>) -> Self {
        Property {
            key: key.into(),
            value: None,
        }
    }
}

impl Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {}", self.key, value),
            None => write!(f, "{}", self.key),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLiteral {
    pub properties: Vec<Property>,
}

impl Display for ObjectLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.properties.is_empty() {
            return write!(f, "{{}}");
        }

        let properties = self
            .properties
            .iter()
            .map(|property| property.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{ {} }}", properties)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
}

impl Display for CallExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arguments = self
            .arguments
            .iter()
            .map(|argument| argument.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        match self.callee.as_ref() {
            Expr::Call(_) => write!(f, "{}({})", self.callee, arguments),
            callee => write!(f, "{}({})", Operand(callee, BindingPower::Member), arguments),
        }
    }
}

/// Member Expression
/// `object.property`, or `object[property}` when computed.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub property: Box<Expr>,
    pub computed: bool,
}

impl Display for MemberExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Member access cannot follow a call without grouping.
        write!(f, "{}", Operand(&self.object, BindingPower::Member))?;

        if self.computed {
            // Computed access is closed by `}`, matching what the parser accepts.
            write!(f, "[{}}}", self.property)
        } else {
            write!(f, ".{}", self.property)
        }
    }
}
