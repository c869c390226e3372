/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Program` root and the `Stmt` / `Expr` sum types
/// - expressions: Definitions for the expression nodes
/// - statements: Definitions for the declaration nodes
///
/// Every node implements `Display`, rendering source text that parses back
/// into the same tree.
pub mod ast;
pub mod expressions;
pub mod statements;
