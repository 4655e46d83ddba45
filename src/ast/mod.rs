/// AST (Abstract Syntax Tree) module
///
/// Submodules:
/// - ast: the tree dump (`Serialize`)
/// - expressions: expression nodes, one closed enum per syntactic level
/// - statements: statements and the program root
pub mod ast;
pub mod expressions;
pub mod statements;
