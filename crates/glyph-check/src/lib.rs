//! Semantic analysis front-end for the glyph compiler:
//! lowers a parsed `glyph_syntax` document into a typed semantic AST, loads
//! and links packages, and type-checks every function, inserting boxing
//! conversions and dispatch/override metadata along the way.

pub mod analyser;
pub mod boxing;
pub mod error;
pub mod function;
pub mod lower;
pub mod package;
pub mod path_analysis;
pub mod scope;
pub mod semantic_ast;

pub use analyser::SemanticAnalyser;
pub use error::{AccessErrorKind, CompileError, InitErrorKind, PackageErrorKind, ScopeErrorKind, TypeErrorKind};
pub use function::{AccessLevel, Function, FunctionArena, FunctionId, FunctionType, Parameter};
pub use lower::{Lowerer, TypeResolver};
pub use package::{Application, FilesystemPackageSource, InMemoryPackageSource, Package, PackageSource};
pub use path_analysis::{Incident, PathAnalyser};
pub use scope::{CaptureDescriptor, CapturingScoper, Scoper, Variable};
pub use semantic_ast::{DispatchMode, Expr, ExprKind, Stmt, StmtKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiling_a_minimal_class_produces_no_diagnostics() {
        let mut app = Application::new();
        let mut source = InMemoryPackageSource::new();
        source.insert("main", "main/header.glyph", "🐇Animal🍇🐖legs➡🔢🍇🍎0🍉🍉🍉");

        app.compile("main", &source).unwrap();
        assert!(!app.sink.has_errors(), "{:?}", app.sink.iter().map(|d| &d.message).collect::<Vec<_>>());
        assert_eq!(app.defs.len(), 1);
    }
}
