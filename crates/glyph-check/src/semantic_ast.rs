//! The arena-indexed, typed semantic AST that the
//! [`crate::lower::Lowerer`] produces from `glyph_syntax`'s lossless CST.
//! Every expression carries its resolved [`Type`] plus a permanently-`None`
//! `flow_category` hook reserved for a future back-end's memory-flow
//! analysis -- this front-end never populates it.

use glyph_common::{SourcePosition, Symbol};
use glyph_types::Type;

use crate::boxing::BoxingNode;

/// One semantic expression: a position, a resolved type, the back-end
/// extension hook, and the expression's own shape.
#[derive(Clone, Debug)]
pub struct Expr {
    pub position: SourcePosition,
    pub expression_type: Type,
    /// Reserved memory-flow-analysis hook. Always `None` in this
    /// front-end; a back-end crate would populate it.
    pub flow_category: Option<()>,
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(position: SourcePosition, kind: ExprKind) -> Self {
        Expr { position, expression_type: Type::storage_expectation(), flow_category: None, kind }
    }

    pub fn with_type(mut self, ty: Type) -> Self {
        self.expression_type = ty;
        self
    }
}

#[derive(Clone, Debug)]
pub enum ExprKind {
    IntegerLiteral(i64),
    DoubleLiteral(f64),
    SymbolLiteral(char),
    StringLiteral(String),
    InterpolatedString(Vec<Expr>),
    BooleanLiteral(bool),
    NothingnessLiteral,
    This,
    GetVariable(Symbol),
    GetInstanceVariable(Symbol),
    Binary { lhs: Box<Expr>, operator: Symbol, rhs: Box<Expr> },
    MethodCall { receiver: Box<Expr>, name: Symbol, generic_args: Vec<Type>, args: Vec<Expr>, dispatch: DispatchMode },
    CallableCall { callee: Box<Expr>, args: Vec<Expr> },
    TypeMethodCall { callee_type: Type, name: Symbol, generic_args: Vec<Type>, args: Vec<Expr> },
    SuperMethodCall { name: Symbol, args: Vec<Expr> },
    Initialization { init_type: Type, initializer_name: Symbol, args: Vec<Expr> },
    CaptureMethod { name: Symbol },
    CaptureTypeMethod { captured_type: Type, name: Symbol },
    Closure { params: Vec<Symbol>, body: Vec<Stmt>, captures: Vec<crate::scope::CaptureDescriptor>, captured_self: bool },
    IsNothingness(Box<Expr>),
    IsError(Box<Expr>),
    Unwrap(Box<Expr>),
    MetaTypeFromInstance(Box<Expr>),
    Cast { target_type: Type, operand: Box<Expr> },
    MetaTypeInstantiation { instantiated_type: Type, args: Vec<Expr> },
    ConditionalAssignment { lhs: Box<Expr>, rhs: Box<Expr> },
    Concatenate(Vec<Expr>),
    ListLiteral(Vec<Expr>),
    DictionaryLiteral(Vec<(Expr, Expr)>),
    /// A boxing-insertion wrapper. Its own
    /// `expression_type` is the post-conversion storage form.
    Boxing(BoxingNode),
    /// Marker the lowerer leaves behind for a syntax shape not yet resolved
    /// (e.g. a name lookup not yet classified as variable/instance
    /// variable/type). The semantic analyser replaces these during
    /// type-checking; invariant 8.1.1 asserts none survive.
    Unresolved,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DispatchMode {
    StaticContextless,
    Dynamic,
    Protocol,
    Super,
}

#[derive(Clone, Debug)]
pub struct Stmt {
    pub position: SourcePosition,
    pub kind: StmtKind,
}

impl Stmt {
    pub fn new(position: SourcePosition, kind: StmtKind) -> Self {
        Stmt { position, kind }
    }
}

#[derive(Clone, Debug)]
pub enum StmtKind {
    Expr(Expr),
    Return(Option<Expr>),
    Raise(Expr),
    Superinitializer { name: Symbol, args: Vec<Expr> },
    If { condition: Expr, then_block: Vec<Stmt>, else_if_clauses: Vec<(Expr, Vec<Stmt>)>, else_block: Option<Vec<Stmt>> },
    RepeatWhile { condition: Expr, body: Vec<Stmt> },
    ForIn { variable: Symbol, iterable: Expr, body: Vec<Stmt> },
    ErrorHandler { variable: Symbol, fallible: Expr, body: Vec<Stmt> },
    VariableDeclaration { name: Symbol, declared_type: Option<Type> },
    VariableAssignment { name: Symbol, value: Expr },
    InstanceVariableAssignment { name: Symbol, value: Expr },
    FrozenDeclaration { name: Symbol, value: Expr },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expr_starts_with_storage_expectation_and_no_flow_category() {
        let pool = glyph_common::StringPool::new();
        let table = glyph_common::FileTable::new();
        let file = table.intern("a.glyph");
        let pos = glyph_common::SourcePosition::new(1, 0, file);
        let e = Expr::new(pos, ExprKind::GetVariable(pool.intern("x")));
        assert_eq!(e.expression_type.kind, Type::storage_expectation().kind);
        assert!(e.flow_category.is_none());
    }
}
