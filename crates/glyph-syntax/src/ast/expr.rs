//! Typed AST nodes for statements and expressions, grounded on
//! `snow-parser::ast::expr`. Most accessors locate a child by position
//! rather than by a distinguishing marker token, mirroring the grammar in
//! [`crate::parser::expressions`]: e.g. a `BINARY_OPERATOR_EXPR`'s two
//! operand children are its first and second `Expr`-castable nodes, with
//! the `Operator` token itself recovered separately.

use super::{ast_node, child_node, child_nodes, AstNode};
use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

fn nth_expr(parent: &SyntaxNode, n: usize) -> Option<Expr> {
    parent.children().filter_map(Expr::cast).nth(n)
}

fn first_token_of(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent.children_with_tokens().filter_map(|it| it.into_token()).find(|t| t.kind() == kind)
}

fn first_name_token(parent: &SyntaxNode) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| matches!(t.kind(), SyntaxKind::VARIABLE | SyntaxKind::IDENTIFIER))
}

// ── Block and statements ──

ast_node!(Block, BLOCK);

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.syntax.children().filter_map(Stmt::cast)
    }
}

#[derive(Debug, Clone)]
pub enum Stmt {
    ExprStatement(ExprStatement),
    ReturnStmt(ReturnStmt),
    RaiseStmt(RaiseStmt),
    SuperinitializerStmt(SuperinitializerStmt),
    IfStmt(IfStmt),
    RepeatWhileStmt(RepeatWhileStmt),
    ForInStmt(ForInStmt),
    ErrorHandlerStmt(ErrorHandlerStmt),
    VariableDeclarationStmt(VariableDeclarationStmt),
    VariableAssignmentStmt(VariableAssignmentStmt),
    InstanceVariableAssignmentStmt(InstanceVariableAssignmentStmt),
    FrozenDeclarationStmt(FrozenDeclarationStmt),
}

impl Stmt {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::EXPR_STATEMENT => Some(Stmt::ExprStatement(ExprStatement { syntax: node })),
            SyntaxKind::RETURN_STMT => Some(Stmt::ReturnStmt(ReturnStmt { syntax: node })),
            SyntaxKind::RAISE_STMT => Some(Stmt::RaiseStmt(RaiseStmt { syntax: node })),
            SyntaxKind::SUPERINITIALIZER_STMT => Some(Stmt::SuperinitializerStmt(SuperinitializerStmt { syntax: node })),
            SyntaxKind::IF_STMT => Some(Stmt::IfStmt(IfStmt { syntax: node })),
            SyntaxKind::REPEAT_WHILE_STMT => Some(Stmt::RepeatWhileStmt(RepeatWhileStmt { syntax: node })),
            SyntaxKind::FOR_IN_STMT => Some(Stmt::ForInStmt(ForInStmt { syntax: node })),
            SyntaxKind::ERROR_HANDLER_STMT => Some(Stmt::ErrorHandlerStmt(ErrorHandlerStmt { syntax: node })),
            SyntaxKind::VARIABLE_DECLARATION_STMT => {
                Some(Stmt::VariableDeclarationStmt(VariableDeclarationStmt { syntax: node }))
            }
            SyntaxKind::VARIABLE_ASSIGNMENT_STMT => {
                Some(Stmt::VariableAssignmentStmt(VariableAssignmentStmt { syntax: node }))
            }
            SyntaxKind::INSTANCE_VARIABLE_ASSIGNMENT_STMT => {
                Some(Stmt::InstanceVariableAssignmentStmt(InstanceVariableAssignmentStmt { syntax: node }))
            }
            SyntaxKind::FROZEN_DECLARATION_STMT => {
                Some(Stmt::FrozenDeclarationStmt(FrozenDeclarationStmt { syntax: node }))
            }
            _ => None,
        }
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Stmt::ExprStatement(n) => &n.syntax,
            Stmt::ReturnStmt(n) => &n.syntax,
            Stmt::RaiseStmt(n) => &n.syntax,
            Stmt::SuperinitializerStmt(n) => &n.syntax,
            Stmt::IfStmt(n) => &n.syntax,
            Stmt::RepeatWhileStmt(n) => &n.syntax,
            Stmt::ForInStmt(n) => &n.syntax,
            Stmt::ErrorHandlerStmt(n) => &n.syntax,
            Stmt::VariableDeclarationStmt(n) => &n.syntax,
            Stmt::VariableAssignmentStmt(n) => &n.syntax,
            Stmt::InstanceVariableAssignmentStmt(n) => &n.syntax,
            Stmt::FrozenDeclarationStmt(n) => &n.syntax,
        }
    }
}

ast_node!(ExprStatement, EXPR_STATEMENT);

impl ExprStatement {
    pub fn expr(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }
}

ast_node!(ReturnStmt, RETURN_STMT);

impl ReturnStmt {
    pub fn value(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }
}

ast_node!(RaiseStmt, RAISE_STMT);

impl RaiseStmt {
    pub fn value(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }
}

ast_node!(SuperinitializerStmt, SUPERINITIALIZER_STMT);

impl SuperinitializerStmt {
    pub fn initializer_name(&self) -> Option<SyntaxToken> {
        first_token_of(&self.syntax, SyntaxKind::IDENTIFIER)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        child_node(&self.syntax)
    }
}

ast_node!(IfStmt, IF_STMT);

impl IfStmt {
    pub fn condition(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }

    pub fn then_block(&self) -> Option<Block> {
        child_node(&self.syntax)
    }

    pub fn else_if_clauses(&self) -> impl Iterator<Item = ElseIfClause> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn else_clause(&self) -> Option<ElseClause> {
        child_node(&self.syntax)
    }
}

ast_node!(ElseIfClause, ELSE_IF_CLAUSE);

impl ElseIfClause {
    pub fn condition(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }

    pub fn block(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

ast_node!(ElseClause, ELSE_CLAUSE);

impl ElseClause {
    pub fn block(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

ast_node!(RepeatWhileStmt, REPEAT_WHILE_STMT);

impl RepeatWhileStmt {
    pub fn condition(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }

    pub fn block(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

ast_node!(ForInStmt, FOR_IN_STMT);

impl ForInStmt {
    pub fn variable_name(&self) -> Option<SyntaxToken> {
        first_name_token(&self.syntax)
    }

    pub fn iterable(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }

    pub fn block(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

ast_node!(ErrorHandlerStmt, ERROR_HANDLER_STMT);

impl ErrorHandlerStmt {
    pub fn variable_name(&self) -> Option<SyntaxToken> {
        first_name_token(&self.syntax)
    }

    pub fn fallible_expr(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }

    pub fn block(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

ast_node!(VariableDeclarationStmt, VARIABLE_DECLARATION_STMT);

impl VariableDeclarationStmt {
    pub fn var_type(&self) -> Option<super::TypeRef> {
        child_node(&self.syntax)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        first_name_token(&self.syntax)
    }
}

ast_node!(VariableAssignmentStmt, VARIABLE_ASSIGNMENT_STMT);

impl VariableAssignmentStmt {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_name_token(&self.syntax)
    }

    pub fn value(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }
}

ast_node!(InstanceVariableAssignmentStmt, INSTANCE_VARIABLE_ASSIGNMENT_STMT);

impl InstanceVariableAssignmentStmt {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_name_token(&self.syntax)
    }

    pub fn value(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }
}

ast_node!(FrozenDeclarationStmt, FROZEN_DECLARATION_STMT);

impl FrozenDeclarationStmt {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_name_token(&self.syntax)
    }

    pub fn value(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }
}

// ── Expressions ──

ast_node!(ArgList, ARG_LIST);

impl ArgList {
    pub fn generic_args(&self) -> impl Iterator<Item = super::TypeRef> + '_ {
        self.syntax
            .children()
            .find(|n| n.kind() == SyntaxKind::GENERIC_ARG_LIST)
            .into_iter()
            .flat_map(|n| child_nodes::<super::TypeRef>(&n))
    }

    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        self.syntax.children().filter_map(Expr::cast)
    }
}

ast_node!(IntegerLiteral, INTEGER_LITERAL);
ast_node!(DoubleLiteral, DOUBLE_LITERAL);
ast_node!(SymbolLiteral, SYMBOL_LITERAL);
ast_node!(StringLiteral, STRING_LITERAL);
ast_node!(TrueLiteral, TRUE_LITERAL);
ast_node!(FalseLiteral, FALSE_LITERAL);
ast_node!(NothingnessLiteral, NOTHINGNESS_LITERAL);
ast_node!(ThisExpr, THIS_EXPR);

impl IntegerLiteral {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.syntax.first_token()
    }
}

impl DoubleLiteral {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.syntax.first_token()
    }
}

impl SymbolLiteral {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.syntax.first_token()
    }
}

impl StringLiteral {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.syntax.first_token()
    }
}

ast_node!(InterpolatedString, INTERPOLATED_STRING);

impl InterpolatedString {
    pub fn segments(&self) -> impl Iterator<Item = Expr> + '_ {
        self.syntax.children().filter_map(Expr::cast)
    }
}

ast_node!(GetVariableExpr, GET_VARIABLE_EXPR);

impl GetVariableExpr {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_name_token(&self.syntax)
    }
}

ast_node!(GroupExpr, GROUP_EXPR);

impl GroupExpr {
    pub fn inner(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }
}

ast_node!(BinaryOperatorExpr, BINARY_OPERATOR_EXPR);

impl BinaryOperatorExpr {
    pub fn lhs(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }

    pub fn operator(&self) -> Option<SyntaxToken> {
        first_token_of(&self.syntax, SyntaxKind::OPERATOR)
    }

    pub fn rhs(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 1)
    }
}

ast_node!(MethodExpr, METHOD_EXPR);

impl MethodExpr {
    pub fn receiver(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::VARIABLE | SyntaxKind::IDENTIFIER))
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        child_node(&self.syntax)
    }
}

ast_node!(CallableCallExpr, CALLABLE_CALL_EXPR);

impl CallableCallExpr {
    pub fn callee(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        child_node(&self.syntax)
    }
}

ast_node!(TypeMethodExpr, TYPE_METHOD_EXPR);

impl TypeMethodExpr {
    pub fn callee_type(&self) -> Option<super::TypeRef> {
        child_node(&self.syntax)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        self.syntax.children_with_tokens().filter_map(|it| it.into_token()).find(|t| t.kind() == SyntaxKind::IDENTIFIER)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        child_node(&self.syntax)
    }
}

ast_node!(SuperMethodExpr, SUPER_METHOD_EXPR);

impl SuperMethodExpr {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token_of(&self.syntax, SyntaxKind::IDENTIFIER)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        child_node(&self.syntax)
    }
}

ast_node!(InitializationExpr, INITIALIZATION_EXPR);

impl InitializationExpr {
    pub fn init_type(&self) -> Option<super::TypeRef> {
        child_node(&self.syntax)
    }

    pub fn initializer_name(&self) -> Option<SyntaxToken> {
        first_token_of(&self.syntax, SyntaxKind::IDENTIFIER)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        child_node(&self.syntax)
    }
}

ast_node!(CaptureMethodExpr, CAPTURE_METHOD_EXPR);
ast_node!(CaptureTypeMethodExpr, CAPTURE_TYPE_METHOD_EXPR);

impl CaptureTypeMethodExpr {
    pub fn captured_type(&self) -> Option<super::TypeRef> {
        child_node(&self.syntax)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        first_token_of(&self.syntax, SyntaxKind::IDENTIFIER)
    }
}

ast_node!(ClosureExpr, CLOSURE_EXPR);

impl ClosureExpr {
    pub fn params(&self) -> Vec<SyntaxToken> {
        let Some(list) = self.syntax.children().find(|n| n.kind() == SyntaxKind::PARAM_LIST) else {
            return Vec::new();
        };
        list.children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| t.kind() == SyntaxKind::VARIABLE)
            .collect()
    }

    pub fn return_type(&self) -> Option<super::TypeRef> {
        child_node(&self.syntax)
    }

    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.syntax.children().filter_map(Stmt::cast)
    }
}

ast_node!(IsNothingnessExpr, IS_NOTHINGNESS_EXPR);
ast_node!(IsErrorExpr, IS_ERROR_EXPR);
ast_node!(UnwrapExpr, UNWRAP_EXPR);
ast_node!(MetaTypeFromInstanceExpr, META_TYPE_FROM_INSTANCE_EXPR);

impl IsNothingnessExpr {
    pub fn operand(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }
}

impl IsErrorExpr {
    pub fn operand(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }
}

impl UnwrapExpr {
    pub fn operand(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }
}

impl MetaTypeFromInstanceExpr {
    pub fn operand(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }
}

ast_node!(CastExpr, CAST_EXPR);

impl CastExpr {
    pub fn target_type(&self) -> Option<super::TypeRef> {
        child_node(&self.syntax)
    }

    pub fn operand(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }
}

ast_node!(MetaTypeInstantiationExpr, META_TYPE_INSTANTIATION_EXPR);

impl MetaTypeInstantiationExpr {
    pub fn instantiated_type(&self) -> Option<super::TypeRef> {
        child_node(&self.syntax)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        child_node(&self.syntax)
    }
}

ast_node!(ConditionalAssignmentExpr, CONDITIONAL_ASSIGNMENT_EXPR);

impl ConditionalAssignmentExpr {
    pub fn lhs(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }

    pub fn rhs(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 1)
    }
}

ast_node!(ConcatenateExpr, CONCATENATE_EXPR);

impl ConcatenateExpr {
    pub fn parts(&self) -> impl Iterator<Item = Expr> + '_ {
        self.syntax.children().filter_map(Expr::cast)
    }
}

ast_node!(ListLiteral, LIST_LITERAL);

impl ListLiteral {
    pub fn elements(&self) -> impl Iterator<Item = Expr> + '_ {
        self.syntax.children().filter_map(Expr::cast)
    }
}

ast_node!(DictionaryLiteral, DICTIONARY_LITERAL);

impl DictionaryLiteral {
    pub fn entries(&self) -> impl Iterator<Item = DictionaryEntry> + '_ {
        child_nodes(&self.syntax)
    }
}

ast_node!(DictionaryEntry, DICTIONARY_ENTRY);

impl DictionaryEntry {
    pub fn key(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 0)
    }

    pub fn value(&self) -> Option<Expr> {
        nth_expr(&self.syntax, 1)
    }
}

/// Any expression node.
#[derive(Debug, Clone)]
pub enum Expr {
    IntegerLiteral(IntegerLiteral),
    DoubleLiteral(DoubleLiteral),
    SymbolLiteral(SymbolLiteral),
    StringLiteral(StringLiteral),
    InterpolatedString(InterpolatedString),
    TrueLiteral(TrueLiteral),
    FalseLiteral(FalseLiteral),
    NothingnessLiteral(NothingnessLiteral),
    ThisExpr(ThisExpr),
    GetVariableExpr(GetVariableExpr),
    GroupExpr(GroupExpr),
    BinaryOperatorExpr(BinaryOperatorExpr),
    MethodExpr(MethodExpr),
    CallableCallExpr(CallableCallExpr),
    TypeMethodExpr(TypeMethodExpr),
    SuperMethodExpr(SuperMethodExpr),
    InitializationExpr(InitializationExpr),
    CaptureMethodExpr(CaptureMethodExpr),
    CaptureTypeMethodExpr(CaptureTypeMethodExpr),
    ClosureExpr(ClosureExpr),
    IsNothingnessExpr(IsNothingnessExpr),
    IsErrorExpr(IsErrorExpr),
    UnwrapExpr(UnwrapExpr),
    MetaTypeFromInstanceExpr(MetaTypeFromInstanceExpr),
    CastExpr(CastExpr),
    MetaTypeInstantiationExpr(MetaTypeInstantiationExpr),
    ConditionalAssignmentExpr(ConditionalAssignmentExpr),
    ConcatenateExpr(ConcatenateExpr),
    ListLiteral(ListLiteral),
    DictionaryLiteral(DictionaryLiteral),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::INTEGER_LITERAL => Some(Expr::IntegerLiteral(IntegerLiteral { syntax: node })),
            SyntaxKind::DOUBLE_LITERAL => Some(Expr::DoubleLiteral(DoubleLiteral { syntax: node })),
            SyntaxKind::SYMBOL_LITERAL => Some(Expr::SymbolLiteral(SymbolLiteral { syntax: node })),
            SyntaxKind::STRING_LITERAL => Some(Expr::StringLiteral(StringLiteral { syntax: node })),
            SyntaxKind::INTERPOLATED_STRING => Some(Expr::InterpolatedString(InterpolatedString { syntax: node })),
            SyntaxKind::TRUE_LITERAL => Some(Expr::TrueLiteral(TrueLiteral { syntax: node })),
            SyntaxKind::FALSE_LITERAL => Some(Expr::FalseLiteral(FalseLiteral { syntax: node })),
            SyntaxKind::NOTHINGNESS_LITERAL => Some(Expr::NothingnessLiteral(NothingnessLiteral { syntax: node })),
            SyntaxKind::THIS_EXPR => Some(Expr::ThisExpr(ThisExpr { syntax: node })),
            SyntaxKind::GET_VARIABLE_EXPR => Some(Expr::GetVariableExpr(GetVariableExpr { syntax: node })),
            SyntaxKind::GROUP_EXPR => Some(Expr::GroupExpr(GroupExpr { syntax: node })),
            SyntaxKind::BINARY_OPERATOR_EXPR => Some(Expr::BinaryOperatorExpr(BinaryOperatorExpr { syntax: node })),
            SyntaxKind::METHOD_EXPR => Some(Expr::MethodExpr(MethodExpr { syntax: node })),
            SyntaxKind::CALLABLE_CALL_EXPR => Some(Expr::CallableCallExpr(CallableCallExpr { syntax: node })),
            SyntaxKind::TYPE_METHOD_EXPR => Some(Expr::TypeMethodExpr(TypeMethodExpr { syntax: node })),
            SyntaxKind::SUPER_METHOD_EXPR => Some(Expr::SuperMethodExpr(SuperMethodExpr { syntax: node })),
            SyntaxKind::INITIALIZATION_EXPR => Some(Expr::InitializationExpr(InitializationExpr { syntax: node })),
            SyntaxKind::CAPTURE_METHOD_EXPR => Some(Expr::CaptureMethodExpr(CaptureMethodExpr { syntax: node })),
            SyntaxKind::CAPTURE_TYPE_METHOD_EXPR => {
                Some(Expr::CaptureTypeMethodExpr(CaptureTypeMethodExpr { syntax: node }))
            }
            SyntaxKind::CLOSURE_EXPR => Some(Expr::ClosureExpr(ClosureExpr { syntax: node })),
            SyntaxKind::IS_NOTHINGNESS_EXPR => Some(Expr::IsNothingnessExpr(IsNothingnessExpr { syntax: node })),
            SyntaxKind::IS_ERROR_EXPR => Some(Expr::IsErrorExpr(IsErrorExpr { syntax: node })),
            SyntaxKind::UNWRAP_EXPR => Some(Expr::UnwrapExpr(UnwrapExpr { syntax: node })),
            SyntaxKind::META_TYPE_FROM_INSTANCE_EXPR => {
                Some(Expr::MetaTypeFromInstanceExpr(MetaTypeFromInstanceExpr { syntax: node }))
            }
            SyntaxKind::CAST_EXPR => Some(Expr::CastExpr(CastExpr { syntax: node })),
            SyntaxKind::META_TYPE_INSTANTIATION_EXPR => {
                Some(Expr::MetaTypeInstantiationExpr(MetaTypeInstantiationExpr { syntax: node }))
            }
            SyntaxKind::CONDITIONAL_ASSIGNMENT_EXPR => {
                Some(Expr::ConditionalAssignmentExpr(ConditionalAssignmentExpr { syntax: node }))
            }
            SyntaxKind::CONCATENATE_EXPR => Some(Expr::ConcatenateExpr(ConcatenateExpr { syntax: node })),
            SyntaxKind::LIST_LITERAL => Some(Expr::ListLiteral(ListLiteral { syntax: node })),
            SyntaxKind::DICTIONARY_LITERAL => Some(Expr::DictionaryLiteral(DictionaryLiteral { syntax: node })),
            _ => None,
        }
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Expr::IntegerLiteral(n) => &n.syntax,
            Expr::DoubleLiteral(n) => &n.syntax,
            Expr::SymbolLiteral(n) => &n.syntax,
            Expr::StringLiteral(n) => &n.syntax,
            Expr::InterpolatedString(n) => &n.syntax,
            Expr::TrueLiteral(n) => &n.syntax,
            Expr::FalseLiteral(n) => &n.syntax,
            Expr::NothingnessLiteral(n) => &n.syntax,
            Expr::ThisExpr(n) => &n.syntax,
            Expr::GetVariableExpr(n) => &n.syntax,
            Expr::GroupExpr(n) => &n.syntax,
            Expr::BinaryOperatorExpr(n) => &n.syntax,
            Expr::MethodExpr(n) => &n.syntax,
            Expr::CallableCallExpr(n) => &n.syntax,
            Expr::TypeMethodExpr(n) => &n.syntax,
            Expr::SuperMethodExpr(n) => &n.syntax,
            Expr::InitializationExpr(n) => &n.syntax,
            Expr::CaptureMethodExpr(n) => &n.syntax,
            Expr::CaptureTypeMethodExpr(n) => &n.syntax,
            Expr::ClosureExpr(n) => &n.syntax,
            Expr::IsNothingnessExpr(n) => &n.syntax,
            Expr::IsErrorExpr(n) => &n.syntax,
            Expr::UnwrapExpr(n) => &n.syntax,
            Expr::MetaTypeFromInstanceExpr(n) => &n.syntax,
            Expr::CastExpr(n) => &n.syntax,
            Expr::MetaTypeInstantiationExpr(n) => &n.syntax,
            Expr::ConditionalAssignmentExpr(n) => &n.syntax,
            Expr::ConcatenateExpr(n) => &n.syntax,
            Expr::ListLiteral(n) => &n.syntax,
            Expr::DictionaryLiteral(n) => &n.syntax,
        }
    }
}

#[cfg(test)]
mod tests {
    use glyph_common::FileTable;

    use super::*;

    #[test]
    fn block_exposes_typed_statements() {
        let table = FileTable::new();
        let file = table.intern("test.glyph");
        let parsed = crate::parse("🐇Animal🍇legs➡Integer🍇🍎0🍉🍉", file);
        assert!(parsed.ok(), "{:?}", parsed.errors);
        let doc = parsed.document();
        let class = doc.classes().next().expect("class");
        let method = class.body().expect("body").methods().next().expect("method");
        let block = method.body().expect("block");
        let stmt = block.statements().next().expect("stmt");
        assert!(matches!(stmt, Stmt::ReturnStmt(_)));
    }
}
