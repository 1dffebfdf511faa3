//! `Lowerer`: walks the typed AST wrappers of a parsed document
//! and produces, per type definition, a [`TypeDefinition`] arena entry, and
//! per function body, a semantic [`Stmt`]/[`Expr`] tree whose expressions all
//! initially carry `Type::StorageExpectation`. Lowering performs no type
//! checking -- it only reshapes grammar productions into the data model of
//! §3.6, resolving identifiers syntactically (name strings, not yet symbol
//! references) while preserving every `SourcePosition`.

use rustc_hash::FxHashMap;

use glyph_common::{FileId, LineIndex, SourcePosition, StringPool, Symbol};
use glyph_syntax::ast::{self, AstNode};
use glyph_syntax::cst::SyntaxNode;
use glyph_types::{DefArena, DefKind, GenericParameter, InstanceVariableSlot, Type, TypeDefId};

use crate::function::{FunctionArena, FunctionType, Parameter};
use crate::semantic_ast::{Expr, ExprKind, Stmt, StmtKind};

/// Resolves a syntax-level [`ast::TypeRef`] into a [`glyph_types::Type`]
/// given the set of type names declared so far in the application.
pub struct TypeResolver<'a> {
    pub names: &'a FxHashMap<Symbol, TypeDefId>,
    pub pool: &'a StringPool,
}

impl<'a> TypeResolver<'a> {
    pub fn resolve(&self, type_ref: &ast::TypeRef) -> Type {
        match type_ref {
            ast::TypeRef::Nominal(n) => {
                let name = n.name().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("?"));
                let args: Vec<Type> = n.generic_args().map(|a| self.resolve(&a)).collect();
                match self.names.get(&name) {
                    Some(id) => Type::class(*id, args),
                    None => Type::something(),
                }
            }
            ast::TypeRef::Optional(o) => {
                let inner = o.inner().map(|t| self.resolve(&t)).unwrap_or_else(Type::something);
                Type::optional(inner).unwrap_or_else(Type::something)
            }
            ast::TypeRef::Meta(m) => {
                let inner = m.inner().map(|t| self.resolve(&t)).unwrap_or_else(Type::something);
                Type::type_as_value(inner)
            }
            ast::TypeRef::Error(e) => {
                let enum_ty = e.error_enum().map(|t| self.resolve(&t)).unwrap_or_else(Type::something);
                let success_ty = e.success_type().map(|t| self.resolve(&t)).unwrap_or_else(Type::something);
                Type::error(enum_ty, success_ty)
            }
            ast::TypeRef::MultiProtocol(m) => Type::multi_protocol(m.protocols().map(|t| self.resolve(&t)).collect()),
            ast::TypeRef::Callable(c) => {
                let params = c.param_types().map(|t| self.resolve(&t)).collect();
                let ret = c.return_type().map(|t| self.resolve(&t)).unwrap_or_else(Type::something);
                Type::callable(params, ret)
            }
        }
    }
}

pub struct Lowerer<'a> {
    pub defs: &'a mut DefArena,
    pub functions: &'a mut FunctionArena,
    pub pool: &'a StringPool,
    pub type_names: FxHashMap<Symbol, TypeDefId>,
    line_index: LineIndex,
    file: FileId,
}

impl<'a> Lowerer<'a> {
    pub fn new(source: &str, file: FileId, defs: &'a mut DefArena, functions: &'a mut FunctionArena, pool: &'a StringPool) -> Self {
        Lowerer { defs, functions, pool, type_names: FxHashMap::default(), line_index: LineIndex::new(source), file }
    }

    fn position(&self, node: &SyntaxNode) -> SourcePosition {
        let offset: u32 = node.text_range().start().into();
        let (line, character) = self.line_index.line_col(offset);
        SourcePosition::new(line, character, self.file)
    }

    /// Pass 1: registers every nominal type's
    /// name and kind so forward references (a class referencing a sibling
    /// declared later) resolve during pass 2.
    pub fn register_names(&mut self, doc: &ast::Document) {
        for c in doc.classes() {
            if let Some(tok) = c.name() {
                let id = self.defs.insert(DefKind::Class, self.pool.intern(tok.text()));
                self.type_names.insert(self.pool.intern(tok.text()), id);
            }
        }
        for v in doc.value_types() {
            if let Some(tok) = v.name() {
                let id = self.defs.insert(DefKind::ValueType, self.pool.intern(tok.text()));
                self.type_names.insert(self.pool.intern(tok.text()), id);
            }
        }
        for p in doc.protocols() {
            if let Some(tok) = p.name() {
                let id = self.defs.insert(DefKind::Protocol, self.pool.intern(tok.text()));
                self.type_names.insert(self.pool.intern(tok.text()), id);
            }
        }
        for e in doc.enums() {
            if let Some(tok) = e.name() {
                let id = self.defs.insert(DefKind::Enum, self.pool.intern(tok.text()));
                self.type_names.insert(self.pool.intern(tok.text()), id);
            }
        }
    }

    fn resolver(&self) -> TypeResolver<'_> {
        TypeResolver { names: &self.type_names, pool: self.pool }
    }

    /// Pass 2: fills in each registered definition's shape and lowers every
    /// member's body.
    pub fn lower_document(&mut self, doc: &ast::Document) {
        for c in doc.classes() {
            let Some(tok) = c.name() else { continue };
            let id = self.type_names[&self.pool.intern(tok.text())];
            if let Some(supertype) = c.supertype_clause().and_then(|s| s.supertype()) {
                let super_ty = self.resolver().resolve(&supertype);
                self.defs.get_mut(id).superclass = Some(super_ty);
            }
            self.lower_generic_params(id, c.generic_params());
            if let Some(body) = c.body() {
                self.lower_body(id, &body);
            }
        }
        for v in doc.value_types() {
            let Some(tok) = v.name() else { continue };
            let id = self.type_names[&self.pool.intern(tok.text())];
            self.lower_generic_params(id, v.generic_params());
            if let Some(body) = v.body() {
                self.lower_body(id, &body);
            }
        }
        for p in doc.protocols() {
            let Some(tok) = p.name() else { continue };
            let id = self.type_names[&self.pool.intern(tok.text())];
            self.lower_generic_params(id, p.generic_params());
            if let Some(body) = p.body() {
                self.lower_body(id, &body);
            }
        }
        for e in doc.enums() {
            let Some(tok) = e.name() else { continue };
            let id = self.type_names[&self.pool.intern(tok.text())];
            if let Some(body) = e.body() {
                for value in body.enum_values() {
                    if let Some(name_tok) = value.name() {
                        self.defs.get_mut(id).enum_values.push(self.pool.intern(name_tok.text()));
                    }
                }
                self.lower_body(id, &body);
            }
        }
        for ext in doc.extensions() {
            let Some(type_ref) = ext.extended_type() else { continue };
            let extended = self.resolver().resolve(&type_ref);
            let owner_id = match &extended.kind {
                glyph_types::TypeKind::Class(id, _) | glyph_types::TypeKind::ValueType(id, _) => Some(*id),
                _ => None,
            };
            if let Some(id) = owner_id {
                if let Some(body) = ext.body() {
                    self.lower_body(id, &body);
                }
            }
        }
    }

    fn lower_generic_params(&mut self, id: TypeDefId, list: Option<ast::GenericParamList>) {
        let Some(list) = list else { return };
        let names: Vec<Symbol> = list
            .syntax()
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| matches!(t.kind(), glyph_syntax::SyntaxKind::VARIABLE | glyph_syntax::SyntaxKind::IDENTIFIER))
            .map(|t| self.pool.intern(t.text()))
            .collect();
        let params = names.into_iter().map(|name| GenericParameter::new(name, None)).collect();
        self.defs.get_mut(id).generic_parameters = params;
    }

    fn lower_body(&mut self, owner: TypeDefId, body: &ast::Body) {
        for iv in body.instance_variables() {
            let Some(name_tok) = iv.name() else { continue };
            let ty = iv.var_type().map(|t| self.resolver().resolve(&t)).unwrap_or_else(Type::something);
            self.defs.get_mut(owner).instance_variables.push(InstanceVariableSlot { name: self.pool.intern(name_tok.text()), ty });
        }
        for m in body.methods() {
            self.lower_method(owner, &m);
        }
        for tm in body.type_methods() {
            self.lower_type_method(owner, &tm);
        }
        for init in body.initializers() {
            self.lower_initializer(owner, &init);
        }
    }

    fn lower_params(&self, list: Option<ast::ParamList>) -> Vec<Parameter> {
        let Some(list) = list else { return Vec::new() };
        list.params()
            .map(|p| Parameter {
                name: p.name().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("_")),
                ty: p.param_type().map(|t| self.resolver().resolve(&t)).unwrap_or_else(Type::something),
                auto_assigned: p.is_auto_assigned(),
            })
            .collect()
    }

    fn lower_method(&mut self, owner: TypeDefId, m: &ast::MethodDef) {
        let Some(name_tok) = m.name() else { return };
        let id = self.functions.insert(self.pool.intern(name_tok.text()), FunctionType::Method);
        let f = self.functions.get_mut(id);
        f.owning_type = Some(owner);
        f.params = self.lower_params(m.param_list());
        f.return_type = m.return_clause().and_then(|c| c.return_type()).map(|t| self.resolver().resolve(&t)).unwrap_or_else(Type::something);
        f.error_type = m.error_clause().and_then(|c| c.error_type()).map(|t| self.resolver().resolve(&t));
        let body = m.body().map(|b| self.lower_block(&b)).unwrap_or_default();
        self.functions.get_mut(id).body = body;
    }

    fn lower_type_method(&mut self, owner: TypeDefId, m: &ast::TypeMethodDef) {
        let Some(name_tok) = m.name() else { return };
        let id = self.functions.insert(self.pool.intern(name_tok.text()), FunctionType::TypeMethod);
        let f = self.functions.get_mut(id);
        f.owning_type = Some(owner);
        f.params = self.lower_params(m.param_list());
        f.return_type = m.return_clause().and_then(|c| c.return_type()).map(|t| self.resolver().resolve(&t)).unwrap_or_else(Type::something);
        let body = m.body().map(|b| self.lower_block(&b)).unwrap_or_default();
        self.functions.get_mut(id).body = body;
    }

    fn lower_initializer(&mut self, owner: TypeDefId, init: &ast::InitializerDef) {
        let Some(name_tok) = init.initializer_name() else { return };
        let id = self.functions.insert(self.pool.intern(name_tok.text()), FunctionType::Initializer);
        let f = self.functions.get_mut(id);
        f.owning_type = Some(owner);
        f.params = self.lower_params(init.param_list());
        f.error_type = init.error_clause().and_then(|c| c.error_type()).map(|t| self.resolver().resolve(&t));
        let body = init.body().map(|b| self.lower_block(&b)).unwrap_or_default();
        self.functions.get_mut(id).body = body;
    }

    pub fn lower_block(&self, block: &ast::Block) -> Vec<Stmt> {
        block.statements().map(|s| self.lower_stmt(&s)).collect()
    }

    fn lower_stmt(&self, stmt: &ast::Stmt) -> Stmt {
        match stmt {
            ast::Stmt::ExprStatement(s) => {
                let pos = self.position(s.syntax());
                let expr = s.expr().map(|e| self.lower_expr(&e)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved));
                Stmt::new(pos, StmtKind::Expr(expr))
            }
            ast::Stmt::ReturnStmt(s) => {
                let pos = self.position(s.syntax());
                Stmt::new(pos, StmtKind::Return(s.value().map(|e| self.lower_expr(&e))))
            }
            ast::Stmt::RaiseStmt(s) => {
                let pos = self.position(s.syntax());
                let value = s.value().map(|e| self.lower_expr(&e)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved));
                Stmt::new(pos, StmtKind::Raise(value))
            }
            ast::Stmt::SuperinitializerStmt(s) => {
                let pos = self.position(s.syntax());
                let name = s.initializer_name().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("?"));
                let args = s.arg_list().map(|l| l.args().map(|e| self.lower_expr(&e)).collect()).unwrap_or_default();
                Stmt::new(pos, StmtKind::Superinitializer { name, args })
            }
            ast::Stmt::IfStmt(s) => {
                let pos = self.position(s.syntax());
                let condition = s.condition().map(|e| self.lower_expr(&e)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved));
                let then_block = s.then_block().map(|b| self.lower_block(&b)).unwrap_or_default();
                let else_if_clauses = s
                    .else_if_clauses()
                    .map(|c| {
                        let cond = c.condition().map(|e| self.lower_expr(&e)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved));
                        let block = c.block().map(|b| self.lower_block(&b)).unwrap_or_default();
                        (cond, block)
                    })
                    .collect();
                let else_block = s.else_clause().and_then(|c| c.block()).map(|b| self.lower_block(&b));
                Stmt::new(pos, StmtKind::If { condition, then_block, else_if_clauses, else_block })
            }
            ast::Stmt::RepeatWhileStmt(s) => {
                let pos = self.position(s.syntax());
                let condition = s.condition().map(|e| self.lower_expr(&e)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved));
                let body = s.block().map(|b| self.lower_block(&b)).unwrap_or_default();
                Stmt::new(pos, StmtKind::RepeatWhile { condition, body })
            }
            ast::Stmt::ForInStmt(s) => {
                let pos = self.position(s.syntax());
                let variable = s.variable_name().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("?"));
                let iterable = s.iterable().map(|e| self.lower_expr(&e)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved));
                let body = s.block().map(|b| self.lower_block(&b)).unwrap_or_default();
                Stmt::new(pos, StmtKind::ForIn { variable, iterable, body })
            }
            ast::Stmt::ErrorHandlerStmt(s) => {
                let pos = self.position(s.syntax());
                let variable = s.variable_name().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("?"));
                let fallible = s.fallible_expr().map(|e| self.lower_expr(&e)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved));
                let body = s.block().map(|b| self.lower_block(&b)).unwrap_or_default();
                Stmt::new(pos, StmtKind::ErrorHandler { variable, fallible, body })
            }
            ast::Stmt::VariableDeclarationStmt(s) => {
                let pos = self.position(s.syntax());
                let name = s.name().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("?"));
                let declared_type = s.var_type().map(|t| self.resolver().resolve(&t));
                Stmt::new(pos, StmtKind::VariableDeclaration { name, declared_type })
            }
            ast::Stmt::VariableAssignmentStmt(s) => {
                let pos = self.position(s.syntax());
                let name = s.name().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("?"));
                let value = s.value().map(|e| self.lower_expr(&e)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved));
                Stmt::new(pos, StmtKind::VariableAssignment { name, value })
            }
            ast::Stmt::InstanceVariableAssignmentStmt(s) => {
                let pos = self.position(s.syntax());
                let name = s.name().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("?"));
                let value = s.value().map(|e| self.lower_expr(&e)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved));
                Stmt::new(pos, StmtKind::InstanceVariableAssignment { name, value })
            }
            ast::Stmt::FrozenDeclarationStmt(s) => {
                let pos = self.position(s.syntax());
                let name = s.name().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("?"));
                let value = s.value().map(|e| self.lower_expr(&e)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved));
                Stmt::new(pos, StmtKind::FrozenDeclaration { name, value })
            }
        }
    }

    fn lower_expr(&self, expr: &ast::Expr) -> Expr {
        let pos = self.position(expr.syntax());
        let kind = match expr {
            ast::Expr::IntegerLiteral(e) => {
                let text = e.token().map(|t| t.text().to_string()).unwrap_or_default();
                ExprKind::IntegerLiteral(parse_integer_literal(&text))
            }
            ast::Expr::DoubleLiteral(e) => {
                let text = e.token().map(|t| t.text().to_string()).unwrap_or_default();
                ExprKind::DoubleLiteral(text.parse().unwrap_or(0.0))
            }
            ast::Expr::SymbolLiteral(e) => {
                let text = e.token().map(|t| t.text().to_string()).unwrap_or_default();
                ExprKind::SymbolLiteral(text.chars().next().unwrap_or('\0'))
            }
            ast::Expr::StringLiteral(e) => ExprKind::StringLiteral(e.token().map(|t| t.text().to_string()).unwrap_or_default()),
            ast::Expr::InterpolatedString(e) => ExprKind::InterpolatedString(e.segments().map(|s| self.lower_expr(&s)).collect()),
            ast::Expr::TrueLiteral(_) => ExprKind::BooleanLiteral(true),
            ast::Expr::FalseLiteral(_) => ExprKind::BooleanLiteral(false),
            ast::Expr::NothingnessLiteral(_) => ExprKind::NothingnessLiteral,
            ast::Expr::ThisExpr(_) => ExprKind::This,
            ast::Expr::GetVariableExpr(e) => {
                ExprKind::GetVariable(e.name().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("?")))
            }
            ast::Expr::GroupExpr(e) => return e.inner().map(|i| self.lower_expr(&i)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved)),
            ast::Expr::BinaryOperatorExpr(e) => {
                let lhs = Box::new(e.lhs().map(|i| self.lower_expr(&i)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved)));
                let operator = e.operator().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("?"));
                let rhs = Box::new(e.rhs().map(|i| self.lower_expr(&i)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved)));
                ExprKind::Binary { lhs, operator, rhs }
            }
            ast::Expr::MethodExpr(e) => {
                let receiver = Box::new(e.receiver().map(|r| self.lower_expr(&r)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved)));
                let name = e.name().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("?"));
                let (generic_args, args) = self.lower_arg_list(e.arg_list());
                ExprKind::MethodCall { receiver, name, generic_args, args, dispatch: crate::semantic_ast::DispatchMode::Dynamic }
            }
            ast::Expr::CallableCallExpr(e) => {
                let callee = Box::new(e.callee().map(|c| self.lower_expr(&c)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved)));
                let (_, args) = self.lower_arg_list(e.arg_list());
                ExprKind::CallableCall { callee, args }
            }
            ast::Expr::TypeMethodExpr(e) => {
                let callee_type = e.callee_type().map(|t| self.resolver().resolve(&t)).unwrap_or_else(Type::something);
                let name = e.name().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("?"));
                let (generic_args, args) = self.lower_arg_list(e.arg_list());
                ExprKind::TypeMethodCall { callee_type, name, generic_args, args }
            }
            ast::Expr::SuperMethodExpr(e) => {
                let name = e.name().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("?"));
                let (_, args) = self.lower_arg_list(e.arg_list());
                ExprKind::SuperMethodCall { name, args }
            }
            ast::Expr::InitializationExpr(e) => {
                let init_type = e.init_type().map(|t| self.resolver().resolve(&t)).unwrap_or_else(Type::something);
                let initializer_name = e.initializer_name().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("init"));
                let (_, args) = self.lower_arg_list(e.arg_list());
                ExprKind::Initialization { init_type, initializer_name, args }
            }
            ast::Expr::CaptureMethodExpr(_) => ExprKind::CaptureMethod { name: self.pool.intern("?") },
            ast::Expr::CaptureTypeMethodExpr(e) => {
                let captured_type = e.captured_type().map(|t| self.resolver().resolve(&t)).unwrap_or_else(Type::something);
                let name = e.name().map(|t| self.pool.intern(t.text())).unwrap_or_else(|| self.pool.intern("?"));
                ExprKind::CaptureTypeMethod { captured_type, name }
            }
            ast::Expr::ClosureExpr(e) => {
                let params = e.params().iter().map(|t| self.pool.intern(t.text())).collect();
                let body = e.statements().map(|s| self.lower_stmt(&s)).collect();
                ExprKind::Closure { params, body, captures: Vec::new(), captured_self: false }
            }
            ast::Expr::IsNothingnessExpr(e) => {
                ExprKind::IsNothingness(Box::new(e.operand().map(|o| self.lower_expr(&o)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved))))
            }
            ast::Expr::IsErrorExpr(e) => {
                ExprKind::IsError(Box::new(e.operand().map(|o| self.lower_expr(&o)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved))))
            }
            ast::Expr::UnwrapExpr(e) => {
                ExprKind::Unwrap(Box::new(e.operand().map(|o| self.lower_expr(&o)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved))))
            }
            ast::Expr::MetaTypeFromInstanceExpr(e) => ExprKind::MetaTypeFromInstance(Box::new(
                e.operand().map(|o| self.lower_expr(&o)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved)),
            )),
            ast::Expr::CastExpr(e) => {
                let target_type = e.target_type().map(|t| self.resolver().resolve(&t)).unwrap_or_else(Type::something);
                let operand = Box::new(e.operand().map(|o| self.lower_expr(&o)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved)));
                ExprKind::Cast { target_type, operand }
            }
            ast::Expr::MetaTypeInstantiationExpr(e) => {
                let instantiated_type = e.instantiated_type().map(|t| self.resolver().resolve(&t)).unwrap_or_else(Type::something);
                let (_, args) = self.lower_arg_list(e.arg_list());
                ExprKind::MetaTypeInstantiation { instantiated_type, args }
            }
            ast::Expr::ConditionalAssignmentExpr(e) => {
                let lhs = Box::new(e.lhs().map(|l| self.lower_expr(&l)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved)));
                let rhs = Box::new(e.rhs().map(|r| self.lower_expr(&r)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved)));
                ExprKind::ConditionalAssignment { lhs, rhs }
            }
            ast::Expr::ConcatenateExpr(e) => ExprKind::Concatenate(e.parts().map(|p| self.lower_expr(&p)).collect()),
            ast::Expr::ListLiteral(e) => ExprKind::ListLiteral(e.elements().map(|el| self.lower_expr(&el)).collect()),
            ast::Expr::DictionaryLiteral(e) => {
                ExprKind::DictionaryLiteral(e.entries().map(|entry| {
                    let k = entry.key().map(|k| self.lower_expr(&k)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved));
                    let v = entry.value().map(|v| self.lower_expr(&v)).unwrap_or_else(|| Expr::new(pos, ExprKind::Unresolved));
                    (k, v)
                }).collect())
            }
        };
        Expr::new(pos, kind)
    }

    fn lower_arg_list(&self, list: Option<ast::ArgList>) -> (Vec<Type>, Vec<Expr>) {
        match list {
            Some(l) => (l.generic_args().map(|t| self.resolver().resolve(&t)).collect(), l.args().map(|e| self.lower_expr(&e)).collect()),
            None => (Vec::new(), Vec::new()),
        }
    }
}

fn parse_integer_literal(text: &str) -> i64 {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).unwrap_or(0)
    } else {
        text.parse().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_common::FileTable;

    #[test]
    fn lowers_a_minimal_class_with_a_method() {
        let source = "🐇Animal🍇🐖legs➡🔢🍇🍎0🍉🍉🍉";
        let table = FileTable::new();
        let pool = StringPool::new();
        let file = table.intern("a.glyph");
        let parsed = glyph_syntax::parse(source, file);
        assert!(parsed.ok(), "{:?}", parsed.errors);
        let doc = parsed.document();
        let mut defs = DefArena::new();
        let mut functions = FunctionArena::new();
        let mut lowerer = Lowerer::new(source, file, &mut defs, &mut functions, &pool);
        lowerer.register_names(&doc);
        lowerer.lower_document(&doc);
        assert_eq!(defs.len(), 1);
        assert_eq!(functions.len(), 1);
        let f = functions.get(crate::function::FunctionId(0));
        assert_eq!(f.body.len(), 1);
    }
}
