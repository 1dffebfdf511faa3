//! `SemanticAnalyser`: a preparation pass over every
//! [`TypeDefinition`] followed by a per-function walk that type-checks each
//! statement/expression against its expected storage, inserts boxing nodes,
//! resolves method/initializer calls to a concrete [`Function`] and
//! [`DispatchMode`], and validates override/initializer/return completeness.
//! Grounded on `EmojicodeCompiler/Analysis/SemanticAnalyser.cpp`'s two-pass
//! shape: prepare every type definition first, then analyse every function
//! body once all names in the compilation are known.

use glyph_common::{DiagnosticSink, FileId, SourcePosition, StringPool, Symbol};
use glyph_types::{
    is_compatible, resolve_on, storage_of, CommonTypeFinder, DefArena, DefKind, InferenceBindings, InstanceVariableSlot, StorageType,
    Type, TypeContext, TypeDefId, TypeKind,
};

use crate::boxing::{callable_signature_mismatch, insert_boxing, BoxingNode};
use crate::error::{AccessErrorKind, CompileError, InitErrorKind, ScopeErrorKind, TypeErrorKind};
use crate::function::{AccessLevel, FunctionArena, FunctionId, FunctionType, Parameter};
use crate::path_analysis::{Incident, PathAnalyser};
use crate::scope::{CaptureDescriptor, Scoper, Variable};
use crate::semantic_ast::{DispatchMode, Expr, ExprKind, Stmt, StmtKind};

fn typed(pos: SourcePosition, kind: ExprKind, ty: Type) -> Expr {
    Expr::new(pos, kind).with_type(ty)
}

/// Tracks the scope stack, path state, and (when analysing a closure body)
/// the enclosing function's frozen scope plus the capture list being built
/// for it. Reimplements [`crate::scope::CapturingScoper`]'s
/// miss-then-capture behaviour inline rather than wrapping it, since one
/// recursive checker walks both top-level bodies and nested closure bodies
/// and threading a self-referential `CapturingScoper<'a>` through both would
/// need a shared trait for no behavioural gain -- the two are kept
/// deliberately identical (see DESIGN.md).
struct FnContext<'s> {
    scope: Scoper,
    path: PathAnalyser,
    owner: Option<TypeDefId>,
    current_function: FunctionId,
    is_mutating: bool,
    outer: Option<&'s Scoper>,
    captures: Vec<CaptureDescriptor>,
    captured_self: bool,
}

impl<'s> FnContext<'s> {
    fn new(owner: Option<TypeDefId>, current_function: FunctionId, is_mutating: bool) -> Self {
        FnContext { scope: Scoper::new(), path: PathAnalyser::new(), owner, current_function, is_mutating, outer: None, captures: Vec::new(), captured_self: false }
    }

    fn nested(outer: &'s Scoper, owner: Option<TypeDefId>, current_function: FunctionId) -> Self {
        FnContext { scope: Scoper::new(), path: PathAnalyser::new(), owner, current_function, is_mutating: false, outer: Some(outer), captures: Vec::new(), captured_self: false }
    }
}

pub struct SemanticAnalyser<'a> {
    defs: &'a mut DefArena,
    functions: &'a mut FunctionArena,
    pool: &'a StringPool,
    sink: &'a mut DiagnosticSink,
    file: FileId,
    fresh_counter: u32,
}

impl<'a> SemanticAnalyser<'a> {
    pub fn new(defs: &'a mut DefArena, functions: &'a mut FunctionArena, pool: &'a StringPool, sink: &'a mut DiagnosticSink, file: FileId) -> Self {
        SemanticAnalyser { defs, functions, pool, sink, file, fresh_counter: 0 }
    }

    /// Runs preparation then analyses every function
    /// body. Extension member merging
    /// (step 3) already happened while lowering (`Lowerer::lower_document`
    /// folds an extension's body directly into its target's owner id), so
    /// there is nothing left to merge here.
    pub fn analyse(&mut self) {
        self.assign_dispatch_indices();
        self.synthesize_protocol_boxing_layers();
        let ids: Vec<FunctionId> = (0..self.functions.len() as u32).map(FunctionId).collect();
        for id in ids {
            if self.functions.get(id).function_type == FunctionType::BoxingLayer {
                continue;
            }
            self.analyse_function(id);
        }
    }

    fn synthetic_position(&self) -> SourcePosition {
        SourcePosition::new(0, 0, self.file)
    }

    fn fresh_slot(&mut self) -> Symbol {
        self.fresh_counter += 1;
        self.pool.intern(&format!("$box{}", self.fresh_counter))
    }

    fn error(&mut self, err: CompileError) {
        self.sink.push(err.into_diagnostic());
    }

    fn warn_ambiguous_common_type(&mut self, pos: SourcePosition) {
        let message = CompileError::Type(TypeErrorKind::AmbiguousCommonType, pos).to_string();
        self.sink.push(glyph_common::Diagnostic::warning(glyph_common::ErrorCategory::Type, pos, message));
    }

    fn find_def_by_name(&self, name: &str) -> Option<TypeDefId> {
        self.defs.iter().find(|d| self.pool.resolve(d.name) == name).map(|d| d.id)
    }

    /// Resolves a literal or collection type against whatever type of that
    /// name exists in the compiled unit. This front-end compiles in
    /// isolation with no bundled standard library, so an absent name
    /// degrades gracefully to `Something` instead of failing.
    fn literal_type(&self, name: &str) -> Type {
        match self.find_def_by_name(name) {
            Some(id) => match self.defs.get(id).kind {
                DefKind::Class => Type::class(id, vec![]),
                DefKind::ValueType => Type::value_type(id, vec![]),
                DefKind::Enum => Type::r#enum(id),
                _ => Type::something(),
            },
            None => Type::something(),
        }
    }

    fn generic_instance(&self, name: &str, args: Vec<Type>) -> Type {
        match self.find_def_by_name(name) {
            Some(id) => match self.defs.get(id).kind {
                DefKind::Class => Type::class(id, args),
                DefKind::ValueType => Type::value_type(id, args),
                _ => Type::something(),
            },
            None => Type::something(),
        }
    }

    fn self_type(&self, owner: TypeDefId, is_mutating: bool) -> Type {
        let def = self.defs.get(owner);
        let generic_args: Vec<Type> = (0..def.generic_parameters.len()).map(Type::generic_variable).collect();
        match def.kind {
            DefKind::Class => Type::class(owner, generic_args).with_reference(true),
            DefKind::ValueType => Type::value_type(owner, generic_args).with_reference(true).with_mutable(is_mutating),
            DefKind::Enum => Type::r#enum(owner),
            DefKind::Protocol => Type::protocol(owner, generic_args),
            DefKind::Extension => Type::something(),
        }
    }

    fn superclass_id(&self, id: TypeDefId) -> Option<TypeDefId> {
        match &self.defs.get(id).superclass {
            Some(t) => match &t.kind {
                TypeKind::Class(sup, _) => Some(*sup),
                _ => None,
            },
            None => None,
        }
    }

    fn inherits_from(&self, id: TypeDefId, ancestor: TypeDefId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.superclass_id(c);
        }
        false
    }

    /// Own instance variable slots plus every superclass's, root-first (spec
    /// §4.5 preparation step 2).
    fn all_instance_variable_slots(&self, id: TypeDefId) -> Vec<InstanceVariableSlot> {
        let mut chain = Vec::new();
        let mut cur = Some(id);
        while let Some(c) = cur {
            chain.push(c);
            cur = self.superclass_id(c);
        }
        chain.reverse();
        chain.into_iter().flat_map(|c| self.defs.get(c).instance_variables.iter().cloned()).collect()
    }

    fn find_in_def(&self, owner: TypeDefId, name: Symbol, function_type: FunctionType) -> Option<FunctionId> {
        self.functions.iter().find(|f| f.owning_type == Some(owner) && f.name == name && f.function_type == function_type).map(|f| f.id)
    }

    fn find_in_chain(&self, owner: TypeDefId, name: Symbol) -> Option<FunctionId> {
        let mut cur = Some(owner);
        while let Some(id) = cur {
            if let Some(found) = self.find_in_def(id, name, FunctionType::Method) {
                return Some(found);
            }
            cur = self.superclass_id(id);
        }
        None
    }

    /// Resolves a method call site's dispatch mode from the receiver's type
    ///.
    fn find_method(&self, receiver_ty: &Type, name: Symbol) -> Option<(FunctionId, DispatchMode)> {
        match &receiver_ty.kind {
            TypeKind::MultiProtocol(protos) => protos.iter().find_map(|p| self.find_method(p, name)).map(|(f, _)| (f, DispatchMode::Protocol)),
            TypeKind::Protocol(id, _) => self.find_in_def(*id, name, FunctionType::Method).map(|f| (f, DispatchMode::Protocol)),
            TypeKind::Class(id, _) => self.find_in_chain(*id, name).map(|f| (f, DispatchMode::Dynamic)),
            TypeKind::ValueType(id, _) | TypeKind::Enum(id) => self.find_in_def(*id, name, FunctionType::Method).map(|f| (f, DispatchMode::StaticContextless)),
            TypeKind::Optional(inner) | TypeKind::Box(inner) => self.find_method(inner, name),
            _ => None,
        }
    }

    // ---- preparation --------------------------------------------------

    /// Assigns each class's own declared methods a fresh dispatch slot in
    /// declaration order. An override's slot is later
    /// overwritten with its super method's slot by `validate_override`.
    fn assign_dispatch_indices(&mut self) {
        let def_ids: Vec<TypeDefId> = (0..self.defs.len() as u32).map(TypeDefId).collect();
        for owner in def_ids {
            if !matches!(self.defs.get(owner).kind, DefKind::Class) {
                continue;
            }
            let ids: Vec<FunctionId> =
                self.functions.iter().filter(|f| f.owning_type == Some(owner) && f.function_type == FunctionType::Method).map(|f| f.id).collect();
            for (index, id) in ids.into_iter().enumerate() {
                self.functions.get_mut(id).dispatch_index = Some(index as u32);
            }
        }
    }

    fn storage_mismatch(&self, protocol_fn: FunctionId, real_fn: FunctionId) -> bool {
        let p = self.functions.get(protocol_fn);
        let r = self.functions.get(real_fn);
        if storage_of(&p.return_type) != storage_of(&r.return_type) {
            return true;
        }
        p.params.len() == r.params.len() && p.params.iter().zip(&r.params).any(|(pp, rp)| storage_of(&pp.ty) != storage_of(&rp.ty))
    }

    /// Synthesises a `FunctionType::BoxingLayer` function for every protocol
    /// method whose conforming type implements it with a different storage
    /// form.
    fn synthesize_protocol_boxing_layers(&mut self) {
        let def_ids: Vec<TypeDefId> = (0..self.defs.len() as u32).map(TypeDefId).collect();
        let mut layers: Vec<(TypeDefId, FunctionId, FunctionId)> = Vec::new();
        for conformer in &def_ids {
            if matches!(self.defs.get(*conformer).kind, DefKind::Extension) {
                continue;
            }
            for conformance in self.defs.get(*conformer).conformances.clone() {
                let TypeKind::Protocol(proto_id, _) = conformance.kind else { continue };
                let proto_methods: Vec<FunctionId> =
                    self.functions.iter().filter(|f| f.owning_type == Some(proto_id) && f.function_type == FunctionType::Method).map(|f| f.id).collect();
                for proto_fn in proto_methods {
                    let name = self.functions.get(proto_fn).name;
                    if let Some(real_fn) = self.find_in_def(*conformer, name, FunctionType::Method) {
                        if self.storage_mismatch(proto_fn, real_fn) {
                            layers.push((*conformer, proto_fn, real_fn));
                        }
                    }
                }
            }
        }
        for (conformer, proto_fn, real_fn) in layers {
            self.insert_boxing_layer(conformer, proto_fn, real_fn);
        }
    }

    fn insert_boxing_layer(&mut self, conformer: TypeDefId, proto_fn: FunctionId, real_fn: FunctionId) {
        let pos = self.synthetic_position();
        let proto = self.functions.get(proto_fn).clone();
        let real = self.functions.get(real_fn).clone();
        let receiver_ty = self.self_type(conformer, true);
        let receiver = typed(pos, ExprKind::This, receiver_ty);
        let args: Vec<Expr> = proto
            .params
            .iter()
            .zip(real.params.iter())
            .map(|(proto_param, real_param)| {
                let arg = typed(pos, ExprKind::GetVariable(proto_param.name), proto_param.ty.clone());
                insert_boxing(arg, &real_param.ty, || self.fresh_slot())
            })
            .collect();
        let call = typed(
            pos,
            ExprKind::MethodCall { receiver: Box::new(receiver), name: real.name, generic_args: Vec::new(), args, dispatch: DispatchMode::Dynamic },
            real.return_type.clone(),
        );
        let boxed_return = insert_boxing(call, &proto.return_type, || self.fresh_slot());
        let body = vec![Stmt::new(pos, StmtKind::Return(Some(boxed_return)))];

        let id = self.functions.insert(proto.name, FunctionType::BoxingLayer);
        let f = self.functions.get_mut(id);
        f.owning_type = Some(conformer);
        f.params = proto.params;
        f.return_type = proto.return_type;
        f.access = AccessLevel::Public;
        f.body = body;
    }

    /// Reconciles `value` against `expected`'s storage, routing through
    /// [`insert_callable_boxing_layer`] whenever both sides are callables
    /// whose parameter/return boxing disagrees -- a case plain
    /// `storage_of` cannot see, since every `Callable` collapses to
    /// `StorageType::Box` regardless of its signature.
    fn insert_boxing(&mut self, value: Expr, expected: &Type) -> Expr {
        if callable_signature_mismatch(&value.expression_type, expected) {
            return self.insert_callable_boxing_layer(value, expected);
        }
        insert_boxing(value, expected, || self.fresh_slot())
    }

    /// Synthesises a `FunctionType::BoxingLayer` function wrapping `value`
    /// (an arbitrary callable) so it presents `expected`'s signature: the
    /// layer takes the original callable as a hidden `$callee` parameter
    /// plus one parameter per `expected` argument, converts each argument
    /// back to the original signature's boxing, calls through, and converts
    /// the result to `expected`'s return boxing. Mirrors
    /// [`insert_boxing_layer`]'s call-through-and-convert shape, with the
    /// explicit `$callee` parameter standing in for `this`.
    fn insert_callable_boxing_layer(&mut self, value: Expr, expected: &Type) -> Expr {
        let pos = value.position;
        let original_ty = value.expression_type.clone();
        let (TypeKind::Callable(expected_params, expected_ret), TypeKind::Callable(original_params, original_ret)) =
            (expected.kind.clone(), original_ty.kind.clone())
        else {
            return insert_boxing(value, expected, || self.fresh_slot());
        };

        let callee_name = self.pool.intern("$callee");
        let layer_name = self.fresh_slot();

        let params: Vec<Parameter> = expected_params
            .iter()
            .enumerate()
            .map(|(i, ty)| Parameter { name: self.pool.intern(&format!("$carg{i}")), ty: ty.clone(), auto_assigned: false })
            .collect();

        let args: Vec<Expr> = params
            .iter()
            .zip(original_params.iter())
            .map(|(param, original_param_ty)| {
                let arg = typed(pos, ExprKind::GetVariable(param.name), param.ty.clone());
                insert_boxing(arg, original_param_ty, || self.fresh_slot())
            })
            .collect();

        let callee_expr = typed(pos, ExprKind::GetVariable(callee_name), original_ty.clone());
        let call = typed(pos, ExprKind::CallableCall { callee: Box::new(callee_expr), args }, (*original_ret).clone());
        let boxed_return = insert_boxing(call, &expected_ret, || self.fresh_slot());
        let body = vec![Stmt::new(pos, StmtKind::Return(Some(boxed_return)))];

        let mut all_params = Vec::with_capacity(params.len() + 1);
        all_params.push(Parameter { name: callee_name, ty: original_ty.clone(), auto_assigned: false });
        all_params.extend(params);

        let id = self.functions.insert(layer_name, FunctionType::BoxingLayer);
        let f = self.functions.get_mut(id);
        f.owning_type = None;
        f.params = all_params;
        f.return_type = (*expected_ret).clone();
        f.access = AccessLevel::Public;
        f.body = body;

        let node = BoxingNode::CallableBox { callee: Box::new(value), boxing_layer: layer_name };
        let ty = node.expression_type(expected);
        Expr::new(pos, ExprKind::Boxing(node)).with_type(ty)
    }

    // ---- per-function analysis -----------------------------------------

    fn analyse_function(&mut self, id: FunctionId) {
        let f = self.functions.get(id);
        let owner = f.owning_type;
        let params = f.params.clone();
        let return_type = f.return_type.clone();
        let error_type = f.error_type.clone();
        let function_type = f.function_type;
        let is_mutating = f.is_mutating;
        let body = std::mem::take(&mut self.functions.get_mut(id).body);

        let mut ctx = FnContext::new(owner, id, is_mutating);

        let mut prologue = Vec::new();
        for param in &params {
            let depth = ctx.scope.depth();
            ctx.scope.declare(param.name, Variable::declared_initialised(param.ty.clone(), false, depth));
            if param.auto_assigned {
                let pos = self.synthetic_position();
                let value = typed(pos, ExprKind::GetVariable(param.name), param.ty.clone());
                prologue.push(Stmt::new(pos, StmtKind::InstanceVariableAssignment { name: param.name, value }));
            }
        }

        let is_initializer = function_type == FunctionType::Initializer;
        if let Some(owner_id) = owner {
            for slot in self.all_instance_variable_slots(owner_id) {
                let var = if is_initializer && !slot.ty.is_optional() {
                    Variable::declared_uninitialised(slot.ty.clone(), true)
                } else {
                    Variable::declared_initialised(slot.ty.clone(), true, 0)
                };
                ctx.scope.declare_instance(slot.name, var);
            }
        }

        prologue.extend(body);
        let mut final_body: Vec<Stmt> = prologue.into_iter().map(|s| self.check_stmt(s, &mut ctx, &return_type, error_type.as_ref())).collect();

        match function_type {
            FunctionType::Initializer if owner.map(|o| matches!(self.defs.get(o).kind, DefKind::Class)).unwrap_or(false) => {
                let pos = self.synthetic_position();
                let this_ty = self.self_type(owner.unwrap(), false);
                final_body.push(Stmt::new(pos, StmtKind::Return(Some(typed(pos, ExprKind::This, this_ty)))));
            }
            FunctionType::Initializer => {
                let pos = self.synthetic_position();
                final_body.push(Stmt::new(pos, StmtKind::Return(None)));
            }
            _ => {
                // A return clause absent from the source lowers to the same
                // `Something` default this front-end gives an explicit
                // `➡🔵` clause, so completeness is only checked
                // once the declared return type is more specific than that.
                if !matches!(return_type.kind, TypeKind::Something) && !ctx.path.is_certain(Incident::Returned) {
                    let pos = self.synthetic_position();
                    self.error(CompileError::Init(InitErrorKind::NotAllPathsReturnOrRaise, pos));
                }
            }
        }

        if is_initializer {
            if let Some(owner_id) = owner {
                for slot in self.all_instance_variable_slots(owner_id) {
                    if slot.ty.is_optional() {
                        continue;
                    }
                    let initialised = ctx.scope.lookup_instance(slot.name).map(|v| v.is_initialised_at(ctx.scope.depth())).unwrap_or(false);
                    if !initialised {
                        let pos = self.synthetic_position();
                        let name = self.pool.resolve(slot.name);
                        self.error(CompileError::Init(InitErrorKind::NotAllPathsInitializeInstanceVariable { name }, pos));
                    }
                }
                if matches!(self.defs.get(owner_id).kind, DefKind::Class)
                    && self.defs.get(owner_id).superclass.is_some()
                    && !ctx.path.is_certain(Incident::CalledSuperInitializer)
                {
                    let pos = self.synthetic_position();
                    self.error(CompileError::Init(InitErrorKind::MissingSuperinitializerCall, pos));
                }
            }
        }

        self.functions.get_mut(id).body = final_body;
        self.validate_override(id);
    }

    /// Overriding is detected implicitly by name/arity match against a
    /// superclass method of the same name, since the grammar carries no
    /// explicit override marker token. Checks all three override rules:
    /// covariant return (`m.return ≼ m'.return`), contravariant parameters
    /// (`m'.arg_i ≼ m.arg_i` for every `i`), and non-narrowed access
    /// (`m.access_level ≥ m'.access_level`).
    fn validate_override(&mut self, id: FunctionId) {
        let f = self.functions.get(id);
        let Some(owner) = f.owning_type else { return };
        if !matches!(self.defs.get(owner).kind, DefKind::Class) || f.function_type != FunctionType::Method {
            return;
        }
        let Some(super_id) = self.superclass_id(owner) else { return };
        let name = f.name;
        let Some(super_fn) = self.find_in_chain(super_id, name) else { return };
        let pos = self.synthetic_position();

        let super_return = self.functions.get(super_fn).return_type.clone();
        let cur_return = self.functions.get(id).return_type.clone();
        if !is_compatible(&cur_return, &super_return, self.defs, None) {
            self.error(CompileError::Type(TypeErrorKind::Incompatible { expected: super_return, found: cur_return }, pos));
        }

        let super_params = self.functions.get(super_fn).params.clone();
        let cur_params = self.functions.get(id).params.clone();
        for (super_param, cur_param) in super_params.iter().zip(cur_params.iter()) {
            if !is_compatible(&super_param.ty, &cur_param.ty, self.defs, None) {
                self.error(CompileError::Type(
                    TypeErrorKind::Incompatible { expected: cur_param.ty.clone(), found: super_param.ty.clone() },
                    pos,
                ));
            }
        }

        // `AccessLevel`'s declaration order (Public, Protected, Private) is
        // restrictiveness order, so narrowing is reported when the override
        // is strictly more restrictive than the method it overrides.
        let super_access = self.functions.get(super_fn).access;
        let cur_access = self.functions.get(id).access;
        if cur_access > super_access {
            let method = self.pool.resolve(name);
            self.error(CompileError::Access(AccessErrorKind::OverrideNarrowsAccess { method }, pos));
        }

        let dispatch_index = self.functions.get(super_fn).dispatch_index;
        let f = self.functions.get_mut(id);
        f.is_override = true;
        f.dispatch_index = dispatch_index.or(f.dispatch_index);
    }

    // ---- statements -----------------------------------------------------

    fn check_stmt(&mut self, stmt: Stmt, ctx: &mut FnContext, return_type: &Type, error_type: Option<&Type>) -> Stmt {
        let pos = stmt.position;
        let kind = match stmt.kind {
            StmtKind::Expr(e) => StmtKind::Expr(self.check_expr(e, None, ctx)),
            StmtKind::Return(opt) => {
                let checked = opt.map(|e| self.check_expr(e, Some(return_type), ctx));
                ctx.path.record(Incident::Returned);
                StmtKind::Return(checked)
            }
            StmtKind::Raise(e) => {
                let expected = error_type.cloned();
                let checked = self.check_expr(e, expected.as_ref(), ctx);
                ctx.path.record(Incident::Returned);
                StmtKind::Raise(checked)
            }
            StmtKind::Superinitializer { name, args } => {
                let super_fn = ctx.owner.and_then(|o| self.superclass_id(o)).and_then(|sup| self.find_in_def(sup, name, FunctionType::Initializer));
                let checked_args = match super_fn {
                    Some(fid) => self.check_call_args(fid, Vec::new(), args, ctx),
                    None => {
                        let method = self.pool.resolve(name);
                        self.error(CompileError::Scope(ScopeErrorKind::UnknownMethod { type_name: "super".to_string(), method }, pos));
                        args.into_iter().map(|a| self.check_expr(a, None, ctx)).collect()
                    }
                };
                ctx.path.record(Incident::CalledSuperInitializer);
                StmtKind::Superinitializer { name, args: checked_args }
            }
            StmtKind::If { condition, then_block, else_if_clauses, else_block } => {
                let bool_ty = self.literal_type("Boolean");
                let condition = self.check_expr(condition, Some(&bool_ty), ctx);
                ctx.path.begin_branches();
                ctx.path.begin_branch();
                let then_block: Vec<Stmt> = then_block.into_iter().map(|s| self.check_stmt(s, ctx, return_type, error_type)).collect();
                ctx.path.end_branch();
                let else_if_clauses: Vec<(Expr, Vec<Stmt>)> = else_if_clauses
                    .into_iter()
                    .map(|(cond, block)| {
                        ctx.path.begin_branch();
                        let bool_ty = self.literal_type("Boolean");
                        let cond = self.check_expr(cond, Some(&bool_ty), ctx);
                        let block: Vec<Stmt> = block.into_iter().map(|s| self.check_stmt(s, ctx, return_type, error_type)).collect();
                        ctx.path.end_branch();
                        (cond, block)
                    })
                    .collect();
                let else_block = match else_block {
                    Some(block) => {
                        ctx.path.begin_branch();
                        let block: Vec<Stmt> = block.into_iter().map(|s| self.check_stmt(s, ctx, return_type, error_type)).collect();
                        ctx.path.end_branch();
                        ctx.path.end_mutual_exclusive_branches();
                        Some(block)
                    }
                    None => {
                        ctx.path.end_uncertain_branches();
                        None
                    }
                };
                StmtKind::If { condition, then_block, else_if_clauses, else_block }
            }
            StmtKind::RepeatWhile { condition, body } => {
                let bool_ty = self.literal_type("Boolean");
                let condition = self.check_expr(condition, Some(&bool_ty), ctx);
                ctx.path.begin_branches();
                ctx.path.begin_branch();
                let body: Vec<Stmt> = body.into_iter().map(|s| self.check_stmt(s, ctx, return_type, error_type)).collect();
                ctx.path.end_branch();
                ctx.path.end_uncertain_branches();
                StmtKind::RepeatWhile { condition, body }
            }
            StmtKind::ForIn { variable, iterable, body } => {
                let iterable = self.check_expr(iterable, None, ctx);
                let elem_ty = match &iterable.expression_type.kind {
                    TypeKind::Class(_, args) | TypeKind::ValueType(_, args) => args.first().cloned().unwrap_or_else(Type::something),
                    _ => Type::something(),
                };
                ctx.scope.push_scope();
                let depth = ctx.scope.depth();
                ctx.scope.declare(variable, Variable::declared_initialised(elem_ty, false, depth));
                ctx.path.begin_branches();
                ctx.path.begin_branch();
                let body: Vec<Stmt> = body.into_iter().map(|s| self.check_stmt(s, ctx, return_type, error_type)).collect();
                ctx.path.end_branch();
                ctx.path.end_uncertain_branches();
                ctx.scope.pop_scope();
                StmtKind::ForIn { variable, iterable, body }
            }
            StmtKind::ErrorHandler { variable, fallible, body } => {
                let fallible = self.check_expr(fallible, None, ctx);
                let bound_ty = match &fallible.expression_type.kind {
                    TypeKind::Error(_, success) => (**success).clone(),
                    _ => fallible.expression_type.clone(),
                };
                ctx.scope.push_scope();
                let depth = ctx.scope.depth();
                ctx.scope.declare(variable, Variable::declared_initialised(bound_ty, false, depth));
                let body: Vec<Stmt> = body.into_iter().map(|s| self.check_stmt(s, ctx, return_type, error_type)).collect();
                ctx.scope.pop_scope();
                StmtKind::ErrorHandler { variable, fallible, body }
            }
            StmtKind::VariableDeclaration { name, declared_type } => {
                let ty = declared_type.clone().unwrap_or_else(Type::something);
                ctx.scope.declare(name, Variable::declared_uninitialised(ty, true));
                StmtKind::VariableDeclaration { name, declared_type }
            }
            StmtKind::VariableAssignment { name, value } => {
                let existing = ctx.scope.lookup(name).map(|v| v.ty.clone());
                let value = match &existing {
                    Some(ty) => self.check_expr(value, Some(ty), ctx),
                    None => self.check_expr(value, None, ctx),
                };
                match existing {
                    Some(_) => ctx.scope.mark_initialised(name),
                    None => {
                        let n = self.pool.resolve(name);
                        self.error(CompileError::Scope(ScopeErrorKind::UndeclaredVariable { name: n }, pos));
                    }
                }
                StmtKind::VariableAssignment { name, value }
            }
            StmtKind::InstanceVariableAssignment { name, value } => {
                let existing = ctx.scope.lookup_instance(name).map(|v| v.ty.clone());
                let value = match &existing {
                    Some(ty) => self.check_expr(value, Some(ty), ctx),
                    None => self.check_expr(value, None, ctx),
                };
                match existing {
                    Some(_) => ctx.scope.mark_instance_initialised(name),
                    None => {
                        let n = self.pool.resolve(name);
                        self.error(CompileError::Scope(ScopeErrorKind::UndeclaredInstanceVariable { name: n }, pos));
                    }
                }
                StmtKind::InstanceVariableAssignment { name, value }
            }
            StmtKind::FrozenDeclaration { name, value } => {
                let value = self.check_expr(value, None, ctx);
                let ty = value.expression_type.clone();
                let depth = ctx.scope.depth();
                ctx.scope.declare(name, Variable::declared_initialised(ty, false, depth));
                StmtKind::FrozenDeclaration { name, value }
            }
        };
        Stmt::new(pos, kind)
    }

    // ---- expressions ------------------------------------------------------

    fn check_expr(&mut self, expr: Expr, expected: Option<&Type>, ctx: &mut FnContext) -> Expr {
        let checked = self.infer_expr(expr, ctx);
        match expected {
            Some(exp) => self.insert_boxing(checked, exp),
            None => checked,
        }
    }

    fn resolve_variable(&mut self, name: Symbol, ctx: &mut FnContext, pos: SourcePosition) -> Type {
        if let Some(v) = ctx.scope.lookup(name) {
            return v.ty.clone();
        }
        if let Some(outer) = ctx.outer {
            if let Some(v) = outer.lookup(name) {
                let ty = v.ty.clone();
                let is_mutable = v.is_mutable;
                ctx.captures.push(CaptureDescriptor { source: name, ty: ty.clone(), capture_id: name });
                let depth = ctx.scope.depth();
                ctx.scope.declare(name, Variable::declared_initialised(ty.clone(), is_mutable, depth));
                return ty;
            }
        }
        let n = self.pool.resolve(name);
        self.error(CompileError::Scope(ScopeErrorKind::UndeclaredVariable { name: n }, pos));
        Type::something()
    }

    fn check_call_args(&mut self, fid: FunctionId, generic_args: Vec<Type>, args: Vec<Expr>, ctx: &mut FnContext) -> Vec<Expr> {
        let params = self.functions.get(fid).params.clone();
        if params.len() != args.len() {
            let pos = args.first().map(|a| a.position).or_else(|| Some(self.synthetic_position())).unwrap();
            self.error(CompileError::Type(TypeErrorKind::WrongArity { expected: params.len(), found: args.len() }, pos));
        }

        if generic_args.is_empty() && !self.functions.get(fid).generic_parameters.is_empty() {
            let raw: Vec<Expr> = args.into_iter().map(|a| self.check_expr(a, None, ctx)).collect();
            let arity = self.functions.get(fid).generic_parameters.len();
            let mut bindings = InferenceBindings::new(arity);
            for (param, arg) in params.iter().zip(raw.iter()) {
                let _ = is_compatible(&arg.expression_type, &param.ty, self.defs, Some(&mut bindings));
            }
            let inferred: Vec<Type> = bindings.local.into_iter().map(|b| b.unwrap_or_else(Type::something)).collect();
            let fn_ctx = TypeContext::new().with_fn_args(inferred);
            raw.into_iter()
                .zip(params.iter())
                .map(|(arg, param)| {
                    let expected = resolve_on(&param.ty, &fn_ctx);
                    self.insert_boxing(arg, &expected)
                })
                .collect()
        } else {
            let fn_ctx = TypeContext::new().with_fn_args(generic_args);
            args.into_iter()
                .zip(params.iter())
                .map(|(arg, param)| {
                    let expected = resolve_on(&param.ty, &fn_ctx);
                    let checked = self.check_expr(arg, None, ctx);
                    self.insert_boxing(checked, &expected)
                })
                .collect()
        }
    }

    fn instantiate_return(&self, fid: FunctionId, receiver_ty: &Type) -> Type {
        let ret = self.functions.get(fid).return_type.clone();
        let callee_def = match &receiver_ty.kind {
            TypeKind::Class(id, args) | TypeKind::ValueType(id, args) | TypeKind::Protocol(id, args) => Some((*id, args.clone())),
            _ => None,
        };
        match callee_def {
            Some((id, args)) => resolve_on(&ret, &TypeContext::new().with_callee(id, args)),
            None => ret,
        }
    }

    fn check_access(&mut self, fid: FunctionId, ctx: &FnContext, pos: SourcePosition) {
        let f = self.functions.get(fid);
        let access = f.access;
        let owning = f.owning_type;
        let name = f.name;
        let allowed = match access {
            AccessLevel::Public => true,
            AccessLevel::Private => ctx.owner == owning,
            AccessLevel::Protected => match (ctx.owner, owning) {
                (Some(caller), Some(owner_id)) => caller == owner_id || self.inherits_from(caller, owner_id),
                _ => false,
            },
        };
        if !allowed {
            let member = self.pool.resolve(name);
            self.error(CompileError::Access(AccessErrorKind::PrivateMemberAccessedOutsideOwner { member }, pos));
        }
        if self.functions.get(fid).is_deprecated {
            let function = self.pool.resolve(name);
            let message = format!("{function} is deprecated");
            self.sink.push(glyph_common::Diagnostic::warning(glyph_common::ErrorCategory::Access, pos, message));
        }
    }

    fn infer_expr(&mut self, expr: Expr, ctx: &mut FnContext) -> Expr {
        let pos = expr.position;
        match expr.kind {
            ExprKind::IntegerLiteral(n) => typed(pos, ExprKind::IntegerLiteral(n), self.literal_type("Integer")),
            ExprKind::DoubleLiteral(n) => typed(pos, ExprKind::DoubleLiteral(n), self.literal_type("Double")),
            ExprKind::SymbolLiteral(c) => typed(pos, ExprKind::SymbolLiteral(c), self.literal_type("Symbol")),
            ExprKind::StringLiteral(s) => typed(pos, ExprKind::StringLiteral(s), self.literal_type("String")),
            ExprKind::InterpolatedString(parts) => {
                let checked: Vec<Expr> = parts.into_iter().map(|p| self.check_expr(p, None, ctx)).collect();
                let ty = self.literal_type("String");
                typed(pos, ExprKind::InterpolatedString(checked), ty)
            }
            ExprKind::BooleanLiteral(b) => typed(pos, ExprKind::BooleanLiteral(b), self.literal_type("Boolean")),
            ExprKind::NothingnessLiteral => {
                let ty = Type::optional(Type::something()).unwrap_or_else(|_| Type::something());
                typed(pos, ExprKind::NothingnessLiteral, ty)
            }
            ExprKind::This => {
                if ctx.outer.is_some() {
                    ctx.captured_self = true;
                }
                ctx.path.record(Incident::UsedSelf);
                let ty = ctx.owner.map(|o| self.self_type(o, ctx.is_mutating)).unwrap_or_else(Type::something);
                typed(pos, ExprKind::This, ty)
            }
            ExprKind::GetVariable(name) => {
                let ty = self.resolve_variable(name, ctx, pos);
                typed(pos, ExprKind::GetVariable(name), ty)
            }
            ExprKind::GetInstanceVariable(name) => {
                let ty = match ctx.scope.lookup_instance(name) {
                    Some(v) => v.ty.clone(),
                    None => {
                        let n = self.pool.resolve(name);
                        self.error(CompileError::Scope(ScopeErrorKind::UndeclaredInstanceVariable { name: n }, pos));
                        Type::something()
                    }
                };
                typed(pos, ExprKind::GetInstanceVariable(name), ty)
            }
            ExprKind::Binary { lhs, operator, rhs } => {
                let lhs = self.check_expr(*lhs, None, ctx);
                let rhs_raw = self.check_expr(*rhs, None, ctx);
                let (ret_ty, rhs) = match self.find_method(&lhs.expression_type, operator) {
                    Some((fid, _)) => {
                        let param_ty = self.functions.get(fid).params.first().map(|p| p.ty.clone());
                        let rhs = match param_ty {
                            Some(pt) => self.insert_boxing(rhs_raw, &pt),
                            None => rhs_raw,
                        };
                        (self.functions.get(fid).return_type.clone(), rhs)
                    }
                    None => {
                        let type_name = format!("{}", lhs.expression_type);
                        let method = self.pool.resolve(operator);
                        self.error(CompileError::Scope(ScopeErrorKind::UnknownMethod { type_name, method }, pos));
                        (Type::something(), rhs_raw)
                    }
                };
                typed(pos, ExprKind::Binary { lhs: Box::new(lhs), operator, rhs: Box::new(rhs) }, ret_ty)
            }
            ExprKind::MethodCall { receiver, name, generic_args, args, .. } => {
                let receiver = self.check_expr(*receiver, None, ctx);
                match self.find_method(&receiver.expression_type, name) {
                    Some((fid, dispatch)) => {
                        self.check_access(fid, ctx, pos);
                        if self.functions.get(fid).is_mutating && !receiver.expression_type.is_mutable {
                            let method = self.pool.resolve(name);
                            self.error(CompileError::Access(AccessErrorKind::MutatingMethodCalledOnImmutableReceiver { method }, pos));
                        }
                        let args = self.check_call_args(fid, generic_args, args, ctx);
                        let ret = self.instantiate_return(fid, &receiver.expression_type);
                        typed(pos, ExprKind::MethodCall { receiver: Box::new(receiver), name, generic_args: Vec::new(), args, dispatch }, ret)
                    }
                    None => {
                        let type_name = format!("{}", receiver.expression_type);
                        let method = self.pool.resolve(name);
                        self.error(CompileError::Scope(ScopeErrorKind::UnknownMethod { type_name, method }, pos));
                        let args: Vec<Expr> = args.into_iter().map(|a| self.check_expr(a, None, ctx)).collect();
                        typed(
                            pos,
                            ExprKind::MethodCall { receiver: Box::new(receiver), name, generic_args, args, dispatch: DispatchMode::Dynamic },
                            Type::something(),
                        )
                    }
                }
            }
            ExprKind::CallableCall { callee, args } => {
                let callee = self.check_expr(*callee, None, ctx);
                match callee.expression_type.kind.clone() {
                    TypeKind::Callable(params, ret) => {
                        let args: Vec<Expr> = args
                            .into_iter()
                            .zip(params.iter())
                            .map(|(a, p)| {
                                let checked = self.check_expr(a, None, ctx);
                                self.insert_boxing(checked, p)
                            })
                            .collect();
                        typed(pos, ExprKind::CallableCall { callee: Box::new(callee), args }, *ret)
                    }
                    _ => {
                        let expected = Type::callable(vec![], Type::something());
                        let found = callee.expression_type.clone();
                        self.error(CompileError::Type(TypeErrorKind::Incompatible { expected, found }, pos));
                        let args: Vec<Expr> = args.into_iter().map(|a| self.check_expr(a, None, ctx)).collect();
                        typed(pos, ExprKind::CallableCall { callee: Box::new(callee), args }, Type::something())
                    }
                }
            }
            ExprKind::TypeMethodCall { callee_type, name, generic_args, args } => {
                let def_id = match &callee_type.kind {
                    TypeKind::Class(id, _) | TypeKind::ValueType(id, _) | TypeKind::Enum(id) | TypeKind::Protocol(id, _) => Some(*id),
                    _ => None,
                };
                match def_id.and_then(|id| self.find_in_def(id, name, FunctionType::TypeMethod)) {
                    Some(fid) => {
                        let args = self.check_call_args(fid, generic_args, args, ctx);
                        let ret = self.instantiate_return(fid, &callee_type);
                        typed(pos, ExprKind::TypeMethodCall { callee_type, name, generic_args: Vec::new(), args }, ret)
                    }
                    None => {
                        let type_name = format!("{}", callee_type);
                        let method = self.pool.resolve(name);
                        self.error(CompileError::Scope(ScopeErrorKind::UnknownMethod { type_name, method }, pos));
                        let args: Vec<Expr> = args.into_iter().map(|a| self.check_expr(a, None, ctx)).collect();
                        typed(pos, ExprKind::TypeMethodCall { callee_type, name, generic_args, args }, Type::something())
                    }
                }
            }
            ExprKind::SuperMethodCall { name, args } => {
                let super_id = ctx.owner.and_then(|o| self.superclass_id(o));
                match super_id.and_then(|id| self.find_in_chain(id, name)) {
                    Some(fid) => {
                        let ret = self.functions.get(fid).return_type.clone();
                        let args = self.check_call_args(fid, Vec::new(), args, ctx);
                        typed(pos, ExprKind::SuperMethodCall { name, args }, ret)
                    }
                    None => {
                        let method = self.pool.resolve(name);
                        self.error(CompileError::Scope(ScopeErrorKind::UnknownMethod { type_name: "super".to_string(), method }, pos));
                        let args: Vec<Expr> = args.into_iter().map(|a| self.check_expr(a, None, ctx)).collect();
                        typed(pos, ExprKind::SuperMethodCall { name, args }, Type::something())
                    }
                }
            }
            ExprKind::Initialization { init_type, initializer_name, args } => {
                let def_id = match &init_type.kind {
                    TypeKind::Class(id, _) | TypeKind::ValueType(id, _) => Some(*id),
                    _ => None,
                };
                match def_id.and_then(|id| self.find_in_def(id, initializer_name, FunctionType::Initializer)) {
                    Some(fid) => {
                        let args = self.check_call_args(fid, Vec::new(), args, ctx);
                        typed(pos, ExprKind::Initialization { init_type: init_type.clone(), initializer_name, args }, init_type)
                    }
                    None => {
                        let type_name = format!("{}", init_type);
                        let method = self.pool.resolve(initializer_name);
                        self.error(CompileError::Scope(ScopeErrorKind::UnknownMethod { type_name, method }, pos));
                        let args: Vec<Expr> = args.into_iter().map(|a| self.check_expr(a, None, ctx)).collect();
                        typed(pos, ExprKind::Initialization { init_type: init_type.clone(), initializer_name, args }, init_type)
                    }
                }
            }
            ExprKind::CaptureMethod { name } => {
                let ty = ctx
                    .owner
                    .and_then(|o| self.find_in_chain(o, name))
                    .map(|fid| {
                        let f = self.functions.get(fid);
                        Type::callable(f.params.iter().map(|p| p.ty.clone()).collect(), f.return_type.clone())
                    })
                    .unwrap_or_else(Type::something);
                typed(pos, ExprKind::CaptureMethod { name }, ty)
            }
            ExprKind::CaptureTypeMethod { captured_type, name } => {
                let def_id = match &captured_type.kind {
                    TypeKind::Class(id, _) | TypeKind::ValueType(id, _) => Some(*id),
                    _ => None,
                };
                let ty = def_id
                    .and_then(|id| self.find_in_def(id, name, FunctionType::TypeMethod))
                    .map(|fid| {
                        let f = self.functions.get(fid);
                        Type::callable(f.params.iter().map(|p| p.ty.clone()).collect(), f.return_type.clone())
                    })
                    .unwrap_or_else(Type::something);
                typed(pos, ExprKind::CaptureTypeMethod { captured_type, name }, ty)
            }
            ExprKind::Closure { params, body, .. } => {
                let mut inner = FnContext::nested(&ctx.scope, ctx.owner, ctx.current_function);
                for p in &params {
                    let depth = inner.scope.depth();
                    inner.scope.declare(*p, Variable::declared_initialised(Type::something(), false, depth));
                }
                let checked_body: Vec<Stmt> = body.into_iter().map(|s| self.check_stmt(s, &mut inner, &Type::something(), None)).collect();
                let captures = inner.captures;
                let captured_self = inner.captured_self;
                let ty = Type::callable(params.iter().map(|_| Type::something()).collect(), Type::something());
                typed(pos, ExprKind::Closure { params, body: checked_body, captures, captured_self }, ty)
            }
            ExprKind::IsNothingness(e) => {
                let checked = self.check_expr(*e, None, ctx);
                let ty = self.literal_type("Boolean");
                typed(pos, ExprKind::IsNothingness(Box::new(checked)), ty)
            }
            ExprKind::IsError(e) => {
                let checked = self.check_expr(*e, None, ctx);
                let ty = self.literal_type("Boolean");
                typed(pos, ExprKind::IsError(Box::new(checked)), ty)
            }
            ExprKind::Unwrap(e) => {
                let checked = self.check_expr(*e, None, ctx);
                let ty = match &checked.expression_type.kind {
                    TypeKind::Optional(inner) => (**inner).clone(),
                    _ => checked.expression_type.clone(),
                };
                typed(pos, ExprKind::Unwrap(Box::new(checked)), ty)
            }
            ExprKind::MetaTypeFromInstance(e) => {
                let checked = self.check_expr(*e, None, ctx);
                let ty = Type::type_as_value(checked.expression_type.clone());
                typed(pos, ExprKind::MetaTypeFromInstance(Box::new(checked)), ty)
            }
            ExprKind::Cast { target_type, operand } => {
                let checked = self.check_expr(*operand, None, ctx);
                typed(pos, ExprKind::Cast { target_type: target_type.clone(), operand: Box::new(checked) }, target_type)
            }
            ExprKind::MetaTypeInstantiation { instantiated_type, args } => {
                let def_id = match &instantiated_type.kind {
                    TypeKind::Class(id, _) | TypeKind::ValueType(id, _) => Some(*id),
                    _ => None,
                };
                let init_fid = def_id.and_then(|id| {
                    self.functions.iter().find(|f| f.owning_type == Some(id) && f.function_type == FunctionType::Initializer).map(|f| f.id)
                });
                let args = match init_fid {
                    Some(fid) => self.check_call_args(fid, Vec::new(), args, ctx),
                    None => args.into_iter().map(|a| self.check_expr(a, None, ctx)).collect(),
                };
                typed(pos, ExprKind::MetaTypeInstantiation { instantiated_type: instantiated_type.clone(), args }, instantiated_type)
            }
            ExprKind::ConditionalAssignment { lhs, rhs } => {
                let rhs = self.check_expr(*rhs, None, ctx);
                let unwrapped = match &rhs.expression_type.kind {
                    TypeKind::Optional(inner) => (**inner).clone(),
                    _ => rhs.expression_type.clone(),
                };
                let lhs = self.check_expr(*lhs, Some(&unwrapped), ctx);
                let ty = self.literal_type("Boolean");
                typed(pos, ExprKind::ConditionalAssignment { lhs: Box::new(lhs), rhs: Box::new(rhs) }, ty)
            }
            ExprKind::Concatenate(parts) => {
                let checked: Vec<Expr> = parts.into_iter().map(|p| self.check_expr(p, None, ctx)).collect();
                let ty = self.literal_type("String");
                typed(pos, ExprKind::Concatenate(checked), ty)
            }
            ExprKind::ListLiteral(elements) => {
                let checked: Vec<Expr> = elements.into_iter().map(|e| self.check_expr(e, None, ctx)).collect();
                let mut finder = CommonTypeFinder::new();
                for e in &checked {
                    finder.add(&e.expression_type, self.defs);
                }
                let narrowed = finder.narrowed_to_top;
                let elem_ty = finder.result();
                if narrowed {
                    self.warn_ambiguous_common_type(pos);
                }
                let ty = self.generic_instance("List", vec![elem_ty]);
                typed(pos, ExprKind::ListLiteral(checked), ty)
            }
            ExprKind::DictionaryLiteral(entries) => {
                let checked: Vec<(Expr, Expr)> =
                    entries.into_iter().map(|(k, v)| (self.check_expr(k, None, ctx), self.check_expr(v, None, ctx))).collect();
                let mut kf = CommonTypeFinder::new();
                let mut vf = CommonTypeFinder::new();
                for (k, v) in &checked {
                    kf.add(&k.expression_type, self.defs);
                    vf.add(&v.expression_type, self.defs);
                }
                let key_narrowed = kf.narrowed_to_top;
                let key_ty = kf.result();
                let val_ty = vf.result();
                if key_narrowed {
                    self.warn_ambiguous_common_type(pos);
                }
                let ty = self.generic_instance("Dictionary", vec![key_ty, val_ty]);
                typed(pos, ExprKind::DictionaryLiteral(checked), ty)
            }
            ExprKind::Boxing(node) => typed(pos, ExprKind::Boxing(node), Type::something()),
            ExprKind::Unresolved => typed(pos, ExprKind::Unresolved, Type::something()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::Parameter;
    use glyph_common::{DiagnosticSink, FileTable, StringPool};
    use glyph_types::{DefArena, DefKind};

    fn setup() -> (DefArena, FunctionArena, StringPool, DiagnosticSink, FileId) {
        let table = FileTable::new();
        (DefArena::new(), FunctionArena::new(), StringPool::new(), DiagnosticSink::new(), table.intern("a.glyph"))
    }

    #[test]
    fn integer_literal_resolves_against_a_registered_integer_class() {
        let (mut defs, mut functions, pool, mut sink, file) = setup();
        let int_id = defs.insert(DefKind::Class, pool.intern("Integer"));
        let id = functions.insert(pool.intern("answer"), FunctionType::Method);
        functions.get_mut(id).return_type = Type::class(int_id, vec![]);
        functions.get_mut(id).body = vec![Stmt::new(
            SourcePosition::new(1, 0, file),
            StmtKind::Return(Some(Expr::new(SourcePosition::new(1, 0, file), ExprKind::IntegerLiteral(42)))),
        )];
        let mut analyser = SemanticAnalyser::new(&mut defs, &mut functions, &pool, &mut sink, file);
        analyser.analyse();
        assert!(!sink.has_errors());
        let checked_body = &functions.get(id).body;
        match &checked_body[0].kind {
            StmtKind::Return(Some(e)) => assert_eq!(e.expression_type.kind, Type::class(int_id, vec![]).kind),
            other => panic!("expected a return statement, got {other:?}"),
        }
    }

    #[test]
    fn calling_an_unknown_method_is_reported() {
        let (mut defs, mut functions, pool, mut sink, file) = setup();
        let id = functions.insert(pool.intern("run"), FunctionType::Method);
        let pos = SourcePosition::new(1, 0, file);
        let receiver = Expr::new(pos, ExprKind::IntegerLiteral(1));
        functions.get_mut(id).body = vec![Stmt::new(
            pos,
            StmtKind::Expr(Expr::new(
                pos,
                ExprKind::MethodCall {
                    receiver: Box::new(receiver),
                    name: pool.intern("frobnicate"),
                    generic_args: Vec::new(),
                    args: Vec::new(),
                    dispatch: DispatchMode::Dynamic,
                },
            )),
        )];
        let mut analyser = SemanticAnalyser::new(&mut defs, &mut functions, &pool, &mut sink, file);
        analyser.analyse();
        assert!(sink.has_errors());
    }

    #[test]
    fn initializer_missing_instance_variable_initialization_is_reported() {
        let (mut defs, mut functions, pool, mut sink, file) = setup();
        let int_id = defs.insert(DefKind::Class, pool.intern("Integer"));
        let animal = defs.insert(DefKind::Class, pool.intern("Animal"));
        defs.get_mut(animal).instance_variables.push(InstanceVariableSlot { name: pool.intern("legs"), ty: Type::class(int_id, vec![]) });
        let id = functions.insert(pool.intern("init"), FunctionType::Initializer);
        let f = functions.get_mut(id);
        f.owning_type = Some(animal);
        f.body = Vec::new();
        let mut analyser = SemanticAnalyser::new(&mut defs, &mut functions, &pool, &mut sink, file);
        analyser.analyse();
        assert!(sink.has_errors());
    }

    #[test]
    fn class_methods_get_a_dispatch_index_overridden_methods_inherit_it() {
        let (mut defs, mut functions, pool, mut sink, file) = setup();
        let animal = defs.insert(DefKind::Class, pool.intern("Animal"));
        let dog = defs.insert(DefKind::Class, pool.intern("Dog"));
        defs.get_mut(dog).superclass = Some(Type::class(animal, vec![]));
        let base = functions.insert(pool.intern("speak"), FunctionType::Method);
        functions.get_mut(base).owning_type = Some(animal);
        let over = functions.insert(pool.intern("speak"), FunctionType::Method);
        functions.get_mut(over).owning_type = Some(dog);
        let mut analyser = SemanticAnalyser::new(&mut defs, &mut functions, &pool, &mut sink, file);
        analyser.analyse();
        assert!(functions.get(over).is_override);
        assert_eq!(functions.get(over).dispatch_index, functions.get(base).dispatch_index);
    }

    #[test]
    fn overriding_method_with_narrower_access_is_reported() {
        let (mut defs, mut functions, pool, mut sink, file) = setup();
        let animal = defs.insert(DefKind::Class, pool.intern("Animal"));
        let dog = defs.insert(DefKind::Class, pool.intern("Dog"));
        defs.get_mut(dog).superclass = Some(Type::class(animal, vec![]));
        let base = functions.insert(pool.intern("speak"), FunctionType::Method);
        functions.get_mut(base).owning_type = Some(animal);
        functions.get_mut(base).access = AccessLevel::Public;
        let over = functions.insert(pool.intern("speak"), FunctionType::Method);
        functions.get_mut(over).owning_type = Some(dog);
        functions.get_mut(over).access = AccessLevel::Private;
        let mut analyser = SemanticAnalyser::new(&mut defs, &mut functions, &pool, &mut sink, file);
        analyser.analyse();
        assert!(sink.has_errors());
    }

    #[test]
    fn overriding_method_with_contravariant_parameter_is_accepted() {
        let (mut defs, mut functions, pool, mut sink, file) = setup();
        let animal = defs.insert(DefKind::Class, pool.intern("Animal"));
        let dog = defs.insert(DefKind::Class, pool.intern("Dog"));
        defs.get_mut(dog).superclass = Some(Type::class(animal, vec![]));
        let base = functions.insert(pool.intern("feed"), FunctionType::Method);
        functions.get_mut(base).owning_type = Some(animal);
        functions.get_mut(base).params = vec![Parameter { name: pool.intern("food"), ty: Type::class(animal, vec![]), auto_assigned: false }];
        let over = functions.insert(pool.intern("feed"), FunctionType::Method);
        functions.get_mut(over).owning_type = Some(dog);
        functions.get_mut(over).params = vec![Parameter { name: pool.intern("food"), ty: Type::something(), auto_assigned: false }];
        let mut analyser = SemanticAnalyser::new(&mut defs, &mut functions, &pool, &mut sink, file);
        analyser.analyse();
        assert!(!sink.has_errors());
        assert!(functions.get(over).is_override);
    }

    #[test]
    fn deprecated_call_on_non_mutating_method_still_warns() {
        let (mut defs, mut functions, pool, mut sink, file) = setup();
        let cls = defs.insert(DefKind::Class, pool.intern("Widget"));
        let callee = functions.insert(pool.intern("legacy"), FunctionType::Method);
        functions.get_mut(callee).owning_type = Some(cls);
        functions.get_mut(callee).is_deprecated = true;
        functions.get_mut(callee).is_mutating = false;

        let caller = functions.insert(pool.intern("run"), FunctionType::Method);
        let pos = SourcePosition::new(1, 0, file);
        let receiver = Expr::new(pos, ExprKind::This);
        functions.get_mut(caller).owning_type = Some(cls);
        functions.get_mut(caller).body = vec![Stmt::new(
            pos,
            StmtKind::Expr(Expr::new(
                pos,
                ExprKind::MethodCall { receiver: Box::new(receiver), name: pool.intern("legacy"), generic_args: Vec::new(), args: Vec::new(), dispatch: DispatchMode::Dynamic },
            )),
        )];
        let mut analyser = SemanticAnalyser::new(&mut defs, &mut functions, &pool, &mut sink, file);
        analyser.analyse();
        assert!(!sink.has_errors());
        assert!(sink.iter().any(|d| d.severity == glyph_common::Severity::Warning));
    }

    #[test]
    fn callable_argument_with_mismatched_boxing_gets_wrapped_in_a_boxing_layer() {
        let (mut defs, mut functions, pool, mut sink, file) = setup();
        let vt = defs.insert(DefKind::ValueType, pool.intern("Wrapper"));
        let simple = Type::value_type(vt, vec![]);
        let boxed = Type::boxed(simple.clone()).unwrap();
        let narrow_callable = Type::callable(vec![simple.clone()], simple.clone());
        let wide_callable = Type::callable(vec![boxed], simple);

        let id = functions.insert(pool.intern("run"), FunctionType::Method);
        let pos = SourcePosition::new(1, 0, file);
        let fn_param = pool.intern("fn");
        let target = pool.intern("target");
        functions.get_mut(id).params = vec![Parameter { name: fn_param, ty: narrow_callable, auto_assigned: false }];
        functions.get_mut(id).body = vec![
            Stmt::new(pos, StmtKind::VariableDeclaration { name: target, declared_type: Some(wide_callable) }),
            Stmt::new(pos, StmtKind::VariableAssignment { name: target, value: Expr::new(pos, ExprKind::GetVariable(fn_param)) }),
        ];
        let functions_len_before = functions.len();
        let mut analyser = SemanticAnalyser::new(&mut defs, &mut functions, &pool, &mut sink, file);
        analyser.analyse();
        assert!(!sink.has_errors());
        assert!(functions.len() > functions_len_before, "expected a synthesised boxing-layer function to be enqueued");
        match &functions.get(id).body[1].kind {
            StmtKind::VariableAssignment { value, .. } => {
                assert!(matches!(value.kind, ExprKind::Boxing(BoxingNode::CallableBox { .. })));
            }
            other => panic!("expected a variable assignment, got {other:?}"),
        }
    }

    #[test]
    fn closure_capturing_an_enclosing_local_records_it() {
        let (mut defs, mut functions, pool, mut sink, file) = setup();
        let id = functions.insert(pool.intern("makeCounter"), FunctionType::Method);
        let pos = SourcePosition::new(1, 0, file);
        let total = pool.intern("total");
        functions.get_mut(id).body = vec![
            Stmt::new(pos, StmtKind::VariableDeclaration { name: total, declared_type: None }),
            Stmt::new(pos, StmtKind::VariableAssignment { name: total, value: Expr::new(pos, ExprKind::IntegerLiteral(0)) }),
            Stmt::new(
                pos,
                StmtKind::Expr(Expr::new(
                    pos,
                    ExprKind::Closure {
                        params: Vec::new(),
                        body: vec![Stmt::new(pos, StmtKind::Expr(Expr::new(pos, ExprKind::GetVariable(total))))],
                        captures: Vec::new(),
                        captured_self: false,
                    },
                )),
            ),
        ];
        let mut analyser = SemanticAnalyser::new(&mut defs, &mut functions, &pool, &mut sink, file);
        analyser.analyse();
        let body = &functions.get(id).body;
        match &body[2].kind {
            StmtKind::Expr(e) => match &e.kind {
                ExprKind::Closure { captures, .. } => assert_eq!(captures.len(), 1),
                other => panic!("expected a closure, got {other:?}"),
            },
            other => panic!("expected an expr statement, got {other:?}"),
        }
    }
}
