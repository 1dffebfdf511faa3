//! Generic-variable resolution contexts.

use crate::def::{DefArena, TypeDefId};
use crate::ty::{Type, TypeKind};

/// Binds the generic variables visible at one call site: the enclosing
/// method's own local generics (`fn_args`) and, if the call is a method call
/// on some definition, that definition's generic arguments (`callee_args`).
#[derive(Clone, Debug, Default)]
pub struct TypeContext {
    pub fn_args: Vec<Type>,
    pub callee_def: Option<TypeDefId>,
    pub callee_args: Vec<Type>,
}

impl TypeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fn_args(mut self, fn_args: Vec<Type>) -> Self {
        self.fn_args = fn_args;
        self
    }

    pub fn with_callee(mut self, def: TypeDefId, args: Vec<Type>) -> Self {
        self.callee_def = Some(def);
        self.callee_args = args;
        self
    }
}

/// `resolve_on(T, ctx)`: replaces generic variables with concrete arguments
/// the context supplies, recursing into generic argument vectors and
/// preserving reference-ness/mutability on the outer type.
pub fn resolve_on(ty: &Type, ctx: &TypeContext) -> Type {
    let resolved_kind = match &ty.kind {
        TypeKind::LocalGenericVariable(i) => {
            if let Some(concrete) = ctx.fn_args.get(*i) {
                return propagate_flags(ty, concrete.clone());
            }
            ty.kind.clone()
        }
        TypeKind::GenericVariable(i) => {
            if ctx.callee_def.is_some() {
                if let Some(concrete) = ctx.callee_args.get(*i) {
                    return propagate_flags(ty, concrete.clone());
                }
            }
            ty.kind.clone()
        }
        TypeKind::Class(id, args) => TypeKind::Class(*id, resolve_args(args, ctx)),
        TypeKind::ValueType(id, args) => TypeKind::ValueType(*id, resolve_args(args, ctx)),
        TypeKind::Protocol(id, args) => TypeKind::Protocol(*id, resolve_args(args, ctx)),
        TypeKind::MultiProtocol(protos) => TypeKind::MultiProtocol(resolve_args(protos, ctx)),
        TypeKind::Optional(inner) => TypeKind::Optional(Box::new(resolve_on(inner, ctx))),
        TypeKind::Error(e, s) => TypeKind::Error(Box::new(resolve_on(e, ctx)), Box::new(resolve_on(s, ctx))),
        TypeKind::Callable(params, ret) => TypeKind::Callable(resolve_args(params, ctx), Box::new(resolve_on(ret, ctx))),
        TypeKind::TypeAsValue(inner) => TypeKind::TypeAsValue(Box::new(resolve_on(inner, ctx))),
        TypeKind::Box(inner) => TypeKind::Box(Box::new(resolve_on(inner, ctx))),
        other @ (TypeKind::Enum(_)
        | TypeKind::Something
        | TypeKind::Someobject
        | TypeKind::NoReturn
        | TypeKind::StorageExpectation) => other.clone(),
    };
    Type { kind: resolved_kind, is_reference: ty.is_reference, is_mutable: ty.is_mutable }
}

fn resolve_args(args: &[Type], ctx: &TypeContext) -> Vec<Type> {
    args.iter().map(|a| resolve_on(a, ctx)).collect()
}

fn propagate_flags(original: &Type, mut resolved: Type) -> Type {
    resolved.is_reference = resolved.is_reference || original.is_reference;
    resolved.is_mutable = resolved.is_mutable || original.is_mutable;
    resolved
}

/// `resolve_on_super_arguments_and_constraints(T, ctx)`: used
/// during pre-substitution checks, before a concrete callee-argument list is
/// available. Walks the superclass chain's own generic arguments and falls
/// back to each generic parameter's declared constraint (or `Something` if
/// unconstrained) instead of a concrete callee argument.
pub fn resolve_on_super_arguments_and_constraints(ty: &Type, def_id: TypeDefId, defs: &DefArena) -> Type {
    let resolved_kind = match &ty.kind {
        TypeKind::GenericVariable(i) => {
            let def = defs.get(def_id);
            if let Some(param) = def.generic_parameters.get(*i) {
                return propagate_flags(ty, param.constraint.clone().unwrap_or_else(Type::someobject));
            }
            if let Some(super_ty) = &def.superclass {
                if let TypeKind::Class(super_id, super_args) = &super_ty.kind {
                    if let Some(arg) = super_args.get(*i) {
                        return propagate_flags(ty, resolve_on_super_arguments_and_constraints(arg, *super_id, defs));
                    }
                }
            }
            ty.kind.clone()
        }
        TypeKind::Class(id, args) => {
            TypeKind::Class(*id, args.iter().map(|a| resolve_on_super_arguments_and_constraints(a, def_id, defs)).collect())
        }
        TypeKind::ValueType(id, args) => {
            TypeKind::ValueType(*id, args.iter().map(|a| resolve_on_super_arguments_and_constraints(a, def_id, defs)).collect())
        }
        TypeKind::Protocol(id, args) => {
            TypeKind::Protocol(*id, args.iter().map(|a| resolve_on_super_arguments_and_constraints(a, def_id, defs)).collect())
        }
        TypeKind::Optional(inner) => TypeKind::Optional(Box::new(resolve_on_super_arguments_and_constraints(inner, def_id, defs))),
        TypeKind::Box(inner) => TypeKind::Box(Box::new(resolve_on_super_arguments_and_constraints(inner, def_id, defs))),
        other => other.clone(),
    };
    Type { kind: resolved_kind, is_reference: ty.is_reference, is_mutable: ty.is_mutable }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{DefArena, DefKind, GenericParameter};
    use glyph_common::StringPool;

    #[test]
    fn resolve_on_substitutes_generic_variable() {
        let pool = StringPool::new();
        let mut arena = DefArena::new();
        let list_id = arena.insert(DefKind::Class, pool.intern("List"));
        let ctx = TypeContext::new().with_callee(list_id, vec![Type::something()]);
        let resolved = resolve_on(&Type::generic_variable(0), &ctx);
        assert_eq!(resolved.kind, Type::something().kind);
    }

    #[test]
    fn resolve_on_super_arguments_falls_back_to_constraint() {
        let pool = StringPool::new();
        let mut arena = DefArena::new();
        let id = arena.insert(DefKind::Class, pool.intern("Box"));
        arena.get_mut(id).generic_parameters.push(GenericParameter::new(pool.intern("T"), None));
        let resolved = resolve_on_super_arguments_and_constraints(&Type::generic_variable(0), id, &arena);
        assert_eq!(resolved.kind, Type::someobject().kind);
    }
}
