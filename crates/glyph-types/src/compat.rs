//! Subtype compatibility `≼` and identity `≡`, plus the
//! generic-inference bindings used while matching an overload candidate
//! against call-site argument types.

use crate::def::{DefArena, TypeDefId};
use crate::ty::{Type, TypeKind};

/// Accumulates generic-variable bindings discovered while checking `≼`
/// against a callee whose generics are not yet concrete. Used by overload resolution and
/// [`crate::common_type_finder::CommonTypeFinder`].
#[derive(Default, Debug, Clone)]
pub struct InferenceBindings {
    pub local: Vec<Option<Type>>,
}

impl InferenceBindings {
    pub fn new(arity: usize) -> Self {
        InferenceBindings { local: vec![None; arity] }
    }

    fn bind(&mut self, index: usize, ty: Type) -> bool {
        match self.local.get(index) {
            Some(Some(existing)) => is_identical(existing, &ty),
            Some(None) => {
                self.local[index] = Some(ty);
                true
            }
            None => false,
        }
    }
}

/// `a ≡ b`: stricter, invariant-in-all-positions equality used for generic
/// argument matching. Reference/mutability flags are ignored; only the
/// underlying type is compared.
pub fn is_identical(a: &Type, b: &Type) -> bool {
    match (&a.kind, &b.kind) {
        (TypeKind::Class(id1, args1), TypeKind::Class(id2, args2))
        | (TypeKind::ValueType(id1, args1), TypeKind::ValueType(id2, args2))
        | (TypeKind::Protocol(id1, args1), TypeKind::Protocol(id2, args2)) => {
            id1 == id2 && args1.len() == args2.len() && args1.iter().zip(args2).all(|(x, y)| is_identical(x, y))
        }
        (TypeKind::Enum(id1), TypeKind::Enum(id2)) => id1 == id2,
        (TypeKind::MultiProtocol(ps1), TypeKind::MultiProtocol(ps2)) => {
            ps1.len() == ps2.len() && ps1.iter().zip(ps2).all(|(x, y)| is_identical(x, y))
        }
        (TypeKind::Optional(i1), TypeKind::Optional(i2)) => is_identical(i1, i2),
        (TypeKind::Error(e1, s1), TypeKind::Error(e2, s2)) => is_identical(e1, e2) && is_identical(s1, s2),
        (TypeKind::Callable(p1, r1), TypeKind::Callable(p2, r2)) => {
            p1.len() == p2.len() && p1.iter().zip(p2).all(|(x, y)| is_identical(x, y)) && is_identical(r1, r2)
        }
        (TypeKind::GenericVariable(i1), TypeKind::GenericVariable(i2)) => i1 == i2,
        (TypeKind::LocalGenericVariable(i1), TypeKind::LocalGenericVariable(i2)) => i1 == i2,
        (TypeKind::TypeAsValue(i1), TypeKind::TypeAsValue(i2)) => is_identical(i1, i2),
        (TypeKind::Box(i1), TypeKind::Box(i2)) => is_identical(i1, i2),
        (TypeKind::Something, TypeKind::Something) => true,
        (TypeKind::Someobject, TypeKind::Someobject) => true,
        (TypeKind::NoReturn, TypeKind::NoReturn) => true,
        (TypeKind::StorageExpectation, TypeKind::StorageExpectation) => true,
        _ => false,
    }
}

fn superclass_chain<'a>(defs: &'a DefArena, mut id: TypeDefId) -> Vec<TypeDefId> {
    let mut chain = vec![id];
    while let Some(super_ty) = &defs.get(id).superclass {
        if let TypeKind::Class(super_id, _) = &super_ty.kind {
            chain.push(*super_id);
            id = *super_id;
        } else {
            break;
        }
    }
    chain
}

/// Every protocol (transitively, including protocols a protocol itself
/// conforms to) that `id` can be shown to conform to, walking the
/// superclass chain first for classes.
fn all_conformances(defs: &DefArena, id: TypeDefId) -> Vec<Type> {
    let mut seen = Vec::new();
    let mut stack: Vec<TypeDefId> = superclass_chain(defs, id);
    let mut visited_defs = Vec::new();
    while let Some(cur) = stack.pop() {
        if visited_defs.contains(&cur) {
            continue;
        }
        visited_defs.push(cur);
        for conformance in &defs.get(cur).conformances {
            if let TypeKind::Protocol(p_id, _) = &conformance.kind {
                seen.push(conformance.clone());
                stack.push(*p_id);
            }
        }
    }
    seen
}

/// `a ≼ b`. `infer` accumulates bindings when a
/// generic variable appears on the right-hand side during overload
/// resolution; pass `None` for a plain compatibility check.
pub fn is_compatible(a: &Type, b: &Type, defs: &DefArena, mut infer: Option<&mut InferenceBindings>) -> bool {
    // Box(a) ≼ b ⇔ unbox(a) ≼ b; symmetrically a ≼ Box(b) ⇔ a ≼ unbox(b).
    if let TypeKind::Box(inner) = &a.kind {
        return is_compatible(inner, b, defs, infer);
    }
    if let TypeKind::Box(inner) = &b.kind {
        return is_compatible(a, inner, defs, infer);
    }

    if matches!(b.kind, TypeKind::Something) {
        return true;
    }

    if let TypeKind::GenericVariable(i) | TypeKind::LocalGenericVariable(i) = &b.kind {
        if let Some(bindings) = infer.as_deref_mut() {
            return bindings.bind(*i, a.clone());
        }
        return is_identical(a, b);
    }

    match (&a.kind, &b.kind) {
        (TypeKind::Optional(a_inner), TypeKind::Optional(b_inner)) => is_compatible(a_inner, b_inner, defs, infer),
        (_, TypeKind::Optional(b_inner)) if !matches!(a.kind, TypeKind::Optional(_)) => {
            is_compatible(a, b_inner, defs, infer)
        }
        (TypeKind::Class(c, c_args), TypeKind::Class(d, d_args)) => {
            if c == d {
                return c_args.len() == d_args.len() && c_args.iter().zip(d_args).all(|(x, y)| is_identical(x, y));
            }
            superclass_chain(defs, *c).iter().skip(1).any(|anc| {
                anc == d && c_args.len() == d_args.len() && c_args.iter().zip(d_args).all(|(x, y)| is_identical(x, y))
            })
        }
        (TypeKind::ValueType(v1, a1), TypeKind::ValueType(v2, a2)) => {
            v1 == v2 && a1.len() == a2.len() && a1.iter().zip(a2).all(|(x, y)| is_identical(x, y))
        }
        (TypeKind::Enum(e1), TypeKind::Enum(e2)) => e1 == e2,
        (TypeKind::Class(_, _), TypeKind::Someobject) => true,
        (TypeKind::Someobject, TypeKind::Someobject) => true,
        (_, TypeKind::Protocol(p_id, p_args)) => {
            let source_def = match &a.kind {
                TypeKind::Class(id, _) | TypeKind::ValueType(id, _) | TypeKind::Enum(id) | TypeKind::Protocol(id, _) => Some(*id),
                _ => None,
            };
            match source_def {
                Some(id) => all_conformances(defs, id).iter().any(|c| {
                    if let TypeKind::Protocol(cand_id, cand_args) = &c.kind {
                        cand_id == p_id
                            && cand_args.len() == p_args.len()
                            && cand_args.iter().zip(p_args).all(|(x, y)| is_identical(x, y))
                    } else {
                        false
                    }
                }),
                None => false,
            }
        }
        (_, TypeKind::MultiProtocol(protos)) => protos.iter().all(|p| is_compatible(a, p, defs, infer.as_deref_mut())),
        (TypeKind::Callable(a_params, a_ret), TypeKind::Callable(b_params, b_ret)) => {
            a_params.len() == b_params.len()
                && a_params.iter().zip(b_params).all(|(a_p, b_p)| is_compatible(b_p, a_p, defs, infer.as_deref_mut()))
                && is_compatible(a_ret, b_ret, defs, infer.as_deref_mut())
        }
        (TypeKind::GenericVariable(i), TypeKind::GenericVariable(j)) => i == j,
        (TypeKind::LocalGenericVariable(i), TypeKind::LocalGenericVariable(j)) => i == j,
        (TypeKind::NoReturn, _) => true,
        (TypeKind::TypeAsValue(a_inner), TypeKind::TypeAsValue(b_inner)) => is_compatible(a_inner, b_inner, defs, infer),
        _ => is_identical(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{DefArena, DefKind};
    use glyph_common::StringPool;

    fn class(arena: &mut DefArena, pool: &StringPool, name: &str, super_id: Option<TypeDefId>) -> TypeDefId {
        let id = arena.insert(DefKind::Class, pool.intern(name));
        if let Some(sup) = super_id {
            arena.get_mut(id).superclass = Some(Type::class(sup, vec![]));
        }
        id
    }

    #[test]
    fn subclass_is_compatible_with_superclass() {
        let pool = StringPool::new();
        let mut arena = DefArena::new();
        let animal = class(&mut arena, &pool, "Animal", None);
        let dog = class(&mut arena, &pool, "Dog", Some(animal));
        assert!(is_compatible(&Type::class(dog, vec![]), &Type::class(animal, vec![]), &arena, None));
        assert!(!is_compatible(&Type::class(animal, vec![]), &Type::class(dog, vec![]), &arena, None));
    }

    #[test]
    fn anything_is_compatible_with_something() {
        let arena = DefArena::new();
        assert!(is_compatible(&Type::no_return(), &Type::something(), &arena, None));
    }

    #[test]
    fn no_return_is_compatible_with_everything() {
        let pool = StringPool::new();
        let mut arena = DefArena::new();
        let animal = class(&mut arena, &pool, "Animal", None);
        assert!(is_compatible(&Type::no_return(), &Type::class(animal, vec![]), &arena, None));
    }

    #[test]
    fn value_is_compatible_with_its_own_optional_but_not_reverse() {
        let arena = DefArena::new();
        let opt = Type::optional(Type::something()).unwrap();
        assert!(is_compatible(&Type::something(), &opt, &arena, None));
        assert!(!is_compatible(&opt, &Type::something(), &arena, None));
    }

    #[test]
    fn protocol_conformance_is_transitive_through_superclass() {
        let pool = StringPool::new();
        let mut arena = DefArena::new();
        let protocol = arena.insert(DefKind::Protocol, pool.intern("Comparable"));
        let animal = class(&mut arena, &pool, "Animal", None);
        arena.get_mut(animal).conformances.push(Type::protocol(protocol, vec![]));
        let dog = class(&mut arena, &pool, "Dog", Some(animal));
        assert!(is_compatible(&Type::class(dog, vec![]), &Type::protocol(protocol, vec![]), &arena, None));
    }

    #[test]
    fn generic_variable_on_rhs_binds_during_inference() {
        let arena = DefArena::new();
        let mut bindings = InferenceBindings::new(1);
        assert!(is_compatible(&Type::something(), &Type::local_generic_variable(0), &arena, Some(&mut bindings)));
        assert_eq!(bindings.local[0].as_ref().unwrap().kind, Type::something().kind);
    }
}
