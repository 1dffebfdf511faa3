//! Storage-form computation: maps a resolved [`Type`] onto
//! the three-kind representation `Compiler/Types/StorageType.hpp` actually
//! uses at the back end (`Simple`, `SimpleOptional`, `Box`), which in turn
//! drives which boxing nodes the boxing-insertion pass needs to
//! wrap an expression in.

use crate::def::DefArena;
use crate::ty::{Type, TypeKind};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StorageType {
    Simple,
    SimpleOptional,
    Box,
}

/// Whether a value of this storage form needs to participate in object
/// tracing.
pub fn is_managed(ty: &Type, defs: &DefArena) -> bool {
    match &ty.kind {
        TypeKind::Class(..) | TypeKind::Someobject | TypeKind::Box(_) | TypeKind::Callable(..) => true,
        TypeKind::Optional(inner) => is_managed(inner, defs),
        TypeKind::ValueType(id, _) => {
            // A value type is managed iff any of its instance variables are.
            defs.get(*id).instance_variables.iter().any(|slot| is_managed(&slot.ty, defs))
        }
        _ => false,
    }
}

/// `storage_of(T)`. `PointerOptional` is folded into
/// `SimpleOptional`, matching the back end's actual three-kind enum.
pub fn storage_of(ty: &Type) -> StorageType {
    match &ty.kind {
        TypeKind::Box(_) => StorageType::Box,
        TypeKind::Optional(_) => StorageType::SimpleOptional,
        TypeKind::GenericVariable(_) | TypeKind::LocalGenericVariable(_) => StorageType::Box,
        TypeKind::Protocol(..) | TypeKind::MultiProtocol(_) => StorageType::Box,
        TypeKind::Callable(..) => StorageType::Box,
        // The Error's own storage form never depends on the success
        // payload's storage, only its layout (a back-end concern).
        TypeKind::Error(..) => StorageType::Simple,
        TypeKind::Class(..)
        | TypeKind::ValueType(..)
        | TypeKind::Enum(_)
        | TypeKind::Something
        | TypeKind::Someobject
        | TypeKind::NoReturn
        | TypeKind::TypeAsValue(_)
        | TypeKind::StorageExpectation => StorageType::Simple,
    }
}

/// True when `inner`'s storage is a single pointer-sized, nullable-
/// representable `Simple` value (a class reference or `Someobject`).
/// Purely informational: it never changes which `StorageType` variant
/// `storage_of` returns for the optional.
pub fn optional_uses_pointer_tagging(inner: &Type) -> bool {
    matches!(inner.kind, TypeKind::Class(..) | TypeKind::Someobject) && storage_of(inner) == StorageType::Simple
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{DefArena, DefKind};
    use glyph_common::StringPool;

    #[test]
    fn error_storage_is_simple_regardless_of_success_payload() {
        let boxed_t = Type::boxed(Type::something()).unwrap();
        let err = Type::error(Type::something(), boxed_t);
        assert_eq!(storage_of(&err), StorageType::Simple);
    }

    #[test]
    fn box_storage_is_box() {
        let boxed = Type::boxed(Type::something()).unwrap();
        assert_eq!(storage_of(&boxed), StorageType::Box);
    }

    #[test]
    fn optional_storage_is_simple_optional_even_for_pointer_types() {
        let pool = StringPool::new();
        let mut arena = DefArena::new();
        let id = arena.insert(DefKind::Class, pool.intern("Animal"));
        let opt = Type::optional(Type::class(id, vec![])).unwrap();
        assert_eq!(storage_of(&opt), StorageType::SimpleOptional);
        assert!(optional_uses_pointer_tagging(&Type::class(id, vec![])));
    }

    #[test]
    fn value_type_is_managed_iff_any_slot_is() {
        let pool = StringPool::new();
        let mut arena = DefArena::new();
        let class_id = arena.insert(DefKind::Class, pool.intern("Animal"));
        let vt_id = arena.insert(DefKind::ValueType, pool.intern("Wrapper"));
        arena.get_mut(vt_id).instance_variables.push(crate::def::InstanceVariableSlot {
            name: pool.intern("inner"),
            ty: Type::class(class_id, vec![]),
        });
        assert!(is_managed(&Type::value_type(vt_id, vec![]), &arena));
    }
}
