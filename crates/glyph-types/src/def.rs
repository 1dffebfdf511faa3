//! Type definitions and the arena that owns them. Grounded on `mesh-typeck::env`'s
//! `FxHashMap`-backed scope idiom for lookups, but the definitions themselves
//! are stored in a flat `Vec`-backed arena rather than unified via `ena`,
//! since glyph's type system is nominal/subtype-based, not Hindley-Milner.

use glyph_common::Symbol;

use crate::ty::Type;

/// Index into a [`DefArena`]. Cheap to copy and compare; never dangles once
/// inserted, since the arena is append-only for the lifetime of a
/// compilation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDefId(pub u32);

/// The four nominal-type shapes a package can declare, plus
/// `Extension`, which never introduces a new nominal identity of its own —
/// it only attaches methods/conformances onto an existing one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DefKind {
    Class,
    ValueType,
    Enum,
    Protocol,
    Extension,
}

/// One generic type parameter on a definition or a method.
#[derive(Clone, Debug)]
pub struct GenericParameter {
    pub name: Symbol,
    /// Upper-bound constraint type, if the parameter was declared with one
    /// (`🐀 T Protocol🍇 ... 🍉`). `None` means unconstrained (bound to
    /// `Someobject`).
    pub constraint: Option<Type>,
}

impl GenericParameter {
    pub fn new(name: Symbol, constraint: Option<Type>) -> Self {
        GenericParameter { name, constraint }
    }
}

/// An instance variable slot declared directly on a definition.
#[derive(Clone, Debug)]
pub struct InstanceVariableSlot {
    pub name: Symbol,
    pub ty: Type,
}

/// One nominal type definition: a class, value type, enum, protocol, or
/// extension. Classes/value types/protocols share the same
/// shape; enums additionally carry their ordered value names; extensions
/// carry only the type they extend plus what they add, with no instance
/// variables or values of their own.
#[derive(Clone, Debug)]
pub struct TypeDefinition {
    pub id: TypeDefId,
    pub kind: DefKind,
    pub name: Symbol,
    pub generic_parameters: Vec<GenericParameter>,
    /// Class-only: the single superclass, if any. Always `None` for value types, enums, protocols, extensions.
    pub superclass: Option<Type>,
    /// Protocols/classes/value types/extensions this definition conforms to
    /// or (for a protocol) extends.
    pub conformances: Vec<Type>,
    pub instance_variables: Vec<InstanceVariableSlot>,
    /// Enum-only: the ordered case names, each implicitly valued by its
    /// declaration position.
    pub enum_values: Vec<Symbol>,
    /// Extension-only: the type this extension attaches to. `None` for
    /// primary definitions.
    pub extended_type: Option<Type>,
    /// Class-only: whether the compiler permits inheriting from this class.
    pub is_final: bool,
}

impl TypeDefinition {
    pub fn new(id: TypeDefId, kind: DefKind, name: Symbol) -> Self {
        TypeDefinition {
            id,
            kind,
            name,
            generic_parameters: Vec::new(),
            superclass: None,
            conformances: Vec::new(),
            instance_variables: Vec::new(),
            enum_values: Vec::new(),
            extended_type: None,
            is_final: false,
        }
    }

    pub fn generic_parameter_count(&self) -> usize {
        self.generic_parameters.len()
    }
}

/// Append-only owner of every [`TypeDefinition`] produced while compiling an
/// application. One arena is shared across every package in a
/// compilation, so a `TypeDefId` from one package's definitions resolves
/// correctly when referenced from another.
#[derive(Default)]
pub struct DefArena {
    defs: Vec<TypeDefinition>,
}

impl DefArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: DefKind, name: Symbol) -> TypeDefId {
        let id = TypeDefId(self.defs.len() as u32);
        self.defs.push(TypeDefinition::new(id, kind, name));
        id
    }

    pub fn get(&self, id: TypeDefId) -> &TypeDefinition {
        &self.defs[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: TypeDefId) -> &mut TypeDefinition {
        &mut self.defs[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.defs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_common::StringPool;

    #[test]
    fn arena_round_trips_inserted_defs() {
        let pool = StringPool::new();
        let mut arena = DefArena::new();
        let id = arena.insert(DefKind::Class, pool.intern("Animal"));
        assert_eq!(arena.get(id).kind, DefKind::Class);
        arena.get_mut(id).is_final = true;
        assert!(arena.get(id).is_final);
        assert_eq!(arena.len(), 1);
    }
}
