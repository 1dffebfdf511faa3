//! Functions and their dispatch metadata. Grounded on
//! `EmojicodeCompiler/Functions/Function.hpp`/`ProtocolFunction.hpp`/
//! `BoxingLayer.hpp`.

use glyph_common::Symbol;
use glyph_types::{GenericParameter, Type, TypeDefId};

use crate::semantic_ast::Stmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FunctionId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FunctionType {
    Method,
    TypeMethod,
    Initializer,
    /// Synthesised to reconcile a protocol conformance whose storage
    /// differs from the real method.
    BoxingLayer,
    /// A free-standing closure body, analysed with a `CapturingScoper`.
    Closure,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessLevel {
    Public,
    Protected,
    Private,
}

#[derive(Clone, Debug)]
pub struct Parameter {
    pub name: Symbol,
    pub ty: Type,
    /// Initializer parameters prefixed with the auto-assign marker get an
    /// `InstanceVariableAssignment` prepended to the body instead of
    /// staying a plain local.
    pub auto_assigned: bool,
}

#[derive(Clone, Debug)]
pub struct Function {
    pub id: FunctionId,
    pub name: Symbol,
    pub function_type: FunctionType,
    pub owning_type: Option<TypeDefId>,
    pub generic_parameters: Vec<GenericParameter>,
    pub params: Vec<Parameter>,
    pub return_type: Type,
    pub error_type: Option<Type>,
    pub access: AccessLevel,
    pub is_mutating: bool,
    /// Declaration-order dispatch slot for object/class methods (spec
    /// §4.10). `None` for value-type methods and free functions, which
    /// dispatch statically.
    pub dispatch_index: Option<u32>,
    pub is_override: bool,
    pub is_deprecated: bool,
    pub body: Vec<Stmt>,
}

impl Function {
    pub fn new(id: FunctionId, name: Symbol, function_type: FunctionType) -> Self {
        Function {
            id,
            name,
            function_type,
            owning_type: None,
            generic_parameters: Vec::new(),
            params: Vec::new(),
            return_type: Type::something(),
            error_type: None,
            access: AccessLevel::Public,
            is_mutating: false,
            dispatch_index: None,
            is_override: false,
            is_deprecated: false,
            body: Vec::new(),
        }
    }

    pub fn dispatches_statically(&self) -> bool {
        self.dispatch_index.is_none()
    }
}

/// Append-only owner of every [`Function`] across a compilation, mirroring
/// [`glyph_types::DefArena`]'s shape.
#[derive(Default)]
pub struct FunctionArena {
    functions: Vec<Function>,
}

impl FunctionArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: Symbol, function_type: FunctionType) -> FunctionId {
        let id = FunctionId(self.functions.len() as u32);
        self.functions.push(Function::new(id, name, function_type));
        id
    }

    pub fn get(&self, id: FunctionId) -> &Function {
        &self.functions[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: FunctionId) -> &mut Function {
        &mut self.functions[id.0 as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Function> {
        self.functions.iter()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_common::StringPool;

    #[test]
    fn value_type_methods_dispatch_statically_by_default() {
        let pool = StringPool::new();
        let mut arena = FunctionArena::new();
        let id = arena.insert(pool.intern("length"), FunctionType::Method);
        assert!(arena.get(id).dispatches_statically());
    }

    #[test]
    fn class_method_assigned_a_dispatch_index_dispatches_dynamically() {
        let pool = StringPool::new();
        let mut arena = FunctionArena::new();
        let id = arena.insert(pool.intern("speak"), FunctionType::Method);
        arena.get_mut(id).dispatch_index = Some(3);
        assert!(!arena.get(id).dispatches_statically());
    }
}
