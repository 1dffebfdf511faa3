//! Boxing insertion: after type-checking an expression
//! against an expectation, wrap it in one of eight node kinds so the
//! back-end emits the exact storage conversion. Grounded verbatim on
//! `EmojicodeCompiler/AST/ASTBoxing.hpp`'s eight `AST*` node kinds -- each
//! boxing node here wraps an already-analysed child and only carries the
//! post-conversion type; constructing one is infallible and it is never
//! itself re-type-checked.

use glyph_common::Symbol;
use glyph_types::{storage_of, StorageType, Type, TypeKind};

use crate::semantic_ast::Expr;

#[derive(Clone, Debug)]
pub enum BoxingNode {
    SimpleToSimpleOptional(Box<Expr>),
    BoxToSimpleOptional(Box<Expr>),
    SimpleToBox(Box<Expr>),
    SimpleOptionalToBox(Box<Expr>),
    BoxToSimple(Box<Expr>),
    Dereference(Box<Expr>),
    /// Declares a fresh internal variable of matching type, initialises it,
    /// and yields its address. `slot` names that synthesised
    /// variable.
    StoreTemporarily { value: Box<Expr>, slot: Symbol },
    /// Wraps a callable whose argument/return boxing does not match the
    /// expected signature; `boxing_layer` is the synthesised
    /// `FunctionType::BoxingLayer` function's name.
    CallableBox { callee: Box<Expr>, boxing_layer: Symbol },
}

impl BoxingNode {
    /// The node's own `expression_type`: exactly the requested storage form
    /// -- boxing nodes are infallible given an
    /// already-typed child, so this is computed once at construction.
    pub fn expression_type(&self, child_type: &Type) -> Type {
        match self {
            BoxingNode::SimpleToSimpleOptional(_) | BoxingNode::BoxToSimpleOptional(_) => {
                Type::optional(child_type.clone()).unwrap_or_else(|_| child_type.clone())
            }
            BoxingNode::SimpleToBox(_) | BoxingNode::SimpleOptionalToBox(_) => {
                Type::boxed(child_type.clone()).unwrap_or_else(|_| child_type.clone())
            }
            BoxingNode::BoxToSimple(_) => child_type.unboxed().clone(),
            BoxingNode::Dereference(inner) => inner.expression_type.clone().with_reference(false),
            BoxingNode::StoreTemporarily { value, .. } => value.expression_type.clone().with_reference(true),
            BoxingNode::CallableBox { .. } => child_type.clone(),
        }
    }
}

/// True when both sides are callable types of the same arity but differ in
/// per-parameter or return-value storage -- the case `storage_of` alone
/// cannot see, since it collapses every `Callable` to `StorageType::Box`.
pub fn callable_signature_mismatch(value_ty: &Type, expected_ty: &Type) -> bool {
    let (TypeKind::Callable(value_params, value_ret), TypeKind::Callable(expected_params, expected_ret)) =
        (&value_ty.kind, &expected_ty.kind)
    else {
        return false;
    };
    if value_params.len() != expected_params.len() {
        return false;
    }
    if storage_of(value_ret) != storage_of(expected_ret) {
        return true;
    }
    value_params.iter().zip(expected_params.iter()).any(|(v, e)| storage_of(v) != storage_of(e))
}

/// Picks and applies the boxing node (if any) needed to reconcile `value`'s
/// storage with `expected`'s storage. Returns `value`
/// unchanged if no conversion is needed.
pub fn insert_boxing(value: Expr, expected: &Type, fresh_slot: impl FnOnce() -> Symbol) -> Expr {
    let from = storage_of(&value.expression_type);
    let to = storage_of(expected);
    let position = value.position;

    let node = match (from, to) {
        (StorageType::Simple, StorageType::SimpleOptional) => Some(BoxingNode::SimpleToSimpleOptional(Box::new(value))),
        (StorageType::Box, StorageType::SimpleOptional) => Some(BoxingNode::BoxToSimpleOptional(Box::new(value))),
        (StorageType::Simple, StorageType::Box) => Some(BoxingNode::SimpleToBox(Box::new(value))),
        (StorageType::SimpleOptional, StorageType::Box) => Some(BoxingNode::SimpleOptionalToBox(Box::new(value))),
        (StorageType::Box, StorageType::Simple) => Some(BoxingNode::BoxToSimple(Box::new(value))),
        _ => None,
    };

    match node {
        Some(node) => {
            let ty = node.expression_type(expected);
            Expr::new(position, crate::semantic_ast::ExprKind::Boxing(node)).with_type(ty)
        }
        None => apply_reference_adjustment(value, expected, fresh_slot),
    }
}

/// Handles the reference-adjustment case: `Dereference` when a reference is
/// supplied but a value is expected, `StoreTemporarily` for the reverse.
/// Promoting to a reference requires the value be *referenceable* (value
/// types and boxes; class pointers are not).
fn apply_reference_adjustment(value: Expr, expected: &Type, fresh_slot: impl FnOnce() -> Symbol) -> Expr {
    let position = value.position;
    if value.expression_type.is_reference && !expected.is_reference {
        let ty = value.expression_type.clone().with_reference(false);
        return Expr::new(position, crate::semantic_ast::ExprKind::Boxing(BoxingNode::Dereference(Box::new(value)))).with_type(ty);
    }
    if !value.expression_type.is_reference && expected.is_reference && is_referenceable(&value.expression_type) {
        let slot = fresh_slot();
        let ty = value.expression_type.clone().with_reference(true);
        return Expr::new(position, crate::semantic_ast::ExprKind::Boxing(BoxingNode::StoreTemporarily { value: Box::new(value), slot }))
            .with_type(ty);
    }
    value
}

fn is_referenceable(ty: &Type) -> bool {
    !matches!(ty.kind, TypeKind::Class(..) | TypeKind::Someobject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_common::{FileTable, SourcePosition};
    use glyph_types::{DefArena, DefKind};

    fn pos() -> SourcePosition {
        let table = FileTable::new();
        SourcePosition::new(1, 0, table.intern("a.glyph"))
    }

    #[test]
    fn simple_to_box_wraps_in_box_node() {
        let pool = glyph_common::StringPool::new();
        let mut defs = DefArena::new();
        let vt = defs.insert(DefKind::ValueType, pool.intern("Wrapper"));
        let value = Expr::new(pos(), crate::semantic_ast::ExprKind::IntegerLiteral(0)).with_type(Type::value_type(vt, vec![]));
        let expected = Type::boxed(Type::value_type(vt, vec![])).unwrap();
        let boxed = insert_boxing(value, &expected, || pool.intern("$tmp0"));
        assert!(matches!(boxed.kind, crate::semantic_ast::ExprKind::Boxing(BoxingNode::SimpleToBox(_))));
        assert_eq!(boxed.expression_type.kind, expected.kind);
    }

    #[test]
    fn matching_storage_needs_no_boxing_node() {
        let value = Expr::new(pos(), crate::semantic_ast::ExprKind::IntegerLiteral(0)).with_type(Type::something());
        let out = insert_boxing(value, &Type::something(), || unreachable!());
        assert!(matches!(out.kind, crate::semantic_ast::ExprKind::IntegerLiteral(0)));
    }

    #[test]
    fn value_promoted_to_reference_uses_store_temporarily() {
        let pool = glyph_common::StringPool::new();
        let mut defs = DefArena::new();
        let vt = defs.insert(DefKind::ValueType, pool.intern("Wrapper"));
        let value = Expr::new(pos(), crate::semantic_ast::ExprKind::IntegerLiteral(0)).with_type(Type::value_type(vt, vec![]));
        let expected = Type::value_type(vt, vec![]).with_reference(true);
        let out = insert_boxing(value, &expected, || pool.intern("$tmp0"));
        assert!(matches!(out.kind, crate::semantic_ast::ExprKind::Boxing(BoxingNode::StoreTemporarily { .. })));
    }

    #[test]
    fn callable_signature_mismatch_detects_differing_param_storage() {
        let pool = glyph_common::StringPool::new();
        let mut defs = DefArena::new();
        let vt = defs.insert(DefKind::ValueType, pool.intern("Wrapper"));
        let simple = Type::value_type(vt, vec![]);
        let boxed = Type::boxed(simple.clone()).unwrap();

        let narrow = Type::callable(vec![simple.clone()], simple.clone());
        let wide = Type::callable(vec![boxed], simple);
        assert!(callable_signature_mismatch(&narrow, &wide));
    }

    #[test]
    fn callable_signature_mismatch_ignores_matching_storage() {
        let pool = glyph_common::StringPool::new();
        let mut defs = DefArena::new();
        let vt = defs.insert(DefKind::ValueType, pool.intern("Wrapper"));
        let simple = Type::value_type(vt, vec![]);
        let a = Type::callable(vec![simple.clone()], simple.clone());
        let b = Type::callable(vec![simple.clone()], simple);
        assert!(!callable_signature_mismatch(&a, &b));
    }

    #[test]
    fn callable_signature_mismatch_ignores_differing_arity() {
        let a = Type::callable(vec![Type::something()], Type::something());
        let b = Type::callable(vec![], Type::something());
        assert!(!callable_signature_mismatch(&a, &b));
    }
}
