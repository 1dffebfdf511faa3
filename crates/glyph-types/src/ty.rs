//! The glyph type representation: a tagged sum with reference
//! and mutability flags carried alongside the kind, never folded into it, so
//! that `Type::class(id).with_reference(true)` and the non-reference form
//! compare equal in `kind` while differing in storage behaviour (spec
//! §4.3/§4.3.A).
//!
//! Grounded in spirit on `mesh-typeck::ty::Ty`'s tagged-sum shape and
//! hand-written `Display`, but the variants themselves, the construction
//! invariants (no nested `Box`, no nested-or-boxed `Optional`), and the
//! absence of any unification machinery are specific to glyph's
//! nominal/subtype type system rather than Hindley-Milner
//! inference.

use std::fmt;

use crate::def::TypeDefId;

/// A fully resolved glyph type: a [`TypeKind`] plus the two flags that
/// live beside the kind rather than inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Type {
    pub kind: TypeKind,
    /// Whether this occurrence is a `🔑` reference type.
    pub is_reference: bool,
    /// Whether this occurrence was declared `🖍🔑` (mutable reference) --
    /// only meaningful when `is_reference` is set.
    pub is_mutable: bool,
}

/// Error raised by a smart constructor that would otherwise violate a
/// type's construction invariants.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypeConstructionError {
    /// Attempted to build `Box(Box(T))`.
    NestedBox,
    /// Attempted to build `Optional(Optional(T))` or `Optional(Box(T))`.
    InvalidOptionalInner,
}

impl fmt::Display for TypeConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeConstructionError::NestedBox => write!(f, "a box type cannot wrap another box type"),
            TypeConstructionError::InvalidOptionalInner => {
                write!(f, "an optional type cannot wrap another optional or a box type")
            }
        }
    }
}

impl std::error::Error for TypeConstructionError {}

/// The thirteen type shapes this type system distinguishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Class(TypeDefId, Vec<Type>),
    ValueType(TypeDefId, Vec<Type>),
    Enum(TypeDefId),
    Protocol(TypeDefId, Vec<Type>),
    /// An ad-hoc intersection of protocols (`a🔲 P1 P2🍆`), as opposed to a
    /// single declared protocol.
    MultiProtocol(Vec<Type>),
    Optional(Box<Type>),
    /// `Error(enum_type, success_type)`.
    Error(Box<Type>, Box<Type>),
    Callable(Vec<Type>, Box<Type>),
    /// Reference to a generic parameter declared on the enclosing
    /// definition, by index into its `generic_parameters`.
    GenericVariable(usize),
    /// Reference to a generic parameter declared on the enclosing method
    /// only.
    LocalGenericVariable(usize),
    /// `T.type` -- a type used as a first-class value.
    TypeAsValue(Box<Type>),
    /// Heap-boxed representation of an otherwise-simple type.
    Box(Box<Type>),
    /// The top object type.
    Something,
    /// The top reference type.
    Someobject,
    /// The uninhabited return type of a function that never returns
    /// normally.
    NoReturn,
    /// Placeholder used by the [`Lowerer`](../glyph_check/index.html) before
    /// an expression's real type is known. Never appears in a
    /// fully analysed program.
    StorageExpectation,
}

impl Type {
    fn simple(kind: TypeKind) -> Self {
        Type { kind, is_reference: false, is_mutable: false }
    }

    pub fn class(id: TypeDefId, generic_args: Vec<Type>) -> Self {
        Self::simple(TypeKind::Class(id, generic_args))
    }

    pub fn value_type(id: TypeDefId, generic_args: Vec<Type>) -> Self {
        Self::simple(TypeKind::ValueType(id, generic_args))
    }

    pub fn r#enum(id: TypeDefId) -> Self {
        Self::simple(TypeKind::Enum(id))
    }

    pub fn protocol(id: TypeDefId, generic_args: Vec<Type>) -> Self {
        Self::simple(TypeKind::Protocol(id, generic_args))
    }

    pub fn multi_protocol(protocols: Vec<Type>) -> Self {
        Self::simple(TypeKind::MultiProtocol(protocols))
    }

    /// Builds `Optional(inner)`, rejecting a nested optional or box per spec
    /// §3.2's "an optional never wraps another optional or a box" invariant.
    pub fn optional(inner: Type) -> Result<Self, TypeConstructionError> {
        if matches!(inner.kind, TypeKind::Optional(_) | TypeKind::Box(_)) {
            return Err(TypeConstructionError::InvalidOptionalInner);
        }
        Ok(Self::simple(TypeKind::Optional(Box::new(inner))))
    }

    pub fn error(enum_type: Type, success_type: Type) -> Self {
        Self::simple(TypeKind::Error(Box::new(enum_type), Box::new(success_type)))
    }

    pub fn callable(params: Vec<Type>, return_type: Type) -> Self {
        Self::simple(TypeKind::Callable(params, Box::new(return_type)))
    }

    pub fn generic_variable(index: usize) -> Self {
        Self::simple(TypeKind::GenericVariable(index))
    }

    pub fn local_generic_variable(index: usize) -> Self {
        Self::simple(TypeKind::LocalGenericVariable(index))
    }

    pub fn type_as_value(inner: Type) -> Self {
        Self::simple(TypeKind::TypeAsValue(Box::new(inner)))
    }

    /// Builds `Box(inner)`, rejecting a nested box: a box never wraps
    /// another box.
    pub fn boxed(inner: Type) -> Result<Self, TypeConstructionError> {
        if matches!(inner.kind, TypeKind::Box(_)) {
            return Err(TypeConstructionError::NestedBox);
        }
        Ok(Self::simple(TypeKind::Box(Box::new(inner))))
    }

    pub fn something() -> Self {
        Self::simple(TypeKind::Something)
    }

    pub fn someobject() -> Self {
        Self::simple(TypeKind::Someobject)
    }

    pub fn no_return() -> Self {
        Self::simple(TypeKind::NoReturn)
    }

    pub fn storage_expectation() -> Self {
        Self::simple(TypeKind::StorageExpectation)
    }

    pub fn with_reference(mut self, is_reference: bool) -> Self {
        self.is_reference = is_reference;
        if !is_reference {
            self.is_mutable = false;
        }
        self
    }

    pub fn with_mutable(mut self, is_mutable: bool) -> Self {
        self.is_mutable = is_mutable;
        if is_mutable {
            self.is_reference = true;
        }
        self
    }

    pub fn is_optional(&self) -> bool {
        matches!(self.kind, TypeKind::Optional(_))
    }

    pub fn is_box(&self) -> bool {
        matches!(self.kind, TypeKind::Box(_))
    }

    /// True for the "value" kinds that never need heap boxing by themselves
    ///: value types, enums, and the
    /// primitive-like top types. Classes are reference types already and so
    /// also count as simple for storage purposes; only generics, optionals
    /// wrapping non-simple payloads, and multi-protocols force a box.
    pub fn is_primitive_like(&self) -> bool {
        matches!(self.kind, TypeKind::ValueType(..) | TypeKind::Enum(_))
    }

    /// Strips one layer of `Box`, if present.
    pub fn unboxed(&self) -> &Type {
        match &self.kind {
            TypeKind::Box(inner) => inner,
            _ => self,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mutable {
            write!(f, "🖍🔑")?;
        } else if self.is_reference {
            write!(f, "🔑")?;
        }
        match &self.kind {
            TypeKind::Class(id, args) | TypeKind::ValueType(id, args) | TypeKind::Protocol(id, args) => {
                write!(f, "#{}", id.0)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, a) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{a}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeKind::Enum(id) => write!(f, "#{}", id.0),
            TypeKind::MultiProtocol(protos) => {
                write!(f, "(")?;
                for (i, p) in protos.iter().enumerate() {
                    if i > 0 {
                        write!(f, " & ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ")")
            }
            TypeKind::Optional(inner) => write!(f, "{inner}?"),
            TypeKind::Error(e, s) => write!(f, "{e} !> {s}"),
            TypeKind::Callable(params, ret) => {
                write!(f, "(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ") -> {ret}")
            }
            TypeKind::GenericVariable(i) => write!(f, "T{i}"),
            TypeKind::LocalGenericVariable(i) => write!(f, "L{i}"),
            TypeKind::TypeAsValue(inner) => write!(f, "{inner}.Type"),
            TypeKind::Box(inner) => write!(f, "box({inner})"),
            TypeKind::Something => write!(f, "Something"),
            TypeKind::Someobject => write!(f, "Someobject"),
            TypeKind::NoReturn => write!(f, "NoReturn"),
            TypeKind::StorageExpectation => write!(f, "<?>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_rejects_nested_optional() {
        let inner = Type::something();
        let opt = Type::optional(inner).unwrap();
        assert_eq!(Type::optional(opt).unwrap_err(), TypeConstructionError::InvalidOptionalInner);
    }

    #[test]
    fn optional_rejects_box_inner() {
        let boxed = Type::boxed(Type::something()).unwrap();
        assert_eq!(Type::optional(boxed).unwrap_err(), TypeConstructionError::InvalidOptionalInner);
    }

    #[test]
    fn box_rejects_nested_box() {
        let boxed = Type::boxed(Type::something()).unwrap();
        assert_eq!(Type::boxed(boxed).unwrap_err(), TypeConstructionError::NestedBox);
    }

    #[test]
    fn reference_flags_are_independent_of_kind() {
        let a = Type::something().with_reference(true);
        let b = Type::something();
        assert_eq!(a.kind, b.kind);
        assert_ne!(a.is_reference, b.is_reference);
    }

    #[test]
    fn mutable_implies_reference() {
        let a = Type::something().with_mutable(true);
        assert!(a.is_reference);
        let b = a.with_reference(false);
        assert!(!b.is_mutable);
    }
}
