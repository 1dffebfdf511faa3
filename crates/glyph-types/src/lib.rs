//! Nominal/subtype type system for the glyph compiler front-end: the tagged-sum [`Type`] representation, the [`DefArena`] that owns
//! every [`TypeDefinition`], subtype compatibility and identity, storage-form
//! computation, and [`CommonTypeFinder`].
//!
//! Deliberately does **not** depend on `ena`: this type system is nominal
//! and structural rather than Hindley-Milner, checked by walking `≼`/`≡`
//! directly against a fixed arena of declared definitions, so there are no
//! type variables to unify.

pub mod common_type_finder;
pub mod compat;
pub mod context;
pub mod def;
pub mod storage;
pub mod ty;

pub use common_type_finder::CommonTypeFinder;
pub use compat::{is_compatible, is_identical, InferenceBindings};
pub use context::{resolve_on, resolve_on_super_arguments_and_constraints, TypeContext};
pub use def::{DefArena, DefKind, GenericParameter, InstanceVariableSlot, TypeDefId, TypeDefinition};
pub use storage::{is_managed, storage_of, StorageType};
pub use ty::{Type, TypeConstructionError, TypeKind};
