//! `CompileError` taxonomy: one top-level enum wrapping a
//! specific-case inner enum per category, hand-written `Display`/`Error`
//! like [`glyph_syntax::error::ParseError`] and [`glyph_lexer::error::LexError`]
//! before it -- no `thiserror` anywhere in this front-end.

use std::fmt;

use glyph_common::SourcePosition;
use glyph_lexer::error::LexError;
use glyph_syntax::error::ParseError;
use glyph_types::Type;

#[derive(Clone, Debug)]
pub enum TypeErrorKind {
    Incompatible { expected: Type, found: Type },
    UnknownType { name: String },
    WrongArity { expected: usize, found: usize },
    CannotInferGeneric { parameter: String },
    AmbiguousCommonType,
}

#[derive(Clone, Debug)]
pub enum ScopeErrorKind {
    UndeclaredVariable { name: String },
    UndeclaredInstanceVariable { name: String },
    DuplicateDeclaration { name: String },
    UnknownMethod { type_name: String, method: String },
}

#[derive(Clone, Debug)]
pub enum InitErrorKind {
    MissingSuperinitializerCall,
    UsedSelfBeforeFullyInitialized,
    MissingRequiredInitializerOverride { initializer: String },
    NotAllPathsInitializeInstanceVariable { name: String },
    NotAllPathsReturnOrRaise,
}

#[derive(Clone, Debug)]
pub enum PackageErrorKind {
    CircularImport { package: String },
    PackageNotFound { package: String },
    NamespaceCollision { name: String },
}

#[derive(Clone, Debug)]
pub enum AccessErrorKind {
    PrivateMemberAccessedOutsideOwner { member: String },
    MutatingMethodCalledOnImmutableReceiver { method: String },
    OverrideNarrowsAccess { method: String },
}

#[derive(Clone, Debug)]
pub enum CompileError {
    Lex(LexError),
    Parse(ParseError),
    Type(TypeErrorKind, SourcePosition),
    Scope(ScopeErrorKind, SourcePosition),
    Init(InitErrorKind, SourcePosition),
    Package(PackageErrorKind, SourcePosition),
    Access(AccessErrorKind, SourcePosition),
}

impl CompileError {
    pub fn position(&self) -> SourcePosition {
        match self {
            CompileError::Lex(e) => e.position,
            CompileError::Parse(e) => e.position,
            CompileError::Type(_, pos)
            | CompileError::Scope(_, pos)
            | CompileError::Init(_, pos)
            | CompileError::Package(_, pos)
            | CompileError::Access(_, pos) => *pos,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex(e) => write!(f, "{e}"),
            CompileError::Parse(e) => write!(f, "{e}"),
            CompileError::Type(kind, _) => match kind {
                TypeErrorKind::Incompatible { expected, found } => {
                    write!(f, "expected type {expected}, found {found}")
                }
                TypeErrorKind::UnknownType { name } => write!(f, "unknown type {name}"),
                TypeErrorKind::WrongArity { expected, found } => {
                    write!(f, "expected {expected} argument(s), found {found}")
                }
                TypeErrorKind::CannotInferGeneric { parameter } => {
                    write!(f, "could not infer generic parameter {parameter}")
                }
                TypeErrorKind::AmbiguousCommonType => {
                    write!(f, "could not determine a common type for these branches")
                }
            },
            CompileError::Scope(kind, _) => match kind {
                ScopeErrorKind::UndeclaredVariable { name } => write!(f, "undeclared variable {name}"),
                ScopeErrorKind::UndeclaredInstanceVariable { name } => {
                    write!(f, "undeclared instance variable {name}")
                }
                ScopeErrorKind::DuplicateDeclaration { name } => write!(f, "{name} is already declared in this scope"),
                ScopeErrorKind::UnknownMethod { type_name, method } => {
                    write!(f, "{type_name} has no method {method}")
                }
            },
            CompileError::Init(kind, _) => match kind {
                InitErrorKind::MissingSuperinitializerCall => {
                    write!(f, "initializer must call a superclass initializer on every path")
                }
                InitErrorKind::UsedSelfBeforeFullyInitialized => {
                    write!(f, "self used before every instance variable was initialized")
                }
                InitErrorKind::MissingRequiredInitializerOverride { initializer } => {
                    write!(f, "missing required override of initializer {initializer}")
                }
                InitErrorKind::NotAllPathsInitializeInstanceVariable { name } => {
                    write!(f, "not all paths initialize instance variable {name}")
                }
                InitErrorKind::NotAllPathsReturnOrRaise => {
                    write!(f, "not all paths return or raise a value")
                }
            },
            CompileError::Package(kind, _) => match kind {
                PackageErrorKind::CircularImport { package } => write!(f, "circular import of package {package}"),
                PackageErrorKind::PackageNotFound { package } => write!(f, "package {package} not found"),
                PackageErrorKind::NamespaceCollision { name } => write!(f, "{name} is already defined in this namespace"),
            },
            CompileError::Access(kind, _) => match kind {
                AccessErrorKind::PrivateMemberAccessedOutsideOwner { member } => {
                    write!(f, "{member} is private and cannot be accessed here")
                }
                AccessErrorKind::MutatingMethodCalledOnImmutableReceiver { method } => {
                    write!(f, "{method} mutates its receiver, which is not a mutable reference here")
                }
                AccessErrorKind::OverrideNarrowsAccess { method } => {
                    write!(f, "override of {method} narrows its access level below the overridden method's")
                }
            },
        }
    }
}

impl std::error::Error for CompileError {}

impl CompileError {
    pub fn category(&self) -> glyph_common::ErrorCategory {
        use glyph_common::ErrorCategory;
        match self {
            CompileError::Lex(_) => ErrorCategory::Lex,
            CompileError::Parse(_) => ErrorCategory::Parse,
            CompileError::Type(..) => ErrorCategory::Type,
            CompileError::Scope(..) => ErrorCategory::Scope,
            CompileError::Init(..) => ErrorCategory::Init,
            CompileError::Package(..) => ErrorCategory::Package,
            CompileError::Access(..) => ErrorCategory::Access,
        }
    }

    pub fn into_diagnostic(self) -> glyph_common::Diagnostic {
        let category = self.category();
        let position = self.position();
        glyph_common::Diagnostic::error(category, position, self.to_string())
    }
}
