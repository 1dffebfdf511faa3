//! Typed AST nodes for type expressions.

use super::{ast_node, child_nodes, AstNode};
use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

ast_node!(NominalType, NOMINAL_TYPE);

impl NominalType {
    pub fn name(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::VARIABLE | SyntaxKind::IDENTIFIER))
    }

    pub fn generic_args(&self) -> impl Iterator<Item = TypeRef> + '_ {
        self.syntax
            .children()
            .find(|n| n.kind() == SyntaxKind::GENERIC_ARG_LIST)
            .into_iter()
            .flat_map(|n| child_nodes::<TypeRef>(&n))
    }
}

ast_node!(OptionalType, OPTIONAL_TYPE);

impl OptionalType {
    pub fn inner(&self) -> Option<TypeRef> {
        self.syntax.children().find_map(TypeRef::cast)
    }
}

ast_node!(MetaType, META_TYPE);

impl MetaType {
    pub fn inner(&self) -> Option<TypeRef> {
        self.syntax.children().find_map(TypeRef::cast)
    }
}

ast_node!(ErrorType, ERROR_TYPE);

impl ErrorType {
    pub fn error_enum(&self) -> Option<TypeRef> {
        self.syntax.children().find_map(TypeRef::cast)
    }

    pub fn success_type(&self) -> Option<TypeRef> {
        self.syntax.children().filter_map(TypeRef::cast).nth(1)
    }
}

ast_node!(MultiProtocolType, MULTI_PROTOCOL_TYPE);

impl MultiProtocolType {
    pub fn protocols(&self) -> impl Iterator<Item = TypeRef> + '_ {
        self.syntax.children().filter_map(TypeRef::cast)
    }
}

ast_node!(CallableType, CALLABLE_TYPE);

impl CallableType {
    pub fn param_types(&self) -> impl Iterator<Item = TypeRef> + '_ {
        self.syntax
            .children()
            .find(|n| n.kind() == SyntaxKind::PARAM_TYPE_LIST)
            .into_iter()
            .flat_map(|n| child_nodes::<TypeRef>(&n))
    }

    pub fn return_type(&self) -> Option<TypeRef> {
        self.syntax
            .children()
            .skip_while(|n| n.kind() == SyntaxKind::PARAM_TYPE_LIST)
            .find_map(TypeRef::cast)
    }
}

/// Any type-expression node.
#[derive(Debug, Clone)]
pub enum TypeRef {
    Nominal(NominalType),
    Optional(OptionalType),
    Meta(MetaType),
    Error(ErrorType),
    MultiProtocol(MultiProtocolType),
    Callable(CallableType),
}

impl AstNode for TypeRef {
    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::NOMINAL_TYPE => Some(TypeRef::Nominal(NominalType { syntax: node })),
            SyntaxKind::OPTIONAL_TYPE => Some(TypeRef::Optional(OptionalType { syntax: node })),
            SyntaxKind::META_TYPE => Some(TypeRef::Meta(MetaType { syntax: node })),
            SyntaxKind::ERROR_TYPE => Some(TypeRef::Error(ErrorType { syntax: node })),
            SyntaxKind::MULTI_PROTOCOL_TYPE => Some(TypeRef::MultiProtocol(MultiProtocolType { syntax: node })),
            SyntaxKind::CALLABLE_TYPE => Some(TypeRef::Callable(CallableType { syntax: node })),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            TypeRef::Nominal(n) => &n.syntax,
            TypeRef::Optional(n) => &n.syntax,
            TypeRef::Meta(n) => &n.syntax,
            TypeRef::Error(n) => &n.syntax,
            TypeRef::MultiProtocol(n) => &n.syntax,
            TypeRef::Callable(n) => &n.syntax,
        }
    }
}
