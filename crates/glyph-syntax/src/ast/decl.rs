//! Typed AST nodes for top-level and member declarations,
//! grounded on `snow-parser::ast::item`.

use super::{ast_node, child_node, child_nodes, name_after, AstNode};
use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

ast_node!(Document, DOCUMENT);

impl Document {
    pub fn imports(&self) -> impl Iterator<Item = ImportDecl> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn includes(&self) -> impl Iterator<Item = IncludeDecl> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn classes(&self) -> impl Iterator<Item = ClassDef> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn value_types(&self) -> impl Iterator<Item = ValueTypeDef> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn protocols(&self) -> impl Iterator<Item = ProtocolDef> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn enums(&self) -> impl Iterator<Item = EnumDef> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn extensions(&self) -> impl Iterator<Item = ExtensionDef> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn start_flag(&self) -> Option<StartFlagDecl> {
        child_node(&self.syntax)
    }

    pub fn version(&self) -> Option<VersionDecl> {
        child_node(&self.syntax)
    }
}

ast_node!(ImportDecl, IMPORT_DECL);

impl ImportDecl {
    pub fn package_name(&self) -> Option<SyntaxToken> {
        self.syntax.children_with_tokens().filter_map(|it| it.into_token()).find(|t| t.kind() == SyntaxKind::VARIABLE)
    }

    pub fn symbol_name(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind() == SyntaxKind::IDENTIFIER)
    }
}

ast_node!(IncludeDecl, INCLUDE_DECL);

impl IncludeDecl {
    pub fn path(&self) -> Option<SyntaxToken> {
        self.syntax.children_with_tokens().filter_map(|it| it.into_token()).find(|t| t.kind() == SyntaxKind::STRING)
    }
}

ast_node!(StartFlagDecl, START_FLAG_DECL);

impl StartFlagDecl {
    pub fn body(&self) -> Option<super::Block> {
        child_node(&self.syntax)
    }
}

ast_node!(VersionDecl, VERSION_DECL);

impl VersionDecl {
    fn integers(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| t.kind() == SyntaxKind::INTEGER)
    }

    pub fn major(&self) -> Option<SyntaxToken> {
        self.integers().next()
    }

    pub fn minor(&self) -> Option<SyntaxToken> {
        self.integers().nth(1)
    }
}

ast_node!(RequireBinaryDecl, REQUIRE_BINARY_DECL);

impl RequireBinaryDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        self.syntax.children_with_tokens().filter_map(|it| it.into_token()).find(|t| t.kind() == SyntaxKind::STRING)
    }
}

ast_node!(AliasDecl, ALIAS_DECL);

impl AliasDecl {
    fn names(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| matches!(t.kind(), SyntaxKind::VARIABLE | SyntaxKind::IDENTIFIER))
    }

    pub fn alias_name(&self) -> Option<SyntaxToken> {
        self.names().next()
    }

    pub fn aliased_name(&self) -> Option<SyntaxToken> {
        self.names().nth(1)
    }
}

ast_node!(GenericParamList, GENERIC_PARAM_LIST);
ast_node!(SupertypeClause, SUPERTYPE_CLAUSE);

impl SupertypeClause {
    pub fn supertype(&self) -> Option<super::TypeRef> {
        child_node(&self.syntax)
    }
}

ast_node!(Body, BODY);

impl Body {
    pub fn instance_variables(&self) -> impl Iterator<Item = InstanceVariable> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn methods(&self) -> impl Iterator<Item = MethodDef> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn type_methods(&self) -> impl Iterator<Item = TypeMethodDef> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn initializers(&self) -> impl Iterator<Item = InitializerDef> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn protocol_conformances(&self) -> impl Iterator<Item = ProtocolConformance> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn enum_values(&self) -> impl Iterator<Item = EnumValueDef> + '_ {
        child_nodes(&self.syntax)
    }
}

ast_node!(ClassDef, CLASS_DEF);

impl ClassDef {
    pub fn name(&self) -> Option<SyntaxToken> {
        name_after(&self.syntax, SyntaxKind::CLASS_KW)
    }

    pub fn generic_params(&self) -> Option<GenericParamList> {
        child_node(&self.syntax)
    }

    pub fn supertype_clause(&self) -> Option<SupertypeClause> {
        child_node(&self.syntax)
    }

    pub fn body(&self) -> Option<Body> {
        child_node(&self.syntax)
    }
}

ast_node!(ValueTypeDef, VALUE_TYPE_DEF);

impl ValueTypeDef {
    pub fn name(&self) -> Option<SyntaxToken> {
        name_after(&self.syntax, SyntaxKind::VALUE_TYPE_KW)
    }

    pub fn generic_params(&self) -> Option<GenericParamList> {
        child_node(&self.syntax)
    }

    pub fn body(&self) -> Option<Body> {
        child_node(&self.syntax)
    }
}

ast_node!(ProtocolDef, PROTOCOL_DEF);

impl ProtocolDef {
    pub fn name(&self) -> Option<SyntaxToken> {
        name_after(&self.syntax, SyntaxKind::PROTOCOL_KW)
    }

    pub fn generic_params(&self) -> Option<GenericParamList> {
        child_node(&self.syntax)
    }

    pub fn body(&self) -> Option<Body> {
        child_node(&self.syntax)
    }
}

ast_node!(EnumDef, ENUM_DEF);

impl EnumDef {
    pub fn name(&self) -> Option<SyntaxToken> {
        name_after(&self.syntax, SyntaxKind::ENUMERATION_KW)
    }

    pub fn body(&self) -> Option<Body> {
        child_node(&self.syntax)
    }
}

ast_node!(ExtensionDef, EXTENSION_DEF);

impl ExtensionDef {
    pub fn extended_type(&self) -> Option<super::TypeRef> {
        child_node(&self.syntax)
    }

    pub fn body(&self) -> Option<Body> {
        child_node(&self.syntax)
    }
}

ast_node!(InstanceVariable, INSTANCE_VARIABLE);

impl InstanceVariable {
    pub fn var_type(&self) -> Option<super::TypeRef> {
        child_node(&self.syntax)
    }

    /// The variable's own name follows its type, so it is the last
    /// `VARIABLE`/`IDENTIFIER` token rather than the first.
    pub fn name(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| matches!(t.kind(), SyntaxKind::VARIABLE | SyntaxKind::IDENTIFIER))
            .last()
    }
}

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        child_nodes(&self.syntax)
    }
}

ast_node!(Param, PARAM);

impl Param {
    pub fn is_auto_assigned(&self) -> bool {
        self.syntax.children_with_tokens().filter_map(|it| it.into_token()).any(|t| t.kind() == SyntaxKind::MUTABLE_KW)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::VARIABLE | SyntaxKind::IDENTIFIER))
    }

    pub fn param_type(&self) -> Option<super::TypeRef> {
        child_node(&self.syntax)
    }
}

ast_node!(ReturnTypeClause, RETURN_TYPE_CLAUSE);

impl ReturnTypeClause {
    pub fn return_type(&self) -> Option<super::TypeRef> {
        child_node(&self.syntax)
    }
}

ast_node!(ErrorTypeClause, ERROR_TYPE_CLAUSE);

impl ErrorTypeClause {
    pub fn error_type(&self) -> Option<super::TypeRef> {
        child_node(&self.syntax)
    }
}

fn shared_signature_accessors(syntax: &SyntaxNode) -> (Option<ParamList>, Option<ReturnTypeClause>, Option<ErrorTypeClause>) {
    (child_node(syntax), child_node(syntax), child_node(syntax))
}

ast_node!(MethodDef, METHOD_DEF);

impl MethodDef {
    pub fn name(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::VARIABLE | SyntaxKind::IDENTIFIER | SyntaxKind::OPERATOR))
    }

    pub fn generic_params(&self) -> Option<GenericParamList> {
        child_node(&self.syntax)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        shared_signature_accessors(&self.syntax).0
    }

    pub fn return_clause(&self) -> Option<ReturnTypeClause> {
        shared_signature_accessors(&self.syntax).1
    }

    pub fn error_clause(&self) -> Option<ErrorTypeClause> {
        shared_signature_accessors(&self.syntax).2
    }

    pub fn body(&self) -> Option<super::Block> {
        child_node(&self.syntax)
    }

    /// `None` means a signature-only declaration inside a protocol body.
    pub fn has_body(&self) -> bool {
        self.body().is_some()
    }
}

ast_node!(TypeMethodDef, TYPE_METHOD_DEF);

impl TypeMethodDef {
    pub fn name(&self) -> Option<SyntaxToken> {
        name_after(&self.syntax, SyntaxKind::SELECTION_OPERATOR)
    }

    pub fn generic_params(&self) -> Option<GenericParamList> {
        child_node(&self.syntax)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        shared_signature_accessors(&self.syntax).0
    }

    pub fn return_clause(&self) -> Option<ReturnTypeClause> {
        shared_signature_accessors(&self.syntax).1
    }

    pub fn body(&self) -> Option<super::Block> {
        child_node(&self.syntax)
    }
}

ast_node!(InitializerDef, INITIALIZER_DEF);

impl InitializerDef {
    pub fn initializer_name(&self) -> Option<SyntaxToken> {
        name_after(&self.syntax, SyntaxKind::NEW_KW)
    }

    pub fn generic_params(&self) -> Option<GenericParamList> {
        child_node(&self.syntax)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        shared_signature_accessors(&self.syntax).0
    }

    pub fn error_clause(&self) -> Option<ErrorTypeClause> {
        shared_signature_accessors(&self.syntax).2
    }

    pub fn body(&self) -> Option<super::Block> {
        child_node(&self.syntax)
    }
}

ast_node!(ProtocolConformance, PROTOCOL_CONFORMANCE);

impl ProtocolConformance {
    pub fn conformed_protocol(&self) -> Option<super::TypeRef> {
        child_node(&self.syntax)
    }

    pub fn body(&self) -> Option<Body> {
        child_node(&self.syntax)
    }
}

ast_node!(EnumValueDef, ENUM_VALUE_DEF);

impl EnumValueDef {
    pub fn name(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::VARIABLE | SyntaxKind::IDENTIFIER))
    }

    pub fn backing_value(&self) -> Option<SyntaxToken> {
        self.syntax.children_with_tokens().filter_map(|it| it.into_token()).find(|t| t.kind() == SyntaxKind::INTEGER)
    }
}

/// Any direct member of a [`Body`].
#[derive(Debug, Clone)]
pub enum Member {
    InstanceVariable(InstanceVariable),
    MethodDef(MethodDef),
    TypeMethodDef(TypeMethodDef),
    InitializerDef(InitializerDef),
    ProtocolConformance(ProtocolConformance),
    EnumValueDef(EnumValueDef),
}

impl Member {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::INSTANCE_VARIABLE => Some(Member::InstanceVariable(InstanceVariable { syntax: node })),
            SyntaxKind::METHOD_DEF => Some(Member::MethodDef(MethodDef { syntax: node })),
            SyntaxKind::TYPE_METHOD_DEF => Some(Member::TypeMethodDef(TypeMethodDef { syntax: node })),
            SyntaxKind::INITIALIZER_DEF => Some(Member::InitializerDef(InitializerDef { syntax: node })),
            SyntaxKind::PROTOCOL_CONFORMANCE => Some(Member::ProtocolConformance(ProtocolConformance { syntax: node })),
            SyntaxKind::ENUM_VALUE_DEF => Some(Member::EnumValueDef(EnumValueDef { syntax: node })),
            _ => None,
        }
    }
}
