//! Typed AST layer on top of the rowan CST (grounded on
//! `snow-parser::ast::mod`). Each wrapper is a zero-cost newtype around
//! `SyntaxNode`; `cast()` is a single kind check and every accessor walks the
//! rowan tree directly rather than building a parallel owned tree.

pub mod decl;
pub mod expr;
pub mod types;

use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

pub use decl::*;
pub use expr::*;
pub use types::*;

/// Implemented by every typed AST wrapper: downcast from a generic
/// `SyntaxNode` and recover the underlying node.
pub trait AstNode: Sized {
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

/// Generates the `cast`/`syntax` boilerplate for a single-kind wrapper.
macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone)]
        pub struct $name {
            pub(crate) syntax: SyntaxNode,
        }

        impl AstNode for $name {
            fn cast(node: SyntaxNode) -> Option<Self> {
                if node.kind() == SyntaxKind::$kind {
                    Some(Self { syntax: node })
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.syntax
            }
        }
    };
}

pub(crate) use ast_node;

pub fn child_node<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

pub fn child_nodes<'a, N: AstNode + 'a>(parent: &'a SyntaxNode) -> impl Iterator<Item = N> + 'a {
    parent.children().filter_map(N::cast)
}

pub fn child_token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent.children_with_tokens().filter_map(|it| it.into_token()).find(|it| it.kind() == kind)
}

/// Finds the first direct-child token of the given kind whose text matches
/// `value` -- used for identifier-valued markers that share
/// `SyntaxKind::IDENTIFIER` with every other emoji-cluster token.
pub fn child_token_with_text(parent: &SyntaxNode, kind: SyntaxKind, value: &str) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|it| it.kind() == kind && it.text() == value)
}

/// Finds the first direct-child token whose kind is `VARIABLE` or
/// `IDENTIFIER` appearing strictly after the first token of kind
/// `after_kind`. Declaration names are bare tokens rather than a dedicated
/// `NAME` node (the grammar records them positionally), so callers locate
/// them relative to the leading keyword that introduces the declaration.
pub fn name_after(parent: &SyntaxNode, after_kind: SyntaxKind) -> Option<SyntaxToken> {
    let mut seen_after = false;
    for element in parent.children_with_tokens() {
        let Some(token) = element.into_token() else { continue };
        if !seen_after {
            if token.kind() == after_kind {
                seen_after = true;
            }
            continue;
        }
        if matches!(token.kind(), SyntaxKind::VARIABLE | SyntaxKind::IDENTIFIER) {
            return Some(token);
        }
    }
    None
}
