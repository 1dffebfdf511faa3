//! Rowan-based concrete syntax tree types, grounded on
//! `snow-parser::cst::{SnowLanguage, SyntaxNode, SyntaxToken}`.

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GlyphLanguage {}

impl rowan::Language for GlyphLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        // Safety: SyntaxKind is #[repr(u16)] and rowan only ever hands back
        // raw kinds we previously produced via kind_to_raw.
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

pub type SyntaxNode = rowan::SyntaxNode<GlyphLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<GlyphLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<GlyphLanguage>;
