//! Single-code-point dispatch table for structural delimiters, punctuation,
//! and operators -- every token kind that is *not* reached via the
//! emoji-cluster ("Identifier") or digit/string/comment dispatch paths.
//! Where the grammar pins a literal glyph (e.g. `📦` for import, `🍇`/`🍉`
//! for blocks, `‼️` for the call operator) that literal is used verbatim;
//! everything else is a fixed choice made once here.
//!
//! Keyword emoji that the grammar recognises by their *identifier value*
//! rather than a dedicated token kind (variable declaration, reassignment,
//! frozen declaration, the optional/meta-type/multi-protocol type-syntax
//! markers) are intentionally absent from this table; see
//! [`crate::identifiers`] for those.

use rustc_hash::FxHashMap;

use crate::token::TokenKind;

/// Builds the single-code-point dispatch table used by `Lexer::new`.
pub fn single_tokens() -> FxHashMap<char, TokenKind> {
    let mut m = FxHashMap::default();

    // ---- confirmed against Compiler/Lex/Lexer.cpp's keyword group ---------------
    m.insert('❗', TokenKind::EndArgumentList);
    m.insert('❓', TokenKind::EndInterrogativeArgumentList);
    m.insert('🤜', TokenKind::GroupBegin);
    m.insert('🤛', TokenKind::GroupEnd);
    m.insert('🔁', TokenKind::RepeatWhile);
    m.insert('🔂', TokenKind::ForIn);
    m.insert('👍', TokenKind::BooleanTrue);
    m.insert('👎', TokenKind::BooleanFalse);
    m.insert('🆕', TokenKind::New);
    m.insert('👇', TokenKind::This);
    m.insert('☣', TokenKind::Unsafe);
    m.insert('🖍', TokenKind::Mutable);
    m.insert('🐚', TokenKind::Generic);
    m.insert('🐊', TokenKind::Protocol);
    m.insert('🕊', TokenKind::ValueType);
    m.insert('🔘', TokenKind::Enumeration);
    m.insert('📣', TokenKind::SelectionOperator);

    // ---- arithmetic/comparison/logical operator group --------------
    for c in ['➕', '➖', '➗', '✖', '👐', '🤝', '⭕', '💢', '❌', '👈', '👉', '🚮', '🙌', '😜'] {
        m.insert(c, TokenKind::Operator);
    }
    // Less/greater-than family. `⬅️`/`➡️` are reserved for the callable-type
    // arrow and generic production operators instead (see the precedence
    // table in glyph-syntax), so this family uses the double-chevron glyphs.
    for c in ['◀', '▶', '⏪', '⏩'] {
        m.insert(c, TokenKind::Operator);
    }
    m.insert('⁉', TokenKind::Call);

    // ---- grammar keywords pinned to specific glyphs ------------
    m.insert('📦', TokenKind::Package);
    m.insert('🐇', TokenKind::Class);
    m.insert('🍇', TokenKind::BlockBegin);
    m.insert('🍉', TokenKind::BlockEnd);
    m.insert('🍊', TokenKind::If);
    m.insert('🥑', TokenKind::ErrorHandler);
    m.insert('🐐', TokenKind::Super);
    m.insert('🚨', TokenKind::Error);
    m.insert('🍎', TokenKind::Return);
    m.insert('➡', TokenKind::RightProductionOperator);
    m.insert('⬅', TokenKind::LeftProductionOperator);
    m.insert('📜', TokenKind::Include);

    // ---- declaration-level keywords ---------
    m.insert('🔧', TokenKind::Extension);
    m.insert('🏁', TokenKind::StartFlag);
    m.insert('🔖', TokenKind::Version);
    m.insert('🔌', TokenKind::RequireBinary);
    m.insert('🔗', TokenKind::Alias);
    m.insert('🏷', TokenKind::Decorator);

    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_glyphs_resolve_to_expected_kinds() {
        let table = single_tokens();
        assert_eq!(table[&'📦'], TokenKind::Package);
        assert_eq!(table[&'🐇'], TokenKind::Class);
        assert_eq!(table[&'🍇'], TokenKind::BlockBegin);
        assert_eq!(table[&'🍉'], TokenKind::BlockEnd);
        assert_eq!(table[&'⁉'], TokenKind::Call);
        assert_eq!(table[&'🚨'], TokenKind::Error);
    }

    #[test]
    fn keyword_identifier_markers_are_not_single_tokens() {
        let table = single_tokens();
        for marker in ['🍰', '🍮', '🍦', '🍱', '🍬', '🔲'] {
            assert!(!table.contains_key(&marker), "{marker} must lex as Identifier, not a single token");
        }
    }
}
