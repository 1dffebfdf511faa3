//! Tokenizer for the glyph emoji-keyword language.
//!
//! A streaming state machine (an Iterator-over-`Cursor` design) turns a
//! code-point sequence into a finite sequence of [`Token`]s. Grapheme
//! cluster classification is delegated to [`grapheme`]; the single-code
//! -point dispatch table lives in [`tables`]; emoji whose value (not kind)
//! the grammar matches against live in [`identifiers`].
//!
//! [`stream::TokenStream`] wraps a `Lexer` with one-token lookahead and
//! drops insignificant trivia.

pub mod cursor;
pub mod error;
pub mod grapheme;
pub mod identifiers;
pub mod stream;
pub mod tables;
pub mod token;

use rustc_hash::FxHashMap;

use glyph_common::{FileId, SourcePosition};

use cursor::Cursor;
use error::{LexError, LexErrorKind};
use grapheme as gc;
use token::{Token, TokenKind};

/// Tracks nested string-interpolation contexts. A string literal's body is
/// `StringChunk`; a magnet code point inside it promotes to
/// `Interpolation`, whose matching bracket pair (opened immediately after
/// the magnet) is tracked by `depth` so nested groups inside the
/// interpolated expression don't prematurely end it.
enum LexState {
    StringChunk { started: bool, opener: char },
    Interpolation { depth: u32 },
}

pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    file: FileId,
    line: u32,
    column: u32,
    single_tokens: FxHashMap<char, TokenKind>,
    minimal_mode: bool,
    stack: Vec<LexState>,
    /// Set for exactly one produced token: whether a blank line (two
    /// consecutive line breaks) was skipped immediately before it. Consumed
    /// and reset by [`stream::TokenStream`].
    pub(crate) skipped_blank_line: bool,
    consecutive_newlines: u32,
}

/// Code point that opens/closes a string literal. Pinned here since §6.2's
/// include-directive example (`📜 🔤<path>🔤`) gives it a literal value.
pub const STRING_OPENER: char = '🔤';
/// "Magnet" code point promoting a string chunk to an interpolation.
pub const INTERPOLATION_MAGNET: char = '🧲';
/// Escape-sequence introducer inside a string.
pub const ESCAPE_INTRODUCER: char = '\\';
/// Single-line comment opener.
pub const SINGLELINE_COMMENT: char = '💬';
/// Multi-line comment opener/closer (symmetric, like the original's `#= =#`).
pub const MULTILINE_COMMENT: char = '💭';
/// Documentation comment opener/closer.
pub const DOC_COMMENT: char = '📖';
/// Package documentation comment opener/closer.
pub const PACKAGE_DOC_COMMENT: char = '📚';
/// Digit-grouping separator, silently skipped inside numeric literals.
pub const DIGIT_GROUP_SEPARATOR: char = ',';

fn is_ascii_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, file: FileId, minimal_mode: bool) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            file,
            line: 1,
            column: 0,
            single_tokens: tables::single_tokens(),
            minimal_mode,
            stack: Vec::new(),
            skipped_blank_line: false,
            consecutive_newlines: 0,
        }
    }

    pub(crate) fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column, self.file)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.cursor.advance()?;
        if gc::is_newline(c) {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Checks for whitespace at the current position and updates line/column
    /// bookkeeping. Must be called at most once per code point.
    fn detect_whitespace(&mut self) -> bool {
        let c = self.cursor.peek();
        if gc::is_newline(c) {
            self.consecutive_newlines += 1;
            if self.consecutive_newlines >= 2 {
                self.skipped_blank_line = true;
            }
            self.advance();
            true
        } else if gc::is_whitespace(c) {
            self.advance();
            true
        } else {
            if !c.is_whitespace() {
                self.consecutive_newlines = 0;
            }
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.cursor.is_eof() && self.detect_whitespace() {}
    }

    /// Produces at most one token. `Ok(None)` signals a pure state
    /// transition (e.g. closing an interpolation bracket) with nothing to
    /// yield yet; the caller loops. `Ok(None)` at true end-of-input signals
    /// the stream is exhausted.
    fn produce_token(&mut self) -> Result<Option<Token>, LexError> {
        if matches!(self.stack.last(), Some(LexState::StringChunk { .. })) {
            return self.lex_string_chunk();
        }

        self.skip_whitespace();
        if self.cursor.is_eof() {
            return Ok(None);
        }

        let start_pos = self.position();
        let c = self.cursor.peek();

        let token = if let Some(&kind) = self.single_tokens.get(&c) {
            self.advance();
            Some(self.finish_single(kind, c, start_pos)?)
        } else if c == STRING_OPENER {
            self.advance();
            self.stack.push(LexState::StringChunk { started: false, opener: STRING_OPENER });
            return self.lex_string_chunk();
        } else if c == SINGLELINE_COMMENT {
            self.lex_singleline_comment(start_pos)?
        } else if c == MULTILINE_COMMENT {
            self.lex_multiline_comment(start_pos)?
        } else if c == DOC_COMMENT {
            self.lex_delimited_comment(start_pos, DOC_COMMENT, TokenKind::DocumentationComment)?
        } else if c == PACKAGE_DOC_COMMENT {
            self.lex_delimited_comment(start_pos, PACKAGE_DOC_COMMENT, TokenKind::PackageDocumentationComment)?
        } else if is_ascii_digit(c) || c == '-' || c == '+' {
            self.lex_number(start_pos)?
        } else if gc::is_emoji(c) {
            self.lex_identifier(start_pos)?
        } else {
            self.lex_variable(start_pos)?
        };

        if let Some(token) = &token {
            if matches!(token.kind, TokenKind::GroupBegin) {
                if let Some(LexState::Interpolation { depth }) = self.stack.last_mut() {
                    *depth += 1;
                }
            }
            if matches!(token.kind, TokenKind::GroupEnd) {
                if let Some(LexState::Interpolation { depth }) = self.stack.last_mut() {
                    *depth -= 1;
                    if *depth == 0 {
                        self.stack.pop();
                        self.stack.push(LexState::StringChunk { started: true, opener: STRING_OPENER });
                        return Ok(None);
                    }
                }
            }
        }

        Ok(token)
    }

    fn finish_single(&mut self, kind: TokenKind, c: char, pos: SourcePosition) -> Result<Option<Token>, LexError> {
        // `If` immediately preceded (mid token-stream) by the "no gesture"
        // marker was already reclassified by `lex_identifier`; a bare `🍊`
        // reaching here is a genuine `if`.
        let _ = kind;
        Ok(Some(Token::new(kind, c.to_string(), pos)))
    }

    fn lex_number(&mut self, start_pos: SourcePosition) -> Result<Option<Token>, LexError> {
        let start = self.cursor.pos();
        let mut is_double = false;
        let mut is_hex = false;
        let mut saw_digit_after_sign = false;

        if self.cursor.peek() == '-' || self.cursor.peek() == '+' {
            self.advance();
        }

        if self.cursor.peek() == '0' && (self.cursor.peek_next() == 'x' || self.cursor.peek_next() == 'X') {
            self.advance();
            self.advance();
            is_hex = true;
            let hex_start = self.cursor.pos();
            self.cursor.eat_while(|c| is_hex_digit(c) || c == DIGIT_GROUP_SEPARATOR);
            for c in self.advance_consumed_since(hex_start).chars() {
                if c != DIGIT_GROUP_SEPARATOR {
                    saw_digit_after_sign = true;
                }
            }
            if !saw_digit_after_sign {
                return Err(LexError::new(
                    LexErrorKind::MalformedNumber { reason: "hex literal has no digits after 'x'" },
                    start_pos,
                ));
            }
        } else {
            loop {
                let c = self.cursor.peek();
                if is_ascii_digit(c) {
                    self.advance();
                    saw_digit_after_sign = true;
                } else if c == DIGIT_GROUP_SEPARATOR {
                    self.advance();
                } else if c == '.' && is_ascii_digit(self.cursor.peek_next()) && !is_double {
                    is_double = true;
                    self.advance();
                } else {
                    break;
                }
            }
        }

        let _ = is_hex;
        let value = self.cursor.slice(start, self.cursor.pos()).to_string();
        if value.ends_with('x') || value.ends_with('X') {
            return Err(LexError::new(
                LexErrorKind::MalformedNumber { reason: "integer literal must not end with 'x'" },
                start_pos,
            ));
        }
        if value.ends_with('.') {
            return Err(LexError::new(
                LexErrorKind::MalformedNumber { reason: "double literal must not end with '.'" },
                start_pos,
            ));
        }
        let kind = if is_double { TokenKind::Double } else { TokenKind::Integer };
        Ok(Some(Token::new(kind, value, start_pos)))
    }

    /// Re-slices the source between `start` and the cursor's current
    /// position, without re-consuming characters (used after `eat_while`).
    fn advance_consumed_since(&self, start: u32) -> &'src str {
        self.cursor.slice(start, self.cursor.pos())
    }

    fn lex_identifier(&mut self, start_pos: SourcePosition) -> Result<Option<Token>, LexError> {
        let start = self.cursor.pos();
        let mut expecting_join = false;
        let first = self.advance().expect("checked is_emoji at call site");

        if gc::is_regional_indicator(first) {
            if gc::is_regional_indicator(self.cursor.peek()) {
                self.advance();
            }
            let value = self.cursor.slice(start, self.cursor.pos()).to_string();
            return Ok(Some(Token::new(TokenKind::Identifier, value, start_pos)));
        }

        loop {
            let c = self.cursor.peek();
            if gc::is_variation_selector(c) {
                self.advance();
                continue;
            }
            if gc::is_zwj_equivalent(c) {
                self.advance();
                expecting_join = true;
                continue;
            }
            if expecting_join && gc::is_emoji(c) {
                self.advance();
                expecting_join = false;
                continue;
            }
            if !expecting_join && gc::is_skin_tone_modifier(c) {
                self.advance();
                continue;
            }
            break;
        }

        if expecting_join {
            return Err(LexError::new(
                LexErrorKind::InvalidEmojiCluster { reason: "dangling ZWJ at end of cluster" },
                start_pos,
            ));
        }

        let value = self.cursor.slice(start, self.cursor.pos()).to_string();

        if value == identifiers::SHRUGGING_PERSON {
            return Ok(Some(Token::new(TokenKind::NoValue, value, start_pos)));
        }
        if value == identifiers::NO_GESTURE {
            if self.cursor.peek() == '🍊' {
                self.advance();
                return Ok(Some(Token::new(TokenKind::ElseIf, format!("{value}🍊"), start_pos)));
            }
            return Ok(Some(Token::new(TokenKind::Else, value, start_pos)));
        }

        Ok(Some(Token::new(TokenKind::Identifier, value, start_pos)))
    }

    fn lex_variable(&mut self, start_pos: SourcePosition) -> Result<Option<Token>, LexError> {
        let start = self.cursor.pos();
        self.cursor.eat_while(|c| !gc::is_whitespace(c) && !gc::is_emoji(c) && c != STRING_OPENER);
        if self.cursor.pos() == start {
            // Single non-emoji, non-whitespace code point with no
            // continuation still forms a one-character Variable token.
            self.advance();
        }
        let value = self.cursor.slice(start, self.cursor.pos()).to_string();
        Ok(Some(Token::new(TokenKind::Variable, value, start_pos)))
    }

    fn lex_singleline_comment(&mut self, start_pos: SourcePosition) -> Result<Option<Token>, LexError> {
        self.advance();
        let start = self.cursor.pos();
        self.cursor.eat_while(|c| !gc::is_newline(c));
        let value = self.cursor.slice(start, self.cursor.pos()).to_string();
        if self.minimal_mode {
            return Ok(None);
        }
        Ok(Some(Token::new(TokenKind::SinglelineComment, value, start_pos)))
    }

    fn lex_multiline_comment(&mut self, start_pos: SourcePosition) -> Result<Option<Token>, LexError> {
        self.advance();
        let start = self.cursor.pos();
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::new(LexErrorKind::UnexpectedEndOfFile, start_pos));
            }
            if self.cursor.peek() == MULTILINE_COMMENT {
                break;
            }
            self.advance();
        }
        let value = self.cursor.slice(start, self.cursor.pos()).to_string();
        self.advance();
        if self.minimal_mode {
            return Ok(None);
        }
        Ok(Some(Token::new(TokenKind::MultilineComment, value, start_pos)))
    }

    fn lex_delimited_comment(
        &mut self,
        start_pos: SourcePosition,
        closer: char,
        kind: TokenKind,
    ) -> Result<Option<Token>, LexError> {
        self.advance();
        let start = self.cursor.pos();
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::new(LexErrorKind::UnexpectedEndOfFile, start_pos));
            }
            if self.cursor.peek() == closer {
                break;
            }
            self.advance();
        }
        let value = self.cursor.slice(start, self.cursor.pos()).to_string();
        self.advance();
        Ok(Some(Token::new(kind, value, start_pos)))
    }

    fn lex_string_chunk(&mut self) -> Result<Option<Token>, LexError> {
        let (started, opener) = match self.stack.last() {
            Some(LexState::StringChunk { started, opener }) => (*started, *opener),
            _ => unreachable!("lex_string_chunk called outside a string context"),
        };
        let start_pos = self.position();
        let mut value = String::new();

        loop {
            if self.cursor.is_eof() {
                return Err(LexError::new(LexErrorKind::UnexpectedEndOfFile, start_pos));
            }
            let c = self.cursor.peek();
            if c == ESCAPE_INTRODUCER {
                self.advance();
                let escaped = self.cursor.peek();
                let resolved = match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    c if c == opener || c == ESCAPE_INTRODUCER => c,
                    other => {
                        return Err(LexError::new(
                            LexErrorKind::UnrecognizedEscape { sequence: other },
                            start_pos,
                        ));
                    }
                };
                self.advance();
                value.push(resolved);
                continue;
            }
            if c == INTERPOLATION_MAGNET {
                self.advance();
                self.stack.pop();
                self.stack.push(LexState::Interpolation { depth: 0 });
                let kind = if started { TokenKind::MiddleInterpolation } else { TokenKind::BeginInterpolation };
                return Ok(Some(Token::new(kind, value, start_pos)));
            }
            if c == opener {
                self.advance();
                self.stack.pop();
                let kind = if started { TokenKind::EndInterpolation } else { TokenKind::String };
                return Ok(Some(Token::new(kind, value, start_pos)));
            }
            value.push(c);
            self.advance();
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.produce_token() {
                Ok(Some(token)) => return Some(Ok(token)),
                Ok(None) => {
                    if self.cursor.is_eof() && self.stack.is_empty() {
                        return None;
                    }
                    continue;
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_common::FileTable;

    fn lex_all(source: &str) -> Vec<Token> {
        let table = FileTable::new();
        let file = table.intern("test.glyph");
        Lexer::new(source, file, false).map(|r| r.expect("lex error")).collect()
    }

    #[test]
    fn lexes_structural_tokens() {
        let tokens = lex_all("🐇🍇🍉");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Class, TokenKind::BlockBegin, TokenKind::BlockEnd]);
    }

    #[test]
    fn lexes_integer_and_double() {
        let tokens = lex_all("42 3.5");
        assert_eq!(tokens[0].kind, TokenKind::Integer);
        assert_eq!(tokens[0].value, "42");
        assert_eq!(tokens[1].kind, TokenKind::Double);
        assert_eq!(tokens[1].value, "3.5");
    }

    #[test]
    fn rejects_hex_with_no_digits() {
        let table = FileTable::new();
        let file = table.intern("test.glyph");
        let mut lexer = Lexer::new("0x", file, false);
        let err = lexer.next().unwrap().unwrap_err();
        assert!(matches!(err.kind, LexErrorKind::MalformedNumber { .. }));
    }

    #[test]
    fn lexes_hex_literal() {
        let tokens = lex_all("0xFF");
        assert_eq!(tokens[0].kind, TokenKind::Integer);
        assert_eq!(tokens[0].value, "0xFF");
    }

    #[test]
    fn lexes_simple_string() {
        let tokens = lex_all("🔤hi🔤");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].value, "hi");
    }

    #[test]
    fn lexes_string_with_escape() {
        let tokens = lex_all("🔤a\\nb🔤");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].value, "a\nb");
    }

    #[test]
    fn rejects_unrecognized_escape() {
        let table = FileTable::new();
        let file = table.intern("test.glyph");
        let mut lexer = Lexer::new("🔤\\q🔤", file, false);
        let err = lexer.next().unwrap().unwrap_err();
        assert!(matches!(err.kind, LexErrorKind::UnrecognizedEscape { sequence: 'q' }));
    }

    #[test]
    fn lexes_string_interpolation() {
        let tokens = lex_all("🔤a🧲🤜42🤛b🔤");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::BeginInterpolation, TokenKind::Integer, TokenKind::EndInterpolation]
        );
        assert_eq!(tokens[0].value, "a");
        assert_eq!(tokens[2].value, "b");
    }

    #[test]
    fn lexes_emoji_identifier_with_zwj_sequence() {
        let tokens = lex_all("👨\u{200D}👩");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn rejects_dangling_zwj() {
        let table = FileTable::new();
        let file = table.intern("test.glyph");
        let mut lexer = Lexer::new("👨\u{200D}", file, false);
        let err = lexer.next().unwrap().unwrap_err();
        assert!(matches!(err.kind, LexErrorKind::InvalidEmojiCluster { .. }));
    }

    #[test]
    fn reclassifies_no_value_and_else() {
        let tokens = lex_all("🤷 🙅 🙅🍊");
        assert_eq!(tokens[0].kind, TokenKind::NoValue);
        assert_eq!(tokens[1].kind, TokenKind::Else);
        assert_eq!(tokens[2].kind, TokenKind::ElseIf);
    }

    #[test]
    fn lexes_variable_word() {
        let tokens = lex_all("total");
        assert_eq!(tokens[0].kind, TokenKind::Variable);
        assert_eq!(tokens[0].value, "total");
    }

    #[test]
    fn singleline_comment_suppressed_in_minimal_mode() {
        let table = FileTable::new();
        let file = table.intern("test.glyph");
        let tokens: Vec<_> =
            Lexer::new("💬 note\n🐇", file, true).map(|r| r.unwrap()).collect();
        assert_eq!(tokens[0].kind, TokenKind::Class);
    }

    #[test]
    fn tracks_line_and_column() {
        let table = FileTable::new();
        let file = table.intern("test.glyph");
        let tokens: Vec<_> = Lexer::new("🐇\n🍇", file, false).map(|r| r.unwrap()).collect();
        assert_eq!(tokens[0].position.line, 1);
        assert_eq!(tokens[1].position.line, 2);
    }
}
