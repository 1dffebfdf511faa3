//! Event-based parser (matklad's technique, grounded on
//! `snow-parser::parser::Parser`): parse functions call `open()`/`advance()`/
//! `close()`; events are replayed into a rowan green tree by `build_tree()`.
//! `open_before()` lets a completed node be wrapped retroactively — used for
//! the postfix/binary Pratt loop in [`expressions`].

pub mod declarations;
pub mod expressions;
pub mod operators;
pub mod types;

use glyph_common::SourcePosition;
use glyph_lexer::token::{Token, TokenKind};

use crate::error::{ParseError, ParseErrorKind};
use crate::syntax_kind::SyntaxKind;

#[derive(Debug)]
enum Event {
    Open { kind: SyntaxKind, forward_parent: Option<usize> },
    Close,
    Advance,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MarkOpened {
    index: usize,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MarkClosed {
    index: usize,
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    events: Vec<Event>,
    group_depth: u32,
    errors: Vec<ParseError>,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0, events: Vec::new(), group_depth: 0, errors: Vec::new() }
    }

    // ── Lookahead ──

    pub(crate) fn current(&self) -> TokenKind {
        self.nth(0)
    }

    pub(crate) fn nth(&self, n: usize) -> TokenKind {
        let mut pos = self.pos;
        let mut remaining = n;
        while pos < self.tokens.len() {
            if self.should_skip(&self.tokens[pos]) {
                pos += 1;
                continue;
            }
            if remaining == 0 {
                return self.tokens[pos].kind;
            }
            remaining -= 1;
            pos += 1;
        }
        TokenKind::EndOfFile
    }

    pub(crate) fn current_value(&self) -> &str {
        let pos = self.skip_to_significant(self.pos);
        self.tokens.get(pos).map(|t| t.value.as_str()).unwrap_or("")
    }

    pub(crate) fn current_position(&self) -> SourcePosition {
        let pos = self.skip_to_significant(self.pos);
        self.tokens.get(pos).map(|t| t.position).unwrap_or_else(|| {
            self.tokens.last().map(|t| t.position).expect("token stream always has an EOF-adjacent token")
        })
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn at_value(&self, value: &str) -> bool {
        self.current() == TokenKind::Identifier && self.current_value() == value
    }

    // ── Node management ──

    pub(crate) fn open(&mut self) -> MarkOpened {
        let mark = MarkOpened { index: self.events.len() };
        self.events.push(Event::Open { kind: SyntaxKind::TOMBSTONE, forward_parent: None });
        mark
    }

    pub(crate) fn open_before(&mut self, completed: MarkClosed) -> MarkOpened {
        let mark = MarkOpened { index: self.events.len() };
        self.events.push(Event::Open { kind: SyntaxKind::TOMBSTONE, forward_parent: None });
        if let Event::Open { forward_parent, .. } = &mut self.events[completed.index] {
            *forward_parent = Some(mark.index);
        }
        mark
    }

    pub(crate) fn close(&mut self, m: MarkOpened, kind: SyntaxKind) -> MarkClosed {
        if let Event::Open { kind: slot, .. } = &mut self.events[m.index] {
            *slot = kind;
        }
        self.events.push(Event::Close);
        MarkClosed { index: m.index }
    }

    // ── Token consumption ──

    pub(crate) fn advance(&mut self) {
        while self.pos < self.tokens.len() && self.should_skip(&self.tokens[self.pos]) {
            self.events.push(Event::Advance);
            self.pos += 1;
        }
        if self.pos < self.tokens.len() {
            self.update_group_depth(self.tokens[self.pos].kind);
            self.events.push(Event::Advance);
            self.pos += 1;
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &'static str) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            self.error_unexpected(expected);
            false
        }
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_trivia_only(&mut self) {
        while self.pos < self.tokens.len() && self.should_skip(&self.tokens[self.pos]) {
            self.events.push(Event::Advance);
            self.pos += 1;
        }
    }

    // ── Error reporting ──

    pub(crate) fn error_unexpected(&mut self, expected: &'static str) {
        let position = self.current_position();
        if self.at(TokenKind::EndOfFile) {
            self.errors.push(ParseError::new(ParseErrorKind::UnexpectedEnd { expected }, position));
        } else {
            let found = self.current();
            self.errors.push(ParseError::new(ParseErrorKind::UnexpectedToken { expected, found }, position));
        }
    }

    pub(crate) fn error_missing_closer(&mut self, opener: &'static str, expected: &'static str) {
        let position = self.current_position();
        self.errors.push(ParseError::new(ParseErrorKind::MissingCloser { opener, expected }, position));
    }

    // ── Grouping depth (for expressions like string interpolation groups) ──

    fn update_group_depth(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::GroupBegin => self.group_depth += 1,
            TokenKind::GroupEnd => self.group_depth = self.group_depth.saturating_sub(1),
            _ => {}
        }
    }

    fn should_skip(&self, token: &Token) -> bool {
        matches!(
            token.kind,
            TokenKind::LineBreak
                | TokenKind::BlankLine
                | TokenKind::SinglelineComment
                | TokenKind::MultilineComment
        )
    }

    fn skip_to_significant(&self, mut pos: usize) -> usize {
        while pos < self.tokens.len() && self.should_skip(&self.tokens[pos]) {
            pos += 1;
        }
        pos
    }

    // ── Tree building ──

    pub(crate) fn build_tree(mut self) -> (rowan::GreenNode, Vec<ParseError>) {
        let mut builder = rowan::GreenNodeBuilder::new();
        let mut token_pos: usize = 0;
        let mut forward_parents: Vec<(usize, SyntaxKind)> = Vec::new();

        let mut i = 0;
        while i < self.events.len() {
            match self.events[i] {
                Event::Open { kind, forward_parent } => {
                    if forward_parent.is_some() {
                        forward_parents.clear();
                        let mut current = i;
                        loop {
                            let (fk, fp) = match self.events[current] {
                                Event::Open { kind, forward_parent } => (kind, forward_parent),
                                _ => unreachable!(),
                            };
                            forward_parents.push((current, fk));
                            match fp {
                                Some(next) => current = next,
                                None => break,
                            }
                        }
                        for &(idx, _) in forward_parents.iter().skip(1) {
                            if let Event::Open { kind, forward_parent } = &mut self.events[idx] {
                                *kind = SyntaxKind::TOMBSTONE;
                                *forward_parent = None;
                            }
                        }
                        if let Event::Open { forward_parent, .. } = &mut self.events[i] {
                            *forward_parent = None;
                        }
                        for &(_, fk) in forward_parents.iter().rev() {
                            if fk != SyntaxKind::TOMBSTONE {
                                builder.start_node(rowan::SyntaxKind(fk as u16));
                            }
                        }
                    } else if kind != SyntaxKind::TOMBSTONE {
                        builder.start_node(rowan::SyntaxKind(kind as u16));
                    }
                }
                Event::Close => builder.finish_node(),
                Event::Advance => {
                    if token_pos < self.tokens.len() {
                        let token = &self.tokens[token_pos];
                        let kind: SyntaxKind = token.kind.into();
                        builder.token(rowan::SyntaxKind(kind as u16), &token.value);
                        token_pos += 1;
                    }
                }
            }
            i += 1;
        }

        (builder.finish(), self.errors)
    }
}
