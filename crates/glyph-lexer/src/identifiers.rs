//! Named constants for emoji clusters that lex as an ordinary `Identifier`
//! token but are recognised by their string *value* at parse time, since
//! the token-kind enumeration has no dedicated kind for them. The
//! remainder (requiring no dedicated constant because they are ordinary
//! program identifiers) are left to user source text.

/// `🍰` — opens a variable-declaration statement.
pub const VAR_DECL: &str = "🍰";
/// `🍮` — opens a reassignment statement.
pub const REASSIGN: &str = "🍮";
/// `🍦` — opens a frozen-declaration statement.
pub const FROZEN_DECL: &str = "🍦";
/// `🍱` — delimits a multi-protocol type (`🍱 {Protocol}+ 🍱`).
pub const MULTI_PROTOCOL_DELIM: &str = "🍱";
/// `🍬` — prefixes an optional type (`🍬 T`).
pub const OPTIONAL_MARKER: &str = "🍬";
/// `🔲` — prefixes a meta-type (`🔲 T`).
pub const META_TYPE_MARKER: &str = "🔲";
/// `🙅` — the "no gesture" code point the lexer reclassifies into `Else`
/// or `ElseIf`; kept here too since the parser's grammar
/// prose references it by value for documentation/test purposes.
pub const NO_GESTURE: &str = "🙅";
/// `🤷` — the "shrugging person" the lexer reclassifies into `NoValue`.
pub const SHRUGGING_PERSON: &str = "🤷";

// ---- expression-prefix marker identifiers
// ----
//
// §3.1's token-kind list has no dedicated kind for any of these, and §4.2's
// grammar prose does not pin literal glyphs for them (unlike VAR_DECL,
// FROZEN_DECL, etc. above, which the prose does pin) — so, same as the
// operator table in `glyph_syntax::parser::operators`, a fixed, internally
// consistent assignment is made once here, to otherwise-unused emoji
// code points.

/// `🧨` — is-nothingness test prefix (`🧨 expr` → `IsNothingness` AST node).
pub const IS_NOTHINGNESS: &str = "🧨";
/// `🎲` — is-error test prefix (`🎲 expr` → `IsError` AST node).
pub const IS_ERROR: &str = "🎲";
/// `🎁` — unwrap-optional prefix (`🎁 expr` → `Unwrap` AST node).
pub const UNWRAP: &str = "🎁";
/// `🎭` — type-cast prefix (`🎭 Type expr` → `Cast` AST node).
pub const CAST: &str = "🎭";
/// `🏭` — meta-type instantiation prefix (`🏭 🔲Type args❗` → `MetaTypeInstantiation`).
pub const META_TYPE_INSTANTIATION: &str = "🏭";
/// `🔍` — meta-type-from-instance prefix (`🔍 expr` → `MetaTypeFromInstance`).
pub const META_TYPE_FROM_INSTANCE: &str = "🔍";
/// `🎒` — opens a list literal (`🎒 elem* 🎒`).
pub const LIST_LITERAL: &str = "🎒";
/// `📇` — opens a dictionary literal (`📇 (key value)* 📇`).
pub const DICTIONARY_LITERAL: &str = "📇";
/// `🔀` — opens a string-concatenation literal (`🔀 expr* 🔀`).
pub const CONCATENATE: &str = "🔀";
/// `🎣` — capture-of-method prefix, producing a first-class `Callable`
/// value from a method reference without invoking it.
pub const CAPTURE: &str = "🎣";
/// `🍺` — conditional-assignment operator (`var 🍺 optionalExpr`), binds an
/// optional's unwrapped value to `var` and evaluates to a `Bool`.
pub const CONDITIONAL_ASSIGNMENT: &str = "🍺";

/// Every identifier-valued marker declared above. An `Identifier` token
/// carrying one of these values opens its own grammar production and can
/// never double as a method/variable name — the expression postfix loop
/// (`glyph_syntax::parser::expressions`) consults this to tell a chained
/// method call apart from the next statement.
const RESERVED_MARKERS: &[&str] = &[
    VAR_DECL,
    REASSIGN,
    FROZEN_DECL,
    MULTI_PROTOCOL_DELIM,
    OPTIONAL_MARKER,
    META_TYPE_MARKER,
    NO_GESTURE,
    SHRUGGING_PERSON,
    IS_NOTHINGNESS,
    IS_ERROR,
    UNWRAP,
    CAST,
    META_TYPE_INSTANTIATION,
    META_TYPE_FROM_INSTANCE,
    LIST_LITERAL,
    DICTIONARY_LITERAL,
    CONCATENATE,
    CAPTURE,
    CONDITIONAL_ASSIGNMENT,
];

pub fn is_reserved_marker(value: &str) -> bool {
    RESERVED_MARKERS.contains(&value)
}
