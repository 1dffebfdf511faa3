//! Binary-operator precedence table: "Binary operators consume
//! a precedence table (assigned, fixed precedences: call = 12; `× ÷ %` =
//! 10; `+ −` = 9; shifts = 8; comparisons = 7; equality/identity = 6;
//! bit-and = 5; bit-xor = 4; bit-or = 3; logical-and = 2; logical-or = 1).
//! Prefix precedence is 11."
//!
//! The lexer tags every operator code point with the single `Operator`
//! token kind; the specific operator, and therefore its
//! precedence, is recovered from the token's `value` grapheme at parse
//! time, mirroring how the original keeps one `TokenType::Operator` tag
//! and disambiguates by code point.
//!
//! The concrete code-point assignment here is this crate's own fixed
//! choice.

/// Precedence level. Higher binds tighter.
/// `CALL` is the binding power of the `‼️` callable-invocation operator,
/// `PREFIX` the (otherwise unused by this grammar, kept for completeness)
/// prefix level.
pub const PREC_CALL: u8 = 12;
pub const PREC_PREFIX: u8 = 11;
pub const PREC_MULTIPLICATIVE: u8 = 10;
pub const PREC_ADDITIVE: u8 = 9;
pub const PREC_SHIFT: u8 = 8;
pub const PREC_COMPARISON: u8 = 7;
pub const PREC_EQUALITY: u8 = 6;
pub const PREC_BIT_AND: u8 = 5;
pub const PREC_BIT_XOR: u8 = 4;
pub const PREC_BIT_OR: u8 = 3;
pub const PREC_LOGICAL_AND: u8 = 2;
pub const PREC_LOGICAL_OR: u8 = 1;

/// The call operator.
pub const CALL_OPERATOR: &str = "⁉";

/// Returns the binary-operator precedence for an `Operator` token's value,
/// or `None` if the grapheme is not a recognised binary operator.
pub fn precedence_of(op: &str) -> Option<u8> {
    Some(match op {
        "✖" | "➗" | "👐" => PREC_MULTIPLICATIVE,
        "➕" | "➖" => PREC_ADDITIVE,
        "🤝" | "⭕" => PREC_SHIFT,
        "◀" | "▶" | "⏪" | "⏩" => PREC_COMPARISON,
        "💢" | "❌" => PREC_EQUALITY,
        "👈" => PREC_BIT_AND,
        "👉" => PREC_BIT_XOR,
        "🚮" => PREC_BIT_OR,
        "🙌" => PREC_LOGICAL_AND,
        "😜" => PREC_LOGICAL_OR,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_matches_assigned_levels() {
        assert_eq!(precedence_of("✖"), Some(PREC_MULTIPLICATIVE));
        assert_eq!(precedence_of("➕"), Some(PREC_ADDITIVE));
        assert_eq!(precedence_of("🤝"), Some(PREC_SHIFT));
        assert_eq!(precedence_of("◀"), Some(PREC_COMPARISON));
        assert_eq!(precedence_of("💢"), Some(PREC_EQUALITY));
        assert_eq!(precedence_of("👈"), Some(PREC_BIT_AND));
        assert_eq!(precedence_of("👉"), Some(PREC_BIT_XOR));
        assert_eq!(precedence_of("🚮"), Some(PREC_BIT_OR));
        assert_eq!(precedence_of("🙌"), Some(PREC_LOGICAL_AND));
        assert_eq!(precedence_of("😜"), Some(PREC_LOGICAL_OR));
    }

    #[test]
    fn unknown_operator_has_no_precedence() {
        assert_eq!(precedence_of("?"), None);
    }
}
