//! Binding powers of binary operators (ECMAScript 2020, lowest first).
//!
//! `??` sits below `||` so that `a ?? b || c` groups as `a ?? (b || c)`;
//! `**` is the only right-associative binary operator.

use hintr_scanner::SyntaxKind;

pub(crate) const LOWEST: u8 = 1;

pub(crate) fn binary_precedence(kind: SyntaxKind) -> Option<u8> {
    use SyntaxKind::*;
    Some(match kind {
        QuestionQuestionToken => 1,
        BarBarToken => 2,
        AmpersandAmpersandToken => 3,
        BarToken => 4,
        CaretToken => 5,
        AmpersandToken => 6,
        EqualsEqualsToken
        | ExclamationEqualsToken
        | EqualsEqualsEqualsToken
        | ExclamationEqualsEqualsToken => 7,
        LessThanToken
        | GreaterThanToken
        | LessThanEqualsToken
        | GreaterThanEqualsToken
        | InstanceOfKeyword
        | InKeyword => 8,
        LessThanLessThanToken
        | GreaterThanGreaterThanToken
        | GreaterThanGreaterThanGreaterThanToken => 9,
        PlusToken | MinusToken => 10,
        AsteriskToken | SlashToken | PercentToken => 11,
        AsteriskAsteriskToken => 12,
        _ => return None,
    })
}

pub(crate) fn is_right_associative(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::AsteriskAsteriskToken
}

/// `&&`, `||` and `??` each add a path through the function.
pub(crate) fn is_logical(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::AmpersandAmpersandToken
            | SyntaxKind::BarBarToken
            | SyntaxKind::QuestionQuestionToken
    )
}
