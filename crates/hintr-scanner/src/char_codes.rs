//! Character classification.
//!
//! ASCII identifier characters are answered from two 128-bit sets; anything
//! above U+007F goes to the bundled non-ASCII tables in `unicode_tables`.

use crate::unicode_tables;

const fn ascii_mask(start: u8, end: u8) -> u128 {
    let mut mask = 0u128;
    let mut c = start;
    while c <= end {
        mask |= 1u128 << c;
        c += 1;
    }
    mask
}

/// `$`, `_`, `A-Z`, `a-z`.
pub const ASCII_IDENTIFIER_START: u128 =
    ascii_mask(b'A', b'Z') | ascii_mask(b'a', b'z') | (1u128 << b'$') | (1u128 << b'_');

/// Identifier-start plus `0-9`.
pub const ASCII_IDENTIFIER_PART: u128 = ASCII_IDENTIFIER_START | ascii_mask(b'0', b'9');

#[inline]
fn in_ascii_set(set: u128, c: char) -> bool {
    (set >> (c as u32)) & 1 == 1
}

#[inline]
pub fn is_identifier_start(c: char) -> bool {
    if c.is_ascii() {
        in_ascii_set(ASCII_IDENTIFIER_START, c)
    } else {
        unicode_tables::is_non_ascii_identifier_start(c as u32)
    }
}

#[inline]
pub fn is_identifier_part(c: char) -> bool {
    if c.is_ascii() {
        in_ascii_set(ASCII_IDENTIFIER_PART, c)
    } else {
        unicode_tables::is_non_ascii_identifier_part(c as u32)
    }
}

/// Line terminators: LF, CR, LINE SEPARATOR and PARAGRAPH SEPARATOR.
#[inline]
pub fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whitespace that is not a line terminator, including BOM and `Zs`.
#[inline]
pub fn is_white_space_single_line(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{00A0}'
            | '\u{FEFF}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

#[inline]
pub fn is_octal_digit(c: char) -> bool {
    matches!(c, '0'..='7')
}
