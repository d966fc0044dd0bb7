use crate::char_codes::{is_identifier_part, is_identifier_start};
use crate::unicode_tables::data::{NON_ASCII_IDENTIFIER_PART_ONLY, NON_ASCII_IDENTIFIER_START};
use crate::unicode_tables::{
    IDENTIFIER_PART_TABLE, IDENTIFIER_START_TABLE, is_non_ascii_identifier_part,
    is_non_ascii_identifier_start, lookup_in_table,
};

fn linear_contains(ranges: &[(u32, u32)], code_point: u32) -> bool {
    ranges
        .iter()
        .any(|&(first, last)| first <= code_point && code_point <= last)
}

#[test]
fn test_bundled_ranges_are_sorted_and_disjoint() {
    for table in [NON_ASCII_IDENTIFIER_START, NON_ASCII_IDENTIFIER_PART_ONLY] {
        for window in table.windows(2) {
            assert!(window[0].0 <= window[0].1);
            assert!(window[0].1 < window[1].0, "{:X?} overlaps {:X?}", window[0], window[1]);
        }
    }
}

#[test]
fn test_every_start_code_point_is_a_part_code_point() {
    for code_point in 0x80..=0x10FFFFu32 {
        if is_non_ascii_identifier_start(code_point) {
            assert!(
                is_non_ascii_identifier_part(code_point),
                "U+{code_point:04X} starts but cannot continue an identifier"
            );
        }
    }
}

#[test]
fn test_lookup_agrees_with_bundled_data() {
    for code_point in 0x80..=0x10FFFFu32 {
        let start = linear_contains(NON_ASCII_IDENTIFIER_START, code_point);
        let part = start || linear_contains(NON_ASCII_IDENTIFIER_PART_ONLY, code_point);
        assert_eq!(
            lookup_in_table(&IDENTIFIER_START_TABLE, code_point),
            start,
            "start table disagrees at U+{code_point:04X}"
        );
        assert_eq!(
            lookup_in_table(&IDENTIFIER_PART_TABLE, code_point),
            part,
            "part table disagrees at U+{code_point:04X}"
        );
    }
}

#[test]
fn test_ascii_classification() {
    assert!(is_identifier_start('$'));
    assert!(is_identifier_start('_'));
    assert!(is_identifier_start('z'));
    assert!(!is_identifier_start('1'));
    assert!(is_identifier_part('1'));
    assert!(!is_identifier_part('-'));
    assert!(!is_identifier_part(' '));
}

#[test]
fn test_sample_non_ascii_code_points() {
    // Latin, Greek, CJK letters start identifiers.
    assert!(is_identifier_start('é'));
    assert!(is_identifier_start('λ'));
    assert!(is_identifier_start('中'));
    // Combining acute accent and ZWNJ only continue them.
    assert!(!is_identifier_start('\u{0301}'));
    assert!(is_identifier_part('\u{0301}'));
    assert!(!is_identifier_start('\u{200C}'));
    assert!(is_identifier_part('\u{200C}'));
    // No-break space is whitespace.
    assert!(!is_identifier_part('\u{00A0}'));
}
