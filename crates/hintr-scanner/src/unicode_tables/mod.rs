//! Non-ASCII identifier tables.
//!
//! The tables are built once, on first use, from the bundled range data and
//! shared read-only by every scanner in the process. Lookups are a binary
//! search over sorted, coalesced `(first, last)` code-point ranges.

use once_cell::sync::Lazy;
use std::cmp::Ordering;

pub(crate) mod data;
use data::{NON_ASCII_IDENTIFIER_PART_ONLY, NON_ASCII_IDENTIFIER_START};

/// Sorted, coalesced ranges of code points that may start an identifier.
pub static IDENTIFIER_START_TABLE: Lazy<Vec<(u32, u32)>> =
    Lazy::new(|| normalize(NON_ASCII_IDENTIFIER_START.iter().copied()));

/// Sorted, coalesced ranges of code points that may continue an identifier.
///
/// Built as the union of the start table and the part-only data, so every
/// identifier-start code point is also an identifier-part code point.
pub static IDENTIFIER_PART_TABLE: Lazy<Vec<(u32, u32)>> = Lazy::new(|| {
    normalize(
        NON_ASCII_IDENTIFIER_START
            .iter()
            .chain(NON_ASCII_IDENTIFIER_PART_ONLY)
            .copied(),
    )
});

/// Sort ranges and merge the ones that touch or overlap.
fn normalize(ranges: impl Iterator<Item = (u32, u32)>) -> Vec<(u32, u32)> {
    let mut ranges: Vec<(u32, u32)> = ranges.collect();
    ranges.sort_unstable();
    let mut merged: Vec<(u32, u32)> = Vec::with_capacity(ranges.len());
    for (first, last) in ranges {
        match merged.last_mut() {
            Some(prev) if first <= prev.1.saturating_add(1) => prev.1 = prev.1.max(last),
            _ => merged.push((first, last)),
        }
    }
    merged
}

/// Binary search for `code_point` in a sorted range table.
pub fn lookup_in_table(table: &[(u32, u32)], code_point: u32) -> bool {
    table
        .binary_search_by(|&(first, last)| {
            if last < code_point {
                Ordering::Less
            } else if first > code_point {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
        .is_ok()
}

pub fn is_non_ascii_identifier_start(code_point: u32) -> bool {
    lookup_in_table(&IDENTIFIER_START_TABLE, code_point)
}

pub fn is_non_ascii_identifier_part(code_point: u32) -> bool {
    lookup_in_table(&IDENTIFIER_PART_TABLE, code_point)
}
