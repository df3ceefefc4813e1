//! Locale-aware string ordering.
//!
//! Catalog names mix Latin, accented Latin and Cyrillic text, and codes mix
//! letters with model numbers. Plain `str::cmp` gets both wrong: `"Éclair"`
//! lands after `"Zephyr"` and `"M10"` lands before `"M9"`.
//!
//! Strings are compared in three passes:
//!
//! 1. **Primary**: canonical decomposition with combining marks removed,
//!    lowercased. Punctuation and spaces sort before digits, digits before
//!    letters. `"é"` and `"e"` are equal here, as are `"ё"` and `"е"`; `"й"`
//!    stays a letter of its own between `"и"` and `"к"`.
//! 2. **Secondary**: lowercased decomposition, so accents break ties.
//! 3. **Tertiary**: lowercase before uppercase.
//!
//! In numeric mode maximal ASCII digit runs are compared by value in the
//! primary pass, so `"M2" < "M9" < "M10"`. Other numeric characters such as
//! `"²"` stay single characters and sort after every digit run.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// Compare two strings with plain locale collation.
pub fn compare(a: &str, b: &str) -> Ordering {
    compare_with(a, b, false)
}

/// Compare two strings with numeric-aware locale collation.
pub fn compare_numeric(a: &str, b: &str) -> Ordering {
    compare_with(a, b, true)
}

pub fn compare_with(a: &str, b: &str, numeric: bool) -> Ordering {
    compare_units(&primary_units(a, numeric), &primary_units(b, numeric))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
}

#[derive(Debug, PartialEq, Eq)]
enum Unit {
    /// Digit run with leading zeros stripped.
    Number(String),
    Char(char),
}

fn primary_units(s: &str, numeric: bool) -> Vec<Unit> {
    let folded = fold(s);
    let mut units = Vec::with_capacity(folded.len());
    let mut chars = folded.chars().peekable();
    while let Some(c) = chars.next() {
        if numeric && c.is_ascii_digit() {
            let mut run = String::from(c);
            while let Some(&next) = chars.peek() {
                if !next.is_ascii_digit() {
                    break;
                }
                run.push(next);
                chars.next();
            }
            let trimmed = run.trim_start_matches('0');
            units.push(Unit::Number(trimmed.to_string()));
        } else {
            units.push(Unit::Char(c));
        }
    }
    units
}

/// Strip diacritics and lowercase, keeping `й` intact.
fn fold(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, 'й' | 'Й') {
            out.push('й');
            continue;
        }
        decompose_canonical(c, |d| {
            if !is_combining_mark(d) {
                out.extend(d.to_lowercase());
            }
        });
    }
    out
}

fn char_class(c: char) -> u8 {
    if c.is_numeric() {
        1
    } else if c.is_alphabetic() {
        2
    } else {
        0
    }
}

fn compare_units(a: &[Unit], b: &[Unit]) -> Ordering {
    for (ua, ub) in a.iter().zip(b) {
        let ord = match (ua, ub) {
            (Unit::Number(x), Unit::Number(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
            // Digit runs sort before other numeric characters (`²`, `１`).
            (Unit::Number(_), Unit::Char(c)) => 1u8.cmp(&char_class(*c)).then(Ordering::Less),
            (Unit::Char(c), Unit::Number(_)) => char_class(*c).cmp(&1).then(Ordering::Greater),
            (Unit::Char(x), Unit::Char(y)) => (char_class(*x), *x).cmp(&(char_class(*y), *y)),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn tertiary_key(s: &str) -> Vec<(bool, char)> {
    s.nfd().map(|c| (c.is_uppercase(), c)).collect()
}
