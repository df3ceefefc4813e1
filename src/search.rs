//! Free-text search with year lookup.
//!
//! One search box serves both text search and "which models were made in
//! year X". A query matches an item when it is a case-insensitive substring
//! of the name or code, or when it matches the year field:
//!
//! | year field    | query   | match | why                              |
//! |---------------|---------|-------|----------------------------------|
//! | `1987-1992`   | `90`    | yes   | 90 → 1990, inside the range      |
//! | `1987-1992`   | `95`    | no    | 1995 is outside                  |
//! | `1987`        | `87`    | yes   | 87 → 1987                        |
//! | `2005`        | `05`    | yes   | `05` is a substring of `2005`    |
//! | `2005`        | `5th`   | no    | 5 → 1905, not 2005               |
//! | `limited ed.` | `ed`    | yes   | plain substring                  |
//!
//! Two-digit queries always map into the 1900s. Post-2000 years are reached
//! only by substring or by typing all four digits.

use crate::item::Item;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RANGE_RE: Regex = Regex::new(r"([0-9]{4})\s*-\s*([0-9]{4})").unwrap();
    static ref SINGLE_RE: Regex = Regex::new(r"[0-9]{4}").unwrap();
}

/// Does `item` match the free-text `query`?
///
/// Blank queries match everything.
pub fn matches(item: &Item, query: &str) -> bool {
    let q = query.trim();
    if q.is_empty() {
        return true;
    }
    let needle = q.to_lowercase();
    item.name.to_lowercase().contains(&needle)
        || year_matches(&item.year, q)
        || item.code.to_lowercase().contains(&needle)
}

/// Match a raw year field against a query.
pub fn year_matches(year: &str, query: &str) -> bool {
    let y = year.trim();
    let q = query.trim();
    if y.is_empty() || q.is_empty() {
        return false;
    }
    if y.to_lowercase().contains(&q.to_lowercase()) {
        return true;
    }
    let Some(n) = parse_leading_int(q) else {
        return false;
    };
    let wanted = if n < 100 { 1900 + n } else { n };

    if let Some(caps) = RANGE_RE.captures(y) {
        let start: i64 = caps[1].parse().unwrap_or_default();
        let end: i64 = caps[2].parse().unwrap_or_default();
        return start <= wanted && wanted <= end;
    }
    SINGLE_RE
        .find(y)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .is_some_and(|single| single == wanted)
}

/// Integer prefix of `s`: optional sign then a run of ASCII digits.
/// Trailing text is ignored (`"87abc"` → 87); no digits → `None`.
fn parse_leading_int(s: &str) -> Option<i64> {
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::item;

    #[test]
    fn blank_query_matches_everything() {
        let it = item("Mini", "M1", "1959");
        assert!(matches(&it, ""));
        assert!(matches(&it, "   "));
        assert!(matches(&Item::default(), "\t"));
    }

    #[test]
    fn name_and_code_are_case_insensitive_substrings() {
        let it = item("Land Rover", "LR-88", "1948");
        assert!(matches(&it, "rover"));
        assert!(matches(&it, "  LAND "));
        assert!(matches(&it, "lr-8"));
        assert!(!matches(&it, "jeep"));
    }

    #[test]
    fn cyrillic_names_match_case_insensitively() {
        let it = item("Москвич 412", "A1", "");
        assert!(matches(&it, "москвич"));
    }

    #[test]
    fn year_range_queries() {
        assert!(year_matches("1987-1992", "90"));
        assert!(!year_matches("1987-1992", "95"));
        assert!(year_matches("1987 - 1992", "1992"));
        assert!(year_matches("1987-1992", "1987"));
    }

    #[test]
    fn single_year_queries() {
        assert!(year_matches("1987", "87"));
        assert!(!year_matches("1987", "99"));
        assert!(year_matches("circa 1965", "65"));
    }

    #[test]
    fn two_digit_queries_map_to_the_1900s() {
        // "05" is a substring of "2005"
        assert!(year_matches("2005", "05"));
        // without the substring, 5 normalizes to 1905, never 2005
        assert!(!year_matches("2005", "5x"));
        assert!(year_matches("1905", "5x"));
        assert!(!year_matches("2087", "87s"));
    }

    #[test]
    fn substring_match_on_free_text_year() {
        assert!(year_matches("Limited Edition", "limited"));
        assert!(!year_matches("Limited Edition", "1987"));
    }

    #[test]
    fn integer_prefix_ignores_trailing_text() {
        assert!(year_matches("1987", "87s"));
        assert!(!year_matches("1987", "s87"));
    }

    #[test]
    fn empty_year_never_matches() {
        assert!(!year_matches("", "1987"));
        assert!(!year_matches("   ", "87"));
    }

    #[test]
    fn year_without_four_digits_does_not_match_numbers() {
        assert!(!year_matches("abc", "55"));
        assert!(!year_matches("'87", "87s"));
    }

    #[test]
    fn matches_uses_year_field() {
        let it = item("B", "X10", "1960-1962");
        assert!(matches(&it, "1961"));
        assert!(matches(&it, "61"));
        assert!(!matches(&it, "1963"));
    }
}
