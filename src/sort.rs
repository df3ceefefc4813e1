//! Sort keys, sort state and the item comparator.
//!
//! The active sort is a `(key, descending)` pair. Clicking a column header
//! goes through [`SortState::select`], which flips the direction when the key
//! is already active and resets to ascending otherwise. Dropdown-style
//! controls set both halves directly with [`SortState::set_explicit`].
//!
//! Sorting is stable in both directions: descending negates the comparator
//! rather than reversing the output, so ties keep their entry order.

use crate::collate;
use crate::item::{Field, Item};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    #[default]
    Code,
    Year,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Name, SortKey::Code, SortKey::Year];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Code => "code",
            SortKey::Year => "year",
        }
    }

    pub fn parse(s: &str) -> Option<SortKey> {
        SortKey::ALL.into_iter().find(|k| k.as_str() == s)
    }

    pub fn field(self) -> Field {
        match self {
            SortKey::Name => Field::Name,
            SortKey::Code => Field::Code,
            SortKey::Year => Field::Year,
        }
    }

    /// Codes embed model numbers and compare numerically.
    pub fn is_numeric(self) -> bool {
        self == SortKey::Code
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: SortKey,
    pub descending: bool,
}

impl SortState {
    pub fn new(key: SortKey) -> Self {
        Self {
            key,
            descending: false,
        }
    }

    /// Header-click semantics: same key toggles direction, new key is ascending.
    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.descending = !self.descending;
        } else {
            self.key = key;
            self.descending = false;
        }
    }

    pub fn set_explicit(&mut self, key: SortKey, descending: bool) {
        self.key = key;
        self.descending = descending;
    }

    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        let ord = compare(a, b, self.key);
        if self.descending { ord.reverse() } else { ord }
    }

    /// Indices of `items` in sorted order. Ties keep their original order.
    pub fn sorted_indices(&self, items: &[Item]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by(|&a, &b| self.compare(&items[a], &items[b]));
        order
    }
}

/// Ascending comparison of two items by `key`.
pub fn compare(a: &Item, b: &Item, key: SortKey) -> Ordering {
    let field = key.field();
    collate::compare_with(a.get(field), b.get(field), key.is_numeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{codes, item, names};
    use pretty_assertions::assert_eq;

    fn sorted(items: &[Item], state: SortState) -> Vec<Item> {
        state
            .sorted_indices(items)
            .into_iter()
            .map(|i| items[i].clone())
            .collect()
    }

    #[test]
    fn code_sort_is_numeric_aware() {
        let items = vec![item("a", "M9", ""), item("b", "M10", ""), item("c", "M2", "")];
        let out = sorted(&items, SortState::new(SortKey::Code));
        assert_eq!(codes(&out), vec!["M2", "M9", "M10"]);
    }

    #[test]
    fn name_sort_is_not_numeric() {
        let items = vec![item("M9", "", ""), item("M10", "", ""), item("M2", "", "")];
        let out = sorted(&items, SortState::new(SortKey::Name));
        assert_eq!(names(&out), vec!["M10", "M2", "M9"]);
    }

    #[test]
    fn year_sort_uses_raw_text() {
        let items = vec![
            item("a", "", "1970"),
            item("b", "", "1965-1980"),
            item("c", "", ""),
        ];
        let out = sorted(&items, SortState::new(SortKey::Year));
        assert_eq!(names(&out), vec!["c", "b", "a"]);
    }

    #[test]
    fn descending_reverses_order() {
        let items = vec![item("a", "M9", ""), item("b", "M10", ""), item("c", "M2", "")];
        let mut state = SortState::new(SortKey::Code);
        state.set_explicit(SortKey::Code, true);
        assert_eq!(codes(&sorted(&items, state)), vec!["M10", "M9", "M2"]);
    }

    #[test]
    fn select_same_key_toggles_direction() {
        let mut state = SortState::new(SortKey::Code);
        state.select(SortKey::Name);
        assert_eq!(state, SortState { key: SortKey::Name, descending: false });
        state.select(SortKey::Name);
        assert_eq!(state, SortState { key: SortKey::Name, descending: true });
        state.select(SortKey::Name);
        assert!(!state.descending);
    }

    #[test]
    fn select_new_key_resets_to_ascending() {
        let mut state = SortState::new(SortKey::Name);
        state.set_explicit(SortKey::Name, true);
        state.select(SortKey::Year);
        assert_eq!(state, SortState { key: SortKey::Year, descending: false });
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let items = vec![
            item("first", "X1", ""),
            item("z", "X0", ""),
            item("second", "X1", ""),
            item("third", "x1", ""),
        ];
        // "X1" and "x1" differ only in case; keep them out of the tie group
        let asc = sorted(&items, SortState::new(SortKey::Code));
        assert_eq!(names(&asc), vec!["z", "third", "first", "second"]);

        let desc = sorted(&items, SortState { key: SortKey::Code, descending: true });
        assert_eq!(names(&desc), vec!["first", "second", "third", "z"]);
    }

    #[test]
    fn missing_fields_sort_as_empty() {
        let items = vec![item("b", "", ""), item("", "", ""), item("a", "", "")];
        let out = sorted(&items, SortState::new(SortKey::Name));
        assert_eq!(names(&out), vec!["", "a", "b"]);
    }

    #[test]
    fn parse_accepts_only_known_keys() {
        assert_eq!(SortKey::parse("year"), Some(SortKey::Year));
        assert_eq!(SortKey::parse("price"), None);
        assert_eq!(SortKey::default(), SortKey::Code);
    }
}
