//! The record store: the item list and everything that filters or orders it.
//!
//! The store owns two views of the catalog:
//!
//! - `data`: entry order. Bulk loads replace it, the editor edits it in place,
//!   new photos are prepended to it.
//! - the sorted view: a permutation of `data` indices, rebuilt from `data`
//!   whenever the sort state or the content changes.
//!
//! Views never read state back from what they rendered; every change goes
//! through a store method.
//!
//! # Filter composition
//!
//! [`Store::visible_items`] takes the sorted view, applies the search query,
//! then the favorites-only filter. The result distinguishes an empty catalog
//! from a catalog whose items are all filtered out, since the two need
//! different messages.

use crate::favorites::Favorites;
use crate::item::{self, Field, Item};
use crate::search;
use crate::sort::{SortKey, SortState};

/// A visible item together with its position in `data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub index: usize,
    pub item: &'a Item,
}

/// Outcome of filter composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visible<'a> {
    /// Nothing is loaded.
    NoData,
    /// Items are loaded but the active filters exclude all of them.
    Excluded { favorites_only: bool },
    /// At least one item survives the filters, in sorted order.
    Items(Vec<Entry<'a>>),
}

impl<'a> Visible<'a> {
    /// The surviving entries; empty for both empty states.
    pub fn entries(&self) -> &[Entry<'a>] {
        match self {
            Visible::Items(entries) => entries,
            _ => &[],
        }
    }

    pub fn items(&self) -> Vec<&'a Item> {
        self.entries().iter().map(|e| e.item).collect()
    }

    /// Translation key of the message for an empty result.
    pub fn empty_message_key(&self) -> Option<&'static str> {
        match self {
            Visible::NoData => Some("loadJson"),
            Visible::Excluded {
                favorites_only: true,
            } => Some("noFavorites"),
            Visible::Excluded {
                favorites_only: false,
            } => Some("searchNoResults"),
            Visible::Items(_) => None,
        }
    }
}

/// One editor row. Editor rows follow entry order and are hidden, not
/// removed, when they do not match the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorRow<'a> {
    pub index: usize,
    pub item: &'a Item,
    pub hidden: bool,
}

/// The item shown in the gallery detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detail<'a> {
    /// Position within the sorted view.
    pub position: usize,
    pub item: &'a Item,
    pub total: usize,
}

impl Detail<'_> {
    /// Previous/next arrows are pointless with a single item.
    pub fn has_navigation(&self) -> bool {
        self.total > 1
    }

    pub fn next_position(&self) -> usize {
        (self.position + 1) % self.total
    }

    pub fn prev_position(&self) -> usize {
        (self.position + self.total - 1) % self.total
    }
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    data: Vec<Item>,
    order: Vec<usize>,
    sort: SortState,
    query: String,
    favorites_only: bool,
    favorites: Favorites,
}

impl Store {
    pub fn new(sort: SortState, favorites: Favorites) -> Self {
        Self {
            sort,
            favorites,
            ..Self::default()
        }
    }

    /// Replace the whole collection.
    pub fn load(&mut self, items: Vec<Item>) {
        self.data = items;
        self.resort();
    }

    pub fn data(&self) -> &[Item] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// All items in sorted order, unfiltered.
    pub fn sorted(&self) -> impl Iterator<Item = &Item> + '_ {
        self.order.iter().map(|&i| &self.data[i])
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Header-click sort selection (toggles direction on the active key).
    pub fn select_sort(&mut self, key: SortKey) {
        self.sort.select(key);
        self.resort();
    }

    pub fn set_sort(&mut self, key: SortKey, descending: bool) {
        self.sort.set_explicit(key, descending);
        self.resort();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn favorites_only(&self) -> bool {
        self.favorites_only
    }

    pub fn set_favorites_only(&mut self, on: bool) {
        self.favorites_only = on;
    }

    pub fn toggle_favorites_only(&mut self) -> bool {
        self.favorites_only = !self.favorites_only;
        self.favorites_only
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Flip favorite status of an image; returns the new status.
    pub fn toggle_favorite(&mut self, image: &str) -> bool {
        self.favorites.toggle(image)
    }

    pub fn is_favorite(&self, item: &Item) -> bool {
        self.favorites.is_favorite(&item.image)
    }

    /// Sorted view, then search, then favorites-only.
    pub fn visible_items(&self) -> Visible<'_> {
        if self.data.is_empty() {
            return Visible::NoData;
        }
        let searching = !self.query.trim().is_empty();
        let entries: Vec<Entry<'_>> = self
            .order
            .iter()
            .map(|&index| Entry {
                index,
                item: &self.data[index],
            })
            .filter(|e| !searching || search::matches(e.item, &self.query))
            .filter(|e| !self.favorites_only || self.is_favorite(e.item))
            .collect();
        if entries.is_empty() {
            Visible::Excluded {
                favorites_only: self.favorites_only,
            }
        } else {
            Visible::Items(entries)
        }
    }

    /// Editor change handler: set one field of one record.
    ///
    /// Returns `false` when `index` is out of range.
    pub fn edit(&mut self, index: usize, field: Field, value: impl Into<String>) -> bool {
        let Some(item) = self.data.get_mut(index) else {
            return false;
        };
        item.set(field, value);
        self.resort();
        true
    }

    /// Prepend one blank record per image filename. Returns how many were added.
    pub fn add_photos<I, S>(&mut self, images: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added: Vec<Item> = images.into_iter().map(Item::blank_photo).collect();
        let count = added.len();
        if count > 0 {
            added.append(&mut self.data);
            self.data = added;
            self.resort();
        }
        count
    }

    /// Commit the current sorted order as the entry order. Entering the editor
    /// does this so rows appear the way the gallery showed them.
    pub fn adopt_sorted_order(&mut self) {
        let reordered: Vec<Item> = self.order.iter().map(|&i| self.data[i].clone()).collect();
        self.data = reordered;
        self.order = (0..self.data.len()).collect();
    }

    /// Editor rows in entry order; rows not matching the query are hidden.
    pub fn editor_rows(&self) -> Vec<EditorRow<'_>> {
        let searching = !self.query.trim().is_empty();
        self.data
            .iter()
            .enumerate()
            .map(|(index, item)| EditorRow {
                index,
                item,
                hidden: searching && !search::matches(item, &self.query),
            })
            .collect()
    }

    /// Detail view at `position` in the sorted view, wrapping in both
    /// directions. `None` for an empty catalog.
    pub fn detail(&self, position: isize) -> Option<Detail<'_>> {
        let total = self.order.len();
        if total == 0 {
            return None;
        }
        let position = position.rem_euclid(total as isize) as usize;
        Some(Detail {
            position,
            item: &self.data[self.order[position]],
            total,
        })
    }

    /// Position of `data[index]` in the sorted view.
    pub fn sorted_position(&self, index: usize) -> Option<usize> {
        self.order.iter().position(|&i| i == index)
    }

    /// Export in entry order.
    pub fn to_json(&self) -> String {
        item::to_json(&self.data)
    }

    fn resort(&mut self) {
        self.order = self.sort.sorted_indices(&self.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{item, names_of, sample_items};
    use pretty_assertions::assert_eq;

    fn store_with(items: Vec<Item>) -> Store {
        let mut store = Store::default();
        store.load(items);
        store
    }

    #[test]
    fn empty_store_reports_no_data() {
        let store = Store::default();
        assert_eq!(store.visible_items(), Visible::NoData);
        assert_eq!(store.visible_items().empty_message_key(), Some("loadJson"));
    }

    #[test]
    fn sorted_view_is_a_permutation_of_data() {
        let store = store_with(sample_items());
        let mut sorted: Vec<&Item> = store.sorted().collect();
        let mut data: Vec<&Item> = store.data().iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        data.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(sorted, data);
    }

    #[test]
    fn visible_items_follow_sort_state() {
        let mut store = store_with(vec![
            item("b", "M10", ""),
            item("a", "M9", ""),
            item("c", "M2", ""),
        ]);
        assert_eq!(names_of(&store.visible_items().items()), vec!["c", "a", "b"]);
        store.select_sort(SortKey::Name);
        assert_eq!(names_of(&store.visible_items().items()), vec!["a", "b", "c"]);
        store.select_sort(SortKey::Name);
        assert_eq!(names_of(&store.visible_items().items()), vec!["c", "b", "a"]);
    }

    #[test]
    fn search_then_favorites() {
        let mut store = store_with(vec![
            Item { image: "1.jpg".into(), ..item("Mini", "A1", "1959") },
            Item { image: "2.jpg".into(), ..item("Mini Moke", "A2", "1964") },
            Item { image: "3.jpg".into(), ..item("Beetle", "A3", "1938") },
        ]);
        store.set_query("mini");
        assert_eq!(store.visible_items().items().len(), 2);
        store.toggle_favorite("2.jpg");
        store.set_favorites_only(true);
        assert_eq!(names_of(&store.visible_items().items()), vec!["Mini Moke"]);
    }

    #[test]
    fn excluded_result_names_the_active_filter() {
        let mut store = store_with(vec![item("Mini", "A1", "1959")]);
        store.set_query("zzz");
        assert_eq!(
            store.visible_items(),
            Visible::Excluded { favorites_only: false }
        );
        assert_eq!(store.visible_items().empty_message_key(), Some("searchNoResults"));

        store.set_query("");
        store.toggle_favorites_only();
        assert_eq!(
            store.visible_items(),
            Visible::Excluded { favorites_only: true }
        );
        assert_eq!(store.visible_items().empty_message_key(), Some("noFavorites"));
    }

    #[test]
    fn edit_updates_record_and_resorts() {
        let mut store = store_with(vec![item("a", "M1", ""), item("b", "M2", "")]);
        assert!(store.edit(0, Field::Code, "M3"));
        assert_eq!(store.data()[0].code, "M3");
        assert_eq!(names_of(&store.visible_items().items()), vec!["b", "a"]);
        assert!(!store.edit(9, Field::Name, "x"));
    }

    #[test]
    fn add_photos_prepends_blank_records() {
        let mut store = store_with(vec![item("a", "M1", "")]);
        assert_eq!(store.add_photos(["new1.jpg", "new2.jpg"]), 2);
        let images: Vec<&str> = store.data().iter().map(|i| i.image.as_str()).collect();
        assert_eq!(images, vec!["new1.jpg", "new2.jpg", ""]);
        assert_eq!(store.data()[0].name, "");
        assert_eq!(store.add_photos(Vec::<String>::new()), 0);
    }

    #[test]
    fn adopt_sorted_order_rewrites_entry_order() {
        let mut store = store_with(vec![item("b", "M10", ""), item("a", "M2", "")]);
        store.adopt_sorted_order();
        assert_eq!(names_of(&store.data().iter().collect::<Vec<_>>()), vec!["a", "b"]);
    }

    #[test]
    fn editor_rows_hide_non_matching_but_keep_order() {
        let mut store = store_with(vec![item("b", "M10", ""), item("a", "M2", "")]);
        store.set_query("b");
        store.set_favorites_only(true);
        let rows = store.editor_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].item.name, "b");
        assert!(!rows[0].hidden);
        assert!(rows[1].hidden);
    }

    #[test]
    fn detail_wraps_in_both_directions() {
        let store = store_with(vec![item("a", "1", ""), item("b", "2", ""), item("c", "3", "")]);
        assert_eq!(store.detail(3).unwrap().item.name, "a");
        assert_eq!(store.detail(-1).unwrap().item.name, "c");
        let d = store.detail(0).unwrap();
        assert_eq!(d.prev_position(), 2);
        assert_eq!(d.next_position(), 1);
        assert!(d.has_navigation());
        assert!(Store::default().detail(0).is_none());
    }

    #[test]
    fn single_item_detail_has_no_navigation() {
        let store = store_with(vec![item("a", "1", "")]);
        assert!(!store.detail(5).unwrap().has_navigation());
    }

    #[test]
    fn export_uses_entry_order() {
        let store = store_with(vec![item("b", "M10", ""), item("a", "M2", "")]);
        let reparsed = item::parse_items(&store.to_json()).unwrap();
        assert_eq!(reparsed[0].name, "b");
    }
}
