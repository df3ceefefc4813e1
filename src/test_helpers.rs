//! Shared test utilities for the catalog test suite.
//!
//! Provides item builders, bulk extractors for asserting on orderings, and a
//! fixture copy of `fixtures/data.json`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let items = vec![item("Mini", "M9", "1959"), item("Moke", "M10", "1964")];
//! let mut store = Store::default();
//! store.load(items);
//!
//! let visible = store.visible_items().items();
//! assert_eq!(codes_of(&visible), vec!["M9", "M10"]);
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::item::Item;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/data.json` to a temp directory.
///
/// Returns the directory guard and the path of the copied file.
pub fn setup_fixtures() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/data.json");
    let target = tmp.path().join("data.json");
    std::fs::copy(&source, &target).unwrap();
    (tmp, target)
}

// =========================================================================
// Builders
// =========================================================================

/// An item with name, code and year; image and link empty.
pub fn item(name: &str, code: &str, year: &str) -> Item {
    Item {
        name: name.to_string(),
        code: code.to_string(),
        year: year.to_string(),
        ..Item::default()
    }
}

/// A small catalog with distinct images, codes and year shapes.
pub fn sample_items() -> Vec<Item> {
    let rows = [
        ("Mini Cooper", "M10", "1959", "mini.jpg"),
        ("Land Rover", "M2", "1948-1958", "lr.jpg"),
        ("Beetle", "B1", "1938", "beetle.jpg"),
        ("Москвич 412", "A7", "1967-1976", "moskvich.jpg"),
        ("Citroën DS", "C5", "1955 - 1975", "ds.jpg"),
    ];
    rows.iter()
        .map(|&(name, code, year, image)| Item {
            image: image.to_string(),
            ..item(name, code, year)
        })
        .collect()
}

// =========================================================================
// Bulk extractors
// =========================================================================

pub fn names(items: &[Item]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

pub fn codes(items: &[Item]) -> Vec<&str> {
    items.iter().map(|i| i.code.as_str()).collect()
}

pub fn names_of<'a>(items: &[&'a Item]) -> Vec<&'a str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

pub fn codes_of<'a>(items: &[&'a Item]) -> Vec<&'a str> {
    items.iter().map(|i| i.code.as_str()).collect()
}
