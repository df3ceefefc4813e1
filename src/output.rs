//! CLI output formatting.
//!
//! Every item is shown by its identity in the current view: positional index,
//! code, name and year. Secondary details (image file, link) go on indented
//! context lines beneath it.
//!
//! # Output Format
//!
//! ## List
//!
//! ```text
//! 001 M2 Mini (1959) ♥
//!     Image: mini.jpg
//! 002 M10 Land Rover (1948-1958)
//!     Link: https://example.com/lr
//!
//! 2 of 3 items
//! ```
//!
//! ## Years
//!
//! ```text
//! 1955 ## 2
//! 1956 # 1
//! 1957  0
//! ```
//!
//! ## Render
//!
//! ```text
//! gallery.html
//! editor.html
//! index.html
//! infographic.html
//!
//! Rendered 3 pages, 12 detail pages, 7 year pages to dist
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::favorites::Favorites;
use crate::i18n::{self, Language};
use crate::item::Item;
use crate::prefs::{Theme, ViewMode};
use crate::render::RenderSummary;
use crate::sort::SortState;
use crate::store::Store;
use crate::years::YearBuckets;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Header line for one item: index, code, name, year.
///
/// ```text
/// 001 M2 Mini (1959)
/// 002 Beetle              // no code, no year
/// ```
fn item_line(index: usize, item: &Item) -> String {
    let mut parts = vec![format_index(index)];
    if !item.code.is_empty() {
        parts.push(item.code.clone());
    }
    parts.push(item.display_name().to_string());
    if !item.year.is_empty() {
        parts.push(format!("({})", item.year));
    }
    parts.join(" ")
}

/// Format the visible items of `store`, in sorted order.
///
/// With `details`, image and link are listed under each item.
pub fn format_list_output(store: &Store, language: Language, details: bool) -> Vec<String> {
    let visible = store.visible_items();
    if let Some(key) = visible.empty_message_key() {
        return vec![i18n::t(language, key, &[])];
    }

    let mut lines = Vec::new();
    for (pos, entry) in visible.entries().iter().enumerate() {
        let mut header = item_line(pos + 1, entry.item);
        if store.is_favorite(entry.item) {
            header.push_str(" ♥");
        }
        lines.push(header);
        if details {
            if !entry.item.image.is_empty() {
                lines.push(format!("{}Image: {}", indent(1), entry.item.image));
            }
            if !entry.item.link.is_empty() {
                lines.push(format!("{}Link: {}", indent(1), entry.item.link));
            }
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "{} of {} items",
        visible.entries().len(),
        store.len()
    ));
    lines
}

pub fn print_list_output(store: &Store, language: Language, details: bool) {
    for line in format_list_output(store, language, details) {
        println!("{}", line);
    }
}

/// One line per year: the year, a `#` per covering item, the count.
pub fn format_year_histogram(buckets: &YearBuckets<'_>) -> Vec<String> {
    let histogram = buckets.histogram();
    histogram
        .bars
        .iter()
        .map(|bar| format!("{} {} {}", bar.year, "#".repeat(bar.count), bar.count))
        .collect()
}

pub fn print_year_histogram(buckets: &YearBuckets<'_>) {
    for line in format_year_histogram(buckets) {
        println!("{}", line);
    }
}

/// Items covering one year, ordered by code.
pub fn format_year_detail(buckets: &YearBuckets<'_>, year: i32, language: Language) -> Vec<String> {
    let year_text = year.to_string();
    let mut lines = vec![i18n::t(language, "yearModalTitle", &[("year", &year_text)])];
    for (pos, item) in buckets.bucket(year).into_iter().enumerate() {
        lines.push(format!("{}{}", indent(1), item_line(pos + 1, item)));
    }
    lines
}

pub fn print_year_detail(buckets: &YearBuckets<'_>, year: i32, language: Language) {
    for line in format_year_detail(buckets, year, language) {
        println!("{}", line);
    }
}

/// Stored preferences as read back through their defaults.
#[derive(Debug, Clone)]
pub struct PrefsSummary<'a> {
    pub path: &'a Path,
    pub sort: SortState,
    pub view_mode: ViewMode,
    pub theme: Theme,
    pub language: Language,
    pub favorites: &'a Favorites,
}

pub fn format_prefs(summary: &PrefsSummary<'_>) -> Vec<String> {
    let direction = if summary.sort.descending {
        "descending"
    } else {
        "ascending"
    };
    let mut lines = vec![
        format!("Preferences: {}", summary.path.display()),
        format!("{}Sort: {} ({})", indent(1), summary.sort.key, direction),
        format!("{}View: {}", indent(1), summary.view_mode),
        format!("{}Theme: {}", indent(1), summary.theme),
        format!("{}Language: {}", indent(1), summary.language),
        format!("{}Favorites: {}", indent(1), summary.favorites.len()),
    ];
    for image in summary.favorites.ids() {
        lines.push(format!("{}{}", indent(2), image));
    }
    lines
}

pub fn print_prefs(summary: &PrefsSummary<'_>) {
    for line in format_prefs(summary) {
        println!("{}", line);
    }
}

pub fn format_render_output(summary: &RenderSummary, output_dir: &Path) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .pages
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    lines.push(String::new());
    lines.push(format!(
        "Rendered {} pages, {} detail pages, {} year pages to {}",
        summary.pages.len(),
        summary.detail_pages,
        summary.year_pages,
        output_dir.display()
    ));
    lines
}

pub fn print_render_output(summary: &RenderSummary, output_dir: &Path) {
    for line in format_render_output(summary, output_dir) {
        println!("{}", line);
    }
}
