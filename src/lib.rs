//! # MBX Catalog
//!
//! A catalog of die-cast model cars. The catalog is a JSON list of items
//! (name, year, code, image, link); everything else is derived from it:
//! a sorted and filtered view for the gallery, an entry-order table for the
//! editor, and per-year buckets for the infographic.
//!
//! # Architecture: One Store, Derived Views
//!
//! ```text
//! data.json ──► source ──► Store ──► visible_items() ──► gallery / list
//!                            │   └──► editor_rows()   ──► editor
//!                            │   └──► YearBuckets     ──► infographic / years
//!                            ▼
//!                  Preferences (sort, view, favorites, theme, language)
//! ```
//!
//! The [`store::Store`] is the only owner of the item list. Views are pure
//! functions of the store; edits go through store methods, never back from
//! rendered output. Filters compose in a fixed order: sorted view, then the
//! search query, then favorites-only.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`item`] | The `Item` record, permissive decode of the three accepted JSON shapes, pretty export |
//! | [`collate`] | Locale-style string ordering with an optional numeric mode (`M2 < M10`) |
//! | [`search`] | Free-text matching over name, code and year, including year ranges |
//! | [`sort`] | Sort keys, header-click toggle semantics, stable comparator |
//! | [`favorites`] | Ordered set of favorite image filenames |
//! | [`years`] | Year-range parsing, per-year buckets, histogram and chart colors |
//! | [`store`] | The item list, its sorted permutation, filters, editor and detail operations |
//! | [`prefs`] | Typed preferences over a key/value backend with legacy-key fallback |
//! | [`i18n`] | Russian, English and Portuguese UI text with fallback to Russian |
//! | [`debounce`] | Last-write-wins delay for search input |
//! | [`source`] | Bulk load, strict import, export and photo discovery on disk |
//! | [`render`] | Static HTML for every view using Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Failure-Proof Preferences
//!
//! Preference storage may be missing, corrupt or read-only. None of that is
//! allowed to stop the catalog: [`prefs::Preferences`] reads fall back to
//! defaults and writes that fail are dropped. Backends still report errors so
//! they can be tested.
//!
//! ## Permissive Bulk Load, Strict Import
//!
//! Startup loads whatever `data_path` holds and treats any failure as an empty
//! catalog. An explicit import reports malformed JSON instead, since the user
//! asked for that file.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup is
//! a build error, and all interpolated item text is escaped.

pub mod collate;
pub mod config;
pub mod debounce;
pub mod favorites;
pub mod i18n;
pub mod item;
pub mod output;
pub mod prefs;
pub mod render;
pub mod search;
pub mod sort;
pub mod source;
pub mod store;
pub mod years;

#[cfg(test)]
pub(crate) mod test_helpers;
