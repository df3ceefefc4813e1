//! Year aggregation for the infographic view.
//!
//! The infographic is a matrix with one row per visible item and one column
//! per calendar year (1950–1999 by default). A cell is filled when the item's
//! year range covers the column's year. Under the matrix sits a histogram of
//! how many items cover each year.
//!
//! ```text
//!              50 51 52 53 54 55 ...
//! Mini          .  .  .  .  .  #      year = "1955"
//! Land Rover    .  #  #  #  .  .      year = "1951-1953"
//! ─────────────────────────────────
//! count         0  1  1  1  0  1
//! ```
//!
//! Year ranges are parsed from free text: the first `YYYY-YYYY` pattern wins,
//! then the first 4-digit run. Items with no recognizable year are in no
//! bucket but still get a (blank) row in the matrix.
//!
//! Buckets are computed once per render pass, O(years × items). Each bucket is
//! ordered by code with numeric collation, independent of the active sort.

use crate::collate;
use crate::item::Item;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// First year column of the infographic.
pub const FIRST_YEAR: i32 = 1950;
/// Last year column of the infographic (inclusive).
pub const LAST_YEAR: i32 = 1999;

lazy_static! {
    static ref RANGE_RE: Regex = Regex::new(r"([0-9]{4})\s*-\s*([0-9]{4})").unwrap();
    static ref SINGLE_RE: Regex = Regex::new(r"[0-9]{4}").unwrap();
}

/// Inclusive production span of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }
}

/// Extract a year range from free text.
///
/// - `"1965-1970"`, `"1965 - 1970"` → 1965..=1970
/// - `"1987"`, `"approx. 1987"` → 1987..=1987
/// - `"abc"`, `""` → `None`
///
/// A reversed range like `"1970-1965"` is kept as written and covers no year.
pub fn parse_year_range(text: &str) -> Option<YearRange> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(caps) = RANGE_RE.captures(text) {
        return Some(YearRange {
            start: caps[1].parse().ok()?,
            end: caps[2].parse().ok()?,
        });
    }
    let year: i32 = SINGLE_RE.find(text)?.as_str().parse().ok()?;
    Some(YearRange {
        start: year,
        end: year,
    })
}

/// Per-year membership of a filtered item list.
#[derive(Debug, Clone)]
pub struct YearBuckets<'a> {
    years: RangeInclusive<i32>,
    models: Vec<&'a Item>,
    /// One entry per year; each holds row indices into `models`, ordered by code.
    buckets: Vec<Vec<usize>>,
}

impl<'a> YearBuckets<'a> {
    /// Bucket `models` (the visible items, in row order) over `years`.
    pub fn build(models: Vec<&'a Item>, years: RangeInclusive<i32>) -> Self {
        let mut range_cache: HashMap<&str, Option<YearRange>> = HashMap::new();
        let ranges: Vec<Option<YearRange>> = models
            .iter()
            .map(|item| {
                *range_cache
                    .entry(item.year.as_str())
                    .or_insert_with(|| parse_year_range(&item.year))
            })
            .collect();

        let buckets = years
            .clone()
            .map(|year| {
                let mut rows: Vec<usize> = ranges
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.is_some_and(|r| r.contains(year)))
                    .map(|(row, _)| row)
                    .collect();
                rows.sort_by(|&a, &b| collate::compare_numeric(&models[a].code, &models[b].code));
                rows
            })
            .collect();

        Self {
            years,
            models,
            buckets,
        }
    }

    /// Bucket over the default 1950–1999 columns.
    pub fn build_default(models: Vec<&'a Item>) -> Self {
        Self::build(models, FIRST_YEAR..=LAST_YEAR)
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.years.clone()
    }

    /// Matrix rows, in the order they were given.
    pub fn models(&self) -> &[&'a Item] {
        &self.models
    }

    fn slot(&self, year: i32) -> Option<usize> {
        self.years
            .contains(&year)
            .then(|| (year - self.years.start()) as usize)
    }

    /// Row indices covering `year`, ordered by code. Empty outside the range.
    pub fn rows(&self, year: i32) -> &[usize] {
        self.slot(year)
            .map(|s| self.buckets[s].as_slice())
            .unwrap_or_default()
    }

    /// Items covering `year`, ordered by code.
    pub fn bucket(&self, year: i32) -> Vec<&'a Item> {
        self.rows(year).iter().map(|&row| self.models[row]).collect()
    }

    pub fn count(&self, year: i32) -> usize {
        self.rows(year).len()
    }

    /// Is the matrix cell at (`row`, `year`) filled?
    pub fn is_filled(&self, row: usize, year: i32) -> bool {
        self.rows(year).contains(&row)
    }

    pub fn histogram(&self) -> Histogram {
        let bars: Vec<Bar> = self
            .years
            .clone()
            .map(|year| Bar {
                year,
                count: self.count(year),
            })
            .collect();
        let max = bars.iter().map(|b| b.count).max().unwrap_or(0);
        Histogram { bars, max }
    }
}

/// One histogram column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub year: i32,
    pub count: usize,
}

/// Item counts per year with normalization against the busiest year.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bars: Vec<Bar>,
    /// Largest count over all years (0 for an empty list).
    pub max: usize,
}

impl Histogram {
    /// `count / max(1, max)`, in `[0, 1]`. Never divides by zero.
    pub fn intensity(&self, count: usize) -> f64 {
        count as f64 / self.max.max(1) as f64
    }
}

/// Endpoints of the histogram color scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartColors {
    pub min: [u8; 3],
    pub max: [u8; 3],
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            min: [173, 216, 230],
            max: [0, 102, 204],
        }
    }
}

impl ChartColors {
    /// Linear interpolation between `min` (t = 0) and `max` (t = 1).
    pub fn at(&self, t: f64) -> [u8; 3] {
        let t = t.clamp(0.0, 1.0);
        let mut out = [0u8; 3];
        for (i, channel) in out.iter_mut().enumerate() {
            let lo = f64::from(self.min[i]);
            let hi = f64::from(self.max[i]);
            *channel = (lo + t * (hi - lo)).round() as u8;
        }
        out
    }

    /// CSS `rgb(r,g,b)` for intensity `t`.
    pub fn css(&self, t: f64) -> String {
        let [r, g, b] = self.at(t);
        format!("rgb({r},{g},{b})")
    }
}

/// The selected year column. Clicking the selected year clears the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearSelection {
    selected: Option<i32>,
}

impl YearSelection {
    /// Handle a click on a year column; returns the new selection.
    pub fn click(&mut self, year: i32) -> Option<i32> {
        self.selected = if self.selected == Some(year) {
            None
        } else {
            Some(year)
        };
        self.selected
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<i32> {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{codes_of, item};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_ranges_singles_and_garbage() {
        assert_eq!(
            parse_year_range("1965-1970"),
            Some(YearRange { start: 1965, end: 1970 })
        );
        assert_eq!(
            parse_year_range(" 1965 -  1970 "),
            Some(YearRange { start: 1965, end: 1970 })
        );
        assert_eq!(
            parse_year_range("approx. 1987"),
            Some(YearRange { start: 1987, end: 1987 })
        );
        assert_eq!(parse_year_range("abc"), None);
        assert_eq!(parse_year_range("   "), None);
        assert_eq!(parse_year_range("'87"), None);
    }

    #[test]
    fn first_range_wins_over_earlier_single() {
        assert_eq!(
            parse_year_range("1950, then 1960-1962"),
            Some(YearRange { start: 1960, end: 1962 })
        );
    }

    #[test]
    fn range_item_fills_exactly_its_years() {
        let it = item("A", "X1", "1965-1970");
        let buckets = YearBuckets::build_default(vec![&it]);
        let covered: Vec<i32> = buckets.years().filter(|&y| buckets.count(y) == 1).collect();
        assert_eq!(covered, (1965..=1970).collect::<Vec<_>>());
    }

    #[test]
    fn unparseable_year_is_in_no_bucket() {
        let it = item("A", "X1", "abc");
        let buckets = YearBuckets::build_default(vec![&it]);
        assert!(buckets.years().all(|y| buckets.count(y) == 0));
        assert_eq!(buckets.models().len(), 1);
    }

    #[test]
    fn years_outside_the_columns_are_ignored() {
        let old = item("A", "X1", "1930-1952");
        let new = item("B", "X2", "2005");
        let buckets = YearBuckets::build_default(vec![&old, &new]);
        assert_eq!(buckets.count(1950), 1);
        assert_eq!(buckets.count(1953), 0);
        assert_eq!(buckets.count(2005), 0);
        assert!(buckets.rows(1930).is_empty());
    }

    #[test]
    fn bucket_is_ordered_by_numeric_code() {
        let a = item("a", "M10", "1960");
        let b = item("b", "M9", "1960");
        let c = item("c", "M2", "1955-1965");
        let buckets = YearBuckets::build_default(vec![&a, &b, &c]);
        assert_eq!(codes_of(&buckets.bucket(1960)), vec!["M2", "M9", "M10"]);
        assert_eq!(codes_of(&buckets.bucket(1956)), vec!["M2"]);
    }

    #[test]
    fn matrix_cells_follow_row_order() {
        let a = item("a", "M10", "1960");
        let b = item("b", "M9", "1961");
        let buckets = YearBuckets::build_default(vec![&a, &b]);
        assert!(buckets.is_filled(0, 1960));
        assert!(!buckets.is_filled(1, 1960));
        assert!(buckets.is_filled(1, 1961));
    }

    #[test]
    fn empty_list_histogram_is_all_zero() {
        let buckets = YearBuckets::build_default(Vec::new());
        let hist = buckets.histogram();
        assert_eq!(hist.bars.len(), 50);
        assert!(hist.bars.iter().all(|b| b.count == 0));
        assert_eq!(hist.max, 0);
        assert_eq!(hist.intensity(0), 0.0);
    }

    #[test]
    fn intensity_normalizes_against_busiest_year() {
        let a = item("a", "1", "1960-1961");
        let b = item("b", "2", "1960");
        let hist = YearBuckets::build_default(vec![&a, &b]).histogram();
        assert_eq!(hist.max, 2);
        assert_eq!(hist.intensity(2), 1.0);
        assert_eq!(hist.intensity(1), 0.5);
    }

    #[test]
    fn chart_colors_interpolate_and_round() {
        let colors = ChartColors::default();
        assert_eq!(colors.at(0.0), [173, 216, 230]);
        assert_eq!(colors.at(1.0), [0, 102, 204]);
        assert_eq!(colors.at(0.5), [87, 159, 217]);
        assert_eq!(colors.css(1.0), "rgb(0,102,204)");
    }

    #[test]
    fn year_selection_toggles() {
        let mut sel = YearSelection::default();
        assert_eq!(sel.click(1960), Some(1960));
        assert_eq!(sel.click(1965), Some(1965));
        assert_eq!(sel.click(1965), None);
        sel.click(1970);
        sel.clear();
        assert_eq!(sel.selected(), None);
    }
}
