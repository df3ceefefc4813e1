//! Catalog configuration.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a user config file placed in the config directory (the
//! current directory unless `--config-dir` says otherwise).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! data_path = "data/data.json"   # Item list loaded at startup
//! img_dir = "img/"               # Prefix for image filenames in rendered pages
//! prefs_path = ".mbx-catalog.json" # Persisted preferences (sort, favorites, ...)
//!
//! [defaults]
//! sort_key = "code"              # name | code | year
//! language = "ru"                # ru | en | pt
//! theme = "light"                # light | dark
//!
//! [search]
//! debounce_ms = 300              # Quiet period before a search is applied
//!
//! [infographic]
//! first_year = 1950
//! last_year = 1999
//! bar_unit_px = 8                # Histogram bar height per item
//! name_width = 25                # Characters of the model name in the matrix
//! chart_color_min = [173, 216, 230]
//! chart_color_max = [0, 102, 204]
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#1a1a1a"
//! text_muted = "#666666"
//! border = "#e0e0e0"
//! accent = "#0066cc"
//! favorite = "#d6336c"
//!
//! [colors.dark]
//! background = "#121212"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! accent = "#4da3ff"
//! favorite = "#ff6b9a"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [defaults]
//! language = "en"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::debounce::Debouncer;
use crate::i18n::Language;
use crate::prefs::{PrefDefaults, Theme};
use crate::sort::SortKey;
use crate::years::{ChartColors, FIRST_YEAR, LAST_YEAR};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Catalog configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Item list loaded at startup.
    pub data_path: String,
    /// Directory prefix for image filenames.
    pub img_dir: String,
    /// File holding persisted preferences.
    pub prefs_path: String,
    /// Fallbacks for preferences that were never set.
    pub defaults: DefaultsConfig,
    /// Search box behavior.
    pub search: SearchConfig,
    /// Year matrix and histogram settings.
    pub infographic: InfographicConfig,
    /// Color schemes for the light and dark themes.
    pub colors: ColorConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_path: "data/data.json".to_string(),
            img_dir: "img/".to_string(),
            prefs_path: ".mbx-catalog.json".to_string(),
            defaults: DefaultsConfig::default(),
            search: SearchConfig::default(),
            infographic: InfographicConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl CatalogConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let info = &self.infographic;
        if info.first_year > info.last_year {
            return Err(ConfigError::Validation(
                "infographic.first_year must not be after infographic.last_year".into(),
            ));
        }
        if info.bar_unit_px == 0 {
            return Err(ConfigError::Validation(
                "infographic.bar_unit_px must be non-zero".into(),
            ));
        }
        if info.name_width == 0 {
            return Err(ConfigError::Validation(
                "infographic.name_width must be non-zero".into(),
            ));
        }
        if self.search.debounce_ms == 0 {
            return Err(ConfigError::Validation(
                "search.debounce_ms must be non-zero".into(),
            ));
        }
        Ok(())
    }

    pub fn pref_defaults(&self) -> PrefDefaults {
        PrefDefaults {
            sort_key: self.defaults.sort_key,
            theme: self.defaults.theme,
            language: self.defaults.language,
        }
    }
}

/// Preference fallbacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub sort_key: SortKey,
    pub language: Language,
    pub theme: Theme,
}

/// Search box settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Milliseconds of quiet input before the filter is applied.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Debouncer for search input using the configured quiet period.
    pub fn debouncer<T>(&self) -> Debouncer<T> {
        Debouncer::new(self.debounce())
    }
}

/// Infographic settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InfographicConfig {
    /// First year column.
    pub first_year: i32,
    /// Last year column (inclusive).
    pub last_year: i32,
    /// Histogram bar height per item, in pixels.
    pub bar_unit_px: u32,
    /// Model names in the matrix are cut to this many characters.
    pub name_width: usize,
    /// RGB of an empty year.
    pub chart_color_min: [u8; 3],
    /// RGB of the busiest year.
    pub chart_color_max: [u8; 3],
}

impl Default for InfographicConfig {
    fn default() -> Self {
        let colors = ChartColors::default();
        Self {
            first_year: FIRST_YEAR,
            last_year: LAST_YEAR,
            bar_unit_px: 8,
            name_width: 25,
            chart_color_min: colors.min,
            chart_color_max: colors.max,
        }
    }
}

impl InfographicConfig {
    pub fn years(&self) -> RangeInclusive<i32> {
        self.first_year..=self.last_year
    }

    pub fn chart_colors(&self) -> ChartColors {
        ChartColors {
            min: self.chart_color_min,
            max: self.chart_color_max,
        }
    }
}

/// Color configuration for the two themes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light theme color scheme.
    #[serde(deserialize_with = "light_scheme")]
    pub light: ColorScheme,
    /// Dark theme color scheme.
    #[serde(deserialize_with = "dark_scheme")]
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
///
/// Fields missing from a `[colors.light]` or `[colors.dark]` table keep that
/// theme's stock color.
#[derive(Debug, Clone, Serialize)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Secondary text (codes, years, placeholders).
    pub text_muted: String,
    /// Card and table borders.
    pub border: String,
    /// Links, selected columns, active buttons.
    pub accent: String,
    /// Filled favorite heart.
    pub favorite: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            accent: "#0066cc".to_string(),
            favorite: "#d6336c".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#121212".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            accent: "#4da3ff".to_string(),
            favorite: "#ff6b9a".to_string(),
        }
    }
}

/// A color table as written, before the theme's stock colors fill the gaps.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColorSchemeTable {
    background: Option<String>,
    text: Option<String>,
    text_muted: Option<String>,
    border: Option<String>,
    accent: Option<String>,
    favorite: Option<String>,
}

impl ColorSchemeTable {
    fn over(self, base: ColorScheme) -> ColorScheme {
        ColorScheme {
            background: self.background.unwrap_or(base.background),
            text: self.text.unwrap_or(base.text),
            text_muted: self.text_muted.unwrap_or(base.text_muted),
            border: self.border.unwrap_or(base.border),
            accent: self.accent.unwrap_or(base.accent),
            favorite: self.favorite.unwrap_or(base.favorite),
        }
    }
}

fn light_scheme<'de, D>(deserializer: D) -> Result<ColorScheme, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(ColorSchemeTable::deserialize(deserializer)?.over(ColorScheme::default_light()))
}

fn dark_scheme<'de, D>(deserializer: D) -> Result<ColorScheme, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(ColorSchemeTable::deserialize(deserializer)?.over(ColorScheme::default_dark()))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CatalogConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<CatalogConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CatalogConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<CatalogConfig, ConfigError> {
    resolve_config(load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# MBX Catalog Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Item list loaded at startup. A missing or unreadable file means an empty
# catalog; use `mbx-catalog import` to load a file with error reporting.
data_path = "data/data.json"

# Prefix for image filenames in rendered pages.
img_dir = "img/"

# Where sort order, view mode, favorites, theme and language are kept.
prefs_path = ".mbx-catalog.json"

# ---------------------------------------------------------------------------
# Fallbacks for preferences that were never set
# ---------------------------------------------------------------------------
[defaults]
sort_key = "code"     # name | code | year
language = "ru"       # ru | en | pt
theme = "light"       # light | dark

# ---------------------------------------------------------------------------
# Search
# ---------------------------------------------------------------------------
[search]
# Quiet period (milliseconds) before typed search text is applied.
debounce_ms = 300

# ---------------------------------------------------------------------------
# Infographic (year matrix + histogram)
# ---------------------------------------------------------------------------
[infographic]
first_year = 1950
last_year = 1999
# Histogram bar height per item, in pixels.
bar_unit_px = 8
# Model names in the matrix are cut to this many characters.
name_width = 25
# Bar color scale: empty year -> busiest year (RGB).
chart_color_min = [173, 216, 230]
chart_color_max = [0, 102, 204]

# ---------------------------------------------------------------------------
# Colors - light theme
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1a1a1a"
text_muted = "#666666"
border = "#e0e0e0"
accent = "#0066cc"
favorite = "#d6336c"

# ---------------------------------------------------------------------------
# Colors - dark theme
# ---------------------------------------------------------------------------
[colors.dark]
background = "#121212"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
accent = "#4da3ff"
favorite = "#ff6b9a"
"##
}

/// Generate CSS custom properties for both themes.
///
/// The light scheme applies by default; the dark scheme applies under
/// `[data-theme="dark"]` on the root element.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
    --color-favorite: {light_favorite};
}}

:root[data-theme="dark"] {{
    --color-bg: {dark_bg};
    --color-text: {dark_text};
    --color-text-muted: {dark_text_muted};
    --color-border: {dark_border};
    --color-accent: {dark_accent};
    --color-favorite: {dark_favorite};
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        light_favorite = colors.light.favorite,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
        dark_favorite = colors.dark.favorite,
    )
}

/// Generate the chart color endpoints as CSS custom properties.
pub fn generate_chart_css(infographic: &InfographicConfig) -> String {
    let [r0, g0, b0] = infographic.chart_color_min;
    let [r1, g1, b1] = infographic.chart_color_max;
    format!(
        r#":root {{
    --chart-color-min: {r0}, {g0}, {b0};
    --chart-color-max: {r1}, {g1}, {b1};
}}"#
    )
}
