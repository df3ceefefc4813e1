//! Persisted user preferences.
//!
//! Preferences are small string values in a key/value store. Each one is read
//! independently and falls back to its default when the key is missing, the
//! value is invalid, or the store itself fails. Nothing here ever returns an
//! error to the caller: a broken store just means defaults.
//!
//! | preference | key            | legacy key | values                          |
//! |------------|----------------|------------|---------------------------------|
//! | sort key   | `mbx_sortKey`  | `sortKey`  | `name`, `code`, `year`          |
//! | sort dir   | `mbx_sortDesc` | `sortDesc` | `"true"` = descending           |
//! | view mode  | `mbx_viewMode` | `viewMode` | `gallery`, `editor`, `infographic` |
//! | favorites  | `mbx_favorites`| `favorites`| JSON array of image filenames   |
//! | theme      | `mbx_theme`    | `theme`    | `light`, `dark`                 |
//! | language   | `mbx_lang`     | `lang`     | `ru`, `en`, `pt`                |
//!
//! Legacy keys are read only when the current key is absent, and are never
//! written back.
//!
//! # Backends
//!
//! [`PrefsBackend`] abstracts the store. [`JsonFilePrefs`] keeps a flat JSON
//! object on disk; [`MemoryPrefs`] keeps everything in a map.

use crate::favorites::Favorites;
use crate::i18n::Language;
use crate::sort::{SortKey, SortState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SORT_KEY: &str = "mbx_sortKey";
pub const SORT_DESC: &str = "mbx_sortDesc";
pub const VIEW_MODE: &str = "mbx_viewMode";
pub const FAVORITES: &str = "mbx_favorites";
pub const THEME: &str = "mbx_theme";
pub const LANG: &str = "mbx_lang";

const LEGACY_SORT_KEY: &str = "sortKey";
const LEGACY_SORT_DESC: &str = "sortDesc";
const LEGACY_VIEW_MODE: &str = "viewMode";
const LEGACY_FAVORITES: &str = "favorites";
const LEGACY_THEME: &str = "theme";
const LEGACY_LANG: &str = "lang";

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Preference storage unavailable")]
    Unavailable,
}

/// A string key/value store.
pub trait PrefsBackend {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// In-memory backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefs {
    values: BTreeMap<String, String>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PrefsBackend for MemoryPrefs {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Backend storing a flat JSON object of strings in one file.
///
/// A missing or corrupt file loads as empty. Every `set` rewrites the file.
#[derive(Debug, Clone)]
pub struct JsonFilePrefs {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFilePrefs {
    pub fn load(path: &Path) -> Self {
        let values = fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            values,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl PrefsBackend for JsonFilePrefs {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// Mutually exclusive presentations of the same item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Gallery,
    Editor,
    Infographic,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Gallery, ViewMode::Editor, ViewMode::Infographic];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Gallery => "gallery",
            ViewMode::Editor => "editor",
            ViewMode::Infographic => "infographic",
        }
    }

    pub fn parse(s: &str) -> Option<ViewMode> {
        ViewMode::ALL.into_iter().find(|m| m.as_str() == s)
    }

    /// Mode named by a URL fragment (`#editor`, `#infographic`). The gallery
    /// has no fragment.
    pub fn from_fragment(fragment: &str) -> Option<ViewMode> {
        match fragment {
            "#editor" => Some(ViewMode::Editor),
            "#infographic" => Some(ViewMode::Infographic),
            _ => None,
        }
    }

    pub fn fragment(self) -> &'static str {
        match self {
            ViewMode::Gallery => "",
            ViewMode::Editor => "#editor",
            ViewMode::Infographic => "#infographic",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Theme> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fallback values for preferences that are absent or invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrefDefaults {
    pub sort_key: SortKey,
    pub theme: Theme,
    pub language: Language,
}

/// Typed, failure-proof access to a [`PrefsBackend`].
#[derive(Debug, Clone)]
pub struct Preferences<B> {
    backend: B,
    defaults: PrefDefaults,
}

impl<B: PrefsBackend> Preferences<B> {
    pub fn new(backend: B) -> Self {
        Self::with_defaults(backend, PrefDefaults::default())
    }

    pub fn with_defaults(backend: B, defaults: PrefDefaults) -> Self {
        Self { backend, defaults }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Current key, else legacy key. Any backend error reads as absent.
    fn read(&self, key: &str, legacy: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(Some(value)) => Some(value),
            Ok(None) => self.backend.get(legacy).ok().flatten(),
            Err(_) => None,
        }
    }

    /// Write failures are dropped.
    fn write(&mut self, key: &str, value: &str) {
        let _ = self.backend.set(key, value);
    }

    pub fn sort_state(&self) -> SortState {
        let key = self
            .read(SORT_KEY, LEGACY_SORT_KEY)
            .and_then(|k| SortKey::parse(&k))
            .unwrap_or(self.defaults.sort_key);
        let descending = self.read(SORT_DESC, LEGACY_SORT_DESC).as_deref() == Some("true");
        SortState { key, descending }
    }

    pub fn set_sort_state(&mut self, state: SortState) {
        self.write(SORT_KEY, state.key.as_str());
        self.write(SORT_DESC, if state.descending { "true" } else { "false" });
    }

    /// Stored view mode, overridden by a URL fragment when one names a mode.
    pub fn view_mode(&self, fragment: Option<&str>) -> ViewMode {
        if let Some(mode) = fragment.and_then(ViewMode::from_fragment) {
            return mode;
        }
        self.read(VIEW_MODE, LEGACY_VIEW_MODE)
            .and_then(|m| ViewMode::parse(&m))
            .unwrap_or_default()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.write(VIEW_MODE, mode.as_str());
    }

    pub fn favorites(&self) -> Favorites {
        self.read(FAVORITES, LEGACY_FAVORITES)
            .and_then(|raw| Favorites::from_json(&raw).ok())
            .unwrap_or_default()
    }

    pub fn set_favorites(&mut self, favorites: &Favorites) {
        self.write(FAVORITES, &favorites.to_json());
    }

    pub fn theme(&self) -> Theme {
        match self.read(THEME, LEGACY_THEME).as_deref() {
            Some("dark") => Theme::Dark,
            Some("light") => Theme::Light,
            _ => self.defaults.theme,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.write(THEME, theme.as_str());
    }

    pub fn language(&self) -> Language {
        self.read(LANG, LEGACY_LANG)
            .and_then(|l| Language::parse(&l))
            .unwrap_or(self.defaults.language)
    }

    pub fn set_language(&mut self, language: Language) {
        self.write(LANG, language.code());
    }

    /// Store a language given by code. Unknown codes are ignored; returns
    /// whether the code was accepted.
    pub fn set_language_code(&mut self, code: &str) -> bool {
        match Language::parse(code) {
            Some(language) => {
                self.set_language(language);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Storage that fails every call, like a browser with storage disabled.
    struct BrokenPrefs;

    impl PrefsBackend for BrokenPrefs {
        fn get(&self, _key: &str) -> Result<Option<String>, PrefsError> {
            Err(PrefsError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), PrefsError> {
            Err(PrefsError::Unavailable)
        }
    }

    #[test]
    fn broken_storage_reads_defaults_and_drops_writes() {
        let mut prefs = Preferences::new(BrokenPrefs);
        assert_eq!(prefs.sort_state(), SortState::new(SortKey::Code));
        assert_eq!(prefs.view_mode(None), ViewMode::Gallery);
        assert!(prefs.favorites().is_empty());
        assert_eq!(prefs.theme(), Theme::Light);
        assert_eq!(prefs.language(), Language::Ru);

        prefs.set_theme(Theme::Dark);
        prefs.set_favorites(&Favorites::from_ids(["a.jpg"]));
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn broken_storage_still_honors_fragment() {
        let prefs = Preferences::new(BrokenPrefs);
        assert_eq!(prefs.view_mode(Some("#infographic")), ViewMode::Infographic);
    }

    #[test]
    fn invalid_values_fall_back() {
        let backend = MemoryPrefs::new()
            .with(SORT_KEY, "price")
            .with(SORT_DESC, "yes")
            .with(VIEW_MODE, "slideshow")
            .with(FAVORITES, "{not json")
            .with(THEME, "sepia")
            .with(LANG, "de");
        let prefs = Preferences::new(backend);
        assert_eq!(prefs.sort_state(), SortState::new(SortKey::Code));
        assert_eq!(prefs.view_mode(None), ViewMode::Gallery);
        assert!(prefs.favorites().is_empty());
        assert_eq!(prefs.theme(), Theme::Light);
        assert_eq!(prefs.language(), Language::Ru);
    }

    #[test]
    fn legacy_keys_used_only_when_current_absent() {
        let backend = MemoryPrefs::new()
            .with("sortKey", "year")
            .with("sortDesc", "true")
            .with("theme", "dark")
            .with(LANG, "en")
            .with("lang", "pt");
        let prefs = Preferences::new(backend);
        assert_eq!(prefs.sort_state(), SortState { key: SortKey::Year, descending: true });
        assert_eq!(prefs.theme(), Theme::Dark);
        assert_eq!(prefs.language(), Language::En);
    }

    #[test]
    fn legacy_keys_are_not_written_back() {
        let mut prefs = Preferences::new(MemoryPrefs::new().with("viewMode", "editor"));
        assert_eq!(prefs.view_mode(None), ViewMode::Editor);
        assert_eq!(prefs.backend().get(VIEW_MODE).unwrap(), None);
        prefs.set_view_mode(ViewMode::Infographic);
        assert_eq!(prefs.view_mode(None), ViewMode::Infographic);
        assert_eq!(prefs.backend().get("viewMode").unwrap().as_deref(), Some("editor"));
    }

    #[test]
    fn fragment_overrides_stored_mode() {
        let prefs = Preferences::new(MemoryPrefs::new().with(VIEW_MODE, "editor"));
        assert_eq!(prefs.view_mode(Some("#infographic")), ViewMode::Infographic);
        assert_eq!(prefs.view_mode(Some("#unknown")), ViewMode::Editor);
    }

    #[test]
    fn sort_state_roundtrip() {
        let mut prefs = Preferences::new(MemoryPrefs::new());
        prefs.set_sort_state(SortState { key: SortKey::Name, descending: true });
        assert_eq!(prefs.backend().get(SORT_DESC).unwrap().as_deref(), Some("true"));
        assert_eq!(prefs.sort_state(), SortState { key: SortKey::Name, descending: true });
    }

    #[test]
    fn invalid_language_code_is_ignored() {
        let mut prefs = Preferences::new(MemoryPrefs::new().with(LANG, "en"));
        assert!(!prefs.set_language_code("de"));
        assert_eq!(prefs.language(), Language::En);
        assert!(prefs.set_language_code("pt"));
        assert_eq!(prefs.language(), Language::Pt);
    }

    #[test]
    fn custom_defaults_apply() {
        let defaults = PrefDefaults {
            sort_key: SortKey::Name,
            theme: Theme::Dark,
            language: Language::En,
        };
        let prefs = Preferences::with_defaults(MemoryPrefs::new(), defaults);
        assert_eq!(prefs.sort_state().key, SortKey::Name);
        assert_eq!(prefs.theme(), Theme::Dark);
        assert_eq!(prefs.language(), Language::En);
    }

    #[test]
    fn json_file_persists_across_loads() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state/prefs.json");
        let mut prefs = Preferences::new(JsonFilePrefs::load(&path));
        prefs.set_favorites(&Favorites::from_ids(["a.jpg", "b.jpg"]));
        prefs.set_theme(Theme::Dark);

        let reloaded = Preferences::new(JsonFilePrefs::load(&path));
        assert_eq!(reloaded.favorites().ids(), ["a.jpg", "b.jpg"]);
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn corrupt_json_file_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();
        let prefs = Preferences::new(JsonFilePrefs::load(&path));
        assert_eq!(prefs.language(), Language::Ru);
    }
}
