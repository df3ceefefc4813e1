//! Reading and writing item lists.
//!
//! Two read paths with deliberately different failure behavior:
//!
//! - [`load_or_empty`] is the startup/bulk load. Any failure (missing file,
//!   unreadable file, malformed JSON) yields an empty list, which the views
//!   show as "load a file" rather than an error.
//! - [`import_file`] is a user-chosen import. Malformed JSON is reported so
//!   the user learns why nothing changed.
//!
//! [`discover_photos`] supports adding photos by directory.

use crate::item::{self, Item};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions recognized as photos, compared case-insensitively.
const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "avif"];

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Bulk load: the items in `path`, or an empty list on any failure.
pub fn load_or_empty(path: &Path) -> Vec<Item> {
    fs::read_to_string(path)
        .ok()
        .and_then(|text| item::parse_items(&text).ok())
        .unwrap_or_default()
}

/// User import: the items in `path`, or the reason they could not be read.
///
/// Well-formed JSON of an unrecognized shape imports as an empty list.
pub fn import_file(path: &Path) -> Result<Vec<Item>, SourceError> {
    let text = fs::read_to_string(path)?;
    Ok(item::parse_items(&text)?)
}

/// Write items as pretty JSON, creating parent directories as needed.
pub fn write_items(path: &Path, items: &[Item]) -> Result<(), SourceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, item::to_json(items))?;
    Ok(())
}

/// Photo files under `dir`, as sorted paths relative to `dir` with `/`
/// separators.
pub fn discover_photos(dir: &Path) -> Result<Vec<String>, SourceError> {
    if !dir.is_dir() {
        return Err(SourceError::NotADirectory(dir.to_path_buf()));
    }
    let mut photos = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_photo(entry.path()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        photos.push(name);
    }
    photos.sort();
    Ok(photos)
}

fn is_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| PHOTO_EXTENSIONS.contains(&e.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::setup_fixtures;
    use tempfile::TempDir;

    #[test]
    fn fixture_catalog_loads() {
        let (_tmp, path) = setup_fixtures();
        let items = import_file(&path).unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].name, "Mini Cooper");
        assert_eq!(load_or_empty(&path), items);
    }

    #[test]
    fn missing_file_loads_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(load_or_empty(&tmp.path().join("data.json")).is_empty());
    }

    #[test]
    fn malformed_file_loads_empty_but_import_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        fs::write(&path, "[{\"name\": ").unwrap();
        assert!(load_or_empty(&path).is_empty());
        assert!(matches!(import_file(&path), Err(SourceError::Json(_))));
    }

    #[test]
    fn import_accepts_wrapped_shapes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        fs::write(&path, "{\"data\": [{\"name\": \"A\"}]}").unwrap();
        assert_eq!(import_file(&path).unwrap()[0].name, "A");
    }

    #[test]
    fn import_of_unknown_shape_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        fs::write(&path, "{\"rows\": []}").unwrap();
        assert!(import_file(&path).unwrap().is_empty());
    }

    #[test]
    fn write_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out/data.json");
        let items = vec![Item::blank_photo("1.jpg")];
        write_items(&path, &items).unwrap();
        assert_eq!(load_or_empty(&path), items);
    }

    #[test]
    fn discovers_photos_recursively_and_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("b.JPG"), "").unwrap();
        fs::write(tmp.path().join("a.png"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::write(tmp.path().join("sub/c.webp"), "").unwrap();
        assert_eq!(
            discover_photos(tmp.path()).unwrap(),
            vec!["a.png", "b.JPG", "sub/c.webp"]
        );
    }

    #[test]
    fn discover_rejects_files() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.jpg");
        fs::write(&file, "").unwrap();
        assert!(matches!(
            discover_photos(&file),
            Err(SourceError::NotADirectory(_))
        ));
    }
}
