//! The favorites set: image filenames the user has starred.
//!
//! Favorites are keyed by image filename, not by list position, so they
//! survive re-sorting and reloads. A favorite whose image is no longer in the
//! catalog is kept; it is harmless and reappears if the image comes back.

use serde::{Deserialize, Serialize};

/// Ordered set of image filenames. No duplicates: toggling an id that is
/// present removes it, otherwise appends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    ids: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored ids, dropping duplicates (first occurrence wins).
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut favorites = Self::new();
        for id in ids {
            let id = id.into();
            if !favorites.is_favorite(&id) {
                favorites.ids.push(id);
            }
        }
        favorites
    }

    /// Decode the persisted JSON array form.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let ids: Vec<String> = serde_json::from_str(raw)?;
        Ok(Self::from_ids(ids))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.ids).expect("string list must serialize")
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.iter().any(|f| f == id)
    }

    /// Flip membership of `id`. Returns whether it is a favorite afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|f| f == id) {
            Some(pos) => {
                self.ids.remove(pos);
                false
            }
            None => {
                self.ids.push(id.to_string());
                true
            }
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
