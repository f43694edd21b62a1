//! Card-asset providers.
//!
//! An `AssetProvider` turns a theme and a count into that many distinct
//! face identifiers, or fails with a single `ResourceError`. How assets are
//! fetched is the provider's business; the deck builder only checks that it
//! got enough distinct faces.

use rustc_hash::FxHashMap;

use super::card::AssetRef;
use crate::core::{ResourceError, ThemeId};

/// Source of unique card faces.
pub trait AssetProvider {
    /// Return `count` distinct faces for `theme`.
    ///
    /// Fails if the theme is unknown or cannot supply that many.
    fn unique_assets(&mut self, theme: &ThemeId, count: usize) -> Result<Vec<AssetRef>, ResourceError>;
}

const ANIMALS: [&str; 14] = [
    "cat", "dog", "fox", "owl", "bear", "frog", "lion", "panda", "tiger", "koala", "otter",
    "rabbit", "penguin", "hedgehog",
];

const FRUITS: [&str; 12] = [
    "apple", "banana", "cherry", "grape", "kiwi", "lemon", "mango", "melon", "peach", "pear",
    "plum", "strawberry",
];

const SPACE: [&str; 8] = [
    "comet", "galaxy", "moon", "nebula", "planet", "rocket", "satellite", "star",
];

/// In-memory theme catalog.
///
/// Ships with `animals` (14 faces), `fruits` (12) and `space` (8). Faces are
/// keyed `"<theme>/<name>"`.
#[derive(Clone, Debug)]
pub struct ThemeCatalog {
    themes: FxHashMap<ThemeId, Vec<AssetRef>>,
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::empty()
            .with_theme("animals", ANIMALS)
            .with_theme("fruits", FRUITS)
            .with_theme("space", SPACE)
    }
}

impl ThemeCatalog {
    /// Catalog with the built-in themes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with no themes.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            themes: FxHashMap::default(),
        }
    }

    /// Register (or replace) a theme (builder pattern).
    ///
    /// Duplicate names within a theme collapse to one face.
    #[must_use]
    pub fn with_theme<I, S>(mut self, theme: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let theme = ThemeId::new(theme);
        let mut faces: Vec<AssetRef> = Vec::new();
        for name in names {
            let face = AssetRef::new(format!("{}/{}", theme, name.as_ref()));
            if !faces.contains(&face) {
                faces.push(face);
            }
        }
        self.themes.insert(theme, faces);
        self
    }

    /// Number of distinct faces a theme offers.
    #[must_use]
    pub fn theme_size(&self, theme: &ThemeId) -> Option<usize> {
        self.themes.get(theme).map(Vec::len)
    }
}

impl AssetProvider for ThemeCatalog {
    fn unique_assets(&mut self, theme: &ThemeId, count: usize) -> Result<Vec<AssetRef>, ResourceError> {
        let faces = self
            .themes
            .get(theme)
            .ok_or_else(|| ResourceError::UnknownTheme(theme.clone()))?;

        if faces.len() < count {
            return Err(ResourceError::NotEnoughAssets {
                theme: theme.clone(),
                requested: count,
                available: faces.len(),
            });
        }

        Ok(faces[..count].to_vec())
    }
}

/// Memoizing wrapper: repeated requests for the same theme and count are
/// answered without asking the inner provider again. Failures are not cached.
#[derive(Clone, Debug)]
pub struct CachedAssets<P> {
    inner: P,
    cache: FxHashMap<(ThemeId, usize), Vec<AssetRef>>,
    misses: usize,
}

impl<P: AssetProvider> CachedAssets<P> {
    /// Wrap a provider.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: FxHashMap::default(),
            misses: 0,
        }
    }

    /// Requests forwarded to the inner provider.
    #[must_use]
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Drop every cached answer.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<P: AssetProvider> AssetProvider for CachedAssets<P> {
    fn unique_assets(&mut self, theme: &ThemeId, count: usize) -> Result<Vec<AssetRef>, ResourceError> {
        let key = (theme.clone(), count);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit.clone());
        }

        self.misses += 1;
        let faces = self.inner.unique_assets(theme, count)?;
        self.cache.insert(key, faces.clone());
        Ok(faces)
    }
}
