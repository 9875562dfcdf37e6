// this_file: crates/chatcard-fontdb/src/cache.rs

//! Font discovery and chain caching.
//!
//! Assets are discovered once, on first use. After that every (size,
//! weight) pair gets its chain built once and shared. Nothing in here
//! returns an error: a font that will not load is logged and left out.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;

use chatcard_core::{FontSources, FontWeight};

use crate::{Font, FontChain, FontHandle};

/// Branded family directory inside the font directory
pub const BRANDED_DIR: &str = "gg-sans-2";
/// CJK font file inside the font directory
pub const CJK_FILE: &str = "NotoSansCJKjp-Regular.ttf";

const SYSTEM_FAMILIES: [&str; 2] = ["Arial", "DejaVu Sans"];

const WEIGHTS: [FontWeight; 4] = [
    FontWeight::Regular,
    FontWeight::Medium,
    FontWeight::Semibold,
    FontWeight::Bold,
];

/// Sizes are cached by their bit pattern; callers use a handful of fixed sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ChainKey {
    size_bits: u32,
    weight: FontWeight,
}

impl ChainKey {
    fn new(size: f32, weight: FontWeight) -> Self {
        Self {
            size_bits: size.to_bits(),
            weight,
        }
    }
}

/// Everything found on disk, loaded once
struct FontAssets {
    branded: HashMap<FontWeight, Arc<Font>>,
    cjk: Option<Arc<Font>>,
    system_db: Option<fontdb::Database>,
    system_faces: RwLock<HashMap<FontWeight, Vec<Arc<Font>>>>,
}

/// Shared font state for one renderer
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct FontCache {
    sources: FontSources,
    assets: OnceCell<FontAssets>,
    chains: RwLock<HashMap<ChainKey, Arc<FontChain>>>,
}

impl FontCache {
    pub fn new(sources: FontSources) -> Self {
        Self {
            sources,
            assets: OnceCell::new(),
            chains: RwLock::new(HashMap::new()),
        }
    }

    /// A cache that never touches the disk
    pub fn builtin_only() -> Self {
        Self::new(FontSources::builtin_only())
    }

    pub fn sources(&self) -> &FontSources {
        &self.sources
    }

    /// Number of chains built so far
    pub fn cached_chains(&self) -> usize {
        self.chains.read().len()
    }

    /// The fallback chain for `size` pixels at `weight`
    pub fn chain(&self, size: f32, weight: FontWeight) -> Arc<FontChain> {
        let key = ChainKey::new(size, weight);

        // Fast path: shared read lock
        if let Some(chain) = self.chains.read().get(&key) {
            return Arc::clone(chain);
        }

        // Slow path: build outside the lock, first insert wins
        let chain = Arc::new(self.build_chain(size, weight));
        let mut chains = self.chains.write();
        Arc::clone(chains.entry(key).or_insert(chain))
    }

    fn assets(&self) -> &FontAssets {
        self.assets.get_or_init(|| discover(&self.sources))
    }

    fn build_chain(&self, size: f32, weight: FontWeight) -> FontChain {
        let assets = self.assets();
        let mut fonts: Vec<Arc<Font>> = Vec::new();

        if let Some(font) = assets.branded.get(&weight) {
            fonts.push(Arc::clone(font));
        }
        if let Some(font) = assets.branded.get(&FontWeight::Regular) {
            fonts.push(Arc::clone(font));
        }
        if let Some(font) = &assets.cjk {
            fonts.push(Arc::clone(font));
        }
        fonts.extend(assets.system_fonts(weight));

        let mut unique: Vec<Arc<Font>> = Vec::with_capacity(fonts.len());
        for font in fonts {
            if !unique.iter().any(|seen| Arc::ptr_eq(seen, &font)) {
                unique.push(font);
            }
        }

        let handles = unique
            .into_iter()
            .map(|font| FontHandle::outline(font, size, weight))
            .collect();
        let chain = FontChain::new(handles, size, weight);

        log::debug!(
            "fontdb: chain {}px {} -> {:?}",
            size,
            weight,
            chain.describe()
        );
        chain
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new(FontSources::default())
    }
}

impl std::fmt::Debug for FontCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontCache")
            .field("sources", &self.sources)
            .field("discovered", &self.assets.get().is_some())
            .field("chains", &self.cached_chains())
            .finish()
    }
}

impl FontAssets {
    /// Generic sans-serif faces for `weight`, queried once per weight
    fn system_fonts(&self, weight: FontWeight) -> Vec<Arc<Font>> {
        let Some(db) = &self.system_db else {
            return Vec::new();
        };

        if let Some(fonts) = self.system_faces.read().get(&weight) {
            return fonts.clone();
        }

        let fonts = query_system(db, weight);
        self.system_faces
            .write()
            .entry(weight)
            .or_insert(fonts)
            .clone()
    }
}

fn discover(sources: &FontSources) -> FontAssets {
    let mut branded = HashMap::new();
    let mut cjk = None;

    if let Some(dir) = &sources.font_dir {
        for weight in WEIGHTS {
            if let Some(font) = load_asset(&branded_path(dir, weight)) {
                branded.insert(weight, font);
            }
        }
        cjk = load_asset(&dir.join(CJK_FILE));
    }

    let system_db = sources.system_fonts.then(|| {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("fontdb: {} system faces available", db.len());
        db
    });

    FontAssets {
        branded,
        cjk,
        system_db,
        system_faces: RwLock::new(HashMap::new()),
    }
}

/// `<dir>/gg-sans-2/gg sans <Weight>.ttf`
pub fn branded_path(dir: &Path, weight: FontWeight) -> PathBuf {
    dir.join(BRANDED_DIR)
        .join(format!("gg sans {}.ttf", weight.label()))
}

fn load_asset(path: &Path) -> Option<Arc<Font>> {
    match Font::from_file(path) {
        Ok(font) => {
            log::debug!("fontdb: loaded {}", path.display());
            Some(Arc::new(font))
        },
        Err(e) => {
            log::warn!("fontdb: skipping {}: {}", path.display(), e);
            None
        },
    }
}

fn query_system(db: &fontdb::Database, weight: FontWeight) -> Vec<Arc<Font>> {
    let families: Vec<fontdb::Family<'_>> = SYSTEM_FAMILIES
        .iter()
        .map(|name| fontdb::Family::Name(*name))
        .chain(std::iter::once(fontdb::Family::SansSerif))
        .collect();

    let mut seen = Vec::new();
    let mut fonts = Vec::new();

    for family in &families {
        let query = fontdb::Query {
            families: std::slice::from_ref(family),
            weight: fontdb::Weight(weight.numeric()),
            ..Default::default()
        };
        let Some(id) = db.query(&query) else {
            log::debug!("fontdb: no system face for {:?}", family);
            continue;
        };
        if seen.contains(&id) {
            continue;
        }
        seen.push(id);

        let name = db
            .face(id)
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| format!("{:?}", family));

        let loaded = db.with_face_data(id, |data, index| {
            Font::from_data_index(data.to_vec(), index, name.clone())
        });
        match loaded {
            Some(Ok(font)) => fonts.push(Arc::new(font)),
            Some(Err(e)) => log::warn!("fontdb: system face {} unusable: {}", name, e),
            None => log::warn!("fontdb: system face {} has no data", name),
        }
    }

    fonts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branded_path_layout() {
        let path = branded_path(Path::new("/fonts"), FontWeight::Semibold);
        assert_eq!(path, PathBuf::from("/fonts/gg-sans-2/gg sans Semibold.ttf"));
    }

    #[test]
    fn test_chains_are_memoized() {
        let cache = FontCache::builtin_only();
        let a = cache.chain(21.0, FontWeight::Regular);
        let b = cache.chain(21.0, FontWeight::Regular);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.cached_chains(), 1);

        let _ = cache.chain(21.0, FontWeight::Bold);
        let _ = cache.chain(14.0, FontWeight::Regular);
        assert_eq!(cache.cached_chains(), 3);
    }

    #[test]
    fn test_missing_font_dir_falls_back_to_builtin() {
        let cache = FontCache::new(FontSources {
            font_dir: Some(PathBuf::from("/no/such/font/dir")),
            system_fonts: false,
        });
        let chain = cache.chain(21.0, FontWeight::Semibold);
        assert!(chain.is_builtin_only());
        assert!(chain.advance("hello") > 0.0);
    }

    #[test]
    fn test_cache_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FontCache>();
    }
}
