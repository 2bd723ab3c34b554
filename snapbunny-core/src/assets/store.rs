use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::assets::decode::{self, PreparedImage};
use crate::foundation::error::{SnapError, SnapResult};

/// Root-anchored cache of decoded frame overlays and the engine font.
///
/// Overlay assets are referenced by a well-known relative path, decoded
/// exactly once and cached; a failed load is cached as a miss so a missing
/// or corrupt asset costs one attempt and then renders nothing, never an
/// error. The font powering the footer caption and glyph stickers is loaded
/// the same way: absent font, text is simply omitted.
pub struct AssetStore {
    root: PathBuf,
    overlays: HashMap<String, Option<PreparedImage>>,
    font: Option<Option<fontdue::Font>>,
}

impl std::fmt::Debug for AssetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetStore")
            .field("root", &self.root)
            .field("overlays", &self.overlays.len())
            .field("font_loaded", &matches!(self.font, Some(Some(_))))
            .finish()
    }
}

impl AssetStore {
    /// Build a store resolving relative asset paths under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            overlays: HashMap::new(),
            font: None,
        }
    }

    /// Root directory used when resolving relative asset paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fetch the full-canvas overlay at `rel_path`, decoding and caching on
    /// first use. Returns `None` — now and on every later call — if the
    /// asset is missing or undecodable.
    pub fn overlay(&mut self, rel_path: &str) -> Option<&PreparedImage> {
        let key = match normalize_rel_path(rel_path) {
            Ok(key) => key,
            Err(err) => {
                tracing::warn!(%err, path = rel_path, "rejected frame overlay path");
                return None;
            }
        };

        if !self.overlays.contains_key(&key) {
            let loaded = self.load_overlay(&key);
            if loaded.is_none() {
                tracing::warn!(path = %key, "frame overlay failed to load; overlay omitted");
            }
            self.overlays.insert(key.clone(), loaded);
        }
        self.overlays.get(&key).and_then(|v| v.as_ref())
    }

    fn load_overlay(&self, key: &str) -> Option<PreparedImage> {
        let bytes = std::fs::read(self.root.join(Path::new(key))).ok()?;
        decode::decode_image(&bytes).ok()
    }

    /// The engine font, loaded once from the first `.ttf`/`.otf` file under
    /// `<root>/fonts`. `None` means footer and glyph text are omitted.
    pub fn font(&mut self) -> Option<&fontdue::Font> {
        if self.font.is_none() {
            let loaded = load_font_from_dir(&self.root.join("fonts"));
            if loaded.is_none() {
                tracing::warn!(
                    root = %self.root.display(),
                    "no usable font under fonts/; footer and glyph text will be omitted"
                );
            }
            self.font = Some(loaded);
        }
        self.font.as_ref().and_then(|f| f.as_ref())
    }
}

fn load_font_from_dir(dir: &Path) -> Option<fontdue::Font> {
    let rd = std::fs::read_dir(dir).ok()?;

    let mut candidates: Vec<PathBuf> = rd
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|ext| {
                        let ext = ext.to_ascii_lowercase();
                        ext == "ttf" || ext == "otf"
                    })
        })
        .collect();
    candidates.sort();

    for path in candidates {
        let Ok(bytes) = std::fs::read(&path) else {
            continue;
        };
        if let Ok(font) = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()) {
            return Some(font);
        }
    }
    None
}

/// Normalize and validate store-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> SnapResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(SnapError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(SnapError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SnapError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(SnapError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
