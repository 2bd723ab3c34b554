use std::path::PathBuf;

use anyhow::Context;

use crate::assets::decode::{self, PreparedImage};
use crate::foundation::error::SnapResult;

/// An encoded image byte source supplied by the capture flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// Image file on disk.
    Path(PathBuf),
    /// Raw encoded bytes already in memory.
    Bytes(Vec<u8>),
    /// `data:image/...;base64,` URI captured from the camera.
    DataUri(String),
}

impl ImageSource {
    /// Interpret a session string as a data URI or a filesystem path.
    pub fn from_session_str(s: &str) -> Self {
        if s.starts_with("data:") {
            ImageSource::DataUri(s.to_string())
        } else {
            ImageSource::Path(PathBuf::from(s))
        }
    }

    fn decode(&self) -> SnapResult<PreparedImage> {
        match self {
            ImageSource::Path(p) => {
                let bytes = std::fs::read(p)
                    .with_context(|| format!("read source image '{}'", p.display()))?;
                decode::decode_image(&bytes)
            }
            ImageSource::Bytes(b) => decode::decode_image(b),
            ImageSource::DataUri(s) => decode::decode_data_uri(s),
        }
    }
}

/// One captured photo: the encoded source plus its settle-once decode slot.
///
/// Decoding is attempted at most once; the outcome — success or a tolerated
/// failure — is cached, and "settled" is observable so the pipeline barrier
/// can count it either way.
#[derive(Debug)]
pub struct SourceImage {
    source: ImageSource,
    decoded: Option<Option<PreparedImage>>,
}

impl SourceImage {
    /// Wrap an undecoded source.
    pub fn new(source: ImageSource) -> Self {
        Self {
            source,
            decoded: None,
        }
    }

    /// Whether a decode attempt has completed (successfully or not).
    pub fn is_settled(&self) -> bool {
        self.decoded.is_some()
    }

    /// The decoded image, if the attempt succeeded.
    pub fn image(&self) -> Option<&PreparedImage> {
        self.decoded.as_ref().and_then(|d| d.as_ref())
    }

    fn settle(&mut self) {
        if self.decoded.is_some() {
            return;
        }
        let outcome = match self.source.decode() {
            Ok(img) => Some(img),
            Err(err) => {
                tracing::debug!(%err, "source image failed to decode; slot will stay blank");
                None
            }
        };
        self.decoded = Some(outcome);
    }
}

/// Ordered capture sequence consumed by both the composition and the export
/// pipelines. Order is capture order and is never reordered.
#[derive(Debug, Default)]
pub struct SourceSet {
    images: Vec<SourceImage>,
}

impl SourceSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from sources in capture order.
    pub fn from_sources(sources: Vec<ImageSource>) -> Self {
        Self {
            images: sources.into_iter().map(SourceImage::new).collect(),
        }
    }

    /// Append one captured source.
    pub fn push(&mut self, source: ImageSource) {
        self.images.push(SourceImage::new(source));
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether no sources have been supplied.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Settle decodes for the first `count` sources and report the outcome.
    ///
    /// Every source settles exactly once — failures included — so the
    /// report's barrier can never wait forever on one bad asset.
    pub fn settle_first(&mut self, count: usize) -> DecodeReport {
        let requested = count.min(self.images.len());
        let mut decoded = 0usize;
        for img in &mut self.images[..requested] {
            img.settle();
            if img.image().is_some() {
                decoded += 1;
            }
        }
        DecodeReport {
            requested,
            settled: requested,
            decoded,
        }
    }

    /// Decoded image at `index`, if it exists and decoded successfully.
    pub fn image(&self, index: usize) -> Option<&PreparedImage> {
        self.images.get(index).and_then(|i| i.image())
    }

    /// Source at `index`.
    pub fn get(&self, index: usize) -> Option<&SourceImage> {
        self.images.get(index)
    }
}

/// Outcome of one barrier pass over the sources used by a cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Sources this cycle asked to decode.
    pub requested: usize,
    /// Sources whose decode has settled (success or failure).
    pub settled: usize,
    /// Sources that decoded successfully.
    pub decoded: usize,
}

impl DecodeReport {
    /// Whether every requested decode has settled.
    pub fn barrier_cleared(&self) -> bool {
        self.settled == self.requested
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sources.rs"]
mod tests;
