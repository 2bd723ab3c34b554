use std::path::Path;

use crate::annotations::layer::AnnotationContent;
use crate::assets::sources::{ImageSource, SourceSet};
use crate::compose::state::{CompositionState, StripColor};
use crate::foundation::error::{SnapError, SnapResult};
use crate::frames::catalog::FrameId;
use crate::layout::geometry::LayoutDescriptor;

/// JSON session the capture flow hands to the engine: the chosen layout, the
/// ordered image sources, and the initial composition settings.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Session {
    /// Layout preset id (`"layoutA"` … `"layoutS"`) or explicit descriptor.
    pub layout: LayoutChoice,
    /// Ordered encoded image sources: file paths or base64 data URIs.
    pub images: Vec<String>,
    /// Strip background color.
    #[serde(default)]
    pub color: StripColor,
    /// Selected decorative frame.
    #[serde(default)]
    pub frame: FrameId,
    /// Footer caption.
    #[serde(default = "default_caption")]
    pub caption: String,
    /// Glyph stickers placed ahead of time.
    #[serde(default)]
    pub stickers: Vec<GlyphSticker>,
}

/// Layout selection: a named preset or a full descriptor.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum LayoutChoice {
    /// Preset id from the selection screen.
    Preset(String),
    /// Explicit descriptor.
    Descriptor(LayoutDescriptor),
}

impl LayoutChoice {
    /// Resolve to a validated descriptor.
    pub fn resolve(&self) -> SnapResult<LayoutDescriptor> {
        match self {
            LayoutChoice::Preset(id) => LayoutDescriptor::from_preset(id),
            LayoutChoice::Descriptor(desc) => {
                desc.validate()?;
                Ok(*desc)
            }
        }
    }
}

/// One pre-placed glyph sticker.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GlyphSticker {
    /// Short text or emoji.
    pub glyph: String,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    /// Box size (doubles as the font size).
    #[serde(default = "default_glyph_size")]
    pub size: f64,
}

fn default_caption() -> String {
    "SnapBunny".to_string()
}

fn default_glyph_size() -> f64 {
    40.0
}

impl Session {
    /// Parse a session from a JSON reader.
    pub fn from_reader(reader: impl std::io::Read) -> SnapResult<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| SnapError::validation(format!("parse session json: {e}")))
    }

    /// Parse a session from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> SnapResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            SnapError::validation(format!("open session '{}': {e}", path.display()))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Resolve the layout descriptor.
    pub fn descriptor(&self) -> SnapResult<LayoutDescriptor> {
        self.layout.resolve()
    }

    /// Build the source set in capture order.
    pub fn source_set(&self) -> SourceSet {
        SourceSet::from_sources(
            self.images
                .iter()
                .map(|s| ImageSource::from_session_str(s))
                .collect(),
        )
    }

    /// Build the initial composition state: color, frame, caption and the
    /// pre-placed glyph stickers (left unselected).
    pub fn initial_state(&self, date_label: impl Into<String>) -> CompositionState {
        let mut state = CompositionState::new();
        state.background = self.color.clone();
        state.frame = self.frame;
        state.caption = self.caption.clone();
        state.date_label = date_label.into();

        for sticker in &self.stickers {
            let id = state
                .annotations
                .add(AnnotationContent::Glyph(sticker.glyph.clone()));
            state.annotations.resize(id, sticker.size);
            state.annotations.set_position(id, sticker.x, sticker.y);
        }
        state.annotations.select(None);
        state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/session.rs"]
mod tests;
