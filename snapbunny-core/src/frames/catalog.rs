use crate::assets::store::AssetStore;
use crate::foundation::core::SlotRect;
use crate::foundation::error::{SnapError, SnapResult};
use crate::frames::procedural;
use crate::render::surface::Surface;

/// Identifier of a decorative frame in the fixed registry.
///
/// Serialized ids match the selection UI (`"pastel"`, `"jellycatImage"`, …).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum FrameId {
    /// No decoration.
    #[default]
    #[serde(rename = "none")]
    None,
    /// Procedural pastel sticker set ("Girlypop").
    #[serde(rename = "pastel")]
    Pastel,
    /// Procedural sun-and-cloud sticker set.
    #[serde(rename = "cute")]
    Cute,
    /// Jellycat full-canvas overlay.
    #[serde(rename = "jellycatImage")]
    Jellycat,
    /// Mofusand full-canvas overlay.
    #[serde(rename = "mofusandImage")]
    Mofusand,
    /// Shin Chan full-canvas overlay.
    #[serde(rename = "shinChanImage")]
    ShinChan,
    /// Miffy full-canvas overlay.
    #[serde(rename = "miffyImage")]
    Miffy,
    /// Wedding full-canvas overlay.
    #[serde(rename = "weddingImage")]
    Wedding,
    /// "Mark's Debut" full-canvas overlay.
    #[serde(rename = "markImage")]
    Mark,
    /// KSA full-canvas overlay.
    #[serde(rename = "ksaImage")]
    Ksa,
}

/// Drawing capability of a frame: invoked once per painted photo slot, or
/// once over the whole composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStyle {
    /// Drawn once per photo rectangle, within or near it.
    PerSlot,
    /// Asset-backed overlay covering the entire canvas.
    FullCanvas,
}

impl FrameId {
    /// Every frame in the registry, in selection-UI order.
    pub fn all() -> &'static [FrameId] {
        &[
            FrameId::None,
            FrameId::Pastel,
            FrameId::Cute,
            FrameId::Jellycat,
            FrameId::Mofusand,
            FrameId::ShinChan,
            FrameId::Miffy,
            FrameId::Wedding,
            FrameId::Mark,
            FrameId::Ksa,
        ]
    }

    /// Parse a selection-UI id.
    pub fn parse(s: &str) -> SnapResult<FrameId> {
        match s.trim() {
            "none" => Ok(FrameId::None),
            "pastel" => Ok(FrameId::Pastel),
            "cute" => Ok(FrameId::Cute),
            "jellycatImage" => Ok(FrameId::Jellycat),
            "mofusandImage" => Ok(FrameId::Mofusand),
            "shinChanImage" => Ok(FrameId::ShinChan),
            "miffyImage" => Ok(FrameId::Miffy),
            "weddingImage" => Ok(FrameId::Wedding),
            "markImage" => Ok(FrameId::Mark),
            "ksaImage" => Ok(FrameId::Ksa),
            other => Err(SnapError::validation(format!("unknown frame id '{other}'"))),
        }
    }

    /// Drawing style; `None` for [`FrameId::None`].
    pub fn style(self) -> Option<FrameStyle> {
        match self {
            FrameId::None => None,
            FrameId::Pastel | FrameId::Cute => Some(FrameStyle::PerSlot),
            _ => Some(FrameStyle::FullCanvas),
        }
    }

    /// Well-known asset path for full-canvas frames.
    pub fn asset_path(self) -> Option<&'static str> {
        match self {
            FrameId::Jellycat => Some("jellycat.png"),
            FrameId::Mofusand => Some("mofusand-frame.png"),
            FrameId::ShinChan => Some("shin-chan.png"),
            FrameId::Miffy => Some("miffy-frame.png"),
            FrameId::Wedding => Some("wedding.png"),
            FrameId::Mark => Some("mm.png"),
            FrameId::Ksa => Some("tmu.png"),
            _ => None,
        }
    }

    /// Human-readable label from the selection UI.
    pub fn label(self) -> &'static str {
        match self {
            FrameId::None => "No Stickers",
            FrameId::Pastel => "Girlypop",
            FrameId::Cute => "Cute",
            FrameId::Jellycat => "Jellycat",
            FrameId::Mofusand => "Mofusand",
            FrameId::ShinChan => "Shin Chan",
            FrameId::Miffy => "Miffy",
            FrameId::Wedding => "Wedding",
            FrameId::Mark => "Mark's Debut",
            FrameId::Ksa => "KSA",
        }
    }
}

/// Draw the per-slot decoration for `id` around one photo slot. No-op for
/// frames that are not per-slot styles.
pub fn draw_per_slot(surface: &mut Surface, id: FrameId, slot: SlotRect) {
    match id {
        FrameId::Pastel => procedural::draw_pastel(surface, slot),
        FrameId::Cute => procedural::draw_cute(surface, slot),
        _ => {}
    }
}

/// Draw the full-canvas overlay for `id`, resolving its raster asset through
/// `store` and cover-scaling it onto `dst`. A missing or undecodable asset
/// draws nothing.
pub fn draw_full_canvas(surface: &mut Surface, id: FrameId, dst: SlotRect, store: &mut AssetStore) {
    let Some(path) = id.asset_path() else {
        return;
    };
    let Some(overlay) = store.overlay(path) else {
        return;
    };
    surface.draw_image_cover(overlay, dst);
}

#[cfg(test)]
#[path = "../../tests/unit/frames/catalog.rs"]
mod tests;
