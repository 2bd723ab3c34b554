use crate::annotations::layer::AnnotationLayer;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{SnapError, SnapResult};
use crate::frames::catalog::FrameId;

/// Background swatches offered by the selection UI, darkest two last.
pub const BACKGROUND_PALETTE: &[&str] = &[
    "white", "black", "#f6d5da", "#dde6d5", "#adc3e5", "#FFF2CC", "#dbcfff", "#800000",
];

/// Background color of the strip: a named palette entry or a custom
/// `#rrggbb` value. Keeps the raw selection string so palette identity (and
/// the dark-background footer rule) survives round-trips.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StripColor {
    raw: String,
    rgb: [u8; 3],
}

impl StripColor {
    /// Parse `"white"`, `"black"`, or a `#rrggbb` hex value.
    pub fn parse(s: &str) -> SnapResult<Self> {
        let raw = s.trim().to_string();
        let rgb = match raw.as_str() {
            "white" => [255, 255, 255],
            "black" => [0, 0, 0],
            hex => parse_hex_rgb(hex)?,
        };
        Ok(Self { raw, rgb })
    }

    /// The default white background.
    pub fn white() -> Self {
        Self {
            raw: "white".to_string(),
            rgb: [255, 255, 255],
        }
    }

    /// Raw selection string (`"white"`, `"#f6d5da"`, …).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Straight RGB channels.
    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    /// Opaque premultiplied color for the background fill.
    pub fn color(&self) -> Rgba8Premul {
        Rgba8Premul::opaque(self.rgb[0], self.rgb[1], self.rgb[2])
    }

    /// True for the two darkest palette entries (`black` and `#800000`),
    /// which flip the footer to light text.
    pub fn is_dark(&self) -> bool {
        self.raw == "black" || self.raw.eq_ignore_ascii_case("#800000")
    }

    pub(crate) fn caption_color(&self) -> Rgba8Premul {
        if self.is_dark() {
            Rgba8Premul::opaque(255, 255, 255)
        } else {
            Rgba8Premul::opaque(93, 64, 55)
        }
    }

    pub(crate) fn date_color(&self) -> Rgba8Premul {
        if self.is_dark() {
            Rgba8Premul::opaque(187, 187, 187)
        } else {
            Rgba8Premul::opaque(136, 136, 136)
        }
    }
}

impl Default for StripColor {
    fn default() -> Self {
        Self::white()
    }
}

impl std::fmt::Display for StripColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for StripColor {
    type Err = SnapError;

    fn from_str(s: &str) -> SnapResult<Self> {
        Self::parse(s)
    }
}

impl serde::Serialize for StripColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> serde::Deserialize<'de> for StripColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        StripColor::parse(&raw).map_err(serde::de::Error::custom)
    }
}

fn parse_hex_rgb(hex: &str) -> SnapResult<[u8; 3]> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| SnapError::validation(format!("unknown color '{hex}'")))?;
    if digits.len() != 6 {
        return Err(SnapError::validation(format!(
            "color '{hex}' must be #rrggbb"
        )));
    }
    let byte = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| SnapError::validation(format!("color '{hex}' has invalid hex digits")))
    };
    Ok([byte(0..2)?, byte(2..4)?, byte(4..6)?])
}

/// The aggregate the pipeline renders from: background color, chosen frame,
/// footer caption and date, plus the annotation collection. Every repaint
/// reads one consistent snapshot of this state.
#[derive(Debug, Default)]
pub struct CompositionState {
    /// Strip background color.
    pub background: StripColor,
    /// Selected decorative frame.
    pub frame: FrameId,
    /// Footer caption text.
    pub caption: String,
    /// Preformatted footer date line; the engine never reads the clock.
    pub date_label: String,
    /// User-placed stickers.
    pub annotations: AnnotationLayer,
}

impl CompositionState {
    /// Default state: white background, no frame, the brand caption.
    pub fn new() -> Self {
        Self {
            caption: "SnapBunny".to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/state.rs"]
mod tests;
