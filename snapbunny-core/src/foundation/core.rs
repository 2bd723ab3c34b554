use crate::foundation::error::{SnapError, SnapResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Canvas dimensions in backing pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> SnapResult<Self> {
        if width == 0 || height == 0 {
            return Err(SnapError::validation("canvas dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }
}

/// One rectangle in canvas pixel space: a photo slot, an annotation bounding
/// box, or the whole canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlotRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl SlotRect {
    /// Build a rectangle from its top-left corner and extents.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning a whole canvas.
    pub fn full(canvas: Canvas) -> Self {
        Self::new(0.0, 0.0, f64::from(canvas.width), f64::from(canvas.height))
    }

    /// Whether `p` falls inside this rectangle (edges inclusive on the
    /// top/left, exclusive on the bottom/right).
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Whether this rectangle overlaps `other` with positive area.
    pub fn intersects(self, other: SlotRect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// Convert to a kurbo [`Rect`].
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel (premultiplied).
    pub r: u8,
    /// Green channel (premultiplied).
    pub g: u8,
    /// Blue channel (premultiplied).
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Opaque color from straight RGB channels.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Premultiply straight RGBA channels.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels as a `[r, g, b, a]` array.
    pub fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Mapping between display (rendered) coordinates and canvas backing pixels.
///
/// The preview canvas is typically displayed scaled down; pointer events
/// arrive in display space and must be converted by the canvas's own scale
/// factor before any hit test. All [`crate::AnnotationLayer`] pointer
/// operations take a `ViewMetrics` so callers cannot skip the conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewMetrics {
    /// Backing pixel dimensions.
    pub canvas: Canvas,
    /// Rendered (CSS/display) width.
    pub rendered_width: f64,
    /// Rendered (CSS/display) height.
    pub rendered_height: f64,
}

impl ViewMetrics {
    /// Metrics for an unscaled canvas (display size equals backing size).
    pub fn one_to_one(canvas: Canvas) -> Self {
        Self {
            canvas,
            rendered_width: f64::from(canvas.width),
            rendered_height: f64::from(canvas.height),
        }
    }

    /// Convert a display-space pointer position into canvas pixel space.
    pub fn to_canvas(self, pointer: Point) -> Point {
        let sx = if self.rendered_width > 0.0 {
            f64::from(self.canvas.width) / self.rendered_width
        } else {
            1.0
        };
        let sy = if self.rendered_height > 0.0 {
            f64::from(self.canvas.height) / self.rendered_height
        } else {
            1.0
        };
        Point::new(pointer.x * sx, pointer.y * sy)
    }
}
