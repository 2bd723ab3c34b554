use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Point, Rgba8Premul, SlotRect, Vec2, ViewMetrics};
use crate::layout::crop::CropRect;
use crate::render::surface::Surface;
use crate::render::text;

/// Stable identifier for one annotation; monotonic within a session and
/// never reused, so duplicate/delete/resize are plain arena operations with
/// no aliasing hazards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnnotationId(u64);

impl AnnotationId {
    /// Raw id value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Sticker payload: a decoded image or a short glyph string.
#[derive(Clone, Debug)]
pub enum AnnotationContent {
    /// Uploaded/scattered image sticker.
    Image(PreparedImage),
    /// Short text or emoji sticker; its box width doubles as the font size.
    Glyph(String),
}

/// One user-placed sticker. `x, y` is the top-left corner in canvas space;
/// the bounding box is used identically for hit-testing and rendering.
#[derive(Clone, Debug)]
pub struct Annotation {
    /// Stable identity.
    pub id: AnnotationId,
    /// Image or glyph payload.
    pub content: AnnotationContent,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    /// Box width in canvas pixels.
    pub width: f64,
    /// Box height in canvas pixels.
    pub height: f64,
    // height/width captured at creation; resize preserves it for images.
    aspect: f64,
}

impl Annotation {
    /// Bounding box used for both hit-testing and rendering.
    pub fn bounds(&self) -> SlotRect {
        SlotRect::new(self.x, self.y, self.width, self.height)
    }

    /// Whether this is a glyph sticker.
    pub fn is_glyph(&self) -> bool {
        matches!(self.content, AnnotationContent::Glyph(_))
    }
}

const DEFAULT_X: f64 = 40.0;
const DEFAULT_Y: f64 = 40.0;
const DEFAULT_IMAGE_WIDTH: f64 = 120.0;
const DEFAULT_GLYPH_SIZE: f64 = 40.0;
const DUPLICATE_OFFSET: f64 = 20.0;
const MIN_SIZE: f64 = 1.0;

const HIGHLIGHT: Rgba8Premul = Rgba8Premul {
    r: 255,
    g: 128,
    b: 171,
    a: 255,
};
const GLYPH_INK: Rgba8Premul = Rgba8Premul {
    r: 93,
    g: 64,
    b: 55,
    a: 255,
};

#[derive(Clone, Copy, Debug)]
struct DragState {
    id: AnnotationId,
    offset: Vec2,
}

/// Mutable collection of user-placed stickers, with single selection and
/// pointer-driven drag state.
///
/// Annotations paint in insertion order, so the most recently added is
/// topmost; hit-testing walks the same order in reverse so the topmost
/// match wins. All operations run synchronously on the interactive thread.
#[derive(Debug, Default)]
pub struct AnnotationLayer {
    items: Vec<Annotation>,
    next_id: u64,
    selected: Option<AnnotationId>,
    drag: Option<DragState>,
}

impl AnnotationLayer {
    /// Empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of annotations.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the layer holds no annotations.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Annotations in paint (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.items.iter()
    }

    /// Annotation by id.
    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.items.iter().find(|a| a.id == id)
    }

    /// Currently selected annotation, if any.
    pub fn selected(&self) -> Option<AnnotationId> {
        self.selected
    }

    /// Change the selection. Unknown ids clear it.
    pub fn select(&mut self, id: Option<AnnotationId>) {
        self.selected = id.filter(|id| self.get(*id).is_some());
    }

    /// Append a new annotation at the default position; it becomes the
    /// selected one. Overlap with existing annotations is allowed.
    pub fn add(&mut self, content: AnnotationContent) -> AnnotationId {
        let id = AnnotationId(self.next_id);
        self.next_id += 1;

        let (width, height, aspect) = match &content {
            AnnotationContent::Image(img) => {
                let aspect = img.aspect();
                (DEFAULT_IMAGE_WIDTH, DEFAULT_IMAGE_WIDTH * aspect, aspect)
            }
            AnnotationContent::Glyph(_) => (DEFAULT_GLYPH_SIZE, DEFAULT_GLYPH_SIZE, 1.0),
        };

        self.items.push(Annotation {
            id,
            content,
            x: DEFAULT_X,
            y: DEFAULT_Y,
            width,
            height,
            aspect,
        });
        self.selected = Some(id);
        id
    }

    /// Topmost annotation under a display-space pointer, converted into
    /// canvas pixel space through `view` before testing.
    pub fn hit_test(&self, pointer: Point, view: &ViewMetrics) -> Option<AnnotationId> {
        let p = view.to_canvas(pointer);
        self.items
            .iter()
            .rev()
            .find(|a| a.bounds().contains(p))
            .map(|a| a.id)
    }

    /// Begin dragging `id`, recording the pointer's offset from its top-left
    /// corner. Silent no-op if the pointer does not hit that annotation.
    pub fn begin_drag(&mut self, id: AnnotationId, pointer: Point, view: &ViewMetrics) {
        let p = view.to_canvas(pointer);
        let Some(a) = self.get(id) else {
            return;
        };
        if !a.bounds().contains(p) {
            return;
        }
        self.drag = Some(DragState {
            id,
            offset: Vec2::new(p.x - a.x, p.y - a.y),
        });
    }

    /// Move the dragged annotation so its top-left tracks the pointer minus
    /// the recorded offset. No bounds clamping: annotations may be dragged
    /// partially or fully off-canvas. No-op when no drag is active.
    pub fn continue_drag(&mut self, pointer: Point, view: &ViewMetrics) {
        let p = view.to_canvas(pointer);
        let Some(drag) = self.drag else {
            return;
        };
        if let Some(a) = self.items.iter_mut().find(|a| a.id == drag.id) {
            a.x = p.x - drag.offset.x;
            a.y = p.y - drag.offset.y;
        }
    }

    /// Clear drag state. Idempotent.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Resize `id` to `new_size`: image stickers rescale width and derive
    /// height from their creation-time aspect ratio; glyph stickers set both
    /// extents (the width doubles as a font-size proxy).
    pub fn resize(&mut self, id: AnnotationId, new_size: f64) {
        let new_size = new_size.max(MIN_SIZE);
        if let Some(a) = self.items.iter_mut().find(|a| a.id == id) {
            a.width = new_size;
            a.height = if a.is_glyph() {
                new_size
            } else {
                new_size * a.aspect
            };
        }
    }

    // Session loading places pre-authored stickers directly; interactive
    // placement goes through the drag operations.
    pub(crate) fn set_position(&mut self, id: AnnotationId, x: f64, y: f64) {
        if let Some(a) = self.items.iter_mut().find(|a| a.id == id) {
            a.x = x;
            a.y = y;
        }
    }

    /// Clone `id` offset by a small fixed delta; the clone becomes the
    /// selected annotation. Returns the clone's id.
    pub fn duplicate(&mut self, id: AnnotationId) -> Option<AnnotationId> {
        let source = self.get(id)?.clone();
        let new_id = AnnotationId(self.next_id);
        self.next_id += 1;

        self.items.push(Annotation {
            id: new_id,
            x: source.x + DUPLICATE_OFFSET,
            y: source.y + DUPLICATE_OFFSET,
            ..source
        });
        self.selected = Some(new_id);
        Some(new_id)
    }

    /// Delete `id`. Clears the selection (and any drag) if they pointed at
    /// the victim. Returns whether an annotation was removed.
    pub fn remove(&mut self, id: AnnotationId) -> bool {
        let before = self.items.len();
        self.items.retain(|a| a.id != id);
        let removed = self.items.len() != before;
        if removed {
            if self.selected == Some(id) {
                self.selected = None;
            }
            if self.drag.is_some_and(|d| d.id == id) {
                self.drag = None;
            }
        }
        removed
    }

    /// Paint all annotations in insertion order, then the selected one's
    /// dashed highlight last so it is never covered.
    pub fn render(&self, surface: &mut Surface, font: Option<&fontdue::Font>) {
        for a in &self.items {
            match &a.content {
                AnnotationContent::Image(img) => {
                    let crop = CropRect::full(f64::from(img.width), f64::from(img.height));
                    surface.draw_image_cropped(img, crop, a.bounds());
                }
                AnnotationContent::Glyph(glyph) => {
                    if let Some(font) = font {
                        text::draw_line_in_box(
                            surface,
                            font,
                            glyph,
                            a.width as f32,
                            GLYPH_INK,
                            a.x + a.width / 2.0,
                            a.y + a.height / 2.0,
                        );
                    }
                }
            }
        }

        if let Some(selected) = self.selected.and_then(|id| self.get(id)) {
            let pad = 3.0;
            let b = selected.bounds();
            crate::render::raster::stroke_dashed_rect(
                surface,
                SlotRect::new(
                    b.x - pad,
                    b.y - pad,
                    b.width + 2.0 * pad,
                    b.height + 2.0 * pad,
                ),
                HIGHLIGHT,
                2.0,
                6.0,
                4.0,
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotations/layer.rs"]
mod tests;
