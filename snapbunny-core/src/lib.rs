//! SnapBunny is a photo-booth compositing and export engine.
//!
//! The engine takes an ordered sequence of captured images and a chosen
//! layout, composes them into a printable photo strip, layers decorative
//! frames and freely-positioned stickers on top, and exports the result as a
//! still JPEG and an animated GIF loop.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `LayoutDescriptor -> LayoutPlan` (canvas size + ordered
//!    photo slots)
//! 2. **Settle**: every source image decode settles — success or tolerated
//!    failure — before any photo paints (the engine's only barrier)
//! 3. **Composite**: background, aspect-fill-cropped photos, frame
//!    decoration, annotations, footer text, in fixed z-order onto a
//!    [`Surface`]
//! 4. **Export**: the still JPEG from the visible canvas, and the GIF loop
//!    from a private 400×300 surface encoded on a bounded worker pool
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: layout resolution and compositing are
//!   pure; repainting an unchanged state yields byte-identical pixels.
//! - **Failures stay local**: a bad source image leaves its slot blank, a
//!   missing frame asset omits the overlay, an encoder failure surfaces as a
//!   status — nothing here is fatal to the surrounding application.
//! - **Premultiplied RGBA8** end-to-end on every surface.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod annotations;
mod assets;
mod compose;
mod export;
mod foundation;
mod frames;
mod layout;
mod render;

pub use annotations::layer::{Annotation, AnnotationContent, AnnotationId, AnnotationLayer};
pub use assets::decode::{PreparedImage, decode_data_uri, decode_image};
pub use assets::sources::{DecodeReport, ImageSource, SourceImage, SourceSet};
pub use assets::store::{AssetStore, normalize_rel_path};
pub use compose::pipeline::{
    CompositionPipeline, CycleReport, PipelineStage, REPAINT_QUIET_INTERVAL, RenderGeneration,
    RepaintScheduler,
};
pub use compose::session::{GlyphSticker, LayoutChoice, Session};
pub use compose::state::{BACKGROUND_PALETTE, CompositionState, StripColor};
pub use export::actions::{
    ANIMATED_FILENAME, SHARE_PAGE_URL, STILL_FILENAME, qr_share_url, still_jpeg,
};
pub use export::gif::{
    AnimatedExportPipeline, EXPORT_HEIGHT, EXPORT_WIDTH, EncoderPool, ExportStatus, FRAME_DELAY_MS,
};
pub use foundation::core::{Canvas, Point, Rect, Rgba8Premul, SlotRect, Vec2, ViewMetrics};
pub use foundation::error::{SnapError, SnapResult};
pub use frames::catalog::{FrameId, FrameStyle, draw_full_canvas, draw_per_slot};
pub use layout::crop::{CoverPlacement, CropRect, aspect_fill_crop, cover_placement};
pub use layout::geometry::{
    BORDER, FOOTER_HEIGHT, LayoutDescriptor, LayoutKind, LayoutPlan, PHOTO_SPACING, TILE_HEIGHT,
    TILE_WIDTH, resolve_layout,
};
pub use render::surface::Surface;
pub use render::text::{LineExtents, draw_line_centered, draw_line_in_box, measure_line};
