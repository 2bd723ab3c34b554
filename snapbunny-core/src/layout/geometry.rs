use crate::foundation::core::{Canvas, SlotRect};
use crate::foundation::error::{SnapError, SnapResult};

/// Width of one photo tile in canvas pixels.
pub const TILE_WIDTH: u32 = 400;
/// Height of one photo tile in canvas pixels (strip and grid layouts; the
/// single layout uses a square tile of side [`TILE_WIDTH`]).
pub const TILE_HEIGHT: u32 = 300;
/// Border around the photo area.
pub const BORDER: u32 = 40;
/// Gap between adjacent photos.
pub const PHOTO_SPACING: u32 = 20;
/// Height reserved for the footer caption and date line.
pub const FOOTER_HEIGHT: u32 = 60;

// Extra bottom margin under the single square tile (polaroid proportions).
const SINGLE_BOTTOM_MARGIN: u32 = 40;

/// Shape of the output composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// One square photo with polaroid-style margins.
    Single,
    /// `poses` photos stacked vertically.
    Strip {
        /// Number of stacked photos; must be >= 1.
        poses: u32,
    },
    /// `rows` x `cols` photos tiled row-major, left-to-right, top-to-bottom.
    Grid {
        /// Row count; must be >= 1.
        rows: u32,
        /// Column count; must be >= 1.
        cols: u32,
    },
}

impl LayoutKind {
    /// Number of photo slots this kind produces.
    pub fn slot_count(self) -> u32 {
        match self {
            LayoutKind::Single => 1,
            LayoutKind::Strip { poses } => poses,
            LayoutKind::Grid { rows, cols } => rows.saturating_mul(cols),
        }
    }
}

/// A chosen layout: the shape plus the pose count the capture flow was run
/// with. Immutable once chosen upstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayoutDescriptor {
    /// Composition shape.
    pub kind: LayoutKind,
    /// Number of captured poses; must equal the slot count of `kind`.
    pub pose_count: u32,
}

impl LayoutDescriptor {
    /// Build a descriptor whose pose count is derived from the kind.
    pub fn new(kind: LayoutKind) -> Self {
        Self {
            kind,
            pose_count: kind.slot_count(),
        }
    }

    /// Build a descriptor with an explicit pose count, rejecting mismatches.
    pub fn with_pose_count(kind: LayoutKind, pose_count: u32) -> SnapResult<Self> {
        let out = Self { kind, pose_count };
        out.validate()?;
        Ok(out)
    }

    /// Resolve one of the named layout presets from the selection screen.
    pub fn from_preset(id: &str) -> SnapResult<Self> {
        let kind = match id.trim() {
            "layoutS" | "single" => LayoutKind::Single,
            "layoutC" => LayoutKind::Strip { poses: 2 },
            "layoutB" => LayoutKind::Strip { poses: 3 },
            "layoutA" => LayoutKind::Strip { poses: 4 },
            "layoutD" => LayoutKind::Grid { rows: 3, cols: 2 },
            other => {
                return Err(SnapError::validation(format!(
                    "unknown layout preset '{other}'"
                )));
            }
        };
        Ok(Self::new(kind))
    }

    /// Check the descriptor invariants: positive slot count, and a pose
    /// count equal to the slot count of the kind.
    pub fn validate(&self) -> SnapResult<()> {
        match self.kind {
            LayoutKind::Strip { poses } if poses == 0 => {
                return Err(SnapError::validation("strip layout needs poses >= 1"));
            }
            LayoutKind::Grid { rows, cols } if rows == 0 || cols == 0 => {
                return Err(SnapError::validation("grid layout needs rows, cols >= 1"));
            }
            _ => {}
        }
        if self.pose_count != self.kind.slot_count() {
            return Err(SnapError::validation(format!(
                "pose_count {} does not match the {} slot(s) of the layout kind",
                self.pose_count,
                self.kind.slot_count()
            )));
        }
        Ok(())
    }
}

/// Resolved geometry for one layout: canvas dimensions plus the ordered photo
/// slots (capture order).
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutPlan {
    /// Output canvas size.
    pub canvas: Canvas,
    /// Photo slots in capture order.
    pub slots: Vec<SlotRect>,
}

/// Resolve a layout descriptor into canvas dimensions and slot rectangles.
///
/// Pure and deterministic: identical input yields identical output. Images
/// beyond `pose_count` are a caller concern (they are ignored at paint time);
/// fewer images than slots leave trailing slots unpainted.
pub fn resolve_layout(desc: &LayoutDescriptor) -> SnapResult<LayoutPlan> {
    desc.validate()?;

    let tile_w = f64::from(TILE_WIDTH);
    let tile_h = f64::from(TILE_HEIGHT);
    let border = f64::from(BORDER);
    let spacing = f64::from(PHOTO_SPACING);

    match desc.kind {
        LayoutKind::Single => {
            let canvas = Canvas::new(
                TILE_WIDTH + 2 * BORDER,
                TILE_WIDTH + 2 * BORDER + FOOTER_HEIGHT + SINGLE_BOTTOM_MARGIN,
            )?;
            let slots = vec![SlotRect::new(border, border, tile_w, tile_w)];
            Ok(LayoutPlan { canvas, slots })
        }
        LayoutKind::Strip { poses } => {
            let canvas = Canvas::new(
                TILE_WIDTH + 2 * BORDER,
                poses * TILE_HEIGHT + (poses - 1) * PHOTO_SPACING + 2 * BORDER + FOOTER_HEIGHT,
            )?;
            let slots = (0..poses)
                .map(|i| {
                    SlotRect::new(
                        border,
                        border + f64::from(i) * (tile_h + spacing),
                        tile_w,
                        tile_h,
                    )
                })
                .collect();
            Ok(LayoutPlan { canvas, slots })
        }
        LayoutKind::Grid { rows, cols } => {
            let canvas = Canvas::new(
                cols * TILE_WIDTH + (cols - 1) * PHOTO_SPACING + 2 * BORDER,
                rows * TILE_HEIGHT + (rows - 1) * PHOTO_SPACING + 2 * BORDER + FOOTER_HEIGHT,
            )?;
            let slots = (0..rows * cols)
                .map(|i| {
                    let row = i / cols;
                    let col = i % cols;
                    SlotRect::new(
                        border + f64::from(col) * (tile_w + spacing),
                        border + f64::from(row) * (tile_h + spacing),
                        tile_w,
                        tile_h,
                    )
                })
                .collect();
            Ok(LayoutPlan { canvas, slots })
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
