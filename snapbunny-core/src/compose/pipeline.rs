use std::time::{Duration, Instant};

use crate::assets::sources::SourceSet;
use crate::assets::store::AssetStore;
use crate::compose::state::CompositionState;
use crate::foundation::core::SlotRect;
use crate::foundation::error::SnapResult;
use crate::frames::catalog::{self, FrameStyle};
use crate::layout::crop::aspect_fill_crop;
use crate::layout::geometry::{LayoutDescriptor, LayoutPlan, resolve_layout};
use crate::render::surface::Surface;
use crate::render::text;

/// Quiet interval used to coalesce repaint bursts (slider drags and the
/// like) into one paint.
pub const REPAINT_QUIET_INTERVAL: Duration = Duration::from_millis(100);

const CAPTION_PX: f32 = 22.0;
const DATE_PX: f32 = 14.0;
const CAPTION_BASELINE_FROM_BOTTOM: f64 = 35.0;
const DATE_BASELINE_FROM_BOTTOM: f64 = 15.0;

/// Stage of the current repaint cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PipelineStage {
    /// Waiting for a dependency change.
    #[default]
    Idle,
    /// Settling source-image decodes for this cycle.
    LoadingSources,
    /// Drawing the fixed z-order.
    Compositing,
    /// The cycle committed its pixels.
    Done,
}

/// Monotonic token identifying one repaint cycle. Captured when a cycle
/// starts and checked before its pixels commit, so a cycle superseded by a
/// newer invalidation discards its work instead of overwriting it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenderGeneration(pub u64);

/// Trailing-debounce repaint scheduler: every trigger resets the quiet
/// timer, and the final repaint after the last trigger is never skipped —
/// only deferred to the next idle point.
#[derive(Clone, Copy, Debug)]
pub struct RepaintScheduler {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl RepaintScheduler {
    /// Scheduler with the given quiet interval.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Record a trigger at `now`, resetting the quiet timer.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Whether a repaint is scheduled (due or not).
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Whether the quiet interval has elapsed at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    /// Consume the pending deadline once its repaint has run.
    pub fn acknowledge(&mut self) {
        self.deadline = None;
    }
}

/// Outcome of one repaint cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleReport {
    /// Generation this cycle was captured at.
    pub generation: RenderGeneration,
    /// Whether the cycle's pixels were committed to the front surface
    /// (false when a newer invalidation superseded it mid-cycle).
    pub committed: bool,
    /// Source decodes settled by this cycle's barrier.
    pub settled: usize,
    /// Sources that decoded successfully.
    pub decoded: usize,
}

/// Orchestrates one full re-render of the visible canvas.
///
/// A cycle walks `Idle → LoadingSources → Compositing → Done`: every source
/// decode settles (success or failure) before any photo paints — the only
/// synchronization barrier in the engine — then drawing proceeds in fixed
/// z-order: background fill, cropped photos, per-slot frame decoration,
/// full-canvas overlay, annotations with the selected highlight last, footer
/// caption and date. Drawing is idempotent: an unchanged state snapshot
/// repaints to byte-identical pixels.
#[derive(Debug)]
pub struct CompositionPipeline {
    plan: LayoutPlan,
    front: Surface,
    stage: PipelineStage,
    generation: u64,
    committed: Option<RenderGeneration>,
    scheduler: RepaintScheduler,
}

impl CompositionPipeline {
    /// Build a pipeline for `descriptor`; the canvas is sized by the layout
    /// resolver.
    pub fn new(descriptor: &LayoutDescriptor) -> SnapResult<Self> {
        let plan = resolve_layout(descriptor)?;
        let front = Surface::new(plan.canvas);
        Ok(Self {
            plan,
            front,
            stage: PipelineStage::Idle,
            generation: 0,
            committed: None,
            scheduler: RepaintScheduler::new(REPAINT_QUIET_INTERVAL),
        })
    }

    /// Resolved layout geometry.
    pub fn plan(&self) -> &LayoutPlan {
        &self.plan
    }

    /// Current cycle stage.
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Generation of the last committed paint, if any.
    pub fn committed_generation(&self) -> Option<RenderGeneration> {
        self.committed
    }

    /// The visible canvas. Read-only: only this pipeline's draw sequence
    /// mutates the pixel buffer.
    pub fn surface(&self) -> &Surface {
        &self.front
    }

    /// Record a dependency change (layout color, frame, annotations, caption
    /// or source list): bumps the render generation and re-arms the repaint
    /// debounce. Returns the new generation token.
    pub fn invalidate(&mut self, now: Instant) -> RenderGeneration {
        self.generation += 1;
        self.scheduler.trigger(now);
        RenderGeneration(self.generation)
    }

    /// Whether a coalesced repaint is waiting for its quiet interval.
    pub fn repaint_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Run the pending repaint if its quiet interval has elapsed at `now`.
    pub fn repaint_if_due(
        &mut self,
        now: Instant,
        state: &CompositionState,
        sources: &mut SourceSet,
        assets: &mut AssetStore,
    ) -> SnapResult<Option<CycleReport>> {
        if !self.scheduler.is_due(now) {
            return Ok(None);
        }
        self.scheduler.acknowledge();
        self.render_cycle(state, sources, assets).map(Some)
    }

    /// Run one full repaint cycle immediately, captured at the latest
    /// generation.
    pub fn render_cycle(
        &mut self,
        state: &CompositionState,
        sources: &mut SourceSet,
        assets: &mut AssetStore,
    ) -> SnapResult<CycleReport> {
        let generation = RenderGeneration(self.generation);
        self.render_cycle_at(generation, state, sources, assets)
    }

    /// Run a repaint cycle that was captured at `generation` — e.g. before
    /// its decodes settled. The painted pixels commit only if no newer
    /// invalidation superseded the token; a stale cycle reports
    /// `committed: false` and leaves the front surface untouched.
    #[tracing::instrument(skip(self, state, sources, assets))]
    pub fn render_cycle_at(
        &mut self,
        generation: RenderGeneration,
        state: &CompositionState,
        sources: &mut SourceSet,
        assets: &mut AssetStore,
    ) -> SnapResult<CycleReport> {
        self.stage = PipelineStage::LoadingSources;
        let use_count = sources.len().min(self.plan.slots.len());
        let report = sources.settle_first(use_count);
        debug_assert!(report.barrier_cleared());

        self.stage = PipelineStage::Compositing;
        let mut back = Surface::new(self.plan.canvas);

        // (1) background
        back.fill(state.background.color());

        // (2) cropped photos; a failed decode leaves its slot as background
        for (idx, slot) in self.plan.slots.iter().enumerate().take(use_count) {
            let Some(img) = sources.image(idx) else {
                continue;
            };
            let crop = aspect_fill_crop(
                f64::from(img.width),
                f64::from(img.height),
                slot.width,
                slot.height,
            );
            back.draw_image_cropped(img, crop, *slot);
        }

        // (3) per-slot frame decoration on painted slots
        if state.frame.style() == Some(FrameStyle::PerSlot) {
            for (idx, slot) in self.plan.slots.iter().enumerate().take(use_count) {
                if sources.image(idx).is_some() {
                    catalog::draw_per_slot(&mut back, state.frame, *slot);
                }
            }
        }

        // (4) full-canvas overlay
        if state.frame.style() == Some(FrameStyle::FullCanvas) {
            let dst = SlotRect::full(self.plan.canvas);
            catalog::draw_full_canvas(&mut back, state.frame, dst, assets);
        }

        // (5) annotations, selected highlight last
        state.annotations.render(&mut back, assets.font());

        // (6) footer caption and date
        self.draw_footer(&mut back, state, assets);

        let committed = generation.0 == self.generation;
        if committed {
            self.front = back;
            self.committed = Some(generation);
            self.stage = PipelineStage::Done;
        } else {
            tracing::debug!(
                stale = generation.0,
                current = self.generation,
                "discarding superseded repaint cycle"
            );
            self.stage = PipelineStage::Idle;
        }

        Ok(CycleReport {
            generation,
            committed,
            settled: report.settled,
            decoded: report.decoded,
        })
    }

    fn draw_footer(&self, surface: &mut Surface, state: &CompositionState, assets: &mut AssetStore) {
        let Some(font) = assets.font() else {
            return;
        };
        let center_x = f64::from(self.plan.canvas.width) / 2.0;
        let bottom = f64::from(self.plan.canvas.height);

        text::draw_line_centered(
            surface,
            font,
            &state.caption,
            CAPTION_PX,
            state.background.caption_color(),
            center_x,
            bottom - CAPTION_BASELINE_FROM_BOTTOM,
        );
        if !state.date_label.is_empty() {
            text::draw_line_centered(
                surface,
                font,
                &state.date_label,
                DATE_PX,
                state.background.date_color(),
                center_x,
                bottom - DATE_BASELINE_FROM_BOTTOM,
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/pipeline.rs"]
mod tests;
