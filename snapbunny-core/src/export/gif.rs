use std::sync::Arc;
use std::sync::mpsc;

use crate::assets::sources::SourceSet;
use crate::assets::store::AssetStore;
use crate::compose::state::CompositionState;
use crate::foundation::core::{Canvas, SlotRect};
use crate::foundation::error::{SnapError, SnapResult};
use crate::frames::catalog::{self, FrameId, FrameStyle};
use crate::render::surface::Surface;

/// Export canvas width; every GIF frame is this size.
pub const EXPORT_WIDTH: u32 = 400;
/// Export canvas height.
pub const EXPORT_HEIGHT: u32 = 300;
/// Per-frame display duration in milliseconds.
pub const FRAME_DELAY_MS: u32 = 500;

const ENCODER_WORKERS: usize = 2;
const ENCODER_SPEED: i32 = 10;

/// Bounded worker pool that runs GIF encodes off the interactive thread.
/// Only the encoder uses background execution; completion arrives over an
/// mpsc channel polled from the interactive thread.
pub struct EncoderPool {
    pool: rayon::ThreadPool,
}

impl std::fmt::Debug for EncoderPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncoderPool")
            .field("workers", &self.pool.current_num_threads())
            .finish()
    }
}

impl EncoderPool {
    /// Build the fixed-size pool (2 workers).
    pub fn new() -> SnapResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(ENCODER_WORKERS)
            .thread_name(|i| format!("snapbunny-gif-{i}"))
            .build()
            .map_err(|e| SnapError::encode(format!("build encoder pool: {e}")))?;
        Ok(Self { pool })
    }

    fn submit(&self, frames: Vec<image::RgbaImage>, delay_ms: u32) -> PendingEncode {
        let (tx, rx) = mpsc::channel();
        self.pool.spawn(move || {
            let result = encode_gif(frames, delay_ms).map_err(|e| e.to_string());
            let _ = tx.send(result);
        });
        PendingEncode { rx }
    }
}

#[derive(Debug)]
struct PendingEncode {
    rx: mpsc::Receiver<Result<Vec<u8>, String>>,
}

impl PendingEncode {
    fn try_finish(&self) -> Option<Result<Vec<u8>, String>> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                Some(Err("encoder worker disconnected".to_string()))
            }
        }
    }
}

fn encode_gif(frames: Vec<image::RgbaImage>, delay_ms: u32) -> SnapResult<Vec<u8>> {
    use image::codecs::gif::{GifEncoder, Repeat};

    if frames.is_empty() {
        return Err(SnapError::encode("no frames to encode"));
    }

    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut out, ENCODER_SPEED);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| SnapError::encode(format!("set gif repeat: {e}")))?;
        for rgba in frames {
            let delay = image::Delay::from_numer_denom_ms(delay_ms, 1);
            let frame = image::Frame::from_parts(rgba, 0, 0, delay);
            encoder
                .encode_frame(frame)
                .map_err(|e| SnapError::encode(format!("encode gif frame: {e}")))?;
        }
    }
    Ok(out)
}

/// Status reported when the collaborator asks about the animated artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportStatus {
    /// No source images have been supplied yet; nothing to encode and no
    /// (empty) artifact is ever produced.
    NoSources,
    /// Encoding is running on the worker pool.
    Generating,
    /// The encoded loop is ready.
    Ready,
    /// The encoder failed; the still-image path is unaffected.
    Failed(String),
}

#[derive(Debug)]
enum ExportJob {
    Idle,
    InProgress(PendingEncode),
    Done(Arc<Vec<u8>>),
    Failed(String),
}

/// Builds the animated loop once per composition session.
///
/// Each source image is independently resampled into a private 400×300
/// export surface with the cover transform, the frame selected at the moment
/// the export began is applied, and the sequence goes to the encoder pool
/// with a fixed per-frame delay. Annotations are intentionally excluded from
/// the loop: no coordinate remapping between the composition canvas and the
/// export canvas is defined.
#[derive(Debug)]
pub struct AnimatedExportPipeline {
    pool: EncoderPool,
    job: ExportJob,
    started_with_frame: Option<FrameId>,
}

impl AnimatedExportPipeline {
    /// Build the pipeline and its worker pool.
    pub fn new() -> SnapResult<Self> {
        Ok(Self {
            pool: EncoderPool::new()?,
            job: ExportJob::Idle,
            started_with_frame: None,
        })
    }

    /// Start the export if it has not started yet, then report the current
    /// status. Guarded against concurrent re-invocation: while a job is in
    /// flight, or once an artifact exists, the existing result is returned
    /// rather than starting a second encode.
    #[tracing::instrument(skip(self, sources, state, assets))]
    pub fn ensure_started(
        &mut self,
        sources: &mut SourceSet,
        state: &CompositionState,
        assets: &mut AssetStore,
    ) -> ExportStatus {
        if matches!(self.job, ExportJob::Idle) {
            if sources.is_empty() {
                return ExportStatus::NoSources;
            }
            let frames = build_frames(sources, state, assets);
            if frames.is_empty() {
                self.job = ExportJob::Failed("no source image decoded".to_string());
            } else {
                tracing::debug!(frames = frames.len(), "starting gif encode");
                self.started_with_frame = Some(state.frame);
                self.job = ExportJob::InProgress(self.pool.submit(frames, FRAME_DELAY_MS));
            }
        }
        self.refresh()
    }

    /// Poll the job without starting anything.
    pub fn status(&mut self) -> ExportStatus {
        if matches!(self.job, ExportJob::Idle) {
            return ExportStatus::NoSources;
        }
        self.refresh()
    }

    /// The finished artifact bytes, once [`ExportStatus::Ready`].
    pub fn artifact(&self) -> Option<&[u8]> {
        match &self.job {
            ExportJob::Done(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Frame that was selected when the current artifact's encode began.
    pub fn started_with_frame(&self) -> Option<FrameId> {
        self.started_with_frame
    }

    /// Discard a finished artifact (or failure) so the next request
    /// re-encodes with fresh state. An in-flight job keeps running and its
    /// result is kept.
    pub fn invalidate(&mut self) {
        if !matches!(self.job, ExportJob::InProgress(_)) {
            self.job = ExportJob::Idle;
            self.started_with_frame = None;
        }
    }

    fn refresh(&mut self) -> ExportStatus {
        let finished = match &self.job {
            ExportJob::InProgress(pending) => match pending.try_finish() {
                None => return ExportStatus::Generating,
                Some(outcome) => Some(outcome),
            },
            _ => None,
        };
        match finished {
            Some(Ok(bytes)) => {
                tracing::debug!(len = bytes.len(), "gif encode finished");
                self.job = ExportJob::Done(Arc::new(bytes));
            }
            Some(Err(err)) => {
                tracing::warn!(%err, "gif encode failed");
                self.job = ExportJob::Failed(err);
            }
            None => {}
        }

        match &self.job {
            ExportJob::Idle => ExportStatus::NoSources,
            ExportJob::InProgress(_) => ExportStatus::Generating,
            ExportJob::Done(_) => ExportStatus::Ready,
            ExportJob::Failed(err) => ExportStatus::Failed(err.clone()),
        }
    }
}

fn build_frames(
    sources: &mut SourceSet,
    state: &CompositionState,
    assets: &mut AssetStore,
) -> Vec<image::RgbaImage> {
    let canvas = Canvas {
        width: EXPORT_WIDTH,
        height: EXPORT_HEIGHT,
    };
    let full = SlotRect::full(canvas);

    let count = sources.len();
    sources.settle_first(count);

    let mut frames = Vec::with_capacity(count);
    for idx in 0..count {
        let Some(img) = sources.image(idx) else {
            continue;
        };

        let mut surface = Surface::new(canvas);
        surface.fill(state.background.color());
        surface.draw_image_cover(img, full);
        match state.frame.style() {
            Some(FrameStyle::PerSlot) => catalog::draw_per_slot(&mut surface, state.frame, full),
            Some(FrameStyle::FullCanvas) => {
                catalog::draw_full_canvas(&mut surface, state.frame, full, assets)
            }
            None => {}
        }

        if let Some(rgba) =
            image::RgbaImage::from_raw(EXPORT_WIDTH, EXPORT_HEIGHT, surface.data().to_vec())
        {
            frames.push(rgba);
        }
    }
    frames
}

#[cfg(test)]
#[path = "../../tests/unit/export/gif.rs"]
mod tests;
