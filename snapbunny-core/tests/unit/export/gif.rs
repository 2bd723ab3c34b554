use super::*;

use std::time::{Duration, Instant};

use crate::assets::sources::ImageSource;

fn png_source(rgba: [u8; 4]) -> ImageSource {
    let img = image::RgbaImage::from_pixel(640, 480, image::Rgba(rgba));
    let mut out = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    ImageSource::Bytes(out)
}

fn empty_assets(name: &str) -> AssetStore {
    let root = std::path::PathBuf::from("target")
        .join("unit_export_assets")
        .join(name);
    std::fs::create_dir_all(&root).unwrap();
    AssetStore::new(root)
}

fn wait_for_terminal(pipeline: &mut AnimatedExportPipeline) -> ExportStatus {
    let deadline = Instant::now() + Duration::from_secs(20);
    loop {
        match pipeline.status() {
            ExportStatus::Generating => {
                assert!(Instant::now() < deadline, "encode did not finish in time");
                std::thread::sleep(Duration::from_millis(20));
            }
            terminal => return terminal,
        }
    }
}

#[test]
fn no_sources_yield_no_artifact_ever() {
    let mut pipeline = AnimatedExportPipeline::new().unwrap();
    let mut sources = SourceSet::new();
    let state = CompositionState::new();
    let mut assets = empty_assets("no_sources");

    let status = pipeline.ensure_started(&mut sources, &state, &mut assets);
    assert_eq!(status, ExportStatus::NoSources);
    assert!(pipeline.artifact().is_none());
    assert_eq!(pipeline.status(), ExportStatus::NoSources);
}

#[test]
fn encode_produces_a_gif_blob() {
    let mut pipeline = AnimatedExportPipeline::new().unwrap();
    let mut sources = SourceSet::from_sources(vec![
        png_source([255, 0, 0, 255]),
        png_source([0, 255, 0, 255]),
    ]);
    let state = CompositionState::new();
    let mut assets = empty_assets("encode_ok");

    let status = pipeline.ensure_started(&mut sources, &state, &mut assets);
    assert!(matches!(
        status,
        ExportStatus::Generating | ExportStatus::Ready
    ));

    assert_eq!(wait_for_terminal(&mut pipeline), ExportStatus::Ready);
    let artifact = pipeline.artifact().unwrap();
    assert!(artifact.len() > 6);
    assert_eq!(&artifact[..4], b"GIF8");
    assert_eq!(pipeline.started_with_frame(), Some(FrameId::None));
}

#[test]
fn second_request_returns_the_existing_result() {
    let mut pipeline = AnimatedExportPipeline::new().unwrap();
    let mut sources = SourceSet::from_sources(vec![png_source([9, 9, 9, 255])]);
    let mut state = CompositionState::new();
    let mut assets = empty_assets("guard");

    pipeline.ensure_started(&mut sources, &state, &mut assets);
    assert_eq!(wait_for_terminal(&mut pipeline), ExportStatus::Ready);
    let first_len = pipeline.artifact().unwrap().len();

    // Later edits do not re-synchronize the existing artifact.
    state.frame = FrameId::Pastel;
    let status = pipeline.ensure_started(&mut sources, &state, &mut assets);
    assert_eq!(status, ExportStatus::Ready);
    assert_eq!(pipeline.artifact().unwrap().len(), first_len);
    assert_eq!(pipeline.started_with_frame(), Some(FrameId::None));
}

#[test]
fn all_corrupt_sources_fail_without_an_empty_blob() {
    let mut pipeline = AnimatedExportPipeline::new().unwrap();
    let mut sources = SourceSet::from_sources(vec![
        ImageSource::Bytes(b"junk".to_vec()),
        ImageSource::Bytes(b"more junk".to_vec()),
    ]);
    let state = CompositionState::new();
    let mut assets = empty_assets("all_corrupt");

    let status = pipeline.ensure_started(&mut sources, &state, &mut assets);
    assert!(matches!(status, ExportStatus::Failed(_)));
    assert!(pipeline.artifact().is_none());
}

#[test]
fn invalidate_allows_a_fresh_encode() {
    let mut pipeline = AnimatedExportPipeline::new().unwrap();
    let mut sources = SourceSet::from_sources(vec![png_source([1, 2, 3, 255])]);
    let state = CompositionState::new();
    let mut assets = empty_assets("invalidate");

    pipeline.ensure_started(&mut sources, &state, &mut assets);
    assert_eq!(wait_for_terminal(&mut pipeline), ExportStatus::Ready);

    pipeline.invalidate();
    assert!(pipeline.artifact().is_none());
    assert_eq!(pipeline.status(), ExportStatus::NoSources);

    let status = pipeline.ensure_started(&mut sources, &state, &mut assets);
    assert!(matches!(
        status,
        ExportStatus::Generating | ExportStatus::Ready
    ));
    assert_eq!(wait_for_terminal(&mut pipeline), ExportStatus::Ready);
}

#[test]
fn per_slot_frame_applies_to_the_export_canvas() {
    let mut pipeline = AnimatedExportPipeline::new().unwrap();
    let mut sources = SourceSet::from_sources(vec![png_source([0, 0, 0, 255])]);
    let mut state = CompositionState::new();
    state.frame = FrameId::Cute;
    let mut assets = empty_assets("framed");

    pipeline.ensure_started(&mut sources, &state, &mut assets);
    assert_eq!(wait_for_terminal(&mut pipeline), ExportStatus::Ready);
    assert_eq!(pipeline.started_with_frame(), Some(FrameId::Cute));
}
