use super::*;
use crate::layout::geometry::LayoutKind;

#[test]
fn minimal_session_applies_defaults() {
    let json = r##"
{
  "layout": "layoutA",
  "images": ["shots/1.png", "shots/2.png"]
}
"##;
    let session = Session::from_reader(json.as_bytes()).unwrap();
    assert_eq!(
        session.descriptor().unwrap().kind,
        LayoutKind::Strip { poses: 4 }
    );
    assert_eq!(session.color, StripColor::white());
    assert_eq!(session.frame, FrameId::None);
    assert_eq!(session.caption, "SnapBunny");
    assert!(session.stickers.is_empty());
    assert_eq!(session.source_set().len(), 2);
}

#[test]
fn explicit_descriptor_and_settings_parse() {
    let json = r##"
{
  "layout": { "kind": { "grid": { "rows": 3, "cols": 2 } }, "pose_count": 6 },
  "images": [],
  "color": "#800000",
  "frame": "mofusandImage",
  "caption": "Party!",
  "stickers": [ { "glyph": "⭐", "x": 100.0, "y": 200.0, "size": 64.0 } ]
}
"##;
    let session = Session::from_reader(json.as_bytes()).unwrap();
    assert_eq!(
        session.descriptor().unwrap().kind,
        LayoutKind::Grid { rows: 3, cols: 2 }
    );
    assert_eq!(session.frame, FrameId::Mofusand);
    assert!(session.color.is_dark());

    let state = session.initial_state("01/02/2026");
    assert_eq!(state.caption, "Party!");
    assert_eq!(state.date_label, "01/02/2026");
    assert_eq!(state.annotations.len(), 1);
    // Pre-placed stickers start unselected.
    assert_eq!(state.annotations.selected(), None);

    let sticker = state.annotations.iter().next().unwrap();
    assert_eq!((sticker.x, sticker.y), (100.0, 200.0));
    assert_eq!((sticker.width, sticker.height), (64.0, 64.0));
}

#[test]
fn invalid_sessions_are_validation_errors() {
    assert!(matches!(
        Session::from_reader(&b"not json"[..]),
        Err(SnapError::Validation(_))
    ));
    let bad_preset = r##"{ "layout": "layoutZ", "images": [] }"##;
    let session = Session::from_reader(bad_preset.as_bytes()).unwrap();
    assert!(session.descriptor().is_err());

    let mismatched = r##"
{ "layout": { "kind": { "strip": { "poses": 4 } }, "pose_count": 3 }, "images": [] }
"##;
    let session = Session::from_reader(mismatched.as_bytes()).unwrap();
    assert!(session.descriptor().is_err());
}

#[test]
fn data_uri_images_become_data_uri_sources() {
    let json = r##"{ "layout": "layoutS", "images": ["data:image/png;base64,AAAA"] }"##;
    let session = Session::from_reader(json.as_bytes()).unwrap();
    let set = session.source_set();
    assert_eq!(set.len(), 1);
}
