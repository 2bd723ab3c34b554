use super::*;

#[test]
fn every_palette_entry_parses() {
    for entry in BACKGROUND_PALETTE {
        let color = StripColor::parse(entry).unwrap();
        assert_eq!(color.as_str(), *entry);
    }
}

#[test]
fn named_colors_map_to_rgb() {
    assert_eq!(StripColor::parse("white").unwrap().rgb(), [255, 255, 255]);
    assert_eq!(StripColor::parse("black").unwrap().rgb(), [0, 0, 0]);
    assert_eq!(StripColor::parse("#800000").unwrap().rgb(), [128, 0, 0]);
    assert_eq!(StripColor::parse("#f6d5da").unwrap().rgb(), [246, 213, 218]);
}

#[test]
fn invalid_colors_are_rejected() {
    assert!(StripColor::parse("mauve").is_err());
    assert!(StripColor::parse("#12345").is_err());
    assert!(StripColor::parse("#zzzzzz").is_err());
}

#[test]
fn only_the_two_darkest_backgrounds_flip_to_light_text() {
    let dark: Vec<&str> = BACKGROUND_PALETTE
        .iter()
        .copied()
        .filter(|c| StripColor::parse(c).unwrap().is_dark())
        .collect();
    assert_eq!(dark, vec!["black", "#800000"]);

    assert_eq!(
        StripColor::parse("black").unwrap().caption_color(),
        Rgba8Premul::opaque(255, 255, 255)
    );
    assert_eq!(
        StripColor::parse("white").unwrap().caption_color(),
        Rgba8Premul::opaque(93, 64, 55)
    );
}

#[test]
fn serde_uses_the_raw_string_form() {
    let color = StripColor::parse("#adc3e5").unwrap();
    let json = serde_json::to_string(&color).unwrap();
    assert_eq!(json, "\"#adc3e5\"");
    assert_eq!(serde_json::from_str::<StripColor>(&json).unwrap(), color);
    assert!(serde_json::from_str::<StripColor>("\"nope\"").is_err());
}

#[test]
fn default_state_is_a_white_branded_strip() {
    let state = CompositionState::new();
    assert_eq!(state.background, StripColor::white());
    assert_eq!(state.frame, FrameId::None);
    assert_eq!(state.caption, "SnapBunny");
    assert!(state.annotations.is_empty());
}
