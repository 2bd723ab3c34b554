use super::*;
use crate::foundation::core::Canvas;

fn glyph(layer: &mut AnnotationLayer, s: &str) -> AnnotationId {
    layer.add(AnnotationContent::Glyph(s.to_string()))
}

fn image_2to1(layer: &mut AnnotationLayer) -> AnnotationId {
    // 200x100 source: aspect (height/width) is 0.5.
    let img = PreparedImage {
        width: 200,
        height: 100,
        rgba8_premul: std::sync::Arc::new(vec![255; 200 * 100 * 4]),
    };
    layer.add(AnnotationContent::Image(img))
}

fn view() -> ViewMetrics {
    ViewMetrics::one_to_one(Canvas {
        width: 480,
        height: 1460,
    })
}

#[test]
fn add_places_at_default_and_selects() {
    let mut layer = AnnotationLayer::new();
    let id = glyph(&mut layer, "hi");
    let a = layer.get(id).unwrap();
    assert_eq!((a.x, a.y), (40.0, 40.0));
    assert_eq!((a.width, a.height), (40.0, 40.0));
    assert_eq!(layer.selected(), Some(id));
}

#[test]
fn image_defaults_derive_height_from_aspect() {
    let mut layer = AnnotationLayer::new();
    let id = image_2to1(&mut layer);
    let a = layer.get(id).unwrap();
    assert_eq!(a.width, 120.0);
    assert_eq!(a.height, 60.0);
}

#[test]
fn ids_are_monotonic_and_never_reused() {
    let mut layer = AnnotationLayer::new();
    let a = glyph(&mut layer, "a");
    let b = glyph(&mut layer, "b");
    assert!(b > a);
    layer.remove(b);
    let c = glyph(&mut layer, "c");
    assert!(c > b);
}

#[test]
fn hit_test_prefers_the_most_recently_added() {
    let mut layer = AnnotationLayer::new();
    let a = glyph(&mut layer, "a");
    let b = glyph(&mut layer, "b"); // same default position: full overlap

    let hit = layer.hit_test(Point::new(50.0, 50.0), &view());
    assert_eq!(hit, Some(b));
    assert_ne!(hit, Some(a));
    assert_eq!(layer.hit_test(Point::new(400.0, 400.0), &view()), None);
}

#[test]
fn hit_test_converts_display_coordinates() {
    let mut layer = AnnotationLayer::new();
    let id = glyph(&mut layer, "a"); // canvas box (40,40,40,40)

    // Canvas is displayed at half size: canvas point (50,50) is display (25,25).
    let halved = ViewMetrics {
        canvas: Canvas {
            width: 480,
            height: 1460,
        },
        rendered_width: 240.0,
        rendered_height: 730.0,
    };
    assert_eq!(layer.hit_test(Point::new(25.0, 25.0), &halved), Some(id));
    assert_eq!(layer.hit_test(Point::new(50.0, 50.0), &halved), None);
}

#[test]
fn drag_tracks_pointer_minus_grab_offset() {
    let mut layer = AnnotationLayer::new();
    let id = glyph(&mut layer, "a");

    layer.begin_drag(id, Point::new(50.0, 55.0), &view());
    layer.continue_drag(Point::new(150.0, 155.0), &view());
    let a = layer.get(id).unwrap();
    assert_eq!((a.x, a.y), (140.0, 140.0));

    // No clamping: annotations may leave the canvas entirely.
    layer.continue_drag(Point::new(-100.0, -100.0), &view());
    let a = layer.get(id).unwrap();
    assert_eq!((a.x, a.y), (-110.0, -115.0));

    layer.end_drag();
    layer.continue_drag(Point::new(300.0, 300.0), &view());
    assert_eq!(layer.get(id).unwrap().x, -110.0);
    layer.end_drag(); // idempotent
}

#[test]
fn begin_drag_misses_silently() {
    let mut layer = AnnotationLayer::new();
    let id = glyph(&mut layer, "a");

    // Pointer not over the annotation: nothing starts.
    layer.begin_drag(id, Point::new(300.0, 300.0), &view());
    layer.continue_drag(Point::new(310.0, 310.0), &view());
    assert_eq!(layer.get(id).unwrap().x, 40.0);
}

#[test]
fn resize_preserves_image_aspect_ratio() {
    let mut layer = AnnotationLayer::new();
    let id = image_2to1(&mut layer);
    let before = layer.get(id).unwrap().height / layer.get(id).unwrap().width;

    layer.resize(id, 80.0);
    let a = layer.get(id).unwrap();
    assert_eq!(a.width, 80.0);
    assert_eq!(a.height, 40.0);
    assert!((a.height / a.width - before).abs() < 1e-12);
}

#[test]
fn resize_glyph_sets_both_extents() {
    let mut layer = AnnotationLayer::new();
    let id = glyph(&mut layer, "a");
    layer.resize(id, 64.0);
    let a = layer.get(id).unwrap();
    assert_eq!((a.width, a.height), (64.0, 64.0));
}

#[test]
fn duplicate_offsets_by_twenty_and_selects_the_clone() {
    let mut layer = AnnotationLayer::new();
    let id = glyph(&mut layer, "⭐");
    // (40,40,size=40) as in the selection flow.
    let clone = layer.duplicate(id).unwrap();

    let c = layer.get(clone).unwrap();
    assert_eq!((c.x, c.y), (60.0, 60.0));
    assert_eq!((c.width, c.height), (40.0, 40.0));
    assert_eq!(layer.selected(), Some(clone));
    assert_ne!(clone, id);
    assert_eq!(layer.len(), 2);
}

#[test]
fn remove_clears_selection_of_the_victim() {
    let mut layer = AnnotationLayer::new();
    let a = glyph(&mut layer, "a");
    let b = glyph(&mut layer, "b");

    assert!(layer.remove(b));
    assert_eq!(layer.selected(), None);
    assert!(!layer.remove(b));
    assert_eq!(layer.len(), 1);

    layer.select(Some(a));
    assert!(layer.remove(a));
    assert!(layer.is_empty());
    assert_eq!(layer.selected(), None);
}

#[test]
fn render_paints_image_content_and_highlight() {
    let mut layer = AnnotationLayer::new();
    let id = image_2to1(&mut layer);
    layer.set_position(id, 10.0, 10.0);

    let mut surface = Surface::new(Canvas {
        width: 200,
        height: 200,
    });
    layer.render(&mut surface, None);

    let center = {
        let idx = (40usize * 200 + 60) * 4;
        surface.data()[idx + 3]
    };
    assert_eq!(center, 255);

    // Dashed highlight extends just outside the bounds.
    let above = {
        let idx = (7usize * 200 + 30) * 4;
        surface.data()[idx + 3]
    };
    assert!(above > 0);
}
