use super::*;

fn solid_image(width: u32, height: u32, px: [u8; 4]) -> PreparedImage {
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for _ in 0..width * height {
        data.extend_from_slice(&px);
    }
    PreparedImage {
        width,
        height,
        rgba8_premul: std::sync::Arc::new(data),
    }
}

fn pixel(surface: &Surface, x: u32, y: u32) -> [u8; 4] {
    let idx = (y as usize * surface.width() as usize + x as usize) * 4;
    let d = surface.data();
    [d[idx], d[idx + 1], d[idx + 2], d[idx + 3]]
}

#[test]
fn fill_replaces_every_pixel() {
    let mut s = Surface::new(Canvas {
        width: 4,
        height: 3,
    });
    s.fill(Rgba8Premul::opaque(1, 2, 3));
    assert_eq!(pixel(&s, 0, 0), [1, 2, 3, 255]);
    assert_eq!(pixel(&s, 3, 2), [1, 2, 3, 255]);
}

#[test]
fn to_rgb8_drops_alpha() {
    let mut s = Surface::new(Canvas {
        width: 2,
        height: 1,
    });
    s.fill(Rgba8Premul::opaque(10, 20, 30));
    assert_eq!(s.to_rgb8(), vec![10, 20, 30, 10, 20, 30]);
}

#[test]
fn fill_rect_is_clipped_to_the_surface() {
    let mut s = Surface::new(Canvas {
        width: 4,
        height: 4,
    });
    s.fill_rect(
        SlotRect::new(2.0, 2.0, 100.0, 100.0),
        Rgba8Premul::opaque(255, 0, 0),
    );
    assert_eq!(pixel(&s, 3, 3), [255, 0, 0, 255]);
    assert_eq!(pixel(&s, 1, 1), [0, 0, 0, 0]);
}

#[test]
fn blend_is_source_over_premultiplied() {
    let mut s = Surface::new(Canvas {
        width: 1,
        height: 1,
    });
    s.fill(Rgba8Premul::opaque(0, 0, 100));
    // 50% white over blue.
    s.blend_pixel(0, 0, Rgba8Premul::from_straight_rgba(255, 255, 255, 128));
    let [r, g, b, a] = pixel(&s, 0, 0);
    assert_eq!(a, 255);
    assert!(r > 120 && r < 140);
    assert!(g > 120 && g < 140);
    assert!(b > 160 && b < 180);
}

#[test]
fn out_of_bounds_blend_is_ignored() {
    let mut s = Surface::new(Canvas {
        width: 2,
        height: 2,
    });
    s.blend_pixel(-1, 0, Rgba8Premul::opaque(9, 9, 9));
    s.blend_pixel(0, 5, Rgba8Premul::opaque(9, 9, 9));
    assert!(s.data().iter().all(|&b| b == 0));
}

#[test]
fn cropped_draw_fills_the_destination_rect() {
    let src = solid_image(10, 10, [0, 200, 0, 255]);
    let mut s = Surface::new(Canvas {
        width: 8,
        height: 8,
    });
    s.draw_image_cropped(
        &src,
        CropRect::full(10.0, 10.0),
        SlotRect::new(2.0, 2.0, 4.0, 4.0),
    );
    assert_eq!(pixel(&s, 3, 3), [0, 200, 0, 255]);
    assert_eq!(pixel(&s, 0, 0), [0, 0, 0, 0]);
    assert_eq!(pixel(&s, 7, 7), [0, 0, 0, 0]);
}

#[test]
fn cover_draw_fills_the_whole_destination() {
    // Tall source covering a wide destination still leaves no gaps.
    let src = solid_image(4, 16, [50, 60, 70, 255]);
    let mut s = Surface::new(Canvas {
        width: 8,
        height: 4,
    });
    s.draw_image_cover(&src, SlotRect::full(s.canvas()));
    assert!(s.data().chunks_exact(4).all(|px| px == [50, 60, 70, 255]));
}

#[test]
fn drawing_is_idempotent() {
    let src = solid_image(6, 6, [9, 8, 7, 255]);
    let paint = |s: &mut Surface| {
        s.fill(Rgba8Premul::opaque(255, 255, 255));
        s.draw_image_cropped(
            &src,
            CropRect::full(6.0, 6.0),
            SlotRect::new(1.0, 1.0, 4.0, 4.0),
        );
    };

    let mut a = Surface::new(Canvas {
        width: 6,
        height: 6,
    });
    let mut b = Surface::new(Canvas {
        width: 6,
        height: 6,
    });
    paint(&mut a);
    paint(&mut b);
    assert_eq!(a, b);

    paint(&mut a);
    assert_eq!(a, b);
}
