use kurbo::Shape;

use crate::foundation::core::{Point, Rgba8Premul, SlotRect};
use crate::render::surface::Surface;

/// Fill any kurbo [`Shape`] with `color` using the shape's winding rule,
/// sampled at pixel centers.
pub fn fill_shape<S: Shape>(surface: &mut Surface, shape: &S, color: Rgba8Premul) {
    let bbox = shape.bounding_box();
    let x0 = bbox.x0.floor().max(0.0) as i64;
    let y0 = bbox.y0.floor().max(0.0) as i64;
    let x1 = bbox.x1.ceil().min(f64::from(surface.width())) as i64;
    let y1 = bbox.y1.ceil().min(f64::from(surface.height())) as i64;

    for y in y0..y1 {
        for x in x0..x1 {
            let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if shape.contains(p) {
                surface.blend_pixel(x, y, color);
            }
        }
    }
}

/// Stroke a dashed rectangle outline, used for the selected-annotation
/// highlight. The dash pattern runs clockwise from the top-left corner.
pub fn stroke_dashed_rect(
    surface: &mut Surface,
    rect: SlotRect,
    color: Rgba8Premul,
    thickness: f64,
    dash: f64,
    gap: f64,
) {
    let period = (dash + gap).max(1.0);
    let on = |t: f64| t.rem_euclid(period) < dash;

    let w = rect.width.max(0.0);
    let h = rect.height.max(0.0);

    // Top, right, bottom, left — dash parameter continues around the loop.
    let mut edge_start = 0.0;
    for (horizontal, fixed, from, len, forward) in [
        (true, rect.y, rect.x, w, true),
        (false, rect.x + w, rect.y, h, true),
        (true, rect.y + h, rect.x, w, false),
        (false, rect.x, rect.y, h, false),
    ] {
        let steps = len.ceil() as i64;
        for i in 0..steps {
            let t = i as f64;
            if !on(edge_start + t) {
                continue;
            }
            let along = if forward { from + t } else { from + len - t };
            for d in 0..thickness.ceil() as i64 {
                let (x, y) = if horizontal {
                    (along as i64, (fixed - thickness / 2.0) as i64 + d)
                } else {
                    ((fixed - thickness / 2.0) as i64 + d, along as i64)
                };
                surface.blend_pixel(x, y, color);
            }
        }
        edge_start += len;
    }
}
