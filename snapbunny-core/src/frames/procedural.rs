use kurbo::{BezPath, Circle, Ellipse};

use crate::foundation::core::{Rgba8Premul, SlotRect};
use crate::render::raster::fill_shape;
use crate::render::surface::Surface;

const GOLD: Rgba8Premul = Rgba8Premul {
    r: 255,
    g: 215,
    b: 0,
    a: 255,
};
const HEART_ROSE: Rgba8Premul = Rgba8Premul {
    r: 204,
    g: 128,
    b: 132,
    a: 255,
};
const BOW_PINK: Rgba8Premul = Rgba8Premul {
    r: 249,
    g: 206,
    b: 231,
    a: 255,
};
const BOW_KNOT: Rgba8Premul = Rgba8Premul {
    r: 230,
    g: 139,
    b: 190,
    a: 255,
};
const SKY_BLUE: Rgba8Premul = Rgba8Premul {
    r: 135,
    g: 206,
    b: 235,
    a: 255,
};

/// Pastel sticker set: bows, hearts and gold dots scattered around the slot
/// corners.
pub fn draw_pastel(surface: &mut Surface, slot: SlotRect) {
    let (x, y, w, h) = (slot.x, slot.y, slot.width, slot.height);
    draw_bow(surface, x + 11.0, y + 5.0);
    draw_heart(surface, x - 18.0, y + 95.0);
    draw_star(surface, x + w - 40.0, y + 10.0);
    draw_heart(surface, x + w - 1.0, y + 50.0);
    draw_star(surface, x + 20.0, y + h - 20.0);
    draw_bow(surface, x + w - 25.0, y + h - 5.0);
}

/// Cute sticker set: a sky dot, a gold sun and a translucent cloud.
pub fn draw_cute(surface: &mut Surface, slot: SlotRect) {
    let (x, y, w, h) = (slot.x, slot.y, slot.width, slot.height);
    fill_shape(surface, &Circle::new((x + 20.0, y + 5.0), 14.0), SKY_BLUE);
    fill_shape(surface, &Circle::new((x + w - 20.0, y + 18.0), 15.0), GOLD);

    let cloud_white = Rgba8Premul::from_straight_rgba(255, 255, 255, 204);
    fill_shape(
        surface,
        &Circle::new((x + w - 40.0, y + h - 20.0), 10.0),
        cloud_white,
    );
    fill_shape(
        surface,
        &Circle::new((x + w - 30.0, y + h - 30.0), 12.0),
        cloud_white,
    );
    fill_shape(
        surface,
        &Circle::new((x + w - 20.0, y + h - 20.0), 10.0),
        cloud_white,
    );
}

fn draw_star(surface: &mut Surface, x: f64, y: f64) {
    fill_shape(surface, &Circle::new((x, y), 12.0), GOLD);
}

fn draw_heart(surface: &mut Surface, x: f64, y: f64) {
    let s = 22.0;
    let mut path = BezPath::new();
    path.move_to((x, y + s / 4.0));
    path.curve_to((x, y), (x - s / 2.0, y), (x - s / 2.0, y + s / 4.0));
    path.curve_to(
        (x - s / 2.0, y + s / 2.0),
        (x, y + s * 0.75),
        (x, y + s),
    );
    path.curve_to(
        (x, y + s * 0.75),
        (x + s / 2.0, y + s / 2.0),
        (x + s / 2.0, y + s / 4.0),
    );
    path.curve_to((x + s / 2.0, y), (x, y), (x, y + s / 4.0));
    path.close_path();
    fill_shape(surface, &path, HEART_ROSE);
}

fn draw_bow(surface: &mut Surface, x: f64, y: f64) {
    let quarter_turn = std::f64::consts::FRAC_PI_4;
    fill_shape(
        surface,
        &Ellipse::new((x - 10.0, y), (10.0, 6.0), quarter_turn),
        BOW_PINK,
    );
    fill_shape(
        surface,
        &Ellipse::new((x + 10.0, y), (10.0, 6.0), -quarter_turn),
        BOW_PINK,
    );
    fill_shape(surface, &Circle::new((x, y), 4.0), BOW_KNOT);
}
