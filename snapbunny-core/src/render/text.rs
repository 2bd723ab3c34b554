use crate::foundation::core::Rgba8Premul;
use crate::foundation::math::mul_div255;
use crate::render::surface::Surface;

/// Measured extents of one text line at a given pixel size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineExtents {
    /// Total advance width.
    pub width: f64,
    /// Tallest ascent above the baseline.
    pub ascent: f64,
    /// Deepest descent below the baseline.
    pub descent: f64,
}

/// Measure `text` as a single line at `px` pixels.
pub fn measure_line(font: &fontdue::Font, text: &str, px: f32) -> LineExtents {
    let mut out = LineExtents::default();
    for ch in text.chars() {
        let metrics = font.metrics(ch, px);
        let ascent = metrics.height as i32 + metrics.ymin;
        let descent = -metrics.ymin;
        out.ascent = out.ascent.max(f64::from(ascent));
        out.descent = out.descent.max(f64::from(descent));
        out.width += f64::from(metrics.advance_width);
    }
    out
}

/// Draw `text` as one line, horizontally centered on `center_x` with its
/// baseline at `baseline_y`, source-over blended with glyph coverage as
/// alpha.
pub fn draw_line_centered(
    surface: &mut Surface,
    font: &fontdue::Font,
    text: &str,
    px: f32,
    color: Rgba8Premul,
    center_x: f64,
    baseline_y: f64,
) {
    let extents = measure_line(font, text, px);
    let mut cursor_x = center_x - extents.width / 2.0;

    for ch in text.chars() {
        let (metrics, bitmap) = font.rasterize(ch, px);
        let glyph_x = cursor_x + f64::from(metrics.xmin);
        let glyph_y = baseline_y - f64::from(metrics.height as i32 + metrics.ymin);

        for gy in 0..metrics.height {
            for gx in 0..metrics.width {
                let coverage = bitmap[gy * metrics.width + gx];
                if coverage == 0 {
                    continue;
                }
                let cov = u16::from(coverage);
                let src = Rgba8Premul {
                    r: mul_div255(u16::from(color.r), cov),
                    g: mul_div255(u16::from(color.g), cov),
                    b: mul_div255(u16::from(color.b), cov),
                    a: mul_div255(u16::from(color.a), cov),
                };
                surface.blend_pixel(glyph_x as i64 + gx as i64, glyph_y as i64 + gy as i64, src);
            }
        }
        cursor_x += f64::from(metrics.advance_width);
    }
}

/// Draw `text` centered both ways inside a box, sized so the glyph height is
/// `px`. Used by glyph stickers, whose width doubles as the font size.
pub fn draw_line_in_box(
    surface: &mut Surface,
    font: &fontdue::Font,
    text: &str,
    px: f32,
    color: Rgba8Premul,
    center_x: f64,
    center_y: f64,
) {
    let extents = measure_line(font, text, px);
    let baseline_y = center_y + (extents.ascent - extents.descent) / 2.0;
    draw_line_centered(surface, font, text, px, color, center_x, baseline_y);
}
