use std::sync::Arc;

use base64::Engine as _;

use crate::foundation::error::{SnapError, SnapResult};

/// Prepared raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Natural height/width ratio, guarded against zero width.
    pub fn aspect(&self) -> f64 {
        if self.width == 0 {
            1.0
        } else {
            f64::from(self.height) / f64::from(self.width)
        }
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> SnapResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| SnapError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Decode a `data:image/...;base64,` URI — the form the capture flow hands
/// over — into premultiplied RGBA8.
pub fn decode_data_uri(uri: &str) -> SnapResult<PreparedImage> {
    let payload = uri
        .strip_prefix("data:")
        .ok_or_else(|| SnapError::decode("not a data URI"))?;
    let (meta, data) = payload
        .split_once(',')
        .ok_or_else(|| SnapError::decode("data URI has no payload"))?;
    if !meta.ends_with(";base64") {
        return Err(SnapError::decode("only base64 data URIs are supported"));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(data.trim())
        .map_err(|e| SnapError::decode(format!("decode base64 image payload: {e}")))?;
    decode_image(&bytes)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
