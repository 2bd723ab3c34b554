use image::ImageEncoder as _;

use crate::foundation::error::{SnapError, SnapResult};
use crate::render::surface::Surface;

/// Fixed filename of the still composite download.
pub const STILL_FILENAME: &str = "SnapBunny.jpg";
/// Fixed filename of the animated loop download.
pub const ANIMATED_FILENAME: &str = "SnapBunny.gif";
/// Share page encoded into the QR convenience link.
pub const SHARE_PAGE_URL: &str = "https://snapbunny.app";

const JPEG_QUALITY: u8 = 90;
const QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";
const QR_COLOR: &str = "ff80ab";

/// Encode the visible canvas as the still JPEG download (quality 90).
pub fn still_jpeg(surface: &Surface) -> SnapResult<Vec<u8>> {
    let rgb = surface.to_rgb8();
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
        .write_image(
            &rgb,
            surface.width(),
            surface.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| SnapError::encode(format!("encode still jpeg: {e}")))?;
    Ok(out)
}

/// Build the third-party QR image URL for `data`.
///
/// Fire-and-forget convenience: the engine only constructs the URL and never
/// performs the request, so rendering can never block on it.
pub fn qr_share_url(data: &str) -> String {
    format!("{QR_ENDPOINT}?size=150x150&data={data}&color={QR_COLOR}")
}
