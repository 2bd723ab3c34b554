use super::*;
use base64::Engine as _;

fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

#[test]
fn decode_reports_dimensions() {
    let img = decode_image(&png_bytes(8, 6, [255, 0, 0, 255])).unwrap();
    assert_eq!((img.width, img.height), (8, 6));
    assert_eq!(img.rgba8_premul.len(), 8 * 6 * 4);
    assert_eq!(&img.rgba8_premul[..4], &[255, 0, 0, 255]);
}

#[test]
fn decode_premultiplies_alpha() {
    let img = decode_image(&png_bytes(2, 2, [255, 128, 0, 128])).unwrap();
    assert_eq!(&img.rgba8_premul[..4], &[128, 64, 0, 128]);
}

#[test]
fn corrupt_bytes_fail_with_decode_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, SnapError::Decode(_)));
}

#[test]
fn data_uri_roundtrip() {
    let png = png_bytes(4, 4, [0, 255, 0, 255]);
    let uri = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&png)
    );
    let img = decode_data_uri(&uri).unwrap();
    assert_eq!((img.width, img.height), (4, 4));
}

#[test]
fn data_uri_rejects_non_base64_and_plain_strings() {
    assert!(decode_data_uri("http://example.com/a.png").is_err());
    assert!(decode_data_uri("data:image/png;base64").is_err());
    assert!(decode_data_uri("data:image/png,rawpayload").is_err());
    assert!(decode_data_uri("data:image/png;base64,@@@@").is_err());
}

#[test]
fn aspect_is_height_over_width() {
    let img = decode_image(&png_bytes(200, 100, [1, 2, 3, 255])).unwrap();
    assert!((img.aspect() - 0.5).abs() < 1e-12);
}
