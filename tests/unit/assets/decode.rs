use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_texture_png_dimensions_and_premul() {
    let buf = png_bytes(1, 1, vec![100u8, 50u8, 200u8, 128u8]);

    let tex = decode_texture(&buf).unwrap();
    assert_eq!(tex.width, 1);
    assert_eq!(tex.height, 1);
    assert_eq!(
        tex.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn transparent_pixels_clear_color() {
    let buf = png_bytes(2, 1, vec![255, 255, 255, 0, 10, 20, 30, 255]);
    let tex = decode_texture(&buf).unwrap();
    assert_eq!(tex.rgba8_premul.as_slice(), &[0, 0, 0, 0, 10, 20, 30, 255]);
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(decode_texture(b"not an image").is_err());
}

#[test]
fn placeholder_is_single_neutral_pixel() {
    let p = Texture::placeholder();
    assert_eq!((p.width, p.height), (1, 1));
    assert_eq!(p.byte_len(), 4);
}
