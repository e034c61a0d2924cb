use std::io::Cursor;

use super::*;

fn png_1x1(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(1, 1, rgba.to_vec()).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn normalize_rel_path_rules() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("../up.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn request_shares_one_slot_per_path() {
    let mut cache = ResourceCache::new();
    let a = cache.request("maps/d.png").unwrap();
    let b = cache.request("maps\\d.png").unwrap();
    assert_eq!(a, b);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.pending(), vec!["maps/d.png".to_string()]);
}

#[test]
fn pending_handle_samples_placeholder_then_swaps_in_place() {
    let mut cache = ResourceCache::new();
    let h = cache.request("img.png").unwrap();
    assert!(!h.is_ready());
    assert_eq!(h.texture(), Texture::placeholder());

    cache.resolve("img.png", &png_1x1([0, 0, 255, 255])).unwrap();
    assert!(h.is_ready());
    assert_eq!(h.texture().rgba8_premul.as_slice(), &[0, 0, 255, 255]);
    assert!(cache.pending().is_empty());
}

#[test]
fn failed_decode_keeps_placeholder() {
    let mut cache = ResourceCache::new();
    let h = cache.request("broken.png").unwrap();
    let err = cache.resolve("broken.png", b"nope").unwrap_err();
    assert!(matches!(err, SlideFxError::ResourceLoad { .. }));
    assert!(matches!(h.state(), TextureState::Failed(_)));
    assert_eq!(h.texture(), Texture::placeholder());
}

#[test]
fn load_pending_reports_each_path() {
    let mut cache = ResourceCache::new();
    let ok = cache.request("ok.png").unwrap();
    let missing = cache.request("missing.png").unwrap();

    let loader = MemoryTextureLoader::new().with("ok.png", png_1x1([1, 2, 3, 255]));
    let report = pollster::block_on(cache.load_pending(&loader));

    assert_eq!(report.loaded, vec!["ok.png".to_string()]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "missing.png");
    assert!(ok.is_ready());
    assert!(!missing.is_ready());
    assert!(!report.is_clean());
}

#[test]
fn external_refs_track_outstanding_handles() {
    let mut cache = ResourceCache::new();
    let h = cache.request("x.png").unwrap();
    assert_eq!(cache.external_refs("x.png"), 1);
    drop(h);
    assert_eq!(cache.external_refs("x.png"), 0);
}
