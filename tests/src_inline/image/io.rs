use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

static FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_png_path() -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    let id = FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    path.push(format!("kira_spotgrid_img_{}_{}.png", std::process::id(), id));
    path
}

#[test]
fn test_luminance_weights() {
    let rgb = [255u8, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
    let gray = luminance_from_rgb(4, 1, &rgb).unwrap();
    let view = gray.as_view();
    assert_eq!(view.get(0, 0), Some(76));
    assert_eq!(view.get(1, 0), Some(150));
    assert_eq!(view.get(2, 0), Some(29));
    assert_eq!(view.get(3, 0), Some(255));
}

#[test]
fn test_pixel_access_outside_image() {
    let mut img = GrayImageU8::filled(3, 2, 10);
    img.set(3, 0, 99);
    img.set(0, 2, 99);
    img.set(2, 1, 99);
    let view = img.as_view();
    assert_eq!(view.get(3, 0), None);
    assert_eq!(view.get(0, 2), None);
    assert_eq!(view.get(2, 1), Some(99));
    assert_eq!(view.get(0, 0), Some(10));

    // Declared larger than the buffer.
    let short = GrayImageU8::new(4, 4, vec![1; 6]);
    assert_eq!(short.as_view().get(3, 3), None);
    let mut short = short;
    short.set(3, 3, 5);
    assert_eq!(short.as_view().row(3), &[] as &[u8]);
}

#[test]
fn test_luminance_rejects_bad_length() {
    let err = luminance_from_rgb(2, 2, &[0u8; 11]).unwrap_err();
    assert!(matches!(err, ImageLoadError::BufferSize { len: 11, .. }));
}

#[test]
fn test_load_png_roundtrip() {
    let path = temp_png_path();
    let mut img = image::RgbImage::new(3, 2);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let v = (x * 40 + y * 100) as u8;
        *px = image::Rgb([v, v, v]);
    }
    img.save(&path).unwrap();

    let gray = load_intensity_image(&path).unwrap();
    assert_eq!(gray.width(), 3);
    assert_eq!(gray.height(), 2);
    assert_eq!(gray.as_view().get(2, 1), Some(180));
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_load_missing_file_is_decode_error() {
    let err = load_intensity_image(std::path::Path::new("/nonexistent/spot.png")).unwrap_err();
    assert!(matches!(err, ImageLoadError::Decode { .. }));
}
