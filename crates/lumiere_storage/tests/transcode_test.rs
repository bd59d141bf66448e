//! JPEG re-encoding of inline media.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use lumiere_core::{MediaAsset, MediaSet};
use lumiere_storage::MediaTranscoder;
use std::io::Cursor;

fn png(pixel: Rgba<u8>) -> MediaAsset {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, pixel));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    MediaAsset::inline("image/png", bytes)
}

#[test]
fn test_transparency_is_flattened_onto_white() {
    let transcoder = MediaTranscoder::new(80);

    let converted = transcoder.try_to_jpeg(&png(Rgba([200, 0, 0, 0]))).unwrap();

    let MediaAsset::Inline { mime, data } = converted else {
        panic!("expected inline media");
    };
    assert_eq!(mime, "image/jpeg");
    assert_eq!(&data[..2], &[0xFF, 0xD8]);

    let decoded = image::load_from_memory(&data).unwrap().to_rgb8();
    let pixel = decoded.get_pixel(4, 4);
    assert!(pixel.0.iter().all(|channel| *channel > 240), "got {pixel:?}");
}

#[test]
fn test_urls_and_garbage_pass_through() {
    let transcoder = MediaTranscoder::default();
    let url = MediaAsset::Url("https://cdn.example.com/a.jpg".to_string());
    let garbage = MediaAsset::inline("image/png", vec![1, 2, 3]);

    assert_eq!(transcoder.to_jpeg(&url), url);
    assert_eq!(transcoder.to_jpeg(&garbage), garbage);
    assert!(transcoder.try_to_jpeg(&garbage).is_err());
}

#[test]
fn test_transcode_all_keeps_order_and_length() {
    let transcoder = MediaTranscoder::new(60);
    let url = MediaAsset::Url("https://cdn.example.com/b.jpg".to_string());
    let mut media = MediaSet::with_cover(png(Rgba([0, 0, 255, 255])));
    media.gallery.push(url.clone());
    media.gallery.push(png(Rgba([0, 255, 0, 255])));

    let converted = transcoder.transcode_all(&media);

    assert_eq!(converted.len(), 3);
    assert!(matches!(&converted.cover, MediaAsset::Inline { mime, .. } if mime == "image/jpeg"));
    assert_eq!(converted.gallery[0], url);
}

#[test]
fn test_quality_is_clamped() {
    assert_eq!(MediaTranscoder::new(0).quality(), 1);
    assert_eq!(MediaTranscoder::new(255).quality(), 100);
}
