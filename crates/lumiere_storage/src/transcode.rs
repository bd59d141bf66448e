//! JPEG re-encoding of inline media before upload.

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use lumiere_core::{MediaAsset, MediaSet};
use lumiere_error::{StorageError, StorageErrorKind};

/// Re-encodes inline images as JPEG to shrink upload payloads.
///
/// Transparency is flattened onto white. URLs pass through untouched, and so
/// does inline data that cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaTranscoder {
    quality: u8,
}

impl Default for MediaTranscoder {
    fn default() -> Self {
        Self { quality: 80 }
    }
}

impl MediaTranscoder {
    /// Transcoder at the given JPEG quality, clamped to 1..=100.
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// JPEG quality in use.
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Re-encode `asset` as JPEG, or return it unchanged if that fails.
    pub fn to_jpeg(&self, asset: &MediaAsset) -> MediaAsset {
        match self.try_to_jpeg(asset) {
            Ok(converted) => converted,
            Err(e) => {
                tracing::debug!(error = %e.kind, "Keeping original media");
                asset.clone()
            }
        }
    }

    /// Re-encode every asset in order, cover first.
    pub fn transcode_all(&self, media: &MediaSet) -> MediaSet {
        let mut converted = MediaSet::with_cover(self.to_jpeg(&media.cover));
        for asset in &media.gallery {
            converted.gallery.push(self.to_jpeg(asset));
        }
        converted
    }

    /// Re-encode `asset` as JPEG.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::Transcode`] for URLs and undecodable data.
    pub fn try_to_jpeg(&self, asset: &MediaAsset) -> Result<MediaAsset, StorageError> {
        let MediaAsset::Inline { data, .. } = asset else {
            return Err(StorageError::new(StorageErrorKind::Transcode(
                "only inline media can be transcoded".to_string(),
            )));
        };

        let decoded = image::load_from_memory(data)
            .map_err(|e| StorageError::new(StorageErrorKind::Transcode(e.to_string())))?
            .to_rgba8();

        let (width, height) = decoded.dimensions();
        let flattened = RgbImage::from_fn(width, height, |x, y| {
            let [r, g, b, a] = decoded.get_pixel(x, y).0;
            let blend = |channel: u8| -> u8 {
                let alpha = u16::from(a);
                ((u16::from(channel) * alpha + 255 * (255 - alpha)) / 255) as u8
            };
            Rgb([blend(r), blend(g), blend(b)])
        });

        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, self.quality)
            .encode_image(&flattened)
            .map_err(|e| StorageError::new(StorageErrorKind::Transcode(e.to_string())))?;

        tracing::debug!(
            before = data.len(),
            after = out.len(),
            quality = self.quality,
            "Transcoded media to JPEG"
        );
        Ok(MediaAsset::inline("image/jpeg", out))
    }
}
