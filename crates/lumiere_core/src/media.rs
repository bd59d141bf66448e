//! Media assets carried by a record.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single image, either inline binary data or a resolved remote URL.
///
/// Serializes as a string: inline data becomes a `data:` URI, URLs stay as they are.
/// That keeps stored records readable by anything that renders an `<img src>`.
///
/// # Examples
///
/// ```
/// use lumiere_core::MediaAsset;
///
/// let asset = MediaAsset::inline("image/png", vec![0x89, 0x50, 0x4E, 0x47]);
/// let src = asset.to_src();
/// assert!(src.starts_with("data:image/png;base64,"));
/// assert_eq!(MediaAsset::from_src(&src), asset);
///
/// let url = MediaAsset::from_src("https://cdn.example.com/a.jpg");
/// assert_eq!(url, MediaAsset::Url("https://cdn.example.com/a.jpg".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaAsset {
    /// Binary image data held in the record itself
    Inline {
        /// MIME type of the data
        mime: String,
        /// Raw image bytes
        data: Vec<u8>,
    },
    /// Image already hosted elsewhere
    Url(String),
}

impl MediaAsset {
    /// Build an inline asset.
    pub fn inline(mime: impl Into<String>, data: Vec<u8>) -> Self {
        MediaAsset::Inline {
            mime: mime.into(),
            data,
        }
    }

    /// Parse an `<img src>` style string.
    ///
    /// A `data:<mime>;base64,<payload>` string that decodes becomes `Inline`;
    /// anything else, including malformed data URIs, is kept verbatim as a `Url`.
    pub fn from_src(src: &str) -> Self {
        Self::parse_data_uri(src).unwrap_or_else(|| MediaAsset::Url(src.to_string()))
    }

    fn parse_data_uri(src: &str) -> Option<Self> {
        let rest = src.strip_prefix("data:")?;
        let (header, payload) = rest.split_once(',')?;
        let mime = header.strip_suffix(";base64")?;
        let data = STANDARD.decode(payload.trim()).ok()?;
        Some(MediaAsset::inline(mime, data))
    }

    /// Render as a string usable in `<img src>`.
    pub fn to_src(&self) -> String {
        match self {
            MediaAsset::Inline { mime, data } => {
                format!("data:{};base64,{}", mime, STANDARD.encode(data))
            }
            MediaAsset::Url(url) => url.clone(),
        }
    }

    /// Whether the bytes live in the record.
    pub fn is_inline(&self) -> bool {
        matches!(self, MediaAsset::Inline { .. })
    }

    /// Size of inline data in bytes, zero for URLs.
    pub fn inline_len(&self) -> usize {
        match self {
            MediaAsset::Inline { data, .. } => data.len(),
            MediaAsset::Url(_) => 0,
        }
    }
}

impl Serialize for MediaAsset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_src())
    }
}

impl<'de> Deserialize<'de> for MediaAsset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let src = String::deserialize(deserializer)?;
        Ok(MediaAsset::from_src(&src))
    }
}

/// The cover plus the ordered gallery.
///
/// A record always has a cover. The gallery is padded with cover copies by the
/// assembler, so `len()` never falls below the configured target + 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaSet {
    /// Designated cover asset
    pub cover: MediaAsset,
    /// Supplementary assets in display order
    #[serde(default)]
    pub gallery: Vec<MediaAsset>,
}

impl MediaSet {
    /// A media set holding only a cover.
    pub fn with_cover(cover: MediaAsset) -> Self {
        Self {
            cover,
            gallery: Vec::new(),
        }
    }

    /// Pad the gallery with cover copies until it holds `target` entries.
    ///
    /// Never truncates a longer gallery.
    pub fn pad_gallery(&mut self, target: usize) {
        while self.gallery.len() < target {
            self.gallery.push(self.cover.clone());
        }
    }

    /// Total asset count, cover included.
    pub fn len(&self) -> usize {
        1 + self.gallery.len()
    }

    /// Always false; a media set carries at least its cover.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Cover first, then the gallery.
    pub fn iter(&self) -> impl Iterator<Item = &MediaAsset> {
        std::iter::once(&self.cover).chain(self.gallery.iter())
    }

    /// Apply `f` to every asset, cover first, preserving order.
    pub fn try_map<E>(
        &self,
        mut f: impl FnMut(&MediaAsset) -> Result<MediaAsset, E>,
    ) -> Result<MediaSet, E> {
        let cover = f(&self.cover)?;
        let mut gallery = Vec::with_capacity(self.gallery.len());
        for asset in &self.gallery {
            gallery.push(f(asset)?);
        }
        Ok(MediaSet { cover, gallery })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_data_uri_stays_a_url() {
        let asset = MediaAsset::from_src("data:image/png;base64,@@@not-base64@@@");
        assert!(matches!(asset, MediaAsset::Url(_)));
    }

    #[test]
    fn pad_gallery_repeats_cover() {
        let cover = MediaAsset::Url("cover.jpg".to_string());
        let mut media = MediaSet::with_cover(cover.clone());
        media.gallery.push(MediaAsset::Url("one.jpg".to_string()));
        media.pad_gallery(4);
        assert_eq!(media.len(), 5);
        assert_eq!(&media.gallery[1..], &[cover.clone(), cover.clone(), cover][..]);
    }

    #[test]
    fn pad_gallery_never_truncates() {
        let mut media = MediaSet::with_cover(MediaAsset::Url("c".to_string()));
        media.gallery = vec![MediaAsset::Url("x".to_string()); 3];
        media.pad_gallery(2);
        assert_eq!(media.gallery.len(), 3);
    }
}
