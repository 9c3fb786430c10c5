// SPDX-License-Identifier: MPL-2.0
//! Product catalog types and loading.
//!
//! The catalog is a single JSON document embedded with the product page:
//! `{ "variants": [...], "media": [...] }`. It is parsed once at startup
//! and immutable afterwards. A malformed document is logged and treated as
//! an empty catalog; the gallery then shows its explicit empty state
//! instead of failing.

pub mod selection;

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Identifier of a media item. Catalog entries carry numeric ids; entries
/// synthesized from variant custom images carry string ids of the form
/// `custom-<variantId>-<index>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum MediaId {
    Number(i64),
    Text(String),
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaId::Number(n) => write!(f, "{}", n),
            MediaId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for MediaId {
    fn from(n: i64) -> Self {
        MediaId::Number(n)
    }
}

/// A purchasable configuration of the product.
#[derive(Debug, Clone, Deserialize)]
pub struct Variant {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub featured_media_id: Option<i64>,
    /// Variant-specific images supplied outside the shared media catalog.
    #[serde(default, rename = "customImages")]
    pub custom_images: Vec<CustomImage>,
}

/// A variant-specific image from a metafield.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomImage {
    pub src: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub alt: Option<String>,
}

impl CustomImage {
    /// Width-to-height ratio, falling back to 1 when either dimension is
    /// missing or zero.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Preview data attached to a media item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewImage {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<f32>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// An entry of the shared product media catalog.
///
/// `media_type` passes through opaquely; only source resolvability matters
/// to the renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaItem {
    pub id: MediaId,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub preview_image: Option<PreviewImage>,
    #[serde(default)]
    pub alt: Option<String>,
}

impl MediaItem {
    /// Resolvable image source: `src` first, then the preview source.
    /// Empty strings do not resolve.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        non_empty(self.src.as_deref())
            .or_else(|| non_empty(self.preview_image.as_ref().and_then(|p| p.src.as_deref())))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// The embedded product document: variants plus the shared media catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductCatalog {
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub media: Vec<MediaItem>,
}

impl ProductCatalog {
    /// Parses the embedded JSON document.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let catalog: ProductCatalog = serde_json::from_str(data.trim())?;
        Ok(catalog)
    }

    /// Reads and parses the document from disk.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    #[must_use]
    pub fn find_variant(&self, id: i64) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    #[must_use]
    pub fn find_media(&self, id: i64) -> Option<&MediaItem> {
        self.media.iter().find(|m| m.id == MediaId::Number(id))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty() && self.media.is_empty()
    }
}
