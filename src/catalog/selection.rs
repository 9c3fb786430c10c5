// SPDX-License-Identifier: MPL-2.0
//! Per-variant media selection.
//!
//! [`select`] maps a variant plus the shared media catalog to the ordered,
//! deduplicated, capped list of items the gallery renders. Precedence:
//! the variant's featured media, then its custom images, then the rest of
//! the catalog in order. The function is pure; callers render the explicit
//! empty state when it returns nothing.

use super::{MediaId, MediaItem, PreviewImage, Variant};
use std::collections::HashSet;

/// Where a display item was sourced from. Diagnostics only; never shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaOrigin {
    /// The variant's designated featured media.
    VariantFeatured,
    /// A variant custom image from a metafield.
    Metafield,
    /// A remaining item of the shared product catalog.
    Product,
}

/// A media entry chosen for one gallery pass.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub id: MediaId,
    pub media_type: String,
    pub src: Option<String>,
    pub preview_image: Option<PreviewImage>,
    pub alt: Option<String>,
    pub origin: MediaOrigin,
}

impl DisplayItem {
    fn from_catalog(item: &MediaItem, origin: MediaOrigin) -> Self {
        Self {
            id: item.id.clone(),
            media_type: item.media_type.clone(),
            src: item.src.clone(),
            preview_image: item.preview_image.clone(),
            alt: item.alt.clone(),
            origin,
        }
    }

    /// Resolvable image source: `src` first, then the preview source.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.src
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| {
                self.preview_image
                    .as_ref()
                    .and_then(|p| p.src.as_deref())
                    .filter(|s| !s.is_empty())
            })
    }
}

/// Builds the ordered display list for a variant, capped at `max_items`.
///
/// 1. The featured media, when set and present in the catalog.
/// 2. The variant's custom images in their given order, up to the
///    remaining capacity. Each gets a synthetic id, an aspect ratio
///    derived from its dimensions, and an alt falling back to
///    `"<title> - <position>"`.
/// 3. Remaining catalog items not already used, in catalog order.
///
/// Media types are not filtered; unknown sources are the renderer's
/// problem.
#[must_use]
pub fn select(variant: &Variant, media: &[MediaItem], max_items: usize) -> Vec<DisplayItem> {
    let mut items = Vec::new();
    let mut used_ids: HashSet<&MediaId> = HashSet::new();

    // 1. Featured media
    if let Some(featured_id) = variant.featured_media_id {
        if items.len() < max_items {
            let featured_id = MediaId::Number(featured_id);
            if let Some(featured) = media.iter().find(|m| m.id == featured_id) {
                items.push(DisplayItem::from_catalog(
                    featured,
                    MediaOrigin::VariantFeatured,
                ));
                used_ids.insert(&featured.id);
            }
        }
    }

    // 2. Custom images from the variant metafield
    let remaining = max_items.saturating_sub(items.len());
    for (index, image) in variant.custom_images.iter().take(remaining).enumerate() {
        let alt = image
            .alt
            .clone()
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| format!("{} - {}", variant.title, index + 1));
        items.push(DisplayItem {
            id: MediaId::Text(format!("custom-{}-{}", variant.id, index)),
            media_type: "image".to_string(),
            src: Some(image.src.clone()),
            preview_image: Some(PreviewImage {
                src: Some(image.src.clone()),
                aspect_ratio: Some(image.aspect_ratio()),
                width: image.width,
                height: image.height,
            }),
            alt: Some(alt),
            origin: MediaOrigin::Metafield,
        });
    }

    // 3. Remaining catalog media, in catalog order
    for item in media {
        if items.len() >= max_items {
            break;
        }
        if !used_ids.contains(&item.id) {
            items.push(DisplayItem::from_catalog(item, MediaOrigin::Product));
        }
    }

    items
}
