// SPDX-License-Identifier: MPL-2.0
//! Slide preparation for the carousel track.
//!
//! Preparation runs in a deferred task between clearing the previous
//! variant's slides and rendering the new ones. The first slide's image is
//! decoded eagerly there so the initial paint is fast; later slides keep a
//! path-based handle that the image widget loads lazily on first draw.

use crate::catalog::selection::DisplayItem;
use crate::catalog::MediaId;
use crate::i18n::I18n;
use fluent_bundle::FluentArgs;
use iced::widget::image;
use std::path::Path;

/// A slide ready for rendering. A slide without a handle had no resolvable
/// source and renders as an empty frame showing its alt text.
#[derive(Debug, Clone)]
pub struct Slide {
    pub id: MediaId,
    pub alt: String,
    pub handle: Option<image::Handle>,
}

/// Everything a slide needs, resolved before the deferred task runs.
///
/// Alt text is resolved here because localization state stays on the UI
/// side; the task only touches plain data.
#[derive(Debug, Clone)]
pub struct SlideSpec {
    pub id: MediaId,
    pub source: Option<String>,
    pub alt: String,
}

/// Resolves display items into slide specs, applying the positional alt
/// fallback and logging items without a resolvable source.
#[must_use]
pub fn specs_from_items(items: &[DisplayItem], i18n: &I18n) -> Vec<SlideSpec> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let source = item.source().map(str::to_owned);
            if source.is_none() {
                tracing::warn!(id = %item.id, "no resolvable source for slide {}", index);
            }
            let alt = item
                .alt
                .clone()
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| {
                    let mut args = FluentArgs::new();
                    args.set("position", index + 1);
                    i18n.tr_args("slide-alt-fallback", &args)
                });
            SlideSpec {
                id: item.id.clone(),
                source,
                alt,
            }
        })
        .collect()
}

/// Builds the slides for one render pass. Decodes the first slide's image
/// eagerly; later slides load lazily from their path.
#[must_use]
pub fn prepare(specs: Vec<SlideSpec>) -> Vec<Slide> {
    specs
        .into_iter()
        .enumerate()
        .map(|(index, spec)| {
            let handle = spec.source.as_deref().map(|source| {
                if index == 0 {
                    decode_eagerly(source)
                } else {
                    image::Handle::from_path(source)
                }
            });
            Slide {
                id: spec.id,
                alt: spec.alt,
                handle,
            }
        })
        .collect()
}

/// Decodes an image file into a pixel handle so the first slide paints
/// without a lazy-load round trip. Falls back to the lazy path handle when
/// decoding is not possible (remote URL, unreadable file).
fn decode_eagerly(source: &str) -> image::Handle {
    let path = Path::new(source);
    match image_rs::open(path) {
        Ok(decoded) => {
            let rgba = decoded.to_rgba8();
            let (width, height) = rgba.dimensions();
            image::Handle::from_rgba(width, height, rgba.into_raw())
        }
        Err(err) => {
            tracing::debug!(%source, %err, "eager decode unavailable, deferring to lazy load");
            image::Handle::from_path(source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::selection::{DisplayItem, MediaOrigin};
    use crate::config::Config;

    /// Locale pinned so assertions do not depend on the host OS.
    fn english() -> I18n {
        I18n::new(Some("en-US".to_string()), &Config::default())
    }

    fn item(id: i64, src: Option<&str>, alt: Option<&str>) -> DisplayItem {
        DisplayItem {
            id: MediaId::Number(id),
            media_type: "image".to_string(),
            src: src.map(str::to_owned),
            preview_image: None,
            alt: alt.map(str::to_owned),
            origin: MediaOrigin::Product,
        }
    }

    #[test]
    fn specs_keep_existing_alt_text() {
        let i18n = english();
        let specs = specs_from_items(&[item(1, Some("a.png"), Some("Front"))], &i18n);
        assert_eq!(specs[0].alt, "Front");
    }

    #[test]
    fn specs_fall_back_to_positional_alt() {
        let i18n = english();
        let specs = specs_from_items(
            &[item(1, Some("a.png"), None), item(2, Some("b.png"), Some(""))],
            &i18n,
        );
        assert_eq!(specs[0].alt, "Image 1");
        assert_eq!(specs[1].alt, "Image 2");
    }

    #[test]
    fn missing_source_produces_slide_without_handle() {
        let i18n = english();
        let specs = specs_from_items(&[item(1, None, None)], &i18n);
        let slides = prepare(specs);
        assert_eq!(slides.len(), 1);
        assert!(slides[0].handle.is_none());
        assert_eq!(slides[0].alt, "Image 1");
    }

    #[test]
    fn unreadable_first_source_still_yields_a_handle() {
        let i18n = english();
        let specs = specs_from_items(
            &[
                item(1, Some("https://cdn.example/missing.jpg"), None),
                item(2, Some("also-missing.jpg"), None),
            ],
            &i18n,
        );
        let slides = prepare(specs);
        assert!(slides[0].handle.is_some());
        assert!(slides[1].handle.is_some());
    }

    #[test]
    fn eager_decode_reads_first_slide_pixels() {
        use image_rs::{Rgba, RgbaImage};

        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("first.png");
        RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]))
            .save(&path)
            .expect("write png");

        let i18n = english();
        let specs = specs_from_items(
            &[item(1, Some(path.to_str().expect("utf-8 path")), None)],
            &i18n,
        );
        let slides = prepare(specs);
        match slides[0].handle.as_ref().expect("handle") {
            image::Handle::Rgba { width, height, .. } => {
                assert_eq!((*width, *height), (2, 2));
            }
            other => panic!("expected eagerly decoded pixels, got {other:?}"),
        }
    }
}
