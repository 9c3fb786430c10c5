// SPDX-License-Identifier: MPL-2.0
//! Variant media gallery component.
//!
//! Owns the carousel state for the selected variant: which slides are
//! mounted, which one is active, and whether a re-render is in flight.
//! Variant-change messages pass through the update guard in
//! [`controller`]; accepted requests clear the track and repopulate it in
//! a deferred task so old and new content never mix in one frame.

pub mod controller;
pub mod layout;
pub mod slides;
pub mod view;

use crate::catalog::{selection, ProductCatalog};
use crate::config::Config;
use crate::i18n::I18n;
use iced::widget::operation;
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::Task;
use layout::LayoutMode;
use slides::Slide;
use std::time::Duration;

/// Payload of an externally dispatched variant-change notification,
/// mirroring `{ "variant": { "id": ... } }`. Both levels are optional so a
/// malformed notification can be recognized and ignored.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UpdatePayload {
    pub variant: Option<VariantRef>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct VariantRef {
    pub id: Option<i64>,
}

impl UpdatePayload {
    /// Convenience constructor for a well-formed notification.
    #[must_use]
    pub fn for_variant(id: i64) -> Self {
        Self {
            variant: Some(VariantRef { id: Some(id) }),
        }
    }

    fn variant_id(&self) -> Option<i64> {
        self.variant.as_ref().and_then(|v| v.id)
    }
}

/// A variant entry offered by the picker control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantChoice {
    pub id: i64,
    pub title: String,
}

impl std::fmt::Display for VariantChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    /// External variant-change notification.
    VariantUpdate(UpdatePayload),
    /// The variant picker control changed.
    VariantPicked(VariantChoice),
    /// The deferred render task finished building the new slides.
    SlidesPrepared { variant_id: i64, slides: Vec<Slide> },
    /// A thumbnail was pressed (wide layout).
    ThumbnailPressed(usize),
    /// A dot indicator was pressed (compact layout).
    DotPressed(usize),
    /// Keyboard navigation one slide forward.
    NextSlide,
    /// Keyboard navigation one slide back.
    PreviousSlide,
    /// The carousel track reported scroll activity (compact layout).
    CarouselScrolled(scrollable::Viewport),
    /// The scroll debounce elapsed for the given generation.
    ScrollSettled(u64),
}

/// Gallery component state.
#[derive(Debug, Clone)]
pub struct State {
    controller: controller::State,
    layout: LayoutMode,
    slides: Vec<Slide>,
    current_slide_index: usize,
    /// Width of the carousel track; one slide spans exactly one track.
    track_width: f32,
    scroll_offset: f32,
    /// Bumped on every scroll event; a settle only counts if no newer
    /// scroll arrived during the debounce.
    scroll_generation: u64,
    max_items: usize,
    scroll_debounce: Duration,
}

impl State {
    #[must_use]
    pub fn new(layout: LayoutMode, track_width: f32, config: &Config) -> Self {
        Self {
            controller: controller::State::default(),
            layout,
            slides: Vec::new(),
            current_slide_index: 0,
            track_width,
            scroll_offset: 0.0,
            scroll_generation: 0,
            max_items: config.max_items(),
            scroll_debounce: Duration::from_millis(config.scroll_debounce_ms()),
        }
    }

    #[must_use]
    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[must_use]
    pub fn current_slide_index(&self) -> usize {
        self.current_slide_index
    }

    #[must_use]
    pub fn current_variant_id(&self) -> Option<i64> {
        self.controller.current_variant_id()
    }

    #[must_use]
    pub fn is_updating(&self) -> bool {
        self.controller.is_updating()
    }

    /// Dot indicators only exist in the compact layout and are suppressed
    /// entirely for a single slide.
    #[must_use]
    pub fn shows_dots(&self) -> bool {
        self.layout.is_compact() && self.slides.len() > 1
    }

    pub fn update(
        &mut self,
        message: Message,
        catalog: &ProductCatalog,
        i18n: &I18n,
    ) -> Task<Message> {
        match message {
            Message::VariantUpdate(payload) => {
                let Some(id) = payload.variant_id() else {
                    tracing::warn!("variant update notification without an id, ignoring");
                    return Task::none();
                };
                self.request_variant(id, catalog, i18n)
            }
            Message::VariantPicked(choice) => self.request_variant(choice.id, catalog, i18n),
            Message::SlidesPrepared { variant_id, slides } => {
                self.finish_render(variant_id, slides)
            }
            Message::ThumbnailPressed(index) | Message::DotPressed(index) => {
                self.go_to_slide(index)
            }
            Message::NextSlide => self.go_to_slide(self.current_slide_index.saturating_add(1)),
            Message::PreviousSlide => {
                let Some(index) = self.current_slide_index.checked_sub(1) else {
                    return Task::none();
                };
                self.go_to_slide(index)
            }
            Message::CarouselScrolled(viewport) => {
                let bounds = viewport.bounds();
                self.on_carousel_scrolled(viewport.absolute_offset().x, bounds.width)
            }
            Message::ScrollSettled(generation) => {
                if generation != self.scroll_generation {
                    return Task::none();
                }
                self.sync_slide_from_scroll();
                Task::none()
            }
        }
    }

    /// Runs a variant-change request through the update guard and, on
    /// acceptance, kicks off the deferred render.
    fn request_variant(
        &mut self,
        id: i64,
        catalog: &ProductCatalog,
        i18n: &I18n,
    ) -> Task<Message> {
        match self.controller.request(id, catalog) {
            controller::Request::Busy => {
                tracing::warn!(variant = id, "update already in flight, dropping request");
                Task::none()
            }
            controller::Request::AlreadyCurrent => {
                tracing::debug!(variant = id, "variant already shown, nothing to do");
                Task::none()
            }
            controller::Request::NotFound => {
                tracing::error!("{}", crate::error::Error::VariantNotFound(id));
                Task::none()
            }
            controller::Request::Accepted { variant } => {
                self.current_slide_index = 0;
                let items = selection::select(variant, &catalog.media, self.max_items);
                tracing::info!(
                    variant = id,
                    items = items.len(),
                    "variant accepted, rebuilding gallery"
                );

                if items.is_empty() {
                    // Nothing to defer: mount the explicit empty state and
                    // release the guard right away.
                    self.slides.clear();
                    self.controller.render_complete();
                    return Task::none();
                }

                // Clear now; repopulation happens in the deferred task so
                // stale slides are never on screen next to new ones.
                self.slides.clear();
                let specs = slides::specs_from_items(&items, i18n);
                Task::perform(async move { slides::prepare(specs) }, move |slides| {
                    Message::SlidesPrepared {
                        variant_id: id,
                        slides,
                    }
                })
            }
        }
    }

    fn finish_render(&mut self, variant_id: i64, slides: Vec<Slide>) -> Task<Message> {
        if self.controller.current_variant_id() != Some(variant_id) {
            tracing::warn!(variant = variant_id, "discarding render for a stale variant");
            return Task::none();
        }

        self.slides = slides;
        self.current_slide_index = 0;
        self.controller.render_complete();
        self.snap_to_current()
    }

    /// Activates the slide at `index`. Wide layout flips the active
    /// slide/thumbnail pair; compact layout scrolls the track to
    /// `index × track width` and the active dot follows the index.
    fn go_to_slide(&mut self, index: usize) -> Task<Message> {
        if index >= self.slides.len() {
            tracing::warn!(index, slides = self.slides.len(), "slide index out of range");
            return Task::none();
        }

        self.current_slide_index = index;
        self.snap_to_current()
    }

    fn snap_to_current(&self) -> Task<Message> {
        match self.layout {
            LayoutMode::Wide => Task::none(),
            LayoutMode::Compact => operation::scroll_to(
                view::carousel_id(),
                AbsoluteOffset {
                    x: self.current_slide_index as f32 * self.track_width,
                    y: 0.0,
                },
            ),
        }
    }

    fn on_carousel_scrolled(&mut self, offset_x: f32, track_width: f32) -> Task<Message> {
        if !self.layout.is_compact() {
            return Task::none();
        }

        self.scroll_offset = offset_x;
        if track_width > 0.0 {
            self.track_width = track_width;
        }
        self.scroll_generation = self.scroll_generation.wrapping_add(1);

        let generation = self.scroll_generation;
        let debounce = self.scroll_debounce;
        Task::perform(
            async move { tokio::time::sleep(debounce).await },
            move |()| Message::ScrollSettled(generation),
        )
    }

    /// Computes the nearest slide from the settled scroll offset and
    /// adopts it when it differs from the tracked index, keeping the dots
    /// consistent with swipe navigation that bypasses the buttons.
    fn sync_slide_from_scroll(&mut self) {
        if self.track_width <= 0.0 || self.slides.is_empty() {
            return;
        }

        let nearest = (self.scroll_offset / self.track_width).round().max(0.0) as usize;
        let nearest = nearest.min(self.slides.len() - 1);
        if nearest != self.current_slide_index {
            self.current_slide_index = nearest;
        }
    }
}
