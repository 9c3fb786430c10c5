// SPDX-License-Identifier: MPL-2.0
//! Gallery rendering.
//!
//! Wide layout: a thumbnail rail next to the single active slide, the
//! active pair highlighted exclusively. Compact layout: a horizontally
//! scrollable slide track with dot indicators underneath. When no slides
//! are mounted, an explicit placeholder communicates the absence of media
//! instead of leaving a blank gallery.

use super::layout::{sizing, LayoutMode};
use super::slides::Slide;
use super::{Message, State};
use crate::i18n::I18n;
use crate::ui::design_tokens::{palette, spacing, typography};
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{button, image, scrollable, Column, Container, Id, Row, Text};
use iced::{alignment, Border, Element, Length};

const CAROUSEL_ID: &str = "variant-carousel";

/// Identifier of the carousel track, used to drive programmatic scrolling.
pub fn carousel_id() -> Id {
    Id::new(CAROUSEL_ID)
}

/// Context required to render the gallery.
pub struct ViewEnv<'a> {
    pub i18n: &'a I18n,
}

pub fn view<'a>(state: &'a State, env: ViewEnv<'a>) -> Element<'a, Message> {
    if state.slides().is_empty() {
        return empty_state(env.i18n);
    }

    match state.layout() {
        LayoutMode::Wide => wide_gallery(state),
        LayoutMode::Compact => compact_gallery(state),
    }
}

/// Placeholder shown when the selected variant has nothing to display.
fn empty_state<'a>(i18n: &I18n) -> Element<'a, Message> {
    let title = Text::new(i18n.tr("empty-state-title"))
        .size(typography::TITLE)
        .color(palette::GRAY_400);
    let hint = Text::new(i18n.tr("empty-state-hint"))
        .size(typography::CAPTION)
        .color(palette::GRAY_400);

    let content = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .push(title)
        .push(hint);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::SLIDE_HEIGHT))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(|_theme: &iced::Theme| iced::widget::container::Style {
            background: Some(palette::GRAY_100.into()),
            ..Default::default()
        })
        .into()
}

fn wide_gallery(state: &State) -> Element<'_, Message> {
    let active = state.current_slide_index();

    let mut rail = Column::new().spacing(spacing::SM);
    for (index, slide) in state.slides().iter().enumerate() {
        rail = rail.push(thumbnail(slide, index, index == active));
    }

    let current = state
        .slides()
        .get(active)
        .unwrap_or_else(|| &state.slides()[0]);

    Row::new()
        .spacing(spacing::MD)
        .push(scrollable(rail).height(Length::Fixed(sizing::SLIDE_HEIGHT)))
        .push(slide_frame(current, Length::Fill))
        .width(Length::Fill)
        .into()
}

fn compact_gallery(state: &State) -> Element<'_, Message> {
    let track_width = state.track_width;

    let mut track = Row::new();
    for slide in state.slides() {
        track = track.push(slide_frame(slide, Length::Fixed(track_width)));
    }

    let carousel = scrollable(track)
        .id(carousel_id())
        .direction(Direction::Horizontal(Scrollbar::hidden()))
        .on_scroll(Message::CarouselScrolled)
        .width(Length::Fill);

    let mut content = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .push(carousel);

    if state.shows_dots() {
        let mut dots = Row::new().spacing(spacing::SM);
        for index in 0..state.slides().len() {
            dots = dots.push(dot(index, index == state.current_slide_index()));
        }
        content = content.push(dots);
    }

    content.width(Length::Fill).into()
}

/// One slide of the track. A slide without an image handle renders its
/// alt text inside an empty frame instead of failing the whole pass.
fn slide_frame(slide: &Slide, width: Length) -> Element<'_, Message> {
    let content: Element<'_, Message> = match &slide.handle {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => Text::new(slide.alt.as_str())
            .size(typography::BODY)
            .color(palette::GRAY_400)
            .into(),
    };

    Container::new(content)
        .width(width)
        .height(Length::Fixed(sizing::SLIDE_HEIGHT))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

fn thumbnail(slide: &Slide, index: usize, active: bool) -> Element<'_, Message> {
    let content: Element<'_, Message> = match &slide.handle {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => Text::new("·").color(palette::GRAY_400).into(),
    };

    button(
        Container::new(content)
            .width(Length::Fixed(sizing::THUMBNAIL))
            .height(Length::Fixed(sizing::THUMBNAIL))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center),
    )
    .padding(0)
    .style(move |theme: &iced::Theme, _status| {
        let pal = theme.extended_palette();
        button::Style {
            background: None,
            border: Border {
                color: if active {
                    pal.primary.strong.color
                } else {
                    palette::GRAY_200
                },
                width: if active { 2.0 } else { 1.0 },
                radius: 2.0.into(),
            },
            ..button::Style::default()
        }
    })
    .on_press(Message::ThumbnailPressed(index))
    .into()
}

fn dot<'a>(index: usize, active: bool) -> Element<'a, Message> {
    button(Text::new(""))
        .width(Length::Fixed(sizing::DOT))
        .height(Length::Fixed(sizing::DOT))
        .padding(0)
        .style(move |theme: &iced::Theme, _status| {
            let pal = theme.extended_palette();
            button::Style {
                background: Some(if active {
                    pal.primary.strong.color.into()
                } else {
                    palette::GRAY_200.into()
                }),
                border: Border {
                    radius: (sizing::DOT / 2.0).into(),
                    ..Border::default()
                },
                ..button::Style::default()
            }
        })
        .on_press(Message::DotPressed(index))
        .into()
}
