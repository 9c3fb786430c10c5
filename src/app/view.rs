// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::Message;
use crate::catalog::ProductCatalog;
use crate::gallery::{self, VariantChoice};
use crate::i18n::I18n;
use crate::ui::design_tokens::spacing;
use iced::widget::{pick_list, Column, Container};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub catalog: &'a ProductCatalog,
    pub gallery: &'a gallery::State,
}

/// Renders the variant picker above the gallery.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let mut content = Column::new().spacing(spacing::MD);

    if !ctx.catalog.variants.is_empty() {
        content = content.push(variant_picker(ctx.catalog, ctx.gallery, ctx.i18n));
    }

    let gallery_view = gallery::view::view(
        ctx.gallery,
        gallery::view::ViewEnv { i18n: ctx.i18n },
    )
    .map(Message::Gallery);
    content = content.push(gallery_view);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::MD)
        .into()
}

fn variant_picker<'a>(
    catalog: &'a ProductCatalog,
    gallery: &'a gallery::State,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    let choices: Vec<VariantChoice> = catalog
        .variants
        .iter()
        .map(|v| VariantChoice {
            id: v.id,
            title: v.title.clone(),
        })
        .collect();

    let selected = gallery
        .current_variant_id()
        .and_then(|id| choices.iter().find(|c| c.id == id).cloned());

    pick_list(choices, selected, |choice| {
        Message::Gallery(gallery::Message::VariantPicked(choice))
    })
    .placeholder(i18n.tr("picker-placeholder"))
    .into()
}
