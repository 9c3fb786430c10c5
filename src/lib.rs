// SPDX-License-Identifier: MPL-2.0
//! `vitrine` is a product media gallery built with the Iced GUI framework.
//!
//! It renders the media of a purchasable product variant as a slide
//! carousel, with a thumbnail rail in wide layouts or dot indicators in
//! compact layouts, and keeps the gallery synchronized with the selected
//! variant through a guarded update loop.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod ui;
