// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! `App` wires together the product catalog, localization, and the gallery
//! component, and resolves the startup variant. The layout mode is decided
//! here, once, from the launch width; the gallery never re-evaluates it.

mod message;
mod view;

pub use message::{Flags, Message};

use crate::catalog::ProductCatalog;
use crate::config::{self, Config};
use crate::gallery::{self, layout::LayoutMode, UpdatePayload};
use crate::i18n::I18n;
use crate::ui::theming::ThemeMode;
use iced::{keyboard, window, Element, Subscription, Task, Theme};
use std::path::Path;

pub const WINDOW_DEFAULT_WIDTH: f32 = 800.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 650.0;

/// Product document read when no path is given on the command line.
pub const DEFAULT_DATA_FILE: &str = "product.json";

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    catalog: ProductCatalog,
    gallery: gallery::State,
    theme_mode: ThemeMode,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("variants", &self.catalog.variants.len())
            .field("current_variant", &self.gallery.current_variant_id())
            .finish()
    }
}

/// Builds the window settings for the launch width.
fn window_settings(width: f32) -> window::Settings {
    window::Settings {
        size: iced::Size::new(width, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(320.0, 480.0)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    let window = window_settings(flags.window_width.unwrap_or(WINDOW_DEFAULT_WIDTH));

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window)
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state: configuration, localization, the
    /// product catalog, and the startup variant selection.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_else(|err| {
            tracing::warn!(%err, "failed to load settings, using defaults");
            Config::default()
        });
        let i18n = I18n::new(flags.lang.clone(), &config);

        let data_path = flags
            .data_path
            .clone()
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());
        let catalog = match ProductCatalog::load_from_path(Path::new(&data_path)) {
            Ok(catalog) => {
                tracing::info!(
                    variants = catalog.variants.len(),
                    media = catalog.media.len(),
                    "product document loaded"
                );
                catalog
            }
            Err(err) => {
                tracing::error!("{err}");
                ProductCatalog::default()
            }
        };

        let width = flags.window_width.unwrap_or(WINDOW_DEFAULT_WIDTH);
        let layout = LayoutMode::from_width(width, config.breakpoint());
        let gallery = gallery::State::new(layout, width, &config);
        let theme_mode = config.theme_mode.unwrap_or_default();

        let mut app = App {
            i18n,
            catalog,
            gallery,
            theme_mode,
        };

        let task = match app.initial_variant(flags.variant) {
            Some(id) => app
                .gallery
                .update(
                    gallery::Message::VariantUpdate(UpdatePayload::for_variant(id)),
                    &app.catalog,
                    &app.i18n,
                )
                .map(Message::Gallery),
            None => Task::none(),
        };

        (app, task)
    }

    /// Startup variant: the requested id when it exists in the catalog,
    /// otherwise the first variant.
    fn initial_variant(&self, requested: Option<i64>) -> Option<i64> {
        if let Some(id) = requested {
            if self.catalog.find_variant(id).is_some() {
                return Some(id);
            }
            tracing::warn!(variant = id, "requested startup variant not in catalog");
        }
        self.catalog.variants.first().map(|v| v.id)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");

        let variant_title = self
            .gallery
            .current_variant_id()
            .and_then(|id| self.catalog.find_variant(id))
            .map(|v| v.title.clone())
            .filter(|t| !t.is_empty());

        match variant_title {
            Some(title) => format!("{title} - {app_name}"),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        keyboard::listen().filter_map(|event| match event {
            keyboard::Event::KeyPressed {
                key, modifiers, ..
            } => handle_key_press(key, modifiers),
            _ => None,
        })
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Gallery(message) => self
                .gallery
                .update(message, &self.catalog, &self.i18n)
                .map(Message::Gallery),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            catalog: &self.catalog,
            gallery: &self.gallery,
        })
    }
}

fn handle_key_press(key: keyboard::Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    match key {
        keyboard::Key::Named(keyboard::key::Named::ArrowRight) => {
            Some(Message::Gallery(gallery::Message::NextSlide))
        }
        keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => {
            Some(Message::Gallery(gallery::Message::PreviousSlide))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MediaId;
    use crate::gallery::slides::Slide;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use tempfile::tempdir;

    fn config_env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn with_temp_config_dir<F>(test: F)
    where
        F: FnOnce(&std::path::Path),
    {
        let _guard = config_env_lock().lock().expect("failed to lock mutex");
        let temp_dir = tempdir().expect("failed to create temp dir");
        let previous = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());

        test(temp_dir.path());

        if let Some(value) = previous {
            std::env::set_var("XDG_CONFIG_HOME", value);
        } else {
            std::env::remove_var("XDG_CONFIG_HOME");
        }
    }

    fn sample_document() -> &'static str {
        r#"{
            "variants": [
                { "id": 100, "title": "Small / Red", "featured_media_id": 10 },
                { "id": 101, "title": "Small / Blue" }
            ],
            "media": [
                { "id": 10, "media_type": "image", "src": "https://cdn.example/10.jpg" },
                { "id": 11, "media_type": "image", "src": "https://cdn.example/11.jpg" }
            ]
        }"#
    }

    fn write_document(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("product.json");
        fs::write(&path, sample_document()).expect("failed to write product document");
        path
    }

    fn flags_for(path: &std::path::Path) -> Flags {
        Flags {
            data_path: Some(path.to_string_lossy().into_owned()),
            ..Flags::default()
        }
    }

    fn prepared_slides(count: usize) -> Vec<Slide> {
        (0..count)
            .map(|i| Slide {
                id: MediaId::Number(i as i64),
                alt: format!("Image {}", i + 1),
                handle: None,
            })
            .collect()
    }

    #[test]
    fn new_without_document_starts_empty() {
        with_temp_config_dir(|config_root| {
            let missing = config_root.join("nope.json");
            let (app, _task) = App::new(flags_for(&missing));

            assert!(app.catalog.is_empty());
            assert_eq!(app.gallery.current_variant_id(), None);
            assert!(!app.gallery.is_updating());
        });
    }

    #[test]
    fn new_selects_first_variant_by_default() {
        with_temp_config_dir(|config_root| {
            let path = write_document(config_root);
            let (app, _task) = App::new(flags_for(&path));

            assert_eq!(app.gallery.current_variant_id(), Some(100));
            assert!(app.gallery.is_updating(), "deferred render is in flight");
        });
    }

    #[test]
    fn new_honors_requested_startup_variant() {
        with_temp_config_dir(|config_root| {
            let path = write_document(config_root);
            let mut flags = flags_for(&path);
            flags.variant = Some(101);
            let (app, _task) = App::new(flags);

            assert_eq!(app.gallery.current_variant_id(), Some(101));
        });
    }

    #[test]
    fn unknown_startup_variant_falls_back_to_first() {
        with_temp_config_dir(|config_root| {
            let path = write_document(config_root);
            let mut flags = flags_for(&path);
            flags.variant = Some(999);
            let (app, _task) = App::new(flags);

            assert_eq!(app.gallery.current_variant_id(), Some(100));
        });
    }

    #[test]
    fn malformed_document_leaves_catalog_empty() {
        with_temp_config_dir(|config_root| {
            let path = config_root.join("broken.json");
            fs::write(&path, "{ not json").expect("write");
            let (app, _task) = App::new(flags_for(&path));

            assert!(app.catalog.is_empty());
            assert_eq!(app.gallery.current_variant_id(), None);
        });
    }

    #[test]
    fn render_completion_releases_guard_and_mounts_slides() {
        with_temp_config_dir(|config_root| {
            let path = write_document(config_root);
            let (mut app, _task) = App::new(flags_for(&path));

            let _ = app.update(Message::Gallery(gallery::Message::SlidesPrepared {
                variant_id: 100,
                slides: prepared_slides(2),
            }));

            assert!(!app.gallery.is_updating());
            assert_eq!(app.gallery.slides().len(), 2);
            assert_eq!(app.gallery.current_slide_index(), 0);
        });
    }

    #[test]
    fn picker_change_routes_through_the_guard() {
        with_temp_config_dir(|config_root| {
            let path = write_document(config_root);
            let (mut app, _task) = App::new(flags_for(&path));
            let _ = app.update(Message::Gallery(gallery::Message::SlidesPrepared {
                variant_id: 100,
                slides: prepared_slides(2),
            }));

            let _ = app.update(Message::Gallery(gallery::Message::VariantPicked(
                gallery::VariantChoice {
                    id: 101,
                    title: "Small / Blue".to_string(),
                },
            )));

            assert_eq!(app.gallery.current_variant_id(), Some(101));
            assert!(app.gallery.is_updating());
        });
    }

    #[test]
    fn title_reflects_the_selected_variant() {
        with_temp_config_dir(|config_root| {
            let path = write_document(config_root);
            let (app, _task) = App::new(flags_for(&path));
            assert_eq!(app.title(), "Small / Red - Vitrine");
        });
    }

    #[test]
    fn title_falls_back_to_app_name() {
        with_temp_config_dir(|config_root| {
            let missing = config_root.join("nope.json");
            let (app, _task) = App::new(flags_for(&missing));
            assert_eq!(app.title(), "Vitrine");
        });
    }

    #[test]
    fn arrow_keys_map_to_slide_navigation() {
        let right = handle_key_press(
            keyboard::Key::Named(keyboard::key::Named::ArrowRight),
            keyboard::Modifiers::default(),
        );
        assert!(matches!(
            right,
            Some(Message::Gallery(gallery::Message::NextSlide))
        ));

        let other = handle_key_press(
            keyboard::Key::Named(keyboard::key::Named::Enter),
            keyboard::Modifiers::default(),
        );
        assert!(other.is_none());
    }

    #[test]
    fn narrow_launch_width_resolves_compact_layout() {
        with_temp_config_dir(|config_root| {
            let path = write_document(config_root);
            let mut flags = flags_for(&path);
            flags.window_width = Some(390.0);
            let (app, _task) = App::new(flags);

            assert_eq!(app.gallery.layout(), LayoutMode::Compact);
        });
    }

    #[test]
    fn wide_launch_width_resolves_wide_layout() {
        with_temp_config_dir(|config_root| {
            let path = write_document(config_root);
            let (app, _task) = App::new(flags_for(&path));
            assert_eq!(app.gallery.layout(), LayoutMode::Wide);
        });
    }
}
