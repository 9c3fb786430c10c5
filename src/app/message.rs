// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::gallery;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Gallery(gallery::Message),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `pt-BR`, `en-US`).
    pub lang: Option<String>,
    /// Variant id to select at startup instead of the first one.
    pub variant: Option<i64>,
    /// Launch viewport width; also decides the gallery layout.
    pub window_width: Option<f32>,
    /// Path of the embedded product document.
    pub data_path: Option<String>,
}
