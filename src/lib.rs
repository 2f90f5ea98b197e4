//! Keyboard shortcuts and OS media-session integration for browser media elements.
//!
//! The controllers in [`components::media_controls`] are written against the
//! capability traits in [`components::media_controls::host`], so the same logic
//! runs against the browser bindings in [`web`] and against in-memory fakes in
//! tests.

pub mod components;
pub mod error;
pub mod settings;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use components::media_controls::{
    AudioController, Capabilities, MediaElement, MediaEvent, MediaSessionHost, PlaybackStatus,
    VideoController,
};
pub use error::ControlError;
pub use settings::PlayerSettings;
