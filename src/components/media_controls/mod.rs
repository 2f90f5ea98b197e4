//! Media controls - keyboard shortcuts and media-session bridging for one
//! page-owned media element. Host side effects go through the traits in
//! [`host`]; everything here runs on the UI thread.

pub mod audio_controller;
pub mod host;
pub mod overlay;
pub mod playback;
pub mod session;
pub mod shortcuts;
pub mod video_controller;

pub use audio_controller::AudioController;
pub use host::{
    Capabilities, Completion, FullscreenHost, MediaElement, MediaSessionHost, OverlaySurface,
    PictureInPictureHost, Scheduler, VideoSurface,
};
pub use overlay::TransientOverlay;
pub use playback::{MediaEvent, PlaybackRateTable, PlaybackStatus, RateStep};
pub use session::{ActionDetails, SessionAction, SessionMetadata, SessionPlaybackState};
pub use shortcuts::{KeyInput, Shortcut, ShortcutProfile};
pub use video_controller::{VideoController, VideoOverlays};
