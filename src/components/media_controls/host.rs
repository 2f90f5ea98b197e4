// Capability seams between the controllers and whatever hosts the media element.
use std::time::Duration;

use crate::error::ControlError;

use super::session::{ActionDetails, PositionState, SessionAction, SessionMetadata, SessionPlaybackState};

/// Continuation for an asynchronous host request (fullscreen, picture-in-picture).
pub type Completion = Box<dyn FnOnce(Result<(), ControlError>)>;

/// Callback the session invokes when the OS delivers a media action.
pub type ActionHandler = Box<dyn Fn(ActionDetails)>;

/// Which optional host features were present when the page loaded.
///
/// Probed once and cached for the controller's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub media_session: bool,
    pub position_state: bool,
    pub fullscreen: bool,
    pub picture_in_picture: bool,
}

impl Capabilities {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            media_session: true,
            position_state: true,
            fullscreen: true,
            picture_in_picture: true,
        }
    }
}

/// The playable element the page owns. Setters take `&self` because the host
/// object is shared with the page.
pub trait MediaElement {
    fn paused(&self) -> bool;
    fn play(&self) -> Result<(), ControlError>;
    fn pause(&self) -> Result<(), ControlError>;
    fn current_time(&self) -> f64;
    fn set_current_time(&self, secs: f64);
    /// Seconds, or NaN while unknown and infinity for live streams.
    fn duration(&self) -> f64;
    fn volume(&self) -> f64;
    fn set_volume(&self, volume: f64);
    fn muted(&self) -> bool;
    fn set_muted(&self, muted: bool);
    fn playback_rate(&self) -> f64;
    fn set_playback_rate(&self, rate: f64);
}

pub trait FullscreenHost {
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&self, done: Completion);
    fn exit_fullscreen(&self, done: Completion);
}

pub trait PictureInPictureHost {
    fn picture_in_picture_active(&self) -> bool;
    fn request_picture_in_picture(&self, done: Completion);
    fn exit_picture_in_picture(&self, done: Completion);
}

/// Everything the video controller needs from its element.
pub trait VideoSurface: MediaElement + FullscreenHost + PictureInPictureHost {}

impl<T: MediaElement + FullscreenHost + PictureInPictureHost> VideoSurface for T {}

/// OS media-session integration point.
pub trait MediaSessionHost {
    fn set_metadata(&self, metadata: &SessionMetadata) -> Result<(), ControlError>;
    fn set_action_handler(
        &self,
        action: SessionAction,
        handler: ActionHandler,
    ) -> Result<(), ControlError>;
    fn set_playback_state(&self, state: SessionPlaybackState) -> Result<(), ControlError>;
    fn set_position_state(&self, state: PositionState) -> Result<(), ControlError>;
}

/// A single on-screen text node that can be shown and hidden.
pub trait OverlaySurface {
    fn show(&self, text: &str);
    fn hide(&self);
}

/// Runs delayed one-shot tasks. Dropping the returned handle cancels the task
/// if it has not fired yet.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;
}
