// Media-session bridging: metadata, OS action dispatch, playback and position mirroring.
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::ControlError;
use crate::settings::PlayerSettings;

use super::host::{MediaElement, MediaSessionHost};
use super::playback::{self, MediaEvent};

/// One artwork entry for the OS media card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Static metadata published to the media session once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub artwork: Vec<Artwork>,
}

impl SessionMetadata {
    pub fn for_audio(title: Option<String>, settings: &PlayerSettings) -> Self {
        Self {
            title: title.unwrap_or_else(|| "Audio Track".to_string()),
            artist: settings.session_artist.clone(),
            album: settings.session_album.clone(),
            artwork: settings.audio_artwork.clone(),
        }
    }

    pub fn for_video(title: Option<String>, settings: &PlayerSettings) -> Self {
        Self {
            title: title.unwrap_or_else(|| "Video".to_string()),
            artist: settings.session_artist.clone(),
            album: settings.session_album.clone(),
            artwork: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionAction {
    Play,
    Pause,
    SeekBackward,
    SeekForward,
    SeekTo,
}

impl SessionAction {
    pub const ALL: [SessionAction; 5] = [
        SessionAction::Play,
        SessionAction::Pause,
        SessionAction::SeekBackward,
        SessionAction::SeekForward,
        SessionAction::SeekTo,
    ];

    /// Action name as the browser spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionAction::Play => "play",
            SessionAction::Pause => "pause",
            SessionAction::SeekBackward => "seekbackward",
            SessionAction::SeekForward => "seekforward",
            SessionAction::SeekTo => "seekto",
        }
    }
}

/// Optional payload delivered with an action.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActionDetails {
    pub seek_offset: Option<f64>,
    pub seek_time: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPlaybackState {
    None,
    Paused,
    Playing,
}

impl SessionPlaybackState {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionPlaybackState::None => "none",
            SessionPlaybackState::Paused => "paused",
            SessionPlaybackState::Playing => "playing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionState {
    pub duration: f64,
    pub playback_rate: f64,
    pub position: f64,
}

impl PositionState {
    /// Snapshot the element, or `None` while the duration is unknown since the
    /// session rejects a non-finite duration.
    pub fn capture<E: MediaElement + ?Sized>(element: &E) -> Option<Self> {
        let duration = element.duration();
        if !duration.is_finite() || duration < 0.0 {
            return None;
        }
        let rate = element.playback_rate();
        Some(Self {
            duration,
            playback_rate: if rate > 0.0 { rate } else { 1.0 },
            position: playback::clamp_position(element.current_time(), duration),
        })
    }
}

/// Apply an OS media action to the element.
pub fn apply_action<E: MediaElement + ?Sized>(
    element: &E,
    action: SessionAction,
    details: ActionDetails,
    default_offset: f64,
) {
    let offset = details
        .seek_offset
        .filter(|offset| offset.is_finite() && *offset > 0.0)
        .unwrap_or(default_offset);
    match action {
        SessionAction::Play => {
            if let Err(err) = element.play() {
                log::error!("Media Session play failed: {err}");
            } else {
                log::debug!("Media Session: Play");
            }
        }
        SessionAction::Pause => {
            if let Err(err) = element.pause() {
                log::error!("Media Session pause failed: {err}");
            } else {
                log::debug!("Media Session: Pause");
            }
        }
        SessionAction::SeekBackward => {
            playback::seek_by(element, -offset);
            log::debug!("Media Session: Seek backward {offset}s");
        }
        SessionAction::SeekForward => {
            playback::seek_by(element, offset);
            log::debug!("Media Session: Seek forward {offset}s");
        }
        SessionAction::SeekTo => match details.seek_time {
            Some(time) => {
                let landed = playback::seek_to(element, time);
                log::debug!("Media Session: Seek to {landed}s");
            }
            None => log::debug!("Media Session: seekto without a seek time ignored"),
        },
    }
}

/// Live link between a controller and the OS media session.
pub struct SessionBridge {
    session: Rc<dyn MediaSessionHost>,
    position_state: bool,
}

impl SessionBridge {
    /// Publish metadata and register every action handler. `dispatch` receives
    /// the actions; controllers pass a closure holding a weak handle to
    /// themselves.
    pub fn install<F>(
        session: Rc<dyn MediaSessionHost>,
        metadata: &SessionMetadata,
        position_state: bool,
        dispatch: F,
    ) -> Result<Self, ControlError>
    where
        F: Fn(SessionAction, ActionDetails) + Clone + 'static,
    {
        session.set_metadata(metadata)?;
        for action in SessionAction::ALL {
            let dispatch = dispatch.clone();
            session.set_action_handler(action, Box::new(move |details| dispatch(action, details)))?;
        }
        Ok(Self {
            session,
            position_state,
        })
    }

    /// Mirror an element event into the session.
    pub fn on_media_event<E: MediaElement + ?Sized>(&self, event: &MediaEvent, element: &E) {
        let state = match event {
            MediaEvent::Play => SessionPlaybackState::Playing,
            MediaEvent::Pause => SessionPlaybackState::Paused,
            MediaEvent::Ended => SessionPlaybackState::None,
            MediaEvent::TimeUpdate => {
                self.push_position(element);
                return;
            }
            MediaEvent::Error(_) => return,
        };
        if let Err(err) = self.session.set_playback_state(state) {
            log::warn!("Media Session playback state update failed: {err}");
        }
    }

    fn push_position<E: MediaElement + ?Sized>(&self, element: &E) {
        if !self.position_state {
            return;
        }
        let Some(state) = PositionState::capture(element) else {
            return;
        };
        if let Err(err) = self.session.set_position_state(state) {
            log::debug!("Media Session position update skipped: {err}");
        }
    }
}
