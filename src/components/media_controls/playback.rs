// Transport math, the speed table, and the play/pause state machine.
use super::host::MediaElement;
use super::session::SessionPlaybackState;

/// Speeds offered by the video speed shortcuts, slowest first.
pub const PLAYBACK_RATES: [f64; 8] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];
const NORMAL_RATE_INDEX: usize = 3;

/// Events the host reports for the media element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    Play,
    Pause,
    Ended,
    TimeUpdate,
    /// `MediaError.code` when the host exposes one.
    Error(Option<u16>),
}

/// Steady playback states. `Ended` is the terminal flavour of paused and only
/// shows up in the media session as `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    Playing,
    #[default]
    Paused,
    Ended,
}

impl PlaybackStatus {
    pub fn apply(self, event: &MediaEvent) -> Self {
        match event {
            MediaEvent::Play => PlaybackStatus::Playing,
            MediaEvent::Pause => {
                if self == PlaybackStatus::Ended {
                    self
                } else {
                    PlaybackStatus::Paused
                }
            }
            MediaEvent::Ended => PlaybackStatus::Ended,
            MediaEvent::TimeUpdate | MediaEvent::Error(_) => self,
        }
    }

    pub fn is_playing(self) -> bool {
        self == PlaybackStatus::Playing
    }

    pub fn session_state(self) -> SessionPlaybackState {
        match self {
            PlaybackStatus::Playing => SessionPlaybackState::Playing,
            PlaybackStatus::Paused => SessionPlaybackState::Paused,
            PlaybackStatus::Ended => SessionPlaybackState::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateStep {
    Faster,
    Slower,
}

/// Circular cursor over [`PLAYBACK_RATES`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRateTable {
    index: usize,
}

impl Default for PlaybackRateTable {
    fn default() -> Self {
        Self {
            index: NORMAL_RATE_INDEX,
        }
    }
}

impl PlaybackRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> f64 {
        PLAYBACK_RATES[self.index]
    }

    /// Move one entry, wrapping at either end, and return the new rate.
    pub fn step(&mut self, step: RateStep) -> f64 {
        let len = PLAYBACK_RATES.len();
        self.index = match step {
            RateStep::Faster => (self.index + 1) % len,
            RateStep::Slower => (self.index + len - 1) % len,
        };
        self.current()
    }
}

/// Upper bound for seeking: the duration when known, unbounded otherwise.
fn seek_ceiling(duration: f64) -> f64 {
    if duration.is_finite() {
        duration.max(0.0)
    } else {
        f64::INFINITY
    }
}

/// Clamp an absolute target into `[0, duration]`.
pub fn clamp_position(target: f64, duration: f64) -> f64 {
    if target.is_nan() {
        return 0.0;
    }
    target.clamp(0.0, seek_ceiling(duration))
}

/// Position after moving `delta` seconds from `current`.
pub fn seek_position(current: f64, delta: f64, duration: f64) -> f64 {
    let current = if current.is_finite() { current } else { 0.0 };
    clamp_position(current + delta, duration)
}

pub fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

/// Target for the "jump near the end" shortcut, or `None` while the duration
/// is unknown.
pub fn near_end_position(duration: f64, offset: f64) -> Option<f64> {
    if !duration.is_finite() {
        return None;
    }
    Some((duration - offset).max(0.0))
}

/// Human-readable text for a `MediaError.code`.
pub fn media_error_description(code: Option<u16>) -> &'static str {
    match code {
        Some(1) => "playback was aborted before the media loaded",
        Some(2) => "network error while loading the media",
        Some(3) => "media playback failed due to a decode error",
        Some(4) => "no supported media source was found",
        _ => "unable to load this media source",
    }
}

pub fn toggle_play<E: MediaElement + ?Sized>(element: &E) {
    let result = if element.paused() {
        element.play()
    } else {
        element.pause()
    };
    if let Err(err) = result {
        log::error!("Play/pause failed: {err}");
    }
}

/// Seek relative to the current position and return where playback landed.
pub fn seek_by<E: MediaElement + ?Sized>(element: &E, delta: f64) -> f64 {
    let target = seek_position(element.current_time(), delta, element.duration());
    element.set_current_time(target);
    target
}

pub fn seek_to<E: MediaElement + ?Sized>(element: &E, target: f64) -> f64 {
    let target = clamp_position(target, element.duration());
    element.set_current_time(target);
    target
}

/// Nudge the volume and return the new level.
pub fn adjust_volume<E: MediaElement + ?Sized>(element: &E, delta: f64) -> f64 {
    let volume = clamp_volume(element.volume() + delta);
    element.set_volume(volume);
    volume
}

/// Flip the mute flag and return the new value.
pub fn toggle_mute<E: MediaElement + ?Sized>(element: &E) -> bool {
    let muted = !element.muted();
    element.set_muted(muted);
    muted
}
