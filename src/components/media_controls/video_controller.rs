// Video controller: the audio shortcut set plus fullscreen, picture-in-picture,
// speed cycling and on-screen feedback.
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::error::{Capability, ControlError};
use crate::settings::PlayerSettings;
use crate::utils;

use super::host::{
    Capabilities, Completion, MediaSessionHost, OverlaySurface, Scheduler, VideoSurface,
};
use super::overlay::TransientOverlay;
use super::playback::{self, MediaEvent, PlaybackRateTable, PlaybackStatus, RateStep};
use super::session::{self, ActionDetails, SessionAction, SessionBridge, SessionMetadata};
use super::shortcuts::{KeyInput, Shortcut, ShortcutProfile};

/// The two overlay nodes the video controller writes to.
pub struct VideoOverlays<O> {
    pub message: Rc<O>,
    pub speed_indicator: Rc<O>,
}

pub struct VideoController<V, O, S>
where
    V: VideoSurface,
    O: OverlaySurface,
    S: Scheduler,
{
    video: Rc<V>,
    settings: PlayerSettings,
    capabilities: Capabilities,
    rates: RefCell<PlaybackRateTable>,
    status: Cell<PlaybackStatus>,
    message: TransientOverlay<O, S>,
    speed_indicator: TransientOverlay<O, S>,
    session: RefCell<Option<SessionBridge>>,
}

impl<V, O, S> VideoController<V, O, S>
where
    V: VideoSurface + 'static,
    O: OverlaySurface + 'static,
    S: Scheduler + 'static,
{
    pub fn new(
        video: Rc<V>,
        overlays: VideoOverlays<O>,
        scheduler: Rc<S>,
        settings: PlayerSettings,
        capabilities: Capabilities,
    ) -> Rc<Self> {
        let message = TransientOverlay::new(
            overlays.message,
            Rc::clone(&scheduler),
            Duration::from_millis(u64::from(settings.message_timeout_ms)),
        );
        let speed_indicator = TransientOverlay::new(
            overlays.speed_indicator,
            scheduler,
            Duration::from_millis(u64::from(settings.speed_indicator_timeout_ms)),
        );
        let status = if video.paused() {
            PlaybackStatus::Paused
        } else {
            PlaybackStatus::Playing
        };

        log::info!("MediaPlayer initialized");
        Rc::new(Self {
            video,
            settings,
            capabilities,
            rates: RefCell::new(PlaybackRateTable::new()),
            status: Cell::new(status),
            message,
            speed_indicator,
            session: RefCell::new(None),
        })
    }

    pub fn element(&self) -> &Rc<V> {
        &self.video
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status.get()
    }

    pub fn current_rate(&self) -> f64 {
        self.rates.borrow().current()
    }

    pub fn visible_message(&self) -> Option<String> {
        self.message.visible_message()
    }

    pub fn visible_speed_indicator(&self) -> Option<String> {
        self.speed_indicator.visible_message()
    }

    pub fn has_media_session(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// Run the shortcut bound to `input`. Returns `true` when the key was
    /// consumed and the browser default should be suppressed.
    pub fn handle_key(self: &Rc<Self>, input: &KeyInput) -> bool {
        let Some(shortcut) = Shortcut::from_key(input, ShortcutProfile::Video) else {
            return false;
        };
        match shortcut {
            Shortcut::TogglePlay => playback::toggle_play(self.video.as_ref()),
            Shortcut::SeekBackward => self.seek(-self.settings.seek_step_secs),
            Shortcut::SeekForward => self.seek(self.settings.seek_step_secs),
            Shortcut::VolumeUp => self.adjust_volume(self.settings.volume_step),
            Shortcut::VolumeDown => self.adjust_volume(-self.settings.volume_step),
            Shortcut::ToggleMute => self.toggle_mute(),
            Shortcut::ToggleFullscreen => self.toggle_fullscreen(),
            Shortcut::TogglePictureInPicture => {
                if !self.capabilities.picture_in_picture {
                    log::debug!("{}", ControlError::Unsupported(Capability::PictureInPicture));
                    return false;
                }
                self.toggle_picture_in_picture();
            }
            Shortcut::SpeedUp => self.change_speed(RateStep::Faster),
            Shortcut::SpeedDown => self.change_speed(RateStep::Slower),
            Shortcut::Restart => self.restart(),
            Shortcut::JumpNearEnd => self.jump_near_end(),
        }
        true
    }

    pub fn seek(&self, delta: f64) {
        playback::seek_by(self.video.as_ref(), delta);
        self.show_message(utils::seek_label(delta));
    }

    /// Change the volume, unmute, and report the new level.
    pub fn adjust_volume(&self, delta: f64) {
        let volume = playback::adjust_volume(self.video.as_ref(), delta);
        self.video.set_muted(false);
        self.show_message(utils::volume_label(volume));
    }

    pub fn toggle_mute(&self) {
        let muted = playback::toggle_mute(self.video.as_ref());
        self.show_message(utils::mute_label(muted));
    }

    pub fn toggle_fullscreen(&self) {
        if !self.capabilities.fullscreen {
            log::info!("{}", ControlError::Unsupported(Capability::Fullscreen));
            return;
        }
        if self.video.is_fullscreen() {
            self.video.exit_fullscreen(Box::new(|result| {
                if let Err(err) = result {
                    log::error!("Fullscreen exit error: {err}");
                }
            }));
        } else {
            self.video.request_fullscreen(Box::new(|result| {
                if let Err(err) = result {
                    log::error!("Fullscreen error: {err}");
                }
            }));
        }
    }

    /// Enter or leave picture-in-picture; the message only appears once the
    /// host confirms the switch.
    pub fn toggle_picture_in_picture(self: &Rc<Self>) {
        let active = self.video.picture_in_picture_active();
        let label = if active {
            "Exited PiP"
        } else {
            "Picture-in-Picture"
        };
        let this = Rc::downgrade(self);
        let done: Completion = Box::new(move |result| match result {
            Ok(()) => {
                if let Some(this) = this.upgrade() {
                    this.show_message(label);
                }
            }
            Err(err) => log::error!("PiP error: {err}"),
        });

        if active {
            self.video.exit_picture_in_picture(done);
        } else {
            self.video.request_picture_in_picture(done);
        }
    }

    pub fn change_speed(&self, step: RateStep) {
        let rate = self.rates.borrow_mut().step(step);
        self.video.set_playback_rate(rate);
        self.speed_indicator.show(utils::speed_label(rate));
        log::debug!("Playback speed: {rate}x");
    }

    pub fn restart(&self) {
        self.video.set_current_time(0.0);
        self.show_message("Restarted");
    }

    pub fn jump_near_end(&self) {
        match playback::near_end_position(
            self.video.duration(),
            self.settings.near_end_offset_secs,
        ) {
            Some(position) => self.video.set_current_time(position),
            None => log::debug!("End key ignored while duration is unknown"),
        }
    }

    pub fn show_message(&self, message: impl Into<String>) {
        self.message.show(message);
    }

    pub fn handle_media_event(&self, event: MediaEvent) {
        match &event {
            MediaEvent::Play => log::debug!("Playing"),
            MediaEvent::Pause => log::debug!("Paused"),
            MediaEvent::Ended => log::info!("Playback complete"),
            MediaEvent::Error(code) => {
                log::error!("Video error: {}", playback::media_error_description(*code))
            }
            MediaEvent::TimeUpdate => {}
        }
        self.status.set(self.status.get().apply(&event));
        if let Some(bridge) = self.session.borrow().as_ref() {
            bridge.on_media_event(&event, self.video.as_ref());
        }
    }

    pub fn handle_session_action(&self, action: SessionAction, details: ActionDetails) {
        session::apply_action(
            self.video.as_ref(),
            action,
            details,
            self.settings.session_seek_offset_secs,
        );
    }

    /// Wire the OS media session. Call on the finished controller handle so the
    /// registered handlers reach a fully built controller.
    pub fn init_media_session(
        self: &Rc<Self>,
        session: Option<Rc<dyn MediaSessionHost>>,
        title: Option<String>,
    ) {
        let Some(session) = session.filter(|_| self.capabilities.media_session) else {
            log::info!("{}", ControlError::Unsupported(Capability::MediaSession));
            return;
        };
        log::info!("Initializing Media Session API");

        let metadata = SessionMetadata::for_video(title, &self.settings);
        let this = Rc::downgrade(self);
        let dispatch = move |action: SessionAction, details: ActionDetails| {
            if let Some(this) = this.upgrade() {
                this.handle_session_action(action, details);
            }
        };

        match SessionBridge::install(
            session,
            &metadata,
            self.capabilities.position_state,
            dispatch,
        ) {
            Ok(bridge) => {
                *self.session.borrow_mut() = Some(bridge);
                log::info!("Media Session API initialized - system controls enabled");
            }
            Err(err) => log::error!("Media Session error: {err}"),
        }
    }
}
