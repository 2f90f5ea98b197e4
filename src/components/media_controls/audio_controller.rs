// Audio controller: keyboard shortcuts and media-session bridging for an audio element.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{Capability, ControlError};
use crate::settings::PlayerSettings;

use super::host::{Capabilities, MediaElement, MediaSessionHost};
use super::playback::{self, MediaEvent, PlaybackStatus};
use super::session::{self, ActionDetails, SessionAction, SessionBridge, SessionMetadata};
use super::shortcuts::{KeyInput, Shortcut, ShortcutProfile};

pub struct AudioController<E: MediaElement> {
    audio: Rc<E>,
    settings: PlayerSettings,
    capabilities: Capabilities,
    status: Cell<PlaybackStatus>,
    session: RefCell<Option<SessionBridge>>,
}

impl<E: MediaElement + 'static> AudioController<E> {
    pub fn new(audio: Rc<E>, settings: PlayerSettings, capabilities: Capabilities) -> Rc<Self> {
        let status = if audio.paused() {
            PlaybackStatus::Paused
        } else {
            PlaybackStatus::Playing
        };
        log::info!("Audio player initialized");
        Rc::new(Self {
            audio,
            settings,
            capabilities,
            status: Cell::new(status),
            session: RefCell::new(None),
        })
    }

    pub fn element(&self) -> &Rc<E> {
        &self.audio
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status.get()
    }

    pub fn has_media_session(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// Run the shortcut bound to `input`. Returns `true` when the key was
    /// consumed and the browser default should be suppressed.
    pub fn handle_key(&self, input: &KeyInput) -> bool {
        let Some(shortcut) = Shortcut::from_key(input, ShortcutProfile::Audio) else {
            return false;
        };
        let audio = self.audio.as_ref();
        match shortcut {
            Shortcut::TogglePlay => playback::toggle_play(audio),
            Shortcut::SeekBackward => {
                playback::seek_by(audio, -self.settings.seek_step_secs);
            }
            Shortcut::SeekForward => {
                playback::seek_by(audio, self.settings.seek_step_secs);
            }
            Shortcut::VolumeUp => {
                playback::adjust_volume(audio, self.settings.volume_step);
            }
            Shortcut::VolumeDown => {
                playback::adjust_volume(audio, -self.settings.volume_step);
            }
            Shortcut::ToggleMute => {
                playback::toggle_mute(audio);
            }
            _ => return false,
        }
        log::debug!("Audio shortcut {shortcut:?}");
        true
    }

    /// Feed an element event through the state machine and into the session.
    pub fn handle_media_event(&self, event: MediaEvent) {
        if let MediaEvent::Error(code) = &event {
            log::error!("Audio error: {}", playback::media_error_description(*code));
        }
        self.status.set(self.status.get().apply(&event));
        if let Some(bridge) = self.session.borrow().as_ref() {
            bridge.on_media_event(&event, self.audio.as_ref());
        }
    }

    pub fn handle_session_action(&self, action: SessionAction, details: ActionDetails) {
        session::apply_action(
            self.audio.as_ref(),
            action,
            details,
            self.settings.session_seek_offset_secs,
        );
    }

    /// Hook the OS media session up to this controller. A missing session or a
    /// failure during setup leaves keyboard shortcuts as the only control path.
    pub fn init_media_session(
        self: &Rc<Self>,
        session: Option<Rc<dyn MediaSessionHost>>,
        title: Option<String>,
    ) {
        let Some(session) = session.filter(|_| self.capabilities.media_session) else {
            log::info!("{}", ControlError::Unsupported(Capability::MediaSession));
            return;
        };
        log::info!("Initializing Media Session for audio");

        let metadata = SessionMetadata::for_audio(title, &self.settings);
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
                log::info!("Media Session enabled for \"{}\"", metadata.title);
            }
            Err(err) => log::error!("Media Session error: {err}"),
        }
    }
}
