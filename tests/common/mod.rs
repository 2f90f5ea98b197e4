#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use media_controls::components::media_controls::host::ActionHandler;
use media_controls::components::media_controls::session::PositionState;
use media_controls::components::media_controls::{
    ActionDetails, AudioController, Capabilities, Completion, FullscreenHost, KeyInput,
    MediaElement, MediaSessionHost, OverlaySurface, PictureInPictureHost, Scheduler,
    SessionAction, SessionMetadata, SessionPlaybackState, VideoController, VideoOverlays,
};
use media_controls::{ControlError, PlayerSettings};

pub fn key(name: &str) -> KeyInput {
    KeyInput::plain(name)
}

/// In-memory media element.
pub struct FakeMedia {
    pub paused: Cell<bool>,
    pub current_time: Cell<f64>,
    pub duration: Cell<f64>,
    pub volume: Cell<f64>,
    pub muted: Cell<bool>,
    pub rate: Cell<f64>,
    pub fullscreen: Cell<bool>,
    pub reject_fullscreen: Cell<bool>,
    pub pip: Cell<bool>,
    pending_pip: RefCell<Vec<(bool, Completion)>>,
}

impl FakeMedia {
    pub fn new(duration: f64) -> Rc<Self> {
        Rc::new(Self {
            paused: Cell::new(true),
            current_time: Cell::new(0.0),
            duration: Cell::new(duration),
            volume: Cell::new(1.0),
            muted: Cell::new(false),
            rate: Cell::new(1.0),
            fullscreen: Cell::new(false),
            reject_fullscreen: Cell::new(false),
            pip: Cell::new(false),
            pending_pip: RefCell::new(Vec::new()),
        })
    }

    pub fn at(position: f64, duration: f64) -> Rc<Self> {
        let media = Self::new(duration);
        media.current_time.set(position);
        media
    }

    pub fn pending_pip_requests(&self) -> usize {
        self.pending_pip.borrow().len()
    }

    /// Settle the oldest picture-in-picture request.
    pub fn resolve_pip(&self, result: Result<(), ControlError>) {
        let (entering, done) = self.pending_pip.borrow_mut().remove(0);
        if result.is_ok() {
            self.pip.set(entering);
        }
        done(result);
    }
}

impl MediaElement for FakeMedia {
    fn paused(&self) -> bool {
        self.paused.get()
    }

    fn play(&self) -> Result<(), ControlError> {
        self.paused.set(false);
        Ok(())
    }

    fn pause(&self) -> Result<(), ControlError> {
        self.paused.set(true);
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.current_time.get()
    }

    fn set_current_time(&self, secs: f64) {
        self.current_time.set(secs);
    }

    fn duration(&self) -> f64 {
        self.duration.get()
    }

    fn volume(&self) -> f64 {
        self.volume.get()
    }

    fn set_volume(&self, volume: f64) {
        self.volume.set(volume);
    }

    fn muted(&self) -> bool {
        self.muted.get()
    }

    fn set_muted(&self, muted: bool) {
        self.muted.set(muted);
    }

    fn playback_rate(&self) -> f64 {
        self.rate.get()
    }

    fn set_playback_rate(&self, rate: f64) {
        self.rate.set(rate);
    }
}

impl FullscreenHost for FakeMedia {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }

    fn request_fullscreen(&self, done: Completion) {
        if self.reject_fullscreen.get() {
            done(Err(ControlError::rejected(
                "requestFullscreen",
                "permission denied",
            )));
            return;
        }
        self.fullscreen.set(true);
        done(Ok(()));
    }

    fn exit_fullscreen(&self, done: Completion) {
        self.fullscreen.set(false);
        done(Ok(()));
    }
}

impl PictureInPictureHost for FakeMedia {
    fn picture_in_picture_active(&self) -> bool {
        self.pip.get()
    }

    fn request_picture_in_picture(&self, done: Completion) {
        self.pending_pip.borrow_mut().push((true, done));
    }

    fn exit_picture_in_picture(&self, done: Completion) {
        self.pending_pip.borrow_mut().push((false, done));
    }
}

/// Media session that records everything it is told.
#[derive(Default)]
pub struct RecordingSession {
    pub metadata: RefCell<Option<SessionMetadata>>,
    pub states: RefCell<Vec<SessionPlaybackState>>,
    pub positions: RefCell<Vec<PositionState>>,
    pub reject_metadata: Cell<bool>,
    handlers: RefCell<HashMap<SessionAction, ActionHandler>>,
}

impl RecordingSession {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn as_host(self: &Rc<Self>) -> Option<Rc<dyn MediaSessionHost>> {
        Some(Rc::clone(self) as Rc<dyn MediaSessionHost>)
    }

    pub fn has_handler(&self, action: SessionAction) -> bool {
        self.handlers.borrow().contains_key(&action)
    }

    pub fn trigger(&self, action: SessionAction, details: ActionDetails) {
        let handlers = self.handlers.borrow();
        let handler = handlers
            .get(&action)
            .unwrap_or_else(|| panic!("no handler for {action:?}"));
        handler(details);
    }

    pub fn last_state(&self) -> Option<SessionPlaybackState> {
        self.states.borrow().last().copied()
    }
}

impl MediaSessionHost for RecordingSession {
    fn set_metadata(&self, metadata: &SessionMetadata) -> Result<(), ControlError> {
        if self.reject_metadata.get() {
            return Err(ControlError::rejected("MediaMetadata", "TypeError"));
        }
        *self.metadata.borrow_mut() = Some(metadata.clone());
        Ok(())
    }

    fn set_action_handler(
        &self,
        action: SessionAction,
        handler: ActionHandler,
    ) -> Result<(), ControlError> {
        self.handlers.borrow_mut().insert(action, handler);
        Ok(())
    }

    fn set_playback_state(&self, state: SessionPlaybackState) -> Result<(), ControlError> {
        self.states.borrow_mut().push(state);
        Ok(())
    }

    fn set_position_state(&self, state: PositionState) -> Result<(), ControlError> {
        self.positions.borrow_mut().push(state);
        Ok(())
    }
}

/// Overlay node that remembers what it displayed.
#[derive(Default)]
pub struct RecordingOverlay {
    pub text: RefCell<String>,
    pub visible: Cell<bool>,
    pub shown: RefCell<Vec<String>>,
}

impl RecordingOverlay {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn visible_text(&self) -> Option<String> {
        self.visible.get().then(|| self.text.borrow().clone())
    }
}

impl OverlaySurface for RecordingOverlay {
    fn show(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
        self.visible.set(true);
        self.shown.borrow_mut().push(text.to_string());
    }

    fn hide(&self) {
        self.visible.set(false);
    }
}

struct ManualTask {
    due_ms: u64,
    cancelled: Rc<Cell<bool>>,
    task: Option<Box<dyn FnOnce()>>,
}

/// Virtual clock scheduler. Tasks only run inside [`ManualScheduler::advance`].
#[derive(Default)]
pub struct ManualScheduler {
    now_ms: Cell<u64>,
    tasks: RefCell<Vec<ManualTask>>,
}

/// Cancels its task when dropped.
pub struct ManualHandle {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    pub fn pending(&self) -> usize {
        self.tasks
            .borrow()
            .iter()
            .filter(|task| task.task.is_some() && !task.cancelled.get())
            .count()
    }

    /// Move the clock forward, running due tasks in order.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms.get() + ms;
        loop {
            let next = {
                let mut tasks = self.tasks.borrow_mut();
                let candidate = tasks
                    .iter_mut()
                    .filter(|task| {
                        task.task.is_some() && !task.cancelled.get() && task.due_ms <= target
                    })
                    .min_by_key(|task| task.due_ms);
                candidate.map(|task| (task.due_ms, task.task.take()))
            };
            let Some((due_ms, Some(task))) = next else {
                break;
            };
            self.now_ms.set(due_ms);
            task();
        }
        self.now_ms.set(target);
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ManualHandle {
        let cancelled = Rc::new(Cell::new(false));
        self.tasks.borrow_mut().push(ManualTask {
            due_ms: self.now_ms.get() + delay.as_millis() as u64,
            cancelled: Rc::clone(&cancelled),
            task: Some(task),
        });
        ManualHandle { cancelled }
    }
}

pub type TestAudio = AudioController<FakeMedia>;
pub type TestVideo = VideoController<FakeMedia, RecordingOverlay, ManualScheduler>;

pub struct VideoRig {
    pub media: Rc<FakeMedia>,
    pub message: Rc<RecordingOverlay>,
    pub speed: Rc<RecordingOverlay>,
    pub scheduler: Rc<ManualScheduler>,
    pub controller: Rc<TestVideo>,
}

pub fn audio_rig(media: Rc<FakeMedia>, capabilities: Capabilities) -> Rc<TestAudio> {
    AudioController::new(media, PlayerSettings::default(), capabilities)
}

pub fn video_rig(media: Rc<FakeMedia>, capabilities: Capabilities) -> VideoRig {
    let message = RecordingOverlay::new();
    let speed = RecordingOverlay::new();
    let scheduler = ManualScheduler::new();
    let controller = VideoController::new(
        Rc::clone(&media),
        VideoOverlays {
            message: Rc::clone(&message),
            speed_indicator: Rc::clone(&speed),
        },
        Rc::clone(&scheduler),
        PlayerSettings::default(),
        capabilities,
    );
    VideoRig {
        media,
        message,
        speed,
        scheduler,
        controller,
    }
}
