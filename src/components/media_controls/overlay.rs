// Short-lived on-screen feedback with a cancellable auto-hide.
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::host::{OverlaySurface, Scheduler};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct OverlayState {
    message: String,
    visible: bool,
}

/// Shows a message on a surface and hides it after a fixed delay. Showing a
/// new message drops the pending hide task of the previous one.
pub struct TransientOverlay<O: OverlaySurface, S: Scheduler> {
    surface: Rc<O>,
    scheduler: Rc<S>,
    timeout: Duration,
    state: Rc<RefCell<OverlayState>>,
    pending_hide: RefCell<Option<S::Handle>>,
}

impl<O, S> TransientOverlay<O, S>
where
    O: OverlaySurface + 'static,
    S: Scheduler,
{
    pub fn new(surface: Rc<O>, scheduler: Rc<S>, timeout: Duration) -> Self {
        Self {
            surface,
            scheduler,
            timeout,
            state: Rc::new(RefCell::new(OverlayState::default())),
            pending_hide: RefCell::new(None),
        }
    }

    pub fn show(&self, message: impl Into<String>) {
        let message = message.into();
        // Cancel the previous hide before the new one is armed.
        drop(self.pending_hide.borrow_mut().take());

        self.surface.show(&message);
        *self.state.borrow_mut() = OverlayState {
            message,
            visible: true,
        };

        let surface = Rc::clone(&self.surface);
        let state = Rc::clone(&self.state);
        let handle = self.scheduler.schedule(
            self.timeout,
            Box::new(move || {
                surface.hide();
                state.borrow_mut().visible = false;
            }),
        );
        *self.pending_hide.borrow_mut() = Some(handle);
    }

    /// The message currently on screen, if any.
    pub fn visible_message(&self) -> Option<String> {
        let state = self.state.borrow();
        state.visible.then(|| state.message.clone())
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }
}
