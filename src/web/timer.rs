use std::time::Duration;

use gloo_timers::callback::Timeout;

use crate::components::media_controls::Scheduler;

/// `setTimeout`-backed scheduler. Dropping the `Timeout` clears it.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Timeout {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task)
    }
}
