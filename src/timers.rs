use gloo::render::request_animation_frame;
use gloo::timers::callback::Timeout;

use folio_core::{Scheduler, TaskHandle};

/// Browser scheduler: gloo timeouts and animation frames, both of which
/// cancel when their handle is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct GlooScheduler;

pub(crate) fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

impl Scheduler for GlooScheduler {
    fn now_ms(&self) -> f64 {
        now_ms()
    }

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        TaskHandle::new(Timeout::new(delay_ms, task))
    }

    fn on_next_frame(&self, task: Box<dyn FnOnce(f64)>) -> TaskHandle {
        TaskHandle::new(request_animation_frame(task))
    }
}
