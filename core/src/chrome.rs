use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::route::{RouteState, View};
use crate::schedule::{Scheduler, TaskHandle};

pub const SCROLL_IDLE_MS: u32 = 1500;
pub const POINTER_IDLE_MS: u32 = 2000;
pub const OVERLAY_CLOSE_MS: u32 = 400;
pub const COMPACT_BREAKPOINT_PX: f64 = 768.0;
pub const MAX_TILT_DEG: f64 = 8.0;
const FADE_DISTANCE_RATIO: f64 = 0.4;

pub fn is_compact(viewport_width: f64) -> bool {
    viewport_width < COMPACT_BREAKPOINT_PX
}

struct IdleInner {
    on: bool,
    clear: Option<TaskHandle>,
    on_change: Rc<dyn Fn(bool)>,
}

/// Flag that turns on with every poke and clears itself once no poke has
/// arrived for `delay_ms`.
pub struct IdleFlag<S: Scheduler + 'static> {
    scheduler: Rc<S>,
    delay_ms: u32,
    inner: Rc<RefCell<IdleInner>>,
}

impl<S: Scheduler + 'static> IdleFlag<S> {
    pub fn new(scheduler: Rc<S>, delay_ms: u32, initial: bool) -> Self {
        Self {
            scheduler,
            delay_ms,
            inner: Rc::new(RefCell::new(IdleInner {
                on: initial,
                clear: None,
                on_change: Rc::new(|_: bool| {}),
            })),
        }
    }

    pub fn set_on_change(&self, on_change: Rc<dyn Fn(bool)>) {
        self.inner.borrow_mut().on_change = on_change;
    }

    pub fn is_on(&self) -> bool {
        self.inner.borrow().on
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn poke(&self) {
        let notify = {
            let mut inner = self.inner.borrow_mut();
            let weak = Rc::downgrade(&self.inner);
            inner.clear = Some(
                self.scheduler
                    .after(self.delay_ms, Box::new(move || idle_elapsed(&weak))),
            );
            if inner.on {
                None
            } else {
                inner.on = true;
                Some(inner.on_change.clone())
            }
        };
        if let Some(on_change) = notify {
            on_change(true);
        }
    }

    /// Drops the pending clear without changing the flag.
    pub fn cancel(&self) {
        self.inner.borrow_mut().clear.take();
    }
}

impl<S: Scheduler + 'static> Drop for IdleFlag<S> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.clear.take();
        }
    }
}

fn idle_elapsed(inner: &Weak<RefCell<IdleInner>>) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let notify = {
        let mut inner = inner.borrow_mut();
        inner.clear.take();
        if inner.on {
            inner.on = false;
            Some(inner.on_change.clone())
        } else {
            None
        }
    };
    if let Some(on_change) = notify {
        on_change(false);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavMode {
    Links,
    Back,
}

impl NavMode {
    pub fn for_route(route: &RouteState) -> Self {
        if route.is_project_detail() {
            NavMode::Back
        } else {
            NavMode::Links
        }
    }
}

/// Inputs to the navigation bar's expanded state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavChrome {
    pub view: View,
    pub compact: bool,
    pub hovered: bool,
    pub scrolling: bool,
    pub pointer_active: bool,
}

impl NavChrome {
    /// Views where the bar follows pointer activity instead of scrolling.
    pub fn idles_on_pointer(view: View) -> bool {
        matches!(view, View::Graphic | View::About)
    }

    pub fn is_expanded(&self) -> bool {
        if self.hovered {
            return true;
        }
        if self.compact {
            return !self.scrolling;
        }
        if Self::idles_on_pointer(self.view) {
            self.pointer_active
        } else {
            !self.scrolling
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlayState {
    selected: Option<String>,
    closing: bool,
}

impl OverlayState {
    pub fn open(&mut self, id: &str) {
        self.selected = Some(id.to_string());
        self.closing = false;
    }

    /// Starts the closing animation. Returns false when nothing is open or a
    /// close is already running.
    pub fn begin_close(&mut self) -> bool {
        if self.selected.is_none() || self.closing {
            return false;
        }
        self.closing = true;
        true
    }

    pub fn finish_close(&mut self) {
        if self.closing {
            self.selected = None;
            self.closing = false;
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn closing(&self) -> bool {
        self.closing
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }
}

/// Horizontal scroll delta for a wheel gesture over the project strip, or
/// `None` when the gesture is already mostly horizontal.
pub fn wheel_to_horizontal(delta_x: f64, delta_y: f64) -> Option<f64> {
    (delta_y.abs() > delta_x.abs()).then_some(delta_y)
}

pub fn scroll_fade_opacity(scroll_y: f64, viewport_height: f64) -> f64 {
    let distance = viewport_height * FADE_DISTANCE_RATIO;
    if distance <= 0.0 {
        return 0.0;
    }
    (1.0 - scroll_y / distance).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    pub x_deg: f64,
    pub y_deg: f64,
}

impl Tilt {
    pub fn css(&self) -> String {
        format!(
            "perspective(1000px) rotateX({:.2}deg) rotateY({:.2}deg)",
            self.x_deg, self.y_deg
        )
    }
}

/// Tilt of the intro card toward a pointer at `(x, y)` in a viewport of the
/// given size.
pub fn intro_tilt(x: f64, y: f64, width: f64, height: f64) -> Tilt {
    if width <= 0.0 || height <= 0.0 {
        return Tilt::default();
    }
    let nx = ((x / width) * 2.0 - 1.0).clamp(-1.0, 1.0);
    let ny = ((y / height) * 2.0 - 1.0).clamp(-1.0, 1.0);
    Tilt {
        x_deg: ny * -MAX_TILT_DEG,
        y_deg: nx * MAX_TILT_DEG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_breakpoint() {
        assert!(is_compact(767.9));
        assert!(!is_compact(768.0));
    }

    #[test]
    fn hover_always_expands() {
        let chrome = NavChrome {
            view: View::Projects,
            hovered: true,
            scrolling: true,
            ..NavChrome::default()
        };
        assert!(chrome.is_expanded());
    }

    #[test]
    fn pointer_views_follow_pointer_activity() {
        let mut chrome = NavChrome {
            view: View::About,
            scrolling: false,
            pointer_active: false,
            ..NavChrome::default()
        };
        assert!(!chrome.is_expanded());
        chrome.pointer_active = true;
        chrome.scrolling = true;
        assert!(chrome.is_expanded());
        chrome.compact = true;
        assert!(!chrome.is_expanded());
    }

    #[test]
    fn scroll_views_collapse_while_scrolling() {
        let mut chrome = NavChrome {
            view: View::Home,
            ..NavChrome::default()
        };
        assert!(chrome.is_expanded());
        chrome.scrolling = true;
        assert!(!chrome.is_expanded());
    }

    #[test]
    fn nav_mode_back_only_on_detail() {
        assert_eq!(NavMode::for_route(&RouteState::project("p1")), NavMode::Back);
        assert_eq!(
            NavMode::for_route(&RouteState::view_only(View::Projects)),
            NavMode::Links
        );
    }

    #[test]
    fn wheel_redirects_vertical_gestures() {
        assert_eq!(wheel_to_horizontal(2.0, 40.0), Some(40.0));
        assert_eq!(wheel_to_horizontal(30.0, -10.0), None);
        assert_eq!(wheel_to_horizontal(5.0, 5.0), None);
    }

    #[test]
    fn fade_reaches_zero_at_forty_percent() {
        assert_eq!(scroll_fade_opacity(0.0, 1000.0), 1.0);
        assert_eq!(scroll_fade_opacity(200.0, 1000.0), 0.5);
        assert_eq!(scroll_fade_opacity(400.0, 1000.0), 0.0);
        assert_eq!(scroll_fade_opacity(900.0, 1000.0), 0.0);
    }

    #[test]
    fn tilt_follows_pointer() {
        let tilt = intro_tilt(1000.0, 0.0, 1000.0, 800.0);
        assert_eq!(tilt.y_deg, 8.0);
        assert_eq!(tilt.x_deg, 8.0);
        assert_eq!(intro_tilt(500.0, 400.0, 1000.0, 800.0), Tilt::default());
    }
}
