use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::route::{parse_fragment, HistoryMode, RouteState, View};
use crate::schedule::{Scheduler, TaskHandle};

pub const COUNTER_DURATION_MS: f64 = 600.0;
pub const VEIL_HOLD_MS: u32 = 800;
pub const UNVEIL_HOLD_MS: u32 = 500;
pub const CYCLE_MS: u32 = VEIL_HOLD_MS + UNVEIL_HOLD_MS;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Veiling,
    Unveiling,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransitionState {
    pub phase: TransitionPhase,
    pub progress: u8,
}

impl TransitionState {
    pub fn is_active(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }
}

/// Counter value shown on the veil `elapsed_ms` after the request.
pub fn counter_progress(elapsed_ms: f64) -> u8 {
    let ratio = (elapsed_ms.max(0.0) / COUNTER_DURATION_MS).min(1.0);
    (100.0 * ratio).floor() as u8
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    pub route: RouteState,
    pub fragment: String,
    pub history: HistoryMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationOutcome {
    Accepted,
    Busy,
    Unchanged,
}

#[derive(Clone)]
pub struct TransitionHooks {
    pub on_state: Rc<dyn Fn(TransitionState)>,
    pub on_route: Rc<dyn Fn(&RouteState)>,
    pub on_commit: Rc<dyn Fn(&Commit)>,
}

impl TransitionHooks {
    pub fn empty() -> Self {
        Self {
            on_state: Rc::new(|_: TransitionState| {}),
            on_route: Rc::new(|_: &RouteState| {}),
            on_commit: Rc::new(|_: &Commit| {}),
        }
    }
}

struct Inner {
    route: RouteState,
    state: TransitionState,
    pending: Option<Commit>,
    started_ms: f64,
    hold: Option<TaskHandle>,
    frame: Option<TaskHandle>,
    hooks: TransitionHooks,
}

/// Serializes navigation behind the veil choreography.
///
/// A request moves the machine `Idle -> Veiling`; after [`VEIL_HOLD_MS`] the
/// route is committed and the machine enters `Unveiling`; after
/// [`UNVEIL_HOLD_MS`] more it is back to `Idle`. The percentage counter runs
/// on display frames alongside the hold and never gates it.
pub struct Orchestrator<S: Scheduler + 'static> {
    scheduler: Rc<S>,
    inner: Rc<RefCell<Inner>>,
}

impl<S: Scheduler + 'static> Orchestrator<S> {
    pub fn new(scheduler: Rc<S>, initial: RouteState) -> Self {
        Self {
            scheduler,
            inner: Rc::new(RefCell::new(Inner {
                route: initial,
                state: TransitionState::default(),
                pending: None,
                started_ms: 0.0,
                hold: None,
                frame: None,
                hooks: TransitionHooks::empty(),
            })),
        }
    }

    pub fn set_hooks(&self, hooks: TransitionHooks) {
        self.inner.borrow_mut().hooks = hooks;
    }

    pub fn route(&self) -> RouteState {
        self.inner.borrow().route.clone()
    }

    pub fn state(&self) -> TransitionState {
        self.inner.borrow().state
    }

    pub fn request_navigation(&self, view: View, entity_id: Option<&str>) -> NavigationOutcome {
        self.request(RouteState::new(view, entity_id))
    }

    pub fn request(&self, target: RouteState) -> NavigationOutcome {
        let (on_state, state) = {
            let mut inner = self.inner.borrow_mut();
            if inner.state.is_active() {
                return NavigationOutcome::Busy;
            }
            if inner.route == target {
                return NavigationOutcome::Unchanged;
            }
            let history = HistoryMode::between(&inner.route, &target);
            inner.pending = Some(Commit {
                fragment: target.fragment(),
                route: target,
                history,
            });
            inner.state = TransitionState {
                phase: TransitionPhase::Veiling,
                progress: 0,
            };
            inner.started_ms = self.scheduler.now_ms();
            let weak = Rc::downgrade(&self.inner);
            inner.frame = Some(schedule_counter_frame(&self.scheduler, weak.clone()));
            let scheduler = Rc::clone(&self.scheduler);
            inner.hold = Some(self.scheduler.after(
                VEIL_HOLD_MS,
                Box::new(move || veil_elapsed(&scheduler, &weak)),
            ));
            (inner.hooks.on_state.clone(), inner.state)
        };
        on_state(state);
        NavigationOutcome::Accepted
    }

    /// Applies an address-bar change directly, without the veil. Returns the
    /// canonical fragment to write back when the input was not recognised.
    pub fn sync_from_fragment(&self, raw: &str) -> Option<String> {
        let parsed = parse_fragment(raw);
        let on_route = {
            let mut inner = self.inner.borrow_mut();
            if inner.route == parsed.route {
                None
            } else {
                inner.route = parsed.route.clone();
                Some(inner.hooks.on_route.clone())
            }
        };
        if let Some(on_route) = on_route {
            on_route(&parsed.route);
        }
        parsed.rewrite
    }

    /// Cancels pending timers and frames and drops any uncommitted request.
    pub fn shutdown(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.hold.take();
        inner.frame.take();
        inner.pending = None;
        inner.state = TransitionState::default();
    }
}

impl<S: Scheduler + 'static> Drop for Orchestrator<S> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.hold.take();
            inner.frame.take();
        }
    }
}

fn schedule_counter_frame<S: Scheduler + 'static>(
    scheduler: &Rc<S>,
    inner: Weak<RefCell<Inner>>,
) -> TaskHandle {
    let next = Rc::clone(scheduler);
    scheduler.on_next_frame(Box::new(move |timestamp| {
        counter_frame(&next, &inner, timestamp);
    }))
}

fn counter_frame<S: Scheduler + 'static>(
    scheduler: &Rc<S>,
    inner: &Weak<RefCell<Inner>>,
    timestamp: f64,
) {
    let Some(inner_rc) = inner.upgrade() else {
        return;
    };
    let notify = {
        let mut inner = inner_rc.borrow_mut();
        inner.frame.take();
        if !inner.state.is_active() {
            return;
        }
        let progress = counter_progress(timestamp - inner.started_ms);
        if progress < 100 {
            inner.frame = Some(schedule_counter_frame(scheduler, Rc::downgrade(&inner_rc)));
        }
        if progress == inner.state.progress {
            None
        } else {
            inner.state.progress = progress;
            Some((inner.hooks.on_state.clone(), inner.state))
        }
    };
    if let Some((on_state, state)) = notify {
        on_state(state);
    }
}

fn veil_elapsed<S: Scheduler + 'static>(scheduler: &Rc<S>, inner: &Weak<RefCell<Inner>>) {
    let Some(inner_rc) = inner.upgrade() else {
        return;
    };
    let (commit, hooks, state) = {
        let mut inner = inner_rc.borrow_mut();
        inner.hold.take();
        let Some(commit) = inner.pending.take() else {
            return;
        };
        inner.route = commit.route.clone();
        inner.state.phase = TransitionPhase::Unveiling;
        let weak = Rc::downgrade(&inner_rc);
        inner.hold = Some(scheduler.after(
            UNVEIL_HOLD_MS,
            Box::new(move || unveil_elapsed(&weak)),
        ));
        (commit, inner.hooks.clone(), inner.state)
    };
    (hooks.on_commit)(&commit);
    (hooks.on_route)(&commit.route);
    (hooks.on_state)(state);
}

fn unveil_elapsed(inner: &Weak<RefCell<Inner>>) {
    let Some(inner_rc) = inner.upgrade() else {
        return;
    };
    let (on_state, state) = {
        let mut inner = inner_rc.borrow_mut();
        inner.hold.take();
        inner.frame.take();
        inner.state = TransitionState::default();
        (inner.hooks.on_state.clone(), inner.state)
    };
    on_state(state);
}
