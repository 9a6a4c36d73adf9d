use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{
    parse_fragment, Commit, NavigationOutcome, Orchestrator, RouteState, TransitionHooks,
    TransitionState, View,
};

use crate::app_router;
use crate::timers::GlooScheduler;

pub(crate) type SiteSubscriber = Rc<dyn Fn()>;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SiteSnapshot {
    pub(crate) route: RouteState,
    pub(crate) transition: TransitionState,
}

/// Route and transition state shared by every component, with
/// drop-to-unsubscribe change notification.
pub(crate) struct SiteCore {
    orchestrator: Orchestrator<GlooScheduler>,
    subscribers: Rc<RefCell<Vec<SiteSubscriber>>>,
}

impl SiteCore {
    /// Builds the core from the fragment the page was loaded with.
    pub(crate) fn new(initial_fragment: &str) -> Rc<Self> {
        let parsed = parse_fragment(initial_fragment);
        if let Some(rewrite) = parsed.rewrite.as_deref() {
            app_router::replace_fragment(rewrite);
        }
        let subscribers: Rc<RefCell<Vec<SiteSubscriber>>> = Rc::new(RefCell::new(Vec::new()));
        let orchestrator = Orchestrator::new(Rc::new(GlooScheduler), parsed.route);
        let on_state_subscribers = Rc::clone(&subscribers);
        let on_route_subscribers = Rc::clone(&subscribers);
        orchestrator.set_hooks(TransitionHooks {
            on_state: Rc::new(move |_: TransitionState| notify_subscribers(&on_state_subscribers)),
            on_route: Rc::new(move |_: &RouteState| notify_subscribers(&on_route_subscribers)),
            on_commit: Rc::new(|commit: &Commit| {
                app_router::write_fragment(&commit.fragment, commit.history);
                app_router::scroll_to_top();
            }),
        });
        Rc::new(Self {
            orchestrator,
            subscribers,
        })
    }

    pub(crate) fn snapshot(&self) -> SiteSnapshot {
        SiteSnapshot {
            route: self.route(),
            transition: self.transition(),
        }
    }

    pub(crate) fn route(&self) -> RouteState {
        self.orchestrator.route()
    }

    pub(crate) fn transition(&self) -> TransitionState {
        self.orchestrator.state()
    }

    pub(crate) fn navigate(&self, view: View) -> NavigationOutcome {
        self.orchestrator.request_navigation(view, None)
    }

    pub(crate) fn select_project(&self, id: &str) -> NavigationOutcome {
        self.orchestrator.request_navigation(View::Projects, Some(id))
    }

    pub(crate) fn deselect_project(&self) -> NavigationOutcome {
        self.orchestrator.request_navigation(View::Projects, None)
    }

    pub(crate) fn handle_fragment_change(&self, raw: &str) {
        if let Some(rewrite) = self.orchestrator.sync_from_fragment(raw) {
            gloo::console::log!(format!("router: unknown fragment {raw:?}, going home"));
            app_router::replace_fragment(&rewrite);
        }
    }

    pub(crate) fn subscribe(&self, subscriber: SiteSubscriber) -> SiteSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        SiteSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    pub(crate) fn shutdown(&self) {
        self.orchestrator.shutdown();
        self.subscribers.borrow_mut().clear();
    }
}

fn notify_subscribers(subscribers: &Rc<RefCell<Vec<SiteSubscriber>>>) {
    let subscribers = subscribers.borrow().clone();
    for subscriber in subscribers {
        subscriber();
    }
}

pub(crate) struct SiteSubscription {
    subscriber: SiteSubscriber,
    subscribers: Rc<RefCell<Vec<SiteSubscriber>>>,
}

impl Drop for SiteSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}
