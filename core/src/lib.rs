pub mod chrome;
pub mod config;
pub mod content;
pub mod drag;
pub mod route;
pub mod schedule;
pub mod transition;

pub use chrome::{IdleFlag, NavChrome, NavMode, OverlayState};
pub use config::{ConfigError, SiteConfig};
pub use content::{
    ContentConfig, ContentError, ContentKind, ContentRecord, ContentSet, ContentSource,
};
pub use drag::{CanvasPan, ClickStrategy, FreePlacement, GalleryMode, Point, Rect, Size};
pub use route::{parse_fragment, HistoryMode, RouteState, View, VIEWS};
pub use schedule::{ManualScheduler, Scheduler, TaskHandle};
pub use transition::{
    Commit, NavigationOutcome, Orchestrator, TransitionHooks, TransitionPhase, TransitionState,
};
