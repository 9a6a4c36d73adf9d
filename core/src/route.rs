use std::fmt;

pub const HOME_FRAGMENT: &str = "#/home";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Home,
    Projects,
    Graphic,
    About,
}

pub const VIEWS: [View; 4] = [View::Home, View::Projects, View::Graphic, View::About];

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Projects => "projects",
            View::Graphic => "graphic",
            View::About => "about",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Projects => "Projects",
            View::Graphic => "Graphic",
            View::About => "About me",
        }
    }

    /// Exact match against the canonical fragment names.
    pub fn from_segment(segment: &str) -> Option<Self> {
        VIEWS.iter().copied().find(|view| view.as_str() == segment)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which view is visible and, on the project gallery, which project is open.
///
/// `selected_id` is only ever present together with [`View::Projects`]; the
/// constructor drops it for every other view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RouteState {
    view: View,
    selected_id: Option<String>,
}

impl RouteState {
    pub fn new(view: View, selected_id: Option<&str>) -> Self {
        let selected_id = match view {
            View::Projects => selected_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            _ => None,
        };
        Self { view, selected_id }
    }

    pub fn home() -> Self {
        Self::default()
    }

    pub fn view_only(view: View) -> Self {
        Self::new(view, None)
    }

    pub fn project(id: &str) -> Self {
        Self::new(View::Projects, Some(id))
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn is_project_detail(&self) -> bool {
        self.selected_id.is_some()
    }

    pub fn fragment(&self) -> String {
        match self.selected_id.as_deref() {
            Some(id) => format!("#/{}/{}", self.view.as_str(), id),
            None => format!("#/{}", self.view.as_str()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryMode {
    Push,
    Replace,
}

impl HistoryMode {
    /// Leaving a project detail back to the gallery replaces the history
    /// entry so the back button does not land on the detail again.
    pub fn between(current: &RouteState, target: &RouteState) -> Self {
        let deselects = current.is_project_detail()
            && target.view() == View::Projects
            && !target.is_project_detail();
        if deselects {
            HistoryMode::Replace
        } else {
            HistoryMode::Push
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedFragment {
    pub route: RouteState,
    /// Canonical fragment to write back when the input was not a known view.
    pub rewrite: Option<String>,
}

pub fn parse_fragment(raw: &str) -> ParsedFragment {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
    let mut segments = trimmed.split('/');
    let head = segments.next().unwrap_or("");
    let Some(view) = View::from_segment(head) else {
        return ParsedFragment {
            route: RouteState::home(),
            rewrite: Some(HOME_FRAGMENT.to_string()),
        };
    };
    let selected = if view == View::Projects {
        segments.next()
    } else {
        None
    };
    ParsedFragment {
        route: RouteState::new(view, selected),
        rewrite: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_id_dropped_outside_projects() {
        let route = RouteState::new(View::Graphic, Some("g1"));
        assert_eq!(route.selected_id(), None);
        assert_eq!(route.fragment(), "#/graphic");
    }

    #[test]
    fn blank_selected_id_is_absent() {
        let route = RouteState::new(View::Projects, Some("  "));
        assert!(!route.is_project_detail());
    }

    #[test]
    fn parses_detail_fragment() {
        let parsed = parse_fragment("#/projects/p3");
        assert_eq!(parsed.route, RouteState::project("p3"));
        assert_eq!(parsed.rewrite, None);
    }

    #[test]
    fn accepts_fragment_without_slash() {
        let parsed = parse_fragment("#about");
        assert_eq!(parsed.route.view(), View::About);
        assert_eq!(parsed.rewrite, None);
    }

    #[test]
    fn unknown_and_empty_fall_back_home() {
        for raw in ["", "#", "#/", "#/contact", "#/Projects/p1", "#//projects"] {
            let parsed = parse_fragment(raw);
            assert_eq!(parsed.route, RouteState::home(), "input {raw:?}");
            assert_eq!(parsed.rewrite.as_deref(), Some(HOME_FRAGMENT), "input {raw:?}");
        }
    }

    #[test]
    fn trailing_segments_ignored() {
        let parsed = parse_fragment("#/about/team/extra");
        assert_eq!(parsed.route, RouteState::view_only(View::About));
        let parsed = parse_fragment("#/projects/p2/gallery");
        assert_eq!(parsed.route, RouteState::project("p2"));
    }

    #[test]
    fn history_mode_replace_only_when_deselecting() {
        let detail = RouteState::project("p1");
        let gallery = RouteState::view_only(View::Projects);
        assert_eq!(HistoryMode::between(&detail, &gallery), HistoryMode::Replace);
        assert_eq!(HistoryMode::between(&gallery, &detail), HistoryMode::Push);
        assert_eq!(
            HistoryMode::between(&detail, &RouteState::home()),
            HistoryMode::Push
        );
        assert_eq!(
            HistoryMode::between(&detail, &RouteState::project("p2")),
            HistoryMode::Push
        );
    }
}
