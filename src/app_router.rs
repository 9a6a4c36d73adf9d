use gloo::events::EventListener;
use web_sys::Window;

use folio_core::HistoryMode;

use crate::content_client::js_err;

/// Current address-bar fragment, URI-decoded, including the leading `#`.
pub(crate) fn current_fragment() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    let hash = window.location().hash().unwrap_or_default();
    decode_hash_value(&hash)
}

pub(crate) fn write_fragment(fragment: &str, mode: HistoryMode) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let result = match mode {
        HistoryMode::Push => window.location().set_hash(fragment),
        HistoryMode::Replace => window.location().replace(fragment),
    };
    if let Err(err) = result {
        gloo::console::warn!("router: fragment write failed", js_err(err));
    }
}

/// Canonical rewrites never leave a back-stack entry.
pub(crate) fn replace_fragment(fragment: &str) {
    write_fragment(fragment, HistoryMode::Replace);
}

pub(crate) fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// Calls `on_change` with the decoded fragment on every `hashchange`,
/// including changes this app makes itself.
pub(crate) fn listen_hash_changes<F>(window: &Window, on_change: F) -> EventListener
where
    F: Fn(String) + 'static,
{
    EventListener::new(window, "hashchange", move |_| {
        on_change(current_fragment());
    })
}

fn decode_hash_value(value: &str) -> String {
    let raw = value.trim();
    if raw.is_empty() {
        return String::new();
    }
    js_sys::decode_uri_component(raw)
        .ok()
        .and_then(|decoded| decoded.as_string())
        .unwrap_or_else(|| raw.to_string())
}
