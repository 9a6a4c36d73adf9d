use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use folio_core::content::parse_query_response;
use folio_core::{ContentConfig, ContentError, ContentKind, ContentRecord, ContentSet};

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}

/// Read-only client for the Sanity query API. Each kind is fetched at most
/// once per page load.
#[derive(Debug, PartialEq)]
pub(crate) struct SanityClient {
    config: ContentConfig,
    cache: RefCell<HashMap<ContentKind, ContentSet>>,
}

impl SanityClient {
    pub(crate) fn new(config: ContentConfig) -> Self {
        Self {
            config,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub(crate) fn cached(&self, kind: ContentKind) -> Option<ContentSet> {
        self.cache.borrow().get(&kind).cloned()
    }

    pub(crate) async fn fetch(
        &self,
        kind: ContentKind,
    ) -> Result<Vec<ContentRecord>, ContentError> {
        let url = self.config.query_url(&kind.query())?;
        let window = web_sys::window()
            .ok_or_else(|| ContentError::Transport("window unavailable".to_string()))?;
        let value = JsFuture::from(window.fetch_with_str(url.as_str()))
            .await
            .map_err(|err| ContentError::Transport(js_err(err)))?;
        let response: Response = value
            .dyn_into()
            .map_err(|err| ContentError::Transport(js_err(err)))?;
        if !response.ok() {
            return Err(ContentError::Status(response.status()));
        }
        let text_promise = response
            .text()
            .map_err(|err| ContentError::Transport(js_err(err)))?;
        let body = JsFuture::from(text_promise)
            .await
            .map_err(|err| ContentError::Transport(js_err(err)))?
            .as_string()
            .ok_or_else(|| ContentError::Decode("response body is not text".to_string()))?;
        parse_query_response(&body)
    }

    /// Fetches `kind`, substituting placeholders on any failure or an empty
    /// result.
    pub(crate) async fn load(&self, kind: ContentKind) -> ContentSet {
        if let Some(set) = self.cached(kind) {
            return set;
        }
        let fetched = self.fetch(kind).await;
        match &fetched {
            Ok(records) if records.is_empty() => {
                gloo::console::warn!(format!(
                    "content: no {} records, using placeholders",
                    kind.document_type()
                ));
            }
            Ok(records) => {
                gloo::console::log!(format!(
                    "content: loaded {} {} records",
                    records.len(),
                    kind.document_type()
                ));
            }
            Err(err) => {
                gloo::console::warn!(format!(
                    "content: {} fetch failed ({err}), using placeholders",
                    kind.document_type()
                ));
            }
        }
        let set = ContentSet::resolve(kind, fetched);
        self.cache.borrow_mut().insert(kind, set.clone());
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn js_err_prefers_string_then_json() {
        assert_eq!(js_err(JsValue::from_str("boom")), "boom");
        assert_eq!(js_err(JsValue::from_f64(3.0)), "3");
        assert_eq!(js_err(JsValue::UNDEFINED), "js error");
    }

    #[wasm_bindgen_test(async)]
    async fn unreachable_host_falls_back_to_placeholders() {
        let client = SanityClient::new(ContentConfig {
            project_id: "invalid-host-for-tests".to_string(),
            dataset: "nowhere".to_string(),
            use_cdn: false,
            api_version: "2023-05-03".to_string(),
        });
        let set = client.load(ContentKind::Graphic).await;
        assert!(set.is_placeholder());
        assert_eq!(set.records.len(), folio_core::content::PLACEHOLDER_COUNT);
        assert_eq!(client.cached(ContentKind::Graphic), Some(set));
        assert_eq!(client.cached(ContentKind::Project), None);
    }
}
