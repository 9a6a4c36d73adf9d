use std::fmt;

use serde::Deserialize;
use url::Url;

pub const PLACEHOLDER_COUNT: usize = 16;
pub const DEFAULT_PROJECT_ID: &str = "aoav5un7";
pub const DEFAULT_DATASET: &str = "production";
pub const DEFAULT_API_VERSION: &str = "2023-05-03";

const PLACEHOLDER_DESCRIPTION: &str = "Work in progress. Content will appear here soon.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Project,
    Graphic,
}

impl ContentKind {
    pub fn document_type(self) -> &'static str {
        match self {
            ContentKind::Project => "project",
            ContentKind::Graphic => "graphic",
        }
    }

    fn id_prefix(self) -> &'static str {
        match self {
            ContentKind::Project => "p",
            ContentKind::Graphic => "g",
        }
    }

    fn title_prefix(self) -> &'static str {
        match self {
            ContentKind::Project => "Project",
            ContentKind::Graphic => "Graphic",
        }
    }

    /// GROQ query for every published record of this kind, in display order.
    pub fn query(self) -> String {
        format!(
            concat!(
                "*[_type == \"{}\"] | order(order asc, _createdAt asc) {{",
                "\"id\": coalesce(slug.current, _id), number, title, description, ",
                "longDescription, \"mainImage\": mainImage.asset->url, ",
                "\"images\": images[].asset->url, x, y, width, height}}"
            ),
            self.document_type()
        )
    }
}

/// Where the records of a section come from: the Sanity project, the dataset
/// within it, whether reads go through the CDN, and the dated API version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentConfig {
    pub project_id: String,
    pub dataset: String,
    pub use_cdn: bool,
    pub api_version: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            dataset: DEFAULT_DATASET.to_string(),
            use_cdn: true,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl ContentConfig {
    pub fn host(&self) -> String {
        let api = if self.use_cdn { "apicdn" } else { "api" };
        format!("{}.{api}.sanity.io", self.project_id)
    }

    pub fn query_url(&self, query: &str) -> Result<Url, ContentError> {
        let version = self.api_version.trim_start_matches('v');
        let base = format!(
            "https://{}/v{version}/data/query/{}",
            self.host(),
            self.dataset
        );
        Url::parse_with_params(&base, &[("query", query)])
            .map_err(|err| ContentError::Config(err.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    Config(String),
    Transport(String),
    Status(u16),
    Decode(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Config(message) => write!(f, "invalid content config: {message}"),
            ContentError::Transport(message) => write!(f, "request failed: {message}"),
            ContentError::Status(status) => write!(f, "unexpected status {status}"),
            ContentError::Decode(message) => write!(f, "malformed response: {message}"),
        }
    }
}

impl std::error::Error for ContentError {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionHint {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContentRecord {
    pub id: String,
    pub number: String,
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub main_image: Option<String>,
    pub images: Vec<String>,
    pub position: Option<PositionHint>,
}

impl ContentRecord {
    pub fn cover_image(&self) -> Option<&str> {
        self.main_image
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Option<Vec<WireRecord>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecord {
    id: Option<String>,
    number: Option<String>,
    title: Option<String>,
    description: Option<String>,
    long_description: Option<String>,
    main_image: Option<String>,
    images: Option<Vec<Option<String>>>,
    x: Option<f64>,
    y: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
}

pub fn display_number(sequence: usize) -> String {
    format!("({sequence:02})")
}

/// Decodes a query API body. Records without an id are skipped; missing
/// labels fall back to the record's position in the list.
pub fn parse_query_response(body: &str) -> Result<Vec<ContentRecord>, ContentError> {
    let response: QueryResponse =
        serde_json::from_str(body).map_err(|err| ContentError::Decode(err.to_string()))?;
    let records = response
        .result
        .unwrap_or_default()
        .into_iter()
        .filter_map(|mut wire| {
            let id = wire.id.take().map(|id| id.trim().to_string())?;
            if id.is_empty() {
                return None;
            }
            Some((id, wire))
        })
        .enumerate()
        .map(|(index, (id, wire))| {
            let position = match (wire.x, wire.y) {
                (Some(x), Some(y)) => Some(PositionHint {
                    x,
                    y,
                    width: wire.width.unwrap_or(crate::drag::DEFAULT_ITEM_WIDTH),
                    height: wire.height.unwrap_or(crate::drag::DEFAULT_ITEM_HEIGHT),
                }),
                _ => None,
            };
            ContentRecord {
                number: wire
                    .number
                    .filter(|number| !number.trim().is_empty())
                    .unwrap_or_else(|| display_number(index + 1)),
                title: wire.title.unwrap_or_default(),
                description: wire.description.unwrap_or_default(),
                long_description: wire.long_description,
                main_image: wire.main_image,
                images: wire.images.unwrap_or_default().into_iter().flatten().collect(),
                position,
                id,
            }
        })
        .collect();
    Ok(records)
}

pub fn placeholder_image(kind: ContentKind, sequence: usize) -> String {
    format!(
        "https://placehold.co/800x1000/e2e2e2/888888?text={}+{sequence:02}",
        kind.title_prefix()
    )
}

/// Fixed stand-in list used whenever the content store cannot be read.
pub fn placeholder_records(kind: ContentKind) -> Vec<ContentRecord> {
    (1..=PLACEHOLDER_COUNT)
        .map(|sequence| ContentRecord {
            id: format!("{}{sequence}", kind.id_prefix()),
            number: display_number(sequence),
            title: format!("{} {sequence:02}", kind.title_prefix()),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            long_description: None,
            main_image: Some(placeholder_image(kind, sequence)),
            images: Vec::new(),
            position: None,
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentSource {
    Remote,
    Placeholder,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContentSet {
    pub kind: ContentKind,
    pub records: Vec<ContentRecord>,
    pub source: ContentSource,
}

impl ContentSet {
    pub fn placeholder(kind: ContentKind) -> Self {
        Self {
            kind,
            records: placeholder_records(kind),
            source: ContentSource::Placeholder,
        }
    }

    /// Keeps a non-empty fetch result, otherwise substitutes placeholders.
    pub fn resolve(kind: ContentKind, fetched: Result<Vec<ContentRecord>, ContentError>) -> Self {
        match fetched {
            Ok(records) if !records.is_empty() => Self {
                kind,
                records,
                source: ContentSource::Remote,
            },
            _ => Self::placeholder(kind),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.source == ContentSource::Placeholder
    }

    pub fn find(&self, id: &str) -> Option<&ContentRecord> {
        self.records.iter().find(|record| record.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_url_encodes_groq() {
        let config = ContentConfig::default();
        let url = config
            .query_url(&ContentKind::Project.query())
            .expect("url");
        assert_eq!(url.host_str(), Some("aoav5un7.apicdn.sanity.io"));
        assert_eq!(url.path(), "/v2023-05-03/data/query/production");
        let (key, value) = url.query_pairs().next().expect("query pair");
        assert_eq!(key, "query");
        assert!(value.starts_with("*[_type == \"project\"]"));
    }

    #[test]
    fn direct_api_host_without_cdn() {
        let config = ContentConfig {
            use_cdn: false,
            api_version: "v2024-01-01".into(),
            ..ContentConfig::default()
        };
        let url = config.query_url("*").expect("url");
        assert_eq!(url.host_str(), Some("aoav5un7.api.sanity.io"));
        assert_eq!(url.path(), "/v2024-01-01/data/query/production");
    }

    #[test]
    fn placeholder_labels_are_sequential() {
        let records = placeholder_records(ContentKind::Graphic);
        assert_eq!(records.len(), PLACEHOLDER_COUNT);
        assert_eq!(records[0].number, "(01)");
        assert_eq!(records[15].number, "(16)");
        assert_eq!(records[15].id, "g16");
        assert_eq!(records[2].title, "Graphic 03");
    }

    #[test]
    fn records_without_ids_are_skipped_and_labels_follow_kept_order() {
        let body = r#"{"result": [
            {"title": "no id"},
            {"id": "  ", "title": "blank id"},
            {"id": " first ", "title": "First"},
            {"id": "second", "number": " ", "title": "Second"}
        ]}"#;
        let records = parse_query_response(body).expect("records");
        let ids: Vec<_> = records.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, ["first", "second"]);
        assert_eq!(records[0].number, "(01)");
        assert_eq!(records[1].number, "(02)");
        assert_eq!(records[1].title, "Second");
    }

    #[test]
    fn cover_image_prefers_main() {
        let mut record = placeholder_records(ContentKind::Project).remove(0);
        record.images = vec!["b.jpg".into()];
        assert_eq!(record.cover_image(), record.main_image.as_deref());
        record.main_image = None;
        assert_eq!(record.cover_image(), Some("b.jpg"));
    }
}
