use std::fmt;

use crate::content::ContentConfig;
use crate::drag::GalleryMode;

pub const PROJECT_ID_KEY: &str = "FOLIO_SANITY_PROJECT_ID";
pub const DATASET_KEY: &str = "FOLIO_SANITY_DATASET";
pub const USE_CDN_KEY: &str = "FOLIO_SANITY_USE_CDN";
pub const API_VERSION_KEY: &str = "FOLIO_SANITY_API_VERSION";
pub const GALLERY_MODE_KEY: &str = "FOLIO_GALLERY_MODE";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteConfig {
    pub content: ContentConfig,
    pub gallery: GalleryMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Empty(&'static str),
    InvalidBool { key: &'static str, value: String },
    InvalidIdentifier { key: &'static str, value: String },
    UnknownGalleryMode(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Empty(key) => write!(f, "{key} is set but empty"),
            ConfigError::InvalidBool { key, value } => {
                write!(f, "{key} expects true/false, got {value:?}")
            }
            ConfigError::InvalidIdentifier { key, value } => {
                write!(f, "{key} has unexpected characters: {value:?}")
            }
            ConfigError::UnknownGalleryMode(value) => {
                write!(f, "unknown gallery mode {value:?} (expected free or canvas)")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}

fn parse_identifier(key: &'static str, value: &str) -> Result<String, ConfigError> {
    let valid = value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if valid {
        Ok(value.to_string())
    } else {
        Err(ConfigError::InvalidIdentifier {
            key,
            value: value.to_string(),
        })
    }
}

impl SiteConfig {
    /// Folds raw key lookups into a config. Bad values are reported and the
    /// affected setting keeps its default.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SiteConfig::default();
        let mut errors = Vec::new();
        let mut read = |key: &'static str| -> Option<String> {
            let raw = lookup(key)?;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                errors.push(ConfigError::Empty(key));
                None
            } else {
                Some(trimmed.to_string())
            }
        };
        let project_id = read(PROJECT_ID_KEY);
        let dataset = read(DATASET_KEY);
        let use_cdn = read(USE_CDN_KEY);
        let api_version = read(API_VERSION_KEY);
        let gallery = read(GALLERY_MODE_KEY);

        if let Some(value) = project_id {
            match parse_identifier(PROJECT_ID_KEY, &value) {
                Ok(value) => config.content.project_id = value,
                Err(err) => errors.push(err),
            }
        }
        if let Some(value) = dataset {
            match parse_identifier(DATASET_KEY, &value) {
                Ok(value) => config.content.dataset = value,
                Err(err) => errors.push(err),
            }
        }
        if let Some(value) = use_cdn {
            match parse_bool(USE_CDN_KEY, &value) {
                Ok(value) => config.content.use_cdn = value,
                Err(err) => errors.push(err),
            }
        }
        if let Some(value) = api_version {
            match parse_identifier(API_VERSION_KEY, &value) {
                Ok(value) => config.content.api_version = value,
                Err(err) => errors.push(err),
            }
        }
        if let Some(value) = gallery {
            match GalleryMode::parse(&value) {
                Some(mode) => config.gallery = mode,
                None => errors.push(ConfigError::UnknownGalleryMode(value)),
            }
        }
        (config, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let (config, errors) = SiteConfig::from_lookup(|_| None);
        assert!(errors.is_empty());
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.content.project_id, "aoav5un7");
        assert!(config.content.use_cdn);
        assert_eq!(config.gallery, GalleryMode::FreePlacement);
    }

    #[test]
    fn overrides_apply() {
        let (config, errors) = SiteConfig::from_lookup(lookup_from(&[
            (PROJECT_ID_KEY, "abc123"),
            (DATASET_KEY, "staging"),
            (USE_CDN_KEY, "false"),
            (GALLERY_MODE_KEY, "canvas"),
        ]));
        assert!(errors.is_empty());
        assert_eq!(config.content.project_id, "abc123");
        assert_eq!(config.content.dataset, "staging");
        assert!(!config.content.use_cdn);
        assert_eq!(config.gallery, GalleryMode::CanvasPan);
    }

    #[test]
    fn bad_values_fall_back_and_report() {
        let (config, errors) = SiteConfig::from_lookup(lookup_from(&[
            (USE_CDN_KEY, "maybe"),
            (GALLERY_MODE_KEY, "carousel"),
            (DATASET_KEY, "  "),
            (PROJECT_ID_KEY, "evil.host/x"),
        ]));
        assert_eq!(config, SiteConfig::default());
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ConfigError::Empty(DATASET_KEY)));
        assert!(errors.contains(&ConfigError::UnknownGalleryMode("carousel".into())));
    }
}
