use folio_core::config::{
    API_VERSION_KEY, DATASET_KEY, GALLERY_MODE_KEY, PROJECT_ID_KEY, USE_CDN_KEY,
};
use folio_core::SiteConfig;

fn build_env(key: &str) -> Option<&'static str> {
    match key {
        PROJECT_ID_KEY => option_env!("FOLIO_SANITY_PROJECT_ID")
            .or(option_env!("TRUNK_PUBLIC_FOLIO_SANITY_PROJECT_ID")),
        DATASET_KEY => option_env!("FOLIO_SANITY_DATASET")
            .or(option_env!("TRUNK_PUBLIC_FOLIO_SANITY_DATASET")),
        USE_CDN_KEY => option_env!("FOLIO_SANITY_USE_CDN")
            .or(option_env!("TRUNK_PUBLIC_FOLIO_SANITY_USE_CDN")),
        API_VERSION_KEY => option_env!("FOLIO_SANITY_API_VERSION")
            .or(option_env!("TRUNK_PUBLIC_FOLIO_SANITY_API_VERSION")),
        GALLERY_MODE_KEY => option_env!("FOLIO_GALLERY_MODE")
            .or(option_env!("TRUNK_PUBLIC_FOLIO_GALLERY_MODE")),
        _ => None,
    }
}

/// Site settings baked in at build time. Invalid values are logged and
/// replaced by defaults.
pub(crate) fn load_site_config() -> SiteConfig {
    let (config, errors) = SiteConfig::from_lookup(|key| build_env(key).map(str::to_string));
    for err in errors {
        gloo::console::warn!(format!("config: {err}"));
    }
    config
}
