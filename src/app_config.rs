use std::cell::RefCell;

use web_sys::UrlSearchParams;

use fontpreview_core::DEFAULT_PREVIEW_FONT;

pub(crate) const DEFAULT_CATALOG_URL: &str = "/fonts_punt.json";

const CATALOG_PARAM: &str = "catalog";
const FALLBACK_FONT_PARAM: &str = "font";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct EditorConfig {
    pub(crate) catalog_url: String,
    pub(crate) fallback_font: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            fallback_font: DEFAULT_PREVIEW_FONT.to_string(),
        }
    }
}

impl EditorConfig {
    fn with_overrides(catalog_url: Option<String>, fallback_font: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = non_empty(catalog_url) {
            config.catalog_url = url;
        }
        if let Some(font) = non_empty(fallback_font) {
            config.fallback_font = font;
        }
        config
    }
}

thread_local! {
    static EDITOR_CONFIG: RefCell<Option<EditorConfig>> = RefCell::new(None);
}

pub(crate) fn editor_config() -> EditorConfig {
    EDITOR_CONFIG.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(load_editor_config)
            .clone()
    })
}

fn load_editor_config() -> EditorConfig {
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    parse_query(&search).unwrap_or_default()
}

fn parse_query(search: &str) -> Option<EditorConfig> {
    let search = search.trim();
    if search.is_empty() {
        return None;
    }
    let params = UrlSearchParams::new_with_str(search).ok()?;
    Some(EditorConfig::with_overrides(
        params.get(CATALOG_PARAM),
        params.get(FALLBACK_FONT_PARAM),
    ))
}

fn non_empty(value: Option<String>) -> Option<String> {
    let value = value?.trim().to_string();
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_ignore_blank_values() {
        let config = EditorConfig::with_overrides(Some("  ".into()), None);
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn overrides_replace_defaults() {
        let config =
            EditorConfig::with_overrides(Some("/static/fonts.json".into()), Some("Georgia".into()));
        assert_eq!(config.catalog_url, "/static/fonts.json");
        assert_eq!(config.fallback_font, "Georgia");
    }
}
