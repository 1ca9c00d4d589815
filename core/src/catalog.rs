use serde_json::{Map, Value};

/// Weight key used when the requested weight has no stylesheet.
pub const FALLBACK_WEIGHT: &str = "400";

const ITALIC_MARKER: &str = "italic";
const REGULAR_SUFFIX: &str = " Regular";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog root must be an object")]
    Root,
    #[error("family {family:?} must map to an object")]
    Family { family: String },
    #[error("stylesheet for {family:?}/{weight:?} must be a string")]
    Url { family: String, weight: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontStyleEntry {
    pub key: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontFamilyEntry {
    pub name: String,
    pub styles: Vec<FontStyleEntry>,
}

impl FontFamilyEntry {
    /// An entry with an empty url counts as missing.
    pub fn url_for(&self, key: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|style| style.key == key)
            .map(|style| style.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

/// Family name -> weight key -> stylesheet url, in presentation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontCatalog {
    families: Vec<FontFamilyEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightOption {
    pub value: String,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedStylesheet<'a> {
    pub url: &'a str,
    pub fallback: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleResolution<'a> {
    /// No family chosen, or the family is not in the catalog.
    Inactive,
    Resolved(ResolvedStylesheet<'a>),
    Unresolved { family: &'a str, weight: &'a str },
}

impl FontCatalog {
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let Value::Object(root) = value else {
            return Err(CatalogError::Root);
        };
        let mut families = Vec::with_capacity(root.len());
        for (name, styles) in ordered_entries(root) {
            let Value::Object(styles) = styles else {
                return Err(CatalogError::Family { family: name });
            };
            let mut entries = Vec::with_capacity(styles.len());
            for (key, url) in ordered_entries(styles) {
                let Value::String(url) = url else {
                    return Err(CatalogError::Url {
                        family: name,
                        weight: key,
                    });
                };
                entries.push(FontStyleEntry { key, url });
            }
            families.push(FontFamilyEntry {
                name,
                styles: entries,
            });
        }
        Ok(Self { families })
    }

    pub fn families(&self) -> &[FontFamilyEntry] {
        &self.families
    }

    pub fn family_names(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(|family| family.name.as_str())
    }

    pub fn family(&self, name: &str) -> Option<&FontFamilyEntry> {
        if name.is_empty() {
            return None;
        }
        self.families.iter().find(|family| family.name == name)
    }

    /// Looks up `weight` under `family`, falling back to the "400" entry.
    pub fn resolve<'a>(&'a self, family: &'a str, weight: &'a str) -> StyleResolution<'a> {
        let Some(entry) = self.family(family) else {
            return StyleResolution::Inactive;
        };
        if let Some(url) = entry.url_for(weight) {
            return StyleResolution::Resolved(ResolvedStylesheet {
                url,
                fallback: false,
            });
        }
        match entry.url_for(FALLBACK_WEIGHT) {
            Some(url) => StyleResolution::Resolved(ResolvedStylesheet {
                url,
                fallback: true,
            }),
            None => StyleResolution::Unresolved { family, weight },
        }
    }

    pub fn weight_options(&self, family: &str) -> Vec<WeightOption> {
        let Some(entry) = self.family(family) else {
            return Vec::new();
        };
        entry
            .styles
            .iter()
            .map(|style| WeightOption {
                value: style.key.clone(),
                label: weight_label(&style.key),
            })
            .collect()
    }
}

pub fn weight_label(key: &str) -> String {
    if key.contains(ITALIC_MARKER) {
        key.to_string()
    } else {
        format!("{key}{REGULAR_SUFFIX}")
    }
}

// Integer-like keys come first in ascending order, the rest keep document order.
fn ordered_entries(map: Map<String, Value>) -> Vec<(String, Value)> {
    let mut indexed = Vec::new();
    let mut named = Vec::new();
    for (key, value) in map {
        match array_index(&key) {
            Some(index) => indexed.push((index, key, value)),
            None => named.push((key, value)),
        }
    }
    indexed.sort_by_key(|(index, _, _)| *index);
    indexed
        .into_iter()
        .map(|(_, key, value)| (key, value))
        .chain(named)
        .collect()
}

fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    let index = key.parse::<u32>().ok()?;
    (index != u32::MAX).then_some(index)
}
