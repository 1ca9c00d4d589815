use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::selection::Selection;

pub const FONT_FAMILY_KEY: &str = "fontFamily";
pub const FONT_WEIGHT_KEY: &str = "fontWeight";
pub const ITALIC_KEY: &str = "italic";
pub const TEXT_KEY: &str = "text";

pub const PERSISTED_KEYS: [&str; 4] = [FONT_FAMILY_KEY, FONT_WEIGHT_KEY, ITALIC_KEY, TEXT_KEY];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage {op} failed for {key:?}: {message}")]
    Backend {
        op: &'static str,
        key: String,
        message: String,
    },
}

/// String key-value storage addressed by fixed keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistWarning {
    #[error("ignoring stored italic value {raw:?}")]
    InvalidItalic { raw: String },
    #[error(transparent)]
    Read(#[from] StoreError),
}

/// Saved fields; `None` means nothing usable was stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersistedSelection {
    pub family: Option<String>,
    pub weight: Option<String>,
    pub italic: Option<bool>,
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadedSelection {
    pub saved: PersistedSelection,
    pub warnings: Vec<PersistWarning>,
}

impl PersistedSelection {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> LoadedSelection {
        let mut warnings = Vec::new();
        let mut read = |key: &str| match store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warnings.push(PersistWarning::Read(err));
                None
            }
        };
        let family = read(FONT_FAMILY_KEY).filter(|value| !value.is_empty());
        let weight = read(FONT_WEIGHT_KEY).filter(|value| !value.is_empty());
        let italic_raw = read(ITALIC_KEY);
        let text = read(TEXT_KEY).filter(|value| !value.is_empty());
        let italic = match italic_raw {
            Some(raw) => match serde_json::from_str::<Option<bool>>(&raw) {
                Ok(value) => value,
                Err(_) => {
                    warnings.push(PersistWarning::InvalidItalic { raw });
                    None
                }
            },
            None => None,
        };
        LoadedSelection {
            saved: Self {
                family,
                weight,
                italic,
                text,
            },
            warnings,
        }
    }
}

pub fn save_selection<S: KeyValueStore + ?Sized>(
    store: &S,
    selection: &Selection,
) -> Result<(), StoreError> {
    let italic = if selection.italic { "true" } else { "false" };
    store.set(FONT_FAMILY_KEY, &selection.family)?;
    store.set(FONT_WEIGHT_KEY, &selection.weight)?;
    store.set(ITALIC_KEY, italic)?;
    store.set(TEXT_KEY, &selection.text)?;
    Ok(())
}

/// Removes every persisted key, attempting all of them before reporting.
pub fn clear_selection<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), StoreError> {
    let mut first_err = None;
    for key in PERSISTED_KEYS {
        if let Err(err) = store.remove(key) {
            if first_err.is_none() {
                first_err = Some(err);
            }
        }
    }
    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
