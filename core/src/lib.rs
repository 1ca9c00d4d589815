pub mod catalog;
pub mod editor;
pub mod persisted;
pub mod preview;
pub mod selection;
pub mod style;

pub use catalog::{
    weight_label, CatalogError, FontCatalog, FontFamilyEntry, FontStyleEntry, ResolvedStylesheet,
    StyleResolution, WeightOption, FALLBACK_WEIGHT,
};
pub use editor::{EditorCore, EditorNotice, EditorSnapshot, EditorSubscription};
pub use persisted::{
    clear_selection, save_selection, KeyValueStore, LoadedSelection, MemoryStore, PersistWarning,
    PersistedSelection, StoreError, PERSISTED_KEYS,
};
pub use preview::{PreviewStyle, DEFAULT_PREVIEW_FONT};
pub use selection::Selection;
pub use style::{StyleApplier, StyleError, StylesheetHost};
