use std::cell::RefCell;
use std::rc::Rc;

use crate::catalog::{FontCatalog, StyleResolution, WeightOption};
use crate::persisted::{
    clear_selection, save_selection, KeyValueStore, PersistWarning, PersistedSelection, StoreError,
};
use crate::preview::{PreviewStyle, DEFAULT_PREVIEW_FONT};
use crate::selection::Selection;
use crate::style::{StyleApplier, StyleError, StylesheetHost};

pub type EditorSubscriber = Rc<dyn Fn()>;
pub type NoticeReporter = Rc<dyn Fn(&EditorNotice)>;

/// Things worth telling the user about that do not stop the editor.
#[derive(Debug, thiserror::Error)]
pub enum EditorNotice {
    #[error("no {weight:?} stylesheet for {family:?}, using regular {url:?}")]
    StyleFallback {
        family: String,
        weight: String,
        url: String,
    },
    #[error("no stylesheet url for {family:?} {weight:?}")]
    StyleUnresolved { family: String, weight: String },
    #[error(transparent)]
    StyleFailed(#[from] StyleError),
    #[error(transparent)]
    Persisted(#[from] PersistWarning),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub selection: Selection,
    pub families: Vec<String>,
    pub weight_options: Vec<WeightOption>,
    pub preview: PreviewStyle,
}

struct EditorState<H: StylesheetHost> {
    catalog: FontCatalog,
    selection: Selection,
    applier: StyleApplier<H>,
}

/// Catalog, selection, stylesheet and storage behind one handle.
pub struct EditorCore<S: KeyValueStore, H: StylesheetHost> {
    state: RefCell<EditorState<H>>,
    store: S,
    fallback_font: String,
    subscribers: Rc<RefCell<Vec<EditorSubscriber>>>,
    reporter: RefCell<Option<NoticeReporter>>,
}

impl<S: KeyValueStore, H: StylesheetHost> EditorCore<S, H> {
    pub fn new(store: S, host: H) -> Rc<Self> {
        Self::with_fallback_font(store, host, DEFAULT_PREVIEW_FONT)
    }

    pub fn with_fallback_font(store: S, host: H, fallback_font: &str) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(EditorState {
                catalog: FontCatalog::default(),
                selection: Selection::default(),
                applier: StyleApplier::new(host),
            }),
            store,
            fallback_font: fallback_font.to_string(),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            reporter: RefCell::new(None),
        })
    }

    pub fn subscribe(&self, subscriber: EditorSubscriber) -> EditorSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        EditorSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    pub fn set_reporter(&self, reporter: Option<NoticeReporter>) {
        *self.reporter.borrow_mut() = reporter;
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        let state = self.state.borrow();
        EditorSnapshot {
            selection: state.selection.clone(),
            families: state.catalog.family_names().map(str::to_string).collect(),
            weight_options: state.catalog.weight_options(&state.selection.family),
            preview: PreviewStyle::for_selection(&state.selection, &self.fallback_font),
        }
    }

    pub fn selection(&self) -> Selection {
        self.state.borrow().selection.clone()
    }

    pub fn active_stylesheet(&self) -> Option<String> {
        self.state
            .borrow()
            .applier
            .active_href()
            .map(str::to_string)
    }

    pub fn weight_options(&self) -> Vec<WeightOption> {
        let state = self.state.borrow();
        state.catalog.weight_options(&state.selection.family)
    }

    pub fn family_options(&self) -> Vec<String> {
        self.state
            .borrow()
            .catalog
            .family_names()
            .map(str::to_string)
            .collect()
    }

    pub fn preview_style(&self) -> PreviewStyle {
        PreviewStyle::for_selection(&self.state.borrow().selection, &self.fallback_font)
    }

    /// Installs the fetched catalog and restores the saved selection.
    pub fn install_catalog(&self, catalog: FontCatalog) {
        let loaded = PersistedSelection::load(&self.store);
        let mut notices: Vec<EditorNotice> =
            loaded.warnings.into_iter().map(EditorNotice::from).collect();
        {
            let mut state = self.state.borrow_mut();
            state.catalog = catalog;
            state.selection.restore(loaded.saved);
            notices.extend(refresh_style(&mut state));
        }
        self.finish(notices);
    }

    pub fn set_family(&self, family: &str) {
        self.mutate_selection(|selection| selection.set_family(family));
    }

    pub fn set_weight(&self, weight: &str) {
        self.mutate_selection(|selection| selection.set_weight(weight));
    }

    pub fn set_italic(&self, italic: bool) -> bool {
        let applied = self.state.borrow_mut().selection.set_italic(italic);
        if applied {
            self.finish(Vec::new());
        }
        applied
    }

    pub fn set_text(&self, text: &str) {
        self.state.borrow_mut().selection.set_text(text);
        self.finish(Vec::new());
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let selection = self.selection();
        save_selection(&self.store, &selection)
    }

    /// Clears the selection in memory and in storage.
    pub fn reset(&self) -> Result<(), StoreError> {
        self.mutate_selection(Selection::clear);
        clear_selection(&self.store)
    }

    pub fn release_style(&self) {
        self.state.borrow_mut().applier.release();
    }

    fn mutate_selection<F>(&self, mutate: F)
    where
        F: FnOnce(&mut Selection),
    {
        let notices = {
            let mut state = self.state.borrow_mut();
            let before = (state.selection.family.clone(), state.selection.weight.clone());
            mutate(&mut state.selection);
            let changed = before.0 != state.selection.family || before.1 != state.selection.weight;
            if changed {
                refresh_style(&mut state)
            } else {
                Vec::new()
            }
        };
        self.finish(notices);
    }

    fn finish(&self, notices: Vec<EditorNotice>) {
        if !notices.is_empty() {
            let reporter = self.reporter.borrow().clone();
            if let Some(reporter) = reporter {
                for notice in &notices {
                    reporter(notice);
                }
            }
        }
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }
}

fn refresh_style<H: StylesheetHost>(state: &mut EditorState<H>) -> Vec<EditorNotice> {
    let EditorState {
        catalog,
        selection,
        applier,
        ..
    } = state;
    let mut notices = Vec::new();
    let href = match catalog.resolve(&selection.family, &selection.weight) {
        StyleResolution::Inactive => None,
        StyleResolution::Resolved(resolved) => {
            if resolved.fallback && !selection.weight.is_empty() {
                notices.push(EditorNotice::StyleFallback {
                    family: selection.family.clone(),
                    weight: selection.weight.clone(),
                    url: resolved.url.to_string(),
                });
            }
            Some(resolved.url)
        }
        StyleResolution::Unresolved { family, weight } => {
            notices.push(EditorNotice::StyleUnresolved {
                family: family.to_string(),
                weight: weight.to_string(),
            });
            None
        }
    };
    if let Err(err) = applier.apply_style(href) {
        notices.push(EditorNotice::StyleFailed(err));
    }
    notices
}

pub struct EditorSubscription {
    subscriber: EditorSubscriber,
    subscribers: Rc<RefCell<Vec<EditorSubscriber>>>,
}

impl Drop for EditorSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}
