use std::cell::RefCell;
use std::rc::Rc;

use fontpreview_core::persisted::{FONT_FAMILY_KEY, FONT_WEIGHT_KEY, ITALIC_KEY, TEXT_KEY};
use fontpreview_core::{
    EditorCore, EditorNotice, FontCatalog, KeyValueStore, MemoryStore, Selection, StylesheetHost,
    PERSISTED_KEYS,
};

#[derive(Clone, Default)]
struct Head {
    links: Rc<RefCell<Vec<(u32, String)>>>,
    next_id: Rc<RefCell<u32>>,
}

impl Head {
    fn hrefs(&self) -> Vec<String> {
        self.links.borrow().iter().map(|(_, href)| href.clone()).collect()
    }
}

impl StylesheetHost for Head {
    type Link = u32;
    type Error = String;

    fn insert(&self, href: &str) -> Result<u32, String> {
        let mut next = self.next_id.borrow_mut();
        *next += 1;
        self.links.borrow_mut().push((*next, href.to_string()));
        Ok(*next)
    }

    fn remove(&self, link: u32) {
        self.links.borrow_mut().retain(|(id, _)| *id != link);
    }
}

const CATALOG: &str = r#"{
    "Roboto": {"400": "url1", "700": "url2", "700italic": "url3"},
    "Lato": {"300": "lato-light", "400": "lato-regular"},
    "Mono": {"700": "mono-bold"}
}"#;

fn catalog() -> FontCatalog {
    FontCatalog::from_json(CATALOG).unwrap()
}

fn editor(
    store: Rc<MemoryStore>,
) -> (
    Rc<EditorCore<Rc<MemoryStore>, Head>>,
    Head,
    Rc<RefCell<Vec<String>>>,
) {
    let head = Head::default();
    let core = EditorCore::new(store, head.clone());
    let notices = Rc::new(RefCell::new(Vec::new()));
    let sink = notices.clone();
    core.set_reporter(Some(Rc::new(move |notice: &EditorNotice| {
        sink.borrow_mut().push(notice.to_string());
    })));
    (core, head, notices)
}

#[test]
fn roboto_scenario_falls_back_with_warning() {
    let (core, head, notices) = editor(Rc::new(MemoryStore::new()));
    core.install_catalog(catalog());
    assert!(head.hrefs().is_empty());

    core.set_family("Roboto");
    assert_eq!(head.hrefs(), ["url1"]);
    assert!(notices.borrow().is_empty());

    core.set_weight("700");
    assert_eq!(head.hrefs(), ["url2"]);

    core.set_weight("900");
    assert_eq!(head.hrefs(), ["url1"]);
    assert_eq!(notices.borrow().len(), 1);
    assert!(notices.borrow()[0].contains("900"));
}

#[test]
fn every_weight_resolves_to_its_url() {
    let (core, head, _) = editor(Rc::new(MemoryStore::new()));
    let catalog = catalog();
    core.install_catalog(catalog.clone());
    for family in catalog.families() {
        core.set_family(&family.name);
        for style in &family.styles {
            core.set_weight(&style.key);
            assert_eq!(head.hrefs(), [style.url.clone()]);
        }
    }
}

#[test]
fn unresolved_weight_attaches_nothing() {
    let (core, head, notices) = editor(Rc::new(MemoryStore::new()));
    core.install_catalog(catalog());
    core.set_family("Roboto");
    assert_eq!(head.hrefs().len(), 1);
    core.set_family("Mono");
    assert!(head.hrefs().is_empty());
    assert_eq!(notices.borrow().len(), 1);
    core.set_weight("700");
    assert_eq!(head.hrefs(), ["mono-bold"]);
}

#[test]
fn family_change_resets_weight_and_italic() {
    let (core, _, _) = editor(Rc::new(MemoryStore::new()));
    core.install_catalog(catalog());
    core.set_family("Roboto");
    core.set_weight("700italic");
    assert!(core.set_italic(true));
    core.set_family("Lato");
    let selection = core.selection();
    assert_eq!(selection.weight, "");
    assert!(!selection.italic);
}

#[test]
fn save_then_reload_restores_selection() {
    let store = Rc::new(MemoryStore::new());
    {
        let (core, _, _) = editor(store.clone());
        core.install_catalog(catalog());
        core.set_family("Roboto");
        core.set_weight("700italic");
        core.set_italic(true);
        core.set_text("The quick brown fox");
        core.save().unwrap();
    }
    let (core, head, _) = editor(store);
    core.install_catalog(catalog());
    assert_eq!(
        core.selection(),
        Selection {
            family: "Roboto".into(),
            weight: "700italic".into(),
            italic: true,
            text: "The quick brown fox".into(),
        }
    );
    assert_eq!(head.hrefs(), ["url3"]);
}

#[test]
fn reset_clears_memory_and_storage() {
    let store = Rc::new(MemoryStore::new());
    let (core, head, _) = editor(store.clone());
    core.install_catalog(catalog());
    core.set_family("Lato");
    core.set_weight("300");
    core.set_text("sample");
    core.save().unwrap();
    core.reset().unwrap();
    assert_eq!(core.selection(), Selection::default());
    assert!(head.hrefs().is_empty());
    for key in PERSISTED_KEYS {
        assert_eq!(store.get(key).unwrap(), None);
    }

    core.reset().unwrap();
    assert!(store.is_empty());
}

#[test]
fn storage_is_only_read_when_catalog_arrives() {
    let store = Rc::new(MemoryStore::new());
    store.set(FONT_FAMILY_KEY, "Lato").unwrap();
    store.set(FONT_WEIGHT_KEY, "300").unwrap();
    store.set(ITALIC_KEY, "false").unwrap();
    store.set(TEXT_KEY, "hi").unwrap();
    let (core, head, _) = editor(store);
    assert_eq!(core.selection(), Selection::default());
    core.install_catalog(catalog());
    assert_eq!(core.selection().family, "Lato");
    assert_eq!(head.hrefs(), ["lato-light"]);
}

#[test]
fn weight_options_follow_chosen_family() {
    let (core, _, _) = editor(Rc::new(MemoryStore::new()));
    core.install_catalog(catalog());
    assert!(core.weight_options().is_empty());
    core.set_family("Roboto");
    let labels: Vec<_> = core
        .weight_options()
        .into_iter()
        .map(|option| option.label)
        .collect();
    assert_eq!(labels, ["400 Regular", "700 Regular", "700italic"]);
    assert_eq!(core.family_options(), ["Roboto", "Lato", "Mono"]);
}

#[test]
fn subscribers_hear_mutations_until_dropped() {
    let (core, _, _) = editor(Rc::new(MemoryStore::new()));
    let calls = Rc::new(RefCell::new(0u32));
    let counter = calls.clone();
    let subscription = core.subscribe(Rc::new(move || {
        *counter.borrow_mut() += 1;
    }));
    core.install_catalog(catalog());
    core.set_text("a");
    assert_eq!(*calls.borrow(), 2);
    drop(subscription);
    core.set_text("b");
    assert_eq!(*calls.borrow(), 2);
}

#[test]
fn dropping_editor_removes_stylesheet() {
    let (core, head, _) = editor(Rc::new(MemoryStore::new()));
    core.install_catalog(catalog());
    core.set_family("Roboto");
    assert_eq!(head.hrefs().len(), 1);
    drop(core);
    assert!(head.hrefs().is_empty());
}

#[test]
fn empty_urls_never_reach_the_head() {
    let (core, head, notices) = editor(Rc::new(MemoryStore::new()));
    core.install_catalog(
        FontCatalog::from_json(r#"{"Roboto": {"400": "url1", "700": ""}, "Mono": {"400": ""}}"#)
            .unwrap(),
    );
    core.set_family("Roboto");
    core.set_weight("700");
    assert_eq!(head.hrefs(), ["url1"]);
    assert_eq!(core.active_stylesheet().as_deref(), Some("url1"));

    core.set_family("Mono");
    assert!(head.hrefs().is_empty());
    assert_eq!(core.active_stylesheet(), None);
    assert_eq!(notices.borrow().len(), 2);
}

#[test]
fn preview_style_tracks_selection() {
    let (core, _, _) = editor(Rc::new(MemoryStore::new()));
    core.install_catalog(catalog());
    assert_eq!(core.preview_style().font_family, "Arial");
    core.set_family("Roboto");
    core.set_weight("700italic");
    core.set_italic(true);
    let style = core.preview_style();
    assert_eq!(style.font_family, "Roboto");
    assert_eq!(style.font_weight, "700");
    assert_eq!(style.font_style, "italic");
    assert_eq!(core.snapshot().preview, style);
}
