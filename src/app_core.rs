use std::rc::{Rc, Weak};

use wasm_bindgen_futures::spawn_local;

use fontpreview_core::{EditorCore, EditorNotice};

use crate::app_config::EditorConfig;
use crate::catalog_loader;
use crate::local_store::{self, AppStore};
use crate::stylesheet::DocumentHead;

pub(crate) type AppCore = EditorCore<AppStore, DocumentHead>;

pub(crate) fn build_app_core(config: &EditorConfig) -> Option<Rc<AppCore>> {
    let head = DocumentHead::current()?;
    let core = AppCore::with_fallback_font(local_store::open_store(), head, &config.fallback_font);
    core.set_reporter(Some(Rc::new(report_notice)));
    Some(core)
}

/// Fetches the catalog once; the result is dropped if the editor is gone.
pub(crate) fn start_catalog_load(core: &Rc<AppCore>, url: String) {
    let core: Weak<AppCore> = Rc::downgrade(core);
    spawn_local(async move {
        gloo::console::log!("catalog: fetching", url.as_str());
        let result = catalog_loader::fetch_catalog(&url).await;
        let Some(core) = core.upgrade() else {
            return;
        };
        match result {
            Ok(catalog) => {
                gloo::console::log!("catalog: loaded families", catalog.families().len() as u32);
                core.install_catalog(catalog);
            }
            Err(err) => {
                gloo::console::error!("catalog: error fetching fonts:", err.to_string());
            }
        }
    });
}

fn report_notice(notice: &EditorNotice) {
    match notice {
        EditorNotice::StyleFallback { .. } | EditorNotice::StyleUnresolved { .. } => {
            gloo::console::warn!("style:", notice.to_string());
        }
        EditorNotice::StyleFailed(_) => {
            gloo::console::error!("style:", notice.to_string());
        }
        EditorNotice::Persisted(_) => {
            gloo::console::warn!("storage:", notice.to_string());
        }
    }
}
