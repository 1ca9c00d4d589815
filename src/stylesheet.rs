use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlHeadElement, HtmlLinkElement};

use fontpreview_core::StylesheetHost;

use crate::local_store::js_err;

pub(crate) const LINK_MARKER_ATTR: &str = "data-font-preview";

/// Appends `<link rel="stylesheet">` elements to `document.head`.
#[derive(Clone)]
pub(crate) struct DocumentHead {
    document: Document,
}

impl DocumentHead {
    pub(crate) fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    fn head(&self) -> Result<HtmlHeadElement, JsValue> {
        self.document
            .head()
            .ok_or_else(|| JsValue::from_str("document has no head"))
    }
}

impl StylesheetHost for DocumentHead {
    type Link = HtmlLinkElement;
    type Error = String;

    fn insert(&self, href: &str) -> Result<HtmlLinkElement, String> {
        let attach = || -> Result<HtmlLinkElement, JsValue> {
            let link: HtmlLinkElement = self.document.create_element("link")?.dyn_into()?;
            link.set_rel("stylesheet");
            link.set_href(href);
            link.set_attribute(LINK_MARKER_ATTR, "")?;
            self.head()?.append_child(&link)?;
            Ok(link)
        };
        attach().map_err(|err| js_err(&err))
    }

    fn remove(&self, link: HtmlLinkElement) {
        link.remove();
    }
}
