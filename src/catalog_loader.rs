use gloo::net::http::Request;

use fontpreview_core::{CatalogError, FontCatalog};

#[derive(Debug, thiserror::Error)]
pub(crate) enum LoadError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: gloo::net::Error,
    },
    #[error("{url} answered {status} {status_text}")]
    Status {
        url: String,
        status: u16,
        status_text: String,
    },
    #[error("{url} is not a font catalog: {source}")]
    Catalog {
        url: String,
        #[source]
        source: CatalogError,
    },
}

pub(crate) async fn fetch_catalog(url: &str) -> Result<FontCatalog, LoadError> {
    let network = |source| LoadError::Network {
        url: url.to_string(),
        source,
    };
    let response = Request::get(url).send().await.map_err(network)?;
    if !response.ok() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: response.status(),
            status_text: response.status_text(),
        });
    }
    let body = response.text().await.map_err(network)?;
    FontCatalog::from_json(&body).map_err(|source| LoadError::Catalog {
        url: url.to_string(),
        source,
    })
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test(async)]
    async fn missing_catalog_reports_status() {
        let url = "/no-such-font-catalog.json";
        match fetch_catalog(url).await {
            Err(LoadError::Status {
                url: failed, status, ..
            }) => {
                assert_eq!(failed, url);
                assert_eq!(status, 404);
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }
}
