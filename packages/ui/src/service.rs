//! Catalog client context.

use api::HttpCatalog;
use catalog::CatalogConfig;
use dioxus::prelude::*;

/// The shared HTTP client. Wrapped in a signal so handlers can capture it by copy.
pub fn use_catalog() -> Signal<HttpCatalog> {
    try_use_context::<Option<Signal<HttpCatalog>>>()
        .flatten()
        .expect("use_catalog must be called inside a CatalogProvider")
}

pub fn use_catalog_config() -> CatalogConfig {
    try_use_context::<CatalogConfig>()
        .expect("use_catalog_config must be called inside a CatalogProvider")
}

/// Builds the HTTP client for `config` and provides it, with the config, to
/// every descendant.
#[component]
pub fn CatalogProvider(config: CatalogConfig, children: Element) -> Element {
    let client = use_hook(|| match HttpCatalog::new(&config.api) {
        Ok(client) => Some(Signal::new(client)),
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            None
        }
    });
    use_context_provider(|| config.clone());
    use_context_provider(|| client);

    if client.is_none() {
        return rsx! {
            div {
                class: "fatal",
                "The dog service client could not be started."
            }
        };
    }

    rsx! {
        {children}
    }
}
