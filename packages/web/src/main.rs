use catalog::CatalogConfig;
use dioxus::prelude::*;

use ui::{AuthProvider, CatalogProvider, FavoritesProvider};
use views::{Dogs, Login};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Login {},
    #[route("/dogs")]
    Dogs {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const DOGS_TOML: &str = include_str!("../dogs.toml");

fn main() {
    dioxus::launch(App);
}

/// The bundled `dogs.toml`, with the build-time `DOG_API_BASE_URL` override
/// applied on top.
fn app_config() -> CatalogConfig {
    let config = load_config(DOGS_TOML);
    match option_env!("DOG_API_BASE_URL") {
        Some(url) if !url.trim().is_empty() => config.with_base_url(url),
        _ => config,
    }
}

fn load_config(text: &str) -> CatalogConfig {
    CatalogConfig::from_toml(text).unwrap_or_else(|e| {
        tracing::error!("Invalid {}, using defaults: {}", CatalogConfig::filename(), e);
        CatalogConfig::default()
    })
}

#[component]
fn App() -> Element {
    let config = use_hook(app_config);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::DOGS_CSS }

        CatalogProvider {
            config,
            AuthProvider {
                FavoritesProvider {
                    Router::<Route> {}
                }
            }
        }
    }
}

/// Unknown paths go back to the login page.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    tracing::debug!("No route for /{}, redirecting", segments.join("/"));
    let nav = use_navigator();
    nav.replace(Route::Login {});
    rsx! {}
}
