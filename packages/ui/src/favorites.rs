//! Favorites context.

use catalog::Favorites;
use dioxus::prelude::*;

pub fn use_favorites() -> Signal<Favorites> {
    try_use_context::<Signal<Favorites>>()
        .expect("use_favorites must be called inside a FavoritesProvider")
}

#[component]
pub fn FavoritesProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(Favorites::new()));

    rsx! {
        {children}
    }
}
