use dioxus::prelude::*;

use crate::icons::FaHeart;
use crate::Icon;

/// Favorites count and the "Generate Match" trigger. The trigger is disabled
/// while a request is in flight or when nothing is favorited.
#[component]
pub fn FavoritesBar(
    count: usize,
    on_generate: EventHandler<()>,
    #[props(default)] pending: bool,
    #[props(default)] error: Option<String>,
) -> Element {
    rsx! {
        div {
            class: "favorites-bar",
            span {
                class: "favorites-bar__count",
                Icon { icon: FaHeart, width: 14, height: 14 }
                " Favorites: {count}"
            }
            button {
                class: "primary",
                disabled: pending || count == 0,
                onclick: move |_| on_generate.call(()),
                if pending { "Matching..." } else { "Generate Match" }
            }
            if let Some(err) = error {
                span { class: "favorites-bar__error", "{err}" }
            }
        }
    }
}
