use catalog::Dog;
use dioxus::prelude::*;

/// Shows the matched dog over the page. Clicking outside the card or on
/// "Close" triggers `on_close`.
#[component]
pub fn MatchResultModal(dog: Dog, on_close: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                h2 { "You've been matched!" }
                img {
                    class: "modal-card__image",
                    src: "{dog.img}",
                    alt: "{dog.name}",
                }
                h3 { "{dog.name}" }
                p { strong { "Breed: " } "{dog.breed}" }
                p { strong { "Age: " } "{dog.age}" }
                p { strong { "Zip Code: " } "{dog.zip_code}" }

                button {
                    class: "primary",
                    onclick: move |_| on_close.call(()),
                    "Close"
                }
            }
        }
    }
}
