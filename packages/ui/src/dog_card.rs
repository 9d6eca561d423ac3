use catalog::Dog;
use dioxus::prelude::*;

use crate::icons::FaStar;
use crate::Icon;

/// One dog in the results grid, with its favorite toggle.
#[component]
pub fn DogCard(dog: Dog, is_favorite: bool, on_toggle: EventHandler<String>) -> Element {
    let id = dog.id.clone();
    let card_class = if is_favorite {
        "dog-card dog-card--favorite"
    } else {
        "dog-card"
    };

    rsx! {
        div {
            class: "{card_class}",

            img {
                class: "dog-card__image",
                src: "{dog.img}",
                alt: "{dog.name} the {dog.breed}",
            }

            div {
                class: "dog-card__content",
                h3 { class: "dog-card__name", "{dog.name}" }
                p { class: "dog-card__detail", strong { "Breed: " } "{dog.breed}" }
                p { class: "dog-card__detail", strong { "Age: " } "{dog.age}" }
                p { class: "dog-card__detail", strong { "Zip Code: " } "{dog.zip_code}" }

                button {
                    class: "dog-card__favorite",
                    aria_pressed: "{is_favorite}",
                    onclick: move |_| on_toggle.call(id.clone()),
                    Icon { icon: FaStar, width: 14, height: 14 }
                    if is_favorite { " Unfavorite" } else { " Favorite" }
                }
            }
        }
    }
}
