use dioxus::prelude::*;

/// Previous / next controls with a "Page X of Y" label.
#[component]
pub fn DogPagination(
    page: u32,
    total_pages: u32,
    on_prev: EventHandler<()>,
    on_next: EventHandler<()>,
) -> Element {
    rsx! {
        nav {
            class: "pagination",
            button {
                disabled: page <= 1,
                onclick: move |_| on_prev.call(()),
                "Previous"
            }
            span { class: "pagination__label", "Page {page} of {total_pages}" }
            button {
                disabled: page >= total_pages,
                onclick: move |_| on_next.call(()),
                "Next"
            }
        }
    }
}
