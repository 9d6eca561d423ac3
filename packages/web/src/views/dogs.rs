//! Dog search page: filters, results grid, pagination and the match flow.

use api::HttpCatalog;
use catalog::{
    fetch_page, find_match, Completion, DogCatalog, FetchStatus, FetchTicket, MatchState,
    SearchWorkflow, SortKey,
};
use dioxus::prelude::*;
use ui::{
    use_auth, use_catalog, use_catalog_config, use_favorites, DogCard, DogPagination,
    DogSearchFilters, FavoritesBar, LogoutButton, MatchResultModal,
};

use crate::Route;

/// Run `ticket` in the background and apply its outcome, following a
/// clamped re-fetch when the page fell past the end.
fn spawn_search(catalog: Signal<HttpCatalog>, mut workflow: Signal<SearchWorkflow>, ticket: FetchTicket) {
    spawn(async move {
        let client = catalog.peek().clone();
        let mut ticket = ticket;
        loop {
            let outcome = fetch_page(&client, ticket.query()).await;
            let completion = workflow.write().complete(ticket.token(), outcome);
            match completion {
                Completion::Clamped(next) => ticket = next,
                Completion::Applied | Completion::Discarded => break,
            }
        }
    });
}

#[component]
pub fn Dogs() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let catalog = use_catalog();
    let config = use_catalog_config();
    let mut favorites = use_favorites();
    let mut workflow = use_signal(|| SearchWorkflow::from_config(&config.search));
    let mut breeds = use_signal(Vec::<String>::new);
    let mut breeds_error = use_signal(|| None::<String>);
    let mut match_state = use_signal(MatchState::new);

    // Initial load: breed options and the first page
    use_effect(move || {
        if !auth.peek().is_authenticated() {
            return;
        }
        spawn(async move {
            let client = catalog.peek().clone();
            match client.list_breeds().await {
                Ok(list) => breeds.set(list),
                Err(e) => {
                    tracing::error!("Failed to load breeds: {}", e);
                    breeds_error.set(Some(e.user_message().to_string()));
                }
            }
        });
        let ticket = workflow.write().refresh();
        spawn_search(catalog, workflow, ticket);
    });

    if !auth.read().is_authenticated() {
        nav.replace(Route::Login {});
        return rsx! {};
    }

    let on_breed_change = move |breed: Option<String>| {
        let ticket = workflow.write().select_breed(breed);
        spawn_search(catalog, workflow, ticket);
    };
    let on_sort_change = move |sort: SortKey| {
        let ticket = workflow.write().set_sort(sort);
        spawn_search(catalog, workflow, ticket);
    };
    let on_age_change = move |(age_min, age_max): (Option<u32>, Option<u32>)| {
        let ticket = workflow.write().set_age_range(age_min, age_max);
        spawn_search(catalog, workflow, ticket);
    };
    let on_zip_change = move |zip_codes: Vec<String>| {
        let ticket = workflow.write().set_zip_codes(zip_codes);
        spawn_search(catalog, workflow, ticket);
    };
    let on_prev = move |_: ()| {
        let ticket = workflow.write().prev_page();
        if let Some(ticket) = ticket {
            spawn_search(catalog, workflow, ticket);
        }
    };
    let on_next = move |_: ()| {
        let ticket = workflow.write().next_page();
        if let Some(ticket) = ticket {
            spawn_search(catalog, workflow, ticket);
        }
    };
    let on_retry = move |_: MouseEvent| {
        let ticket = workflow.write().refresh();
        spawn_search(catalog, workflow, ticket);
    };
    let on_toggle = move |id: String| {
        favorites.write().toggle(&id);
    };
    let on_generate = move |_: ()| {
        let candidates = match_state.write().begin(&favorites.peek());
        let Some(candidates) = candidates else {
            return;
        };
        spawn(async move {
            let client = catalog.peek().clone();
            let outcome = find_match(&client, &candidates).await;
            match_state.write().complete(outcome, &mut favorites.write());
        });
    };
    let on_close = move |_: ()| match_state.write().dismiss();

    let user_name = auth.read().current().map(|u| u.name.clone());
    let search = workflow.read();
    let faves = favorites.read();
    let matching = match_state.read();

    let results = match search.status() {
        FetchStatus::Loading => rsx! {
            p { class: "search-status", "Loading dogs..." }
        },
        FetchStatus::Failed(e) => rsx! {
            div {
                class: "search-status search-status--error",
                p { "{e.user_message()}" }
                button { onclick: on_retry, "Retry" }
            }
        },
        FetchStatus::Idle | FetchStatus::Ready if search.dogs().is_empty() => rsx! {
            p { class: "search-status", "No dogs match your filters." }
        },
        FetchStatus::Idle | FetchStatus::Ready => rsx! {
            div {
                class: "dog-grid",
                for dog in search.dogs().iter() {
                    DogCard {
                        key: "{dog.id}",
                        dog: dog.clone(),
                        is_favorite: faves.contains(&dog.id),
                        on_toggle: on_toggle,
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "dogs-page",

            header {
                class: "dogs-page__header",
                h1 { "Browse Adoptable Dogs" }
                if let Some(name) = user_name {
                    span { class: "dogs-page__user", "Signed in as {name}" }
                }
                LogoutButton {
                    class: "secondary",
                    on_logout: move |_: ()| {
                        nav.replace(Route::Login {});
                    },
                }
            }

            section {
                class: "dogs-page__section",
                DogSearchFilters {
                    breeds: breeds(),
                    selected_breed: search.filter().breed.clone(),
                    sort: search.sort(),
                    age_min: search.filter().age_min,
                    age_max: search.filter().age_max,
                    zip_codes: search.filter().zip_codes.clone(),
                    breeds_error: breeds_error(),
                    on_breed_change: on_breed_change,
                    on_sort_change: on_sort_change,
                    on_age_change: on_age_change,
                    on_zip_change: on_zip_change,
                }
            }

            {results}

            section {
                class: "dogs-page__section",
                DogPagination {
                    page: search.page(),
                    total_pages: search.total_pages(),
                    on_prev: on_prev,
                    on_next: on_next,
                }
            }

            section {
                class: "dogs-page__section",
                FavoritesBar {
                    count: faves.len(),
                    pending: matching.is_pending(),
                    error: matching.failure().map(|e| e.user_message().to_string()),
                    on_generate: on_generate,
                }
            }

            if let Some(dog) = matching.matched() {
                MatchResultModal {
                    dog: dog.clone(),
                    on_close: on_close,
                }
            }
        }
    }
}
