use catalog::SortKey;
use dioxus::prelude::*;

fn parse_age(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

fn age_text(age: Option<u32>) -> String {
    age.map(|a| a.to_string()).unwrap_or_default()
}

/// Comma or whitespace separated zip codes; blanks are dropped.
fn parse_zip_codes(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|z| !z.is_empty())
        .map(str::to_string)
        .collect()
}

/// Breed, age, zip code and sort controls. Every change is reported upwards; the
/// search workflow decides what it means for the current page.
#[component]
pub fn DogSearchFilters(
    breeds: Vec<String>,
    selected_breed: Option<String>,
    sort: SortKey,
    #[props(default)] age_min: Option<u32>,
    #[props(default)] age_max: Option<u32>,
    #[props(default)] zip_codes: Vec<String>,
    #[props(default)] breeds_error: Option<String>,
    on_breed_change: EventHandler<Option<String>>,
    on_sort_change: EventHandler<SortKey>,
    on_age_change: EventHandler<(Option<u32>, Option<u32>)>,
    on_zip_change: EventHandler<Vec<String>>,
) -> Element {
    let selected = selected_breed.unwrap_or_default();
    let zip_text = zip_codes.join(", ");

    rsx! {
        div {
            class: "search-filters",

            label {
                class: "search-filters__field",
                "Filter by breed"
                select {
                    id: "breed-filter",
                    value: "{selected}",
                    onchange: move |evt: FormEvent| {
                        let value = evt.value();
                        on_breed_change.call((!value.is_empty()).then_some(value));
                    },
                    option { value: "", "All Breeds" }
                    for breed in breeds.iter() {
                        option {
                            key: "{breed}",
                            value: "{breed}",
                            selected: *breed == selected,
                            "{breed}"
                        }
                    }
                }
                if let Some(err) = breeds_error {
                    span { class: "search-filters__error", "{err}" }
                }
            }

            label {
                class: "search-filters__field",
                "Sort by"
                select {
                    id: "sort-order",
                    value: "{sort}",
                    onchange: move |evt: FormEvent| match evt.value().parse::<SortKey>() {
                        Ok(key) => on_sort_change.call(key),
                        Err(e) => tracing::warn!("Ignoring unknown sort key: {}", e),
                    },
                    for option_key in SortKey::all() {
                        option {
                            key: "{option_key}",
                            value: "{option_key}",
                            selected: option_key == sort,
                            {option_key.label()}
                        }
                    }
                }
            }

            label {
                class: "search-filters__field search-filters__field--narrow",
                "Min age"
                input {
                    r#type: "number",
                    min: "0",
                    value: age_text(age_min),
                    onchange: move |evt: FormEvent| on_age_change.call((parse_age(&evt.value()), age_max)),
                }
            }

            label {
                class: "search-filters__field search-filters__field--narrow",
                "Max age"
                input {
                    r#type: "number",
                    min: "0",
                    value: age_text(age_max),
                    onchange: move |evt: FormEvent| on_age_change.call((age_min, parse_age(&evt.value()))),
                }
            }

            label {
                class: "search-filters__field",
                "Zip codes"
                input {
                    r#type: "text",
                    placeholder: "e.g. 10001, 10002",
                    value: "{zip_text}",
                    onchange: move |evt: FormEvent| on_zip_change.call(parse_zip_codes(&evt.value())),
                }
            }
        }
    }
}
