//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const DOGS_CSS: Asset = asset!("/assets/dogs.css");

mod service;
pub use service::{use_catalog, use_catalog_config, CatalogProvider};

mod auth;
pub use auth::{use_auth, AuthProvider, LogoutButton};

mod favorites;
pub use favorites::{use_favorites, FavoritesProvider};

mod login_form;
pub use login_form::LoginForm;

mod dog_card;
pub use dog_card::DogCard;

mod search_filters;
pub use search_filters::DogSearchFilters;

mod pagination;
pub use pagination::DogPagination;

mod favorites_bar;
pub use favorites_bar::FavoritesBar;

mod match_modal;
pub use match_modal::MatchResultModal;
