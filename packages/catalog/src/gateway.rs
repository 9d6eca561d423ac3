//! # Catalog gateway: the seam between the client and the remote dog service
//!
//! [`DogCatalog`] is an async, request/response interface over the remote API.
//! Each method maps to exactly one endpoint, returns an explicit `Result`, and
//! never retries. Implementations:
//!
//! - `api::HttpCatalog`: the real service over HTTP (cookie credential).
//! - [`crate::MemoryCatalog`]: an in-memory catalog that records every call,
//!   for tests and offline demos.
//!
//! The by-id fetch does not promise to preserve request order. Callers that
//! care re-associate records by id (see [`crate::search::fetch_page`]).

use std::future::Future;

use crate::error::CatalogError;
use crate::models::{
    Credentials, Dog, Location, LocationQuery, LocationResults, SearchQuery, SearchResults,
};

/// Async interface to the remote dog catalog.
pub trait DogCatalog {
    /// `POST /auth/login`. On success the transport holds the session credential.
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<(), CatalogError>>;

    /// `POST /auth/logout`
    fn logout(&self) -> impl Future<Output = Result<(), CatalogError>>;

    /// `GET /dogs/breeds`
    fn list_breeds(&self) -> impl Future<Output = Result<Vec<String>, CatalogError>>;

    /// `GET /dogs/search`
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<SearchResults, CatalogError>>;

    /// `POST /dogs`. Result order is unspecified.
    fn fetch_dogs(&self, ids: &[String]) -> impl Future<Output = Result<Vec<Dog>, CatalogError>>;

    /// `POST /dogs/match`. Fails when `ids` is empty.
    fn generate_match(&self, ids: &[String]) -> impl Future<Output = Result<String, CatalogError>>;

    /// `POST /locations`
    fn fetch_locations(
        &self,
        zip_codes: &[String],
    ) -> impl Future<Output = Result<Vec<Location>, CatalogError>>;

    /// `POST /locations/search`
    fn search_locations(
        &self,
        query: &LocationQuery,
    ) -> impl Future<Output = Result<LocationResults, CatalogError>>;
}
