//! Match generation: turn the favorites set into a single adoptable dog.
//!
//! The flow is split the same way as the search workflow. [`MatchState::begin`]
//! checks the precondition and snapshots the candidates, [`find_match`] does the
//! remote work, and [`MatchState::complete`] applies the outcome. Favorites are
//! cleared only when a match was found.

use tracing::{error, info};

use crate::error::{CatalogError, Operation};
use crate::favorites::Favorites;
use crate::gateway::DogCatalog;
use crate::models::Dog;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchState {
    matched: Option<Dog>,
    failure: Option<CatalogError>,
    pending: bool,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dog most recently matched, until dismissed.
    pub fn matched(&self) -> Option<&Dog> {
        self.matched.as_ref()
    }

    pub fn failure(&self) -> Option<&CatalogError> {
        self.failure.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether the match trigger should be enabled.
    pub fn can_request(&self, favorites: &Favorites) -> bool {
        !self.pending && !favorites.is_empty()
    }

    /// Start a match request, returning the candidate ids to send.
    ///
    /// `None` when there are no favorites or a request is already in flight;
    /// nothing should be sent in that case.
    pub fn begin(&mut self, favorites: &Favorites) -> Option<Vec<String>> {
        if !self.can_request(favorites) {
            return None;
        }
        self.pending = true;
        self.failure = None;
        Some(favorites.members().to_vec())
    }

    /// Apply the outcome of [`find_match`]. Favorites are cleared on success
    /// and left untouched on failure.
    pub fn complete(&mut self, outcome: Result<Dog, CatalogError>, favorites: &mut Favorites) {
        self.pending = false;
        match outcome {
            Ok(dog) => {
                info!("Matched with {} ({})", dog.name, dog.id);
                self.matched = Some(dog);
                self.failure = None;
                favorites.clear();
            }
            Err(e) => {
                error!("Match failed: {}", e);
                self.failure = Some(e);
            }
        }
    }

    /// Close the match result. Favorites and search results are unaffected.
    pub fn dismiss(&mut self) {
        self.matched = None;
    }

    /// Run the whole flow in sequence. Returns `false` if nothing was sent.
    pub async fn request<C: DogCatalog>(&mut self, catalog: &C, favorites: &mut Favorites) -> bool {
        let Some(candidates) = self.begin(favorites) else {
            return false;
        };
        let outcome = find_match(catalog, &candidates).await;
        self.complete(outcome, favorites);
        true
    }
}

/// Ask the service to pick one of `candidates`, then fetch that dog's record.
pub async fn find_match<C: DogCatalog>(
    catalog: &C,
    candidates: &[String],
) -> Result<Dog, CatalogError> {
    if candidates.is_empty() {
        return Err(CatalogError::invalid_request(
            Operation::GenerateMatch,
            "no favorites to match from",
        ));
    }

    let matched_id = catalog.generate_match(candidates).await?;
    let mut dogs = catalog
        .fetch_dogs(std::slice::from_ref(&matched_id))
        .await?;

    match dogs.iter().position(|d| d.id == matched_id) {
        Some(pos) => Ok(dogs.swap_remove(pos)),
        None if !dogs.is_empty() => Ok(dogs.swap_remove(0)),
        None => Err(CatalogError::MissingRecord {
            operation: Operation::FetchDogs,
            id: matched_id,
        }),
    }
}
