use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{CatalogError, Operation};
use crate::gateway::DogCatalog;
use crate::models::{
    Credentials, Dog, Location, LocationQuery, LocationResults, SearchQuery, SearchResults,
    SortDirection, SortField,
};

const DEFAULT_LOCATION_WINDOW: u32 = 25;

/// One recorded gateway call.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Login(Credentials),
    Logout,
    ListBreeds,
    Search(SearchQuery),
    FetchDogs(Vec<String>),
    GenerateMatch(Vec<String>),
    FetchLocations(Vec<String>),
    SearchLocations(LocationQuery),
}

impl Call {
    pub fn operation(&self) -> Operation {
        match self {
            Call::Login(_) => Operation::Login,
            Call::Logout => Operation::Logout,
            Call::ListBreeds => Operation::ListBreeds,
            Call::Search(_) => Operation::SearchDogs,
            Call::FetchDogs(_) => Operation::FetchDogs,
            Call::GenerateMatch(_) => Operation::GenerateMatch,
            Call::FetchLocations(_) => Operation::FetchLocations,
            Call::SearchLocations(_) => Operation::SearchLocations,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    dogs: Vec<Dog>,
    locations: Vec<Location>,
    match_pick: Option<String>,
    failures: HashMap<Operation, u16>,
    calls: Vec<Call>,
}

/// In-memory DogCatalog for testing and offline demos.
///
/// Search, filtering and windowing behave like the remote service. By-id
/// fetches answer in storage order, not request order. Any operation can be
/// made to fail with a status code, and every call is recorded.
#[derive(Clone, Debug, Default)]
pub struct MemoryCatalog {
    state: Arc<Mutex<State>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dogs(dogs: impl IntoIterator<Item = Dog>) -> Self {
        let catalog = Self::new();
        catalog.lock().dogs.extend(dogs);
        catalog
    }

    pub fn add_locations(&self, locations: impl IntoIterator<Item = Location>) {
        self.lock().locations.extend(locations);
    }

    /// Make `generate_match` pick `id` whenever it is among the candidates.
    pub fn pick_match(&self, id: &str) {
        self.lock().match_pick = Some(id.to_string());
    }

    /// Make every subsequent call to `operation` fail with `status`.
    pub fn fail(&self, operation: Operation, status: u16) {
        self.lock().failures.insert(operation, status);
    }

    pub fn recover(&self, operation: Operation) {
        self.lock().failures.remove(&operation);
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn calls_to(&self, operation: Operation) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.operation() == operation)
            .count()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call, then return the injected failure for it if any.
    fn begin(&self, call: Call) -> Result<MutexGuard<'_, State>, CatalogError> {
        let operation = call.operation();
        let mut state = self.lock();
        state.calls.push(call);
        match state.failures.get(&operation).copied() {
            Some(status) => Err(CatalogError::status(operation, status)),
            None => Ok(state),
        }
    }
}

impl DogCatalog for MemoryCatalog {
    async fn login(&self, credentials: &Credentials) -> Result<(), CatalogError> {
        self.begin(Call::Login(credentials.clone()))?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), CatalogError> {
        self.begin(Call::Logout)?;
        Ok(())
    }

    async fn list_breeds(&self) -> Result<Vec<String>, CatalogError> {
        let state = self.begin(Call::ListBreeds)?;
        let breeds: BTreeSet<&str> = state.dogs.iter().map(|d| d.breed.as_str()).collect();
        Ok(breeds.into_iter().map(str::to_string).collect())
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, CatalogError> {
        let state = self.begin(Call::Search(query.clone()))?;

        let mut matches: Vec<&Dog> = state
            .dogs
            .iter()
            .filter(|d| query.breeds.is_empty() || query.breeds.contains(&d.breed))
            .filter(|d| query.zip_codes.is_empty() || query.zip_codes.contains(&d.zip_code))
            .filter(|d| query.age_min.map_or(true, |min| d.age >= min))
            .filter(|d| query.age_max.map_or(true, |max| d.age <= max))
            .collect();

        matches.sort_by(|a, b| {
            let ord = match query.sort.field {
                SortField::Breed => a.breed.cmp(&b.breed),
                SortField::Name => a.name.cmp(&b.name),
                SortField::Age => a.age.cmp(&b.age),
            };
            let ord = match query.sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            match ord {
                Ordering::Equal => a.id.cmp(&b.id),
                other => other,
            }
        });

        let total = matches.len();
        let from = query.from as usize;
        let size = query.size as usize;
        let result_ids = matches
            .iter()
            .skip(from)
            .take(size)
            .map(|d| d.id.clone())
            .collect();

        let next = (from + size < total)
            .then(|| format!("/dogs/search?size={}&from={}", size, from + size));
        let prev = (from > 0)
            .then(|| format!("/dogs/search?size={}&from={}", size, from.saturating_sub(size)));

        Ok(SearchResults {
            result_ids,
            total: total as u64,
            next,
            prev,
        })
    }

    async fn fetch_dogs(&self, ids: &[String]) -> Result<Vec<Dog>, CatalogError> {
        let state = self.begin(Call::FetchDogs(ids.to_vec()))?;
        Ok(state
            .dogs
            .iter()
            .filter(|d| ids.contains(&d.id))
            .cloned()
            .collect())
    }

    async fn generate_match(&self, ids: &[String]) -> Result<String, CatalogError> {
        let state = self.begin(Call::GenerateMatch(ids.to_vec()))?;
        if let Some(pick) = state.match_pick.as_ref().filter(|p| ids.contains(p)) {
            return Ok(pick.clone());
        }
        ids.first()
            .cloned()
            .ok_or_else(|| CatalogError::status(Operation::GenerateMatch, 400))
    }

    async fn fetch_locations(&self, zip_codes: &[String]) -> Result<Vec<Location>, CatalogError> {
        let state = self.begin(Call::FetchLocations(zip_codes.to_vec()))?;
        Ok(state
            .locations
            .iter()
            .filter(|l| zip_codes.contains(&l.zip_code))
            .cloned()
            .collect())
    }

    async fn search_locations(&self, query: &LocationQuery) -> Result<LocationResults, CatalogError> {
        let state = self.begin(Call::SearchLocations(query.clone()))?;

        let matches: Vec<&Location> = state
            .locations
            .iter()
            .filter(|l| {
                query
                    .city
                    .as_ref()
                    .map_or(true, |city| l.city.eq_ignore_ascii_case(city))
            })
            .filter(|l| query.states.is_empty() || query.states.contains(&l.state))
            .filter(|l| match &query.geo_bounding_box {
                Some(bbox) => {
                    bbox.top.map_or(true, |top| l.latitude <= top)
                        && bbox.bottom.map_or(true, |bottom| l.latitude >= bottom)
                        && bbox.left.map_or(true, |left| l.longitude >= left)
                        && bbox.right.map_or(true, |right| l.longitude <= right)
                }
                None => true,
            })
            .collect();

        let from = query.from.unwrap_or(0) as usize;
        let size = query.size.unwrap_or(DEFAULT_LOCATION_WINDOW) as usize;
        Ok(LocationResults {
            total: matches.len() as u64,
            results: matches.into_iter().skip(from).take(size).cloned().collect(),
        })
    }
}
