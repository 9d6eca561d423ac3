//! # Search workflow: filter, sort and page axes over the remote catalog
//!
//! [`SearchWorkflow`] keeps three independent axes consistent with the result
//! page on screen:
//!
//! | Axis | Default | Changed by |
//! |------|---------|------------|
//! | Filter ([`SearchFilter`]) | every breed, no age or zip limit | [`select_breed`](SearchWorkflow::select_breed), [`set_age_range`](SearchWorkflow::set_age_range), [`set_zip_codes`](SearchWorkflow::set_zip_codes) |
//! | Sort ([`SortKey`]) | `breed:asc` | [`set_sort`](SearchWorkflow::set_sort) |
//! | Page (1-based) | 1 | [`next_page`](SearchWorkflow::next_page), [`prev_page`](SearchWorkflow::prev_page) |
//!
//! Any filter or sort change resets the page to 1 before the query is built.
//! Page moves past either end return `None` and send nothing.
//!
//! ## Fetch lifecycle
//!
//! Every transition returns a [`FetchTicket`]: a query plus a token that is
//! strictly greater than every token issued before it. The caller runs
//! [`fetch_page`] for the ticket's query (with no borrow of the workflow held
//! across the await) and hands the outcome back to
//! [`complete`](SearchWorkflow::complete). Completions carrying anything but the
//! latest token are discarded, so a slow response can never overwrite a newer
//! one. [`run`](SearchWorkflow::run) does both steps in sequence for callers
//! that own the workflow outright.
//!
//! [`fetch_page`] is a two-step pipeline: search for the id window, then fetch
//! those records by id and put them back into the window's order. An empty
//! window skips the by-id fetch.

use std::collections::HashMap;

use tracing::{debug, error, warn};

use crate::config::SearchConfig;
use crate::error::CatalogError;
use crate::gateway::DogCatalog;
use crate::models::{Dog, SearchQuery, SortKey};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// The filter axis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// `None` means every breed.
    pub breed: Option<String>,
    pub zip_codes: Vec<String>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum FetchStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(CatalogError),
}

/// A search the caller should run, stamped with its issue order.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchTicket {
    token: u64,
    query: SearchQuery,
}

impl FetchTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

/// One materialized result page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchPage {
    /// In search-result order
    pub dogs: Vec<Dog>,
    /// Matches across all pages
    pub total: u64,
}

/// What [`SearchWorkflow::complete`] did with an outcome.
#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    Applied,
    /// A newer fetch was issued after this one.
    Discarded,
    /// The reported total left the current page out of range. The page was
    /// moved to the last one and this ticket fetches it.
    Clamped(FetchTicket),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchWorkflow {
    filter: SearchFilter,
    sort: SortKey,
    page: u32,
    page_size: u32,
    total: u64,
    dogs: Vec<Dog>,
    status: FetchStatus,
    latest_token: u64,
}

impl Default for SearchWorkflow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl SearchWorkflow {
    pub fn new(page_size: u32) -> Self {
        Self {
            filter: SearchFilter::default(),
            sort: SortKey::default(),
            page: 1,
            page_size: page_size.max(1),
            total: 0,
            dogs: Vec::new(),
            status: FetchStatus::Idle,
            latest_token: 0,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.page_size).with_sort(config.default_sort)
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Current 1-based page.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Dogs on the current page, in search-result order.
    pub fn dogs(&self) -> &[Dog] {
        &self.dogs
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.page_size)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// The query for the current axes.
    pub fn query(&self) -> SearchQuery {
        SearchQuery {
            breeds: self.filter.breed.iter().cloned().collect(),
            zip_codes: self.filter.zip_codes.clone(),
            age_min: self.filter.age_min,
            age_max: self.filter.age_max,
            size: self.page_size,
            from: (self.page - 1).saturating_mul(self.page_size),
            sort: self.sort,
        }
    }

    /// Re-fetch the current page without touching any axis.
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    /// Filter by one breed; `None` or an empty name clears the filter.
    pub fn select_breed(&mut self, breed: Option<String>) -> FetchTicket {
        self.filter.breed = breed.filter(|b| !b.is_empty());
        self.restart()
    }

    pub fn set_age_range(&mut self, age_min: Option<u32>, age_max: Option<u32>) -> FetchTicket {
        self.filter.age_min = age_min;
        self.filter.age_max = age_max;
        self.restart()
    }

    pub fn set_zip_codes(&mut self, zip_codes: Vec<String>) -> FetchTicket {
        self.filter.zip_codes = zip_codes;
        self.restart()
    }

    pub fn set_sort(&mut self, sort: SortKey) -> FetchTicket {
        self.sort = sort;
        self.restart()
    }

    /// Advance one page. `None` on the last page.
    pub fn next_page(&mut self) -> Option<FetchTicket> {
        if !self.has_next() {
            return None;
        }
        self.page += 1;
        Some(self.issue())
    }

    /// Go back one page. `None` on the first page.
    pub fn prev_page(&mut self) -> Option<FetchTicket> {
        if !self.has_prev() {
            return None;
        }
        self.page -= 1;
        Some(self.issue())
    }

    /// Back to page 1 for a new result set. Its size is unknown until the
    /// fetch completes, so paging stays pinned to page 1 meanwhile.
    fn restart(&mut self) -> FetchTicket {
        self.page = 1;
        self.total = 0;
        self.issue()
    }

    fn issue(&mut self) -> FetchTicket {
        self.latest_token += 1;
        self.status = FetchStatus::Loading;
        let query = self.query();
        debug!(
            "Search #{} page {} (from {}, size {}, sort {})",
            self.latest_token, self.page, query.from, query.size, query.sort
        );
        FetchTicket {
            token: self.latest_token,
            query,
        }
    }

    /// Apply the outcome of the fetch issued with `token`.
    pub fn complete(
        &mut self,
        token: u64,
        outcome: Result<SearchPage, CatalogError>,
    ) -> Completion {
        if token != self.latest_token {
            warn!(
                "Discarding stale search response #{} (latest is #{})",
                token, self.latest_token
            );
            return Completion::Discarded;
        }

        match outcome {
            Ok(page) => {
                self.total = page.total;
                self.dogs = page.dogs;
                let last = self.total_pages();
                if self.page > last {
                    self.page = last;
                    return Completion::Clamped(self.issue());
                }
                self.status = FetchStatus::Ready;
            }
            Err(e) => {
                error!("Search failed: {}", e);
                self.dogs.clear();
                self.status = FetchStatus::Failed(e);
            }
        }
        Completion::Applied
    }

    /// Run `ticket` against `catalog` and apply the result, following any
    /// clamped re-fetch.
    pub async fn run<C: DogCatalog>(&mut self, catalog: &C, ticket: FetchTicket) -> Completion {
        let mut ticket = ticket;
        loop {
            let outcome = fetch_page(catalog, ticket.query()).await;
            match self.complete(ticket.token(), outcome) {
                Completion::Clamped(next) => ticket = next,
                other => return other,
            }
        }
    }
}

/// `ceil(total / page_size)`, never less than 1.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    let pages = total.div_ceil(size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Search, then fetch the window's records by id.
pub async fn fetch_page<C: DogCatalog>(
    catalog: &C,
    query: &SearchQuery,
) -> Result<SearchPage, CatalogError> {
    let results = catalog.search(query).await?;
    if results.result_ids.is_empty() {
        return Ok(SearchPage {
            dogs: Vec::new(),
            total: results.total,
        });
    }

    let dogs = catalog.fetch_dogs(&results.result_ids).await?;
    Ok(SearchPage {
        dogs: order_by_ids(&results.result_ids, dogs),
        total: results.total,
    })
}

/// Arrange `dogs` in `ids` order. Ids without a record are dropped.
fn order_by_ids(ids: &[String], dogs: Vec<Dog>) -> Vec<Dog> {
    let mut by_id: HashMap<String, Dog> = dogs.into_iter().map(|d| (d.id.clone(), d)).collect();
    ids.iter()
        .filter_map(|id| {
            let dog = by_id.remove(id);
            if dog.is_none() {
                warn!("Search returned {} but the by-id fetch did not", id);
            }
            dog
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Operation;
    use crate::memory::tests::dog;
    use crate::memory::{Call, MemoryCatalog};
    use crate::models::{SortDirection, SortField};

    fn poodles_and_friends() -> MemoryCatalog {
        MemoryCatalog::with_dogs([
            dog("d2", "Bella", "Poodle", 2),
            dog("b1", "Ace", "Beagle", 5),
            dog("d1", "Rex", "Poodle", 3),
        ])
    }

    fn ids(workflow: &SearchWorkflow) -> Vec<&str> {
        workflow.dogs().iter().map(|d| d.id.as_str()).collect()
    }

    fn numbered_dogs(count: usize) -> MemoryCatalog {
        MemoryCatalog::with_dogs((0..count).map(|i| dog(&format!("{i:03}"), "Dog", "Mutt", 1)))
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_initial_query() {
        let workflow = SearchWorkflow::default();
        let query = workflow.query();
        assert!(query.breeds.is_empty());
        assert_eq!(query.size, 10);
        assert_eq!(query.from, 0);
        assert_eq!(query.sort.to_string(), "breed:asc");
        assert_eq!(workflow.status(), &FetchStatus::Idle);
    }

    #[tokio::test]
    async fn test_breed_filter_fetches_both_records() {
        let catalog = poodles_and_friends();
        let mut workflow = SearchWorkflow::default();

        let ticket = workflow.select_breed(Some("Poodle".to_string()));
        assert_eq!(
            ticket.query(),
            &SearchQuery {
                breeds: vec!["Poodle".to_string()],
                zip_codes: Vec::new(),
                age_min: None,
                age_max: None,
                size: 10,
                from: 0,
                sort: SortKey::default(),
            }
        );

        assert_eq!(workflow.run(&catalog, ticket).await, Completion::Applied);
        assert_eq!(ids(&workflow), vec!["d1", "d2"]);
        assert_eq!(workflow.total(), 2);
        assert_eq!(workflow.total_pages(), 1);
        assert_eq!(workflow.status(), &FetchStatus::Ready);
    }

    #[tokio::test]
    async fn test_empty_window_skips_fetch_by_id() {
        let catalog = poodles_and_friends();
        let mut workflow = SearchWorkflow::default();

        let ticket = workflow.select_breed(Some("Husky".to_string()));
        workflow.run(&catalog, ticket).await;

        assert_eq!(catalog.calls_to(Operation::SearchDogs), 1);
        assert_eq!(catalog.calls_to(Operation::FetchDogs), 0);
        assert!(workflow.dogs().is_empty());
        assert_eq!(workflow.total(), 0);
        assert_eq!(workflow.total_pages(), 1);
    }

    #[tokio::test]
    async fn test_page_keeps_search_order_not_fetch_order() {
        let catalog = poodles_and_friends();
        let mut workflow = SearchWorkflow::default();

        let ticket = workflow.set_sort(SortKey::new(SortField::Name, SortDirection::Desc));
        workflow.run(&catalog, ticket).await;

        // Storage order is d2, b1, d1; name:desc is Rex, Bella, Ace
        assert_eq!(ids(&workflow), vec!["d1", "d2", "b1"]);
        assert_eq!(
            catalog.calls().last(),
            Some(&Call::FetchDogs(vec![
                "d1".to_string(),
                "d2".to_string(),
                "b1".to_string()
            ]))
        );
    }

    #[tokio::test]
    async fn test_filter_and_sort_changes_reset_page() {
        let catalog = numbered_dogs(25);
        let mut workflow = SearchWorkflow::default();
        let ticket = workflow.refresh();
        workflow.run(&catalog, ticket).await;

        let ticket = workflow.next_page().unwrap();
        workflow.run(&catalog, ticket).await;
        let ticket = workflow.next_page().unwrap();
        assert_eq!(ticket.query().from, 20);
        workflow.run(&catalog, ticket).await;
        assert_eq!(workflow.page(), 3);
        assert_eq!(ids(&workflow), vec!["020", "021", "022", "023", "024"]);

        let ticket = workflow.set_sort(SortKey::new(SortField::Breed, SortDirection::Desc));
        assert_eq!(workflow.page(), 1);
        assert_eq!(ticket.query().from, 0);
        workflow.run(&catalog, ticket).await;

        let ticket = workflow.next_page().unwrap();
        workflow.run(&catalog, ticket).await;
        let ticket = workflow.select_breed(Some("Mutt".to_string()));
        assert_eq!(ticket.query().from, 0);
        assert_eq!(workflow.page(), 1);
        workflow.run(&catalog, ticket).await;

        let ticket = workflow.next_page().unwrap();
        workflow.run(&catalog, ticket).await;
        let ticket = workflow.set_age_range(Some(1), None);
        assert_eq!(ticket.query().from, 0);
        assert_eq!(ticket.query().age_min, Some(1));
        workflow.run(&catalog, ticket).await;

        let ticket = workflow.next_page().unwrap();
        workflow.run(&catalog, ticket).await;
        let ticket = workflow.set_zip_codes(vec!["10001".to_string()]);
        assert_eq!(ticket.query().from, 0);
        assert_eq!(ticket.query().zip_codes, vec!["10001".to_string()]);
    }

    #[tokio::test]
    async fn test_next_page_waits_for_the_new_result_set() {
        let catalog = MemoryCatalog::with_dogs(
            (0..30)
                .map(|i| dog(&format!("m{i:02}"), "Dog", "Mutt", 1))
                .chain([dog("p1", "Fifi", "Poodle", 4)]),
        );
        let mut workflow = SearchWorkflow::default();
        let ticket = workflow.refresh();
        workflow.run(&catalog, ticket).await;
        assert_eq!(workflow.total_pages(), 4);
        catalog.clear_calls();

        let ticket = workflow.select_breed(Some("Poodle".to_string()));
        assert!(!workflow.has_next());
        assert!(workflow.next_page().is_none());

        workflow.run(&catalog, ticket).await;
        let froms: Vec<u32> = catalog
            .calls()
            .iter()
            .filter_map(|call| match call {
                Call::Search(query) => Some(query.from),
                _ => None,
            })
            .collect();
        assert_eq!(froms, vec![0]);
        assert_eq!(workflow.page(), 1);
        assert_eq!(workflow.total_pages(), 1);
    }

    #[tokio::test]
    async fn test_prev_and_next_stop_at_the_boundaries() {
        let catalog = numbered_dogs(15);
        let mut workflow = SearchWorkflow::default();
        let ticket = workflow.refresh();
        workflow.run(&catalog, ticket).await;
        catalog.clear_calls();

        assert!(!workflow.has_prev());
        assert!(workflow.prev_page().is_none());
        assert_eq!(workflow.page(), 1);
        assert!(catalog.calls().is_empty());

        let ticket = workflow.next_page().unwrap();
        workflow.run(&catalog, ticket).await;
        assert_eq!(workflow.page(), 2);
        assert!(!workflow.has_next());
        catalog.clear_calls();

        assert!(workflow.next_page().is_none());
        assert_eq!(workflow.page(), 2);
        assert!(catalog.calls().is_empty());

        let ticket = workflow.prev_page().unwrap();
        assert_eq!(ticket.query().from, 0);
    }

    #[tokio::test]
    async fn test_stale_completion_is_discarded() {
        let catalog = poodles_and_friends();
        let mut workflow = SearchWorkflow::default();

        let first = workflow.select_breed(Some("Beagle".to_string()));
        let second = workflow.select_breed(Some("Poodle".to_string()));
        assert!(second.token() > first.token());

        let first_page = fetch_page(&catalog, first.query()).await;
        let second_page = fetch_page(&catalog, second.query()).await;

        // The newer response lands first, then the older one arrives late
        assert_eq!(
            workflow.complete(second.token(), second_page),
            Completion::Applied
        );
        assert_eq!(
            workflow.complete(first.token(), first_page),
            Completion::Discarded
        );
        assert_eq!(ids(&workflow), vec!["d1", "d2"]);
    }

    #[tokio::test]
    async fn test_failed_search_is_visible_and_recoverable() {
        let catalog = poodles_and_friends();
        let mut workflow = SearchWorkflow::default();
        let ticket = workflow.refresh();
        workflow.run(&catalog, ticket).await;
        assert_eq!(workflow.dogs().len(), 3);

        catalog.fail(Operation::FetchDogs, 500);
        let ticket = workflow.refresh();
        workflow.run(&catalog, ticket).await;
        assert_eq!(
            workflow.status(),
            &FetchStatus::Failed(CatalogError::status(Operation::FetchDogs, 500))
        );
        assert!(workflow.dogs().is_empty());

        catalog.recover(Operation::FetchDogs);
        let ticket = workflow.refresh();
        workflow.run(&catalog, ticket).await;
        assert_eq!(workflow.status(), &FetchStatus::Ready);
        assert_eq!(workflow.dogs().len(), 3);
    }

    #[test]
    fn test_shrinking_total_clamps_page() {
        let mut workflow = SearchWorkflow::default();
        let ticket = workflow.refresh();
        workflow.complete(
            ticket.token(),
            Ok(SearchPage {
                dogs: Vec::new(),
                total: 25,
            }),
        );
        workflow.next_page().unwrap();
        let ticket = workflow.next_page().unwrap();
        assert_eq!(workflow.page(), 3);

        let completion = workflow.complete(
            ticket.token(),
            Ok(SearchPage {
                dogs: Vec::new(),
                total: 5,
            }),
        );
        let refetch = match completion {
            Completion::Clamped(ticket) => ticket,
            other => panic!("expected a clamped re-fetch, got {other:?}"),
        };
        assert_eq!(workflow.page(), 1);
        assert_eq!(refetch.query().from, 0);
        assert!(workflow.is_loading());
    }

    #[test]
    fn test_empty_breed_name_clears_filter() {
        let mut workflow = SearchWorkflow::default();
        workflow.select_breed(Some("Poodle".to_string()));
        let ticket = workflow.select_breed(Some(String::new()));
        assert!(workflow.filter().breed.is_none());
        assert!(ticket.query().breeds.is_empty());
    }

    #[test]
    fn test_missing_records_are_dropped() {
        let ordered = order_by_ids(
            &["x".to_string(), "a".to_string(), "b".to_string()],
            vec![dog("b", "B", "Mutt", 1), dog("a", "A", "Mutt", 1)],
        );
        let ids: Vec<&str> = ordered.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
