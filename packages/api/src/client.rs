//! Reqwest-backed catalog gateway.
//!
//! This adapter owns transport details only: URL and body construction,
//! credential handling, status and transport error mapping, and decoding into
//! `catalog` models. It never retries.

use catalog::config::ApiConfig;
use catalog::{
    CatalogError, Credentials, Dog, DogCatalog, Location, LocationQuery, LocationResults,
    Operation, SearchQuery, SearchResults,
};
use std::future::Future;

use reqwest::{Client, Method, RequestBuilder};
use tracing::debug;

use crate::dto::{
    decode, decode_locations, search_params, LocationSearchRequestDto, LoginRequestDto,
    LocationSearchResponseDto, MatchResponseDto, SearchResponseDto,
};

/// HTTP client for the remote dog service.
///
/// Cheap to clone; clones share one connection pool and cookie jar.
#[derive(Clone, Debug)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
    max_ids_per_request: usize,
}

impl HttpCatalog {
    /// Build a client for the service described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.cookie_store(true);

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_ids_per_request: config.max_ids_per_request.max(1),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, operation: Operation) -> String {
        format!("{}{}", self.base_url, operation.path())
    }

    fn request(&self, operation: Operation) -> RequestBuilder {
        let method = match operation {
            Operation::ListBreeds | Operation::SearchDogs => Method::GET,
            _ => Method::POST,
        };
        with_credentials(self.client.request(method, self.url(operation)))
    }

    /// Send `builder` and return the body of a successful response.
    async fn send(&self, operation: Operation, builder: RequestBuilder) -> Result<Vec<u8>, CatalogError> {
        debug!("{}", operation);
        let response = builder
            .send()
            .await
            .map_err(|e| map_transport_error(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::status(operation, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| map_transport_error(operation, e))?;
        Ok(body.to_vec())
    }

    async fn fetch_batch(&self, ids: &[String]) -> Result<Vec<Dog>, CatalogError> {
        let builder = self.request(Operation::FetchDogs).json(ids);
        let body = self.send(Operation::FetchDogs, builder).await?;
        decode(Operation::FetchDogs, &body)
    }
}

/// Split `ids` into requests of at most `limit` ids, sent one after another.
/// Records come back concatenated in batch order; the first failed batch
/// fails the whole fetch.
async fn fetch_in_batches<'a, F, Fut>(
    ids: &'a [String],
    limit: usize,
    mut fetch: F,
) -> Result<Vec<Dog>, CatalogError>
where
    F: FnMut(&'a [String]) -> Fut,
    Fut: Future<Output = Result<Vec<Dog>, CatalogError>>,
{
    let mut dogs = Vec::with_capacity(ids.len());
    for batch in ids.chunks(limit.max(1)) {
        dogs.extend(fetch(batch).await?);
    }
    Ok(dogs)
}

impl DogCatalog for HttpCatalog {
    async fn login(&self, credentials: &Credentials) -> Result<(), CatalogError> {
        let builder = self
            .request(Operation::Login)
            .json(&LoginRequestDto::from(credentials));
        // The body is a plain "OK"; only the status and the cookie matter.
        self.send(Operation::Login, builder).await?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), CatalogError> {
        self.send(Operation::Logout, self.request(Operation::Logout))
            .await?;
        Ok(())
    }

    async fn list_breeds(&self) -> Result<Vec<String>, CatalogError> {
        let body = self
            .send(Operation::ListBreeds, self.request(Operation::ListBreeds))
            .await?;
        decode(Operation::ListBreeds, &body)
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, CatalogError> {
        let builder = self
            .request(Operation::SearchDogs)
            .query(&search_params(query));
        let body = self.send(Operation::SearchDogs, builder).await?;
        let dto: SearchResponseDto = decode(Operation::SearchDogs, &body)?;
        Ok(dto.into())
    }

    async fn fetch_dogs(&self, ids: &[String]) -> Result<Vec<Dog>, CatalogError> {
        fetch_in_batches(ids, self.max_ids_per_request, |batch| self.fetch_batch(batch)).await
    }

    async fn generate_match(&self, ids: &[String]) -> Result<String, CatalogError> {
        if ids.is_empty() {
            return Err(CatalogError::invalid_request(
                Operation::GenerateMatch,
                "at least one candidate id is required",
            ));
        }
        let builder = self.request(Operation::GenerateMatch).json(ids);
        let body = self.send(Operation::GenerateMatch, builder).await?;
        let dto: MatchResponseDto = decode(Operation::GenerateMatch, &body)?;
        Ok(dto.matched)
    }

    async fn fetch_locations(&self, zip_codes: &[String]) -> Result<Vec<Location>, CatalogError> {
        if zip_codes.is_empty() {
            return Ok(Vec::new());
        }
        let builder = self.request(Operation::FetchLocations).json(zip_codes);
        let body = self.send(Operation::FetchLocations, builder).await?;
        decode_locations(&body)
    }

    async fn search_locations(&self, query: &LocationQuery) -> Result<LocationResults, CatalogError> {
        let builder = self
            .request(Operation::SearchLocations)
            .json(&LocationSearchRequestDto::from(query));
        let body = self.send(Operation::SearchLocations, builder).await?;
        let dto: LocationSearchResponseDto = decode(Operation::SearchLocations, &body)?;
        Ok(LocationResults {
            results: dto.results,
            total: dto.total,
        })
    }
}

/// Attach the session cookie to cross-origin browser requests.
#[cfg(target_arch = "wasm32")]
fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder
}

fn map_transport_error(operation: Operation, error: reqwest::Error) -> CatalogError {
    if error.is_timeout() {
        CatalogError::transport(operation, format!("timed out: {error}"))
    } else if error.is_decode() {
        CatalogError::decode(operation, error.to_string())
    } else {
        CatalogError::transport(operation, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let catalog = HttpCatalog::new(&ApiConfig {
            base_url: "http://localhost:9000/".to_string(),
            max_ids_per_request: 100,
        })
        .unwrap();
        assert_eq!(catalog.base_url(), "http://localhost:9000");
        assert_eq!(
            catalog.url(Operation::SearchDogs),
            "http://localhost:9000/dogs/search"
        );
        assert_eq!(catalog.url(Operation::FetchDogs), "http://localhost:9000/dogs");
    }

    #[test]
    fn test_batch_size_is_at_least_one() {
        let catalog = HttpCatalog::new(&ApiConfig {
            base_url: "http://localhost:9000".to_string(),
            max_ids_per_request: 0,
        })
        .unwrap();
        assert_eq!(catalog.max_ids_per_request, 1);
    }

    #[test]
    fn test_request_methods_follow_endpoints() {
        let catalog = HttpCatalog::new(&ApiConfig::default()).unwrap();
        for operation in [
            Operation::Login,
            Operation::ListBreeds,
            Operation::SearchDogs,
            Operation::FetchDogs,
            Operation::GenerateMatch,
        ] {
            let request = catalog.request(operation).build().unwrap();
            assert_eq!(request.method().as_str(), operation.endpoint().0);
            assert_eq!(request.url().path(), operation.path());
        }
    }

    #[test]
    fn test_search_query_string() {
        let catalog = HttpCatalog::new(&ApiConfig::default()).unwrap();
        let query = SearchQuery {
            breeds: vec!["Poodle".to_string()],
            zip_codes: Vec::new(),
            age_min: None,
            age_max: None,
            size: 10,
            from: 0,
            sort: Default::default(),
        };
        let request = catalog
            .request(Operation::SearchDogs)
            .query(&search_params(&query))
            .build()
            .unwrap();
        assert_eq!(
            request.url().query(),
            Some("breeds=Poodle&size=10&from=0&sort=breed%3Aasc")
        );
    }

    fn record(id: &str) -> Dog {
        Dog {
            id: id.to_string(),
            name: "Dog".to_string(),
            age: 1,
            breed: "Mutt".to_string(),
            img: String::new(),
            zip_code: "10001".to_string(),
        }
    }

    fn numbered_ids(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("d{i:03}")).collect()
    }

    #[tokio::test]
    async fn test_long_id_lists_are_split_and_concatenated_in_order() {
        let ids = numbered_ids(250);
        let mut batch_sizes = Vec::new();

        let dogs = fetch_in_batches(&ids, 100, |batch| {
            batch_sizes.push(batch.len());
            std::future::ready(Ok(batch.iter().map(|id| record(id)).collect()))
        })
        .await
        .unwrap();

        assert_eq!(batch_sizes, vec![100, 100, 50]);
        let fetched: Vec<&str> = dogs.iter().map(|d| d.id.as_str()).collect();
        let expected: Vec<&str> = ids.iter().map(String::as_str).collect();
        assert_eq!(fetched, expected);
    }

    #[tokio::test]
    async fn test_short_id_list_is_one_request() {
        let ids = numbered_ids(3);
        let mut batches = Vec::new();

        fetch_in_batches(&ids, 100, |batch| {
            batches.push(batch.to_vec());
            std::future::ready(Ok(Vec::new()))
        })
        .await
        .unwrap();

        assert_eq!(batches, vec![ids.clone()]);
    }

    #[tokio::test]
    async fn test_failed_batch_stops_the_fetch() {
        let ids = numbered_ids(5);
        let mut sent = 0;

        let result = fetch_in_batches(&ids, 2, |batch| {
            sent += 1;
            std::future::ready(if sent == 2 {
                Err(CatalogError::status(Operation::FetchDogs, 500))
            } else {
                Ok(batch.iter().map(|id| record(id)).collect())
            })
        })
        .await;

        assert_eq!(result, Err(CatalogError::status(Operation::FetchDogs, 500)));
        assert_eq!(sent, 2);
    }

    #[tokio::test]
    async fn test_empty_match_is_rejected_before_sending() {
        let catalog = HttpCatalog::new(&ApiConfig {
            // Unroutable: the test fails with a transport error if anything is sent
            base_url: "http://127.0.0.1:9".to_string(),
            max_ids_per_request: 100,
        })
        .unwrap();
        let err = catalog.generate_match(&[]).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRequest { .. }));

        assert!(catalog.fetch_locations(&[]).await.unwrap().is_empty());
        assert!(catalog.fetch_dogs(&[]).await.unwrap().is_empty());
    }
}
