//! Wire shapes for the remote service.
//!
//! Request DTOs borrow from `catalog` models; response DTOs are decoded from
//! the raw body and converted into those models.

use catalog::models::{GeoBoundingBox, Location, LocationQuery, SearchQuery, SearchResults};
use catalog::{CatalogError, Credentials, Operation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequestDto<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a Credentials> for LoginRequestDto<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            name: &credentials.name,
            email: &credentials.email,
        }
    }
}

/// Response of `GET /dogs/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponseDto {
    pub result_ids: Vec<String>,
    pub total: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

impl From<SearchResponseDto> for SearchResults {
    fn from(dto: SearchResponseDto) -> Self {
        Self {
            result_ids: dto.result_ids,
            total: dto.total,
            next: dto.next,
            prev: dto.prev,
        }
    }
}

/// Response of `POST /dogs/match`.
#[derive(Debug, Deserialize)]
pub struct MatchResponseDto {
    #[serde(rename = "match")]
    pub matched: String,
}

/// Body of `POST /locations/search`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSearchRequestDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<&'a str>,
    #[serde(skip_serializing_if = "no_states")]
    pub states: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_bounding_box: Option<&'a GeoBoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u32>,
}

impl<'a> From<&'a LocationQuery> for LocationSearchRequestDto<'a> {
    fn from(query: &'a LocationQuery) -> Self {
        Self {
            city: query.city.as_deref(),
            states: &query.states,
            geo_bounding_box: query.geo_bounding_box.as_ref(),
            size: query.size,
            from: query.from,
        }
    }
}

fn no_states(states: &&[String]) -> bool {
    states.is_empty()
}

/// Response of `POST /locations/search`.
#[derive(Debug, Deserialize)]
pub struct LocationSearchResponseDto {
    pub results: Vec<Location>,
    pub total: u64,
}

/// Query string for `GET /dogs/search`. List filters repeat their key.
pub fn search_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    params.extend(query.breeds.iter().map(|b| ("breeds", b.clone())));
    params.extend(query.zip_codes.iter().map(|z| ("zipCodes", z.clone())));
    if let Some(min) = query.age_min {
        params.push(("ageMin", min.to_string()));
    }
    if let Some(max) = query.age_max {
        params.push(("ageMax", max.to_string()));
    }
    params.push(("size", query.size.to_string()));
    params.push(("from", query.from.to_string()));
    params.push(("sort", query.sort.to_string()));
    params
}

/// Decode a JSON body, attributing failures to `operation`.
pub fn decode<T: DeserializeOwned>(operation: Operation, body: &[u8]) -> Result<T, CatalogError> {
    serde_json::from_slice(body).map_err(|e| {
        CatalogError::decode(
            operation,
            format!("{e} (body: {})", body_preview(body)),
        )
    })
}

/// `POST /locations` answers `null` for zip codes it does not know.
pub fn decode_locations(body: &[u8]) -> Result<Vec<Location>, CatalogError> {
    let locations: Vec<Option<Location>> = decode(Operation::FetchLocations, body)?;
    Ok(locations.into_iter().flatten().collect())
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
