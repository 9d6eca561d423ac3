//! # Domain models for the dog catalog
//!
//! Plain data carried between the gateway, the workflow controller and the UI.
//! Records returned by the remote service ([`Dog`], [`Location`]) derive
//! `Deserialize` with their wire field names so the HTTP client can decode them
//! directly; request shapes ([`SearchQuery`], [`LocationQuery`]) are mapped to
//! the wire by the `api` crate.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | The authenticated actor. The token is empty when the transport carries the credential as a cookie. |
//! | [`Credentials`] | Name and email submitted on the login form. |
//! | [`Dog`] | A catalog record. Immutable once fetched. |
//! | [`SortKey`] | Sort field plus direction, rendered on the wire as `field:dir` (e.g. `"breed:asc"`). |
//! | [`SearchQuery`] | One request to `/dogs/search`: filters plus an offset/limit window. |
//! | [`SearchResults`] | The id window and the total match count across all pages. |
//! | [`Location`], [`LocationQuery`], [`LocationResults`] | Zip-code records and their search envelope. |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identity of the authenticated user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    /// Opaque credential; empty when the session lives in an HttpOnly cookie.
    #[serde(default)]
    pub token: String,
}

/// Login form submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub name: String,
    pub email: String,
}

impl Credentials {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// The user that a successful login with these credentials represents.
    pub fn into_user(self) -> User {
        User {
            name: self.name,
            email: self.email,
            token: String::new(),
        }
    }
}

/// An adoptable dog as returned by `POST /dogs`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub breed: String,
    /// Image URI
    pub img: String,
    pub zip_code: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    #[default]
    Breed,
    Name,
    Age,
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::Breed, SortField::Name, SortField::Age];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Breed => "breed",
            SortField::Name => "name",
            SortField::Age => "age",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort order for a dog search. Defaults to `breed:asc`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Human-readable label for a sort selector.
    pub fn label(self) -> String {
        let field = match self.field {
            SortField::Breed => "Breed",
            SortField::Name => "Name",
            SortField::Age => "Age",
        };
        let arrows = match (self.field, self.direction) {
            (SortField::Age, SortDirection::Asc) => "youngest first",
            (SortField::Age, SortDirection::Desc) => "oldest first",
            (_, SortDirection::Asc) => "A → Z",
            (_, SortDirection::Desc) => "Z → A",
        };
        format!("{field}: {arrows}")
    }

    /// Every field/direction combination, in selector order.
    pub fn all() -> impl Iterator<Item = SortKey> {
        SortField::ALL.into_iter().flat_map(|field| {
            [SortDirection::Asc, SortDirection::Desc]
                .into_iter()
                .map(move |direction| SortKey::new(field, direction))
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field.as_str(), self.direction.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .split_once(':')
            .ok_or_else(|| format!("sort key `{s}` must look like `field:asc|desc`"))?;
        let field = match field {
            "breed" => SortField::Breed,
            "name" => SortField::Name,
            "age" => SortField::Age,
            other => return Err(format!("unknown sort field `{other}`")),
        };
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => return Err(format!("unknown sort direction `{other}`")),
        };
        Ok(Self { field, direction })
    }
}

impl TryFrom<String> for SortKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.to_string()
    }
}

/// Parameters for one `GET /dogs/search` request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    /// OR-ed breed filter. Empty means every breed.
    pub breeds: Vec<String>,
    pub zip_codes: Vec<String>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    /// Window length
    pub size: u32,
    /// Window offset: `(page - 1) * size`
    pub from: u32,
    pub sort: SortKey,
}

/// Response of `GET /dogs/search`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub result_ids: Vec<String>,
    pub total: u64,
    /// Cursor for the following window, as returned by the service.
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// A zip-code location record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub zip_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub state: String,
    pub county: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Either edge coordinates or corner points; the service accepts both forms.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoBoundingBox {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_left: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_left: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_right: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_right: Option<Coordinates>,
}

/// Body of `POST /locations/search`. All fields optional.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocationQuery {
    pub city: Option<String>,
    pub states: Vec<String>,
    pub geo_bounding_box: Option<GeoBoundingBox>,
    pub size: Option<u32>,
    pub from: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocationResults {
    pub results: Vec<Location>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_wire_format() {
        assert_eq!(SortKey::default().to_string(), "breed:asc");
        assert_eq!(
            SortKey::new(SortField::Age, SortDirection::Desc).to_string(),
            "age:desc"
        );
    }

    #[test]
    fn test_sort_key_parse() {
        let key: SortKey = "name:desc".parse().unwrap();
        assert_eq!(key, SortKey::new(SortField::Name, SortDirection::Desc));

        assert!("breed".parse::<SortKey>().is_err());
        assert!("colour:asc".parse::<SortKey>().is_err());
        assert!("breed:up".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_all_covers_each_combination_once() {
        let keys: Vec<SortKey> = SortKey::all().collect();
        assert_eq!(keys.len(), 6);
        assert_eq!(keys[0], SortKey::default());
        assert_eq!(keys[1].to_string(), "breed:desc");
    }

    #[test]
    fn test_dog_decodes_wire_fields() {
        let dog: Dog = serde_json::from_str(
            r#"{"id":"abc123","name":"Rex","age":4,"breed":"Poodle","img":"https://img/rex.jpg","zip_code":"10001"}"#,
        )
        .unwrap();
        assert_eq!(dog.id, "abc123");
        assert_eq!(dog.age, 4);
        assert_eq!(dog.zip_code, "10001");
    }

    #[test]
    fn test_credentials_into_user_has_empty_token() {
        let user = Credentials::new("Ada", "ada@example.com").into_user();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert!(user.token.is_empty());
    }
}
