//! # API crate: HTTP client for the remote dog service
//!
//! Implements [`catalog::DogCatalog`] over the service's JSON/HTTPS interface.
//! The session credential is an HttpOnly cookie: in the browser every request
//! is sent with `credentials: include`, on native targets the client keeps its
//! own cookie jar.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`HttpCatalog`]: request building, status and transport error mapping, id batching |
//! | [`dto`] | Wire request/response shapes and their conversion to `catalog` models |
//!
//! ## Endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | `login` | POST | `/auth/login` |
//! | `logout` | POST | `/auth/logout` |
//! | `list_breeds` | GET | `/dogs/breeds` |
//! | `search` | GET | `/dogs/search` |
//! | `fetch_dogs` | POST | `/dogs` |
//! | `generate_match` | POST | `/dogs/match` |
//! | `fetch_locations` | POST | `/locations` |
//! | `search_locations` | POST | `/locations/search` |

pub mod client;
pub mod dto;

pub use client::HttpCatalog;
