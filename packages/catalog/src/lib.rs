pub mod config;
pub mod error;
pub mod favorites;
pub mod gateway;
pub mod matching;
pub mod models;
pub mod search;
pub mod session;

mod memory;
pub use memory::{Call, MemoryCatalog};

pub use config::CatalogConfig;
pub use error::{CatalogError, Operation};
pub use favorites::Favorites;
pub use gateway::DogCatalog;
pub use matching::{find_match, MatchState};
pub use models::{
    Credentials, Dog, Location, LocationQuery, LocationResults, SearchQuery, SearchResults,
    SortDirection, SortField, SortKey, User,
};
pub use search::{
    fetch_page, total_pages, Completion, FetchStatus, FetchTicket, SearchFilter, SearchPage,
    SearchWorkflow,
};
pub use session::{authenticate, Session, LOGIN_FAILED_MESSAGE};
