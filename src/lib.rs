//! Harvests diamond listings from the Blue Nile search grid.
//!
//! The grid only ever returns the first 1000 matches of a query, so results are
//! requested sorted by price and the price of the last diamond on a full page becomes
//! the floor of the next request. See [`collector::Collector`].

pub mod cli;
pub mod collector;
mod error;
mod macros;
pub mod output;
pub mod process;
pub mod query;
pub mod record;
pub mod search;

pub use error::{Error, Result};

/// Most records the search grid returns for a single query.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;
/// The API is rate limited, one request a minute stays under it.
pub const REQUEST_DELAY_SECS: u64 = 60;
/// Sets the session cookies the search API wants to see.
pub const LANDING_URL: &str = "http://www.bluenile.com/";
pub const SEARCH_URL: &str = "http://www.bluenile.com/api/public/diamond-search-grid/v2";
