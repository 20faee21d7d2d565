//! Rust client for the Streaming Availability API
//!
//! Thin typed bindings to the RapidAPI-hosted Streaming Availability service,
//! limited to what a "trending shows" backend needs: the top series of one
//! streaming catalog, ranked over a popularity window.
//!
//! # Example
//!
//! ```no_run
//! use streaming_availability::{StreamingClient, Timeframe};
//!
//! # async fn example() -> Result<(), streaming_availability::StreamingError> {
//! let client = StreamingClient::new("my-rapidapi-key")?;
//!
//! let shows = client.top_shows("netflix", Timeframe::Week).await?;
//! for show in shows {
//!     println!("{}", show["title"]);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - `GET /shows/search/filters` - Search series by catalog, ordered by popularity

mod client;
mod error;
mod types;

pub use client::StreamingClient;
pub use error::{Result, StreamingError};
pub use types::{SearchResponse, Show, Timeframe, UnknownTimeframe};
