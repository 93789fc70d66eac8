//! Client for the Polymarket Gamma market-discovery API.
//!
//! Events are Polymarket's recommended unit for market and event discovery;
//! each event owns the markets traded under it. The client issues a single
//! GET per call, transparently unwraps gzip-encoded responses, tolerates
//! unknown fields in the schema, and validates that every event and nested
//! market carries an id before returning.
//!
//! Fetching events by ID:
//!
//! ```no_run
//! use polymarket_gamma::{GammaClient, GammaConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GammaClient::new(GammaConfig::default())?;
//! let response = client.get_events_by_ids(&[2890, 2891, 2892]).await?;
//!
//! for event in &response.events {
//!     println!("Event: {:?}", event.title);
//!     for market in &event.markets {
//!         println!("  Market: {:?}", market.question);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Pagination for discovery:
//!
//! ```no_run
//! # use polymarket_gamma::{GammaClient, GammaConfig};
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! # let client = GammaClient::new(GammaConfig::default())?;
//! // Latest 10 events by id
//! let latest = client.get_events_by_page(0, 10, false).await?;
//!
//! // Oldest 10 events that are still open
//! let open = client.get_active_events_by_page(0, 10, true).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod types;

pub use client::{GammaClient, GammaConfig, GammaError, Transport};
pub use types::*;
