//! Resource clients for the DKC REST API
//!
//! Each client ([`Catalog`], [`News`], [`Content`], [`Delivery`]) wraps a
//! [`RestClient`] that reads the session's headers at send time. Calls that
//! reach the API and get JSON back resolve to an [`ApiResponse`]: the
//! endpoint's model, or one of the two error shapes the API uses. Transport
//! failures, non-JSON bodies and bad arguments are a [`ResourceError`].
//!
//! ```no_run
//! # async fn example(client: dkc_resources::RestClient) -> dkc_resources::Result<()> {
//! use dkc_resources::{ApiResponse, Catalog};
//!
//! let catalog = Catalog::new(client);
//! match catalog.get_material("1200").await? {
//!     ApiResponse::Success(found) => println!("{}", found.material.name),
//!     other => println!("API error: {:?}", other.error_message()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod content;
pub mod delivery;
pub mod error;
mod lenient;
pub mod models;
pub mod news;
pub mod response;

pub use catalog::{Catalog, StockQuery};
pub use client::RestClient;
pub use content::Content;
pub use delivery::Delivery;
pub use error::{ResourceError, Result};
pub use news::{News, Page};
pub use response::{ApiResponse, ResponseError, ResponseErrorAlternative};
