//! HTTP service for keggmap.
//!
//! Accepts two annotated files as a multipart upload and answers with the
//! comparison counts and the `map.txt` contents. Every request is handled
//! independently; the service keeps no state between requests.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{HealthResponse, UploadPair, FIRST_FIELD, SECOND_FIELD};
pub use router::endpoints;
pub use server::KeggmapServer;
