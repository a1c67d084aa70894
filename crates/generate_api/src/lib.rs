//! Transport-only client primitives for the hosted generate endpoint.
//!
//! This crate owns request building, header construction, URL normalization,
//! payload (de)serialization, and response extraction for the `/v1/generate`
//! wire contract. It intentionally contains no session state and no rendering
//! coupling, and it never holds an API key as a constant: the key is always
//! injected through [`GenerateApiConfig`].
//!
//! The transport issues exactly one POST per completion. There are no
//! retries and no streaming; callers receive either the first generation's
//! trimmed text or a [`GenerateApiError`] carrying the underlying cause.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod payload;
pub mod url;

pub use client::reply_from_body;
pub use client::GenerateApiClient;
pub use config::GenerateApiConfig;
pub use error::GenerateApiError;
pub use payload::{GenerateRequest, GenerateResponse, Generation};
pub use url::normalize_generate_url;
