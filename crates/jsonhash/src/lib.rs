//! Deterministic, content-addressed hashes for JSON documents.
//!
//! Every object in a document receives a `_hash` field holding the digest of
//! its canonical encoding. Nested objects contribute their own `_hash`
//! instead of their content, so the hashes form a Merkle tree over the
//! document and any change to a leaf changes the hashes of all its ancestors.
//!
//! ```rust
//! use jsonhash::{ApplyConfig, Hasher, JsonValue};
//!
//! let hasher = Hasher::default();
//! let json: JsonValue = serde_json::from_str(r#"{"key": "value"}"#)?;
//! let hashed = hasher.apply(&json, &ApplyConfig::default())?;
//! assert_eq!(hashed.hash(), Some("5Dq88zdSRIOcAS-WM_lYYt"));
//!
//! hasher.validate(&hashed)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
#![deny(missing_docs)]

/// Hashing and apply configuration.
pub mod config;
/// Digest algorithms and hash string encoding.
pub mod digest;
/// Canonical string encoding of flattened objects.
pub mod encoder;
/// Error type shared by all operations.
pub mod errors;
/// Bottom-up hashing of JSON trees.
pub mod hasher;
/// Numeric policy checks.
pub mod numbers;
/// Hash validation.
pub mod validator;
/// JSON value model.
pub mod value;

pub use config::{ApplyConfig, HashConfig, NumberConfig};
pub use digest::HashAlgorithm;
pub use errors::HashError;
pub use hasher::Hasher;
pub use value::{JsonObject, JsonValue, HASH_KEY};

/// Writes hashes into `json` with the default configuration, keeping
/// existing hashes.
pub fn hash_in_place(json: &mut JsonValue) -> Result<(), HashError> {
    Hasher::default().apply_in_place_default(json)
}

/// Returns a hashed copy of `json` using the default configuration.
pub fn hashed(json: &JsonValue) -> Result<JsonValue, HashError> {
    Hasher::default().apply(json, &ApplyConfig::default())
}
