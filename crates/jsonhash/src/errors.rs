use thiserror::Error;

use crate::encoder::format_number;

/// Errors raised while hashing or validating a JSON tree.
#[derive(Error, Debug)]
pub enum HashError {
    /// A NaN number was found.
    #[error("NaN is not supported.")]
    NotFinite,
    /// A number carries more decimal places than the configured precision.
    #[error(
        "Number {} has a higher precision than {}.",
        number(.value),
        number(.precision)
    )]
    PrecisionExceeded {
        /// Offending value.
        value: f64,
        /// Configured precision.
        precision: f64,
    },
    /// A number is larger than the configured maximum.
    #[error("Number {} exceeds NumberHashingConfig.maxNum.", number(.value))]
    AboveRange {
        /// Offending value.
        value: f64,
        /// Configured maximum.
        max: f64,
    },
    /// A number is smaller than the configured minimum.
    #[error("Number {} is smaller than NumberHashingConfig.minNum.", number(.value))]
    BelowRange {
        /// Offending value.
        value: f64,
        /// Configured minimum.
        min: f64,
    },
    /// A value is not one of the six JSON kinds, or is not allowed here.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),
    /// An object has no `_hash` during validation.
    #[error("Hash{} is missing.", path_hint(.path))]
    HashMissing {
        /// Path of the object, `""` for the root.
        path: String,
    },
    /// An object's `_hash` differs from the recomputed one during validation.
    #[error("Hash{} \"{actual}\" is wrong. Should be \"{expected}\".", path_hint(.path))]
    HashWrong {
        /// Path of the object, `""` for the root.
        path: String,
        /// Hash found in the tree.
        actual: String,
        /// Hash computed from the content.
        expected: String,
    },
    /// A stored hash disagrees with the one computed while applying hashes.
    #[error(
        "Hash \"{old}\" does not match the newly calculated one \"{new}\". \
         Please make sure that all systems are producing the same hashes."
    )]
    HashMismatch {
        /// Hash that was stored in the object.
        old: String,
        /// Freshly computed hash.
        new: String,
    },
    /// Configuration values are out of their valid domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// JSON text could not be parsed or written.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

fn number(value: &f64) -> String {
    format_number(*value)
}

fn path_hint(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" at {path}")
    }
}
