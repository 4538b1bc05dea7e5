//! Configuration values for hashing.
//!
//! All settings are plain values passed explicitly to a [`crate::Hasher`];
//! there is no process-wide default instance. Field names serialize in
//! camelCase so configurations can be shared with other implementations.

use serde::{Deserialize, Serialize};

use crate::digest::HashAlgorithm;
use crate::errors::HashError;

/// Settings of a [`crate::Hasher`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HashConfig {
    /// Number of base64url characters kept from the digest.
    pub hash_length: usize,
    /// Digest algorithm.
    pub hash_algorithm: HashAlgorithm,
    /// Numeric policy applied to numbers before hashing.
    pub number_config: NumberConfig,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            hash_length: 22,
            hash_algorithm: HashAlgorithm::Sha256,
            number_config: NumberConfig::default(),
        }
    }
}

impl HashConfig {
    /// Creates a validated configuration.
    pub fn new(
        hash_length: usize,
        hash_algorithm: HashAlgorithm,
        number_config: NumberConfig,
    ) -> Result<Self, HashError> {
        let config = Self {
            hash_length,
            hash_algorithm,
            number_config,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a configuration from JSON text. Missing fields
    /// take their default values.
    pub fn from_json(text: &str) -> Result<Self, HashError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that all values are within their valid domain.
    pub fn validate(&self) -> Result<(), HashError> {
        if self.hash_length == 0 {
            return Err(HashError::InvalidConfig(
                "hashLength must be greater than zero".to_string(),
            ));
        }
        self.number_config.validate()
    }
}

/// Precision and range policy for numbers.
///
/// Rounding errors make equal numbers print differently across platforms, so
/// non-integral numbers are only accepted up to `precision` and within
/// `[min_num, max_num]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberConfig {
    /// Smallest decimal step a non-integral number may use.
    pub precision: f64,
    /// Inclusive upper bound for non-integral numbers.
    pub max_num: f64,
    /// Inclusive lower bound for non-integral numbers.
    pub min_num: f64,
    /// Whether range violations are errors. When false they are logged and
    /// the number is accepted.
    pub throw_on_range_error: bool,
}

impl Default for NumberConfig {
    fn default() -> Self {
        let max_num = 1000.0 * 1000.0 * 1000.0;
        Self {
            precision: 0.001,
            max_num,
            min_num: -max_num,
            throw_on_range_error: true,
        }
    }
}

impl NumberConfig {
    /// Creates a validated number policy.
    pub fn new(
        precision: f64,
        min_num: f64,
        max_num: f64,
        throw_on_range_error: bool,
    ) -> Result<Self, HashError> {
        let config = Self {
            precision,
            max_num,
            min_num,
            throw_on_range_error,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that all values are within their valid domain.
    pub fn validate(&self) -> Result<(), HashError> {
        if !self.precision.is_finite() || self.precision <= 0.0 {
            return Err(HashError::InvalidConfig(format!(
                "precision must be a positive finite number, got {}",
                self.precision
            )));
        }
        if self.min_num.is_nan() || self.max_num.is_nan() || self.min_num > self.max_num {
            return Err(HashError::InvalidConfig(format!(
                "minNum ({}) must not exceed maxNum ({})",
                self.min_num, self.max_num
            )));
        }
        Ok(())
    }
}

/// Per-call options for writing hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplyConfig {
    /// Write hashes into the given value instead of a copy. Only consulted by
    /// [`crate::Hasher::apply_with`]; the other entry points fix the mode.
    pub in_place: bool,
    /// Recompute hashes that are already present. When false, objects with
    /// a hash are treated as finalized and not entered.
    pub update_existing_hashes: bool,
    /// Fail when a stored hash differs from the recomputed one instead of
    /// overwriting it, and validate the result afterwards.
    pub throw_on_wrong_hashes: bool,
}

impl Default for ApplyConfig {
    fn default() -> Self {
        Self {
            in_place: false,
            update_existing_hashes: true,
            throw_on_wrong_hashes: true,
        }
    }
}
