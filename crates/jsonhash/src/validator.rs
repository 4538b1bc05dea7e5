//! Checks hashes stored in a tree against recomputed ones.

use std::fmt;

use crate::config::ApplyConfig;
use crate::errors::HashError;
use crate::hasher::Hasher;
use crate::value::{stored_hash, JsonObject, JsonValue, HASH_KEY};

/// Location of an object inside the validated tree.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(index.to_string());
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl Hasher {
    /// Fails if any object in `json` lacks a hash or carries a wrong one.
    ///
    /// Returns `json` unchanged on success.
    pub fn validate<'a>(&self, json: &'a JsonValue) -> Result<&'a JsonValue, HashError> {
        self.validate_with(json, false)
    }

    /// Like [`Hasher::validate`]; with `ignore_missing_hashes` objects
    /// without a hash are skipped, but their children are still checked.
    ///
    /// The first problem found is reported, visiting parents before children
    /// and fields in their stored order.
    pub fn validate_with<'a>(
        &self,
        json: &'a JsonValue,
        ignore_missing_hashes: bool,
    ) -> Result<&'a JsonValue, HashError> {
        let apply_config = ApplyConfig {
            in_place: false,
            update_existing_hashes: true,
            throw_on_wrong_hashes: false,
        };
        let expected = self.apply(json, &apply_config)?;

        if let (JsonValue::Object(actual), JsonValue::Object(expected)) = (json, &expected) {
            tracing::debug!(ignore_missing_hashes, "validating hashes");
            compare(actual, Some(expected), &Path::root(), ignore_missing_hashes)?;
        }
        Ok(json)
    }
}

fn compare(
    actual: &JsonObject,
    expected: Option<&JsonObject>,
    path: &Path,
    ignore_missing_hashes: bool,
) -> Result<(), HashError> {
    let expected_hash = expected.and_then(stored_hash).unwrap_or_default();

    match stored_hash(actual) {
        None if !ignore_missing_hashes => {
            return Err(HashError::HashMissing {
                path: path.to_string(),
            });
        }
        Some(actual_hash) if actual_hash != expected_hash => {
            return Err(HashError::HashWrong {
                path: path.to_string(),
                actual: actual_hash.to_string(),
                expected: expected_hash.to_string(),
            });
        }
        _ => {}
    }

    for (key, value) in actual {
        if key == HASH_KEY {
            continue;
        }
        let expected_child = expected.and_then(|map| map.get(key));
        match value {
            JsonValue::Object(child) => {
                compare(
                    child,
                    expected_child.and_then(JsonValue::as_object),
                    &path.push_field(key),
                    ignore_missing_hashes,
                )?;
            }
            JsonValue::Array(items) => {
                let expected_items = expected_child.and_then(JsonValue::as_array);
                for (index, item) in items.iter().enumerate() {
                    if let JsonValue::Object(child) = item {
                        compare(
                            child,
                            expected_items
                                .and_then(|list| list.get(index))
                                .and_then(JsonValue::as_object),
                            &path.push_field(key).push_index(index),
                            ignore_missing_hashes,
                        )?;
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}
