//! Writes `_hash` fields into JSON trees.
//!
//! Objects are hashed bottom-up: every nested object is replaced by its own
//! `_hash` and every array by its flattened form before the parent's
//! canonical string is built and digested.

use std::borrow::Cow;

use crate::config::{ApplyConfig, HashConfig};
use crate::digest::hash_string;
use crate::encoder::json_string;
use crate::errors::HashError;
use crate::value::{stored_hash, JsonObject, JsonValue, HASH_KEY};

/// Computes, writes and validates hashes.
#[derive(Debug, Clone, Default)]
pub struct Hasher {
    config: HashConfig,
}

impl Hasher {
    /// Creates a hasher with the given configuration.
    pub fn new(config: HashConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// Returns a copy of `json` with hashes written into every object.
    ///
    /// The input is left untouched. `apply_config.in_place` is ignored; use
    /// [`Hasher::apply_in_place_with`] to mutate the input.
    pub fn apply(
        &self,
        json: &JsonValue,
        apply_config: &ApplyConfig,
    ) -> Result<JsonValue, HashError> {
        let mut copy = json.clone();
        self.apply_in_place_with(&mut copy, apply_config)?;
        Ok(copy)
    }

    /// Hashes `json` in place or as a copy, depending on
    /// `apply_config.in_place`.
    ///
    /// In place, the result borrows the mutated input; otherwise it owns an
    /// independent copy and `json` is not modified.
    pub fn apply_with<'a>(
        &self,
        json: &'a mut JsonValue,
        apply_config: &ApplyConfig,
    ) -> Result<Cow<'a, JsonValue>, HashError> {
        if apply_config.in_place {
            self.apply_in_place_with(json, apply_config)?;
            Ok(Cow::Borrowed(json))
        } else {
            self.apply(json, apply_config).map(Cow::Owned)
        }
    }

    /// Writes hashes directly into `json`.
    ///
    /// With `update_existing_hashes == false`, objects that already carry a
    /// hash are left alone together with everything below them.
    pub fn apply_in_place(
        &self,
        json: &mut JsonValue,
        update_existing_hashes: bool,
        throw_on_wrong_hashes: bool,
    ) -> Result<(), HashError> {
        let apply_config = ApplyConfig {
            in_place: true,
            update_existing_hashes,
            throw_on_wrong_hashes,
        };
        self.apply_in_place_with(json, &apply_config)
    }

    /// Writes hashes directly into `json`, keeping existing hashes and
    /// failing on wrong ones.
    pub fn apply_in_place_default(&self, json: &mut JsonValue) -> Result<(), HashError> {
        self.apply_in_place(json, false, true)
    }

    /// Writes hashes directly into `json` using the given options.
    ///
    /// If an error occurs, objects visited before the failure keep their new
    /// hashes. Use [`Hasher::apply`] when the input must stay intact.
    pub fn apply_in_place_with(
        &self,
        json: &mut JsonValue,
        apply_config: &ApplyConfig,
    ) -> Result<(), HashError> {
        let map = match &mut *json {
            JsonValue::Object(map) => map,
            other => return Err(HashError::UnsupportedType(other.kind().to_string())),
        };

        tracing::debug!(
            update_existing_hashes = apply_config.update_existing_hashes,
            throw_on_wrong_hashes = apply_config.throw_on_wrong_hashes,
            "applying hashes"
        );
        self.add_hashes_to_object(map, apply_config)?;

        if apply_config.throw_on_wrong_hashes {
            self.validate(json)?;
        }
        Ok(())
    }

    /// Parses JSON text, writes hashes into it and serializes it again.
    pub fn apply_to_json_string(&self, json: &str) -> Result<String, HashError> {
        let mut value: JsonValue = serde_json::from_str(json)?;
        let apply_config = ApplyConfig {
            in_place: true,
            ..ApplyConfig::default()
        };
        self.apply_in_place_with(&mut value, &apply_config)?;
        Ok(serde_json::to_string(&value)?)
    }

    /// Hashes a string, an array or an object.
    ///
    /// Strings are digested directly. Arrays are hashed as the object
    /// `{"array": [...]}`. Objects are hashed as a copy and their root hash
    /// returned.
    pub fn calc_hash(&self, value: &JsonValue) -> Result<String, HashError> {
        match value {
            JsonValue::String(s) => Ok(self.calc_hash_str(s)),
            JsonValue::Array(items) => {
                let mut wrapper = JsonObject::with_capacity(2);
                wrapper.insert("array".to_string(), JsonValue::Array(items.clone()));
                wrapper.insert(HASH_KEY.to_string(), JsonValue::String(String::new()));
                let mut wrapper = JsonValue::Object(wrapper);
                self.apply_in_place_default(&mut wrapper)?;
                root_hash(&wrapper)
            }
            JsonValue::Object(_) => root_hash(&self.apply(value, &ApplyConfig::default())?),
            other => Err(HashError::UnsupportedType(other.kind().to_string())),
        }
    }

    /// Digests a string and returns the truncated base64url encoding.
    pub fn calc_hash_str(&self, value: &str) -> String {
        hash_string(self.config.hash_algorithm, value, self.config.hash_length)
    }

    fn add_hashes_to_object(
        &self,
        obj: &mut JsonObject,
        apply_config: &ApplyConfig,
    ) -> Result<(), HashError> {
        if !apply_config.update_existing_hashes && stored_hash(obj).is_some() {
            return Ok(());
        }

        for (key, value) in obj.iter_mut() {
            if key == HASH_KEY {
                continue;
            }
            match value {
                JsonValue::Object(child) => self.add_hashes_to_object(child, apply_config)?,
                JsonValue::Array(items) => self.process_list(items, apply_config)?,
                _ => {}
            }
        }

        let mut snapshot = JsonObject::with_capacity(obj.len());
        for (key, value) in obj.iter() {
            if key == HASH_KEY {
                continue;
            }
            snapshot.insert(key.clone(), self.flatten_value(value)?);
        }

        let hash = self.calc_hash_str(&json_string(&snapshot));

        if let Some(old) = stored_hash(obj) {
            if old != hash {
                if apply_config.throw_on_wrong_hashes {
                    return Err(HashError::HashMismatch {
                        old: old.to_string(),
                        new: hash,
                    });
                }
                tracing::warn!(old, new = %hash, "overwriting wrong hash");
            }
        }

        tracing::trace!(hash = %hash, "hashed object");
        obj.insert(HASH_KEY.to_string(), JsonValue::String(hash));
        Ok(())
    }

    fn process_list(
        &self,
        items: &mut [JsonValue],
        apply_config: &ApplyConfig,
    ) -> Result<(), HashError> {
        for item in items {
            match item {
                JsonValue::Object(child) => self.add_hashes_to_object(child, apply_config)?,
                JsonValue::Array(nested) => self.process_list(nested, apply_config)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Replaces a child by its hash placeholder; numbers pass the numeric
    /// policy.
    fn flatten_value(&self, value: &JsonValue) -> Result<JsonValue, HashError> {
        Ok(match value {
            JsonValue::Null => JsonValue::Null,
            JsonValue::Object(child) => child.get(HASH_KEY).cloned().unwrap_or_default(),
            JsonValue::Array(items) => JsonValue::Array(
                items
                    .iter()
                    .map(|item| self.flatten_value(item))
                    .collect::<Result<_, _>>()?,
            ),
            JsonValue::Number(n) => JsonValue::Number(self.config.number_config.check(*n)?),
            JsonValue::Bool(_) | JsonValue::String(_) => value.clone(),
        })
    }
}

fn root_hash(json: &JsonValue) -> Result<String, HashError> {
    json.hash()
        .map(str::to_string)
        .ok_or_else(|| HashError::HashMissing {
            path: String::new(),
        })
}
