//! Hierarchical configuration with typed option structs.
//!
//! The configuration is a plain data tree: every option lives in a
//! statically defined struct with named fields and documented defaults.
//! Dot-path access (`"cleaners.datetime.output_format"`) is provided only at
//! the boundary, by round-tripping through `serde_json::Value`, so config
//! files and CLI overrides can address leaves without the core giving up
//! static typing.
//!
//! `Config` has no interior mutability and no process-wide singleton:
//! callers construct one (or clone a shared default) and pass it by
//! reference. Cleaners bind a snapshot of their option struct at
//! construction, so an update to a `Config` value is observed by rebuilding
//! the cleaner, and two separate `Config` values are fully isolated.
//! Cross-thread sharing of one mutable `Config` requires the caller's own
//! synchronization.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CleanError, Result};
use crate::options::{
    BatchOptions, CategoricalTransformerOptions, DateTimeCleanerOptions, EmailCleanerOptions,
    NumberCleanerOptions, NumberTransformerOptions, TextCleanerOptions, TextTransformerOptions,
    UrlCleanerOptions,
};

/// Option groups for the five cleaners.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanerConfig {
    pub text: TextCleanerOptions,
    pub number: NumberCleanerOptions,
    pub datetime: DateTimeCleanerOptions,
    pub email: EmailCleanerOptions,
    pub url: UrlCleanerOptions,
}

/// Option groups for the transformers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformerConfig {
    pub text: TextTransformerOptions,
    pub number: NumberTransformerOptions,
    pub categorical: CategoricalTransformerOptions,
}

/// Root configuration tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub cleaners: CleanerConfig,
    pub transformers: TransformerConfig,
    pub batch: BatchOptions,
}

impl Config {
    /// Configuration with every option at its documented default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a leaf (or subtree) by dot-separated path.
    ///
    /// # Errors
    ///
    /// `ConfigPath` when the path does not address a known option.
    pub fn get(&self, path: &str) -> Result<Value> {
        let tree = serde_json::to_value(self)?;
        let mut node = &tree;
        for segment in path.split('.') {
            node = node
                .get(segment)
                .ok_or_else(|| CleanError::config_path(path))?;
        }
        Ok(node.clone())
    }

    /// Overwrite a single leaf by dot-separated path.
    ///
    /// The value must deserialize into the addressed field; unknown paths
    /// and shape mismatches are rejected, leaving the configuration
    /// untouched.
    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        let mut update = value;
        for segment in path.rsplit('.') {
            update = serde_json::json!({ segment: update });
        }
        self.merge(&update)
    }

    /// Recursively merge an object-shaped update into this configuration.
    ///
    /// Nested objects merge key by key; scalar leaves overwrite. Unknown
    /// keys and wrong-shaped leaf values anywhere in the update are
    /// rejected with `ConfigPath` and the configuration is left unchanged.
    pub fn merge(&mut self, update: &Value) -> Result<()> {
        let mut tree = serde_json::to_value(&*self)?;
        merge_value(&mut tree, update, &mut Vec::new())?;
        match serde_json::from_value(tree) {
            Ok(merged) => {
                *self = merged;
                Ok(())
            }
            // Structurally the paths were all known, so some leaf value
            // does not fit its option; report that leaf's path.
            Err(_) => Err(CleanError::config_path(mismatched_leaf(update))),
        }
    }

    /// Restore every option to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Restore the option (or option group) at `path` to its default.
    pub fn reset_path(&mut self, path: &str) -> Result<()> {
        let default_value = Self::default().get(path)?;
        self.set(path, default_value)
    }

    /// Parse a configuration from JSON, treating the document as a partial
    /// override of the defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let update: Value = serde_json::from_str(json)?;
        let mut config = Self::default();
        config.merge(&update)?;
        Ok(config)
    }

    /// Render the full configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a configuration file (JSON, partial overrides allowed).
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Write the full configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

/// Find the dot path of the node in `update` whose value does not
/// deserialize into the option it addresses. Called only after the merged
/// tree as a whole failed to deserialize, so some node must fail alone.
fn mismatched_leaf(update: &Value) -> String {
    fn walk(node: &Value, trail: &mut Vec<String>) -> Option<String> {
        if let Value::Object(map) = node {
            for (key, value) in map {
                trail.push(key.clone());
                if let Some(path) = walk(value, trail) {
                    return Some(path);
                }
                trail.pop();
            }
            if trail.is_empty() {
                return None;
            }
        }
        let path = trail.join(".");
        let mut single = node.clone();
        for segment in trail.iter().rev() {
            let mut object = serde_json::Map::new();
            object.insert(segment.clone(), single);
            single = Value::Object(object);
        }
        let mut tree = serde_json::to_value(Config::default()).ok()?;
        merge_value(&mut tree, &single, &mut Vec::new()).ok()?;
        serde_json::from_value::<Config>(tree).is_err().then_some(path)
    }
    walk(update, &mut Vec::new()).unwrap_or_default()
}

fn merge_value(base: &mut Value, update: &Value, trail: &mut Vec<String>) -> Result<()> {
    match (base, update) {
        (Value::Object(base_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                trail.push(key.clone());
                match base_map.get_mut(key) {
                    Some(slot) => merge_value(slot, value, trail)?,
                    None => return Err(CleanError::config_path(trail.join("."))),
                }
                trail.pop();
            }
            Ok(())
        }
        (slot, value) => {
            *slot = value.clone();
            Ok(())
        }
    }
}
