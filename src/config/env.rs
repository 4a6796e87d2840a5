// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Environment variable-based configuration provider implementation.
//!
//! `HIPACHE_MAX_SOCKETS=512` becomes key `max_sockets`; a double underscore
//! opens a nesting level, so `HIPACHE_CONFIG__accessLog=/tmp/a.log` is
//! visible both as `config.accessLog` and as part of the `config` mapping.
//! Only the top-level key is lowercased; nested segments keep their case
//! because they end up verbatim in the rendered document.
//!
//! Values are read as JSON where possible. For schema options that accept
//! strings, and for the string attributes below, a value that only parsed
//! into the wrong kind (`HIPACHE_ACCESS_LOG=12345`) is kept as text.

use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::env;

use super::ConfigError;
use super::ConfigProvider;
use crate::resource::{OptionKind, schema};

/// Top-level attributes that are always strings.
const STRING_ATTRIBUTES: &[&str] = &["name", "action", "version", "config_path"];

/// Configuration provider that retrieves values from environment variables.
#[derive(Debug)]
pub struct EnvConfigProvider {
    /// Prefix for environment variables (e.g., "HIPACHE_").
    prefix: String,
    /// Variables matching the prefix, keyed by their dotted config key.
    cache: BTreeMap<String, String>,
}

impl EnvConfigProvider {
    /// Create a provider for variables starting with `prefix`.
    pub fn new(prefix: &str) -> Self {
        let mut provider = Self {
            prefix: prefix.to_string(),
            cache: BTreeMap::new(),
        };
        provider.refresh_cache();
        provider
    }

    /// Re-read the process environment.
    pub fn refresh_cache(&mut self) {
        self.cache.clear();

        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix(&self.prefix) {
                self.cache.insert(Self::config_key(stripped), value);
            }
        }
    }

    /// `CONFIG__accessLog` -> `config.accessLog`.
    fn config_key(stripped: &str) -> String {
        let mut segments = stripped.split("__");
        let top = segments.next().unwrap_or_default().to_lowercase();
        std::iter::once(top)
            .chain(segments.map(str::to_string))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Parse a top-level variable, keeping it as text where the key expects text.
    fn coerce_value(&self, key: &str, raw: &str) -> Value {
        if STRING_ATTRIBUTES.contains(&key) {
            return json!(raw);
        }

        let parsed = self.parse_value_to_json(raw);
        match schema().get(key) {
            Some(spec)
                if !spec.accepts(&parsed)
                    && spec.accepted_kinds.contains(&OptionKind::String) =>
            {
                json!(raw)
            }
            _ => parsed,
        }
    }

    /// Parse a variable into JSON, falling back to a plain string.
    fn parse_value_to_json(&self, value: &str) -> Value {
        if let Ok(json_value) = serde_json::from_str(value) {
            return json_value;
        }

        if value.eq_ignore_ascii_case("true") {
            return json!(true);
        } else if value.eq_ignore_ascii_case("false") {
            return json!(false);
        }

        json!(value)
    }

    fn children<'a>(&'a self, key: &'a str) -> impl Iterator<Item = (&'a str, &'a String)> + 'a {
        self.cache.iter().filter_map(move |(k, v)| {
            k.strip_prefix(key)
                .and_then(|rest| rest.strip_prefix('.'))
                .map(|rest| (rest, v))
        })
    }

    /// Assemble a mapping out of every variable nested below `key`.
    fn collect_children(&self, key: &str) -> Option<Value> {
        let mut root = Map::new();
        'vars: for (path, raw) in self.children(key) {
            let mut segments: Vec<&str> = path.split('.').collect();
            let Some(leaf) = segments.pop() else {
                continue;
            };

            let mut current = &mut root;
            for segment in segments {
                let entry = current
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !entry.is_object() {
                    *entry = Value::Object(Map::new());
                }
                let Some(next) = entry.as_object_mut() else {
                    continue 'vars;
                };
                current = next;
            }
            current.insert(leaf.to_string(), self.parse_value_to_json(raw));
        }

        if root.is_empty() {
            None
        } else {
            Some(Value::Object(root))
        }
    }
}

impl Default for EnvConfigProvider {
    fn default() -> Self {
        Self::new("HIPACHE_")
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_raw(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        match self.cache.get(key) {
            Some(value) => Ok(Some(self.coerce_value(key, value))),
            None => Ok(self.collect_children(key)),
        }
    }

    fn has(&self, key: &str) -> bool {
        self.cache.contains_key(key) || self.children(key).next().is_some()
    }

    fn provider_name(&self) -> &str {
        "env"
    }
}
