// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fully resolved option values and the document rendered from them.

use serde_json::{Map, Value};

/// Separator for nesting levels inside an external name.
pub const NESTING_SEPARATOR: &str = "::";

/// Final value of one declared option.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOption {
    pub name: &'static str,
    pub external_name: &'static str,
    /// `None` whenever a raw config is in effect.
    pub value: Option<Value>,
}

/// Output of [`Hipache::resolve`](super::Hipache::resolve).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    options: Vec<ResolvedOption>,
    raw: Option<Map<String, Value>>,
}

impl ResolvedConfig {
    pub(crate) fn new(options: Vec<ResolvedOption>, raw: Option<Map<String, Value>>) -> Self {
        Self { options, raw }
    }

    /// Resolved value of an option by its internal name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.option(name).and_then(|option| option.value.as_ref())
    }

    /// Resolved value of an option by its rendered key.
    pub fn get_external(&self, external_name: &str) -> Option<&Value> {
        self.options
            .iter()
            .find(|option| option.external_name == external_name)
            .and_then(|option| option.value.as_ref())
    }

    pub fn option(&self, name: &str) -> Option<&ResolvedOption> {
        self.options.iter().find(|option| option.name == name)
    }

    /// Resolved options in schema order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedOption> {
        self.options.iter()
    }

    /// The raw mapping, when one overrides the individual options.
    pub fn raw(&self) -> Option<&Map<String, Value>> {
        self.raw.as_ref()
    }

    pub fn is_raw(&self) -> bool {
        self.raw.is_some()
    }

    /// Render the configuration document.
    ///
    /// A raw mapping is emitted verbatim. Otherwise each option is placed
    /// under its external name, with `::` opening a nested object, so
    /// `https::port` becomes `{"https": {"port": ...}}`.
    pub fn to_document(&self) -> Value {
        if let Some(raw) = &self.raw {
            return Value::Object(raw.clone());
        }

        let mut root = Map::new();
        for option in &self.options {
            if let Some(value) = &option.value {
                insert_nested(&mut root, option.external_name, value.clone());
            }
        }
        Value::Object(root)
    }

    /// [`to_document`](Self::to_document), pretty-printed.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_document())
    }
}

fn insert_nested(root: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments = path.split(NESTING_SEPARATOR).peekable();
    let mut current = root;

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), value);
            return;
        }

        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(next) = entry else {
            return;
        };
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolved(name: &'static str, external_name: &'static str, value: Value) -> ResolvedOption {
        ResolvedOption {
            name,
            external_name,
            value: Some(value),
        }
    }

    #[test]
    fn test_flat_and_nested_keys() {
        let config = ResolvedConfig::new(
            vec![
                resolved("workers", "workers", json!(10)),
                resolved("https_port", "https::port", json!(443)),
                resolved("https_key", "https::key", json!("/etc/ssl/ssl.key")),
            ],
            None,
        );

        assert_eq!(
            config.to_document(),
            json!({
                "workers": 10,
                "https": { "port": 443, "key": "/etc/ssl/ssl.key" }
            })
        );
    }

    #[test]
    fn test_raw_document_is_verbatim() {
        let mut raw = Map::new();
        raw.insert("anything".to_string(), json!({ "goes": [1, 2] }));
        let config = ResolvedConfig::new(
            vec![ResolvedOption {
                name: "workers",
                external_name: "workers",
                value: None,
            }],
            Some(raw),
        );

        assert!(config.is_raw());
        assert_eq!(config.get("workers"), None);
        assert_eq!(config.to_document(), json!({ "anything": { "goes": [1, 2] } }));
    }

    #[test]
    fn test_nested_key_replaces_scalar_parent() {
        let config = ResolvedConfig::new(
            vec![
                resolved("a", "https", json!(1)),
                resolved("b", "https::port", json!(443)),
            ],
            None,
        );
        assert_eq!(config.to_document(), json!({ "https": { "port": 443 } }));
    }

    #[test]
    fn test_lookup_by_external_name() {
        let config = ResolvedConfig::new(vec![resolved("http_port", "http::port", json!(80))], None);
        assert_eq!(config.get_external("http::port"), Some(&json!(80)));
        assert_eq!(config.get_external("http_port"), None);
        assert_eq!(config.get("http_port"), Some(&json!(80)));
    }

    #[test]
    fn test_pretty_json() {
        let config = ResolvedConfig::new(vec![resolved("driver", "driver", json!("redis://x"))], None);
        let text = config.to_json_pretty().unwrap();
        assert!(text.contains("\"driver\": \"redis://x\""));
    }
}
