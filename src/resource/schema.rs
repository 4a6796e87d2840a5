// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The table of recognized hipache options.
//!
//! Every option the resource exposes is declared here once, with the value
//! kinds it accepts, its default and the key it is rendered under in
//! `hipache.json`.
//!
//! | option | kinds | default | rendered as |
//! |--------|-------|---------|-------------|
//! | `access_log`          | String               | `/var/log/hipache_access.log` | `accessLog`        |
//! | `workers`             | Integer              | `10`                          | `workers`          |
//! | `max_sockets`         | Integer              | `100`                         | `maxSockets`       |
//! | `dead_backend_ttl`    | Integer              | `30`                          | `deadBackendTTL`   |
//! | `tcp_timeout`         | Integer              | `30`                          | `tcpTimeout`       |
//! | `retry_on_error`      | Integer              | `3`                           | `retryOnError`     |
//! | `dead_backend_on_500` | Boolean              | `true`                        | `deadBackendOn500` |
//! | `http_keep_alive`     | Boolean              | `false`                       | `httpkeepAlive`    |
//! | `https_port`          | Integer              | `443`                         | `https::port`      |
//! | `https_bind`          | String, List<String> | `["127.0.0.1", "::1"]`        | `https::bind`      |
//! | `https_key`           | String               | `/etc/ssl/ssl.key`            | `https::key`       |
//! | `https_cert`          | String               | `/etc/ssl/ssl.crt`            | `https::cert`      |
//! | `http_port`           | Integer              | `80`                          | `http::port`       |
//! | `http_bind`           | String, List<String> | `["127.0.0.1", "::1"]`        | `http::bind`       |
//! | `driver`              | String               | `redis://127.0.0.1:6379`      | `driver`           |

use std::fmt;

use once_cell::sync::Lazy;
use serde_json::{Value, json};

use super::ValidationError;

/// The process-wide option table, checked on first access.
pub static SCHEMA: Lazy<OptionSchema> = Lazy::new(|| {
    OptionSchema::new(builtin_options()).expect("built-in hipache option table is self-consistent")
});

/// Shorthand for `&*SCHEMA`.
pub fn schema() -> &'static OptionSchema {
    &SCHEMA
}

/// A kind of value an option may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// A JSON string.
    String,
    /// A whole JSON number; floats do not qualify.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// A JSON array made only of strings.
    StringList,
}

impl OptionKind {
    /// Does `value` belong to this kind?
    pub fn matches(self, value: &Value) -> bool {
        match self {
            OptionKind::String => value.is_string(),
            OptionKind::Integer => value.is_i64() || value.is_u64(),
            OptionKind::Boolean => value.is_boolean(),
            OptionKind::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionKind::String => "String",
            OptionKind::Integer => "Integer",
            OptionKind::Boolean => "Boolean",
            OptionKind::StringList => "List<String>",
        };
        f.write_str(name)
    }
}

/// Declaration of a single option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    /// Identifier used by the resource API.
    pub name: &'static str,
    /// Kinds a value must belong to (at least one).
    pub accepted_kinds: &'static [OptionKind],
    /// Value used when nothing else is supplied.
    pub default: Value,
    /// Key used in the rendered document; `::` separates nesting levels.
    pub external_name: &'static str,
}

impl OptionSpec {
    /// Does `value` belong to any accepted kind?
    pub fn accepts(&self, value: &Value) -> bool {
        self.accepted_kinds.iter().any(|kind| kind.matches(value))
    }

    /// Check `value` against the accepted kinds.
    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        if self.accepts(value) {
            Ok(())
        } else {
            Err(ValidationError::wrong_kind(self.name, self.expected_kinds()))
        }
    }

    /// Accepted kinds rendered as `{String, List<String>}`.
    pub fn expected_kinds(&self) -> String {
        let kinds: Vec<String> = self.accepted_kinds.iter().map(ToString::to_string).collect();
        format!("{{{}}}", kinds.join(", "))
    }
}

/// Ordered, immutable collection of [`OptionSpec`]s.
#[derive(Debug, Clone)]
pub struct OptionSchema {
    specs: Vec<OptionSpec>,
}

impl OptionSchema {
    /// Build a schema, rejecting any option whose kind list is empty or
    /// whose default does not satisfy its own kinds.
    pub fn new(specs: Vec<OptionSpec>) -> Result<Self, ValidationError> {
        for spec in &specs {
            if spec.accepted_kinds.is_empty() {
                return Err(ValidationError::wrong_kind(spec.name, "{}"));
            }
            spec.check(&spec.default)?;
        }
        Ok(Self { specs })
    }

    /// Look up an option by name.
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// Like [`get`](Self::get), but an undeclared name is an error.
    pub fn lookup(&self, name: &str) -> Result<&OptionSpec, ValidationError> {
        self.get(name)
            .ok_or_else(|| ValidationError::UnknownOption(name.to_string()))
    }

    /// Declared options, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.iter()
    }

    /// Declared option names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.iter().map(|spec| spec.name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

const STRING: &[OptionKind] = &[OptionKind::String];
const INTEGER: &[OptionKind] = &[OptionKind::Integer];
const BOOLEAN: &[OptionKind] = &[OptionKind::Boolean];
const BIND: &[OptionKind] = &[OptionKind::String, OptionKind::StringList];

fn option(
    name: &'static str,
    accepted_kinds: &'static [OptionKind],
    default: Value,
    external_name: &'static str,
) -> OptionSpec {
    OptionSpec {
        name,
        accepted_kinds,
        default,
        external_name,
    }
}

fn builtin_options() -> Vec<OptionSpec> {
    vec![
        option("access_log", STRING, json!("/var/log/hipache_access.log"), "accessLog"),
        option("workers", INTEGER, json!(10), "workers"),
        option("max_sockets", INTEGER, json!(100), "maxSockets"),
        option("dead_backend_ttl", INTEGER, json!(30), "deadBackendTTL"),
        option("tcp_timeout", INTEGER, json!(30), "tcpTimeout"),
        option("retry_on_error", INTEGER, json!(3), "retryOnError"),
        option("dead_backend_on_500", BOOLEAN, json!(true), "deadBackendOn500"),
        option("http_keep_alive", BOOLEAN, json!(false), "httpkeepAlive"),
        option("https_port", INTEGER, json!(443), "https::port"),
        option("https_bind", BIND, json!(["127.0.0.1", "::1"]), "https::bind"),
        option("https_key", STRING, json!("/etc/ssl/ssl.key"), "https::key"),
        option("https_cert", STRING, json!("/etc/ssl/ssl.crt"), "https::cert"),
        option("http_port", INTEGER, json!(80), "http::port"),
        option("http_bind", BIND, json!(["127.0.0.1", "::1"]), "http::bind"),
        option("driver", STRING, json!("redis://127.0.0.1:6379"), "driver"),
    ]
}
