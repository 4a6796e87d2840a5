// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The hipache resource: the validated description of one installation.
//!
//! A [`Hipache`] starts out with defaults, is populated through its
//! setters, and is then resolved into the document the service reads.
//! Every setter validates synchronously and leaves the resource untouched
//! when it fails.
//!
//! Options come from one of two mutually exclusive sources:
//!
//! 1. individual, type-checked options set with [`Hipache::set_option`];
//! 2. a raw mapping handed over wholesale with [`Hipache::set_raw_config`].
//!
//! A raw mapping is all-or-nothing. While one is present every declared
//! option resolves to `None`, including options set earlier, and the
//! mapping itself becomes the rendered document. The two are never merged
//! key by key.

pub mod error;
mod resolve;
pub mod schema;
mod version;


pub use error::ValidationError;
pub use resolve::{NESTING_SEPARATOR, ResolvedConfig, ResolvedOption};
pub use schema::{OptionKind, OptionSchema, OptionSpec, SCHEMA, schema};
pub use version::Version;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{debug_fmt, warn_fmt};

/// Where the rendered document goes unless told otherwise.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/hipache.json";

/// What the installer should do with the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Install,
    Remove,
}

impl FromStr for Action {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "install" => Ok(Action::Install),
            "remove" => Ok(Action::Remove),
            other => Err(ValidationError::InvalidAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Install => f.write_str("install"),
            Action::Remove => f.write_str("remove"),
        }
    }
}

/// Desired state of one hipache installation.
#[derive(Debug, Clone, PartialEq)]
pub struct Hipache {
    name: String,
    action: Action,
    version: Version,
    config_path: String,
    explicit_options: HashMap<&'static str, Value>,
    raw_config: Option<Map<String, Value>>,
    installed: bool,
}

impl Default for Hipache {
    fn default() -> Self {
        Self::new("hipache")
    }
}

impl Hipache {
    /// A resource carrying only defaults.
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            action: Action::default(),
            version: Version::default(),
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            explicit_options: HashMap::new(),
            raw_config: None,
            installed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn set_action(&mut self, action: Action) {
        self.action = action;
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Accepts `latest` or a `MAJOR.MINOR.PATCH` string, stored as given.
    pub fn set_version<V: Into<Value>>(&mut self, value: V) -> Result<(), ValidationError> {
        let value = value.into();
        let version = Version::from_value(&value).inspect_err(|e| self.rejected(e))?;
        debug_fmt!("Hipache", "{}: version set to {}", self.name, version);
        self.version = version;
        Ok(())
    }

    pub fn config_path(&self) -> &str {
        &self.config_path
    }

    /// Accepts any non-empty string.
    pub fn set_config_path<V: Into<Value>>(&mut self, value: V) -> Result<(), ValidationError> {
        let path = match value.into() {
            Value::String(path) if !path.is_empty() => path,
            other => {
                let error = ValidationError::InvalidConfigPath(other.to_string());
                self.rejected(&error);
                return Err(error);
            }
        };
        debug_fmt!("Hipache", "{}: config path set to {}", self.name, path);
        self.config_path = path;
        Ok(())
    }

    /// Set one declared option.
    ///
    /// Fails for an undeclared name, for a value of the wrong kind, and
    /// while a raw config is in effect.
    pub fn set_option<V: Into<Value>>(&mut self, name: &str, value: V) -> Result<(), ValidationError> {
        let value = value.into();
        let spec = self.check_option(name, &value).inspect_err(|e| self.rejected(e))?;
        debug_fmt!("Hipache", "{}: option {} set to {}", self.name, spec.name, value);
        self.explicit_options.insert(spec.name, value);
        Ok(())
    }

    fn check_option(&self, name: &str, value: &Value) -> Result<&'static OptionSpec, ValidationError> {
        let spec = schema().lookup(name)?;
        spec.check(value)?;
        if self.raw_config.is_some() {
            return Err(ValidationError::ConflictingSources(spec.name.to_string()));
        }
        Ok(spec)
    }

    /// Resolved value of one declared option.
    ///
    /// `None` while a raw config is in effect; otherwise the explicit value
    /// or, failing that, the schema default.
    pub fn option(&self, name: &str) -> Result<Option<&Value>, ValidationError> {
        let spec = schema().lookup(name)?;
        Ok(self.resolve_spec(spec))
    }

    fn resolve_spec<'a>(&'a self, spec: &'a OptionSpec) -> Option<&'a Value> {
        if self.raw_config.is_some() {
            return None;
        }
        Some(self.explicit_options.get(spec.name).unwrap_or(&spec.default))
    }

    pub fn raw_config(&self) -> Option<&Map<String, Value>> {
        self.raw_config.as_ref()
    }

    /// Hand over a complete, unvalidated mapping, or clear it with `None`.
    ///
    /// The mapping's contents are not checked against the schema. Anything
    /// other than a mapping or nil is rejected.
    pub fn set_raw_config<V: Into<Value>>(&mut self, value: V) -> Result<(), ValidationError> {
        match value.into() {
            Value::Null => {
                debug_fmt!("Hipache", "{}: raw config cleared", self.name);
                self.raw_config = None;
            }
            Value::Object(map) => {
                if !self.explicit_options.is_empty() {
                    warn_fmt!(
                        "Hipache",
                        "{}: raw config supersedes {} explicitly set option(s)",
                        self.name,
                        self.explicit_options.len()
                    );
                }
                debug_fmt!("Hipache", "{}: raw config set with {} key(s)", self.name, map.len());
                self.raw_config = Some(map);
            }
            other => {
                let error = ValidationError::InvalidRawConfig(other.to_string());
                self.rejected(&error);
                return Err(error);
            }
        }
        Ok(())
    }

    /// Resolve every declared option, in schema order.
    pub fn resolve(&self) -> ResolvedConfig {
        let options = schema()
            .iter()
            .map(|spec| ResolvedOption {
                name: spec.name,
                external_name: spec.external_name,
                value: self.resolve_spec(spec).cloned(),
            })
            .collect();
        ResolvedConfig::new(options, self.raw_config.clone())
    }

    pub fn installed(&self) -> bool {
        self.installed
    }

    /// Record that the installer finished successfully.
    pub fn mark_installed(&mut self) {
        debug_fmt!("Hipache", "{}: marked installed", self.name);
        self.installed = true;
    }

    fn rejected(&self, error: &ValidationError) {
        warn_fmt!("Hipache", "{}: {}", self.name, error);
    }
}
