// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Build a [`Hipache`] resource from layered configuration sources.
//!
//! The [`HipacheLoader`] stacks an attributes file, `HIPACHE_*` environment
//! variables and any custom providers, then feeds every recognized key
//! through the resource's validating setters. The first rejected value
//! aborts the build, so an installer never sees a half-valid resource.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::config::{Config, ConfigError, ConfigProvider, EnvConfigProvider, FileConfigProvider};
use crate::logging::log_error;
use crate::resource::{Action, Hipache, ValidationError, schema};
use crate::{debug_fmt, info_fmt};

/// Errors that can occur while loading a resource.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// A provider failed to produce a value.
    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// A value was produced but rejected by the resource.
    #[error("validation error: {0}")]
    ValidationError(#[from] ValidationError),
}

/// Builder for a validated [`Hipache`] resource.
#[derive(Debug, Default)]
pub struct HipacheLoader {
    config: Option<Config>,
    config_file_path: Option<String>,
    use_env_vars: bool,
    env_prefix: Option<String>,
    providers: Vec<Arc<dyn ConfigProvider>>,
    name: Option<String>,
}

impl HipacheLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a prepared configuration instead of files and environment.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Read attributes from a JSON, TOML or YAML file.
    pub fn with_config_file(mut self, file_path: &str) -> Self {
        self.config_file_path = Some(file_path.to_string());
        self
    }

    /// Layer `HIPACHE_*` environment variables over the file.
    pub fn with_env_vars(mut self) -> Self {
        self.use_env_vars = true;
        self
    }

    /// Like [`with_env_vars`](Self::with_env_vars) with a custom prefix.
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self.use_env_vars = true;
        self
    }

    /// Add a provider that overrides the file and the environment.
    pub fn with_provider<P: ConfigProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Resource name used when the sources do not provide one.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    fn assemble_config(&mut self) -> Result<Config, LoaderError> {
        if let Some(config) = self.config.take() {
            return Ok(config);
        }

        let mut builder = Config::builder();

        if let Some(file_path) = &self.config_file_path {
            let provider = FileConfigProvider::new(file_path)
                .map_err(|e| log_error("Loader", e))?;
            builder = builder.with_provider(provider);
        }

        if self.use_env_vars {
            let provider = match &self.env_prefix {
                Some(prefix) => EnvConfigProvider::new(prefix),
                None => EnvConfigProvider::default(),
            };
            builder = builder.with_provider(provider);
        }

        for provider in self.providers.drain(..) {
            builder = builder.with_shared_provider(provider);
        }

        Ok(builder.build())
    }

    /// Build and validate the resource.
    ///
    /// A raw `config` mapping is applied before the individual options, so
    /// supplying both is rejected as conflicting.
    pub fn build(mut self) -> Result<Hipache, LoaderError> {
        let config = self.assemble_config()?;
        debug_fmt!("Loader", "providers: {:?}", config.provider_names());

        let name = match config.get_raw("name")? {
            Some(Value::String(name)) if !name.is_empty() => name,
            Some(other) => {
                return Err(log_error(
                    "Loader",
                    ValidationError::InvalidName(other.to_string()).into(),
                ));
            }
            None => self.name.take().unwrap_or_else(|| "hipache".to_string()),
        };
        let mut resource = Hipache::new(name);

        match config.get_raw("action")? {
            Some(Value::String(action)) => resource.set_action(action.parse::<Action>()?),
            Some(other) => {
                return Err(log_error(
                    "Loader",
                    ValidationError::InvalidAction(other.to_string()).into(),
                ));
            }
            None => {}
        }
        if let Some(version) = config.get_raw("version")? {
            resource.set_version(version)?;
        }
        if let Some(path) = config.get_raw("config_path")? {
            resource.set_config_path(path)?;
        }
        if let Some(raw) = config.get_raw("config")? {
            resource.set_raw_config(raw)?;
        }

        for option in schema().names() {
            if let Some(value) = config.get_raw(option)? {
                apply_option(&mut resource, option, value)?;
            }
        }

        info_fmt!(
            "Loader",
            "{} validated: version {}, config path {}",
            resource.name(),
            resource.version(),
            resource.config_path()
        );
        Ok(resource)
    }
}

fn apply_option(resource: &mut Hipache, option: &str, value: Value) -> Result<(), LoaderError> {
    resource
        .set_option(option, value)
        .map_err(|e| log_error("Loader", LoaderError::from(e)))
}
