// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Common test utilities for the hipache recipe tests.

use hipache::config::{ConfigError, ConfigProvider};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

/// In-memory attributes, as an installer would pass them.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct TestConfigProvider {
    values: HashMap<String, Value>,
}

#[allow(dead_code)]
impl TestConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

impl ConfigProvider for TestConfigProvider {
    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn provider_name(&self) -> &str {
        "test"
    }

    fn get_raw(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        Ok(self.values.get(key).cloned())
    }
}

/// Write an attributes file into a fresh temp dir.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
#[allow(dead_code)]
pub fn write_attributes(file_name: &str, content: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(file_name);
    fs::write(&path, content).expect("Failed to write attributes file");
    let path = path.to_string_lossy().into_owned();
    (dir, path)
}

/// Install a quiet logger once per test binary.
#[allow(dead_code)]
pub fn init_test_logging() {
    hipache::logging::init(Some(log::LevelFilter::Warn));
}
