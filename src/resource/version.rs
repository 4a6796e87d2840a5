// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Version identifiers accepted by the resource.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::ValidationError;

const LATEST: &str = "latest";

static RELEASE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("release pattern compiles"));

/// Which hipache release to install.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Version {
    /// Whatever the package source currently ships.
    #[default]
    Latest,
    /// A `MAJOR.MINOR.PATCH` release, kept exactly as supplied.
    Pinned(String),
}

impl Version {
    /// Validate a dynamic value; only strings can name a version.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::String(s) => s.parse(),
            other => Err(ValidationError::InvalidVersion(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Version::Latest => LATEST,
            Version::Pinned(release) => release,
        }
    }

    pub fn is_latest(&self) -> bool {
        matches!(self, Version::Latest)
    }
}

impl FromStr for Version {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == LATEST {
            Ok(Version::Latest)
        } else if RELEASE_PATTERN.is_match(s) {
            Ok(Version::Pinned(s.to_string()))
        } else {
            Err(ValidationError::InvalidVersion(s.to_string()))
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
