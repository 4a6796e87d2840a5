// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error type for the hipache resource.

use thiserror::Error;

/// Every way a resource attribute can be rejected.
///
/// All rejections share this single type and are told apart by their
/// message; a failed setter leaves the resource exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The option name is not declared in the schema.
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    /// The value's kind is not one the option accepts.
    #[error("wrong type for option `{option}`: expected one of {expected}")]
    WrongKind { option: String, expected: String },

    /// Neither `latest` nor a `MAJOR.MINOR.PATCH` string.
    #[error("`{0}` is not a recognized version identifier")]
    InvalidVersion(String),

    /// The config path was not a non-empty string.
    #[error("config path must be a non-empty string, got {0}")]
    InvalidConfigPath(String),

    /// The raw config was neither a mapping nor nil.
    #[error("raw config must be a mapping or nil, got {0}")]
    InvalidRawConfig(String),

    /// The resource name was not a non-empty string.
    #[error("name must be a non-empty string, got {0}")]
    InvalidName(String),

    /// The action was neither `install` nor `remove`.
    #[error("`{0}` is not a recognized action (expected install or remove)")]
    InvalidAction(String),

    /// An individual option was set while a raw config is in effect.
    #[error("option `{0}` cannot be set while a raw config is in effect")]
    ConflictingSources(String),
}

impl ValidationError {
    /// Build a [`ValidationError::WrongKind`] from the accepted kind list.
    pub fn wrong_kind<O: Into<String>, E: std::fmt::Display>(option: O, expected: E) -> Self {
        Self::WrongKind {
            option: option.into(),
            expected: expected.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_option_message() {
        let error = ValidationError::UnknownOption("frobnicate".to_string());
        assert_eq!(error.to_string(), "unknown option `frobnicate`");
    }

    #[test]
    fn test_wrong_kind_constructor() {
        let error = ValidationError::wrong_kind("workers", "{Integer}");
        assert_eq!(
            error.to_string(),
            "wrong type for option `workers`: expected one of {Integer}"
        );
    }

    #[test]
    fn test_invalid_version_message() {
        let error = ValidationError::InvalidVersion("1.2.z".to_string());
        assert!(error.to_string().contains("1.2.z"));
        assert!(error.to_string().contains("not a recognized version identifier"));
    }

    #[test]
    fn test_invalid_action_and_name_messages() {
        let error = ValidationError::InvalidAction("destroy".to_string());
        assert_eq!(
            error.to_string(),
            "`destroy` is not a recognized action (expected install or remove)"
        );

        let error = ValidationError::InvalidName("42".to_string());
        assert_eq!(error.to_string(), "name must be a non-empty string, got 42");
    }

    #[test]
    fn test_is_error_trait() {
        let error = ValidationError::InvalidRawConfig("\"monkeys\"".to_string());
        let _: &dyn std::error::Error = &error;
    }
}
