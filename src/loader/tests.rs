// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#[cfg(test)]
mod tests {
    use crate::config::{Config, ConfigError, ConfigProvider};
    use crate::resource::{Action, ValidationError, Version};
    use crate::{HipacheLoader, LoaderError};
    use serde_json::{Value, json};
    use std::collections::HashMap;

    // Mock config provider for testing
    #[derive(Debug, Default)]
    struct MockConfigProvider {
        values: HashMap<String, Value>,
    }

    impl MockConfigProvider {
        fn with(mut self, key: &str, value: Value) -> Self {
            self.values.insert(key.to_string(), value);
            self
        }
    }

    impl ConfigProvider for MockConfigProvider {
        fn has(&self, key: &str) -> bool {
            self.values.contains_key(key)
        }

        fn provider_name(&self) -> &str {
            "mock"
        }

        fn get_raw(&self, key: &str) -> Result<Option<Value>, ConfigError> {
            Ok(self.values.get(key).cloned())
        }
    }

    #[derive(Debug)]
    struct FailingConfigProvider;

    impl ConfigProvider for FailingConfigProvider {
        fn has(&self, _key: &str) -> bool {
            true
        }

        fn provider_name(&self) -> &str {
            "failing"
        }

        fn get_raw(&self, _key: &str) -> Result<Option<Value>, ConfigError> {
            Err(ConfigError::provider_error("failing", "backend unavailable"))
        }
    }

    #[test]
    fn test_empty_sources_yield_defaults() {
        let resource = HipacheLoader::new()
            .with_config(Config::default())
            .build()
            .unwrap();

        assert_eq!(resource.name(), "hipache");
        assert_eq!(resource.action(), Action::Install);
        assert_eq!(resource.version(), &Version::Latest);
        assert_eq!(resource.config_path(), "/etc/hipache.json");
        assert_eq!(resource.option("workers").unwrap(), Some(&json!(10)));
    }

    #[test]
    fn test_attributes_flow_through_setters() {
        let provider = MockConfigProvider::default()
            .with("name", json!("edge"))
            .with("action", json!("remove"))
            .with("version", json!("0.3.1"))
            .with("config_path", json!("/srv/hipache.json"))
            .with("workers", json!(25))
            .with("https_bind", json!("0.0.0.0"));

        let resource = HipacheLoader::new().with_provider(provider).build().unwrap();

        assert_eq!(resource.name(), "edge");
        assert_eq!(resource.action(), Action::Remove);
        assert_eq!(resource.version().as_str(), "0.3.1");
        assert_eq!(resource.config_path(), "/srv/hipache.json");
        assert_eq!(resource.option("workers").unwrap(), Some(&json!(25)));
        assert_eq!(resource.option("https_bind").unwrap(), Some(&json!("0.0.0.0")));
    }

    #[test]
    fn test_fallback_name() {
        let resource = HipacheLoader::new()
            .with_name("my_hipache")
            .with_provider(MockConfigProvider::default())
            .build()
            .unwrap();
        assert_eq!(resource.name(), "my_hipache");
    }

    #[test]
    fn test_later_provider_overrides_earlier() {
        let base = MockConfigProvider::default().with("workers", json!(4));
        let top = MockConfigProvider::default().with("workers", json!(16));

        let resource = HipacheLoader::new()
            .with_provider(base)
            .with_provider(top)
            .build()
            .unwrap();
        assert_eq!(resource.option("workers").unwrap(), Some(&json!(16)));
    }

    #[test]
    fn test_invalid_option_aborts_build() {
        let provider = MockConfigProvider::default().with("workers", json!("many"));

        match HipacheLoader::new().with_provider(provider).build() {
            Err(LoaderError::ValidationError(ValidationError::WrongKind { option, .. })) => {
                assert_eq!(option, "workers")
            }
            other => panic!("Expected WrongKind, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_version_aborts_build() {
        let provider = MockConfigProvider::default().with("version", json!("1.2.z"));
        assert!(matches!(
            HipacheLoader::new().with_provider(provider).build(),
            Err(LoaderError::ValidationError(ValidationError::InvalidVersion(_)))
        ));
    }

    #[test]
    fn test_unknown_action_aborts_build() {
        let provider = MockConfigProvider::default().with("action", json!("restart"));
        assert!(matches!(
            HipacheLoader::new().with_provider(provider).build(),
            Err(LoaderError::ValidationError(ValidationError::InvalidAction(a))) if a == "restart"
        ));
    }

    #[test]
    fn test_non_string_action_is_validation_error() {
        for action in [json!(1), json!(true), json!(["install"])] {
            let provider = MockConfigProvider::default().with("action", action);
            assert!(matches!(
                HipacheLoader::new().with_provider(provider).build(),
                Err(LoaderError::ValidationError(ValidationError::InvalidAction(_)))
            ));
        }
    }

    #[test]
    fn test_non_string_name_is_validation_error() {
        for name in [json!(42), json!(""), json!({ "first": "edge" })] {
            let provider = MockConfigProvider::default().with("name", name);
            let err = HipacheLoader::new().with_provider(provider).build().unwrap_err();
            assert!(matches!(
                err,
                LoaderError::ValidationError(ValidationError::InvalidName(_))
            ));
        }
    }

    #[test]
    fn test_raw_config_alone() {
        let provider =
            MockConfigProvider::default().with("config", json!({ "accessLog": "/tmp/log.log" }));

        let resource = HipacheLoader::new().with_provider(provider).build().unwrap();
        assert_eq!(resource.option("access_log").unwrap(), None);
        assert_eq!(
            resource.resolve().to_document(),
            json!({ "accessLog": "/tmp/log.log" })
        );
    }

    #[test]
    fn test_raw_config_with_options_conflicts() {
        let provider = MockConfigProvider::default()
            .with("config", json!({ "access_log": "/tmp/log.log" }))
            .with("workers", json!(98));

        assert!(matches!(
            HipacheLoader::new().with_provider(provider).build(),
            Err(LoaderError::ValidationError(ValidationError::ConflictingSources(_)))
        ));
    }

    #[test]
    fn test_raw_config_must_be_mapping() {
        let provider = MockConfigProvider::default().with("config", json!("monkeys"));
        assert!(matches!(
            HipacheLoader::new().with_provider(provider).build(),
            Err(LoaderError::ValidationError(ValidationError::InvalidRawConfig(_)))
        ));
    }

    #[test]
    fn test_provider_failure_is_config_error() {
        let err = HipacheLoader::new()
            .with_provider(FailingConfigProvider)
            .build()
            .unwrap_err();
        assert!(matches!(err, LoaderError::ConfigError(_)));
        assert!(err.to_string().contains("backend unavailable"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = HipacheLoader::new()
            .with_config_file("/nonexistent/hipache.json")
            .build()
            .unwrap_err();
        assert!(matches!(err, LoaderError::ConfigError(_)));
    }
}
