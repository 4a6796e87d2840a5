// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hipache recipe - a typed, validated description of a hipache install
//!
//! The crate models what an installer needs to know before it touches a
//! host: which release to install, where the service's `hipache.json`
//! lives, and what goes in it.
//!
//! # Options
//!
//! Every option the reverse proxy understands is declared once in a static
//! [`OptionSchema`] with the kinds of value it accepts, a default, and the
//! key it is rendered under. Values are checked when they are set, never
//! later.
//!
//! ```rust
//! use hipache::Hipache;
//!
//! let mut resource = Hipache::new("my_hipache");
//! resource.set_version("0.3.1")?;
//! resource.set_option("workers", 25)?;
//! assert!(resource.set_option("workers", "lots").is_err());
//!
//! let document = resource.resolve().to_document();
//! assert_eq!(document["workers"], 25);
//! assert_eq!(document["https"]["port"], 443);
//! # Ok::<(), hipache::ValidationError>(())
//! ```
//!
//! # Raw configuration
//!
//! An operator who needs full control can hand over the whole document
//! with [`Hipache::set_raw_config`]. It is not validated, and while it is
//! present every individual option resolves to `None`: the raw document
//! replaces the options, it is never merged with them.
//!
//! # Loading
//!
//! [`HipacheLoader`] fills a resource from an attributes file and
//! `HIPACHE_*` environment variables, running each value through the same
//! setters.

// Module declarations
pub mod config;
pub mod loader;
pub mod logging;
pub mod resource;

// Re-export key types at the crate root for convenience
pub use config::{Config, ConfigError, ConfigProvider, ConfigProviderExt};
pub use loader::{HipacheLoader, LoaderError};
pub use resource::{
    Action, DEFAULT_CONFIG_PATH, Hipache, OptionKind, OptionSchema, OptionSpec, ResolvedConfig,
    ResolvedOption, ValidationError, Version, schema,
};
