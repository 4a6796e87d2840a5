// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validate resource attributes and print the document hipache would read.
//!
//!  `hipache-render attributes.toml > /etc/hipache.json`
//!  The attributes file may also come from HIPACHE_RESOURCE_FILE; HIPACHE_*
//!  variables are layered on top either way.

use std::env;
use std::error::Error;

use hipache::{HipacheLoader, error_fmt, info_fmt, logging};

fn main() -> Result<(), Box<dyn Error>> {
    logging::init(None);

    let file = env::args()
        .nth(1)
        .or_else(|| env::var("HIPACHE_RESOURCE_FILE").ok());

    let mut loader = HipacheLoader::new().with_env_vars();
    match file {
        Some(ref path) => {
            info_fmt!("Render", "Using attributes from {path}");
            loader = loader.with_config_file(path);
        }
        None => info_fmt!("Render", "No attributes file given, using HIPACHE_* variables only"),
    }

    let resource = match loader.build() {
        Ok(resource) => resource,
        Err(e) => {
            error_fmt!("Render", "Rejected resource attributes: {e}");
            return Err(e.into());
        }
    };

    info_fmt!(
        "Render",
        "{} ({} {}) renders to {}",
        resource.name(),
        resource.action(),
        resource.version(),
        resource.config_path()
    );
    println!("{}", resource.resolve().to_json_pretty()?);
    Ok(())
}
