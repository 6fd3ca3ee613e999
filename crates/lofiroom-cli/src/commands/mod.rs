pub mod catalog;
pub mod config;
pub mod run;
pub mod timer;

#[cfg(feature = "rodio")]
mod audio;

use std::path::Path;

use lofiroom_core::Config;

/// Config from `--config`, or the default location.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}
