//! Platform config locations.

use crate::error::{StoreError, StoreResult};
use std::path::PathBuf;

/// Application directory name under the platform config dir
pub const APP_DIR: &str = "gsender";

/// File name of the record document
pub const STORE_FILE: &str = "sender_rc.json";

/// Platform config directory for gSender (`~/.config/gsender` on Linux)
pub fn config_dir() -> StoreResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| StoreError::ConfigDirectory("no platform config directory".to_string()))
}

/// Default location of the record document
pub fn default_store_path() -> StoreResult<PathBuf> {
    Ok(config_dir()?.join(STORE_FILE))
}
