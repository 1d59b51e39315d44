//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MINIMARKET_STATE_DIR` - Directory for persisted session and cart
//!   documents (default: `.minimarket`)

use std::path::PathBuf;

use crate::storage::Storage;

/// Default directory for persisted state, relative to the working directory.
pub const DEFAULT_STATE_DIR: &str = ".minimarket";

/// Storefront-side configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory session and cart documents are persisted under.
    pub state_dir: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    /// Every variable has a default, so loading never fails.
    #[must_use]
    pub fn from_env() -> Self {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let state_dir = std::env::var("MINIMARKET_STATE_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_STATE_DIR), PathBuf::from);

        Self { state_dir }
    }

    /// Storage rooted at the configured state directory.
    #[must_use]
    pub fn storage(&self) -> Storage {
        Storage::new(&self.state_dir)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_storage_uses_state_dir() {
        let config = StorefrontConfig {
            state_dir: PathBuf::from("/tmp/minimarket-state"),
        };
        assert_eq!(config.storage().dir(), Path::new("/tmp/minimarket-state"));
    }

    #[test]
    fn test_default_state_dir_is_relative() {
        assert!(Path::new(DEFAULT_STATE_DIR).is_relative());
    }
}
