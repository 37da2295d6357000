/// Gallery configuration
///
/// Looked up in this order:
/// - `<root>/gallery.json`
/// - Linux: ~/.config/prompt-gallery/config.json
/// - macOS: ~/Library/Application Support/prompt-gallery/config.json
/// - Windows: %APPDATA%\prompt-gallery\config.json
///
/// Missing files fall back to defaults. Malformed files are logged and ignored.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{GalleryError, Result};

/// Polling faster than this just burns disk reads
const MIN_POLL_INTERVAL_MS: u64 = 250;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Gallery root; relative paths below resolve against it
    #[serde(skip)]
    pub root: PathBuf,
    /// JSON feed, relative to the root
    pub feed_path: PathBuf,
    /// Directory holding the images named by the feed, relative to the root
    pub images_dir: PathBuf,
    /// Refetch interval while the window is visible
    pub poll_interval_ms: u64,
    /// How long copy confirmations and toasts stay up
    pub feedback_ms: u64,
    /// Where new prompts are added; shown in the empty state
    pub cms_url: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            feed_path: PathBuf::from("data/prompts.json"),
            images_dir: PathBuf::from("images"),
            poll_interval_ms: 5000,
            feedback_ms: 2000,
            cms_url: "https://www.chapteria.com".to_string(),
        }
    }
}

impl GalleryConfig {
    /// Load the configuration for a gallery rooted at `root`
    pub fn load(root: PathBuf) -> Self {
        // Absolute, so image paths stay valid outside the working directory
        let root = std::fs::canonicalize(&root).unwrap_or_else(|e| {
            warn!("Could not resolve gallery root {}: {e}", root.display());
            root
        });
        let candidates = [Some(root.join("gallery.json")), Self::user_config_path()];

        for path in candidates.into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            match Self::read(&path) {
                Ok(config) => {
                    info!("⚙️  Loaded config from {}", path.display());
                    return Self { root, ..config };
                }
                Err(e) => warn!("{e}, using defaults"),
            }
        }

        info!("No config file found, using defaults");
        Self { root, ..Self::default() }
    }

    fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| GalleryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| GalleryError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn user_config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("prompt-gallery");
        path.push("config.json");
        Some(path)
    }

    /// Absolute location of the JSON feed
    pub fn feed_file(&self) -> PathBuf {
        self.root.join(&self.feed_path)
    }

    /// Location of an image named by a feed entry
    pub fn image_path(&self, name: &str) -> PathBuf {
        self.root.join(&self.images_dir).join(name)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    pub fn feedback_duration(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }
}
