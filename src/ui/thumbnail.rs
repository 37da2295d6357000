/// Thumbnail sizing
///
/// Cards show each image at its native aspect ratio inside a 180x270 box.
/// Natural dimensions come from the image header, probed off the UI thread
/// and cached per filename.
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::task;

use crate::error::{GalleryError, Result};
use crate::state::data::PromptItem;

/// Bounding box for card thumbnails
const BOX_WIDTH: f32 = 180.0;
const BOX_HEIGHT: f32 = 270.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbSize {
    pub width: u32,
    pub height: u32,
}

impl ThumbSize {
    /// Used before a probe finishes and when it fails
    pub const DEFAULT: ThumbSize = ThumbSize {
        width: BOX_WIDTH as u32,
        height: BOX_HEIGHT as u32,
    };

    /// Fit natural dimensions into the bounding box, by the longer relative side
    pub fn fit(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::DEFAULT;
        }

        let aspect = width as f32 / height as f32;
        let (w, h) = if aspect > BOX_WIDTH / BOX_HEIGHT {
            // Wider than the box
            (BOX_WIDTH, BOX_WIDTH / aspect)
        } else {
            // Taller than the box
            (BOX_HEIGHT * aspect, BOX_HEIGHT)
        };

        Self {
            width: w.round() as u32,
            height: h.round() as u32,
        }
    }
}

/// Read natural dimensions from an image file header
pub async fn probe(path: PathBuf) -> Result<ThumbSize> {
    // Header decoding touches the disk; keep it off the UI thread
    task::spawn_blocking(move || {
        image::image_dimensions(&path)
            .map(|(w, h)| ThumbSize::fit(w, h))
            .map_err(|source| GalleryError::Image { path, source })
    })
    .await?
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Probe {
    Pending,
    Measured(ThumbSize),
    Failed,
}

/// Per-filename thumbnail sizes
#[derive(Debug, Default)]
pub struct ThumbCache {
    entries: HashMap<String, Probe>,
}

impl ThumbCache {
    /// Display size for an image; the default box until measured
    pub fn size_for(&self, image: &str) -> ThumbSize {
        match self.entries.get(image) {
            Some(Probe::Measured(size)) => *size,
            _ => ThumbSize::DEFAULT,
        }
    }

    /// Sync with a new snapshot. Forgets images no longer present and
    /// earlier failures, and returns the filenames that need probing
    /// (marked pending so they are not requested twice).
    pub fn prepare(&mut self, items: &[PromptItem]) -> Vec<String> {
        self.entries.retain(|name, probe| {
            *probe != Probe::Failed && items.iter().any(|item| &item.image == name)
        });

        let mut wanted = Vec::new();
        for item in items {
            if !self.entries.contains_key(&item.image) {
                self.entries.insert(item.image.clone(), Probe::Pending);
                wanted.push(item.image.clone());
            }
        }
        wanted
    }

    /// Store a probe result
    pub fn record(&mut self, image: String, size: Option<ThumbSize>) {
        let probe = size.map_or(Probe::Failed, Probe::Measured);
        self.entries.insert(image, probe);
    }
}
