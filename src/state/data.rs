/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the feed loader and the UI layer.
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A single entry of the prompt feed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptItem {
    pub title: String,
    pub prompt: String,
    /// Filename under the images directory (e.g., "cat.png")
    pub image: String,
}

/// Cheap equality fingerprint over a parsed feed.
/// Not a cryptographic digest; only used to skip redundant re-renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub fn of(items: &[PromptItem]) -> Self {
        let mut hasher = DefaultHasher::new();
        items.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// The most recently loaded full set of gallery items
#[derive(Debug, Clone, PartialEq)]
pub struct GallerySnapshot {
    items: Vec<PromptItem>,
    fingerprint: Fingerprint,
}

impl GallerySnapshot {
    pub fn new(items: Vec<PromptItem>) -> Self {
        let fingerprint = Fingerprint::of(&items);
        Self { items, fingerprint }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn items(&self) -> &[PromptItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&PromptItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }
}

impl Default for GallerySnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
pub(crate) fn item(title: &str, prompt: &str, image: &str) -> PromptItem {
    PromptItem {
        title: title.to_string(),
        prompt: prompt.to_string(),
        image: image.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_shape_parses() {
        let json = r#"[{"title": "Cat on Mars", "prompt": "a cat, mars, red", "image": "c.png"}]"#;
        let items: Vec<PromptItem> = serde_json::from_str(json).unwrap();

        assert_eq!(items, vec![item("Cat on Mars", "a cat, mars, red", "c.png")]);
    }

    #[test]
    fn test_fingerprint_tracks_content_and_order() {
        let a = item("A", "alpha", "a.png");
        let b = item("B", "beta", "b.png");

        let first = GallerySnapshot::new(vec![a.clone(), b.clone()]);
        let same = GallerySnapshot::new(vec![a.clone(), b.clone()]);
        let swapped = GallerySnapshot::new(vec![b, a]);

        assert_eq!(first.fingerprint(), same.fingerprint());
        assert_ne!(first.fingerprint(), swapped.fingerprint());
        assert_ne!(first.fingerprint(), GallerySnapshot::empty().fingerprint());
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = GallerySnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
        assert!(snapshot.get(0).is_none());
    }
}
