use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::data::{GallerySnapshot, PromptItem};
use crate::error::{GalleryError, Result};

/// Outcome of one feed read, tagged with the sequence number it was issued under
#[derive(Debug, Clone)]
pub struct FeedResponse {
    pub seq: u64,
    pub result: std::result::Result<Vec<PromptItem>, Arc<GalleryError>>,
}

/// What a completed load did to the snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciled {
    /// New snapshot to install; the filtered view must be recomputed
    Changed(GallerySnapshot),
    /// Same content as before; nothing to do
    Unchanged,
}

/// Read and parse the JSON feed at `path`
pub async fn load_feed(path: PathBuf) -> Result<Vec<PromptItem>> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| GalleryError::Io {
            path: path.clone(),
            source,
        })?;

    serde_json::from_slice(&bytes).map_err(|source| GalleryError::Parse { path, source })
}

/// Run a load for request `seq` and package the result as a message payload
pub async fn fetch(seq: u64, path: PathBuf) -> FeedResponse {
    FeedResponse {
        seq,
        result: load_feed(path).await.map_err(Arc::new),
    }
}

/// Decide what a load result means for the current snapshot.
///
/// Failures always yield an empty snapshot so the UI shows the empty state
/// instead of silently keeping stale data. The empty snapshot also carries
/// the empty fingerprint, so the next good load is seen as a change.
pub fn reconcile(
    current: &GallerySnapshot,
    result: std::result::Result<Vec<PromptItem>, Arc<GalleryError>>,
) -> Reconciled {
    match result {
        Ok(items) => {
            let incoming = GallerySnapshot::new(items);
            if incoming.fingerprint() == current.fingerprint() {
                Reconciled::Unchanged
            } else {
                info!("🔄 Feed changed: {} prompts", incoming.len());
                Reconciled::Changed(incoming)
            }
        }
        Err(e) => {
            error!("Error loading data: {e}");
            Reconciled::Changed(GallerySnapshot::empty())
        }
    }
}

/// Numbers feed requests and drops responses that arrive out of order.
///
/// Timer ticks and window re-activation can both issue a load, so two
/// reads may be in flight at once. Only a response newer than the last
/// applied one is accepted.
#[derive(Debug, Default)]
pub struct FeedSequencer {
    issued: u64,
    applied: u64,
}

impl FeedSequencer {
    /// Reserve the next sequence number
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Returns true if the response for `seq` should be applied
    pub fn accept(&mut self, seq: u64) -> bool {
        if seq <= self.applied {
            debug!(seq, applied = self.applied, "dropping stale feed response");
            return false;
        }
        self.applied = seq;
        true
    }

    /// Number of loads issued so far
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::item;

    #[tokio::test]
    async fn test_load_feed_reads_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        std::fs::write(
            &path,
            r#"[{"title": "Cat on Mars", "prompt": "a cat, mars, red", "image": "c.png"}]"#,
        )
        .unwrap();

        let items = load_feed(path).await.unwrap();
        assert_eq!(items, vec![item("Cat on Mars", "a cat, mars, red", "c.png")]);
    }

    #[tokio::test]
    async fn test_load_feed_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = load_feed(dir.path().join("nope.json")).await;
        assert!(matches!(missing, Err(GalleryError::Io { .. })));

        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"[{"title": "no prompt"}]"#).unwrap();
        let malformed = load_feed(path).await;
        assert!(matches!(malformed, Err(GalleryError::Parse { .. })));
    }

    #[test]
    fn test_identical_payload_is_unchanged() {
        let current = GallerySnapshot::new(vec![item("A", "alpha", "a.png")]);
        let again = reconcile(&current, Ok(vec![item("A", "alpha", "a.png")]));
        assert_eq!(again, Reconciled::Unchanged);

        let edited = reconcile(&current, Ok(vec![item("A", "alpha v2", "a.png")]));
        assert!(matches!(edited, Reconciled::Changed(s) if s.items()[0].prompt == "alpha v2"));
    }

    #[test]
    fn test_failure_degrades_to_empty_snapshot() {
        let current = GallerySnapshot::new(vec![item("A", "alpha", "a.png")]);
        let failed = reconcile(&current, Err(Arc::new(GalleryError::Clipboard)));
        assert_eq!(failed, Reconciled::Changed(GallerySnapshot::empty()));

        // A failure while already empty still asks for a refresh
        let empty = GallerySnapshot::empty();
        let failed_again = reconcile(&empty, Err(Arc::new(GalleryError::Clipboard)));
        assert_eq!(failed_again, Reconciled::Changed(GallerySnapshot::empty()));

        // And the old data coming back afterwards counts as a change
        let recovered = reconcile(&empty, Ok(vec![item("A", "alpha", "a.png")]));
        assert!(matches!(recovered, Reconciled::Changed(_)));
    }

    #[test]
    fn test_sequencer_drops_older_responses() {
        let mut seq = FeedSequencer::default();
        let first = seq.issue();
        let second = seq.issue();

        assert!(seq.accept(second));
        assert!(!seq.accept(first));
        assert!(!seq.accept(second));
        assert_eq!(seq.issued(), 2);

        let third = seq.issue();
        assert!(seq.accept(third));
    }
}
