/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures and the change fingerprint (data.rs)
/// - Feed loading and request sequencing (feed.rs)
/// - Search query and filtered view (search.rs)
/// - Refresh lifecycle (polling.rs)
/// - Copy confirmations and toasts (feedback.rs)

pub mod data;
pub mod feed;
pub mod feedback;
pub mod polling;
pub mod search;
