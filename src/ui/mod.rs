/// UI building blocks
///
/// - card.rs: one prompt card with its copy buttons
/// - gallery.rs: grid and empty states
/// - toast.rs: transient notification overlay
/// - thumbnail.rs: aspect-ratio sizing and dimension probing

pub mod card;
pub mod gallery;
pub mod thumbnail;
pub mod toast;
