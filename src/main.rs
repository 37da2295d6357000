use iced::event;
use iced::widget::{button, column, container, row, stack, text, text_input};
use iced::{clipboard, time, window};
use iced::{Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod error;
mod export;
mod state;
mod ui;

use config::GalleryConfig;
use error::GalleryError;
use state::data::{Fingerprint, GallerySnapshot};
use state::feed::{self, FeedResponse, FeedSequencer, Reconciled};
use state::feedback::{elapse, CopyField, CopyTarget, Feedback};
use state::polling::Polling;
use state::search::{DisplayState, SearchResults, SearchState};
use ui::thumbnail::{self, ThumbCache, ThumbSize};

/// Main application state.
/// Owns every piece of mutable gallery state; all changes go through `update`.
struct PromptGallery {
    config: GalleryConfig,
    /// Latest loaded feed
    snapshot: GallerySnapshot,
    /// Text in the search box
    search: SearchState,
    /// Filtered view, recomputed only when the snapshot or query changes
    results: SearchResults,
    /// Request numbering for overlapping loads
    feed: FeedSequencer,
    /// ACTIVE / PAUSED / DISPOSED refresh lifecycle
    polling: Polling,
    /// Copy confirmations and the toast
    feedback: Feedback,
    /// Thumbnail sizes per image file
    thumbs: ThumbCache,
    /// Export progress shown under the search bar
    status: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Refresh timer fired
    PollTick,
    /// A feed load finished
    FeedLoaded(FeedResponse),
    /// User edited the search box
    QueryChanged(String),
    /// User clicked the clear button
    ClearSearch,
    /// User clicked a copy button
    Copy(CopyTarget),
    /// Clipboard write finished for the snapshot it was issued against; true if the text landed
    CopyFinished(CopyTarget, Fingerprint, bool),
    /// A button confirmation timer ran out
    ButtonReverted(CopyTarget, u64),
    /// A toast timer ran out
    ToastDismissed(u64),
    /// Natural size of an image is known (None on failure)
    ImageMeasured(String, Option<ThumbSize>),
    /// Window regained focus
    Focused,
    /// Window lost focus; still need to learn whether it was minimized
    Unfocused(window::Id),
    /// Answer to the minimized query issued on focus loss
    MinimizedChecked(Option<bool>),
    /// User asked to close the window
    CloseRequested(window::Id),
    /// User clicked "Export HTML"
    ExportHtml,
    /// Export write finished
    ExportFinished(Result<PathBuf, Arc<GalleryError>>),
}

impl PromptGallery {
    /// Create the gallery, issuing the initial load
    fn new(config: GalleryConfig) -> (Self, Task<Message>) {
        info!(
            "🎨 Prompt Gallery watching {} every {:?}",
            config.feed_file().display(),
            config.poll_interval()
        );

        let mut gallery = PromptGallery {
            polling: Polling::new(config.poll_interval()),
            feedback: Feedback::new(config.feedback_duration()),
            snapshot: GallerySnapshot::empty(),
            search: SearchState::default(),
            results: SearchResults::default(),
            feed: FeedSequencer::default(),
            thumbs: ThumbCache::default(),
            status: None,
            config,
        };
        gallery.refilter();

        let initial_load = gallery.request_feed();
        (gallery, initial_load)
    }

    /// Issue a numbered feed load
    fn request_feed(&mut self) -> Task<Message> {
        let seq = self.feed.issue();
        let path = self.config.feed_file();
        debug!(seq, "requesting feed {}", path.display());
        Task::perform(feed::fetch(seq, path), Message::FeedLoaded)
    }

    /// Recompute the filtered view from the snapshot and query
    fn refilter(&mut self) {
        self.results.refresh(&self.snapshot, &self.search);
    }

    /// Probe natural sizes for images not yet measured
    fn measure_thumbnails(&mut self) -> Task<Message> {
        let wanted = self.thumbs.prepare(self.snapshot.items());
        Task::batch(wanted.into_iter().map(|name| {
            let path = self.config.image_path(&name);
            Task::perform(thumbnail::probe(path), move |result| {
                let size = result
                    .map_err(|e| warn!("{e}, using default size"))
                    .ok();
                Message::ImageMeasured(name.clone(), size)
            })
        }))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PollTick => {
                if self.polling.is_ticking() {
                    return self.request_feed();
                }
                Task::none()
            }
            Message::FeedLoaded(response) => {
                if !self.feed.accept(response.seq) {
                    return Task::none();
                }

                match feed::reconcile(&self.snapshot, response.result) {
                    Reconciled::Changed(snapshot) => {
                        self.snapshot = snapshot;
                        // Cards are rebuilt; old button confirmations no longer apply
                        self.feedback.clear_buttons();
                        self.refilter();
                        self.measure_thumbnails()
                    }
                    Reconciled::Unchanged => Task::none(),
                }
            }
            Message::QueryChanged(query) => {
                if self.search.set(query) {
                    self.refilter();
                }
                Task::none()
            }
            Message::ClearSearch => {
                if self.search.clear() {
                    self.refilter();
                }
                Task::none()
            }
            Message::Copy(target) => {
                let Some(item) = self.snapshot.get(target.item) else {
                    return Task::none();
                };
                let contents = match target.field {
                    CopyField::Title => item.title.clone(),
                    CopyField::Prompt => item.prompt.clone(),
                };

                // Read the clipboard back to learn whether the write landed
                let expected = contents.clone();
                let fingerprint = self.snapshot.fingerprint();
                clipboard::write::<Message>(contents).chain(clipboard::read().map(move |read| {
                    let copied = read.as_deref() == Some(expected.as_str());
                    Message::CopyFinished(target, fingerprint, copied)
                }))
            }
            Message::CopyFinished(target, fingerprint, copied) => {
                let duration = self.feedback.duration();
                if copied && fingerprint == self.snapshot.fingerprint() {
                    let ticket = self.feedback.confirm(target);
                    Task::batch([
                        Task::perform(elapse(duration, ticket.button), move |token| {
                            Message::ButtonReverted(target, token)
                        }),
                        Task::perform(elapse(duration, ticket.toast), Message::ToastDismissed),
                    ])
                } else if copied {
                    // The card that was clicked is gone; only the toast applies
                    debug!("feed changed during copy, skipping button confirmation");
                    let token = self.feedback.copied(target.field);
                    Task::perform(elapse(duration, token), Message::ToastDismissed)
                } else {
                    warn!("Copy failed: {}", GalleryError::Clipboard);
                    let token = self.feedback.fail();
                    Task::perform(elapse(duration, token), Message::ToastDismissed)
                }
            }
            Message::ButtonReverted(target, token) => {
                self.feedback.expire_button(&target, token);
                Task::none()
            }
            Message::ToastDismissed(token) => {
                self.feedback.expire_toast(token);
                Task::none()
            }
            Message::ImageMeasured(name, size) => {
                self.thumbs.record(name, size);
                Task::none()
            }
            Message::Focused => {
                if self.polling.on_visible() {
                    self.request_feed()
                } else {
                    Task::none()
                }
            }
            Message::Unfocused(id) => window::get_minimized(id).map(Message::MinimizedChecked),
            Message::MinimizedChecked(minimized) => {
                // Losing focus to another app while still on screen keeps refreshing
                if minimized == Some(true) {
                    self.polling.on_hidden();
                }
                Task::none()
            }
            Message::CloseRequested(id) => {
                self.dispose();
                window::close(id)
            }
            Message::ExportHtml => {
                let Some(path) = FileDialog::new()
                    .set_title("Export Gallery as HTML")
                    .add_filter("HTML", &["html"])
                    .set_file_name("gallery.html")
                    .save_file()
                else {
                    return Task::none();
                };

                let html = export::render_page(&self.export_view(), chrono::Local::now());
                self.status = Some(format!("Exporting to {}...", path.display()));
                Task::perform(export::write_page(path, html), |result| {
                    Message::ExportFinished(result.map_err(Arc::new))
                })
            }
            Message::ExportFinished(result) => {
                self.status = Some(match result {
                    Ok(path) => format!("✅ Exported to {}", path.display()),
                    Err(e) => {
                        warn!("Export failed: {e}");
                        format!("⚠️ Export failed: {e}")
                    }
                });
                Task::none()
            }
        }
    }

    /// Release timers and pending feedback; nothing runs afterwards
    fn dispose(&mut self) {
        info!("👋 Shutting down gallery");
        self.polling.dispose();
        self.feedback.clear();
    }

    fn display_state(&self) -> DisplayState<'_> {
        DisplayState::select(&self.results, &self.search)
    }

    fn export_view(&self) -> export::ExportView<'_> {
        export::ExportView {
            display: self.display_state(),
            snapshot: &self.snapshot,
            results: &self.results,
            thumbs: &self.thumbs,
            config: &self.config,
            indicator: self.results.indicator(&self.search),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let mut search_bar = row![text_input("Cari judul atau prompt...", self.search.raw())
            .on_input(Message::QueryChanged)
            .padding(10)
            .size(16)]
        .spacing(10)
        .align_y(Alignment::Center);

        if self.search.shows_clear() {
            search_bar = search_bar.push(
                button(text("✕"))
                    .on_press(Message::ClearSearch)
                    .padding(10)
                    .style(button::secondary),
            );
        }
        search_bar = search_bar.push(button("Export HTML").on_press(Message::ExportHtml).padding(10));

        let mut header = column![text("Prompt Gallery").size(32), search_bar].spacing(12);
        if let Some(indicator) = self.results.indicator(&self.search) {
            header = header.push(text(indicator).size(14));
        }
        if let Some(status) = &self.status {
            header = header.push(text(status).size(14));
        }

        let gallery = ui::gallery::view(
            self.display_state(),
            &self.snapshot,
            &self.results,
            &self.thumbs,
            &self.feedback,
            &self.config,
        );

        let main = column![container(header).padding([20, 20]), gallery]
            .width(Length::Fill)
            .height(Length::Fill);

        match self.feedback.toast() {
            Some(toast) => stack![main, ui::toast::view(toast)].into(),
            None => main.into(),
        }
    }

    /// Timer while ACTIVE, window events until disposed
    fn subscription(&self) -> Subscription<Message> {
        if self.polling.is_disposed() {
            return Subscription::none();
        }

        let window_events = event::listen_with(|event, _status, id| match event {
            Event::Window(window::Event::Focused) => Some(Message::Focused),
            Event::Window(window::Event::Unfocused) => Some(Message::Unfocused(id)),
            Event::Window(window::Event::CloseRequested) => Some(Message::CloseRequested(id)),
            _ => None,
        });

        if self.polling.is_ticking() {
            Subscription::batch([
                window_events,
                time::every(self.polling.interval()).map(|_| Message::PollTick),
            ])
        } else {
            window_events
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Optional gallery root; defaults to the working directory
    let root = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let config = GalleryConfig::load(root);

    iced::application("Prompt Gallery", PromptGallery::update, PromptGallery::view)
        .subscription(PromptGallery::subscription)
        .theme(PromptGallery::theme)
        .exit_on_close_request(false)
        .centered()
        .run_with(move || PromptGallery::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::data::item;
    use state::polling::PollState;

    fn gallery() -> PromptGallery {
        let (gallery, _) = PromptGallery::new(GalleryConfig::default());
        gallery
    }

    fn deliver(gallery: &mut PromptGallery, seq: u64, items: Vec<state::data::PromptItem>) {
        let _ = gallery.update(Message::FeedLoaded(FeedResponse { seq, result: Ok(items) }));
    }

    #[test]
    fn test_initial_state_issues_one_load() {
        let gallery = gallery();
        assert_eq!(gallery.feed.issued(), 1);
        assert_eq!(gallery.polling.state(), PollState::Active);
        assert_eq!(gallery.display_state(), DisplayState::NoData);
    }

    #[test]
    fn test_identical_feed_does_not_rerender() {
        let mut gallery = gallery();
        let items = vec![item("Cat on Mars", "a cat, mars, red", "c.png")];

        deliver(&mut gallery, 1, items.clone());
        let after_first = gallery.results.generation();

        let seq = gallery.feed.issue();
        deliver(&mut gallery, seq, items);
        assert_eq!(gallery.results.generation(), after_first);
        assert_eq!(gallery.results.len(), 1);
    }

    #[test]
    fn test_query_edits_rerender_only_on_change() {
        let mut gallery = gallery();
        deliver(&mut gallery, 1, vec![item("Cat on Mars", "a cat, mars, red", "c.png")]);
        let before = gallery.results.generation();

        let _ = gallery.update(Message::QueryChanged("mars".to_string()));
        let _ = gallery.update(Message::QueryChanged("mars".to_string()));
        assert_eq!(gallery.results.generation(), before + 1);
        assert_eq!(
            gallery.results.indicator(&gallery.search).as_deref(),
            Some("Ditemukan 1 dari 1 prompt")
        );

        let _ = gallery.update(Message::QueryChanged("zzz".to_string()));
        assert_eq!(gallery.display_state(), DisplayState::NoResults { query: "zzz" });

        let _ = gallery.update(Message::ClearSearch);
        assert_eq!(gallery.display_state(), DisplayState::Grid);
        assert_eq!(gallery.results.indicator(&gallery.search), None);
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut gallery = gallery();
        let newer = gallery.feed.issue();

        deliver(&mut gallery, newer, vec![item("New", "fresh", "n.png")]);
        deliver(&mut gallery, 1, vec![item("Old", "stale", "o.png")]);

        assert_eq!(gallery.snapshot.items()[0].title, "New");
    }

    #[test]
    fn test_failed_load_shows_empty_state() {
        let mut gallery = gallery();
        deliver(&mut gallery, 1, vec![item("Cat", "cat", "c.png")]);

        let seq = gallery.feed.issue();
        let _ = gallery.update(Message::FeedLoaded(FeedResponse {
            seq,
            result: Err(Arc::new(GalleryError::Clipboard)),
        }));

        assert!(gallery.snapshot.is_empty());
        assert_eq!(gallery.display_state(), DisplayState::NoData);
    }

    #[test]
    fn test_minimize_then_focus_refetches_once() {
        let mut gallery = gallery();
        let issued = gallery.feed.issued();

        let _ = gallery.update(Message::MinimizedChecked(Some(true)));
        assert!(!gallery.polling.is_ticking());
        let _ = gallery.update(Message::PollTick);
        assert_eq!(gallery.feed.issued(), issued);

        let _ = gallery.update(Message::Focused);
        assert_eq!(gallery.feed.issued(), issued + 1);
        assert!(gallery.polling.is_ticking());
        assert_eq!(gallery.polling.interval(), gallery.config.poll_interval());

        let _ = gallery.update(Message::Focused);
        assert_eq!(gallery.feed.issued(), issued + 1);
    }

    #[test]
    fn test_focus_loss_without_minimize_keeps_polling() {
        let mut gallery = gallery();
        let issued = gallery.feed.issued();

        let _ = gallery.update(Message::MinimizedChecked(Some(false)));
        assert!(gallery.polling.is_ticking());
        let _ = gallery.update(Message::MinimizedChecked(None));
        assert!(gallery.polling.is_ticking());

        let _ = gallery.update(Message::PollTick);
        assert_eq!(gallery.feed.issued(), issued + 1);

        // Regaining focus while never paused issues nothing extra
        let _ = gallery.update(Message::Focused);
        assert_eq!(gallery.feed.issued(), issued + 1);
    }

    #[test]
    fn test_copy_finishing_after_feed_swap_skips_button() {
        let mut gallery = gallery();
        deliver(&mut gallery, 1, vec![item("Alpha", "first", "a.png")]);
        let target = CopyTarget { item: 0, field: CopyField::Title };
        let copied_from = gallery.snapshot.fingerprint();

        let seq = gallery.feed.issue();
        deliver(&mut gallery, seq, vec![item("Zeta", "last", "z.png")]);
        let _ = gallery.update(Message::CopyFinished(target, copied_from, true));

        assert_eq!(gallery.snapshot.items()[0].title, "Zeta");
        assert!(!gallery.feedback.is_confirmed(&target));
        assert_eq!(gallery.feedback.toast().map(|t| t.message), Some("Judul tersalin!"));
    }

    #[test]
    fn test_copy_feedback_flow() {
        let mut gallery = gallery();
        deliver(&mut gallery, 1, vec![item("Cat", "cat", "c.png")]);
        let target = CopyTarget { item: 0, field: CopyField::Prompt };

        let fingerprint = gallery.snapshot.fingerprint();
        let _ = gallery.update(Message::CopyFinished(target, fingerprint, true));
        assert!(gallery.feedback.is_confirmed(&target));
        assert_eq!(gallery.feedback.toast().map(|t| t.message), Some("Prompt tersalin!"));

        // Token 1 is the button, token 2 the toast
        let _ = gallery.update(Message::ButtonReverted(target, 1));
        let _ = gallery.update(Message::ToastDismissed(2));
        assert!(!gallery.feedback.is_confirmed(&target));
        assert!(gallery.feedback.toast().is_none());

        let _ = gallery.update(Message::CopyFinished(target, fingerprint, false));
        assert!(!gallery.feedback.is_confirmed(&target));
        assert_eq!(gallery.feedback.toast().map(|t| t.message), Some("Gagal menyalin!"));
    }

    #[test]
    fn test_dispose_stops_polling() {
        let mut gallery = gallery();
        gallery.dispose();

        assert!(gallery.polling.is_disposed());
        let _ = gallery.update(Message::Focused);
        let _ = gallery.update(Message::PollTick);
        assert_eq!(gallery.feed.issued(), 1);
    }
}
