/// Gallery area: the card grid or one of the two empty states
use iced::widget::{column, container, scrollable, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::config::GalleryConfig;
use crate::state::data::GallerySnapshot;
use crate::state::feedback::Feedback;
use crate::state::search::{DisplayState, SearchResults};
use crate::ui::card;
use crate::ui::thumbnail::ThumbCache;
use crate::Message;

pub fn view<'a>(
    display: DisplayState<'_>,
    snapshot: &'a GallerySnapshot,
    results: &SearchResults,
    thumbs: &ThumbCache,
    feedback: &Feedback,
    config: &GalleryConfig,
) -> Element<'a, Message> {
    match display {
        DisplayState::Grid => {
            let cards: Vec<Element<'a, Message>> = results
                .indices()
                .iter()
                .filter_map(|&index| {
                    let item = snapshot.get(index)?;
                    Some(card::view(
                        index,
                        item,
                        config.image_path(&item.image),
                        thumbs.size_for(&item.image),
                        feedback,
                    ))
                })
                .collect();

            scrollable(
                container(Wrap::with_elements(cards).spacing(16.0).line_spacing(16.0))
                    .padding(20)
                    .width(Length::Fill),
            )
            .height(Length::Fill)
            .into()
        }
        DisplayState::NoResults { query } => empty_state(
            "🔍",
            "Tidak Ditemukan",
            format!("Tidak ada prompt yang cocok dengan pencarian \"{query}\""),
        ),
        DisplayState::NoData => empty_state(
            "🎨",
            "Belum Ada Prompt",
            format!(
                "Mulai tambahkan prompt pertama Anda melalui CMS\n➕ Buka Chapteria: {}",
                config.cms_url
            ),
        ),
    }
}

fn empty_state<'a>(icon: &'a str, heading: &'a str, body: String) -> Element<'a, Message> {
    let content = column![text(icon).size(56), text(heading).size(28), text(body).size(16)]
        .spacing(12)
        .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
