use iced::widget::{button, column, container, image, row, text};
use iced::{ContentFit, Element, Length, Theme};
use std::path::PathBuf;

use crate::state::data::PromptItem;
use crate::state::feedback::{CopyField, CopyTarget, Feedback};
use crate::ui::thumbnail::ThumbSize;
use crate::Message;

/// Card width follows the widest thumbnail plus padding
const CARD_WIDTH: f32 = 320.0;

/// Build the card for snapshot entry `index`.
///
/// Title and prompt are bound as text widgets and the copy buttons carry a
/// typed target, so nothing from the feed is ever parsed as markup.
pub fn view<'a>(
    index: usize,
    item: &'a PromptItem,
    image_path: PathBuf,
    size: ThumbSize,
    feedback: &Feedback,
) -> Element<'a, Message> {
    let thumbnail = container(
        image(image::Handle::from_path(image_path))
            .width(Length::Fixed(size.width as f32))
            .height(Length::Fixed(size.height as f32))
            .content_fit(ContentFit::Contain),
    )
    .center_x(Length::Fill);

    let title_row = row![
        text(&item.title).size(18).width(Length::Fill),
        copy_button(CopyTarget { item: index, field: CopyField::Title }, feedback),
    ]
    .spacing(8);

    let prompt_body = container(text(&item.prompt).size(14))
        .padding(8)
        .width(Length::Fill)
        .style(container::bordered_box);

    let content = column![
        thumbnail,
        title_row,
        prompt_body,
        copy_button(CopyTarget { item: index, field: CopyField::Prompt }, feedback)
            .width(Length::Fill),
    ]
    .spacing(10);

    container(content)
        .width(Length::Fixed(CARD_WIDTH))
        .padding(12)
        .style(container::rounded_box)
        .into()
}

fn copy_button<'a>(target: CopyTarget, feedback: &Feedback) -> button::Button<'a, Message> {
    let style: fn(&Theme, button::Status) -> button::Style = if feedback.is_confirmed(&target) {
        button::success
    } else {
        button::secondary
    };

    button(text(feedback.label(&target)).size(13))
        .on_press(Message::Copy(target))
        .padding([6, 10])
        .style(style)
}
