use iced::alignment::{Horizontal, Vertical};
use iced::widget::{container, row, text};
use iced::{border, Element, Length, Theme};

use crate::state::feedback::{Toast, ToastKind};
use crate::Message;

/// Bottom-right notification layer, meant to sit on top of the main view in a stack
pub fn view<'a>(toast: &Toast) -> Element<'a, Message> {
    let kind = toast.kind;

    let bubble = container(row![text(toast.icon).size(18), text(toast.message).size(15)].spacing(8))
        .padding([10, 16])
        .style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            let pair = match kind {
                ToastKind::Success => palette.success.base,
                ToastKind::Failure => palette.danger.base,
            };
            container::Style {
                background: Some(pair.color.into()),
                text_color: Some(pair.text),
                border: border::rounded(8),
                ..container::Style::default()
            }
        });

    container(bubble)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(24)
        .align_x(Horizontal::Right)
        .align_y(Vertical::Bottom)
        .into()
}
