// SPDX-License-Identifier: MPL-2.0
//! Empty state view displayed when no image is selected.

use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::identify::Message;
use crate::ui::styles;
use iced::widget::{button, Column, Container, Text};
use iced::{alignment, Element, Length};

/// Renders the empty preview pane: a short explanation and an upload button.
pub fn view() -> Element<'static, Message> {
    let title = Text::new("No image selected")
        .size(typography::TITLE)
        .color(palette::GRAY_400);

    let subtitle = Text::new("Upload an image or paste a URL to identify it")
        .size(typography::BODY)
        .color(palette::GRAY_400);

    let open_button = button(Text::new("Upload Image"))
        .padding([spacing::SM, spacing::LG])
        .style(styles::button::primary)
        .on_press(Message::OpenFilePicker);

    let content = Column::new()
        .spacing(spacing::LG)
        .align_x(alignment::Horizontal::Center)
        .push(title)
        .push(subtitle)
        .push(open_button);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}
