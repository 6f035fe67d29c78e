// SPDX-License-Identifier: MPL-2.0
//! View rendering for the identify component.

use super::{ImageState, Message, State};
use crate::classifier::ModelState;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::{empty_state, error_banner, history, results, styles};
use iced::widget::{button, scrollable, text_input, Column, Container, Image, Row, Text};
use iced::{alignment, Element, Length};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Renders the whole identify screen.
pub fn view(state: &State) -> Element<'_, Message> {
    let mut column = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::MD)
        .width(Length::Fill)
        .push(Text::new("Image Identification").size(typography::TITLE_LG));

    if let Some(banner) = state.error() {
        column = column.push(error_banner::view(banner).map(Message::ErrorBanner));
    }

    column = column.push(input_row(state)).push(preview(state));

    if state.current_source().is_some() {
        column = column.push(identify_button(state));
    }

    if !state.results().is_empty() {
        column = column.push(results::view(state.results()));
    }

    if !state.history().is_empty() {
        column = column.push(history::view(state.history()));
    }

    scrollable(column).width(Length::Fill).height(Length::Fill).into()
}

/// Upload button and URL entry, side by side.
fn input_row(state: &State) -> Element<'_, Message> {
    let upload = button(Text::new("Upload Image"))
        .padding([spacing::SM, spacing::MD])
        .style(styles::button::primary)
        .on_press(Message::OpenFilePicker);

    let url_field = text_input("Paste Image URL", state.url_input())
        .on_input(Message::UrlInputChanged)
        .on_submit(Message::UrlSubmitted)
        .padding(spacing::SM)
        .width(Length::Fill);

    Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center)
        .push(upload)
        .push(Text::new("OR").size(typography::CAPTION).color(palette::GRAY_400))
        .push(url_field)
        .into()
}

/// The preview pane showing the current image state.
fn preview(state: &State) -> Element<'_, Message> {
    let content: Element<'_, Message> = match state.image_state() {
        ImageState::Empty => empty_state::view(),
        ImageState::Loading { source } => centered(
            Column::new()
                .spacing(spacing::SM)
                .align_x(alignment::Horizontal::Center)
                .push(Text::new(spinner_frame(state.spinner_rotation())).size(typography::TITLE_LG))
                .push(
                    Text::new(format!("Loading {}", source.display_name()))
                        .size(typography::BODY)
                        .color(palette::GRAY_400),
                )
                .into(),
        ),
        ImageState::Ready { image, .. } => centered(
            Image::new(image.handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
        ),
        ImageState::Failed { source } => centered(
            Text::new(format!("Could not load {}", source.display_name()))
                .size(typography::BODY)
                .color(palette::ERROR_500)
                .into(),
        ),
    };

    Container::new(content)
        .width(Length::Fill)
        .height(sizing::PREVIEW_MIN_HEIGHT)
        .padding(spacing::SM)
        .style(styles::container::preview_frame)
        .into()
}

fn centered(content: Element<'_, Message>) -> Element<'_, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

/// The identify action. Pressable only when the model and the image are both
/// ready and no classification is in flight.
fn identify_button(state: &State) -> Element<'_, Message> {
    let label = match (state.model_state(), state.is_classifying()) {
        (ModelState::Loading, _) => "Loading Model…",
        (_, true) => "Identifying…",
        _ => "Identify Image",
    };

    let mut identify = button(
        Container::new(Text::new(label))
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .padding(spacing::SM)
    .width(Length::Fill)
    .style(styles::button::primary);

    if state.can_identify() {
        identify = identify.on_press(Message::IdentifyPressed);
    }

    identify.into()
}

fn spinner_frame(rotation: f32) -> &'static str {
    let progress = rotation / std::f32::consts::TAU;
    let index = (progress * SPINNER_FRAMES.len() as f32) as usize;
    SPINNER_FRAMES[index % SPINNER_FRAMES.len()]
}
