// SPDX-License-Identifier: MPL-2.0
//! Error banner sub-component.
//!
//! At most one error is active at a time; it is cleared by the next
//! successful action. Technical details stay behind a toggle so the banner
//! reads like a sentence, not a backtrace.

use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, Column, Container, Row, Text};
use iced::{Element, Length};

/// Error state for displaying user-friendly errors with optional details.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// User-facing error message.
    message: String,
    /// Technical error details, empty when there is nothing to add.
    details: String,
    /// Whether to show the technical details.
    show_details: bool,
}

/// Messages for the error banner sub-component.
#[derive(Debug, Clone)]
pub enum Message {
    /// Toggle visibility of technical details.
    ToggleDetails,
}

impl State {
    /// Create a new error state with the given message and details.
    #[must_use]
    pub fn new(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: details.into(),
            show_details: false,
        }
    }

    /// Handle an error banner message.
    pub fn handle(&mut self, msg: Message) {
        match msg {
            Message::ToggleDetails => self.show_details = !self.show_details,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    #[must_use]
    pub fn show_details(&self) -> bool {
        self.show_details
    }
}

/// Renders the banner.
pub fn view(state: &State) -> Element<'_, Message> {
    let mut column = Column::new().spacing(spacing::XS);

    let mut first_line = Row::new().spacing(spacing::SM).push(
        Text::new(state.message())
            .size(typography::BODY)
            .color(palette::ERROR_500),
    );

    if !state.details().is_empty() {
        let toggle_label = if state.show_details() {
            "Hide details"
        } else {
            "Details"
        };
        first_line = first_line.push(
            button(Text::new(toggle_label).size(typography::CAPTION))
                .style(styles::button::subtle)
                .on_press(Message::ToggleDetails),
        );
    }

    column = column.push(first_line);

    if state.show_details() && !state.details().is_empty() {
        column = column.push(
            Text::new(state.details())
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        );
    }

    Container::new(column)
        .width(Length::Fill)
        .padding(spacing::SM)
        .style(styles::container::error_banner)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_details_flips_state() {
        let mut state = State::new("something broke", "stack");
        assert!(!state.show_details());
        state.handle(Message::ToggleDetails);
        assert!(state.show_details());
        state.handle(Message::ToggleDetails);
        assert!(!state.show_details());
    }

    #[test]
    fn getters_return_correct_values() {
        let state = State::new("message", "detail text");
        assert_eq!(state.message(), "message");
        assert_eq!(state.details(), "detail text");
    }
}
