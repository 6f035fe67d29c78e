// SPDX-License-Identifier: MPL-2.0
//! Recent-images strip.
//!
//! History is append-only and most-recent-first; clicking a thumbnail
//! re-selects that source without reordering or duplicating the strip.

use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::identify::{HistoryEntry, Message};
use crate::ui::styles;
use iced::widget::{button, Column, Container, Image, Row, Text};
use iced::{Element, Length};

/// Thumbnails per row.
const COLUMNS: usize = 6;

/// Renders the history section. Callers only invoke this with a non-empty
/// history.
pub fn view(entries: &[HistoryEntry]) -> Element<'_, Message> {
    let mut column = Column::new()
        .spacing(spacing::SM)
        .push(Text::new("Recent Images").size(typography::TITLE));

    let mut row = Row::new().spacing(spacing::SM);
    let mut in_row = 0;

    for (index, entry) in entries.iter().enumerate() {
        let content: Element<'_, Message> = match &entry.thumbnail {
            Some(handle) => Image::new(handle.clone())
                .width(sizing::THUMBNAIL)
                .height(sizing::THUMBNAIL)
                .into(),
            // Load still pending or failed; show the source name instead.
            None => Container::new(
                Text::new(entry.source.display_name())
                    .size(typography::CAPTION)
                    .color(palette::GRAY_400),
            )
            .width(sizing::THUMBNAIL)
            .height(sizing::THUMBNAIL)
            .padding(spacing::XS)
            .into(),
        };

        row = row.push(
            button(content)
                .padding(0)
                .style(styles::button::thumbnail)
                .on_press(Message::HistoryClicked(index)),
        );
        in_row += 1;

        if in_row == COLUMNS {
            column = column.push(row);
            row = Row::new().spacing(spacing::SM);
            in_row = 0;
        }
    }

    if in_row > 0 {
        column = column.push(row);
    }

    column.width(Length::Fill).into()
}
