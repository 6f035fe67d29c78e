// SPDX-License-Identifier: MPL-2.0
//! Prediction results list.
//!
//! Renders the classifier output as a column of cards, best guess first.

use crate::classifier::Prediction;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::identify::Message;
use crate::ui::styles;
use iced::widget::{Column, Container, Row, Text};
use iced::{Element, Length};

/// Formats a probability as a display percentage, e.g. `92.00%`.
#[must_use]
pub fn confidence_text(probability: f32) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// Renders the results column. Callers only invoke this with a non-empty
/// prediction list.
pub fn view(predictions: &[Prediction]) -> Element<'_, Message> {
    let mut column = Column::new().spacing(spacing::SM).width(Length::Fill);

    for (index, prediction) in predictions.iter().enumerate() {
        let mut label_row = Row::new()
            .spacing(spacing::SM)
            .push(Text::new(&prediction.label).size(typography::BODY));

        if index == 0 {
            label_row = label_row.push(
                Text::new("(Best Guess)")
                    .size(typography::CAPTION)
                    .color(palette::SUCCESS_500),
            );
        }

        let card = Column::new()
            .spacing(spacing::XS)
            .push(label_row)
            .push(
                Text::new(format!(
                    "Confidence: {}",
                    confidence_text(prediction.probability)
                ))
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
            );

        column = column.push(
            Container::new(card)
                .width(Length::Fill)
                .padding(spacing::SM)
                .style(styles::container::result_card),
        );
    }

    column.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_text_formats_two_decimals() {
        assert_eq!(confidence_text(0.92), "92.00%");
        assert_eq!(confidence_text(0.056_78), "5.68%");
    }

    #[test]
    fn confidence_text_handles_bounds() {
        assert_eq!(confidence_text(0.0), "0.00%");
        assert_eq!(confidence_text(1.0), "100.00%");
    }
}
