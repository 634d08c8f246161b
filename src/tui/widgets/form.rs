//! Building blocks for one-line form rows: label column, control content, error slot.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Width of the label column.
pub const LABEL_WIDTH: u16 = 20;

/// Presentation state of a single form row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRow<'a> {
    /// Display label shown to the left of the control.
    pub label: &'a str,
    /// Whether the field is checked on submit.
    pub required: bool,
    /// Whether the control has keyboard focus.
    pub focused: bool,
    /// Whether the field failed the last validation pass.
    pub invalid: bool,
}

impl<'a> FieldRow<'a> {
    /// Creates an unfocused, valid row.
    pub fn new(label: &'a str, required: bool) -> Self {
        Self {
            label,
            required,
            focused: false,
            invalid: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    /// Label color: red when invalid, yellow when focused, gray otherwise.
    pub fn style(&self) -> Style {
        let color = if self.invalid {
            Color::Red
        } else if self.focused {
            Color::Yellow
        } else {
            Color::Gray
        };
        Style::default().fg(color)
    }
}

/// Splits a row into label and control areas.
pub fn split_row(area: Rect) -> (Rect, Rect) {
    let [label, control] =
        Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(0)]).areas(area);
    (label, control)
}

/// Draws the label column of `row` and returns the control area.
#[mutants::skip]
pub fn draw_label(row: &FieldRow, frame: &mut Frame, area: Rect) -> Rect {
    let (label_area, control_area) = split_row(area);
    let label = if row.required {
        format!("{} *", row.label)
    } else {
        row.label.to_string()
    };
    frame.render_widget(Paragraph::new(Span::styled(label, row.style())), label_area);
    control_area
}

/// Draws an inline error message aligned under the control column.
#[mutants::skip]
pub fn draw_error(message: &str, frame: &mut Frame, area: Rect) -> Rect {
    let (_, message_area) = split_row(area);
    let width = (message.chars().count() as u16).min(message_area.width);
    let message_area = Rect { width, ..message_area };
    frame.render_widget(
        Paragraph::new(Span::styled(message, Style::default().fg(Color::Red))),
        message_area,
    );
    message_area
}

/// Content of a text input: the value (or placeholder when empty and unfocused)
/// followed by a cursor block when focused.
pub fn text_input_line<'a>(value: &'a str, placeholder: &'a str, focused: bool) -> Line<'a> {
    if value.is_empty() && !focused {
        return Line::from(Span::styled(placeholder, Style::default().fg(Color::DarkGray)));
    }
    let mut spans = vec![Span::raw(value)];
    if focused {
        spans.push(Span::styled(
            "\u{2588}",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    Line::from(spans)
}

/// Masks a password for display, one bullet per character.
pub fn mask(value: &str) -> String {
    "\u{2022}".repeat(value.chars().count())
}

/// Cycles through a slice to find the next or previous element.
///
/// A `current` value absent from `items` steps from the first element.
pub fn cycle<T: PartialEq + Copy>(items: &[T], current: T, forward: bool) -> T {
    let pos = items.iter().position(|&x| x == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % items.len()
    } else {
        (pos + items.len() - 1) % items.len()
    };
    items[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- FieldRow ---

    #[test]
    fn invalid_wins_over_focus() {
        let row = FieldRow::new("Email", true).focused(true).invalid(true);
        assert_eq!(row.style(), Style::default().fg(Color::Red));
    }

    #[test]
    fn focused_is_yellow() {
        let row = FieldRow::new("Email", true).focused(true);
        assert_eq!(row.style(), Style::default().fg(Color::Yellow));
    }

    #[test]
    fn idle_is_gray() {
        let row = FieldRow::new("Bio", false);
        assert_eq!(row.style(), Style::default().fg(Color::Gray));
    }

    // --- split_row ---

    #[test]
    fn split_row_reserves_label_column() {
        let (label, control) = split_row(Rect::new(0, 0, 50, 1));
        assert_eq!(label.width, LABEL_WIDTH);
        assert_eq!(control.x, LABEL_WIDTH);
        assert_eq!(control.width, 50 - LABEL_WIDTH);
    }

    // --- text_input_line ---

    #[test]
    fn placeholder_when_empty_and_unfocused() {
        let line = text_input_line("", "Jane", false);
        assert_eq!(line.to_string(), "Jane");
    }

    #[test]
    fn cursor_when_focused() {
        let line = text_input_line("Ja", "Jane", true);
        assert_eq!(line.to_string(), "Ja\u{2588}");
    }

    #[test]
    fn mask_counts_chars() {
        assert_eq!(mask("héllo"), "\u{2022}".repeat(5));
        assert_eq!(mask(""), "");
    }

    // --- cycle ---

    #[test]
    fn cycle_forward_wraps() {
        assert_eq!(cycle(&[1, 2, 3], 3, true), 1);
        assert_eq!(cycle(&[1, 2, 3], 1, true), 2);
    }

    #[test]
    fn cycle_backward_wraps() {
        assert_eq!(cycle(&[1, 2, 3], 1, false), 3);
    }

    #[test]
    fn cycle_from_missing_value_starts_at_first() {
        assert_eq!(cycle(&["", "a", "b"], "z", true), "a");
        assert_eq!(cycle(&["", "a", "b"], "z", false), "b");
    }
}
