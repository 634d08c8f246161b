//! Help modal: static testing tips drawn over the page.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::automation::{ElementMap, TestId};
use crate::model::RegistrationForm;
use crate::tui::action::{Action, ScreenState};

pub const MODAL_TITLE: &str = "Testing Tips";

static TIPS: &[&str] = &[
    "Address elements by their test ids through the automation driver.",
    "Practice waiting for form validation and table row updates.",
    "Target modal open/close and assert focus trapping.",
];

const CLOSE_X: &str = "[×]";
const CLOSE_BUTTON: &str = "[ Close ]";

/// Which of the two close controls has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalButton {
    /// The `×` in the title bar.
    Dismiss,
    /// The footer Close button.
    Close,
}

/// Visibility of the help modal, plus focus between its close controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpModal {
    Closed,
    Open { focus: ModalButton },
}

impl Default for HelpModal {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpModal {
    /// Creates a closed modal.
    pub fn new() -> Self {
        Self::Closed
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Shows the modal with focus on the `×` control. Opening an open modal is a no-op.
    pub fn open(&mut self) {
        if !self.is_open() {
            *self = Self::Open {
                focus: ModalButton::Dismiss,
            };
        }
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Returns the focused close control, if open.
    pub fn focus(&self) -> Option<ModalButton> {
        match self {
            Self::Closed => None,
            Self::Open { focus } => Some(*focus),
        }
    }
}

impl ScreenState for HelpModal {
    /// Focus stays trapped between the two close controls while open.
    fn handle_key(&mut self, key: KeyEvent, _form: &RegistrationForm) -> Action {
        let Self::Open { focus } = self else {
            return Action::None;
        };
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                *focus = match focus {
                    ModalButton::Dismiss => ModalButton::Close,
                    ModalButton::Close => ModalButton::Dismiss,
                };
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc => Action::CloseModal,
            _ => Action::None,
        }
    }
}

fn button_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

/// Renders the modal centered over `area`. Draws nothing when closed.
#[mutants::skip]
pub fn draw_help(modal: &HelpModal, frame: &mut Frame, area: Rect, elements: &mut ElementMap) {
    let Some(focus) = modal.focus() else {
        return;
    };

    let [popup] = Layout::vertical([Constraint::Length(TIPS.len() as u16 * 2 + 5)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(popup);

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .title(format!(" {MODAL_TITLE} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    elements.register(TestId::Modal, popup);

    let close_x_width = CLOSE_X.chars().count() as u16;
    let close_x_area = Rect::new(
        popup.right().saturating_sub(close_x_width + 2),
        popup.y,
        close_x_width.min(popup.width),
        1,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            CLOSE_X,
            button_style(focus == ModalButton::Dismiss),
        )),
        close_x_area,
    );
    elements.register(TestId::BtnCloseModal, close_x_area);

    let [body_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let lines: Vec<Line> = TIPS
        .iter()
        .map(|tip| Line::from(vec![Span::raw(" • "), Span::raw(*tip)]))
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body_area);

    let close_width = (CLOSE_BUTTON.chars().count() as u16).min(footer_area.width);
    let close_area = Rect::new(
        footer_area.right().saturating_sub(close_width),
        footer_area.y,
        close_width,
        footer_area.height,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            CLOSE_BUTTON,
            button_style(focus == ModalButton::Close),
        )),
        close_area,
    );
}
