//! Root shell: static page chrome around the registration form.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Borders, Block, Paragraph};

use crate::automation::{ElementMap, TestId};

pub const TITLE: &str = "UI Automation Demo";
pub const SUBTITLE: &str = "A compact playground for terminal UI automation";
pub const FOOTER: &str = "Built with Rust + ratatui + crossterm.";

/// Draws the title, subtitle and footer, and returns the body area between them.
///
/// The body is registered as the page root.
#[mutants::skip]
pub fn draw_shell(frame: &mut Frame, area: Rect, elements: &mut ElementMap) -> Rect {
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::DarkGray))),
    ]);
    frame.render_widget(header, header_area);

    let footer = Paragraph::new(FOOTER)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(footer, footer_area);

    elements.register(TestId::PageRoot, body_area);
    body_area
}
