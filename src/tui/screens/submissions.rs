//! Submissions card: table of every accepted submission plus the status badge.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::automation::{ElementMap, TestId};
use crate::model::{RegistrationForm, SubmissionRecord};

pub const BADGE_TEXT: &str = "Last action: Submitted";
pub const EMPTY_TEXT: &str = "No submissions yet";

static HEADERS: [&str; 8] = [
    "First", "Last", "Email", "State", "City", "Role", "Rating", "File",
];

const COLUMN_SPACING: u16 = 1;
/// Columns are never squeezed below this when the card is too narrow.
const MIN_COLUMN_WIDTH: u16 = 3;

fn text_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

/// Width of each column: its widest cell, header included.
///
/// When the columns do not fit in `available`, the widest column gives up one cell
/// at a time until they do, and the cells of narrowed columns wrap.
pub fn column_widths(records: &[SubmissionRecord], available: u16) -> [u16; 8] {
    let mut widths = HEADERS.map(text_width);
    for record in records {
        for (width, cell) in widths.iter_mut().zip(record.table_cells().iter()) {
            *width = (*width).max(text_width(cell));
        }
    }

    let gaps = COLUMN_SPACING * (HEADERS.len() as u16 - 1);
    let budget = u32::from(available.saturating_sub(gaps));
    while widths.iter().map(|w| u32::from(*w)).sum::<u32>() > budget {
        let Some(widest) = widths.iter_mut().max() else {
            break;
        };
        if *widest <= MIN_COLUMN_WIDTH {
            break;
        }
        *widest -= 1;
    }
    widths
}

/// Splits `text` into lines of at most `width` characters.
fn wrap(text: &str, width: u16) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(usize::from(width.max(1)))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Builds the table row for `record` and returns it with its height in lines.
fn record_row(index: usize, record: &SubmissionRecord, widths: &[u16; 8]) -> (Row<'static>, u16) {
    let cells: Vec<Vec<String>> = record
        .table_cells()
        .iter()
        .zip(widths)
        .map(|(cell, width)| wrap(cell, *width))
        .collect();
    let height = cells
        .iter()
        .map(|lines| u16::try_from(lines.len()).unwrap_or(u16::MAX))
        .max()
        .unwrap_or(1);

    let style = if index % 2 == 1 {
        Style::default().bg(Color::Rgb(32, 32, 40))
    } else {
        Style::default()
    };
    let row = Row::new(
        cells
            .into_iter()
            .map(|lines| Cell::from(Text::from(lines.into_iter().map(Line::from).collect::<Vec<_>>()))),
    )
    .height(height)
    .style(style);
    (row, height)
}

/// Renders the submissions card.
///
/// `table` carries the scroll position: the selected row is always scrolled into
/// view, and only rows that fit entirely are drawn and registered.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_submissions(
    form: &RegistrationForm,
    table: &mut TableState,
    frame: &mut Frame,
    area: Rect,
    elements: &mut ElementMap,
) {
    let block = Block::default()
        .title(" Submissions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    elements.register(TestId::CardTable, area);

    let [badge_area, table_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

    if form.submitted() {
        let width = (BADGE_TEXT.chars().count() as u16 + 2).min(badge_area.width);
        let badge_area = Rect::new(badge_area.x, badge_area.y, width, 1);
        let badge = Paragraph::new(Line::from(Span::styled(
            format!(" {BADGE_TEXT} "),
            Style::default().fg(Color::Black).bg(Color::Green),
        )));
        frame.render_widget(badge, badge_area);
        elements.register(TestId::BadgeSubmitted, badge_area);
    }

    elements.register(TestId::Table, table_area);
    let [header_area, body_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(table_area);

    let history = form.history();
    let widths = column_widths(history, table_area.width);
    let header = Row::new(HEADERS).style(Style::default().add_modifier(Modifier::BOLD));

    if history.is_empty() {
        let header_only = Table::new(Vec::<Row>::new(), widths.map(Constraint::Length))
            .header(header)
            .column_spacing(COLUMN_SPACING);
        frame.render_widget(header_only, header_area);

        let empty_area = Rect {
            height: body_area.height.min(1),
            ..body_area
        };
        let empty = Paragraph::new(EMPTY_TEXT)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, empty_area);
        elements.register(TestId::Empty, empty_area);
        return;
    }

    let (rows, heights): (Vec<Row>, Vec<u16>) = history
        .iter()
        .enumerate()
        .map(|(i, record)| record_row(i, record, &widths))
        .unzip();

    let widget = Table::new(rows, widths.map(Constraint::Length))
        .header(header)
        .column_spacing(COLUMN_SPACING);
    frame.render_stateful_widget(widget, table_area, table);

    let mut y = body_area.y;
    for (i, height) in heights.iter().enumerate().skip(table.offset()) {
        if y.saturating_add(*height) > body_area.bottom() {
            break;
        }
        elements.register(TestId::Row(i), Rect::new(body_area.x, y, body_area.width, *height));
        y += height;
    }
}
