//! Registration screen: the form with every control type plus the action buttons.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_textarea::{CursorMove, TextArea};

use crate::automation::{ElementMap, TestId};
use crate::model::input::{cycle_color, step_date, step_time};
use crate::model::{Field, FieldUpdate, RATING_RANGE, Region, RegistrationForm, Role};
use crate::tui::action::{Action, ScreenState};
use crate::tui::widgets::form::{FieldRow, cycle, draw_error, draw_label, mask, text_input_line};

/// Leading placeholder option of the city selector.
pub const CITY_PLACEHOLDER: &str = "Select a city…";

const BIO_PLACEHOLDER: &str = "Tell us something...";
const BIO_HEIGHT: u16 = 3;

/// A focusable control, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    FirstName,
    LastName,
    Email,
    Password,
    Bio,
    State,
    City,
    Role,
    Date,
    Time,
    Color,
    Rating,
    File,
    Newsletter,
    Agree,
    Submit,
    Reset,
    OpenModal,
}

static FOCUS_ORDER: &[Control] = &[
    Control::FirstName,
    Control::LastName,
    Control::Email,
    Control::Password,
    Control::Bio,
    Control::State,
    Control::City,
    Control::Role,
    Control::Date,
    Control::Time,
    Control::Color,
    Control::Rating,
    Control::File,
    Control::Newsletter,
    Control::Agree,
    Control::Submit,
    Control::Reset,
    Control::OpenModal,
];

impl Control {
    /// Returns all controls in focus order.
    pub fn all() -> &'static [Control] {
        FOCUS_ORDER
    }
}

/// Options offered by the city selector: the placeholder (`""`) then the cities of the
/// current state.
pub fn city_options(form: &RegistrationForm) -> Vec<&'static str> {
    std::iter::once("").chain(form.cities().iter().copied()).collect()
}

/// State for the registration screen.
///
/// Field values live in the [`RegistrationForm`]; this only tracks focus and the
/// editors that need their own buffers.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    focus: Control,
    bio: TextArea<'static>,
    file_path: String,
}

impl Default for RegistrationState {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationState {
    /// Creates a new state with focus on the first name input.
    pub fn new() -> Self {
        Self {
            focus: Control::FirstName,
            bio: bio_editor(""),
            file_path: String::new(),
        }
    }

    /// Returns the focused control.
    pub fn focus(&self) -> Control {
        self.focus
    }

    /// Moves focus to `control`.
    pub fn set_focus(&mut self, control: Control) {
        self.focus = control;
    }

    /// Returns the path typed into the file control.
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Brings the editor buffers back in line with the form after an external change
    /// (reset, or a value set by the automation driver).
    pub fn sync(&mut self, form: &RegistrationForm) {
        if self.bio_text() != form.values().bio {
            self.bio = bio_editor(&form.values().bio);
        }
        let selected = form
            .selected_file()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.file_path != selected {
            self.file_path = selected;
        }
    }

    fn bio_text(&self) -> String {
        self.bio.lines().join("\n")
    }

    fn handle_bio(&mut self, key: KeyEvent, current: &str) -> Action {
        self.bio.input(key);
        let text = self.bio_text();
        if text == current {
            Action::None
        } else {
            Action::Update(FieldUpdate::Bio(text))
        }
    }

    fn handle_file(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char(ch) => self.file_path.push(ch),
            KeyCode::Backspace => {
                if self.file_path.pop().is_none() {
                    return Action::None;
                }
            }
            KeyCode::Enter => return Action::Submit,
            _ => return Action::None,
        }
        let path = (!self.file_path.is_empty()).then(|| PathBuf::from(&self.file_path));
        Action::SelectFile(path)
    }
}

impl ScreenState for RegistrationState {
    fn handle_key(&mut self, key: KeyEvent, form: &RegistrationForm) -> Action {
        match key.code {
            KeyCode::Tab => {
                self.focus = cycle(Control::all(), self.focus, true);
                return Action::None;
            }
            KeyCode::BackTab => {
                self.focus = cycle(Control::all(), self.focus, false);
                return Action::None;
            }
            _ => {}
        }

        let values = form.values();
        match self.focus {
            Control::FirstName => edit_text(key, &values.first_name, FieldUpdate::FirstName),
            Control::LastName => edit_text(key, &values.last_name, FieldUpdate::LastName),
            Control::Email => edit_text(key, &values.email, FieldUpdate::Email),
            Control::Password => edit_text(key, &values.password, FieldUpdate::Password),
            Control::Bio => self.handle_bio(key, &values.bio),
            Control::State => match direction(key) {
                Some(forward) => {
                    Action::Update(FieldUpdate::State(cycle(Region::all(), values.state, forward)))
                }
                None => submit_on_enter(key),
            },
            Control::City => match direction(key) {
                Some(forward) => {
                    let options = city_options(form);
                    let next = cycle(&options, values.city.as_str(), forward);
                    Action::Update(FieldUpdate::City(next.to_string()))
                }
                None => submit_on_enter(key),
            },
            Control::Role => match direction(key) {
                Some(forward) => {
                    Action::Update(FieldUpdate::Role(cycle(Role::all(), values.role, forward)))
                }
                None => submit_on_enter(key),
            },
            Control::Date => match key.code {
                KeyCode::Up => Action::Update(FieldUpdate::Date(step_date(&values.date, 1))),
                KeyCode::Down => Action::Update(FieldUpdate::Date(step_date(&values.date, -1))),
                KeyCode::Backspace | KeyCode::Delete if !values.date.is_empty() => {
                    Action::Update(FieldUpdate::Date(String::new()))
                }
                _ => submit_on_enter(key),
            },
            Control::Time => match key.code {
                KeyCode::Up => Action::Update(FieldUpdate::Time(step_time(&values.time, 1))),
                KeyCode::Down => Action::Update(FieldUpdate::Time(step_time(&values.time, -1))),
                KeyCode::Backspace | KeyCode::Delete if !values.time.is_empty() => {
                    Action::Update(FieldUpdate::Time(String::new()))
                }
                _ => submit_on_enter(key),
            },
            Control::Color => match direction(key) {
                Some(forward) => Action::Update(FieldUpdate::Color(
                    cycle_color(&values.color, forward).to_string(),
                )),
                None => submit_on_enter(key),
            },
            Control::Rating => {
                let (min, max) = (*RATING_RANGE.start(), *RATING_RANGE.end());
                let next = match key.code {
                    KeyCode::Left | KeyCode::Down => values.rating.saturating_sub(1).max(min),
                    KeyCode::Right | KeyCode::Up => values.rating.saturating_add(1).min(max),
                    KeyCode::Home => min,
                    KeyCode::End => max,
                    _ => return submit_on_enter(key),
                };
                if next == values.rating {
                    Action::None
                } else {
                    Action::Update(FieldUpdate::Rating(next))
                }
            }
            Control::File => self.handle_file(key),
            Control::Newsletter => match key.code {
                KeyCode::Char(' ') => Action::Update(FieldUpdate::Newsletter(!values.newsletter)),
                _ => submit_on_enter(key),
            },
            Control::Agree => match key.code {
                KeyCode::Char(' ') => Action::Update(FieldUpdate::Agree(!values.agree)),
                _ => submit_on_enter(key),
            },
            Control::Submit => activate(key, Action::Submit),
            Control::Reset => activate(key, Action::Reset),
            Control::OpenModal => activate(key, Action::OpenModal),
        }
    }
}

fn bio_editor(text: &str) -> TextArea<'static> {
    let mut editor = TextArea::new(text.split('\n').map(str::to_string).collect());
    editor.set_placeholder_text(BIO_PLACEHOLDER);
    editor.set_cursor_line_style(Style::default());
    editor.move_cursor(CursorMove::Bottom);
    editor.move_cursor(CursorMove::End);
    editor
}

/// Applies a text-editing key to `value`. Enter submits the form.
fn edit_text(key: KeyEvent, value: &str, update: fn(String) -> FieldUpdate) -> Action {
    let mut value = value.to_string();
    match key.code {
        KeyCode::Char(ch) => value.push(ch),
        KeyCode::Backspace => {
            if value.pop().is_none() {
                return Action::None;
            }
        }
        KeyCode::Enter => return Action::Submit,
        _ => return Action::None,
    }
    Action::Update(update(value))
}

/// Maps arrow keys to a cycling direction: `Some(true)` forward, `Some(false)` back.
fn direction(key: KeyEvent) -> Option<bool> {
    match key.code {
        KeyCode::Right | KeyCode::Down => Some(true),
        KeyCode::Left | KeyCode::Up => Some(false),
        _ => None,
    }
}

fn submit_on_enter(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Submit,
        _ => Action::None,
    }
}

fn activate(key: KeyEvent, action: Action) -> Action {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => action,
        _ => Action::None,
    }
}

/// Hands out consecutive rows of a scrolled area, top to bottom.
///
/// Rows are counted from the top of the form; `offset` rows are scrolled past. A row
/// that is not entirely on screen gets a zero-height area, so nothing is drawn or
/// registered for it.
struct Rows {
    area: Rect,
    y: u16,
    offset: u16,
}

impl Rows {
    fn new(area: Rect, offset: u16) -> Self {
        Self { area, y: 0, offset }
    }

    fn take(&mut self, height: u16) -> Rect {
        let top = self.y;
        self.y = self.y.saturating_add(height);
        let on_screen =
            top >= self.offset && self.y <= self.offset.saturating_add(self.area.height);
        if on_screen {
            Rect::new(self.area.x, self.area.y + (top - self.offset), self.area.width, height)
        } else {
            Rect::new(self.area.x, self.area.y, self.area.width, 0)
        }
    }
}

/// Rows taken by each control, error slot included, as `(control, top, height)` in
/// form coordinates. Must follow the drawing order of [`draw_registration`].
fn control_spans(form: &RegistrationForm) -> Vec<(Control, u16, u16)> {
    let with_error = |field: Field| 1 + u16::from(form.errors().contains(field));
    let stacked = [
        (Control::FirstName, with_error(Field::FirstName)),
        (Control::LastName, 1),
        (Control::Email, with_error(Field::Email)),
        (Control::Password, with_error(Field::Password)),
        (Control::Bio, BIO_HEIGHT),
        (Control::State, 1),
        (Control::City, with_error(Field::City)),
        (Control::Role, 1),
        (Control::Date, 1),
        (Control::Time, 1),
        (Control::Color, 1),
        (Control::Rating, 1),
        (Control::File, 1),
        (Control::Newsletter, 1),
        (Control::Agree, with_error(Field::Agree)),
    ];

    let mut spans = Vec::with_capacity(Control::all().len());
    let mut y = 0;
    for (control, height) in stacked {
        spans.push((control, y, height));
        y += height;
    }
    // Blank row, then the buttons side by side.
    y += 1;
    for control in [Control::Submit, Control::Reset, Control::OpenModal] {
        spans.push((control, y, 1));
    }
    spans
}

/// Smallest scroll offset that keeps `focus` entirely within `height` rows.
fn scroll_offset(form: &RegistrationForm, focus: Control, height: u16) -> u16 {
    control_spans(form)
        .into_iter()
        .find(|(control, _, _)| *control == focus)
        .map(|(_, top, span)| (top + span).saturating_sub(height).min(top))
        .unwrap_or(0)
}

/// Returns the control that owns an element, for scrolling it into view.
pub fn control_for(id: TestId) -> Option<Control> {
    let control = match id {
        TestId::Input(field) | TestId::Error(field) => match field {
            Field::FirstName => Control::FirstName,
            Field::LastName => Control::LastName,
            Field::Email => Control::Email,
            Field::Password => Control::Password,
            Field::Bio => Control::Bio,
            Field::State => Control::State,
            Field::City => Control::City,
            Field::Role => Control::Role,
            Field::Newsletter => Control::Newsletter,
            Field::Agree => Control::Agree,
            Field::Rating => Control::Rating,
            Field::Color => Control::Color,
            Field::Date => Control::Date,
            Field::Time => Control::Time,
        },
        TestId::RadioRole(_) => Control::Role,
        TestId::InputFile => Control::File,
        TestId::BtnSubmit => Control::Submit,
        TestId::BtnReset => Control::Reset,
        TestId::BtnOpenModal => Control::OpenModal,
        _ => return None,
    };
    Some(control)
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

/// Draws one labelled control row and its error slot, registering both.
#[allow(clippy::too_many_arguments)]
fn draw_control(
    frame: &mut Frame,
    rows: &mut Rows,
    elements: &mut ElementMap,
    form: &RegistrationForm,
    row: FieldRow,
    field: Option<Field>,
    id: TestId,
    content: Line,
) {
    let error = field.and_then(|f| form.errors().get(f));
    let row = row.invalid(error.is_some());
    let area = rows.take(1);
    let control_area = draw_label(&row, frame, area);
    frame.render_widget(Paragraph::new(content), control_area);
    elements.register(id, control_area);

    if let (Some(field), Some(error)) = (field, error) {
        let error_area = draw_error(&error.to_string(), frame, rows.take(1));
        elements.register(TestId::Error(field), error_area);
    }
}

fn select_line(shown: &str, placeholder: bool, focused: bool) -> Line<'static> {
    let text_style = if placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        focus_style(focused)
    };
    Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(shown.to_string(), text_style),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
    ])
}

fn stepper_line(value: &str, placeholder: &'static str, focused: bool) -> Line<'static> {
    let mut spans = if value.is_empty() {
        vec![Span::styled(placeholder, Style::default().fg(Color::DarkGray))]
    } else {
        vec![Span::styled(value.to_string(), focus_style(focused))]
    };
    if focused {
        spans.push(Span::styled("  ↑/↓", Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

fn toggle_line(on: &str, label: &'static str, focused: bool) -> Line<'static> {
    Line::from(vec![
        Span::styled(on.to_string(), focus_style(focused)),
        Span::raw(" "),
        Span::raw(label),
    ])
}

/// Renders the registration form.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_registration(
    state: &RegistrationState,
    form: &RegistrationForm,
    frame: &mut Frame,
    area: Rect,
    elements: &mut ElementMap,
) {
    let block = Block::default()
        .title(" Registration Form ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    elements.register(TestId::CardForm, area);

    let [form_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    elements.register(TestId::Form, form_area);

    let values = form.values();
    let focus = state.focus();
    let offset = scroll_offset(form, focus, form_area.height);
    let mut rows = Rows::new(form_area, offset);

    let text_inputs = [
        (Control::FirstName, Field::FirstName, "First name", true, "Jane"),
        (Control::LastName, Field::LastName, "Last name", false, "Doe"),
        (Control::Email, Field::Email, "Email", true, "jane@example.com"),
        (Control::Password, Field::Password, "Password", true, "••••••"),
    ];
    for (control, field, label, required, placeholder) in text_inputs {
        let focused = focus == control;
        let shown = match field {
            Field::FirstName => values.first_name.clone(),
            Field::LastName => values.last_name.clone(),
            Field::Email => values.email.clone(),
            _ => mask(&values.password),
        };
        let content = text_input_line(&shown, placeholder, focused);
        let validated = TestId::VALIDATED.contains(&field).then_some(field);
        draw_control(
            frame,
            &mut rows,
            elements,
            form,
            FieldRow::new(label, required).focused(focused),
            validated,
            TestId::Input(field),
            content,
        );
    }

    // Bio spans several rows and is drawn by the textarea itself.
    let bio_area = rows.take(BIO_HEIGHT);
    let bio_row = FieldRow::new("Short bio", false).focused(focus == Control::Bio);
    let bio_control = draw_label(&bio_row, frame, bio_area);
    frame.render_widget(&state.bio, bio_control);
    elements.register(TestId::Input(Field::Bio), bio_control);

    draw_control(
        frame,
        &mut rows,
        elements,
        form,
        FieldRow::new("State", false).focused(focus == Control::State),
        None,
        TestId::Input(Field::State),
        select_line(values.state.code(), false, focus == Control::State),
    );

    let city_empty = values.city.is_empty();
    let city_shown = if city_empty {
        CITY_PLACEHOLDER
    } else {
        values.city.as_str()
    };
    draw_control(
        frame,
        &mut rows,
        elements,
        form,
        FieldRow::new("City", true).focused(focus == Control::City),
        Some(Field::City),
        TestId::Input(Field::City),
        select_line(city_shown, city_empty, focus == Control::City),
    );

    // Role: one radio per tag, each registered separately.
    let role_focused = focus == Control::Role;
    let role_area = rows.take(1);
    let role_control = draw_label(&FieldRow::new("Role", false).focused(role_focused), frame, role_area);
    let mut x = role_control.x;
    for role in Role::all() {
        let checked = values.role == *role;
        let text = format!("({}) {}", if checked { "•" } else { " " }, role.label());
        let width = (text.chars().count() as u16).min(role_control.right().saturating_sub(x));
        let radio_area = Rect::new(x, role_control.y, width, role_control.height);
        let style = focus_style(role_focused && checked);
        frame.render_widget(Paragraph::new(Span::styled(text, style)), radio_area);
        elements.register(TestId::RadioRole(*role), radio_area);
        x = radio_area.right().saturating_add(3).min(role_control.right());
    }

    draw_control(
        frame,
        &mut rows,
        elements,
        form,
        FieldRow::new("Date", false).focused(focus == Control::Date),
        None,
        TestId::Input(Field::Date),
        stepper_line(&values.date, "yyyy-mm-dd", focus == Control::Date),
    );
    draw_control(
        frame,
        &mut rows,
        elements,
        form,
        FieldRow::new("Time", false).focused(focus == Control::Time),
        None,
        TestId::Input(Field::Time),
        stepper_line(&values.time, "--:--", focus == Control::Time),
    );

    let swatch = values.color.parse::<Color>().unwrap_or(Color::Reset);
    draw_control(
        frame,
        &mut rows,
        elements,
        form,
        FieldRow::new("Favorite color", false).focused(focus == Control::Color),
        None,
        TestId::Input(Field::Color),
        Line::from(vec![
            Span::styled("██", Style::default().fg(swatch)),
            Span::raw(" "),
            Span::styled(values.color.clone(), focus_style(focus == Control::Color)),
        ]),
    );

    let rating = usize::from(values.rating);
    let max = usize::from(*RATING_RANGE.end());
    let rating_label = format!("Satisfaction ({})", values.rating);
    draw_control(
        frame,
        &mut rows,
        elements,
        form,
        FieldRow::new(&rating_label, false).focused(focus == Control::Rating),
        None,
        TestId::Input(Field::Rating),
        Line::from(vec![
            Span::styled("■".repeat(rating), focus_style(focus == Control::Rating)),
            Span::styled("·".repeat(max.saturating_sub(rating)), Style::default().fg(Color::DarkGray)),
        ]),
    );

    draw_control(
        frame,
        &mut rows,
        elements,
        form,
        FieldRow::new("Profile picture", false).focused(focus == Control::File),
        None,
        TestId::InputFile,
        text_input_line(state.file_path(), "No file chosen", focus == Control::File),
    );

    draw_control(
        frame,
        &mut rows,
        elements,
        form,
        FieldRow::new("Newsletter", false).focused(focus == Control::Newsletter),
        None,
        TestId::Input(Field::Newsletter),
        toggle_line(
            if values.newsletter { "[ ON]" } else { "[OFF]" },
            "Subscribe",
            focus == Control::Newsletter,
        ),
    );
    draw_control(
        frame,
        &mut rows,
        elements,
        form,
        FieldRow::new("Terms", true).focused(focus == Control::Agree),
        Some(Field::Agree),
        TestId::Input(Field::Agree),
        toggle_line(
            if values.agree { "[x]" } else { "[ ]" },
            "I agree to terms",
            focus == Control::Agree,
        ),
    );

    rows.take(1);
    let buttons_area = rows.take(1);
    let mut x = buttons_area.x;
    for (control, id, text) in [
        (Control::Submit, TestId::BtnSubmit, "[ Submit ]"),
        (Control::Reset, TestId::BtnReset, "[ Reset ]"),
        (Control::OpenModal, TestId::BtnOpenModal, "[ Open Help Modal ]"),
    ] {
        let width = (text.chars().count() as u16).min(buttons_area.right().saturating_sub(x));
        let button_area = Rect::new(x, buttons_area.y, width, buttons_area.height);
        let style = if focus == control {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        frame.render_widget(Paragraph::new(Span::styled(text, style)), button_area);
        elements.register(id, button_area);
        x = button_area.right().saturating_add(2).min(buttons_area.right());
    }

    let footer = Paragraph::new(Line::from(
        "Tab: next  ←/→: change  Space: toggle  Enter: submit  Ctrl+Q: quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
