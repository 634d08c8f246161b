use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::TableState;
use ratatui::{Frame, Terminal};
use tracing::{debug, info};

use crate::automation::{ElementMap, TestId};
use crate::model::{RegistrationForm, SubmitOutcome};

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{
    HelpModal, RegistrationState, control_for, draw_help, draw_registration, draw_submissions,
};
use super::shell::draw_shell;

/// Width the form card takes when the terminal is wide enough for both cards.
const FORM_WIDTH: u16 = 64;

/// Top-level application state.
///
/// Owns the single [`RegistrationForm`] for the session and lends it to the views.
pub struct App {
    form: RegistrationForm,
    registration: RegistrationState,
    modal: HelpModal,
    /// Scroll position of the submissions table; the selected row stays on screen.
    table: TableState,
    elements: ElementMap,
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new `App` with a default form and the modal closed.
    pub fn new() -> Self {
        Self {
            form: RegistrationForm::new(),
            registration: RegistrationState::new(),
            modal: HelpModal::new(),
            table: TableState::default(),
            elements: ElementMap::default(),
            should_quit: false,
        }
    }

    /// Main event loop: draw → read event → dispatch → check quit.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Renders the page and records where every identified element landed.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn draw(&mut self, frame: &mut Frame) {
        self.elements.clear();
        let body = draw_shell(frame, frame.area(), &mut self.elements);

        let form_width = if body.width >= 2 * FORM_WIDTH {
            FORM_WIDTH
        } else {
            body.width / 2
        };
        let [form_area, table_area] =
            Layout::horizontal([Constraint::Length(form_width), Constraint::Min(0)]).areas(body);
        draw_registration(
            &self.registration,
            &self.form,
            frame,
            form_area,
            &mut self.elements,
        );
        draw_submissions(
            &self.form,
            &mut self.table,
            frame,
            table_area,
            &mut self.elements,
        );
        draw_help(&self.modal, frame, body, &mut self.elements);
    }

    /// Handles a key event: global keys first, then the modal if open, else the form.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
            {
                self.apply(Action::Quit);
            }
            return;
        }

        let action = if self.modal.is_open() {
            self.modal.handle_key(key, &self.form)
        } else {
            match key.code {
                KeyCode::PageUp | KeyCode::PageDown => {
                    self.page_table(key.code == KeyCode::PageDown);
                    return;
                }
                _ => self.registration.handle_key(key, &self.form),
            }
        };
        self.apply(action);
    }

    /// Applies an [`Action`] to the session state.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::None => return,
            Action::Update(update) => {
                debug!(field = %update.field(), "field updated");
                self.form.update(update);
            }
            Action::SelectFile(path) => {
                debug!(file = ?path, "file selection changed");
                self.form.select_file(path);
            }
            Action::Submit => match self.form.submit() {
                SubmitOutcome::Appended { row } => {
                    info!(row, city = %self.form.values().city, "submission recorded");
                    self.table.select(Some(row));
                }
                SubmitOutcome::Rejected { errors } => {
                    let fields: Vec<&str> =
                        self.form.errors().iter().map(|(f, _)| f.key()).collect();
                    info!(errors, ?fields, "submission rejected");
                }
            },
            Action::Reset => {
                info!("form reset");
                self.form.reset();
            }
            Action::OpenModal => {
                info!("help modal opened");
                self.modal.open();
            }
            Action::CloseModal => {
                info!("help modal closed");
                self.modal.close();
            }
            Action::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }
        }
        self.registration.sync(&self.form);
    }

    /// Scrolls the submissions table by the number of rows last on screen.
    fn page_table(&mut self, down: bool) {
        let len = self.form.history().len();
        if len == 0 {
            return;
        }
        let page = self
            .elements
            .iter()
            .filter(|(id, _)| matches!(id, TestId::Row(_)))
            .count()
            .max(1);
        let current = self.table.selected().unwrap_or(0);
        let next = if down {
            current.saturating_add(page).min(len - 1)
        } else {
            current.saturating_sub(page)
        };
        debug!(row = next, "submissions table paged");
        self.table.select(Some(next));
    }

    /// Scrolls the element with `id` into view for the next frame.
    ///
    /// Table rows are selected; form controls take focus while the modal is closed.
    pub fn reveal(&mut self, id: TestId) {
        match id {
            TestId::Row(i) if i < self.form.history().len() => self.table.select(Some(i)),
            _ if !self.modal.is_open() => {
                if let Some(control) = control_for(id) {
                    self.registration.set_focus(control);
                }
            }
            _ => {}
        }
    }

    /// Returns the session's form state.
    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// Returns the registration screen state.
    pub fn registration(&self) -> &RegistrationState {
        &self.registration
    }

    /// Returns the help modal state.
    pub fn modal(&self) -> &HelpModal {
        &self.modal
    }

    /// Returns the submissions table scroll state.
    pub fn table(&self) -> &TableState {
        &self.table
    }

    /// Returns the elements drawn in the last frame.
    pub fn elements(&self) -> &ElementMap {
        &self.elements
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
