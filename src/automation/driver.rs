//! Headless driver: operates the app through element identifiers, the way a browser
//! automation tool operates a page through its test ids.

use std::io;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use tracing::debug;

use super::elements::text_in;
use super::test_id::TestId;
use crate::model::input::{is_hex_color, parse_date, parse_time};
use crate::model::{Field, FieldUpdate, RATING_RANGE, Region, RegistrationForm};
use crate::tui::screens::city_options;
use crate::tui::{Action, App};

/// Default headless terminal width.
pub const DEFAULT_WIDTH: u16 = 200;
/// Default headless terminal height.
pub const DEFAULT_HEIGHT: u16 = 50;

/// Errors returned by [`Driver`] operations.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// Rendering to the in-memory terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The element was not drawn in the current frame.
    #[error("element not rendered: {0}")]
    NotFound(TestId),

    /// The help modal is open and the element lies behind it.
    #[error("element {0} is covered by the modal")]
    Obscured(TestId),

    /// The element is not a control of the kind the operation needs.
    #[error("cannot {operation} {id}")]
    Unsupported {
        /// The addressed element.
        id: TestId,
        /// The attempted operation.
        operation: &'static str,
    },

    /// The select does not currently offer the value.
    #[error("{id} has no option {value:?}")]
    OptionNotFound {
        /// The addressed select.
        id: TestId,
        /// The requested option.
        value: String,
    },

    /// The value is not in the control's format.
    #[error("{value:?} is not a valid value for {id}")]
    InvalidValue {
        /// The addressed control.
        id: TestId,
        /// The rejected value.
        value: String,
    },

    /// The slider value lies outside the rating bounds.
    #[error("{value} is outside the range {min}..={max}")]
    OutOfRange {
        /// The rejected value.
        value: u8,
        /// Lower bound.
        min: u8,
        /// Upper bound.
        max: u8,
    },
}

/// Drives an [`App`] rendered into an in-memory terminal.
///
/// Every operation draws a fresh frame first, so lookups always see the current
/// layout, and draws again afterwards. An element scrolled out of view is scrolled
/// back in before it is looked up.
pub struct Driver {
    app: App,
    terminal: Terminal<TestBackend>,
}

impl Driver {
    /// Creates a driver around a fresh app on a `width` × `height` terminal.
    pub fn new(width: u16, height: u16) -> Result<Self, DriverError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let mut driver = Self {
            app: App::new(),
            terminal,
        };
        driver.render()?;
        Ok(driver)
    }

    /// Draws one frame.
    pub fn render(&mut self) -> Result<(), DriverError> {
        let app = &mut self.app;
        self.terminal.draw(|frame| app.draw(frame))?;
        Ok(())
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn form(&self) -> &RegistrationForm {
        self.app.form()
    }

    /// Replaces the value of a text-like control.
    pub fn fill(&mut self, id: TestId, value: &str) -> Result<(), DriverError> {
        self.locate(id)?;
        let invalid = || DriverError::InvalidValue {
            id,
            value: value.to_string(),
        };
        let update = match id {
            TestId::Input(Field::FirstName) => FieldUpdate::FirstName(value.into()),
            TestId::Input(Field::LastName) => FieldUpdate::LastName(value.into()),
            TestId::Input(Field::Email) => FieldUpdate::Email(value.into()),
            TestId::Input(Field::Password) => FieldUpdate::Password(value.into()),
            TestId::Input(Field::Bio) => FieldUpdate::Bio(value.into()),
            TestId::Input(Field::Date) => {
                if !value.is_empty() && parse_date(value).is_none() {
                    return Err(invalid());
                }
                FieldUpdate::Date(value.into())
            }
            TestId::Input(Field::Time) => {
                if !value.is_empty() && parse_time(value).is_none() {
                    return Err(invalid());
                }
                FieldUpdate::Time(value.into())
            }
            TestId::Input(Field::Color) => {
                if !is_hex_color(value) {
                    return Err(invalid());
                }
                FieldUpdate::Color(value.to_ascii_lowercase())
            }
            _ => {
                return Err(DriverError::Unsupported {
                    id,
                    operation: "fill",
                });
            }
        };
        self.perform(id, Action::Update(update))
    }

    /// Clicks an element. Clicking an element with no click behavior does nothing.
    pub fn click(&mut self, id: TestId) -> Result<(), DriverError> {
        self.locate(id)?;
        let values = self.app.form().values();
        let action = match id {
            TestId::BtnSubmit => Action::Submit,
            TestId::BtnReset => Action::Reset,
            TestId::BtnOpenModal => Action::OpenModal,
            TestId::BtnCloseModal => Action::CloseModal,
            TestId::RadioRole(role) => Action::Update(FieldUpdate::Role(role)),
            TestId::Input(Field::Agree) => Action::Update(FieldUpdate::Agree(!values.agree)),
            TestId::Input(Field::Newsletter) => {
                Action::Update(FieldUpdate::Newsletter(!values.newsletter))
            }
            _ => Action::None,
        };
        self.perform(id, action)
    }

    /// Checks or unchecks a checkbox, switch or radio. Radios cannot be unchecked.
    pub fn set_checked(&mut self, id: TestId, checked: bool) -> Result<(), DriverError> {
        self.locate(id)?;
        let update = match id {
            TestId::Input(Field::Agree) => FieldUpdate::Agree(checked),
            TestId::Input(Field::Newsletter) => FieldUpdate::Newsletter(checked),
            TestId::RadioRole(role) if checked => FieldUpdate::Role(role),
            _ => {
                return Err(DriverError::Unsupported {
                    id,
                    operation: if checked { "check" } else { "uncheck" },
                });
            }
        };
        self.perform(id, Action::Update(update))
    }

    /// Selects an option of the state or city select by value.
    pub fn select_option(&mut self, id: TestId, value: &str) -> Result<(), DriverError> {
        self.locate(id)?;
        let missing = || DriverError::OptionNotFound {
            id,
            value: value.to_string(),
        };
        let update = match id {
            TestId::Input(Field::State) => {
                FieldUpdate::State(value.parse::<Region>().map_err(|_| missing())?)
            }
            TestId::Input(Field::City) => {
                if !city_options(self.app.form()).iter().any(|c| *c == value) {
                    return Err(missing());
                }
                FieldUpdate::City(value.into())
            }
            _ => {
                return Err(DriverError::Unsupported {
                    id,
                    operation: "select",
                });
            }
        };
        self.perform(id, Action::Update(update))
    }

    /// Sets or clears the file control's selection.
    pub fn set_input_files(&mut self, id: TestId, path: Option<PathBuf>) -> Result<(), DriverError> {
        self.locate(id)?;
        if id != TestId::InputFile {
            return Err(DriverError::Unsupported {
                id,
                operation: "set files on",
            });
        }
        self.perform(id, Action::SelectFile(path))
    }

    /// Moves the rating slider to `value`.
    pub fn set_range(&mut self, id: TestId, value: u8) -> Result<(), DriverError> {
        self.locate(id)?;
        if id != TestId::Input(Field::Rating) {
            return Err(DriverError::Unsupported {
                id,
                operation: "set range on",
            });
        }
        if !RATING_RANGE.contains(&value) {
            return Err(DriverError::OutOfRange {
                value,
                min: *RATING_RANGE.start(),
                max: *RATING_RANGE.end(),
            });
        }
        self.perform(id, Action::Update(FieldUpdate::Rating(value)))
    }

    /// Sends a key press through the normal keyboard path.
    pub fn press(&mut self, code: KeyCode) -> Result<(), DriverError> {
        self.app.handle_key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
        self.render()
    }

    /// Returns `true` if the element is drawn once scrolled into view.
    pub fn is_visible(&mut self, id: TestId) -> Result<bool, DriverError> {
        self.render_revealed(id)?;
        Ok(self.app.elements().contains(id))
    }

    /// Returns the text drawn inside the element.
    pub fn text_content(&mut self, id: TestId) -> Result<String, DriverError> {
        self.render_revealed(id)?;
        let area = self
            .app
            .elements()
            .get(id)
            .ok_or(DriverError::NotFound(id))?;
        Ok(text_in(self.terminal.backend().buffer(), area))
    }

    /// Returns the number of submission rows in the table.
    pub fn row_count(&self) -> usize {
        self.app.form().history().len()
    }

    /// Renders and checks that `id` can receive input: drawn, and not behind the modal.
    fn locate(&mut self, id: TestId) -> Result<(), DriverError> {
        self.render_revealed(id)?;
        if !self.app.elements().contains(id) {
            return Err(DriverError::NotFound(id));
        }
        if self.app.modal().is_open() && !matches!(id, TestId::Modal | TestId::BtnCloseModal) {
            return Err(DriverError::Obscured(id));
        }
        Ok(())
    }

    /// Renders, scrolling `id` into view and rendering again if it was not drawn.
    fn render_revealed(&mut self, id: TestId) -> Result<(), DriverError> {
        self.render()?;
        if !self.app.elements().contains(id) {
            self.app.reveal(id);
            self.render()?;
        }
        Ok(())
    }

    fn perform(&mut self, id: TestId, action: Action) -> Result<(), DriverError> {
        debug!(%id, ?action, "driver action");
        self.app.apply(action);
        self.render()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::model::{FormValues, Role};

    fn driver() -> Driver {
        Driver::new(DEFAULT_WIDTH, DEFAULT_HEIGHT).unwrap()
    }

    fn fill_valid(d: &mut Driver) {
        d.fill(TestId::Input(Field::FirstName), "Jane").unwrap();
        d.fill(TestId::Input(Field::Email), "jane@example.com").unwrap();
        d.fill(TestId::Input(Field::Password), "secret1").unwrap();
        d.select_option(TestId::Input(Field::City), "Boston").unwrap();
        d.set_checked(TestId::Input(Field::Agree), true).unwrap();
    }

    mod locating {
        use super::*;

        #[test]
        fn fresh_page_shows_fixed_elements() {
            let mut d = driver();
            for id in [
                TestId::PageRoot,
                TestId::CardForm,
                TestId::Form,
                TestId::CardTable,
                TestId::Table,
                TestId::Empty,
                TestId::BtnSubmit,
                TestId::InputFile,
            ] {
                assert!(d.is_visible(id).unwrap(), "{id} should be visible");
            }
            assert!(!d.is_visible(TestId::BadgeSubmitted).unwrap());
            assert!(!d.is_visible(TestId::Modal).unwrap());
        }

        #[test]
        fn missing_element_is_not_found() {
            let mut d = driver();
            let err = d.click(TestId::BtnCloseModal).unwrap_err();
            assert!(matches!(err, DriverError::NotFound(TestId::BtnCloseModal)));
        }

        #[test]
        fn open_modal_blocks_page_controls() {
            let mut d = driver();
            d.click(TestId::BtnOpenModal).unwrap();
            let err = d.fill(TestId::Input(Field::FirstName), "x").unwrap_err();
            assert!(matches!(err, DriverError::Obscured(_)));
            d.click(TestId::BtnCloseModal).unwrap();
            d.fill(TestId::Input(Field::FirstName), "x").unwrap();
        }

        #[test]
        fn text_content_reads_drawn_text() {
            let mut d = driver();
            assert_eq!(d.text_content(TestId::Empty).unwrap(), "No submissions yet");
        }
    }

    mod fill {
        use super::*;

        #[test]
        fn sets_text_fields() {
            let mut d = driver();
            d.fill(TestId::Input(Field::LastName), "Doe").unwrap();
            d.fill(TestId::Input(Field::Bio), "line one\nline two").unwrap();
            assert_eq!(d.form().values().last_name, "Doe");
            assert_eq!(d.form().values().bio, "line one\nline two");
        }

        #[test]
        fn rejects_malformed_date_time_and_color() {
            let mut d = driver();
            for (field, value) in [
                (Field::Date, "15/10/2026"),
                (Field::Time, "25:00"),
                (Field::Color, "blue"),
            ] {
                let err = d.fill(TestId::Input(field), value).unwrap_err();
                assert!(matches!(err, DriverError::InvalidValue { .. }), "{field:?}");
            }
            assert_eq!(d.form().values(), &FormValues::default());
        }

        #[test]
        fn accepts_well_formed_and_empty_date() {
            let mut d = driver();
            d.fill(TestId::Input(Field::Date), "2026-10-15").unwrap();
            assert_eq!(d.form().values().date, "2026-10-15");
            d.fill(TestId::Input(Field::Date), "").unwrap();
            assert_eq!(d.form().values().date, "");
        }

        #[test]
        fn color_is_normalized_to_lower_case() {
            let mut d = driver();
            d.fill(TestId::Input(Field::Color), "#ABCDEF").unwrap();
            assert_eq!(d.form().values().color, "#abcdef");
        }

        #[test]
        fn non_text_control_is_unsupported() {
            let mut d = driver();
            let err = d.fill(TestId::BtnSubmit, "x").unwrap_err();
            assert!(matches!(err, DriverError::Unsupported { operation: "fill", .. }));
        }
    }

    mod selects {
        use super::*;

        #[test]
        fn state_then_city() {
            let mut d = driver();
            d.select_option(TestId::Input(Field::State), "CA").unwrap();
            d.select_option(TestId::Input(Field::City), "San Diego").unwrap();
            assert_eq!(d.form().values().state, Region::Ca);
            assert_eq!(d.form().values().city, "San Diego");
        }

        #[test]
        fn city_of_other_state_is_not_offered() {
            let mut d = driver();
            let err = d
                .select_option(TestId::Input(Field::City), "Miami")
                .unwrap_err();
            assert!(matches!(err, DriverError::OptionNotFound { .. }));
        }

        #[test]
        fn placeholder_option_can_be_selected() {
            let mut d = driver();
            d.select_option(TestId::Input(Field::City), "Boston").unwrap();
            d.select_option(TestId::Input(Field::City), "").unwrap();
            assert_eq!(d.form().values().city, "");
        }

        #[test]
        fn unknown_state_is_not_offered() {
            let mut d = driver();
            let err = d
                .select_option(TestId::Input(Field::State), "NY")
                .unwrap_err();
            assert!(matches!(err, DriverError::OptionNotFound { .. }));
        }
    }

    mod controls {
        use super::*;

        #[test]
        fn radios_select_role() {
            let mut d = driver();
            d.click(TestId::RadioRole(Role::Pm)).unwrap();
            assert_eq!(d.form().values().role, Role::Pm);
            let err = d
                .set_checked(TestId::RadioRole(Role::Pm), false)
                .unwrap_err();
            assert!(matches!(err, DriverError::Unsupported { .. }));
        }

        #[test]
        fn click_toggles_switch() {
            let mut d = driver();
            d.click(TestId::Input(Field::Newsletter)).unwrap();
            assert!(d.form().values().newsletter);
            d.click(TestId::Input(Field::Newsletter)).unwrap();
            assert!(!d.form().values().newsletter);
        }

        #[test]
        fn range_bounds_are_enforced() {
            let mut d = driver();
            d.set_range(TestId::Input(Field::Rating), 5).unwrap();
            assert_eq!(d.form().values().rating, 5);
            let err = d.set_range(TestId::Input(Field::Rating), 6).unwrap_err();
            assert!(matches!(err, DriverError::OutOfRange { value: 6, .. }));
            let err = d.set_range(TestId::Input(Field::Rating), 0).unwrap_err();
            assert!(matches!(err, DriverError::OutOfRange { value: 0, .. }));
        }

        #[test]
        fn file_selection_and_clear() {
            let mut d = driver();
            d.set_input_files(TestId::InputFile, Some(PathBuf::from("/tmp/avatar.png")))
                .unwrap();
            assert_eq!(d.form().selected_file(), Some(Path::new("/tmp/avatar.png")));
            d.set_input_files(TestId::InputFile, None).unwrap();
            assert_eq!(d.form().selected_file(), None);
        }

        #[test]
        fn press_goes_through_keyboard_path() {
            let mut d = driver();
            d.press(KeyCode::Char('J')).unwrap();
            assert_eq!(d.form().values().first_name, "J");
        }
    }

    mod submitting {
        use super::*;

        #[test]
        fn valid_submit_adds_row_and_badge() {
            let mut d = driver();
            fill_valid(&mut d);
            d.click(TestId::BtnSubmit).unwrap();
            assert_eq!(d.row_count(), 1);
            assert!(d.is_visible(TestId::BadgeSubmitted).unwrap());
            assert!(!d.is_visible(TestId::Empty).unwrap());
            let row = d.text_content(TestId::Row(0)).unwrap();
            assert!(row.contains("Boston"), "row: {row}");
        }

        #[test]
        fn invalid_submit_shows_errors() {
            let mut d = driver();
            d.click(TestId::BtnSubmit).unwrap();
            assert_eq!(d.row_count(), 0);
            assert_eq!(
                d.text_content(TestId::Error(Field::FirstName)).unwrap(),
                "First name is required"
            );
            assert!(d.is_visible(TestId::Error(Field::Agree)).unwrap());
        }

        #[test]
        fn reset_keeps_rows_and_hides_badge() {
            let mut d = driver();
            fill_valid(&mut d);
            d.click(TestId::BtnSubmit).unwrap();
            d.click(TestId::BtnReset).unwrap();
            assert_eq!(d.row_count(), 1);
            assert!(!d.is_visible(TestId::BadgeSubmitted).unwrap());
            assert_eq!(d.form().values(), &FormValues::default());
        }

        #[test]
        fn rows_below_the_fold_are_scrolled_into_view() {
            let mut d = driver();
            for _ in 0..45 {
                fill_valid(&mut d);
                d.click(TestId::BtnSubmit).unwrap();
            }
            assert_eq!(d.row_count(), 45);
            assert!(d.is_visible(TestId::Row(44)).unwrap(), "newest row follows");
            assert!(d.is_visible(TestId::Row(40)).unwrap());
            assert!(d.text_content(TestId::Row(44)).unwrap().contains("Boston"));

            assert!(d.is_visible(TestId::Row(0)).unwrap());
            assert!(!d.app().elements().contains(TestId::Row(44)));
            assert!(d.text_content(TestId::Row(0)).unwrap().contains("Jane"));
            assert!(!d.is_visible(TestId::Row(45)).unwrap());
            assert!(matches!(
                d.text_content(TestId::Row(45)),
                Err(DriverError::NotFound(TestId::Row(45)))
            ));
        }

        #[test]
        fn controls_below_the_fold_are_scrolled_into_view() {
            let mut d = Driver::new(80, 24).unwrap();
            d.click(TestId::BtnSubmit).unwrap();
            for field in TestId::VALIDATED {
                assert!(d.is_visible(TestId::Error(field)).unwrap(), "{field:?}");
            }
            for id in [TestId::BtnSubmit, TestId::BtnReset, TestId::BtnOpenModal] {
                assert!(d.is_visible(id).unwrap(), "{id}");
            }
            d.click(TestId::BtnReset).unwrap();
            assert_eq!(d.form().values(), &FormValues::default());
        }
    }
}
