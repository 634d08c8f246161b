//! Actions returned by screen event handlers.

use std::path::PathBuf;

use crossterm::event::KeyEvent;

use crate::model::{FieldUpdate, RegistrationForm};

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` applies these to the [`RegistrationForm`] and the modal state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Replace one field value.
    Update(FieldUpdate),
    /// Select a file for the file control, or clear the selection.
    SelectFile(Option<PathBuf>),
    /// Validate and record a submission.
    Submit,
    /// Restore the form to its defaults.
    Reset,
    /// Show the help modal.
    OpenModal,
    /// Hide the help modal.
    CloseModal,
    /// Quit the application.
    Quit,
}

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Process a key event against the current form and return an [`Action`] for the
    /// `App` to apply.
    fn handle_key(&mut self, key: KeyEvent, form: &RegistrationForm) -> Action;
}
