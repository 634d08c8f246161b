use std::path::{Path, PathBuf};

use super::field::FieldUpdate;
use super::submission::{SubmissionHistory, SubmissionRecord};
use super::validation::{ValidationErrors, validate};
use super::values::FormValues;

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and a record was appended at `row`.
    Appended { row: usize },
    /// Validation failed on `errors` fields; nothing was recorded.
    Rejected { errors: usize },
}

/// All session state behind the registration form.
///
/// Owns the field values, the errors of the last validation pass, the file
/// selection, the submission history and the `submitted` flag.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    values: FormValues,
    errors: ValidationErrors,
    file: Option<PathBuf>,
    history: SubmissionHistory,
    submitted: bool,
}

impl RegistrationForm {
    /// Creates a form with default values and an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces a single field. No validation runs and `city` is never reset.
    pub fn update(&mut self, update: FieldUpdate) {
        self.values.apply(update);
    }

    /// Selects a file for the file control, or clears the selection.
    pub fn select_file(&mut self, path: Option<PathBuf>) {
        self.file = path;
    }

    /// Returns the cities offered for the current state.
    pub fn cities(&self) -> &'static [&'static str] {
        self.values.state.cities()
    }

    /// Re-evaluates every rule, replacing the previous errors. Returns `true` if valid.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.values);
        self.errors.is_empty()
    }

    /// Validates and, on success, appends a snapshot and sets the `submitted` flag.
    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.validate() {
            return SubmitOutcome::Rejected {
                errors: self.errors.len(),
            };
        }
        let record = SubmissionRecord::new(&self.values, self.selected_file_name());
        let row = self.history.push(record);
        self.submitted = true;
        SubmitOutcome::Appended { row }
    }

    /// Restores default values and clears errors, the file selection and the
    /// `submitted` flag. The history is kept.
    pub fn reset(&mut self) {
        self.values = FormValues::default();
        self.errors = ValidationErrors::default();
        self.file = None;
        self.submitted = false;
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn selected_file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Returns the final path component of the selected file, if any.
    pub fn selected_file_name(&self) -> Option<String> {
        self.file
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
    }

    pub fn history(&self) -> &[SubmissionRecord] {
        self.history.records()
    }

    /// Returns `true` after a successful submit, until the next reset.
    pub fn submitted(&self) -> bool {
        self.submitted
    }
}
