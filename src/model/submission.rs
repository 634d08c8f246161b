use serde::{Deserialize, Serialize};

use super::values::FormValues;

/// Placeholder rendered in the file column when no file was attached.
pub const NO_FILE: &str = "—";

/// Snapshot of the form taken by a successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(flatten)]
    values: FormValues,
    file_name: Option<String>,
}

impl SubmissionRecord {
    /// Captures a copy of `values` together with the attached file name, if any.
    pub fn new(values: &FormValues, file_name: Option<String>) -> Self {
        Self {
            values: values.clone(),
            file_name,
        }
    }

    /// Returns the captured form values.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Returns the attached file name, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Returns the cells of this record's table row, in column order.
    pub fn table_cells(&self) -> [String; 8] {
        let v = &self.values;
        [
            v.first_name.clone(),
            v.last_name.clone(),
            v.email.clone(),
            v.state.to_string(),
            v.city.clone(),
            v.role.to_string(),
            v.rating.to_string(),
            self.file_name().unwrap_or(NO_FILE).to_string(),
        ]
    }
}

/// Append-only, ordered list of submission records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubmissionHistory(Vec<SubmissionRecord>);

impl SubmissionHistory {
    /// Appends a record and returns its row index.
    pub fn push(&mut self, record: SubmissionRecord) -> usize {
        self.0.push(record);
        self.0.len() - 1
    }

    /// Returns the records in submission order.
    pub fn records(&self) -> &[SubmissionRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
