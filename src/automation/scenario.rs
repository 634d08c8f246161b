//! Scripted automation runs loaded from JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::driver::{Driver, DriverError};
use super::test_id::TestId;
use crate::model::SubmissionRecord;

/// Errors from loading or running a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The scenario is not valid JSON or has an unknown step.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The driver could not be created.
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    /// A step failed; later steps were not run.
    #[error("step {index} failed: {reason}")]
    StepFailed {
        /// 0-based index of the failing step.
        index: usize,
        /// What went wrong.
        reason: String,
    },
}

/// One scripted interaction or assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Fill { id: TestId, value: String },
    Click { id: TestId },
    Check { id: TestId },
    Uncheck { id: TestId },
    Select { id: TestId, value: String },
    SetFiles {
        id: TestId,
        #[serde(default)]
        path: Option<PathBuf>,
    },
    SetRange { id: TestId, value: u8 },
    AssertVisible { id: TestId },
    AssertHidden { id: TestId },
    /// Passes when the element's text contains `value`.
    AssertText { id: TestId, value: String },
    AssertRows { count: usize },
}

impl Step {
    fn run(&self, driver: &mut Driver) -> Result<(), String> {
        let driven = |result: Result<(), DriverError>| result.map_err(|e| e.to_string());
        match self {
            Step::Fill { id, value } => driven(driver.fill(*id, value)),
            Step::Click { id } => driven(driver.click(*id)),
            Step::Check { id } => driven(driver.set_checked(*id, true)),
            Step::Uncheck { id } => driven(driver.set_checked(*id, false)),
            Step::Select { id, value } => driven(driver.select_option(*id, value)),
            Step::SetFiles { id, path } => driven(driver.set_input_files(*id, path.clone())),
            Step::SetRange { id, value } => driven(driver.set_range(*id, *value)),
            Step::AssertVisible { id } => match driver.is_visible(*id) {
                Ok(true) => Ok(()),
                Ok(false) => Err(format!("expected {id} to be visible")),
                Err(e) => Err(e.to_string()),
            },
            Step::AssertHidden { id } => match driver.is_visible(*id) {
                Ok(false) => Ok(()),
                Ok(true) => Err(format!("expected {id} to be hidden")),
                Err(e) => Err(e.to_string()),
            },
            Step::AssertText { id, value } => {
                let text = driver.text_content(*id).map_err(|e| e.to_string())?;
                if text.contains(value.as_str()) {
                    Ok(())
                } else {
                    Err(format!("expected {id} to contain {value:?}, found {text:?}"))
                }
            }
            Step::AssertRows { count } => {
                let rows = driver.row_count();
                if rows == *count {
                    Ok(())
                } else {
                    Err(format!("expected {count} rows, found {rows}"))
                }
            }
        }
    }
}

/// An ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parses a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Loads a scenario from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ScenarioError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Runs the steps in order, stopping at the first failure.
    pub fn run(&self, driver: &mut Driver) -> ScenarioReport {
        let mut steps_run = 0;
        let mut failure = None;
        for (index, step) in self.steps.iter().enumerate() {
            steps_run += 1;
            if let Err(reason) = step.run(driver) {
                warn!(index, ?step, %reason, "scenario step failed");
                failure = Some(StepFailure { index, reason });
                break;
            }
        }
        info!(steps_run, passed = failure.is_none(), "scenario finished");
        ScenarioReport {
            steps_run,
            failure,
            submissions: driver.form().history().to_vec(),
        }
    }
}

/// The step that stopped a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepFailure {
    pub index: usize,
    pub reason: String,
}

/// Outcome of a scenario run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    /// Steps attempted, including a failing one.
    pub steps_run: usize,
    pub failure: Option<StepFailure>,
    /// Submission history at the end of the run.
    pub submissions: Vec<SubmissionRecord>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    /// Converts a failed run into [`ScenarioError::StepFailed`].
    pub fn check(&self) -> Result<(), ScenarioError> {
        match &self.failure {
            None => Ok(()),
            Some(StepFailure { index, reason }) => Err(ScenarioError::StepFailed {
                index: *index,
                reason: reason.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::automation::driver::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use crate::model::Field;

    fn driver() -> Driver {
        Driver::new(DEFAULT_WIDTH, DEFAULT_HEIGHT).unwrap()
    }

    const VALID_RUN: &str = r#"{
        "steps": [
            { "type": "fill", "id": "input-firstName", "value": "Jane" },
            { "type": "fill", "id": "input-email", "value": "jane@example.com" },
            { "type": "fill", "id": "input-password", "value": "secret1" },
            { "type": "select", "id": "select-city", "value": "Boston" },
            { "type": "check", "id": "checkbox-agree" },
            { "type": "click", "id": "btn-submit" },
            { "type": "assert_rows", "count": 1 },
            { "type": "assert_visible", "id": "badge-submitted" },
            { "type": "assert_text", "id": "row-0", "value": "Boston" }
        ]
    }"#;

    mod parsing {
        use super::*;

        #[test]
        fn parses_tagged_steps() {
            let scenario = Scenario::from_json(VALID_RUN).unwrap();
            assert_eq!(scenario.steps.len(), 9);
            assert_eq!(
                scenario.steps[0],
                Step::Fill {
                    id: TestId::Input(Field::FirstName),
                    value: "Jane".into()
                }
            );
            assert_eq!(scenario.steps[6], Step::AssertRows { count: 1 });
        }

        #[test]
        fn set_files_path_defaults_to_none() {
            let scenario =
                Scenario::from_json(r#"{"steps":[{"type":"set_files","id":"input-file"}]}"#)
                    .unwrap();
            assert_eq!(
                scenario.steps[0],
                Step::SetFiles {
                    id: TestId::InputFile,
                    path: None
                }
            );
        }

        #[test]
        fn unknown_id_is_rejected() {
            let err = Scenario::from_json(r#"{"steps":[{"type":"click","id":"btn-nope"}]}"#)
                .unwrap_err();
            assert!(matches!(err, ScenarioError::Json(_)));
        }

        #[test]
        fn unknown_step_type_is_rejected() {
            let err = Scenario::from_json(r#"{"steps":[{"type":"hover","id":"form"}]}"#)
                .unwrap_err();
            assert!(matches!(err, ScenarioError::Json(_)));
        }

        #[test]
        fn loads_from_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(VALID_RUN.as_bytes()).unwrap();
            let scenario = Scenario::from_path(file.path()).unwrap();
            assert_eq!(scenario.steps.len(), 9);
        }

        #[test]
        fn missing_file_is_io_error() {
            let dir = tempfile::tempdir().unwrap();
            let err = Scenario::from_path(&dir.path().join("missing.json")).unwrap_err();
            assert!(matches!(err, ScenarioError::Io(_)));
        }
    }

    mod running {
        use super::*;

        #[test]
        fn valid_run_passes_and_reports_history() {
            let scenario = Scenario::from_json(VALID_RUN).unwrap();
            let report = scenario.run(&mut driver());
            assert!(report.passed(), "{:?}", report.failure);
            assert_eq!(report.steps_run, 9);
            assert_eq!(report.submissions.len(), 1);
            assert!(report.check().is_ok());
        }

        #[test]
        fn stops_at_first_failing_step() {
            let scenario = Scenario {
                steps: vec![
                    Step::Click {
                        id: TestId::BtnSubmit,
                    },
                    Step::AssertRows { count: 1 },
                    Step::Click {
                        id: TestId::BtnReset,
                    },
                ],
            };
            let mut d = driver();
            let report = scenario.run(&mut d);
            assert_eq!(report.steps_run, 2);
            assert_eq!(report.failure.as_ref().map(|f| f.index), Some(1));
            assert!(d.form().errors().contains(Field::FirstName), "reset must not run");
            assert!(matches!(
                report.check(),
                Err(ScenarioError::StepFailed { index: 1, .. })
            ));
        }

        #[test]
        fn driver_errors_become_failures() {
            let scenario = Scenario {
                steps: vec![Step::SetRange {
                    id: TestId::Input(Field::Rating),
                    value: 9,
                }],
            };
            let report = scenario.run(&mut driver());
            let failure = report.failure.unwrap();
            assert!(failure.reason.contains("outside"), "{}", failure.reason);
        }

        #[test]
        fn assert_hidden_fails_when_visible() {
            let scenario = Scenario {
                steps: vec![Step::AssertHidden { id: TestId::Empty }],
            };
            assert!(!scenario.run(&mut driver()).passed());
        }

        #[test]
        fn report_serializes_history() {
            let scenario = Scenario::from_json(VALID_RUN).unwrap();
            let report = scenario.run(&mut driver());
            let json = serde_json::to_value(&report).unwrap();
            assert_eq!(json["steps_run"], 9);
            assert!(json["failure"].is_null());
            assert_eq!(json["submissions"][0]["city"], "Boston");
            assert_eq!(json["submissions"][0]["firstName"], "Jane");
        }
    }
}
