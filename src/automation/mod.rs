//! Element identifiers, the per-frame element map, and the headless driver built on
//! them.

mod driver;
mod elements;
mod scenario;
mod test_id;

pub use driver::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Driver, DriverError};
pub use elements::{ElementMap, text_in};
pub use scenario::{Scenario, ScenarioError, ScenarioReport, Step, StepFailure};
pub use test_id::{TestId, UnknownTestId};
