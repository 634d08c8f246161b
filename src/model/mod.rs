mod field;
mod form;
pub mod input;
mod region;
mod role;
mod submission;
mod validation;
mod values;

pub use field::{Field, FieldUpdate};
pub use form::{RegistrationForm, SubmitOutcome};
pub use region::{Region, UnknownRegion, cities_for};
pub use role::{Role, UnknownRole};
pub use submission::{NO_FILE, SubmissionHistory, SubmissionRecord};
pub use validation::{
    MIN_PASSWORD_LEN, ValidationError, ValidationErrors, validate, validate_email,
    validate_password,
};
pub use values::{DEFAULT_COLOR, FormValues, RATING_RANGE};
