//! TUI screen implementations.

pub mod help;
pub mod registration;
pub mod submissions;

pub use help::{HelpModal, ModalButton, draw_help};
pub use registration::{Control, RegistrationState, city_options, control_for, draw_registration};
pub use submissions::draw_submissions;
