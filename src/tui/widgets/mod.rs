//! Reusable TUI widgets.

pub mod form;

pub use form::{FieldRow, cycle, draw_error, draw_label, mask, text_input_line};
