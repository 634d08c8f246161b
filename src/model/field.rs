use std::fmt;

use super::region::Region;
use super::role::Role;

/// Every key of [`FormValues`](super::FormValues), in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
    Bio,
    State,
    City,
    Role,
    Newsletter,
    Agree,
    Rating,
    Color,
    Date,
    Time,
}

static ALL_FIELDS: &[Field] = &[
    Field::FirstName,
    Field::LastName,
    Field::Email,
    Field::Password,
    Field::Bio,
    Field::State,
    Field::City,
    Field::Role,
    Field::Newsletter,
    Field::Agree,
    Field::Rating,
    Field::Color,
    Field::Date,
    Field::Time,
];

impl Field {
    /// Returns the camelCase key used in element identifiers and serialized values.
    pub fn key(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Password => "password",
            Field::Bio => "bio",
            Field::State => "state",
            Field::City => "city",
            Field::Role => "role",
            Field::Newsletter => "newsletter",
            Field::Agree => "agree",
            Field::Rating => "rating",
            Field::Color => "color",
            Field::Date => "date",
            Field::Time => "time",
        }
    }

    /// Returns all fields in document order.
    pub fn all() -> &'static [Field] {
        ALL_FIELDS
    }
}

#[mutants::skip]
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single-field replacement applied to the form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    FirstName(String),
    LastName(String),
    Email(String),
    Password(String),
    Bio(String),
    State(Region),
    City(String),
    Role(Role),
    Newsletter(bool),
    Agree(bool),
    Rating(u8),
    Color(String),
    Date(String),
    Time(String),
}

impl FieldUpdate {
    /// Returns the field this update replaces.
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::FirstName(_) => Field::FirstName,
            FieldUpdate::LastName(_) => Field::LastName,
            FieldUpdate::Email(_) => Field::Email,
            FieldUpdate::Password(_) => Field::Password,
            FieldUpdate::Bio(_) => Field::Bio,
            FieldUpdate::State(_) => Field::State,
            FieldUpdate::City(_) => Field::City,
            FieldUpdate::Role(_) => Field::Role,
            FieldUpdate::Newsletter(_) => Field::Newsletter,
            FieldUpdate::Agree(_) => Field::Agree,
            FieldUpdate::Rating(_) => Field::Rating,
            FieldUpdate::Color(_) => Field::Color,
            FieldUpdate::Date(_) => Field::Date,
            FieldUpdate::Time(_) => Field::Time,
        }
    }
}
