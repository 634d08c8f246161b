use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The role radio group's three tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Qa,
    Dev,
    Pm,
}

static ALL_ROLES: &[Role] = &[Role::Qa, Role::Dev, Role::Pm];

impl Role {
    /// Returns the lowercase tag stored in the form values.
    pub fn tag(&self) -> &'static str {
        match self {
            Role::Qa => "qa",
            Role::Dev => "dev",
            Role::Pm => "pm",
        }
    }

    /// Returns the label shown next to the radio button.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Qa => "QA",
            Role::Dev => "Developer",
            Role::Pm => "PM",
        }
    }

    /// Returns all roles in radio group order.
    pub fn all() -> &'static [Role] {
        ALL_ROLES
    }
}

/// Renders the tag upper-cased, as in the submissions table.
#[mutants::skip]
impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag().to_uppercase())
    }
}

/// Error returned when a string is not a known role tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::all()
            .iter()
            .copied()
            .find(|r| r.tag() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
