use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::field::FieldUpdate;
use super::region::Region;
use super::role::Role;

/// Bounds of the satisfaction range control.
pub const RATING_RANGE: RangeInclusive<u8> = 1..=5;

/// Initial value of the color picker.
pub const DEFAULT_COLOR: &str = "#4f46e5";

/// The current value of every form control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub bio: String,
    pub state: Region,
    pub city: String,
    pub role: Role,
    pub newsletter: bool,
    pub agree: bool,
    pub rating: u8,
    pub color: String,
    pub date: String,
    pub time: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: String::new(),
            bio: String::new(),
            state: Region::default(),
            city: String::new(),
            role: Role::default(),
            newsletter: false,
            agree: false,
            rating: 3,
            color: DEFAULT_COLOR.to_string(),
            date: String::new(),
            time: String::new(),
        }
    }
}

impl FormValues {
    /// Replaces exactly the field named by `update`, leaving every other field untouched.
    ///
    /// Changing `state` does not touch `city`, even when the city is not offered for
    /// the new state.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::FirstName(v) => self.first_name = v,
            FieldUpdate::LastName(v) => self.last_name = v,
            FieldUpdate::Email(v) => self.email = v,
            FieldUpdate::Password(v) => self.password = v,
            FieldUpdate::Bio(v) => self.bio = v,
            FieldUpdate::State(v) => self.state = v,
            FieldUpdate::City(v) => self.city = v,
            FieldUpdate::Role(v) => self.role = v,
            FieldUpdate::Newsletter(v) => self.newsletter = v,
            FieldUpdate::Agree(v) => self.agree = v,
            FieldUpdate::Rating(v) => {
                self.rating = v.clamp(*RATING_RANGE.start(), *RATING_RANGE.end())
            }
            FieldUpdate::Color(v) => self.color = v,
            FieldUpdate::Date(v) => self.date = v,
            FieldUpdate::Time(v) => self.time = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_tuple() {
        let v = FormValues::default();
        assert_eq!(v.first_name, "");
        assert_eq!(v.last_name, "");
        assert_eq!(v.email, "");
        assert_eq!(v.password, "");
        assert_eq!(v.bio, "");
        assert_eq!(v.state, Region::Ma);
        assert_eq!(v.city, "");
        assert_eq!(v.role, Role::Qa);
        assert!(!v.newsletter);
        assert!(!v.agree);
        assert_eq!(v.rating, 3);
        assert_eq!(v.color, "#4f46e5");
        assert_eq!(v.date, "");
        assert_eq!(v.time, "");
    }

    #[test]
    fn apply_replaces_only_one_field() {
        let mut v = FormValues::default();
        v.apply(FieldUpdate::FirstName("Jane".into()));
        let expected = FormValues {
            first_name: "Jane".into(),
            ..FormValues::default()
        };
        assert_eq!(v, expected);
    }

    #[test]
    fn state_change_keeps_city() {
        let mut v = FormValues::default();
        v.apply(FieldUpdate::City("Boston".into()));
        v.apply(FieldUpdate::State(Region::Fl));
        assert_eq!(v.state, Region::Fl);
        assert_eq!(v.city, "Boston");
    }

    #[test]
    fn rating_is_clamped() {
        let mut v = FormValues::default();
        v.apply(FieldUpdate::Rating(0));
        assert_eq!(v.rating, 1);
        v.apply(FieldUpdate::Rating(9));
        assert_eq!(v.rating, 5);
        v.apply(FieldUpdate::Rating(4));
        assert_eq!(v.rating, 4);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(FormValues::default()).unwrap();
        assert_eq!(json["firstName"], "");
        assert_eq!(json["state"], "MA");
        assert_eq!(json["role"], "qa");
        assert_eq!(json["rating"], 3);
        assert_eq!(json["color"], "#4f46e5");
    }
}
