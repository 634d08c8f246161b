use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::{Field, Role};

/// Stable identifier of a rendered element.
///
/// The string forms are the contract automation scripts address elements by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestId {
    PageRoot,
    CardForm,
    Form,
    /// The input control of a field. The bio renders as `textarea-bio`, state and city
    /// as `select-*`, newsletter as `switch-newsletter`, agree as `checkbox-agree`,
    /// rating as `input-range`; role has no single control (see [`TestId::RadioRole`]).
    Input(Field),
    /// The inline error slot under a validated field.
    Error(Field),
    RadioRole(Role),
    InputFile,
    BtnSubmit,
    BtnReset,
    BtnOpenModal,
    CardTable,
    BadgeSubmitted,
    Table,
    Empty,
    /// A submissions table row, 0-based.
    Row(usize),
    Modal,
    BtnCloseModal,
}

impl TestId {
    /// Fields that have an inline error slot.
    pub const VALIDATED: [Field; 5] = [
        Field::FirstName,
        Field::Email,
        Field::Password,
        Field::City,
        Field::Agree,
    ];

    /// Returns the identifier string.
    pub fn as_string(&self) -> String {
        match self {
            TestId::PageRoot => "page-root".into(),
            TestId::CardForm => "card-form".into(),
            TestId::Form => "form".into(),
            TestId::Input(field) => match field {
                Field::Bio => "textarea-bio".into(),
                Field::State => "select-state".into(),
                Field::City => "select-city".into(),
                Field::Newsletter => "switch-newsletter".into(),
                Field::Agree => "checkbox-agree".into(),
                Field::Rating => "input-range".into(),
                other => format!("input-{}", other.key()),
            },
            TestId::Error(field) => format!("error-{}", field.key()),
            TestId::RadioRole(role) => format!("radio-role-{}", role.tag()),
            TestId::InputFile => "input-file".into(),
            TestId::BtnSubmit => "btn-submit".into(),
            TestId::BtnReset => "btn-reset".into(),
            TestId::BtnOpenModal => "btn-open-modal".into(),
            TestId::CardTable => "card-table".into(),
            TestId::BadgeSubmitted => "badge-submitted".into(),
            TestId::Table => "table".into(),
            TestId::Empty => "empty".into(),
            TestId::Row(i) => format!("row-{i}"),
            TestId::Modal => "modal".into(),
            TestId::BtnCloseModal => "btn-close-modal".into(),
        }
    }

    /// Every identifier that is not parameterized by a row index.
    pub fn fixed() -> Vec<TestId> {
        let mut ids = vec![TestId::PageRoot, TestId::CardForm, TestId::Form];
        ids.extend(
            Field::all()
                .iter()
                .filter(|f| **f != Field::Role)
                .map(|f| TestId::Input(*f)),
        );
        ids.extend(Self::VALIDATED.iter().map(|f| TestId::Error(*f)));
        ids.extend(Role::all().iter().map(|r| TestId::RadioRole(*r)));
        ids.extend([
            TestId::InputFile,
            TestId::BtnSubmit,
            TestId::BtnReset,
            TestId::BtnOpenModal,
            TestId::CardTable,
            TestId::BadgeSubmitted,
            TestId::Table,
            TestId::Empty,
            TestId::Modal,
            TestId::BtnCloseModal,
        ]);
        ids
    }
}

#[mutants::skip]
impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

/// Error returned when a string names no known element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown element id: {0}")]
pub struct UnknownTestId(pub String);

impl FromStr for TestId {
    type Err = UnknownTestId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Canonical indices only: digits, no sign, no leading zero.
        if let Some(index) = s.strip_prefix("row-")
            && !index.is_empty()
            && index.bytes().all(|b| b.is_ascii_digit())
            && (index == "0" || !index.starts_with('0'))
            && let Ok(i) = index.parse::<usize>()
        {
            return Ok(TestId::Row(i));
        }
        TestId::fixed()
            .into_iter()
            .find(|id| id.as_string() == s)
            .ok_or_else(|| UnknownTestId(s.to_string()))
    }
}

impl Serialize for TestId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

impl<'de> Deserialize<'de> for TestId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_ids_match_page_contract() {
        let ids: Vec<String> = Field::all()
            .iter()
            .filter(|f| **f != Field::Role)
            .map(|f| TestId::Input(*f).to_string())
            .collect();
        assert_eq!(
            ids,
            vec![
                "input-firstName",
                "input-lastName",
                "input-email",
                "input-password",
                "textarea-bio",
                "select-state",
                "select-city",
                "switch-newsletter",
                "checkbox-agree",
                "input-range",
                "input-color",
                "input-date",
                "input-time",
            ]
        );
    }

    #[test]
    fn error_ids() {
        let ids: Vec<String> = TestId::VALIDATED
            .iter()
            .map(|f| TestId::Error(*f).to_string())
            .collect();
        assert_eq!(
            ids,
            vec![
                "error-firstName",
                "error-email",
                "error-password",
                "error-city",
                "error-agree",
            ]
        );
    }

    #[test]
    fn radio_and_control_ids() {
        assert_eq!(TestId::RadioRole(Role::Dev).to_string(), "radio-role-dev");
        assert_eq!(TestId::BtnOpenModal.to_string(), "btn-open-modal");
        assert_eq!(TestId::BadgeSubmitted.to_string(), "badge-submitted");
        assert_eq!(TestId::Row(12).to_string(), "row-12");
    }

    #[test]
    fn fixed_ids_are_unique() {
        let ids = TestId::fixed();
        let mut strings: Vec<String> = ids.iter().map(TestId::as_string).collect();
        strings.sort();
        strings.dedup();
        assert_eq!(strings.len(), ids.len());
    }

    #[test]
    fn every_fixed_id_parses_back() {
        for id in TestId::fixed() {
            assert_eq!(id.as_string().parse::<TestId>(), Ok(id));
        }
    }

    #[test]
    fn parse_row() {
        assert_eq!("row-3".parse::<TestId>(), Ok(TestId::Row(3)));
        assert_eq!("row-0".parse::<TestId>(), Ok(TestId::Row(0)));
        assert_eq!("row-12".parse::<TestId>(), Ok(TestId::Row(12)));
    }

    #[test]
    fn non_canonical_row_is_rejected() {
        for s in ["row-01", "row-+1", "row-00", "row-", "row- 1"] {
            assert_eq!(s.parse::<TestId>(), Err(UnknownTestId(s.to_string())), "{s}");
        }
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            "row-x".parse::<TestId>(),
            Err(UnknownTestId("row-x".to_string()))
        );
        assert!("input-role".parse::<TestId>().is_err());
    }

    #[test]
    fn deserializes_from_string() {
        let id: TestId = serde_json::from_str("\"btn-submit\"").unwrap();
        assert_eq!(id, TestId::BtnSubmit);
    }
}
