use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A state code offered by the state selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Region {
    #[default]
    #[serde(rename = "MA")]
    Ma,
    #[serde(rename = "FL")]
    Fl,
    #[serde(rename = "CA")]
    Ca,
}

static ALL_REGIONS: &[Region] = &[Region::Ma, Region::Fl, Region::Ca];

static MA_CITIES: &[&str] = &["Boston", "Cambridge", "Worcester", "Springfield"];
static FL_CITIES: &[&str] = &["Miami", "Tampa", "Orlando", "Jacksonville"];
static CA_CITIES: &[&str] = &["San Francisco", "Los Angeles", "San Diego", "Sacramento"];

impl Region {
    /// Returns the two-letter code shown in the selector and the submissions table.
    pub fn code(&self) -> &'static str {
        match self {
            Region::Ma => "MA",
            Region::Fl => "FL",
            Region::Ca => "CA",
        }
    }

    /// Returns the selectable cities for this region, in catalog order.
    pub fn cities(&self) -> &'static [&'static str] {
        match self {
            Region::Ma => MA_CITIES,
            Region::Fl => FL_CITIES,
            Region::Ca => CA_CITIES,
        }
    }

    /// Returns all regions in selector order.
    pub fn all() -> &'static [Region] {
        ALL_REGIONS
    }
}

/// Looks up the cities for a state code. Unknown codes yield an empty list.
pub fn cities_for(code: &str) -> &'static [&'static str] {
    match code.parse::<Region>() {
        Ok(region) => region.cities(),
        Err(_) => &[],
    }
}

#[mutants::skip]
impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a string is not a known state code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown state code: {0}")]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::all()
            .iter()
            .copied()
            .find(|r| r.code() == s)
            .ok_or_else(|| UnknownRegion(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_in_selector_order() {
        let codes: Vec<&str> = Region::all().iter().map(Region::code).collect();
        assert_eq!(codes, vec!["MA", "FL", "CA"]);
    }

    #[test]
    fn default_is_first_region() {
        assert_eq!(Region::default(), Region::Ma);
        assert_eq!(Region::all().first(), Some(&Region::default()));
    }

    #[test]
    fn ma_cities_in_catalog_order() {
        assert_eq!(
            Region::Ma.cities(),
            &["Boston", "Cambridge", "Worcester", "Springfield"]
        );
    }

    #[test]
    fn every_region_has_four_cities() {
        for region in Region::all() {
            assert_eq!(region.cities().len(), 4, "{region:?}");
        }
    }

    #[test]
    fn cities_for_known_code() {
        assert_eq!(cities_for("FL"), FL_CITIES);
        assert_eq!(cities_for("CA"), CA_CITIES);
    }

    #[test]
    fn cities_for_unknown_code_is_empty() {
        assert!(cities_for("TX").is_empty());
        assert!(cities_for("").is_empty());
        assert!(cities_for("ma").is_empty());
    }

    #[test]
    fn parse_round_trips_code() {
        for region in Region::all() {
            assert_eq!(region.code().parse::<Region>(), Ok(*region));
        }
    }

    #[test]
    fn parse_unknown_code_fails() {
        assert_eq!(
            "NY".parse::<Region>(),
            Err(UnknownRegion("NY".to_string()))
        );
    }

    #[test]
    fn serializes_as_code() {
        assert_eq!(serde_json::to_string(&Region::Fl).unwrap(), "\"FL\"");
    }
}
