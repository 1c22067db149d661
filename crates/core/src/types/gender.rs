//! Customer gender sum type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`Gender`] from a string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown gender: {0:?} (expected MALE or FEMALE)")]
pub struct GenderError(pub String);

/// Customer gender.
///
/// A closed sum type; serialized as `MALE` / `FEMALE` at every boundary,
/// including the database column, which stores the same uppercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// The uppercase text form stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = GenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MALE" => Ok(Self::Male),
            "FEMALE" => Ok(Self::Female),
            other => Err(GenderError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        assert_eq!("MALE".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("FEMALE".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(Gender::Male.as_str(), "MALE");
    }

    #[test]
    fn test_parse_rejects_free_form() {
        assert!("male".parse::<Gender>().is_err());
        assert!("".parse::<Gender>().is_err());
        assert!("OTHER".parse::<Gender>().is_err());
    }

    #[test]
    fn test_serde_uppercase() {
        let json = serde_json::to_string(&Gender::Female).unwrap();
        assert_eq!(json, r#""FEMALE""#);
        let back: Gender = serde_json::from_str(r#""MALE""#).unwrap();
        assert_eq!(back, Gender::Male);
    }
}
