use serde::{Deserialize, Serialize};
use std::fmt;

/// Customer gender enumeration.
///
/// Optional on the customer record; when present it must be one of these
/// three codes. The store enforces the same set via a CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Wire/store code for this gender.
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// Parse a gender code from client input or a stored row.
    #[inline]
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Gender::parse("male"), Some(Gender::Male));
        assert_eq!(Gender::parse("female"), Some(Gender::Female));
        assert_eq!(Gender::parse("other"), Some(Gender::Other));
        assert_eq!(Gender::parse("unknown"), None);
        assert_eq!(Gender::parse("Male"), None);
    }

    #[test]
    fn test_code_roundtrip() {
        for gender in [Gender::Male, Gender::Female, Gender::Other] {
            assert_eq!(Gender::parse(gender.code()), Some(gender));
        }
    }
}
