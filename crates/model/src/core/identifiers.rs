use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Turns a name typed by a test author into the key used for lookups.
pub trait NameNormaliser: Send + Sync {
    fn normalise(&self, raw: &str) -> String;
}

/// Drops all whitespace and lower-cases, so `"Order Id"` and `"orderid"` match.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNormaliser;

impl NameNormaliser for DefaultNormaliser {
    fn normalise(&self, raw: &str) -> String {
        normalise_name(raw)
    }
}

pub fn normalise_name(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Case folding applied to qualifiers before they are matched against the
/// catalog. Catalog comparisons are case-sensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierCase {
    #[default]
    Upper,
    Lower,
    Preserve,
}

impl IdentifierCase {
    pub fn apply(&self, ident: &str) -> String {
        match self {
            IdentifierCase::Upper => ident.to_uppercase(),
            IdentifierCase::Lower => ident.to_lowercase(),
            IdentifierCase::Preserve => ident.to_string(),
        }
    }
}

impl FromStr for IdentifierCase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upper" => Ok(IdentifierCase::Upper),
            "lower" => Ok(IdentifierCase::Lower),
            "preserve" => Ok(IdentifierCase::Preserve),
            other => Err(format!("Unknown identifier case: {other}")),
        }
    }
}

impl fmt::Display for IdentifierCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierCase::Upper => f.write_str("upper"),
            IdentifierCase::Lower => f.write_str("lower"),
            IdentifierCase::Preserve => f.write_str("preserve"),
        }
    }
}
