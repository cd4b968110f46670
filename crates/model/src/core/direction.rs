use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Which way a value travels through a routine call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    In,
    Out,
    InOut,
    /// The routine's own return slot. Never parsed from a mode code: it is
    /// implied by the synthetic metadata row that carries no parameter name.
    Return,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Direction {0} is not supported")]
pub struct UnknownDirection(pub String);

impl Direction {
    /// Whether the server writes a value back through this binding.
    pub fn is_output(&self) -> bool {
        !matches!(self, Direction::In)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "IN",
            Direction::Out => "OUT",
            Direction::InOut => "INOUT",
            Direction::Return => "RETURN",
        }
    }
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(Direction::In),
            "OUT" => Ok(Direction::Out),
            "INOUT" => Ok(Direction::InOut),
            other => Err(UnknownDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_codes() {
        assert_eq!("IN".parse::<Direction>(), Ok(Direction::In));
        assert_eq!("OUT".parse::<Direction>(), Ok(Direction::Out));
        assert_eq!("INOUT".parse::<Direction>(), Ok(Direction::InOut));
    }

    #[test]
    fn rejects_unknown_and_lowercase_codes() {
        assert_eq!(
            "in".parse::<Direction>(),
            Err(UnknownDirection("in".to_string()))
        );
        assert!("RETURN".parse::<Direction>().is_err());
        assert!("VARIADIC".parse::<Direction>().is_err());
    }

    #[test]
    fn only_in_is_not_output() {
        assert!(!Direction::In.is_output());
        assert!(Direction::Out.is_output());
        assert!(Direction::InOut.is_output());
        assert!(Direction::Return.is_output());
    }
}
