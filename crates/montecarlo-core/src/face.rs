use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MonteCarloError;

/// Label printed on one side of a die.
///
/// Integer faces sort before text faces. Within a kind, integers compare
/// numerically and text compares lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Face {
    Int(i64),
    Text(String),
}

/// Which variant a [`Face`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceKind {
    Integer,
    Text,
}

impl Face {
    #[must_use]
    pub const fn kind(&self) -> FaceKind {
        match self {
            Self::Int(_) => FaceKind::Integer,
            Self::Text(_) => FaceKind::Text,
        }
    }

    /// Parse a comma-separated list such as `1,2,3` or `H,T`.
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::InvalidFace`] if any token is blank.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, MonteCarloError> {
        raw.split(',').map(str::parse::<Self>).collect()
    }
}

impl FromStr for Face {
    type Err = MonteCarloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(MonteCarloError::InvalidFace(s.to_string()));
        }
        Ok(token
            .parse::<i64>()
            .map_or_else(|_| Self::Text(token.to_string()), Self::Int))
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Face {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Face {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Face {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_sort_before_text() {
        let mut faces = vec![Face::from("b"), Face::Int(10), Face::from("a"), Face::Int(2)];
        faces.sort();
        assert_eq!(
            faces,
            vec![Face::Int(2), Face::Int(10), Face::from("a"), Face::from("b")]
        );
    }

    #[test]
    fn parse_distinguishes_kinds() {
        assert_eq!("4".parse::<Face>().expect("parse"), Face::Int(4));
        assert_eq!("-3".parse::<Face>().expect("parse"), Face::Int(-3));
        assert_eq!(" heads ".parse::<Face>().expect("parse"), Face::from("heads"));
        assert!("  ".parse::<Face>().is_err());
    }

    #[test]
    fn parse_list_splits_on_commas() {
        let faces = Face::parse_list("1,2,3").expect("parse");
        assert_eq!(faces, vec![Face::Int(1), Face::Int(2), Face::Int(3)]);
        assert!(Face::parse_list("1,,3").is_err());
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&vec![Face::Int(1), Face::from("x")]).expect("json");
        assert_eq!(json, r#"[1,"x"]"#);
        let back: Vec<Face> = serde_json::from_str(&json).expect("parse");
        assert_eq!(back, vec![Face::Int(1), Face::from("x")]);
    }

    #[test]
    fn display_is_bare_value() {
        assert_eq!(Face::Int(6).to_string(), "6");
        assert_eq!(Face::from("T").to_string(), "T");
        assert_eq!(Face::Int(6).kind(), FaceKind::Integer);
    }
}
