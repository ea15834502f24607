use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Bond type emitted between consecutive beads of a strand.
pub const POLYMER_BOND: &str = "polymer";
/// Angle type emitted for every consecutive bead triple of a strand.
pub const POLYMER_BEND: &str = "polymer_bend";
/// Default bond type for caller-supplied crosslinks.
pub const CROSSLINK_BOND: &str = "crosslink";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bead type string: '{0}'")]
pub struct ParseBeadTypeError(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BeadType {
    #[default]
    Free,
    Boundary,
    Custom(String),
}

impl BeadType {
    pub fn as_str(&self) -> &str {
        match self {
            BeadType::Free => "free",
            BeadType::Boundary => "boundary",
            BeadType::Custom(tag) => tag,
        }
    }

    /// Returns `true` for the two kinds managed by boundary tagging.
    #[inline]
    pub fn is_boundary_managed(&self) -> bool {
        matches!(self, BeadType::Free | BeadType::Boundary)
    }
}

impl fmt::Display for BeadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BeadType {
    type Err = ParseBeadTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Err(ParseBeadTypeError(s.to_string())),
            "free" => Ok(BeadType::Free),
            "boundary" => Ok(BeadType::Boundary),
            _ if trimmed.chars().any(char::is_whitespace) => {
                Err(ParseBeadTypeError(s.to_string()))
            }
            _ => Ok(BeadType::Custom(trimmed.to_string())),
        }
    }
}

impl From<BeadType> for String {
    fn from(kind: BeadType) -> Self {
        kind.as_str().to_string()
    }
}

impl TryFrom<String> for BeadType {
    type Error = ParseBeadTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Physical constants attached to a bond or angle type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeParameters {
    pub spring_constant: f64,
    pub rest_length: f64,
}

impl TypeParameters {
    pub fn new(spring_constant: f64, rest_length: f64) -> Self {
        Self {
            spring_constant,
            rest_length,
        }
    }
}

impl fmt::Display for TypeParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(k = {}, r0 = {})", self.spring_constant, self.rest_length)
    }
}

/// Which parameter table a type tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Bond,
    Angle,
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeCategory::Bond => write!(f, "bond"),
            TypeCategory::Angle => write!(f, "angle"),
        }
    }
}
