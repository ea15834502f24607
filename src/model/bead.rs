use super::types::BeadType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bead {
    pub position: Vec<f64>,
    pub kind: BeadType,
}

impl Bead {
    pub fn new(position: impl Into<Vec<f64>>, kind: BeadType) -> Self {
        Self {
            position: position.into(),
            kind,
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.position.first().copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position.get(1).copied().unwrap_or(0.0)
    }
}
