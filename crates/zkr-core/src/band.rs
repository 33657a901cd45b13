//! # Reserve Bands
//!
//! The coarse public solvency classification. A band is derived from the
//! reserve/liability ratio and replaces it: the ratio itself is never part
//! of any public value.
//!
//! | band | ratio              | label        |
//! |------|--------------------|--------------|
//! | 0    | `< 100%`           | `Insolvent`  |
//! | 1    | `100% ..< 110%`    | `100–110%`   |
//! | 2    | `110% ..< 120%`    | `110–120%`   |
//! | 3    | `>= 120%`          | `≥ 120%`     |

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::StructuralInputError;

/// Public solvency band. Serializes as its integer value `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ReserveBand {
    /// Reserves below liabilities. Never produced by a successful
    /// classification; exists so registry records can be decoded.
    Insolvent = 0,
    /// Reserves cover 100% up to (not including) 110% of liabilities.
    Covered = 1,
    /// 110% up to (not including) 120%.
    Comfortable = 2,
    /// 120% or more, or no liabilities at all.
    Overcollateralized = 3,
}

impl ReserveBand {
    /// All bands in ascending order.
    pub const ALL: [ReserveBand; 4] = [
        Self::Insolvent,
        Self::Covered,
        Self::Comfortable,
        Self::Overcollateralized,
    ];

    /// The numeric band value.
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Human-readable ratio range.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Insolvent => "Insolvent",
            Self::Covered => "100–110%",
            Self::Comfortable => "110–120%",
            Self::Overcollateralized => "≥ 120%",
        }
    }

    /// Whether an entity in this band may publish a proof.
    pub fn is_provable(&self) -> bool {
        !matches!(self, Self::Insolvent)
    }
}

impl TryFrom<u64> for ReserveBand {
    type Error = StructuralInputError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Insolvent),
            1 => Ok(Self::Covered),
            2 => Ok(Self::Comfortable),
            3 => Ok(Self::Overcollateralized),
            other => Err(StructuralInputError::InvalidBand(other)),
        }
    }
}

impl fmt::Display for ReserveBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Band {} ({})", self.as_u8(), self.label())
    }
}

impl Serialize for ReserveBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for ReserveBand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u64::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}
