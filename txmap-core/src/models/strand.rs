use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoordinateError;

///
/// Genomic reading direction of a position, interval or transcript.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    #[default]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Strand {
    /// The other strand. Applying this twice returns the original value.
    #[inline]
    pub fn opposite(self) -> Strand {
        match self {
            Strand::Plus => Strand::Minus,
            Strand::Minus => Strand::Plus,
        }
    }

    #[inline]
    pub fn is_forward(self) -> bool {
        self == Strand::Plus
    }

    /// Parse a strand from the single character used by BED/GTF files.
    pub fn from_char(c: char) -> Option<Strand> {
        match c {
            '+' => Some(Strand::Plus),
            '-' => Some(Strand::Minus),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Strand {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next().and_then(Strand::from_char), chars.next()) {
            (Some(strand), None) => Ok(strand),
            _ => Err(CoordinateError::InvalidStrand(s.to_string())),
        }
    }
}

///
/// The convention a caller-supplied coordinate is expressed in.
///
/// This only matters at construction time; positions and intervals
/// are always stored zero-based.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateBasis {
    #[default]
    ZeroBased,
    OneBased,
}

impl CoordinateBasis {
    /// Convert a position value given in this basis to a zero-based offset.
    pub fn to_zero_based(self, value: u32) -> Result<u32, CoordinateError> {
        match self {
            CoordinateBasis::ZeroBased => Ok(value),
            CoordinateBasis::OneBased => value
                .checked_sub(1)
                .ok_or(CoordinateError::InvalidOneBasedPosition),
        }
    }
}
