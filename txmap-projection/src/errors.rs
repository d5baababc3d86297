use thiserror::Error;

use txmap_core::errors::CoordinateError;
use txmap_core::models::{ContigId, GenomePosition};

///
/// Why a coordinate could not be projected onto a transcript.
///
/// These are ordinary outcomes (intronic or UTR variants hit them all the
/// time), so callers decide whether to fall back to the clamped projection,
/// skip the transcript or report them.
///
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("Position {position} does not lie in an exon of {accession}")]
    NotInExon {
        accession: String,
        position: GenomePosition,
    },

    #[error("Offset {offset} is outside transcript {accession} of length {length}")]
    OutOfRange {
        accession: String,
        offset: i64,
        length: i64,
    },

    #[error("Transcript {0} has no coding region")]
    NoCds(String),

    #[error("Position {position} lies outside the coding region of {accession}")]
    OutsideCds {
        accession: String,
        position: GenomePosition,
    },

    #[error("Transcript {accession} is on contig {expected}, not {found}")]
    ContigMismatch {
        accession: String,
        expected: ContigId,
        found: ContigId,
    },

    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
