use thiserror::Error;

use crate::models::ContigId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("Position 0 is not valid in a one-based coordinate system")]
    InvalidOneBasedPosition,

    #[error("Interval begin ({begin}) is greater than its end ({end})")]
    ReversedInterval { begin: u32, end: u32 },

    #[error("Coordinate {value} is out of bounds for contig {contig} of length {length}")]
    OutOfContigBounds {
        contig: ContigId,
        value: u32,
        length: u32,
    },

    #[error("Unknown contig: {0}")]
    UnknownContig(String),

    #[error("Invalid strand: {0}")]
    InvalidStrand(String),
}

///
/// Reasons a transcript is rejected while building the catalog.
///
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTranscriptModel {
    #[error("Transcript {0} has no exons")]
    NoExons(String),

    #[error("Transcript {accession}: exon {index} does not lie on the transcript contig")]
    ExonContigMismatch { accession: String, index: usize },

    #[error("Transcript {accession}: exon {index} is empty")]
    EmptyExon { accession: String, index: usize },

    #[error("Transcript {accession}: exons {index} and {next} are not sorted by position")]
    UnsortedExons {
        accession: String,
        index: usize,
        next: usize,
    },

    #[error("Transcript {accession}: exons {index} and {next} overlap")]
    OverlappingExons {
        accession: String,
        index: usize,
        next: usize,
    },

    #[error("Transcript {0}: CDS does not lie within the transcript span")]
    CdsOutsideTranscript(String),

    #[error("Transcript {0}: CDS begins or ends inside an intron")]
    CdsNotExonic(String),

    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
}

impl InvalidTranscriptModel {
    /// Accession of the offending transcript, if the error carries one.
    pub fn accession(&self) -> Option<&str> {
        match self {
            InvalidTranscriptModel::NoExons(acc)
            | InvalidTranscriptModel::CdsOutsideTranscript(acc)
            | InvalidTranscriptModel::CdsNotExonic(acc) => Some(acc),
            InvalidTranscriptModel::ExonContigMismatch { accession, .. }
            | InvalidTranscriptModel::EmptyExon { accession, .. }
            | InvalidTranscriptModel::UnsortedExons { accession, .. }
            | InvalidTranscriptModel::OverlappingExons { accession, .. } => Some(accession),
            InvalidTranscriptModel::Coordinate(_) => None,
        }
    }
}
