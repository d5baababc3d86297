//! Coordinate projection for txmap.
//!
//! [`TranscriptProjector`] wraps one
//! [`TranscriptModel`](txmap_core::models::TranscriptModel) and converts
//! between three coordinate systems:
//!
//! | System | Origin | Notes |
//! |--------|--------|-------|
//! | Genome | base 0 of the contig | zero-based, on either strand |
//! | Transcript | first base of the spliced transcript | counts exonic bases only |
//! | CDS | first base of the start codon | negative in the 5' UTR |
//!
//! It also classifies genome positions as upstream, exonic, intronic or
//! downstream of the transcript ([`TranscriptLocation`]).
//!
//! Projections that cannot be made return a [`ProjectionError`]; nothing in
//! this crate logs, since intronic and UTR positions are routine.

pub mod errors;
pub mod location;
pub mod projector;

// re-exports
pub use self::errors::{ProjectionError, Result};
pub use self::location::TranscriptLocation;
pub use self::projector::TranscriptProjector;
