pub mod contig;
pub mod genome;
pub mod interval;
pub mod local;
pub mod strand;
pub mod transcript;

// re-export for cleaner imports
pub use self::contig::{Contig, ContigId, ReferenceDictionary, ReferenceDictionaryBuilder};
pub use self::genome::{GenomeInterval, GenomePosition};
pub use self::interval::{HalfOpen, Interval};
pub use self::local::{
    CdsInterval, CdsPosition, CdsSpace, CoordinateSpace, LocalInterval, LocalPosition,
    TranscriptInterval, TranscriptPosition, TranscriptSpace,
};
pub use self::strand::{CoordinateBasis, Strand};
pub use self::transcript::{TranscriptModel, TranscriptModelBuilder};
