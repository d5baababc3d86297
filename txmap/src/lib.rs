//! Transcript overlap indexing and coordinate projection.
//!
//! This crate bundles the txmap workspace behind cargo features:
//!
//! - `core`: value types, the reference dictionary, transcript models and
//!   configuration ([`core`])
//! - `overlaprs`: the interval tree and transcript indices ([`overlaprs`])
//! - `projection`: genome/transcript/CDS projection ([`projection`])
//!
//! A typical annotation pass looks up the transcripts touching a variant
//! and projects the variant onto each of them:
//!
//! ```rust
//! use txmap::core::models::{GenomeInterval, GenomePosition, ReferenceDictionary, Strand, TranscriptModel};
//! use txmap::overlaprs::TranscriptIndex;
//! use txmap::projection::TranscriptProjector;
//!
//! let mut builder = ReferenceDictionary::builder();
//! builder.add_contig("chr1", 10_000).unwrap();
//! let chr1 = builder.build().contig_by_name("chr1").unwrap();
//! let iv = |b, e| GenomeInterval::zero_based(chr1, b, e, Strand::Plus).unwrap();
//!
//! let tx = TranscriptModel::builder("NM_000001.1", chr1, Strand::Plus)
//!     .exons([iv(100, 200), iv(300, 400), iv(500, 600)])
//!     .cds(iv(150, 550))
//!     .build()
//!     .unwrap();
//! let index = TranscriptIndex::build(vec![tx]);
//!
//! let variant = GenomePosition::zero_based(chr1, 350, Strand::Plus).unwrap();
//! for tx in index.overlapping_position(&variant).matches {
//!     let cds = TranscriptProjector::new(tx).genome_to_cds_pos(&variant).unwrap();
//!     assert_eq!(cds.to_string(), "NM_000001.1:c.101");
//! }
//! ```

#[cfg(feature = "core")]
#[doc(inline)]
pub use txmap_core as core;

#[cfg(feature = "overlaprs")]
#[doc(inline)]
pub use txmap_overlaprs as overlaprs;

#[cfg(feature = "projection")]
#[doc(inline)]
pub use txmap_projection as projection;
