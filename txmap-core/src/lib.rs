//! Core models for txmap.
//!
//! This crate holds the immutable value types every other txmap crate is
//! written against:
//!
//! - [`models::ReferenceDictionary`]: contig names, aliases and lengths
//! - [`models::GenomePosition`] / [`models::GenomeInterval`]: strand-aware,
//!   zero-based genome coordinates
//! - [`models::TranscriptPosition`] / [`models::CdsPosition`]: offsets relative
//!   to one transcript, tagged with their coordinate system
//! - [`models::TranscriptModel`]: exons and coding region of one transcript
//!
//! ```rust
//! use txmap_core::models::{GenomeInterval, ReferenceDictionary, Strand, TranscriptModel};
//!
//! let mut builder = ReferenceDictionary::builder();
//! builder.add_contig("chr1", 10_000).unwrap();
//! let dict = builder.build();
//! let chr1 = dict.contig_by_name("chr1").unwrap();
//!
//! let exon = |b, e| GenomeInterval::zero_based(chr1, b, e, Strand::Plus).unwrap();
//! let tx = TranscriptModel::builder("NM_000001.1", chr1, Strand::Plus)
//!     .exons([exon(100, 200), exon(300, 400)])
//!     .cds(exon(150, 350))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(tx.transcript_length(), 200);
//! ```

pub mod config;
pub mod errors;
pub mod models;
pub mod utils;
