//! Interval overlap queries for transcript annotation.
//!
//! This crate provides the index that answers "which transcripts does this
//! region touch?" for txmap. It has two layers:
//!
//! - [`IntervalTree`]: a static, median-split interval tree over generic
//!   [`Interval`]s. Besides plain overlap queries it reports the nearest
//!   interval on each side when nothing overlaps.
//! - [`ChromosomeIndex`] / [`TranscriptIndex`]: one tree per contig, keyed by
//!   each transcript's genomic span, handing out references into an arena
//!   of [`TranscriptModel`](txmap_core::models::TranscriptModel)s.
//!
//! All structures are built once and are `Send + Sync` afterwards.
//!
//! ## Quick Start
//!
//! ```rust
//! use txmap_overlaprs::{IntervalTree, Interval, NeighborSearch, Overlapper};
//!
//! let intervals = vec![
//!     Interval { start: 100u32, end: 200, val: "tx1" },
//!     Interval { start: 150, end: 300, val: "tx2" },
//!     Interval { start: 400, end: 500, val: "tx3" },
//! ];
//!
//! let tree = IntervalTree::build(intervals);
//!
//! let overlaps = tree.find(180, 250);
//! assert_eq!(overlaps.len(), 2);
//!
//! // nothing between 300 and 400, so the flanking intervals are reported
//! let miss = tree.search(320, 380);
//! assert!(!miss.has_overlaps());
//! assert_eq!(miss.left.unwrap().val, "tx2");
//! assert_eq!(miss.right.unwrap().val, "tx3");
//! ```

/// Per-contig and genome-wide transcript indices.
///
/// See [`TranscriptIndex`] for the entry point.
pub mod chromosome_index;

/// Median-split interval tree.
///
/// See [`IntervalTree`] for details.
pub mod interval_tree;

/// Core traits for overlap operations.
///
/// See [`Overlapper`] and [`NeighborSearch`].
pub mod traits;

// re-exports
pub use self::chromosome_index::{ChromosomeIndex, TranscriptHits, TranscriptIndex};
pub use self::interval_tree::IntervalTree;
pub use self::traits::{Interval, NeighborSearch, Overlapper, QueryResult};
