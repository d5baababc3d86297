//! Transcript-local coordinates.
//!
//! A single position type and a single interval type serve both the
//! spliced-transcript and the coding-sequence coordinate systems; a
//! zero-sized tag picks which one a value lives in, so a CDS offset can't be
//! handed to something expecting a transcript offset.
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::marker::PhantomData;

use crate::models::interval::HalfOpen;
use crate::models::transcript::TranscriptModel;

mod sealed {
    pub trait Sealed {}
}

/// A transcript-local coordinate system.
pub trait CoordinateSpace:
    sealed::Sealed + Debug + Clone + Copy + PartialEq + Eq + Send + Sync + 'static
{
    /// Prefix used by HGVS for this coordinate system (`n`, `c`).
    const PREFIX: char;
}

/// Offsets into the spliced transcript, 0 at the first base of the first exon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptSpace;

/// Offsets into the coding sequence, 0 at the first base of the start codon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CdsSpace;

impl sealed::Sealed for TranscriptSpace {}
impl sealed::Sealed for CdsSpace {}

impl CoordinateSpace for TranscriptSpace {
    const PREFIX: char = 'n';
}

impl CoordinateSpace for CdsSpace {
    const PREFIX: char = 'c';
}

///
/// A zero-based offset relative to one transcript.
///
/// The transcript is borrowed, not owned: positions are short-lived values
/// handed out by projections and never outlive the catalog. Offsets are
/// signed because shifting can step before the first base (e.g. into the
/// 5' UTR when working in CDS coordinates).
///
#[derive(Debug, Clone, Copy)]
pub struct LocalPosition<'t, S: CoordinateSpace> {
    transcript: &'t TranscriptModel,
    offset: i64,
    space: PhantomData<S>,
}

pub type TranscriptPosition<'t> = LocalPosition<'t, TranscriptSpace>;
pub type CdsPosition<'t> = LocalPosition<'t, CdsSpace>;

impl<'t, S: CoordinateSpace> LocalPosition<'t, S> {
    pub fn new(transcript: &'t TranscriptModel, offset: i64) -> Self {
        LocalPosition {
            transcript,
            offset,
            space: PhantomData,
        }
    }

    #[inline]
    pub fn transcript(&self) -> &'t TranscriptModel {
        self.transcript
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        self.offset
    }

    ///
    /// One-based offset. There is no position 0 in one-based local
    /// coordinates, so negative offsets are returned unchanged
    /// (the base before the first is `-1` in both systems).
    ///
    pub fn one_based_offset(&self) -> i64 {
        if self.offset >= 0 {
            self.offset + 1
        } else {
            self.offset
        }
    }

    pub fn shifted(&self, delta: i64) -> Self {
        LocalPosition {
            offset: self.offset + delta,
            ..*self
        }
    }

    /// Position within the codon, always in `0..3`.
    pub fn frameshift(&self) -> i64 {
        self.offset.rem_euclid(3)
    }

    fn same_transcript(&self, other: &Self) -> bool {
        same_transcript(self.transcript, other.transcript)
    }
}

/// Local values belong together only if they borrow the very same model;
/// an accession may be indexed more than once (e.g. on both PAR copies).
#[inline]
fn same_transcript(a: &TranscriptModel, b: &TranscriptModel) -> bool {
    std::ptr::eq(a, b)
}

impl<S: CoordinateSpace> PartialEq for LocalPosition<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        self.same_transcript(other) && self.offset == other.offset
    }
}

impl<S: CoordinateSpace> Eq for LocalPosition<'_, S> {}

impl<S: CoordinateSpace> PartialOrd for LocalPosition<'_, S> {
    /// Positions on different transcripts are not comparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.same_transcript(other)
            .then(|| self.offset.cmp(&other.offset))
    }
}

impl<S: CoordinateSpace> Display for LocalPosition<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}.{}",
            self.transcript.accession(),
            S::PREFIX,
            self.one_based_offset()
        )
    }
}

///
/// A half-open `[begin, end)` range relative to one transcript.
///
#[derive(Debug, Clone, Copy)]
pub struct LocalInterval<'t, S: CoordinateSpace> {
    transcript: &'t TranscriptModel,
    begin: i64,
    end: i64,
    space: PhantomData<S>,
}

pub type TranscriptInterval<'t> = LocalInterval<'t, TranscriptSpace>;
pub type CdsInterval<'t> = LocalInterval<'t, CdsSpace>;

impl<'t, S: CoordinateSpace> LocalInterval<'t, S> {
    ///
    /// # Panics
    /// If `begin > end`.
    ///
    pub fn new(transcript: &'t TranscriptModel, begin: i64, end: i64) -> Self {
        assert!(begin <= end, "local interval begin {begin} > end {end}");
        LocalInterval {
            transcript,
            begin,
            end,
            space: PhantomData,
        }
    }

    /// The interval spanning `begin` up to and including `last`.
    pub fn from_positions(begin: LocalPosition<'t, S>, last: LocalPosition<'t, S>) -> Self {
        Self::new(begin.transcript, begin.offset, last.offset + 1)
    }

    pub fn transcript(&self) -> &'t TranscriptModel {
        self.transcript
    }

    pub fn begin_pos(&self) -> LocalPosition<'t, S> {
        LocalPosition::new(self.transcript, self.begin)
    }

    /// The (exclusive) end as a position.
    pub fn end_pos(&self) -> LocalPosition<'t, S> {
        LocalPosition::new(self.transcript, self.end)
    }

    pub fn len(&self) -> i64 {
        self.span_len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty_span()
    }

    pub fn contains(&self, pos: &LocalPosition<'t, S>) -> bool {
        same_transcript(self.transcript, pos.transcript) && self.contains_offset(pos.offset)
    }

    pub fn overlaps_with(&self, other: &LocalInterval<'t, S>) -> bool {
        same_transcript(self.transcript, other.transcript) && self.overlaps_span(other)
    }
}

impl<S: CoordinateSpace> HalfOpen for LocalInterval<'_, S> {
    type Coord = i64;

    #[inline]
    fn begin(&self) -> i64 {
        self.begin
    }

    #[inline]
    fn end(&self) -> i64 {
        self.end
    }
}

impl<S: CoordinateSpace> PartialEq for LocalInterval<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        self.begin_pos() == other.begin_pos() && self.end == other.end
    }
}

impl<S: CoordinateSpace> Eq for LocalInterval<'_, S> {}

impl<S: CoordinateSpace> Display for LocalInterval<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}.{}_{}",
            self.transcript.accession(),
            S::PREFIX,
            self.begin_pos().one_based_offset(),
            self.end
        )
    }
}
