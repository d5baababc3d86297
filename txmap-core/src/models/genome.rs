//! Genome-level coordinates: single positions and half-open intervals.
//!
//! Both types are stored zero-based on the strand they were created on (or
//! converted to). Equality, hashing and ordering compare the forward-strand
//! representation, so the same locus written on either strand is the same
//! value.
use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use crate::errors::CoordinateError;
use crate::models::contig::{Contig, ContigId};
use crate::models::interval::HalfOpen;
use crate::models::strand::{CoordinateBasis, Strand};

///
/// A single base on a contig.
///
#[derive(Debug, Clone, Copy)]
pub struct GenomePosition {
    contig: Contig,
    offset: u32,
    strand: Strand,
}

impl GenomePosition {
    ///
    /// Create a position from a caller-supplied value in the given basis.
    ///
    /// # Arguments
    /// - contig: contig handle from the reference dictionary
    /// - value: the position, interpreted according to `basis`
    /// - strand: the strand `value` is expressed on
    /// - basis: zero- or one-based interpretation of `value`
    ///
    pub fn new(
        contig: Contig,
        value: u32,
        strand: Strand,
        basis: CoordinateBasis,
    ) -> Result<Self, CoordinateError> {
        let offset = basis.to_zero_based(value)?;
        Self::zero_based(contig, offset, strand)
    }

    pub fn zero_based(contig: Contig, offset: u32, strand: Strand) -> Result<Self, CoordinateError> {
        if offset >= contig.length {
            return Err(CoordinateError::OutOfContigBounds {
                contig: contig.id,
                value: offset,
                length: contig.length,
            });
        }
        Ok(GenomePosition {
            contig,
            offset,
            strand,
        })
    }

    #[inline]
    pub fn contig(&self) -> Contig {
        self.contig
    }

    #[inline]
    pub fn contig_id(&self) -> ContigId {
        self.contig.id
    }

    /// Zero-based offset on [Self::strand].
    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[inline]
    pub fn one_based_offset(&self) -> u32 {
        self.offset + 1
    }

    #[inline]
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Zero-based offset of the same base on the forward strand.
    #[inline]
    pub fn forward_offset(&self) -> u32 {
        self.with_strand(Strand::Plus).offset
    }

    ///
    /// The same base expressed on `strand`.
    ///
    /// Offsets are mirrored around the contig length, so converting twice
    /// returns the original value.
    ///
    pub fn with_strand(&self, strand: Strand) -> GenomePosition {
        if strand == self.strand {
            return *self;
        }
        GenomePosition {
            contig: self.contig,
            offset: self.contig.length - self.offset - 1,
            strand,
        }
    }

    /// Move `delta` bases along this position's strand.
    pub fn shifted(&self, delta: i64) -> Result<GenomePosition, CoordinateError> {
        let target = self.offset as i64 + delta;
        if target < 0 || target >= self.contig.length as i64 {
            return Err(CoordinateError::OutOfContigBounds {
                contig: self.contig.id,
                value: target.clamp(0, u32::MAX as i64) as u32,
                length: self.contig.length,
            });
        }
        Ok(GenomePosition {
            offset: target as u32,
            ..*self
        })
    }

    ///
    /// Signed number of bases from `self` to `other`, measured on this
    /// position's strand. `None` for positions on different contigs.
    ///
    pub fn distance_to(&self, other: &GenomePosition) -> Option<i64> {
        if self.contig.id != other.contig.id {
            return None;
        }
        let other = other.with_strand(self.strand);
        Some(other.offset as i64 - self.offset as i64)
    }

    /// Whether `self` lies upstream of `other` on this position's strand.
    pub fn is_lt(&self, other: &GenomePosition) -> bool {
        self.contig.id == other.contig.id && self.offset < other.with_strand(self.strand).offset
    }

    /// Whether `self` lies downstream of `other` on this position's strand.
    pub fn is_gt(&self, other: &GenomePosition) -> bool {
        self.contig.id == other.contig.id && self.offset > other.with_strand(self.strand).offset
    }
}

impl PartialEq for GenomePosition {
    fn eq(&self, other: &Self) -> bool {
        self.contig.id == other.contig.id && self.forward_offset() == other.forward_offset()
    }
}

impl Eq for GenomePosition {}

impl Hash for GenomePosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.contig.id.hash(state);
        self.forward_offset().hash(state);
    }
}

impl Ord for GenomePosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.contig
            .id
            .cmp(&other.contig.id)
            .then_with(|| self.forward_offset().cmp(&other.forward_offset()))
    }
}

impl PartialOrd for GenomePosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for GenomePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}({})", self.contig.id, self.offset, self.strand)
    }
}

///
/// A half-open `[begin, end)` range of bases on a contig.
///
#[derive(Debug, Clone, Copy)]
pub struct GenomeInterval {
    contig: Contig,
    begin: u32,
    end: u32,
    strand: Strand,
}

impl GenomeInterval {
    ///
    /// Create an interval from caller-supplied bounds in the given basis.
    ///
    /// One-based bounds are read as fully closed `[begin, end]`, the way
    /// GFF and VCF write them; zero-based bounds are half-open.
    ///
    pub fn new(
        contig: Contig,
        begin: u32,
        end: u32,
        strand: Strand,
        basis: CoordinateBasis,
    ) -> Result<Self, CoordinateError> {
        let begin = basis.to_zero_based(begin)?;
        Self::zero_based(contig, begin, end, strand)
    }

    pub fn zero_based(
        contig: Contig,
        begin: u32,
        end: u32,
        strand: Strand,
    ) -> Result<Self, CoordinateError> {
        if begin > end {
            return Err(CoordinateError::ReversedInterval { begin, end });
        }
        if end > contig.length {
            return Err(CoordinateError::OutOfContigBounds {
                contig: contig.id,
                value: end,
                length: contig.length,
            });
        }
        Ok(GenomeInterval {
            contig,
            begin,
            end,
            strand,
        })
    }

    /// The one-base interval covering `pos`, on the position's strand.
    pub fn from_position(pos: &GenomePosition) -> GenomeInterval {
        GenomeInterval {
            contig: pos.contig,
            begin: pos.offset,
            end: pos.offset + 1,
            strand: pos.strand,
        }
    }

    #[inline]
    pub fn contig(&self) -> Contig {
        self.contig
    }

    #[inline]
    pub fn contig_id(&self) -> ContigId {
        self.contig.id
    }

    #[inline]
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Zero-based, inclusive begin on [Self::strand].
    #[inline]
    pub fn begin(&self) -> u32 {
        self.begin
    }

    /// Zero-based, exclusive end on [Self::strand].
    #[inline]
    pub fn end(&self) -> u32 {
        self.end
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.begin
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    ///
    /// The same range expressed on `strand`, mirrored around the contig
    /// length: `begin' = len - end`, `end' = len - begin`.
    ///
    pub fn with_strand(&self, strand: Strand) -> GenomeInterval {
        if strand == self.strand {
            return *self;
        }
        GenomeInterval {
            contig: self.contig,
            begin: self.contig.length - self.end,
            end: self.contig.length - self.begin,
            strand,
        }
    }

    /// `(begin, end)` on the forward strand.
    pub fn forward_bounds(&self) -> (u32, u32) {
        let fwd = self.with_strand(Strand::Plus);
        (fwd.begin, fwd.end)
    }

    /// First base of the interval, `None` if the interval is empty at the contig end.
    pub fn begin_pos(&self) -> Option<GenomePosition> {
        (self.begin < self.contig.length).then_some(GenomePosition {
            contig: self.contig,
            offset: self.begin,
            strand: self.strand,
        })
    }

    /// Last base of the interval, `None` for empty intervals.
    pub fn last_pos(&self) -> Option<GenomePosition> {
        (!self.is_empty()).then_some(GenomePosition {
            contig: self.contig,
            offset: self.end - 1,
            strand: self.strand,
        })
    }

    pub fn contains(&self, pos: &GenomePosition) -> bool {
        pos.contig.id == self.contig.id && self.contains_offset(pos.with_strand(self.strand).offset)
    }

    pub fn contains_interval(&self, other: &GenomeInterval) -> bool {
        other.contig.id == self.contig.id && self.contains_span(&other.with_strand(self.strand))
    }

    pub fn overlaps_with(&self, other: &GenomeInterval) -> bool {
        other.contig.id == self.contig.id && self.overlaps_span(&other.with_strand(self.strand))
    }

    /// The shared range, on this interval's strand. `None` if the intervals do not overlap.
    pub fn intersection(&self, other: &GenomeInterval) -> Option<GenomeInterval> {
        if !self.overlaps_with(other) {
            return None;
        }
        let other = other.with_strand(self.strand);
        Some(GenomeInterval {
            begin: self.begin.max(other.begin),
            end: self.end.min(other.end),
            ..*self
        })
    }

    /// The smallest interval covering both, on this interval's strand.
    pub fn union_span(&self, other: &GenomeInterval) -> Option<GenomeInterval> {
        if other.contig.id != self.contig.id {
            return None;
        }
        let other = other.with_strand(self.strand);
        Some(GenomeInterval {
            begin: self.begin.min(other.begin),
            end: self.end.max(other.end),
            ..*self
        })
    }

    /// Grow the interval by `upstream` and `downstream` bases, saturating at the contig bounds.
    pub fn with_more_padding(&self, upstream: u32, downstream: u32) -> GenomeInterval {
        GenomeInterval {
            begin: self.begin.saturating_sub(upstream),
            end: self.end.saturating_add(downstream).min(self.contig.length),
            ..*self
        }
    }

    /// Whether the interval ends at or before `pos` (on this interval's strand).
    pub fn is_left_of(&self, pos: &GenomePosition) -> bool {
        pos.contig.id == self.contig.id && self.end <= pos.with_strand(self.strand).offset
    }

    /// Whether the interval starts after `pos` (on this interval's strand).
    pub fn is_right_of(&self, pos: &GenomePosition) -> bool {
        pos.contig.id == self.contig.id && self.begin > pos.with_strand(self.strand).offset
    }
}

impl HalfOpen for GenomeInterval {
    type Coord = u32;

    #[inline]
    fn begin(&self) -> u32 {
        self.begin
    }

    #[inline]
    fn end(&self) -> u32 {
        self.end
    }
}

impl PartialEq for GenomeInterval {
    fn eq(&self, other: &Self) -> bool {
        self.contig.id == other.contig.id && self.forward_bounds() == other.forward_bounds()
    }
}

impl Eq for GenomeInterval {}

impl Hash for GenomeInterval {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.contig.id.hash(state);
        self.forward_bounds().hash(state);
    }
}

impl Ord for GenomeInterval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.contig
            .id
            .cmp(&other.contig.id)
            .then_with(|| self.forward_bounds().cmp(&other.forward_bounds()))
    }
}

impl PartialOrd for GenomeInterval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for GenomeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}({})",
            self.contig.id, self.begin, self.end, self.strand
        )
    }
}
