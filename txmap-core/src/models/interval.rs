use num_traits::{PrimInt, Unsigned, identities::zero};
use std::cmp::Ordering::{self};

///
/// Shared arithmetic for half-open `[begin, end)` ranges.
///
/// Implemented by the tree item type, genome intervals and the
/// transcript/CDS-local intervals, so the containment and intersection
/// rules are written exactly once. Both operands must be expressed in the
/// same coordinate frame (same contig and strand, or same transcript).
///
pub trait HalfOpen {
    type Coord: PrimInt;

    fn begin(&self) -> Self::Coord;

    fn end(&self) -> Self::Coord;

    #[inline]
    fn span_len(&self) -> Self::Coord {
        self.end() - self.begin()
    }

    #[inline]
    fn is_empty_span(&self) -> bool {
        self.begin() == self.end()
    }

    /// `begin <= x < end`
    #[inline]
    fn contains_offset(&self, x: Self::Coord) -> bool {
        self.begin() <= x && x < self.end()
    }

    #[inline]
    fn contains_span<O: HalfOpen<Coord = Self::Coord>>(&self, other: &O) -> bool {
        self.begin() <= other.begin() && other.end() <= self.end()
    }

    #[inline]
    fn overlaps_span<O: HalfOpen<Coord = Self::Coord>>(&self, other: &O) -> bool {
        self.begin() < other.end() && other.begin() < self.end()
    }

    /// Number of positions shared by both ranges.
    #[inline]
    fn intersection_len<O: HalfOpen<Coord = Self::Coord>>(&self, other: &O) -> Self::Coord {
        let begin = std::cmp::max(self.begin(), other.begin());
        let end = std::cmp::min(self.end(), other.end());
        if end > begin { end - begin } else { zero() }
    }
}

/// Represent a range from [start, end)
/// Inclusive start, exclusive of end
#[derive(Eq, Debug, Clone)]
pub struct Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    pub start: I,
    pub end: I,
    pub val: T,
}

impl<I, T> Ord for Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    #[inline]
    fn cmp(&self, other: &Interval<I, T>) -> Ordering {
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ord => ord,
        }
    }
}

impl<I, T> Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Compute the intersect between two intervals
    #[inline]
    pub fn intersect(&self, other: &Interval<I, T>) -> I {
        self.intersection_len(other)
    }

    /// Check if the interval overlaps `[start, end)`
    #[inline]
    pub fn overlap(&self, start: I, end: I) -> bool {
        self.start < end && self.end > start
    }

    ///
    /// The end used for overlap tests: an empty interval covers the single
    /// point at its start (an insertion site), so it can still be found.
    ///
    #[inline]
    pub fn effective_end(&self) -> I {
        if self.start == self.end {
            self.start.saturating_add(I::one())
        } else {
            self.end
        }
    }
}

impl<I, T> HalfOpen for Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    type Coord = I;

    #[inline]
    fn begin(&self) -> I {
        self.start
    }

    #[inline]
    fn end(&self) -> I {
        self.end
    }
}

impl<I, T> PartialOrd for Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I, T> PartialEq for Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    #[inline]
    fn eq(&self, other: &Interval<I, T>) -> bool {
        self.start == other.start && self.end == other.end
    }
}
