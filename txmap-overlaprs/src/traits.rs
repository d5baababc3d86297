use num_traits::{PrimInt, Unsigned};

pub use txmap_core::models::Interval;

///
/// An immutable index answering "which intervals overlap `[start, end)`?".
///
/// Implementors are built once and only read afterwards, so they must be
/// shareable across threads.
///
pub trait Overlapper<I, T>: Send + Sync
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    fn build(intervals: Vec<Interval<I, T>>) -> Self
    where
        Self: Sized;

    fn find(&self, start: I, end: I) -> Vec<Interval<I, T>>;

    fn find_iter<'a>(
        &'a self,
        start: I,
        end: I,
    ) -> Box<dyn Iterator<Item = &'a Interval<I, T>> + 'a>;
}

///
/// The outcome of a [NeighborSearch::search].
///
/// `left` and `right` are only filled in when `entries` is empty. They are
/// then the closest intervals ending at or before the query and starting at
/// or after its end; both are `None` only when the index is empty.
///
#[derive(Debug, Clone)]
pub struct QueryResult<'a, I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    pub entries: Vec<&'a Interval<I, T>>,
    pub left: Option<&'a Interval<I, T>>,
    pub right: Option<&'a Interval<I, T>>,
}

impl<I, T> QueryResult<'_, I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    pub fn has_overlaps(&self) -> bool {
        !self.entries.is_empty()
    }
}

///
/// Overlap search that falls back to the nearest flanking intervals when
/// nothing overlaps.
///
pub trait NeighborSearch<I, T>: Overlapper<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    ///
    /// # Panics
    /// If `low > high`.
    ///
    fn search(&self, low: I, high: I) -> QueryResult<'_, I, T>;

    fn search_point(&self, point: I) -> QueryResult<'_, I, T> {
        self.search(point, point)
    }
}
