use num_traits::{PrimInt, Unsigned};

use super::{NeighborSearch, Overlapper, QueryResult};
use txmap_core::models::Interval;

/// One node of the tree: the intervals containing `center`, plus the
/// intervals entirely left and right of it in the children.
#[derive(Debug, Clone)]
struct Node<I> {
    center: I,
    /// Node items (indices into the tree's storage) ascending by start.
    left_order: Vec<usize>,
    /// The same items descending by end.
    right_order: Vec<usize>,
    left: Option<Box<Node<I>>>,
    right: Option<Box<Node<I>>>,
    /// Item with the smallest start in this subtree.
    leftmost: usize,
    /// Item with the largest end in this subtree.
    rightmost: usize,
}

/// A centered interval tree split on the median endpoint.
///
/// Every node owns the intervals containing its center point, stored twice:
/// once ascending by start and once descending by end. The left child holds
/// the intervals lying entirely before the center, the right child those
/// starting after it. Because the split point is the median of the
/// endpoints rather than of the items, the tree is balanced for the
/// non-pathological inputs of a static annotation catalog without any
/// rebalancing, giving `O(log n + k)` overlap queries.
///
/// On a miss, [`NeighborSearch::search`] also reports the nearest intervals
/// on both sides of the query in `O(log n)`.
///
/// Intervals are half-open. An empty interval `[p, p)` is treated as
/// covering the single point `p` (an insertion site), and a query with
/// `start == end` is a point query.
///
/// # Examples
///
/// ```
/// use txmap_overlaprs::{IntervalTree, NeighborSearch, Overlapper, Interval};
///
/// let genes = vec![
///     Interval { start: 1000u32, end: 2000, val: "A" },
///     Interval { start: 5000, end: 6000, val: "B" },
/// ];
/// let tree = IntervalTree::build(genes);
///
/// let hit = tree.search(1500, 1500);
/// assert_eq!(hit.entries.len(), 1);
///
/// let miss = tree.search(2500, 2600);
/// assert!(miss.entries.is_empty());
/// assert_eq!(miss.left.unwrap().val, "A");
/// assert_eq!(miss.right.unwrap().val, "B");
/// ```
#[derive(Debug, Clone)]
pub struct IntervalTree<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    entries: Vec<Interval<I, T>>,
    /// `effective_end` of each entry.
    ends: Vec<I>,
    root: Option<Box<Node<I>>>,
}

impl<I, T> Overlapper<I, T> for IntervalTree<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    ///
    /// Build the tree.
    ///
    /// # Panics
    /// If any interval has `start > end`.
    ///
    fn build(intervals: Vec<Interval<I, T>>) -> Self
    where
        Self: Sized,
    {
        let mut entries = intervals;
        assert!(
            entries.iter().all(|iv| iv.start <= iv.end),
            "interval start must not exceed its end"
        );
        // sorting first makes index order equal start order, which keeps
        // results deterministic
        entries.sort();

        let ends: Vec<I> = entries.iter().map(|iv| iv.effective_end()).collect();
        let starts: Vec<I> = entries.iter().map(|iv| iv.start).collect();
        let root = build_node((0..entries.len()).collect(), &starts, &ends);

        IntervalTree {
            entries,
            ends,
            root,
        }
    }

    fn find(&self, start: I, end: I) -> Vec<Interval<I, T>> {
        self.find_ids(start, end)
            .into_iter()
            .map(|i| self.entries[i].clone())
            .collect()
    }

    fn find_iter<'a>(
        &'a self,
        start: I,
        end: I,
    ) -> Box<dyn Iterator<Item = &'a Interval<I, T>> + 'a> {
        Box::new(IterFind::new(self, start, end))
    }
}

impl<I, T> NeighborSearch<I, T> for IntervalTree<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    fn search(&self, low: I, high: I) -> QueryResult<'_, I, T> {
        let ids = self.find_ids(low, high);
        if !ids.is_empty() {
            return QueryResult {
                entries: ids.into_iter().map(|i| &self.entries[i]).collect(),
                left: None,
                right: None,
            };
        }

        let (left, right) = self.neighbors(low, effective_high(low, high));
        QueryResult {
            entries: Vec::new(),
            left: left.map(|i| &self.entries[i]),
            right: right.map(|i| &self.entries[i]),
        }
    }
}

impl<I, T> IntervalTree<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Indices of all entries overlapping `[low, high)`, ascending.
    fn find_ids(&self, low: I, high: I) -> Vec<usize> {
        assert!(low <= high, "query low must not exceed high");
        let high = effective_high(low, high);

        let mut hits = Vec::new();
        let mut stack: Vec<&Node<I>> = self.root.as_deref().into_iter().collect();

        while let Some(node) = stack.pop() {
            if high <= node.center {
                // node items all end after the query; keep those starting inside it
                for &i in node.left_order.iter() {
                    if self.entries[i].start >= high {
                        break;
                    }
                    hits.push(i);
                }
                stack.extend(node.left.as_deref());
            } else if low > node.center {
                // node items all start before the query; keep those ending inside it
                for &i in node.right_order.iter() {
                    if self.ends[i] <= low {
                        break;
                    }
                    hits.push(i);
                }
                stack.extend(node.right.as_deref());
            } else {
                // the center lies inside the query, so every node item overlaps
                hits.extend_from_slice(&node.left_order);
                if low < node.center {
                    stack.extend(node.left.as_deref());
                }
                if high - node.center > I::one() {
                    stack.extend(node.right.as_deref());
                }
            }
        }

        hits.sort_unstable();
        hits
    }

    ///
    /// Closest entries ending at or before `low` and starting at or after
    /// `high`, found by a single root-to-leaf descent. Only meaningful when
    /// nothing overlaps `[low, high)`.
    ///
    fn neighbors(&self, low: I, high: I) -> (Option<usize>, Option<usize>) {
        let mut left: Option<usize> = None;
        let mut right: Option<usize> = None;

        let offer_left = |candidate: Option<usize>, best: &mut Option<usize>| {
            if let Some(c) = candidate {
                let closer = best.is_none_or(|b| self.ends[c] > self.ends[b]);
                if self.ends[c] <= low && closer {
                    *best = Some(c);
                }
            }
        };
        let offer_right = |candidate: Option<usize>, best: &mut Option<usize>| {
            if let Some(c) = candidate {
                let start = self.entries[c].start;
                let closer = best.is_none_or(|b| start < self.entries[b].start);
                if start >= high && closer {
                    *best = Some(c);
                }
            }
        };

        let mut node = self.root.as_deref();
        while let Some(n) = node {
            if high <= n.center {
                // everything stored here or to the right starts after the query
                let candidate = n
                    .left_order
                    .first()
                    .copied()
                    .or_else(|| n.right.as_ref().map(|r| r.leftmost));
                offer_right(candidate, &mut right);
                node = n.left.as_deref();
            } else if low > n.center {
                let candidate = n
                    .right_order
                    .first()
                    .copied()
                    .or_else(|| n.left.as_ref().map(|l| l.rightmost));
                offer_left(candidate, &mut left);
                node = n.right.as_deref();
            } else {
                // the center is inside the query and this node stores nothing
                offer_left(n.left.as_ref().map(|l| l.rightmost), &mut left);
                offer_right(n.right.as_ref().map(|r| r.leftmost), &mut right);
                break;
            }
        }

        (left, right)
    }

    /// Returns the number of intervals in the tree.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree contains no intervals.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of levels in the tree, 0 when empty.
    pub fn depth(&self) -> usize {
        fn depth_of<I>(node: Option<&Node<I>>) -> usize {
            node.map_or(0, |n| {
                1 + depth_of(n.left.as_deref()).max(depth_of(n.right.as_deref()))
            })
        }
        depth_of(self.root.as_deref())
    }

    /// All intervals, ascending by start then end.
    pub fn iter(&self) -> std::slice::Iter<'_, Interval<I, T>> {
        self.entries.iter()
    }
}

/// Point queries (`low == high`) look at the single point `low`.
#[inline]
fn effective_high<I: PrimInt>(low: I, high: I) -> I {
    if low == high {
        low.saturating_add(I::one())
    } else {
        high
    }
}

///
/// Recursively build the subtree holding `ids`.
///
/// The split point is the lower median of the 2n endpoints. An interval
/// goes left only if it starts before the center and ends at or before it,
/// and right only if it starts after it; everything else stays here. Going
/// left needs all 2n endpoints at or below the center, with at least one
/// start strictly below it, which a lower median rules out for the whole
/// set; and the center is itself some interval's start or end, so that
/// interval cannot go right. Each call therefore keeps an interval at the
/// node or splits the rest across both children, even for `[MAX, MAX)`,
/// whose effective end saturates to its start.
///
fn build_node<I: PrimInt>(ids: Vec<usize>, starts: &[I], ends: &[I]) -> Option<Box<Node<I>>> {
    if ids.is_empty() {
        return None;
    }

    let mut endpoints: Vec<I> = ids.iter().flat_map(|&i| [starts[i], ends[i]]).collect();
    endpoints.sort_unstable();
    let center = endpoints[ids.len() - 1];

    let mut here = Vec::new();
    let mut left_ids = Vec::new();
    let mut right_ids = Vec::new();
    for i in ids {
        if starts[i] > center {
            right_ids.push(i);
        } else if starts[i] < center && ends[i] <= center {
            left_ids.push(i);
        } else {
            here.push(i);
        }
    }

    let left = build_node(left_ids, starts, ends);
    let right = build_node(right_ids, starts, ends);

    // ids arrive in start order, so a stable sort keeps ties deterministic
    let mut left_order = here.clone();
    left_order.sort_by_key(|&i| starts[i]);
    let mut right_order = here;
    right_order.sort_by(|&a, &b| ends[b].cmp(&ends[a]));

    let leftmost = [
        left_order.first().copied(),
        left.as_ref().map(|n| n.leftmost),
        right.as_ref().map(|n| n.leftmost),
    ]
    .into_iter()
    .flatten()
    .min_by_key(|&i| (starts[i], i))?;
    let rightmost = [
        right_order.first().copied(),
        left.as_ref().map(|n| n.rightmost),
        right.as_ref().map(|n| n.rightmost),
    ]
    .into_iter()
    .flatten()
    .max_by_key(|&i| ends[i])?;

    Some(Box::new(Node {
        center,
        left_order,
        right_order,
        left,
        right,
        leftmost,
        rightmost,
    }))
}

/// How the items of the node being visited are filtered.
#[derive(Debug, Clone, Copy)]
enum Scan {
    /// Walk `left_order` until an item starts at or after the query end.
    ByStart,
    /// Walk `right_order` until an item ends at or before the query start.
    ByEnd,
    /// Every item overlaps.
    All,
}

/// An iterator over intervals in an [`IntervalTree`] that overlap with a query range.
///
/// This struct is created by the [`find_iter`](Overlapper::find_iter) method on
/// [`IntervalTree`]. It walks the tree lazily with an explicit stack, so no result
/// vector is allocated. Unlike [`NeighborSearch::search`], results are not sorted.
#[derive(Debug)]
pub struct IterFind<'a, I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync + 'a,
{
    inner: &'a IntervalTree<I, T>,
    stack: Vec<&'a Node<I>>,
    current: &'a [usize],
    scan: Scan,
    start: I,
    stop: I,
}

impl<'a, I, T> IterFind<'a, I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync + 'a,
{
    fn new(tree: &'a IntervalTree<I, T>, start: I, stop: I) -> Self {
        assert!(start <= stop, "query start must not exceed stop");
        Self {
            inner: tree,
            stack: tree.root.as_deref().into_iter().collect(),
            current: &[],
            scan: Scan::All,
            start,
            stop: effective_high(start, stop),
        }
    }
}

impl<'a, I, T> Iterator for IterFind<'a, I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync + 'a,
{
    type Item = &'a Interval<I, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((&i, rest)) = self.current.split_first() {
                let keep = match self.scan {
                    Scan::ByStart => self.inner.entries[i].start < self.stop,
                    Scan::ByEnd => self.inner.ends[i] > self.start,
                    Scan::All => true,
                };
                if keep {
                    self.current = rest;
                    return Some(&self.inner.entries[i]);
                }
                // orders are sorted, nothing further in this node can match
                self.current = &[];
            }

            let node = self.stack.pop()?;
            if self.stop <= node.center {
                self.current = &node.left_order;
                self.scan = Scan::ByStart;
                self.stack.extend(node.left.as_deref());
            } else if self.start > node.center {
                self.current = &node.right_order;
                self.scan = Scan::ByEnd;
                self.stack.extend(node.right.as_deref());
            } else {
                self.current = &node.left_order;
                self.scan = Scan::All;
                if self.start < node.center {
                    self.stack.extend(node.left.as_deref());
                }
                if self.stop - node.center > I::one() {
                    self.stack.extend(node.right.as_deref());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::{assert_eq, assert_ne};
    use rstest::{fixture, rstest};

    #[fixture]
    fn intervals() -> Vec<Interval<u32, &'static str>> {
        vec![
            Interval {
                start: 1,
                end: 5,
                val: "a",
            },
            Interval {
                start: 3,
                end: 7,
                val: "b",
            },
            Interval {
                start: 6,
                end: 10,
                val: "c",
            },
            Interval {
                start: 8,
                end: 12,
                val: "d",
            },
        ]
    }

    #[fixture]
    fn genes() -> IntervalTree<u32, &'static str> {
        IntervalTree::build(vec![
            Interval {
                start: 1000,
                end: 2000,
                val: "A",
            },
            Interval {
                start: 5000,
                end: 6000,
                val: "B",
            },
        ])
    }

    fn vals(ivs: &[&Interval<u32, &'static str>]) -> Vec<&'static str> {
        let mut v: Vec<&str> = ivs.iter().map(|i| i.val).collect();
        v.sort();
        v
    }

    #[rstest]
    fn test_build_and_len(intervals: Vec<Interval<u32, &'static str>>) {
        let tree = IntervalTree::build(intervals.clone());
        assert_eq!(tree.len(), intervals.len());
        assert_ne!(tree.is_empty(), true);
        assert!(tree.depth() >= 1);
    }

    #[rstest]
    fn test_find_overlapping_intervals(intervals: Vec<Interval<u32, &'static str>>) {
        let tree = IntervalTree::build(intervals);

        let results = tree.find(2, 4);
        let vals: Vec<&str> = results.iter().map(|i| i.val).collect();
        assert_eq!(vals, vec!["a", "b"]);

        let results = tree.find(9, 11);
        let vals: Vec<&str> = results.iter().map(|i| i.val).collect();
        assert_eq!(vals, vec!["c", "d"]);
    }

    #[rstest]
    fn test_find_no_overlap(intervals: Vec<Interval<u32, &'static str>>) {
        let tree = IntervalTree::build(intervals);
        assert_eq!(tree.find(13, 15).is_empty(), true);
        assert_eq!(tree.find(12, 12).is_empty(), true);
    }

    #[rstest]
    fn test_empty_tree() {
        let tree: IntervalTree<u32, &str> = IntervalTree::build(vec![]);

        assert_eq!(tree.len(), 0);
        assert_eq!(tree.is_empty(), true);
        assert_eq!(tree.depth(), 0);

        let result = tree.search(1, 2);
        assert_eq!(result.entries.is_empty(), true);
        assert!(result.left.is_none());
        assert!(result.right.is_none());
    }

    #[rstest]
    fn test_miss_reports_both_neighbors(genes: IntervalTree<u32, &'static str>) {
        let result = genes.search(2500, 2600);
        assert!(!result.has_overlaps());
        assert_eq!(result.left.unwrap().val, "A");
        assert_eq!(result.right.unwrap().val, "B");
    }

    #[rstest]
    fn test_point_query_inside_interval(genes: IntervalTree<u32, &'static str>) {
        let result = genes.search(1500, 1500);
        assert_eq!(vals(&result.entries), vec!["A"]);
        assert!(result.left.is_none());
        assert!(result.right.is_none());
    }

    #[rstest]
    #[case(999, 999, vec![], None, Some("A"))]
    #[case(1000, 1000, vec!["A"], None, None)]
    #[case(1999, 1999, vec!["A"], None, None)]
    #[case(2000, 2000, vec![], Some("A"), Some("B"))]
    #[case(2000, 5000, vec![], Some("A"), Some("B"))]
    #[case(1999, 5001, vec!["A", "B"], None, None)]
    #[case(6000, 7000, vec![], Some("B"), None)]
    #[case(0, 10, vec![], None, Some("A"))]
    fn test_half_open_boundaries(
        genes: IntervalTree<u32, &'static str>,
        #[case] low: u32,
        #[case] high: u32,
        #[case] expected: Vec<&'static str>,
        #[case] left: Option<&'static str>,
        #[case] right: Option<&'static str>,
    ) {
        let result = genes.search(low, high);
        assert_eq!(vals(&result.entries), expected);
        assert_eq!(result.left.map(|i| i.val), left);
        assert_eq!(result.right.map(|i| i.val), right);
    }

    #[rstest]
    fn test_empty_interval_is_found_at_its_point() {
        let tree = IntervalTree::build(vec![
            Interval {
                start: 10u32,
                end: 10,
                val: "ins",
            },
            Interval {
                start: 20,
                end: 30,
                val: "x",
            },
        ]);
        assert_eq!(vals(&tree.search(10, 10).entries), vec!["ins"]);
        assert_eq!(vals(&tree.search(5, 11).entries), vec!["ins"]);
        let miss = tree.search(11, 15);
        assert_eq!(miss.left.unwrap().val, "ins");
        assert_eq!(miss.right.unwrap().val, "x");
    }

    #[rstest]
    fn test_neighbors_pick_closest() {
        let tree = IntervalTree::build(vec![
            Interval {
                start: 0u32,
                end: 100,
                val: "far_left_long",
            },
            Interval {
                start: 40,
                end: 50,
                val: "left_short",
            },
            Interval {
                start: 90,
                end: 95,
                val: "near_left",
            },
            Interval {
                start: 300,
                end: 310,
                val: "near_right",
            },
            Interval {
                start: 305,
                end: 900,
                val: "right_long",
            },
            Interval {
                start: 500,
                end: 510,
                val: "far_right",
            },
        ]);

        let miss = tree.search(200, 250);
        assert!(miss.entries.is_empty());
        assert_eq!(miss.left.unwrap().val, "far_left_long");
        assert_eq!(miss.right.unwrap().val, "near_right");

        let miss = tree.search(100, 100);
        assert_eq!(miss.left.unwrap().val, "far_left_long");
        assert_eq!(miss.right.unwrap().val, "near_right");
    }

    #[rstest]
    fn test_nested_and_identical_intervals() {
        let iv = |start: u32, end: u32| Interval {
            start,
            end,
            val: (start, end),
        };
        let tree = IntervalTree::build(vec![
            iv(0, 100),
            iv(10, 20),
            iv(10, 20),
            iv(15, 16),
            iv(50, 60),
            iv(99, 100),
        ]);
        assert_eq!(tree.find(15, 16).len(), 4);
        assert_eq!(tree.find(0, 1).len(), 1);
        assert_eq!(tree.find(99, 99).len(), 2);
        assert_eq!(tree.find(0, 100).len(), 6);
    }

    #[rstest]
    fn test_find_iter_matches_find(intervals: Vec<Interval<u32, &'static str>>) {
        let tree = IntervalTree::build(intervals);

        let test_queries = vec![(2, 4), (5, 8), (9, 11), (0, 15), (7, 9), (6, 6), (12, 20)];

        for (start, end) in test_queries {
            let find_results = tree.find(start, end);
            let mut find_iter_results: Vec<&Interval<u32, &str>> =
                tree.find_iter(start, end).collect();
            find_iter_results.sort();

            assert_eq!(
                find_results.len(),
                find_iter_results.len(),
                "Mismatch in number of results for query ({}, {})",
                start,
                end
            );

            for interval in &find_results {
                assert!(
                    find_iter_results.contains(&interval),
                    "Interval {interval:?} from find() not found in find_iter() results",
                );
            }
        }
    }

    #[rstest]
    fn test_matches_brute_force() {
        // deterministic pseudo-random layout with heavy nesting and duplicates
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };
        let intervals: Vec<Interval<u32, usize>> = (0..500)
            .map(|i| {
                let start = (next() % 10_000) as u32;
                let len = (next() % 400) as u32;
                Interval {
                    start,
                    end: start + len,
                    val: i,
                }
            })
            .collect();
        let tree = IntervalTree::build(intervals.clone());

        for _ in 0..300 {
            let low = (next() % 10_500) as u32;
            let high = low + (next() % 50) as u32;
            let eff_high = if low == high { low + 1 } else { high };

            let mut expected: Vec<usize> = intervals
                .iter()
                .filter(|iv| iv.start < eff_high && iv.effective_end() > low)
                .map(|iv| iv.val)
                .collect();
            expected.sort();

            let result = tree.search(low, high);
            let mut found: Vec<usize> = result.entries.iter().map(|iv| iv.val).collect();
            found.sort();
            assert_eq!(found, expected, "query [{low}, {high})");

            let mut lazy: Vec<usize> = tree.find_iter(low, high).map(|iv| iv.val).collect();
            lazy.sort();
            assert_eq!(lazy, expected);

            if expected.is_empty() {
                let best_left = intervals
                    .iter()
                    .filter(|iv| iv.effective_end() <= low)
                    .map(|iv| iv.effective_end())
                    .max();
                let best_right = intervals
                    .iter()
                    .filter(|iv| iv.start >= eff_high)
                    .map(|iv| iv.start)
                    .min();
                assert_eq!(result.left.map(|iv| iv.effective_end()), best_left);
                assert_eq!(result.right.map(|iv| iv.start), best_right);
            }
        }
    }

    #[rstest]
    fn test_point_interval_at_coordinate_max() {
        let alone = IntervalTree::build(vec![Interval {
            start: u32::MAX,
            end: u32::MAX,
            val: 0u8,
        }]);
        assert_eq!(alone.depth(), 1);
        assert_eq!(alone.search(0, 10).right.unwrap().val, 0);

        let tree = IntervalTree::build(vec![
            Interval {
                start: u32::MAX,
                end: u32::MAX,
                val: 0u8,
            },
            Interval {
                start: 5,
                end: 10,
                val: 1,
            },
            Interval {
                start: u32::MAX - 1,
                end: u32::MAX,
                val: 2,
            },
        ]);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.depth(), 2);

        let vals: Vec<u8> = tree
            .find(u32::MAX - 1, u32::MAX)
            .iter()
            .map(|iv| iv.val)
            .collect();
        assert_eq!(vals, vec![2]);

        let miss = tree.search(20, 30);
        assert_eq!(miss.left.unwrap().val, 1);
        assert_eq!(miss.right.unwrap().val, 2);
    }

    #[rstest]
    #[should_panic]
    fn test_reversed_query_panics(genes: IntervalTree<u32, &'static str>) {
        let _ = genes.search(10, 5);
    }

    #[rstest]
    #[should_panic]
    fn test_reversed_interval_panics() {
        let _ = IntervalTree::build(vec![Interval {
            start: 10u32,
            end: 5,
            val: (),
        }]);
    }
}
