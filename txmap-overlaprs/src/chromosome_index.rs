//! Transcript lookup by genomic region.
//!
//! [`ChromosomeIndex`] keeps the transcripts of one contig in an arena and
//! indexes their forward-strand spans with an [`IntervalTree`].
//! [`TranscriptIndex`] holds one of those per contig and dispatches queries by
//! the query's contig.
//!
//! # Examples
//!
//! ```
//! use txmap_core::models::{GenomeInterval, ReferenceDictionary, Strand, TranscriptModel};
//! use txmap_overlaprs::TranscriptIndex;
//!
//! let mut builder = ReferenceDictionary::builder();
//! builder.add_contig("chr1", 10_000).unwrap();
//! let chr1 = builder.build().contig_by_name("chr1").unwrap();
//!
//! let tx = |acc: &str, b: u32, e: u32| {
//!     TranscriptModel::builder(acc, chr1, Strand::Plus)
//!         .exon(GenomeInterval::zero_based(chr1, b, e, Strand::Plus).unwrap())
//!         .build()
//!         .unwrap()
//! };
//! let index = TranscriptIndex::build(vec![tx("A", 1000, 2000), tx("B", 5000, 6000)]);
//!
//! let query = GenomeInterval::zero_based(chr1, 2500, 2600, Strand::Plus).unwrap();
//! let hits = index.overlapping(&query);
//! assert!(hits.matches.is_empty());
//! assert_eq!(hits.left.unwrap().accession(), "A");
//! assert_eq!(hits.right.unwrap().accession(), "B");
//! ```
use std::collections::HashMap;

use log::{debug, info, warn};
use rayon::prelude::*;

use txmap_core::config::InvalidTranscriptPolicy;
use txmap_core::errors::InvalidTranscriptModel;
use txmap_core::models::{
    Contig, ContigId, GenomeInterval, GenomePosition, Interval, TranscriptModel,
};

use crate::{IntervalTree, NeighborSearch, Overlapper};

///
/// Transcripts found for one query.
///
/// `left` and `right` are only set when `matches` is empty: they are the
/// transcripts closest to the query on either side, on the forward strand.
///
#[derive(Debug, Clone, Default)]
pub struct TranscriptHits<'a> {
    pub matches: Vec<&'a TranscriptModel>,
    pub left: Option<&'a TranscriptModel>,
    pub right: Option<&'a TranscriptModel>,
}

impl TranscriptHits<'_> {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Accessions of the overlapping transcripts, in order of genomic start.
    pub fn accessions(&self) -> Vec<&str> {
        self.matches.iter().map(|tx| tx.accession()).collect()
    }
}

///
/// All transcripts on a single contig, indexed by their forward-strand span.
///
#[derive(Debug, Clone)]
pub struct ChromosomeIndex {
    contig: Contig,
    transcripts: Vec<TranscriptModel>,
    tree: IntervalTree<u32, usize>,
}

impl ChromosomeIndex {
    ///
    /// Index `transcripts`, all of which must lie on `contig`.
    ///
    fn new(contig: Contig, transcripts: Vec<TranscriptModel>) -> Self {
        let spans = transcripts
            .iter()
            .enumerate()
            .map(|(i, tx)| {
                let (start, end) = tx.tx_region().forward_bounds();
                Interval { start, end, val: i }
            })
            .collect();

        ChromosomeIndex {
            contig,
            transcripts,
            tree: IntervalTree::build(spans),
        }
    }

    ///
    /// Group transcripts by contig and build one index per contig.
    ///
    /// Within a contig, transcripts keep the order they were given in.
    ///
    pub fn build_all<It>(transcripts: It) -> HashMap<ContigId, ChromosomeIndex>
    where
        It: IntoIterator<Item = TranscriptModel>,
    {
        let mut grouped: HashMap<ContigId, (Contig, Vec<TranscriptModel>)> = HashMap::new();
        for tx in transcripts {
            grouped
                .entry(tx.contig_id())
                .or_insert_with(|| (tx.contig(), Vec::new()))
                .1
                .push(tx);
        }

        grouped
            .into_iter()
            .map(|(id, (contig, txs))| {
                let index = ChromosomeIndex::new(contig, txs);
                debug!(
                    "Indexed {} transcripts on contig {} (tree depth {})",
                    index.len(),
                    id,
                    index.tree.depth()
                );
                (id, index)
            })
            .collect()
    }

    ///
    /// Transcripts overlapping `query`, or the nearest ones on either side
    /// if none do.
    ///
    /// The query may be on either strand; it is compared on the forward
    /// strand. A query on a different contig yields empty hits.
    ///
    pub fn overlapping(&self, query: &GenomeInterval) -> TranscriptHits<'_> {
        if query.contig_id() != self.contig.id {
            return TranscriptHits::default();
        }

        let (low, high) = query.forward_bounds();
        let result = self.tree.search(low, high);

        TranscriptHits {
            matches: result
                .entries
                .iter()
                .map(|iv| &self.transcripts[iv.val])
                .collect(),
            left: result.left.map(|iv| &self.transcripts[iv.val]),
            right: result.right.map(|iv| &self.transcripts[iv.val]),
        }
    }

    pub fn overlapping_position(&self, pos: &GenomePosition) -> TranscriptHits<'_> {
        self.overlapping(&GenomeInterval::from_position(pos))
    }

    ///
    /// Iterate the transcripts overlapping `query` without allocating a
    /// result vector and without neighbor search. Order is unspecified.
    ///
    pub fn overlapping_iter<'a>(
        &'a self,
        query: &GenomeInterval,
    ) -> impl Iterator<Item = &'a TranscriptModel> + 'a {
        let (low, high) = query.forward_bounds();
        let same_contig = query.contig_id() == self.contig.id;
        same_contig
            .then(|| self.tree.find_iter(low, high))
            .into_iter()
            .flatten()
            .map(move |iv| &self.transcripts[iv.val])
    }

    pub fn contig(&self) -> Contig {
        self.contig
    }

    /// Transcripts in the order they were indexed.
    pub fn transcripts(&self) -> &[TranscriptModel] {
        &self.transcripts
    }

    pub fn len(&self) -> usize {
        self.transcripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }
}

///
/// A genome-wide transcript index: one [ChromosomeIndex] per contig.
///
/// Built once and then only read, so it can be shared between threads
/// behind a plain reference or an `Arc`.
///
#[derive(Debug, Clone, Default)]
pub struct TranscriptIndex {
    index_maps: HashMap<ContigId, ChromosomeIndex>,
}

impl TranscriptIndex {
    pub fn build<It>(transcripts: It) -> Self
    where
        It: IntoIterator<Item = TranscriptModel>,
    {
        let index_maps = ChromosomeIndex::build_all(transcripts);
        let index = TranscriptIndex { index_maps };
        info!(
            "Built transcript index with {} transcripts on {} contigs",
            index.len(),
            index.index_maps.len()
        );
        index
    }

    ///
    /// Build from transcripts that may have failed validation.
    ///
    /// With [InvalidTranscriptPolicy::Skip] each failure is logged and the
    /// transcript is left out; with [InvalidTranscriptPolicy::Abort] the
    /// first failure is returned.
    ///
    pub fn try_build<It>(
        transcripts: It,
        policy: InvalidTranscriptPolicy,
    ) -> Result<Self, InvalidTranscriptModel>
    where
        It: IntoIterator<Item = Result<TranscriptModel, InvalidTranscriptModel>>,
    {
        let mut valid = Vec::new();
        let mut skipped = 0usize;

        for tx in transcripts {
            match (tx, policy) {
                (Ok(tx), _) => valid.push(tx),
                (Err(e), InvalidTranscriptPolicy::Skip) => {
                    warn!(
                        "Skipping invalid transcript {}: {e}",
                        e.accession().unwrap_or("<unknown>")
                    );
                    skipped += 1;
                }
                (Err(e), InvalidTranscriptPolicy::Abort) => return Err(e),
            }
        }

        if skipped > 0 {
            info!("Skipped {skipped} invalid transcripts");
        }

        Ok(Self::build(valid))
    }

    ///
    /// Transcripts overlapping `query`. A contig without transcripts yields
    /// empty hits with no neighbors.
    ///
    pub fn overlapping(&self, query: &GenomeInterval) -> TranscriptHits<'_> {
        self.index_maps
            .get(&query.contig_id())
            .map(|index| index.overlapping(query))
            .unwrap_or_default()
    }

    pub fn overlapping_position(&self, pos: &GenomePosition) -> TranscriptHits<'_> {
        self.overlapping(&GenomeInterval::from_position(pos))
    }

    ///
    /// Answer many queries in parallel. Results are in query order.
    ///
    pub fn overlapping_many(&self, queries: &[GenomeInterval]) -> Vec<TranscriptHits<'_>> {
        queries
            .par_iter()
            .map(|query| self.overlapping(query))
            .collect()
    }

    pub fn chromosome(&self, id: ContigId) -> Option<&ChromosomeIndex> {
        self.index_maps.get(&id)
    }

    /// Ids of the contigs holding at least one transcript, ascending.
    pub fn contigs(&self) -> Vec<ContigId> {
        let mut ids: Vec<ContigId> = self.index_maps.keys().copied().collect();
        ids.sort();
        ids
    }

    /// All transcripts, grouped by contig in ascending id order.
    pub fn transcripts(&self) -> impl Iterator<Item = &TranscriptModel> + '_ {
        self.contigs()
            .into_iter()
            .filter_map(move |id| self.index_maps.get(&id))
            .flat_map(|index| index.transcripts().iter())
    }

    pub fn len(&self) -> usize {
        self.index_maps.values().map(ChromosomeIndex::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<TranscriptModel> for TranscriptIndex {
    fn from_iter<It: IntoIterator<Item = TranscriptModel>>(iter: It) -> Self {
        TranscriptIndex::build(iter)
    }
}
