use crate::errors::InvalidTranscriptModel;
use crate::models::contig::{Contig, ContigId};
use crate::models::genome::GenomeInterval;
use crate::models::strand::Strand;

///
/// An immutable transcript: its exons and optional coding region.
///
/// Exons are kept twice: in genomic order on the forward strand (the way
/// loaders hand them over), and in transcript 5'->3' order on the
/// transcript's own strand. The second copy is what projections walk, so
/// the arithmetic never has to care which strand the transcript is on.
///
/// Only [TranscriptModelBuilder] creates these, and it rejects models whose
/// exons are empty, unsorted or overlapping, or whose CDS does not start and
/// end inside exons.
///
#[derive(Debug, Clone)]
pub struct TranscriptModel {
    accession: String,
    gene_symbol: Option<String>,
    contig: Contig,
    strand: Strand,
    genomic_exons: Vec<GenomeInterval>,
    cds: Option<GenomeInterval>,
    exons: Vec<GenomeInterval>,
    exon_offsets: Vec<u32>,
}

impl TranscriptModel {
    pub fn builder(accession: &str, contig: Contig, strand: Strand) -> TranscriptModelBuilder {
        TranscriptModelBuilder::new(accession, contig, strand)
    }

    pub fn accession(&self) -> &str {
        &self.accession
    }

    pub fn gene_symbol(&self) -> Option<&str> {
        self.gene_symbol.as_deref()
    }

    pub fn contig(&self) -> Contig {
        self.contig
    }

    pub fn contig_id(&self) -> ContigId {
        self.contig.id
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn is_forward(&self) -> bool {
        self.strand.is_forward()
    }

    pub fn is_coding(&self) -> bool {
        self.cds.is_some()
    }

    /// Exons in transcript order, on the transcript strand.
    pub fn exons(&self) -> &[GenomeInterval] {
        &self.exons
    }

    /// Exons in ascending genomic order, on the forward strand.
    pub fn genomic_exons(&self) -> &[GenomeInterval] {
        &self.genomic_exons
    }

    pub fn exon_count(&self) -> usize {
        self.exons.len()
    }

    /// Transcript span (first exon begin to last exon end) on the forward strand.
    pub fn tx_region(&self) -> GenomeInterval {
        let first = self.genomic_exons[0];
        let last = self.genomic_exons[self.genomic_exons.len() - 1];
        first
            .union_span(&last)
            .unwrap_or(first)
    }

    /// Coding region on the forward strand.
    pub fn cds_region(&self) -> Option<GenomeInterval> {
        self.cds
    }

    /// Length of the spliced transcript.
    pub fn transcript_length(&self) -> u32 {
        self.exon_offsets[self.exons.len()]
    }

    ///
    /// Offset in the spliced transcript at which exon `index` (transcript
    /// order) begins. `index == exon_count()` yields the transcript length.
    ///
    pub fn exon_transcript_offset(&self, index: usize) -> Option<u32> {
        self.exon_offsets.get(index).copied()
    }

    ///
    /// Introns in transcript order, on the transcript strand. Intron `i`
    /// lies between exons `i` and `i + 1`; adjacent exons yield an empty
    /// intron so that the numbering stays aligned.
    ///
    pub fn introns(&self) -> Vec<GenomeInterval> {
        self.exons
            .windows(2)
            .map(|pair| {
                GenomeInterval::zero_based(self.contig, pair[0].end(), pair[1].begin(), self.strand)
                    .unwrap_or(pair[0])
            })
            .collect()
    }
}

impl PartialEq for TranscriptModel {
    fn eq(&self, other: &Self) -> bool {
        self.accession == other.accession
            && self.contig.id == other.contig.id
            && self.strand == other.strand
            && self.genomic_exons == other.genomic_exons
            && self.cds == other.cds
    }
}

impl Eq for TranscriptModel {}

///
/// Collects the pieces of a [TranscriptModel] and validates them.
///
#[derive(Debug, Clone)]
pub struct TranscriptModelBuilder {
    accession: String,
    gene_symbol: Option<String>,
    contig: Contig,
    strand: Strand,
    exons: Vec<GenomeInterval>,
    cds: Option<GenomeInterval>,
}

impl TranscriptModelBuilder {
    pub fn new(accession: &str, contig: Contig, strand: Strand) -> Self {
        TranscriptModelBuilder {
            accession: accession.to_string(),
            gene_symbol: None,
            contig,
            strand,
            exons: Vec::new(),
            cds: None,
        }
    }

    pub fn gene_symbol(mut self, symbol: &str) -> Self {
        self.gene_symbol = Some(symbol.to_string());
        self
    }

    /// Add an exon. Exons must be added in ascending genomic order.
    pub fn exon(mut self, exon: GenomeInterval) -> Self {
        self.exons.push(exon);
        self
    }

    pub fn exons<I: IntoIterator<Item = GenomeInterval>>(mut self, exons: I) -> Self {
        self.exons.extend(exons);
        self
    }

    pub fn cds(mut self, cds: GenomeInterval) -> Self {
        self.cds = Some(cds);
        self
    }

    pub fn build(self) -> Result<TranscriptModel, InvalidTranscriptModel> {
        let accession = self.accession;

        if self.exons.is_empty() {
            return Err(InvalidTranscriptModel::NoExons(accession));
        }

        let mut genomic_exons = Vec::with_capacity(self.exons.len());
        for (index, exon) in self.exons.iter().enumerate() {
            if exon.contig_id() != self.contig.id {
                return Err(InvalidTranscriptModel::ExonContigMismatch { accession, index });
            }
            if exon.is_empty() {
                return Err(InvalidTranscriptModel::EmptyExon { accession, index });
            }
            genomic_exons.push(exon.with_strand(Strand::Plus));
        }

        for (index, pair) in genomic_exons.windows(2).enumerate() {
            if pair[0].begin() > pair[1].begin() {
                return Err(InvalidTranscriptModel::UnsortedExons {
                    accession,
                    index,
                    next: index + 1,
                });
            }
            if pair[0].end() > pair[1].begin() {
                return Err(InvalidTranscriptModel::OverlappingExons {
                    accession,
                    index,
                    next: index + 1,
                });
            }
        }

        // an empty coding region is a non-coding transcript
        let cds = match self.cds.map(|c| c.with_strand(Strand::Plus)) {
            Some(cds) if !cds.is_empty() => {
                let span = genomic_exons[0]
                    .union_span(&genomic_exons[genomic_exons.len() - 1])
                    .unwrap_or(genomic_exons[0]);
                if cds.contig_id() != self.contig.id || !span.contains_interval(&cds) {
                    return Err(InvalidTranscriptModel::CdsOutsideTranscript(accession));
                }
                let exonic = |offset: u32| {
                    genomic_exons
                        .iter()
                        .any(|e| e.begin() <= offset && offset < e.end())
                };
                if !exonic(cds.begin()) || !exonic(cds.end() - 1) {
                    return Err(InvalidTranscriptModel::CdsNotExonic(accession));
                }
                Some(cds)
            }
            _ => None,
        };

        let mut exons: Vec<GenomeInterval> = genomic_exons
            .iter()
            .map(|e| e.with_strand(self.strand))
            .collect();
        if !self.strand.is_forward() {
            exons.reverse();
        }

        let mut exon_offsets = Vec::with_capacity(exons.len() + 1);
        let mut acc = 0u32;
        exon_offsets.push(acc);
        for exon in exons.iter() {
            acc += exon.len();
            exon_offsets.push(acc);
        }

        Ok(TranscriptModel {
            accession,
            gene_symbol: self.gene_symbol,
            contig: self.contig,
            strand: self.strand,
            genomic_exons,
            cds,
            exons,
            exon_offsets,
        })
    }
}
