//! Projection of coordinates onto a single transcript.
//!
//! Every public entry point first rewrites its genome input onto the
//! transcript's own strand. From there on exons are walked in transcript
//! order with ascending offsets, whichever genomic strand the transcript is
//! on, and the arithmetic below never branches on strand.
use txmap_core::models::{
    CdsPosition, ContigId, GenomeInterval, GenomePosition, HalfOpen, TranscriptInterval,
    TranscriptModel, TranscriptPosition,
};

use crate::errors::{ProjectionError, Result};
use crate::location::TranscriptLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Utr {
    FivePrime,
    ThreePrime,
}

///
/// Maps positions between genome, transcript and CDS coordinates for one
/// transcript.
///
/// Transcript offsets count bases of the spliced transcript from 0 at its
/// 5' end. CDS offsets count from 0 at the first base of the coding region
/// and are negative in the 5' UTR.
///
/// Positions exactly at an exon's end belong to the following intron (or
/// to the next exon when the two are adjacent), never to the exon that
/// just ended.
///
/// # Examples
///
/// ```
/// use txmap_core::models::{GenomeInterval, GenomePosition, ReferenceDictionary, Strand, TranscriptModel};
/// use txmap_projection::TranscriptProjector;
///
/// let mut builder = ReferenceDictionary::builder();
/// builder.add_contig("chr1", 1000).unwrap();
/// let chr1 = builder.build().contig_by_name("chr1").unwrap();
/// let iv = |b, e| GenomeInterval::zero_based(chr1, b, e, Strand::Plus).unwrap();
///
/// let tx = TranscriptModel::builder("NM_1.1", chr1, Strand::Plus)
///     .exons([iv(100, 200), iv(300, 400), iv(500, 600)])
///     .cds(iv(150, 550))
///     .build()
///     .unwrap();
/// let projector = TranscriptProjector::new(&tx);
///
/// let pos = GenomePosition::zero_based(chr1, 350, Strand::Plus).unwrap();
/// assert_eq!(projector.genome_to_transcript_pos(&pos).unwrap().offset(), 150);
/// assert_eq!(projector.genome_to_cds_pos(&pos).unwrap().offset(), 100);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TranscriptProjector<'t> {
    transcript: &'t TranscriptModel,
}

impl<'t> From<&'t TranscriptModel> for TranscriptProjector<'t> {
    fn from(transcript: &'t TranscriptModel) -> Self {
        TranscriptProjector::new(transcript)
    }
}

impl<'t> TranscriptProjector<'t> {
    pub fn new(transcript: &'t TranscriptModel) -> Self {
        TranscriptProjector { transcript }
    }

    pub fn transcript(&self) -> &'t TranscriptModel {
        self.transcript
    }

    fn accession(&self) -> String {
        self.transcript.accession().to_string()
    }

    fn not_in_exon(&self, position: &GenomePosition) -> ProjectionError {
        ProjectionError::NotInExon {
            accession: self.accession(),
            position: *position,
        }
    }

    fn out_of_range(&self, offset: i64) -> ProjectionError {
        ProjectionError::OutOfRange {
            accession: self.accession(),
            offset,
            length: self.transcript.transcript_length() as i64,
        }
    }

    fn check_contig(&self, found: ContigId) -> Result<()> {
        if found != self.transcript.contig_id() {
            return Err(ProjectionError::ContigMismatch {
                accession: self.accession(),
                expected: self.transcript.contig_id(),
                found,
            });
        }
        Ok(())
    }

    /// Offset of `pos` on the transcript strand.
    fn on_transcript_strand(&self, pos: &GenomePosition) -> Result<u32> {
        self.check_contig(pos.contig_id())?;
        Ok(pos.with_strand(self.transcript.strand()).offset())
    }

    ///
    /// Classify a transcript-strand offset. This is the only place the
    /// half-open exon boundary rule is applied.
    ///
    fn location_at(&self, offset: u32) -> TranscriptLocation {
        let exons = self.transcript.exons();
        // exons are disjoint and ordered, so their ends ascend as well
        let i = exons.partition_point(|e| e.end() <= offset);
        match exons.get(i) {
            None => TranscriptLocation::Downstream,
            Some(exon) if exon.begin() <= offset => TranscriptLocation::Exonic(i),
            Some(_) if i == 0 => TranscriptLocation::Upstream,
            Some(_) => TranscriptLocation::Intronic(i - 1),
        }
    }

    /// Transcript offset of an exonic transcript-strand offset.
    fn transcript_offset_at(&self, offset: u32) -> Option<i64> {
        let i = self.location_at(offset).exon_index()?;
        let exon_start = self.transcript.exon_transcript_offset(i)?;
        let exon = self.transcript.exons()[i];
        Some(exon_start as i64 + (offset - exon.begin()) as i64)
    }

    fn cds_on_transcript_strand(&self) -> Result<GenomeInterval> {
        self.transcript
            .cds_region()
            .map(|cds| cds.with_strand(self.transcript.strand()))
            .ok_or_else(|| ProjectionError::NoCds(self.accession()))
    }

    /// `[begin, end)` of the coding region in transcript coordinates.
    fn cds_transcript_bounds(&self) -> Result<(i64, i64)> {
        let cds = self.cds_on_transcript_strand()?;
        // a stored CDS is never empty and both of its ends are exonic
        let first = self.transcript_offset_at(cds.begin());
        let last = self.transcript_offset_at(cds.end() - 1);
        match (first, last) {
            (Some(first), Some(last)) => Ok((first, last + 1)),
            _ => Err(ProjectionError::NoCds(self.accession())),
        }
    }

    /// Genome position (on the transcript strand) of a transcript offset.
    fn genome_pos_at(&self, tx_offset: i64) -> Result<GenomePosition> {
        let mut exon_start = 0i64;
        if tx_offset >= 0 {
            for exon in self.transcript.exons() {
                let len = exon.len() as i64;
                if tx_offset < exon_start + len {
                    let offset = exon.begin() + (tx_offset - exon_start) as u32;
                    return Ok(GenomePosition::zero_based(
                        self.transcript.contig(),
                        offset,
                        self.transcript.strand(),
                    )?);
                }
                exon_start += len;
            }
        }
        Err(self.out_of_range(tx_offset))
    }

    fn check_transcript_offset(&self, tx_offset: i64) -> Result<i64> {
        if tx_offset < 0 || tx_offset >= self.transcript.transcript_length() as i64 {
            return Err(self.out_of_range(tx_offset));
        }
        Ok(tx_offset)
    }

    ///
    /// Where `pos` falls relative to the exons.
    ///
    /// # Errors
    /// [ProjectionError::ContigMismatch] if `pos` is on another contig.
    ///
    pub fn locate(&self, pos: &GenomePosition) -> Result<TranscriptLocation> {
        let offset = self.on_transcript_strand(pos)?;
        Ok(self.location_at(offset))
    }

    /// Index (transcript order) of the exon containing `pos`.
    pub fn locate_exon(&self, pos: &GenomePosition) -> Option<usize> {
        self.locate(pos).ok()?.exon_index()
    }

    ///
    /// Index of the intron containing `pos`: intron `i` lies between exons
    /// `i` and `i + 1`. `None` for exonic positions and positions outside
    /// the transcript span.
    ///
    pub fn locate_intron(&self, pos: &GenomePosition) -> Option<usize> {
        self.locate(pos).ok()?.intron_index()
    }

    ///
    /// Offset of `pos` in the spliced transcript.
    ///
    /// # Errors
    /// - [ProjectionError::NotInExon] if no exon contains `pos`
    /// - [ProjectionError::ContigMismatch] if `pos` is on another contig
    ///
    pub fn genome_to_transcript_pos(&self, pos: &GenomePosition) -> Result<TranscriptPosition<'t>> {
        let offset = self.on_transcript_strand(pos)?;
        self.transcript_offset_at(offset)
            .map(|tx_offset| TranscriptPosition::new(self.transcript, tx_offset))
            .ok_or_else(|| self.not_in_exon(pos))
    }

    ///
    /// Genome position of a transcript offset, on the transcript strand.
    ///
    /// Only the offset of `tx_pos` is used; it is read against this
    /// projector's transcript.
    ///
    /// # Errors
    /// [ProjectionError::OutOfRange] if the offset is negative or not less
    /// than the transcript length.
    ///
    pub fn transcript_to_genome_pos(&self, tx_pos: &TranscriptPosition<'_>) -> Result<GenomePosition> {
        self.genome_pos_at(tx_pos.offset())
    }

    ///
    /// Offset of `pos` in the coding sequence.
    ///
    /// # Errors
    /// - [ProjectionError::NoCds] for non-coding transcripts
    /// - [ProjectionError::OutsideCds] if `pos` is outside the coding region
    /// - [ProjectionError::NotInExon] if `pos` is in an intron of the coding region
    /// - [ProjectionError::ContigMismatch] if `pos` is on another contig
    ///
    pub fn genome_to_cds_pos(&self, pos: &GenomePosition) -> Result<CdsPosition<'t>> {
        let offset = self.on_transcript_strand(pos)?;
        let cds = self.cds_on_transcript_strand()?;
        if !cds.contains_offset(offset) {
            return Err(ProjectionError::OutsideCds {
                accession: self.accession(),
                position: *pos,
            });
        }

        let (cds_begin, _) = self.cds_transcript_bounds()?;
        let tx_offset = self
            .transcript_offset_at(offset)
            .ok_or_else(|| self.not_in_exon(pos))?;
        Ok(CdsPosition::new(self.transcript, tx_offset - cds_begin))
    }

    ///
    /// Like [Self::genome_to_cds_pos], but always produces an offset:
    /// intronic positions move to the start of the next exon, positions
    /// before the coding region map to 0 and positions at or after its end
    /// map to the CDS length.
    ///
    /// # Errors
    /// Only [ProjectionError::NoCds] and [ProjectionError::ContigMismatch].
    ///
    pub fn project_genome_to_cds_pos_clamped(&self, pos: &GenomePosition) -> Result<CdsPosition<'t>> {
        let mut offset = self.on_transcript_strand(pos)?;
        let cds = self.cds_on_transcript_strand()?;
        let (cds_begin, cds_end) = self.cds_transcript_bounds()?;

        if let TranscriptLocation::Intronic(i) = self.location_at(offset) {
            offset = self.transcript.exons()[i + 1].begin();
        }

        let cds_offset = if offset < cds.begin() {
            0
        } else if offset >= cds.end() {
            cds_end - cds_begin
        } else {
            // inside the coding region and not intronic, hence exonic
            self.transcript_offset_at(offset)
                .ok_or_else(|| self.not_in_exon(pos))?
                - cds_begin
        };
        Ok(CdsPosition::new(self.transcript, cds_offset))
    }

    ///
    /// Genome position of a CDS offset, on the transcript strand. Offsets
    /// in the UTRs are allowed as long as they stay within the transcript.
    ///
    pub fn cds_to_genome_pos(&self, cds_pos: &CdsPosition<'_>) -> Result<GenomePosition> {
        let (cds_begin, _) = self.cds_transcript_bounds()?;
        self.genome_pos_at(cds_begin + cds_pos.offset())
    }

    pub fn transcript_to_cds_pos(&self, tx_pos: &TranscriptPosition<'_>) -> Result<CdsPosition<'t>> {
        let (cds_begin, _) = self.cds_transcript_bounds()?;
        let tx_offset = self.check_transcript_offset(tx_pos.offset())?;
        Ok(CdsPosition::new(self.transcript, tx_offset - cds_begin))
    }

    pub fn cds_to_transcript_pos(&self, cds_pos: &CdsPosition<'_>) -> Result<TranscriptPosition<'t>> {
        let (cds_begin, _) = self.cds_transcript_bounds()?;
        let tx_offset = self.check_transcript_offset(cds_begin + cds_pos.offset())?;
        Ok(TranscriptPosition::new(self.transcript, tx_offset))
    }

    ///
    /// Project a genome interval onto the spliced transcript.
    ///
    /// A non-empty interval needs its first and last bases to be exonic;
    /// bases in between may be intronic. An empty interval (an insertion
    /// point) may also sit at either edge of an exon.
    ///
    pub fn genome_to_transcript_interval(
        &self,
        interval: &GenomeInterval,
    ) -> Result<TranscriptInterval<'t>> {
        self.check_contig(interval.contig_id())?;
        let interval = interval.with_strand(self.transcript.strand());

        if let (Some(first), Some(last)) = (interval.begin_pos(), interval.last_pos()) {
            let begin = self.genome_to_transcript_pos(&first)?;
            let last = self.genome_to_transcript_pos(&last)?;
            return Ok(TranscriptInterval::from_positions(begin, last));
        }

        let point = interval.begin();
        for (i, exon) in self.transcript.exons().iter().enumerate() {
            if exon.begin() <= point && point <= exon.end() {
                let exon_start = self.transcript.exon_transcript_offset(i).unwrap_or_default() as i64;
                let tx_offset = exon_start + (point - exon.begin()) as i64;
                return Ok(TranscriptInterval::new(self.transcript, tx_offset, tx_offset));
            }
        }

        let contig = self.transcript.contig();
        let anchor = GenomePosition::zero_based(
            contig,
            point.min(contig.length.saturating_sub(1)),
            self.transcript.strand(),
        )?;
        Err(self.not_in_exon(&anchor))
    }

    /// Length of the coding sequence, `None` for non-coding transcripts.
    pub fn cds_length(&self) -> Option<u32> {
        let (begin, end) = self.cds_transcript_bounds().ok()?;
        Some((end - begin) as u32)
    }

    pub fn utr5_length(&self) -> Option<u32> {
        let (begin, _) = self.cds_transcript_bounds().ok()?;
        Some(begin as u32)
    }

    pub fn utr3_length(&self) -> Option<u32> {
        let (_, end) = self.cds_transcript_bounds().ok()?;
        Some(self.transcript.transcript_length() - end as u32)
    }

    /// Whether `interval` overlaps any exon.
    pub fn lies_in_exon(&self, interval: &GenomeInterval) -> bool {
        self.transcript
            .exons()
            .iter()
            .any(|exon| exon.overlaps_with(interval))
    }

    /// Whether `interval` overlaps the coding part of any exon.
    pub fn lies_in_cds_exon(&self, interval: &GenomeInterval) -> bool {
        let Some(cds) = self.transcript.cds_region() else {
            return false;
        };
        self.transcript
            .exons()
            .iter()
            .filter_map(|exon| exon.intersection(&cds))
            .any(|part| part.overlaps_with(interval))
    }

    /// Whether `interval` overlaps an exonic part of either UTR.
    pub fn lies_in_utr(&self, interval: &GenomeInterval) -> bool {
        self.lies_in_five_prime_utr(interval) || self.lies_in_three_prime_utr(interval)
    }

    pub fn lies_in_five_prime_utr(&self, interval: &GenomeInterval) -> bool {
        self.utr_overlaps(interval, Utr::FivePrime)
    }

    pub fn lies_in_three_prime_utr(&self, interval: &GenomeInterval) -> bool {
        self.utr_overlaps(interval, Utr::ThreePrime)
    }

    fn utr_overlaps(&self, interval: &GenomeInterval, utr: Utr) -> bool {
        let Ok(cds) = self.cds_on_transcript_strand() else {
            return false;
        };
        let strand = self.transcript.strand();
        let span = self.transcript.tx_region().with_strand(strand);
        let (begin, end) = match utr {
            Utr::FivePrime => (span.begin(), cds.begin()),
            Utr::ThreePrime => (cds.end(), span.end()),
        };
        let Ok(region) = GenomeInterval::zero_based(self.transcript.contig(), begin, end, strand)
        else {
            return false;
        };

        self.transcript
            .exons()
            .iter()
            .filter_map(|exon| exon.intersection(&region))
            .any(|part| part.overlaps_with(interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use txmap_core::models::{Contig, Strand};

    const CHR1: Contig = Contig {
        id: ContigId(0),
        length: 1000,
    };

    fn iv(begin: u32, end: u32) -> GenomeInterval {
        GenomeInterval::zero_based(CHR1, begin, end, Strand::Plus).unwrap()
    }

    fn pos(offset: u32) -> GenomePosition {
        GenomePosition::zero_based(CHR1, offset, Strand::Plus).unwrap()
    }

    /// Three exons on the plus strand with a CDS from 150 to 550.
    #[fixture]
    fn forward() -> TranscriptModel {
        TranscriptModel::builder("NM_FWD.1", CHR1, Strand::Plus)
            .exons([iv(100, 200), iv(300, 400), iv(500, 600)])
            .cds(iv(150, 550))
            .build()
            .unwrap()
    }

    /// Two exons on the minus strand with a CDS from 650 to 850 (forward coordinates).
    #[fixture]
    fn reverse() -> TranscriptModel {
        TranscriptModel::builder("NM_REV.1", CHR1, Strand::Minus)
            .exons([iv(600, 700), iv(800, 900)])
            .cds(iv(650, 850))
            .build()
            .unwrap()
    }

    #[fixture]
    fn noncoding() -> TranscriptModel {
        TranscriptModel::builder("NR_NC.1", CHR1, Strand::Plus)
            .exons([iv(100, 200), iv(300, 400)])
            .build()
            .unwrap()
    }

    #[rstest]
    fn test_exonic_position_in_forward_transcript(forward: TranscriptModel) {
        let projector = TranscriptProjector::new(&forward);

        let tx_pos = projector.genome_to_transcript_pos(&pos(350)).unwrap();
        assert_eq!(tx_pos.offset(), 150);
        assert!(std::ptr::eq(tx_pos.transcript(), &forward));

        let cds_pos = projector.genome_to_cds_pos(&pos(350)).unwrap();
        assert_eq!(cds_pos.offset(), 100);
        assert_eq!(cds_pos.frameshift(), 1);
    }

    #[rstest]
    fn test_intronic_position(forward: TranscriptModel) {
        let projector = TranscriptProjector::new(&forward);

        assert_eq!(projector.locate_exon(&pos(250)), None);
        assert_eq!(projector.locate_intron(&pos(250)), Some(0));
        assert!(matches!(
            projector.genome_to_transcript_pos(&pos(250)),
            Err(ProjectionError::NotInExon { .. })
        ));
    }

    #[rstest]
    #[case(99, TranscriptLocation::Upstream)]
    #[case(100, TranscriptLocation::Exonic(0))]
    #[case(199, TranscriptLocation::Exonic(0))]
    #[case(200, TranscriptLocation::Intronic(0))]
    #[case(299, TranscriptLocation::Intronic(0))]
    #[case(300, TranscriptLocation::Exonic(1))]
    #[case(400, TranscriptLocation::Intronic(1))]
    #[case(599, TranscriptLocation::Exonic(2))]
    #[case(600, TranscriptLocation::Downstream)]
    fn test_locate_forward(
        forward: TranscriptModel,
        #[case] offset: u32,
        #[case] expected: TranscriptLocation,
    ) {
        let projector = TranscriptProjector::new(&forward);
        assert_eq!(projector.locate(&pos(offset)).unwrap(), expected);
        assert_eq!(projector.locate_exon(&pos(offset)), expected.exon_index());
        assert_eq!(projector.locate_intron(&pos(offset)), expected.intron_index());
    }

    #[rstest]
    fn test_adjacent_exons_have_no_intronic_positions() {
        let tx = TranscriptModel::builder("NM_ADJ.1", CHR1, Strand::Plus)
            .exons([iv(100, 200), iv(200, 300)])
            .build()
            .unwrap();
        let projector = TranscriptProjector::new(&tx);

        assert_eq!(projector.locate_exon(&pos(199)), Some(0));
        assert_eq!(projector.locate_exon(&pos(200)), Some(1));
        assert_eq!(projector.locate_intron(&pos(200)), None);
        assert_eq!(projector.genome_to_transcript_pos(&pos(200)).unwrap().offset(), 100);
    }

    #[rstest]
    #[case(0, 100)]
    #[case(99, 199)]
    #[case(100, 300)]
    #[case(150, 350)]
    #[case(299, 599)]
    fn test_transcript_to_genome_forward(
        forward: TranscriptModel,
        #[case] tx_offset: i64,
        #[case] expected: u32,
    ) {
        let projector = TranscriptProjector::new(&forward);
        let tx_pos = TranscriptPosition::new(&forward, tx_offset);
        assert_eq!(projector.transcript_to_genome_pos(&tx_pos).unwrap(), pos(expected));
    }

    #[rstest]
    #[case(-1)]
    #[case(300)]
    fn test_transcript_offset_out_of_range(forward: TranscriptModel, #[case] tx_offset: i64) {
        let projector = TranscriptProjector::new(&forward);
        let tx_pos = TranscriptPosition::new(&forward, tx_offset);
        assert_eq!(
            projector.transcript_to_genome_pos(&tx_pos),
            Err(ProjectionError::OutOfRange {
                accession: "NM_FWD.1".to_string(),
                offset: tx_offset,
                length: 300,
            })
        );
    }

    #[rstest]
    fn test_reverse_transcript(reverse: TranscriptModel) {
        let projector = TranscriptProjector::new(&reverse);

        // the 5' end of a minus-strand transcript is its highest forward coordinate
        assert_eq!(projector.genome_to_transcript_pos(&pos(899)).unwrap().offset(), 0);
        assert_eq!(projector.genome_to_transcript_pos(&pos(850)).unwrap().offset(), 49);
        assert_eq!(projector.genome_to_transcript_pos(&pos(851)).unwrap().offset(), 48);
        assert_eq!(projector.genome_to_transcript_pos(&pos(600)).unwrap().offset(), 199);

        let back = projector
            .transcript_to_genome_pos(&TranscriptPosition::new(&reverse, 0))
            .unwrap();
        assert_eq!(back.strand(), Strand::Minus);
        assert_eq!(back, pos(899));
        assert_eq!(back.forward_offset(), 899);

        assert_eq!(projector.locate(&pos(750)).unwrap(), TranscriptLocation::Intronic(0));
        assert_eq!(projector.locate(&pos(950)).unwrap(), TranscriptLocation::Upstream);
        assert_eq!(projector.locate(&pos(500)).unwrap(), TranscriptLocation::Downstream);
        assert_eq!(projector.locate(&pos(700)).unwrap(), TranscriptLocation::Intronic(0));
        assert_eq!(projector.locate(&pos(699)).unwrap(), TranscriptLocation::Exonic(1));
    }

    #[rstest]
    fn test_reverse_cds(reverse: TranscriptModel) {
        let projector = TranscriptProjector::new(&reverse);

        assert_eq!(projector.cds_length(), Some(100));
        assert_eq!(projector.utr5_length(), Some(50));
        assert_eq!(projector.utr3_length(), Some(50));

        assert_eq!(projector.genome_to_cds_pos(&pos(849)).unwrap().offset(), 0);
        assert_eq!(projector.genome_to_cds_pos(&pos(650)).unwrap().offset(), 99);
        assert!(matches!(
            projector.genome_to_cds_pos(&pos(850)),
            Err(ProjectionError::OutsideCds { .. })
        ));

        let start = projector
            .cds_to_genome_pos(&CdsPosition::new(&reverse, 0))
            .unwrap();
        assert_eq!(start, pos(849));

        let minus_pos = pos(849).with_strand(Strand::Minus);
        assert_eq!(projector.genome_to_cds_pos(&minus_pos).unwrap().offset(), 0);
    }

    #[rstest]
    fn test_cds_errors(forward: TranscriptModel, noncoding: TranscriptModel) {
        let projector = TranscriptProjector::new(&forward);
        assert!(matches!(
            projector.genome_to_cds_pos(&pos(120)),
            Err(ProjectionError::OutsideCds { .. })
        ));
        assert!(matches!(
            projector.genome_to_cds_pos(&pos(560)),
            Err(ProjectionError::OutsideCds { .. })
        ));
        assert!(matches!(
            projector.genome_to_cds_pos(&pos(250)),
            Err(ProjectionError::NotInExon { .. })
        ));

        let projector = TranscriptProjector::new(&noncoding);
        assert_eq!(
            projector.genome_to_cds_pos(&pos(150)),
            Err(ProjectionError::NoCds("NR_NC.1".to_string()))
        );
        assert_eq!(
            projector.project_genome_to_cds_pos_clamped(&pos(150)),
            Err(ProjectionError::NoCds("NR_NC.1".to_string()))
        );
        assert_eq!(projector.cds_length(), None);
        assert_eq!(projector.utr5_length(), None);
    }

    #[rstest]
    #[case(50, 0)]
    #[case(120, 0)]
    #[case(150, 0)]
    #[case(250, 50)]
    #[case(350, 100)]
    #[case(450, 150)]
    #[case(549, 199)]
    #[case(550, 200)]
    #[case(560, 200)]
    #[case(700, 200)]
    fn test_clamped_projection(forward: TranscriptModel, #[case] offset: u32, #[case] expected: i64) {
        let projector = TranscriptProjector::new(&forward);
        let cds_pos = projector.project_genome_to_cds_pos_clamped(&pos(offset)).unwrap();
        assert_eq!(cds_pos.offset(), expected);
    }

    #[rstest]
    fn test_clamped_projection_reverse(reverse: TranscriptModel) {
        let projector = TranscriptProjector::new(&reverse);
        // intron 0 is forward [700, 800); the next exon in transcript order starts at 699
        assert_eq!(
            projector.project_genome_to_cds_pos_clamped(&pos(750)).unwrap().offset(),
            50
        );
        assert_eq!(
            projector.project_genome_to_cds_pos_clamped(&pos(990)).unwrap().offset(),
            0
        );
        assert_eq!(
            projector.project_genome_to_cds_pos_clamped(&pos(10)).unwrap().offset(),
            100
        );
    }

    #[rstest]
    fn test_cds_lengths(forward: TranscriptModel) {
        let projector = TranscriptProjector::new(&forward);
        assert_eq!(projector.cds_length(), Some(200));
        assert_eq!(projector.utr5_length(), Some(50));
        assert_eq!(projector.utr3_length(), Some(50));
    }

    #[rstest]
    fn test_cds_and_transcript_conversions(forward: TranscriptModel) {
        let projector = TranscriptProjector::new(&forward);

        let cds = |offset| CdsPosition::new(&forward, offset);
        let tx = |offset| TranscriptPosition::new(&forward, offset);

        assert_eq!(projector.cds_to_genome_pos(&cds(0)).unwrap(), pos(150));
        assert_eq!(projector.cds_to_genome_pos(&cds(199)).unwrap(), pos(549));
        assert_eq!(projector.cds_to_genome_pos(&cds(-50)).unwrap(), pos(100));
        assert!(matches!(
            projector.cds_to_genome_pos(&cds(-51)),
            Err(ProjectionError::OutOfRange { offset: -1, .. })
        ));

        assert_eq!(projector.transcript_to_cds_pos(&tx(0)).unwrap().offset(), -50);
        assert_eq!(projector.transcript_to_cds_pos(&tx(299)).unwrap().offset(), 249);
        assert!(projector.transcript_to_cds_pos(&tx(300)).is_err());

        assert_eq!(projector.cds_to_transcript_pos(&cds(100)).unwrap().offset(), 150);
        assert!(projector.cds_to_transcript_pos(&cds(250)).is_err());
    }

    #[rstest]
    fn test_region_predicates(forward: TranscriptModel) {
        let projector = TranscriptProjector::new(&forward);

        assert!(!projector.lies_in_exon(&iv(250, 260)));
        assert!(projector.lies_in_exon(&iv(190, 310)));

        assert!(!projector.lies_in_cds_exon(&iv(120, 130)));
        assert!(projector.lies_in_cds_exon(&iv(150, 151)));
        assert!(!projector.lies_in_cds_exon(&iv(400, 500)));

        assert!(projector.lies_in_five_prime_utr(&iv(120, 130)));
        assert!(!projector.lies_in_three_prime_utr(&iv(120, 130)));
        assert!(projector.lies_in_three_prime_utr(&iv(560, 570)));
        assert!(projector.lies_in_utr(&iv(140, 160)));
        assert!(!projector.lies_in_utr(&iv(250, 260)));
        assert!(!projector.lies_in_utr(&iv(300, 400)));
    }

    #[rstest]
    fn test_region_predicates_reverse(reverse: TranscriptModel) {
        let projector = TranscriptProjector::new(&reverse);

        assert!(projector.lies_in_five_prime_utr(&iv(860, 870)));
        assert!(projector.lies_in_three_prime_utr(&iv(610, 620)));
        assert!(!projector.lies_in_utr(&iv(660, 670)));
        assert!(projector.lies_in_cds_exon(&iv(660, 670)));
    }

    #[rstest]
    fn test_non_coding_has_no_utr(noncoding: TranscriptModel) {
        let projector = TranscriptProjector::new(&noncoding);
        assert!(projector.lies_in_exon(&iv(150, 160)));
        assert!(!projector.lies_in_cds_exon(&iv(150, 160)));
        assert!(!projector.lies_in_utr(&iv(150, 160)));
    }

    #[rstest]
    fn test_genome_to_transcript_interval(forward: TranscriptModel) {
        let projector = TranscriptProjector::new(&forward);

        let projected = projector.genome_to_transcript_interval(&iv(150, 350)).unwrap();
        assert_eq!((projected.begin(), projected.end()), (50, 150));

        let insertion = projector.genome_to_transcript_interval(&iv(200, 200)).unwrap();
        assert_eq!((insertion.begin(), insertion.end()), (100, 100));

        assert!(matches!(
            projector.genome_to_transcript_interval(&iv(250, 260)),
            Err(ProjectionError::NotInExon { .. })
        ));
        assert!(matches!(
            projector.genome_to_transcript_interval(&iv(250, 250)),
            Err(ProjectionError::NotInExon { .. })
        ));
    }

    #[rstest]
    fn test_genome_to_transcript_interval_reverse(reverse: TranscriptModel) {
        let projector = TranscriptProjector::new(&reverse);
        // forward [840, 860) is minus [140, 160), i.e. transcript [40, 60)
        let projected = projector.genome_to_transcript_interval(&iv(840, 860)).unwrap();
        assert_eq!((projected.begin(), projected.end()), (40, 60));
    }

    #[rstest]
    fn test_contig_mismatch(forward: TranscriptModel) {
        let projector = TranscriptProjector::new(&forward);
        let chr2 = Contig {
            id: ContigId(1),
            length: 1000,
        };
        let elsewhere = GenomePosition::zero_based(chr2, 350, Strand::Plus).unwrap();

        assert_eq!(
            projector.genome_to_transcript_pos(&elsewhere),
            Err(ProjectionError::ContigMismatch {
                accession: "NM_FWD.1".to_string(),
                expected: ContigId(0),
                found: ContigId(1),
            })
        );
        assert!(matches!(
            projector.project_genome_to_cds_pos_clamped(&elsewhere),
            Err(ProjectionError::ContigMismatch { .. })
        ));
        assert_eq!(projector.locate_exon(&elsewhere), None);

        let other_interval = GenomeInterval::zero_based(chr2, 300, 310, Strand::Plus).unwrap();
        assert!(!projector.lies_in_exon(&other_interval));
    }
}
