use std::fmt::{self, Display};

///
/// Where a genome position falls relative to a transcript's exons.
///
/// Indices are zero-based and follow transcript (5'->3') order. Intron `i`
/// separates exons `i` and `i + 1`. Upstream and downstream are taken on
/// the transcript strand, so on the minus strand "upstream" means a higher
/// forward-strand coordinate.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptLocation {
    /// 5' of the first exon.
    Upstream,
    Exonic(usize),
    Intronic(usize),
    /// 3' of the last exon.
    Downstream,
}

impl TranscriptLocation {
    pub fn exon_index(&self) -> Option<usize> {
        match self {
            TranscriptLocation::Exonic(i) => Some(*i),
            _ => None,
        }
    }

    pub fn intron_index(&self) -> Option<usize> {
        match self {
            TranscriptLocation::Intronic(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_exonic(&self) -> bool {
        matches!(self, TranscriptLocation::Exonic(_))
    }

    pub fn is_intronic(&self) -> bool {
        matches!(self, TranscriptLocation::Intronic(_))
    }

    /// Whether the position lies between the first exon's start and the last exon's end.
    pub fn is_within_transcript(&self) -> bool {
        self.is_exonic() || self.is_intronic()
    }
}

/// Exons and introns are numbered from 1, the way annotations report them.
impl Display for TranscriptLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptLocation::Upstream => write!(f, "upstream"),
            TranscriptLocation::Exonic(i) => write!(f, "exon {}", i + 1),
            TranscriptLocation::Intronic(i) => write!(f, "intron {}", i + 1),
            TranscriptLocation::Downstream => write!(f, "downstream"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(TranscriptLocation::Upstream, None, None, "upstream")]
    #[case(TranscriptLocation::Exonic(0), Some(0), None, "exon 1")]
    #[case(TranscriptLocation::Intronic(2), None, Some(2), "intron 3")]
    #[case(TranscriptLocation::Downstream, None, None, "downstream")]
    fn test_accessors_and_display(
        #[case] location: TranscriptLocation,
        #[case] exon: Option<usize>,
        #[case] intron: Option<usize>,
        #[case] display: &str,
    ) {
        assert_eq!(location.exon_index(), exon);
        assert_eq!(location.intron_index(), intron);
        assert_eq!(location.is_within_transcript(), exon.is_some() || intron.is_some());
        assert_eq!(location.to_string(), display);
    }
}
