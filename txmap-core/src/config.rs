use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::CoordinateError;
use crate::models::{
    Contig, ContigId, CoordinateBasis, GenomeInterval, GenomePosition, ReferenceDictionary, Strand,
};
use crate::utils::get_chrom_sizes;

///
/// What to do with a transcript that fails validation while the index is
/// being built.
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvalidTranscriptPolicy {
    /// Log a warning and leave the transcript out of the index.
    #[default]
    Skip,
    /// Fail the whole build.
    Abort,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexConfig {
    #[serde(default)]
    pub invalid_transcripts: InvalidTranscriptPolicy,
    /// Basis of the coordinates handed to the annotator by the caller.
    #[serde(default)]
    pub coordinate_basis: CoordinateBasis,
}

impl IndexConfig {
    /// A caller-supplied position, read in the configured basis.
    pub fn position(
        &self,
        contig: Contig,
        value: u32,
        strand: Strand,
    ) -> Result<GenomePosition, CoordinateError> {
        GenomePosition::new(contig, value, strand, self.coordinate_basis)
    }

    /// A caller-supplied region, read in the configured basis.
    pub fn interval(
        &self,
        contig: Contig,
        begin: u32,
        end: u32,
        strand: Strand,
    ) -> Result<GenomeInterval, CoordinateError> {
        GenomeInterval::new(contig, begin, end, strand, self.coordinate_basis)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ContigConfig {
    pub name: String,
    /// Required unless the contig is already listed in `chrom_sizes`.
    pub length: Option<u32>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

///
/// Top-level configuration, usually read from a TOML file:
///
/// ```toml
/// chrom_sizes = "hg38.chrom.sizes"
///
/// [[contigs]]
/// name = "chr1"
/// aliases = ["1", "NC_000001.11"]
///
/// [index]
/// invalid_transcripts = "abort"
/// coordinate_basis = "one_based"
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct TxmapConfig {
    pub chrom_sizes: Option<PathBuf>,
    #[serde(default)]
    pub contigs: Vec<ContigConfig>,
    #[serde(default)]
    pub index: IndexConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Contig {0} is declared more than once")]
    DuplicateContig(String),
    #[error("Contig {0} has no length and is not listed in the chrom sizes file")]
    MissingContigLength(String),
    #[error("Alias {alias} of contig {contig} is already in use")]
    DuplicateAlias { contig: String, alias: String },
    #[error("Invalid chrom sizes entry on line {line}: {reason}")]
    InvalidChromSizes { line: usize, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl TxmapConfig {
    ///
    /// Build the reference dictionary described by this config.
    ///
    /// Contigs from `chrom_sizes` come first, in file order; `contigs`
    /// entries either add new contigs or attach aliases to listed ones.
    /// Each name may appear in `contigs` only once.
    ///
    pub fn reference_dictionary(&self) -> ConfigResult<ReferenceDictionary> {
        let mut builder = ReferenceDictionary::builder();
        let mut lengths: Vec<(String, u32)> = Vec::new();

        if let Some(path) = &self.chrom_sizes {
            for (name, length) in get_chrom_sizes(path)? {
                if builder.add_contig(&name, length).is_none() {
                    return Err(ConfigError::DuplicateContig(name));
                }
                lengths.push((name, length));
            }
        }

        let known_contig = |lengths: &[(String, u32)], name: &str| {
            lengths
                .iter()
                .position(|(n, _)| n == name)
                .map(|i| (i, lengths[i].1))
        };

        let mut declared: FxHashSet<&str> = FxHashSet::default();
        for contig in self.contigs.iter() {
            if !declared.insert(contig.name.as_str()) {
                return Err(ConfigError::DuplicateContig(contig.name.clone()));
            }

            let id = match (known_contig(&lengths, &contig.name), contig.length) {
                (Some((_, known)), Some(length)) if known != length => {
                    return Err(ConfigError::DuplicateContig(contig.name.clone()));
                }
                (Some((i, _)), _) => ContigId(i as u32),
                (None, Some(length)) => {
                    let id = builder
                        .add_contig(&contig.name, length)
                        .ok_or_else(|| ConfigError::DuplicateContig(contig.name.clone()))?;
                    lengths.push((contig.name.clone(), length));
                    id
                }
                (None, None) => return Err(ConfigError::MissingContigLength(contig.name.clone())),
            };

            for alias in contig.aliases.iter() {
                if !builder.add_alias(alias, id) {
                    return Err(ConfigError::DuplicateAlias {
                        contig: contig.name.clone(),
                        alias: alias.clone(),
                    });
                }
            }
        }

        Ok(builder.build())
    }
}

impl FromStr for TxmapConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl TryFrom<&Path> for TxmapConfig {
    type Error = ConfigError;

    ///
    /// Read a config from a TOML file. A relative `chrom_sizes` path is
    /// resolved against the config file's directory.
    ///
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let mut config: TxmapConfig = toml_str.parse()?;
        if let (Some(sizes), Some(dir)) = (config.chrom_sizes.as_mut(), path.parent()) {
            if sizes.is_relative() {
                *sizes = dir.join(&*sizes);
            }
        }
        Ok(config)
    }
}
