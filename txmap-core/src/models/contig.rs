use std::fmt::{self, Display};

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::errors::CoordinateError;

///
/// Numeric identifier of a contig in a [ReferenceDictionary].
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContigId(pub u32);

impl Display for ContigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

///
/// A contig handle: its id plus its length.
///
/// Positions and intervals carry one of these so that strand flips,
/// which mirror coordinates around the contig length, never need to go
/// back to the dictionary.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contig {
    pub id: ContigId,
    pub length: u32,
}

///
/// Maps contig names (and their aliases) to ids and lengths.
///
#[derive(Debug, Clone, Default)]
pub struct ReferenceDictionary {
    names: Vec<String>,
    lengths: Vec<u32>,
    name_to_id: FxHashMap<String, ContigId>,
}

impl ReferenceDictionary {
    pub fn builder() -> ReferenceDictionaryBuilder {
        ReferenceDictionaryBuilder::default()
    }

    pub fn contig_name_to_id(&self, name: &str) -> Option<ContigId> {
        self.name_to_id.get(name).copied()
    }

    pub fn contig_length(&self, id: ContigId) -> Option<u32> {
        self.lengths.get(id.0 as usize).copied()
    }

    /// Primary name of the contig (never an alias).
    pub fn contig_name(&self, id: ContigId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    pub fn contig(&self, id: ContigId) -> Option<Contig> {
        self.contig_length(id).map(|length| Contig { id, length })
    }

    pub fn contig_by_name(&self, name: &str) -> Result<Contig, CoordinateError> {
        self.contig_name_to_id(name)
            .and_then(|id| self.contig(id))
            .ok_or_else(|| CoordinateError::UnknownContig(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over all contigs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (Contig, &str)> + '_ {
        self.names
            .iter()
            .zip(self.lengths.iter())
            .enumerate()
            .map(|(i, (name, length))| {
                (
                    Contig {
                        id: ContigId(i as u32),
                        length: *length,
                    },
                    name.as_str(),
                )
            })
    }
}

#[derive(Debug, Default)]
pub struct ReferenceDictionaryBuilder {
    dict: ReferenceDictionary,
}

impl ReferenceDictionaryBuilder {
    ///
    /// Register a contig and return its freshly assigned id.
    ///
    /// Returns `None` if the name is already registered (as a name or an alias).
    ///
    pub fn add_contig(&mut self, name: &str, length: u32) -> Option<ContigId> {
        if self.dict.name_to_id.contains_key(name) {
            return None;
        }
        let id = ContigId(self.dict.names.len() as u32);
        self.dict.names.push(name.to_string());
        self.dict.lengths.push(length);
        self.dict.name_to_id.insert(name.to_string(), id);
        Some(id)
    }

    ///
    /// Register an alternative name for an existing contig.
    ///
    /// Returns `false` if the alias is taken or the id is unknown.
    ///
    pub fn add_alias(&mut self, alias: &str, id: ContigId) -> bool {
        if self.dict.name_to_id.contains_key(alias) || id.0 as usize >= self.dict.names.len() {
            return false;
        }
        self.dict.name_to_id.insert(alias.to_string(), id);
        true
    }

    pub fn build(self) -> ReferenceDictionary {
        self.dict
    }
}
