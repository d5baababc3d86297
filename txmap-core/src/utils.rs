use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::ConfigError;

///
/// Parse a `chrom.sizes` listing: one `name<whitespace>length` pair per line.
///
/// Blank lines and lines starting with `#` are skipped; extra columns are
/// ignored.
///
pub fn parse_chrom_sizes<R: BufRead>(reader: R) -> Result<Vec<(String, u32)>, ConfigError> {
    let mut chrom_sizes = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (name, length) = match (parts.next(), parts.next()) {
            (Some(name), Some(length)) => (name, length),
            _ => {
                return Err(ConfigError::InvalidChromSizes {
                    line: idx + 1,
                    reason: "expected two columns".to_string(),
                });
            }
        };
        let length = length
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidChromSizes {
                line: idx + 1,
                reason: e.to_string(),
            })?;

        chrom_sizes.push((name.to_string(), length));
    }

    Ok(chrom_sizes)
}

pub fn get_chrom_sizes<T: AsRef<Path>>(path: T) -> Result<Vec<(String, u32)>, ConfigError> {
    let file = File::open(path.as_ref())?;
    parse_chrom_sizes(BufReader::new(file))
}
