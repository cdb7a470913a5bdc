//! Input options that control how results are broken down.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Aggregation level for results.
///
/// Controls what granularity of breakdown is included in results. The tree
/// total is always computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Aggregation {
    /// Only return totals
    #[default]
    Total,
    /// Include the subtree total of every visited directory
    ByDirectory,
    /// Include per-file results
    ByFile,
}

impl FromStr for Aggregation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "total" => Ok(Aggregation::Total),
            "dir" | "dirs" | "directory" => Ok(Aggregation::ByDirectory),
            "file" | "files" => Ok(Aggregation::ByFile),
            _ => Err(format!("Unknown aggregation: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_default() {
        assert_eq!(Aggregation::default(), Aggregation::Total);
    }

    #[test]
    fn test_aggregation_from_str() {
        assert_eq!(Aggregation::from_str("total").unwrap(), Aggregation::Total);
        assert_eq!(
            Aggregation::from_str("Dir").unwrap(),
            Aggregation::ByDirectory
        );
        assert_eq!(Aggregation::from_str("files").unwrap(), Aggregation::ByFile);
        assert!(Aggregation::from_str("crate").is_err());
    }
}
