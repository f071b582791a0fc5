//! ForkVer facade providing high-level operations on version strings

use std::cmp::Ordering;

use crate::error::Result;
use crate::{Comparator, Operator, Version, VersionParser};

/// Main facade for string-level version operations
pub struct ForkVer;

impl ForkVer {
    /// Check if a version string parses
    pub fn is_valid(version: &str) -> bool {
        VersionParser::new().is_valid(version)
    }

    /// Compare version1 to version2 using the given operator, e.g. `"<="`
    pub fn compare(version1: &str, operator: &str, version2: &str) -> Result<bool> {
        let parser = VersionParser::new();
        let operator: Operator = operator.parse()?;
        let a = parser.parse(version1)?;
        let b = parser.parse(version2)?;
        Comparator::compare(&a, operator, &b)
    }

    /// Sort versions of one fork in ascending order
    pub fn sort(versions: &[&str]) -> Result<Vec<String>> {
        Self::usort(versions, true)
    }

    /// Sort versions of one fork in descending order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Result<Vec<String>> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Result<Vec<String>> {
        let parser = VersionParser::new();

        let mut parsed: Vec<(Version, usize)> = versions
            .iter()
            .enumerate()
            .map(|(i, v)| Ok((parser.parse(v)?, i)))
            .collect::<Result<_>>()?;

        // Every version must be orderable against the first one
        if let Some(((first, _), rest)) = parsed.split_first() {
            for (other, _) in rest {
                Comparator::order(first, other)?;
            }
        }

        parsed.sort_by(|(a, _), (b, _)| {
            let cmp = Comparator::order(a, b).unwrap_or(Ordering::Equal);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        // Return original versions in sorted order
        Ok(parsed
            .into_iter()
            .map(|(_, i)| versions[i].to_string())
            .collect())
    }
}
