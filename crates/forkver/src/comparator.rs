//! Version comparison utilities
//!
//! Versions with subversions are only ordered against versions of the same fork:
//! equal root (numbers, build and stage), the same identifiers in the same order,
//! and equal numbers on every subversion except the last one. The last subversion
//! is the tip that actually gets compared.

use std::cmp::Ordering;

use crate::error::{Result, VersionError};
use crate::operator::Operator;
use crate::version::{Version, VersionNode};

/// Comparator for comparing versions
pub struct Comparator;

impl Comparator {
    /// Compare the numbers of two nodes element by element.
    ///
    /// When all shared elements are equal the shorter number is smaller. With `deep`
    /// set and equally long numbers, the build decides first and the development
    /// stage only breaks a tie between equal builds.
    pub fn compare_numbers(a: &VersionNode, b: &VersionNode, deep: bool) -> Ordering {
        let (left, right) = (a.number().as_slice(), b.number().as_slice());
        for (l, r) in left.iter().zip(right) {
            match l.cmp(r) {
                Ordering::Equal => continue,
                other => return other,
            }
        }

        if !deep || left.len() != right.len() {
            return left.len().cmp(&right.len());
        }
        if a.build() != b.build() {
            a.build().cmp(&b.build())
        } else {
            a.stage().cmp(&b.stage())
        }
    }

    /// Check if both versions belong to the same fork
    pub fn is_same_fork(a: &Version, b: &Version) -> bool {
        if Self::compare_numbers(a.node(), b.node(), true) != Ordering::Equal
            || a.subversions().len() != b.subversions().len()
        {
            return false;
        }

        let last = a.subversions().len().saturating_sub(1);
        a.subversions()
            .iter()
            .zip(b.subversions())
            .enumerate()
            .all(|(i, (l, r))| {
                l.identifier() == r.identifier()
                    && (i == last
                        || Self::compare_numbers(l.node(), r.node(), false) == Ordering::Equal)
            })
    }

    /// Check if two versions match.
    ///
    /// With `full_match` and subversions on either side, the versions must share a
    /// fork and their last subversions are compared; otherwise the roots are.
    pub fn matches(a: &Version, b: &Version, match_build_and_stage: bool, full_match: bool) -> bool {
        if full_match && (a.has_subversions() || b.has_subversions()) {
            if !Self::is_same_fork(a, b) {
                return false;
            }
            return Self::compare_numbers(a.tip(), b.tip(), match_build_and_stage) == Ordering::Equal;
        }
        Self::compare_numbers(a.node(), b.node(), match_build_and_stage) == Ordering::Equal
    }

    /// Full match including build and development stage
    pub fn matches_exactly(a: &Version, b: &Version) -> bool {
        Self::matches(a, b, true, true)
    }

    /// Check if a < b
    pub fn less_than(a: &Version, b: &Version, full_match: bool) -> Result<bool> {
        Ok(Self::ordering(a, b, full_match)? == Ordering::Less)
    }

    /// Check if a <= b
    pub fn at_most(a: &Version, b: &Version, full_match: bool) -> Result<bool> {
        Ok(Self::ordering(a, b, full_match)? != Ordering::Greater)
    }

    /// Check if a > b
    pub fn greater_than(a: &Version, b: &Version, full_match: bool) -> Result<bool> {
        Ok(Self::ordering(a, b, full_match)? == Ordering::Greater)
    }

    /// Check if a >= b
    pub fn at_least(a: &Version, b: &Version, full_match: bool) -> Result<bool> {
        Ok(Self::ordering(a, b, full_match)? != Ordering::Less)
    }

    /// Three-way comparison of two versions of the same fork
    pub fn order(a: &Version, b: &Version) -> Result<Ordering> {
        Self::ordering(a, b, true)
    }

    /// Compare only the root nodes, ignoring subversions entirely
    pub fn fork_agnostic_order(a: &Version, b: &Version) -> Ordering {
        Self::compare_numbers(a.node(), b.node(), true)
    }

    /// Compare a to b using the given operator
    pub fn compare(a: &Version, operator: Operator, b: &Version) -> Result<bool> {
        match operator {
            Operator::Equal => Ok(Self::matches_exactly(a, b)),
            Operator::NotEqual => Ok(!Self::matches_exactly(a, b)),
            Operator::LessThan => Self::less_than(a, b, true),
            Operator::LessThanOrEqual => Self::at_most(a, b, true),
            Operator::GreaterThan => Self::greater_than(a, b, true),
            Operator::GreaterThanOrEqual => Self::at_least(a, b, true),
        }
    }

    fn ordering(a: &Version, b: &Version, full_match: bool) -> Result<Ordering> {
        if full_match && (a.has_subversions() || b.has_subversions()) {
            if !Self::is_same_fork(a, b) {
                log::debug!("Fork mismatch between {} and {}", a, b);
                return Err(VersionError::ForkMismatch {
                    left: a.full_version(),
                    right: b.full_version(),
                });
            }
            return Ok(Self::compare_numbers(a.tip(), b.tip(), true));
        }
        Ok(Self::compare_numbers(a.node(), b.node(), true))
    }
}
