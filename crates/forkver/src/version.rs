//! In-memory version model
//!
//! A [`Version`] is a root [`VersionNode`] followed by an ordered list of named
//! [`Subversion`]s. A subversion holds a plain node, so a subversion can never
//! carry subversions of its own.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::comparator::Comparator;
use crate::error::{Result, VersionError};
use crate::stage::DevelopmentStage;
use crate::version_parser::VersionParser;

/// Build number given to freshly constructed nodes
pub const DEFAULT_BUILD: u32 = 1;

/// Dot-separated sequence of non-negative integers, e.g. `1.2.0`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionNumber(Vec<u32>);

impl VersionNumber {
    pub fn new(numbers: Vec<u32>) -> Result<Self> {
        if numbers.is_empty() {
            return Err(VersionError::EmptyVersionNumber);
        }
        Ok(VersionNumber(numbers))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn major(&self) -> u32 {
        self.0[0]
    }

    /// Second element, or 0 for single-element numbers
    pub fn minor(&self) -> u32 {
        self.0.get(1).copied().unwrap_or(0)
    }
}

impl FromStr for VersionNumber {
    type Err = VersionError;

    fn from_str(text: &str) -> Result<Self> {
        let numbers = text
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(VersionError::format("unexpected alphanumeric characters"));
                }
                part.parse::<u32>()
                    .map_err(|_| VersionError::format("unexpected alphanumeric characters"))
            })
            .collect::<Result<Vec<_>>>()?;
        VersionNumber::new(numbers)
    }
}

impl TryFrom<&[u32]> for VersionNumber {
    type Error = VersionError;

    fn try_from(numbers: &[u32]) -> Result<Self> {
        VersionNumber::new(numbers.to_vec())
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, n) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

/// One link of a version chain: the root or a single subversion
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionNode {
    number: VersionNumber,
    stage: DevelopmentStage,
    build: u32,
    snapshot: bool,
}

impl VersionNode {
    pub fn new(number: VersionNumber) -> Self {
        VersionNode {
            number,
            stage: DevelopmentStage::Stable,
            build: DEFAULT_BUILD,
            snapshot: false,
        }
    }

    pub fn with_stage(mut self, stage: DevelopmentStage) -> Self {
        self.stage = stage;
        self
    }

    pub fn with_build(mut self, build: u32) -> Self {
        self.build = build;
        self
    }

    pub fn with_snapshot(mut self, snapshot: bool) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn number(&self) -> &VersionNumber {
        &self.number
    }

    pub fn stage(&self) -> DevelopmentStage {
        self.stage
    }

    pub fn build(&self) -> u32 {
        self.build
    }

    pub fn is_snapshot(&self) -> bool {
        self.snapshot
    }

    pub(crate) fn set_build(&mut self, build: u32) {
        self.build = build;
    }

    pub(crate) fn set_snapshot(&mut self, snapshot: bool) {
        self.snapshot = snapshot;
    }
}

/// A named child of a root version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subversion {
    identifier: String,
    node: VersionNode,
}

impl Subversion {
    /// Create a subversion; the identifier must be one or more uppercase ASCII letters.
    pub fn new(identifier: impl Into<String>, node: VersionNode) -> Result<Self> {
        let identifier = identifier.into();
        if !is_valid_identifier(&identifier) {
            return Err(VersionError::InvalidIdentifier(identifier));
        }
        Ok(Subversion { identifier, node })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn node(&self) -> &VersionNode {
        &self.node
    }

    pub(crate) fn node_mut(&mut self) -> &mut VersionNode {
        &mut self.node
    }
}

fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_uppercase())
}

/// Anything that can be attached as a subversion node
pub trait IntoSubversion {
    fn into_subversion(self) -> Result<VersionNode>;
}

impl IntoSubversion for VersionNode {
    fn into_subversion(self) -> Result<VersionNode> {
        Ok(self)
    }
}

impl IntoSubversion for Version {
    /// Fails when the version already has subversions of its own.
    fn into_subversion(self) -> Result<VersionNode> {
        self.into_node()
    }
}

/// A root version plus its ordered subversions (e.g. `v1.2.0rc5-UNIQUE3.2-b102`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    node: VersionNode,
    subversions: Vec<Subversion>,
}

impl Version {
    /// Create a stable root version with build 1
    pub fn new(number: VersionNumber) -> Self {
        Version::from_node(VersionNode::new(number))
    }

    pub fn from_node(node: VersionNode) -> Self {
        Version {
            node,
            subversions: Vec::new(),
        }
    }

    /// Create a stable root version from raw numbers, e.g. `&[1, 2, 0]`
    pub fn from_numbers(numbers: &[u32]) -> Result<Self> {
        Ok(Version::new(VersionNumber::try_from(numbers)?))
    }

    /// Parse a version string, see [`VersionParser::parse`]
    pub fn parse(version: &str) -> Result<Self> {
        VersionParser::new().parse(version)
    }

    pub fn with_stage(mut self, stage: DevelopmentStage) -> Self {
        self.node = self.node.with_stage(stage);
        self
    }

    pub fn with_build(mut self, build: u32) -> Self {
        self.node = self.node.with_build(build);
        self
    }

    /// Mark the root node as a snapshot
    pub fn with_snapshot(mut self, snapshot: bool) -> Self {
        self.node = self.node.with_snapshot(snapshot);
        self
    }

    pub fn node(&self) -> &VersionNode {
        &self.node
    }

    pub fn number(&self) -> &VersionNumber {
        self.node.number()
    }

    pub fn major(&self) -> u32 {
        self.node.number().major()
    }

    pub fn minor(&self) -> u32 {
        self.node.number().minor()
    }

    pub fn stage(&self) -> DevelopmentStage {
        self.node.stage()
    }

    pub fn build(&self) -> u32 {
        self.node.build()
    }

    /// Whether the last node of the chain is a snapshot
    pub fn is_snapshot(&self) -> bool {
        self.tip().is_snapshot()
    }

    pub fn subversions(&self) -> &[Subversion] {
        &self.subversions
    }

    pub fn has_subversions(&self) -> bool {
        !self.subversions.is_empty()
    }

    pub fn last_subversion(&self) -> Option<&Subversion> {
        self.subversions.last()
    }

    /// Last node of the chain: the final subversion, or the root itself
    pub fn tip(&self) -> &VersionNode {
        self.subversions
            .last()
            .map(Subversion::node)
            .unwrap_or(&self.node)
    }

    pub(crate) fn tip_mut(&mut self) -> &mut VersionNode {
        match self.subversions.last_mut() {
            Some(sub) => sub.node_mut(),
            None => &mut self.node,
        }
    }

    /// Look up a subversion by its exact identifier
    pub fn subversion(&self, identifier: &str) -> Option<&VersionNode> {
        self.position(identifier).map(|i| self.subversions[i].node())
    }

    /// Look up the first subversion whose identifier is fully matched by `pattern`
    pub fn subversion_matching(&self, pattern: &str) -> Result<Option<&Subversion>> {
        let re = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(self.subversions.iter().find(|sub| re.is_match(sub.identifier())))
    }

    fn position(&self, identifier: &str) -> Option<usize> {
        self.subversions
            .iter()
            .position(|sub| sub.identifier() == identifier)
    }

    /// Append a subversion. Existing identifiers are kept and reported as duplicates.
    pub fn add_subversion<C: IntoSubversion>(
        &mut self,
        identifier: impl Into<String>,
        child: C,
    ) -> Result<()> {
        let sub = Subversion::new(identifier, child.into_subversion()?)?;
        if self.position(sub.identifier()).is_some() {
            return Err(VersionError::DuplicateSubversion(sub.identifier));
        }
        self.subversions.push(sub);
        Ok(())
    }

    /// Replace an existing subversion in place, keeping its position
    pub fn replace_subversion<C: IntoSubversion>(
        &mut self,
        identifier: &str,
        child: C,
    ) -> Result<VersionNode> {
        let node = child.into_subversion()?;
        let index = self
            .position(identifier)
            .ok_or_else(|| VersionError::SubversionNotFound(identifier.to_string()))?;
        Ok(std::mem::replace(self.subversions[index].node_mut(), node))
    }

    /// Remove a subversion, returning its node if it existed
    pub fn remove_subversion(&mut self, identifier: &str) -> Option<VersionNode> {
        let index = self.position(identifier)?;
        Some(self.subversions.remove(index).node)
    }

    pub fn with_subversion<C: IntoSubversion>(
        mut self,
        identifier: impl Into<String>,
        child: C,
    ) -> Result<Self> {
        self.add_subversion(identifier, child)?;
        Ok(self)
    }

    pub fn with_replaced_subversion<C: IntoSubversion>(
        mut self,
        identifier: &str,
        child: C,
    ) -> Result<Self> {
        self.replace_subversion(identifier, child)?;
        Ok(self)
    }

    pub fn without_subversion(mut self, identifier: &str) -> Self {
        self.remove_subversion(identifier);
        self
    }

    /// Turn this version into a bare node so it can be attached as a subversion
    pub fn into_node(self) -> Result<VersionNode> {
        if self.has_subversions() {
            return Err(VersionError::NestedSubversionNotAllowed);
        }
        Ok(self.node)
    }

    pub fn is_same_fork_as(&self, other: &Version) -> bool {
        Comparator::is_same_fork(self, other)
    }

    /// Full match including build and development stage
    pub fn matches(&self, other: &Version) -> bool {
        Comparator::matches(self, other, true, true)
    }

    pub fn is_less_than(&self, other: &Version) -> Result<bool> {
        Comparator::less_than(self, other, true)
    }

    pub fn is_at_most(&self, other: &Version) -> Result<bool> {
        Comparator::at_most(self, other, true)
    }

    pub fn is_greater_than(&self, other: &Version) -> Result<bool> {
        Comparator::greater_than(self, other, true)
    }

    pub fn is_at_least(&self, other: &Version) -> Result<bool> {
        Comparator::at_least(self, other, true)
    }
}

impl From<VersionNode> for Version {
    fn from(node: VersionNode) -> Self {
        Version::from_node(node)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(numbers: &[u32]) -> VersionNode {
        VersionNode::new(VersionNumber::try_from(numbers).unwrap())
    }

    #[test]
    fn test_version_number() {
        let number: VersionNumber = "1.2.0".parse().unwrap();
        assert_eq!(number.as_slice(), &[1, 2, 0]);
        assert_eq!(number.major(), 1);
        assert_eq!(number.minor(), 2);
        assert_eq!(number.to_string(), "1.2.0");

        let single: VersionNumber = "7".parse().unwrap();
        assert_eq!(single.minor(), 0);

        assert_eq!(VersionNumber::new(vec![]), Err(VersionError::EmptyVersionNumber));
        assert!("1.x".parse::<VersionNumber>().unwrap_err().is_format_error());
        assert!("1..2".parse::<VersionNumber>().is_err());
        assert!("99999999999".parse::<VersionNumber>().is_err());
    }

    #[test]
    fn test_defaults() {
        let version = Version::from_numbers(&[1, 2, 0]).unwrap();
        assert_eq!(version.stage(), DevelopmentStage::Stable);
        assert_eq!(version.build(), DEFAULT_BUILD);
        assert!(!version.is_snapshot());
        assert!(!version.has_subversions());
        assert_eq!(version.tip(), version.node());
    }

    #[test]
    fn test_builders() {
        let version = Version::from_numbers(&[2, 0])
            .unwrap()
            .with_stage(DevelopmentStage::Beta)
            .with_build(0)
            .with_snapshot(true);
        assert_eq!(version.stage(), DevelopmentStage::Beta);
        assert_eq!(version.build(), 0);
        assert!(version.is_snapshot());
    }

    #[test]
    fn test_add_and_lookup_subversions() {
        let mut version = Version::from_numbers(&[1, 2, 0]).unwrap();
        version.add_subversion("FORK", node(&[3, 2])).unwrap();
        version.add_subversion("PATCH", node(&[1])).unwrap();

        assert_eq!(version.subversion("FORK").unwrap().number().as_slice(), &[3, 2]);
        assert!(version.subversion("FOR").is_none());
        assert_eq!(version.last_subversion().unwrap().identifier(), "PATCH");
        assert_eq!(version.tip().number().as_slice(), &[1]);

        let err = version.add_subversion("FORK", node(&[9])).unwrap_err();
        assert_eq!(err, VersionError::DuplicateSubversion("FORK".to_string()));
        assert_eq!(version.subversion("FORK").unwrap().number().as_slice(), &[3, 2]);
    }

    #[test]
    fn test_invalid_identifier() {
        let mut version = Version::from_numbers(&[1]).unwrap();
        for id in ["", "fork", "FORK1", "FO-RK"] {
            assert_eq!(
                version.add_subversion(id, node(&[1])),
                Err(VersionError::InvalidIdentifier(id.to_string()))
            );
        }
    }

    #[test]
    fn test_nested_subversion_rejected() {
        let child = Version::from_numbers(&[3, 2])
            .unwrap()
            .with_subversion("INNER", node(&[1]))
            .unwrap();
        let mut root = Version::from_numbers(&[1, 2, 0]).unwrap();
        assert_eq!(
            root.add_subversion("OUTER", child),
            Err(VersionError::NestedSubversionNotAllowed)
        );

        let plain = Version::from_numbers(&[3, 2]).unwrap();
        root.add_subversion("OUTER", plain).unwrap();
        assert!(root.subversion("OUTER").is_some());
    }

    #[test]
    fn test_replace_and_remove() {
        let version = Version::from_numbers(&[1])
            .unwrap()
            .with_subversion("A", node(&[1]))
            .unwrap()
            .with_subversion("B", node(&[2]))
            .unwrap()
            .with_replaced_subversion("A", node(&[5]))
            .unwrap();
        let ids: Vec<_> = version.subversions().iter().map(Subversion::identifier).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(version.subversion("A").unwrap().number().as_slice(), &[5]);

        let mut version = version.without_subversion("A");
        assert!(version.subversion("A").is_none());
        assert!(version.remove_subversion("A").is_none());
        assert_eq!(
            version.replace_subversion("Z", node(&[1])),
            Err(VersionError::SubversionNotFound("Z".to_string()))
        );
    }

    #[test]
    fn test_subversion_matching() {
        let version = Version::from_numbers(&[1])
            .unwrap()
            .with_subversion("ALPHA", node(&[1]))
            .unwrap()
            .with_subversion("BETA", node(&[2]))
            .unwrap();
        let found = version.subversion_matching("B.*").unwrap().unwrap();
        assert_eq!(found.identifier(), "BETA");
        assert!(version.subversion_matching("ALP").unwrap().is_none());
        assert!(matches!(
            version.subversion_matching("("),
            Err(VersionError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_snapshot_follows_tip() {
        let mut version = Version::from_numbers(&[1])
            .unwrap()
            .with_subversion("A", node(&[1]))
            .unwrap();
        assert!(!version.is_snapshot());
        version.tip_mut().set_snapshot(true);
        assert!(version.is_snapshot());
        assert!(!version.node().is_snapshot());
    }
}
