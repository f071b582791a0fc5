//! Version string parsing
//!
//! Accepted shapes, split on `-`:
//!
//! ```text
//! 1.2.0
//! v1.2.0rc5
//! 1.2.0-b5
//! 1.2.0-b5-SNAPSHOT
//! 1.2.0-UNIQUE3.2a3
//! 1.2.0rc5-UNIQUE3.2-b102
//! 1.2.0rc5-UNIQUE3.2b102-SNAPSHOT
//! ```

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::error::{Result, VersionError};
use crate::stage::DevelopmentStage;
use crate::version::{Version, VersionNode, VersionNumber, DEFAULT_BUILD};

const SNAPSHOT: &str = "SNAPSHOT";

lazy_static! {
    // Root segment: optional "v", dotted numbers, optional inline stage build
    static ref ROOT_RE: Regex = Regex::new(
        r"^v?([0-9]+(?:\.[0-9]+)*)(?:(a|b|rc)([0-9]+))?$"
    ).unwrap();

    // Subversion segment: uppercase identifier glued to dotted numbers
    static ref SUBVERSION_RE: Regex = Regex::new(
        r"^([A-Z]+)([0-9]+(?:\.[0-9]+)*)(?:(a|b|rc)([0-9]+))?$"
    ).unwrap();

    static ref FINAL_BUILD_RE: Regex = Regex::new(r"^b([0-9]+)$").unwrap();
}

/// Numbers, stage and build pulled out of one matched segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedSegment {
    pub(crate) number: VersionNumber,
    pub(crate) stage: DevelopmentStage,
    pub(crate) build: u32,
    /// Build came from an inline stage suffix such as `rc5`
    pub(crate) inline_build: bool,
}

impl ParsedSegment {
    fn from_captures(caps: &Captures<'_>, number: usize, code: usize, build: usize) -> Result<Self> {
        let number: VersionNumber = caps[number].parse()?;
        match (caps.get(code), caps.get(build)) {
            (Some(code), Some(build)) => {
                let stage = DevelopmentStage::from_code(code.as_str())
                    .ok_or_else(|| VersionError::format("unknown development stage"))?;
                Ok(ParsedSegment {
                    number,
                    stage,
                    build: parse_build(build.as_str())?,
                    inline_build: true,
                })
            }
            _ => Ok(ParsedSegment {
                number,
                stage: DevelopmentStage::Stable,
                build: DEFAULT_BUILD,
                inline_build: false,
            }),
        }
    }

    fn into_node(self) -> VersionNode {
        VersionNode::new(self.number)
            .with_stage(self.stage)
            .with_build(self.build)
    }
}

fn parse_build(digits: &str) -> Result<u32> {
    digits
        .parse::<u32>()
        .map_err(|_| VersionError::format("unexpected alphanumeric characters"))
}

fn reject(version: &str, message: &str) -> VersionError {
    log::debug!("Rejected version \"{}\": {}", version, message);
    VersionError::format(message)
}

/// Parser turning version strings into [`Version`] values
pub struct VersionParser;

impl VersionParser {
    /// Create a new version parser
    pub fn new() -> Self {
        VersionParser
    }

    /// Check if a version string is valid
    pub fn is_valid(&self, version: &str) -> bool {
        self.parse(version).is_ok()
    }

    /// Resolve an inline stage code (`a`, `b` or `rc`)
    pub fn parse_stage_code(code: &str) -> Option<DevelopmentStage> {
        DevelopmentStage::from_code(code)
    }

    /// Parse a version string into a root version and its subversions
    pub fn parse(&self, version: &str) -> Result<Version> {
        let version = version.trim();
        if version.is_empty() {
            return Err(reject(version, "version string must not be empty"));
        }

        let tokens: Vec<&str> = version.split('-').collect();
        log::trace!("Parsing version \"{}\" ({} segments)", version, tokens.len());

        let root = ROOT_RE
            .captures(tokens[0])
            .ok_or_else(|| reject(version, "Invalid version input"))?;
        let root = ParsedSegment::from_captures(&root, 1, 2, 3)?;

        // Whether the current tip got its build from an inline stage suffix
        let mut tip_inline_build = root.inline_build;
        // `1.2.0b1-SNAPSHOT` reads like a misplaced `-b1` final build
        let root_inline_beta = root.inline_build && root.stage == DevelopmentStage::Beta;
        let mut output = Version::from_node(root.into_node());

        for (i, &token) in tokens.iter().enumerate().skip(1) {
            let remaining = &tokens[i + 1..];
            log::trace!("Segment {}: \"{}\"", i, token);

            if token == SNAPSHOT {
                if !remaining.is_empty() {
                    return Err(reject(version, "SNAPSHOT must be the final segment"));
                }
                if root_inline_beta && !output.has_subversions() {
                    return Err(reject(
                        version,
                        "snapshot marker cannot follow an inline beta build on the root version",
                    ));
                }
                output.tip_mut().set_snapshot(true);
                break;
            }

            if token.starts_with('b') {
                let snapshot = match remaining {
                    [] => false,
                    [next] if *next == SNAPSHOT => true,
                    _ => {
                        return Err(reject(
                            version,
                            "the final build number should be at the very end of the version",
                        ))
                    }
                };
                if tip_inline_build {
                    return Err(reject(
                        version,
                        "conflicting build numbers: a node cannot have both a stage build and a final build",
                    ));
                }
                let caps = FINAL_BUILD_RE
                    .captures(token)
                    .ok_or_else(|| reject(version, "Malformed final build number"))?;
                let tip = output.tip_mut();
                tip.set_build(parse_build(&caps[1])?);
                tip.set_snapshot(snapshot);
                break;
            }

            let caps = SUBVERSION_RE
                .captures(token)
                .ok_or_else(|| reject(version, "Malformed subversion"))?;
            let identifier = caps[1].to_string();
            if output.subversion(&identifier).is_some() {
                return Err(reject(version, "duplicate subversion identifier"));
            }
            let segment = ParsedSegment::from_captures(&caps, 2, 3, 4)?;
            tip_inline_build = segment.inline_build;
            output.add_subversion(identifier, segment.into_node())?;
        }

        Ok(output)
    }
}

impl Default for VersionParser {
    fn default() -> Self {
        Self::new()
    }
}
