//! Forked version parsing and comparison
//!
//! This crate parses version strings such as `1.2.0rc5-UNIQUE3.2-b102-SNAPSHOT`
//! into a root version with named subversions, renders them back, and compares
//! them within a fork.

mod comparator;
mod error;
mod forkver;
mod operator;
mod render;
#[cfg(feature = "serde")]
mod serde_impl;
mod stage;
mod version;
mod version_parser;

pub use comparator::Comparator;
pub use error::{Result, VersionError};
pub use forkver::ForkVer;
pub use operator::Operator;
pub use stage::DevelopmentStage;
pub use version::{IntoSubversion, Subversion, Version, VersionNode, VersionNumber, DEFAULT_BUILD};
pub use version_parser::VersionParser;
