//! Rendering versions back to text

use std::fmt;

use crate::version::{Version, VersionNode};

const PREFIX: &str = "v";

/// Numbers with a prefix, plus the inline stage build or trailing `-b<build>`
fn write_node(out: &mut String, prefix: &str, node: &VersionNode, final_build: bool) {
    out.push_str(prefix);
    out.push_str(&node.number().to_string());
    if let Some(code) = node.stage().code() {
        out.push_str(code);
        out.push_str(&node.build().to_string());
    } else if final_build && node.build() > 1 {
        out.push_str("-b");
        out.push_str(&node.build().to_string());
    }
}

impl Version {
    /// Prefixed numbers only, e.g. `v1.2.0`
    pub fn plain_version(&self) -> String {
        format!("{}{}", PREFIX, self.number())
    }

    /// Canonical form, e.g. `v1.2.0rc5-UNIQUE3.2b102-SNAPSHOT`
    pub fn full_version(&self) -> String {
        let mut out = String::new();
        write_node(&mut out, PREFIX, self.node(), !self.has_subversions());
        let last = self.subversions().len().saturating_sub(1);
        for (i, sub) in self.subversions().iter().enumerate() {
            out.push('-');
            // A trailing build is only readable on the tip
            write_node(&mut out, sub.identifier(), sub.node(), i == last);
        }
        if self.is_snapshot() {
            out.push_str("-SNAPSHOT");
        }
        out
    }

    pub fn render(&self, full: bool) -> String {
        if full {
            self.full_version()
        } else {
            self.plain_version()
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_version())
    }
}

#[cfg(test)]
mod tests {
    use crate::stage::DevelopmentStage;
    use crate::version::{Version, VersionNode, VersionNumber};

    fn render(version: &str) -> String {
        Version::parse(version).unwrap().full_version()
    }

    #[test]
    fn test_plain_version() {
        assert_eq!(Version::parse("1.2.0rc5-A1.0").unwrap().plain_version(), "v1.2.0");
        assert_eq!(Version::from_numbers(&[3]).unwrap().plain_version(), "v3");
        let version = Version::parse("1.2.0-b5-SNAPSHOT").unwrap();
        assert_eq!(version.render(false), "v1.2.0");
        assert_eq!(version.render(true), "v1.2.0-b5-SNAPSHOT");
    }

    #[test]
    fn test_full_version() {
        assert_eq!(render("1.2.0"), "v1.2.0");
        assert_eq!(render("1.2.0a3"), "v1.2.0a3");
        assert_eq!(render("1.2.0-b5"), "v1.2.0-b5");
        assert_eq!(render("1.2.0-b1"), "v1.2.0");
        assert_eq!(render("1.2.0-b5-SNAPSHOT"), "v1.2.0-b5-SNAPSHOT");
        assert_eq!(render("1.2.0-SNAPSHOT"), "v1.2.0-SNAPSHOT");
        assert_eq!(render("1.2.0-UNIQUE3.2a3"), "v1.2.0-UNIQUE3.2a3");
        assert_eq!(render("1.2.0rc5-UNIQUE3.2-b102"), "v1.2.0rc5-UNIQUE3.2-b102");
        assert_eq!(
            render("1.2.0rc5-UNIQUE3.2b102-SNAPSHOT"),
            "v1.2.0rc5-UNIQUE3.2b102-SNAPSHOT"
        );
        assert_eq!(render("2.0-FORK1.0-PATCH4-b3"), "v2.0-FORK1.0-PATCH4-b3");
    }

    #[test]
    fn test_root_build_hidden_with_subversions() {
        let version = Version::from_numbers(&[1, 0])
            .unwrap()
            .with_build(9)
            .with_subversion("A", VersionNode::new(VersionNumber::new(vec![2]).unwrap()))
            .unwrap();
        assert_eq!(version.full_version(), "v1.0-A2");
    }

    #[test]
    fn test_middle_subversion_build_not_rendered() {
        let version = Version::from_numbers(&[1, 0])
            .unwrap()
            .with_subversion("A", VersionNode::new(VersionNumber::new(vec![1, 0]).unwrap()).with_build(5))
            .unwrap()
            .with_subversion("B", VersionNode::new(VersionNumber::new(vec![2, 0]).unwrap()))
            .unwrap();
        let text = version.full_version();
        assert_eq!(text, "v1.0-A1.0-B2.0");

        let parsed = Version::parse(&text).unwrap();
        assert!(parsed.is_same_fork_as(&version));
        assert!(parsed.matches(&version));
    }

    #[test]
    fn test_pre_alpha_renders_as_alpha_code() {
        let version = Version::from_numbers(&[1])
            .unwrap()
            .with_stage(DevelopmentStage::PreAlpha)
            .with_build(2);
        assert_eq!(version.to_string(), "v1a2");
        assert_eq!(Version::parse("v1a2").unwrap().stage(), DevelopmentStage::Alpha);
    }

    #[test]
    fn test_end_of_life_has_no_code() {
        let version = Version::from_numbers(&[4, 1])
            .unwrap()
            .with_stage(DevelopmentStage::EndOfLife)
            .with_build(3);
        assert_eq!(version.to_string(), "v4.1-b3");
    }
}
