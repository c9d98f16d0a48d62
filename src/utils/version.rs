// Version utilities for FIP version bumps
//
// Only dotted three-component numeric versions are supported.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::models::api::SubmittedVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch }
    }

    /// `M+1.0.0`
    pub const fn next_major(&self) -> Self {
        Self::new(self.major.saturating_add(1), 0, 0)
    }

    /// `M.m+1.0`
    pub const fn next_minor(&self) -> Self {
        Self::new(self.major, self.minor.saturating_add(1), 0)
    }

    /// `M.m.p+1`
    pub const fn next_patch(&self) -> Self {
        Self::new(self.major, self.minor, self.patch.saturating_add(1))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
    }
}

fn loose_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[vV]?([0-9]+)(?:\.([0-9]+))?(?:\.([0-9]+))?").expect("valid loose version pattern")
    })
}

fn strict_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("valid strict version pattern")
    })
}

/// Normalize a loosely written version (`v2`, `2.3`, `release v1.4`) into `M.m.p`.
///
/// The first run of one to three dot-separated integer groups is used; missing
/// minor and patch components become `0`. Returns `None` when the input holds
/// no integer group at all.
pub fn rectify(input: &str) -> Option<String> {
    let captures = loose_pattern().captures(input)?;
    let major = captures.get(1)?.as_str();
    let minor = captures.get(2).map_or("0", |m| m.as_str());
    let patch = captures.get(3).map_or("0", |m| m.as_str());
    Some(format!("{major}.{minor}.{patch}"))
}

/// Parse an exact `digits.digits.digits` string.
///
/// Anything else (prefixes, missing components, trailing text, components
/// that overflow `u64`) yields `None`.
pub fn parse(input: &str) -> Option<Version> {
    let captures = strict_pattern().captures(input)?;
    let component = |idx: usize| captures.get(idx)?.as_str().parse::<u64>().ok();
    Some(Version::new(component(1)?, component(2)?, component(3)?))
}

/// Rectify first, then parse the canonical form.
pub fn parse_rectified(input: &str) -> Option<Version> {
    rectify(input).as_deref().and_then(parse)
}

/// Most-significant-first comparison of two versions.
pub fn compare(a: &Version, b: &Version) -> Ordering {
    a.cmp(b)
}

/// Highest parseable version among the submitted records, as `M.m.p`.
///
/// Records without a version, or with one that does not parse, are skipped.
/// On ties the first maximal record wins.
pub fn latest(records: &[SubmittedVersion]) -> Option<String> {
    latest_version(records).map(|version| version.to_string())
}

pub(crate) fn latest_version(records: &[SubmittedVersion]) -> Option<Version> {
    let mut best: Option<Version> = None;
    for record in records {
        let Some(parsed) = record.version.as_deref().and_then(parse) else {
            continue;
        };
        if best.map_or(true, |current| compare(&parsed, &current) == Ordering::Greater) {
            best = Some(parsed);
        }
    }
    best
}

/// Which suggestion shortcut was picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

impl FromStr for BumpKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            other => Err(format!("Unknown bump kind '{other}' (expected major, minor or patch)")),
        }
    }
}

/// Suggested next versions shown next to the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    pub major: String,
    pub minor: String,
    pub patch: String,
}

impl Suggestions {
    /// Suggestions derived from a baseline version.
    pub fn for_version(baseline: &Version) -> Self {
        Self {
            major: baseline.next_major().to_string(),
            minor: baseline.next_minor().to_string(),
            patch: baseline.next_patch().to_string(),
        }
    }

    /// Suggestions used when there is no usable baseline
    pub fn defaults() -> Self {
        Self {
            major: "1.0.0".to_string(),
            minor: "0.1.0".to_string(),
            patch: "0.0.1".to_string(),
        }
    }

    /// Initial form version and suggestions for an optional baseline string.
    ///
    /// A baseline that does not parse falls back to form `0.1.0` and the
    /// default suggestions.
    pub fn from_baseline(baseline: Option<&str>) -> (Version, Self) {
        match baseline.and_then(parse) {
            Some(version) => (version, Self::for_version(&version)),
            None => (Version::new(0, 1, 0), Self::defaults()),
        }
    }

    pub fn get(&self, kind: BumpKind) -> &str {
        match kind {
            BumpKind::Major => &self.major,
            BumpKind::Minor => &self.minor,
            BumpKind::Patch => &self.patch,
        }
    }
}
