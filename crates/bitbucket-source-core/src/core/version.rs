use crate::core::error::{SourceError, SourceResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static SEMVER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d+)\.(\d+)\.(\d+)(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
    )
    .expect("semver pattern is valid")
});

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})\.(\d{2})\.(\d{2})\.(\d{2})\.(\d{2})\.(\d{2})$")
        .expect("date pattern is valid")
});

static PRE_SEMVER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(?:\.(\d+)(?:\.(\d+)(?:[T.](\d+(?:\.\d+)*))?)?)?$")
        .expect("pre-semver pattern is valid")
});

/// A package version.
///
/// Besides plain semantic versions this accepts the two legacy forms found in
/// repository tags and branch pseudo-versions:
/// - commit dates `YYYY.MM.DD.hh.mm.ss`, read as `0.0.1+YYYY.MM.DD.hh.mm.ss`
///   so that any explicitly tagged release sorts above them
/// - pre-semver dotted numbers (`1`, `1.6`, `1.6.9.0`), where groups past the
///   third become build metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Pre-release version (e.g., "alpha.1", "beta.2", "rc.1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<String>,
    /// Build metadata (e.g., "build.123", or a commit date)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_metadata: Option<String>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build_metadata: None,
        }
    }

    /// Parse a version string (e.g., "1.2.3", "v1.2.3-rc.1+build.5", "1.6",
    /// "2020.07.15.10.50.38")
    pub fn parse(s: &str) -> SourceResult<Self> {
        let ver = s.strip_prefix('v').unwrap_or(s);

        if let Some(caps) = SEMVER_PATTERN.captures(ver) {
            return Ok(Self {
                major: parse_number(&caps[1], s)?,
                minor: parse_number(&caps[2], s)?,
                patch: parse_number(&caps[3], s)?,
                prerelease: caps.get(4).map(|m| m.as_str().to_string()),
                build_metadata: caps.get(5).map(|m| m.as_str().to_string()),
            });
        }

        if let Some(caps) = DATE_PATTERN.captures(ver) {
            let date = (1..=6)
                .map(|i| caps[i].to_string())
                .collect::<Vec<_>>()
                .join(".");
            return Ok(Self {
                build_metadata: Some(date),
                ..Self::new(0, 0, 1)
            });
        }

        if let Some(caps) = PRE_SEMVER_PATTERN.captures(ver) {
            let group = |i: usize| -> SourceResult<u64> {
                caps.get(i).map_or(Ok(0), |m| parse_number(m.as_str(), s))
            };
            return Ok(Self {
                major: group(1)?,
                minor: group(2)?,
                patch: group(3)?,
                prerelease: None,
                build_metadata: caps.get(4).map(|m| m.as_str().to_string()),
            });
        }

        Err(SourceError::Version(format!(
            "'{}' is not a valid SemVer string",
            s
        )))
    }
}

fn parse_number(digits: &str, original: &str) -> SourceResult<u64> {
    digits
        .parse()
        .map_err(|_| SourceError::Version(format!("Version component out of range: {}", original)))
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => compare_identifiers(a, b),
            })
            // Build metadata only breaks ties; it keeps commit-date versions chronological.
            .then_with(|| match (&self.build_metadata, &other.build_metadata) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(a), Some(b)) => compare_identifiers(a, b),
            })
    }
}

/// Compare dot-separated identifiers according to SemVer precedence rules
fn compare_identifiers(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<&str> = a.split('.').collect();
    let b_parts: Vec<&str> = b.split('.').collect();

    for (a_part, b_part) in a_parts.iter().zip(b_parts.iter()) {
        let ordering = match (a_part.parse::<u64>(), b_part.parse::<u64>()) {
            (Ok(a_num), Ok(b_num)) => a_num.cmp(&b_num),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => a_part.cmp(b_part),
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    a_parts.len().cmp(&b_parts.len())
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(ref build) = self.build_metadata {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

/// A tag name split into its filter prefix and version part.
///
/// `prefix + version` always reproduces the tag the entry came from.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionInfo {
    pub version: String,
    pub prefix: String,
    pub parsed: Version,
}

/// Parse `version` if it starts with `filter_prefix`, with the prefix removed.
///
/// Without a prefix (or with an empty one) the whole string is parsed.
pub fn version_match_prefix(version: &str, filter_prefix: Option<&str>) -> Option<Version> {
    match filter_prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => version
            .strip_prefix(prefix)
            .and_then(|rest| Version::parse(rest).ok()),
        None => Version::parse(version).ok(),
    }
}

/// Turn raw tag names into version entries.
///
/// With a filter prefix only tags starting with it are considered and the
/// prefix is split off. Without one, a single leading `v` is split off as the
/// prefix. Tags whose remainder is not a valid version are dropped. Input
/// order is preserved.
pub fn version_process<'a, I>(tags: I, filter_prefix: Option<&str>) -> Vec<VersionInfo>
where
    I: IntoIterator<Item = &'a str>,
{
    let filter_prefix = filter_prefix.filter(|p| !p.is_empty());

    tags.into_iter()
        .filter_map(|tag| {
            let (prefix, version) = match filter_prefix {
                Some(prefix) => (prefix, tag.strip_prefix(prefix)?),
                None => match tag.strip_prefix('v') {
                    Some(rest) => ("v", rest),
                    None => ("", tag),
                },
            };
            let parsed = Version::parse(version).ok()?;
            Some(VersionInfo {
                version: version.to_string(),
                prefix: prefix.to_string(),
                parsed,
            })
        })
        .collect()
}

/// Sort version entries by parsed version.
///
/// The sort is stable in both directions: entries with equal versions keep
/// their input order.
pub fn version_sort(mut infos: Vec<VersionInfo>, reverse: bool) -> Vec<VersionInfo> {
    if reverse {
        infos.sort_by(|a, b| b.parsed.cmp(&a.parsed));
    } else {
        infos.sort_by(|a, b| a.parsed.cmp(&b.parsed));
    }
    infos
}
