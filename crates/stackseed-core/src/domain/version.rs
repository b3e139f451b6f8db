//! Version strings as registries report them.
//!
//! Registries hand back tags in loose shapes (`v1.9.1`, `1.21`, `2.2.0-beta`,
//! Go pseudo-versions). Everything here is pure: parse leniently, drop
//! pre-releases, pick the maximum by semantic-version ordering.

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::VersionOrigin;

/// Substrings that mark a tag as a pre-release regardless of its shape.
pub const PRERELEASE_MARKERS: &[&str] = &["alpha", "beta", "rc", "pre", "dev", "next"];

/// Strip surrounding whitespace and a leading `v`/`V`.
pub fn normalize(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed)
}

/// Parse a version, padding `1` / `1.2` out to three components.
pub fn parse_lenient(raw: &str) -> Option<Version> {
    let core = normalize(raw);
    if core.is_empty() {
        return None;
    }
    if let Ok(v) = Version::parse(core) {
        return Some(v);
    }

    // Split off any -pre / +build suffix before counting components.
    let split_at = core.find(['-', '+']).unwrap_or(core.len());
    let (numbers, suffix) = core.split_at(split_at);
    let padded = match numbers.matches('.').count() {
        0 => format!("{numbers}.0.0{suffix}"),
        1 => format!("{numbers}.0{suffix}"),
        _ => return None,
    };
    Version::parse(&padded).ok()
}

/// Whether a tag is a pre-release and must never be selected as "latest".
pub fn is_prerelease(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    if PRERELEASE_MARKERS.iter().any(|m| lower.contains(m)) {
        return true;
    }
    parse_lenient(raw).is_some_and(|v| !v.pre.is_empty())
}

/// Pick the greatest stable version from a candidate list.
///
/// Unparseable and pre-release candidates are ignored. The winner is
/// returned in its original spelling minus the leading `v`.
pub fn select_latest_stable<I, S>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .filter_map(|c| {
            let raw = c.as_ref();
            if is_prerelease(raw) {
                return None;
            }
            parse_lenient(raw).map(|v| (v, normalize(raw).to_string()))
        })
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, s)| s)
}

/// Ephemeral result of one registry query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionRecord {
    /// Every version string the source reported.
    pub versions: Vec<String>,
    /// Greatest non-pre-release entry of `versions`.
    pub latest_stable: Option<String>,
}

impl VersionRecord {
    pub fn from_candidates(versions: Vec<String>) -> Self {
        let latest_stable = select_latest_stable(&versions);
        Self {
            versions,
            latest_stable,
        }
    }
}

/// A pinned version and the fallback tier that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVersion {
    pub version: String,
    pub origin: VersionOrigin,
}

impl ResolvedVersion {
    pub fn new(version: impl Into<String>, origin: VersionOrigin) -> Self {
        Self {
            version: version.into(),
            origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_v_prefix() {
        assert_eq!(normalize("v1.9.1"), "1.9.1");
        assert_eq!(normalize(" 1.9.1 "), "1.9.1");
        assert_eq!(normalize("V2.0.0"), "2.0.0");
    }

    #[test]
    fn parse_pads_short_versions() {
        assert_eq!(parse_lenient("1.21"), Some(Version::new(1, 21, 0)));
        assert_eq!(parse_lenient("v3"), Some(Version::new(3, 0, 0)));
        assert_eq!(parse_lenient("not-a-version"), None);
        assert_eq!(parse_lenient(""), None);
    }

    #[test]
    fn markers_flag_prereleases() {
        assert!(is_prerelease("2.2.0-beta"));
        assert!(is_prerelease("v1.0.0-rc.1"));
        assert!(is_prerelease("4.0.0-next.3"));
        assert!(is_prerelease("1.22rc1"));
        assert!(!is_prerelease("2.1.0"));
    }

    #[test]
    fn go_pseudo_versions_are_prereleases() {
        assert!(is_prerelease("v0.0.0-20231010123456-abcdef123456"));
    }

    #[test]
    fn selects_max_stable_from_mixed_list() {
        let picked = select_latest_stable(["2.1.0", "2.2.0-beta", "2.0.9"]);
        assert_eq!(picked.as_deref(), Some("2.1.0"));
    }

    #[test]
    fn ordering_is_semantic_not_lexical() {
        let picked = select_latest_stable(["v1.9.1", "v1.10.0", "v1.2.30"]);
        assert_eq!(picked.as_deref(), Some("1.10.0"));
    }

    #[test]
    fn empty_after_filtering_is_none() {
        assert_eq!(select_latest_stable(["1.0.0-alpha", "garbage"]), None);
        assert_eq!(select_latest_stable(Vec::<String>::new()), None);
    }

    #[test]
    fn record_keeps_all_versions() {
        let record = VersionRecord::from_candidates(vec!["1.0.0".into(), "1.1.0-rc.1".into()]);
        assert_eq!(record.versions.len(), 2);
        assert_eq!(record.latest_stable.as_deref(), Some("1.0.0"));
    }
}
