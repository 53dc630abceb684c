//! Server version parsing and comparison.
//!
//! Accepted grammar: `MAJOR.MINOR` or `MAJOR.MINOR.PATCH`, each component a
//! non-negative integer. Surrounding whitespace and whitespace around each
//! component is ignored. A missing patch component is zero, so `7.2` and
//! `7.2.0` compare equal.
//!
//! # Examples
//!
//! ```
//! use std::cmp::Ordering;
//! use iamsync_core::version::{compare_versions, parse_version};
//!
//! assert_eq!(parse_version("7.2").unwrap(), semver::Version::new(7, 2, 0));
//! assert_eq!(compare_versions("7.0.9", "7.0.10").unwrap(), Ordering::Less);
//! assert!(parse_version("7").is_err());
//! ```

use std::cmp::Ordering;

use semver::Version;

/// Why a version string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("version string is empty")]
    Empty,

    #[error("version must have format MAJOR.MINOR or MAJOR.MINOR.PATCH, got: {version}")]
    WrongArity { version: String, components: usize },

    #[error("invalid version component '{component}': must be an integer")]
    NotAnInteger { component: String },

    #[error("version component cannot be negative: {component}")]
    Negative { component: String },
}

/// Parse a server version string.
pub fn parse_version(version: &str) -> Result<Version, VersionError> {
    let trimmed = version.trim();
    if trimmed.is_empty() {
        return Err(VersionError::Empty);
    }

    let components: Vec<&str> = trimmed.split('.').map(str::trim).collect();
    if !(2..=3).contains(&components.len()) {
        return Err(VersionError::WrongArity {
            version: version.to_string(),
            components: components.len(),
        });
    }

    let mut parts = [0u64; 3];
    for (slot, component) in parts.iter_mut().zip(&components) {
        *slot = parse_component(component)?;
    }

    Ok(Version::new(parts[0], parts[1], parts[2]))
}

fn parse_component(component: &str) -> Result<u64, VersionError> {
    if let Some(magnitude) = component.strip_prefix('-')
        && magnitude.parse::<u64>().is_ok()
    {
        return Err(VersionError::Negative {
            component: component.to_string(),
        });
    }

    component
        .parse::<u64>()
        .map_err(|_| VersionError::NotAnInteger {
            component: component.to_string(),
        })
}

/// Compare two version strings by (major, minor, patch).
///
/// A parse failure on either side is returned rather than coerced.
pub fn compare_versions(v1: &str, v2: &str) -> Result<Ordering, VersionError> {
    let left = parse_version(v1)?;
    let right = parse_version(v2)?;
    Ok((left.major, left.minor, left.patch).cmp(&(right.major, right.minor, right.patch)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("7.0.0", (7, 0, 0))]
    #[case("10.5.3", (10, 5, 3))]
    #[case(" 7.0.0 ", (7, 0, 0))]
    #[case("7. 0 .0", (7, 0, 0))]
    #[case("7.2", (7, 2, 0))]
    #[case("5.0", (5, 0, 0))]
    #[case(" 7.2 ", (7, 2, 0))]
    fn test_parse_valid(#[case] input: &str, #[case] expected: (u64, u64, u64)) {
        let version = parse_version(input).unwrap();
        assert_eq!((version.major, version.minor, version.patch), expected);
    }

    #[test]
    fn test_parse_empty_variants() {
        assert_eq!(parse_version(""), Err(VersionError::Empty));
        assert_eq!(parse_version("   "), Err(VersionError::Empty));
    }

    #[test]
    fn test_parse_arity() {
        assert!(matches!(
            parse_version("7"),
            Err(VersionError::WrongArity { components: 1, .. })
        ));
        assert!(matches!(
            parse_version("7.0.0.1"),
            Err(VersionError::WrongArity { components: 4, .. })
        ));
    }

    #[test]
    fn test_parse_component_errors() {
        assert!(matches!(
            parse_version("7.x.0"),
            Err(VersionError::NotAnInteger { .. })
        ));
        assert!(matches!(
            parse_version("7.-1.0"),
            Err(VersionError::Negative { .. })
        ));
        assert!(matches!(
            parse_version("7..0"),
            Err(VersionError::NotAnInteger { .. })
        ));
    }
}
