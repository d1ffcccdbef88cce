//! Version comparison
//!
//! Compares dotted version strings such as `1.7.1` or, in lexicographical
//! mode, `1.2b`.

use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("invalid part {part:?} in version {version:?}")]
    InvalidPart { version: String, part: String },
}

/// Flags that affect comparison behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareOptions {
    /// Compare parts as strings, allowing suffixes like `b` or `dev`.
    /// Note that `1.10` then sorts before `1.2`.
    pub lexicographical: bool,
    /// Pad the shorter version with `0` parts instead of treating it as smaller
    pub zero_extend: bool,
}

/// Compare two version strings.
///
/// Every dot-separated part must be digits (optionally followed by ASCII
/// letters in lexicographical mode); otherwise the versions are not
/// comparable and an error is returned.
pub fn compare_versions(
    v1: &str,
    v2: &str,
    options: CompareOptions,
) -> Result<Ordering, VersionError> {
    let mut a = split_parts(v1, options.lexicographical)?;
    let mut b = split_parts(v2, options.lexicographical)?;

    if options.zero_extend {
        let len = a.len().max(b.len());
        a.resize(len, "0");
        b.resize(len, "0");
    }

    for (i, left) in a.iter().enumerate() {
        let Some(right) = b.get(i) else {
            return Ok(Ordering::Greater);
        };

        let ord = if options.lexicographical {
            left.cmp(right)
        } else {
            cmp_numeric(left, right)
        };

        if ord != Ordering::Equal {
            return Ok(ord);
        }
    }

    if a.len() != b.len() {
        return Ok(Ordering::Less);
    }

    Ok(Ordering::Equal)
}

/// Whether `candidate` is a newer numeric version than `current`
pub fn is_newer(candidate: &str, current: &str) -> bool {
    let options = CompareOptions {
        lexicographical: false,
        zero_extend: true,
    };
    matches!(
        compare_versions(candidate, current, options),
        Ok(Ordering::Greater)
    )
}

fn split_parts(version: &str, lexicographical: bool) -> Result<Vec<&str>, VersionError> {
    version
        .split('.')
        .map(|part| {
            if is_valid_part(part, lexicographical) {
                Ok(part)
            } else {
                Err(VersionError::InvalidPart {
                    version: version.to_string(),
                    part: part.to_string(),
                })
            }
        })
        .collect()
}

fn is_valid_part(part: &str, lexicographical: bool) -> bool {
    let digits = part.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return false;
    }

    let rest = &part[digits..];
    if lexicographical {
        rest.bytes().all(|b| b.is_ascii_alphabetic())
    } else {
        rest.is_empty()
    }
}

/// Compare two digit strings by value without overflowing
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(v1: &str, v2: &str) -> Ordering {
        compare_versions(v1, v2, CompareOptions::default()).unwrap()
    }

    const LEX: CompareOptions = CompareOptions {
        lexicographical: true,
        zero_extend: false,
    };

    const ZERO: CompareOptions = CompareOptions {
        lexicographical: false,
        zero_extend: true,
    };

    #[test]
    fn test_numeric_comparison() {
        assert_eq!(cmp("1.7.1", "1.7.1"), Ordering::Equal);
        assert_eq!(cmp("1.7.2", "1.7.1"), Ordering::Greater);
        assert_eq!(cmp("1.7.1", "1.10.0"), Ordering::Less);
        assert_eq!(cmp("2.0", "1.99.99"), Ordering::Greater);
        assert_eq!(cmp("01.2", "1.02"), Ordering::Equal);
    }

    #[test]
    fn test_longer_version_wins_on_tie() {
        assert_eq!(cmp("1.7", "1.7.0"), Ordering::Less);
        assert_eq!(cmp("1.7.0", "1.7"), Ordering::Greater);
        assert_eq!(cmp("1.8", "1.7.5"), Ordering::Greater);
    }

    #[test]
    fn test_zero_extend() {
        assert_eq!(
            compare_versions("1.7", "1.7.0", ZERO).unwrap(),
            Ordering::Equal
        );
        assert_eq!(
            compare_versions("1.7", "1.7.0.1", ZERO).unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn test_lexicographical() {
        assert_eq!(compare_versions("1.2b", "1.2a", LEX).unwrap(), Ordering::Greater);
        assert_eq!(compare_versions("1.2", "1.2b", LEX).unwrap(), Ordering::Less);
        assert_eq!(compare_versions("1.10", "1.2", LEX).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_invalid_parts() {
        let opts = CompareOptions::default();
        assert!(compare_versions("1.2b", "1.2", opts).is_err());
        assert!(compare_versions("1.2", "", opts).is_err());
        assert!(compare_versions("1..2", "1.2", opts).is_err());
        assert!(compare_versions("v1.2", "1.2", LEX).is_err());
        assert!(compare_versions("1.2-rc1", "1.2", LEX).is_err());

        assert_eq!(
            compare_versions("1.x", "1.0", opts),
            Err(VersionError::InvalidPart {
                version: "1.x".to_string(),
                part: "x".to_string(),
            })
        );
    }

    #[test]
    fn test_huge_parts_do_not_overflow() {
        assert_eq!(
            cmp("1.99999999999999999999999", "1.100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_is_newer() {
        assert!(is_newer("1.0.1", "1.0.0"));
        assert!(is_newer("2.0.0", "1.9.9"));
        assert!(!is_newer("1.0", "1.0.0"));
        assert!(!is_newer("1.0.0", "1.0.1"));
        assert!(!is_newer("garbage", "1.0.0"));
    }
}
