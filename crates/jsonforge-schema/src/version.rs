use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

///
/// Version
///
/// A schema version label such as `"2"` or `"1.4.1"`. Comparison is by
/// dot-separated numeric segments, with missing segments counting as zero,
/// so `"1" == "1.0"` and `"1.2" < "1.10"`. Non-numeric segments compare
/// lexicographically as a last resort.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric segment-wise comparison. Not exposed as `Ord` because it is
    /// coarser than string equality (`"1"` and `"1.0"` compare equal).
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        let left: Vec<&str> = self.0.split('.').collect();
        let right: Vec<&str> = other.0.split('.').collect();

        for i in 0..left.len().max(right.len()) {
            let a = left.get(i).copied().unwrap_or("0");
            let b = right.get(i).copied().unwrap_or("0");

            let ordering = match (a.parse::<u64>(), b.parse::<u64>()) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => a.cmp(b),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        Ordering::Equal
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Version {
    fn from(version: &str) -> Self {
        Self::new(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_numeric_segments() {
        assert_eq!(Version::new("2").compare(&Version::new("10")), Ordering::Less);
        assert_eq!(Version::new("1.2").compare(&Version::new("1.10")), Ordering::Less);
        assert_eq!(Version::new("3").compare(&Version::new("3")), Ordering::Equal);
        assert_eq!(Version::new("4").compare(&Version::new("3.9")), Ordering::Greater);
    }

    #[test]
    fn missing_segments_count_as_zero() {
        assert_eq!(Version::new("1").compare(&Version::new("1.0")), Ordering::Equal);
        assert_eq!(Version::new("1").compare(&Version::new("1.0.1")), Ordering::Less);
    }
}
