/// A set of placeholder values that mark a field as missing or invalid.
///
/// Matching trims whitespace, ignores ASCII case, and treats numerically
/// equal values as the same marker, so `-666.0` matches `-666`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentinelSet {
    values: Vec<String>,
    numeric: Vec<f64>,
}

/// Identity markers used by the LINCS and sci-Plex annotation tables
pub const DEFAULT_IDENTITY_SENTINELS: [&str; 4] = ["-666", "restricted", "nan", ""];

/// Dose marker used by the LINCS annotation tables
pub const DEFAULT_DOSE_SENTINELS: [&str; 1] = ["-666"];

impl SentinelSet {
    /// Build a set from marker strings
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for value in values {
            let value = value.as_ref().trim();
            match value.parse::<f64>() {
                Ok(number) if number.is_finite() => set.numeric.push(number),
                _ => set.values.push(value.to_ascii_lowercase()),
            }
        }
        set
    }

    /// Default identity markers: `-666`, `restricted`, `nan` and the empty string
    pub fn identity_defaults() -> Self {
        Self::new(DEFAULT_IDENTITY_SENTINELS)
    }

    /// Default dose marker: `-666`
    pub fn dose_defaults() -> Self {
        Self::new(DEFAULT_DOSE_SENTINELS)
    }

    /// Whether `value` is one of the markers
    pub fn contains(&self, value: &str) -> bool {
        let value = value.trim();
        if let Ok(number) = value.parse::<f64>() {
            if self.numeric.iter().any(|n| *n == number) {
                return true;
            }
        }
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }

    /// Whether the set has no markers
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.numeric.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_defaults() {
        let sentinels = SentinelSet::identity_defaults();
        for marker in ["-666", "-666.0", " -666 ", "restricted", "RESTRICTED", "nan", "NaN", ""] {
            assert!(sentinels.contains(marker), "{:?} should match", marker);
        }
        for value in ["CCO", "666", "-66", "c1ccccc1"] {
            assert!(!sentinels.contains(value), "{:?} should not match", value);
        }
    }

    #[test]
    fn test_dose_defaults() {
        let sentinels = SentinelSet::dose_defaults();
        assert!(sentinels.contains("-666"));
        assert!(sentinels.contains("-666.00"));
        assert!(!sentinels.contains("10.0"));
        assert!(!sentinels.contains(""));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let sentinels = SentinelSet::new(Vec::<String>::new());
        assert!(sentinels.is_empty());
        assert!(!sentinels.contains(""));
    }
}
