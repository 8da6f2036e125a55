use serde::{Deserialize, Serialize};

use super::SplitError;

/// Allowed deviation of the proportion sum from one
const SUM_TOLERANCE: f64 = 1e-6;

/// Fractions of the population assigned to each partition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitProportions {
    /// Training fraction
    pub train: f64,
    /// Test fraction
    pub test: f64,
    /// Out-of-distribution fraction
    pub ood: f64,
}

impl SplitProportions {
    /// Validated proportions; each must be non-negative and they must sum to one
    pub fn new(train: f64, test: f64, ood: f64) -> Result<Self, SplitError> {
        let proportions = Self { train, test, ood };
        proportions.validate()?;
        Ok(proportions)
    }

    /// 80/10/10, used for the identity-grouped split
    pub fn identity_default() -> Self {
        Self {
            train: 0.8,
            test: 0.1,
            ood: 0.1,
        }
    }

    /// 85/7.5/7.5, used for the per-row random split
    pub fn random_default() -> Self {
        Self {
            train: 0.85,
            test: 0.075,
            ood: 0.075,
        }
    }

    /// Check sign and sum
    pub fn validate(&self) -> Result<(), SplitError> {
        for (name, value) in [("train", self.train), ("test", self.test), ("ood", self.ood)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SplitError::InvalidProportions(format!(
                    "{} fraction must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        let sum = self.train + self.test + self.ood;
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(SplitError::InvalidProportions(format!(
                "fractions sum to {}, expected 1",
                sum
            )));
        }
        Ok(())
    }

    /// Group sizes `(train, test, ood)` for `n` items.
    ///
    /// Test and ood sizes are rounded; train takes the remainder.
    pub fn counts(&self, n: usize) -> (usize, usize, usize) {
        let n_test = ((n as f64) * self.test).round() as usize;
        let n_test = n_test.min(n);
        let n_ood = ((n as f64) * self.ood).round() as usize;
        let n_ood = n_ood.min(n - n_test);
        (n - n_test - n_ood, n_test, n_ood)
    }
}

impl TryFrom<[f64; 3]> for SplitProportions {
    type Error = SplitError;

    fn try_from(value: [f64; 3]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1], value[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SplitProportions::identity_default().validate().is_ok());
        assert!(SplitProportions::random_default().validate().is_ok());
    }

    #[test]
    fn test_invalid_proportions() {
        assert!(SplitProportions::new(0.5, 0.5, 0.5).is_err());
        assert!(SplitProportions::new(1.2, -0.1, -0.1).is_err());
        assert!(SplitProportions::new(f64::NAN, 0.5, 0.5).is_err());
        assert!(SplitProportions::try_from([0.7, 0.2, 0.1]).is_ok());
    }

    #[test]
    fn test_counts() {
        assert_eq!(SplitProportions::identity_default().counts(100), (80, 10, 10));
        assert_eq!(SplitProportions::random_default().counts(1000), (850, 75, 75));
        assert_eq!(SplitProportions::identity_default().counts(0), (0, 0, 0));
        assert_eq!(SplitProportions::identity_default().counts(3), (3, 0, 0));
        let all_test = SplitProportions::new(0.0, 1.0, 0.0).unwrap();
        assert_eq!(all_test.counts(7), (0, 7, 0));
    }
}
