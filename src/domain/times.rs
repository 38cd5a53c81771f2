//! Call-count constraints for verification.

use std::fmt;
use thiserror::Error;

/// Error returned when a call-count constraint is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// The lower bound is above the upper bound
    #[error("minimum call count {min} exceeds maximum {max}")]
    MinExceedsMax {
        /// Requested lower bound
        min: usize,
        /// Requested upper bound
        max: usize,
    },
}

/// Inclusive bounds on how many times a call pattern was observed.
///
/// # Example
/// ```
/// use stunt_double::Times;
///
/// assert!(Times::at_least(2).contains(2));
/// assert!(!Times::at_least(2).contains(1));
/// assert!(Times::never().contains(0));
/// assert!(Times::between(3, 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Times {
    min: usize,
    max: Option<usize>,
}

impl Times {
    /// The pattern was never observed.
    pub fn never() -> Self {
        Self::exactly(0)
    }

    /// Observed exactly once.
    pub fn once() -> Self {
        Self::exactly(1)
    }

    /// Observed exactly `n` times.
    pub fn exactly(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    /// Observed `n` or more times.
    pub fn at_least(n: usize) -> Self {
        Self { min: n, max: None }
    }

    /// Observed one or more times.
    pub fn at_least_once() -> Self {
        Self::at_least(1)
    }

    /// Observed no more than `n` times.
    pub fn at_most(n: usize) -> Self {
        Self {
            min: 0,
            max: Some(n),
        }
    }

    /// Observed between `min` and `max` times, inclusive.
    ///
    /// # Errors
    /// Returns `ConstraintError::MinExceedsMax` if `min > max`.
    pub fn between(min: usize, max: usize) -> Result<Self, ConstraintError> {
        if min > max {
            return Err(ConstraintError::MinExceedsMax { min, max });
        }
        Ok(Self {
            min,
            max: Some(max),
        })
    }

    /// Lower bound.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Upper bound, `None` when unbounded.
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Check an observed count against the bounds.
    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

impl Default for Times {
    fn default() -> Self {
        Self::at_least_once()
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (0, Some(0)) => write!(f, "never"),
            (min, Some(max)) if min == max => write!(f, "exactly {}", plural(min)),
            (0, Some(max)) => write!(f, "at most {}", plural(max)),
            (min, None) => write!(f, "at least {}", plural(min)),
            (min, Some(max)) => write!(f, "between {} and {} times", min, max),
        }
    }
}

fn plural(n: usize) -> String {
    if n == 1 {
        "once".to_string()
    } else {
        format!("{} times", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly() {
        let times = Times::exactly(2);
        assert!(!times.contains(1));
        assert!(times.contains(2));
        assert!(!times.contains(3));
    }

    #[test]
    fn test_never_passes_only_on_zero() {
        assert!(Times::never().contains(0));
        assert!(!Times::never().contains(1));
    }

    #[test]
    fn test_at_least_is_unbounded() {
        let times = Times::at_least(2);
        assert!(!times.contains(0));
        assert!(times.contains(2));
        assert!(times.contains(usize::MAX));
        assert_eq!(times.max(), None);
    }

    #[test]
    fn test_at_most() {
        let times = Times::at_most(1);
        assert!(times.contains(0));
        assert!(times.contains(1));
        assert!(!times.contains(2));
    }

    #[test]
    fn test_between_validation() {
        assert_eq!(
            Times::between(4, 2),
            Err(ConstraintError::MinExceedsMax { min: 4, max: 2 })
        );
        let times = Times::between(2, 2).unwrap();
        assert_eq!(times, Times::exactly(2));
    }

    #[test]
    fn test_default_is_at_least_once() {
        assert_eq!(Times::default(), Times::at_least(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Times::never().to_string(), "never");
        assert_eq!(Times::once().to_string(), "exactly once");
        assert_eq!(Times::exactly(3).to_string(), "exactly 3 times");
        assert_eq!(Times::at_least(2).to_string(), "at least 2 times");
        assert_eq!(Times::at_least_once().to_string(), "at least once");
        assert_eq!(Times::at_most(4).to_string(), "at most 4 times");
        assert_eq!(
            Times::between(1, 3).unwrap().to_string(),
            "between 1 and 3 times"
        );
    }
}
