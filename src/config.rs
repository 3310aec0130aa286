//! Filter configuration and validation
//!
//! # Example
//!
//! ```
//! use sha_bloom::FilterConfig;
//!
//! let filter = FilterConfig::default()
//!     .with_capacity(100)
//!     .with_false_positive_probability(0.001)
//!     .build()
//!     .expect("valid config");
//!
//! assert_eq!(filter.hash_count(), 10);
//! ```

use crate::bloom::Filter;
use crate::Result;

/// Parameters a [`Filter`] is built from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterConfig {
    /// Number of elements the caller intends to store
    pub capacity: u32,
    /// Tolerated rate of false positives, in (0, 1)
    pub false_positive_probability: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            false_positive_probability: 0.01, // 1% false positive rate
        }
    }
}

impl FilterConfig {
    /// Create a new configuration with validation
    pub fn new(capacity: u32, false_positive_probability: f64) -> Result<Self> {
        let config = Self {
            capacity,
            false_positive_probability,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the parameters the same way [`Filter::new`] does
    pub fn validate(&self) -> Result<()> {
        Filter::layout(self.capacity, self.false_positive_probability).map(|_| ())
    }

    /// Builder-style method to set the capacity
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builder-style method to set the false positive probability
    pub fn with_false_positive_probability(mut self, prob: f64) -> Self {
        self.false_positive_probability = prob;
        self
    }

    /// Bits the filter will occupy
    pub fn bit_len(&self) -> u64 {
        crate::utils::optimal_bit_len(self.capacity, self.false_positive_probability)
    }

    /// Create an empty filter with these parameters
    pub fn build(&self) -> Result<Filter> {
        Filter::new(self.capacity, self.false_positive_probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BloomError;

    #[test]
    fn test_default_config_is_valid() {
        let config = FilterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bit_len(), 9586);
    }

    #[test]
    fn test_config_validation_rejects_zero_capacity() {
        let config = FilterConfig::default().with_capacity(0);
        assert_eq!(config.validate(), Err(BloomError::ZeroCapacity));
        assert!(FilterConfig::new(0, 0.01).is_err());
    }

    #[test]
    fn test_config_validation_rejects_probability() {
        for prob in [0.0, -0.5, f64::NAN] {
            let config = FilterConfig::default().with_false_positive_probability(prob);
            assert!(matches!(
                config.validate(),
                Err(BloomError::InvalidProbability { .. })
            ));
        }
    }

    #[test]
    fn test_build_uses_config() {
        let config = FilterConfig::new(1_000_000, 0.01).unwrap();
        let filter = config.build().unwrap();

        assert_eq!(filter.capacity(), 1_000_000);
        assert_eq!(filter.bit_len(), config.bit_len());
        assert_eq!(filter.hash_count(), 7);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_from_json() {
        let config: FilterConfig =
            serde_json::from_str(r#"{"capacity": 500, "false_positive_probability": 0.05}"#)
                .unwrap();
        assert_eq!(config, FilterConfig::new(500, 0.05).unwrap());

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"capacity\":500"));
    }
}
