//! Calibrated measurement and hammering parameters.
//!
//! The trial count, cycle threshold and iteration count are empirically
//! tuned against one specific machine (hardware, DRAM timing, access
//! pattern). They are surfaced here as named, serializable parameters with
//! JSON file loaders, so re-calibrating for another machine is a config
//! change rather than a code change.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::classifier::RowRelation;

/// Reference trial count for one classification measurement.
pub const DEFAULT_TRIALS: u64 = 1000;

/// Reference row-conflict threshold in cycles, valid for
/// [`DEFAULT_TRIALS`] trials on the machine the protocol was tuned on.
pub const DEFAULT_THRESHOLD_CYCLES: u64 = 600_000;

/// Reference per-invocation read count for the hammering loop.
pub const DEFAULT_HAMMER_ITERATIONS: u64 = 1_000_000;

/// Errors that can occur when loading configuration files.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}

/// Result type for configuration loaders.
pub type Result<T> = std::result::Result<T, Error>;

/// Timing-channel calibration for [`crate::classifier::BankClassifier`].
///
/// The threshold is a calibrated constant, not adaptively computed: it
/// holds only for the trial count and machine it was tuned against.
/// Changing either requires re-calibration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Probe repetitions per measurement; more trials trade latency for
    /// signal-to-noise
    pub trials: u64,
    /// Cumulative elapsed cycles at which a measurement counts as a row
    /// conflict
    pub threshold_cycles: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            threshold_cycles: DEFAULT_THRESHOLD_CYCLES,
        }
    }
}

impl ClassifierConfig {
    /// Loads calibration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_jsonfile(filepath: &str) -> Result<ClassifierConfig> {
        let mut file = File::open(Path::new(filepath))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let config: ClassifierConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Thresholds an elapsed measurement.
    ///
    /// A pure function of the elapsed cycles: below the threshold is
    /// [`RowRelation::SameRow`], at or above is
    /// [`RowRelation::RowConflict`]. Independent of which addresses
    /// produced the measurement.
    pub fn relation_of(&self, elapsed_cycles: u64) -> RowRelation {
        if elapsed_cycles < self.threshold_cycles {
            RowRelation::SameRow
        } else {
            RowRelation::RowConflict
        }
    }
}

/// Parameters for [`crate::hammerer::HammerDriver`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct HammerConfig {
    /// Read pairs per hammering invocation
    pub iterations: u64,
}

impl Default for HammerConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_HAMMER_ITERATIONS,
        }
    }
}

impl HammerConfig {
    /// Loads hammering parameters from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_jsonfile(filepath: &str) -> Result<HammerConfig> {
        let mut file = File::open(Path::new(filepath))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let config: HammerConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{ClassifierConfig, HammerConfig};
    use crate::classifier::RowRelation;

    #[test]
    fn test_reference_defaults() {
        let config = ClassifierConfig::default();
        assert_eq!(config.trials, 1000);
        assert_eq!(config.threshold_cycles, 600_000);
        assert_eq!(HammerConfig::default().iterations, 1_000_000);
    }

    #[test]
    fn test_relation_thresholding() {
        let config = ClassifierConfig::default();
        // empirically ~500000 cycles for a same-row pair
        assert_eq!(config.relation_of(500_000), RowRelation::SameRow);
        // >600000 for different rows in the same bank
        assert_eq!(config.relation_of(650_000), RowRelation::RowConflict);
        assert_eq!(config.relation_of(600_000), RowRelation::RowConflict);
        assert_eq!(config.relation_of(599_999), RowRelation::SameRow);
    }

    #[test]
    fn test_relation_idempotent() {
        let config = ClassifierConfig::default();
        for _ in 0..3 {
            assert_eq!(config.relation_of(550_000), RowRelation::SameRow);
        }
    }

    #[test]
    fn test_from_jsonfile() -> anyhow::Result<()> {
        let path = std::env::temp_dir().join("sledge-classifier-config.json");
        std::fs::write(&path, r#"{ "trials": 2000, "threshold_cycles": 1200000 }"#)?;
        let config = ClassifierConfig::from_jsonfile(path.to_str().unwrap())?;
        assert_eq!(config.trials, 2000);
        assert_eq!(config.threshold_cycles, 1_200_000);
        std::fs::remove_file(&path)?;
        Ok(())
    }
}
