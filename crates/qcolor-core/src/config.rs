//! Solver configuration shared by the pipeline and the CLI.

use crate::errors::{QColorError, Result};
use crate::qubo::PenaltyWeights;
use crate::sampler::AnnealingConfig;
use crate::solver::DEFAULT_NUM_READS;
use serde::{Deserialize, Serialize};

/// Parameters of one coloring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Colors available per node (K)
    #[serde(default = "default_num_colors")]
    pub num_colors: usize,

    /// Independent sampler reads
    #[serde(default = "default_num_reads")]
    pub num_reads: usize,

    #[serde(default)]
    pub penalties: PenaltyWeights,

    #[serde(default)]
    pub annealing: AnnealingConfig,
}

fn default_num_colors() -> usize {
    3
}

fn default_num_reads() -> usize {
    DEFAULT_NUM_READS
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            num_colors: default_num_colors(),
            num_reads: default_num_reads(),
            penalties: PenaltyWeights::default(),
            annealing: AnnealingConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Checks every field without clamping.
    pub fn validate(&self) -> Result<()> {
        if self.num_colors < 1 {
            return Err(QColorError::invalid_parameter(format!(
                "num_colors must be >= 1, got {}",
                self.num_colors
            )));
        }
        if self.num_reads < 1 {
            return Err(QColorError::invalid_parameter(format!(
                "num_reads must be >= 1, got {}",
                self.num_reads
            )));
        }
        self.penalties.validate()?;
        self.annealing.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.num_colors, 3);
        assert_eq!(config.num_reads, 50);
        assert_eq!(config.penalties, PenaltyWeights::new(2.0, 1.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SolverConfig = serde_json::from_str(r#"{"num_colors": 4}"#).unwrap();
        assert_eq!(config.num_colors, 4);
        assert_eq!(config.num_reads, 50);
        assert_eq!(config.annealing.num_sweeps, 1000);
    }

    #[test]
    fn test_validation_is_not_clamping() {
        let config = SolverConfig {
            num_reads: 0,
            ..SolverConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(QColorError::InvalidParameter(_))
        ));

        let config = SolverConfig {
            penalties: PenaltyWeights::new(2.0, 0.0),
            ..SolverConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
