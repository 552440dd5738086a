//! Explanation settings.

use std::fmt;
use std::str::FromStr;

use crate::attribution::Adjustments;
use crate::error::ExplainError;

/// Which value the fancy grid prints under each piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridMode {
    /// Per-square attribution.
    #[default]
    Contribution,
    /// Piece-removal delta.
    Delta,
}

impl FromStr for GridMode {
    type Err = ExplainError;

    fn from_str(s: &str) -> Result<GridMode, ExplainError> {
        match s {
            "contrib" => Ok(GridMode::Contribution),
            "delta" => Ok(GridMode::Delta),
            _ => Err(ExplainError::UnknownGridMode {
                found: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridMode::Contribution => write!(f, "contrib"),
            GridMode::Delta => write!(f, "delta"),
        }
    }
}

/// Options for a single explanation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplainConfig {
    /// Nominal-value rescaling of attributions.
    pub adjustments: Adjustments,
    /// `SYM:VALUE,...` overrides merged over the default nominal values.
    pub piece_values: String,
    /// Print the ranked counterfactual deltas.
    pub with_delta: bool,
    /// Print the bordered piece/value grid.
    pub fancy: bool,
    /// Value source for the fancy grid.
    pub grid_mode: GridMode,
}

impl ExplainConfig {
    /// Whether counterfactuals must be computed.
    ///
    /// They are needed for the delta listing and for the delta grid mode;
    /// otherwise no extra evaluator calls are made.
    pub fn wants_counterfactuals(&self) -> bool {
        self.with_delta || self.grid_mode == GridMode::Delta
    }
}

#[cfg(test)]
mod tests {
    use super::{ExplainConfig, GridMode};

    #[test]
    fn grid_mode_names() {
        assert_eq!("contrib".parse::<GridMode>().unwrap(), GridMode::Contribution);
        assert_eq!("delta".parse::<GridMode>().unwrap(), GridMode::Delta);
        assert!("both".parse::<GridMode>().is_err());
        assert_eq!(GridMode::Delta.to_string(), "delta");
    }

    #[test]
    fn counterfactuals_are_lazy() {
        let config = ExplainConfig::default();
        assert!(!config.wants_counterfactuals());

        let with_delta = ExplainConfig {
            with_delta: true,
            ..ExplainConfig::default()
        };
        assert!(with_delta.wants_counterfactuals());

        let delta_grid = ExplainConfig {
            grid_mode: GridMode::Delta,
            ..ExplainConfig::default()
        };
        assert!(delta_grid.wants_counterfactuals());
    }
}
