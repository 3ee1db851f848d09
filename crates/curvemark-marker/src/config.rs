//! Tunable constants of the marker engine.

use crate::error::{ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};

/// Workshop constants used by the planner and the panel builders.
///
/// All values are millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Margin trimmed from the roll edge, unusable for cutting
    pub edge_trim: f64,
    /// Extra length per joint so seamed segments keep the finished size
    pub seam_overlap: f64,
    /// Smallest usable (post-curve) height of the last cross-grain segment
    pub min_remaining_height: f64,
    /// Width of the zipper sleeve shoulder
    pub sleeve_width: f64,
    /// Radius of the fillets at the sleeve shoulders
    pub fillet_radius: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            edge_trim: 20.0,
            seam_overlap: 10.0,
            min_remaining_height: 100.0,
            sleeve_width: 15.0,
            fillet_radius: 10.0,
        }
    }
}

impl MarkerConfig {
    pub fn with_edge_trim(mut self, edge_trim: f64) -> Self {
        self.edge_trim = edge_trim;
        self
    }

    pub fn with_seam_overlap(mut self, seam_overlap: f64) -> Self {
        self.seam_overlap = seam_overlap;
        self
    }

    pub fn with_min_remaining_height(mut self, min_remaining_height: f64) -> Self {
        self.min_remaining_height = min_remaining_height;
        self
    }

    pub fn with_sleeve(mut self, sleeve_width: f64, fillet_radius: f64) -> Self {
        self.sleeve_width = sleeve_width;
        self.fillet_radius = fillet_radius;
        self
    }

    pub fn validate(&self) -> ParameterResult<()> {
        ParameterError::check_non_negative("edge_trim", self.edge_trim)?;
        ParameterError::check_non_negative("seam_overlap", self.seam_overlap)?;
        ParameterError::check_non_negative("min_remaining_height", self.min_remaining_height)?;
        ParameterError::check_positive("sleeve_width", self.sleeve_width)?;
        ParameterError::check_positive("fillet_radius", self.fillet_radius)?;

        if self.fillet_radius >= self.sleeve_width {
            return Err(ParameterError::OutOfRange {
                name: "fillet_radius".to_string(),
                value: self.fillet_radius,
                min: 0.0,
                max: self.sleeve_width,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MarkerConfig::default();
        assert_eq!(config.edge_trim, 20.0);
        assert_eq!(config.seam_overlap, 10.0);
        assert_eq!(config.min_remaining_height, 100.0);
        assert_eq!(config.sleeve_width, 15.0);
        assert_eq!(config.fillet_radius, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fillet_must_fit_sleeve() {
        let config = MarkerConfig::default().with_sleeve(10.0, 10.0);
        assert!(matches!(
            config.validate(),
            Err(ParameterError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_negative_overlap_rejected() {
        let config = MarkerConfig::default().with_seam_overlap(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ParameterError::Negative { .. })
        ));
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: MarkerConfig = serde_json::from_str(r#"{"edge_trim": 30.0}"#).unwrap();
        assert_eq!(config.edge_trim, 30.0);
        assert_eq!(config.seam_overlap, 10.0);
    }
}
