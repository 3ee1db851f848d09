//! Orientation and segmentation planning.
//!
//! Decides whether a marker fits across the roll in one piece (with the
//! grain) or must be split into overlapping segments stacked along the
//! fabric height (cross grain), and sizes every segment.

use crate::config::MarkerConfig;
use crate::error::{MarkerError, MarkerResult, ParameterError};
use crate::job::MarkerJob;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Upper bound on the number of cross-grain segments; suffixes are two digits.
pub const MAX_SEGMENTS: usize = 99;

/// How the marker is laid on the roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// One piece, fabric width across the roll
    WithGrain,
    /// Several pieces stacked along the fabric height
    CrossGrain,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::WithGrain => write!(f, "with-grain"),
            Orientation::CrossGrain => write!(f, "cross-grain"),
        }
    }
}

/// One planned piece, top to bottom of the fabric run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentPlan {
    /// 1-based position
    pub index: usize,
    pub height: f64,
    pub deflection: f64,
    pub has_zipper_cutout: bool,
}

impl SegmentPlan {
    pub fn has_curve(&self) -> bool {
        self.deflection > 0.0
    }
}

/// Result of planning one job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPlan {
    pub orientation: Orientation,
    /// Roll width minus edge trim
    pub usable_width: f64,
    pub segments: Vec<SegmentPlan>,
}

impl MarkerPlan {
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Sum of all segment heights, overlaps and padding included.
    pub fn total_height(&self) -> f64 {
        self.segments.iter().map(|s| s.height).sum()
    }
}

/// Plans orientation and segments for marker jobs.
#[derive(Debug, Clone, Copy)]
pub struct SegmentationPlanner {
    edge_trim: f64,
    seam_overlap: f64,
    min_remaining_height: f64,
}

impl SegmentationPlanner {
    pub fn new(config: &MarkerConfig) -> Self {
        Self {
            edge_trim: config.edge_trim,
            seam_overlap: config.seam_overlap,
            min_remaining_height: config.min_remaining_height,
        }
    }

    pub fn plan(&self, job: &MarkerJob) -> MarkerResult<MarkerPlan> {
        let usable_width = job.roll_width - self.edge_trim;
        if usable_width <= 0.0 {
            return Err(MarkerError::UnreachableSegmentation {
                roll_width: job.roll_width,
                edge_trim: self.edge_trim,
            });
        }

        let zipper = job.kind.wrap_length().is_some();

        if job.width <= usable_width && !job.force_cross_grain {
            info!(
                "Marker {}x{} mm fits usable width {} mm: cutting with the grain",
                job.width, job.height, usable_width
            );
            return Ok(MarkerPlan {
                orientation: Orientation::WithGrain,
                usable_width,
                segments: vec![SegmentPlan {
                    index: 1,
                    height: job.height,
                    deflection: job.deflection,
                    has_zipper_cutout: zipper,
                }],
            });
        }

        let count = (job.height / usable_width).ceil();
        if count > MAX_SEGMENTS as f64 {
            return Err(ParameterError::OutOfRange {
                name: "segment_count".to_string(),
                value: count,
                min: 1.0,
                max: MAX_SEGMENTS as f64,
            }
            .into());
        }
        let count = (count as usize).max(1);
        let joints = (count - 1) as f64;

        let mut segments: Vec<SegmentPlan> = (1..count)
            .map(|index| SegmentPlan {
                index,
                height: usable_width,
                deflection: 0.0,
                has_zipper_cutout: false,
            })
            .collect();

        let mut remaining = job.height - joints * usable_width + joints * self.seam_overlap;
        if remaining - job.deflection < self.min_remaining_height {
            let padded = self.min_remaining_height + job.deflection;
            warn!(
                "Last segment of {:.1} mm is below the {} mm minimum: padding to {:.1} mm",
                remaining - job.deflection,
                self.min_remaining_height,
                padded
            );
            remaining = padded;
        }

        segments.push(SegmentPlan {
            index: count,
            height: remaining,
            deflection: job.deflection,
            has_zipper_cutout: zipper,
        });

        info!(
            "Marker {}x{} mm exceeds usable width {} mm: {} cross-grain segments",
            job.width, job.height, usable_width, count
        );
        for segment in &segments {
            debug!(
                "Segment {}: height {:.1} mm, deflection {} mm, zipper {}",
                segment.index, segment.height, segment.deflection, segment.has_zipper_cutout
            );
        }

        Ok(MarkerPlan {
            orientation: Orientation::CrossGrain,
            usable_width,
            segments,
        })
    }
}
