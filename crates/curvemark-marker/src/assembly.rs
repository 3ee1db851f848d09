//! Marker assembly: planning, building, and naming every piece of a job.

use crate::config::MarkerConfig;
use crate::error::MarkerResult;
use crate::grain::rotate_to_grain;
use crate::job::{MarkerJob, MarkerPiece};
use crate::panel::{PanelBuilder, PanelSpec};
use crate::planner::{MarkerPlan, Orientation, SegmentPlan, SegmentationPlanner};
use curvemark_core::GEOMETRY_EPSILON;
use tracing::info;

/// Turns marker jobs into ordered, named outlines.
#[derive(Debug, Clone, Copy)]
pub struct MarkerAssembly {
    planner: SegmentationPlanner,
    builder: PanelBuilder,
}

impl MarkerAssembly {
    /// Creates an assembly after validating `config`.
    pub fn new(config: &MarkerConfig) -> MarkerResult<Self> {
        config.validate()?;
        Ok(Self {
            planner: SegmentationPlanner::new(config),
            builder: PanelBuilder::new(config),
        })
    }

    /// Validates `job` and plans its segments without building geometry.
    pub fn plan(&self, job: &MarkerJob) -> MarkerResult<MarkerPlan> {
        job.validate()?;
        self.planner.plan(job)
    }

    /// Builds every piece of `job`, top to bottom of the fabric run.
    ///
    /// Either all pieces are returned or none: every segment is validated
    /// before the first outline is built.
    pub fn assemble(&self, job: &MarkerJob) -> MarkerResult<Vec<MarkerPiece>> {
        let plan = self.plan(job)?;

        let specs: Vec<PanelSpec> = plan
            .segments
            .iter()
            .map(|segment| segment_spec(job, segment))
            .collect();
        for spec in &specs {
            self.builder.validate(spec)?;
        }

        let count = specs.len();
        let mut pieces = Vec::with_capacity(count);
        for (i, spec) in specs.iter().enumerate() {
            let mut outline = self.builder.build(spec)?;
            outline.validate_closed(GEOMETRY_EPSILON)?;

            if plan.orientation == Orientation::WithGrain {
                outline = rotate_to_grain(&outline, spec.width);
            }

            pieces.push(MarkerPiece::new(piece_suffix(i + 1, count), outline));
        }

        info!(
            "Assembled {} {} piece(s) for {}x{} mm marker ({})",
            pieces.len(),
            plan.orientation,
            job.width,
            job.height,
            job.kind
        );

        Ok(pieces)
    }
}

/// Plans and builds `job` with `config` in one call.
pub fn generate_markers(job: &MarkerJob, config: &MarkerConfig) -> MarkerResult<Vec<MarkerPiece>> {
    MarkerAssembly::new(config)?.assemble(job)
}

fn segment_spec(job: &MarkerJob, segment: &SegmentPlan) -> PanelSpec {
    match job.kind.wrap_length() {
        Some(wrap_length) if segment.has_zipper_cutout => {
            PanelSpec::zipper_sleeve(job.width, segment.height, segment.deflection, wrap_length)
        }
        _ => PanelSpec::rectangle(job.width, segment.height, segment.deflection),
    }
}

/// Empty for a single piece, otherwise `_NN` with a 1-based index.
fn piece_suffix(index: usize, count: usize) -> String {
    if count == 1 {
        String::new()
    } else {
        format!("_{:02}", index)
    }
}
