//! # Curvemark
//!
//! Cutting-marker generator for fabric panels cut on an automated table:
//! - Curved top edges that compensate for the sag of the support tube
//! - Zipper-sleeve cutouts for 55, 65 and 80 mm tubes
//! - Automatic with-the-grain / cross-grain layout with seam overlap
//! - One DXF file per piece
//!
//! ## Architecture
//!
//! Curvemark is organized as a workspace with multiple crates:
//!
//! 1. **curvemark-core** - Geometry value types, outlines, length units
//! 2. **curvemark-marker** - Circumcircle solver, panel builders, planner, assembly, DXF output
//! 3. **curvemark-settings** - Configuration files and form defaults
//! 4. **curvemark** - Command-line form that integrates all crates

pub mod cli;

pub use curvemark_core::{
    format_length, parse_length, ArcEdge, Bounds, Edge, GeometryError, LengthUnit, LineEdge,
    Outline, Point2D,
};

pub use curvemark_marker::{
    generate_markers, write_pieces, MarkerAssembly, MarkerConfig, MarkerError, MarkerJob,
    MarkerKind, MarkerPiece, MarkerPlan, Orientation, SegmentPlan, TubeProfile,
};

pub use curvemark_settings::{Config, FormDefaults, OutputSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr, keeping stdout for results
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
