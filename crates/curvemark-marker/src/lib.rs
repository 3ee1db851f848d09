//! # Curvemark Marker Engine
//!
//! Generates the cutting outlines ("markers") for fabric panels.
//!
//! ## Components
//!
//! - **Circumcircle**: circle through three points, used for sagging top edges
//! - **Panel**: plain, curved-top, and zipper-sleeve outline builders
//! - **Planner**: with-the-grain / cross-grain decision and segment sizing
//! - **Grain**: quarter-turn reframing of with-the-grain panels
//! - **Assembly**: runs a job end to end and names the resulting pieces
//! - **DXF Export**: LINE/ARC encoding of finished outlines
//!
//! All engine values are millimetres. Unit conversion happens before a
//! [`MarkerJob`] is built.

pub mod assembly;
pub mod circumcircle;
pub mod config;
pub mod dxf_export;
pub mod error;
pub mod grain;
pub mod job;
pub mod panel;
pub mod planner;

pub use assembly::{generate_markers, MarkerAssembly};
pub use circumcircle::{circle_from_three_points, is_between, Circumcircle};
pub use config::MarkerConfig;
pub use dxf_export::{outline_to_drawing, outline_to_dxf_bytes, write_pieces};
pub use error::{MarkerError, MarkerResult, ParameterError, ParameterResult};
pub use grain::{rotate_to_grain, with_grain_transform};
pub use job::{MarkerJob, MarkerKind, MarkerPiece, TubeProfile};
pub use panel::{PanelBuilder, PanelShape, PanelSpec};
pub use planner::{MarkerPlan, Orientation, SegmentPlan, SegmentationPlanner};
