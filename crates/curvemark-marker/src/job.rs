//! Type definitions for marker requests and results

use crate::error::{ParameterError, ParameterResult};
use curvemark_core::Outline;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Support tube a zipper-sleeve marker wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TubeProfile {
    Tube55,
    Tube65,
    Tube80,
}

impl TubeProfile {
    /// Nominal tube diameter in mm
    pub fn diameter(self) -> f64 {
        match self {
            TubeProfile::Tube55 => 55.0,
            TubeProfile::Tube65 => 65.0,
            TubeProfile::Tube80 => 80.0,
        }
    }

    /// Fabric length needed for one wrap around the tube
    pub fn wrap_length(self) -> f64 {
        PI * self.diameter()
    }
}

/// Shape family of the marker.
///
/// Serialized by name (`plain`, `tube55`, `tube65`, `tube80`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MarkerKind {
    /// Rectangle, curved on top when a deflection is given
    #[default]
    Plain,
    /// Rectangle with a sleeve cutout on top for the first tube wrap
    Zipper(TubeProfile),
}

impl MarkerKind {
    pub fn wrap_length(self) -> Option<f64> {
        match self {
            MarkerKind::Plain => None,
            MarkerKind::Zipper(tube) => Some(tube.wrap_length()),
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerKind::Plain => write!(f, "plain"),
            MarkerKind::Zipper(TubeProfile::Tube55) => write!(f, "tube55"),
            MarkerKind::Zipper(TubeProfile::Tube65) => write!(f, "tube65"),
            MarkerKind::Zipper(TubeProfile::Tube80) => write!(f, "tube80"),
        }
    }
}

impl FromStr for MarkerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" | "none" => Ok(MarkerKind::Plain),
            "tube55" | "zipper55" => Ok(MarkerKind::Zipper(TubeProfile::Tube55)),
            "tube65" | "zipper65" => Ok(MarkerKind::Zipper(TubeProfile::Tube65)),
            "tube80" | "zipper80" => Ok(MarkerKind::Zipper(TubeProfile::Tube80)),
            _ => Err(format!("Unknown marker kind: {}", s)),
        }
    }
}

impl TryFrom<String> for MarkerKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MarkerKind> for String {
    fn from(kind: MarkerKind) -> Self {
        kind.to_string()
    }
}

/// One marker request. All lengths are millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerJob {
    /// Finished fabric width
    pub width: f64,
    /// Finished fabric height
    pub height: f64,
    /// Sag of the support tube; 0 keeps the top straight
    pub deflection: f64,
    /// Width of the source roll
    pub roll_width: f64,
    pub kind: MarkerKind,
    /// Cut across the grain even when the panel fits the roll
    pub force_cross_grain: bool,
}

impl MarkerJob {
    pub fn new(width: f64, height: f64, roll_width: f64) -> Self {
        Self {
            width,
            height,
            deflection: 0.0,
            roll_width,
            kind: MarkerKind::Plain,
            force_cross_grain: false,
        }
    }

    pub fn with_deflection(mut self, deflection: f64) -> Self {
        self.deflection = deflection;
        self
    }

    pub fn with_kind(mut self, kind: MarkerKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_force_cross_grain(mut self, force: bool) -> Self {
        self.force_cross_grain = force;
        self
    }

    pub fn validate(&self) -> ParameterResult<()> {
        ParameterError::check_positive("width", self.width)?;
        ParameterError::check_positive("height", self.height)?;
        ParameterError::check_positive("roll_width", self.roll_width)?;
        ParameterError::check_non_negative("deflection", self.deflection)?;
        Ok(())
    }
}

/// One output piece: file name suffix plus outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPiece {
    suffix: String,
    outline: Outline,
}

impl MarkerPiece {
    pub fn new(suffix: impl Into<String>, outline: Outline) -> Self {
        Self {
            suffix: suffix.into(),
            outline,
        }
    }

    /// Empty for single-piece jobs, `_01`, `_02`, ... otherwise
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn into_outline(self) -> Outline {
        self.outline
    }

    /// `{stem}{suffix}.dxf`
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}{}.dxf", stem, self.suffix)
    }
}
