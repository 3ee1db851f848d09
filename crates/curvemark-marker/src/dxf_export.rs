//! DXF output for marker outlines.
//!
//! One LINE entity per line edge and one ARC entity per arc edge. Arcs are
//! written counter-clockwise from start to end angle regardless of the
//! direction the outline walks them.

use crate::error::{MarkerError, MarkerResult};
use crate::job::MarkerPiece;
use curvemark_core::{Edge, Outline, Point2D};
use dxf::entities::{Arc as DxfArc, Entity, EntityType, Line as DxfLine};
use dxf::enums::{AcadVersion, Units};
use dxf::Drawing;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Layer every marker entity is placed on.
pub const MARKER_LAYER: &str = "MARKER";

fn dxf_point(p: Point2D) -> dxf::Point {
    dxf::Point::new(p.x, p.y, 0.0)
}

/// Builds an in-memory drawing for `outline`.
pub fn outline_to_drawing(outline: &Outline) -> Drawing {
    let mut drawing = Drawing::new();
    drawing.header.version = AcadVersion::R2010;
    drawing.header.default_drawing_units = Units::Millimeters;

    for edge in outline.edges() {
        let specific = match edge {
            Edge::Line(line) => EntityType::Line(DxfLine::new(
                dxf_point(line.start),
                dxf_point(line.end),
            )),
            Edge::Arc(arc) => EntityType::Arc(DxfArc::new(
                dxf_point(arc.center),
                arc.radius,
                arc.start_angle,
                arc.end_angle,
            )),
        };
        let mut entity = Entity::new(specific);
        entity.common.layer = MARKER_LAYER.to_string();
        drawing.add_entity(entity);
    }

    drawing
}

/// Encodes `outline` as DXF text.
pub fn outline_to_dxf_bytes(outline: &Outline) -> MarkerResult<Vec<u8>> {
    let drawing = outline_to_drawing(outline);
    let mut buffer = Vec::new();
    drawing
        .save(&mut buffer)
        .map_err(|e| MarkerError::Export(e.to_string()))?;
    Ok(buffer)
}

/// Writes `{stem}{suffix}.dxf` into `dir` for every piece.
///
/// All pieces are encoded before the first file is written.
pub fn write_pieces(
    dir: impl AsRef<Path>,
    stem: &str,
    pieces: &[MarkerPiece],
) -> MarkerResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let encoded = pieces
        .iter()
        .map(|piece| -> MarkerResult<(PathBuf, Vec<u8>)> {
            let bytes = outline_to_dxf_bytes(piece.outline())?;
            Ok((dir.join(piece.file_name(stem)), bytes))
        })
        .collect::<MarkerResult<Vec<_>>>()?;

    fs::create_dir_all(dir)?;

    let mut paths = Vec::with_capacity(encoded.len());
    for (path, bytes) in encoded {
        fs::write(&path, &bytes)?;
        debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
        paths.push(path);
    }

    info!("Wrote {} marker file(s) to {}", paths.len(), dir.display());
    Ok(paths)
}
