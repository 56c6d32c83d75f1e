use std::path::Path;
use std::sync::Arc;

use kurbo::{Affine, BezPath, Point};
use usvg::tiny_skia_path::PathSegment;

use crate::assets::outline::{Outline, outlines_from_bezpath};
use crate::foundation::error::{EpicycleError, EpicycleResult};

/// Load every path outline of an SVG file, in document order, in canvas coordinates.
pub fn load_svg_file(path: &Path) -> EpicycleResult<Vec<Outline>> {
    let bytes = std::fs::read(path).map_err(|e| {
        EpicycleError::parse(format!("failed to read svg '{}': {e}", path.display()))
    })?;
    parse_svg_with_resources(&bytes, path.parent())
}

/// Parse SVG bytes into outlines. Text is converted to glyph outlines with system fonts.
pub fn parse_svg(bytes: &[u8]) -> EpicycleResult<Vec<Outline>> {
    parse_svg_with_resources(bytes, None)
}

#[tracing::instrument(skip(bytes), fields(bytes = bytes.len()))]
fn parse_svg_with_resources(
    bytes: &[u8],
    resources_dir: Option<&Path>,
) -> EpicycleResult<Vec<Outline>> {
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    let opts = usvg::Options {
        resources_dir: resources_dir.map(Path::to_path_buf),
        fontdb: Arc::new(fontdb),
        ..Default::default()
    };

    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| EpicycleError::parse(format!("parse svg tree: {e}")))?;

    let mut out = Vec::new();
    collect_group(tree.root(), &mut out);
    tracing::debug!(outlines = out.len(), "collected svg outlines");
    Ok(out)
}

fn collect_group(group: &usvg::Group, out: &mut Vec<Outline>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(g) => collect_group(g.as_ref(), out),
            usvg::Node::Path(p) => {
                let path = to_bezpath(p.data(), p.abs_transform());
                out.extend(outlines_from_bezpath(&path));
            }
            usvg::Node::Text(t) => collect_group(t.flattened(), out),
            usvg::Node::Image(_) => {}
        }
    }
}

fn to_bezpath(data: &usvg::tiny_skia_path::Path, ts: usvg::Transform) -> BezPath {
    let affine = Affine::new([
        f64::from(ts.sx),
        f64::from(ts.ky),
        f64::from(ts.kx),
        f64::from(ts.sy),
        f64::from(ts.tx),
        f64::from(ts.ty),
    ]);
    let pt = |p: usvg::tiny_skia_path::Point| affine * Point::new(f64::from(p.x), f64::from(p.y));

    let mut out = BezPath::new();
    for seg in data.segments() {
        match seg {
            PathSegment::MoveTo(p) => out.move_to(pt(p)),
            PathSegment::LineTo(p) => out.line_to(pt(p)),
            PathSegment::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathSegment::CubicTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathSegment::Close => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg.rs"]
mod tests;
