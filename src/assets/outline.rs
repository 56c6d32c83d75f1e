use kurbo::{BezPath, CubicBez, PathEl, PathSeg, Point, QuadBez};

use crate::foundation::error::{EpicycleError, EpicycleResult};

/// One path definition: an ordered list of cubic segments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outline {
    segments: Vec<CubicBez>,
}

impl Outline {
    /// Wrap already-ordered segments.
    pub fn from_segments(segments: Vec<CubicBez>) -> Self {
        Self { segments }
    }

    /// Segments in traversal order.
    pub fn segments(&self) -> &[CubicBez] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Return `true` for an outline without segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Straight line as a cubic whose parameter advances at constant speed.
pub fn line_to_cubic(p0: Point, p1: Point) -> CubicBez {
    CubicBez::new(p0, p0.lerp(p1, 1.0 / 3.0), p0.lerp(p1, 2.0 / 3.0), p1)
}

/// Any kurbo segment as a cubic.
pub fn seg_to_cubic(seg: PathSeg) -> CubicBez {
    match seg {
        PathSeg::Line(l) => line_to_cubic(l.p0, l.p1),
        PathSeg::Quad(q) => q.raise(),
        PathSeg::Cubic(c) => c,
    }
}

/// Split a path into one [`Outline`] per subpath.
///
/// `ClosePath` contributes the closing line when the pen is away from the subpath start.
/// Subpaths without drawing segments are dropped.
pub fn outlines_from_bezpath(path: &BezPath) -> Vec<Outline> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    let mut start = Point::ZERO;
    let mut last = Point::ZERO;

    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => {
                flush(&mut out, &mut current);
                start = p;
                last = p;
            }
            PathEl::LineTo(p) => {
                current.push(line_to_cubic(last, p));
                last = p;
            }
            PathEl::QuadTo(p1, p2) => {
                current.push(QuadBez::new(last, p1, p2).raise());
                last = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                current.push(CubicBez::new(last, p1, p2, p3));
                last = p3;
            }
            PathEl::ClosePath => {
                if last != start {
                    current.push(line_to_cubic(last, start));
                }
                last = start;
            }
        }
    }
    flush(&mut out, &mut current);
    out
}

fn flush(out: &mut Vec<Outline>, current: &mut Vec<CubicBez>) {
    if !current.is_empty() {
        out.push(Outline::from_segments(std::mem::take(current)));
    }
}

/// Parse SVG path data (`d` attribute syntax) into outlines.
pub fn parse_path_data(d: &str) -> EpicycleResult<Vec<Outline>> {
    let path = BezPath::from_svg(d.trim())
        .map_err(|e| EpicycleError::parse(format!("invalid path data: {e}")))?;
    Ok(outlines_from_bezpath(&path))
}

/// Concatenate outlines in document order into one segment list.
pub fn concat_segments(outlines: &[Outline]) -> Vec<CubicBez> {
    outlines
        .iter()
        .flat_map(|o| o.segments().iter().copied())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/outline.rs"]
mod tests;
