//! Outline sources: SVG documents and raw path data, reduced to cubic segments.

/// Outline type and path-data conversion.
pub mod outline;
/// SVG document loading through `usvg`.
pub mod svg;
