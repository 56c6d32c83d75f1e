/// Frame buffer type and backend trait.
pub mod backend;
/// CPU rasterizer powered by `vello_cpu`.
pub mod cpu;
/// Pixel-space geometry for one epicycle frame.
pub mod scene;
/// Colors, stroke widths and canvas size.
pub mod style;

pub use backend::{FrameRGBA, RenderBackend};
pub use cpu::CpuBackend;
pub use scene::{FrameScene, ViewTransform};
pub use style::RenderStyle;
