use crate::foundation::error::EpicycleResult;
use crate::render::scene::FrameScene;

/// A rendered frame as RGBA8 pixels.
///
/// Frames produced by [`crate::render::CpuBackend`] are premultiplied alpha; the flag makes
/// that explicit for sinks.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 value of the pixel at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// A rasterizer that turns one [`FrameScene`] into a [`FrameRGBA`].
pub trait RenderBackend {
    /// Draw `scene` and read back the finished frame.
    fn render_scene(&mut self, scene: &FrameScene) -> EpicycleResult<FrameRGBA>;
}
