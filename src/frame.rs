//! Camera frames and the source that produces them.

use ndarray::{Array2, Array3, ArrayView3, Axis, ShapeError};

/// An immutable image sample, stored as `(height, width, channels)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pixels: Array3<u8>,
}

impl Frame {
    pub fn new(pixels: Array3<u8>) -> Self {
        Self { pixels }
    }

    /// Build a frame from interleaved row-major bytes.
    pub fn from_raw(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, ShapeError> {
        Array3::from_shape_vec((height, width, channels), data).map(Self::new)
    }

    /// Single-channel frame filled with one value.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self::new(Array3::from_elem((height, width, 1), value))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.pixels.dim().2
    }

    pub fn pixels(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    /// Intensity image: the mean over channels of every pixel.
    pub fn luma(&self) -> Array2<f32> {
        let channels = self.channels().max(1) as f32;
        self.pixels
            .mapv(f32::from)
            .sum_axis(Axis(2))
            .mapv(|v| v / channels)
    }
}

/// A blocking source of camera frames.
///
/// Stream address, resolution and frame rate are advisory settings enforced
/// by the implementation, not by the follower.
pub trait FrameSource {
    /// Error type for capture failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Block until the next frame is available.
    fn read(&mut self) -> Result<Frame, Self::Error>;

    /// Stop capturing and free the underlying device or stream.
    fn release(&mut self);
}
