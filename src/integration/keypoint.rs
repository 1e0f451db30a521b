//! Body keypoint target strategy.
//!
//! Decodes the heatmap/offset output of a single-pose network (PoseNet style)
//! into one target: the mean keypoint position and the keypoint extent.

use ndarray::{Array3, ArrayView3};
use thiserror::Error;

use crate::config::FrameConfig;
use crate::error::BoxError;
use crate::frame::Frame;
use crate::tracker::Detection;

use super::{DetectionBuilder, POINT_PADDING, TargetSource};

#[derive(Error, Debug)]
pub enum KeypointError {
    #[error("Model inference failed: {0}")]
    Model(#[source] BoxError),

    #[error("Invalid model output: {0}")]
    Shape(String),
}

/// Raw output of a keypoint network.
#[derive(Debug, Clone)]
pub struct KeypointOutput {
    /// Per-cell keypoint logits, shape `(rows, cols, K)`
    pub heatmaps: Array3<f32>,
    /// Per-cell pixel offsets, shape `(rows, cols, 2K)`: y offsets first, then x
    pub offsets: Array3<f32>,
}

/// Trait for keypoint networks (e.g. a TFLite PoseNet).
pub trait KeypointModel {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Input size the network expects, as `(height, width)`.
    fn input_size(&self) -> (usize, usize);

    /// Run inference on a normalized `(height, width, channels)` image.
    fn infer(&mut self, input: ArrayView3<f32>) -> Result<KeypointOutput, Self::Error>;
}

/// Nearest-neighbour resize to `(height, width)` with values mapped to `[-1, 1]`.
///
/// Fails with [`KeypointError::Shape`] when the frame or the target size has
/// no pixels.
pub fn preprocess(
    frame: &Frame,
    (height, width): (usize, usize),
) -> Result<Array3<f32>, KeypointError> {
    let pixels = frame.pixels();
    let (src_h, src_w, channels) = pixels.dim();
    if src_h == 0 || src_w == 0 || channels == 0 {
        return Err(KeypointError::Shape(format!(
            "empty frame {:?}",
            pixels.dim()
        )));
    }
    if height == 0 || width == 0 {
        return Err(KeypointError::Shape(format!(
            "empty input size {:?}",
            (height, width)
        )));
    }

    Ok(Array3::from_shape_fn((height, width, channels), |(r, c, ch)| {
        let sr = r * src_h / height;
        let sc = c * src_w / width;
        (f32::from(pixels[[sr, sc, ch]]) - 127.5) / 127.5
    }))
}

#[inline]
fn sigmoid(x: f32) -> f64 {
    1.0 / (1.0 + (-f64::from(x)).exp())
}

/// Decode network output into keypoint positions in frame pixels and their
/// mean confidence.
pub fn decode(
    output: &KeypointOutput,
    frame_width: f64,
    frame_height: f64,
) -> Result<(Vec<(f64, f64)>, f64), KeypointError> {
    let (rows, cols, count) = output.heatmaps.dim();
    if rows < 2 || cols < 2 || count == 0 {
        return Err(KeypointError::Shape(format!(
            "heatmap shape {:?}",
            output.heatmaps.dim()
        )));
    }
    if output.offsets.dim() != (rows, cols, 2 * count) {
        return Err(KeypointError::Shape(format!(
            "offset shape {:?}, expected {:?}",
            output.offsets.dim(),
            (rows, cols, 2 * count)
        )));
    }

    let mut positions = Vec::with_capacity(count);
    let mut confidence = 0.0;
    for k in 0..count {
        let (mut best_row, mut best_col) = (0, 0);
        let mut best = output.heatmaps[[0, 0, k]];
        for row in 0..rows {
            for col in 0..cols {
                let score = output.heatmaps[[row, col, k]];
                if score > best {
                    best = score;
                    best_row = row;
                    best_col = col;
                }
            }
        }

        let offset_y = f64::from(output.offsets[[best_row, best_col, k]]);
        let offset_x = f64::from(output.offsets[[best_row, best_col, k + count]]);
        let x = (best_col as f64 / (cols - 1) as f64 * frame_width + offset_x).trunc();
        let y = (best_row as f64 / (rows - 1) as f64 * frame_height + offset_y).trunc();

        positions.push((x, y));
        confidence += sigmoid(best);
    }

    Ok((positions, confidence / count as f64))
}

/// Follows the body described by a keypoint network.
///
/// Always yields a detection when the network runs; its confidence is the mean
/// keypoint score, so low-quality poses are filtered by the acquisition
/// threshold rather than here.
///
/// Keypoints are scaled to the configured capture size, not to the size of
/// the frame that was handed in.
pub struct KeypointTargetSource<M: KeypointModel> {
    model: M,
    frame_width: f64,
    frame_height: f64,
}

impl<M: KeypointModel> KeypointTargetSource<M> {
    pub fn new(model: M, frame_width: f64, frame_height: f64) -> Self {
        Self {
            model,
            frame_width,
            frame_height,
        }
    }

    /// Scale keypoints to the capture size in `config`.
    pub fn from_config(model: M, config: &FrameConfig) -> Self {
        Self::new(model, f64::from(config.width), f64::from(config.height))
    }

    /// Capture size keypoints are scaled to, as `(width, height)`.
    pub fn frame_size(&self) -> (f64, f64) {
        (self.frame_width, self.frame_height)
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<M: KeypointModel> TargetSource for KeypointTargetSource<M> {
    type Error = KeypointError;

    fn detect(&mut self, frame: &Frame) -> Result<Option<Detection>, Self::Error> {
        let input = preprocess(frame, self.model.input_size())?;
        let output = self
            .model
            .infer(input.view())
            .map_err(|e| KeypointError::Model(Box::new(e)))?;
        let (positions, confidence) = decode(&output, self.frame_width, self.frame_height)?;

        Ok(Some(
            DetectionBuilder::new()
                .points(&positions, POINT_PADDING)
                .confidence(confidence)
                .build(),
        ))
    }
}
