//! Template-matching short-horizon tracker.
//!
//! Keeps an intensity patch of the target and searches a window around the
//! previous position for the best sum-of-absolute-differences match.

use ndarray::{Array2, ArrayView2, s};
use thiserror::Error;

use crate::frame::Frame;
use crate::integration::ShortHorizonTracker;
use crate::tracker::detection::TrackUpdate;
use crate::tracker::rect::Rect;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("Tracker used before init")]
    NotInitialized,

    #[error("Bounding box {0:?} has no pixels inside the frame")]
    EmptyRegion([f64; 4]),
}

/// Configuration for the template tracker.
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    /// Pixels searched on each side of the previous position
    pub search_margin: usize,
    /// Distance between candidate positions
    pub stride: usize,
    /// Largest mean absolute intensity difference still counted as a match
    pub max_mean_diff: f32,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            search_margin: 24,
            stride: 2,
            max_mean_diff: 40.0,
        }
    }
}

#[derive(Debug, Clone)]
struct Patch {
    pixels: Array2<f32>,
    x: usize,
    y: usize,
}

/// Sum-of-absolute-differences template tracker.
#[derive(Debug, Clone, Default)]
pub struct TemplateTracker {
    config: TemplateConfig,
    patch: Option<Patch>,
}

impl TemplateTracker {
    pub fn new(config: TemplateConfig) -> Self {
        Self {
            config,
            patch: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.patch.is_some()
    }

    fn region(bbox: Rect, width: usize, height: usize) -> Option<(usize, usize, usize, usize)> {
        let [x1, y1, x2, y2] = bbox.to_tlbr();
        let x1 = x1.max(0.0).min(width as f64) as usize;
        let y1 = y1.max(0.0).min(height as f64) as usize;
        let x2 = x2.max(0.0).min(width as f64) as usize;
        let y2 = y2.max(0.0).min(height as f64) as usize;
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some((x1, y1, x2 - x1, y2 - y1))
    }
}

/// Mean absolute difference, abandoning the sum once it exceeds `limit`.
fn mean_abs_diff(window: ArrayView2<f32>, template: ArrayView2<f32>, limit: f32) -> f32 {
    let count = template.len() as f32;
    let budget = limit * count;
    let mut sum = 0.0;
    for (row_w, row_t) in window.rows().into_iter().zip(template.rows()) {
        sum += row_w
            .iter()
            .zip(row_t.iter())
            .map(|(a, b)| (a - b).abs())
            .sum::<f32>();
        if sum > budget {
            return f32::INFINITY;
        }
    }
    sum / count
}

impl ShortHorizonTracker for TemplateTracker {
    type Error = TemplateError;

    fn init(&mut self, frame: &Frame, bbox: Rect) -> Result<(), Self::Error> {
        let (x, y, w, h) = Self::region(bbox, frame.width(), frame.height())
            .ok_or(TemplateError::EmptyRegion(bbox.to_tlwh()))?;
        let luma = frame.luma();
        self.patch = Some(Patch {
            pixels: luma.slice(s![y..y + h, x..x + w]).to_owned(),
            x,
            y,
        });
        Ok(())
    }

    fn update(&mut self, frame: &Frame) -> Result<TrackUpdate, Self::Error> {
        let patch = self.patch.as_ref().ok_or(TemplateError::NotInitialized)?;
        let (h, w) = patch.pixels.dim();
        let previous = Rect::new(patch.x as f64, patch.y as f64, w as f64, h as f64);

        if w > frame.width() || h > frame.height() {
            return Ok(TrackUpdate::lost(previous));
        }

        let luma = frame.luma();
        let margin = self.config.search_margin;
        let stride = self.config.stride.max(1);
        let max_x = frame.width() - w;
        let max_y = frame.height() - h;
        let (x_lo, x_hi) = (patch.x.saturating_sub(margin), (patch.x + margin).min(max_x));
        let (y_lo, y_hi) = (patch.y.saturating_sub(margin), (patch.y + margin).min(max_y));

        let mut best = (f32::INFINITY, patch.x.min(max_x), patch.y.min(max_y));
        for y in (y_lo..=y_hi).step_by(stride) {
            for x in (x_lo..=x_hi).step_by(stride) {
                let limit = best.0.min(self.config.max_mean_diff);
                let score = mean_abs_diff(
                    luma.slice(s![y..y + h, x..x + w]),
                    patch.pixels.view(),
                    limit,
                );
                if score < best.0 {
                    best = (score, x, y);
                }
            }
        }

        let (score, x, y) = best;
        if score > self.config.max_mean_diff {
            return Ok(TrackUpdate::lost(previous));
        }

        let pixels = luma.slice(s![y..y + h, x..x + w]).to_owned();
        self.patch = Some(Patch { pixels, x, y });
        Ok(TrackUpdate::found(Rect::new(x as f64, y as f64, w as f64, h as f64)))
    }

    fn reset(&mut self) {
        self.patch = None;
    }
}
