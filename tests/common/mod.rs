#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use followbot_rs::error::BoxError;
use followbot_rs::{
    Detection, Frame, FrameSource, Rect, ShortHorizonTracker, ShutdownToken, TargetSource,
    TrackUpdate, Transport,
};

pub fn blank_frame() -> Frame {
    Frame::filled(8, 8, 0)
}

/// Target source replaying a fixed list of detections, then nothing.
pub struct ScriptedSource {
    pub detections: VecDeque<Option<Detection>>,
}

impl ScriptedSource {
    pub fn new(detections: Vec<Option<Detection>>) -> Self {
        Self {
            detections: detections.into(),
        }
    }
}

impl TargetSource for ScriptedSource {
    type Error = Infallible;

    fn detect(&mut self, _frame: &Frame) -> Result<Option<Detection>, Self::Error> {
        Ok(self.detections.pop_front().flatten())
    }
}

/// Tracker replaying a fixed list of success flags, then succeeding.
#[derive(Default)]
pub struct ScriptedTracker {
    pub updates: VecDeque<bool>,
    pub bbox: Rect,
    pub inits: u32,
    pub resets: u32,
}

impl ScriptedTracker {
    pub fn new(updates: Vec<bool>) -> Self {
        Self {
            updates: updates.into(),
            ..Default::default()
        }
    }
}

impl ShortHorizonTracker for ScriptedTracker {
    type Error = Infallible;

    fn init(&mut self, _frame: &Frame, bbox: Rect) -> Result<(), Self::Error> {
        self.bbox = bbox;
        self.inits += 1;
        Ok(())
    }

    fn update(&mut self, _frame: &Frame) -> Result<TrackUpdate, Self::Error> {
        let ok = self.updates.pop_front().unwrap_or(true);
        Ok(TrackUpdate { ok, bbox: self.bbox })
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

/// Frame source that cancels `token` when it hands out its last frame.
pub struct CountedFrames {
    pub remaining: usize,
    pub token: ShutdownToken,
    pub released: Arc<Mutex<u32>>,
}

impl FrameSource for CountedFrames {
    type Error = Infallible;

    fn read(&mut self) -> Result<Frame, Self::Error> {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.token.cancel();
        }
        Ok(blank_frame())
    }

    fn release(&mut self) {
        *self.released.lock().unwrap() += 1;
    }
}

/// Transport recording every message; can be told to fail from a given send on.
#[derive(Clone, Default)]
pub struct Recorder {
    pub sent: Arc<Mutex<Vec<String>>>,
    pub closes: Arc<Mutex<u32>>,
    pub fail_after: Option<usize>,
}

impl Recorder {
    pub fn messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for Recorder {
    fn send_text(&mut self, text: &str) -> Result<(), BoxError> {
        let mut sent = self.sent.lock().unwrap();
        if self.fail_after.is_some_and(|n| sent.len() >= n) {
            return Err("connection reset".into());
        }
        sent.push(text.to_string());
        Ok(())
    }

    fn close(&mut self) -> Result<(), BoxError> {
        *self.closes.lock().unwrap() += 1;
        Ok(())
    }
}
