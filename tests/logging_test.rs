mod common;

use std::io;
use std::sync::{Arc, Mutex};

use common::{ScriptedSource, ScriptedTracker, blank_frame};
use followbot_rs::{
    Acquisition, AcquisitionConfig, Decision, Detection, Rect, SkipReason, StopReason,
};

/// In-memory writer collecting formatted log lines.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that keeps only `WARN` and above.
fn warnings<R>(f: impl FnOnce() -> R) -> (R, String) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    (result, text)
}

#[test]
fn test_rejections_log_warnings() {
    let config = AcquisitionConfig {
        min_confidence: Some(0.5),
        ..Default::default()
    };
    let too_wide = Detection::from_rect(Rect::new(0.0, 0.0, 400.0, 100.0), 0.9);
    let too_weak = Detection::from_rect(Rect::new(0.0, 0.0, 40.0, 100.0), 0.2);
    let mut acq = Acquisition::new(
        ScriptedSource::new(vec![Some(too_wide), Some(too_weak)]),
        ScriptedTracker::default(),
        config,
        640.0,
    );

    let (decision, log) = warnings(|| acq.step(&blank_frame()).unwrap());
    assert!(matches!(decision, Decision::Stop(StopReason::Oversize { .. })));
    assert!(log.contains("WARN"));
    assert!(log.contains("target too close"));

    let (decision, log) = warnings(|| acq.step(&blank_frame()).unwrap());
    assert!(matches!(
        decision,
        Decision::Stop(StopReason::LowConfidence { .. })
    ));
    assert!(log.contains("target confidence too low"));
}

#[test]
fn test_empty_search_stays_quiet() {
    let mut acq = Acquisition::new(
        ScriptedSource::new(vec![None]),
        ScriptedTracker::default(),
        AcquisitionConfig::default(),
        640.0,
    );

    let (decision, log) = warnings(|| acq.step(&blank_frame()).unwrap());
    assert_eq!(decision, Decision::Stop(StopReason::NoTarget));
    assert!(log.is_empty(), "unexpected output: {log}");
}

#[test]
fn test_tracker_loss_logs_warning() {
    let good = Detection::from_rect(Rect::new(60.0, 100.0, 80.0, 160.0), 0.9);
    let mut acq = Acquisition::new(
        ScriptedSource::new(vec![Some(good)]),
        ScriptedTracker::new(vec![false]),
        AcquisitionConfig::default(),
        640.0,
    );

    let (_, log) = warnings(|| acq.step(&blank_frame()).unwrap());
    assert!(log.is_empty(), "acquisition is not a warning: {log}");

    let (decision, log) = warnings(|| acq.step(&blank_frame()).unwrap());
    assert_eq!(decision, Decision::Skip(SkipReason::TrackerLost));
    assert!(log.contains("WARN"));
    assert!(log.contains("dropping track, searching again"));
}
