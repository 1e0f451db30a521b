//! Termination handling: a cancellation token fed by OS signals and a one-shot
//! guard for the shutdown sequence.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

/// Cloneable cancellation flag checked by the control loop before every frame.
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken {
    cancelled: Arc<AtomicBool>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request termination. Returns true only for the first request.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Flag that can be taken exactly once.
#[derive(Debug, Default)]
pub struct OneShot {
    fired: AtomicBool,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time it is called, false afterwards.
    pub fn fire(&self) -> bool {
        !self.fired.swap(true, Ordering::SeqCst)
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

/// Cancel `token` on SIGINT or SIGTERM.
///
/// Only one handler can be installed per process.
pub fn install_signal_handler(token: ShutdownToken) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        if token.cancel() {
            info!("termination requested");
        } else {
            warn!("termination already in progress");
        }
    })
}
