// Types shared between the detection loop and its foreground controller
use std::sync::atomic::{AtomicBool, Ordering};

use crate::catalog::ClickKind;

/// Detection loop states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Disabled, waiting to be switched on
    Idle,
    /// Enabled, waiting for the next interval tick
    Sleeping,
    /// One full pass over displays x templates
    Scanning,
    /// Shutdown observed, loop is winding down
    Terminating,
}

/// The only state shared across the worker/foreground boundary.
///
/// Both flags are plain atomics read with up-to-date visibility; toggles take
/// effect on the next poll of the loop, never retroactively.
#[derive(Debug)]
pub struct ControlFlags {
    enabled: AtomicBool,
    shutdown: AtomicBool,
}

impl ControlFlags {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            shutdown: AtomicBool::new(false),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

/// Observability events emitted by the detection loop.
#[derive(Debug, Clone)]
pub enum LoopEvent {
    StateChanged(LoopState),
    ClickPerformed {
        template: String,
        x: i32,
        y: i32,
        confidence_percent: f32,
        kind: ClickKind,
    },
    PassCompleted {
        templates: usize,
        displays: usize,
        clicks: usize,
    },
    Error(String),
}
