//! The detection-and-dispatch state machine
//!
//! One background task owns all capture, matching and clicking. The
//! foreground only flips [`ControlFlags`], which the loop re-reads on every
//! poll, so enabling or disabling takes effect on the very next tick and
//! shutdown latency is bounded by one poll interval rather than one scan
//! interval.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{Duration, Instant, sleep};

use super::resolve::resolve_click;
use super::types::{ControlFlags, LoopEvent, LoopState};
use crate::capture::FrameSource;
use crate::catalog::Template;
use crate::config::RunConfig;
use crate::input::InputInjector;
use crate::matching;

/// How often the loop wakes to re-check flags and the interval timer.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct DetectionLoop<S, I> {
    state: LoopState,
    config: RunConfig,
    flags: Arc<ControlFlags>,
    templates: Vec<Template>,
    frames: S,
    injector: I,
    event_tx: mpsc::Sender<LoopEvent>,
    last_pass: Option<Instant>,
}

impl<S: FrameSource, I: InputInjector> DetectionLoop<S, I> {
    pub fn new(
        config: RunConfig,
        flags: Arc<ControlFlags>,
        templates: Vec<Template>,
        frames: S,
        injector: I,
        event_tx: mpsc::Sender<LoopEvent>,
    ) -> Self {
        let state = if flags.is_enabled() {
            LoopState::Sleeping
        } else {
            LoopState::Idle
        };
        Self {
            state,
            config,
            flags,
            templates,
            frames,
            injector,
            event_tx,
            last_pass: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Run until the shutdown flag is observed.
    ///
    /// The first pass after enabling fires immediately; subsequent passes wait
    /// one full interval. A pass in progress always runs to completion,
    /// cancellation only prevents the next one from starting.
    pub async fn run(&mut self) {
        log::info!(
            "🔁 Detection loop started ({} template(s), every {}s, threshold {}%)",
            self.templates.len(),
            self.config.scan_interval_secs,
            self.config.match_threshold_percent
        );

        loop {
            if self.flags.is_shutdown() {
                self.change_state(LoopState::Terminating).await;
                break;
            }

            match self.state {
                LoopState::Idle => {
                    if self.flags.is_enabled() {
                        self.change_state(LoopState::Sleeping).await;
                    } else {
                        sleep(POLL_INTERVAL).await;
                    }
                }
                LoopState::Sleeping => {
                    if !self.flags.is_enabled() {
                        self.change_state(LoopState::Idle).await;
                    } else if self.pass_due() {
                        self.change_state(LoopState::Scanning).await;
                    } else {
                        sleep(POLL_INTERVAL).await;
                    }
                }
                LoopState::Scanning => {
                    self.run_scan_pass().await;
                    self.last_pass = Some(Instant::now());
                    self.change_state(LoopState::Sleeping).await;
                }
                LoopState::Terminating => break,
            }
        }

        log::info!("🛑 Detection loop stopped");
    }

    /// Run exactly one scan pass, regardless of the enabled flag.
    pub async fn run_once(&mut self) {
        self.run_scan_pass().await;
    }

    fn pass_due(&self) -> bool {
        let interval = Duration::from_secs(self.config.scan_interval_secs);
        self.last_pass.is_none_or(|at| at.elapsed() >= interval)
    }

    /// One full pass: every template (catalog order) against every display
    /// (enumeration order). No early exit: later templates are still
    /// evaluated in the same cycle after a click. Errors are contained at the
    /// smallest unit (one display, one template) and never end the loop.
    async fn run_scan_pass(&mut self) {
        let displays = match self.frames.displays() {
            Ok(displays) => displays,
            Err(e) => {
                log::warn!("⚠️ {e}");
                let _ = self.event_tx.send(LoopEvent::Error(e.to_string())).await;
                return;
            }
        };

        let mut clicks = 0;
        for template in &self.templates {
            for display in &displays {
                let frame = match self.frames.capture(display) {
                    Ok(frame) => frame,
                    Err(e) => {
                        log::warn!("⚠️ {e}");
                        let _ = self.event_tx.send(LoopEvent::Error(e.to_string())).await;
                        continue;
                    }
                };

                let Some(found) = matching::best_match(&frame.gray, &template.gray) else {
                    continue;
                };
                let confidence_percent = found.score * 100.0;
                if confidence_percent < self.config.match_threshold_percent as f32 {
                    continue;
                }

                let target = resolve_click(&frame.bounds, found.x, found.y, template);
                if let Err(e) = self.injector.click(target.x, target.y, target.kind) {
                    log::warn!("⚠️ Click injection failed for {}: {e}", template.file_name);
                }
                clicks += 1;

                if self.config.debug_logging {
                    log::debug!(
                        "Clicked at ({}, {}) for image {}",
                        target.x,
                        target.y,
                        template.file_name
                    );
                    log::debug!(
                        "Detected image '{}' at ({}, {}) with confidence {confidence_percent:.2}%",
                        template.file_name,
                        target.x,
                        target.y
                    );
                }
                let _ = self
                    .event_tx
                    .send(LoopEvent::ClickPerformed {
                        template: template.file_name.clone(),
                        x: target.x,
                        y: target.y,
                        confidence_percent,
                        kind: target.kind,
                    })
                    .await;
                // frame dropped here, before the next (template, display) pair
            }
        }

        let _ = self
            .event_tx
            .send(LoopEvent::PassCompleted {
                templates: self.templates.len(),
                displays: displays.len(),
                clicks,
            })
            .await;
    }

    async fn change_state(&mut self, new_state: LoopState) {
        if self.state != new_state {
            log::debug!("🔁 Detection state: {:?} -> {:?}", self.state, new_state);
            self.state = new_state;
            let _ = self.event_tx.send(LoopEvent::StateChanged(new_state)).await;
        }
    }
}
