//! Multi-monitor screen capture
//!
//! Monitors are enumerated fresh on every call because the layout can change
//! between scan passes. Frames are owned by the loop iteration that captured
//! them and dropped before the next pair is processed; nothing is pooled.

use image::{DynamicImage, GrayImage};
use thiserror::Error;
use xcap::Monitor;

/// Position and size of one display in global desktop coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBounds {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// One captured snapshot of a single display, already grayscale for matching.
pub struct Frame {
    pub bounds: DisplayBounds,
    pub gray: GrayImage,
}

/// The error type for screen capture operations.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to enumerate displays: {source}")]
    EnumerateDisplays { source: xcap::XCapError },

    #[error("Failed to capture display {id}: {source}")]
    CaptureFailed { id: u32, source: xcap::XCapError },

    #[error("Display {id} disappeared before capture")]
    DisplayGone { id: u32 },
}

/// Where the detection loop gets its frames from.
///
/// The production implementation talks to the OS; tests drive the loop with
/// synthetic frames through the same trait.
pub trait FrameSource {
    fn displays(&self) -> Result<Vec<DisplayBounds>, CaptureError>;
    fn capture(&self, display: &DisplayBounds) -> Result<Frame, CaptureError>;
}

/// xcap-backed capturer for the real desktop.
#[derive(Debug, Default)]
pub struct ScreenCapturer;

impl ScreenCapturer {
    pub fn new() -> Self {
        Self
    }
}

impl FrameSource for ScreenCapturer {
    fn displays(&self) -> Result<Vec<DisplayBounds>, CaptureError> {
        let monitors =
            Monitor::all().map_err(|source| CaptureError::EnumerateDisplays { source })?;
        Ok(monitors.iter().map(bounds_of).collect())
    }

    fn capture(&self, display: &DisplayBounds) -> Result<Frame, CaptureError> {
        let monitors =
            Monitor::all().map_err(|source| CaptureError::EnumerateDisplays { source })?;
        let monitor = monitors
            .into_iter()
            .find(|m| m.id() == display.id)
            .ok_or(CaptureError::DisplayGone { id: display.id })?;

        let rgba = monitor
            .capture_image()
            .map_err(|source| CaptureError::CaptureFailed {
                id: display.id,
                source,
            })?;

        Ok(Frame {
            // re-read: the monitor may have moved since enumeration
            bounds: bounds_of(&monitor),
            gray: DynamicImage::ImageRgba8(rgba).to_luma8(),
        })
    }
}

fn bounds_of(monitor: &Monitor) -> DisplayBounds {
    DisplayBounds {
        id: monitor.id(),
        x: monitor.x(),
        y: monitor.y(),
        width: monitor.width(),
        height: monitor.height(),
    }
}
