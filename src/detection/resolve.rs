//! Click-point resolution
//!
//! Pure arithmetic: display origin + frame-local match location + the
//! template's resolved offset. No clamping happens here; placing templates so
//! the click point stays on screen is the operator's job.

use crate::capture::DisplayBounds;
use crate::catalog::{ClickKind, Template};

/// An absolute desktop coordinate plus the button to click it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickTarget {
    pub x: i32,
    pub y: i32,
    pub kind: ClickKind,
}

pub fn resolve_click(
    bounds: &DisplayBounds,
    match_x: u32,
    match_y: u32,
    template: &Template,
) -> ClickTarget {
    ClickTarget {
        x: bounds.x + match_x as i32 + template.offset_x as i32,
        y: bounds.y + match_y as i32 + template.offset_y as i32,
        kind: template.click_kind,
    }
}
