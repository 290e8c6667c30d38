// Detection loop module
// The single active component: a state machine that periodically captures
// every display, matches every template, and dispatches clicks.

pub mod channels;
pub mod fsm;
pub mod resolve;
pub mod types;

#[cfg(test)]
mod tests;

pub use channels::create_loop_channels;
pub use fsm::DetectionLoop;
pub use resolve::{ClickTarget, resolve_click};
pub use types::{ControlFlags, LoopEvent, LoopState};
