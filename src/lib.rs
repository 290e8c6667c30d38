pub mod args;
pub mod capture;
pub mod catalog;
pub mod config;
pub mod detection;
pub mod input;
pub mod matching;

pub use capture::{FrameSource, ScreenCapturer};
pub use catalog::{ClickKind, Template};
pub use config::RunConfig;
pub use detection::{ControlFlags, DetectionLoop, LoopEvent};
pub use input::{InputInjector, SystemInjector};
