//! Synthetic mouse input
//!
//! The injector contract is fire-and-forget: `click` returns once the event
//! has been handed to the OS input queue, and a failure is something to log,
//! never a reason to stop scanning.

use std::thread;
use std::time::Duration;

use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use thiserror::Error;

use crate::catalog::ClickKind;

/// The error type for input injection.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to initialize input backend: {0}")]
    Init(#[from] enigo::NewConError),

    #[error("Failed to synthesize input: {0}")]
    Inject(#[from] enigo::InputError),
}

/// Performs clicks at absolute desktop coordinates.
pub trait InputInjector {
    fn click(&mut self, x: i32, y: i32, kind: ClickKind) -> Result<(), InputError>;
}

/// enigo-backed injector for the real desktop.
pub struct SystemInjector {
    enigo: Enigo,
}

impl SystemInjector {
    pub fn new() -> Result<Self, InputError> {
        Ok(Self {
            enigo: Enigo::new(&Settings::default())?,
        })
    }
}

impl InputInjector for SystemInjector {
    fn click(&mut self, x: i32, y: i32, kind: ClickKind) -> Result<(), InputError> {
        self.enigo.move_mouse(x, y, Coordinate::Abs)?;

        // let the pointer settle before pressing
        thread::sleep(Duration::from_millis(10));

        let button = match kind {
            ClickKind::Left => Button::Left,
            ClickKind::Right => Button::Right,
        };
        self.enigo.button(button, Direction::Click)?;
        Ok(())
    }
}
