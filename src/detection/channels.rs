// Event channel between the detection loop and the foreground
use tokio::sync::mpsc;

use super::types::LoopEvent;

/// Helper function to create the loop's event channel
pub fn create_loop_channels() -> (mpsc::Sender<LoopEvent>, mpsc::Receiver<LoopEvent>) {
    mpsc::channel(32)
}
