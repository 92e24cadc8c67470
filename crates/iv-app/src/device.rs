//! The infrared transceiver seam.

use std::time::Duration;

use iv_core::PulseSequence;

/// Failures reported by the transceiver hardware.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DriverError {
    #[error("Capture failed with driver status {status}")]
    CaptureStatus { status: i32 },

    #[error("Capture produced an empty waveform")]
    EmptyCapture,

    #[error("Transmit failed: {message}")]
    Transmit { message: String },
}

/// Contract of the infrared capture/replay hardware.
///
/// The repository never interprets pulse timing; it stores whatever
/// `capture` hands back and replays it verbatim through `transmit`.
/// Implementations must map a non-OK receiver status or an empty
/// waveform to an error rather than returning an empty sequence.
pub trait IrTransceiver {
    /// Record one waveform, waiting at most `timeout` for a signal.
    fn capture(&mut self, timeout: Duration) -> Result<PulseSequence, DriverError>;

    /// Replay a waveform. Fire-and-forget: nothing is read back.
    fn transmit(&mut self, pulses: &[u32]) -> Result<(), DriverError>;
}
