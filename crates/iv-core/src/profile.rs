//! The persisted signal record.

use serde::{Deserialize, Serialize};

use crate::attrs::SignalAttrs;

/// Raw infrared waveform: calibrated mark/space durations in
/// microseconds. Opaque to the repository; never interpreted, only
/// stored and replayed.
pub type PulseSequence = Vec<u32>;

/// One stored waveform plus the command tuple it was taught under.
///
/// The on-disk form is a single flat JSON object so records written by
/// earlier firmware load unchanged; `learned_at` is additive and
/// optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalProfile {
    #[serde(flatten)]
    pub attrs: SignalAttrs,
    #[serde(rename = "signal_data")]
    pub pulses: PulseSequence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learned_at: Option<String>,
}

impl SignalProfile {
    pub fn new(attrs: SignalAttrs, pulses: PulseSequence) -> Self {
        Self {
            attrs,
            pulses,
            learned_at: None,
        }
    }
}
