//! The learn / control / list / delete operations.

use std::path::PathBuf;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use iv_core::{SignalAttrs, SignalProfile, SignalQuery};
use iv_store::{select_profile, SignalIndex, SignalStore};

use crate::config::{self, DeviceConfig};
use crate::device::IrTransceiver;
use crate::error::AppResult;

/// Outcome of a successful learning call.
#[derive(Debug, Clone)]
pub struct LearnReport {
    pub attrs: SignalAttrs,
    pub location: PathBuf,
    pub pulse_count: usize,
}

/// Outcome of a successful control call: the tuple of the profile that
/// was actually replayed, which may differ from the query on the
/// lower-priority attributes.
#[derive(Debug, Clone)]
pub struct ControlReport {
    pub attrs: SignalAttrs,
    pub pulse_count: usize,
}

/// One entry of the stored-signal listing.
#[derive(Debug, Clone)]
pub struct StoredSignal {
    pub attrs: SignalAttrs,
    pub location: PathBuf,
    pub learned_at: Option<String>,
}

/// The repository's operation surface, owning the store, its in-memory
/// index, the transceiver, and the selection RNG.
///
/// The index is refreshed here, after this service's own mutations,
/// because the index never refreshes itself; any other writer to the
/// same storage root leaves this service's snapshot stale until the
/// next refresh.
pub struct SignalService<D: IrTransceiver> {
    store: SignalStore,
    index: SignalIndex,
    driver: D,
    capture_timeout: Duration,
    transmit_repeat: u32,
    rng: StdRng,
}

impl<D: IrTransceiver> SignalService<D> {
    pub fn new(config: &DeviceConfig, driver: D) -> AppResult<Self> {
        Self::with_rng(config, driver, StdRng::from_entropy())
    }

    /// Construct with a caller-supplied RNG; pass a seeded one for
    /// reproducible selection.
    pub fn with_rng(config: &DeviceConfig, driver: D, rng: StdRng) -> AppResult<Self> {
        config::validate_config(config)?;
        let store = SignalStore::new(config.storage_root.clone())?;
        let index = SignalIndex::build(&store);
        Ok(Self {
            store,
            index,
            driver,
            capture_timeout: Duration::from_millis(config.capture_timeout_ms),
            transmit_repeat: config.transmit_repeat,
            rng,
        })
    }

    pub fn store(&self) -> &SignalStore {
        &self.store
    }

    pub fn index(&self) -> &SignalIndex {
        &self.index
    }

    /// Capture a waveform from the remote and file it under `attrs`,
    /// replacing anything previously taught for the same tuple.
    pub fn learn(&mut self, attrs: SignalAttrs) -> AppResult<LearnReport> {
        let pulses = self.driver.capture(self.capture_timeout)?;

        let mut profile = SignalProfile::new(attrs.clone(), pulses);
        profile.learned_at = Some(chrono::Utc::now().to_rfc3339());

        let location = self.store.put(&profile)?;
        self.index.refresh(&self.store);

        info!(
            location = %location.display(),
            pulses = profile.pulses.len(),
            "learned signal"
        );
        Ok(LearnReport {
            attrs,
            location,
            pulse_count: profile.pulses.len(),
        })
    }

    /// Select the best-matching stored waveform for `query` and replay
    /// it toward the appliance.
    pub fn control(&mut self, query: &SignalQuery) -> AppResult<ControlReport> {
        let profile = select_profile(&self.index, &self.store, query, &mut self.rng)?;

        for _ in 0..self.transmit_repeat {
            self.driver.transmit(&profile.pulses)?;
        }

        info!(
            power_on = profile.attrs.power_on,
            mode = %profile.attrs.mode,
            temperature = profile.attrs.temperature,
            fan_speed = %profile.attrs.fan_speed,
            pulses = profile.pulses.len(),
            "transmitted signal"
        );
        Ok(ControlReport {
            pulse_count: profile.pulses.len(),
            attrs: profile.attrs,
        })
    }

    /// Every stored signal with its on-disk location.
    pub fn list(&self) -> Vec<StoredSignal> {
        self.store
            .list_all()
            .map(|profile| StoredSignal {
                location: self.store.path_for(&profile.attrs),
                attrs: profile.attrs,
                learned_at: profile.learned_at,
            })
            .collect()
    }

    /// Forget the signal taught for `attrs`.
    pub fn delete(&mut self, attrs: &SignalAttrs) -> AppResult<()> {
        self.store.delete(attrs)?;
        self.index.refresh(&self.store);
        info!(
            power_on = attrs.power_on,
            mode = %attrs.mode,
            temperature = attrs.temperature,
            fan_speed = %attrs.fan_speed,
            "deleted signal"
        );
        Ok(())
    }
}
