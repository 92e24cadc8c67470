//! Cascading-priority signal selection.

use rand::Rng;
use tracing::debug;

use iv_core::{SignalProfile, SignalQuery};

use crate::index::SignalIndex;
use crate::pattern::SearchPattern;
use crate::store::SignalStore;
use crate::{StoreError, StoreResult};

/// Narrow `candidates` to those satisfying `pred`, unless that would
/// empty the set, in which case the filter is skipped entirely.
fn narrow_if_any<F>(candidates: &mut Vec<SignalProfile>, pred: F)
where
    F: Fn(&SignalProfile) -> bool,
{
    let narrowed: Vec<SignalProfile> = candidates.iter().filter(|p| pred(p)).cloned().collect();
    if !narrowed.is_empty() {
        *candidates = narrowed;
    }
}

/// Pick one stored profile for a partially-specified query.
///
/// Attributes are honored in decreasing significance: power, mode,
/// temperature, fan speed. Power is the only hard gate; if narrowing by
/// it leaves nothing in the index snapshot, the durable store is
/// re-walked with the query's wildcard pattern and those records become
/// the candidates instead. Each remaining attribute narrows the set only
/// when at least one candidate survives, so a fan speed the device was
/// never taught degrades to a close neighbor rather than a failure.
///
/// The final pick among surviving candidates is uniformly random; pass a
/// seeded `rng` for reproducible behavior.
pub fn select_profile<R: Rng>(
    index: &SignalIndex,
    store: &SignalStore,
    query: &SignalQuery,
    rng: &mut R,
) -> StoreResult<SignalProfile> {
    let mut candidates: Vec<SignalProfile> = index.all().to_vec();

    if let Some(power_on) = query.power_on {
        candidates.retain(|p| p.attrs.power_on == power_on);
    }
    if candidates.is_empty() {
        let pattern = SearchPattern::for_query(query);
        candidates = store.list_matching(&pattern).collect();
        debug!(
            pattern = %pattern,
            found = candidates.len(),
            "index snapshot exhausted, fell back to storage walk"
        );
    }

    if let Some(mode) = query.mode {
        narrow_if_any(&mut candidates, |p| p.attrs.mode == mode);
    }
    if let Some(temperature) = query.temperature {
        narrow_if_any(&mut candidates, |p| p.attrs.temperature == temperature);
    }
    if let Some(fan_speed) = &query.fan_speed {
        narrow_if_any(&mut candidates, |p| p.attrs.fan_speed == *fan_speed);
    }

    if candidates.is_empty() {
        return Err(StoreError::NotFound {
            key: SearchPattern::for_query(query).to_string(),
        });
    }

    let pick = rng.gen_range(0..candidates.len());
    debug!(candidates = candidates.len(), pick, "selected signal");
    Ok(candidates.swap_remove(pick))
}
