//! In-memory snapshot of the stored signals.

use iv_core::SignalProfile;

use crate::store::SignalStore;

/// Derived, disposable cache of every stored profile, built by draining
/// the store once so selection does not re-walk the hierarchy per
/// request.
///
/// The snapshot is never refreshed automatically: a caller that mutates
/// the store must call [`SignalIndex::refresh`] afterward, or live with
/// a stale view. Keeping that explicit keeps the write path cheap.
#[derive(Debug, Clone, Default)]
pub struct SignalIndex {
    profiles: Vec<SignalProfile>,
}

impl SignalIndex {
    /// Snapshot the store's current contents.
    pub fn build(store: &SignalStore) -> Self {
        Self {
            profiles: store.list_all().collect(),
        }
    }

    /// Replace the snapshot with the store's current contents.
    pub fn refresh(&mut self, store: &SignalStore) {
        self.profiles = store.list_all().collect();
    }

    /// Read-only view of the snapshot.
    pub fn all(&self) -> &[SignalProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
