use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::{DivergenceSignal, SignalKind};

/// One cell of the scan grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignalKey {
    pub pair: String,
    pub timeframe: String,
}

impl SignalKey {
    pub fn new(pair: impl Into<String>, timeframe: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            timeframe: timeframe.into(),
        }
    }
}

/// Last-emitted-kind store backing the emission gate.
pub trait SignalStore: Send + Sync {
    /// Records `kind` for `key` and reports whether it differed from what
    /// was stored before (or nothing was stored). Check and record happen
    /// as one atomic step so two scanners racing on the same key cannot
    /// both claim it.
    fn claim(&self, key: &SignalKey, kind: SignalKind) -> bool;

    fn last_kind(&self, key: &SignalKey) -> Option<SignalKind>;
}

/// Process-lifetime in-memory store. Entries never expire; a restart
/// forgets everything and the next detection re-alerts.
#[derive(Debug, Default)]
pub struct MemorySignalStore {
    last: Mutex<HashMap<SignalKey, SignalKind>>,
}

impl MemorySignalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SignalStore for MemorySignalStore {
    fn claim(&self, key: &SignalKey, kind: SignalKind) -> bool {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        last.insert(key.clone(), kind) != Some(kind)
    }

    fn last_kind(&self, key: &SignalKey) -> Option<SignalKind> {
        self.last
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .copied()
    }
}

/// The emission gate: a signal goes out only when it is strong enough and
/// its kind flips the stored state for the key. Weak signals are dropped
/// without touching the store, so a later strong signal of the same kind
/// still alerts.
pub fn should_emit(store: &dyn SignalStore, signal: &DivergenceSignal, min_strength: u32) -> bool {
    signal.strength >= min_strength
        && store.claim(
            &SignalKey::new(&signal.pair, &signal.timeframe),
            signal.kind,
        )
}
