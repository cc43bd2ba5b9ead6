//! Process-wide record of singleton lifecycle events.
//!
//! [`Registry`] is itself a process-wide global accessed via a
//! `std::sync::OnceLock`.  Every [`SingletonCell`][crate::cell::SingletonCell]
//! reports into it, keyed by the guarded type's name: creation, failed
//! construction attempts, and privileged constructions that were rejected or
//! redirected.  The registry is diagnostic only; no cell reads it back.
//!
//! Entries are keyed by `std::any::type_name`, so two cells guarding the
//! same type share one entry.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use parking_lot::Mutex;

/// Lifecycle counters for one guarded type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Entry {
    /// `true` once an instance has been published.
    pub created: bool,
    /// Construction attempts that returned an error or panicked.
    pub failed_attempts: u32,
    /// Privileged constructions refused with `ReentrantConstruction`.
    pub rejected: u32,
    /// Privileged constructions answered with the canonical instance.
    pub redirected: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Created,
    Failed,
    Rejected,
    Redirected,
}

/// Process-wide table of [`Entry`] values.
pub struct Registry {
    entries: Mutex<BTreeMap<&'static str, Entry>>,
}

static INSTANCE: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// Return a reference to the global registry.
    pub fn instance() -> &'static Registry {
        INSTANCE.get_or_init(|| Registry {
            entries: Mutex::new(BTreeMap::new()),
        })
    }

    /// Counters recorded for `type_name`, if any event has been seen.
    pub fn entry(&self, type_name: &str) -> Option<Entry> {
        self.entries.lock().get(type_name).copied()
    }

    /// Return `true` if an instance of `type_name` has been published.
    pub fn is_created(&self, type_name: &str) -> bool {
        self.entry(type_name).is_some_and(|e| e.created)
    }

    /// Copy of every entry, ordered by type name.
    pub fn snapshot(&self) -> Vec<(&'static str, Entry)> {
        self.entries
            .lock()
            .iter()
            .map(|(name, entry)| (*name, *entry))
            .collect()
    }

    /// Mark `type_name` as created by a mechanism other than a
    /// [`SingletonCell`][crate::cell::SingletonCell], such as
    /// [`define_singleton!`][crate::define_singleton].
    pub fn record_created(&self, type_name: &'static str) {
        self.record(type_name, Event::Created);
    }

    pub(crate) fn record(&self, type_name: &'static str, event: Event) {
        let mut entries = self.entries.lock();
        let entry = entries.entry(type_name).or_default();
        match event {
            Event::Created => entry.created = true,
            Event::Failed => entry.failed_attempts += 1,
            Event::Rejected => entry.rejected += 1,
            Event::Redirected => entry.redirected += 1,
        }
    }
}
