//! Client/store agreement checks.
//!
//! Once the client has applied every store notification delivered so far,
//! what it shows must agree with what the store says: the right view, one
//! roster row per peer, listener restrictions, audio labels. The harness
//! captures both sides into a [`ClientSnapshot`] at those quiescent points
//! and runs every registered [`Invariant`] against it.
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! registry.assert_all(&client.snapshot(), "after join");
//! ```

mod checks;
mod snapshot;

pub use checks::{
    AudioLabelsMatchStore, ListenerMuteHidden, LocalMenuHiddenForListener, RosterMatchesStore,
    ViewMatchesConnection,
};
pub use snapshot::{ClientSnapshot, StoreSnapshot};
use thiserror::Error;

/// Outcome of one check.
pub type InvariantResult = Result<(), Violation>;

/// A failed check.
#[derive(Debug, Clone, Error)]
#[error("{invariant}: {message}")]
pub struct Violation {
    /// Name of the failed invariant.
    pub invariant: &'static str,
    /// What disagreed.
    pub message: String,
}

/// A property relating the App's presentation to the store.
pub trait Invariant: Send + Sync {
    /// Stable name, used in violation reports.
    fn name(&self) -> &'static str;

    /// Check one snapshot.
    fn check(&self, state: &ClientSnapshot) -> InvariantResult;
}

/// Ordered set of invariants run together.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InvariantRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl InvariantRegistry {
    /// Registry without any checks.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Every client invariant:
    ///
    /// - [`ViewMatchesConnection`]: the view the connection implies, and only it
    /// - [`RosterMatchesStore`]: one row per store peer, in store order
    /// - [`LocalMenuHiddenForListener`]: no self-actions for listeners
    /// - [`ListenerMuteHidden`]: mute control hidden for listener sessions
    /// - [`AudioLabelsMatchStore`]: mute labels follow the store's flag
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(ViewMatchesConnection);
        registry.add(RosterMatchesStore);
        registry.add(LocalMenuHiddenForListener);
        registry.add(ListenerMuteHidden);
        registry.add(AudioLabelsMatchStore);
        registry
    }

    /// Register another check. Checks run in registration order.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Names of the registered checks.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.invariants.iter().map(|inv| inv.name())
    }

    /// Run every check. A failing check does not stop the others.
    pub fn check_all(&self, state: &ClientSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<Violation> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Run every check and panic listing all failures.
    #[allow(clippy::panic, reason = "test assertion helper")]
    pub fn assert_all(&self, state: &ClientSnapshot, context: &str) {
        let Err(violations) = self.check_all(state) else {
            return;
        };
        let report = violations.iter().fold(String::new(), |mut out, v| {
            out.push_str("\n  ");
            out.push_str(&v.to_string());
            out
        });
        panic!("client disagrees with store {context}:{report}");
    }

    /// Number of checks.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Whether no check is registered.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_runs_in_order() {
        let registry = InvariantRegistry::standard();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names.len(), registry.len());
        assert_eq!(names.first(), Some(&ViewMatchesConnection.name()));
    }

    #[test]
    fn fresh_client_passes_invariants() {
        let registry = InvariantRegistry::standard();
        assert!(registry.check_all(&ClientSnapshot::default()).is_ok());
    }

    #[test]
    fn stale_join_form_is_reported() {
        let snapshot = ClientSnapshot {
            store: StoreSnapshot { connected: true, ..StoreSnapshot::default() },
            ..ClientSnapshot::default()
        };

        let violations = InvariantRegistry::standard().check_all(&snapshot).unwrap_err();

        assert!(violations.iter().any(|v| v.invariant == ViewMatchesConnection.name()));
    }
}
