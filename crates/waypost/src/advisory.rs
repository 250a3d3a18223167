//! Coded, deduplicated advisory warnings.
//!
//! Advisories flag configuration that is almost certainly unintended (e.g. a
//! manual layout with no icon size) without blocking rendering. Each carries
//! a stable code, is emitted through [`log::warn!`] with the library prefix,
//! and fires at most once per owning instance regardless of how often the
//! owner re-renders.

use std::cell::Cell;
use std::rc::Rc;

use log::warn;

/// Prefix attached to every advisory message.
const PREFIX: &str = "waypost";

/// Stable advisory codes.
pub mod codes {
    /// Manual layout selected but `icon_size` was never supplied, so the
    /// injected content would be invisible.
    pub const UNBOUND_MANUAL_SIZE: &str = "UNBOUND_MANUAL_SIZE";

    /// Component marker options were supplied alongside an icon that is not
    /// component content, so the options have no effect.
    pub const UNUSED_OPTS: &str = "UNUSED_OPTS";
}

/// A per-instance one-shot advisory latch.
///
/// Owned by whatever the "once" should be scoped to (a marker instance, a
/// layout evaluator). Deliberately not a module-level set: two markers with
/// the same misconfiguration each get their own warning. Clones share the
/// latch, so the owner can hand the flag to collaborators it replaces over
/// its lifetime without resetting the "once".
#[derive(Debug, Clone, Default)]
pub struct AdvisoryFlag {
    advised: Rc<Cell<bool>>,
}

impl AdvisoryFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits the advisory unless this flag already fired. Returns whether
    /// the warning was emitted.
    pub fn advise_once(&self, code: &'static str, message: &str) -> bool {
        if self.advised.get() {
            return false;
        }
        self.advised.set(true);
        warn!(code; "[{PREFIX}] [{code}] {message}");
        true
    }

    /// Whether this flag has already fired.
    pub fn has_advised(&self) -> bool {
        self.advised.get()
    }
}
