//! The per-marker lifecycle/relocation bridge.
//!
//! The host engine mutates its element tree imperatively, outside any
//! declarative render pass, and signals add/remove per marker. The bridge
//! listens for those signals, locates the element the engine created for
//! the marker's id, and re-points the relocation channel into it. On remove
//! the content is preserved off-tree inside the channel rather than
//! destroyed, so component-local state survives icon geometry changes and
//! engine-internal marker recreation (e.g. clustering).

use std::fmt;

use log::debug;

use crate::error::WaypostError;
use crate::host::{HostEngine, PortalHandle};

/// Attachment state of a marker's content. Cyclic: the engine may remove
/// and re-add the same marker any number of times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BridgeState {
    #[default]
    Detached,
    Attached,
}

/// Caller-supplied lifecycle callback, composed after the bridge's own
/// bookkeeping on every engine signal.
pub type LifecycleCallback = Box<dyn FnMut()>;

/// Owns the relocation of one marker's content in and out of the engine's
/// element tree.
pub struct LifecycleBridge {
    marker_id: String,
    state: BridgeState,
    portal: PortalHandle,
    disable_click_propagation: bool,
    disable_scroll_propagation: bool,
    on_add: Option<LifecycleCallback>,
    on_remove: Option<LifecycleCallback>,
}

impl LifecycleBridge {
    /// Creates a detached bridge for the given marker id and channel.
    pub fn new(
        marker_id: impl Into<String>,
        portal: PortalHandle,
        disable_click_propagation: bool,
        disable_scroll_propagation: bool,
    ) -> Self {
        Self {
            marker_id: marker_id.into(),
            state: BridgeState::default(),
            portal,
            disable_click_propagation,
            disable_scroll_propagation,
            on_add: None,
            on_remove: None,
        }
    }

    /// Sets a caller callback composed after the bridge's add handling
    /// (builder style).
    pub fn with_on_add(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_add = Some(Box::new(callback));
        self
    }

    /// Sets a caller callback composed after the bridge's remove handling
    /// (builder style).
    pub fn with_on_remove(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_remove = Some(Box::new(callback));
        self
    }

    /// The current attachment state.
    pub fn state(&self) -> BridgeState {
        self.state
    }

    /// Handles the engine's "added" signal.
    ///
    /// Locates the element matching the marker id, applies the configured
    /// gesture guards, re-points the channel into it, then runs the caller's
    /// add callback.
    ///
    /// # Errors
    ///
    /// Returns [`WaypostError::MissingElement`] when no element exists for
    /// the marker id; the engine contract guarantees the element is created
    /// before this signal fires.
    pub fn handle_add(&mut self, engine: &dyn HostEngine) -> Result<(), WaypostError> {
        let element =
            engine
                .element_by_id(&self.marker_id)
                .ok_or_else(|| WaypostError::MissingElement {
                    id: self.marker_id.clone(),
                })?;

        if self.disable_click_propagation {
            element.disable_click_propagation();
        }
        if self.disable_scroll_propagation {
            element.disable_scroll_propagation();
        }

        self.portal.attach(element);
        self.state = BridgeState::Attached;
        debug!(marker_id = self.marker_id; "Marker content relocated into engine element");

        if let Some(callback) = &mut self.on_add {
            callback();
        }
        Ok(())
    }

    /// Handles the engine's "removed" signal.
    ///
    /// Detaches the channel (preserving the content off-tree), then runs the
    /// caller's remove callback.
    pub fn handle_remove(&mut self) {
        self.portal.detach();
        self.state = BridgeState::Detached;
        debug!(marker_id = self.marker_id; "Marker content detached, preserved off-tree");

        if let Some(callback) = &mut self.on_remove {
            callback();
        }
    }
}

impl fmt::Debug for LifecycleBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleBridge")
            .field("marker_id", &self.marker_id)
            .field("state", &self.state)
            .finish()
    }
}
