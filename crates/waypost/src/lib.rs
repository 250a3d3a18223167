//! Waypost - stateful component-content markers for imperative map engines.
//!
//! An imperative mapping engine owns its markers' element tree and only
//! understands static icon markup. Waypost bridges that world with
//! declaratively-rendered, stateful content: each marker owns a long-lived
//! relocation channel holding the caller's content, a layout strategy that
//! derives icon/popup/tooltip anchors (lazily, from the content's *measured*
//! size, in auto mode), and a lifecycle bridge that moves the content into
//! the engine-created element on the engine's add signal and preserves it
//! off-tree on remove.
//!
//! The engine itself stays behind the [`host::HostEngine`] /
//! [`host::HostElement`] traits.
//!
//! # Examples
//!
//! ```
//! use waypost::ComponentMarker;
//! use waypost::config::{AutoLayoutConfig, MarkerConfig};
//! use waypost::position::{AnchorPreset, Position};
//!
//! // Content is any caller type; it survives engine-driven remove/re-add.
//! struct Badge {
//!     clicks: u32,
//! }
//!
//! let config = MarkerConfig::default()
//!     .with_auto_layout(
//!         AutoLayoutConfig::default().with_icon_anchor(Position::from(AnchorPreset::Bottom)),
//!     )
//!     .with_disable_click_propagation(true);
//!
//! let marker = ComponentMarker::new(Badge { clicks: 0 }, config)
//!     .expect("valid configuration");
//!
//! // The icon markup carries the generated id the engine will create an
//! // element for; the bridge later relocates the content into it.
//! assert!(marker.icon().html().contains(marker.id()));
//! ```

pub mod advisory;
pub mod bridge;
pub mod config;
pub mod host;
pub mod icon;
pub mod layout;
pub mod marker;

mod error;

pub use waypost_core::{dynamic, geometry, position};

pub use error::WaypostError;
pub use marker::ComponentMarker;
