//! Boundary traits for the external mapping engine, plus the per-marker
//! relocation channel and marker context handle.
//!
//! The engine is a black box that owns the map's element tree and the
//! imperative marker lifecycle. Waypost only needs three capabilities from
//! it: look up the element it created for a marker id, measure an element,
//! and suppress gesture propagation on an element. Real bindings (wasm, FFI)
//! implement these traits; tests use in-memory fakes.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use waypost_core::geometry::Size;

/// A handle to an element the host engine created and owns.
pub trait HostElement {
    /// The element's current rendered size. Zero before first paint.
    fn measured_size(&self) -> Size;

    /// Stops clicks on this element reaching the underlying map.
    fn disable_click_propagation(&self);

    /// Stops scroll/pan gestures on this element reaching the underlying map.
    fn disable_scroll_propagation(&self);
}

/// The host engine's query surface.
pub trait HostEngine {
    /// Locates the element the engine created for the given marker id, if it
    /// exists yet.
    fn element_by_id(&self, id: &str) -> Option<Rc<dyn HostElement>>;
}

/// The long-lived off-tree render target owned by one marker instance.
///
/// Caller content lives here for the marker's whole lifetime; the relocation
/// step re-points the channel at the engine's current element on each add
/// signal rather than recreating the target. This is what preserves
/// component-local state across icon geometry changes and engine-internal
/// marker recreation. The channel is recreated only when the marker itself
/// is destroyed and rebuilt.
pub struct PortalNode<C> {
    content: C,
    handle: PortalHandle,
}

impl<C> PortalNode<C> {
    /// Creates a detached channel owning the given content.
    pub fn new(content: C) -> Self {
        Self {
            content,
            handle: PortalHandle::default(),
        }
    }

    /// Returns a cheap shared handle for measurement and relocation.
    pub fn handle(&self) -> PortalHandle {
        self.handle.clone()
    }

    /// The caller content held by this channel.
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Mutable access to the caller content.
    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// Whether the content is currently relocated into an engine element.
    pub fn is_attached(&self) -> bool {
        self.handle.is_attached()
    }
}

impl<C: fmt::Debug> fmt::Debug for PortalNode<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalNode")
            .field("content", &self.content)
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// A cheap-clone handle onto a [`PortalNode`]'s relocation state.
///
/// Layout getters hold clones of this so dynamic anchors can measure the
/// injected content at arbitrary later read times. All clones share one
/// channel; [`PortalHandle::ptr_eq`] tests channel identity.
#[derive(Clone, Default)]
pub struct PortalHandle {
    target: Rc<RefCell<Option<Rc<dyn HostElement>>>>,
}

impl PortalHandle {
    /// The current rendered size of the relocation target's element.
    ///
    /// Safe at any time: a detached channel measures as zero rather than
    /// failing.
    pub fn measured_size(&self) -> Size {
        self.target
            .borrow()
            .as_ref()
            .map_or_else(Size::default, |element| element.measured_size())
    }

    /// Whether the channel currently points at an engine element.
    pub fn is_attached(&self) -> bool {
        self.target.borrow().is_some()
    }

    /// The engine element the channel currently points at.
    pub fn target(&self) -> Option<Rc<dyn HostElement>> {
        self.target.borrow().clone()
    }

    /// Whether two handles refer to the same relocation channel.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.target, &other.target)
    }

    pub(crate) fn attach(&self, element: Rc<dyn HostElement>) {
        *self.target.borrow_mut() = Some(element);
    }

    pub(crate) fn detach(&self) {
        *self.target.borrow_mut() = None;
    }
}

impl fmt::Debug for PortalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalHandle")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Tooltip placement relative to the marker, as configured on the host
/// engine's tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipDirection {
    Auto,
    Right,
    Left,
    Top,
    Bottom,
    Center,
}

/// Which half of the map's current view the marker sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSide {
    Left,
    Right,
}

#[derive(Debug, Default)]
struct MarkerState {
    tooltip_direction: Option<TooltipDirection>,
    view_side: Option<ViewSide>,
}

/// A read-mostly handle to the underlying marker instance.
///
/// Starts unpopulated; the host glue feeds in the tooltip direction and view
/// side once known. Direction-sensitive layout reads degrade to the unset
/// defaults when the handle was never populated, so layout getters are safe
/// against an uninitialized marker.
#[derive(Debug, Clone, Default)]
pub struct MarkerHandle {
    state: Rc<RefCell<MarkerState>>,
}

impl MarkerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tooltip direction, or `None` when unset or never populated.
    pub fn tooltip_direction(&self) -> Option<TooltipDirection> {
        self.state.borrow().tooltip_direction
    }

    /// Records the tooltip direction configured on the engine's tooltip.
    pub fn set_tooltip_direction(&self, direction: Option<TooltipDirection>) {
        self.state.borrow_mut().tooltip_direction = direction;
    }

    /// Which half of the view the marker currently sits in, if known.
    pub fn view_side(&self) -> Option<ViewSide> {
        self.state.borrow().view_side
    }

    /// Records the marker's current view side.
    pub fn set_view_side(&self, side: Option<ViewSide>) {
        self.state.borrow_mut().view_side = side;
    }
}
