//! The assembled component marker.
//!
//! A [`ComponentMarker`] owns everything one marker needs for its lifetime:
//! the generated id, the relocation channel holding the caller's content,
//! the marker context handle, the selected layout evaluator, the memoized
//! base icon, and the lifecycle bridge. The host glue forwards the engine's
//! add/remove signals to it and hands its [`BaseIcon`] to the engine.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use crate::advisory::{AdvisoryFlag, codes};
use crate::bridge::{BridgeState, LifecycleBridge};
use crate::config::{LayoutMode, MarkerConfig};
use crate::error::WaypostError;
use crate::host::{HostEngine, MarkerHandle, PortalNode};
use crate::icon::{BaseIcon, build_base_icon};
use crate::layout::auto::AutoLayout;
use crate::layout::manual::ManualLayout;
use crate::layout::{LayoutEvaluator, LayoutInput, LayoutOutput};

static NEXT_MARKER_ID: AtomicU64 = AtomicU64::new(0);

/// Generates a process-unique marker id, stable for one marker's lifetime.
///
/// The id doubles as the element identity attribute in the icon markup and
/// as the correlation key the bridge uses to locate the engine's element.
fn next_marker_id() -> String {
    format!("marker-{}", NEXT_MARKER_ID.fetch_add(1, Ordering::Relaxed))
}

fn make_evaluator(config: &MarkerConfig, size_advisory: &AdvisoryFlag) -> Box<dyn LayoutEvaluator> {
    match config.layout_mode() {
        LayoutMode::Auto => Box::new(AutoLayout::new(config.auto_layout().clone())),
        LayoutMode::Manual => Box::new(
            ManualLayout::new(config.manual_layout().clone())
                .with_size_warning(config.root_size_warning())
                .with_size_advisory(size_advisory.clone()),
        ),
    }
}

/// A marker whose icon is arbitrary stateful content of type `C`.
///
/// The content lives in the marker's relocation channel for the marker's
/// whole lifetime; the engine's add/remove signals move it in and out of the
/// engine-owned element tree without destroying it. Layout is evaluated at
/// construction and re-evaluated only on a meaningful configuration change,
/// so recomputed-but-equal geometry never forces the engine to recreate the
/// icon element.
pub struct ComponentMarker<C> {
    id: String,
    config: MarkerConfig,
    portal: PortalNode<C>,
    marker: MarkerHandle,
    evaluator: Box<dyn LayoutEvaluator>,
    last_output: LayoutOutput,
    icon: BaseIcon,
    icon_generation: u64,
    bridge: LifecycleBridge,
    /// Latch for the manual layout's missing-size advisory. Shared with
    /// every evaluator this marker builds, so config changes do not reset
    /// the once-per-marker semantics.
    size_advisory: AdvisoryFlag,
}

impl<C> ComponentMarker<C> {
    /// Creates a marker with the layout strategy selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`WaypostError`] when a configured position spec fails
    /// validation; the marker is not created.
    pub fn new(content: C, config: MarkerConfig) -> Result<Self, WaypostError> {
        let size_advisory = AdvisoryFlag::new();
        let evaluator = make_evaluator(&config, &size_advisory);
        let mut marker = Self::with_evaluator(content, evaluator, config)?;
        marker.size_advisory = size_advisory;
        Ok(marker)
    }

    /// Creates a marker driven by a custom layout evaluator.
    ///
    /// The built-in strategies cover the common cases; this is the seam for
    /// callers packaging their own layout logic.
    ///
    /// # Errors
    ///
    /// Returns a [`WaypostError`] when evaluation fails or the evaluator's
    /// output carries a foreign strategy tag.
    pub fn with_evaluator(
        content: C,
        evaluator: Box<dyn LayoutEvaluator>,
        config: MarkerConfig,
    ) -> Result<Self, WaypostError> {
        let id = next_marker_id();
        let portal = PortalNode::new(content);
        let marker = MarkerHandle::new();

        let input = LayoutInput {
            portal: portal.handle(),
            marker: marker.clone(),
        };
        let output = evaluator.evaluate(&input)?;
        let icon = build_base_icon(&output, evaluator.name(), &id)?;

        let bridge = LifecycleBridge::new(
            id.clone(),
            portal.handle(),
            config.disable_click_propagation(),
            config.disable_scroll_propagation(),
        );

        debug!(marker_id = id, layout = evaluator.name(); "Component marker created");

        Ok(Self {
            id,
            config,
            portal,
            marker,
            evaluator,
            last_output: output,
            icon,
            icon_generation: 0,
            bridge,
            size_advisory: AdvisoryFlag::new(),
        })
    }

    /// Sets a caller callback composed after the bridge's add handling
    /// (builder style).
    pub fn with_on_add(mut self, callback: impl FnMut() + 'static) -> Self {
        self.bridge = self.bridge.with_on_add(callback);
        self
    }

    /// Sets a caller callback composed after the bridge's remove handling
    /// (builder style).
    pub fn with_on_remove(mut self, callback: impl FnMut() + 'static) -> Self {
        self.bridge = self.bridge.with_on_remove(callback);
        self
    }

    /// The marker's generated id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The current configuration.
    pub fn config(&self) -> &MarkerConfig {
        &self.config
    }

    /// The caller content held by this marker's relocation channel.
    pub fn content(&self) -> &C {
        self.portal.content()
    }

    /// Mutable access to the caller content.
    pub fn content_mut(&mut self) -> &mut C {
        self.portal.content_mut()
    }

    /// The read-only marker context handle for descendant content.
    pub fn context(&self) -> MarkerHandle {
        self.marker.clone()
    }

    /// The relocation channel, for identity checks and measurement.
    pub fn portal(&self) -> &PortalNode<C> {
        &self.portal
    }

    /// The current base icon descriptor.
    pub fn icon(&self) -> &BaseIcon {
        &self.icon
    }

    /// Bumps whenever the icon is actually rebuilt. Equal recomputed
    /// geometry leaves the generation (and the engine's element) untouched.
    pub fn icon_generation(&self) -> u64 {
        self.icon_generation
    }

    /// The bridge's current attachment state.
    pub fn state(&self) -> BridgeState {
        self.bridge.state()
    }

    /// Whether the content is currently relocated into the engine's tree.
    pub fn is_attached(&self) -> bool {
        self.portal.is_attached()
    }

    /// Applies a new configuration, re-evaluating layout only when the
    /// configuration meaningfully changed and rebuilding the icon only when
    /// the evaluated output differs from the previous one.
    ///
    /// # Errors
    ///
    /// Returns a [`WaypostError`] when the new configuration's position
    /// specs fail validation; the previous configuration stays in effect.
    pub fn set_config(&mut self, config: MarkerConfig) -> Result<(), WaypostError> {
        if config == self.config {
            return Ok(());
        }

        let evaluator = make_evaluator(&config, &self.size_advisory);
        let input = LayoutInput {
            portal: self.portal.handle(),
            marker: self.marker.clone(),
        };
        let output = evaluator.evaluate(&input)?;

        if output != self.last_output {
            self.icon = build_base_icon(&output, evaluator.name(), &self.id)?;
            self.icon_generation += 1;
            debug!(marker_id = self.id, generation = self.icon_generation; "Base icon rebuilt");
        }

        self.evaluator = evaluator;
        self.last_output = output;
        self.config = config;
        Ok(())
    }

    /// Entry point for the engine's "added" signal.
    ///
    /// # Errors
    ///
    /// Returns [`WaypostError::MissingElement`] when the engine has not
    /// created the marker's element, which the engine contract forbids.
    pub fn handle_add(&mut self, engine: &dyn HostEngine) -> Result<(), WaypostError> {
        self.bridge.handle_add(engine)
    }

    /// Entry point for the engine's "removed" signal.
    pub fn handle_remove(&mut self) {
        self.bridge.handle_remove();
    }
}

impl<C: fmt::Debug> fmt::Debug for ComponentMarker<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentMarker")
            .field("id", &self.id)
            .field("layout", &self.evaluator.name())
            .field("state", &self.bridge.state())
            .field("content", self.portal.content())
            .finish()
    }
}

/// One-shot advisory for outer marker surfaces: component options were
/// supplied but the icon is not component content, so they have no effect.
///
/// Fires only when the configuration actually differs from the defaults and
/// the `unused_opts_warning` switch is on; `flag` scopes the "once" to the
/// caller's marker instance.
pub fn advise_unused_component_opts(config: &MarkerConfig, flag: &AdvisoryFlag) -> bool {
    if !config.unused_opts_warning() || !config.is_customized() {
        return false;
    }
    flag.advise_once(
        codes::UNUSED_OPTS,
        "component marker options were supplied but the icon is not component content; the \
         options will have no effect. Set `unused_opts_warning: false` to silence this warning.",
    )
}
